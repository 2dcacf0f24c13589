use crate::event_loop::{Command, EngineMessage};
use crossbeam::channel::Sender;
use std::io::{self, BufRead};
use std::thread;

pub const HELP: &str = "Commands: start | stop | tempo N | beats N | toggle CHORD | status | chords | help | quit";

/// Maps one typed line to a command. Blank lines and unknown words map to
/// `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next()?.to_ascii_lowercase();
    let arg = words.next();

    match (verb.as_str(), arg) {
        ("start" | "go", None) => Some(Command::Start),
        ("stop" | "s", None) => Some(Command::Stop),
        ("tempo" | "bpm", Some(n)) => n.parse().ok().map(Command::Tempo),
        ("beats", Some(n)) => n.parse().ok().map(Command::Beats),
        ("toggle" | "t", Some(chord)) => Some(Command::Toggle(chord.to_string())),
        ("status", None) => Some(Command::Status),
        ("chords", None) => Some(Command::ListChords),
        ("help" | "?", None) => Some(Command::Help),
        ("quit" | "q" | "exit", None) => Some(Command::Quit),
        _ => None,
    }
}

/// Reads stdin on a named thread and forwards every line to the event loop.
/// The thread ends at end of input or once the event loop has gone away.
pub fn spawn_reader(message_tx: Sender<EngineMessage>) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || {
            log::info!("Command reader started");
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        log::error!("Failed to read command: {}", e);
                        break;
                    }
                };
                let message = match parse_command(&line) {
                    Some(command) => EngineMessage::Command(command),
                    None if line.trim().is_empty() => continue,
                    None => EngineMessage::Unrecognized(line),
                };
                log::debug!("Sending message to event loop: {:?}", message);
                if message_tx.send(message).is_err() {
                    break;
                }
            }
            log::info!("Command reader finished");
        })
}
