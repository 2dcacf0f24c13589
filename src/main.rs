use clap::Parser;
use crossbeam::channel;
use std::time::Duration;
use ukepractice::{
    config::Settings,
    create_session, input, list_catalog, logging, setup,
    ui::{ProgressView, TIP},
    validate_chords, AppError, Args, EventLoop,
};

fn main() {
    let args = parse_command_line_arguments();

    if args.list_chords {
        list_available_chords(&list_catalog());
        return;
    }

    if let Err(e) = run(args) {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn parse_command_line_arguments() -> Args {
    Args::parse()
}

fn list_available_chords(chords: &[String]) {
    println!("Available chords:");
    for chord in chords {
        println!("  - {}", chord);
    }
}

fn initialize_logging(settings: &Settings, args: &Args) {
    match logging::init_logger(settings.level_filter()) {
        Ok(()) => {
            log::info!("Application starting");
            if let Some(path) = &args.config {
                log::info!("Settings file: {}", path.display());
            }
            log::debug!("Effective settings: {:?}", settings);
        }
        Err(e) => eprintln!("Logging disabled: {}", e),
    }
}

fn load_settings(args: &Args) -> Result<Settings, AppError> {
    let mut settings = Settings::load(args.config.as_deref())?;
    settings.apply_args(args);
    validate_chords(&settings.chords).map_err(AppError::Cli)?;
    Ok(settings)
}

fn run(args: Args) -> Result<(), AppError> {
    let settings = load_settings(&args)?;
    initialize_logging(&settings, &args);

    let mut session_config = settings.session_config()?;
    if args.interactive {
        session_config = setup::interactive(&session_config)?;
    }

    let mut session = create_session(session_config, settings.seed, settings.live_tempo);

    let (message_tx, message_rx) = channel::unbounded();
    input::spawn_reader(message_tx)?;

    println!("{}", TIP);
    println!("{}", input::HELP);

    if args.autostart {
        session.start()?;
    }

    let mut event_loop = EventLoop::new(session, message_rx, ProgressView::new());
    if let Some(secs) = args.duration {
        event_loop = event_loop.with_time_limit(Duration::from_secs(secs));
    }

    let (_, summary) = event_loop.run();
    log::info!("{}", summary.describe());
    println!("{}", summary.describe());
    Ok(())
}
