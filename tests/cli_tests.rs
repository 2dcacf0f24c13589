#[cfg(test)]
mod tests {
    use clap::Parser;
    use ukepractice::*;

    #[test]
    fn test_list_catalog() {
        let chords = list_catalog();
        assert_eq!(chords.len(), 10);
        assert_eq!(chords[0], "C");
        assert_eq!(chords[9], "G7");
    }

    #[test]
    fn test_args_with_chord_list() {
        let args = Args::parse_from(["test", "--chords", "C,Am,D7", "--tempo", "80"]);
        assert_eq!(
            args.chords,
            Some(vec!["C".to_string(), "Am".to_string(), "D7".to_string()])
        );
        assert_eq!(args.tempo, Some(80));
        assert!(!args.list_chords);
        assert!(!args.autostart);
    }

    #[test]
    fn test_args_without_overrides() {
        let args = Args::parse_from(["test"]);
        assert_eq!(args.tempo, None);
        assert_eq!(args.beats, None);
        assert_eq!(args.chords, None);
        assert_eq!(args.duration, None);
        assert!(!args.interactive);
    }

    #[test]
    fn test_args_session_flags() {
        let args = Args::parse_from([
            "test",
            "-b",
            "150",
            "--beats",
            "2",
            "--autostart",
            "--duration",
            "90",
            "--seed",
            "3",
        ]);
        assert_eq!(args.tempo, Some(150));
        assert_eq!(args.beats, Some(2));
        assert!(args.autostart);
        assert_eq!(args.duration, Some(90));
        assert_eq!(args.seed, Some(3));
    }

    #[test]
    fn test_valid_chord_names() {
        let names = vec!["C".to_string(), "em".to_string(), "G7".to_string()];
        assert!(validate_chords(&names).is_ok());
    }

    #[test]
    fn test_invalid_chord_names_are_listed() {
        let names = vec!["C".to_string(), "Bb".to_string()];
        let error_msg = validate_chords(&names).unwrap_err();
        assert!(error_msg.contains("'Bb'"));
        assert!(error_msg.contains("  - Dm"));
    }

    #[test]
    fn test_seeded_sessions_repeat_the_same_sequence() {
        let draw = |seed| {
            let mut session = create_session(SessionConfig::default(), Some(seed), false);
            session.start().unwrap();
            let mut seen = vec![session.current_chord().to_string()];
            for _ in 0..10 {
                session.advance_by(std::time::Duration::from_secs(4));
                seen.push(session.current_chord().to_string());
            }
            seen
        };
        assert_eq!(draw(11), draw(11));
    }
}
