//! Property-based tests for logaroo using proptest

use logaroo::prelude::*;
use logaroo::{args, Registry};
use proptest::prelude::*;

const LOG_LEVELS: [&str; 7] = [
    "trace", "debug", "info", "success", "warning", "error", "critical",
];

fn level_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(LOG_LEVELS.to_vec())
}

/// Randomly upper- or lower-case each character
fn mixed_case(name: &str) -> impl Strategy<Value = String> {
    let chars: Vec<char> = name.chars().collect();
    prop::collection::vec(any::<bool>(), chars.len()).prop_map(move |upper| {
        chars
            .iter()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { *c })
            .collect()
    })
}

fn quiet_logger() -> (Logger, MemoryConsole) {
    let console = MemoryConsole::new();
    let logger = Logger::builder()
        .template("{level} {message}")
        .console(console.clone())
        .build()
        .unwrap();
    (logger, console)
}

// ============================================================================
// Threshold Tests
// ============================================================================

proptest! {
    /// A line is emitted exactly when its level is at or above the threshold
    #[test]
    fn test_threshold_filtering(threshold in level_name(), target in level_name()) {
        let (logger, console) = quiet_logger();
        logger.set_level(threshold).unwrap();

        let _ = logger.log(target, "probe", args!());

        let registry = Registry::defaults();
        let expected = registry.lookup(target).unwrap().number()
            >= registry.lookup(threshold).unwrap().number();
        prop_assert_eq!(console.len() == 1, expected);
        prop_assert_eq!(logger.is_enabled(target).unwrap(), expected);
    }

    /// Level names are accepted in any case and read back lowercase
    #[test]
    fn test_level_names_case_insensitive(
        (name, cased) in level_name().prop_flat_map(|n| (Just(n), mixed_case(n)))
    ) {
        let (logger, _console) = quiet_logger();
        logger.set_level(&cased).unwrap();
        prop_assert_eq!(logger.level(), name);
    }

    /// Unknown names are rejected and leave the threshold alone
    #[test]
    fn test_unknown_level_rejected(name in "[a-z]{1,12}") {
        prop_assume!(!LOG_LEVELS.contains(&name.as_str()));
        let (logger, _console) = quiet_logger();
        let err = logger.set_level(&name).unwrap_err();
        let is_unknown = matches!(err, LoggerError::UnknownLevel { .. });
        prop_assert!(is_unknown);
        prop_assert_eq!(logger.level(), "info");
    }
}

// ============================================================================
// Registry Tests
// ============================================================================

proptest! {
    /// Added levels are kept in severity order
    #[test]
    fn test_added_levels_sorted(numbers in prop::collection::vec(-100i32..200, 1..10)) {
        let (logger, _console) = quiet_logger();
        for (i, number) in numbers.iter().enumerate() {
            logger.add_level(&format!("custom{}", i), *number, "", "", false).unwrap();
        }

        let levels = logger.levels();
        prop_assert_eq!(levels.len(), LOG_LEVELS.len() + numbers.len());
        for pair in levels.windows(2) {
            prop_assert!(pair[0].number() <= pair[1].number());
        }
    }

    /// The sweep always restores the threshold
    #[test]
    fn test_sweep_restores_threshold(threshold in level_name()) {
        let (logger, console) = quiet_logger();
        logger.set_level(threshold).unwrap();
        logger.log_to_all_levels_default().unwrap();
        prop_assert_eq!(logger.level(), threshold);
        prop_assert_eq!(console.len(), LOG_LEVELS.len());
    }
}

// ============================================================================
// Formatting Tests
// ============================================================================

proptest! {
    /// Text without braces passes through the message template unchanged
    #[test]
    fn test_plain_message_unchanged(message in "[^{}\r\n]{0,64}") {
        let (logger, console) = quiet_logger();
        logger.set_template("{message}").unwrap();
        logger.info(&message, args!()).unwrap();
        prop_assert_eq!(console.raw_lines(), vec![message]);
    }

    /// Integer arguments render like Rust's own formatting
    #[test]
    fn test_integer_argument(value in any::<i64>(), width in 0usize..30) {
        let (logger, console) = quiet_logger();
        logger.set_template("{message}").unwrap();
        let template = format!("{{value:>{}}}", width);
        logger.info(&template, args!(value = value)).unwrap();
        prop_assert_eq!(console.raw_lines(), vec![format!("{:>width$}", value, width = width)]);
    }

    /// Fixed-point precision matches Rust's rounding
    #[test]
    fn test_float_precision(value in -1.0e6f64..1.0e6, precision in 0usize..8) {
        let (logger, console) = quiet_logger();
        logger.set_template("{message}").unwrap();
        let template = format!("{{value:.{}f}}", precision);
        logger.info(&template, args!(value = value)).unwrap();
        prop_assert_eq!(
            console.raw_lines(),
            vec![format!("{:.prec$}", value, prec = precision)]
        );
    }
}
