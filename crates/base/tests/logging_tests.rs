use base::logging::{default_level, init_stdout_logger, parse_level, StdoutLogger};
use log::{LevelFilter, Log};

#[test]
fn test_parse_level_names() {
    assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
    assert_eq!(parse_level("WARN"), Some(LevelFilter::Warn));
    assert_eq!(parse_level(" trace "), Some(LevelFilter::Trace));
    assert_eq!(parse_level("off"), Some(LevelFilter::Off));
    assert_eq!(parse_level("loud"), None);
}

#[test]
fn test_default_level_matches_build() {
    if cfg!(debug_assertions) {
        assert_eq!(default_level(), LevelFilter::Debug);
    } else {
        assert_eq!(default_level(), LevelFilter::Info);
    }
}

#[test]
fn test_stdout_logger_accepts_records() {
    init_stdout_logger();
    let logger = StdoutLogger;

    let record = log::RecordBuilder::new()
        .level(log::Level::Error)
        .target("test")
        .file(Some("test.rs"))
        .line(Some(42))
        .args(format_args!("test message"))
        .build();

    // This should not panic
    logger.log(&record);
    logger.flush();
}

#[test]
fn test_init_twice_is_harmless() {
    init_stdout_logger();
    init_stdout_logger();
    log::info!("logger initialized twice");
}
