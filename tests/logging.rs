// tests/logging.rs

use checkrun::cli::LogLevel;
use checkrun::logging::filter_directive;

#[test]
fn cli_flag_wins_over_environment() {
    let d = filter_directive(Some(LogLevel::Debug), Some("error".to_string()));
    assert_eq!(d, "debug");
}

#[test]
fn environment_directives_are_passed_through() {
    let d = filter_directive(None, Some(" checkrun=trace,reqwest=warn ".to_string()));
    assert_eq!(d, "checkrun=trace,reqwest=warn");
}

#[test]
fn missing_or_empty_environment_defaults_to_info() {
    assert_eq!(filter_directive(None, None), "info");
    assert_eq!(filter_directive(None, Some("   ".to_string())), "info");
}
