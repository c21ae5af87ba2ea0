// tests/cli.rs

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use checkrun::cli::{CliArgs, split_list};
use clap::Parser;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn lists_are_split_on_commas_and_trimmed() {
    assert_eq!(split_list(" a.yml, b.yml ,,"), vec!["a.yml", "b.yml"]);
    assert!(split_list("").is_empty());
}

#[test]
fn defaults_resolve_into_run_options() -> TestResult {
    let args = CliArgs::try_parse_from(["checkrun", "-c", "checks", "-i", "s1.yml,s2.yml"])?;
    let opts = args.run_options();

    assert_eq!(opts.checks, vec![PathBuf::from("checks")]);
    assert_eq!(opts.settings.len(), 2);
    assert_eq!(opts.path_filter, ".*");
    assert_eq!(opts.outfolder, Some(PathBuf::from("outfolder")));
    assert!(opts.targets.is_empty());
    assert_eq!(opts.timeout, None);
    assert!(!opts.strict_exit);
    Ok(())
}

#[test]
fn optional_flags_are_carried_through() -> TestResult {
    let args = CliArgs::try_parse_from([
        "checkrun", "-c", "c", "-i", "s", "-t", "h1,h2", "-r", "ssh", "-o", "out",
        "--timeout", "5", "--strict-exit",
    ])?;
    let opts = args.run_options();

    assert_eq!(opts.targets, vec!["h1", "h2"]);
    assert_eq!(opts.path_filter, "ssh");
    assert_eq!(opts.outfolder, Some(PathBuf::from("out")));
    assert_eq!(opts.timeout, Some(Duration::from_secs(5)));
    assert!(opts.exec_options().strict_exit);
    Ok(())
}

#[test]
fn checks_and_inputs_are_required() {
    assert!(CliArgs::try_parse_from(["checkrun", "-c", "checks"]).is_err());
    assert!(CliArgs::try_parse_from(["checkrun", "-i", "s.yml"]).is_err());
}
