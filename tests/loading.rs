// tests/loading.rs

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use checkrun::config::{
    CheckDefinition, Task, load_check_definitions, load_settings_sets, parse_definition,
    parse_settings, path_filter,
};
use checkrun::errors::{CheckrunError, TaskError};
use checkrun::fs::RealFileSystem;
use checkrun::fs::mock::MockFileSystem;
use checkrun::types::{HttpMethod, TaskKind};
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

fn parse(raw: &str) -> Result<CheckDefinition, CheckrunError> {
    parse_definition(&PathBuf::from("check.yml"), raw)
}

#[test]
fn cmd_task_accepts_string_or_list_and_dir_aliases() -> TestResult {
    let one = parse("task:\n  type: cmd\n  cmd: echo one\n  cmd_dir: /tmp\n")?;
    match one.task {
        Ok(Task::Command(c)) => {
            assert_eq!(c.command_lines, vec!["echo one".to_string()]);
            assert_eq!(c.working_dir.as_deref(), Some("/tmp"));
        }
        other => panic!("expected command task, got {other:?}"),
    }

    let many = parse("task:\n  task_type: CMD\n  cmds: [\"a\", \"b\"]\n  dir: here\n")?;
    match many.task {
        Ok(Task::Command(c)) => {
            assert_eq!(c.command_lines.len(), 2);
            assert_eq!(c.working_dir.as_deref(), Some("here"));
        }
        other => panic!("expected command task, got {other:?}"),
    }
    Ok(())
}

#[test]
fn task_type_alias_wins_over_type() -> TestResult {
    let def = parse("task:\n  type: bogus\n  task_type: notes\n  note: hi\n")?;
    assert_eq!(def.task.map(|t| t.kind()), Ok(TaskKind::Notes));
    Ok(())
}

#[test]
fn unknown_kind_is_kept_as_a_task_error() -> TestResult {
    let def = parse("summary: odd\ntask:\n  type: bogus\n")?;
    assert_eq!(def.summary.as_deref(), Some("odd"));
    assert_eq!(def.task, Err(TaskError::UnknownKind("bogus".to_string())));
    Ok(())
}

#[test]
fn missing_task_or_kind_are_task_errors() -> TestResult {
    assert_eq!(parse("summary: only\n")?.task, Err(TaskError::MissingTask));
    assert_eq!(parse("task:\n  cmd: ls\n")?.task, Err(TaskError::MissingKind));
    Ok(())
}

#[test]
fn notes_on_a_cmd_task_become_side_channel_notes() -> TestResult {
    let def = parse("task:\n  type: cmd\n  cmd: ls\n  notes:\n    - check {a}\n    - check {b}\n")?;
    assert_eq!(def.notes, vec!["check {a}".to_string(), "check {b}".to_string()]);

    let notes_task = parse("task:\n  type: notes\n  notes: do it by hand\n")?;
    assert!(notes_task.notes.is_empty());
    match notes_task.task {
        Ok(Task::Notes(n)) => assert_eq!(n.notes, vec!["do it by hand".to_string()]),
        other => panic!("expected notes task, got {other:?}"),
    }
    Ok(())
}

#[test]
fn attached_notes_survive_an_unresolvable_task() -> TestResult {
    let unknown = parse("task:\n  type: bogus\n  note: look at it\n")?;
    assert!(unknown.task.is_err());
    assert_eq!(unknown.notes, vec!["look at it".to_string()]);

    let no_url = parse("task:\n  type: web_request\n  notes: [a, b]\n")?;
    assert!(no_url.task.is_err());
    assert_eq!(no_url.notes.len(), 2);
    Ok(())
}

#[test]
fn web_request_fields_are_parsed() -> TestResult {
    let def = parse(
        r#"
task:
  type: Web_Request
  url: "https://{target}/login"
  headers:
    X-Port: 8443
  data:
    user: "{user}"
  expect: "welcome"
"#,
    )?;
    assert_eq!(def.expect.as_deref(), Some("welcome"));
    match def.task {
        Ok(Task::HttpRequest(req)) => {
            assert_eq!(req.url, "https://{target}/login");
            assert_eq!(req.headers.get("X-Port").map(String::as_str), Some("8443"));
            assert_eq!(req.method(), HttpMethod::Post);
        }
        other => panic!("expected web request, got {other:?}"),
    }

    let bad = parse("task:\n  type: web_request\n  url: http://x\n  method: PUT\n")?;
    assert!(matches!(
        bad.task,
        Err(TaskError::InvalidField { ref field, .. }) if field == "method"
    ));

    let no_url = parse("task:\n  type: web_request\n")?;
    assert!(matches!(
        no_url.task,
        Err(TaskError::InvalidField { ref field, .. }) if field == "url"
    ));
    Ok(())
}

#[test]
fn empty_or_non_mapping_documents_fail_to_parse() {
    assert!(parse("").is_err());
    assert!(parse("- just\n- a list\n").is_err());
    assert!(parse("plain scalar\n").is_err());
    assert!(parse("task: [unclosed\n").is_err());
}

#[test]
fn settings_must_be_a_mapping() -> TestResult {
    let s = parse_settings("target: host\nport: 22\n1: one\n")?;
    assert_eq!(s.len(), 3);
    assert!(s.contains_key("1"));

    assert!(parse_settings("")?.is_empty());
    assert!(matches!(parse_settings("- a\n"), Err(CheckrunError::ConfigError(_))));
    Ok(())
}

#[test]
fn failed_parse_contributes_no_tokens() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("checks/a.yml", "task:\n  type: cmd\n  cmd: echo {good}\n");
    fs.add_file("checks/b.yml", "task: [broken {bad}\n");

    let loaded = load_check_definitions(&fs, &[PathBuf::from("checks")], &path_filter(".*")?);

    assert_eq!(loaded.definitions.len(), 1);
    assert_eq!(loaded.failures.len(), 1);
    assert!(loaded.failures[0].source.ends_with("b.yml"));
    assert!(loaded.required.contains("good"));
    assert!(!loaded.required.contains("bad"));
    Ok(())
}

#[test]
fn directories_are_walked_in_sorted_order_and_filtered() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("checks/z_last.yml", "task:\n  type: notes\n  note: z\n");
    fs.add_file("checks/nested/m_mid.yml", "task:\n  type: notes\n  note: m\n");
    fs.add_file("checks/a_first.yml", "task:\n  type: notes\n  note: a\n");
    fs.add_file("checks/readme.txt", "not yaml: [");

    let loaded = load_check_definitions(&fs, &[PathBuf::from("checks")], &path_filter(r"\.YML$")?);

    let ids: Vec<_> = loaded.definitions.iter().map(|d| d.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            "checks/a_first.yml".to_string(),
            "checks/nested/m_mid.yml".to_string(),
            "checks/z_last.yml".to_string(),
        ]
    );
    assert!(loaded.failures.is_empty());
    Ok(())
}

#[test]
fn explicit_files_keep_cli_order_and_unknown_paths_fail() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("b.yml", "task:\n  type: notes\n  note: b\n");
    fs.add_file("a.yml", "task:\n  type: notes\n  note: a\n");

    let entries = [
        PathBuf::from("b.yml"),
        PathBuf::from("a.yml"),
        PathBuf::from("nope.yml"),
    ];
    let loaded = load_check_definitions(&fs, &entries, &path_filter(".*")?);

    assert_eq!(loaded.definitions[0].id, "b.yml");
    assert_eq!(loaded.definitions[1].id, "a.yml");
    assert_eq!(loaded.failures.len(), 1);
    assert!(loaded.failures[0].reason.contains("unknown check file path type"));
    Ok(())
}

#[test]
fn counted_repetition_in_expect_reads_as_a_placeholder() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file(
        "http.yml",
        "task:\n  type: cmd\n  cmd: curl -sI x\n  expect: \"HTTP/1.1 [0-9]{3}\"\n",
    );

    let loaded = load_check_definitions(&fs, &[PathBuf::from("http.yml")], &path_filter(".*")?);

    assert!(loaded.required.contains("3"));
    Ok(())
}

#[test]
fn a_file_named_twice_is_loaded_once() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("checks/a.yml", "task:\n  type: notes\n  note: a\n");
    fs.add_file("checks/b.yml", "task:\n  type: notes\n  note: b\n");

    let entries = [
        PathBuf::from("checks/b.yml"),
        PathBuf::from("checks"),
        PathBuf::from("checks/b.yml"),
    ];
    let loaded = load_check_definitions(&fs, &entries, &path_filter(".*")?);

    let ids: Vec<_> = loaded.definitions.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["checks/b.yml", "checks/a.yml"]);
    Ok(())
}

#[test]
fn invalid_path_filter_is_a_regex_error() {
    assert!(matches!(path_filter("("), Err(CheckrunError::RegexError(_))));
}

#[test]
fn targets_fan_out_each_settings_source() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("one.yml", "user: admin\n");
    fs.add_file("two.yml", "user: root\ntarget: pinned\n");

    let paths = [PathBuf::from("one.yml"), PathBuf::from("two.yml"), PathBuf::from("gone.yml")];
    let targets = ["h1".to_string(), "h2".to_string()];
    let (sets, failures) = load_settings_sets(&fs, &paths, &targets);

    let sources: Vec<_> = sets.iter().map(|s| s.source.as_str()).collect();
    assert_eq!(sources, vec!["one.yml#h1", "one.yml#h2", "two.yml#h1", "two.yml#h2"]);
    assert_eq!(sets[1].values.get("target"), Some(&"h2".into()));
    // The source's own `target` wins.
    assert_eq!(sets[2].values.get("target"), Some(&"pinned".into()));
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].source, "gone.yml");
    assert!(failures[0].reason.contains("gone.yml"));
    Ok(())
}

#[test]
fn loads_from_real_files() -> TestResult {
    let dir = tempdir()?;
    let checks = dir.path().join("checks");
    fs::create_dir_all(&checks)?;
    fs::write(
        checks.join("uname.yaml"),
        "summary: kernel\ntask:\n  type: cmd\n  cmd: uname {flag}\n",
    )?;
    let settings = dir.path().join("settings.yml");
    fs::write(&settings, "flag: -a\n")?;

    let real = RealFileSystem;
    let loaded = load_check_definitions(&real, &[checks], &path_filter(".*")?);
    let (sets, failures) = load_settings_sets(&real, &[settings], &[]);

    assert_eq!(loaded.definitions.len(), 1);
    assert!(loaded.required.contains("flag"));
    assert_eq!(sets.len(), 1);
    assert!(failures.is_empty());
    Ok(())
}
