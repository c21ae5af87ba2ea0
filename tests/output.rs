// tests/output.rs

use std::error::Error;
use std::path::{Path, PathBuf};

use checkrun::config::parse_definition;
use checkrun::engine::output::{output_path, prepare_outfolder, slug, write_lines};
use checkrun::fs::FileSystem;
use checkrun::fs::mock::MockFileSystem;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn slug_keeps_safe_characters_only() {
    assert_eq!(slug("settings/prod.yml#web-01"), "settings_prod.yml_web-01");
    assert_eq!(slug("a b:c"), "a_b_c");
    assert_eq!(slug(".."), "_");
    assert_eq!(slug(""), "_");
}

#[test]
fn output_path_is_numbered_per_definition() -> TestResult {
    let def = parse_definition(
        Path::new("checks/ssh banner.yml"),
        "task:\n  type: notes\n  note: x\n",
    )?;
    let path = output_path(Path::new("out"), 1, "hosts.yml#h1", 6, &def);
    assert_eq!(path, PathBuf::from("out/002_hosts.yml_h1/007_ssh_banner.txt"));
    Ok(())
}

#[test]
fn sources_that_slug_alike_get_distinct_directories() -> TestResult {
    let def = parse_definition(Path::new("c.yml"), "task:\n  type: notes\n  note: x\n")?;
    let first = output_path(Path::new("out"), 0, "a/b.yml", 0, &def);
    let second = output_path(Path::new("out"), 1, "a_b.yml", 0, &def);
    assert_eq!(slug("a/b.yml"), slug("a_b.yml"));
    assert_ne!(first, second);
    Ok(())
}

#[test]
fn write_lines_trims_trailing_whitespace() -> TestResult {
    let fs = MockFileSystem::new();
    write_lines(&fs, Path::new("out/a.txt"), &["one  ", "two\t", ""])?;
    assert_eq!(fs.contents("out/a.txt").as_deref(), Some("one\ntwo\n\n"));
    Ok(())
}

#[test]
fn prepare_outfolder_resets_existing_contents() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("out/old/stale.txt", "x");

    prepare_outfolder(&fs, Path::new("out"))?;

    assert!(fs.is_dir(Path::new("out")));
    assert!(fs.file_paths().is_empty());

    prepare_outfolder(&fs, Path::new("fresh"))?;
    assert!(fs.is_dir(Path::new("fresh")));
    Ok(())
}
