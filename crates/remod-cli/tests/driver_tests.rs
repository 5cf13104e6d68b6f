use remod_cli::args::CliArgs;
use remod_cli::driver::{self, Summary};
use std::fs;
use std::path::Path;

fn args_for(paths: Vec<std::path::PathBuf>) -> CliArgs {
    CliArgs {
        paths,
        dry_run: false,
        rules: None,
        halt_on_abort: false,
        list_rules: false,
        exclude: Vec::new(),
        verbose: 0,
    }
}

fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(&path, text).expect("write fixture");
    path
}

#[test]
fn transforms_and_writes_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "lib.js", "export default function lib() {}\n");
    let unit = write(dir.path(), "app.js", "const lib = require('./lib');\n");

    let summary = driver::run(&args_for(vec![unit.clone()])).expect("run");
    assert_eq!(summary.transformed, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(
        fs::read_to_string(&unit).expect("read back"),
        "import lib from './lib.js';\n"
    );
}

#[test]
fn dry_run_leaves_files_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = "const x = require('./x');\n";
    let unit = write(dir.path(), "app.js", source);

    let mut args = args_for(vec![unit.clone()]);
    args.dry_run = true;
    let summary = driver::run(&args).expect("run");
    assert_eq!(summary.transformed, 1);
    assert_eq!(fs::read_to_string(&unit).expect("read back"), source);
}

#[test]
fn discovery_skips_node_modules_and_other_extensions() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "a.js", "const a = 1;\n");
    write(dir.path(), "b.mjs", "const b = 1;\n");
    write(dir.path(), "readme.md", "# not code\n");
    write(dir.path(), "node_modules/dep/index.js", "const dep = 1;\n");

    let files =
        driver::discover(&[dir.path().to_path_buf()], &globset::GlobSet::empty()).expect("discover");
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.js", "b.mjs"]);
}

#[test]
fn unchanged_files_are_counted_not_rewritten() {
    let dir = tempfile::tempdir().expect("tempdir");
    let unit = write(dir.path(), "plain.js", "console.log('hi');\n");

    let summary = driver::run(&args_for(vec![unit])).expect("run");
    assert_eq!(
        summary,
        Summary {
            transformed: 0,
            unchanged: 1,
            aborted: 0,
            failed: 0
        }
    );
}

#[test]
fn aborted_units_keep_their_text() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = "const lib = require(dynamic);\n";
    let unit = write(dir.path(), "app.js", source);

    let summary = driver::run(&args_for(vec![unit.clone()])).expect("run");
    assert_eq!(summary.aborted, 1);
    assert_eq!(fs::read_to_string(&unit).expect("read back"), source);
}

#[test]
fn unknown_rule_selection_is_an_error() {
    let mut args = args_for(vec![std::path::PathBuf::from("unused.js")]);
    args.rules = Some(vec!["no-such-rule".to_string()]);
    assert!(driver::build_config(&args).is_err());
}
