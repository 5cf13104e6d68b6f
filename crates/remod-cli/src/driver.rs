//! File discovery and the parallel per-unit driver.
//!
//! Units are independent: no state crosses from one file's transformation to
//! another, and cross-file queries are pure reads, so files are processed on
//! a rayon pool. Writes happen last and each unit only ever writes its own
//! file. The file set is assumed immutable for the duration of a run.

use crate::args::CliArgs;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use remod_common::OsHost;
use remod_transforms::{rules, transform, Config};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions selected during directory discovery.
const SOURCE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub transformed: usize,
    pub unchanged: usize,
    pub aborted: usize,
    pub failed: usize,
}

enum FileResult {
    Transformed,
    Unchanged,
    Aborted,
    Failed(String),
}

pub fn run(args: &CliArgs) -> Result<Summary> {
    let config = build_config(args)?;
    let excludes = build_excludes(&args.exclude)?;
    let files = discover(&args.paths, &excludes)?;
    tracing::info!(count = files.len(), "discovered source files");

    let results: Vec<(PathBuf, FileResult)> = files
        .par_iter()
        .map(|path| (path.clone(), process_file(path, &config, args.dry_run)))
        .collect();

    let mut summary = Summary::default();
    for (path, result) in &results {
        match result {
            FileResult::Transformed => {
                summary.transformed += 1;
                println!("{} {}", "transformed".green(), path.display());
            }
            FileResult::Unchanged => summary.unchanged += 1,
            FileResult::Aborted => {
                summary.aborted += 1;
                println!("{} {}", "aborted".yellow(), path.display());
            }
            FileResult::Failed(message) => {
                summary.failed += 1;
                eprintln!("{} {}: {message}", "failed".red(), path.display());
            }
        }
    }

    println!(
        "{} transformed, {} unchanged, {} aborted, {} failed",
        summary.transformed.to_string().green(),
        summary.unchanged,
        summary.aborted.to_string().yellow(),
        summary.failed.to_string().red(),
    );
    Ok(summary)
}

fn process_file(path: &Path, config: &Config, dry_run: bool) -> FileResult {
    let source = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => return FileResult::Failed(err.to_string()),
    };

    let outcome = transform(&source, path, config, &OsHost);
    for diagnostic in &outcome.diagnostics {
        tracing::debug!(
            rule = diagnostic.rule,
            line = diagnostic.line,
            "{}",
            diagnostic.message
        );
    }

    if !outcome.aborted.is_empty() {
        for (rule, reason) in &outcome.aborted {
            tracing::warn!(rule = rule.as_str(), path = %path.display(), "{reason}");
        }
        if !outcome.changed {
            return FileResult::Aborted;
        }
    }
    if !outcome.changed {
        return FileResult::Unchanged;
    }
    if !dry_run {
        if let Err(err) = std::fs::write(path, &outcome.text) {
            return FileResult::Failed(err.to_string());
        }
    }
    FileResult::Transformed
}

pub fn build_config(args: &CliArgs) -> Result<Config> {
    let mut config = Config {
        halt_on_abort: args.halt_on_abort,
        ..Config::default()
    };
    if let Some(selected) = &args.rules {
        for name in selected {
            if rules::rule_by_name(name).is_none() {
                bail!(
                    "unknown rule `{name}`; available rules: {}",
                    rules::default_rule_names().join(", ")
                );
            }
        }
        config.rules = selected.clone();
    }
    Ok(config)
}

fn build_excludes(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("invalid glob `{pattern}`"))?);
    }
    Ok(builder.build()?)
}

/// Expand the argument paths into the ordered list of source files.
pub fn discover(paths: &[PathBuf], excludes: &GlobSet) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            bail!("no such file or directory: {}", path.display());
        }
        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e))
        {
            let entry = entry.with_context(|| format!("walking {}", path.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file = entry.path();
            if !has_source_extension(file) || excludes.is_match(file) {
                continue;
            }
            files.push(file.to_path_buf());
        }
    }
    Ok(files)
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
}
