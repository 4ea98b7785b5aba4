//! docbind — dump doc comments and the declarations they document.
//!
//! Two modes, mirroring how the scans are meant to be driven:
//!
//! - **stdin mode**: `docbind --dialect ts < file.ts`
//! - **file mode**: `docbind -f json src/**/*.ts`, dialect inferred per file
//!
//! The engine itself never touches the filesystem; everything here is the
//! plumbing around `docbind::scan`.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use docbind::render::{create_renderer, FileReport, Renderer};
use docbind::{scan_all, AssociationRecord, Dialect};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "docbind",
    about = "Extract doc comments from C-family sources and bind them to declarations"
)]
struct Cli {
    /// Input files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Dialect to scan with; inferred from the file extension when omitted.
    /// Required in stdin mode.
    #[arg(short, long, value_enum)]
    dialect: Option<Dialect>,

    /// Output format: text (default), markdown, json
    #[arg(short = 'f', long, default_value = "text")]
    format: String,

    /// Output directory; one file per input using the format's extension.
    /// Defaults to stdout.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Only keep records whose target name or scope path contains this
    /// substring (case-sensitive).
    #[arg(long)]
    name: Option<String>,

    /// Drop orphaned doc comments (those with no bound declaration).
    #[arg(long)]
    no_orphans: bool,

    /// Keep only orphaned doc comments.
    #[arg(long, conflicts_with = "no_orphans")]
    orphans_only: bool,

    /// Suppress diagnostics on stderr.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// stdin mode: read one source from stdin and print to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let dialect = cli
        .dialect
        .context("--dialect is required when reading from stdin")?;

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let renderer = create_renderer(&cli.format)?;
    let report = scan_source("-", &input, dialect, cli);
    report_diagnostics(&report, cli);
    print!("{}", renderer.render(&report));
    Ok(())
}

/// file mode: scan each input, write to stdout or one file per input.
fn file_mode(cli: &Cli) -> Result<()> {
    let renderer = create_renderer(&cli.format)?;
    let input_files = expand_globs(&cli.files)?;

    if let Some(output_dir) = &cli.output {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("failed to create output directory: {}", output_dir.display())
        })?;
    }

    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let dialect = dialect_for(path, cli)?;
        let report = scan_source(&path.display().to_string(), &content, dialect, cli);
        report_diagnostics(&report, cli);
        write_report(&report, renderer.as_ref(), path, cli)?;
    }

    Ok(())
}

/// Run one scan and apply the record filters.
fn scan_source(name: &str, content: &str, dialect: Dialect, cli: &Cli) -> FileReport {
    let (records, diagnostics) = scan_all(content, dialect);
    let records = records
        .into_iter()
        .filter(|r| keep_record(r, cli))
        .collect();
    FileReport {
        file: name.to_string(),
        records,
        diagnostics,
    }
}

fn keep_record(record: &AssociationRecord, cli: &Cli) -> bool {
    match &record.target {
        Some(site) => {
            if cli.orphans_only {
                return false;
            }
            match &cli.name {
                Some(needle) => {
                    site.name.as_deref().is_some_and(|n| n.contains(needle))
                        || site.scope_path.iter().any(|frame| {
                            frame.name.as_deref().is_some_and(|n| n.contains(needle))
                        })
                }
                None => true,
            }
        }
        None => !cli.no_orphans && cli.name.is_none(),
    }
}

fn dialect_for(path: &Path, cli: &Cli) -> Result<Dialect> {
    if let Some(dialect) = cli.dialect {
        return Ok(dialect);
    }
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(Dialect::from_extension)
        .ok_or_else(|| {
            anyhow!(
                "cannot infer dialect for {}; pass --dialect",
                path.display()
            )
        })
}

fn write_report(report: &FileReport, renderer: &dyn Renderer, path: &Path, cli: &Cli) -> Result<()> {
    let rendered = renderer.render(report);
    match &cli.output {
        Some(output_dir) => {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            let out_path = output_dir.join(format!("{}.{}", stem, renderer.file_extension()));
            fs::write(&out_path, rendered)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn report_diagnostics(report: &FileReport, cli: &Cli) {
    if cli.quiet {
        return;
    }
    for diag in &report.diagnostics {
        eprintln!(
            "{}: warning: {} (offset {})",
            report.file, diag.message, diag.offset
        );
    }
}

/// Expand glob patterns; plain paths pass through untouched.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let matched =
                glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))?;
            let mut any = false;
            for entry in matched {
                let path = entry.with_context(|| format!("glob error in {pattern}"))?;
                files.push(path);
                any = true;
            }
            if !any {
                return Err(anyhow!("no files match pattern: {pattern}"));
            }
        } else {
            files.push(PathBuf::from(pattern));
        }
    }
    Ok(files)
}
