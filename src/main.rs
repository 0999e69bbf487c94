//! testgen — generate QUnit test files from annotated documentation records.
//!
//! Consumes the JSON record stream a documentation extractor emits and turns
//! tagged doc comments into runnable test files: a `file` record opens a
//! container, exported classes and functions become QUnit modules, and
//! `@xTestCase` bodies become numbered QUnit tests with the import line
//! pointing back at the documented source. Two input modes:
//!
//! - **stdin mode**: `testgen < records.json`
//! - **file mode**: `testgen records.json more.ndjson`

mod emit;
mod error;
mod extract;
mod model;
mod prettify;
mod publish;
mod record;
mod resolve;
mod sink;

use anyhow::{Context, Result};
use clap::Parser;
use extract::TagConfig;
use publish::{PublishConfig, Publisher};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "testgen",
    about = "Generate QUnit test files from annotated documentation records"
)]
struct Cli {
    /// Record files, each a JSON array or newline-delimited JSON objects.
    /// If omitted, reads from stdin.
    files: Vec<String>,

    /// Directory generated test files are written to
    #[arg(short = 'o', long, default_value = "tests/js/doctests")]
    output: PathBuf,

    /// Base path segment stripped from source names in import statements
    #[arg(short = 'b', long, default_value = "js/")]
    base_dir: String,

    /// Tag marking a per-suite beforeEach hook
    #[arg(long, default_value = "@xBeforeEach")]
    before_tag: String,

    /// Tag marking a per-suite afterEach hook
    #[arg(long, default_value = "@xAfterEach")]
    after_tag: String,

    /// Tag marking a test-case body
    #[arg(long, default_value = "@xTestCase")]
    test_tag: String,

    /// Remove the output directory before generating
    #[arg(long)]
    clean: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = PublishConfig {
        tags: TagConfig {
            before_each: cli.before_tag.clone(),
            after_each: cli.after_tag.clone(),
            test_case: cli.test_tag.clone(),
        },
        base_dir: cli.base_dir.clone(),
        test_dir: cli.output.clone(),
    };

    if cli.clean {
        sink::clean_dir(&config.test_dir)?;
    }

    let mut publisher = Publisher::new(config);
    let mut written = 0;

    if cli.files.is_empty() {
        // stdin mode
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        written += feed(&mut publisher, &input, "stdin")?;
    } else {
        for file in &cli.files {
            let input =
                fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?;
            written += feed(&mut publisher, &input, file)?;
        }
    }

    if let Some(generated) = publisher.finish()? {
        sink::write_generated(&generated.path, &generated.contents)?;
        written += 1;
    }
    if written == 0 {
        eprintln!("warning: records contained no test cases; nothing generated");
    }
    Ok(())
}

/// Feed one input through the publisher, writing each test file as its
/// source file's records end. A top-level JSON array is a single batch;
/// anything else is treated as one JSON record per line. Returns the number
/// of files written.
fn feed(publisher: &mut Publisher, input: &str, origin: &str) -> Result<usize> {
    let mut written = 0;
    if record::is_batch(input) {
        let records = record::parse_batch(input)
            .with_context(|| format!("invalid record batch in {origin}"))?;
        for rec in &records {
            written += write_finalized(publisher, rec)?;
        }
    } else {
        for (idx, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let rec = record::parse_line(line)
                .with_context(|| format!("invalid record on line {} of {origin}", idx + 1))?;
            written += write_finalized(publisher, &rec)?;
        }
    }
    Ok(written)
}

/// Push one record; a file boundary flushes the finished container to disk
/// immediately, so earlier output survives a later fatal record.
fn write_finalized(publisher: &mut Publisher, rec: &record::DocumentationRecord) -> Result<usize> {
    match publisher.push(rec)? {
        Some(generated) => {
            sink::write_generated(&generated.path, &generated.contents)?;
            Ok(1)
        }
        None => Ok(0),
    }
}
