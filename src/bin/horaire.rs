use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use horaire::config::{EncodeOptions, ParseOptions};
use horaire::ics::SemesterRange;
use horaire::parse::parse_document;
use horaire::storage::DatasetStore;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

const DEFAULT_OUTPUT: &str = "timetable.json";

fn main() -> ExitCode {
    let mut args: Vec<String> = env::args().collect();
    let binary_name = args
        .first()
        .map(|p| p.rsplit('/').next().unwrap_or(p).to_string())
        .unwrap_or_else(|| "horaire".to_string());

    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    args.retain(|a| a != "-v" && a != "--verbose");
    init_logging(verbose);

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        horaire::cli::print_help(&binary_name);
        return ExitCode::SUCCESS;
    }

    let result = match args.get(1).map(String::as_str) {
        Some("export") => run_export(&args[2..]),
        Some(input) => run_parse(input, args.get(2).map(String::as_str)),
        None => {
            // No partial output on a usage error.
            eprintln!("Usage: {} <input.html> [output.json]", binary_name);
            eprintln!("Run '{} --help' for details.", binary_name);
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    // Stderr keeps stdout clean for exported calendar text.
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

/// Regenerates the canonical dataset from one HTML export.
fn run_parse(input: &str, output: Option<&str>) -> Result<()> {
    let html = fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))?;
    let dataset = parse_document(&html, &ParseOptions::default());

    let output = output.unwrap_or(DEFAULT_OUTPUT);
    DatasetStore::save(Path::new(output), &dataset)?;
    println!("Wrote {} group(s) to {}", dataset.groups.len(), output);
    Ok(())
}

/// Encodes one group of a stored dataset as iCalendar text on stdout.
fn run_export(args: &[String]) -> Result<()> {
    let mut dataset_path: Option<&str> = None;
    let mut group_id: Option<&str> = None;
    let mut from: Option<&str> = None;
    let mut to: Option<&str> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--group" => group_id = Some(flag_value(&mut iter, "--group")?),
            "--from" => from = Some(flag_value(&mut iter, "--from")?),
            "--to" => to = Some(flag_value(&mut iter, "--to")?),
            flag if flag.starts_with("--") => bail_usage(&format!("Unknown flag '{flag}'"))?,
            positional if dataset_path.is_none() => dataset_path = Some(positional),
            extra => bail_usage(&format!("Unexpected argument '{extra}'"))?,
        }
    }

    let dataset_path = dataset_path.ok_or_else(|| anyhow!("Missing dataset path"))?;
    let group_id = group_id.ok_or_else(|| anyhow!("Missing --group <id>"))?;
    let range = SemesterRange {
        start: parse_date(from.ok_or_else(|| anyhow!("Missing --from <YYYY-MM-DD>"))?)?,
        end: parse_date(to.ok_or_else(|| anyhow!("Missing --to <YYYY-MM-DD>"))?)?,
    };

    let dataset = DatasetStore::load(Path::new(dataset_path))?;
    let group = dataset
        .find_group(group_id)
        .ok_or_else(|| anyhow!("No group '{group_id}' in {dataset_path}"))?;

    let ics = group.to_ics(&range, &EncodeOptions::default())?;
    print!("{ics}");
    Ok(())
}

fn flag_value<'a>(
    iter: &mut std::slice::Iter<'a, String>,
    flag: &str,
) -> Result<&'a str> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{flag} requires a value"))
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{text}', expected YYYY-MM-DD"))
}

fn bail_usage(message: &str) -> Result<()> {
    Err(anyhow!("{message}. Run 'horaire --help' for usage."))
}
