//! CLI entrypoint for the epilogue conformance harness.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use epilogue_harness::{ConformanceReport, ScenarioRunner, scenarios};

/// Conformance tooling for the epilogue registry.
#[derive(Debug, Parser)]
#[command(name = "epilogue-harness")]
#[command(about = "Process-level conformance harness for the epilogue registry")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List built-in scenarios.
    List {
        /// Emit the scenario table as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run scenarios against a compiled fixture binary.
    Run {
        /// Path to the fixture binary.
        #[arg(long)]
        fixture: PathBuf,
        /// Only run scenarios whose name contains this substring.
        #[arg(long)]
        filter: Option<String>,
        /// Write the JSON evidence report here (summary prints regardless).
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match Cli::parse().command {
        Command::List { json } => list(json),
        Command::Run {
            fixture,
            filter,
            report,
        } => run(&fixture, filter.as_deref(), report.as_deref()),
    }
}

fn list(json: bool) -> ExitCode {
    let table = scenarios::all();
    if json {
        match serde_json::to_string_pretty(&table) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("error: failed to serialize scenario table: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for s in &table {
            println!("{:<28} {}", s.name, s.summary);
        }
    }
    ExitCode::SUCCESS
}

fn run(fixture: &std::path::Path, filter: Option<&str>, report_path: Option<&std::path::Path>) -> ExitCode {
    let selected: Vec<_> = scenarios::all()
        .into_iter()
        .filter(|s| filter.is_none_or(|f| s.name.contains(f)))
        .collect();
    if selected.is_empty() {
        eprintln!("error: no scenario matches the filter");
        return ExitCode::FAILURE;
    }

    let runner = ScenarioRunner::new(fixture);
    let results = match runner.run_all(&selected) {
        Ok(results) => results,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let report = ConformanceReport::new(fixture.display().to_string(), results);
    print!("{}", report.render_summary());

    if let Some(path) = report_path {
        let json = match report.to_json() {
            Ok(json) => json,
            Err(err) => {
                eprintln!("error: failed to serialize report: {err}");
                return ExitCode::FAILURE;
            }
        };
        if let Err(err) = std::fs::write(path, json) {
            eprintln!("error: failed to write {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    }

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
