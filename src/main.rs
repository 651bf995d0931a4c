use std::fs;

use clap::{Parser, ValueEnum};
use kbasic::report::CheckReport;

/// The two blackbox operations the engine exposes.
#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    /// Run the whole pipeline and report the result or first error.
    Check,
    /// Parse only and dump the syntax tree.
    Ast,
}

/// kbasic checks a KBasic program or dumps its syntax tree, as JSON on
/// stdout.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Operation to run against the source.
    #[arg(value_enum)]
    mode: Mode,

    /// Treat the source argument as a file path to read instead of program
    /// text.
    #[arg(short, long)]
    file: bool,

    /// The program text (or a path with --file).
    source: String,
}

fn main() {
    let args = Args::parse();

    let source = if args.file {
        fs::read_to_string(&args.source).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'.", &args.source);
            std::process::exit(1);
        })
    } else {
        args.source
    };

    let output = match args.mode {
        Mode::Check => render(&kbasic::check(&source)),
        Mode::Ast => match kbasic::dump_ast(&source) {
            Ok(tree) => tree.to_string(),
            Err(e) => render(&CheckReport::failure(&e)),
        },
    };

    println!("{output}");
}

fn render(report: &CheckReport) -> String {
    serde_json::to_string(report).unwrap_or_else(|_| r#"{"error":true}"#.to_string())
}
