//! Thin CLI shell around the conversion engine.
//!
//! One-shot mode converts an argument string, a file, or piped stdin.
//! Without any input on a terminal it drops into an interactive loop.
//! Successful output goes to stdout; errors go to stderr, styled, so an
//! error message can never be piped onward as converter output.

use std::fs;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use stevedore_common::diagnostic::Diagnosable;
use stevedore_convert::{convert, ConvertError, Direction};

/// Convert between 'docker run' commands and compose manifests
#[derive(Parser, Debug)]
#[command(name = "stevedore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input to convert; multiple words are joined with spaces.
    /// Omit it to read piped stdin or start the interactive loop.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    input: Vec<String>,

    /// Read the input from a file instead
    #[arg(short, long, conflicts_with = "input")]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    stevedore_common::telemetry::init_tracing("stevedore")?;
    let cli = Cli::parse();

    if let Some(path) = &cli.file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        return convert_once(&text);
    }
    if !cli.input.is_empty() {
        return convert_once(&cli.input.join(" "));
    }
    if !io::stdin().is_terminal() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("could not read stdin")?;
        return convert_once(&text);
    }

    run_loop()
}

fn convert_once(text: &str) -> Result<()> {
    match convert(text) {
        Ok(result) => {
            println!("{}", result.output.trim_end());
            Ok(())
        }
        Err(err) => {
            report(&err);
            std::process::exit(1);
        }
    }
}

fn report(err: &ConvertError) {
    tracing::debug!("[CLI] conversion failed: {}", err.code());
    eprintln!("{} {}", style("Error:").red().bold(), style(err).red());
    if let Some(hint) = err.suggestion() {
        eprintln!("  {} {}", style("hint:").yellow(), hint);
    }
}

/// Continuous conversion loop. Multi-line input (a pasted manifest) is
/// terminated by an empty line.
fn run_loop() -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{}", style("Stevedore - docker run / compose converter").bold());
    println!("Paste a 'docker run' command or a compose manifest.");
    println!("Finish multi-line input with an empty line; type 'exit' or 'q' to quit.");
    println!("{}", "-".repeat(60));

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let mut buffer = String::new();
        loop {
            let Some(line) = lines.next() else {
                println!("Goodbye!");
                return Ok(());
            };
            let line = line.context("could not read stdin")?;
            if line.trim().is_empty() {
                break;
            }
            if buffer.is_empty()
                && matches!(line.trim().to_lowercase().as_str(), "exit" | "q" | "quit")
            {
                println!("Goodbye!");
                return Ok(());
            }
            buffer.push_str(&line);
            buffer.push('\n');
        }

        if buffer.trim().is_empty() {
            continue;
        }

        match convert(&buffer) {
            Ok(result) => {
                let heading = match result.direction {
                    Direction::RunToCompose => "--- Generated compose manifest ---",
                    Direction::ComposeToRun => "--- Generated docker run command ---",
                };
                println!("\n{}\n", style(heading).green());
                println!("{}", result.output.trim_end());
            }
            Err(err) => report(&err),
        }
    }
}
