//! Interactive command - query loop over stdin
//!
//! Each line is a query. Lines starting with `:` are commands:
//! `:k N` sets the number of results, `:export [PATH]` writes the last
//! results to CSV, `:help` lists commands, `:quit` leaves.

use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use recommender::output::{self, export};
use recommender::resolver::validate_top_k;
use recommender::{Config, Resolution, Session};

const PROMPT: &str = "query> ";

const HELP: &str = "\
Enter a job description, skill, or role to get the most relevant assessments.

Commands:
  :k N            Number of recommendations (1-10)
  :export [PATH]  Save the last results as CSV
  :help           Show this help
  :quit           Exit";

/// One parsed input line
#[derive(Debug, PartialEq)]
enum Input {
    Empty,
    Query(String),
    SetTopK(usize),
    Export(Option<PathBuf>),
    Help,
    Quit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }

    let Some(command) = line.strip_prefix(':') else {
        return Ok(Input::Query(line.to_string()));
    };

    let mut parts = command.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).filter(|s| !s.is_empty());

    match name {
        "q" | "quit" | "exit" => Ok(Input::Quit),
        "h" | "help" | "?" => Ok(Input::Help),
        "k" | "top-k" => {
            let raw = arg.ok_or_else(|| "Usage: :k N".to_string())?;
            raw.parse::<usize>()
                .map(Input::SetTopK)
                .map_err(|_| format!("Not a number: {}", raw))
        }
        "export" => Ok(Input::Export(arg.map(PathBuf::from))),
        other => Err(format!("Unknown command ':{}' (try :help)", other)),
    }
}

/// Execute interactive command on stdin/stdout
pub fn execute(config: &Config, top_k: Option<usize>) -> Result<()> {
    let k = top_k.unwrap_or(config.search.default_top_k);
    let mut session = super::load_session(config)?;

    println!("{}", "🔍 Assessment Recommendation Engine".bold());
    let stdin = io::stdin();
    run(
        &mut session,
        stdin.lock(),
        &mut io::stdout(),
        k,
        &config.export.filename,
    )
}

/// Drive the loop until `:quit` or end of input
fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    mut k: usize,
    default_export: &Path,
) -> Result<()> {
    writeln!(out, "{}", HELP)?;
    writeln!(out)?;

    let mut last: Option<Resolution> = None;
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };

        match parse_input(&line?) {
            Ok(Input::Empty) => {}
            Ok(Input::Quit) => break,
            Ok(Input::Help) => writeln!(out, "{}", HELP)?,
            Ok(Input::SetTopK(n)) => match validate_top_k(n) {
                Ok(()) => {
                    k = n;
                    writeln!(out, "Showing {} recommendation(s)", k)?;
                }
                Err(e) => writeln!(out, "{} {}", "❌".red(), e)?,
            },
            Ok(Input::Query(query)) => match session.resolve(&query, k) {
                Ok(resolution) => {
                    output::write_resolution(out, &resolution)?;
                    last = Some(resolution);
                }
                Err(e) => writeln!(out, "{} {}", "❌".red(), e)?,
            },
            Ok(Input::Export(path)) => {
                let Some(resolution) = &last else {
                    writeln!(out, "Nothing to export yet - run a query first")?;
                    continue;
                };
                let path = path.unwrap_or_else(|| default_export.to_path_buf());
                match export::write_file(&path, &resolution.recommendations) {
                    Ok(()) => writeln!(
                        out,
                        "{} Exported {} row(s) to {}",
                        "✓".green(),
                        resolution.recommendations.len(),
                        path.display()
                    )?,
                    Err(e) => writeln!(out, "{} {:#}", "❌".red(), e)?,
                }
            }
            Err(message) => writeln!(out, "{} {}", "❌".red(), message)?,
        }
    }

    Ok(())
}
