//! Lisplet command line.
//!
//! With a script argument the file runs as one program; its output is
//! whatever `display` and `displayln` produce. Without arguments it drops
//! into an interactive read-evaluate-print loop that keeps one scope alive
//! across entries, so assignments accumulate.

use lisplet::env::create_root_env;
use lisplet::evaluator::run;
use lisplet::reader::make_program;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "\
Usage: lisplet [SCRIPT]

Runs SCRIPT as a program when given, otherwise starts an interactive
session.

Options:
  -h, --help    Print this help text
";

struct Options {
    script: Option<PathBuf>,
}

fn parse_options() -> Result<Options, String> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{USAGE}");
        std::process::exit(0);
    }

    let script = match args.opt_free_from_str::<PathBuf>() {
        Ok(path) => path,
        Err(e) => return Err(e.to_string()),
    };

    let leftover = args.finish();
    if !leftover.is_empty() {
        return Err(format!("unexpected argument {:?}", leftover[0]));
    }

    Ok(Options { script })
}

fn main() -> ExitCode {
    let options = match parse_options() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("lisplet: {message}");
            eprint!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let outcome = match options.script {
        Some(path) => run_script(&path),
        None => repl(),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

/// Run a whole source file as one program, without echoing its final value
fn run_script(path: &Path) -> Result<(), String> {
    let source = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;

    // Executable scripts may carry an interpreter line
    let body = if source.starts_with("#!") {
        source.split_once('\n').map_or("", |(_, rest)| rest)
    } else {
        source.as_str()
    };

    let env = create_root_env();
    make_program(body)
        .and_then(|program| run(&program, &env))
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn repl() -> Result<(), String> {
    println!("lisplet {}", env!("CARGO_PKG_VERSION"));
    println!("Enter expressions like (set! x 3) or (+ x 4). Ctrl+C or Ctrl+D exits.");

    let mut rl = DefaultEditor::new().map_err(|e| e.to_string())?;
    let env = create_root_env();

    loop {
        match read_expression(&mut rl) {
            Ok(Some(source)) => {
                match make_program(&source).and_then(|program| run(&program, &env)) {
                    Ok(Some(value)) => println!("=> {value}"),
                    Ok(None) => {}
                    Err(e) => println!("Error: {e}"),
                }
            }
            Ok(None) => {
                println!("Goodbye!");
                return Ok(());
            }
            Err(e) => return Err(e.to_string()),
        }
    }
}

/// Read one expression, continuing across lines until the paren count
/// balances. Returns `None` when the user ends the session.
fn read_expression(rl: &mut DefaultEditor) -> Result<Option<String>, ReadlineError> {
    let mut lines: Vec<String> = Vec::new();
    let mut level: i64 = 0;

    loop {
        let prompt = if lines.is_empty() {
            ">>> ".to_owned()
        } else {
            format!("... {}", "  ".repeat(level.max(0) as usize))
        };

        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.trim_end());
                }
                level += paren_balance(&line);
                lines.push(line);
                if level <= 0 {
                    return Ok(Some(lines.join("\n")));
                }
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => return Ok(None),
            Err(err) => return Err(err),
        }
    }
}

/// Net paren count of one line. The count is as blind as the reader itself:
/// parens inside string literals are structure there too.
fn paren_balance(line: &str) -> i64 {
    let mut level = 0;
    for ch in line.chars() {
        match ch {
            '(' => level += 1,
            ')' => level -= 1,
            _ => {}
        }
    }
    level
}
