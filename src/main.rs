//! `wisp` - run a file, or start an interactive session
//!
//! ```text
//! wisp [--config path] [file [args...]]
//! ```

use std::process;
use std::sync::Once;

use anyhow::{anyhow, bail, Context};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use wisp::{BuiltinRegistry, Config, Error, ErrorSeverity, Interpreter};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Call this once at program start to enable tracing output.
/// Uses `RUST_LOG` environment variable for filtering (e.g., `RUST_LOG=wisp=debug`).
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Parsed command line
struct Args {
    config: Option<String>,
    file: Option<String>,
    argv: Vec<String>,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut config = None;
    let mut file = None;

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--config" => match raw.next() {
                Some(path) => config = Some(path),
                None => bail!("--config requires a path"),
            },
            "--version" => {
                println!("wisp {}", wisp::VERSION);
                process::exit(0);
            }
            "--builtins" => {
                print_builtins();
                process::exit(0);
            }
            _ => {
                file = Some(arg);
                break;
            }
        }
    }

    Ok(Args {
        config,
        file,
        argv: raw.collect(),
    })
}

fn print_builtins() {
    let registry = BuiltinRegistry::new();
    for name in registry.list_names() {
        if let Ok(builtin) = registry.get(&name) {
            println!("{:<12} {}", name, builtin.description());
        }
    }
}

fn main() {
    init_tracing();

    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("wisp: {:#}", e);
            process::exit(2);
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let args = parse_args(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => Config::load(path).map_err(|e| anyhow!("loading config {}: {}", path, e))?,
        None => Config::default(),
    }
    .with_env_overrides();

    // Interpreter errors can carry Lisp values, which are not Send; flatten to text
    let interp =
        Interpreter::with_config(config).map_err(|e| anyhow!("starting interpreter: {}", e))?;
    interp.set_argv(&args.argv);

    match args.file {
        Some(file) => Ok(run_file(&interp, &file)),
        None => run_repl(&interp),
    }
}

fn run_file(interp: &Interpreter, file: &str) -> i32 {
    match interp.load_file(file) {
        Ok(value) => {
            println!("{}", value);
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}

fn run_repl(interp: &Interpreter) -> anyhow::Result<i32> {
    let config = interp.config();
    if config.print_banner {
        println!("Wisp {}", wisp::VERSION);
        println!("Ctrl+D to exit.");
    }

    let mut rl = DefaultEditor::new().context("initializing line editor")?;
    if let Some(history) = &config.history_file {
        // A missing history file is normal on first run
        let _ = rl.load_history(history);
    }

    let continuation = " ".repeat(config.prompt.len());
    let mut pending = String::new();

    loop {
        let prompt = if pending.is_empty() {
            config.prompt.as_str()
        } else {
            continuation.as_str()
        };

        match rl.readline(prompt) {
            Ok(line) => {
                if pending.is_empty() && line.trim().is_empty() {
                    continue;
                }
                pending.push_str(&line);
                pending.push('\n');

                match submit(interp, &pending) {
                    Submission::Pending => continue,
                    Submission::Done(output) => println!("{}", output),
                }

                let _ = rl.add_history_entry(pending.trim_end());
                pending.clear();
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C abandons a partial form but keeps the session
                pending.clear();
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(history) = &config.history_file {
        rl.save_history(history)
            .with_context(|| format!("saving history to {}", history.display()))?;
    }
    Ok(0)
}

/// Outcome of handing the accumulated REPL input to the interpreter
#[derive(Debug, PartialEq)]
enum Submission {
    /// The reader stopped mid-form; keep collecting lines
    Pending,
    /// Text to print: the value, or the error
    Done(String),
}

fn submit(interp: &Interpreter, source: &str) -> Submission {
    let form = match interp.read(source) {
        Ok(form) => form,
        Err(e) if e.classify() == ErrorSeverity::Incomplete => return Submission::Pending,
        Err(e) => return Submission::Done(render_error(&e)),
    };
    match interp.eval(&form) {
        Ok(value) => Submission::Done(value.to_string()),
        Err(e) => Submission::Done(render_error(&e)),
    }
}

fn render_error(err: &Error) -> String {
    match err {
        Error::UserError(value) => format!("Error: {}", value),
        other => format!("Error: {}", other),
    }
}
