use crate::runner::run_line;
use std::io::{self, BufRead, Write};
use tracing::{debug, error, warn};

/// Driver settings, filled in from the command line by the binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// Printed before each read; `None` disables prompting.
    pub prompt: Option<String>,
    pub show_ast: bool,
    pub color: bool,
    pub banner: bool,
    /// Name shown in diagnostics, `<stdin>` when absent.
    pub source_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: Some("> ".to_string()),
            show_ast: false,
            color: true,
            banner: true,
            source_name: None,
        }
    }
}

/// Line counts for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub evaluated: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    WaitingForInput,
    Terminated,
}

/// Run the read-evaluate-print loop on stdin until end of input.
pub fn start(config: &Config) -> io::Result<Summary> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    run(stdin.lock(), stdout.lock(), stderr.lock(), config)
}

/// Read lines from `input` until end of input, writing results to `out` and
/// diagnostics to `err`.
///
/// A failing line is reported and the loop carries on with the next one;
/// only end of input or a read failure ends the session.
pub fn run<R, W, E>(mut input: R, mut out: W, mut err: E, config: &Config) -> io::Result<Summary>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    if config.banner {
        writeln!(out, "icalc v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "Enter an arithmetic expression; press Ctrl+D to quit")?;
        writeln!(out)?;
    }

    let mut summary = Summary::default();
    let mut state = State::WaitingForInput;
    let mut line = String::new();

    while state == State::WaitingForInput {
        if let Some(prompt) = &config.prompt {
            write!(out, "{}", prompt)?;
            out.flush()?;
        }

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                if config.prompt.is_some() {
                    // Keep the shell prompt off the last line.
                    writeln!(out)?;
                }
                state = State::Terminated;
            }
            Ok(_) => {
                let source = line.trim_end_matches(['\n', '\r']);
                if source.trim().is_empty() {
                    continue;
                }
                if evaluate_and_print(source, &mut out, &mut err, config)? {
                    summary.evaluated += 1;
                } else {
                    summary.failed += 1;
                }
            }
            Err(e) => {
                error!(error = %e, "failed to read input");
                writeln!(err, "Error reading input: {}", e)?;
                state = State::Terminated;
            }
        }
    }

    debug!(evaluated = summary.evaluated, failed = summary.failed, "session finished");
    Ok(summary)
}

/// Returns whether the line produced a result.
fn evaluate_and_print<W: Write, E: Write>(
    source: &str,
    out: &mut W,
    err: &mut E,
    config: &Config,
) -> io::Result<bool> {
    match run_line(source) {
        Ok(Some(evaluation)) => {
            if config.show_ast {
                writeln!(out, "AST: {}", evaluation.ast)?;
            }
            writeln!(out, "Result = {}", evaluation.value)?;
            Ok(true)
        }
        // Blank lines are filtered before this point.
        Ok(None) => Ok(true),
        Err(error) => {
            warn!(kind = %error.kind, message = %error.message, "line failed");
            error.write_report(source, config.source_name.as_deref(), &mut *err, config.color)?;
            err.flush()?;
            Ok(false)
        }
    }
}
