use clap::{Arg, ArgAction, ArgMatches, Command};
use icalc::repl::{self, Config, Summary};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::Path;
use tracing::{info, Level};

fn main() {
    let matches = Command::new("icalc")
        .about("Interactive integer calculator")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("file")
                .help("Read expressions from this file, one per line, instead of stdin")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("show-ast")
                .long("show-ast")
                .help("Print the parsed expression tree before each result")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored diagnostics")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress the banner and prompt")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("prompt")
                .long("prompt")
                .value_name("TEXT")
                .help("Prompt shown before each line in interactive mode")
                .default_value("> "),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let result = match matches.get_one::<String>("file") {
        Some(file_path) => run_file(file_path, &matches),
        None => run_interactive(&matches),
    };

    match result {
        Ok(summary) => {
            info!(evaluated = summary.evaluated, failed = summary.failed, "session ended");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn base_config(matches: &ArgMatches) -> Config {
    Config {
        show_ast: matches.get_flag("show-ast"),
        color: !matches.get_flag("no-color") && io::stderr().is_terminal(),
        ..Config::default()
    }
}

fn run_interactive(matches: &ArgMatches) -> io::Result<Summary> {
    let interactive = io::stdin().is_terminal() && !matches.get_flag("quiet");
    let config = Config {
        prompt: if interactive {
            matches.get_one::<String>("prompt").cloned()
        } else {
            None
        },
        banner: interactive,
        ..base_config(matches)
    };

    info!(interactive, "reading expressions from stdin");
    repl::start(&config)
}

fn run_file(path: &str, matches: &ArgMatches) -> io::Result<Summary> {
    let path = Path::new(path);
    let file = File::open(path).map_err(|e| {
        io::Error::new(e.kind(), format!("cannot open '{}': {}", path.display(), e))
    })?;

    let config = Config {
        prompt: None,
        banner: false,
        source_name: Some(path.display().to_string()),
        ..base_config(matches)
    };

    info!(file = %path.display(), "reading expressions from file");
    let stdout = io::stdout();
    let stderr = io::stderr();
    repl::run(BufReader::new(file), stdout.lock(), stderr.lock(), &config)
}
