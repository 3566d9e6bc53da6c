use std::{fs::read_to_string, path::PathBuf, process::ExitCode};

use clap::Parser;
use log::{error, info, LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, Config, SimpleLogger, TermLogger, TerminalMode};

use classlex::{lexer::lexer::Lexer, Error};

/// Prints the tokens of a source file, one per line.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Source file to scan
    #[clap(value_parser)]
    file: PathBuf,

    /// Raise the log level (repeat for more)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print diagnostics
    #[clap(short, long, action)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(err) = init_logging(level) {
        eprintln!("failed to initialise logging: {}", err);
    }

    let source = match read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            error!("failed to read {}: {}", args.file.display(), err);
            return ExitCode::from(2);
        }
    };

    let file_name = args.file.to_string_lossy().to_string();
    let mut lexer = Lexer::with_file(source, file_name);
    let mut reported = 0;

    while let Some(item) = lexer.next() {
        display_errors(&lexer.diagnostics()[reported..], &lexer);
        reported = lexer.diagnostics().len();

        match item {
            Ok(token) if !args.quiet => println!("{}", token),
            Ok(_) => {}
            // Already printed with the rest of the diagnostics.
            Err(_) => return ExitCode::from(1),
        }
    }
    display_errors(&lexer.diagnostics()[reported..], &lexer);

    info!("{} lines scanned", lexer.line());
    ExitCode::SUCCESS
}

/// Terminal logger first, plain logger if that cannot be installed.
fn init_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .or_else(|_| SimpleLogger::init(level, Config::default()))
}

fn display_errors(errors: &[Error], lexer: &Lexer) {
    for error in errors {
        eprintln!("{}", error.render(lexer.source(), lexer.file()));
    }
}
