//! Sprig command line driver.

use std::process::ExitCode;

use sprigc::commands::{parse_file, run_file, run_repl};
use sprigc::{parse_options, CliError, CliOptions};

fn main() -> ExitCode {
    sprigc::init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let command = args[1].as_str();
    let result = match command {
        "run" => with_path(&args[2..], "Usage: sprig run <file.sprig> [options]", run_file),
        "parse" => with_path(&args[2..], "Usage: sprig parse <file.sprig>", parse_file),
        "repl" => parse_options(&args[2..]).and_then(|(options, _)| {
            run_repl(&options)?;
            Ok(true)
        }),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(true)
        }
        "version" | "--version" | "-v" => {
            println!("Sprig {}", env!("CARGO_PKG_VERSION"));
            Ok(true)
        }
        _ => {
            // A bare script path runs it.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("sprig"))
            {
                parse_options(&args[2..]).and_then(|(options, _)| run_file(command, &options))
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                return ExitCode::FAILURE;
            }
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("error: {error}");
            if matches!(error, CliError::MissingPath) {
                print_usage();
            }
            ExitCode::FAILURE
        }
    }
}

fn with_path(
    args: &[String],
    usage: &str,
    command: fn(&str, &CliOptions) -> Result<bool, CliError>,
) -> Result<bool, CliError> {
    let (options, positional) = parse_options(args)?;
    let Some(path) = positional.first() else {
        eprintln!("{usage}");
        return Err(CliError::MissingPath);
    };
    command(path, &options)
}

fn print_usage() {
    println!("Sprig (embeddable prototype-based expression language)");
    println!();
    println!("Usage: sprig <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.sprig>     Evaluate a script and print its result");
    println!("  parse <file.sprig>   Print the expression tree and syntax errors");
    println!("  repl                 Read and evaluate lines from stdin");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --limit=<n>          Stop after evaluating n expressions");
    println!("  --max-depth=<n>      Maximum call depth (default: 1024)");
    println!("  --color=<mode>       Diagnostic colors: auto, always, never");
    println!();
    println!("Examples:");
    println!("  sprig run main.sprig");
    println!("  sprig main.sprig --limit=100000");
    println!("  RUST_LOG=sprig_eval=trace sprig run main.sprig");
}
