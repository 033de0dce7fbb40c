//! Command-line interface for rad-syntax
//! This binary lexes or parses rad scripts and prints the result in one of
//! the processor's output formats.
//!
//! Usage:
//!   radp process `<path>` [--format `<format>`]  - Process a file and output to stdout
//!   radp `<path>` [--format `<format>`]          - Same as process (default command)
//!   radp formats                               - List all available formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use rad_syntax::rad::parser::ParseOptions;
use rad_syntax::rad::processor::{
    available_formats, process_file, ProcessingError, ProcessingSpec,
};
use std::fs;
use tracing_subscriber::EnvFilter;

const DEFAULT_FORMAT: &str = "ast-treeviz";

fn main() {
    let matches = Command::new("radp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting how rad scripts lex and parse")
        .subcommand_required(false)
        .arg_required_else_help(true)
        .args_conflicts_with_subcommands(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log pipeline stages to stderr (repeat for more detail)")
                .action(ArgAction::Count)
                .global(true),
        )
        .args(process_args(false))
        .subcommand(
            Command::new("process")
                .about("Process a file and output to stdout (default command)")
                .args(process_args(true)),
        )
        .subcommand(Command::new("formats").about("List all available output formats"))
        .get_matches();

    init_tracing(matches.get_count("verbose"));

    let result = match matches.subcommand() {
        Some(("process", process_matches)) => handle_process_command(process_matches),
        Some(("formats", _)) => {
            handle_formats_command();
            Ok(())
        }
        _ => handle_process_command(&matches),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn process_args(path_required: bool) -> Vec<Arg> {
    vec![
        Arg::new("path")
            .help("Path to the rad script to process")
            .required(path_required)
            .index(1),
        Arg::new("format")
            .long("format")
            .short('f')
            .help("Output format (e.g., token-simple, ast-treeviz)")
            .default_value(DEFAULT_FORMAT),
        Arg::new("options")
            .long("options")
            .help("YAML file with parse options (max_nesting_depth, tab_width)"),
        Arg::new("max-depth")
            .long("max-depth")
            .help("Maximum nesting depth, overrides the options file")
            .value_parser(clap::value_parser!(usize)),
    ]
}

fn init_tracing(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(verbosity))),
        )
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

fn directive_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "rad_syntax=warn",
        1 => "rad_syntax=debug",
        _ => "rad_syntax=trace",
    }
}

fn handle_process_command(matches: &ArgMatches) -> Result<(), ProcessingError> {
    let Some(path) = matches.get_one::<String>("path") else {
        return Err(ProcessingError::FileNotFound("no input path given".to_string()));
    };
    let format = matches
        .get_one::<String>("format")
        .map_or(DEFAULT_FORMAT, String::as_str);

    let spec = ProcessingSpec::from_string(format)?;
    let options = load_options(
        matches.get_one::<String>("options").map(String::as_str),
        matches.get_one::<usize>("max-depth").copied(),
    )?;

    let output = process_file(path, &spec, &options)?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Defaults, then the options file, then flags
fn load_options(
    path: Option<&str>,
    max_depth: Option<usize>,
) -> Result<ParseOptions, ProcessingError> {
    let mut options = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| ProcessingError::Io(format!("Failed to read {path}: {e}")))?;
            serde_yaml::from_str(&text)
                .map_err(|e| ProcessingError::Io(format!("Invalid options in {path}: {e}")))?
        }
        None => ParseOptions::default(),
    };
    if let Some(depth) = max_depth {
        options.max_nesting_depth = depth;
    }
    Ok(options)
}

fn handle_formats_command() {
    println!("Available formats:");
    for format in available_formats() {
        println!("  {format}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_defaults() {
        assert_eq!(directive_for_verbosity(0), "rad_syntax=warn");
        assert_eq!(directive_for_verbosity(1), "rad_syntax=debug");
        assert_eq!(directive_for_verbosity(5), "rad_syntax=trace");
    }

    #[test]
    fn max_depth_flag_overrides_defaults() {
        let options = load_options(None, Some(8)).unwrap();
        assert_eq!(options.max_nesting_depth, 8);
        assert_eq!(options.tab_width, ParseOptions::default().tab_width);
    }

    #[test]
    fn missing_options_file_is_an_error() {
        assert!(matches!(
            load_options(Some("no/such/options.yaml"), None),
            Err(ProcessingError::Io(_))
        ));
    }
}
