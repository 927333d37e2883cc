//! Command-line interface for mtlog templates
//! Parses message templates and prints their token stream, tree or diagnostics.
//!
//! Usage:
//!   mtlog parse `<path>` [--format `<format>`] [--config `<file>`]  - Print a template in some format
//!   mtlog parse --string `<template>`                               - Same, for an inline template
//!   mtlog parse `<path>` --linum                                    - Treeviz with source line numbers
//!   mtlog check `<path>`                                            - Print diagnostics, exit 1 on errors
//!   mtlog formats                                                 - List the available formats
//!
//! `<path>` may be `-` to read from stdin.

use clap::{Arg, ArgAction, ArgMatches, Command};
use mtlog_template::template::config::{Loader, MtlogConfig, LOCAL_CONFIG_FILE};
use mtlog_template::template::formats::FormatRegistry;
use mtlog_template::template::parse_template;
use mtlog_template::template::processor::{process_str, ProcessingSpec};
use std::io::Read;
use std::process;

fn input_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("path")
                .help("Path to the template file, or - for stdin")
                .required_unless_present("string")
                .conflicts_with("string")
                .index(1),
        )
        .arg(
            Arg::new("string")
                .long("string")
                .short('s')
                .value_name("TEMPLATE")
                .help("Template text given directly on the command line"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Configuration file layered over the defaults and ./mtlog.toml"),
        )
}

fn build_cli() -> Command {
    Command::new("mtlog")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting message templates")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            input_args(Command::new("parse").about("Parse a template and print it"))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'ast-treeviz', 'token-json'); defaults to output.format from config"),
                )
                .arg(
                    Arg::new("linum")
                        .long("linum")
                        .action(ArgAction::SetTrue)
                        .help("Prefix treeviz lines with source line numbers"),
                ),
        )
        .subcommand(input_args(
            Command::new("check").about("Report template diagnostics; exits with 1 on errors"),
        ))
        .subcommand(Command::new("formats").about("List available output formats"))
}

fn main() {
    let matches = build_cli().get_matches();

    let verbose = matches.get_flag("verbose")
        || matches
            .subcommand()
            .is_some_and(|(_, sub)| sub.get_flag("verbose"));
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("MTLOG_LOG", default_level))
        .init();

    match matches.subcommand() {
        Some(("parse", parse_matches)) => handle_parse_command(parse_matches),
        Some(("check", check_matches)) => handle_check_command(check_matches),
        Some(("formats", _)) => handle_formats_command(),
        _ => unreachable!(),
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn read_source(matches: &ArgMatches) -> String {
    if let Some(text) = matches.get_one::<String>("string") {
        return text.clone();
    }
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    log::debug!("reading template from {}", path);
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .unwrap_or_else(|e| fail(format!("reading stdin: {}", e)));
        buffer
    } else {
        std::fs::read_to_string(path).unwrap_or_else(|e| fail(format!("reading {}: {}", path, e)))
    }
}

fn load_config(matches: &ArgMatches) -> MtlogConfig {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    // Only `parse` defines --linum
    if matches!(matches.try_get_one::<bool>("linum"), Ok(Some(true))) {
        loader = loader
            .set_override("treeviz.show_linum", true)
            .unwrap_or_else(|e| fail(format!("applying --linum: {}", e)));
    }
    loader
        .build()
        .unwrap_or_else(|e| fail(format!("loading configuration: {}", e)))
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let format = matches
        .get_one::<String>("format")
        .cloned()
        .unwrap_or_else(|| config.output.format.clone());
    let spec = ProcessingSpec::from_string(&format).unwrap_or_else(|e| fail(e));
    let source = read_source(matches);

    let output = process_str(&source, &spec, &config).unwrap_or_else(|e| fail(e));
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let source = read_source(matches);
    let template = parse_template(&source);
    let diagnostics = template.diagnostics_with(&config.diagnostics);

    for diagnostic in &diagnostics {
        println!("{}", diagnostic);
    }
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    log::debug!(
        "check: {} diagnostics, {} errors",
        diagnostics.len(),
        errors
    );
    if errors > 0 {
        process::exit(1);
    }
}

/// Handle the formats command
fn handle_formats_command() {
    println!("Available formats:\n");
    for spec in ProcessingSpec::available_specs() {
        println!("  {}", spec);
    }
    println!("\nTree formatters:\n");
    for (name, description) in FormatRegistry::with_defaults().describe() {
        println!("  {:<12} {}", name, description);
    }
}
