//! Command-line interface for chalk
//! Parses Chalk scripts and prints their syntax trees, token streams or the grammar.
//!
//! Usage:
//!   chalk parse `<path>` [--format `<format>`]  - Parse a script and print its tree
//!   chalk tokens `<path>`                     - Print every token, comments included
//!   chalk grammar                           - Print the Chalk grammar table
//!
//! Global options: `--config <file>` layers a TOML file over the defaults,
//! `--verbose` turns on debug logging (`RUST_LOG` takes precedence).
//!
//! Exit status: 0 success, 65 parse failure, 74 I/O failure, 78 bad configuration.

use chalk::chalk::config::{ChalkConfig, Loader};
use chalk::chalk::driver::{parse_script, Script};
use chalk::chalk::error::ParseError;
use chalk::chalk::formats::{self, FormatError, OutputFormat};
use chalk::chalk::grammar::Symbol;
use chalk::chalk::lang;
use chalk::chalk::language::Language;
use chalk::chalk::parser::ParseOptions;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

const EXIT_PARSE: i32 = 65;
const EXIT_IO: i32 = 74;
const EXIT_CONFIG: i32 = 78;

fn main() {
    let matches = Command::new("chalk")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse and inspect Chalk scripts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log pipeline progress to stderr"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a script and print its syntax tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the Chalk script")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (defaults to output.format from the configuration)")
                        .value_parser(OutputFormat::NAMES),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a script, comments included")
                .arg(
                    Arg::new("path")
                        .help("Path to the Chalk script")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("grammar").about("Print the Chalk grammar"))
        .get_matches();

    init_tracing(matches.get_flag("verbose"));
    let config = load_config(matches.get_one::<String>("config"));

    match matches.subcommand() {
        Some(("parse", parse_matches)) => handle_parse_command(parse_matches, &config),
        Some(("tokens", tokens_matches)) => handle_tokens_command(tokens_matches),
        Some(("grammar", _)) => handle_grammar_command(lang::language()),
        _ => unreachable!(),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "chalk=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&String>) -> ChalkConfig {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        process::exit(EXIT_CONFIG);
    })
}

fn read_source(path: &str) -> Vec<u8> {
    std::fs::read(path).unwrap_or_else(|e| {
        eprintln!("Error reading file {}: {}", path, e);
        process::exit(EXIT_IO);
    })
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches, config: &ChalkConfig) {
    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let format = match matches.get_one::<String>("format") {
        Some(name) => name.parse().unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(EXIT_CONFIG);
        }),
        None => config.output.format,
    };

    let source = read_source(path);
    let script = Script::new(Path::new(path), &source);
    let options = ParseOptions::from(&config.parser);
    let root = match parse_script(script, options, &mut std::io::stderr().lock()) {
        Ok(root) => root,
        Err(_) => process::exit(EXIT_PARSE),
    };

    let output = formats::render(lang::language(), &root, format, &config.output)
        .unwrap_or_else(|e| {
            eprintln!("Error rendering tree: {}", e);
            match e {
                FormatError::TooDeep { .. } => process::exit(EXIT_PARSE),
                _ => process::exit(EXIT_IO),
            }
        });
    print!("{}", output);
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) {
    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let source = read_source(path);
    let language = lang::language();

    for token in language.lexer(&source) {
        match token {
            Ok(token) => println!(
                "{:>4}:{:<3} {:<16} {}",
                token.line(),
                token.column(),
                language.token_name(token.kind).unwrap_or("?"),
                token.text
            ),
            Err(e) => {
                eprintln!("{}", ParseError::from(e).diagnostic(path));
                process::exit(EXIT_PARSE);
            }
        }
    }
}

/// Handle the grammar command
fn handle_grammar_command(language: &Language) {
    for production in language.grammar().productions() {
        println!("{} [{}]", production.name(), production.flags());
        for alternative in production.alternatives() {
            let symbols: Vec<&str> = alternative
                .symbols()
                .iter()
                .map(|symbol| match *symbol {
                    Symbol::Terminal(kind) => language.token_name(kind).unwrap_or("?"),
                    Symbol::Nonterminal(id) => language.grammar().name(id).unwrap_or("?"),
                })
                .collect();
            println!("  | {}", symbols.join(" "));
        }
    }
}
