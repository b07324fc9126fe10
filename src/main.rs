//! Command-line interface for jahelper-rs
//!
//! Usage:
//!   echo "食べました" | mecab | jahelper [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>  TOML build configuration
//!   -d, --data <DIR>     Data directory (overrides the configuration)
//!   -j, --json           Output as JSON
//!       --export <FILE>  Write the expanded dictionary as TSV
//!   -h, --help           Show help

use jahelper_rs::{build_from_config, parse_mecab_output, BuildConfig, MatchedSpan, Matcher, SharedDictionary};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Read};
use tracing::info;

static DICTIONARY: SharedDictionary = SharedDictionary::new();

fn print_help() {
    eprintln!(
        r#"jahelper - look up segmented Japanese text in an inflected dictionary

USAGE:
    mecab | jahelper [OPTIONS]

OPTIONS:
    -c, --config <FILE>  TOML build configuration
    -d, --data <DIR>     Data directory (default: ./data)
    -j, --json           Output as JSON
        --export <FILE>  Write the expanded dictionary as TSV and exit
                         when no input is piped in
    -h, --help           Show this help message

Set RUST_LOG (e.g. RUST_LOG=debug) to change the log level.

EXAMPLES:
    echo "書かないでしょう" | mecab | jahelper
    echo "食べました" | mecab | jahelper -j -d /srv/jahelper/data
    jahelper --export expanded.tsv < /dev/null
"#
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<String> = None;
    let mut data_dir: Option<String> = None;
    let mut export_path: Option<String> = None;
    let mut json_output = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-j" | "--json" => {
                json_output = true;
            }
            "-c" | "--config" | "-d" | "--data" | "--export" => {
                let flag = args[i].clone();
                i += 1;
                let Some(value) = args.get(i).cloned() else {
                    fail(format!("{} requires a path", flag));
                };
                match flag.as_str() {
                    "-c" | "--config" => config_path = Some(value),
                    "-d" | "--data" => data_dir = Some(value),
                    _ => export_path = Some(value),
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => BuildConfig::load_toml(&path).unwrap_or_else(|e| fail(e)),
        None => BuildConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir.into();
    }

    let dictionary = DICTIONARY
        .get_or_build(|| build_from_config(&config).map(|(_, dictionary)| dictionary))
        .unwrap_or_else(|e| fail(e));

    if let Some(path) = &export_path {
        let file = File::create(path).unwrap_or_else(|e| fail(format!("cannot create '{}': {}", path, e)));
        dictionary
            .write_tsv(BufWriter::new(file))
            .unwrap_or_else(|e| fail(format!("cannot write '{}': {}", path, e)));
        info!(path = %path, entries = dictionary.len(), "Exported dictionary");
    }

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        fail(format!("reading stdin: {}", e));
    }
    if input.trim().is_empty() {
        if export_path.is_none() {
            eprintln!("Error: No segmenter output on stdin");
            print_help();
            std::process::exit(1);
        }
        return;
    }

    let matcher = Matcher::with_arc(dictionary);
    let sentences: Vec<Vec<MatchedSpan>> = parse_mecab_output(&input)
        .iter()
        .map(|tokens| matcher.match_tokens(tokens))
        .collect();

    if json_output {
        match serde_json::to_string_pretty(&sentences) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(format!("serializing to JSON: {}", e)),
        }
    } else {
        for spans in &sentences {
            for span in spans {
                for (rank, entry) in span.candidates.iter().enumerate() {
                    println!("{}\t{}\t{}", span.surface, rank + 1, entry);
                }
            }
            println!("EOS");
        }
    }
}
