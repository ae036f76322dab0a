//! Refrain CLI entry point.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use refrain_engine::{Corpus, ElementIndex, Miner, SequenceFormat, select_lines};
use refrain_runtime::{DisplayConfig, Repl, render_csv, render_json, render_text};
use tracing_subscriber::EnvFilter;

/// How the count report is emitted.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
enum OutputMode {
    #[default]
    Text,
    Csv,
    Json,
}

/// Options shared by every subcommand, parsed from arguments.
#[derive(Default)]
struct CliConfig {
    file: Option<PathBuf>,
    format: SequenceFormat,
    display: DisplayConfig,
    output: OutputMode,
    /// `count`: pattern texts.
    patterns: Vec<String>,
    /// `count`: variable declarations from `-v`.
    variables: Vec<String>,
    /// `select`: requested line indices.
    indices: Vec<usize>,
    /// `convert`: element prefixes to drop.
    remove: Vec<String>,
    /// `convert`: fail when an item has no mapping.
    stop_on_failures: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn run(mut args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let verbose = args.iter().any(|a| a == "--verbose");
    args.retain(|a| a != "--verbose");
    init_tracing(verbose);

    match args.get(1).map(String::as_str) {
        None | Some("-h" | "--help") => {
            print_help();
            Ok(())
        }
        Some("-V" | "--version") => {
            println!("refrain {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some("count") => count(parse_args(&args[2..])?),
        Some("select") => select(parse_args(&args[2..])?),
        Some("show") => show(parse_args(&args[2..])?),
        Some("convert") => convert(parse_args(&args[2..])?),
        Some("repl") => repl(parse_args(&args[2..])?),
        Some(other) => Err(format!("unknown subcommand: {other}").into()),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig {
        remove: vec!["IN".to_string(), "OUT".to_string(), "INIT".to_string()],
        ..CliConfig::default()
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-f" | "--file" => config.file = Some(PathBuf::from(next_value(args, &mut i)?)),
            "-l" | "--line-sep" => config.format.line_sep = next_value(args, &mut i)?,
            "-g" | "--group-sep" => config.format.group_sep = next_value(args, &mut i)?,
            "-v" | "--var" => config.variables.push(next_value(args, &mut i)?),
            "-r" | "--remove" => {
                config.remove = next_value(args, &mut i)?
                    .split(',')
                    .map(str::to_string)
                    .collect();
            }
            "-z" | "--show-support-zero" => config.display.show_support_zero = true,
            "-b" | "--hide-bindings" => config.display.hide_bindings = true,
            "-n" | "--line-number" => config.display.show_lines = true,
            "-t" | "--line-text" => config.display.show_text = true,
            "-c" | "--csv" => config.output = OutputMode::Csv,
            "--json" => config.output = OutputMode::Json,
            "-s" | "--stop-on-failures" => config.stop_on_failures = true,
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("unknown option: {arg}").into());
            }
            arg => {
                // A bare operand: a line index for select, a pattern
                // otherwise.
                if let Ok(index) = arg.trim_end_matches(',').parse::<usize>() {
                    config.indices.push(index);
                } else {
                    config.patterns.push(arg.to_string());
                }
            }
        }
        i += 1;
    }

    Ok(config)
}

fn next_value(args: &[String], i: &mut usize) -> Result<String, Box<dyn std::error::Error>> {
    let option = args[*i].clone();
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("{option} requires a value").into())
}

/// Reads the corpus text from the configured file, or stdin.
fn read_input(config: &CliConfig) -> Result<String, Box<dyn std::error::Error>> {
    match &config.file {
        Some(path) => Ok(fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn count(config: CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(&config)?;
    let corpus = Corpus::from_text(&text, &config.format)?;
    tracing::debug!(
        sequences = corpus.len(),
        patterns = config.patterns.len(),
        variables = config.variables.len(),
        "count invocation"
    );
    let miner = Miner::new(&corpus);
    let report = miner.run_texts(&config.patterns, &config.variables)?;

    for error in &report.errors {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }
    if let Some(variable) = &report.empty_domain {
        eprintln!("\x1b[33mwarning: variable {variable} has an empty domain\x1b[0m");
    }

    match config.output {
        OutputMode::Text => print!(
            "{}",
            render_text(&report, &corpus, &config.format, &config.display)
        ),
        OutputMode::Csv => print!("{}", render_csv(&report, &config.display)),
        OutputMode::Json => println!("{}", render_json(&report)?),
    }
    Ok(())
}

fn select(config: CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(&config)?;
    let lines = select_lines(&text, &config.format, &config.indices)?;

    let width = config
        .indices
        .iter()
        .map(|i| i.to_string().len())
        .max()
        .unwrap_or(1);
    for (index, line) in config.indices.iter().zip(&lines) {
        let number = if config.display.show_lines {
            format!("{index:<width$}| ")
        } else {
            String::new()
        };
        println!("{number}{line} {}", config.format.line_sep);
    }
    Ok(())
}

fn show(config: CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(&config)?;
    let corpus = Corpus::from_text(&text, &config.format)?;

    for (i, sequence) in corpus.sequences().iter().enumerate() {
        let annotated = ElementIndex::build(sequence).annotate(sequence);
        let number = if config.display.show_lines {
            format!("{i}: ")
        } else {
            String::new()
        };
        println!("{number}{}", annotated.to_text(&config.format));
    }
    Ok(())
}

fn convert(config: CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(&config)?;

    // SPMF headers: `@ITEM=<number>=<name>` lines define the dictionary.
    let mut conversions = BTreeMap::new();
    let mut data_lines = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.starts_with('@') {
            if line.to_uppercase().starts_with("@ITEM") {
                let mut parts = line.splitn(3, '=');
                let (Some(_), Some(number), Some(name)) =
                    (parts.next(), parts.next(), parts.next())
                else {
                    return Err(format!("malformed item mapping: {line}").into());
                };
                conversions.insert(number.trim().to_string(), name.trim().to_string());
            }
        } else {
            data_lines.push(line);
        }
    }

    let corpus = Corpus::from_text_lenient(&data_lines.join("\n"), &config.format);
    let (converted, failures) = corpus.convert(&conversions, &config.remove);

    if !failures.is_empty() {
        let list: Vec<String> = failures.iter().cloned().collect();
        let message = format!("The following element(s) were not found: {}", list.join(", "));
        if config.stop_on_failures {
            return Err(message.into());
        }
        eprintln!("\x1b[33m{message}\x1b[0m");
    }

    for sequence in converted.sequences() {
        println!("{}", sequence.to_text(&config.format));
    }
    Ok(())
}

fn repl(config: CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let path = config
        .file
        .as_ref()
        .ok_or("repl requires --file (stdin is reserved for input)")?;
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let corpus = Corpus::from_text(&text, &config.format)?;

    Repl::new(corpus)?
        .with_format(config.format)
        .with_config(config.display)
        .run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mRefrain\x1b[0m - Counts patterns in sequences of groups

\x1b[1mUSAGE:\x1b[0m
    refrain <SUBCOMMAND> [OPTIONS]

\x1b[1mSUBCOMMANDS:\x1b[0m
    count [PATTERN]... [-v VAR]...   Count patterns in the corpus
    select INDEX...                  Print the selected sequence lines
    show                             Print sequences with In/Out events
    convert                          Convert an SPMF dictionary corpus
    repl                             Interactive pattern queries

\x1b[1mOPTIONS:\x1b[0m
    -h, --help                 Print help information
    -V, --version              Print version information
    -f, --file FILE            Read the corpus from FILE (default: stdin)
    -l, --line-sep SEP         Sequence terminator token (default: -2)
    -g, --group-sep SEP        Group terminator token (default: -1)
    -v, --var DECL             Declare a variable: NAME, NAME~A,B or NAME:A,B
    -z, --show-support-zero    Keep zero-support binding blocks
    -b, --hide-bindings        Suppress per-binding blocks
    -n, --line-number          Show matching line numbers
    -t, --line-text            Show matching line text
    -c, --csv                  Emit the report as CSV
        --json                 Emit the report as JSON
    -r, --remove PREFIXES      convert: drop elements with these prefixes
                               (comma-separated; default: IN,OUT,INIT)
    -s, --stop-on-failures     convert: fail on unmapped items
        --verbose              Log debug events to stderr

\x1b[1mPATTERNS:\x1b[0m
    A B        both occur            A -> B     A strictly before B
    A | B      either occurs         A => B     A at or before B
    A & B      same group            [A B]      B inside a run of A
    ~A  ^A  $A not / first / last    {A B}      open slice boundaries
    InA  OutA  insertion / removal events

\x1b[1mEXAMPLES:\x1b[0m
    refrain count \"A -> B\" -f corpus.txt -n
    refrain count \"x & y\" -v x -v y -f corpus.txt
    refrain count \"[A]\" \"[A B]\" -f corpus.txt
    refrain select 1 2 -f corpus.txt -n
    refrain show -f corpus.txt
    refrain repl -f corpus.txt"
    );
}
