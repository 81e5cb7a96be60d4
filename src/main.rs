mod debug_report;

use chrono::{DateTime, NaiveDateTime, Utc};
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tagscript::{Context, Options, Script, render_verbose};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TAGSCRIPT_LOG";

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(config: &CliConfig) -> Result<(), String> {
    if config.validate {
        let script = Script::validated(config.input.as_str()).map_err(|err| format!("error: {err}"))?;
        println!("valid: {}", script.kind().describe(true, false));
        return Ok(());
    }

    let context = match &config.context {
        Some(path) => load_context(path)?,
        None => Context::default(),
    };
    let options = Options { now: config.now, seed: config.seed };

    let compiled = render_verbose(&config.input, &context, &options).map_err(|err| format!("error: {err}"))?;

    if config.json {
        let json = serde_json::to_string_pretty(&compiled.payload)
            .map_err(|err| format!("error: failed to serialize payload: {err}"))?;
        println!("{json}");
    } else {
        debug_report::print_run(&config.input, &compiled, &tagscript::diagnostics(), config.color);
    }
    Ok(())
}

struct CliConfig {
    input: String,
    context: Option<PathBuf>,
    now: Option<DateTime<Utc>>,
    seed: Option<u64>,
    validate: bool,
    json: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut context = None;
    let mut now = None;
    let mut seed = None;
    let mut validate = false;
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("tagscript {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--validate" => validate = true,
            "--json" => json = true,
            "--context" | "-c" => {
                let value = args.next().ok_or_else(|| "error: --context expects a file".to_string())?;
                context = Some(PathBuf::from(value));
            }
            "--now" => {
                let value = args.next().ok_or_else(|| "error: --now expects a value".to_string())?;
                now = Some(parse_now(&value)?);
            }
            "--seed" => {
                let value = args.next().ok_or_else(|| "error: --seed expects a value".to_string())?;
                seed = Some(parse_seed(&value)?);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--context=") => {
                context = Some(PathBuf::from(arg.trim_start_matches("--context=")));
            }
            _ if arg.starts_with("--now=") => now = Some(parse_now(arg.trim_start_matches("--now="))?),
            _ if arg.starts_with("--seed=") => seed = Some(parse_seed(arg.trim_start_matches("--seed="))?),
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no script provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, context, now, seed, validate, json, color })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn load_context(path: &Path) -> Result<Context, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("error: failed to read context '{}': {err}", path.display()))?;
    serde_json::from_str(&raw).map_err(|err| format!("error: invalid context '{}': {err}", path.display()))
}

fn parse_now(value: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("error: invalid --now '{value}' (expected YYYY-MM-DDTHH:MM:SS)"))
}

fn parse_seed(value: &str) -> Result<u64, String> {
    value.parse().map_err(|_| format!("error: invalid --seed '{value}' (expected an unsigned integer)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "tagscript {version}

Compile a tag script into a chat message and inspect the result.

Usage:
  tagscript [OPTIONS] [--] <script...>
  echo '<script>' | tagscript [OPTIONS]

Options:
  -c, --context <file>       JSON file with the context to substitute
                             (guild, user, channel, ...).
  --validate                 Only check the script for authoring errors and
                             report whether it is a text or an embed.
  --json                     Print the compiled payload as JSON.
  --now <timestamp>          Clock for {{timestamp}} in YYYY-MM-DDTHH:MM:SS.
                             Default: current time.
  --seed <n>                 Seed for {{random}} and random colors.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}               Log filter (default: warn), e.g. {log_env}=debug.

Exit codes:
  0  Success.
  1  The script failed to compile or validate.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
