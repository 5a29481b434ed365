use planar_core::config::set_path;
use planar_core::{AnalysisOptions, AnalysisResult, Engine, EulerReport};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Analysis(planar_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Analysis(err) => write!(f, "{} error: {err}", err.kind().as_str()),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<planar_core::Error> for CliError {
    fn from(value: planar_core::Error) -> Self {
        Self::Analysis(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Analyze,
    Check,
    Layout,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    config: Option<String>,
    seed: Option<u64>,
    iterations: Option<usize>,
    no_layout: bool,
    concurrent: bool,
}

#[derive(Serialize)]
struct CheckOut<'a> {
    is_planar: bool,
    euler: &'a EulerReport,
}

fn usage() -> &'static str {
    "planar-cli\n\
\n\
USAGE:\n\
  planar-cli [analyze] [--pretty] [--seed <n>] [--iterations <n>] [--no-layout] [--concurrent] [--config <path>] [<path>|-]\n\
  planar-cli check [--pretty] [--config <path>] [<path>|-]\n\
  planar-cli layout [--pretty] [--seed <n>] [--iterations <n>] [--config <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON array of edges, or an object {\"edges\": [...], \"nodes\": [...]}.\n\
  - Each edge is {\"source\": a, \"target\": b} or [a, b]; endpoints are strings or integers.\n\
  - --config reads a JSON options file; flags override it.\n\
  - Set PLANAR_LOG (e.g. PLANAR_LOG=debug) to control diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "analyze" => args.command = Command::Analyze,
            "check" => args.command = Command::Check,
            "layout" => args.command = Command::Layout,
            "--pretty" => args.pretty = true,
            "--no-layout" => args.no_layout = true,
            "--concurrent" => args.concurrent = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--iterations" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.iterations = Some(n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    use std::io::Write;

    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Config file first, then command-line overrides.
fn resolve_options(args: &Args) -> Result<AnalysisOptions, CliError> {
    let base = match args.config.as_deref() {
        Some(path) => AnalysisOptions::from_json_str(&std::fs::read_to_string(path)?)?,
        None => AnalysisOptions::default(),
    };

    let mut overrides = Value::Object(Default::default());
    if let Some(seed) = args.seed {
        set_path(&mut overrides, "layout.seed", Value::from(seed));
    }
    if let Some(iterations) = args.iterations {
        set_path(&mut overrides, "layout.iterations", Value::from(iterations));
    }
    match args.command {
        Command::Check => set_path(&mut overrides, "compute_layout", Value::Bool(false)),
        Command::Layout => set_path(&mut overrides, "compute_layout", Value::Bool(true)),
        Command::Analyze if args.no_layout => {
            set_path(&mut overrides, "compute_layout", Value::Bool(false))
        }
        Command::Analyze => {}
    }
    if args.concurrent {
        set_path(&mut overrides, "concurrent_layout", Value::Bool(true));
    }
    Ok(base.merged(&overrides)?)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("PLANAR_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    let options = resolve_options(&args)?;
    let text = read_input(args.input.as_deref())?;
    tracing::debug!(command = ?args.command, bytes = text.len(), "read input");

    let engine = Engine::new().with_options(options);
    let result: AnalysisResult = engine.analyze_json(&text)?;

    match args.command {
        Command::Analyze => write_json(&result, args.pretty),
        Command::Check => write_json(
            &CheckOut {
                is_planar: result.is_planar,
                euler: &result.euler,
            },
            args.pretty,
        ),
        Command::Layout => {
            let value = serde_json::to_value(&result)?;
            write_json(&value["layout"], args.pretty)
        }
    }
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{Args, CliError, Command, parse_args, resolve_options};

    fn argv(parts: &[&str]) -> Vec<String> {
        std::iter::once("planar-cli")
            .chain(parts.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn defaults_to_analyze_from_stdin() {
        let args = parse_args(&argv(&[])).unwrap();
        assert_eq!(args.command, Command::Analyze);
        assert!(args.input.is_none());
        assert!(!args.pretty);
    }

    #[test]
    fn parses_flags_and_path() {
        let args = parse_args(&argv(&[
            "layout",
            "--pretty",
            "--seed",
            "7",
            "--iterations",
            "12",
            "graph.json",
        ]))
        .unwrap();
        assert_eq!(args.command, Command::Layout);
        assert!(args.pretty);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.iterations, Some(12));
        assert_eq!(args.input.as_deref(), Some("graph.json"));
    }

    #[test]
    fn rejects_bad_usage() {
        for bad in [
            &["--seed"][..],
            &["--seed", "x"],
            &["--bogus"],
            &["a.json", "b.json"],
        ] {
            assert!(matches!(parse_args(&argv(bad)), Err(CliError::Usage(_))));
        }
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args {
            command: Command::Check,
            seed: Some(5),
            ..Default::default()
        };
        let opts = resolve_options(&args).unwrap();
        assert_eq!(opts.layout.seed, 5);
        assert!(!opts.compute_layout);
    }
}
