use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use version_schemes::component::ComponentValue;
use version_schemes::version::schemes::{WendtField, WendtVerScheme};
use version_schemes::{Scheme, SchemeLoader, SchemeRegistry, VersionRange};

#[derive(Parser)]
#[command(name = "version-schemes")]
#[command(version, about = "Parse, compare and validate versions across versioning schemes")]
struct Cli {
    /// JSON file with extra scheme definitions (one record or an array)
    #[arg(long, global = true)]
    scheme_file: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered schemes
    Schemes,
    /// Parse a version and print its components
    Parse { scheme: String, version: String },
    /// Check versions against a scheme; fails if any is invalid
    Validate {
        scheme: String,
        #[arg(required = true)]
        versions: Vec<String>,
    },
    /// Compare two versions, printing <, = or >
    Compare { scheme: String, a: String, b: String },
    /// Sort versions in ascending order
    Sort {
        scheme: String,
        #[arg(required = true)]
        versions: Vec<String>,
    },
    /// Detect which scheme accepts a version
    Detect {
        version: String,
        /// Scheme names to try first
        #[arg(long = "prefer")]
        prefer: Vec<String>,
    },
    /// Check a version against a range such as ">= 1.0" or "1.0 - 2.0"
    Range {
        scheme: String,
        version: String,
        range: String,
    },
    /// Increment a WendtVer field with carryover
    Increment { version: String, field: String },
    /// Build a version from name=value pairs and print it
    Render {
        scheme: String,
        #[arg(required = true, value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .ok_or_else(|| format!("expected name=value, got '{s}'"))
}

fn init_logging(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn registry(scheme_file: Option<&PathBuf>) -> anyhow::Result<SchemeRegistry> {
    let registry = SchemeRegistry::with_builtins()?;
    if let Some(path) = scheme_file {
        let schemes = SchemeLoader::default()
            .schemes_from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
        for scheme in schemes {
            debug!("Loaded scheme '{}' from {}", scheme.name(), path.display());
            registry.register(scheme.name().to_string(), scheme);
        }
    }
    Ok(registry)
}

/// Parse `raw` with the segment of the same name, or guess integer / string
fn component_value(scheme: &Scheme, name: &str, raw: &str) -> anyhow::Result<ComponentValue> {
    match scheme.segments().iter().find(|s| s.name() == name) {
        Some(segment) => Ok(segment.parse(raw)?),
        None => Ok(raw
            .parse::<i64>()
            .map(ComponentValue::Integer)
            .unwrap_or_else(|_| ComponentValue::String(raw.to_string()))),
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let registry = registry(cli.scheme_file.as_ref())?;

    match cli.command {
        Command::Schemes => {
            for name in registry.registered() {
                let scheme = registry.get(&name)?;
                println!("{}\t{}", name, scheme.description().unwrap_or_default());
            }
        }
        Command::Parse { scheme, version } => {
            let version = registry.get(&scheme)?.parse(&version)?;
            println!("{version}");
            for component in version.components() {
                println!("  {} ({}): {}", component.name(), component.kind(), component);
            }
        }
        Command::Validate { scheme, versions } => {
            let scheme = registry.get(&scheme)?;
            let mut all_valid = true;
            for version in &versions {
                let valid = scheme.supports(version)?;
                all_valid &= valid;
                println!("{}\t{}", version, if valid { "valid" } else { "invalid" });
            }
            if !all_valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Compare { scheme, a, b } => {
            let ordering = registry.get(&scheme)?.compare(&a, &b)?;
            let symbol = match ordering {
                std::cmp::Ordering::Less => "<",
                std::cmp::Ordering::Equal => "=",
                std::cmp::Ordering::Greater => ">",
            };
            println!("{a} {symbol} {b}");
        }
        Command::Sort { scheme, versions } => {
            let scheme = registry.get(&scheme)?;
            let mut parsed = versions
                .iter()
                .map(|v| scheme.parse(v))
                .collect::<Result<Vec<_>, _>>()?;
            parsed.sort_by(|a, b| scheme.inner().compare_keys(a.key(), b.key()));
            for version in parsed {
                println!("{}", version.raw());
            }
        }
        Command::Detect { version, prefer } => {
            let prefer: Vec<&str> = prefer.iter().map(String::as_str).collect();
            match registry.detect_with_priority(&version, &prefer) {
                Some(scheme) => println!("{}", scheme.name()),
                None => bail!("no registered scheme accepts '{version}'"),
            }
        }
        Command::Range {
            scheme,
            version,
            range,
        } => {
            let range: VersionRange = range.parse()?;
            let matched = range.matches(&registry.get(&scheme)?, &version)?;
            println!("{version} {} {range}", if matched { "in" } else { "not in" });
            if !matched {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Increment { version, field } => {
            let field: WendtField = field.parse()?;
            println!("{}", WendtVerScheme::new().increment(&version, field)?);
        }
        Command::Render { scheme, values } => {
            let scheme = registry.get(&scheme)?;
            let values = values
                .iter()
                .map(|(name, raw)| {
                    component_value(&scheme, name, raw).map(|value| (name.clone(), value))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            println!("{}", scheme.build(values)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);
    run(cli)
}
