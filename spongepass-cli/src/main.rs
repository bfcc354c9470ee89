//! SPONGEPASS CLI
//!
//! Command-line interface for generating time-windowed passcodes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use rand::RngCore;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zeroize::Zeroize;

use spongepass_core::constants::{DEFAULT_DISPLAY_GROUP, SECRET_SIZE};
use spongepass_core::types::Secret;
use spongepass_core::{Clock, GeneratorConfig, SystemClock, Timestamp};
use spongepass_crypto::{seconds_remaining, window, Generator, SymbolStats};

/// SPONGEPASS - one-time passcodes from a keyed sponge
#[derive(Parser)]
#[command(name = "spongepass")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file
    #[arg(short, long, global = true, env = "SPONGEPASS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
struct SecretArgs {
    /// Identity the passcodes are bound to (e.g. a username)
    #[arg(short, long)]
    identity: String,

    /// 32-byte secret as hex
    #[arg(long, env = "SPONGEPASS_SECRET", hide_env_values = true, conflicts_with = "secret_file")]
    secret: Option<String>,

    /// File containing the hex secret
    #[arg(long)]
    secret_file: Option<PathBuf>,

    /// Passcode length in symbols
    #[arg(short, long)]
    length: Option<usize>,

    /// Window width in seconds
    #[arg(short, long)]
    granularity: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new random secret
    Keygen {
        /// Output file for the hex secret
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the passcode for the current window
    Generate {
        #[command(flatten)]
        secret: SecretArgs,

        /// Unix timestamp to generate for instead of now
        #[arg(long)]
        at: Option<Timestamp>,

        /// Print the passcode without grouping or decoration
        #[arg(long)]
        raw: bool,
    },

    /// Print a fresh passcode every time the window rolls over
    Watch {
        #[command(flatten)]
        secret: SecretArgs,
    },

    /// Show the current time window
    Window {
        /// Window width in seconds
        #[arg(short, long)]
        granularity: Option<u32>,

        /// Unix timestamp to inspect instead of now
        #[arg(long)]
        at: Option<Timestamp>,
    },

    /// Run generation benchmarks
    Bench {
        /// Number of passcodes to generate
        #[arg(short = 'n', long, default_value = "10000")]
        count: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "spongepass=debug,spongepass_crypto=debug,info"
    } else {
        "spongepass=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Keygen { output } => cmd_keygen(output),
        Commands::Generate { secret, at, raw } => cmd_generate(config, &secret, at, raw),
        Commands::Watch { secret } => cmd_watch(config, &secret).await,
        Commands::Window { granularity, at } => cmd_window(config, granularity, at),
        Commands::Bench { count } => cmd_bench(config, count),
    }
}

/// Loads configuration from a file when given, otherwise from the environment.
fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let config = match path {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GeneratorConfig::from_env().context("Invalid SPONGEPASS_* environment")?,
    };
    debug!(?config, "configuration loaded");
    Ok(config)
}

/// Applies command-line overrides on top of the loaded configuration.
fn apply_overrides(
    mut config: GeneratorConfig,
    length: Option<usize>,
    granularity: Option<u32>,
) -> Result<GeneratorConfig> {
    if let Some(length) = length {
        config = config.with_length(length);
    }
    if let Some(granularity) = granularity {
        config = config.with_granularity(granularity);
    }
    config.validate()?;
    Ok(config)
}

fn read_secret(args: &SecretArgs) -> Result<Secret> {
    let mut hex = match (&args.secret, &args.secret_file) {
        (Some(hex), _) => hex.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read secret file {}", path.display()))?,
        (None, None) => bail!("No secret given: pass --secret, --secret-file or set SPONGEPASS_SECRET"),
    };
    let secret = Secret::from_hex(&hex).context("Invalid secret");
    hex.zeroize();
    secret
}

fn build_generator(config: GeneratorConfig, args: &SecretArgs) -> Result<Generator> {
    let config = apply_overrides(config, args.length, args.granularity)?;
    let secret = read_secret(args)?;
    Generator::from_secret(args.identity.as_bytes(), &secret, config)
        .context("Failed to initialise passcode generator")
}

/// Generate a new secret
fn cmd_keygen(output: Option<PathBuf>) -> Result<()> {
    let mut bytes = [0u8; SECRET_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    let secret = Secret::from_array(bytes);
    bytes.zeroize();

    let mut hex = secret.to_hex();
    if let Some(path) = output {
        std::fs::write(&path, format!("{hex}\n"))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} {}", "✅ Secret saved to:".green(), path.display());
    } else {
        println!("{hex}");
    }
    hex.zeroize();

    eprintln!("\n{}", "⚠️  IMPORTANT: Keep this secret safe!".red().bold());
    Ok(())
}

/// Print one passcode
fn cmd_generate(config: GeneratorConfig, args: &SecretArgs, at: Option<Timestamp>, raw: bool) -> Result<()> {
    let generator = build_generator(config, args)?;
    let length = generator.config().passcode_length;
    let granularity = generator.config().granularity_seconds;

    let now = match at {
        Some(at) => at,
        None => SystemClock.now()?,
    };
    let code = generator.generate_at(now, length)?;

    if raw {
        println!("{code}");
        return Ok(());
    }

    println!("{}", code.grouped(DEFAULT_DISPLAY_GROUP).bold());
    println!(
        "   {} {} ({}s left)",
        "Window:".dimmed(),
        generator.window_at(now)?,
        seconds_remaining(now, granularity)?
    );
    Ok(())
}

/// Print a passcode on every window change until interrupted
async fn cmd_watch(config: GeneratorConfig, args: &SecretArgs) -> Result<()> {
    let generator = build_generator(config, args)?;
    let length = generator.config().passcode_length;
    let granularity = generator.config().granularity_seconds;

    println!(
        "{} {} ({}s windows, Ctrl+C to stop)",
        "👀 Watching passcodes for".cyan().bold(),
        args.identity,
        granularity
    );
    info!(granularity, length, "watch started");

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let mut last_window = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = SystemClock.now()?;
                let current = generator.window_at(now)?;
                if last_window == Some(current) {
                    continue;
                }
                let code = generator.generate_at(now, length)?;
                println!(
                    "{} {}  {}",
                    current.to_string().dimmed(),
                    code.grouped(DEFAULT_DISPLAY_GROUP).bold(),
                    format!("({}s)", seconds_remaining(now, granularity)?).dimmed()
                );
                last_window = Some(current);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("watch stopped");
                println!();
                return Ok(());
            }
        }
    }
}

/// Show window details
fn cmd_window(config: GeneratorConfig, granularity: Option<u32>, at: Option<Timestamp>) -> Result<()> {
    let config = apply_overrides(config, None, granularity)?;
    let now = match at {
        Some(at) => at,
        None => SystemClock.now()?,
    };
    let current = window(now, config.granularity_seconds)?;

    let info = serde_json::json!({
        "timestamp": now,
        "granularity_seconds": config.granularity_seconds,
        "window": current.index(),
        "window_le_hex": hex::encode(current.to_le_bytes()),
        "seconds_remaining": seconds_remaining(now, config.granularity_seconds)?,
    });
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

/// Run benchmarks
fn cmd_bench(config: GeneratorConfig, count: u32) -> Result<()> {
    println!("{} {} passcodes", "📊 Benchmarking with".cyan().bold(), count);

    let mut secret = [0u8; SECRET_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut secret);
    let length = config.passcode_length;

    let start = std::time::Instant::now();
    let generator = Generator::with_config(b"bench", &secret, config)?;
    secret.zeroize();
    println!("   ✓ Keying: {:?}", start.elapsed());

    let alphabet = spongepass_core::constants::ALPHABET;
    let mut stats = SymbolStats::new();
    let start = std::time::Instant::now();
    for i in 0..count {
        let code = generator.generate_for_window(i.into(), length)?;
        for c in code.chars() {
            if let Some(index) = alphabet.iter().position(|&b| b as char == c) {
                stats.add(index as u8);
            }
        }
    }
    let elapsed = start.elapsed();

    let rate = f64::from(count) / elapsed.as_secs_f64();
    println!("   ✓ Generated {} passcodes: {:?}", count, elapsed);
    println!("\n{}", "📈 Results:".green().bold());
    println!("   Rate: {:.0} passcodes/sec", rate);
    println!(
        "   Time per passcode: {:.2}µs",
        elapsed.as_micros() as f64 / f64::from(count.max(1))
    );
    println!("   Symbols sampled: {}", stats.total);
    println!("   χ² (23 df): {:.2}", stats.chi_squared());

    if stats.looks_uniform() {
        println!("   {} Symbol distribution looks uniform", "✅".green());
    } else {
        println!("   {} Symbol distribution rejected at p = 0.001", "❌".red());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    fn secret_args() -> SecretArgs {
        SecretArgs {
            identity: "alice".into(),
            secret: Some("00".repeat(SECRET_SIZE)),
            secret_file: None,
            length: Some(8),
            granularity: Some(60),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "spongepass", "generate", "--identity", "bob", "--secret", "ab", "--at", "90", "-l", "6",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate { secret, at, raw } => {
                assert_eq!(secret.identity, "bob");
                assert_eq!(secret.length, Some(6));
                assert_eq!(at, Some(90));
                assert!(!raw);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_overrides() {
        let config = apply_overrides(GeneratorConfig::default(), Some(6), Some(60)).unwrap();
        assert_eq!(config.passcode_length, 6);
        assert_eq!(config.granularity_seconds, 60);
        assert!(apply_overrides(GeneratorConfig::default(), None, Some(0)).is_err());
    }

    #[test]
    fn test_build_generator_from_args() {
        let generator = build_generator(GeneratorConfig::default(), &secret_args()).unwrap();
        assert_eq!(generator.config().passcode_length, 8);
        assert_eq!(generator.generate_at(120, 8).unwrap().len(), 8);
    }

    #[test]
    fn test_missing_secret_rejected() {
        let mut args = secret_args();
        args.secret = None;
        assert!(read_secret(&args).is_err());

        args.secret = Some("abcd".into());
        assert!(read_secret(&args).is_err());
    }

    #[test]
    fn test_secret_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", "11".repeat(SECRET_SIZE)).unwrap();

        let mut args = secret_args();
        args.secret = None;
        args.secret_file = Some(file.path().to_path_buf());
        assert_eq!(read_secret(&args).unwrap().as_bytes(), &[0x11; SECRET_SIZE]);
    }

    #[test]
    fn test_missing_secret_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = secret_args();
        args.secret = None;
        args.secret_file = Some(dir.path().join("absent.hex"));

        let err = read_secret(&args).unwrap_err();
        assert!(err.to_string().contains("Failed to read secret file"));
    }
}
