use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use hostkit_core::memory::{physical_memory_with_ceiling, platform_probe, MemoryProbe};
use hostkit_core::path::relative_file_path;
use hostkit_core::temp::{TempFileFactory, TempFileKind, TempFileRegistry};
use hostkit_core::{HostConfig, HostResult, TextNormalizer};
use hostkit_utils::{debug, info, init_logging_with, warn, LogConfig, LogFormat, LogLevel};

/// Temp files, path-text canonicalization and physical memory probing.
#[derive(Parser, Debug)]
#[command(name = "hostkit")]
#[command(version)]
#[command(about = "Temp files, path-text canonicalization and physical memory probing", long_about = None)]
struct Cli
{
    /// Log level (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,
    /// Log format: pretty or json (overrides HOSTKIT_LOG_FORMAT)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Show installed physical memory
    Memory
    {
        /// Print the raw byte count only
        #[arg(long, default_value_t = false)]
        bytes: bool,
    },
    /// Show the resolved temp directory
    TempDir,
    /// Print the canonical (NFKC) form of TEXT
    Canonicalize
    {
        /// Text to canonicalize
        text: String,
        /// Also print the wide-character code units
        #[arg(long, default_value_t = false)]
        wide: bool,
    },
    /// Manage temp files
    Temp
    {
        #[command(subcommand)]
        action: TempAction,
    },
    /// Resolve REL next to BASE
    Relative
    {
        /// File the reference appears in
        base: String,
        /// Referenced file name
        rel: String,
    },
}

#[derive(Subcommand, Debug)]
enum TempAction
{
    /// Create a temp file and print its path
    Create
    {
        /// Kind of file: cache, render, animation, log
        kind: TempFileKind,
        /// Text to write into the new file
        #[arg(short, long)]
        content: Option<String>,
    },
    /// List every temp file in the temp directory
    List,
    /// Delete one temp file
    Delete
    {
        /// Path of the file to delete
        path: PathBuf,
    },
    /// Delete every temp file in the temp directory
    Purge,
}

fn main()
{
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    log_config.level = cli.log_level;
    if let Some(format) = cli.log_format {
        log_config.format = format;
    }
    let _log_guard = match init_logging_with(log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    let config = HostConfig::from_env();
    debug!(?config, "Loaded configuration");

    if let Err(e) = run_command(cli.command, &config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, config: &HostConfig) -> HostResult<()>
{
    match command {
        Commands::Memory { bytes } => {
            let probe = platform_probe();
            let sample = physical_memory_with_ceiling(config.memory_ceiling);
            info!(probe = probe.name(), bytes = sample.bytes(), "Probed physical memory");
            if bytes {
                println!("{}", sample.bytes());
            } else if sample.is_unknown() {
                println!("Physical memory: unknown (probe: {})", probe.name());
            } else {
                println!("Physical memory: {} ({} bytes)", sample, sample.bytes());
            }
            Ok(())
        }
        Commands::TempDir => {
            println!("{}", TempFileFactory::from_config(config).directory().display());
            Ok(())
        }
        Commands::Canonicalize { text, wide } => {
            let normalizer = TextNormalizer::from_config(config);
            let canonical = normalizer.canonicalize(&text)?;
            println!("{canonical}");
            if wide {
                let units: Vec<String> = canonical.as_wide().iter().map(|u| format!("U+{u:04X}")).collect();
                println!("{}", units.join(" "));
            }
            Ok(())
        }
        Commands::Temp { action } => run_temp_action(action, config),
        Commands::Relative { base, rel } => {
            println!("{}", relative_file_path(&base, &rel));
            Ok(())
        }
    }
}

fn run_temp_action(action: TempAction, config: &HostConfig) -> HostResult<()>
{
    let registry = TempFileRegistry::from_config(config);
    match action {
        TempAction::Create { kind, content } => {
            let factory = TempFileFactory::from_config(config);
            let (mut handle, path) = factory.create(kind)?;
            if let Some(content) = content {
                handle.write_all(content.as_bytes())?;
                handle.sync()?;
            }
            println!("{}", path.display());
            Ok(())
        }
        TempAction::List => {
            for path in registry.find_all() {
                println!("{}", path.display());
            }
            Ok(())
        }
        TempAction::Delete { path } => registry.delete(&path),
        TempAction::Purge => {
            let report = registry.purge();
            println!("Removed {} temp file(s)", report.removed.len());
            if !report.failed.is_empty() {
                warn!("{} temp file(s) could not be removed", report.failed.len());
                for path in &report.failed {
                    eprintln!("  {}", path.display());
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_parse_temp_create()
    {
        let cli = Cli::try_parse_from(["hostkit", "temp", "create", "render", "--content", "hi"]).unwrap();
        match cli.command {
            Commands::Temp {
                action: TempAction::Create { kind, content },
            } => {
                assert_eq!(kind, TempFileKind::Render);
                assert_eq!(content.as_deref(), Some("hi"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_kind()
    {
        assert!(Cli::try_parse_from(["hostkit", "temp", "create", "pdf"]).is_err());
    }

    #[test]
    fn test_parse_global_log_flags()
    {
        let cli = Cli::try_parse_from(["hostkit", "memory", "--log-level", "debug", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(matches!(cli.command, Commands::Memory { bytes: false }));
    }

    #[test]
    fn test_verify_cli()
    {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
