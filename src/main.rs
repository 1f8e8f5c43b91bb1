//! obs-resolver binary: resolve observation datasets for a diagnostics run.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use obs_resolver::cli::{Cli, Command, ResolveArgs};
use obs_resolver::config::{ConfigRead, YamlConfig};
use obs_resolver::defaults::VariableDefaults;
use obs_resolver::logging::Logger;
use obs_resolver::report::{self, ReportFormat};
use obs_resolver::resolve::{BASIC_INFO_SECTION, ObsResolver};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new().create(true).append(true).open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let config = cli
        .config
        .ok_or_else(|| anyhow!("no configuration file given (use --config)"))?;

    match cli.command {
        Some(Command::Defaults) => run_defaults(&config),
        Some(Command::Resolve(args)) => run_resolve(&config, args),
        None => run_resolve(&config, ResolveArgs::default()),
    }
}

/// Run the setup pass and write the catalog report.
///
/// An empty catalog is a normal outcome (the resolver already warned about
/// it when compare mode is on), so this exits zero either way.
fn run_resolve(config_path: &Path, args: ResolveArgs) -> Result<()> {
    let format = ReportFormat::from_str(&args.format)
        .ok_or_else(|| anyhow!("unknown report format '{}'", args.format))?;

    let config = YamlConfig::load(config_path)?;
    let logger = Logger::new().with_name("obs-resolver");
    let resolver = ObsResolver::from_config(&config, &logger)?;

    let catalog = resolver.observation_catalog();
    tracing::info!(
        "resolved observations for {} of {} requested variables",
        catalog.len(),
        resolver.diag_var_list().len()
    );

    let report = report::render(&catalog, format)?;
    match args.output {
        Some(path) => std::fs::write(&path, report)?,
        None => print!("{report}"),
    }
    Ok(())
}

/// Print the effective variable defaults without probing any obs data.
fn run_defaults(config_path: &Path) -> Result<()> {
    let config = YamlConfig::load(config_path)?;
    config.require_section(BASIC_INFO_SECTION)?;
    let basic = Some(BASIC_INFO_SECTION);

    let use_defaults = config.get_bool(basic, "use_defaults")?.unwrap_or(false);
    if !use_defaults {
        eprintln!("variable defaults are disabled (use_defaults: false)");
        return Ok(());
    }

    let override_path = config.get_path(basic, "custom_defaults")?;
    let defaults = VariableDefaults::load(override_path.as_deref())?;

    eprintln!("# variable defaults from {}", defaults.source());
    print!("{}", serde_yaml::to_string(defaults.records())?);
    Ok(())
}
