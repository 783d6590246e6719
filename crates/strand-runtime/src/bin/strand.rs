//! CLI entrypoint for Strand script.

#[path = "strand/args.rs"]
mod args;
#[path = "strand/cli.rs"]
mod cli;

use std::path::Path;

use anyhow::{anyhow, Context};
use clap::Parser;
use strand_runtime::config::StrandConfig;
use strand_runtime::{RuntimeError, ScriptUnit};
use tracing::debug;

use cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    debug!(?config, "resolved compiler config");

    match cli.command {
        Command::Graph { file, function } => {
            let (source, unit) = load(&file, &config)?;
            let graph = match function.split_once('.') {
                Some((module, method)) => unit.compilation_unit().method_graph(module, method),
                None => unit.compilation_unit().function_graph(&function),
            }
            .map_err(|err| anyhow!(err.render(&source)))?;
            print!("{graph}");
        }
        Command::Run {
            file,
            function,
            args,
        } => {
            let (source, unit) = load(&file, &config)?;
            let script_fn = unit
                .function(&function)
                .map_err(|err| report(&source, err))?;
            let values = args::parse_values(&unit, &args)?;
            let result = script_fn
                .call(values)
                .with_context(|| format!("calling '{function}'"))?;
            println!("{result}");
        }
        Command::Items { file } => {
            let (_, unit) = load(&file, &config)?;
            let unit = unit.compilation_unit();
            for name in unit.enum_names() {
                println!("enum {name}");
            }
            for name in unit.module_names() {
                println!("module {name}");
            }
            for name in unit.function_names() {
                println!("fn {name}");
            }
        }
    }
    Ok(())
}

/// Defaults, then the config file, then the environment, then flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<StrandConfig> {
    let mut config = match &cli.config {
        Some(path) => StrandConfig::load(path)?,
        None => StrandConfig::default(),
    }
    .with_env_overrides();
    if let Some(module) = &cli.module {
        config.module = module.as_str().into();
    }
    if cli.enable_enums {
        config.experimental_enum_support = true;
    }
    Ok(config)
}

fn load(path: &Path, config: &StrandConfig) -> anyhow::Result<(String, ScriptUnit)> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let unit = ScriptUnit::compile(&source, config.to_options())
        .map_err(|err| report(&source, err))?;
    Ok((source, unit))
}

fn report(source: &str, err: RuntimeError) -> anyhow::Error {
    match err {
        RuntimeError::Compile(err) => anyhow!(err.render(source)),
        other => other.into(),
    }
}
