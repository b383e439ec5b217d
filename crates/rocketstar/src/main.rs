//! `rocketstar` - CLI for the Apollo mission catalog
//!
//! Any catalog error is fatal: the diagnostic names the offending resource
//! or crew member and the process exits non-zero.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use rocketstar::cli::{
    render_astronaut, render_check, render_mission, render_missions, AstronautCommand, Cli,
    Command, ConfigCommand, MissionCommand, MissionsCommand,
};
use rocketstar::{
    init_logging, load_configured, AstronautDetail, Catalog, Config, MissionCard, MissionDetail,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Command::Missions(cmd) => handle_missions(&config, &cmd),
        Command::Mission(cmd) => handle_mission(&config, &cmd),
        Command::Astronaut(cmd) => handle_astronaut(&config, &cmd),
        Command::Check(cmd) => handle_check(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn load(config: &Config) -> anyhow::Result<Catalog> {
    load_configured(config).context("loading mission catalog")
}

fn handle_missions(config: &Config, cmd: &MissionsCommand) -> anyhow::Result<()> {
    let catalog = load(config)?;
    let cards: Vec<_> = catalog
        .missions()
        .iter()
        .map(|mission| MissionCard::new(mission, &config.display))
        .collect();
    print!("{}", render_missions(&cards, cmd.format)?);
    Ok(())
}

fn handle_mission(config: &Config, cmd: &MissionCommand) -> anyhow::Result<()> {
    let catalog = load(config)?;
    let (mission, crew) = catalog
        .crew(cmd.id)
        .with_context(|| format!("resolving apollo {}", cmd.id))?;
    let detail = MissionDetail::new(mission, &crew, &config.display);
    print!("{}", render_mission(&detail, cmd.format)?);
    Ok(())
}

fn handle_astronaut(config: &Config, cmd: &AstronautCommand) -> anyhow::Result<()> {
    let catalog = load(config)?;
    let (key, astronaut) = catalog
        .roster()
        .get_key_value(&cmd.key)
        .ok_or_else(|| rocketstar::Error::UnknownAstronaut(cmd.key.clone()))?;
    let flights = catalog.flights(key)?;
    let detail = AstronautDetail::new(key, astronaut, &flights, &config.display);
    print!("{}", render_astronaut(&detail, cmd.format)?);
    Ok(())
}

fn handle_check(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = config.store();
    let catalog = rocketstar::load_catalog(store.as_ref(), &config.resources, &config.catalog)
        .with_context(|| format!("checking catalog in {}", store.name()))?;
    print!("{}", render_check(&catalog, store.name(), json)?);
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Resources]");
                match &config.resources.dir {
                    Some(dir) => println!("  Directory:          {}", dir.display()),
                    None => println!("  Directory:          (built-in)"),
                }
                println!("  Astronauts:         {}", config.resources.astronauts);
                println!("  Missions:           {}", config.resources.missions);
                println!();
                println!("[Catalog]");
                println!("  Duplicate policy:   {}", config.catalog.duplicate_policy);
                println!("  Name matching:      {}", config.catalog.name_matching);
                println!("  Validate crew:      {}", config.catalog.validate_crew);
                println!();
                println!("[Display]");
                println!("  Date format:        {}", config.display.date_format);
                println!("  Date placeholder:   {}", config.display.date_placeholder);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => anyhow::bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}
