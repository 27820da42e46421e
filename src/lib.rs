pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod ordering;
pub mod render;
pub mod services;

use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use log::info;

use crate::cli::{AliasCommand, Cli};
use crate::config::settings::AppConfig;
use crate::database::DbPool;
use crate::ordering::extractor::split_names;
use crate::render::format_ranking;
use crate::services::server::ServerService;
use crate::services::{
    AcceptContradictions, ContradictionGate, RankingService, RegistrationOutcome,
    RegistrationService,
};

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn load_config(database: Option<&str>) -> AppConfig {
    match database {
        Some(path) => AppConfig::with_database(path),
        None => AppConfig::from_env(),
    }
}

fn open_store(config: &AppConfig) -> Result<DbPool> {
    let pool = database::create_pool(&config.storage.database_path)?;
    database::ensure_schema(&*database::get_connection(&pool)?)?;
    Ok(pool)
}

fn registration(config: &AppConfig) -> Result<RegistrationService> {
    Ok(RegistrationService::new(open_store(config)?, config.clone()))
}

fn ranking(config: &AppConfig) -> Result<RankingService> {
    Ok(RankingService::new(open_store(config)?, config.clone()))
}

pub fn handle_observe(config: &AppConfig, input: &str, yes: bool) -> Result<()> {
    let service = registration(config)?;
    let gate: &dyn ContradictionGate = if yes {
        &AcceptContradictions
    } else {
        &ask_on_terminal
    };

    match service.register(input, gate)? {
        RegistrationOutcome::Registered {
            observation_id,
            normalized,
            pair_count,
            aliased,
            ..
        } => {
            println!(
                "{} #{}: {} ({} pairs)",
                "Recorded".green().bold(),
                observation_id,
                normalized,
                pair_count
            );
            if aliased {
                println!("{}", "  some names were replaced by their alias target".dimmed());
            }
        }
        RegistrationOutcome::NoPairs => {
            println!("{}", "Nothing to record: list at least two names".yellow());
        }
        RegistrationOutcome::Rejected { .. } => {
            println!("{}", "Observation discarded".yellow());
        }
    }
    Ok(())
}

fn ask_on_terminal(normalized: &str, cycle: &[String]) -> Result<bool> {
    println!(
        "{} {}",
        "Contradiction:".red().bold(),
        cycle.join(" -> ")
    );
    print!("Store '{normalized}' anyway? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub fn handle_rank(config: &AppConfig, json: bool) -> Result<()> {
    let snapshot = ranking(config)?.snapshot()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }
    if snapshot.layers.is_empty() {
        println!("{}", "No observations recorded yet".dimmed());
        return Ok(());
    }

    for (line, layer) in format_ranking(&snapshot.layers).iter().zip(&snapshot.layers) {
        if layer.is_tied() {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }
    println!(
        "{}",
        format!("{} players, {} pairs", snapshot.player_count, snapshot.pair_count).dimmed()
    );
    Ok(())
}

pub fn handle_graph(config: &AppConfig) -> Result<()> {
    print!("{}", ranking(config)?.mermaid()?);
    Ok(())
}

pub fn handle_cycle(config: &AppConfig) -> Result<()> {
    match ranking(config)?.contradiction()? {
        Some(cycle) => println!("{} {}", "Contradiction:".red().bold(), cycle.join(" -> ")),
        None => println!("{}", "Observations are consistent".green()),
    }
    Ok(())
}

pub fn handle_simulate(config: &AppConfig, names: &str) -> Result<()> {
    let names: Vec<String> = split_names(names).into_iter().map(str::to_string).collect();
    if names.is_empty() {
        bail!("List at least one participant");
    }

    for placement in ranking(config)?.simulate(&names)? {
        let mut line = format!("{} : {}", placement.rank, placement.name);
        if placement.host {
            line.push_str(" (host)");
        } else if placement.layer.is_none() {
            line.push_str(" (no data)");
        } else if placement.resolved != placement.name {
            line.push_str(&format!(" (= {})", placement.resolved));
        }

        if placement.tied {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn handle_players(config: &AppConfig) -> Result<()> {
    for name in ranking(config)?.known_players()? {
        println!("{name}");
    }
    Ok(())
}

pub fn handle_history(config: &AppConfig, limit: Option<usize>) -> Result<()> {
    for observation in ranking(config)?.history(limit)? {
        println!(
            "{:>5}  {}  {}",
            observation.id,
            observation.observed_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            observation.ordered_list
        );
    }
    Ok(())
}

pub fn handle_undo(config: &AppConfig, id: i64) -> Result<()> {
    match registration(config)?.undo(id)? {
        Some(observation) => {
            println!("{} #{}: {}", "Removed".green().bold(), id, observation.ordered_list)
        }
        None => bail!("Observation {} not found", id),
    }
    Ok(())
}

pub fn handle_alias(config: &AppConfig, action: &AliasCommand) -> Result<()> {
    let service = registration(config)?;

    match action {
        AliasCommand::Add { alias, target } => {
            if !service.add_alias(alias, target)? {
                bail!("Alias '{}' is already registered", alias.trim());
            }
            println!("{} -> {}", alias.trim(), target.trim());
        }
        AliasCommand::Remove { alias } => {
            if !service.remove_alias(alias)? {
                bail!("Alias '{}' not found", alias.trim());
            }
            println!("{} {}", "Removed".green().bold(), alias.trim());
        }
        AliasCommand::List { target } => {
            for entry in service.list_aliases(target.as_deref())? {
                println!("{} -> {}", entry.alias, entry.target);
            }
        }
    }
    Ok(())
}

pub fn handle_reset(config: &AppConfig, yes: bool, schema: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to delete all data without --yes");
    }

    if schema {
        let pool = database::create_pool(&config.storage.database_path)?;
        database::reset_database(&*database::get_connection(&pool)?)?;
    } else {
        registration(config)?.clear_all()?;
    }
    info!("Store at {} reset", config.storage.database_path);
    println!("{}", "All data deleted".yellow());
    Ok(())
}

pub fn handle_serve(config: AppConfig, port: Option<u16>) -> Result<()> {
    let mut config = config;
    if let Some(port) = port {
        config.server.port = port;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(config);
        service.run().await
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
