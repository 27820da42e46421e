use anyhow::Result;

use player_order_ranking::cli::{Cli, Command};
use player_order_ranking::{
    handle_alias, handle_completions, handle_cycle, handle_graph, handle_history,
    handle_observe, handle_players, handle_rank, handle_reset, handle_serve, handle_simulate,
    handle_undo, interpret, load_config,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = load_config(cli.database.as_deref());

    match &cli.command {
        Command::Observe { input, yes } => handle_observe(&config, input, *yes),
        Command::Rank { json } => handle_rank(&config, *json),
        Command::Graph => handle_graph(&config),
        Command::Cycle => handle_cycle(&config),
        Command::Simulate { names } => handle_simulate(&config, names),
        Command::Players => handle_players(&config),
        Command::History { limit } => handle_history(&config, *limit),
        Command::Undo { id } => handle_undo(&config, *id),
        Command::Alias { action } => handle_alias(&config, action),
        Command::Reset { yes, schema } => handle_reset(&config, *yes, *schema),
        Command::Serve { port } => handle_serve(config, *port),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
