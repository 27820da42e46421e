use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Infer a player ranking from partial finishing orders")]
pub struct Cli {
    /// SQLite file to use instead of $DATABASE_PATH
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Record an observed order, e.g. "Alice, Bob, Carol" (first ranked highest)
    Observe {
        input: String,
        /// Store contradicting observations without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the inferred ranking
    Rank {
        #[arg(long)]
        json: bool,
    },
    /// Print the precedence graph as a Mermaid flowchart
    Graph,
    /// Show one loop of contradicting observations, if any
    Cycle,
    /// Predict the finishing order of one room, e.g. "Host, Bob, Carol" (host first)
    Simulate { names: String },
    /// List every player seen so far
    Players,
    /// List recent observations
    History {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Take back an observation by id
    Undo { id: i64 },
    /// Manage alternative spellings of player names
    Alias {
        #[clap(subcommand)]
        action: AliasCommand,
    },
    /// Delete all observations, pairs, players and aliases
    Reset {
        #[arg(long)]
        yes: bool,
        /// Also drop and recreate the tables
        #[arg(long)]
        schema: bool,
    },
    /// Start the HTTP server
    Serve {
        /// Port number (defaults to 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print a shell completion script
    Completions { shell: Shell },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum AliasCommand {
    Add { alias: String, target: String },
    Remove { alias: String },
    List {
        /// Only aliases of this player
        #[arg(short, long)]
        target: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_observe_with_global_database() {
        let cli = Cli::parse_from(["app", "observe", "A, B", "--yes", "--database", "x.db"]);

        assert_eq!(cli.database.as_deref(), Some("x.db"));
        assert_eq!(
            cli.command,
            Command::Observe {
                input: "A, B".into(),
                yes: true
            }
        );
    }

    #[test]
    fn test_parse_alias_subcommand() {
        let cli = Cli::parse_from(["app", "alias", "add", "taka", "Takahiro"]);

        assert_eq!(
            cli.command,
            Command::Alias {
                action: AliasCommand::Add {
                    alias: "taka".into(),
                    target: "Takahiro".into()
                }
            }
        );
    }

    #[test]
    fn test_serve_port_is_optional() {
        let cli = Cli::parse_from(["app", "serve"]);

        assert_eq!(cli.command, Command::Serve { port: None });
    }

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::parse_from(["app", "simulate", "Host, Bob"]);

        assert_eq!(
            cli.command,
            Command::Simulate {
                names: "Host, Bob".into()
            }
        );
    }
}
