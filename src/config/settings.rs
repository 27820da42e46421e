pub const DATABASE_PATH_VAR: &str = "DATABASE_PATH";
const DEFAULT_DATABASE_PATH: &str = "player_order.db";

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: String,
    pub history_limit: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            history_limit: 20,
        }
    }
}

impl StorageSettings {
    pub fn from_env() -> Self {
        let database_path = std::env::var(DATABASE_PATH_VAR)
            .unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string());
        Self {
            database_path,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct RankingSettings {
    /// Longest observation accepted; expansion is quadratic in its length
    pub max_observation_players: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            max_observation_players: 64,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub ranking: RankingSettings,
    pub server: ServerSettings,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            storage: StorageSettings::from_env(),
            ..Self::default()
        }
    }

    /// Same defaults, backed by the given database file
    pub fn with_database(database_path: impl Into<String>) -> Self {
        Self {
            storage: StorageSettings {
                database_path: database_path.into(),
                ..StorageSettings::default()
            },
            ..Self::default()
        }
    }
}
