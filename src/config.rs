use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Runtime configuration, sourced from the environment.
///
/// Loaded once in `main` and passed down explicitly; nothing in the crate
/// reads the environment after startup. `JWT_SECRET` must be overridden in
/// any real deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:orgmanage.sqlite".to_string(),
            jwt_secret: "dev-secret-change-me".to_string(),
            port: 5000,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults overlaid with `DATABASE_URL`, `JWT_SECRET`, `PORT`, `LOGLEVEL`.
    pub fn from_env() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["DATABASE_URL", "JWT_SECRET", "PORT", "LOGLEVEL"]))
            .extract()
    }
}
