use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub migrations_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: env::var("EXPENSES_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("EXPENSES_PORT")
                .or_else(|_| env::var("PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            database_path: env::var("EXPENSES_DATABASE_URL")
                .map(|v| database_path_from_url(&v))
                .unwrap_or_else(|_| PathBuf::from("data/expenses.db")),
            migrations_path: env::var("EXPENSES_MIGRATIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("migrations")),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Accepts both plain paths and `sqlite://`/`sqlite:` URLs.
fn database_path_from_url(value: &str) -> PathBuf {
    PathBuf::from(
        value
            .strip_prefix("sqlite://")
            .or_else(|| value.strip_prefix("sqlite:"))
            .unwrap_or(value),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_strips_sqlite_scheme() {
        assert_eq!(
            database_path_from_url("sqlite://data/test.db"),
            PathBuf::from("data/test.db")
        );
        assert_eq!(
            database_path_from_url("sqlite:data/test.db"),
            PathBuf::from("data/test.db")
        );
        assert_eq!(
            database_path_from_url("/var/lib/expenses.db"),
            PathBuf::from("/var/lib/expenses.db")
        );
    }

    #[test]
    fn test_address() {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 5000,
            database_path: PathBuf::from(":memory:"),
            migrations_path: PathBuf::from("migrations"),
        };
        assert_eq!(config.address(), "127.0.0.1:5000");
    }
}
