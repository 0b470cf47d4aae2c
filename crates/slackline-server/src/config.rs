use std::net::SocketAddr;

use anyhow::{Context, Result};

/// Server settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Start with the demo messages; when false only channels and the
    /// session are loaded.
    pub seed_fixture: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SLACKLINE_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("SLACKLINE_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("SLACKLINE_PORT must be a port number")?;
        let seed_fixture = match lookup("SLACKLINE_SEED_FIXTURE").as_deref() {
            None | Some("") | Some("1") | Some("true") => true,
            Some("0") | Some("false") => false,
            Some(other) => anyhow::bail!("SLACKLINE_SEED_FIXTURE must be true or false, got '{}'", other),
        };

        Ok(Self {
            host,
            port,
            seed_fixture,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.port, 3000);
        assert!(cfg.seed_fixture);
        assert_eq!(cfg.addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn overrides() {
        let cfg = config(&[
            ("SLACKLINE_HOST", "127.0.0.1"),
            ("SLACKLINE_PORT", "8080"),
            ("SLACKLINE_SEED_FIXTURE", "false"),
        ])
        .unwrap();
        assert_eq!(cfg.addr().unwrap().to_string(), "127.0.0.1:8080");
        assert!(!cfg.seed_fixture);
    }

    #[test]
    fn rejects_garbage() {
        assert!(config(&[("SLACKLINE_PORT", "http")]).is_err());
        assert!(config(&[("SLACKLINE_SEED_FIXTURE", "maybe")]).is_err());
    }
}
