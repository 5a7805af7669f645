use std::collections::HashSet;
use std::time::Duration;

use crate::errors::AppError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOOK_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub port: u16,
    /// How long a request waits for an authorization hook.
    pub hook_timeout: Duration,
    pub connect: ConnectConfig,
}

#[derive(Debug, Clone, Default)]
pub struct ConnectConfig {
    pub clusters: Vec<ConnectClusterConfig>,
    pub request_timeout: Duration,
}

impl ConnectConfig {
    pub fn is_enabled(&self) -> bool {
        !self.clusters.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectClusterConfig {
    pub name: String,
    pub url: String,
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let port = parse_or(&lookup, "APP_PORT", DEFAULT_PORT)?;
        let hook_timeout_ms = parse_or(&lookup, "HOOK_TIMEOUT_MS", DEFAULT_HOOK_TIMEOUT_MS)?;
        let connect_timeout_secs = parse_or(&lookup, "CONNECT_REQUEST_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?;

        if hook_timeout_ms == 0 {
            return Err(AppError::configuration("HOOK_TIMEOUT_MS must be greater than zero"));
        }

        let clusters = match lookup("CONNECT_CLUSTERS") {
            Some(raw) => parse_connect_clusters(&raw)?,
            None => Vec::new(),
        };

        Ok(Self {
            port,
            hook_timeout: Duration::from_millis(hook_timeout_ms),
            connect: ConnectConfig {
                clusters,
                request_timeout: Duration::from_secs(connect_timeout_secs),
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::configuration(format!("{key} must be a valid number"))),
        _ => Ok(default),
    }
}

/// Parses `name=url` pairs separated by commas.
fn parse_connect_clusters(raw: &str) -> Result<Vec<ConnectClusterConfig>, AppError> {
    let mut seen = HashSet::new();
    let mut clusters = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, url) = entry
            .split_once('=')
            .ok_or_else(|| AppError::configuration(format!("CONNECT_CLUSTERS entry `{entry}` must be name=url")))?;
        let (name, url) = (name.trim(), url.trim().trim_end_matches('/'));

        if name.is_empty() || url.is_empty() {
            return Err(AppError::configuration(format!(
                "CONNECT_CLUSTERS entry `{entry}` needs both a name and a url"
            )));
        }
        if !seen.insert(name.to_string()) {
            return Err(AppError::configuration(format!("connect cluster `{name}` is configured twice")));
        }

        clusters.push(ConnectClusterConfig {
            name: name.to_string(),
            url: url.to_string(),
        });
    }

    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ConsoleConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.hook_timeout, Duration::from_secs(5));
        assert!(!config.connect.is_enabled());
    }

    #[test]
    fn parses_connect_clusters() {
        let config = ConsoleConfig::from_lookup(lookup(&[
            ("CONNECT_CLUSTERS", "primary=http://connect-a:8083/, backup = http://connect-b:8083"),
            ("APP_PORT", "9090"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(
            config.connect.clusters,
            vec![
                ConnectClusterConfig {
                    name: "primary".to_string(),
                    url: "http://connect-a:8083".to_string()
                },
                ConnectClusterConfig {
                    name: "backup".to_string(),
                    url: "http://connect-b:8083".to_string()
                },
            ]
        );
    }

    #[test]
    fn rejects_duplicate_and_malformed_clusters() {
        assert!(matches!(
            ConsoleConfig::from_lookup(lookup(&[("CONNECT_CLUSTERS", "a=http://x,a=http://y")])),
            Err(AppError::Configuration(_))
        ));
        assert!(matches!(
            ConsoleConfig::from_lookup(lookup(&[("CONNECT_CLUSTERS", "http://x")])),
            Err(AppError::Configuration(_))
        ));
        assert!(matches!(
            ConsoleConfig::from_lookup(lookup(&[("APP_PORT", "eighty")])),
            Err(AppError::Configuration(_))
        ));
    }
}
