use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub struct Config {
    pub port: u16,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub store: Option<StoreCredentials>,
    pub public: PublicKeys,
}

/// Keys handed straight to the page for the client-side store SDK and the
/// payment widgets. Never secret material.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublicKeys {
    pub store_api_key: String,
    pub store_project_id: String,
    pub store_app_id: String,
    pub flutterwave_public_key: String,
    pub solana_project_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreCredentials {
    pub url: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("SMALLIE_PORT", "5000"),
            window_start: try_load("COMPETITION_START", "2025-04-15"),
            window_end: try_load("COMPETITION_END", "2025-04-21"),
            store: var("STORE_CREDENTIALS")
                .ok()
                .and_then(|raw| parse_store_credentials(&raw))
                .map(|(creds, _)| creds),
            public: PublicKeys {
                store_api_key: load_or_empty("STORE_API_KEY"),
                store_project_id: load_or_empty("STORE_PROJECT_ID"),
                store_app_id: load_or_empty("STORE_APP_ID"),
                flutterwave_public_key: load_or_empty("FLUTTERWAVE_PUBLIC_KEY"),
                solana_project_id: load_or_empty("SOLANA_PROJECT_ID"),
            },
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn load_or_empty(key: &str) -> String {
    env::var(key).unwrap_or_default()
}

/// How a deployment chose to deliver the store credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Base64Json,
    RawJson,
    FilePath,
}

type Strategy = fn(&str) -> Result<StoreCredentials, String>;

/// Ordered parser chain for `STORE_CREDENTIALS`: base64-encoded JSON (how
/// serverless hosts ship it), raw JSON, then a path to a JSON file. First
/// success wins; a full miss means the server runs without a store.
const STRATEGIES: &[(CredentialSource, Strategy)] = &[
    (CredentialSource::Base64Json, parse_base64_json),
    (CredentialSource::RawJson, parse_raw_json),
    (CredentialSource::FilePath, parse_file_path),
];

pub fn parse_store_credentials(raw: &str) -> Option<(StoreCredentials, CredentialSource)> {
    for (source, parse) in STRATEGIES {
        match parse(raw) {
            Ok(creds) => {
                info!("Parsed store credentials as {source:?}");
                return Some((creds, *source));
            }
            Err(e) => debug!("Credential strategy {source:?} did not apply: {e}"),
        }
    }

    warn!("Could not parse store credentials with any strategy");
    None
}

fn parse_base64_json(raw: &str) -> Result<StoreCredentials, String> {
    let bytes = BASE64.decode(raw.trim()).map_err(|e| e.to_string())?;
    serde_json::from_slice(&bytes).map_err(|e| e.to_string())
}

fn parse_raw_json(raw: &str) -> Result<StoreCredentials, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

fn parse_file_path(raw: &str) -> Result<StoreCredentials, String> {
    let text = read_to_string(raw.trim()).map_err(|e| e.to_string())?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CREDS_JSON: &str = r#"{"url":"redis://store.example:6379"}"#;

    #[test]
    fn chain_picks_base64_first() {
        let encoded = BASE64.encode(CREDS_JSON);
        let (creds, source) = parse_store_credentials(&encoded).unwrap();
        assert_eq!(source, CredentialSource::Base64Json);
        assert_eq!(creds.url, "redis://store.example:6379");
    }

    #[test]
    fn chain_falls_through_to_raw_json() {
        let (creds, source) = parse_store_credentials(CREDS_JSON).unwrap();
        assert_eq!(source, CredentialSource::RawJson);
        assert_eq!(creds.url, "redis://store.example:6379");
    }

    #[test]
    fn chain_reads_credentials_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CREDS_JSON.as_bytes()).unwrap();

        let raw = file.path().to_str().unwrap();
        let (creds, source) = parse_store_credentials(raw).unwrap();
        assert_eq!(source, CredentialSource::FilePath);
        assert_eq!(creds.url, "redis://store.example:6379");
    }

    #[test]
    fn chain_rejects_garbage() {
        assert!(parse_store_credentials("not credentials at all").is_none());
    }
}
