//! Configuration management for the harvester.
//!
//! Values come from three places, in order of priority:
//! 1. Environment variables
//! 2. The `.env` file in the local data directory (`songharvest/.env`)
//! 3. Defaults baked into [`HarvestConfig::default`] and the endpoint getters
//!
//! Client credentials have no default. A missing id or secret fails fast with
//! [`HarvestError::MissingEnv`].

use std::{env, path::PathBuf, time::Duration};

use clap::ValueEnum;

use crate::{error::HarvestError, spotify::client::DEFAULT_RETRY_PAUSE};

pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Loads environment variables from `.env` in the local data directory.
///
/// The directory is created when missing. A missing `.env` file is fine since
/// every value can also come from the real environment, which always wins over
/// the file.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/songharvest/.env`
/// - macOS: `~/Library/Application Support/songharvest/.env`
/// - Windows: `%LOCALAPPDATA%/songharvest/.env`
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Root of everything the harvester keeps on disk between runs.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("songharvest");
    path
}

fn required(key: &'static str) -> Result<String, HarvestError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(HarvestError::MissingEnv(key)),
    }
}

/// Returns the Spotify client id (`SPOTIFY_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String, HarvestError> {
    required("SPOTIFY_CLIENT_ID")
}

/// Returns the Spotify client secret (`SPOTIFY_CLIENT_SECRET`).
///
/// Keep it out of logs; nothing in this crate prints it.
pub fn spotify_client_secret() -> Result<String, HarvestError> {
    required("SPOTIFY_CLIENT_SECRET")
}

/// Returns the OAuth2 token endpoint, `SPOTIFY_API_TOKEN_URL` or the public default.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

/// Returns the Web API base URL, `SPOTIFY_API_URL` or the public default.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the remote ingestion URL (`HARVEST_INGEST_URL`).
pub fn ingest_url() -> Result<String, HarvestError> {
    required("HARVEST_INGEST_URL")
}

#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn from_env() -> Result<Self, HarvestError> {
        Ok(Self {
            client_id: spotify_client_id()?,
            client_secret: spotify_client_secret()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub token_url: String,
    pub api_url: String,
    pub ingest_url: String,
}

impl Endpoints {
    pub fn from_env() -> Result<Self, HarvestError> {
        Ok(Self {
            token_url: spotify_apitoken_url(),
            api_url: spotify_apiurl(),
            ingest_url: ingest_url()?,
        })
    }
}

/// Shape of the delivery units of one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeliveryShape {
    /// Fixed-size batches, one file and one POST per batch.
    Batched,
    /// One file and one POST for the whole year, keyed by the year.
    WholeYear,
}

/// How tracks are enriched with genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Enrichment {
    Off,
    /// One lookup per track with its first artist.
    PerTrack,
    /// Artist ids of the whole year deduplicated and looked up 50 at a time.
    Batched,
}

#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub year_from: i32,
    pub year_to: i32,
    pub page_limit: u32,
    /// `None` follows `next` cursors until the collection is exhausted.
    pub max_pages: Option<u32>,
    pub batch_size: usize,
    pub delivery: DeliveryShape,
    pub enrichment: Enrichment,
    pub delay: Duration,
    pub repeat: bool,
    pub request_timeout: Duration,
    pub max_retries: u32,
    /// Pause before retrying a 502/503 answer.
    pub retry_pause: Duration,
    pub output_dir: PathBuf,
    pub kind: String,
    pub skip_unchanged: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            year_from: 2014,
            year_to: 1961,
            page_limit: 100,
            max_pages: Some(1),
            batch_size: 10,
            delivery: DeliveryShape::Batched,
            enrichment: Enrichment::PerTrack,
            delay: Duration::from_millis(1500),
            repeat: false,
            request_timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_pause: DEFAULT_RETRY_PAUSE,
            output_dir: PathBuf::from("."),
            kind: "top_songs".to_string(),
            skip_unchanged: false,
        }
    }
}
