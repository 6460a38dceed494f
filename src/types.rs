use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

/// Seconds before the provider-declared expiry at which a credential is
/// already treated as expired. Short-lived credentials use half their
/// lifetime instead, so a fresh one is never stale on arrival.
pub const EXPIRY_MARGIN_SECS: u64 = 240;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Credential {
    pub fn expires_at(&self) -> DateTime<Utc> {
        let secs = i64::try_from(self.deadline()).unwrap_or(i64::MAX);
        Utc.timestamp_opt(secs, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        let margin = EXPIRY_MARGIN_SECS.min(self.expires_in / 2);
        now >= self.deadline().saturating_sub(margin)
    }

    fn deadline(&self) -> u64 {
        self.obtained_at.saturating_add(self.expires_in)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp() as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEntity {
    pub name: String,
    pub artist_names: Vec<String>,
    pub duration_ms: String,
    pub album: String,
    pub release_date: String,
    pub preview_url: Option<String>,
    pub popularity: i64,
    pub explicit: bool,
    pub genres: Vec<String>,
    #[serde(skip)]
    pub artist_ids: Vec<String>,
}

impl TrackEntity {
    pub fn primary_artist_id(&self) -> Option<&str> {
        self.artist_ids.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub year: i32,
    pub index: usize,
    pub max_size: usize,
    pub entities: Vec<TrackEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRecord {
    pub year: i32,
    pub batch_index: Option<usize>,
    pub file_name: String,
    pub json_payload: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestEnvelope<'a> {
    pub file: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub playlists: Option<PlaylistSearchPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistSearchPage {
    #[serde(default)]
    pub items: Vec<Option<PlaylistRef>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistRef {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemsPage {
    #[serde(default)]
    pub items: Vec<Value>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeveralArtistsResponse {
    #[serde(default)]
    pub artists: Vec<Option<ArtistGenres>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistGenres {
    pub id: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Result of one year of the harvest loop.
#[derive(Debug, Clone, PartialEq)]
pub enum YearOutcome {
    Delivered {
        year: i32,
        entities: usize,
        delivered: usize,
        failed: usize,
        unchanged: usize,
    },
    Skipped {
        year: i32,
        reason: String,
    },
}

impl YearOutcome {
    pub fn year(&self) -> i32 {
        match self {
            YearOutcome::Delivered { year, .. } | YearOutcome::Skipped { year, .. } => *year,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
    pub cycles: u32,
    /// Outcomes of the latest cycle only, partial when the run was cancelled.
    pub years: Vec<YearOutcome>,
    pub cancelled: bool,
}

#[derive(Tabled)]
pub struct YearTableRow {
    pub year: i32,
    pub tracks: String,
    pub delivered: String,
    pub failed: String,
    pub note: String,
}
