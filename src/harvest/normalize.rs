use serde_json::Value;

use crate::types::TrackEntity;

/// Converts one raw collection item into a [`TrackEntity`].
///
/// The item may be a playlist entry wrapping the track under `track` or the
/// track object itself. Returns `None` when the name, every artist name or the
/// duration is missing; such items are filtered, not reported.
///
/// Optional fields fall back to: empty `album` and `release_date`, popularity
/// `0`, `explicit` false, no preview URL, no genres.
pub fn normalize(raw: &Value) -> Option<TrackEntity> {
    let track = match raw.get("track") {
        Some(track) => track,
        None => raw,
    };
    if !track.is_object() {
        return None;
    }

    let name = track["name"].as_str().filter(|n| !n.trim().is_empty())?;

    let artists = track["artists"].as_array();
    let artist_names: Vec<String> = artists
        .into_iter()
        .flatten()
        .filter_map(|a| a["name"].as_str())
        .filter(|n| !n.trim().is_empty())
        .map(str::to_string)
        .collect();
    if artist_names.is_empty() {
        return None;
    }

    let duration_ms = duration_string(&track["duration_ms"])?;

    let artist_ids = artists
        .into_iter()
        .flatten()
        .filter_map(|a| a["id"].as_str())
        .map(str::to_string)
        .collect();

    let album = &track["album"];
    Some(TrackEntity {
        name: name.to_string(),
        artist_names,
        duration_ms,
        album: album["name"].as_str().unwrap_or_default().to_string(),
        release_date: album["release_date"].as_str().unwrap_or_default().to_string(),
        preview_url: track["preview_url"].as_str().map(str::to_string),
        popularity: track["popularity"].as_i64().unwrap_or(0),
        explicit: track["explicit"].as_bool().unwrap_or(false),
        genres: Vec::new(),
        artist_ids,
    })
}

/// Normalizes a page of raw items, keeping the order of the valid ones.
pub fn normalize_page(items: &[Value]) -> Vec<TrackEntity> {
    items.iter().filter_map(normalize).collect()
}

fn duration_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(|d| d.to_string())
            .or_else(|| n.as_f64().filter(|d| *d >= 0.0).map(|d| (d as u64).to_string())),
        Value::String(s) => s.trim().parse::<u64>().ok().map(|d| d.to_string()),
        _ => None,
    }
}
