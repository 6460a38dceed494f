use std::collections::HashMap;

use crate::{error::HarvestError, spotify::SpotifyClient, types::SeveralArtistsResponse, utils};

/// Looks up the genres of up to 50 artists in one request.
///
/// Ids beyond the 50th are silently dropped, they are neither chunked nor
/// retried. The genres of all returned artists are concatenated in response
/// order.
///
/// # Example
///
/// ```
/// let genres = get_genres_for_artists(&client, &["0OdUWJ0sBjDrqHygGUXeCF".to_string()]).await?;
/// ```
pub async fn get_genres_for_artists(
    client: &SpotifyClient,
    artist_ids: &[String],
) -> Result<Vec<String>, HarvestError> {
    let res = get_several_artists(client, utils::truncate_ids(artist_ids)).await?;
    Ok(res
        .artists
        .into_iter()
        .flatten()
        .flat_map(|artist| artist.genres)
        .collect())
}

/// Looks up up to 50 artists and returns their genres keyed by artist id.
pub async fn get_genres_by_artist(
    client: &SpotifyClient,
    artist_ids: &[String],
) -> Result<HashMap<String, Vec<String>>, HarvestError> {
    let res = get_several_artists(client, utils::truncate_ids(artist_ids)).await?;
    Ok(res
        .artists
        .into_iter()
        .flatten()
        .map(|artist| (artist.id, artist.genres))
        .collect())
}

async fn get_several_artists(
    client: &SpotifyClient,
    artist_ids: &[String],
) -> Result<SeveralArtistsResponse, HarvestError> {
    if artist_ids.is_empty() {
        return Ok(SeveralArtistsResponse {
            artists: Vec::new(),
        });
    }

    let url = format!("{uri}/artists", uri = client.api_url());
    client
        .get_json(&url, &[("ids", artist_ids.join(","))])
        .await
}
