use std::collections::HashMap;

use crate::{
    config::Enrichment,
    error::HarvestError,
    spotify::{SpotifyClient, artists},
    types::TrackEntity,
    utils,
};

/// Fills in the genres of each entity from its first artist.
///
/// Entities without an artist id keep an empty genre list. Any failed lookup
/// is returned as [`HarvestError::Fetch`] and fails the year.
pub async fn enrich(
    client: &SpotifyClient,
    entities: &mut [TrackEntity],
    mode: Enrichment,
) -> Result<(), HarvestError> {
    match mode {
        Enrichment::Off => Ok(()),
        Enrichment::PerTrack => enrich_per_track(client, entities).await,
        Enrichment::Batched => enrich_batched(client, entities).await,
    }
}

async fn enrich_per_track(
    client: &SpotifyClient,
    entities: &mut [TrackEntity],
) -> Result<(), HarvestError> {
    for entity in entities.iter_mut() {
        let Some(id) = entity.primary_artist_id() else {
            continue;
        };
        let ids = [id.to_string()];
        entity.genres = artists::get_genres_for_artists(client, &ids).await?;
    }
    Ok(())
}

async fn enrich_batched(
    client: &SpotifyClient,
    entities: &mut [TrackEntity],
) -> Result<(), HarvestError> {
    let ids = utils::dedup_ids(entities.iter().filter_map(|e| e.primary_artist_id()));

    let mut genres: HashMap<String, Vec<String>> = HashMap::with_capacity(ids.len());
    for chunk in ids.chunks(utils::MAX_IDS_PER_LOOKUP) {
        genres.extend(artists::get_genres_by_artist(client, chunk).await?);
    }

    for entity in entities.iter_mut() {
        if let Some(found) = entity.primary_artist_id().and_then(|id| genres.get(id)) {
            entity.genres = found.clone();
        }
    }
    Ok(())
}
