use serde_json::Value;

use crate::{
    error::HarvestError,
    spotify::SpotifyClient,
    types::{Collection, ItemsPage, SearchResponse},
};

/// Resolves the representative collection of a year.
///
/// Searches playlists with `q=year:<year>` and `limit=1` and takes the first
/// result in the order the provider returned it. There is no tie-break beyond
/// that order.
///
/// # Errors
///
/// - [`HarvestError::Resolution`] when the search yields no playlist
/// - [`HarvestError::Fetch`] when the request itself fails
pub async fn resolve_collection(
    client: &SpotifyClient,
    year: i32,
) -> Result<Collection, HarvestError> {
    let url = format!("{uri}/search", uri = client.api_url());
    let res: SearchResponse = client
        .get_json(
            &url,
            &[
                ("q", format!("year:{year}")),
                ("type", "playlist".to_string()),
                ("limit", "1".to_string()),
            ],
        )
        .await?;

    res.playlists
        .and_then(|page| page.items.into_iter().flatten().next())
        .map(|playlist| Collection {
            id: playlist.id,
            name: playlist.name,
        })
        .ok_or(HarvestError::Resolution(year))
}

/// Retrieves the raw items of a collection.
///
/// The first page is requested with `limit=<page_limit>`. Further pages are
/// followed through the page's `next` cursor until it is absent or
/// `max_pages` pages were read; `None` reads until exhausted.
pub async fn fetch_items(
    client: &SpotifyClient,
    collection: &Collection,
    page_limit: u32,
    max_pages: Option<u32>,
) -> Result<Vec<Value>, HarvestError> {
    let first = format!(
        "{uri}/playlists/{id}/tracks",
        uri = client.api_url(),
        id = collection.id
    );

    let mut items = Vec::new();
    let mut page: ItemsPage = client
        .get_json(&first, &[("limit", page_limit.to_string())])
        .await?;
    let mut pages_read = 1;

    loop {
        items.append(&mut page.items);

        let next = match page.next.take() {
            Some(next) if max_pages.is_none_or(|max| pages_read < max) => next,
            _ => break,
        };

        page = client.get_json(&next, &[]).await?;
        pages_read += 1;
    }

    Ok(items)
}
