use serde_json::{Value, json};
use songharvest::harvest::normalize::{normalize, normalize_page};

// Helper function to create a playlist item as returned by the items endpoint
fn create_test_item(name: &str, artists: &[(&str, &str)], duration_ms: u64) -> Value {
    json!({
        "added_at": "2020-01-01T00:00:00Z",
        "track": {
            "name": name,
            "duration_ms": duration_ms,
            "artists": artists
                .iter()
                .map(|(id, name)| json!({"id": id, "name": name}))
                .collect::<Vec<_>>(),
            "album": {"name": "Album", "release_date": "2020-03"},
            "preview_url": "https://p.scdn.co/mp3-preview/abc",
            "popularity": 71,
            "explicit": true
        }
    })
}

#[test]
fn test_normalize_full_item() {
    let item = create_test_item("Song", &[("a1", "Artist One"), ("a2", "Artist Two")], 215_000);
    let track = normalize(&item).unwrap();

    assert_eq!(track.name, "Song");
    assert_eq!(track.artist_names, vec!["Artist One", "Artist Two"]);
    assert_eq!(track.artist_ids, vec!["a1", "a2"]);
    assert_eq!(track.duration_ms, "215000");
    assert_eq!(track.album, "Album");
    assert_eq!(track.release_date, "2020-03");
    assert_eq!(
        track.preview_url.as_deref(),
        Some("https://p.scdn.co/mp3-preview/abc")
    );
    assert_eq!(track.popularity, 71);
    assert!(track.explicit);
    assert!(track.genres.is_empty());
}

#[test]
fn test_normalize_defaults_optional_fields() {
    let item = json!({
        "track": {
            "name": "Bare",
            "duration_ms": 1000,
            "artists": [{"name": "Someone"}],
            "preview_url": null
        }
    });
    let track = normalize(&item).unwrap();

    assert_eq!(track.album, "");
    assert_eq!(track.release_date, "");
    assert_eq!(track.preview_url, None);
    assert_eq!(track.popularity, 0);
    assert!(!track.explicit);
    assert!(track.artist_ids.is_empty());
}

#[test]
fn test_normalize_drops_items_missing_required_fields() {
    // No name
    let mut item = create_test_item("Song", &[("a1", "Artist")], 1000);
    item["track"].as_object_mut().unwrap().remove("name");
    assert!(normalize(&item).is_none());

    // Blank name
    let item = create_test_item("  ", &[("a1", "Artist")], 1000);
    assert!(normalize(&item).is_none());

    // No artists at all
    let item = create_test_item("Song", &[], 1000);
    assert!(normalize(&item).is_none());

    // Artists without names
    let item = json!({"track": {"name": "Song", "duration_ms": 1, "artists": [{"id": "a1"}]}});
    assert!(normalize(&item).is_none());

    // No duration
    let mut item = create_test_item("Song", &[("a1", "Artist")], 1000);
    item["track"].as_object_mut().unwrap().remove("duration_ms");
    assert!(normalize(&item).is_none());

    // Removed tracks come back as null
    assert!(normalize(&json!({"track": null})).is_none());
}

#[test]
fn test_normalize_accepts_string_duration_and_bare_track() {
    let item = json!({"name": "Song", "duration_ms": "1234", "artists": [{"name": "A"}]});
    let track = normalize(&item).unwrap();
    assert_eq!(track.duration_ms, "1234");

    let item = json!({"name": "Song", "duration_ms": "soon", "artists": [{"name": "A"}]});
    assert!(normalize(&item).is_none());
}

#[test]
fn test_normalize_page_preserves_order() {
    let items = vec![
        create_test_item("First", &[("a1", "A")], 1),
        json!({"track": {"name": "Broken"}}),
        create_test_item("Second", &[("a2", "B")], 2),
        json!({"track": null}),
        create_test_item("Third", &[("a3", "C")], 3),
    ];

    let names: Vec<String> = normalize_page(&items).into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
}
