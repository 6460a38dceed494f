use chrono::{Local, TimeZone};
use serde_json::json;
use songharvest::spotify::auth::credential_from_json;
use songharvest::types::{Credential, EXPIRY_MARGIN_SECS, HarvestReport, YearOutcome};
use songharvest::utils::*;

// Helper function to create a credential issued at a fixed instant
fn create_test_credential(obtained_at: u64, expires_in: u64) -> Credential {
    Credential {
        access_token: "token".to_string(),
        expires_in,
        obtained_at,
    }
}

#[test]
fn test_basic_auth_header() {
    assert_eq!(basic_auth_header("id", "secret"), "Basic aWQ6c2VjcmV0");

    // Colons inside the secret are kept as-is
    assert_eq!(basic_auth_header("a", "b:c"), "Basic YTpiOmM=");
}

#[test]
fn test_format_timestamp() {
    let at = Local.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(format_timestamp(at), "20200102_030405");
}

#[test]
fn test_delivery_file_name() {
    assert_eq!(
        delivery_file_name("top_songs", 2020, Some(0), "20200102_030405"),
        "top_songs_2020_batch_0_20200102_030405.json"
    );
    assert_eq!(
        delivery_file_name("top_songs", 1961, None, "20200102_030405"),
        "top_songs_1961_20200102_030405.json"
    );
}

#[test]
fn test_truncate_ids() {
    let ids: Vec<String> = (0..60).map(|i| format!("artist{i}")).collect();
    let kept = truncate_ids(&ids);

    assert_eq!(kept.len(), MAX_IDS_PER_LOOKUP);
    assert_eq!(kept.first().unwrap(), "artist0");
    assert_eq!(kept.last().unwrap(), "artist49");

    // Short lists are untouched
    assert_eq!(truncate_ids(&ids[..3]).len(), 3);
}

#[test]
fn test_dedup_ids_keeps_first_seen_order() {
    let ids = dedup_ids(["b", "a", "b", "c", "a"]);
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[test]
fn test_payload_digest() {
    assert_eq!(
        payload_digest(""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(payload_digest("[1]"), payload_digest("[1]"));
    assert_ne!(payload_digest("[1]"), payload_digest("[2]"));
}

#[test]
fn test_year_range() {
    let years = year_range(2014, 1961);
    assert_eq!(years.len(), 54);
    assert_eq!(years.first(), Some(&2014));
    assert_eq!(years.last(), Some(&1961));
    assert!(years.windows(2).all(|w| w[0] == w[1] + 1));

    // Bounds given oldest first still run newest first
    assert_eq!(year_range(1961, 1963), vec![1963, 1962, 1961]);
    assert_eq!(year_range(2020, 2020), vec![2020]);
}

#[test]
fn test_report_rows() {
    let report = HarvestReport {
        cycles: 1,
        years: vec![
            YearOutcome::Delivered {
                year: 2020,
                entities: 12,
                delivered: 1,
                failed: 1,
                unchanged: 0,
            },
            YearOutcome::Skipped {
                year: 2019,
                reason: "no collection found for year 2019".to_string(),
            },
        ],
        cancelled: false,
    };

    let rows = report_rows(&report);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].year, 2020);
    assert_eq!(rows[0].tracks, "12");
    assert_eq!(rows[0].failed, "1");
    assert_eq!(rows[1].delivered, "-");
    assert!(rows[1].note.contains("2019"));
}

#[test]
fn test_credential_expiry() {
    let token = create_test_credential(1_000, 3_600);

    assert!(!token.is_expired_at(1_000));
    assert!(!token.is_expired_at(1_000 + 3_600 - EXPIRY_MARGIN_SECS - 1));
    assert!(token.is_expired_at(1_000 + 3_600 - EXPIRY_MARGIN_SECS));

    // A lifetime below the margin keeps the first half of it
    let short = create_test_credential(1_000, 200);
    assert!(!short.is_expired_at(1_000));
    assert!(!short.is_expired_at(1_099));
    assert!(short.is_expired_at(1_100));

    // Zero lifetime is stale at once
    let stale = create_test_credential(1_000, 0);
    assert!(stale.is_expired_at(1_000));
}

#[test]
fn test_credential_with_huge_lifetime() {
    let token = credential_from_json(
        &json!({"access_token": "abc", "expires_in": u64::MAX}),
        1_700_000_000,
    )
    .unwrap();

    assert!(!token.is_expired_at(1_700_000_000));
    assert!(token.expires_at().timestamp() > 1_700_000_000);
}

#[test]
fn test_credential_from_json() {
    let token = credential_from_json(
        &json!({"access_token": "abc", "token_type": "Bearer", "expires_in": 3600}),
        42,
    )
    .unwrap();
    assert_eq!(token.access_token, "abc");
    assert_eq!(token.expires_in, 3600);
    assert_eq!(token.obtained_at, 42);
    assert_eq!(token.expires_at().timestamp(), 3642);

    // Lifetime defaults to an hour
    let token = credential_from_json(&json!({"access_token": "abc"}), 0).unwrap();
    assert_eq!(token.expires_in, 3600);

    // Missing or empty token is an authentication error
    assert!(credential_from_json(&json!({"error": "invalid_client"}), 0).is_err());
    assert!(credential_from_json(&json!({"access_token": ""}), 0).is_err());
}
