use std::collections::BTreeMap;

use crate::{
    error::HarvestError,
    types::{Batch, DeliveryRecord, TrackEntity},
    utils,
};

/// Splits a year's entities into batches of at most `max_size`, in input order.
///
/// Only the last batch may be smaller. Nothing is duplicated or dropped. A
/// `max_size` of zero is treated as one.
pub fn partition(year: i32, entities: Vec<TrackEntity>, max_size: usize) -> Vec<Batch> {
    let max_size = max_size.max(1);
    let mut batches = Vec::with_capacity(entities.len().div_ceil(max_size));
    let mut rest = entities.into_iter().peekable();

    while rest.peek().is_some() {
        let entities: Vec<TrackEntity> = rest.by_ref().take(max_size).collect();
        batches.push(Batch {
            year,
            index: batches.len(),
            max_size,
            entities,
        });
    }
    batches
}

/// Delivery record of one batch; the payload is a JSON array of its entities.
pub fn record_for_batch(
    kind: &str,
    batch: &Batch,
    timestamp: &str,
) -> Result<DeliveryRecord, HarvestError> {
    Ok(DeliveryRecord {
        year: batch.year,
        batch_index: Some(batch.index),
        file_name: utils::delivery_file_name(kind, batch.year, Some(batch.index), timestamp),
        json_payload: serde_json::to_string(&batch.entities)?,
    })
}

/// Delivery record of a whole year; the payload is `{"<year>": [entities...]}`.
pub fn record_for_year(
    kind: &str,
    year: i32,
    entities: &[TrackEntity],
    timestamp: &str,
) -> Result<DeliveryRecord, HarvestError> {
    let keyed = BTreeMap::from([(year.to_string(), entities)]);
    Ok(DeliveryRecord {
        year,
        batch_index: None,
        file_name: utils::delivery_file_name(kind, year, None, timestamp),
        json_payload: serde_json::to_string(&keyed)?,
    })
}
