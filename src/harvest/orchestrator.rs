use std::future::Future;

use chrono::Local;
use indicatif::ProgressBar;
use tokio_util::sync::CancellationToken;

use crate::{
    config::{DeliveryShape, HarvestConfig},
    error::HarvestError,
    harvest::{batch, enrich, normalize, sink::Sink},
    info,
    management::StateManager,
    spotify::{SpotifyClient, playlists},
    success,
    types::{DeliveryRecord, HarvestReport, TrackEntity, YearOutcome},
    utils, warning,
};

/// Drives the year loop.
///
/// For every year of the configured range, newest first:
/// resolve collection → fetch items → normalize → enrich → batch → deliver,
/// then wait the fixed delay before the next year. A failure anywhere in a
/// year skips that year only. Delivery failures skip only the failing unit.
/// Authentication failures end the run.
///
/// The cancellation token is checked at every suspension point: the pending
/// request is dropped, remaining batches of the year are not sent and the
/// outer loop ends.
pub struct Harvester {
    config: HarvestConfig,
    spotify: SpotifyClient,
    sink: Sink,
    state: Option<StateManager>,
    cancel: CancellationToken,
    progress: ProgressBar,
}

impl Harvester {
    pub fn new(config: HarvestConfig, spotify: SpotifyClient, sink: Sink) -> Self {
        Self {
            config,
            spotify,
            sink,
            state: None,
            cancel: CancellationToken::new(),
            progress: ProgressBar::hidden(),
        }
    }

    /// Skips payloads whose digest is already recorded in `state`.
    pub fn with_state(mut self, state: StateManager) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub async fn run(&mut self) -> Result<HarvestReport, HarvestError> {
        let years = utils::year_range(self.config.year_from, self.config.year_to);
        let mut report = HarvestReport::default();

        'cycles: loop {
            report.cycles += 1;
            // Only the running cycle is reported
            report.years.clear();

            for (i, &year) in years.iter().enumerate() {
                self.progress.set_message(format!("Harvesting year {year}..."));

                match self.harvest_year(year).await {
                    Ok(outcome) => report.years.push(outcome),
                    Err(HarvestError::Cancelled) => {
                        report.cancelled = true;
                        break 'cycles;
                    }
                    Err(e) if e.is_fatal() => {
                        self.progress.finish_and_clear();
                        return Err(e);
                    }
                    Err(e) => {
                        warning!("Skipping year {}: {}", year, e);
                        report.years.push(YearOutcome::Skipped {
                            year,
                            reason: e.to_string(),
                        });
                    }
                }

                let last = i + 1 == years.len();
                if !last || self.config.repeat {
                    self.progress.set_message(format!(
                        "Waiting {:.1}s before the next year...",
                        self.config.delay.as_secs_f64()
                    ));
                    if self.pause().await.is_err() {
                        report.cancelled = true;
                        break 'cycles;
                    }
                }
            }

            if !self.config.repeat {
                break;
            }
        }

        self.progress.finish_and_clear();
        Ok(report)
    }

    /// Runs the whole pipeline for one year.
    pub async fn harvest_year(&mut self, year: i32) -> Result<YearOutcome, HarvestError> {
        info!("Fetching data for year {}", year);

        let collection = self
            .cancellable(playlists::resolve_collection(&self.spotify, year))
            .await?;
        let raw = self
            .cancellable(playlists::fetch_items(
                &self.spotify,
                &collection,
                self.config.page_limit,
                self.config.max_pages,
            ))
            .await?;

        let mut entities = normalize::normalize_page(&raw);
        if entities.len() < raw.len() {
            info!(
                "Dropped {} of {} items for year {} with missing fields",
                raw.len() - entities.len(),
                raw.len(),
                year
            );
        }

        self.cancellable(enrich::enrich(
            &self.spotify,
            &mut entities,
            self.config.enrichment,
        ))
        .await?;

        let total = entities.len();
        let records = self.records_for(year, entities)?;

        // Digests of units sent before a cancellation still reach the ledger
        let delivery = self.deliver_all(&records).await;
        self.persist_state().await;
        let (delivered, failed, unchanged) = delivery?;

        success!(
            "Year {}: {} tracks, {} of {} units delivered",
            year,
            total,
            delivered,
            records.len()
        );

        Ok(YearOutcome::Delivered {
            year,
            entities: total,
            delivered,
            failed,
            unchanged,
        })
    }

    /// Delivers the records of one year in order, returning the delivered,
    /// failed and unchanged counts.
    async fn deliver_all(
        &mut self,
        records: &[DeliveryRecord],
    ) -> Result<(usize, usize, usize), HarvestError> {
        let (mut delivered, mut failed, mut unchanged) = (0, 0, 0);
        for record in records {
            let digest = utils::payload_digest(&record.json_payload);
            if self.state.as_ref().is_some_and(|s| s.has(&digest)) {
                unchanged += 1;
                continue;
            }

            let result = self
                .cancellable(async { Ok(self.sink.deliver(record).await) })
                .await?;
            match result {
                Ok(_) => {
                    delivered += 1;
                    if let Some(state) = self.state.as_mut() {
                        state.add(digest);
                    }
                }
                Err(e) => {
                    failed += 1;
                    match e.status_code() {
                        Some(code) => warning!(
                            "Failed to deliver {} (HTTP {}): {}",
                            record.file_name,
                            code,
                            e
                        ),
                        None => warning!("Failed to deliver {}: {}", record.file_name, e),
                    }
                }
            }
        }
        Ok((delivered, failed, unchanged))
    }

    async fn persist_state(&self) {
        if let Some(state) = self.state.as_ref() {
            if let Err(e) = state.persist().await {
                warning!("Failed to persist delivery state: {}", e);
            }
        }
    }

    fn records_for(
        &self,
        year: i32,
        entities: Vec<TrackEntity>,
    ) -> Result<Vec<DeliveryRecord>, HarvestError> {
        let timestamp = utils::format_timestamp(Local::now());
        match self.config.delivery {
            DeliveryShape::Batched => batch::partition(year, entities, self.config.batch_size)
                .iter()
                .map(|b| batch::record_for_batch(&self.config.kind, b, &timestamp))
                .collect(),
            DeliveryShape::WholeYear => Ok(vec![batch::record_for_year(
                &self.config.kind,
                year,
                &entities,
                &timestamp,
            )?]),
        }
    }

    async fn pause(&self) -> Result<(), HarvestError> {
        self.cancellable(async {
            tokio::time::sleep(self.config.delay).await;
            Ok(())
        })
        .await
    }

    async fn cancellable<T>(
        &self,
        fut: impl Future<Output = Result<T, HarvestError>>,
    ) -> Result<T, HarvestError> {
        tokio::select! {
            _ = self.cancel.cancelled() => Err(HarvestError::Cancelled),
            res = fut => res,
        }
    }
}
