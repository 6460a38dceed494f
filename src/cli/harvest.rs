use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::{self, ClientCredentials, Endpoints, HarvestConfig},
    error,
    harvest::{Harvester, Sink},
    info,
    management::{STATE_TYPE_DELIVERED, StateManager, TokenManager},
    spotify::{SpotifyClient, client::build_http_client},
    success, utils, warning,
};

/// Runs the harvest loop with the given configuration until the year range is
/// exhausted, forever in repeat mode, or until Ctrl-C.
///
/// Missing credentials or a rejected token grant end the process with exit
/// code 1 before any year is attempted. Years that fail later are reported in
/// the summary table.
pub async fn harvest(harvest_config: HarvestConfig) {
    let credentials = match ClientCredentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => error!("{}", e),
    };
    let endpoints = match Endpoints::from_env() {
        Ok(endpoints) => endpoints,
        Err(e) => error!("{}", e),
    };

    let http = match build_http_client(harvest_config.request_timeout) {
        Ok(http) => http,
        Err(e) => error!("{}", e),
    };

    let tokens = Arc::new(TokenManager::new(
        http.clone(),
        endpoints.token_url.clone(),
        credentials,
    ));
    if let Err(e) = tokens.get_token().await {
        error!("{}", e);
    }

    let spotify = SpotifyClient::new(
        http.clone(),
        endpoints.api_url.clone(),
        Arc::clone(&tokens),
        harvest_config.max_retries,
    )
    .with_retry_pause(harvest_config.retry_pause);
    let sink = Sink::new(
        http,
        endpoints.ingest_url.clone(),
        harvest_config.output_dir.clone(),
    );

    let skip_unchanged = harvest_config.skip_unchanged;
    let mut harvester = Harvester::new(harvest_config, spotify, sink);

    if skip_unchanged {
        let state = StateManager::new(
            STATE_TYPE_DELIVERED.to_string(),
            config::data_dir().join("state"),
        );
        match state.load().await {
            Ok(state) => {
                info!("{} payloads already delivered", state.len());
                harvester = harvester.with_state(state);
            }
            Err(e) => warning!("Cannot load delivery state, delivering everything: {}", e),
        }
    }

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    harvester = harvester.with_progress(pb);

    let cancel = harvester.cancellation();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warning!("Interrupted, finishing up...");
            cancel.cancel();
        }
    });

    match harvester.run().await {
        Ok(report) => {
            let rows = utils::report_rows(&report);
            if !rows.is_empty() {
                println!("{}", Table::new(rows));
            }

            if report.cancelled {
                warning!("Harvest cancelled after {} cycle(s)", report.cycles);
            } else {
                success!(
                    "Harvest finished, {} grant(s) issued",
                    tokens.grants_issued()
                );
            }
        }
        Err(e) => error!("Harvest aborted: {}", e),
    }
}
