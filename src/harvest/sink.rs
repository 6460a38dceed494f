use std::path::PathBuf;

use reqwest::Client;

use crate::{
    error::SinkError,
    info,
    types::{DeliveryRecord, IngestEnvelope},
};

/// Local directory plus remote ingestion endpoint.
///
/// Both halves of a delivery are attempted regardless of the other's outcome.
/// The local copy is never rolled back when the remote push fails; it is the
/// fallback for that case.
pub struct Sink {
    http: Client,
    ingest_url: String,
    output_dir: PathBuf,
}

impl Sink {
    pub fn new(http: Client, ingest_url: String, output_dir: PathBuf) -> Self {
        Self {
            http,
            ingest_url,
            output_dir,
        }
    }

    /// Writes the local copy and posts `{file, content}` to the ingestion URL.
    ///
    /// Returns the path of the local copy when both sides succeeded.
    pub async fn deliver(&self, record: &DeliveryRecord) -> Result<PathBuf, SinkError> {
        let local = self.write_local(record).await;
        let remote = self.push_remote(record).await;

        match (local, remote) {
            (Ok(path), Ok(())) => Ok(path),
            (Err(local), Ok(())) => Err(local),
            (Ok(_), Err(remote)) => Err(remote),
            (Err(local), Err(remote)) => Err(SinkError::Both {
                local: Box::new(local),
                remote: Box::new(remote),
            }),
        }
    }

    async fn write_local(&self, record: &DeliveryRecord) -> Result<PathBuf, SinkError> {
        let path = self.output_dir.join(&record.file_name);
        let local_err = |source| SinkError::Local {
            path: path.clone(),
            source,
        };

        async_fs::create_dir_all(&self.output_dir)
            .await
            .map_err(local_err)?;
        async_fs::write(&path, &record.json_payload)
            .await
            .map_err(local_err)?;

        info!("File saved locally at {}", path.display());
        Ok(path)
    }

    async fn push_remote(&self, record: &DeliveryRecord) -> Result<(), SinkError> {
        let envelope = IngestEnvelope {
            file: &record.file_name,
            content: &record.json_payload,
        };

        let response = self
            .http
            .post(&self.ingest_url)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(SinkError::Status {
            code: status.as_u16(),
            body,
        })
    }
}
