use std::{collections::HashSet, path::PathBuf};

use thiserror::Error;

pub const STATE_TYPE_DELIVERED: &str = "delivered";

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("state format error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Ledger of payload digests that were delivered successfully.
pub struct StateManager {
    state_type: String,
    dir: PathBuf,
    state: Vec<String>,
    index: HashSet<String>,
}

impl StateManager {
    pub fn new(state_type: String, dir: PathBuf) -> Self {
        Self {
            state_type,
            dir,
            state: Vec::new(),
            index: HashSet::new(),
        }
    }

    pub fn add(&mut self, item: String) {
        if self.index.insert(item.clone()) {
            self.state.push(item);
        }
    }

    pub fn has(&self, item: &str) -> bool {
        self.index.contains(item)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub async fn persist(&self) -> Result<(), StateError> {
        let path = self.get_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.state)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Loads the ledger from disk; a ledger that was never persisted loads empty.
    pub async fn load(self) -> Result<Self, StateError> {
        let path = self.get_path();
        let json = match async_fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(self),
            Err(e) => return Err(StateError::IoError(e)),
        };
        let state: Vec<String> = serde_json::from_str(&json)?;
        let index = state.iter().cloned().collect();
        Ok(Self {
            state_type: self.state_type,
            dir: self.dir,
            state,
            index,
        })
    }

    fn get_path(&self) -> PathBuf {
        self.dir.join(format!("{state}.json", state = self.state_type))
    }
}
