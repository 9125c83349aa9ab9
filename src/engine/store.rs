use super::bank::Bank;
use super::error::Error;
use std::fs;
use std::path::PathBuf;

/// Durable storage for the whole bank graph, one JSON document per file.
///
/// The engine never commits on its own; the front end calls [`Store::commit`]
/// after each successful mutating operation. The whole graph is the unit of
/// commit, so a crash between operations loses at most the latest one.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted bank, or start a fresh empty one when the store
    /// file does not exist yet.
    pub fn load_or_default(&self) -> Result<Bank, Error> {
        if !self.path.exists() {
            log::debug!("No store at {}, starting empty bank", self.path.display());
            return Ok(Bank::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        let bank = serde_json::from_str(&contents)?;
        log::debug!("Loaded from {}", self.path.display());
        Ok(bank)
    }

    /// Serialize the whole bank graph to the store file.
    pub fn commit(&self, bank: &Bank) -> Result<(), Error> {
        let contents = serde_json::to_string_pretty(bank)?;
        fs::write(&self.path, contents)?;
        log::debug!("Saved to {}", self.path.display());
        Ok(())
    }
}
