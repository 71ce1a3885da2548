//! Stage hand-off persistence: serialized standings under a fixed key per day.

use crate::models::{Player, SimulationError, Stage};
use std::collections::HashMap;

pub const DAY1_RECORDS_KEY: &str = "Day1Records";
pub const DAY2_RECORDS_KEY: &str = "Day2Records";

/// Key under which a stage's standings are stored.
pub fn records_key(stage: Stage) -> &'static str {
    match stage {
        Stage::Day1 => DAY1_RECORDS_KEY,
        Stage::Day2 => DAY2_RECORDS_KEY,
    }
}

/// Key/value store holding serialized player lists.
pub trait RecordStore {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&mut self, key: &str, records: String);
}

/// Process-local store; one per session or test.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRecordStore {
    entries: HashMap<String, String>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, records: String) {
        self.entries.insert(key.to_string(), records);
    }
}

/// Serialize `players` as JSON under the stage's key.
pub fn save_records(
    store: &mut dyn RecordStore,
    stage: Stage,
    players: &[Player],
) -> Result<(), SimulationError> {
    let json =
        serde_json::to_string(players).map_err(|e| SimulationError::CorruptRecords(e.to_string()))?;
    store.put(records_key(stage), json);
    Ok(())
}

/// Stored standings for a stage, or `None` if nothing was saved.
pub fn load_records(
    store: &dyn RecordStore,
    stage: Stage,
) -> Result<Option<Vec<Player>>, SimulationError> {
    match store.get(records_key(stage)) {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| SimulationError::CorruptRecords(e.to_string())),
        None => Ok(None),
    }
}
