use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::types::Tool;
use crate::FinCalcResult;

/// How many calculations are retained, most recent first.
pub const CALCULATION_RETENTION: usize = 50;
/// How many saved loan comparisons are retained.
pub const COMPARISON_RETENTION: usize = 10;

const CALCULATIONS_KEY: &str = "calculation_history";
const COMPARISONS_KEY: &str = "saved_comparisons";

/// The persistence handle the history store writes through. Implementations
/// own any durability and locking discipline; the store only hands them
/// opaque string payloads under fixed keys.
pub trait HistoryBackend {
    fn persist(&mut self, key: &str, payload: &str) -> FinCalcResult<()>;
    fn restore(&self, key: &str) -> FinCalcResult<Option<String>>;
}

/// A backend that keeps payloads in a map. Useful for tests and for callers
/// that snapshot state themselves.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBackend {
    entries: HashMap<String, String>,
}

impl HistoryBackend for InMemoryBackend {
    fn persist(&mut self, key: &str, payload: &str) -> FinCalcResult<()> {
        self.entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn restore(&self, key: &str) -> FinCalcResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }
}

/// One stored calculation or comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub tool: Tool,
    /// The inputs as an opaque JSON record.
    pub inputs: Value,
    /// The result as an opaque JSON record.
    pub result: Value,
    pub recorded_at: DateTime<Utc>,
}

/// History of past calculations and saved comparisons, newest first, capped
/// at fixed retention counts. Constructed over an injected backend; there is
/// no ambient global store.
#[derive(Debug)]
pub struct HistoryStore<B: HistoryBackend> {
    backend: B,
    calculations: Vec<HistoryEntry>,
    comparisons: Vec<HistoryEntry>,
    next_id: u64,
}

impl<B: HistoryBackend> HistoryStore<B> {
    /// Open a store over a backend, restoring any previously persisted state.
    pub fn open(backend: B) -> FinCalcResult<Self> {
        let calculations = load_entries(&backend, CALCULATIONS_KEY)?;
        let comparisons = load_entries(&backend, COMPARISONS_KEY)?;
        let next_id = calculations
            .iter()
            .chain(comparisons.iter())
            .map(|e| e.id)
            .max()
            .map_or(1, |max| max + 1);

        Ok(HistoryStore {
            backend,
            calculations,
            comparisons,
            next_id,
        })
    }

    /// Record a calculation, evicting the oldest entry past the cap.
    pub fn record_calculation(
        &mut self,
        tool: Tool,
        inputs: Value,
        result: Value,
    ) -> FinCalcResult<u64> {
        let id = self.push(tool, inputs, result, false)?;
        Ok(id)
    }

    /// Record a saved loan comparison, evicting the oldest past the cap.
    pub fn record_comparison(&mut self, inputs: Value, result: Value) -> FinCalcResult<u64> {
        let id = self.push(Tool::CompareLoans, inputs, result, true)?;
        Ok(id)
    }

    /// Remove a calculation by id. Returns whether anything was removed.
    pub fn remove_calculation(&mut self, id: u64) -> FinCalcResult<bool> {
        let before = self.calculations.len();
        self.calculations.retain(|e| e.id != id);
        let removed = self.calculations.len() != before;
        if removed {
            self.save(false)?;
        }
        Ok(removed)
    }

    /// Remove a saved comparison by id. Returns whether anything was removed.
    pub fn remove_comparison(&mut self, id: u64) -> FinCalcResult<bool> {
        let before = self.comparisons.len();
        self.comparisons.retain(|e| e.id != id);
        let removed = self.comparisons.len() != before;
        if removed {
            self.save(true)?;
        }
        Ok(removed)
    }

    pub fn clear_calculations(&mut self) -> FinCalcResult<()> {
        self.calculations.clear();
        self.save(false)
    }

    pub fn clear_comparisons(&mut self) -> FinCalcResult<()> {
        self.comparisons.clear();
        self.save(true)
    }

    /// Calculations, most recent first.
    pub fn calculations(&self) -> &[HistoryEntry] {
        &self.calculations
    }

    /// Saved comparisons, most recent first.
    pub fn comparisons(&self) -> &[HistoryEntry] {
        &self.comparisons
    }

    /// Hand the backend back, e.g. to reopen the store later.
    pub fn into_backend(self) -> B {
        self.backend
    }

    fn push(
        &mut self,
        tool: Tool,
        inputs: Value,
        result: Value,
        comparison: bool,
    ) -> FinCalcResult<u64> {
        let id = self.next_id;
        self.next_id += 1;

        let entry = HistoryEntry {
            id,
            tool,
            inputs,
            result,
            recorded_at: Utc::now(),
        };

        let (list, cap) = if comparison {
            (&mut self.comparisons, COMPARISON_RETENTION)
        } else {
            (&mut self.calculations, CALCULATION_RETENTION)
        };
        list.insert(0, entry);
        list.truncate(cap);

        self.save(comparison)?;
        Ok(id)
    }

    fn save(&mut self, comparison: bool) -> FinCalcResult<()> {
        let (list, key) = if comparison {
            (&self.comparisons, COMPARISONS_KEY)
        } else {
            (&self.calculations, CALCULATIONS_KEY)
        };
        let payload = serde_json::to_string(list)?;
        self.backend.persist(key, &payload)
    }
}

fn load_entries<B: HistoryBackend>(backend: &B, key: &str) -> FinCalcResult<Vec<HistoryEntry>> {
    match backend.restore(key)? {
        Some(payload) => Ok(serde_json::from_str(&payload)?),
        None => Ok(Vec::new()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> HistoryStore<InMemoryBackend> {
        HistoryStore::open(InMemoryBackend::default()).unwrap()
    }

    #[test]
    fn test_newest_first() {
        let mut store = store();
        store
            .record_calculation(Tool::EmiCalculator, json!({"principal": "1"}), json!({}))
            .unwrap();
        let second = store
            .record_calculation(Tool::GstCalculator, json!({"amount": "2"}), json!({}))
            .unwrap();

        let entries = store.calculations();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, second);
        assert_eq!(entries[0].tool, Tool::GstCalculator);
    }

    #[test]
    fn test_calculation_retention_cap() {
        let mut store = store();
        for i in 0..CALCULATION_RETENTION + 5 {
            store
                .record_calculation(Tool::EmiCalculator, json!({ "n": i }), json!({}))
                .unwrap();
        }
        assert_eq!(store.calculations().len(), CALCULATION_RETENTION);
        // Newest entry survives, the oldest five were evicted
        assert_eq!(
            store.calculations()[0].inputs,
            json!({ "n": CALCULATION_RETENTION + 4 })
        );
    }

    #[test]
    fn test_comparison_retention_cap() {
        let mut store = store();
        for i in 0..COMPARISON_RETENTION + 3 {
            store.record_comparison(json!({ "n": i }), json!({})).unwrap();
        }
        assert_eq!(store.comparisons().len(), COMPARISON_RETENTION);
        assert!(store.calculations().is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut store = store();
        let id = store
            .record_calculation(Tool::FdCalculator, json!({}), json!({}))
            .unwrap();
        store
            .record_calculation(Tool::SipCalculator, json!({}), json!({}))
            .unwrap();

        assert!(store.remove_calculation(id).unwrap());
        assert!(!store.remove_calculation(id).unwrap());
        assert_eq!(store.calculations().len(), 1);

        store.clear_calculations().unwrap();
        assert!(store.calculations().is_empty());
    }

    #[test]
    fn test_reopen_restores_state() {
        let mut store = store();
        store
            .record_calculation(Tool::PpfCalculator, json!({"deposit": "500"}), json!({}))
            .unwrap();
        let id = store
            .record_comparison(json!({"loan_a": {}}), json!({}))
            .unwrap();

        let backend = store.into_backend();
        let reopened = HistoryStore::open(backend).unwrap();

        assert_eq!(reopened.calculations().len(), 1);
        assert_eq!(reopened.calculations()[0].tool, Tool::PpfCalculator);
        assert_eq!(reopened.comparisons().len(), 1);
        assert_eq!(reopened.comparisons()[0].id, id);
    }

    #[test]
    fn test_ids_continue_after_reopen() {
        let mut store = store();
        let first = store
            .record_calculation(Tool::EmiCalculator, json!({}), json!({}))
            .unwrap();

        let mut reopened = HistoryStore::open(store.into_backend()).unwrap();
        let second = reopened
            .record_calculation(Tool::EmiCalculator, json!({}), json!({}))
            .unwrap();

        assert!(second > first);
    }
}
