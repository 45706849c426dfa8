//! Calculation history for the rich calculator variant
//!
//! Persisted to LocalStorage, tracks the most recent calculations.

use serde::{Deserialize, Serialize};

/// Maximum number of history entries to keep
pub const MAX_HISTORY: usize = 20;

/// A single resolved calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Text of the calculation, e.g. `"5 + 5"`
    pub expression: String,
    /// Display text of the result
    pub result: String,
    /// Unix timestamp (ms) when resolved
    pub timestamp: f64,
}

/// Resolved calculations, newest first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct History {
    pub entries: Vec<HistoryEntry>,
}

impl History {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "web_toybox_history";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a resolved calculation at the front, trimming the tail
    pub fn record(&mut self, expression: String, result: String, timestamp: f64) {
        self.entries.insert(
            0,
            HistoryEntry {
                expression,
                result,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HISTORY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent calculation (if any)
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    /// Load history from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(history) = serde_json::from_str::<History>(&json) {
                    log::info!("Loaded {} history entries", history.entries.len());
                    return history;
                }
            }
        }

        log::info!("No calculation history found, starting fresh");
        Self::new()
    }

    /// Save history to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("History saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_newest_first() {
        let mut history = History::new();
        history.record("1 + 2".into(), "3".into(), 1.0);
        history.record("3 * 4".into(), "12".into(), 2.0);

        assert_eq!(history.latest().unwrap().result, "12");
        assert_eq!(history.entries[1].expression, "1 + 2");
    }

    #[test]
    fn test_record_caps_length() {
        let mut history = History::new();
        for i in 0..(MAX_HISTORY + 5) {
            history.record(format!("{i} + 0"), i.to_string(), i as f64);
        }
        assert_eq!(history.entries.len(), MAX_HISTORY);
        // The oldest entries fell off the tail
        assert_eq!(history.latest().unwrap().result, (MAX_HISTORY + 4).to_string());
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.record("1 + 1".into(), "2".into(), 0.0);
        assert!(!history.is_empty());
        history.clear();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
    }
}
