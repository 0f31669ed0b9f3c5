//! Best-score bookkeeping
//!
//! A single non-negative integer persisted under one key. Anything that
//! doesn't parse as a finite, non-negative number loads as 0.

use crate::persistence::ScoreStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore(u64);

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "bestScore";

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Load from `store`, clamping corrupt or negative values to 0
    pub fn load<S: ScoreStore + ?Sized>(store: &S) -> Self {
        let Some(raw) = store.get(Self::STORAGE_KEY) else {
            return Self(0);
        };
        let value = Self::parse(&raw);
        if value.is_none() {
            log::warn!("Ignoring unreadable best score {:?}", raw);
        }
        Self(value.unwrap_or(0))
    }

    pub fn save<S: ScoreStore + ?Sized>(&self, store: &mut S) {
        store.set(Self::STORAGE_KEY, &self.0.to_string());
    }

    /// `best = max(best, score)`; true if `score` is a new record
    pub fn commit(&mut self, score: u64) -> bool {
        if score > self.0 {
            self.0 = score;
            true
        } else {
            false
        }
    }

    fn parse(raw: &str) -> Option<u64> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Some(0);
        }
        if let Ok(v) = raw.parse::<u64>() {
            return Some(v);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Some(v.floor() as u64),
            Ok(v) if v.is_finite() => {
                log::warn!("Negative best score {} clamped to 0", v);
                Some(0)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn load(raw: &str) -> u64 {
        BestScore::load(&MemoryStore::with_entry(BestScore::STORAGE_KEY, raw)).value()
    }

    #[test]
    fn test_absent_is_zero() {
        assert_eq!(BestScore::load(&MemoryStore::new()).value(), 0);
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(load("42"), 42);
        assert_eq!(load(" 7 "), 7);
        assert_eq!(load("12.9"), 12);
        assert_eq!(load(""), 0);
        assert_eq!(load("-5"), 0);
        assert_eq!(load("NaN"), 0);
        assert_eq!(load("garbage"), 0);
    }

    #[test]
    fn test_commit_is_max() {
        let mut best = BestScore::new(10);
        assert!(!best.commit(4));
        assert_eq!(best.value(), 10);
        assert!(best.commit(11));
        assert!(!best.commit(11));
        assert_eq!(best.value(), 11);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        BestScore::new(33).save(&mut store);
        assert_eq!(store.get(BestScore::STORAGE_KEY).as_deref(), Some("33"));
        assert_eq!(BestScore::load(&store).value(), 33);
    }
}
