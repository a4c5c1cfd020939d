//! Score tracking with a persisted best score
//!
//! The best score lives in a single storage slot. It is read once when the
//! manager is built and written every time the running score beats it.

use crate::persistence::{Storage, parse_high_score};

/// Score accumulator for one run plus the all-time best
#[derive(Debug)]
pub struct ScoreManager {
    current: u64,
    high: u64,
    /// Set when `current` overtakes `high`; cleared by whoever reacts to it
    new_high_score: bool,
    store: Box<dyn Storage>,
}

impl ScoreManager {
    /// Storage slot for the best score
    pub const STORAGE_KEY: &'static str = "ember_run_high_score";

    /// Create a manager and load the best score from `store`
    pub fn new(store: Box<dyn Storage>) -> Self {
        let mut manager = Self {
            current: 0,
            high: 0,
            new_high_score: false,
            store,
        };
        manager.load();
        manager
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn high_score(&self) -> u64 {
        self.high
    }

    /// Add points; persists the best score if it was beaten
    pub fn add(&mut self, points: u64) {
        self.current += points;

        if self.current > self.high {
            self.high = self.current;
            self.new_high_score = true;
            self.save();
        }
    }

    /// Start a fresh run (the best score is kept)
    pub fn reset_current(&mut self) {
        self.current = 0;
        self.new_high_score = false;
    }

    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn clear_new_high_score_flag(&mut self) {
        self.new_high_score = false;
    }

    fn load(&mut self) {
        match self.store.get(Self::STORAGE_KEY) {
            Ok(raw) => {
                self.high = parse_high_score(raw.as_deref());
                log::info!("Loaded high score {}", self.high);
            }
            Err(e) => {
                log::warn!("Failed to load high score: {}", e);
                self.high = 0;
            }
        }
    }

    fn save(&mut self) {
        match self.store.set(Self::STORAGE_KEY, &self.high.to_string()) {
            Ok(()) => log::info!("Saved high score {}", self.high),
            Err(e) => log::warn!("Failed to save high score: {}", e),
        }
    }
}
