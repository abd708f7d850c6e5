//! High score leaderboard system
//!
//! Persisted through a [`KeyValueStore`], tracks the top 10 climbs.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StoreError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Longest player name kept on the board
pub const MAX_NAME_LEN: usize = 16;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name as entered
    pub name: String,
    /// Highest climb (meters)
    pub score: f32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "bounce_climb_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: f32) -> bool {
        if !score.is_finite() || score <= 0.0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: f32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: f32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let name = name.trim();
        let name = if name.is_empty() {
            "Anonymous".to_string()
        } else {
            name.chars().take(MAX_NAME_LEN).collect()
        };

        let entry = HighScoreEntry {
            name,
            score,
            timestamp,
        };

        // Find insertion point (sorted descending by score, ties keep the older entry first)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<f32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from a store; unreadable data yields an empty board
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<HighScores>(&json) {
                Ok(mut scores) => {
                    scores
                        .entries
                        .sort_by(|a, b| b.score.total_cmp(&a.score));
                    scores.entries.truncate(MAX_HIGH_SCORES);
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
                Err(e) => log::warn!("High scores unreadable ({e}), starting fresh"),
            },
            Ok(None) => {}
            Err(e) => log::warn!("High score storage unavailable ({e})"),
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to a store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
