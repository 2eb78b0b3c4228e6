//! Level library
//!
//! The collection of playable levels with their play counts and ratings.
//! Seeded with the built-in level; user levels are added at runtime.

use crate::level::{GameLevel, builtin_level};

/// In-memory level collection, lookup by id.
#[derive(Debug, Clone, Default)]
pub struct LevelLibrary {
    levels: Vec<GameLevel>,
}

impl LevelLibrary {
    /// Library seeded with the out-of-the-box level.
    pub fn with_builtin() -> Self {
        Self { levels: vec![builtin_level()] }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&GameLevel> {
        self.levels.iter().find(|l| l.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameLevel> {
        self.levels.iter()
    }

    /// Adds a level; an existing level with the same id is replaced.
    pub fn add(&mut self, level: GameLevel) {
        if let Some(existing) = self.levels.iter_mut().find(|l| l.id == level.id) {
            *existing = level;
        } else {
            log::info!("Level added: {} ({})", level.name, level.id);
            self.levels.push(level);
        }
    }

    /// Bumps the play counter when a session starts.
    pub fn record_play(&mut self, id: &str) {
        if let Some(level) = self.levels.iter_mut().find(|l| l.id == id) {
            level.record_play();
            log::debug!("Level {} played {} times", id, level.plays);
        }
    }

    /// Folds a star rating into a level's running average. Returns the new
    /// rating, or None for an unknown id.
    pub fn rate(&mut self, id: &str, stars: u8) -> Option<f32> {
        let level = self.levels.iter_mut().find(|l| l.id == id)?;
        let rating = level.add_rating(stars);
        log::debug!("Level {} rated {} ({} ratings)", id, rating, level.rating_count);
        Some(rating)
    }
}
