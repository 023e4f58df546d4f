//! Coins, score and level.

use super::collision::Rect;

/// A one-time pickup. Once collected it is never checked again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collectible {
    pub bounds: Rect,
    collected: bool,
}

impl Collectible {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds, collected: false }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark as collected. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }
}

/// Monotonic score / level counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub level: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self { score: 0, level: 1 }
    }
}

impl Scoreboard {
    /// Add `points`; if the new score is a multiple of `level_every` the level
    /// goes up by one and the new level is returned.
    pub fn award(&mut self, points: u32, level_every: u32) -> Option<u32> {
        self.score = self.score.saturating_add(points);
        if level_every > 0 && self.score % level_every == 0 {
            self.level += 1;
            Some(self.level)
        } else {
            None
        }
    }
}
