//! Tunables for the mini-game. Defaults reproduce the portfolio page's feel:
//! 5 px per frame walking, a 100 px hop stepped every 20 ms, a level every
//! three coins.

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Game tuning knobs. With the `serde` feature any subset of fields can be
/// overridden from JSON; missing fields keep their defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Horizontal pixels moved per tick while a move key is held.
    pub initial_speed: f64,
    /// Pixels moved per physics step, both rising and falling.
    pub jump_force: f64,
    /// Rise cap in pixels; the fall begins once this much height is gained.
    pub jump_height: f64,
    /// Fixed cadence of the jump / fall stepping.
    pub physics_step_ms: f64,
    /// Upper bound on physics steps run in a single tick.
    pub max_physics_steps: u32,
    /// Resting y is `viewport height - rest_offset`.
    pub rest_offset: f64,
    pub score_per_collectible: u32,
    /// A level-up fires whenever the score lands on a multiple of this.
    pub level_every: u32,
    pub speed_per_level: f64,
    pub particle_count: u32,
    pub particle_ttl_ms: f64,
    pub banner_ttl_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_speed: 5.0,
            jump_force: 15.0,
            jump_height: 100.0,
            physics_step_ms: 20.0,
            max_physics_steps: 8,
            rest_offset: 100.0,
            score_per_collectible: 10,
            level_every: 30,
            speed_per_level: 1.0,
            particle_count: 5,
            particle_ttl_ms: 1000.0,
            banner_ttl_ms: 2000.0,
        }
    }
}

impl GameConfig {
    /// Reject values that would stall or break the physics loop.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("initial_speed", self.initial_speed),
            ("jump_force", self.jump_force),
            ("jump_height", self.jump_height),
            ("physics_step_ms", self.physics_step_ms),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be a positive number, got {value}"));
            }
        }
        if self.level_every == 0 {
            return Err("level_every must be at least 1".into());
        }
        if self.max_physics_steps == 0 {
            return Err("max_physics_steps must be at least 1".into());
        }
        if self.speed_per_level < 0.0 || !self.speed_per_level.is_finite() {
            return Err(format!(
                "speed_per_level must be non-negative, got {}",
                self.speed_per_level
            ));
        }
        Ok(())
    }

    /// Angular spacing between burst particles, in degrees.
    pub fn particle_spacing_deg(&self) -> f64 {
        if self.particle_count == 0 {
            0.0
        } else {
            360.0 / self.particle_count as f64
        }
    }
}
