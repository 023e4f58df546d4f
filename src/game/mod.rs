//! Platformer mini-game core.
//!
//! A single `GameSession` owns every piece of mutable game state: the
//! character, the held keys, the coins, score / level and the transient
//! effects. The browser layer feeds it key presses and frame timestamps,
//! then renders the `Snapshot` it hands back. Nothing in here touches the DOM,
//! so the whole loop runs under plain `cargo test`.
//!
//! Timing: horizontal movement is applied once per frame, while the jump is
//! stepped by a fixed-timestep accumulator (one step per `physics_step_ms`)
//! so the hop has the same shape regardless of display refresh rate.

pub mod character;
pub mod collision;
pub mod config;
pub mod effects;
pub mod input;
pub mod scoring;

pub use character::{Character, Facing, JumpPhase};
pub use collision::{Rect, is_colliding};
pub use config::GameConfig;
pub use effects::{Effect, EffectKind, Effects};
pub use input::{InputTracker, LogicalKey};
pub use scoring::{Collectible, Scoreboard};

// --- Session types -----------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Lifecycle of a session. There is no way out of `Running`: coins are
/// single-use and the page offers no restart, so a session plays once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    NotStarted,
    Running,
}

/// Things that happened during a key press or tick, for logging and hooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Collected { index: usize },
    LevelUp { level: u32 },
}

/// Everything the renderer needs for one frame.
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub x: f64,
    pub y: f64,
    pub facing: Facing,
    pub running: bool,
    pub jumping: bool,
    pub score: u32,
    pub level: u32,
    pub collectibles: &'a [Collectible],
    pub effects: &'a [Effect],
}

pub struct GameSession {
    config: GameConfig,
    state: GameState,
    viewport: Viewport,
    sprite_size: (f64, f64),
    character: Character,
    input: InputTracker,
    scoreboard: Scoreboard,
    collectibles: Vec<Collectible>,
    effects: Effects,
    last_tick_ms: Option<f64>,
    physics_accumulator: f64,
}

impl GameSession {
    /// New session with the character centred horizontally on its resting line.
    pub fn new(
        config: GameConfig,
        viewport: Viewport,
        sprite_size: (f64, f64),
        collectible_bounds: impl IntoIterator<Item = Rect>,
    ) -> Self {
        let character = Character::new(
            viewport.width / 2.0,
            viewport.height - config.rest_offset,
            config.initial_speed,
            config.jump_force,
        );
        Self {
            state: GameState::NotStarted,
            viewport,
            sprite_size,
            character,
            input: InputTracker::default(),
            scoreboard: Scoreboard::default(),
            collectibles: collectible_bounds.into_iter().map(Collectible::new).collect(),
            effects: Effects::default(),
            last_tick_ms: None,
            physics_accumulator: 0.0,
            config,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score
    }

    pub fn level(&self) -> u32 {
        self.scoreboard.level
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn effects(&self) -> &[Effect] {
        self.effects.live()
    }

    pub fn resting_y(&self) -> f64 {
        self.viewport.height - self.config.rest_offset
    }

    // --- Input ---------------------------------------------------------------

    /// Record a key press. The first jump press starts the game.
    pub fn press(&mut self, key: LogicalKey) -> Option<GameEvent> {
        self.input.press(key);
        if key == LogicalKey::Jump && self.state == GameState::NotStarted {
            self.state = GameState::Running;
            return Some(GameEvent::Started);
        }
        None
    }

    pub fn release(&mut self, key: LogicalKey) {
        self.input.release(key);
    }

    // --- Per-frame update ----------------------------------------------------

    /// Advance one frame at host time `now` (milliseconds), checking coins
    /// against the modelled character bounds. Does nothing until the game has
    /// started.
    ///
    /// The browser adapter instead calls `advance`, writes the new position to
    /// the page, and hands the measured bounds to `resolve_collisions`.
    pub fn tick(&mut self, now: f64) -> Vec<GameEvent> {
        self.advance(now);
        let hero = self.character_bounds();
        self.resolve_collisions(now, hero)
    }

    /// Movement and jump physics for one frame.
    pub fn advance(&mut self, now: f64) {
        if self.state != GameState::Running {
            return;
        }

        if self.input.is_pressed(LogicalKey::MoveLeft) {
            self.character.move_left();
        }
        if self.input.is_pressed(LogicalKey::MoveRight) {
            self.character.move_right(self.viewport.width);
        }
        if self.input.is_pressed(LogicalKey::Jump) {
            self.character.jump();
        }

        let elapsed = self.last_tick_ms.map_or(0.0, |last| (now - last).max(0.0));
        self.last_tick_ms = Some(now);
        self.advance_physics(elapsed);
    }

    /// Collect every uncollected coin overlapping `hero`, then expire effects.
    /// `hero` is the character's current screen bounds.
    pub fn resolve_collisions(&mut self, now: f64, hero: Rect) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state != GameState::Running {
            return events;
        }
        for index in 0..self.collectibles.len() {
            let coin = &self.collectibles[index];
            if !coin.is_collected() && is_colliding(&coin.bounds, &hero) {
                self.collect(index, now, &mut events);
            }
        }

        self.effects.expire(now);
        events
    }

    /// Run as many fixed physics steps as `elapsed_ms` covers, capped at
    /// `max_physics_steps`. Time beyond the cap is discarded.
    pub fn advance_physics(&mut self, elapsed_ms: f64) {
        let step = self.config.physics_step_ms;
        let resting_y = self.resting_y();
        self.physics_accumulator += elapsed_ms;

        let mut steps = 0;
        while self.physics_accumulator >= step && steps < self.config.max_physics_steps {
            self.character.physics_step(resting_y, self.config.jump_height);
            self.physics_accumulator -= step;
            steps += 1;
        }
        if self.physics_accumulator >= step {
            self.physics_accumulator = 0.0;
        }
    }

    /// Character bounds derived from the model, for hosts that cannot measure
    /// the sprite.
    pub fn character_bounds(&self) -> Rect {
        let (w, h) = self.sprite_size;
        self.character.bounds(self.viewport.height, w, h)
    }

    fn collect(&mut self, index: usize, now: f64, events: &mut Vec<GameEvent>) {
        let coin = &mut self.collectibles[index];
        if !coin.collect() {
            return;
        }
        let (cx, cy) = coin.bounds.center();
        events.push(GameEvent::Collected { index });

        let level_up = self
            .scoreboard
            .award(self.config.score_per_collectible, self.config.level_every);

        if let Some(level) = level_up {
            self.character.speed += self.config.speed_per_level;
            self.effects.spawn_banner(now, self.config.banner_ttl_ms);
            events.push(GameEvent::LevelUp { level });
        }

        self.effects.spawn_burst(
            cx,
            cy,
            self.config.particle_count,
            self.config.particle_spacing_deg(),
            now,
            self.config.particle_ttl_ms,
        );
    }

    // --- Layout changes ------------------------------------------------------

    /// Viewport changed size: keep the character inside it and on the new
    /// resting line when grounded.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let resting_y = self.resting_y();
        self.character.fit_viewport(viewport.width, resting_y);
    }

    /// Update a coin's measured screen bounds (layout or scroll moved it).
    pub fn set_collectible_bounds(&mut self, index: usize, bounds: Rect) {
        if let Some(coin) = self.collectibles.get_mut(index) {
            coin.bounds = bounds;
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            x: self.character.x,
            y: self.character.y,
            facing: self.character.facing(),
            running: self.input.is_moving(),
            jumping: self.character.is_jumping(),
            score: self.scoreboard.score,
            level: self.scoreboard.level,
            collectibles: &self.collectibles,
            effects: self.effects.live(),
        }
    }
}
