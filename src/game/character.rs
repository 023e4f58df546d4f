//! The player sprite's model: position, speed and the jump phase machine.
//!
//! `y` is measured upward from the bottom of the viewport (it is written to the
//! sprite as CSS `bottom`), so a jump adds to it and a fall subtracts.

use super::collision::Rect;

/// Where the character is in its jump.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Rising,
    Falling,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub jump_force: f64,
    phase: JumpPhase,
    risen: f64, // height gained in the current rise
    facing: Facing,
}

impl Character {
    pub fn new(x: f64, y: f64, speed: f64, jump_force: f64) -> Self {
        Self {
            x,
            y,
            speed,
            jump_force,
            phase: JumpPhase::Grounded,
            risen: 0.0,
            facing: Facing::Right,
        }
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_jumping(&self) -> bool {
        self.phase != JumpPhase::Grounded
    }

    /// Step left unless already at the left edge. Never goes below 0.
    pub fn move_left(&mut self) -> bool {
        if self.x <= 0.0 {
            return false;
        }
        self.x = (self.x - self.speed).max(0.0);
        self.facing = Facing::Left;
        true
    }

    /// Step right unless already at `max_x`. Never goes past it.
    pub fn move_right(&mut self, max_x: f64) -> bool {
        if self.x >= max_x {
            return false;
        }
        self.x = (self.x + self.speed).min(max_x);
        self.facing = Facing::Right;
        true
    }

    /// Begin a jump. Ignored while a jump is already in progress.
    pub fn jump(&mut self) -> bool {
        if self.is_jumping() {
            return false;
        }
        self.phase = JumpPhase::Rising;
        self.risen = 0.0;
        true
    }

    /// Advance the jump by one fixed step.
    ///
    /// Rising adds `jump_force` until `rise_cap` has been gained, then the
    /// phase flips to Falling. Falling subtracts `jump_force` and lands exactly
    /// on `resting_y`.
    pub fn physics_step(&mut self, resting_y: f64, rise_cap: f64) {
        match self.phase {
            JumpPhase::Grounded => {}
            JumpPhase::Rising => {
                self.y += self.jump_force;
                self.risen += self.jump_force;
                if self.risen >= rise_cap {
                    self.phase = JumpPhase::Falling;
                }
            }
            JumpPhase::Falling => {
                self.y -= self.jump_force;
                if self.y <= resting_y {
                    self.land(resting_y);
                }
            }
        }
    }

    fn land(&mut self, resting_y: f64) {
        self.y = resting_y;
        self.risen = 0.0;
        self.phase = JumpPhase::Grounded;
    }

    /// Pull the character back inside `[0, max_x]` and, when grounded, onto the
    /// resting line. Used after the viewport changes size.
    pub fn fit_viewport(&mut self, max_x: f64, resting_y: f64) {
        self.x = self.x.clamp(0.0, max_x.max(0.0));
        if !self.is_jumping() {
            self.y = resting_y;
        }
    }

    /// Screen bounds of a sprite centred horizontally on `x` whose bottom edge
    /// sits `y` pixels above the viewport bottom.
    pub fn bounds(&self, viewport_height: f64, sprite_width: f64, sprite_height: f64) -> Rect {
        let bottom = viewport_height - self.y;
        Rect::new(
            self.x - sprite_width / 2.0,
            bottom - sprite_height,
            self.x + sprite_width / 2.0,
            bottom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REST: f64 = 500.0;

    #[test]
    fn moving_right_from_center_for_twenty_ticks() {
        let mut c = Character::new(400.0, REST, 5.0, 15.0);
        for _ in 0..20 {
            c.move_right(800.0);
        }
        assert_eq!(c.x, 500.0);
        for _ in 0..200 {
            c.move_right(800.0);
        }
        assert_eq!(c.x, 800.0);
        assert!(!c.move_right(800.0));
    }

    #[test]
    fn moving_left_clamps_at_zero_and_faces_left() {
        let mut c = Character::new(7.0, REST, 5.0, 15.0);
        assert!(c.move_left());
        assert!(c.move_left());
        assert_eq!(c.x, 0.0);
        assert_eq!(c.facing(), Facing::Left);
        assert!(!c.move_left());
    }

    #[test]
    fn jump_is_ignored_while_airborne() {
        let mut c = Character::new(100.0, REST, 5.0, 20.0);
        assert!(c.jump());
        c.physics_step(REST, 100.0);
        let before = c.clone();
        assert!(!c.jump());
        assert_eq!(c, before);
    }

    #[test]
    fn force_twenty_rises_five_steps_then_falls_five() {
        let mut c = Character::new(100.0, REST, 5.0, 20.0);
        c.jump();
        for step in 1..=5 {
            c.physics_step(REST, 100.0);
            assert!(c.is_jumping(), "grounded early at rise step {step}");
        }
        assert_eq!(c.y, REST + 100.0);
        assert_eq!(c.phase(), JumpPhase::Falling);
        for step in 6..=9 {
            c.physics_step(REST, 100.0);
            assert!(c.is_jumping(), "grounded early at fall step {step}");
        }
        c.physics_step(REST, 100.0);
        assert!(!c.is_jumping());
        assert_eq!(c.y, REST);
    }

    #[test]
    fn uneven_force_still_lands_on_rest() {
        let mut c = Character::new(100.0, REST, 5.0, 15.0);
        c.jump();
        let mut steps = 0;
        while c.is_jumping() {
            c.physics_step(REST, 100.0);
            steps += 1;
            assert!(steps < 100, "jump never finished");
        }
        assert_eq!(c.y, REST);
        assert_eq!(steps, 14); // 7 up to 105, 7 back down
    }

    #[test]
    fn grounded_step_is_a_noop() {
        let mut c = Character::new(100.0, REST, 5.0, 15.0);
        c.physics_step(REST, 100.0);
        assert_eq!(c.y, REST);
        assert_eq!(c.phase(), JumpPhase::Grounded);
    }

    #[test]
    fn bounds_are_centered_on_x() {
        let c = Character::new(100.0, 50.0, 5.0, 15.0);
        let r = c.bounds(600.0, 40.0, 60.0);
        assert_eq!(r, Rect::new(80.0, 490.0, 120.0, 550.0));
    }

    #[test]
    fn fit_viewport_clamps_and_snaps_when_grounded() {
        let mut c = Character::new(900.0, 500.0, 5.0, 15.0);
        c.fit_viewport(640.0, 380.0);
        assert_eq!((c.x, c.y), (640.0, 380.0));

        c.jump();
        c.physics_step(380.0, 100.0);
        c.fit_viewport(640.0, 200.0);
        assert_eq!(c.y, 395.0); // airborne y untouched
    }
}
