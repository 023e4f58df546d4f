//! Held-key tracking for the three logical controls.

/// Recognized control inputs, independent of the physical key that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    MoveLeft,
    MoveRight,
    Jump,
}

impl LogicalKey {
    /// Map a `KeyboardEvent.code` to a logical key. Anything else is ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(LogicalKey::MoveLeft),
            "ArrowRight" => Some(LogicalKey::MoveRight),
            "Space" => Some(LogicalKey::Jump),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        match self {
            LogicalKey::MoveLeft => 0,
            LogicalKey::MoveRight => 1,
            LogicalKey::Jump => 2,
        }
    }
}

/// Pressed state for each logical key. No debouncing: a key stays pressed
/// until its key-up arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputTracker {
    held: [bool; 3],
}

impl InputTracker {
    pub fn press(&mut self, key: LogicalKey) {
        self.held[key.slot()] = true;
    }

    pub fn release(&mut self, key: LogicalKey) {
        self.held[key.slot()] = false;
    }

    pub fn is_pressed(&self, key: LogicalKey) -> bool {
        self.held[key.slot()]
    }

    /// True while either horizontal key is held (drives the `running` sprite flag).
    pub fn is_moving(&self) -> bool {
        self.is_pressed(LogicalKey::MoveLeft) || self.is_pressed(LogicalKey::MoveRight)
    }
}
