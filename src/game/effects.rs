//! Short-lived visuals spawned by gameplay. The core only tracks what exists
//! and when it expires; creating and removing the DOM nodes is the renderer's job.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectKind {
    /// One particle of a pickup burst, anchored at screen position (x, y).
    Particle { x: f64, y: f64, angle_deg: f64 },
    LevelUpBanner,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Effect {
    /// Unique for the lifetime of the session; the renderer keys nodes by it.
    pub id: u64,
    pub kind: EffectKind,
    pub expires_ms: f64,
}

#[derive(Debug, Default)]
pub struct Effects {
    live: Vec<Effect>,
    next_id: u64,
}

impl Effects {
    fn push(&mut self, kind: EffectKind, expires_ms: f64) {
        let id = self.next_id;
        self.next_id += 1;
        self.live.push(Effect { id, kind, expires_ms });
    }

    /// `count` particles centred at (x, y), `spacing_deg` apart starting at
    /// 0 degrees.
    pub fn spawn_burst(
        &mut self,
        x: f64,
        y: f64,
        count: u32,
        spacing_deg: f64,
        now: f64,
        ttl_ms: f64,
    ) {
        for i in 0..count {
            self.push(
                EffectKind::Particle { x, y, angle_deg: i as f64 * spacing_deg },
                now + ttl_ms,
            );
        }
    }

    pub fn spawn_banner(&mut self, now: f64, ttl_ms: f64) {
        self.push(EffectKind::LevelUpBanner, now + ttl_ms);
    }

    /// Drop every effect whose lifetime has ended by `now`.
    pub fn expire(&mut self, now: f64) {
        self.live.retain(|e| now < e.expires_ms);
    }

    pub fn live(&self) -> &[Effect] {
        &self.live
    }
}
