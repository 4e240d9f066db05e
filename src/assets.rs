//! Asset load-status registry
//!
//! The renderer never touches asset bytes; it only needs to know which
//! sprites have finished loading so it can pick the right fallback. The
//! shell marks roles loaded as its loader completes them.

/// Sprite roles the renderer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetId {
    /// Runner run-cycle frames
    Idle0,
    Idle1,
    Idle2,
    /// Dedicated dead sprite
    DeadSprite,
    /// Drop hazard sprite
    Drop,
    /// Flame frames
    Fire0,
    Fire1,
}

impl AssetId {
    pub const ALL: [AssetId; 7] = [
        AssetId::Idle0,
        AssetId::Idle1,
        AssetId::Idle2,
        AssetId::DeadSprite,
        AssetId::Drop,
        AssetId::Fire0,
        AssetId::Fire1,
    ];

    fn index(self) -> usize {
        match self {
            AssetId::Idle0 => 0,
            AssetId::Idle1 => 1,
            AssetId::Idle2 => 2,
            AssetId::DeadSprite => 3,
            AssetId::Drop => 4,
            AssetId::Fire0 => 5,
            AssetId::Fire1 => 6,
        }
    }

    /// Run-cycle frame for an animation counter
    pub fn idle_frame(frame: u64) -> AssetId {
        match frame % 3 {
            0 => AssetId::Idle0,
            1 => AssetId::Idle1,
            _ => AssetId::Idle2,
        }
    }

    /// Flame frame for an animation counter
    pub fn fire_frame(frame: u64) -> AssetId {
        if frame % 2 == 0 {
            AssetId::Fire0
        } else {
            AssetId::Fire1
        }
    }
}

/// Load-complete booleans per asset role
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    loaded: [bool; AssetId::ALL.len()],
}

impl AssetStore {
    /// Empty store: nothing loaded yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with every role marked loaded (tests, headless runs)
    pub fn fully_loaded() -> Self {
        Self {
            loaded: [true; AssetId::ALL.len()],
        }
    }

    pub fn mark_loaded(&mut self, id: AssetId) {
        self.loaded[id.index()] = true;
    }

    pub fn is_loaded(&self, id: AssetId) -> bool {
        self.loaded[id.index()]
    }
}
