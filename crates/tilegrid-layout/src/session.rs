use tilegrid_core::{Size, TileId, Vec2};

use crate::geometry::GeometryPolicy;

// ──────────────────────────────────────────────
// Resize state machine
// ──────────────────────────────────────────────

/// One in-progress drag on one tile's resize handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub tile: TileId,
    pub anchor: Vec2,
    pub start_size: Size,
}

impl ResizeSession {
    pub fn begin(tile: TileId, anchor: Vec2, start_size: Size) -> Self {
        Self {
            tile,
            anchor,
            start_size,
        }
    }

    /// Live size for the pointer at `position`: start size plus pointer delta, clamped.
    pub fn live_size(&self, position: Vec2, policy: &GeometryPolicy) -> Size {
        let dx = position.x - self.anchor.x;
        let dy = position.y - self.anchor.y;
        let candidate = Size::new(
            offset(self.start_size.width, dx),
            offset(self.start_size.height, dy),
        );
        policy.clamp(candidate)
    }

    /// Final size committed when the pointer is released.
    pub fn commit_size(&self, live: Size, policy: &GeometryPolicy) -> Size {
        policy.snap(policy.clamp(live))
    }
}

/// `base + delta` rounded to whole pixels, saturating at the i32 range.
fn offset(base: i32, delta: f32) -> i32 {
    let value = f64::from(base) + f64::from(delta);
    if value.is_nan() {
        return base;
    }
    value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// `Idle → Active → (Committing) → Idle`. Committing is the
/// `mem::replace` back to `Idle` in the engine's finish path.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Active(ResizeSession),
}

impl ResizeState {
    pub fn session(&self) -> Option<&ResizeSession> {
        match self {
            ResizeState::Active(session) => Some(session),
            ResizeState::Idle => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ResizeState::Active(_))
    }
}
