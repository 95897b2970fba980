//! Pseudo-3D projection for renderers
//!
//! Maps a (lane position, depth) pair onto the screen: depth follows a
//! power curve below the horizon and the road widens into a trapezoid as
//! objects approach. Purely cosmetic; the simulation never calls this.

use glam::Vec2;

use crate::sim::{GameState, LaneObject, Player};

/// Fraction of the screen height above the horizon
pub const HORIZON_FRACTION: f32 = 0.35;
/// Exponent of the depth curve
pub const DEPTH_EXPONENT: f32 = 2.5;
/// Road width at the horizon, as a fraction of screen width
pub const ROAD_TOP_FRACTION: f32 = 0.02;
/// Extra road width at full depth, as a fraction of screen width
pub const ROAD_SPREAD_FRACTION: f32 = 0.9;
/// Lane spacing divisor across the road width
pub const LANE_SPACING_DIVISOR: f32 = 2.5;
/// Screen pixels per unit of jump height at full scale
pub const LIFT_PIXELS: f32 = 400.0;
/// Depth at which the player is drawn
pub const PLAYER_DEPTH: f32 = 0.9;

/// A projected point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub pos: Vec2,
    /// Sprite scale factor (0 at the horizon, 1 at depth 1)
    pub scale: f32,
}

/// Screen dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn horizon_y(&self) -> f32 {
        self.height * HORIZON_FRACTION
    }

    /// Project a lane position and depth, lifted by `lift` jump units
    pub fn project(&self, lane_x: f32, depth: f32, lift: f32) -> ScreenPoint {
        let ground_span = self.height * (1.0 - HORIZON_FRACTION);
        let scale = depth.max(0.0).powf(DEPTH_EXPONENT);

        let y = self.horizon_y() + scale * ground_span - lift * scale * LIFT_PIXELS;
        let road_width = self.width * ROAD_TOP_FRACTION + self.width * ROAD_SPREAD_FRACTION * scale;
        let x = self.width / 2.0 + (lane_x - 1.0) * (road_width / LANE_SPACING_DIVISOR);

        ScreenPoint {
            pos: Vec2::new(x, y),
            scale,
        }
    }

    /// Where to draw the player
    pub fn project_player(&self, player: &Player) -> ScreenPoint {
        self.project(player.x, PLAYER_DEPTH, player.y)
    }

    /// Where to draw an object; magnetised goods follow their pulled position
    pub fn project_object(&self, obj: &LaneObject, state: &GameState) -> ScreenPoint {
        self.project(render_lane_x(obj, state), obj.depth, 0.0)
    }
}

/// Horizontal position an object should be drawn at
pub fn render_lane_x(obj: &LaneObject, state: &GameState) -> f32 {
    if state.player.has_magnet && obj.kind == crate::sim::ObjectKind::Good {
        obj.x_pos
    } else {
        obj.lane as f32
    }
}

/// Body lean (radians) while sliding between lanes
pub fn player_lean(player: &Player) -> f32 {
    (player.x - player.lane as f32) * -0.2
}
