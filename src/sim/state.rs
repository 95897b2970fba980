//! Game state and core simulation types
//!
//! Everything a round needs lives in [`GameState`]; there is no ambient
//! global state, so any number of simulations can run side by side.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing has been started yet
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Lives ran out; terminal until the next start
    GameOver,
}

/// Kinds of objects travelling down the lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Good,
    Bad,
    Wall,
    Magnet,
    Shield,
}

impl ObjectKind {
    /// Bad items and walls cost a life (or a shield)
    pub fn is_hazard(self) -> bool {
        matches!(self, ObjectKind::Bad | ObjectKind::Wall)
    }

    /// Magnet and shield pickups
    pub fn power_up(self) -> Option<PowerUp> {
        match self {
            ObjectKind::Magnet => Some(PowerUp::Magnet),
            ObjectKind::Shield => Some(PowerUp::Shield),
            _ => None,
        }
    }
}

/// Power-up effects the player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUp {
    /// Pulls nearby good items into the player's lane for a limited time
    Magnet,
    /// Absorbs the next hazard hit
    Shield,
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Target lane (0..LANE_COUNT)
    pub lane: u8,
    /// Smoothed horizontal position, eased toward `lane`
    pub x: f32,
    /// Height above the ground (0 = grounded)
    pub y: f32,
    /// Vertical velocity while jumping
    pub vertical_velocity: f32,
    pub is_jumping: bool,
    pub has_magnet: bool,
    pub magnet_ticks_remaining: u32,
    pub has_shield: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            lane: CENTER_LANE,
            x: CENTER_LANE as f32,
            y: 0.0,
            vertical_velocity: 0.0,
            is_jumping: false,
            has_magnet: false,
            magnet_ticks_remaining: 0,
            has_shield: false,
        }
    }
}

impl Player {
    /// Shift one lane left (clamped at the leftmost lane)
    pub fn move_left(&mut self) {
        self.lane = self.lane.saturating_sub(1);
    }

    /// Shift one lane right (clamped at the rightmost lane)
    pub fn move_right(&mut self) {
        self.lane = (self.lane + 1).min(LANE_COUNT - 1);
    }

    /// Start a jump. Returns false if already airborne.
    pub fn jump(&mut self, jump_force: f32) -> bool {
        if self.is_jumping {
            return false;
        }
        self.is_jumping = true;
        self.vertical_velocity = jump_force;
        true
    }

    /// Ease `x` toward the target lane
    pub fn ease_toward_lane(&mut self, easing: f32) {
        self.x += (self.lane as f32 - self.x) * easing;
    }

    /// Integrate the jump arc, landing when height would go negative
    pub fn apply_gravity(&mut self, gravity: f32) {
        if !self.is_jumping {
            return;
        }
        self.y += self.vertical_velocity;
        self.vertical_velocity -= gravity;
        if self.y <= 0.0 {
            self.y = 0.0;
            self.vertical_velocity = 0.0;
            self.is_jumping = false;
        }
    }

    /// Airborne enough to clear a wall
    pub fn clears_walls(&self, clearance: f32) -> bool {
        self.y > clearance
    }

    pub fn grant_magnet(&mut self, duration_ticks: u32) {
        self.has_magnet = true;
        self.magnet_ticks_remaining = duration_ticks;
    }

    /// Count the magnet down one tick. Returns true on the tick it expires.
    pub fn tick_magnet(&mut self) -> bool {
        if !self.has_magnet {
            return false;
        }
        self.magnet_ticks_remaining = self.magnet_ticks_remaining.saturating_sub(1);
        if self.magnet_ticks_remaining == 0 {
            self.has_magnet = false;
            return true;
        }
        false
    }
}

/// An object travelling toward the player along a lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneObject {
    pub id: u32,
    pub kind: ObjectKind,
    /// Lane it spawned in
    pub lane: u8,
    /// Horizontal position; only differs from `lane` under magnet pull
    pub x_pos: f32,
    /// Normalized distance from the camera (0 = horizon)
    pub depth: f32,
    /// Cosmetic icon index within its kind
    pub variant: u8,
    /// Cleared once the object has been hit
    pub active: bool,
}

impl LaneObject {
    pub fn new(id: u32, kind: ObjectKind, lane: u8, variant: u8) -> Self {
        Self {
            id,
            kind,
            lane,
            x_pos: lane as f32,
            depth: 0.0,
            variant,
            active: true,
        }
    }

    /// Inside the depth band where collisions are tested
    pub fn in_collision_band(&self, tuning: &Tuning) -> bool {
        self.active && self.depth > tuning.collision_near && self.depth < tuning.collision_far
    }

    /// Pulled by the magnet: only good items past the midpoint
    pub fn is_magnetised(&self, player: &Player, tuning: &Tuning) -> bool {
        player.has_magnet && self.kind == ObjectKind::Good && self.depth > tuning.magnet_min_depth
    }
}

/// Per-round scalars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub score: u64,
    pub lives: u8,
    /// Depth advanced per tick
    pub speed: f32,
    /// Ticks since the round started
    pub frame_counter: u64,
    pub phase: GamePhase,
}

impl RoundState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            lives: tuning.starting_lives,
            speed: tuning.speed_start,
            frame_counter: 0,
            phase: GamePhase::NotStarted,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

/// Complete game state for one simulation instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub round: RoundState,
    /// Active objects (ascending id, i.e. spawn order)
    pub objects: Vec<LaneObject>,
    /// Best score known at the end of the last finished round
    pub best_score: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            player: Player::default(),
            round: RoundState::new(tuning),
            objects: Vec::new(),
            best_score: 0,
            next_id: 1,
        }
    }

    /// Reinitialise everything except the remembered best score
    pub fn reset(&mut self, tuning: &Tuning) {
        let best_score = self.best_score;
        *self = Self::new(tuning);
        self.best_score = best_score;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an object at depth 0 and return its id
    pub fn push_object(&mut self, kind: ObjectKind, lane: u8, variant: u8) -> u32 {
        let id = self.next_entity_id();
        self.objects.push(LaneObject::new(id, kind, lane, variant));
        id
    }
}
