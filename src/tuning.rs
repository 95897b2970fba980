//! Gameplay tuning
//!
//! Every balance constant the simulation reads lives here so hosts can load
//! alternate balance data from JSON without recompiling.

use serde::{Deserialize, Serialize};

/// Largest per-tick speed, as a fraction of the collision band width
const MAX_SPEED_BAND_FRACTION: f32 = 0.99;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Speed ===
    /// Depth advanced per tick at score 0
    pub speed_start: f32,
    /// Hard cap on depth advanced per tick
    pub speed_max: f32,
    /// Extra speed per point of score
    pub score_speed_factor: f32,

    // === Player physics ===
    /// Vertical velocity lost per tick while airborne
    pub gravity: f32,
    /// Initial vertical velocity of a jump
    pub jump_force: f32,
    /// Fraction of the remaining lane gap closed per tick
    pub easing: f32,

    // === Power-ups ===
    /// Fraction of the gap to the player a magnetised item closes per tick
    pub magnet_pull: f32,
    /// Items only feel the magnet once past this depth
    pub magnet_min_depth: f32,
    /// Magnet lifetime in ticks
    pub magnet_duration_ticks: u32,

    // === Scoring ===
    /// Score per good item collected
    pub good_reward: u64,
    /// Lives at round start
    pub starting_lives: u8,

    // === Collision ===
    /// Collision band entry depth (exclusive)
    pub collision_near: f32,
    /// Collision band exit depth (exclusive)
    pub collision_far: f32,
    /// Maximum lateral distance that counts as contact
    pub hit_radius: f32,
    /// Player height above which walls are cleared
    pub wall_clearance: f32,
    /// Objects at or past this depth are removed
    pub prune_depth: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            speed_start: 0.006,
            speed_max: 0.02,
            score_speed_factor: 0.00005,

            gravity: 0.002,
            jump_force: 0.048,
            easing: 0.2,

            magnet_pull: 0.15,
            magnet_min_depth: 0.5,
            magnet_duration_ticks: 600,

            good_reward: 10,
            starting_lives: 3,

            collision_near: 0.85,
            collision_far: 0.95,
            hit_radius: 0.4,
            wall_clearance: 0.1,
            prune_depth: 1.2,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields take their defaults; malformed
    /// input falls back to the default tuning.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Tuning>(json) {
            Ok(tuning) => tuning.sanitized(),
            Err(e) => {
                log::warn!("Invalid tuning JSON ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Clamp values into ranges the simulation can run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        // The band bounds the speeds below, so it is settled first
        let band_ok = self.collision_near.is_finite()
            && self.collision_far.is_finite()
            && self.collision_near < self.collision_far;
        if !band_ok {
            log::warn!("Empty collision band, using defaults");
            self.collision_near = defaults.collision_near;
            self.collision_far = defaults.collision_far;
        }
        if !(self.prune_depth.is_finite() && self.prune_depth >= self.collision_far) {
            log::warn!(
                "prune_depth {} would drop objects before the collision band, using default",
                self.prune_depth
            );
            self.prune_depth = defaults.prune_depth.max(self.collision_far);
        }

        // An object must land inside the band at least once on its way past
        let speed_limit = (self.collision_far - self.collision_near) * MAX_SPEED_BAND_FRACTION;

        if !(self.speed_start.is_finite() && self.speed_start > 0.0) {
            log::warn!("speed_start {} out of range, using default", self.speed_start);
            self.speed_start = defaults.speed_start;
        }
        if self.speed_start > speed_limit {
            log::warn!(
                "speed_start {} would skip the collision band, clamping to {}",
                self.speed_start,
                speed_limit
            );
            self.speed_start = speed_limit;
        }
        if !self.speed_max.is_finite() || self.speed_max < self.speed_start {
            log::warn!(
                "speed_max {} below speed_start {}, clamping",
                self.speed_max,
                self.speed_start
            );
            self.speed_max = self.speed_start;
        }
        if self.speed_max > speed_limit {
            log::warn!(
                "speed_max {} would skip the collision band, clamping to {}",
                self.speed_max,
                speed_limit
            );
            self.speed_max = speed_limit;
        }
        if !self.score_speed_factor.is_finite() || self.score_speed_factor < 0.0 {
            self.score_speed_factor = 0.0;
        }
        if !(self.easing > 0.0 && self.easing <= 1.0) {
            log::warn!("easing {} outside (0, 1], using default", self.easing);
            self.easing = defaults.easing;
        }
        if !(self.magnet_pull >= 0.0 && self.magnet_pull <= 1.0) {
            self.magnet_pull = defaults.magnet_pull;
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            self.gravity = defaults.gravity;
        }
        if !(self.jump_force.is_finite() && self.jump_force >= 0.0) {
            self.jump_force = defaults.jump_force;
        }
        if self.starting_lives == 0 {
            self.starting_lives = defaults.starting_lives;
        }
        self
    }

    /// Peak jump height: `jump_force² / (2 · gravity)`
    pub fn apex_height(&self) -> f32 {
        self.jump_force * self.jump_force / (2.0 * self.gravity)
    }

    /// Speed for a given score, capped at `speed_max`
    pub fn speed_for_score(&self, score: u64) -> f32 {
        (self.speed_start + score as f32 * self.score_speed_factor).min(self.speed_max)
    }
}
