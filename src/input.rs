//! Input commands and gesture classification
//!
//! The simulation only understands three commands. Hosts feed key names or
//! swipe deltas through here so keyboard and touch behave the same
//! everywhere. Anything unrecognised is ignored rather than rejected.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Horizontal swipe distance (px) that counts as a lane change
pub const SWIPE_LANE_THRESHOLD: f32 = 40.0;
/// Vertical travel (px) below which a touch counts as a tap
pub const TAP_THRESHOLD: f32 = 10.0;
/// Upward travel (px) that counts as a jump swipe
pub const SWIPE_UP_THRESHOLD: f32 = 30.0;

/// A player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Left,
    Right,
    Jump,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Left => "left",
            Command::Right => "right",
            Command::Jump => "jump",
        }
    }

    /// Parse a command name; unknown names yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Command::Left),
            "ArrowRight" => Some(Command::Right),
            " " | "Spacebar" | "ArrowUp" => Some(Command::Jump),
            _ => None,
        }
    }

    /// Classify a touch from its start/end delta in screen pixels
    /// (y grows downward).
    ///
    /// A long horizontal swipe changes lane; otherwise a tap or an upward
    /// swipe jumps.
    pub fn from_swipe(dx: f32, dy: f32) -> Option<Self> {
        if dx.abs() > SWIPE_LANE_THRESHOLD {
            Some(if dx > 0.0 { Command::Right } else { Command::Left })
        } else if dy.abs() < TAP_THRESHOLD || dy < -SWIPE_UP_THRESHOLD {
            Some(Command::Jump)
        } else {
            None
        }
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Command::Left),
            "right" => Ok(Command::Right),
            "jump" => Ok(Command::Jump),
            _ => Err(()),
        }
    }
}
