use std::fmt;
use std::str::FromStr;

use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::ParseKindError;

/// Direction of a recognized swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeKind {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeKind {
    pub const ALL: [SwipeKind; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

impl fmt::Display for SwipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwipeKind {
    type Err = ParseKindError;

    /// Accepts `left`/`right`/`up`/`down` as well as the `swipeLeft` style names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let name = lower.strip_prefix("swipe").unwrap_or(&lower);
        match name {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// Payload delivered to swipe listeners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeEvent {
    pub kind: SwipeKind,
    /// Where the gesture started
    pub start: Pos2,
    /// Where the gesture ended
    pub end: Pos2,
    /// `end - start`
    pub delta: Vec2,
}

impl SwipeEvent {
    pub fn new(kind: SwipeKind, start: Pos2, end: Pos2) -> Self {
        Self {
            kind,
            start,
            end,
            delta: end - start,
        }
    }

    pub fn diff_x(&self) -> f32 {
        self.delta.x
    }

    pub fn diff_y(&self) -> f32 {
        self.delta.y
    }

    /// Straight-line length of the swipe
    pub fn distance(&self) -> f32 {
        self.delta.length()
    }
}
