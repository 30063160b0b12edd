use serde;
use std::fmt;

use super::elev::{Direction, Floor};

/// Direction requested from a hall panel
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    Up,
    Down,
}

impl CallDirection {
    /// Direction a passenger at `from` needs to reach `to`, `None` if they are the same floor.
    pub fn between(from: Floor, to: Floor) -> Option<CallDirection> {
        if to > from {
            Some(CallDirection::Up)
        } else if to < from {
            Some(CallDirection::Down)
        } else {
            None
        }
    }

    /// An idle car serves calls in both directions.
    pub fn matches(self, dirn: Direction) -> bool {
        match dirn {
            Direction::Idle => true,
            Direction::Up => self == CallDirection::Up,
            Direction::Down => self == CallDirection::Down,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CallDirection::Up => "up",
            CallDirection::Down => "down",
        }
    }
}

impl fmt::Display for CallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CallButton {
    pub floor: Floor,
    pub call: CallDirection,
}
