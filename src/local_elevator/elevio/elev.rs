use serde;
use std::fmt;

use crate::local_elevator::fsm::door_timer::DoorStatus;

pub type Floor = i32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Idle => "idle",
        }
    }

    /// Sign of the motion in floor units
    pub fn signum(self) -> f64 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
            Direction::Idle => 0.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Writes to the status display of a car. The core only ever sends these, it never reads the
/// display back.
#[derive(PartialEq, Debug, Clone)]
pub enum DisplayCommand {
    FloorLight { floor: Floor },
    DirectionLight { dirn: Direction },
    DoorLight { status: DoorStatus },
    ErrorMessage { msg: String },
    ClearError,
}

/// Plain-text mirror of the car state for presentation.
#[derive(Clone, Debug, PartialEq)]
pub struct Display {
    pub id: usize,
    current_floor: Floor,
    direction: Direction,
    door_status: DoorStatus,
    error_message: String,
}

impl Display {
    pub fn new(id: usize, floor: Floor) -> Display {
        Display {
            id: id,
            current_floor: floor,
            direction: Direction::Idle,
            door_status: DoorStatus::Closed,
            error_message: String::new(),
        }
    }

    pub fn update_floor(&mut self, floor: Floor) {
        self.current_floor = floor;
    }

    pub fn update_direction(&mut self, dirn: Direction) {
        self.direction = dirn;
    }

    pub fn update_door(&mut self, status: DoorStatus) {
        self.door_status = status;
    }

    pub fn show_error(&mut self, msg: &str) {
        self.error_message = msg.to_string();
    }

    pub fn clear_error(&mut self) {
        self.error_message.clear();
    }

    /// Helper function so the controller can interact with the display through commands
    pub fn execute_command(&mut self, command: DisplayCommand) {
        match command {
            DisplayCommand::FloorLight { floor } => self.update_floor(floor),
            DisplayCommand::DirectionLight { dirn } => self.update_direction(dirn),
            DisplayCommand::DoorLight { status } => self.update_door(status),
            DisplayCommand::ErrorMessage { msg } => self.show_error(&msg),
            DisplayCommand::ClearError => self.clear_error(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "Floor: {} | Direction: {} | Door: {}",
            self.current_floor,
            self.direction,
            self.door_status.as_str()
        );
        if !self.error_message.is_empty() {
            out.push_str(&format!(" | Error: {}", self.error_message));
        }
        return out;
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Display#{}[{}]", self.id, self.render())
    }
}
