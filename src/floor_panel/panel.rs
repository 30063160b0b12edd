use serde;
use std::collections::BTreeMap;

use crate::local_elevator::elevio::buttons::CallDirection;
use crate::local_elevator::elevio::elev::{Direction, Floor};
use crate::passenger::roster::PassengerId;

/// A passenger queued at a floor, waiting to be picked up
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HallCall {
    pub passenger: PassengerId,
    pub weight: f64,
    pub destination: Floor,
    pub direction: CallDirection,
}

/// Hall call panel of a single floor with an up and a down button.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FloorPanel {
    pub floor: Floor,
    has_up_button: bool,
    has_down_button: bool,
    up_pressed: bool,
    down_pressed: bool,
    indicator_up: bool,
    indicator_down: bool,
    queue: Vec<HallCall>,
}

impl FloorPanel {
    pub fn new(floor: Floor, min_floor: Floor, max_floor: Floor) -> FloorPanel {
        FloorPanel {
            floor: floor,
            has_up_button: floor < max_floor,
            has_down_button: floor > min_floor,
            up_pressed: false,
            down_pressed: false,
            indicator_up: false,
            indicator_down: false,
            queue: Vec::new(),
        }
    }

    pub fn press_up(&mut self) {
        if self.has_up_button {
            self.up_pressed = true;
            self.indicator_up = true;
        }
    }

    pub fn press_down(&mut self) {
        if self.has_down_button {
            self.down_pressed = true;
            self.indicator_down = true;
        }
    }

    pub fn press(&mut self, direction: CallDirection) {
        match direction {
            CallDirection::Up => self.press_up(),
            CallDirection::Down => self.press_down(),
        }
    }

    pub fn reset_up(&mut self) {
        self.up_pressed = false;
        self.indicator_up = false;
    }

    pub fn reset_down(&mut self) {
        self.down_pressed = false;
        self.indicator_down = false;
    }

    pub fn is_active(&self) -> bool {
        return self.up_pressed || self.down_pressed;
    }

    pub fn requested_directions(&self) -> Vec<CallDirection> {
        let mut dirs = Vec::new();
        if self.up_pressed {
            dirs.push(CallDirection::Up);
        }
        if self.down_pressed {
            dirs.push(CallDirection::Down);
        }
        return dirs;
    }

    pub fn up_pressed(&self) -> bool {
        return self.up_pressed;
    }
    pub fn down_pressed(&self) -> bool {
        return self.down_pressed;
    }
    pub fn indicator_up(&self) -> bool {
        return self.indicator_up;
    }
    pub fn indicator_down(&self) -> bool {
        return self.indicator_down;
    }
    pub fn has_button(&self, direction: CallDirection) -> bool {
        match direction {
            CallDirection::Up => self.has_up_button,
            CallDirection::Down => self.has_down_button,
        }
    }

    /// Queues a passenger and lights the button of the direction they are going.
    pub fn enqueue(&mut self, call: HallCall) {
        self.queue.push(call);
        self.press(call.direction);
    }

    /// Removes and returns every queued call matching `dirn`, an idle car takes them all.
    /// A button is reset only when no remaining call still needs it.
    pub fn take_waiting(&mut self, dirn: Direction) -> Vec<HallCall> {
        let (taken, kept): (Vec<HallCall>, Vec<HallCall>) = self
            .queue
            .drain(..)
            .partition(|call| call.direction.matches(dirn));
        self.queue = kept;
        if !taken.is_empty() {
            if !self.is_queued(CallDirection::Up) {
                self.reset_up();
            }
            if !self.is_queued(CallDirection::Down) {
                self.reset_down();
            }
        }
        return taken;
    }

    pub fn is_queued(&self, direction: CallDirection) -> bool {
        return self.queue.iter().any(|call| call.direction == direction);
    }

    pub fn waiting(&self) -> &[HallCall] {
        return &self.queue;
    }

    pub fn waiting_count(&self) -> usize {
        return self.queue.len();
    }
}

/// One panel for every floor of the building
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FloorPanels {
    panels: BTreeMap<Floor, FloorPanel>,
}

impl FloorPanels {
    pub fn new() -> FloorPanels {
        FloorPanels {
            panels: BTreeMap::new(),
        }
    }

    /// Replaces all panels with one fresh panel per floor in `min_floor..=max_floor`
    pub fn populate(&mut self, min_floor: Floor, max_floor: Floor) {
        self.panels.clear();
        for floor in min_floor..=max_floor {
            self.panels
                .insert(floor, FloorPanel::new(floor, min_floor, max_floor));
        }
    }

    pub fn get(&self, floor: Floor) -> Option<&FloorPanel> {
        return self.panels.get(&floor);
    }

    pub fn get_mut(&mut self, floor: Floor) -> Option<&mut FloorPanel> {
        return self.panels.get_mut(&floor);
    }

    pub fn floors(&self) -> Vec<Floor> {
        return self.panels.keys().copied().collect();
    }

    pub fn iter(&self) -> impl Iterator<Item = &FloorPanel> {
        return self.panels.values();
    }

    pub fn len(&self) -> usize {
        return self.panels.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.panels.is_empty();
    }

    pub fn clear(&mut self) {
        self.panels.clear();
    }
}
