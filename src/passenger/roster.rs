//! Arena of every passenger in the building, indexed by `PassengerId`.
use serde;
use std::fmt;

use crate::local_elevator::elevio::buttons::CallDirection;
use crate::local_elevator::elevio::elev::Floor;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct PassengerId(pub usize);

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A person moving between floors.
/// * `destination` set once the passenger is inside and has selected a floor
/// * `intended` the floor they want to reach, selected when boarding
/// * `hall_call` direction of an outstanding call queued on a floor panel
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Passenger {
    pub id: PassengerId,
    pub weight: f64,
    pub current_floor: Floor,
    pub destination: Option<Floor>,
    pub intended: Option<Floor>,
    pub hall_call: Option<CallDirection>,
    pub waiting: bool,
    pub inside: bool,
}

impl Passenger {
    pub fn new(id: PassengerId, weight: f64, current_floor: Floor) -> Passenger {
        Passenger {
            id: id,
            weight: weight,
            current_floor: current_floor,
            destination: None,
            intended: None,
            hall_call: None,
            waiting: false,
            inside: false,
        }
    }

    pub fn call_elevator(&mut self, direction: CallDirection) {
        self.waiting = true;
        self.hall_call = Some(direction);
    }

    pub fn wait_for_elevator(&mut self) {
        self.waiting = true;
    }

    /// Only a waiting passenger can enter.
    pub fn enter_elevator(&mut self) {
        if self.waiting {
            self.inside = true;
            self.waiting = false;
            self.hall_call = None;
        }
    }

    /// Has no effect unless inside.
    pub fn select_floor(&mut self, floor: Floor) {
        if self.inside {
            self.destination = Some(floor);
        }
    }

    pub fn exit_elevator(&mut self) {
        if let (true, Some(dest)) = (self.inside, self.destination) {
            self.inside = false;
            self.current_floor = dest;
            self.destination = None;
            self.intended = None;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Roster {
    passengers: Vec<Passenger>,
}

impl Roster {
    pub fn new() -> Roster {
        Roster {
            passengers: Vec::new(),
        }
    }

    pub fn add(&mut self, weight: f64, floor: Floor) -> PassengerId {
        let id = PassengerId(self.passengers.len());
        self.passengers.push(Passenger::new(id, weight, floor));
        return id;
    }

    pub fn get(&self, id: PassengerId) -> Option<&Passenger> {
        return self.passengers.get(id.0);
    }

    pub fn get_mut(&mut self, id: PassengerId) -> Option<&mut Passenger> {
        return self.passengers.get_mut(id.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Passenger> {
        return self.passengers.iter();
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Passenger> {
        return self.passengers.iter_mut();
    }

    pub fn len(&self) -> usize {
        return self.passengers.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.passengers.is_empty();
    }

    pub fn clear(&mut self) {
        self.passengers.clear();
    }
}
