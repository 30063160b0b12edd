use crossbeam_channel as cbc;
use serde;

use crate::floor_panel::panel::FloorPanels;
use crate::local_elevator::elevio::elev::{Direction, Floor};
use crate::local_elevator::fsm::direction_decider;
use crate::local_elevator::fsm::door_timer::{Door, DoorStatus};
use crate::local_elevator::fsm::order_list::OrderList;
use crate::passenger::roster::PassengerId;
use crate::util::config::ElevatorSettings;

/// Snapshot of a car for observers and dispatch strategies
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct ElevatorInfo {
    pub id: usize,
    pub current_floor: Floor,
    pub direction: Direction,
    pub door: DoorStatus,
    pub position: f64,
    pub targets: Vec<Floor>,
    pub load: f64,
    pub emergency: bool,
}

impl ElevatorInfo {
    pub fn get_id(&self) -> usize {
        return self.id;
    }
}

/// A passenger in the manifest of a car
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rider {
    pub id: PassengerId,
    pub weight: f64,
    pub destination: Floor,
}

#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ServiceState {
    InService,
    Emergency,
}

/// Progress of boarding for the current door opening
#[derive(Copy, Clone, Debug, PartialEq)]
enum Boarding {
    Waiting,
    Deferred,
    Served,
}

/// Everything a car reports to its controller
#[derive(Clone, Debug, PartialEq)]
pub enum ElevatorEvent {
    TargetAdded { floor: Floor },
    DirectionChanged { dirn: Direction },
    FloorPassed { floor: Floor },
    Arrived { floor: Floor },
    DoorChanged { status: DoorStatus },
    PassengerAlighted { id: PassengerId, floor: Floor },
    PassengerBoarded { id: PassengerId, floor: Floor, destination: Floor },
    Overloaded { weight: f64, limit: f64 },
    EmergencyActivated,
    EmergencyReset,
}

/// Contains all we need to know about one car.
/// * `event_tx` the transmitter every state change is reported on
/// * `position` continuous position in floor units, `current_floor` the last floor passed
/// * `targets` floors to visit, served strictly in insertion order
/// * `manifest` passengers currently inside
#[derive(Clone, Debug)]
pub struct Elevator {
    event_tx: cbc::Sender<ElevatorEvent>,
    id: usize,
    min_floor: Floor,
    max_floor: Floor,
    current_floor: Floor,
    position: f64,
    targets: OrderList,
    direction: Direction,
    door: Door,
    manifest: Vec<Rider>,
    current_weight: f64,
    weight_limit: f64,
    speed: f64,
    service: ServiceState,
    boarding: Boarding,
}

impl Elevator {
    pub fn new(
        id: usize,
        settings: &ElevatorSettings,
        event_tx: cbc::Sender<ElevatorEvent>,
    ) -> Elevator {
        let floor = settings.initial_floor();
        return Elevator {
            event_tx: event_tx,
            id: id,
            min_floor: settings.min_floor,
            max_floor: settings.max_floor,
            current_floor: floor,
            position: f64::from(floor),
            targets: OrderList::new(settings.min_floor, settings.max_floor),
            direction: Direction::Idle,
            door: Door::new(settings.door_open_duration),
            manifest: Vec::new(),
            current_weight: 0.0,
            weight_limit: settings.weight_limit,
            speed: settings.speed,
            service: ServiceState::InService,
            boarding: Boarding::Served,
        };
    }

    fn emit(&self, event: ElevatorEvent) {
        // Nobody listening is fine, the car runs the same either way
        let _ = self.event_tx.send(event);
    }

    pub fn get_id(&self) -> usize {
        return self.id;
    }
    pub fn get_floor(&self) -> Floor {
        return self.current_floor;
    }
    pub fn get_position(&self) -> f64 {
        return self.position;
    }
    pub fn get_dirn(&self) -> Direction {
        return self.direction;
    }
    pub fn get_door(&self) -> &Door {
        return &self.door;
    }
    pub fn door_status(&self) -> DoorStatus {
        return self.door.status();
    }
    pub fn get_targets(&self) -> &[Floor] {
        return self.targets.as_slice();
    }
    pub fn get_manifest(&self) -> &[Rider] {
        return &self.manifest;
    }
    pub fn current_weight(&self) -> f64 {
        return self.current_weight;
    }
    pub fn weight_limit(&self) -> f64 {
        return self.weight_limit;
    }
    pub fn floor_range(&self) -> (Floor, Floor) {
        return (self.min_floor, self.max_floor);
    }
    pub fn is_emergency(&self) -> bool {
        return self.service == ServiceState::Emergency;
    }

    pub fn get_info(&self) -> ElevatorInfo {
        ElevatorInfo {
            id: self.id,
            current_floor: self.current_floor,
            direction: self.direction,
            door: self.door.status(),
            position: self.position,
            targets: self.targets.as_slice().to_vec(),
            load: self.current_weight,
            emergency: self.is_emergency(),
        }
    }

    /// Hall call routed to this car
    pub fn call(&mut self, floor: Floor) {
        self.add_target(floor);
    }

    /// Cab button pressed inside the car
    pub fn select_floor(&mut self, floor: Floor) {
        self.add_target(floor);
    }

    fn add_target(&mut self, floor: Floor) {
        if self.targets.add_order(floor) {
            self.emit(ElevatorEvent::TargetAdded { floor: floor });
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear_all_orders();
    }

    /// Registers the destination of every rider still inside as a target again.
    pub fn recall_destinations(&mut self) {
        let destinations: Vec<Floor> = self.manifest.iter().map(|r| r.destination).collect();
        for floor in destinations {
            self.select_floor(floor);
        }
    }

    /// True while passengers can step in or out at `floor`: the car is standing exactly at
    /// that floor and the doors are not shut.
    pub fn doors_open_at(&self, floor: Floor) -> bool {
        let doors_apart = match self.door.status() {
            DoorStatus::Open | DoorStatus::Closing => true,
            DoorStatus::Opening | DoorStatus::Closed => false,
        };
        return doors_apart
            && self.current_floor == floor
            && direction_decider::is_aligned(self.position, floor);
    }

    /// Advances the car `dt` seconds. The order of the phases is fixed: door, boarding, motion.
    pub fn step(&mut self, dt: f64, panels: &mut FloorPanels) {
        if self.service == ServiceState::Emergency {
            return;
        }

        let door_before = self.door.status();
        self.door.tick(dt);
        self.report_door(door_before);

        if door_before == DoorStatus::Opening
            && self.door.is_open()
            && self.boarding == Boarding::Waiting
        {
            self.serve_floor(panels);
        }

        if self.door.is_moving() {
            return;
        }

        if self.door.is_open() {
            match self.boarding {
                Boarding::Waiting => self.boarding = Boarding::Deferred,
                Boarding::Deferred => self.serve_floor(panels),
                Boarding::Served => self.close_door(),
            }
            return;
        }

        if self.targets.is_empty() {
            self.set_direction(Direction::Idle);
            return;
        }
        self.move_towards_target(dt);
    }

    fn serve_floor(&mut self, panels: &mut FloorPanels) {
        debug_assert!(self.door.is_open());
        debug_assert!(direction_decider::is_aligned(self.position, self.current_floor));
        self.unload();
        self.load(panels);
        self.boarding = Boarding::Served;
        self.close_door();
    }

    fn unload(&mut self) {
        let floor = self.current_floor;
        let (leaving, staying): (Vec<Rider>, Vec<Rider>) = self
            .manifest
            .drain(..)
            .partition(|rider| rider.destination == floor);
        self.manifest = staying;
        for rider in leaving {
            self.current_weight -= rider.weight;
            self.emit(ElevatorEvent::PassengerAlighted {
                id: rider.id,
                floor: floor,
            });
        }
    }

    fn load(&mut self, panels: &mut FloorPanels) {
        self.update_direction();
        let floor = self.current_floor;
        let (calls, left_behind) = match panels.get_mut(floor) {
            Some(panel) => {
                let calls = panel.take_waiting(self.direction);
                (calls, panel.waiting_count() > 0)
            }
            None => (Vec::new(), false),
        };
        // Calls going the other way are picked up on a later visit
        if left_behind {
            self.call(floor);
        }
        for call in calls {
            self.admit(Rider {
                id: call.passenger,
                weight: call.weight,
                destination: call.destination,
            });
            self.emit(ElevatorEvent::PassengerBoarded {
                id: call.passenger,
                floor: floor,
                destination: call.destination,
            });
        }
        if self.check_overload() {
            self.emit(ElevatorEvent::Overloaded {
                weight: self.current_weight,
                limit: self.weight_limit,
            });
        }
    }

    /// Takes a passenger on board and presses the cab button of their destination.
    pub fn admit(&mut self, rider: Rider) {
        if self.manifest.iter().any(|r| r.id == rider.id) {
            return;
        }
        self.current_weight += rider.weight;
        self.manifest.push(rider);
        self.select_floor(rider.destination);
    }

    /// Removes a passenger from the manifest without a door cycle
    pub fn release(&mut self, id: PassengerId) -> Option<Rider> {
        let index = self.manifest.iter().position(|r| r.id == id)?;
        let rider = self.manifest.remove(index);
        self.current_weight -= rider.weight;
        return Some(rider);
    }

    pub fn check_overload(&self) -> bool {
        return self.current_weight > self.weight_limit;
    }

    pub fn update_direction(&mut self) {
        let dirn = direction_decider::choose_direction(self.position, self.targets.next());
        self.set_direction(dirn);
    }

    fn set_direction(&mut self, dirn: Direction) {
        if self.direction != dirn {
            self.direction = dirn;
            self.emit(ElevatorEvent::DirectionChanged { dirn: dirn });
        }
    }

    fn set_floor(&mut self, floor: Floor) {
        if self.current_floor != floor {
            self.current_floor = floor;
            self.emit(ElevatorEvent::FloorPassed { floor: floor });
        }
    }

    pub fn move_towards_target(&mut self, dt: f64) {
        let target = match self.targets.next() {
            Some(target) => target,
            None => return,
        };
        self.update_direction();
        let dirn = self.direction;
        if dirn != Direction::Idle {
            self.position = direction_decider::advance(self.position, dirn, self.speed, dt);
        }
        if direction_decider::should_stop(self.position, dirn, target) {
            self.arrive(target);
        } else {
            self.set_floor(direction_decider::floor_at(self.position, dirn));
        }
    }

    fn arrive(&mut self, floor: Floor) {
        self.position = f64::from(floor);
        self.set_floor(floor);
        self.targets.pop_served();
        self.emit(ElevatorEvent::Arrived { floor: floor });
        self.open_door();
    }

    pub fn open_door(&mut self) {
        if self.service == ServiceState::Emergency {
            return;
        }
        debug_assert!(direction_decider::is_aligned(self.position, self.current_floor));
        let before = self.door.status();
        self.door.open();
        self.boarding = Boarding::Waiting;
        self.report_door(before);
    }

    pub fn close_door(&mut self) {
        let before = self.door.status();
        self.door.close();
        self.report_door(before);
    }

    /// Obstruction of the doorway, keeps the door from closing while set
    pub fn set_door_blocked(&mut self, blocked: bool) {
        self.door.set_blocked(blocked);
    }

    fn report_door(&self, before: DoorStatus) {
        let status = self.door.status();
        if status != before {
            self.emit(ElevatorEvent::DoorChanged { status: status });
        }
    }

    /// Stops the car where it is, drops every target and opens the door.
    pub fn activate_emergency(&mut self) {
        if self.service == ServiceState::Emergency {
            return;
        }
        self.service = ServiceState::Emergency;
        self.set_direction(Direction::Idle);
        self.targets.clear_all_orders();
        let before = self.door.status();
        self.door.force_open();
        self.door.lock_emergency();
        self.report_door(before);
        self.emit(ElevatorEvent::EmergencyActivated);
    }

    pub fn reset_emergency(&mut self) {
        if self.service != ServiceState::Emergency {
            return;
        }
        self.service = ServiceState::InService;
        self.door.unlock_emergency();
        // Stopped between floors nobody can board, so the door only has to close again
        self.boarding = if direction_decider::is_aligned(self.position, self.current_floor) {
            Boarding::Waiting
        } else {
            Boarding::Served
        };
        self.recall_destinations();
        self.emit(ElevatorEvent::EmergencyReset);
    }

    pub fn is_idle(&self) -> bool {
        return self.targets.is_empty() && self.direction == Direction::Idle && self.door.is_closed();
    }
}
