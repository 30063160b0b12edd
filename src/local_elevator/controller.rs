use crossbeam_channel as cbc;
use std::collections::BTreeSet;

use crate::floor_panel::panel::FloorPanels;
use crate::local_elevator::elevio::elev::{Display, DisplayCommand, Floor};
use crate::local_elevator::fsm::elevatorfsm::{Elevator, ElevatorEvent, Rider};
use crate::passenger::roster::{PassengerId, Roster};
use crate::util::config::ElevatorSettings;
use crate::util::logger::{LogLevel, Logger};

/// Runs a single car: routes hall and cab requests into it, steps it, and keeps the
/// passengers it carries in sync with the car.
#[derive(Debug)]
pub struct Controller {
    pub id: usize,
    elevator: Elevator,
    event_rx: cbc::Receiver<ElevatorEvent>,
    display: Display,
    pending_requests: Vec<Floor>,
    riders: BTreeSet<PassengerId>,
    time: f64,
}

impl Controller {
    pub fn new(id: usize, elevator: Elevator, event_rx: cbc::Receiver<ElevatorEvent>) -> Controller {
        let display = Display::new(elevator.get_id(), elevator.get_floor());
        Controller {
            id: id,
            elevator: elevator,
            event_rx: event_rx,
            display: display,
            pending_requests: Vec::new(),
            riders: BTreeSet::new(),
            time: 0.0,
        }
    }

    /// Builds a car from `settings` together with the channel it reports on.
    pub fn with_settings(id: usize, settings: &ElevatorSettings) -> Controller {
        let (event_tx, event_rx) = cbc::unbounded::<ElevatorEvent>();
        let elevator = Elevator::new(id, settings, event_tx);
        Controller::new(id, elevator, event_rx)
    }

    pub fn elevator(&self) -> &Elevator {
        return &self.elevator;
    }

    pub fn elevator_mut(&mut self) -> &mut Elevator {
        return &mut self.elevator;
    }

    pub fn display(&self) -> &Display {
        return &self.display;
    }

    pub fn riders(&self) -> &BTreeSet<PassengerId> {
        return &self.riders;
    }

    pub fn time(&self) -> f64 {
        return self.time;
    }

    pub fn add_external_request(&mut self, floor: Floor) {
        self.add_request(floor);
    }

    pub fn add_internal_request(&mut self, floor: Floor) {
        self.add_request(floor);
    }

    fn add_request(&mut self, floor: Floor) {
        if !self.pending_requests.contains(&floor) {
            self.pending_requests.push(floor);
        }
    }

    /// Floors requested but not yet handed to the car
    pub fn get_active_calls(&self) -> &[Floor] {
        return &self.pending_requests;
    }

    pub fn handle_requests(&mut self) {
        for floor in self.pending_requests.drain(..) {
            self.elevator.call(floor);
        }
    }

    pub fn run_tick(&mut self, dt: f64, panels: &mut FloorPanels, roster: &mut Roster, logger: &mut Logger) {
        self.time += dt;
        self.handle_requests();
        self.elevator.step(dt, panels);
        self.process_events(roster, logger);
        self.update_passengers(roster, logger);
    }

    /// Drains everything the car reported this tick into the log, the display and the roster.
    pub fn process_events(&mut self, roster: &mut Roster, logger: &mut Logger) {
        let events: Vec<ElevatorEvent> = self.event_rx.try_iter().collect();
        for event in events {
            match event {
                ElevatorEvent::TargetAdded { floor } => {
                    self.log_event(logger, &format!("Target floor {} added", floor), LogLevel::Debug);
                }
                ElevatorEvent::DirectionChanged { dirn } => {
                    self.display.execute_command(DisplayCommand::DirectionLight { dirn: dirn });
                    self.log_event(logger, &format!("Direction changed to {}", dirn), LogLevel::Debug);
                }
                ElevatorEvent::FloorPassed { floor } => {
                    self.display.execute_command(DisplayCommand::FloorLight { floor: floor });
                }
                ElevatorEvent::Arrived { floor } => {
                    self.display.execute_command(DisplayCommand::FloorLight { floor: floor });
                    self.log_event(logger, &format!("Arrived at floor {}", floor), LogLevel::Info);
                }
                ElevatorEvent::DoorChanged { status } => {
                    self.display.execute_command(DisplayCommand::DoorLight { status: status });
                    self.log_event(logger, &format!("Door {}", status.as_str()), LogLevel::Debug);
                }
                ElevatorEvent::PassengerBoarded { id, floor, destination } => {
                    if let Some(passenger) = roster.get_mut(id) {
                        passenger.enter_elevator();
                        passenger.select_floor(destination);
                    }
                    self.riders.insert(id);
                    self.log_event(
                        logger,
                        &format!("Passenger {} boarded at floor {} for floor {}", id, floor, destination),
                        LogLevel::Info,
                    );
                }
                ElevatorEvent::PassengerAlighted { id, floor } => {
                    if let Some(passenger) = roster.get_mut(id) {
                        passenger.exit_elevator();
                    }
                    self.riders.remove(&id);
                    self.log_event(logger, &format!("Passenger {} exited at floor {}", id, floor), LogLevel::Info);
                }
                ElevatorEvent::Overloaded { weight, limit } => {
                    self.display.execute_command(DisplayCommand::ErrorMessage {
                        msg: "Overload".to_string(),
                    });
                    self.log_event(
                        logger,
                        &format!("Overloaded: {:.1} kg of {:.1} kg", weight, limit),
                        LogLevel::Warning,
                    );
                }
                ElevatorEvent::EmergencyActivated => {
                    self.display.execute_command(DisplayCommand::ErrorMessage {
                        msg: "Emergency".to_string(),
                    });
                    self.log_event(logger, "Emergency activated", LogLevel::Error);
                }
                ElevatorEvent::EmergencyReset => {
                    self.display.execute_command(DisplayCommand::ClearError);
                    self.log_event(logger, "Emergency reset", LogLevel::Warning);
                }
            }
        }
        if !self.elevator.check_overload() && !self.elevator.is_emergency() {
            self.display.execute_command(DisplayCommand::ClearError);
        }
    }

    /// Lets passengers without a queued hall call walk in and out while the doors are open.
    pub fn update_passengers(&mut self, roster: &mut Roster, logger: &mut Logger) {
        let floor = self.elevator.get_floor();
        if !self.elevator.doors_open_at(floor) {
            return;
        }

        let mut exits = Vec::new();
        for id in self.riders.iter() {
            if let Some(passenger) = roster.get_mut(*id) {
                if passenger.inside && passenger.destination == Some(floor) {
                    passenger.exit_elevator();
                    exits.push(*id);
                }
            }
        }
        for id in exits {
            self.riders.remove(&id);
            self.elevator.release(id);
            self.log_event(logger, &format!("Passenger {} exited at floor {}", id, floor), LogLevel::Info);
        }

        let mut entries = Vec::new();
        for passenger in roster.iter_mut() {
            if !passenger.waiting || passenger.hall_call.is_some() || passenger.current_floor != floor {
                continue;
            }
            // Nobody steps in before knowing where to go
            let dest = match passenger.intended.filter(|&d| d != floor) {
                Some(dest) => dest,
                None => continue,
            };
            passenger.enter_elevator();
            passenger.select_floor(dest);
            entries.push((passenger.id, passenger.weight, dest));
        }
        for (id, weight, dest) in entries {
            self.riders.insert(id);
            self.elevator.admit(Rider {
                id: id,
                weight: weight,
                destination: dest,
            });
            self.add_internal_request(dest);
            self.log_event(
                logger,
                &format!("Passenger {} entered at floor {} for floor {}", id, floor, dest),
                LogLevel::Info,
            );
        }
    }

    pub fn log_event(&self, logger: &mut Logger, event: &str, level: LogLevel) {
        logger.log(&format!("Elevator {}: {}", self.id, event), level);
    }

    /// Drops pending requests and the targets of the car. Riders still inside keep their
    /// destinations.
    pub fn reset(&mut self) {
        self.pending_requests.clear();
        self.elevator.clear_targets();
        self.elevator.recall_destinations();
        self.time = 0.0;
    }
}
