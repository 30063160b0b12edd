use serde;

use crate::floor_panel::panel::{FloorPanel, FloorPanels, HallCall};
use crate::local_elevator::controller::Controller;
use crate::local_elevator::elevio::buttons::{CallButton, CallDirection};
use crate::local_elevator::elevio::elev::{Direction, Floor};
use crate::order_assigner::order_assigner::{DispatchStrategy, FirstController};
use crate::passenger::roster::{Passenger, PassengerId, Roster};
use crate::util::config::{ElevatorSettings, SimConfig};
use crate::util::logger::{Clock, Logger};

/// What the system reports about one car
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElevatorStatus {
    pub id: usize,
    pub current_floor: Floor,
    pub direction: Direction,
}

/// The whole building: every car, one panel per floor, the passengers and the clock.
pub struct ElevatorSystem {
    min_floor: Floor,
    max_floor: Floor,
    controllers: Vec<Controller>,
    panels: FloorPanels,
    roster: Roster,
    logger: Logger,
    strategy: Box<dyn DispatchStrategy>,
    time: f64,
}

impl ElevatorSystem {
    pub fn new(min_floor: Floor, max_floor: Floor, logger: Logger) -> ElevatorSystem {
        ElevatorSystem::with_strategy(min_floor, max_floor, logger, Box::new(FirstController))
    }

    pub fn with_strategy(
        min_floor: Floor,
        max_floor: Floor,
        logger: Logger,
        strategy: Box<dyn DispatchStrategy>,
    ) -> ElevatorSystem {
        ElevatorSystem {
            min_floor: min_floor,
            max_floor: max_floor,
            controllers: Vec::new(),
            panels: FloorPanels::new(),
            roster: Roster::new(),
            logger: logger,
            strategy: strategy,
            time: 0.0,
        }
    }

    /// Builds panels and every configured car.
    pub fn from_config(config: &SimConfig) -> ElevatorSystem {
        let logger = Logger::new(config.log_level, Clock::Simulated(0.0));
        let mut system = ElevatorSystem::new(config.min_floor, config.max_floor, logger);
        system.populate_panels();
        for settings in config.elevators.iter() {
            system.add_controller(settings);
        }
        return system;
    }

    pub fn populate_panels(&mut self) {
        self.panels.populate(self.min_floor, self.max_floor);
        self.logger.debug(&format!(
            "Populated floor panels {}..={}",
            self.min_floor, self.max_floor
        ));
    }

    /// Registers a new car and returns its id.
    pub fn add_controller(&mut self, settings: &ElevatorSettings) -> usize {
        let id = self.controllers.len() + 1;
        self.controllers.push(Controller::with_settings(id, settings));
        self.logger.info(&format!(
            "Added elevator {} serving floors {}..={}",
            id, settings.min_floor, settings.max_floor
        ));
        return id;
    }

    pub fn add_passenger(&mut self, weight: f64, floor: Floor) -> PassengerId {
        let id = self.roster.add(weight, floor);
        self.logger
            .debug(&format!("Passenger {} appeared at floor {}", id, floor));
        return id;
    }

    /// A passenger presses the hall button towards `destination`: they start waiting, the
    /// call is queued on their floor panel and dispatched. False if nothing was called.
    pub fn call_elevator(&mut self, passenger: PassengerId, destination: Floor) -> bool {
        let (floor, weight, direction) = match self.roster.get_mut(passenger) {
            Some(p) if !p.inside => match CallDirection::between(p.current_floor, destination) {
                Some(direction) => (p.current_floor, p.weight, direction),
                None => return false,
            },
            _ => return false,
        };
        let panel = match self.panels.get_mut(floor) {
            Some(panel) if panel.has_button(direction) && destination >= self.min_floor && destination <= self.max_floor => panel,
            _ => {
                self.logger.warning(&format!(
                    "Passenger {} cannot call from floor {} to floor {}",
                    passenger, floor, destination
                ));
                return false;
            }
        };
        panel.enqueue(HallCall {
            passenger: passenger,
            weight: weight,
            destination: destination,
            direction: direction,
        });
        if let Some(p) = self.roster.get_mut(passenger) {
            p.call_elevator(direction);
            p.intended = Some(destination);
        }
        self.logger.info(&format!(
            "Passenger {} called {} at floor {}",
            passenger, direction, floor
        ));
        self.dispatch_request(floor, direction);
        return true;
    }

    /// Hands a hall call to the car the dispatch strategy picks.
    pub fn dispatch_request(&mut self, floor: Floor, direction: CallDirection) {
        let call = CallButton {
            floor: floor,
            call: direction,
        };
        let cars: Vec<_> = self.controllers.iter().map(|c| c.elevator().get_info()).collect();
        match self.strategy.choose(&call, &cars) {
            Some(index) if index < self.controllers.len() => {
                let controller = &mut self.controllers[index];
                controller.add_external_request(floor);
                self.logger.info(&format!(
                    "Dispatched external call for floor {} to elevator {}",
                    floor, controller.id
                ));
            }
            _ => {
                self.logger.warning(&format!(
                    "No elevator available for call at floor {} ({})",
                    floor,
                    self.strategy.name()
                ));
            }
        }
    }

    /// Advances the clock once, then every car in registration order.
    pub fn run_tick(&mut self, dt: f64) {
        self.time += dt;
        self.logger.set_time(self.time);
        for controller in self.controllers.iter_mut() {
            controller.run_tick(dt, &mut self.panels, &mut self.roster, &mut self.logger);
        }
    }

    pub fn get_elevator_status(&self) -> Vec<ElevatorStatus> {
        return self
            .controllers
            .iter()
            .map(|c| ElevatorStatus {
                id: c.id,
                current_floor: c.elevator().get_floor(),
                direction: c.elevator().get_dirn(),
            })
            .collect();
    }

    /// Puts car `car_id` into or out of emergency stop. False if there is no such car.
    pub fn emergency(&mut self, car_id: usize, on: bool) -> bool {
        let controller = match self.controllers.iter_mut().find(|c| c.id == car_id) {
            Some(controller) => controller,
            None => return false,
        };
        if on {
            controller.elevator_mut().activate_emergency();
            self.logger
                .error(&format!("Emergency stop requested for elevator {}", car_id));
        } else {
            controller.elevator_mut().reset_emergency();
            self.logger
                .warning(&format!("Emergency cleared for elevator {}", car_id));
        }
        return true;
    }

    pub fn passenger(&self, id: PassengerId) -> Option<&Passenger> {
        return self.roster.get(id);
    }

    pub fn roster(&self) -> &Roster {
        return &self.roster;
    }

    pub fn panel(&self, floor: Floor) -> Option<&FloorPanel> {
        return self.panels.get(floor);
    }

    pub fn controllers(&self) -> &[Controller] {
        return &self.controllers;
    }

    pub fn controller(&self, car_id: usize) -> Option<&Controller> {
        return self.controllers.iter().find(|c| c.id == car_id);
    }

    pub fn logger(&self) -> &Logger {
        return &self.logger;
    }

    pub fn logger_mut(&mut self) -> &mut Logger {
        return &mut self.logger;
    }

    pub fn time(&self) -> f64 {
        return self.time;
    }

    pub fn floor_range(&self) -> (Floor, Floor) {
        return (self.min_floor, self.max_floor);
    }

    /// Drops every pending request, target and queued hall call and restarts the clock.
    /// Nobody is waiting anymore, riders inside are still taken to their floors.
    pub fn reset(&mut self) {
        for controller in self.controllers.iter_mut() {
            controller.reset();
        }
        if !self.panels.is_empty() {
            self.panels.populate(self.min_floor, self.max_floor);
        }
        for passenger in self.roster.iter_mut() {
            passenger.waiting = false;
            passenger.hall_call = None;
        }
        self.time = 0.0;
        self.logger.set_time(0.0);
        self.logger.info("ElevatorSystem reset");
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::logger::LogLevel;

    fn setup_system(cars: usize) -> ElevatorSystem {
        let logger = Logger::new(LogLevel::Debug, Clock::Simulated(0.0));
        let mut system = ElevatorSystem::new(1, 5, logger);
        system.populate_panels();
        let mut settings = ElevatorSettings::with_range(1, 5);
        settings.door_open_duration = 1.0;
        for _ in 0..cars {
            system.add_controller(&settings);
        }
        return system;
    }

    fn logged(system: &ElevatorSystem, needle: &str) -> bool {
        return system
            .logger()
            .show_history(None)
            .iter()
            .any(|entry| entry.contains(needle));
    }

    #[test]
    fn it_populates_one_panel_per_floor() {
        let system = setup_system(0);
        for floor in 1..=5 {
            assert!(system.panel(floor).is_some());
        }
        assert!(system.panel(6).is_none());
        assert!(!system.panel(1).unwrap().has_button(CallDirection::Down));
        assert!(!system.panel(5).unwrap().has_button(CallDirection::Up));
    }

    #[test]
    fn it_dispatches_to_first_controller() {
        let mut system = setup_system(1);
        system.dispatch_request(3, CallDirection::Up);
        assert_eq!(system.controllers()[0].get_active_calls(), &[3]);
        assert!(logged(&system, "Dispatched external call for floor 3"));
    }

    #[test]
    fn it_warns_when_no_controller_is_registered() {
        let mut system = setup_system(0);
        system.dispatch_request(3, CallDirection::Down);
        assert!(logged(&system, "WARNING: No elevator available for call at floor 3"));
    }

    #[test]
    fn it_reports_status_per_car() {
        let mut system = setup_system(2);
        system.dispatch_request(4, CallDirection::Down);
        system.run_tick(1.0);
        let status = system.get_elevator_status();
        assert_eq!(status.len(), 2);
        assert_eq!(
            status[0],
            ElevatorStatus {
                id: 1,
                current_floor: 2,
                direction: Direction::Up
            }
        );
        assert_eq!(status[1].current_floor, 1);
        assert_eq!(status[1].direction, Direction::Idle);
    }

    #[test]
    fn it_advances_clock_and_log_time() {
        let mut system = setup_system(1);
        system.run_tick(0.5);
        system.run_tick(0.5);
        assert_eq!(system.time(), 1.0);
        system.logger_mut().info("tick");
        assert!(logged(&system, "[1.0] INFO: tick"));
    }

    #[test]
    fn it_carries_a_passenger_from_call_to_destination() {
        let mut system = setup_system(1);
        let id = system.add_passenger(75.0, 3);
        assert!(system.call_elevator(id, 1));
        assert!(system.passenger(id).unwrap().waiting);
        assert!(system.panel(3).unwrap().indicator_down());
        for _ in 0..20 {
            system.run_tick(1.0);
            let p = system.passenger(id).unwrap();
            assert!(!(p.waiting && p.inside));
        }
        let p = system.passenger(id).unwrap();
        assert_eq!(p.current_floor, 1);
        assert!(!p.inside);
        assert!(!p.waiting);
        assert_eq!(p.destination, None);
        assert!(!system.panel(3).unwrap().indicator_down());
        assert!(logged(&system, "Passenger P0 boarded at floor 3 for floor 1"));
        assert!(logged(&system, "Passenger P0 exited at floor 1"));
        assert!(system.controllers()[0].elevator().get_manifest().is_empty());
    }

    #[test]
    fn it_refuses_calls_that_go_nowhere() {
        let mut system = setup_system(1);
        let id = system.add_passenger(75.0, 2);
        assert!(!system.call_elevator(id, 2));
        assert!(!system.call_elevator(id, 9));
        assert!(!system.call_elevator(PassengerId(42), 3));
        assert!(!system.passenger(id).unwrap().waiting);
        assert!(system.controllers()[0].get_active_calls().is_empty());
    }

    #[test]
    fn it_freezes_and_recovers_a_car() {
        let mut system = setup_system(1);
        system.dispatch_request(5, CallDirection::Down);
        system.run_tick(1.0);
        assert!(system.emergency(1, true));
        let floor = system.get_elevator_status()[0].current_floor;
        for _ in 0..3 {
            system.run_tick(1.0);
        }
        assert_eq!(system.get_elevator_status()[0].current_floor, floor);
        assert!(system.controllers()[0].display().render().contains("Emergency"));
        assert!(system.emergency(1, false));
        assert!(!system.emergency(9, true));
        system.dispatch_request(4, CallDirection::Down);
        for _ in 0..10 {
            system.run_tick(1.0);
        }
        assert_eq!(system.get_elevator_status()[0].current_floor, 4);
    }

    #[test]
    fn it_resets_requests_and_clock() {
        let mut system = setup_system(1);
        let id = system.add_passenger(60.0, 4);
        system.call_elevator(id, 2);
        system.run_tick(1.0);
        system.reset();
        assert_eq!(system.time(), 0.0);
        assert!(system.controllers()[0].get_active_calls().is_empty());
        assert!(system.controllers()[0].elevator().get_targets().is_empty());
        assert_eq!(system.panel(4).unwrap().waiting_count(), 0);
        assert!(!system.passenger(id).unwrap().waiting);
        assert!(logged(&system, "ElevatorSystem reset"));
    }

    #[test]
    fn it_builds_from_config() {
        let config = SimConfig::from_json(
            r#"{ "min_floor": 0, "max_floor": 3,
                 "elevators": [ { "min_floor": 0, "max_floor": 3 }, { "min_floor": 0, "max_floor": 3 } ] }"#,
        )
        .unwrap();
        let system = ElevatorSystem::from_config(&config);
        assert_eq!(system.controllers().len(), 2);
        assert_eq!(system.floor_range(), (0, 3));
        assert!(system.panel(0).is_some());
        assert_eq!(system.get_elevator_status()[1].current_floor, 0);
    }

    #[test]
    fn it_serves_a_call_passed_while_heading_the_other_way() {
        let mut system = setup_system(1);
        let up = system.add_passenger(70.0, 1);
        let down = system.add_passenger(80.0, 3);
        assert!(system.call_elevator(up, 5));
        assert!(system.call_elevator(down, 1));
        for _ in 0..60 {
            system.run_tick(0.5);
        }
        assert_eq!(system.passenger(up).unwrap().current_floor, 5);
        let p = system.passenger(down).unwrap();
        assert_eq!(p.current_floor, 1);
        assert!(!p.waiting);
        assert!(!p.inside);
        assert_eq!(system.panel(3).unwrap().waiting_count(), 0);
        assert!(!system.panel(3).unwrap().indicator_down());
        assert!(system.controllers()[0].elevator().is_idle());
    }

    #[test]
    fn it_still_delivers_riders_after_reset() {
        let mut system = setup_system(1);
        let id = system.add_passenger(70.0, 1);
        assert!(system.call_elevator(id, 5));
        while !system.passenger(id).unwrap().inside {
            system.run_tick(0.5);
        }
        system.reset();
        assert_eq!(system.controllers()[0].elevator().get_targets(), &[5]);
        for _ in 0..30 {
            system.run_tick(0.5);
        }
        let p = system.passenger(id).unwrap();
        assert!(!p.inside);
        assert_eq!(p.current_floor, 5);
        assert!(system.controllers()[0].elevator().get_manifest().is_empty());
    }
}
