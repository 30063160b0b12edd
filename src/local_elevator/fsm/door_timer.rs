use serde;

use crate::util::constants as setting;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DoorStatus {
    Closed,
    Opening,
    Open,
    Closing,
}

impl DoorStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DoorStatus::Closed => "closed",
            DoorStatus::Opening => "opening",
            DoorStatus::Open => "open",
            DoorStatus::Closing => "closing",
        }
    }
}

/// Door of a single car, driven by simulated time instead of a wall clock.
/// * `timer` time left of the transition in flight
/// * `open_duration` time an opening or closing transition takes
/// * `blocked` set by an obstruction, only consulted when closing
/// * `emergency_locked` keeps the door from closing while the car is in emergency
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Door {
    status: DoorStatus,
    timer: f64,
    open_duration: f64,
    blocked: bool,
    emergency_locked: bool,
}

impl Door {
    pub fn new(open_duration: f64) -> Door {
        Door {
            status: DoorStatus::Closed,
            timer: 0.0,
            open_duration: open_duration,
            blocked: false,
            emergency_locked: false,
        }
    }

    /// Starts opening, also when the door is halfway through closing.
    pub fn open(&mut self) {
        self.status = DoorStatus::Opening;
        self.timer = self.open_duration;
    }

    /// Starts closing a fully open door. Does nothing while blocked or emergency locked.
    pub fn close(&mut self) {
        if self.blocked || self.emergency_locked {
            return;
        }
        if self.status == DoorStatus::Open {
            self.status = DoorStatus::Closing;
            self.timer = self.open_duration;
        }
    }

    pub fn force_open(&mut self) {
        self.status = DoorStatus::Open;
        self.timer = 0.0;
    }

    pub fn lock_emergency(&mut self) {
        self.emergency_locked = true;
    }

    pub fn unlock_emergency(&mut self) {
        self.emergency_locked = false;
    }

    pub fn set_blocked(&mut self, value: bool) {
        self.blocked = value;
    }

    pub fn tick(&mut self, dt: f64) {
        match self.status {
            DoorStatus::Opening | DoorStatus::Closing => {
                self.timer -= dt;
                if self.timer <= 0.0 {
                    self.timer = 0.0;
                    self.status = match self.status {
                        DoorStatus::Opening => DoorStatus::Open,
                        _ => DoorStatus::Closed,
                    };
                }
            }
            DoorStatus::Open | DoorStatus::Closed => {}
        }
    }

    pub fn status(&self) -> DoorStatus {
        return self.status;
    }
    pub fn timer(&self) -> f64 {
        return self.timer;
    }
    pub fn is_open(&self) -> bool {
        return self.status == DoorStatus::Open;
    }
    pub fn is_closed(&self) -> bool {
        return self.status == DoorStatus::Closed;
    }
    pub fn is_opening(&self) -> bool {
        return self.status == DoorStatus::Opening;
    }
    pub fn is_moving(&self) -> bool {
        return self.status == DoorStatus::Opening || self.status == DoorStatus::Closing;
    }
    pub fn is_blocked(&self) -> bool {
        return self.blocked;
    }
    pub fn is_emergency_locked(&self) -> bool {
        return self.emergency_locked;
    }
}

impl Default for Door {
    fn default() -> Self {
        Door::new(setting::DOOR_OPEN_TIME)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_opens_and_arms_timer() {
        let mut door = Door::new(3.0);
        door.open();
        assert_eq!(door.status(), DoorStatus::Opening);
        assert!((door.timer() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn it_completes_opening_when_timer_runs_out() {
        let mut door = Door::new(2.0);
        door.open();
        door.tick(2.5);
        assert_eq!(door.status(), DoorStatus::Open);
        assert_eq!(door.timer(), 0.0);
        assert!(door.is_open());
        assert!(!door.is_moving());
    }

    #[test]
    fn it_passes_through_opening_before_open() {
        let mut door = Door::new(2.0);
        door.open();
        let mut elapsed = 0.0;
        let mut seen_opening = 0;
        while !door.is_open() {
            assert!(door.is_opening());
            seen_opening += 1;
            door.tick(0.5);
            elapsed += 0.5;
        }
        assert_eq!(seen_opening, 4);
        assert!(elapsed >= 2.0);
    }

    #[test]
    fn it_closes_an_open_door() {
        let mut door = Door::new(1.5);
        door.open();
        door.tick(1.5);
        door.close();
        assert_eq!(door.status(), DoorStatus::Closing);
        assert!((door.timer() - 1.5).abs() < 1e-9);
        door.tick(2.0);
        assert!(door.is_closed());
        assert!(!door.is_moving());
    }

    #[test]
    fn it_reopens_while_closing() {
        let mut door = Door::new(2.0);
        door.force_open();
        door.close();
        door.tick(1.0);
        door.open();
        assert_eq!(door.status(), DoorStatus::Opening);
        assert!((door.timer() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn it_does_not_close_when_blocked() {
        let mut door = Door::new(2.0);
        door.open();
        door.tick(2.0);
        door.set_blocked(true);
        door.close();
        assert!(!door.is_moving());
        assert_eq!(door.status(), DoorStatus::Open);
        door.set_blocked(false);
        door.close();
        assert_eq!(door.status(), DoorStatus::Closing);
    }

    #[test]
    fn it_does_not_close_when_emergency_locked() {
        let mut door = Door::new(2.0);
        door.force_open();
        door.lock_emergency();
        door.close();
        assert!(door.is_open());
        door.unlock_emergency();
        assert!(door.is_open());
    }

    #[test]
    fn it_force_opens_ignoring_block_and_emergency() {
        let mut door = Door::new(5.0);
        door.set_blocked(true);
        door.lock_emergency();
        door.force_open();
        assert_eq!(door.status(), DoorStatus::Open);
        assert_eq!(door.timer(), 0.0);
    }

    #[test]
    fn it_ignores_close_on_closed_door() {
        let mut door = Door::new(2.0);
        door.close();
        assert!(door.is_closed());
        door.tick(1.0);
        assert!(door.is_closed());
    }
}
