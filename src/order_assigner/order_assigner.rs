use crate::local_elevator::elevio::buttons::CallButton;
use crate::local_elevator::fsm::elevatorfsm::ElevatorInfo;

/// Decides which car answers a hall call.
/// `cars` holds one snapshot per registered controller, in registration order. The returned
/// index points into that slice; `None` drops the call.
pub trait DispatchStrategy {
    fn choose(&mut self, call: &CallButton, cars: &[ElevatorInfo]) -> Option<usize>;

    fn name(&self) -> &'static str;
}

/// Hands every call to the first registered car
#[derive(Copy, Clone, Debug, Default)]
pub struct FirstController;

impl DispatchStrategy for FirstController {
    fn choose(&mut self, _call: &CallButton, cars: &[ElevatorInfo]) -> Option<usize> {
        if cars.is_empty() {
            return None;
        }
        return Some(0);
    }

    fn name(&self) -> &'static str {
        "first-controller"
    }
}
