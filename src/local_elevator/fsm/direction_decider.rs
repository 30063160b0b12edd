use crate::local_elevator::elevio::elev::{Direction, Floor};
use crate::util::constants::FLOOR_EPSILON;

/// Direction the car has to travel from `position` to reach `target`. Between floors this
/// agrees with comparing against the last floor passed.
pub fn choose_direction(position: f64, target: Option<Floor>) -> Direction {
    let target = match target {
        Some(t) => f64::from(t),
        None => return Direction::Idle,
    };
    if target > position + FLOOR_EPSILON {
        Direction::Up
    } else if target < position - FLOOR_EPSILON {
        Direction::Down
    } else {
        Direction::Idle
    }
}

/// Position after travelling `dt` at `speed` in `dirn`.
pub fn advance(position: f64, dirn: Direction, speed: f64, dt: f64) -> f64 {
    return position + dirn.signum() * speed * dt;
}

/// The last floor passed in the direction of travel: floor rounding upwards, ceiling
/// rounding downwards.
pub fn floor_at(position: f64, dirn: Direction) -> Floor {
    let nearest = position.round();
    if (position - nearest).abs() < FLOOR_EPSILON {
        return nearest as Floor;
    }
    match dirn {
        Direction::Down => position.ceil() as Floor,
        Direction::Up | Direction::Idle => position.floor() as Floor,
    }
}

/// True once `position` has reached or crossed `target` travelling in `dirn`.
pub fn should_stop(position: f64, dirn: Direction, target: Floor) -> bool {
    let target = f64::from(target);
    match dirn {
        Direction::Up => position >= target - FLOOR_EPSILON,
        Direction::Down => position <= target + FLOOR_EPSILON,
        Direction::Idle => (position - target).abs() < FLOOR_EPSILON,
    }
}

pub fn is_aligned(position: f64, floor: Floor) -> bool {
    return (position - f64::from(floor)).abs() < FLOOR_EPSILON;
}
