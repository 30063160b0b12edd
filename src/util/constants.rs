pub const MIN_FLOOR: i32 = 1;
pub const MAX_FLOOR: i32 = 10;

pub const DOOR_OPEN_TIME: f64 = 3.0;
pub const ELEVATOR_SPEED: f64 = 1.0;
pub const WEIGHT_LIMIT_KG: f64 = 1600.0;

pub const TICK_DURATION: f64 = 1.0;
pub const NUM_TICKS: usize = 30;
pub const ARRIVAL_PROBABILITY: f64 = 0.3;
pub const RNG_SEED: u64 = 47;

/// Floors closer than this to a target are considered aligned with it
pub const FLOOR_EPSILON: f64 = 1e-9;
