use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use elevator::local_elevator::elevio::elev::Floor;
use elevator::system::elevator_system::ElevatorSystem;
use elevator::util::config::{ConfigError, SimConfig};

/// Lets a new passenger appear on a random floor and call towards another random floor.
fn spawn_passenger(system: &mut ElevatorSystem, rng: &mut StdRng) {
    let (min_floor, max_floor) = system.floor_range();
    if min_floor == max_floor {
        return;
    }
    let floor: Floor = rng.gen_range(min_floor, max_floor + 1);
    let mut destination: Floor = rng.gen_range(min_floor, max_floor + 1);
    while destination == floor {
        destination = rng.gen_range(min_floor, max_floor + 1);
    }
    let weight: f64 = rng.gen_range(50.0, 100.0);
    let id = system.add_passenger(weight, floor);
    system.call_elevator(id, destination);
    println!("Passenger {} at floor {} wants to go to floor {}", id, floor, destination);
}

fn main() -> Result<(), ConfigError> {
    let config = SimConfig::get()?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut system = ElevatorSystem::from_config(&config);
    println!(
        "Simulation started: {} elevator(s), floors {}..={}",
        system.controllers().len(),
        config.min_floor,
        config.max_floor
    );

    for tick in 0..config.num_ticks {
        if rng.gen_bool(config.arrival_probability) {
            spawn_passenger(&mut system, &mut rng);
        }
        system.run_tick(config.tick_duration);

        match serde_json::to_string(&system.get_elevator_status()) {
            Ok(status) => println!("[tick {:>3} | t={:.1}] {}", tick, system.time(), status),
            Err(e) => println!("Could not serialize status: {}", e),
        }
        for controller in system.controllers() {
            println!("  Elevator {}: {}", controller.id, controller.display().render());
        }
    }

    println!("Last log entries:");
    for entry in system.logger().show_history(Some(10)) {
        println!("  {}", entry);
    }

    if let Some(path) = &config.log_file {
        system.logger().export(path)?;
        println!("Log written to {}", path);
    }
    Ok(())
}
