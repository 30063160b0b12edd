use serde;
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::local_elevator::elevio::elev::Floor;
use crate::util::constants as setting;
use crate::util::logger::LogLevel;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Physical parameters of one car
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ElevatorSettings {
    pub min_floor: Floor,
    pub max_floor: Floor,
    /// Floor the car starts at, `min_floor` when missing
    pub start_floor: Option<Floor>,
    pub speed: f64,
    pub weight_limit: f64,
    pub door_open_duration: f64,
}

impl Default for ElevatorSettings {
    fn default() -> Self {
        ElevatorSettings {
            min_floor: setting::MIN_FLOOR,
            max_floor: setting::MAX_FLOOR,
            start_floor: None,
            speed: setting::ELEVATOR_SPEED,
            weight_limit: setting::WEIGHT_LIMIT_KG,
            door_open_duration: setting::DOOR_OPEN_TIME,
        }
    }
}

impl ElevatorSettings {
    pub fn with_range(min_floor: Floor, max_floor: Floor) -> ElevatorSettings {
        ElevatorSettings {
            min_floor: min_floor,
            max_floor: max_floor,
            ..ElevatorSettings::default()
        }
    }

    pub fn starting_at(mut self, floor: Floor) -> ElevatorSettings {
        self.start_floor = Some(floor);
        self
    }

    pub fn initial_floor(&self) -> Floor {
        let floor = self.start_floor.unwrap_or(self.min_floor);
        return floor.max(self.min_floor).min(self.max_floor);
    }
}

/// Everything the simulation binary needs, read from a json file
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub min_floor: Floor,
    pub max_floor: Floor,
    pub elevators: Vec<ElevatorSettings>,
    pub tick_duration: f64,
    pub num_ticks: usize,
    pub arrival_probability: f64,
    pub seed: u64,
    pub log_level: LogLevel,
    pub log_file: Option<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            min_floor: setting::MIN_FLOOR,
            max_floor: setting::MAX_FLOOR,
            elevators: vec![ElevatorSettings::default()],
            tick_duration: setting::TICK_DURATION,
            num_ticks: setting::NUM_TICKS,
            arrival_probability: setting::ARRIVAL_PROBABILITY,
            seed: setting::RNG_SEED,
            log_level: LogLevel::Info,
            log_file: None,
        }
    }
}

impl SimConfig {
    pub fn from_json(contents: &str) -> Result<SimConfig, ConfigError> {
        let config: SimConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SimConfig, ConfigError> {
        let contents = fs::read_to_string(path)?;
        SimConfig::from_json(&contents)
    }

    /// Reads the file given with `--config <path>`, or falls back to the defaults.
    pub fn get() -> Result<SimConfig, ConfigError> {
        let args: Vec<String> = env::args().collect();
        match config_path_arg(&args) {
            Some(path) => SimConfig::from_file(path),
            None => {
                println!("No configuration file provided, using default settings...");
                Ok(SimConfig::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_floor > self.max_floor {
            return Err(ConfigError::Invalid(format!(
                "min_floor {} is above max_floor {}",
                self.min_floor, self.max_floor
            )));
        }
        if self.elevators.is_empty() {
            return Err(ConfigError::Invalid("no elevators configured".to_string()));
        }
        if self.tick_duration <= 0.0 {
            return Err(ConfigError::Invalid("tick_duration must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.arrival_probability) {
            return Err(ConfigError::Invalid(
                "arrival_probability must be within 0..=1".to_string(),
            ));
        }
        for (i, elev) in self.elevators.iter().enumerate() {
            if elev.min_floor > elev.max_floor {
                return Err(ConfigError::Invalid(format!("elevator {} has an empty range", i)));
            }
            if elev.speed <= 0.0 || elev.door_open_duration <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "elevator {} needs a positive speed and door time",
                    i
                )));
            }
        }
        Ok(())
    }
}

fn config_path_arg(args: &[String]) -> Option<&str> {
    for arg_pair in args.windows(2) {
        if arg_pair[0] == "--config" {
            return Some(arg_pair[1].as_str());
        }
    }
    None
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_fills_missing_fields_with_defaults() {
        let config = SimConfig::from_json(r#"{ "max_floor": 5, "seed": 3 }"#).unwrap();
        assert_eq!(config.max_floor, 5);
        assert_eq!(config.seed, 3);
        assert_eq!(config.min_floor, setting::MIN_FLOOR);
        assert_eq!(config.elevators.len(), 1);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn it_reads_elevator_settings() {
        let config = SimConfig::from_json(
            r#"{ "elevators": [ { "max_floor": 6, "speed": 0.5, "start_floor": 3 } ],
                 "log_level": "WARNING" }"#,
        )
        .unwrap();
        let elev = &config.elevators[0];
        assert_eq!(elev.max_floor, 6);
        assert_eq!(elev.speed, 0.5);
        assert_eq!(elev.initial_floor(), 3);
        assert_eq!(config.log_level, LogLevel::Warning);
    }

    #[test]
    fn it_rejects_invalid_config() {
        assert!(matches!(
            SimConfig::from_json(r#"{ "min_floor": 4, "max_floor": 2 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{ "elevators": [] }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SimConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn it_finds_config_argument() {
        let args: Vec<String> = vec!["sim", "--config", "sim.json"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(config_path_arg(&args), Some("sim.json"));
        assert_eq!(config_path_arg(&args[..1]), None);
    }

    #[test]
    fn it_clamps_start_floor_to_range() {
        let settings = ElevatorSettings::with_range(1, 5).starting_at(9);
        assert_eq!(settings.initial_floor(), 5);
    }
}
