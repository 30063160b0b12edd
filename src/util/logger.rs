//! Event log of the simulation. Entries are kept in memory in emission order and can be
//! exported as a plain text file, one `[timestamp] LEVEL: message` line per entry.
use chrono::Local;
use serde;
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where entry timestamps come from
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Clock {
    /// Simulated seconds, advanced by the system every tick
    Simulated(f64),
    WallClock,
}

#[derive(Clone, Debug)]
pub struct Logger {
    logs: Vec<String>,
    enabled: bool,
    level: LogLevel,
    clock: Clock,
}

impl Logger {
    pub fn new(level: LogLevel, clock: Clock) -> Logger {
        Logger {
            logs: Vec::new(),
            enabled: true,
            level: level,
            clock: clock,
        }
    }

    pub fn log(&mut self, message: &str, level: LogLevel) {
        if !self.enabled || level < self.level {
            return;
        }
        let entry = format!("[{}] {}: {}", self.timestamp(), level, message);
        self.logs.push(entry);
    }

    pub fn debug(&mut self, message: &str) {
        self.log(message, LogLevel::Debug);
    }
    pub fn info(&mut self, message: &str) {
        self.log(message, LogLevel::Info);
    }
    pub fn warning(&mut self, message: &str) {
        self.log(message, LogLevel::Warning);
    }
    pub fn error(&mut self, message: &str) {
        self.log(message, LogLevel::Error);
    }

    fn timestamp(&self) -> String {
        match self.clock {
            Clock::Simulated(t) => format!("{:.1}", t),
            Clock::WallClock => Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        }
    }

    /// Moves the simulated clock. Has no effect on a wall clock logger.
    pub fn set_time(&mut self, time: f64) {
        if let Clock::Simulated(_) = self.clock {
            self.clock = Clock::Simulated(time);
        }
    }

    /// The last `n` entries, or all of them
    pub fn show_history(&self, n: Option<usize>) -> &[String] {
        match n {
            Some(n) if n < self.logs.len() => &self.logs[self.logs.len() - n..],
            _ => &self.logs,
        }
    }

    pub fn clear(&mut self) {
        self.logs.clear();
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn level(&self) -> LogLevel {
        return self.level;
    }

    pub fn export<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut file = File::create(path)?;
        for entry in self.logs.iter() {
            writeln!(file, "{}", entry)?;
        }
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new(LogLevel::Info, Clock::Simulated(0.0))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn it_formats_timestamp_and_level() {
        let mut logger = Logger::new(LogLevel::Info, Clock::Simulated(42.0));
        logger.info("Test message");
        let logs = logger.show_history(None);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0], "[42.0] INFO: Test message");
    }

    #[test]
    fn it_drops_entries_below_level() {
        let mut logger = Logger::new(LogLevel::Warning, Clock::Simulated(0.0));
        logger.info("Info msg");
        logger.warning("Warning msg");
        let logs = logger.show_history(None);
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("Warning msg"));
    }

    #[test]
    fn it_changes_level() {
        let mut logger = Logger::new(LogLevel::Warning, Clock::Simulated(0.0));
        logger.set_level(LogLevel::Error);
        logger.warning("Warn");
        logger.error("Err");
        let logs = logger.show_history(None);
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("ERROR: Err"));
    }

    #[test]
    fn it_can_be_disabled() {
        let mut logger = Logger::default();
        logger.disable();
        logger.info("Should not log");
        assert!(logger.show_history(None).is_empty());
        logger.enable();
        logger.info("Now logs");
        assert_eq!(logger.show_history(None).len(), 1);
    }

    #[test]
    fn it_shows_last_entries_and_clears() {
        let mut logger = Logger::default();
        for i in 0..5 {
            logger.set_time(f64::from(i));
            logger.info(&format!("entry {}", i));
        }
        let last = logger.show_history(Some(2));
        assert_eq!(last.len(), 2);
        assert_eq!(last[1], "[4.0] INFO: entry 4");
        assert_eq!(logger.show_history(Some(10)).len(), 5);
        logger.clear();
        assert!(logger.show_history(None).is_empty());
    }

    #[test]
    fn it_exports_to_file() {
        let mut logger = Logger::new(LogLevel::Info, Clock::Simulated(5.0));
        logger.info("Msg1");
        let path = std::env::temp_dir().join(format!("elevator-log-{}.txt", std::process::id()));
        logger.export(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(content, "[5.0] INFO: Msg1\n");
    }

    #[test]
    fn it_stamps_wall_clock_entries() {
        let mut logger = Logger::new(LogLevel::Debug, Clock::WallClock);
        logger.set_time(12.0);
        logger.debug("now");
        assert!(logger.show_history(None)[0].ends_with("] DEBUG: now"));
        assert!(!logger.show_history(None)[0].starts_with("[12.0]"));
    }
}
