use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use std::io::Write;

/// Timestamped log lines on stderr
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    /// Warnings by default, `-v` for info, `-vv` for debug
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        };
        Self { level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(
                stderr,
                "{} {:<5} {}: {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log};

    #[test]
    fn test_verbosity_levels() {
        let quiet = StderrLogger::from_verbosity(0);
        assert!(quiet.enabled(&Metadata::builder().level(Level::Warn).build()));
        assert!(!quiet.enabled(&Metadata::builder().level(Level::Info).build()));
        let chatty = StderrLogger::from_verbosity(3);
        assert!(chatty.enabled(&Metadata::builder().level(Level::Debug).build()));
    }

    #[test]
    fn test_init_installs_once() {
        assert!(StderrLogger::from_verbosity(1).init().is_ok());
        assert_eq!(log::max_level(), LevelFilter::Info);
        assert!(StderrLogger::from_verbosity(1).init().is_err());
    }
}
