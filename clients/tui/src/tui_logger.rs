use log::{LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Lines waiting to be drained into the Game Log panel
pub type LogBuffer = Arc<Mutex<VecDeque<String>>>;

const CAPACITY: usize = 100;

/// Captures `log::` records while the terminal is in raw mode
pub struct TuiLogger {
    level: LevelFilter,
    log_buffer: LogBuffer,
}

impl TuiLogger {
    pub fn new(level: LevelFilter) -> (Self, LogBuffer) {
        let log_buffer = Arc::new(Mutex::new(VecDeque::with_capacity(CAPACITY)));
        (
            TuiLogger {
                level,
                log_buffer: log_buffer.clone(),
            },
            log_buffer,
        )
    }

    /// Install as the global logger
    pub fn install(level: LevelFilter) -> Result<LogBuffer, log::SetLoggerError> {
        let (logger, buffer) = Self::new(level);
        log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(level))?;
        Ok(buffer)
    }
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let msg = format!("{}", record.args());
            if let Ok(mut buffer) = self.log_buffer.lock() {
                buffer.push_back(msg);
                if buffer.len() > CAPACITY {
                    buffer.pop_front();
                }
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    fn emit(logger: &TuiLogger, level: Level, msg: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .args(format_args!("{msg}"))
                .build(),
        );
    }

    #[test]
    fn test_filters_below_level() {
        let (logger, buffer) = TuiLogger::new(LevelFilter::Info);
        emit(&logger, Level::Info, "dealt");
        emit(&logger, Level::Debug, "hit");

        let lines: Vec<String> = buffer.lock().unwrap().iter().cloned().collect();
        assert_eq!(lines, vec!["dealt".to_string()]);
    }

    #[test]
    fn test_keeps_the_newest_lines() {
        let (logger, buffer) = TuiLogger::new(LevelFilter::Trace);
        for i in 0..CAPACITY + 5 {
            emit(&logger, Level::Info, &i.to_string());
        }

        let buffer = buffer.lock().unwrap();
        assert_eq!(buffer.len(), CAPACITY);
        assert_eq!(buffer.front().map(String::as_str), Some("5"));
    }
}
