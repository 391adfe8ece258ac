//! Console Logger
//!
//! `log` backend that writes to the browser console on wasm32 and to
//! stderr elsewhere.

use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

/// `[LEVEL] message`
pub fn format_record(level: Level, message: &str) -> String {
    format!("[{}] {}", level, message)
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record.level(), &record.args().to_string());

        #[cfg(target_arch = "wasm32")]
        {
            let line = wasm_bindgen::JsValue::from_str(&line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&line),
                Level::Warn => web_sys::console::warn_1(&line),
                Level::Info => web_sys::console::info_1(&line),
                Level::Debug | Level::Trace => web_sys::console::log_1(&line),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{}", line);
    }

    fn flush(&self) {}
}

/// Install the console logger once. Later calls are ignored.
pub fn init(level: LevelFilter) {
    static LOGGER: std::sync::OnceLock<ConsoleLogger> = std::sync::OnceLock::new();
    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(level));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}
