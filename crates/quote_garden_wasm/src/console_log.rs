//! `log` backend writing to the browser devtools console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;
use quote_garden_core::logging::normalize_level;
use wasm_bindgen::JsValue;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;
static ACTIVE_LEVEL: OnceCell<&'static str> = OnceCell::new();

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!(
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        ));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Routes `log` records to the console. Same-level repeats are no-ops.
pub fn init_console_logging(level: &str) -> Result<(), String> {
    let level = normalize_level(level)?;
    let active = ACTIVE_LEVEL.get_or_try_init(|| -> Result<&'static str, String> {
        let filter: LevelFilter = level
            .parse()
            .map_err(|_| format!("invalid log level `{level}`"))?;
        log::set_logger(&LOGGER).map_err(|err| err.to_string())?;
        log::set_max_level(filter);
        Ok(level)
    })?;

    if *active != level {
        return Err(format!(
            "console logging already initialized with level `{active}`; refusing to switch to `{level}`"
        ));
    }
    Ok(())
}
