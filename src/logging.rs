//! Debug logging sink.
//!
//! Disabled unless `TAGFIELD_DEBUG=1`; the sink is append-only so a crashed
//! session leaves its trail intact.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::config::EnvConfig;

const DEFAULT_DEBUG_LOG_PATH: &str = "/tmp/tagfield_tui-debug.log";

static DEBUG_SINK: Lazy<Mutex<Option<File>>> = Lazy::new(|| {
    let config = EnvConfig::from_env();
    if !config.debug {
        return Mutex::new(None);
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(DEFAULT_DEBUG_LOG_PATH)
        .ok();
    Mutex::new(file)
});

/// Append one line to the debug sink. No-op when debugging is off or the
/// sink failed to open.
pub fn debug_log(message: &str) {
    let mut sink = DEBUG_SINK.lock().expect("debug sink lock poisoned");
    if let Some(file) = sink.as_mut() {
        let _ = writeln!(file, "{message}");
    }
}
