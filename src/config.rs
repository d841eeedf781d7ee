//! Environment configuration.

use std::env;

use crate::theme::DisplayMode;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Forces the host display mode, overriding ambient detection.
    pub force_mode: Option<DisplayMode>,
    pub write_log: Option<String>,
    pub debug: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            force_mode: env_display_mode("TAGFIELD_FORCE_MODE"),
            write_log: env_string_opt("TAGFIELD_WRITE_LOG"),
            debug: env_flag("TAGFIELD_DEBUG"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_display_mode(key: &str) -> Option<DisplayMode> {
    match env::var(key).ok()?.trim().to_lowercase().as_str() {
        "light" => Some(DisplayMode::Light),
        "dark" => Some(DisplayMode::Dark),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::EnvConfig;
    use crate::theme::DisplayMode;
    use std::env;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults_are_unset() {
        let _lock = env_lock();
        let _g1 = set_env_guard("TAGFIELD_FORCE_MODE", None);
        let _g2 = set_env_guard("TAGFIELD_WRITE_LOG", None);
        let _g3 = set_env_guard("TAGFIELD_DEBUG", None);

        let config = EnvConfig::from_env();
        assert!(config.force_mode.is_none());
        assert!(config.write_log.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn env_values_are_picked_up() {
        let _lock = env_lock();
        let _g1 = set_env_guard("TAGFIELD_FORCE_MODE", Some("dark"));
        let _g2 = set_env_guard("TAGFIELD_WRITE_LOG", Some("/tmp/tagfield.log"));
        let _g3 = set_env_guard("TAGFIELD_DEBUG", Some("1"));

        let config = EnvConfig::from_env();
        assert_eq!(config.force_mode, Some(DisplayMode::Dark));
        assert_eq!(config.write_log.as_deref(), Some("/tmp/tagfield.log"));
        assert!(config.debug);
    }

    #[test]
    fn unknown_mode_and_empty_log_are_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard("TAGFIELD_FORCE_MODE", Some("sepia"));
        let _g2 = set_env_guard("TAGFIELD_WRITE_LOG", Some(""));

        let config = EnvConfig::from_env();
        assert!(config.force_mode.is_none());
        assert!(config.write_log.is_none());
    }
}
