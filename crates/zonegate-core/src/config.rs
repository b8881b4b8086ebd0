//! Shared, ambient configuration for the zonegate workspace.
//!
//! Every domain crate (`zonegate-auth`, `zonegate-zone`) owns its own
//! narrow `*Config` type loaded the same way: an explicit `from_env()`
//! constructor called once at the composition root and threaded down as a
//! plain value, never a global. [`CoreConfig`] holds the handful of settings
//! that are not specific to any one domain crate — today just the log level
//! the composition root uses to initialize `tracing`.

/// Process-wide settings that apply to the binary as a whole rather than to
/// any single domain component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Default `tracing` filter directive, overridden by `RUST_LOG` when set.
    pub log_level: String,
}

impl CoreConfig {
    /// Read settings from the process environment, falling back to
    /// development-friendly defaults when a variable is unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_owned()),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_default_to_info_log_level() {
        assert_eq!(CoreConfig::default().log_level, "info");
    }

    #[test]
    fn test_should_read_log_level_from_env() {
        // SAFETY: test-only, single-threaded-enough for this narrow check;
        // restored immediately so other tests in this process see the default.
        unsafe { std::env::set_var("LOG_LEVEL", "debug") };
        let config = CoreConfig::from_env();
        unsafe { std::env::remove_var("LOG_LEVEL") };
        assert_eq!(config.log_level, "debug");
    }
}
