//! Startup configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `SLIDETOE_CLOCK_SECS` | 180 | Seconds on each player's clock |
//! | `SLIDETOE_TRACE_PATH` | unset | Append a JSON-lines trace of every screen update |
//! | `SLIDETOE_LOG_PATH` | unset | Log file; logging is off without it |
//! | `SLIDETOE_LOG` | `info` | `tracing` filter directives |

use std::path::PathBuf;

use crate::types::DEFAULT_CLOCK_SECS;

pub const CLOCK_SECS_VAR: &str = "SLIDETOE_CLOCK_SECS";
pub const TRACE_PATH_VAR: &str = "SLIDETOE_TRACE_PATH";
pub const LOG_PATH_VAR: &str = "SLIDETOE_LOG_PATH";
pub const LOG_FILTER_VAR: &str = "SLIDETOE_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub clock_secs: u32,
    pub trace_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            clock_secs: DEFAULT_CLOCK_SECS,
            trace_path: None,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let clock_secs = get(CLOCK_SECS_VAR)
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&secs| secs > 0)
            .unwrap_or(DEFAULT_CLOCK_SECS);

        Self {
            clock_secs,
            trace_path: get(TRACE_PATH_VAR).map(PathBuf::from),
            log_path: get(LOG_PATH_VAR).map(PathBuf::from),
            log_filter: get(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]), AppConfig::default());
        assert_eq!(AppConfig::default().clock_secs, 180);
    }

    #[test]
    fn test_reads_all_values() {
        let cfg = config(&[
            (CLOCK_SECS_VAR, "60"),
            (TRACE_PATH_VAR, "/tmp/trace.jsonl"),
            (LOG_PATH_VAR, " /tmp/slidetoe.log "),
            (LOG_FILTER_VAR, "debug"),
        ]);
        assert_eq!(cfg.clock_secs, 60);
        assert_eq!(cfg.trace_path, Some(PathBuf::from("/tmp/trace.jsonl")));
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/slidetoe.log")));
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn test_bad_clock_falls_back() {
        assert_eq!(config(&[(CLOCK_SECS_VAR, "0")]).clock_secs, 180);
        assert_eq!(config(&[(CLOCK_SECS_VAR, "-5")]).clock_secs, 180);
        assert_eq!(config(&[(CLOCK_SECS_VAR, "soon")]).clock_secs, 180);
    }

    #[test]
    fn test_blank_paths_are_unset() {
        let cfg = config(&[(TRACE_PATH_VAR, "   "), (LOG_PATH_VAR, "")]);
        assert_eq!(cfg.trace_path, None);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _cfg = AppConfig::from_env();
    }
}
