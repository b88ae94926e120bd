//! Configuration management for the cinema engine.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unparseable or out-of-range values fall back to the default silently.

use crate::layout::{DEFAULT_COLS, DEFAULT_ROWS};
use crate::types::MAX_CELLS;
use serde::{Deserialize, Serialize};
use std::env;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,cinema=debug";

/// Largest accepted `CINEMA_LAYOUT_ROWS` or `CINEMA_LAYOUT_COLS`
pub const MAX_LAYOUT_DIMENSION: usize = 1024;

const _: () = assert!(MAX_LAYOUT_DIMENSION * MAX_LAYOUT_DIMENSION <= MAX_CELLS);

/// Default cap on holder plus guests in one booking
pub const DEFAULT_MAX_PARTY_SIZE: usize = 8;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Dimensions of the standard layout given to new rooms
    pub layout: LayoutConfig,
    /// Group booking limits
    pub booking: BookingConfig,
    /// Tracing filter directive
    pub log_filter: String,
}

/// Standard layout dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Rows (default: 5)
    pub rows: usize,
    /// Columns (default: 10)
    pub cols: usize,
}

/// Group booking configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Maximum holder plus guests per booking (0 = unlimited)
    pub max_party_size: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            max_party_size: DEFAULT_MAX_PARTY_SIZE,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            booking: BookingConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `CINEMA_LAYOUT_ROWS` (default: 5, at most 1024)
    /// - `CINEMA_LAYOUT_COLS` (default: 10, at most 1024)
    /// - `CINEMA_MAX_PARTY_SIZE` (default: 8, 0 = unlimited)
    /// - `RUST_LOG` (default: `info,cinema=debug`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dimension = |key: &str, default: usize| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .filter(|value: &usize| (1..=MAX_LAYOUT_DIMENSION).contains(value))
                .unwrap_or(default)
        };

        Self {
            layout: LayoutConfig {
                rows: dimension("CINEMA_LAYOUT_ROWS", DEFAULT_ROWS),
                cols: dimension("CINEMA_LAYOUT_COLS", DEFAULT_COLS),
            },
            booking: BookingConfig {
                max_party_size: lookup("CINEMA_MAX_PARTY_SIZE")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(DEFAULT_MAX_PARTY_SIZE),
            },
            log_filter: lookup("RUST_LOG")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
