//! Session configuration from the environment.

use civilcrm_core::material::DEFAULT_LOW_STOCK_THRESHOLD;
use tracing::warn;

/// Tunables read once at session start.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Quantity below which inventory items count as low stock.
    pub low_stock_threshold: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl SessionConfig {
    /// Read `LOW_STOCK_THRESHOLD` from the environment. An unset
    /// variable uses the default; an unparseable one is logged and
    /// ignored rather than aborting the session.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("LOW_STOCK_THRESHOLD") {
            match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => {
                    config.low_stock_threshold = value;
                }
                _ => warn!(%raw, "ignoring invalid LOW_STOCK_THRESHOLD"),
            }
        }
        config
    }
}
