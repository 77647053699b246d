use std::time::Duration;

use crate::types::TICK_MS;

/// Session runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Ticker cadence while a round is active.
    pub tick: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(TICK_MS),
        }
    }
}

impl EngineConfig {
    /// Read `SCRAMBLE_TICK_MS`, falling back to the 1 second default.
    pub fn from_env() -> Self {
        Self::from_tick_ms(std::env::var("SCRAMBLE_TICK_MS").ok().as_deref())
    }

    fn from_tick_ms(value: Option<&str>) -> Self {
        let tick_ms = value
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(TICK_MS);

        Self {
            tick: Duration::from_millis(tick_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_parsing() {
        assert_eq!(EngineConfig::from_tick_ms(None), EngineConfig::default());
        assert_eq!(
            EngineConfig::from_tick_ms(Some("250")).tick,
            Duration::from_millis(250)
        );
        assert_eq!(EngineConfig::from_tick_ms(Some("0")).tick, Duration::from_secs(1));
        assert_eq!(EngineConfig::from_tick_ms(Some("soon")).tick, Duration::from_secs(1));
    }
}
