//! Engine configuration: touch targets and pool sizing.
//! Defaults follow federation rules; override with env (see `EngineConfig::from_env`).

use crate::models::CompetitionKind;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Touches to win a pool match.
    pub pool_touches: u32,
    /// Touches to win a barrage/elimination match (individual events).
    pub bracket_touches: u32,
    /// Touches to win a barrage/elimination match (team events).
    pub team_bracket_touches: u32,
    /// Pool size tried first.
    pub initial_pool_size: usize,
    /// Pool scheduling fails when the size reaches this value.
    pub max_pool_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pool_touches: 5,
            bracket_touches: 15,
            team_bracket_touches: 45,
            initial_pool_size: 5,
            max_pool_size: 10,
        }
    }
}

impl EngineConfig {
    /// Read overrides from env: FENCING_POOL_TOUCHES, FENCING_BRACKET_TOUCHES,
    /// FENCING_TEAM_BRACKET_TOUCHES, FENCING_POOL_SIZE, FENCING_MAX_POOL_SIZE.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            pool_touches: env_or("FENCING_POOL_TOUCHES", defaults.pool_touches),
            bracket_touches: env_or("FENCING_BRACKET_TOUCHES", defaults.bracket_touches),
            team_bracket_touches: env_or(
                "FENCING_TEAM_BRACKET_TOUCHES",
                defaults.team_bracket_touches,
            ),
            initial_pool_size: env_or("FENCING_POOL_SIZE", defaults.initial_pool_size),
            max_pool_size: env_or("FENCING_MAX_POOL_SIZE", defaults.max_pool_size),
        }
    }

    pub fn bracket_touches_for(&self, kind: CompetitionKind) -> u32 {
        match kind {
            CompetitionKind::Individual => self.bracket_touches,
            CompetitionKind::Team => self.team_bracket_touches,
        }
    }
}

/// Parse env var `key`, keeping `default` when unset or unparsable.
pub fn env_or<T: FromStr + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unparsable {}={:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_events_use_team_target() {
        let c = EngineConfig::default();
        assert_eq!(c.bracket_touches_for(CompetitionKind::Individual), 15);
        assert_eq!(c.bracket_touches_for(CompetitionKind::Team), 45);
    }

    #[test]
    fn unset_env_keeps_default() {
        assert_eq!(env_or("FENCING_SURELY_UNSET_VARIABLE", 7u32), 7);
    }
}
