//! Simulator configuration.
//!
//! Configuration is supplied via JSON (serde) or `SimConfig::default()`.
//! The unit-pool capacities and the register count are architectural
//! constants of the simulated machine and are not configurable; the cycle
//! ceiling is, because callers replaying long traces may want a larger
//! safety margin than the default.

use serde::Deserialize;

/// Default configuration constants.
mod defaults {
    /// Safety ceiling on simulated cycles.
    ///
    /// A run that still has instructions in flight when the ceiling is hit
    /// stops and reports the trace and statistics gathered so far;
    /// `instructionsCompleted` falling short of the trace length signals
    /// the condition to the caller.
    pub const MAX_CYCLES: u64 = 500;
}

/// Engine configuration.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::SimConfig;
///
/// let config = SimConfig::default();
/// assert_eq!(config.max_cycles, 500);
///
/// let config: SimConfig = serde_json::from_str(r#"{"max_cycles": 100}"#).unwrap();
/// assert_eq!(config.max_cycles, 100);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Cycle ceiling: the run stops here even if instructions remain in
    /// flight.
    #[serde(default = "SimConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl SimConfig {
    /// Returns the default cycle ceiling.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}
