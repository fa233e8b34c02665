use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::target::DispatchTarget;

/// Default latency budget for the reserved deployment.
pub const DEFAULT_LATENCY_BUDGET: Duration = Duration::from_millis(4_000);

/// Default cap on wait/retry cycles against the reserved deployment. The
/// tightening budget comparison is the primary bound; this cap only catches
/// degenerate hint sequences (e.g. a server that keeps answering 0 ms).
pub const DEFAULT_MAX_WAIT_CYCLES: u32 = 8;

/// Dispatch policy and deployment wiring, constructed once at process start
/// and passed into the dispatcher. The decision logic itself performs no
/// ambient reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// The capacity-reserved, low-latency deployment tried first.
    pub primary: DispatchTarget,
    /// The pay-as-you-go deployment used once the budget is breached.
    pub fallback: DispatchTarget,
    /// Maximum total time, from the first attempt, to spend waiting on the
    /// primary deployment before redirecting to fallback.
    pub latency_budget: Duration,
    /// Handed to the transport's own internal retry wrapper. 0 disables
    /// transport-level auto-retry so the dispatch loop keeps exclusive
    /// control over rate-limit handling.
    pub max_retries: u32,
    /// Safety cap on wait cycles per call; exceeding it redirects to
    /// fallback.
    pub max_wait_cycles: u32,
}

impl DispatcherConfig {
    /// Config with the default policy for the given pair of targets.
    pub fn new(primary: DispatchTarget, fallback: DispatchTarget) -> Self {
        Self {
            primary,
            fallback,
            latency_budget: DEFAULT_LATENCY_BUDGET,
            max_retries: 0,
            max_wait_cycles: DEFAULT_MAX_WAIT_CYCLES,
        }
    }

    pub fn builder() -> DispatcherConfigBuilder {
        DispatcherConfigBuilder::new()
    }

    /// Build the config from environment variables, read once at startup:
    ///
    /// - `PTU_DEPLOYMENT` — primary deployment name (required)
    /// - `STANDARD_DEPLOYMENT` — fallback deployment name (required)
    /// - `PTU_MAX_WAIT_MS` — latency budget in milliseconds (optional)
    /// - `DISPATCH_MAX_RETRIES` — transport-level retry bound (optional)
    ///
    /// Unset or unparseable optional values fall back to the defaults.
    pub fn from_env() -> Result<Self, Error> {
        let primary = std::env::var("PTU_DEPLOYMENT")
            .map_err(|_| Error::configuration("PTU_DEPLOYMENT is not set"))?;
        let fallback = std::env::var("STANDARD_DEPLOYMENT")
            .map_err(|_| Error::configuration("STANDARD_DEPLOYMENT is not set"))?;

        let latency_budget = std::env::var("PTU_MAX_WAIT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_LATENCY_BUDGET);
        let max_retries = std::env::var("DISPATCH_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(0);

        DispatcherConfigBuilder::new()
            .primary(DispatchTarget::new(primary))
            .fallback(DispatchTarget::new(fallback))
            .latency_budget(latency_budget)
            .max_retries(max_retries)
            .build()
    }
}

/// Builder for `DispatcherConfig`. `build()` fails when a required target is
/// missing or the latency budget is zero.
#[derive(Debug, Default)]
pub struct DispatcherConfigBuilder {
    primary: Option<DispatchTarget>,
    fallback: Option<DispatchTarget>,
    latency_budget: Option<Duration>,
    max_retries: Option<u32>,
    max_wait_cycles: Option<u32>,
}

impl DispatcherConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(mut self, target: DispatchTarget) -> Self {
        self.primary = Some(target);
        self
    }

    pub fn fallback(mut self, target: DispatchTarget) -> Self {
        self.fallback = Some(target);
        self
    }

    pub fn latency_budget(mut self, budget: Duration) -> Self {
        self.latency_budget = Some(budget);
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn max_wait_cycles(mut self, max_wait_cycles: u32) -> Self {
        self.max_wait_cycles = Some(max_wait_cycles);
        self
    }

    pub fn build(self) -> Result<DispatcherConfig, Error> {
        let primary = self
            .primary
            .ok_or_else(|| Error::configuration("No primary target configured"))?;
        let fallback = self
            .fallback
            .ok_or_else(|| Error::configuration("No fallback target configured"))?;
        let latency_budget = self.latency_budget.unwrap_or(DEFAULT_LATENCY_BUDGET);
        if latency_budget.is_zero() {
            return Err(Error::configuration("latency_budget must be positive"));
        }
        Ok(DispatcherConfig {
            primary,
            fallback,
            latency_budget,
            max_retries: self.max_retries.unwrap_or(0),
            max_wait_cycles: self.max_wait_cycles.unwrap_or(DEFAULT_MAX_WAIT_CYCLES),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_new_uses_default_policy() {
        let config = DispatcherConfig::new(
            DispatchTarget::new("gpt-4o-ptu"),
            DispatchTarget::new("gpt-4o-paygo"),
        );
        assert_eq!(config.latency_budget, Duration::from_millis(4_000));
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.max_wait_cycles, DEFAULT_MAX_WAIT_CYCLES);
    }

    #[test]
    fn test_builder_requires_primary() {
        let err = DispatcherConfig::builder()
            .fallback(DispatchTarget::new("gpt-4o-paygo"))
            .build()
            .unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
        assert!(err.message.contains("primary"));
    }

    #[test]
    fn test_builder_requires_fallback() {
        let err = DispatcherConfig::builder()
            .primary(DispatchTarget::new("gpt-4o-ptu"))
            .build()
            .unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
        assert!(err.message.contains("fallback"));
    }

    #[test]
    fn test_builder_rejects_zero_budget() {
        let err = DispatcherConfig::builder()
            .primary(DispatchTarget::new("gpt-4o-ptu"))
            .fallback(DispatchTarget::new("gpt-4o-paygo"))
            .latency_budget(Duration::ZERO)
            .build()
            .unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_builder_overrides() {
        let config = DispatcherConfig::builder()
            .primary(DispatchTarget::new("gpt-4o-ptu"))
            .fallback(DispatchTarget::new("gpt-4o-paygo"))
            .latency_budget(Duration::from_millis(2_500))
            .max_retries(1)
            .max_wait_cycles(3)
            .build()
            .unwrap();
        assert_eq!(config.latency_budget, Duration::from_millis(2_500));
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.max_wait_cycles, 3);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = DispatcherConfig::new(
            DispatchTarget::new("gpt-4o-ptu"),
            DispatchTarget::new("gpt-4o-paygo"),
        );
        let json = serde_json::to_string(&config).unwrap();
        let back: DispatcherConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.primary, config.primary);
        assert_eq!(back.latency_budget, config.latency_budget);
    }

    // --- from_env ---

    #[test]
    #[serial]
    fn test_from_env_missing_primary_returns_error() {
        std::env::remove_var("PTU_DEPLOYMENT");
        std::env::remove_var("STANDARD_DEPLOYMENT");
        let err = DispatcherConfig::from_env().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
        assert!(err.message.contains("PTU_DEPLOYMENT"));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_targets_and_budget() {
        std::env::set_var("PTU_DEPLOYMENT", "gpt-4o-ptu");
        std::env::set_var("STANDARD_DEPLOYMENT", "gpt-4o-paygo");
        std::env::set_var("PTU_MAX_WAIT_MS", "2500");
        std::env::set_var("DISPATCH_MAX_RETRIES", "2");

        let config = DispatcherConfig::from_env().unwrap();
        assert_eq!(config.primary.deployment, "gpt-4o-ptu");
        assert_eq!(config.fallback.deployment, "gpt-4o-paygo");
        assert_eq!(config.latency_budget, Duration::from_millis(2_500));
        assert_eq!(config.max_retries, 2);

        std::env::remove_var("PTU_DEPLOYMENT");
        std::env::remove_var("STANDARD_DEPLOYMENT");
        std::env::remove_var("PTU_MAX_WAIT_MS");
        std::env::remove_var("DISPATCH_MAX_RETRIES");
    }

    #[test]
    #[serial]
    fn test_from_env_unparseable_budget_falls_back_to_default() {
        std::env::set_var("PTU_DEPLOYMENT", "gpt-4o-ptu");
        std::env::set_var("STANDARD_DEPLOYMENT", "gpt-4o-paygo");
        std::env::set_var("PTU_MAX_WAIT_MS", "not-a-number");

        let config = DispatcherConfig::from_env().unwrap();
        assert_eq!(config.latency_budget, DEFAULT_LATENCY_BUDGET);

        std::env::remove_var("PTU_DEPLOYMENT");
        std::env::remove_var("STANDARD_DEPLOYMENT");
        std::env::remove_var("PTU_MAX_WAIT_MS");
    }
}
