//! Pass configuration
//!
//! Every knob has a default matching the reference behavior: integrity
//! violations halt the pass, decoding stops at the market close and windows are
//! one hour long. `from_env` overrides the defaults from `ITCH_VWAP_*`
//! environment variables.

use crate::common::ItchError;
use crate::utils::NANOS_PER_HOUR;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Longest accepted window: one trading day fits in a single bucket.
pub const MAX_WINDOW_NANOS: u64 = 24 * NANOS_PER_HOUR;

/// What to do with an execution whose order reference is unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedPolicy {
    /// Halt the pass with `UnresolvedReference`.
    #[default]
    Fail,
    /// Log a warning, count the execution and continue.
    Skip,
}

/// What to do with an execution that arrives before the market opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreMarketPolicy {
    /// Halt the pass with `NoTradingWindow`.
    #[default]
    Fail,
    /// Count the execution and continue.
    Skip,
}

/// Processing pass configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassConfig {
    pub unresolved: UnresolvedPolicy,
    pub pre_market: PreMarketPolicy,
    /// Stop decoding once the end-of-market-hours event is seen.
    pub stop_at_close: bool,
    /// Drop deleted and replaced orders from the resolver.
    pub evict_closed_orders: bool,
    /// Window length in nanoseconds.
    pub window_nanos: u64,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            unresolved: UnresolvedPolicy::Fail,
            pre_market: PreMarketPolicy::Fail,
            stop_at_close: true,
            evict_closed_orders: false,
            window_nanos: NANOS_PER_HOUR,
        }
    }
}

impl PassConfig {
    pub fn with_unresolved(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved = policy;
        self
    }

    pub fn with_pre_market(mut self, policy: PreMarketPolicy) -> Self {
        self.pre_market = policy;
        self
    }

    pub fn with_stop_at_close(mut self, stop: bool) -> Self {
        self.stop_at_close = stop;
        self
    }

    pub fn with_eviction(mut self, evict: bool) -> Self {
        self.evict_closed_orders = evict;
        self
    }

    /// Set the window length in whole seconds.
    ///
    /// Lengths that overflow saturate and are rejected by `validate`.
    pub fn with_window_secs(mut self, secs: u64) -> Self {
        self.window_nanos = secs.saturating_mul(NANOS_PER_SECOND);
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), ItchError> {
        if self.window_nanos == 0 {
            return Err(ItchError::Config("window length must be positive".into()));
        }
        if self.window_nanos > MAX_WINDOW_NANOS {
            return Err(ItchError::Config(format!(
                "window length of {}ns exceeds {}ns",
                self.window_nanos, MAX_WINDOW_NANOS
            )));
        }
        Ok(())
    }

    /// Load configuration from environment variables
    ///
    /// | Variable                  | Values          |
    /// |---------------------------|-----------------|
    /// | `ITCH_VWAP_UNRESOLVED`    | `fail`, `skip`  |
    /// | `ITCH_VWAP_PRE_MARKET`    | `fail`, `skip`  |
    /// | `ITCH_VWAP_STOP_AT_CLOSE` | `true`, `false` |
    /// | `ITCH_VWAP_EVICT_CLOSED`  | `true`, `false` |
    /// | `ITCH_VWAP_WINDOW_SECS`   | 1 to 86400      |
    pub fn from_env() -> Result<Self, ItchError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from any variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ItchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("ITCH_VWAP_UNRESOLVED") {
            config.unresolved = match parse_policy("ITCH_VWAP_UNRESOLVED", &v)? {
                true => UnresolvedPolicy::Skip,
                false => UnresolvedPolicy::Fail,
            };
        }
        if let Some(v) = lookup("ITCH_VWAP_PRE_MARKET") {
            config.pre_market = match parse_policy("ITCH_VWAP_PRE_MARKET", &v)? {
                true => PreMarketPolicy::Skip,
                false => PreMarketPolicy::Fail,
            };
        }
        if let Some(v) = lookup("ITCH_VWAP_STOP_AT_CLOSE") {
            config.stop_at_close = parse_bool("ITCH_VWAP_STOP_AT_CLOSE", &v)?;
        }
        if let Some(v) = lookup("ITCH_VWAP_EVICT_CLOSED") {
            config.evict_closed_orders = parse_bool("ITCH_VWAP_EVICT_CLOSED", &v)?;
        }
        if let Some(v) = lookup("ITCH_VWAP_WINDOW_SECS") {
            let secs: u64 = v.trim().parse().map_err(|_| {
                ItchError::Config(format!("ITCH_VWAP_WINDOW_SECS: not a number: {:?}", v))
            })?;
            config.window_nanos = secs.checked_mul(NANOS_PER_SECOND).ok_or_else(|| {
                ItchError::Config(format!("ITCH_VWAP_WINDOW_SECS: {} seconds overflows", secs))
            })?;
        }

        config.validate()?;
        Ok(config)
    }
}

/// `true` for skip, `false` for fail.
fn parse_policy(key: &str, value: &str) -> Result<bool, ItchError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "skip" => Ok(true),
        "fail" => Ok(false),
        _ => Err(ItchError::Config(format!(
            "{}: expected 'fail' or 'skip', got {:?}",
            key, value
        ))),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ItchError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ItchError::Config(format!(
            "{}: expected a boolean, got {:?}",
            key, value
        ))),
    }
}
