//! Engine configuration with environment fallback.
//!
//! Programmatic configuration wins; anything left unset can come from the
//! environment (a `.env` file is honored via `dotenvy`):
//!
//! - `MIRRORGRAPH_PLACEMENT_SPREAD`: half-width of the placeholder placement
//!   square (default 1.0)
//! - `MIRRORGRAPH_PLACEMENT_SEED`: fixed RNG seed for reproducible layouts
//! - `MIRRORGRAPH_FEED_CAPACITY`: report broadcast buffer capacity

/// Sink selection for feed configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewSinkConfig {
    StdOut,
    Memory,
}

/// Placeholder placement for newly materialized nodes.
///
/// New nodes land uniformly in `[-spread, spread]` per axis. A fixed seed
/// makes placement reproducible across runs; unseeded placement draws from
/// OS entropy.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementConfig {
    pub spread: f64,
    pub seed: Option<u64>,
}

impl PlacementConfig {
    pub const DEFAULT_SPREAD: f64 = 1.0;

    #[must_use]
    pub fn new(spread: f64, seed: Option<u64>) -> Self {
        Self {
            spread: if spread.is_finite() && spread >= 0.0 {
                spread
            } else {
                Self::DEFAULT_SPREAD
            },
            seed,
        }
    }

    /// Configuration from `MIRRORGRAPH_PLACEMENT_*` variables, with defaults
    /// for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let spread = std::env::var("MIRRORGRAPH_PLACEMENT_SPREAD")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(Self::DEFAULT_SPREAD);
        let seed = std::env::var("MIRRORGRAPH_PLACEMENT_SEED")
            .ok()
            .and_then(|raw| raw.parse().ok());
        Self::new(spread, seed)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            spread: Self::DEFAULT_SPREAD,
            seed: None,
        }
    }
}

/// Update feed tuning: report broadcast capacity and initial view sinks.
#[derive(Clone, Debug)]
pub struct FeedConfig {
    pub report_capacity: usize,
    pub sinks: Vec<ViewSinkConfig>,
}

impl FeedConfig {
    pub const DEFAULT_REPORT_CAPACITY: usize = 1024;

    #[must_use]
    pub fn new(report_capacity: usize, sinks: Vec<ViewSinkConfig>) -> Self {
        Self {
            report_capacity: if report_capacity == 0 {
                Self::DEFAULT_REPORT_CAPACITY
            } else {
                report_capacity
            },
            sinks,
        }
    }

    /// Configuration from `MIRRORGRAPH_FEED_CAPACITY`, with no initial sinks.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let report_capacity = std::env::var("MIRRORGRAPH_FEED_CAPACITY")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(Self::DEFAULT_REPORT_CAPACITY);
        Self::new(report_capacity, Vec::new())
    }

    #[must_use]
    pub fn with_stdout_view() -> Self {
        Self::new(Self::DEFAULT_REPORT_CAPACITY, vec![ViewSinkConfig::StdOut])
    }

    #[must_use]
    pub fn add_sink(mut self, sink: ViewSinkConfig) -> Self {
        if !self.sinks.contains(&sink) {
            self.sinks.push(sink);
        }
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_REPORT_CAPACITY, Vec::new())
    }
}

/// Top-level engine configuration.
///
/// # Examples
///
/// ```rust
/// use mirrorgraph::config::{EngineConfig, PlacementConfig};
///
/// let config = EngineConfig::default()
///     .with_placement(PlacementConfig::new(10.0, Some(42)));
/// assert_eq!(config.placement.spread, 10.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    pub placement: PlacementConfig,
    pub feed: FeedConfig,
}

impl EngineConfig {
    /// Full configuration from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            placement: PlacementConfig::from_env(),
            feed: FeedConfig::from_env(),
        }
    }

    #[must_use]
    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn with_feed(mut self, feed: FeedConfig) -> Self {
        self.feed = feed;
        self
    }
}
