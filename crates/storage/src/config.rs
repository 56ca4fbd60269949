//! Buffer pool configuration.

use std::fmt;
use std::str::FromStr;

use pagecache_error::{errinput, Error};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Number of references LRU-K is configured with when none is given.
pub const DEFAULT_LRU_K: usize = 3;

/// The page replacement policy a buffer pool evicts with.
///
/// Serialized by name, and parsed through [`FromStr`] so names match case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReplacementStrategy {
    Fifo,
    Lru,
    LruK,
    Clock,
    Lfu,
}

impl ReplacementStrategy {
    pub const ALL: [ReplacementStrategy; 5] = [
        ReplacementStrategy::Fifo,
        ReplacementStrategy::Lru,
        ReplacementStrategy::LruK,
        ReplacementStrategy::Clock,
        ReplacementStrategy::Lfu,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReplacementStrategy::Fifo => "FIFO",
            ReplacementStrategy::Lru => "LRU",
            ReplacementStrategy::LruK => "LRU-K",
            ReplacementStrategy::Clock => "CLOCK",
            ReplacementStrategy::Lfu => "LFU",
        }
    }
}

impl fmt::Display for ReplacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReplacementStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIFO" => Ok(ReplacementStrategy::Fifo),
            "LRU" => Ok(ReplacementStrategy::Lru),
            "LRU-K" | "LRUK" | "LRU_K" => Ok(ReplacementStrategy::LruK),
            "CLOCK" => Ok(ReplacementStrategy::Clock),
            "LFU" => Ok(ReplacementStrategy::Lfu),
            _ => Err(Error::UnsupportedStrategy(s.to_string())),
        }
    }
}

impl TryFrom<String> for ReplacementStrategy {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl From<ReplacementStrategy> for String {
    fn from(strategy: ReplacementStrategy) -> Self {
        strategy.name().to_string()
    }
}

/// Configuration for a buffer pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferPoolConfig {
    /// Number of page frames. Fixed for the lifetime of the pool.
    pub capacity: usize,
    /// Replacement policy used once every frame is occupied.
    pub strategy: ReplacementStrategy,
    /// Reference count LRU-K is labelled with.
    pub lru_k: usize,
    /// Whether unpinning a page counts as an access for recency-based policies.
    pub touch_on_unpin: bool,
    /// Whether marking an already dirty page first writes it out and reads it back.
    pub resync_on_redirty: bool,
}

impl BufferPoolConfig {
    /// Creates a configuration with `capacity` frames and the given strategy.
    pub fn new(capacity: usize, strategy: ReplacementStrategy) -> Self {
        Self {
            capacity,
            strategy,
            lru_k: DEFAULT_LRU_K,
            touch_on_unpin: true,
            resync_on_redirty: true,
        }
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// An unknown strategy name fails with `UnsupportedStrategy`, any other
    /// malformed input with `InvalidInput`.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| Error::InvalidInput(e.to_string()))?;
        if let Some(name) = value.get("strategy").and_then(serde_json::Value::as_str) {
            name.parse::<ReplacementStrategy>()?;
        }
        let config: Self =
            serde_json::from_value(value).map_err(|e| Error::InvalidInput(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_lru_k(mut self, k: usize) -> Self {
        self.lru_k = k;
        self
    }

    pub fn with_touch_on_unpin(mut self, enabled: bool) -> Self {
        self.touch_on_unpin = enabled;
        self
    }

    pub fn with_resync_on_redirty(mut self, enabled: bool) -> Self {
        self.resync_on_redirty = enabled;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return errinput!("buffer pool capacity must be > 0");
        }
        if self.lru_k == 0 {
            return errinput!("lru_k must be > 0");
        }
        Ok(())
    }
}

impl Default for BufferPoolConfig {
    fn default() -> Self {
        Self::new(16, ReplacementStrategy::Lru)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("fifo".parse::<ReplacementStrategy>(), Ok(ReplacementStrategy::Fifo));
        assert_eq!("LRU".parse::<ReplacementStrategy>(), Ok(ReplacementStrategy::Lru));
        assert_eq!(" lru-k ".parse::<ReplacementStrategy>(), Ok(ReplacementStrategy::LruK));
        assert_eq!("Clock".parse::<ReplacementStrategy>(), Ok(ReplacementStrategy::Clock));
        assert_eq!("LFU".parse::<ReplacementStrategy>(), Ok(ReplacementStrategy::Lfu));
        assert_eq!(
            "MRU".parse::<ReplacementStrategy>(),
            Err(Error::UnsupportedStrategy("MRU".to_string()))
        );
    }

    #[test]
    fn test_strategy_display_parses_back() {
        for strategy in ReplacementStrategy::ALL {
            assert_eq!(strategy.to_string().parse::<ReplacementStrategy>(), Ok(strategy));
        }
    }

    #[test]
    fn test_config_builder() {
        let config = BufferPoolConfig::new(8, ReplacementStrategy::LruK)
            .with_lru_k(2)
            .with_touch_on_unpin(false)
            .with_resync_on_redirty(false);

        assert_eq!(config.capacity, 8);
        assert_eq!(config.lru_k, 2);
        assert!(!config.touch_on_unpin);
        assert!(!config.resync_on_redirty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let config = BufferPoolConfig::new(0, ReplacementStrategy::Fifo);
        assert!(matches!(config.validate(), Err(Error::InvalidInput(_))));

        let config = BufferPoolConfig::new(4, ReplacementStrategy::LruK).with_lru_k(0);
        assert!(matches!(config.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_from_json() {
        let config =
            BufferPoolConfig::from_json(r#"{ "capacity": 3, "strategy": "CLOCK" }"#).unwrap();
        assert_eq!(config.capacity, 3);
        assert_eq!(config.strategy, ReplacementStrategy::Clock);
        assert_eq!(config.lru_k, DEFAULT_LRU_K);
        assert!(config.touch_on_unpin);

        assert_eq!(
            BufferPoolConfig::from_json(r#"{ "capacity": 3, "strategy": "MRU" }"#),
            Err(Error::UnsupportedStrategy("MRU".to_string()))
        );
        assert!(matches!(
            BufferPoolConfig::from_json(r#"{ "capacity": 3, "strategy": 7 }"#),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            BufferPoolConfig::from_json(r#"{ "capacity": 0 }"#),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_json_strategy_names_ignore_case() {
        let config =
            BufferPoolConfig::from_json(r#"{ "capacity": 2, "strategy": "clock" }"#).unwrap();
        assert_eq!(config.strategy, ReplacementStrategy::Clock);

        let config = BufferPoolConfig::from_json(r#"{ "strategy": "Lru-K" }"#).unwrap();
        assert_eq!(config.strategy, ReplacementStrategy::LruK);
        assert_eq!(config.capacity, BufferPoolConfig::default().capacity);
    }

    #[test]
    fn test_config_json_uses_strategy_names() {
        let config = BufferPoolConfig::new(4, ReplacementStrategy::LruK);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""strategy":"LRU-K""#));
        assert_eq!(BufferPoolConfig::from_json(&json), Ok(config));
    }
}
