//! Core configuration for motionkit-core.

use serde::{Deserialize, Serialize};

/// Capacity hints for keyframe backing stores.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Initial capacity for per-attribute keyframe lists.
    pub keyframe_capacity: usize,
    /// Initial capacity for per-owner cache entries.
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keyframe_capacity: 10,
            cache_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip() {
        let cfg = Config {
            keyframe_capacity: 32,
            cache_capacity: 128,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.keyframe_capacity, 32);
        assert_eq!(back.cache_capacity, 128);
    }

    #[test]
    fn defaults_fill_missing_fields_explicitly() {
        // hosts pass full config objects; a partial one is a parse error
        let err = serde_json::from_str::<Config>("{\"keyframe_capacity\": 4}");
        assert!(err.is_err());
    }
}
