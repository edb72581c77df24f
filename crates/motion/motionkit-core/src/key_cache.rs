//! Per-owner float cache used to persist oscillation phase across frames
//! and recompositions.

use hashbrown::HashMap;

use crate::config::Config;
use crate::ids::OwnerId;

/// Maps `(owner, attribute)` to a small vector of channel floats. Absent
/// entries read as NaN so callers can distinguish "never written" from any
/// real phase value.
#[derive(Default, Debug)]
pub struct KeyCache {
    map: HashMap<(OwnerId, String), Vec<f32>>,
}

impl KeyCache {
    pub fn new(cfg: &Config) -> Self {
        Self {
            map: HashMap::with_capacity(cfg.cache_capacity),
        }
    }

    /// NaN when the (owner, attribute, channel) triple has never been set.
    pub fn get_float_value(&self, owner: OwnerId, attribute: &str, channel: usize) -> f32 {
        match self.map.get(&(owner, attribute.to_string())) {
            Some(values) => values.get(channel).copied().unwrap_or(f32::NAN),
            None => f32::NAN,
        }
    }

    pub fn set_float_value(&mut self, owner: OwnerId, attribute: &str, channel: usize, value: f32) {
        let values = self
            .map
            .entry((owner, attribute.to_string()))
            .or_insert_with(Vec::new);
        if values.len() <= channel {
            values.resize(channel + 1, f32::NAN);
        }
        values[channel] = value;
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}
