use crate::error::{Error, Result};
use planar_layout::{LayoutOptions, Point};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Layout settings as they appear in JSON config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub seed: u64,
    pub iterations: usize,
    pub threshold: f64,
    pub scale: f64,
    pub center: [f64; 2],
    pub optimal_distance: Option<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let defaults = LayoutOptions::default();
        Self {
            seed: defaults.seed,
            iterations: defaults.iterations,
            threshold: defaults.threshold,
            scale: defaults.scale,
            center: [defaults.center.x, defaults.center.y],
            optimal_distance: defaults.optimal_distance,
        }
    }
}

impl LayoutConfig {
    pub fn to_options(&self) -> LayoutOptions {
        LayoutOptions {
            seed: self.seed,
            iterations: self.iterations,
            threshold: self.threshold,
            scale: self.scale,
            center: Point::new(self.center[0], self.center[1]),
            optimal_distance: self.optimal_distance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisOptions {
    pub layout: LayoutConfig,
    /// When `false`, no layout is computed and the result carries `layout: None`.
    pub compute_layout: bool,
    /// Run the layout on a scoped thread alongside the planarity and Euler stages.
    pub concurrent_layout: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            compute_layout: true,
            concurrent_layout: false,
        }
    }
}

impl AnalysisOptions {
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| Error::InvalidOptions {
            message: format!("invalid JSON: {e}"),
        })?;
        Self::from_value(&value)
    }

    /// Applies `overrides` on top of these options. Objects merge key by key; any other value
    /// replaces what it lands on.
    pub fn merged(&self, overrides: &Value) -> Result<Self> {
        let mut base = serde_json::to_value(self).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })?;
        deep_merge(&mut base, overrides);
        Self::from_value(&base)
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.to_options().validate().map_err(Error::from)
    }
}

/// Sets `value` at `dotted_path` inside `root`, creating intermediate objects as needed.
pub fn set_path(root: &mut Value, dotted_path: &str, value: Value) {
    if !root.is_object() {
        *root = Value::Object(Map::new());
    }
    let Value::Object(map) = root else {
        return;
    };
    let mut cur: &mut Map<String, Value> = map;
    let mut segments = dotted_path.split('.').peekable();
    while let Some(seg) = segments.next() {
        if segments.peek().is_none() {
            cur.insert(seg.to_string(), value);
            return;
        }
        let slot = cur
            .entry(seg.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Some(next) = slot.as_object_mut() else {
            return;
        };
        cur = next;
    }
}

pub fn deep_merge(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
