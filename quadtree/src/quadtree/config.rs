use common::shapes::Rectangle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Config {
    /// Objects a leaf holds before it splits. Leaves at `max_depth` may exceed it.
    pub max_objects: usize,
    /// Deepest level a node can reach; the root is at depth 0.
    pub max_depth: usize,
}

impl Config {
    pub(crate) fn normalized(self) -> Self {
        Config {
            max_objects: self.max_objects.max(1),
            max_depth: self.max_depth,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_objects: 20,
            max_depth: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateRequest<T> {
    pub value: T,
    pub rect: Rectangle,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"max_depth": 6}"#).unwrap();
        assert_eq!(
            config,
            Config {
                max_objects: 20,
                max_depth: 6,
            }
        );

        let empty: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Config::default());
    }

    #[test]
    fn deserialized_zero_max_objects_is_normalized() {
        let config: Config = serde_json::from_str(r#"{"max_objects": 0}"#).unwrap();
        assert_eq!(config.normalized().max_objects, 1);
    }
}
