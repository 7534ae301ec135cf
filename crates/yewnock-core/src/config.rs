//! Engine configuration: host addresses and the disc catalogue.
//!
//! Everything has a default matching the live game client, so an empty JSON
//! object is a complete config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::disc::{Colour, Disc, DiscId, Shape};
use crate::value_table::{default_catalog, CatalogError, ValueTable};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid disc catalogue: {0}")]
    Catalog(#[from] CatalogError),
}

/// A UI component the renderer can highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetRef {
    pub group: u32,
    pub child: u32,
}

/// Where the host keeps the puzzle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostLayout {
    pub puzzle1_left_varp: u32,
    pub puzzle1_right_varp: u32,
    pub puzzle2_varp: u32,
    pub puzzle1_slot_varp: u32,
    pub puzzle2_upper_slot_varp: u32,
    pub puzzle2_lower_slot_varp: u32,
    /// Item container holding the player's discs while the machine is open
    pub disc_container: u32,
    /// Widget group of the machine interface; child 0 present means open
    pub interface_group: u32,
    pub puzzle1_slot_child: u32,
    pub puzzle2_upper_slot_child: u32,
    pub puzzle2_lower_slot_child: u32,
    pub submit_child: u32,
}

impl Default for HostLayout {
    fn default() -> Self {
        Self {
            puzzle1_left_varp: 3997,
            puzzle1_right_varp: 3998,
            puzzle2_varp: 3999,
            puzzle1_slot_varp: 3994,
            puzzle2_upper_slot_varp: 3995,
            puzzle2_lower_slot_varp: 3996,
            disc_container: 440,
            interface_group: 848,
            puzzle1_slot_child: 19,
            puzzle2_upper_slot_child: 20,
            puzzle2_lower_slot_child: 21,
            submit_child: 12,
        }
    }
}

impl HostLayout {
    pub fn widget(&self, child: u32) -> WidgetRef {
        WidgetRef {
            group: self.interface_group,
            child,
        }
    }
}

/// One catalogue row: a host item id and the disc it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub item_id: u32,
    pub shape: Shape,
    pub colour: Colour,
}

impl From<Disc> for CatalogEntry {
    fn from(disc: Disc) -> Self {
        Self {
            item_id: disc.id.0,
            shape: disc.shape,
            colour: disc.colour,
        }
    }
}

impl From<CatalogEntry> for Disc {
    fn from(entry: CatalogEntry) -> Self {
        Disc::new(DiscId(entry.item_id), entry.shape, entry.colour)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: HostLayout,
    pub catalog: Vec<CatalogEntry>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout: HostLayout::default(),
            catalog: default_catalog().into_iter().map(CatalogEntry::from).collect(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        // Surface catalogue problems at load time rather than on first solve
        config.value_table()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn value_table(&self) -> Result<ValueTable, CatalogError> {
        let discs: Vec<Disc> = self.catalog.iter().copied().map(Disc::from).collect();
        ValueTable::from_catalog(&discs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.layout.disc_container, 440);
        assert_eq!(config.catalog.len(), 28);
    }

    #[test]
    fn test_partial_layout_override() {
        let config =
            EngineConfig::from_json(r#"{"layout": {"puzzle2_varp": 5000, "submit_child": 7}}"#)
                .unwrap();
        assert_eq!(config.layout.puzzle2_varp, 5000);
        assert_eq!(config.layout.submit_child, 7);
        assert_eq!(config.layout.puzzle1_left_varp, 3997);
    }

    #[test]
    fn test_remapped_catalogue() {
        let json = r#"{"catalog": [
            {"item_id": 28100, "shape": "circle", "colour": "red"},
            {"item_id": 28101, "shape": "pentagon", "colour": "violet"}
        ]}"#;
        let config = EngineConfig::from_json(json).unwrap();
        let table = config.value_table().unwrap();
        assert_eq!(table.weight_of(DiscId(28100)), Some(1));
        assert_eq!(table.weight_of(DiscId(28101)), Some(35));
        assert_eq!(table.weight_of(DiscId(1)), None);
    }

    #[test]
    fn test_bad_catalogue_rejected() {
        let json = r#"{"catalog": [{"item_id": 0, "shape": "circle", "colour": "red"}]}"#;
        assert!(matches!(
            EngineConfig::from_json(json),
            Err(ConfigError::Catalog(CatalogError::ZeroId { .. }))
        ));
        assert!(matches!(
            EngineConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_round_trip_json() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_file_defaults() {
        let path = Path::new("/nonexistent/yewnock/config.json");
        assert_eq!(EngineConfig::load_or_default(path).unwrap(), EngineConfig::default());
        assert!(matches!(EngineConfig::load(path), Err(ConfigError::Io { .. })));
    }
}
