use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Closed set of habitats the upstream API groups species into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HabitatName {
    Cave,
    Forest,
    Grassland,
    Mountain,
    Rare,
    RoughTerrain,
    Sea,
    Urban,
    WatersEdge,
}

impl HabitatName {
    pub const ALL: [HabitatName; 9] = [
        HabitatName::Cave,
        HabitatName::Forest,
        HabitatName::Grassland,
        HabitatName::Mountain,
        HabitatName::Rare,
        HabitatName::RoughTerrain,
        HabitatName::Sea,
        HabitatName::Urban,
        HabitatName::WatersEdge,
    ];

    /// Identifier used in `/pokemon-habitat/{name}`.
    pub fn as_str(self) -> &'static str {
        match self {
            HabitatName::Cave => "cave",
            HabitatName::Forest => "forest",
            HabitatName::Grassland => "grassland",
            HabitatName::Mountain => "mountain",
            HabitatName::Rare => "rare",
            HabitatName::RoughTerrain => "rough-terrain",
            HabitatName::Sea => "sea",
            HabitatName::Urban => "urban",
            HabitatName::WatersEdge => "waters-edge",
        }
    }

    /// Display label: hyphens rendered as spaces.
    pub fn label(self) -> String {
        self.as_str().replace('-', " ")
    }
}

impl fmt::Display for HabitatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitatName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        HabitatName::ALL
            .into_iter()
            .find(|habitat| habitat.as_str() == normalized)
            .ok_or_else(|| Error::UnknownHabitat {
                name: s.to_string(),
                known: HabitatName::ALL.iter().map(|h| h.as_str()).collect(),
            })
    }
}
