//! Regional scenario presets: forests and their logging intensity options.
//!
//! Every preset shares the same equilibrium baseline; they differ in the
//! removal rates a concession is licensed for. Presets are plain values the
//! caller hands to the engine, there is no global registry.

use serde::{Deserialize, Serialize};

use crate::constants::BASELINE_CARBON;

// ============================================================================
// INTENSITY LEVELS
// ============================================================================

/// Named intensity option offered by a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum IntensityLevel {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl IntensityLevel {
    pub const ALL: [IntensityLevel; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }
}

/// Ordered (low, medium, high) removal fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityLevels {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl IntensityLevels {
    pub fn get(&self, level: IntensityLevel) -> f64 {
        match level {
            IntensityLevel::Low => self.low,
            IntensityLevel::Medium => self.medium,
            IntensityLevel::High => self.high,
        }
    }

    /// Levels are fractions in `[0, 1]` and non-decreasing.
    pub fn is_ordered(&self) -> bool {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        in_range(self.low)
            && in_range(self.medium)
            && in_range(self.high)
            && self.low <= self.medium
            && self.medium <= self.high
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

/// Immutable scenario parameters supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub id: u8,
    pub name: String,
    pub region: String,
    pub description: String,
    /// Mg C/ha at dynamic equilibrium.
    pub baseline_carbon: f64,
    pub intensity_levels: IntensityLevels,
}

impl ScenarioConfig {
    pub fn intensity(&self, level: IntensityLevel) -> f64 {
        self.intensity_levels.get(level)
    }
}

/// Built-in regional presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Region {
    /// Terra firme forest north of Manaus, very high biomass.
    CentralAmazon = 0,
    /// Lowland dipterocarp forest, heavy commercial stocking.
    Borneo = 1,
    /// Mixed semi-deciduous forest, low licensed offtake.
    CongoBasin = 2,
    /// Hill forest with customary-land concessions.
    NewGuinea = 3,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Self::CentralAmazon,
        Self::Borneo,
        Self::CongoBasin,
        Self::NewGuinea,
    ];

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::CentralAmazon),
            1 => Some(Self::Borneo),
            2 => Some(Self::CongoBasin),
            3 => Some(Self::NewGuinea),
            _ => None,
        }
    }

    pub fn scenario(&self) -> ScenarioConfig {
        let (name, region, description, levels) = match self {
            Self::CentralAmazon => (
                "Amazon Concession",
                "Central Amazon, Brazil",
                "Intact terra firme forest holding 300-400 Mg C/ha. \
                 Reduced-impact logging permits keep offtake light.",
                IntensityLevels {
                    low: 0.05,
                    medium: 0.15,
                    high: 0.25,
                },
            ),
            Self::Borneo => (
                "Dipterocarp Timber Block",
                "Kalimantan, Borneo",
                "Dipterocarp forest with dense commercial stocking. \
                 Operators push for heavier entries.",
                IntensityLevels {
                    low: 0.10,
                    medium: 0.20,
                    high: 0.30,
                },
            ),
            Self::CongoBasin => (
                "Congo Community Forest",
                "Congo Basin, Cameroon",
                "Semi-deciduous forest where only a few species are marketable, \
                 so removal per entry stays low.",
                IntensityLevels {
                    low: 0.05,
                    medium: 0.10,
                    high: 0.20,
                },
            ),
            Self::NewGuinea => (
                "Highland Customary Lease",
                "Papua New Guinea",
                "Hill forest on customary land leased for selective harvest.",
                IntensityLevels {
                    low: 0.10,
                    medium: 0.15,
                    high: 0.25,
                },
            ),
        };
        ScenarioConfig {
            id: *self as u8,
            name: name.to_string(),
            region: region.to_string(),
            description: description.to_string(),
            baseline_carbon: BASELINE_CARBON,
            intensity_levels: levels,
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Region::CentralAmazon.scenario()
    }
}

/// All built-in scenarios, ordered by id.
pub fn presets() -> Vec<ScenarioConfig> {
    Region::ALL.iter().map(Region::scenario).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_share_baseline() {
        let all = presets();
        assert_eq!(all.len(), 4);
        for s in &all {
            assert_eq!(s.baseline_carbon, BASELINE_CARBON);
        }
    }

    #[test]
    fn test_preset_ids_match_region() {
        for (i, s) in presets().iter().enumerate() {
            assert_eq!(s.id as usize, i);
            assert_eq!(Region::from_u8(s.id).map(|r| r.scenario()), Some(s.clone()));
        }
        assert_eq!(Region::from_u8(4), None);
    }

    #[test]
    fn test_intensity_levels_ordered() {
        for s in presets() {
            assert!(s.intensity_levels.is_ordered(), "{} levels out of order", s.name);
        }
    }

    #[test]
    fn test_intensity_lookup() {
        let s = Region::Borneo.scenario();
        assert_eq!(s.intensity(IntensityLevel::Low), 0.10);
        assert_eq!(s.intensity(IntensityLevel::Medium), 0.20);
        assert_eq!(s.intensity(IntensityLevel::High), 0.30);
    }

    #[test]
    fn test_is_ordered_rejects_bad_levels() {
        let levels = IntensityLevels {
            low: 0.3,
            medium: 0.2,
            high: 0.1,
        };
        assert!(!levels.is_ordered());
        let levels = IntensityLevels {
            low: 0.1,
            medium: 0.2,
            high: 1.2,
        };
        assert!(!levels.is_ordered());
    }

    #[test]
    fn test_intensity_level_roundtrip() {
        for level in IntensityLevel::ALL {
            assert_eq!(IntensityLevel::from_u8(level as u8), Some(level));
        }
        assert_eq!(IntensityLevel::from_u8(3), None);
    }

    #[test]
    fn test_scenario_json() {
        let s = Region::CongoBasin.scenario();
        let json = serde_json::to_string(&s).unwrap();
        let back: ScenarioConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
