use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of property a listing advertises.
///
/// Variants are declared alphabetically so that `Ord` matches the order in
/// which filter options and pivot columns are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    Condo,
    Landed,
}

impl PropertyType {
    /// The order in which the generator draws from the category set.
    pub const GENERATION_ORDER: [PropertyType; 3] =
        [PropertyType::Condo, PropertyType::Landed, PropertyType::Apartment];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::Condo => "Condo",
            PropertyType::Landed => "Landed",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apartment" => Ok(PropertyType::Apartment),
            "condo" => Ok(PropertyType::Condo),
            "landed" => Ok(PropertyType::Landed),
            _ => Err(CoreError::UnknownCategory {
                field: "property type",
                value: s.to_string(),
            }),
        }
    }
}

/// The state or city a listing is located in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "Kuala Lumpur")]
    KualaLumpur,
    Penang,
    Selangor,
}

impl Location {
    /// The order in which the generator draws from the category set.
    pub const GENERATION_ORDER: [Location; 3] =
        [Location::KualaLumpur, Location::Selangor, Location::Penang];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::KualaLumpur => "Kuala Lumpur",
            Location::Penang => "Penang",
            Location::Selangor => "Selangor",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "kualalumpur" | "kl" => Ok(Location::KualaLumpur),
            "penang" => Ok(Location::Penang),
            "selangor" => Ok(Location::Selangor),
            _ => Err(CoreError::UnknownCategory {
                field: "location",
                value: s.to_string(),
            }),
        }
    }
}
