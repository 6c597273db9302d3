//! Type-safe value types for the feasibility study record
//!
//! Risk categories and severities are closed sets, so they are enums with
//! the same string form on the wire (serde) and on the command line (strum).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Category of an identified risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "camelCase")]
pub enum RiskCategory {
    #[strum(serialize = "dataPrivacy")]
    DataPrivacy,
    #[strum(serialize = "accuracy")]
    Accuracy,
    #[strum(serialize = "bias")]
    Bias,
    #[strum(serialize = "security")]
    Security,
    /// User-added entry; the only category that can be removed
    #[strum(serialize = "custom")]
    Custom,
}

impl RiskCategory {
    /// Categories seeded into every new record, in display order
    pub fn defaults() -> impl Iterator<Item = Self> {
        Self::iter().filter(|c| !c.is_custom())
    }

    #[inline]
    pub fn is_custom(self) -> bool {
        self == Self::Custom
    }

    /// Human-readable label used in the rendered document
    pub fn label(self) -> &'static str {
        match self {
            Self::DataPrivacy => "Data privacy",
            Self::Accuracy => "Accuracy / hallucination",
            Self::Bias => "Bias and fairness",
            Self::Security => "Security",
            Self::Custom => "Other",
        }
    }
}

/// Severity of an identified risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}
