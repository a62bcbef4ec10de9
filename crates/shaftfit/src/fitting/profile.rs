use serde::Serialize;

use super::answers::TempoFeel;
use super::weight::WeightBand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchBias {
    Low,
    Mid,
    High,
}

impl LaunchBias {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceBias {
    Neutral,
    Counterbalanced,
}

impl BalanceBias {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Counterbalanced => "counterbalanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialBias {
    Steel,
    Graphite,
    Either,
    /// Used by the fallback table when the engine could not run.
    SteelBaseline,
}

impl MaterialBias {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Steel => "steel",
            Self::Graphite => "graphite",
            Self::Either => "either",
            Self::SteelBaseline => "steel baseline",
        }
    }
}

/// Engine-facing tempo, mapped from the golfer's transition feel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tempo {
    Smooth,
    Moderate,
    Aggressive,
}

impl Tempo {
    pub const fn from_feel(feel: TempoFeel) -> Self {
        match feel {
            TempoFeel::Smooth => Self::Smooth,
            TempoFeel::Quick => Self::Aggressive,
            TempoFeel::Neutral | TempoFeel::Unsure => Self::Moderate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Gradual,
    Quick,
    Unknown,
}

impl Transition {
    /// A neutral feel reads as a normal (quick) transition; only "unsure" is unknown.
    pub const fn from_feel(feel: TempoFeel) -> Self {
        match feel {
            TempoFeel::Smooth => Self::Gradual,
            TempoFeel::Neutral | TempoFeel::Quick => Self::Quick,
            TempoFeel::Unsure => Self::Unknown,
        }
    }
}

/// The single change expected to matter most for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryLever {
    FaceControlStability,
    Sequencing,
    LowPointContact,
    StartLineStability,
    FatigueTiming,
}

impl PrimaryLever {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FaceControlStability => "Stability (face control)",
            Self::Sequencing => "Weight (sequencing)",
            Self::LowPointContact => "Contact (low point)",
            Self::StartLineStability => "Stability (start line)",
            Self::FatigueTiming => "Weight (fatigue/timing)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShaftProfile {
    pub weight_range: WeightBand,
    pub flex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub torque_range: Option<String>,
    pub launch_bias: LaunchBias,
    pub balance_bias: BalanceBias,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_bias: Option<MaterialBias>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_bias: Option<String>,
}

impl ShaftProfile {
    /// One-line summary, e.g. `Launch mid • Torque 3.0–4.0° (mid torque) • Balance neutral`.
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("Launch {}", self.launch_bias.label())];
        if let Some(torque) = &self.torque_range {
            parts.push(format!("Torque {torque}"));
        }
        parts.push(format!("Balance {}", self.balance_bias.label()));
        if let Some(material) = self.material_bias {
            parts.push(format!("Material {}", material.label()));
        }
        parts.join(" • ")
    }
}

/// Output of the driver, woods and iron engines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub fit_score: u8,
    pub profile: ShaftProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_lever: Option<PrimaryLever>,
    pub notes: Vec<String>,
    pub build_guide: Vec<String>,
}
