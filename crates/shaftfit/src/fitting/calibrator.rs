//! Shared fit-score calibration for the driver, woods and iron engines.

pub const FIT_SCORE_FLOOR: u8 = 55;
pub const FIT_SCORE_CAP: u8 = 94;
/// Only reachable through the rare-ceiling rule.
pub const FIT_SCORE_CEILING: u8 = 95;

const UNKNOWN_PENALTY_PER_FIELD: f64 = 2.5;
const UNKNOWN_PENALTY_CAP: f64 = 14.0;
const DERIVED_PENALTY: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreCategory {
    Driver,
    Woods,
    Irons,
}

impl ScoreCategory {
    pub const fn base(self) -> f64 {
        match self {
            Self::Driver => 74.0,
            Self::Woods => 72.0,
            Self::Irons => 70.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    pub category: ScoreCategory,
    /// How well the recommended profile answers the golfer's needs, `0..=1`.
    pub alignment: f64,
    /// Certainty in the inputs, `0..=1`.
    pub confidence: f64,
    /// Residual mismatch risk, `0..=1`.
    pub volatility: f64,
    pub unknown_count: u8,
    pub derived_from_other: bool,
}

pub fn compute_fit_score(inputs: &ScoreInputs) -> u8 {
    let alignment = clamp_unit(inputs.alignment);
    let confidence = clamp_unit(inputs.confidence);
    let volatility = clamp_unit(inputs.volatility);

    let unknown_penalty =
        (f64::from(inputs.unknown_count) * UNKNOWN_PENALTY_PER_FIELD).min(UNKNOWN_PENALTY_CAP);
    let derived_penalty = if inputs.derived_from_other {
        DERIVED_PENALTY
    } else {
        0.0
    };

    let raw = inputs.category.base() + (alignment - 0.5) * 36.0 + (confidence - 0.5) * 20.0
        - volatility * 10.0
        - unknown_penalty
        - derived_penalty;

    let qualifies_for_ceiling = alignment >= 0.88
        && confidence >= 0.85
        && volatility <= 0.25
        && inputs.unknown_count <= 1
        && !inputs.derived_from_other;

    if qualifies_for_ceiling {
        return FIT_SCORE_CEILING;
    }

    raw.clamp(f64::from(FIT_SCORE_FLOOR), f64::from(FIT_SCORE_CAP))
        .round() as u8
}

/// Maps the share of known fields onto `0.45..=0.98`.
pub fn confidence_from_unknowns(unknown_count: u8, total_fields: u8) -> f64 {
    if total_fields == 0 {
        return 0.6;
    }
    let known_ratio =
        (1.0 - f64::from(unknown_count) / f64::from(total_fields)).clamp(0.0, 1.0);
    (0.45 + known_ratio * 0.55).clamp(0.45, 0.98)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VolatilityFlags {
    pub both_sides: bool,
    pub all_over_strike: bool,
    pub unsure_tempo: bool,
    pub unsure_miss: bool,
}

pub fn volatility_from_flags(flags: VolatilityFlags) -> f64 {
    let weighted = [
        (flags.both_sides, 0.45),
        (flags.all_over_strike, 0.35),
        (flags.unsure_tempo, 0.15),
        (flags.unsure_miss, 0.15),
    ];
    weighted
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, weight)| weight)
        .sum::<f64>()
        .min(1.0)
}

/// NaN collapses to zero so a bad input can never lift the score.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
