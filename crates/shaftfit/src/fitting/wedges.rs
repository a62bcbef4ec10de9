//! Wedge recommendations. Self-contained: no shared calibrator.

use serde::Serialize;

use super::answers::{
    Constraint, Turf, WedgeAnswers, WedgeMiss, WedgeShaftPreference, WedgeSpin, WedgeTrajectory,
    WedgeUse,
};
use super::signals::GoalBias;
use super::weight::{WeightBand, MASS_OFFSET_G};

pub const WEDGE_BASE_SCORE: i32 = 80;
pub const WEDGE_SCORE_RANGE: (i32, i32) = (55, 92);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BounceBand {
    Low,
    Mid,
    High,
}

impl BounceBand {
    /// Turf interaction dominates; the miss pattern decides otherwise.
    pub const fn select(turf: Turf, miss: WedgeMiss) -> Self {
        match (turf, miss) {
            (Turf::Digger, _) => Self::High,
            (Turf::Sweeper, _) => Self::Low,
            (_, WedgeMiss::Fat) => Self::High,
            (_, WedgeMiss::Thin) => Self::Low,
            _ => Self::Mid,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Mid => "Mid",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GappingKind {
    FullShot,
    Greenside,
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GappingPlan {
    pub kind: GappingKind,
    pub title: &'static str,
    pub bullets: Vec<&'static str>,
}

impl GappingPlan {
    pub fn select(usage: WedgeUse, trajectory: WedgeTrajectory, spin: WedgeSpin) -> Self {
        let lower = trajectory == WedgeTrajectory::Lower;
        match usage {
            WedgeUse::MostlyFull => Self {
                kind: GappingKind::FullShot,
                title: "Full-shot focused gapping",
                bullets: vec![
                    "Typical plan: PW → Gap → Sand → Lob (4-wedge structure if you have room)",
                    "Directional example: 46–50–54–58 (or 46–52–56–60 depending on preference)",
                    if lower {
                        "Bias slightly stronger top wedge to keep flight down on approach wedges"
                    } else {
                        "Maintain even gaps for predictable yardages"
                    },
                    if spin == WedgeSpin::MoreCheck {
                        "Favor a dedicated lob wedge loft for stopping power"
                    } else {
                        "Favor a slightly stronger top wedge for distance control"
                    },
                ],
            },
            WedgeUse::MostlyGreenside => Self {
                kind: GappingKind::Greenside,
                title: "Greenside versatility gapping",
                bullets: vec![
                    "Typical plan: Gap → Sand → Lob (3-wedge structure for simplicity)",
                    "Directional example: 52–56–60 (or 50–54–58 if you prefer lower launch)",
                    if lower {
                        "Consider slightly stronger lofts to keep flight down"
                    } else {
                        "Consider a higher-loft lob wedge option for soft landing"
                    },
                    if spin == WedgeSpin::MoreRelease {
                        "Favor a mid-loft utility wedge you can bump-and-run"
                    } else {
                        "Favor a lob wedge you can stop quickly"
                    },
                ],
            },
            WedgeUse::Mixed => Self {
                kind: GappingKind::Balanced,
                title: "Balanced gapping (mixed use)",
                bullets: vec![
                    "Typical plan: Gap → Sand → Lob (3 wedges), add one more gap wedge if you have room",
                    "Directional example: 50–54–58 (balanced) or 52–56–60 (more loft coverage)",
                    if lower {
                        "Leaning 50–54–58 tends to keep flight slightly down"
                    } else {
                        "Leaning 52–56–60 gives more height options around the green"
                    },
                    if spin == WedgeSpin::MoreCheck {
                        "Favor loft coverage on the bottom end (lob wedge utility)"
                    } else {
                        "Favor consistent yardage gapping on the top end"
                    },
                ],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WedgeProfile {
    pub weight_range: WeightBand,
    pub flex: &'static str,
    pub bounce: BounceBand,
    pub grind: &'static str,
    pub gapping: GappingPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WedgeRecommendation {
    pub fit_score: u8,
    pub profile: WedgeProfile,
    pub build_notes: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WedgeInputs<'a> {
    pub answers: &'a WedgeAnswers,
    pub goal_bias: GoalBias,
    pub constraint: Constraint,
    pub seven_iron_speed_mph: f64,
    /// Iron weight band, when irons were fitted in the same session.
    pub iron_weight: Option<WeightBand>,
}

pub fn recommend_wedges(inputs: &WedgeInputs<'_>) -> WedgeRecommendation {
    let wedges = inputs.answers;
    let bounce = BounceBand::select(wedges.turf, wedges.miss);

    let base_weight = inputs
        .iron_weight
        .unwrap_or_else(|| weight_from_speed(inputs.seven_iron_speed_mph));
    let wants_heavier = wedges.shaft_preference == WedgeShaftPreference::SlightlyHeavier
        || inputs.goal_bias.stability >= 2
        || wedges.usage == WedgeUse::MostlyFull;
    let weight_range = if wants_heavier {
        base_weight.with_mass_offset(MASS_OFFSET_G)
    } else {
        base_weight
    };

    let mut score = WEDGE_BASE_SCORE;
    if wedges.turf == Turf::Unsure {
        score -= 4;
    }
    if wedges.miss == WedgeMiss::Unsure {
        score -= 4;
    }
    if wedges.shaft_preference == WedgeShaftPreference::Unknown {
        score -= 2;
    }
    if inputs.constraint.is_set() {
        score -= 2;
    }
    let fit_score = score.clamp(WEDGE_SCORE_RANGE.0, WEDGE_SCORE_RANGE.1) as u8;

    let mut build_notes = vec![if wants_heavier {
        "Shaft: slightly heavier than irons for tempo + strike control."
    } else {
        "Shaft: match iron feel for consistency."
    }];
    if inputs.constraint.is_physical() {
        build_notes
            .push("Comfort bias: avoid extreme swingweight/heavy builds that aggravate discomfort.");
    }
    match wedges.trajectory {
        WedgeTrajectory::Lower => build_notes
            .push("Flight bias: keep launch down, avoid overly high launching wedge profiles."),
        WedgeTrajectory::Higher => build_notes
            .push("Flight bias: allow height, ensure you have a loft option that lands softly."),
        WedgeTrajectory::Neutral => {}
    }

    let note = inputs.constraint.is_set().then_some(
        "Constraint noted: recommendations are biased away from overly heavy/harsh wedge builds.",
    );

    WedgeRecommendation {
        fit_score,
        profile: WedgeProfile {
            weight_range,
            flex: flex_direction(inputs.seven_iron_speed_mph),
            bounce,
            grind: grind_bias(bounce, wedges.usage),
            gapping: GappingPlan::select(wedges.usage, wedges.trajectory, wedges.spin),
        },
        build_notes,
        note,
    }
}

fn weight_from_speed(seven_iron_speed: f64) -> WeightBand {
    if seven_iron_speed <= 74.0 {
        WeightBand::new(95, 105)
    } else if seven_iron_speed <= 84.0 {
        WeightBand::new(105, 115)
    } else if seven_iron_speed <= 92.0 {
        WeightBand::new(115, 125)
    } else {
        WeightBand::new(120, 130)
    }
}

fn flex_direction(seven_iron_speed: f64) -> &'static str {
    if seven_iron_speed >= 90.0 {
        "X / X-stable feel (directional)"
    } else if seven_iron_speed >= 80.0 {
        "Stiff feel (directional)"
    } else {
        "Regular/Stiff border (directional)"
    }
}

fn grind_bias(bounce: BounceBand, usage: WedgeUse) -> &'static str {
    match (bounce, usage) {
        (BounceBand::High, _) => "Wider sole / fuller grind (for forgiveness through turf/sand)",
        (BounceBand::Low, _) => "Relief/versatile grind (for shallow delivery + face manipulation)",
        (BounceBand::Mid, WedgeUse::MostlyGreenside) => {
            "Versatile grind with some relief (open/close face without digging)"
        }
        (BounceBand::Mid, _) => "Mid-bounce versatile grind (balanced for full shots + chips)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(answers: &WedgeAnswers) -> WedgeInputs<'_> {
        WedgeInputs {
            answers,
            goal_bias: GoalBias::default(),
            constraint: Constraint::None,
            seven_iron_speed_mph: 84.0,
            iron_weight: None,
        }
    }

    #[test]
    fn turf_dominates_bounce_then_miss() {
        assert_eq!(BounceBand::select(Turf::Digger, WedgeMiss::Thin), BounceBand::High);
        assert_eq!(BounceBand::select(Turf::Sweeper, WedgeMiss::Fat), BounceBand::Low);
        assert_eq!(BounceBand::select(Turf::Neutral, WedgeMiss::Fat), BounceBand::High);
        assert_eq!(BounceBand::select(Turf::Unsure, WedgeMiss::Thin), BounceBand::Low);
        assert_eq!(BounceBand::select(Turf::Neutral, WedgeMiss::Both), BounceBand::Mid);
        assert_eq!(BounceBand::select(Turf::Unsure, WedgeMiss::Unsure), BounceBand::Mid);
    }

    #[test]
    fn default_answers_score_and_weight() {
        let answers = WedgeAnswers::default();
        let rec = recommend_wedges(&inputs(&answers));
        assert_eq!(rec.fit_score, 74);
        assert_eq!(rec.profile.weight_range, WeightBand::new(105, 115));
        assert_eq!(rec.profile.flex, "Stiff feel (directional)");
        assert_eq!(rec.profile.gapping.kind, GappingKind::Balanced);
        assert_eq!(rec.build_notes, vec!["Shaft: match iron feel for consistency."]);
        assert_eq!(rec.note, None);
    }

    #[test]
    fn full_shot_usage_goes_heavier_than_iron_band() {
        let answers = WedgeAnswers {
            usage: WedgeUse::MostlyFull,
            ..WedgeAnswers::default()
        };
        let mut wedge_inputs = inputs(&answers);
        wedge_inputs.iron_weight = Some(WeightBand::new(95, 105));
        let rec = recommend_wedges(&wedge_inputs);
        assert_eq!(rec.profile.weight_range, WeightBand::new(105, 115));
        assert_eq!(rec.profile.gapping.title, "Full-shot focused gapping");
        assert_eq!(rec.profile.gapping.bullets.len(), 4);
    }

    #[test]
    fn greenside_mid_bounce_uses_relief_grind() {
        let answers = WedgeAnswers {
            usage: WedgeUse::MostlyGreenside,
            miss: WedgeMiss::Both,
            spin: WedgeSpin::MoreRelease,
            ..WedgeAnswers::default()
        };
        let rec = recommend_wedges(&inputs(&answers));
        assert_eq!(
            rec.profile.grind,
            "Versatile grind with some relief (open/close face without digging)"
        );
        assert_eq!(
            rec.profile.gapping.bullets[3],
            "Favor a mid-loft utility wedge you can bump-and-run"
        );
    }

    #[test]
    fn unsure_answers_and_constraint_lower_score() {
        let answers = WedgeAnswers {
            turf: Turf::Unsure,
            trajectory: WedgeTrajectory::Lower,
            ..WedgeAnswers::default()
        };
        let mut wedge_inputs = inputs(&answers);
        wedge_inputs.constraint = Constraint::ShoulderBack;
        let rec = recommend_wedges(&wedge_inputs);
        assert_eq!(rec.fit_score, 68);
        assert_eq!(rec.build_notes.len(), 3);
        assert!(rec.note.is_some());
    }
}
