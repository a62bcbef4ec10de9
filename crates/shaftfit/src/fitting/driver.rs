//! Driver and woods shaft recommendations.

use serde::Serialize;

use super::answers::{Answers, Constraint, DriverStrike, Flight};
use super::calibrator::{
    clamp_unit, compute_fit_score, confidence_from_unknowns, volatility_from_flags,
    ScoreCategory, ScoreInputs, VolatilityFlags,
};
use super::profile::{
    BalanceBias, LaunchBias, PrimaryLever, Recommendation, ShaftProfile, Tempo, Transition,
};
use super::signals::{FaceBias, FaceControl, GoalBias, SignalBundle};
use super::weight::{WeightBand, MASS_OFFSET_G};
use super::EngineError;

pub const WOODS_SCORE_OFFSET: u8 = 3;
pub const WOODS_SCORE_FLOOR: u8 = 40;
pub const WOODS_SCORE_CEILING: u8 = 95;
pub const WOODS_NOTE: &str =
    "Woods: baseline rule is ~+10g vs driver for control and consistent strike.";

const SPEED_RANGE_MPH: (f64, f64) = (70.0, 130.0);
const WEIGHT_RANGE_G: (i32, i32) = (50, 80);
const SCORED_FIELDS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverFix {
    Slice,
    Hook,
    Dispersion,
}

impl DriverFix {
    pub const fn from_face_bias(bias: FaceBias) -> Self {
        match bias {
            FaceBias::ReduceRight => Self::Slice,
            FaceBias::ReduceLeft => Self::Hook,
            _ => Self::Dispersion,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverImpact {
    Heel,
    Toe,
    Center,
    Unknown,
}

impl From<DriverStrike> for DriverImpact {
    fn from(strike: DriverStrike) -> Self {
        match strike {
            DriverStrike::Heel => Self::Heel,
            DriverStrike::Toe => Self::Toe,
            DriverStrike::Center => Self::Center,
            DriverStrike::AllOver => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverInputs {
    pub fix: DriverFix,
    pub speed_mph: f64,
    pub tempo: Tempo,
    pub transition: Transition,
    pub strike: DriverImpact,
    pub anchor_g: Option<f64>,
    pub launch_feel: Flight,
    pub constraint: Constraint,
}

impl DriverInputs {
    pub fn from_answers(answers: &Answers, signals: &SignalBundle) -> Self {
        Self {
            fix: DriverFix::from_face_bias(signals.driver_face.bias),
            speed_mph: signals.driver_speed_mph,
            tempo: Tempo::from_feel(answers.driver.tempo),
            transition: Transition::from_feel(answers.driver.tempo),
            strike: answers.driver.strike.into(),
            anchor_g: signals.driver_anchor_g,
            launch_feel: answers.driver.flight,
            constraint: answers.constraint,
        }
    }
}

pub fn recommend_driver(inputs: &DriverInputs) -> Result<Recommendation, EngineError> {
    if !inputs.speed_mph.is_finite() {
        return Err(EngineError::NonFiniteSpeed(inputs.speed_mph));
    }
    let speed = inputs.speed_mph.clamp(SPEED_RANGE_MPH.0, SPEED_RANGE_MPH.1);

    let (weight_range, weight_mid) = pick_weight(speed, inputs.tempo, inputs.constraint);
    let launch_bias = pick_launch(inputs.launch_feel, inputs.fix);

    let unknown_count = [
        inputs.strike == DriverImpact::Unknown,
        inputs.transition == Transition::Unknown,
        inputs.anchor_g.is_none(),
    ]
    .into_iter()
    .filter(|unknown| *unknown)
    .count() as u8;

    let volatility = volatility_from_flags(VolatilityFlags {
        both_sides: inputs.fix == DriverFix::Dispersion,
        all_over_strike: inputs.strike == DriverImpact::Unknown,
        unsure_tempo: inputs.tempo == Tempo::Moderate,
        unsure_miss: false,
    });

    let fit_score = compute_fit_score(&ScoreInputs {
        category: ScoreCategory::Driver,
        alignment: alignment(inputs, launch_bias, weight_mid),
        confidence: confidence_from_unknowns(unknown_count, SCORED_FIELDS),
        volatility,
        unknown_count,
        derived_from_other: false,
    });

    let balance_bias = match inputs.tempo {
        Tempo::Aggressive => BalanceBias::Counterbalanced,
        _ => BalanceBias::Neutral,
    };

    Ok(Recommendation {
        fit_score,
        profile: ShaftProfile {
            weight_range,
            flex: pick_flex(speed).to_string(),
            torque_range: Some(pick_torque(inputs.fix, inputs.tempo).to_string()),
            launch_bias,
            balance_bias,
            material_bias: None,
            head_bias: None,
        },
        primary_lever: None,
        notes: constraint_note(inputs.constraint)
            .map(str::to_string)
            .into_iter()
            .collect(),
        build_guide: adjustment_guide(inputs.fix, inputs.launch_feel, inputs.strike),
    })
}

/// Woods reuse the driver profile with the mass offset; the score trails the driver's.
pub fn derive_woods(driver: &Recommendation) -> Recommendation {
    let fit_score = driver
        .fit_score
        .saturating_sub(WOODS_SCORE_OFFSET)
        .clamp(WOODS_SCORE_FLOOR, WOODS_SCORE_CEILING);

    Recommendation {
        fit_score,
        profile: ShaftProfile {
            weight_range: driver.profile.weight_range.with_mass_offset(MASS_OFFSET_G),
            ..driver.profile.clone()
        },
        primary_lever: None,
        notes: vec![WOODS_NOTE.to_string()],
        build_guide: Vec::new(),
    }
}

pub fn driver_primary_lever(goal_bias: &GoalBias, face: &FaceControl) -> PrimaryLever {
    let directional = !matches!(face.bias, FaceBias::Neutral | FaceBias::Unknown);
    if goal_bias.stability >= 2 || directional {
        PrimaryLever::FaceControlStability
    } else {
        PrimaryLever::Sequencing
    }
}

fn pick_weight(speed: f64, tempo: Tempo, constraint: Constraint) -> (WeightBand, f64) {
    let mut mid: i32 = if speed < 90.0 {
        55
    } else if speed < 100.0 {
        62
    } else if speed < 110.0 {
        68
    } else {
        74
    };

    match tempo {
        Tempo::Aggressive => mid += 3,
        Tempo::Smooth => mid -= 2,
        Tempo::Moderate => {}
    }

    match constraint {
        Constraint::Elbow | Constraint::ShoulderBack => mid -= 3,
        Constraint::PreferLighter => mid -= 2,
        Constraint::None => {}
    }

    let mid = mid.clamp(WEIGHT_RANGE_G.0, WEIGHT_RANGE_G.1);
    let band = match mid {
        i32::MIN..=56 => WeightBand::new(50, 60),
        57..=63 => WeightBand::new(55, 65),
        64..=70 => WeightBand::new(60, 70),
        71..=76 => WeightBand::new(65, 75),
        _ => WeightBand::new(70, 80),
    };
    (band, f64::from(mid))
}

fn pick_flex(speed: f64) -> &'static str {
    if speed < 90.0 {
        "Regular (R)"
    } else if speed < 103.0 {
        "Regular (R) to Stiff (S)"
    } else if speed < 112.0 {
        "Stiff (S)"
    } else {
        "X-Stiff (X)"
    }
}

fn pick_torque(fix: DriverFix, tempo: Tempo) -> &'static str {
    match (fix, tempo) {
        (DriverFix::Hook, _) => "2.8–3.3° (lower torque)",
        (DriverFix::Slice, Tempo::Aggressive) => "3.0–3.6° (mid torque)",
        (DriverFix::Slice, _) => "3.3–4.2° (mid-high torque)",
        (DriverFix::Dispersion, Tempo::Aggressive) => "2.8–3.6° (mid-low torque)",
        (DriverFix::Dispersion, _) => "3.0–4.0° (mid torque)",
    }
}

/// Inverts the reported flight; a hook never gets a high-launch bias.
fn pick_launch(feel: Flight, fix: DriverFix) -> LaunchBias {
    let bias = match feel {
        Flight::Low => LaunchBias::High,
        Flight::High => LaunchBias::Low,
        Flight::Mid => LaunchBias::Mid,
    };
    if fix == DriverFix::Hook && bias != LaunchBias::Low {
        LaunchBias::Mid
    } else {
        bias
    }
}

fn alignment(inputs: &DriverInputs, launch: LaunchBias, weight_mid: f64) -> f64 {
    let mut score = 0.72;

    score += match inputs.anchor_g {
        Some(anchor) => {
            let diff = (anchor - weight_mid).abs();
            if diff <= 6.0 {
                0.12
            } else if diff <= 10.0 {
                0.06
            } else if diff >= 18.0 {
                -0.10
            } else {
                -0.04
            }
        }
        None => -0.05,
    };

    score += match (inputs.launch_feel, launch) {
        (Flight::Low, LaunchBias::High) | (Flight::High, LaunchBias::Low) => 0.08,
        (Flight::Low, LaunchBias::Low) | (Flight::High, LaunchBias::High) => -0.04,
        _ => 0.0,
    };

    if inputs.tempo == Tempo::Aggressive
        && matches!(inputs.fix, DriverFix::Slice | DriverFix::Dispersion)
    {
        score += 0.05;
    }
    if inputs.tempo == Tempo::Smooth && inputs.fix == DriverFix::Hook {
        score -= 0.02;
    }

    clamp_unit(score)
}

fn constraint_note(constraint: Constraint) -> Option<&'static str> {
    match constraint {
        Constraint::Elbow => Some(
            "Note: If elbow pain persists, consider slightly lighter total weight and softer-feel profiles.",
        ),
        Constraint::ShoulderBack => Some(
            "Note: If shoulder/back issues, avoid overly heavy builds; prioritize smooth load.",
        ),
        Constraint::PreferLighter => {
            Some("Note: You prefer lighter feel, so we biased weight slightly down.")
        }
        Constraint::None => None,
    }
}

fn adjustment_guide(fix: DriverFix, feel: Flight, strike: DriverImpact) -> Vec<String> {
    let mut guide =
        vec!["Start: loft at the stated loft, face neutral, weight neutral (if adjustable).".to_string()];

    let fix_lines: &[&str] = match fix {
        DriverFix::Slice => &[
            "If you slice: avoid fade setting; keep face neutral (or slightly closed only if needed).",
            "Move adjustable weight slightly toward heel (small changes, 1 notch at a time).",
            "Tee height: slightly higher; focus on center-face contact (heel strikes often exaggerate slice).",
        ],
        DriverFix::Hook => &[
            "If you hook: avoid draw setting; keep face neutral (or slightly open if needed).",
            "Move adjustable weight slightly toward toe to reduce left bias.",
            "Ball position: don't let it creep too far forward (can increase face closure timing).",
        ],
        DriverFix::Dispersion => &[
            "If both sides: keep settings neutral first; prioritize repeatable strike before chasing curvature.",
            "Use loft adjustments only after strike location stabilizes.",
        ],
    };
    guide.extend(fix_lines.iter().map(|line| line.to_string()));

    match feel {
        Flight::Low => guide.push(
            "Low flight: test +1° loft before changing shaft. Keep face neutral.".to_string(),
        ),
        Flight::High => guide.push(
            "High flight: test -1° loft (or a lower-spin head setting) before changing shaft."
                .to_string(),
        ),
        Flight::Mid => {}
    }

    let strike_line = match strike {
        DriverImpact::Heel => Some(
            "Heel strike bias: try slightly shorter tee height and focus on strike; heel hits can add gear-effect slice.",
        ),
        DriverImpact::Toe => Some(
            "Toe strike bias: ensure you're not too far from the ball; toe hits can increase draw/hook via gear effect.",
        ),
        DriverImpact::Unknown => Some(
            "If strike is inconsistent: prioritize strike feedback (impact tape/foot spray) for faster improvement.",
        ),
        DriverImpact::Center => None,
    };
    guide.extend(strike_line.map(str::to_string));

    guide
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> DriverInputs {
        DriverInputs {
            fix: DriverFix::Dispersion,
            speed_mph: 98.0,
            tempo: Tempo::Moderate,
            transition: Transition::Quick,
            strike: DriverImpact::Center,
            anchor_g: Some(60.0),
            launch_feel: Flight::Mid,
            constraint: Constraint::None,
        }
    }

    #[test]
    fn weight_band_follows_speed_and_tempo() {
        let rec = recommend_driver(&inputs()).expect("engine runs");
        assert_eq!(rec.profile.weight_range, WeightBand::new(55, 65));

        let fast = DriverInputs {
            speed_mph: 115.0,
            tempo: Tempo::Aggressive,
            ..inputs()
        };
        let rec = recommend_driver(&fast).expect("engine runs");
        assert_eq!(rec.profile.weight_range, WeightBand::new(70, 80));
        assert_eq!(rec.profile.flex, "X-Stiff (X)");
        assert_eq!(rec.profile.balance_bias, BalanceBias::Counterbalanced);
    }

    #[test]
    fn only_aggressive_tempo_is_counterbalanced() {
        for (tempo, expected) in [
            (Tempo::Smooth, BalanceBias::Neutral),
            (Tempo::Moderate, BalanceBias::Neutral),
            (Tempo::Aggressive, BalanceBias::Counterbalanced),
        ] {
            let rec = recommend_driver(&DriverInputs { tempo, ..inputs() }).expect("engine runs");
            assert_eq!(rec.profile.balance_bias, expected);
        }
    }

    #[test]
    fn hook_caps_launch_at_mid_and_lowers_torque() {
        let hook = DriverInputs {
            fix: DriverFix::Hook,
            launch_feel: Flight::Low,
            ..inputs()
        };
        let rec = recommend_driver(&hook).expect("engine runs");
        assert_eq!(rec.profile.launch_bias, LaunchBias::Mid);
        assert_eq!(
            rec.profile.torque_range.as_deref(),
            Some("2.8–3.3° (lower torque)")
        );
    }

    #[test]
    fn comfort_constraint_lightens_weight_and_adds_note() {
        let elbow = DriverInputs {
            speed_mph: 101.0,
            constraint: Constraint::Elbow,
            ..inputs()
        };
        let rec = recommend_driver(&elbow).expect("engine runs");
        assert_eq!(rec.profile.weight_range, WeightBand::new(60, 70));
        assert_eq!(rec.notes.len(), 1);
        assert!(rec.notes[0].contains("elbow"));
    }

    #[test]
    fn guide_lists_fix_launch_and_strike_lines_in_order() {
        let slice = DriverInputs {
            fix: DriverFix::Slice,
            launch_feel: Flight::High,
            strike: DriverImpact::Heel,
            ..inputs()
        };
        let rec = recommend_driver(&slice).expect("engine runs");
        assert_eq!(rec.build_guide.len(), 6);
        assert!(rec.build_guide[0].starts_with("Start:"));
        assert!(rec.build_guide[1].starts_with("If you slice"));
        assert!(rec.build_guide[4].starts_with("High flight"));
        assert!(rec.build_guide[5].starts_with("Heel strike"));
    }

    #[test]
    fn rejects_non_finite_speed() {
        let broken = DriverInputs {
            speed_mph: f64::NAN,
            ..inputs()
        };
        assert!(matches!(
            recommend_driver(&broken),
            Err(EngineError::NonFiniteSpeed(_))
        ));
    }

    #[test]
    fn woods_trail_driver_by_three_with_heavier_band() {
        let driver = recommend_driver(&inputs()).expect("engine runs");
        let woods = derive_woods(&driver);
        assert_eq!(woods.fit_score, driver.fit_score - 3);
        assert_eq!(woods.profile.weight_range, WeightBand::new(65, 75));
        assert_eq!(woods.profile.flex, driver.profile.flex);
        assert_eq!(woods.notes, vec![WOODS_NOTE.to_string()]);
    }
}
