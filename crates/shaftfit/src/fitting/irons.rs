//! Iron shaft recommendations.

use serde::Serialize;

use super::answers::{Answers, Constraint, Fatigue, Flight, IronFaceStrike, IronLowPoint};
use super::calibrator::{
    clamp_unit, compute_fit_score, confidence_from_unknowns, volatility_from_flags,
    ScoreCategory, ScoreInputs, VolatilityFlags,
};
use super::profile::{
    BalanceBias, LaunchBias, MaterialBias, PrimaryLever, Recommendation, ShaftProfile, Tempo,
    Transition,
};
use super::signals::{GoalBias, SignalBundle};
use super::weight::WeightBand;
use super::EngineError;

/// The engine works on six-iron speed; the wizard collects seven-iron speed.
pub const SIX_IRON_SPEED_OFFSET_MPH: f64 = 4.0;

const SPEED_RANGE_MPH: (f64, f64) = (60.0, 110.0);
const WEIGHT_RANGE_G: (i32, i32) = (80, 130);
const SCORED_FIELDS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IronFix {
    Dispersion,
    DistanceLoss,
}

/// Contact category fed to the engine: low point dominates, then face strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IronContact {
    Thin,
    Fat,
    Center,
    Unknown,
}

impl IronContact {
    pub const fn classify(low_point: IronLowPoint, face_strike: IronFaceStrike) -> Self {
        match (low_point, face_strike) {
            (IronLowPoint::Fat, _) => Self::Fat,
            (IronLowPoint::Thin, _) => Self::Thin,
            (_, IronFaceStrike::Center) => Self::Center,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IronInputs {
    pub fix: IronFix,
    pub six_iron_speed_mph: f64,
    pub tempo: Tempo,
    pub transition: Transition,
    pub contact: IronContact,
    pub fatigue: Fatigue,
    pub anchor_g: Option<f64>,
    pub peak_feel: Flight,
    pub constraint: Constraint,
}

impl IronInputs {
    pub fn from_answers(answers: &Answers, signals: &SignalBundle) -> Self {
        let irons = &answers.irons;
        let fix = match irons.low_point {
            IronLowPoint::Fat | IronLowPoint::Thin => IronFix::DistanceLoss,
            _ => IronFix::Dispersion,
        };
        Self {
            fix,
            six_iron_speed_mph: signals.seven_iron_speed_mph + SIX_IRON_SPEED_OFFSET_MPH,
            tempo: Tempo::from_feel(irons.tempo),
            transition: Transition::from_feel(irons.tempo),
            contact: IronContact::classify(irons.low_point, irons.face_strike),
            fatigue: irons.fatigue,
            anchor_g: signals.iron_anchor_g,
            peak_feel: irons.peak,
            constraint: answers.constraint,
        }
    }
}

pub fn recommend_irons(inputs: &IronInputs) -> Result<Recommendation, EngineError> {
    if !inputs.six_iron_speed_mph.is_finite() {
        return Err(EngineError::NonFiniteSpeed(inputs.six_iron_speed_mph));
    }
    let speed = inputs
        .six_iron_speed_mph
        .clamp(SPEED_RANGE_MPH.0, SPEED_RANGE_MPH.1);

    let (weight_range, weight_mid) = pick_weight(speed, inputs);
    let launch_bias = pick_launch(inputs.peak_feel, inputs.fix, inputs.contact);

    let unknown_count = [
        inputs.contact == IronContact::Unknown,
        inputs.transition == Transition::Unknown,
        inputs.fatigue == Fatigue::Unsure,
        inputs.anchor_g.is_none(),
    ]
    .into_iter()
    .filter(|unknown| *unknown)
    .count() as u8;

    let volatility = volatility_from_flags(VolatilityFlags {
        both_sides: inputs.fix == IronFix::Dispersion,
        all_over_strike: inputs.contact == IronContact::Unknown,
        unsure_tempo: inputs.tempo == Tempo::Moderate,
        unsure_miss: false,
    });

    let fit_score = compute_fit_score(&ScoreInputs {
        category: ScoreCategory::Irons,
        alignment: alignment(inputs, launch_bias, weight_mid),
        confidence: confidence_from_unknowns(unknown_count, SCORED_FIELDS),
        volatility,
        unknown_count,
        derived_from_other: false,
    });

    Ok(Recommendation {
        fit_score,
        profile: ShaftProfile {
            weight_range,
            flex: pick_flex(speed).to_string(),
            torque_range: None,
            launch_bias,
            balance_bias: BalanceBias::Neutral,
            material_bias: Some(pick_material(inputs.fatigue, inputs.constraint)),
            head_bias: Some(pick_head_bias(inputs.contact, inputs.fix).to_string()),
        },
        primary_lever: None,
        notes: constraint_note(inputs.constraint)
            .map(str::to_string)
            .into_iter()
            .collect(),
        build_guide: Vec::new(),
    })
}

pub fn iron_primary_lever(goal_bias: &GoalBias, low_point: IronLowPoint) -> PrimaryLever {
    if matches!(low_point, IronLowPoint::Fat | IronLowPoint::Thin) {
        PrimaryLever::LowPointContact
    } else if goal_bias.stability >= 2 {
        PrimaryLever::StartLineStability
    } else {
        PrimaryLever::FatigueTiming
    }
}

fn pick_weight(speed: f64, inputs: &IronInputs) -> (WeightBand, f64) {
    let mut mid: i32 = if speed < 75.0 {
        90
    } else if speed < 85.0 {
        100
    } else if speed < 93.0 {
        110
    } else {
        120
    };

    match inputs.tempo {
        Tempo::Aggressive => mid += 5,
        Tempo::Smooth => mid -= 3,
        Tempo::Moderate => {}
    }

    match inputs.fatigue {
        Fatigue::Some => mid -= 5,
        Fatigue::ALot => mid -= 10,
        Fatigue::None | Fatigue::Unsure => {}
    }

    match inputs.constraint {
        Constraint::Elbow | Constraint::ShoulderBack => mid -= 8,
        Constraint::PreferLighter => mid -= 5,
        Constraint::None => {}
    }

    let mid = mid.clamp(WEIGHT_RANGE_G.0, WEIGHT_RANGE_G.1);
    let band = match mid {
        i32::MIN..=92 => WeightBand::new(85, 95),
        93..=104 => WeightBand::new(95, 105),
        105..=118 => WeightBand::new(105, 120),
        _ => WeightBand::open(120),
    };
    (band, f64::from(mid))
}

fn pick_flex(speed: f64) -> &'static str {
    if speed < 75.0 {
        "Regular (R)"
    } else if speed < 86.0 {
        "Regular (R) to Stiff (S)"
    } else if speed < 94.0 {
        "Stiff (S)"
    } else {
        "X-Stiff (X)"
    }
}

fn pick_material(fatigue: Fatigue, constraint: Constraint) -> MaterialBias {
    if constraint.is_physical() || fatigue == Fatigue::ALot {
        MaterialBias::Graphite
    } else if fatigue == Fatigue::Some {
        MaterialBias::Either
    } else {
        MaterialBias::Steel
    }
}

/// Peak height sets the direction; contact then pushes thin strikes up and caps fat ones.
fn pick_launch(peak: Flight, fix: IronFix, contact: IronContact) -> LaunchBias {
    let mut bias = match peak {
        Flight::Low => LaunchBias::High,
        Flight::High => LaunchBias::Low,
        Flight::Mid => LaunchBias::Mid,
    };

    if fix == IronFix::DistanceLoss && bias == LaunchBias::Mid {
        bias = LaunchBias::High;
    }
    if contact == IronContact::Thin {
        bias = LaunchBias::High;
    }
    if contact == IronContact::Fat && bias == LaunchBias::High {
        bias = LaunchBias::Mid;
    }
    bias
}

fn pick_head_bias(contact: IronContact, fix: IronFix) -> &'static str {
    match (contact, fix) {
        (IronContact::Unknown, _) => "Forgiving (mid-high MOI) to stabilize strike variation",
        (IronContact::Thin, _) => "More forgiving sole/launch help (helps thin contact and carry)",
        (IronContact::Fat, _) => "Sole interaction help (wider sole / more bounce tolerance)",
        (_, IronFix::DistanceLoss) => "Distance-friendly / launch-friendly iron category",
        _ => "Neutral players-cavity bias",
    }
}

fn alignment(inputs: &IronInputs, launch: LaunchBias, weight_mid: f64) -> f64 {
    let mut score = 0.70;

    score += match inputs.anchor_g {
        Some(anchor) => {
            let diff = (anchor - weight_mid).abs();
            if diff <= 8.0 {
                0.10
            } else if diff <= 14.0 {
                0.05
            } else if diff >= 22.0 {
                -0.10
            } else {
                -0.04
            }
        }
        None => -0.05,
    };

    score += match (inputs.peak_feel, launch) {
        (Flight::Low, LaunchBias::High) | (Flight::High, LaunchBias::Low) => 0.10,
        (Flight::Low, LaunchBias::Low) | (Flight::High, LaunchBias::High) => -0.05,
        _ => 0.0,
    };

    if launch == LaunchBias::High {
        match inputs.contact {
            IronContact::Thin => score += 0.05,
            IronContact::Fat => score -= 0.02,
            _ => {}
        }
        if inputs.fix == IronFix::DistanceLoss {
            score += 0.05;
        }
    }

    if inputs.fatigue == Fatigue::ALot {
        score += 0.03;
    }

    clamp_unit(score)
}

fn constraint_note(constraint: Constraint) -> Option<&'static str> {
    match constraint {
        Constraint::Elbow => Some(
            "Note: For elbow comfort, consider graphite or vibration-damping builds (and avoid overly harsh, heavy shafts).",
        ),
        Constraint::ShoulderBack => Some(
            "Note: For shoulder/back, avoid overly heavy total builds; prioritize smoother load.",
        ),
        Constraint::PreferLighter => {
            Some("Note: You prefer lighter feel, so we biased iron weight downward.")
        }
        Constraint::None => None,
    }
}
