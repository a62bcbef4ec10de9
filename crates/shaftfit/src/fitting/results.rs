use serde::Serialize;
use tracing::warn;

use super::answers::{
    Answers, Curve, DriverShaftBucket, FitFocus, IronFaceStrike, IronLowPoint, IronShaftBucket,
    StartLine,
};
use super::driver::{derive_woods, driver_primary_lever, recommend_driver, DriverInputs};
use super::explain::{explain, ExplanationInputs};
use super::irons::{iron_primary_lever, recommend_irons, IronInputs};
use super::profile::{BalanceBias, LaunchBias, MaterialBias, Recommendation, ShaftProfile};
use super::signals::{FaceControl, SignalBundle};
use super::wedges::{recommend_wedges, WedgeInputs, WedgeRecommendation};
use super::weight::WeightBand;
use super::EngineError;

pub const DRIVER_FALLBACK_SCORE: u8 = 78;
pub const IRON_FALLBACK_SCORE: u8 = 80;

const CONFIDENCE_START: i32 = 92;
const CONFIDENCE_RANGE: (i32, i32) = (55, 95);

/// Tags whether a recommendation came from the engine or the fallback table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", content = "recommendation", rename_all = "snake_case")]
pub enum EngineOutcome<T> {
    Computed(T),
    Fallback(T),
}

impl<T> EngineOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Computed(value) | Self::Fallback(value) => value,
        }
    }

    pub fn value_mut(&mut self) -> &mut T {
        match self {
            Self::Computed(value) | Self::Fallback(value) => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Computed(value) | Self::Fallback(value) => value,
        }
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Applies `f` while keeping the computed/fallback tag.
    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> EngineOutcome<U> {
        match self {
            Self::Computed(value) => EngineOutcome::Computed(f(value)),
            Self::Fallback(value) => EngineOutcome::Fallback(f(value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceReadout {
    pub driver: FaceControl,
    pub irons: FaceControl,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult {
    pub focus: FitFocus,
    pub driver_speed_estimate: u16,
    pub seven_iron_speed_estimate: u16,
    pub confidence: u8,
    pub face_control: FaceReadout,
    pub driver: Option<EngineOutcome<Recommendation>>,
    pub woods: Option<EngineOutcome<Recommendation>>,
    pub irons: Option<EngineOutcome<Recommendation>>,
    pub wedges: Option<WedgeRecommendation>,
    pub cause: Vec<String>,
    pub why: Vec<String>,
}

impl FitResult {
    /// Every fit score present in the result, in driver, woods, irons, wedges order.
    pub fn fit_scores(&self) -> Vec<u8> {
        [&self.driver, &self.woods, &self.irons]
            .into_iter()
            .flatten()
            .map(|outcome| outcome.value().fit_score)
            .chain(self.wedges.as_ref().map(|wedges| wedges.fit_score))
            .collect()
    }
}

/// Runs every engine the focus calls for and assembles the result record.
pub fn compute_results(answers: &Answers) -> FitResult {
    let signals = SignalBundle::from_answers(answers);
    let focus = answers.focus;

    let driver = focus.includes_driver().then(|| {
        let inputs = DriverInputs::from_answers(answers, &signals);
        let mut outcome = with_fallback("driver", recommend_driver(&inputs), || {
            fallback_driver(signals.driver_speed_mph)
        });
        outcome.value_mut().primary_lever =
            Some(driver_primary_lever(&signals.goal_bias, &signals.driver_face));
        outcome
    });

    let woods = driver.as_ref().map(|outcome| outcome.map(derive_woods));

    let irons = focus.includes_irons().then(|| {
        let inputs = IronInputs::from_answers(answers, &signals);
        let mut outcome = with_fallback("irons", recommend_irons(&inputs), || {
            fallback_irons(signals.seven_iron_speed_mph)
        });
        outcome.value_mut().primary_lever =
            Some(iron_primary_lever(&signals.goal_bias, answers.irons.low_point));
        outcome
    });

    let wedges = focus.includes_wedges().then(|| {
        recommend_wedges(&WedgeInputs {
            answers: &answers.wedges,
            goal_bias: signals.goal_bias,
            constraint: answers.constraint,
            seven_iron_speed_mph: signals.seven_iron_speed_mph,
            iron_weight: irons
                .as_ref()
                .map(|outcome| outcome.value().profile.weight_range),
        })
    });

    let explanation = explain(&ExplanationInputs {
        answers,
        signals: &signals,
        driver_score: driver.as_ref().map(|outcome| outcome.value().fit_score),
        iron_score: irons.as_ref().map(|outcome| outcome.value().fit_score),
        wedges: wedges.as_ref(),
    });

    FitResult {
        focus,
        driver_speed_estimate: round_speed(signals.driver_speed_mph),
        seven_iron_speed_estimate: round_speed(signals.seven_iron_speed_mph),
        confidence: overall_confidence(answers),
        face_control: FaceReadout {
            driver: signals.driver_face,
            irons: signals.iron_face,
        },
        driver,
        woods,
        irons,
        wedges,
        cause: explanation.cause,
        why: explanation.why,
    }
}

/// Answer completeness for the active focus, independent of the fit scores.
///
/// Wedge fitting leans on the iron speed proxy, so a wedges focus is scored on the iron
/// answers.
pub fn overall_confidence(answers: &Answers) -> u8 {
    let mut score = CONFIDENCE_START;
    let focus = answers.focus;

    if focus.includes_driver() {
        let driver = &answers.driver;
        score -= penalty(driver.speed.is_missing(), 8)
            + penalty(driver.start_line == StartLine::Unsure, 5)
            + penalty(driver.curve == Curve::Unsure, 5)
            + penalty(driver.shaft_now == DriverShaftBucket::DontKnow, 3);
    }

    if focus.includes_irons() || focus == FitFocus::Wedges {
        let irons = &answers.irons;
        score -= penalty(irons.speed.is_missing(), 8)
            + penalty(irons.start_line == StartLine::Unsure, 4)
            + penalty(irons.curve == Curve::Unsure, 4)
            + penalty(irons.low_point == IronLowPoint::Unsure, 4)
            + penalty(irons.face_strike == IronFaceStrike::Unsure, 3)
            + penalty(irons.shaft_now == IronShaftBucket::DontKnow, 3);
    }

    score -= penalty(answers.goals.is_empty(), 2);

    score.clamp(CONFIDENCE_RANGE.0, CONFIDENCE_RANGE.1) as u8
}

pub fn fallback_driver(speed_mph: f64) -> Recommendation {
    let (weight_range, flex) = if speed_mph >= 112.0 {
        (WeightBand::new(70, 80), "X")
    } else if speed_mph >= 102.0 {
        (WeightBand::new(60, 70), "Stiff")
    } else if speed_mph >= 92.0 {
        (WeightBand::new(55, 65), "Stiff / Regular+")
    } else {
        (WeightBand::new(50, 60), "Regular")
    };

    Recommendation {
        fit_score: DRIVER_FALLBACK_SCORE,
        profile: ShaftProfile {
            weight_range,
            flex: flex.to_string(),
            torque_range: Some("3.0–4.5".to_string()),
            launch_bias: LaunchBias::Mid,
            balance_bias: BalanceBias::Neutral,
            material_bias: None,
            head_bias: None,
        },
        primary_lever: None,
        notes: Vec::new(),
        build_guide: vec![
            "Test 2 shaft weights within the recommended band (±5g).".to_string(),
            "Validate start line + curve with 10 shots (don't trust \"feel\" alone).".to_string(),
        ],
    }
}

pub fn fallback_irons(seven_iron_speed_mph: f64) -> Recommendation {
    let (weight_range, flex) = if seven_iron_speed_mph >= 92.0 {
        (WeightBand::new(120, 130), "X")
    } else if seven_iron_speed_mph >= 85.0 {
        (WeightBand::new(110, 120), "Stiff+")
    } else if seven_iron_speed_mph >= 78.0 {
        (WeightBand::new(100, 110), "Stiff")
    } else {
        (WeightBand::new(90, 100), "Regular / Stiff border")
    };

    Recommendation {
        fit_score: IRON_FALLBACK_SCORE,
        profile: ShaftProfile {
            weight_range,
            flex: flex.to_string(),
            torque_range: None,
            launch_bias: LaunchBias::Mid,
            balance_bias: BalanceBias::Neutral,
            material_bias: Some(MaterialBias::SteelBaseline),
            head_bias: Some("Neutral head bias".to_string()),
        },
        primary_lever: None,
        notes: Vec::new(),
        build_guide: Vec::new(),
    }
}

fn with_fallback<T>(
    engine: &'static str,
    result: Result<T, EngineError>,
    fallback: impl FnOnce() -> T,
) -> EngineOutcome<T> {
    match result {
        Ok(value) => EngineOutcome::Computed(value),
        Err(error) => {
            warn!(engine, %error, "engine failed; serving fallback profile");
            EngineOutcome::Fallback(fallback())
        }
    }
}

fn penalty(applies: bool, points: i32) -> i32 {
    if applies {
        points
    } else {
        0
    }
}

fn round_speed(mph: f64) -> u16 {
    mph.round().clamp(0.0, f64::from(u16::MAX)) as u16
}
