//! Normalizes raw answers into the engineering quantities the engines consume.

use serde::Serialize;

use super::answers::{
    Answers, Curve, DriverShaftBucket, Goal, IronShaftBucket, SpeedEntry, StartLine,
};

/// Driver speed assumed when neither speed nor carry is known.
pub const DRIVER_SPEED_FALLBACK_MPH: f64 = 95.0;
/// Seven-iron speed derived from driver speed when the irons have no data.
pub const SEVEN_IRON_SPEED_RATIO: f64 = 0.78;
pub const SEVEN_IRON_SPEED_FLOOR_MPH: f64 = 65.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedCategory {
    Driver,
    SevenIron,
}

pub fn driver_speed_from_carry(carry_yds: f64) -> f64 {
    if carry_yds <= 180.0 {
        85.0
    } else if carry_yds <= 200.0 {
        92.0
    } else if carry_yds <= 220.0 {
        98.0
    } else if carry_yds <= 240.0 {
        105.0
    } else {
        112.0
    }
}

pub fn seven_iron_speed_from_carry(carry_yds: f64) -> f64 {
    if carry_yds <= 120.0 {
        70.0
    } else if carry_yds <= 140.0 {
        78.0
    } else if carry_yds <= 155.0 {
        84.0
    } else if carry_yds <= 170.0 {
        90.0
    } else {
        95.0
    }
}

/// Direct speed first, then the carry table, then the category fallback.
pub fn estimate_speed(category: SpeedCategory, answers: &Answers) -> f64 {
    match category {
        SpeedCategory::Driver => match answers.driver.speed {
            SpeedEntry::Measured { mph: Some(mph) } => mph,
            SpeedEntry::Carry { yards: Some(yards) } => driver_speed_from_carry(yards),
            _ => DRIVER_SPEED_FALLBACK_MPH,
        },
        SpeedCategory::SevenIron => match answers.irons.speed {
            SpeedEntry::Measured { mph: Some(mph) } => mph,
            SpeedEntry::Carry { yards: Some(yards) } => seven_iron_speed_from_carry(yards),
            _ => {
                let driver = estimate_speed(SpeedCategory::Driver, answers);
                (driver * SEVEN_IRON_SPEED_RATIO)
                    .round()
                    .max(SEVEN_IRON_SPEED_FLOOR_MPH)
            }
        },
    }
}

impl DriverShaftBucket {
    /// Representative grams for the bucket, used only as an alignment anchor.
    pub const fn anchor_grams(self) -> Option<f64> {
        match self {
            Self::DontKnow => None,
            Self::Under55 => Some(52.0),
            Self::From55To65 => Some(60.0),
            Self::From65To75 => Some(70.0),
            Self::Over75 => Some(78.0),
        }
    }
}

impl IronShaftBucket {
    pub const fn anchor_grams(self) -> Option<f64> {
        match self {
            Self::DontKnow => None,
            Self::From85To95 => Some(90.0),
            Self::From95To105 => Some(100.0),
            Self::From105To120 => Some(112.0),
            Self::Over120 => Some(125.0),
        }
    }
}

/// Priority weights accumulated from the selected goals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GoalBias {
    pub stability: u8,
    pub launch: u8,
    pub spin: u8,
    pub anchor_to_current: u8,
    pub weight_tolerance: u8,
}

impl GoalBias {
    pub fn from_goals(goals: &[Goal]) -> Self {
        goals.iter().fold(Self::default(), |mut bias, goal| {
            match goal {
                Goal::Accuracy => bias.stability += 2,
                Goal::ReduceSpin => {
                    bias.spin += 2;
                    bias.stability += 1;
                }
                Goal::HigherLaunch => bias.launch += 2,
                Goal::Distance => {
                    bias.launch += 1;
                    bias.weight_tolerance += 1;
                }
                Goal::Feel => bias.anchor_to_current += 2,
            }
            bias
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceBias {
    ReduceRight,
    ReduceLeft,
    Stability,
    Neutral,
    Unknown,
}

/// Directional read of start line and curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaceControl {
    pub label: &'static str,
    pub bias: FaceBias,
}

pub fn classify_face_control(start: StartLine, curve: Curve) -> FaceControl {
    let (label, bias) = match (start, curve) {
        (StartLine::Unsure, _) | (_, Curve::Unsure) => ("unknown", FaceBias::Unknown),
        (StartLine::Right, Curve::Fade) => ("starts right + fades", FaceBias::ReduceRight),
        (StartLine::Right, Curve::Straight) => ("starts right (no curve)", FaceBias::ReduceRight),
        (StartLine::Left, Curve::Draw) => ("starts left + draws", FaceBias::ReduceLeft),
        (StartLine::Left, Curve::Straight) => ("starts left (no curve)", FaceBias::ReduceLeft),
        (StartLine::Center, Curve::Fade) => ("starts center + fades", FaceBias::Stability),
        (StartLine::Center, Curve::Draw) => ("starts center + draws", FaceBias::Stability),
        _ => ("neutral", FaceBias::Neutral),
    };
    FaceControl { label, bias }
}

/// Everything derived from one answers snapshot. Rebuilt on every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalBundle {
    pub driver_speed_mph: f64,
    pub seven_iron_speed_mph: f64,
    pub driver_anchor_g: Option<f64>,
    pub iron_anchor_g: Option<f64>,
    pub goal_bias: GoalBias,
    pub driver_face: FaceControl,
    pub iron_face: FaceControl,
}

impl SignalBundle {
    pub fn from_answers(answers: &Answers) -> Self {
        Self {
            driver_speed_mph: estimate_speed(SpeedCategory::Driver, answers),
            seven_iron_speed_mph: estimate_speed(SpeedCategory::SevenIron, answers),
            driver_anchor_g: answers.driver.shaft_now.anchor_grams(),
            iron_anchor_g: answers.irons.shaft_now.anchor_grams(),
            goal_bias: GoalBias::from_goals(&answers.goals),
            driver_face: classify_face_control(answers.driver.start_line, answers.driver.curve),
            iron_face: classify_face_control(answers.irons.start_line, answers.irons.curve),
        }
    }
}
