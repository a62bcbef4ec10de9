//! Plain-language cause and rationale statements for a computed fit.

use serde::Serialize;

use super::answers::{Answers, Curve, Goal, IronLowPoint, StartLine};
use super::signals::{FaceBias, SignalBundle};
use super::wedges::WedgeRecommendation;

pub const SEPARATE_CATEGORIES: &str =
    "Driver/Woods, irons, and wedges are evaluated separately (different jobs, different profiles).";
pub const CLOSING_STATEMENT: &str =
    "Equipment fit reduces penalties, but long-term ceiling is driven by face control + strike consistency.";

pub struct ExplanationInputs<'a> {
    pub answers: &'a Answers,
    pub signals: &'a SignalBundle,
    pub driver_score: Option<u8>,
    pub iron_score: Option<u8>,
    pub wedges: Option<&'a WedgeRecommendation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub cause: Vec<String>,
    pub why: Vec<String>,
}

pub fn explain(inputs: &ExplanationInputs<'_>) -> Explanation {
    let answers = inputs.answers;
    let mut cause: Vec<&str> = Vec::new();

    if inputs.driver_score.is_some() {
        cause.push(driver_face_statement(
            answers.driver.start_line,
            answers.driver.curve,
            inputs.signals.driver_face.bias,
        ));
    }

    if inputs.iron_score.is_some() {
        cause.extend(low_point_statement(answers.irons.low_point));
        cause.push(iron_face_statement(
            answers.irons.start_line,
            answers.irons.curve,
            inputs.signals.iron_face.bias,
        ));
    }

    if answers.has_goal(Goal::Accuracy) {
        cause.push(
            "Because accuracy is a selected goal, we keep you inside a stable weight band before tuning flex/profile.",
        );
    }
    if answers.constraint.is_set() {
        cause.push("Because a physical constraint is noted, we avoid overly heavy or harsh-feeling builds.");
    }

    let mut why = vec![SEPARATE_CATEGORIES.to_string()];
    if let Some(score) = inputs.driver_score {
        why.push(format!(
            "Driver + Woods Fit Score: {score}% (woods derived with +10g rule)."
        ));
    }
    if let Some(score) = inputs.iron_score {
        why.push(format!(
            "Iron Fit Score: {score}% (based on iron-specific inputs)."
        ));
    }
    if let Some(wedges) = inputs.wedges {
        why.push(format!(
            "Wedge Fit Score: {}% (based on turf interaction + miss + use pattern).",
            wedges.fit_score
        ));
    }
    why.push(CLOSING_STATEMENT.to_string());

    Explanation {
        cause: cause.into_iter().map(str::to_string).collect(),
        why,
    }
}

fn flight_is_known(start: StartLine, curve: Curve) -> bool {
    start != StartLine::Unsure && curve != Curve::Unsure
}

fn driver_face_statement(start: StartLine, curve: Curve, bias: FaceBias) -> &'static str {
    if !flight_is_known(start, curve) {
        return "Because your driver flight pattern is marked as unsure, we bias neutral and recommend validating start line + curve on the range.";
    }
    match bias {
        FaceBias::ReduceRight => "Because your driver starts right and fades, we prioritize face-control stability to reduce right-side misses.",
        FaceBias::ReduceLeft => "Because your driver starts left (with left bias), we bias toward anti-left stability (tip-stable / lower torque directionally).",
        FaceBias::Stability | FaceBias::Neutral | FaceBias::Unknown => "Because your driver pattern is relatively neutral, we keep the recommendation balanced and tune primarily for your speed + feel.",
    }
}

fn iron_face_statement(start: StartLine, curve: Curve, bias: FaceBias) -> &'static str {
    if !flight_is_known(start, curve) {
        return "Because iron start line/curve is marked unsure, we bias a stable baseline and recommend validating on the range.";
    }
    match bias {
        FaceBias::ReduceRight => "Because your irons start right with fade bias, we prioritize stability to help square the face more consistently.",
        FaceBias::ReduceLeft => "Because your irons show left bias, we favor anti-left stability so the face doesn't over-close.",
        FaceBias::Stability | FaceBias::Neutral | FaceBias::Unknown => "Because your iron pattern is relatively neutral, we keep the build balanced and anchor to speed + strike tendencies.",
    }
}

fn low_point_statement(low_point: IronLowPoint) -> Option<&'static str> {
    match low_point {
        IronLowPoint::Fat => Some("Because your iron low point tends to be behind the ball (fat), we bias toward contact consistency and forgiveness before chasing profile extremes."),
        IronLowPoint::Thin => Some("Because you tend to catch irons thin, we bias toward a build that supports consistent strike and avoids overly harsh/low-launch profiles."),
        IronLowPoint::BallFirst => Some("Because you tend to strike ball-first, we can be more aggressive about stability/profile tuning without sacrificing contact."),
        IronLowPoint::Shallow | IronLowPoint::Unsure => None,
    }
}
