//! Rehydration of persisted answers, including legacy shapes.
//!
//! Decoding is all-or-nothing: missing fields take their defaults, but a single field
//! that does not fit the answers shape (an unknown enum value, a string where a number
//! belongs) rejects the whole snapshot with [`SnapshotError::Shape`]. The wizard then
//! starts from default answers instead of keeping the fields that did decode.

use serde_json::{Map, Value};
use tracing::debug;

use crate::fitting::answers::{Answers, Goal, MAX_GOALS, MAX_HANDICAP_BAND};

/// Storage key holding the last answers snapshot.
pub const SNAPSHOT_KEY: &str = "diagnostic_last_payload";
/// Storage key set to `"1"` once the golfer verified their e-mail.
pub const VERIFIED_KEY: &str = "lead_verified";

const LEGACY_GOAL_FIELD: &str = "goal";
const GOALS_FIELD: &str = "goals";
const HANDICAP_FIELD: &str = "handicap_band";

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("snapshot must be a JSON object")]
    NotAnObject,
    #[error("snapshot fields do not match the answers shape: {0}")]
    Shape(#[source] serde_json::Error),
}

pub fn parse_snapshot(raw: &str) -> Result<Answers, SnapshotError> {
    let value: Value = serde_json::from_str(raw).map_err(SnapshotError::Json)?;
    answers_from_value(value)
}

/// Normalizes legacy fields, then deserializes. Missing fields take their defaults.
pub fn answers_from_value(mut value: Value) -> Result<Answers, SnapshotError> {
    let object = value.as_object_mut().ok_or(SnapshotError::NotAnObject)?;
    normalize_snapshot_object(object);
    serde_json::from_value(value).map_err(SnapshotError::Shape)
}

/// Rewrites a snapshot object in place:
///
/// - a scalar `goal` is promoted to `goals: [goal]` and removed,
/// - a non-array `goals` becomes `["accuracy"]`,
/// - unknown and repeated goals are dropped and the list is capped at two,
/// - an out-of-range handicap band is clamped; a non-numeric one is dropped.
pub fn normalize_snapshot_object(object: &mut Map<String, Value>) {
    if let Some(legacy) = object.remove(LEGACY_GOAL_FIELD) {
        if !object.contains_key(GOALS_FIELD) {
            debug!("promoting legacy scalar goal to goals list");
            object.insert(GOALS_FIELD.to_string(), Value::Array(vec![legacy]));
        }
    }

    if let Some(goals) = object.get_mut(GOALS_FIELD) {
        *goals = normalize_goals(goals);
    }

    if let Some(band) = object.get(HANDICAP_FIELD) {
        match band.as_u64() {
            Some(band) if band > u64::from(MAX_HANDICAP_BAND) => {
                object.insert(HANDICAP_FIELD.to_string(), Value::from(MAX_HANDICAP_BAND));
            }
            Some(_) => {}
            None => {
                debug!("dropping non-numeric handicap band from snapshot");
                object.remove(HANDICAP_FIELD);
            }
        }
    }
}

fn normalize_goals(goals: &Value) -> Value {
    let Some(items) = goals.as_array() else {
        return Value::Array(vec![Value::from("accuracy")]);
    };

    let mut kept: Vec<Goal> = Vec::with_capacity(MAX_GOALS);
    for item in items {
        let Ok(goal) = serde_json::from_value::<Goal>(item.clone()) else {
            continue;
        };
        if kept.contains(&goal) {
            continue;
        }
        kept.push(goal);
        if kept.len() == MAX_GOALS {
            break;
        }
    }

    serde_json::to_value(kept).unwrap_or_else(|_| Value::Array(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitting::answers::FitFocus;
    use serde_json::json;

    #[test]
    fn legacy_scalar_goal_is_promoted() {
        let mut value = json!({ "goal": "feel" });
        let object = value.as_object_mut().expect("object");
        normalize_snapshot_object(object);
        assert_eq!(value, json!({ "goals": ["feel"] }));
    }

    #[test]
    fn explicit_goals_win_over_legacy_field() {
        let answers = answers_from_value(json!({ "goal": "feel", "goals": ["distance"] }))
            .expect("answers");
        assert_eq!(answers.goals, vec![Goal::Distance]);
    }

    #[test]
    fn malformed_goals_fall_back_to_accuracy() {
        let answers = answers_from_value(json!({ "goals": "distance" })).expect("answers");
        assert_eq!(answers.goals, vec![Goal::Accuracy]);
    }

    #[test]
    fn goals_are_deduplicated_filtered_and_capped() {
        let answers = answers_from_value(json!({
            "goals": ["feel", "putting", "feel", "distance", "reduce_spin"]
        }))
        .expect("answers");
        assert_eq!(answers.goals, vec![Goal::Feel, Goal::Distance]);
    }

    #[test]
    fn handicap_band_is_clamped() {
        let answers = answers_from_value(json!({ "handicap_band": 9 })).expect("answers");
        assert_eq!(answers.handicap_band, MAX_HANDICAP_BAND);

        let answers = answers_from_value(json!({ "handicap_band": "low" })).expect("answers");
        assert_eq!(answers.handicap_band, 2);
    }

    #[test]
    fn rejects_non_objects_and_bad_json() {
        assert!(matches!(
            answers_from_value(json!(["irons"])),
            Err(SnapshotError::NotAnObject)
        ));
        assert!(matches!(parse_snapshot("{ not json"), Err(SnapshotError::Json(_))));
        assert!(matches!(
            parse_snapshot(r#"{ "focus": "putter" }"#),
            Err(SnapshotError::Shape(_))
        ));
    }

    #[test]
    fn one_bad_field_rejects_the_whole_snapshot() {
        let raw = r#"{
            "focus": "irons",
            "handicap_band": 1,
            "wedges": { "turf": "digger", "miss": "sideways" }
        }"#;
        assert!(matches!(parse_snapshot(raw), Err(SnapshotError::Shape(_))));

        let repaired = raw.replace("sideways", "fat");
        let answers = parse_snapshot(&repaired).expect("answers");
        assert_eq!(answers.focus, FitFocus::Irons);
        assert_eq!(answers.handicap_band, 1);
    }

    #[test]
    fn parses_stored_snapshot() {
        let answers = parse_snapshot(r#"{ "focus": "wedges", "goal": "accuracy" }"#)
            .expect("answers");
        assert_eq!(answers.focus, FitFocus::Wedges);
        assert_eq!(answers.goals, vec![Goal::Accuracy]);
    }
}
