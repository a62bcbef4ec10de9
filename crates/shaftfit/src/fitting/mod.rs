//! Shaft fitting engine: answer normalization, per-category recommendation engines,
//! score calibration, explanations, and the adaptive wizard that collects answers.
//!
//! Everything below `router` is synchronous and free of I/O; the wizard touches the
//! outside world only through the [`wizard::SnapshotStore`] trait.

pub mod answers;
pub mod calibrator;
pub mod driver;
pub mod explain;
pub mod irons;
pub mod profile;
pub mod results;
pub mod router;
pub mod signals;
pub mod wedges;
pub mod weight;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use answers::{
    Answers, Constraint, Curve, DriverAnswers, DriverShaftBucket, DriverStrike, Fatigue,
    FitFocus, Flight, Goal, IronAnswers, IronFaceStrike, IronLowPoint, IronShaftBucket,
    PlayFrequency, SpeedEntry, SpeedSource, StartLine, TempoFeel, Turf, WedgeAnswers, WedgeMiss,
    WedgeShaftPreference, WedgeSpin, WedgeTrajectory, WedgeUse,
};
pub use calibrator::{
    compute_fit_score, confidence_from_unknowns, volatility_from_flags, ScoreCategory,
    ScoreInputs, VolatilityFlags,
};
pub use driver::{derive_woods, recommend_driver, DriverFix, DriverImpact, DriverInputs};
pub use explain::{explain, Explanation, ExplanationInputs};
pub use irons::{recommend_irons, IronContact, IronFix, IronInputs};
pub use profile::{
    BalanceBias, LaunchBias, MaterialBias, PrimaryLever, Recommendation, ShaftProfile,
};
pub use results::{compute_results, overall_confidence, EngineOutcome, FitResult};
pub use router::fit_router;
pub use signals::{
    classify_face_control, estimate_speed, FaceBias, FaceControl, GoalBias, SignalBundle,
    SpeedCategory,
};
pub use wedges::{recommend_wedges, BounceBand, GappingPlan, WedgeInputs, WedgeRecommendation};
pub use weight::{add_mass_offset_label, WeightBand, MASS_OFFSET_G};
pub use wizard::{
    build_steps, transition, AnswerChange, ResumeOutcome, ResumeRequest, SnapshotError,
    SnapshotStore, Step, WizardAction, WizardController, WizardState,
};

/// Raised by an engine that cannot produce a profile from its inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("speed estimate is not a finite number: {0}")]
    NonFiniteSpeed(f64),
}
