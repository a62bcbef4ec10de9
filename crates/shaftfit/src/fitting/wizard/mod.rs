//! Adaptive question wizard.
//!
//! The step sequence is a pure function of the selected focus and every state change
//! goes through [`transition`]. [`WizardController`] layers result recomputation and
//! best-effort snapshot persistence on top of that reducer.

pub mod snapshot;
pub mod steps;
pub mod store;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::answers::{
    Answers, Constraint, Curve, DriverShaftBucket, DriverStrike, Fatigue, FitFocus, Flight, Goal,
    IronFaceStrike, IronLowPoint, IronShaftBucket, PlayFrequency, SpeedSource, StartLine,
    TempoFeel, Turf, WedgeMiss, WedgeShaftPreference, WedgeSpin, WedgeTrajectory, WedgeUse,
    DEFAULT_DRIVER_CARRY_YDS, DEFAULT_DRIVER_SPEED_MPH, DEFAULT_SEVEN_IRON_CARRY_YDS,
    DEFAULT_SEVEN_IRON_SPEED_MPH, MAX_HANDICAP_BAND,
};
use super::results::{compute_results, FitResult};

pub use snapshot::{
    answers_from_value, normalize_snapshot_object, parse_snapshot, SnapshotError, SNAPSHOT_KEY,
    VERIFIED_KEY,
};
pub use steps::{build_steps, handicap_label, Step};
pub use store::{MemorySnapshotStore, SnapshotStore, StoreError};

/// Clubs whose swing questions are asked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwingClub {
    Driver,
    Irons,
}

/// A single field edit on the answers record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerChange {
    Handicap(u8),
    PlayFrequency(PlayFrequency),
    ToggleGoal(Goal),
    Constraint(Constraint),
    SpeedSource { club: SwingClub, source: SpeedSource },
    SpeedValue { club: SwingClub, value: f64 },
    StartLine { club: SwingClub, start_line: StartLine },
    Curve { club: SwingClub, curve: Curve },
    Tempo { club: SwingClub, tempo: TempoFeel },
    DriverFlight(Flight),
    DriverStrike(DriverStrike),
    DriverShaft(DriverShaftBucket),
    IronPeak(Flight),
    IronLowPoint(IronLowPoint),
    IronFaceStrike(IronFaceStrike),
    IronFatigue(Fatigue),
    IronShaft(IronShaftBucket),
    WedgeUse(WedgeUse),
    WedgeTurf(Turf),
    WedgeMiss(WedgeMiss),
    WedgeTrajectory(WedgeTrajectory),
    WedgeSpin(WedgeSpin),
    WedgeShaftPreference(WedgeShaftPreference),
}

impl AnswerChange {
    pub fn apply(self, answers: &mut Answers) {
        match self {
            Self::Handicap(band) => answers.handicap_band = band.min(MAX_HANDICAP_BAND),
            Self::PlayFrequency(frequency) => answers.play_frequency = frequency,
            Self::ToggleGoal(goal) => {
                answers.toggle_goal(goal);
            }
            Self::Constraint(constraint) => answers.constraint = constraint,
            Self::SpeedSource { club, source } => match club {
                SwingClub::Driver => {
                    answers.driver.speed = answers.driver.speed.switch_to(
                        source,
                        DEFAULT_DRIVER_SPEED_MPH,
                        DEFAULT_DRIVER_CARRY_YDS,
                    );
                }
                SwingClub::Irons => {
                    answers.irons.speed = answers.irons.speed.switch_to(
                        source,
                        DEFAULT_SEVEN_IRON_SPEED_MPH,
                        DEFAULT_SEVEN_IRON_CARRY_YDS,
                    );
                }
            },
            Self::SpeedValue { club, value } => match club {
                SwingClub::Driver => answers.driver.speed = answers.driver.speed.with_value(value),
                SwingClub::Irons => answers.irons.speed = answers.irons.speed.with_value(value),
            },
            Self::StartLine { club, start_line } => match club {
                SwingClub::Driver => answers.driver.start_line = start_line,
                SwingClub::Irons => answers.irons.start_line = start_line,
            },
            Self::Curve { club, curve } => match club {
                SwingClub::Driver => answers.driver.curve = curve,
                SwingClub::Irons => answers.irons.curve = curve,
            },
            Self::Tempo { club, tempo } => match club {
                SwingClub::Driver => answers.driver.tempo = tempo,
                SwingClub::Irons => answers.irons.tempo = tempo,
            },
            Self::DriverFlight(flight) => answers.driver.flight = flight,
            Self::DriverStrike(strike) => answers.driver.strike = strike,
            Self::DriverShaft(bucket) => answers.driver.shaft_now = bucket,
            Self::IronPeak(peak) => answers.irons.peak = peak,
            Self::IronLowPoint(low_point) => answers.irons.low_point = low_point,
            Self::IronFaceStrike(strike) => answers.irons.face_strike = strike,
            Self::IronFatigue(fatigue) => answers.irons.fatigue = fatigue,
            Self::IronShaft(bucket) => answers.irons.shaft_now = bucket,
            Self::WedgeUse(usage) => answers.wedges.usage = usage,
            Self::WedgeTurf(turf) => answers.wedges.turf = turf,
            Self::WedgeMiss(miss) => answers.wedges.miss = miss,
            Self::WedgeTrajectory(trajectory) => answers.wedges.trajectory = trajectory,
            Self::WedgeSpin(spin) => answers.wedges.spin = spin,
            Self::WedgeShaftPreference(preference) => answers.wedges.shaft_preference = preference,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    Next,
    Back,
    /// Sets the focus and skips past the focus question.
    SelectFocus(FitFocus),
    Answer(AnswerChange),
    /// Replaces the answers and lands on the results step of the restored focus.
    Restore(Answers),
    JumpToResults,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WizardState {
    pub answers: Answers,
    pub step_index: usize,
}

impl WizardState {
    pub fn new(answers: Answers) -> Self {
        Self {
            answers,
            step_index: 0,
        }
    }

    pub fn steps(&self) -> Vec<Step> {
        build_steps(self.answers.focus)
    }

    pub fn current_step(&self) -> Step {
        let steps = self.steps();
        let index = clamp_index(self.step_index, steps.len());
        steps.get(index).copied().unwrap_or(Step::Results)
    }

    pub fn is_at_results(&self) -> bool {
        self.current_step() == Step::Results
    }

    pub fn progress_percent(&self) -> u8 {
        let len = self.steps().len();
        let last = len.saturating_sub(1).max(1);
        let index = clamp_index(self.step_index, len);
        ((index as f64 / last as f64) * 100.0).round() as u8
    }
}

/// Applies one action. The step index is clamped against the sequence built for the
/// resulting focus, so a focus change and its index jump never observe stale steps.
pub fn transition(state: WizardState, action: WizardAction) -> WizardState {
    let WizardState {
        mut answers,
        step_index,
    } = state;

    let target = match action {
        WizardAction::Next => step_index.saturating_add(1),
        WizardAction::Back => step_index.saturating_sub(1),
        WizardAction::SelectFocus(focus) => {
            answers.focus = focus;
            1
        }
        WizardAction::Answer(change) => {
            change.apply(&mut answers);
            step_index
        }
        WizardAction::Restore(restored) => {
            answers = restored;
            usize::MAX
        }
        WizardAction::JumpToResults => usize::MAX,
        WizardAction::Reset => {
            answers = Answers::default();
            0
        }
    };

    let len = build_steps(answers.focus).len();
    WizardState {
        answers,
        step_index: clamp_index(target, len),
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// How the wizard was entered from outside the question flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ResumeRequest {
    /// The golfer just verified their e-mail.
    #[serde(default)]
    pub verified: bool,
    /// The entry link asked for the results step.
    #[serde(default)]
    pub wants_results: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeOutcome {
    NotRequested,
    Restored,
    Defaulted,
}

/// Owns the wizard state, the latest results, and the persistence side effects.
pub struct WizardController<S> {
    state: WizardState,
    results: FitResult,
    store: Arc<S>,
    verified: bool,
}

impl<S> WizardController<S>
where
    S: SnapshotStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        let verified = matches!(store.get(VERIFIED_KEY), Ok(Some(flag)) if flag == "1");
        let state = WizardState::default();
        let results = compute_results(&state.answers);
        Self {
            state,
            results,
            store,
            verified,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn answers(&self) -> &Answers {
        &self.state.answers
    }

    pub fn results(&self) -> &FitResult {
        &self.results
    }

    pub fn steps(&self) -> Vec<Step> {
        self.state.steps()
    }

    pub fn current_step(&self) -> Step {
        self.state.current_step()
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Runs the reducer, recomputes results when the answers changed, and persists them.
    pub fn dispatch(&mut self, action: WizardAction) -> Step {
        let reset = matches!(action, WizardAction::Reset);
        let next = transition(self.state.clone(), action);
        let changed = next.answers != self.state.answers;
        self.state = next;

        if changed {
            self.results = compute_results(&self.state.answers);
        }
        if reset {
            self.forget_snapshot();
        } else if changed {
            self.persist_snapshot();
        }

        self.current_step()
    }

    /// Re-entry from an out-of-band step such as e-mail verification.
    pub fn resume(&mut self, request: ResumeRequest) -> ResumeOutcome {
        if request.verified {
            self.verified = true;
            if let Err(error) = self.store.set(VERIFIED_KEY, "1".to_string()) {
                debug!(%error, "could not persist verified flag");
            }
        }
        if !request.verified && !request.wants_results {
            return ResumeOutcome::NotRequested;
        }

        match self.load_snapshot() {
            Some(answers) => {
                self.dispatch(WizardAction::Restore(answers));
                ResumeOutcome::Restored
            }
            None => {
                self.dispatch(WizardAction::Restore(Answers::default()));
                ResumeOutcome::Defaulted
            }
        }
    }

    /// Restores from a payload handed back by the lead context lookup.
    pub fn resume_with_payload(&mut self, payload: Value) -> ResumeOutcome {
        match answers_from_value(payload) {
            Ok(answers) => {
                self.dispatch(WizardAction::Restore(answers));
                ResumeOutcome::Restored
            }
            Err(error) => {
                debug!(%error, "discarding malformed resume payload");
                self.dispatch(WizardAction::Restore(Answers::default()));
                ResumeOutcome::Defaulted
            }
        }
    }

    fn load_snapshot(&self) -> Option<Answers> {
        let raw = match self.store.get(SNAPSHOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                debug!(%error, "snapshot store read failed");
                return None;
            }
        };

        match parse_snapshot(&raw) {
            Ok(answers) => Some(answers),
            Err(error) => {
                debug!(%error, "discarding malformed answers snapshot");
                None
            }
        }
    }

    fn persist_snapshot(&self) {
        let raw = match serde_json::to_string(&self.state.answers) {
            Ok(raw) => raw,
            Err(error) => {
                debug!(%error, "could not serialize answers snapshot");
                return;
            }
        };
        if let Err(error) = self.store.set(SNAPSHOT_KEY, raw) {
            debug!(%error, "could not persist answers snapshot");
        }
    }

    fn forget_snapshot(&self) {
        if let Err(error) = self.store.remove(SNAPSHOT_KEY) {
            debug!(%error, "could not remove answers snapshot");
        }
    }
}
