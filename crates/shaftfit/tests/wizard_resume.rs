//! End-to-end wizard sessions through the public facade: answering, persisting,
//! and picking the session back up from the stored snapshot.

use std::sync::Arc;

use shaftfit::fitting::wizard::{MemorySnapshotStore, SnapshotStore, SwingClub, SNAPSHOT_KEY};
use shaftfit::fitting::{
    AnswerChange, FitFocus, Goal, IronLowPoint, ResumeOutcome, ResumeRequest, SpeedSource,
    Step, WizardAction, WizardController,
};

fn answer(change: AnswerChange) -> WizardAction {
    WizardAction::Answer(change)
}

#[test]
fn answered_session_resumes_on_results_after_verification() {
    let store = Arc::new(MemorySnapshotStore::default());
    let mut wizard = WizardController::new(store.clone());

    wizard.dispatch(WizardAction::SelectFocus(FitFocus::Irons));
    wizard.dispatch(answer(AnswerChange::ToggleGoal(Goal::Feel)));
    wizard.dispatch(answer(AnswerChange::SpeedSource {
        club: SwingClub::Irons,
        source: SpeedSource::Measured,
    }));
    wizard.dispatch(answer(AnswerChange::SpeedValue {
        club: SwingClub::Irons,
        value: 82.0,
    }));
    wizard.dispatch(answer(AnswerChange::IronLowPoint(IronLowPoint::Fat)));
    let scores = wizard.results().fit_scores();
    assert!(wizard.results().driver.is_none());
    assert!(wizard.results().irons.is_some());

    assert!(store.get(SNAPSHOT_KEY).expect("store readable").is_some());

    let mut resumed = WizardController::new(store.clone());
    assert!(!resumed.is_verified());
    let outcome = resumed.resume(ResumeRequest {
        verified: true,
        wants_results: false,
    });

    assert_eq!(outcome, ResumeOutcome::Restored);
    assert!(resumed.is_verified());
    assert_eq!(resumed.current_step(), Step::Results);
    assert_eq!(resumed.answers(), wizard.answers());
    assert_eq!(resumed.results().fit_scores(), scores);

    let reopened = WizardController::new(store);
    assert!(reopened.is_verified());
}

#[test]
fn plain_visit_does_not_jump_ahead() {
    let store = Arc::new(MemorySnapshotStore::default());
    let mut wizard = WizardController::new(store.clone());
    wizard.dispatch(WizardAction::SelectFocus(FitFocus::Wedges));

    let mut revisit = WizardController::new(store);
    let outcome = revisit.resume(ResumeRequest::default());

    assert_eq!(outcome, ResumeOutcome::NotRequested);
    assert_eq!(revisit.current_step(), Step::Focus);
    assert_eq!(revisit.answers().focus, FitFocus::DriverWoods);
}

#[test]
fn reset_clears_the_stored_snapshot() {
    let store = Arc::new(MemorySnapshotStore::default());
    let mut wizard = WizardController::new(store.clone());
    wizard.dispatch(WizardAction::SelectFocus(FitFocus::FullBag));
    assert!(store.get(SNAPSHOT_KEY).expect("store readable").is_some());

    let step = wizard.dispatch(WizardAction::Reset);

    assert_eq!(step, Step::Focus);
    assert!(store.get(SNAPSHOT_KEY).expect("store readable").is_none());
    assert_eq!(wizard.answers().focus, FitFocus::DriverWoods);
}
