use crate::infra::LogMailer;
use chrono::Utc;
use clap::Args;
use serde_json::Value;
use shaftfit::config::LeadConfig;
use shaftfit::error::AppError;
use shaftfit::fitting::wizard::{answers_from_value, handicap_label, MemorySnapshotStore, SwingClub};
use shaftfit::fitting::{
    build_steps, AnswerChange, Answers, Constraint, Curve, DriverStrike, EngineOutcome,
    FitFocus, FitResult, Flight, Goal, IronFaceStrike, IronLowPoint, Recommendation,
    SpeedSource, StartLine, TempoFeel, Turf, WedgeMiss, WedgeUse, WizardAction,
    WizardController,
};
use shaftfit::leads::{LeadService, LeadSubmission, MemoryLeadRepository};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct FitArgs {
    /// Answers snapshot (JSON). Defaults are used for anything missing.
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Override the focus stored in the snapshot
    #[arg(long, value_parser = crate::infra::parse_focus)]
    pub(crate) focus: Option<FitFocus>,
    /// Print the full result record as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct StepsArgs {
    /// driver_woods, irons, wedges or full_bag
    #[arg(long, value_parser = crate::infra::parse_focus, default_value = "driver_woods")]
    pub(crate) focus: FitFocus,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Focus for the scripted golfer (defaults to full_bag)
    #[arg(long, value_parser = crate::infra::parse_focus)]
    pub(crate) focus: Option<FitFocus>,
    /// Print the restored result record as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_fit(args: FitArgs) -> Result<(), AppError> {
    let FitArgs {
        answers,
        focus,
        json,
    } = args;

    let mut answers = match answers {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            let value: Value = serde_json::from_str(&raw).map_err(std::io::Error::other)?;
            answers_from_value(value)?
        }
        None => Answers::default(),
    };
    if let Some(focus) = focus {
        answers.focus = focus;
    }

    let result = shaftfit::fitting::compute_results(&answers);
    if json {
        let rendered = serde_json::to_string_pretty(&result).map_err(std::io::Error::other)?;
        println!("{}", rendered);
    } else {
        render_fit_result(&answers, &result);
    }

    Ok(())
}

pub(crate) fn run_steps(args: StepsArgs) {
    let steps = build_steps(args.focus);
    println!("{} ({} steps)", args.focus.label(), steps.len());
    for (index, step) in steps.iter().enumerate() {
        println!("{:>3}. {:<22} {}", index + 1, step.key(), step.title());
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let focus = args.focus.unwrap_or(FitFocus::FullBag);

    println!("Shaft fitting demo ({})", focus.label());
    let mut wizard = WizardController::new(Arc::new(MemorySnapshotStore::default()));
    for action in scripted_answers(focus) {
        wizard.dispatch(action);
    }
    wizard.dispatch(WizardAction::JumpToResults);
    println!(
        "- Answered {} steps, now on `{}` ({}% complete)",
        wizard.steps().len() - 1,
        wizard.current_step().key(),
        wizard.state().progress_percent()
    );
    render_fit_result(wizard.answers(), wizard.results());

    println!("\nLead capture (verification link echoed for local runs)");
    let service = LeadService::new(
        Arc::new(MemoryLeadRepository::default()),
        Arc::new(LogMailer::default()),
        LeadConfig::new(
            "http://127.0.0.1:3000",
            Some("Shaft Fit <fit@localhost>".to_string()),
            24,
            true,
        ),
    );
    let payload = serde_json::to_value(wizard.answers()).map_err(std::io::Error::other)?;
    let receipt = match service.submit(
        LeadSubmission {
            name: "Demo Golfer".to_string(),
            email: "demo.golfer@example.com".to_string(),
            payload,
        },
        Utc::now(),
    ) {
        Ok(receipt) => receipt,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };
    let Some(debug) = receipt.debug else {
        println!("  Lead {} stored; no verification link exposed", receipt.lead_id.0);
        return Ok(());
    };
    println!(
        "- Lead {} stored, message {} sent to {}",
        receipt.lead_id.0, debug.message_id, debug.to
    );

    let token = debug
        .verify_url
        .split_once("token=")
        .map(|(_, token)| token.to_string())
        .unwrap_or_default();
    let outcome = match service.verify(Some(&token), Utc::now()) {
        Ok(outcome) => outcome,
        Err(err) => {
            println!("  Verification failed: {}", err);
            return Ok(());
        }
    };
    println!("- Verify status: {}", outcome.status.as_str());
    println!("  Redirect: {}", service.redirect_location(&outcome));

    let context = match service.context(outcome.resume_token.as_deref(), Utc::now()) {
        Ok(context) => context,
        Err(err) => {
            println!("  Resume context unavailable: {}", err);
            return Ok(());
        }
    };

    let mut resumed = WizardController::new(Arc::new(MemorySnapshotStore::default()));
    let resume = resumed.resume_with_payload(context);
    println!(
        "- Resumed on `{}` ({:?}); scores match: {}",
        resumed.current_step().key(),
        resume,
        resumed.results().fit_scores() == wizard.results().fit_scores()
    );

    if args.json {
        match serde_json::to_string_pretty(resumed.results()) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("  Result payload unavailable: {}", err),
        }
    }

    Ok(())
}

fn scripted_answers(focus: FitFocus) -> Vec<WizardAction> {
    let mut actions = vec![
        WizardAction::SelectFocus(focus),
        WizardAction::Answer(AnswerChange::Handicap(1)),
        WizardAction::Answer(AnswerChange::ToggleGoal(Goal::Distance)),
        WizardAction::Answer(AnswerChange::Constraint(Constraint::None)),
    ];

    if focus.includes_driver() {
        actions.extend([
            WizardAction::Answer(AnswerChange::SpeedSource {
                club: SwingClub::Driver,
                source: SpeedSource::Measured,
            }),
            WizardAction::Answer(AnswerChange::SpeedValue {
                club: SwingClub::Driver,
                value: 104.0,
            }),
            WizardAction::Answer(AnswerChange::StartLine {
                club: SwingClub::Driver,
                start_line: StartLine::Right,
            }),
            WizardAction::Answer(AnswerChange::Curve {
                club: SwingClub::Driver,
                curve: Curve::Fade,
            }),
            WizardAction::Answer(AnswerChange::Tempo {
                club: SwingClub::Driver,
                tempo: TempoFeel::Quick,
            }),
            WizardAction::Answer(AnswerChange::DriverFlight(Flight::High)),
            WizardAction::Answer(AnswerChange::DriverStrike(DriverStrike::Toe)),
        ]);
    }

    if focus.includes_irons() {
        actions.extend([
            WizardAction::Answer(AnswerChange::SpeedValue {
                club: SwingClub::Irons,
                value: 160.0,
            }),
            WizardAction::Answer(AnswerChange::StartLine {
                club: SwingClub::Irons,
                start_line: StartLine::Center,
            }),
            WizardAction::Answer(AnswerChange::Curve {
                club: SwingClub::Irons,
                curve: Curve::Straight,
            }),
            WizardAction::Answer(AnswerChange::IronPeak(Flight::Mid)),
            WizardAction::Answer(AnswerChange::IronLowPoint(IronLowPoint::BallFirst)),
            WizardAction::Answer(AnswerChange::IronFaceStrike(IronFaceStrike::Center)),
        ]);
    }

    if focus.includes_wedges() {
        actions.extend([
            WizardAction::Answer(AnswerChange::WedgeUse(WedgeUse::MostlyGreenside)),
            WizardAction::Answer(AnswerChange::WedgeTurf(Turf::Digger)),
            WizardAction::Answer(AnswerChange::WedgeMiss(WedgeMiss::Fat)),
        ]);
    }

    actions
}

fn render_fit_result(answers: &Answers, result: &FitResult) {
    println!(
        "\nFit summary: {} | handicap {} | confidence {}%",
        result.focus.label(),
        handicap_label(answers.handicap_band),
        result.confidence
    );
    println!(
        "- Speed estimates: driver {} mph | 7-iron {} mph",
        result.driver_speed_estimate, result.seven_iron_speed_estimate
    );

    for (label, outcome) in [
        ("Driver", &result.driver),
        ("Woods", &result.woods),
        ("Irons", &result.irons),
    ] {
        if let Some(outcome) = outcome {
            render_recommendation(label, outcome);
        }
    }

    if let Some(wedges) = &result.wedges {
        println!(
            "- Wedges: fit {} | {} | bounce {} | {}",
            wedges.fit_score,
            wedges.profile.weight_range,
            wedges.profile.bounce.label(),
            wedges.profile.gapping.title
        );
        for note in &wedges.build_notes {
            println!("    - {}", note);
        }
    }

    if !result.cause.is_empty() {
        println!("Likely causes:");
        for line in &result.cause {
            println!("  - {}", line);
        }
    }
    if !result.why.is_empty() {
        println!("Why this profile:");
        for line in &result.why {
            println!("  - {}", line);
        }
    }
}

fn render_recommendation(label: &str, outcome: &EngineOutcome<Recommendation>) {
    let recommendation = outcome.value();
    let marker = if outcome.is_fallback() {
        " (fallback)"
    } else {
        ""
    };
    println!(
        "- {}{}: fit {} | {} | flex {} | {}",
        label,
        marker,
        recommendation.fit_score,
        recommendation.profile.weight_range,
        recommendation.profile.flex,
        recommendation.profile.summary()
    );
    if let Some(lever) = recommendation.primary_lever {
        println!("    Primary lever: {}", lever.label());
    }
    for note in &recommendation.notes {
        println!("    - {}", note);
    }
}
