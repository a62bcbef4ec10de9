use serde::Serialize;

use crate::fitting::answers::{FitFocus, MAX_HANDICAP_BAND};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Focus,
    Handicap,
    Play,
    Goals,
    Constraints,
    DriverSpeed,
    DriverStartline,
    DriverCurve,
    DriverStrike,
    DriverFlight,
    DriverTempo,
    DriverShaftnow,
    IronSpeed,
    IronStartline,
    IronCurve,
    IronPeak,
    IronLowpoint,
    IronFacestrike,
    IronFatigue,
    IronTempo,
    IronShaftnow,
    WedgeUse,
    WedgeTurf,
    WedgeMiss,
    WedgeTraj,
    WedgeSpin,
    WedgeShaftpref,
    Results,
}

pub const SHARED_STEPS: [Step; 5] = [
    Step::Focus,
    Step::Handicap,
    Step::Play,
    Step::Goals,
    Step::Constraints,
];

pub const DRIVER_STEPS: [Step; 7] = [
    Step::DriverSpeed,
    Step::DriverStartline,
    Step::DriverCurve,
    Step::DriverStrike,
    Step::DriverFlight,
    Step::DriverTempo,
    Step::DriverShaftnow,
];

pub const IRON_STEPS: [Step; 9] = [
    Step::IronSpeed,
    Step::IronStartline,
    Step::IronCurve,
    Step::IronPeak,
    Step::IronLowpoint,
    Step::IronFacestrike,
    Step::IronFatigue,
    Step::IronTempo,
    Step::IronShaftnow,
];

pub const WEDGE_STEPS: [Step; 6] = [
    Step::WedgeUse,
    Step::WedgeTurf,
    Step::WedgeMiss,
    Step::WedgeTraj,
    Step::WedgeSpin,
    Step::WedgeShaftpref,
];

impl Step {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Handicap => "handicap",
            Self::Play => "play",
            Self::Goals => "goals",
            Self::Constraints => "constraints",
            Self::DriverSpeed => "driver_speed",
            Self::DriverStartline => "driver_startline",
            Self::DriverCurve => "driver_curve",
            Self::DriverStrike => "driver_strike",
            Self::DriverFlight => "driver_flight",
            Self::DriverTempo => "driver_tempo",
            Self::DriverShaftnow => "driver_shaftnow",
            Self::IronSpeed => "iron_speed",
            Self::IronStartline => "iron_startline",
            Self::IronCurve => "iron_curve",
            Self::IronPeak => "iron_peak",
            Self::IronLowpoint => "iron_lowpoint",
            Self::IronFacestrike => "iron_facestrike",
            Self::IronFatigue => "iron_fatigue",
            Self::IronTempo => "iron_tempo",
            Self::IronShaftnow => "iron_shaftnow",
            Self::WedgeUse => "wedge_use",
            Self::WedgeTurf => "wedge_turf",
            Self::WedgeMiss => "wedge_miss",
            Self::WedgeTraj => "wedge_traj",
            Self::WedgeSpin => "wedge_spin",
            Self::WedgeShaftpref => "wedge_shaftpref",
            Self::Results => "results",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Focus => "What are you fitting today?",
            Self::Handicap => "What's your handicap range?",
            Self::Play => "How often do you play?",
            Self::Goals => "What's your goal right now?",
            Self::Constraints => "Any physical constraints?",
            Self::DriverSpeed => "Driver speed",
            Self::DriverStartline => "Driver start line",
            Self::DriverCurve => "Driver curve",
            Self::DriverStrike => "DRIVER strike location",
            Self::DriverFlight => "Typical DRIVER flight",
            Self::DriverTempo => "DRIVER transition feel",
            Self::DriverShaftnow => "Current DRIVER shaft weight",
            Self::IronSpeed => "7-iron speed (or carry)",
            Self::IronStartline => "Iron start line",
            Self::IronCurve => "Iron curve",
            Self::IronPeak => "Typical IRON peak height",
            Self::IronLowpoint => "Iron low point control",
            Self::IronFacestrike => "Iron face strike location",
            Self::IronFatigue => "Fatigue with irons",
            Self::IronTempo => "IRON transition feel",
            Self::IronShaftnow => "Current IRON shaft weight",
            Self::WedgeUse => "How do you use your wedges most?",
            Self::WedgeTurf => "Turf interaction (digger vs sweeper)",
            Self::WedgeMiss => "Typical wedge miss",
            Self::WedgeTraj => "Preferred wedge trajectory",
            Self::WedgeSpin => "Preferred greenside rollout",
            Self::WedgeShaftpref => "Wedge shaft preference",
            Self::Results => "Your fit summary",
        }
    }

    /// Why the question is asked. Empty for the results step.
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Focus => "We'll ask only category-specific questions and generate separate profiles.",
            Self::Handicap => "Helps calibrate how aggressive we should be with fit precision.",
            Self::Play => "Frequent players benefit from tighter fits; occasional players need more forgiveness.",
            Self::Goals => "Select up to 2 priorities. We'll bias the fit accordingly.",
            Self::Constraints => "We bias away from builds likely to aggravate discomfort.",
            Self::DriverSpeed => "Sets the baseline for driver/woods shaft weight + flex.",
            Self::DriverStartline => "Start line is the cleanest signal for face control at impact.",
            Self::DriverCurve => "Curve helps separate face vs path influence (and guides stability bias).",
            Self::DriverStrike => "Strike location influences forgiveness and spin.",
            Self::DriverFlight => "Guides launch/spin directionally.",
            Self::DriverTempo => "Transition influences stability needs.",
            Self::DriverShaftnow => "Anchors recommendations to what you're used to.",
            Self::IronSpeed => "Irons need their own speed proxy; driver speed doesn't translate cleanly.",
            Self::IronStartline => "Start line reveals face control tendencies with irons.",
            Self::IronCurve => "Curve helps us understand your face-to-path pattern for iron stability bias.",
            Self::IronPeak => "Peak height guides launch and profile direction.",
            Self::IronLowpoint => "Low point is one of the biggest drivers of consistent contact and distance.",
            Self::IronFacestrike => "Heel/toe strike affects ball speed, start line, and consistency.",
            Self::IronFatigue => "Total weight/material should respect fatigue.",
            Self::IronTempo => "Iron transition can differ from driver; treat separately.",
            Self::IronShaftnow => "Anchors recommendations to your current feel.",
            Self::WedgeUse => "Determines whether we bias gapping for full shots vs greenside versatility.",
            Self::WedgeTurf => "Primary driver of bounce/sole direction and how the club enters/exits the turf.",
            Self::WedgeMiss => "Fat/thin patterns correlate with bounce/sole needs and strike stability.",
            Self::WedgeTraj => "Helps bias loft/gapping direction and build feel for flight control.",
            Self::WedgeSpin => "Influences loft spacing and bounce/grind direction for your typical shot style.",
            Self::WedgeShaftpref => "Wedges often match irons, or go slightly heavier for control; this sets the bias.",
            Self::Results => "",
        }
    }
}

/// Shared prefix, the focus-specific suffix (all three for a full bag), then results.
pub fn build_steps(focus: FitFocus) -> Vec<Step> {
    let mut steps = SHARED_STEPS.to_vec();
    if focus.includes_driver() {
        steps.extend(DRIVER_STEPS);
    }
    if focus.includes_irons() {
        steps.extend(IRON_STEPS);
    }
    if focus.includes_wedges() {
        steps.extend(WEDGE_STEPS);
    }
    steps.push(Step::Results);
    steps
}

pub fn handicap_label(band: u8) -> &'static str {
    match band.min(MAX_HANDICAP_BAND) {
        0 => "0–5",
        1 => "6–12",
        2 => "13–20",
        3 => "21–30",
        _ => "31+",
    }
}
