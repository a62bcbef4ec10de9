//! The raw answers record owned by the wizard.
//!
//! Every field has a default so a partially filled (or legacy) snapshot still
//! deserializes into a complete record.

use serde::{Deserialize, Serialize};

/// Most goals a golfer may prioritise at once.
pub const MAX_GOALS: usize = 2;

/// Highest handicap band index (`31+`).
pub const MAX_HANDICAP_BAND: u8 = 4;

pub const DEFAULT_DRIVER_SPEED_MPH: f64 = 95.0;
pub const DEFAULT_DRIVER_CARRY_YDS: f64 = 220.0;
pub const DEFAULT_SEVEN_IRON_SPEED_MPH: f64 = 84.0;
pub const DEFAULT_SEVEN_IRON_CARRY_YDS: f64 = 145.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitFocus {
    DriverWoods,
    Irons,
    Wedges,
    FullBag,
}

impl FitFocus {
    pub const fn ordered() -> [Self; 4] {
        [Self::DriverWoods, Self::Irons, Self::Wedges, Self::FullBag]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::DriverWoods => "driver_woods",
            Self::Irons => "irons",
            Self::Wedges => "wedges",
            Self::FullBag => "full_bag",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DriverWoods => "Driver + Woods",
            Self::Irons => "Irons",
            Self::Wedges => "Wedges",
            Self::FullBag => "Full bag",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|focus| focus.key() == key)
    }

    pub const fn includes_driver(self) -> bool {
        matches!(self, Self::DriverWoods | Self::FullBag)
    }

    pub const fn includes_irons(self) -> bool {
        matches!(self, Self::Irons | Self::FullBag)
    }

    pub const fn includes_wedges(self) -> bool {
        matches!(self, Self::Wedges | Self::FullBag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayFrequency {
    Monthly,
    Weekly,
    TwiceWeekly,
    ThreePlus,
    RangeOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Distance,
    Accuracy,
    HigherLaunch,
    ReduceSpin,
    Feel,
}

impl Goal {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Distance => "More distance",
            Self::Accuracy => "More fairways",
            Self::HigherLaunch => "Higher launch",
            Self::ReduceSpin => "Reduce spin",
            Self::Feel => "Better feel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    None,
    Elbow,
    ShoulderBack,
    PreferLighter,
}

impl Constraint {
    /// Elbow or shoulder/back discomfort.
    pub const fn is_physical(self) -> bool {
        matches!(self, Self::Elbow | Self::ShoulderBack)
    }

    pub const fn is_set(self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedSource {
    Measured,
    Carry,
}

/// Either a measured club speed or a carry distance, never both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SpeedEntry {
    Measured {
        #[serde(default)]
        mph: Option<f64>,
    },
    Carry {
        #[serde(default)]
        yards: Option<f64>,
    },
}

impl SpeedEntry {
    pub const fn source(&self) -> SpeedSource {
        match self {
            Self::Measured { .. } => SpeedSource::Measured,
            Self::Carry { .. } => SpeedSource::Carry,
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Self::Measured { mph } => mph.is_none(),
            Self::Carry { yards } => yards.is_none(),
        }
    }

    /// Switches the active source. Staying on the same source keeps the current
    /// value (or seeds the default when empty); switching seeds the default and
    /// drops the sibling value.
    pub fn switch_to(self, source: SpeedSource, default_mph: f64, default_yards: f64) -> Self {
        match (self, source) {
            (Self::Measured { mph }, SpeedSource::Measured) => Self::Measured {
                mph: Some(mph.unwrap_or(default_mph)),
            },
            (Self::Carry { yards }, SpeedSource::Carry) => Self::Carry {
                yards: Some(yards.unwrap_or(default_yards)),
            },
            (_, SpeedSource::Measured) => Self::Measured {
                mph: Some(default_mph),
            },
            (_, SpeedSource::Carry) => Self::Carry {
                yards: Some(default_yards),
            },
        }
    }

    /// Writes a value into whichever field is active.
    pub fn with_value(self, value: f64) -> Self {
        match self {
            Self::Measured { .. } => Self::Measured { mph: Some(value) },
            Self::Carry { .. } => Self::Carry { yards: Some(value) },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartLine {
    Left,
    Center,
    Right,
    Unsure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    Draw,
    Straight,
    Fade,
    Unsure,
}

/// Self-reported flight (driver) or peak height (irons).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flight {
    Low,
    Mid,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStrike {
    Heel,
    Center,
    Toe,
    AllOver,
}

/// Transition feel as the golfer describes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempoFeel {
    Smooth,
    Neutral,
    Quick,
    Unsure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverShaftBucket {
    #[serde(rename = "dont_know")]
    DontKnow,
    #[serde(rename = "lt_55")]
    Under55,
    #[serde(rename = "55_65")]
    From55To65,
    #[serde(rename = "65_75")]
    From65To75,
    #[serde(rename = "75_plus")]
    Over75,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IronShaftBucket {
    #[serde(rename = "dont_know")]
    DontKnow,
    #[serde(rename = "85_95")]
    From85To95,
    #[serde(rename = "95_105")]
    From95To105,
    #[serde(rename = "105_120")]
    From105To120,
    #[serde(rename = "120_plus")]
    Over120,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fatigue {
    None,
    Some,
    #[serde(alias = "aLot")]
    ALot,
    Unsure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IronLowPoint {
    BallFirst,
    Shallow,
    Fat,
    Thin,
    Unsure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IronFaceStrike {
    Heel,
    Center,
    Toe,
    Mixed,
    Unsure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WedgeUse {
    MostlyFull,
    Mixed,
    MostlyGreenside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Turf {
    Digger,
    Neutral,
    Sweeper,
    Unsure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WedgeMiss {
    Fat,
    Thin,
    Both,
    Unsure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WedgeTrajectory {
    Lower,
    Neutral,
    Higher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WedgeSpin {
    MoreCheck,
    Balanced,
    MoreRelease,
    Unsure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WedgeShaftPreference {
    MatchIrons,
    SlightlyHeavier,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverAnswers {
    pub speed: SpeedEntry,
    pub start_line: StartLine,
    pub curve: Curve,
    pub flight: Flight,
    pub strike: DriverStrike,
    pub tempo: TempoFeel,
    pub shaft_now: DriverShaftBucket,
}

impl Default for DriverAnswers {
    fn default() -> Self {
        Self {
            speed: SpeedEntry::Carry {
                yards: Some(DEFAULT_DRIVER_CARRY_YDS),
            },
            start_line: StartLine::Unsure,
            curve: Curve::Unsure,
            flight: Flight::Mid,
            strike: DriverStrike::AllOver,
            tempo: TempoFeel::Neutral,
            shaft_now: DriverShaftBucket::DontKnow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IronAnswers {
    pub speed: SpeedEntry,
    pub start_line: StartLine,
    pub curve: Curve,
    pub peak: Flight,
    pub low_point: IronLowPoint,
    pub face_strike: IronFaceStrike,
    pub fatigue: Fatigue,
    pub tempo: TempoFeel,
    pub shaft_now: IronShaftBucket,
}

impl Default for IronAnswers {
    fn default() -> Self {
        Self {
            speed: SpeedEntry::Carry {
                yards: Some(DEFAULT_SEVEN_IRON_CARRY_YDS),
            },
            start_line: StartLine::Unsure,
            curve: Curve::Unsure,
            peak: Flight::Mid,
            low_point: IronLowPoint::Unsure,
            face_strike: IronFaceStrike::Unsure,
            fatigue: Fatigue::Unsure,
            tempo: TempoFeel::Neutral,
            shaft_now: IronShaftBucket::DontKnow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WedgeAnswers {
    pub usage: WedgeUse,
    pub turf: Turf,
    pub miss: WedgeMiss,
    pub trajectory: WedgeTrajectory,
    pub spin: WedgeSpin,
    pub shaft_preference: WedgeShaftPreference,
}

impl Default for WedgeAnswers {
    fn default() -> Self {
        Self {
            usage: WedgeUse::Mixed,
            turf: Turf::Neutral,
            miss: WedgeMiss::Unsure,
            trajectory: WedgeTrajectory::Neutral,
            spin: WedgeSpin::Balanced,
            shaft_preference: WedgeShaftPreference::Unknown,
        }
    }
}

/// Every answer the wizard collects, grouped by club category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Answers {
    pub focus: FitFocus,
    /// Index into the handicap bands (`0–5` .. `31+`).
    pub handicap_band: u8,
    pub play_frequency: PlayFrequency,
    pub goals: Vec<Goal>,
    pub constraint: Constraint,
    pub driver: DriverAnswers,
    pub irons: IronAnswers,
    pub wedges: WedgeAnswers,
}

impl Default for Answers {
    fn default() -> Self {
        Self {
            focus: FitFocus::DriverWoods,
            handicap_band: 2,
            play_frequency: PlayFrequency::Weekly,
            goals: vec![Goal::Accuracy],
            constraint: Constraint::None,
            driver: DriverAnswers::default(),
            irons: IronAnswers::default(),
            wedges: WedgeAnswers::default(),
        }
    }
}

impl Answers {
    /// Adds or removes a goal. A third goal is ignored; returns whether the set changed.
    pub fn toggle_goal(&mut self, goal: Goal) -> bool {
        if let Some(position) = self.goals.iter().position(|existing| *existing == goal) {
            self.goals.remove(position);
            return true;
        }
        if self.goals.len() >= MAX_GOALS {
            return false;
        }
        self.goals.push(goal);
        true
    }

    pub fn has_goal(&self, goal: Goal) -> bool {
        self.goals.contains(&goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn toggling_goals_caps_at_two() {
        let mut answers = Answers::default();
        assert!(answers.toggle_goal(Goal::Distance));
        assert!(!answers.toggle_goal(Goal::Feel));
        assert_eq!(answers.goals, vec![Goal::Accuracy, Goal::Distance]);

        assert!(answers.toggle_goal(Goal::Accuracy));
        assert_eq!(answers.goals, vec![Goal::Distance]);
    }

    #[test]
    fn switching_speed_source_clears_sibling() {
        let carry = SpeedEntry::Carry { yards: Some(250.0) };
        let measured = carry.switch_to(
            SpeedSource::Measured,
            DEFAULT_DRIVER_SPEED_MPH,
            DEFAULT_DRIVER_CARRY_YDS,
        );
        assert_eq!(measured, SpeedEntry::Measured { mph: Some(95.0) });

        let back = measured.switch_to(
            SpeedSource::Carry,
            DEFAULT_DRIVER_SPEED_MPH,
            DEFAULT_DRIVER_CARRY_YDS,
        );
        assert_eq!(back, SpeedEntry::Carry { yards: Some(220.0) });
    }

    #[test]
    fn staying_on_source_keeps_value() {
        let measured = SpeedEntry::Measured { mph: Some(104.0) };
        let same = measured.switch_to(SpeedSource::Measured, 95.0, 220.0);
        assert_eq!(same, measured);
    }

    #[test]
    fn partial_snapshot_fills_defaults() {
        let answers: Answers = serde_json::from_value(json!({
            "focus": "irons",
            "irons": { "fatigue": "aLot", "speed": { "source": "measured", "mph": 82.0 } }
        }))
        .expect("partial answers deserialize");

        assert_eq!(answers.focus, FitFocus::Irons);
        assert_eq!(answers.irons.fatigue, Fatigue::ALot);
        assert_eq!(answers.irons.speed, SpeedEntry::Measured { mph: Some(82.0) });
        assert_eq!(answers.irons.peak, Flight::Mid);
        assert_eq!(answers.goals, vec![Goal::Accuracy]);
        assert_eq!(answers.driver, DriverAnswers::default());
    }

    #[test]
    fn shaft_buckets_use_range_keys() {
        let value = serde_json::to_value(DriverShaftBucket::From55To65).expect("serializes");
        assert_eq!(value, json!("55_65"));
        let bucket: IronShaftBucket = serde_json::from_value(json!("120_plus")).expect("parses");
        assert_eq!(bucket, IronShaftBucket::Over120);
    }

    #[test]
    fn focus_keys_parse_loosely() {
        assert_eq!(FitFocus::from_key("full-bag"), Some(FitFocus::FullBag));
        assert_eq!(FitFocus::from_key(" Wedges "), Some(FitFocus::Wedges));
        assert_eq!(FitFocus::from_key("putter"), None);
    }
}
