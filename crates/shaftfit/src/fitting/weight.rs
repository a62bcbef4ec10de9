use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Grams added when a profile is derived from a lighter baseline (woods from driver,
/// heavier wedges from irons).
pub const MASS_OFFSET_G: u16 = 10;

/// Shaft weight range in grams. An open band (`hi == None`) renders as `"120g+"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeightBand {
    pub lo: u16,
    pub hi: Option<u16>,
}

impl WeightBand {
    pub const fn new(lo: u16, hi: u16) -> Self {
        Self { lo, hi: Some(hi) }
    }

    pub const fn open(lo: u16) -> Self {
        Self { lo, hi: None }
    }

    pub const fn is_open(&self) -> bool {
        self.hi.is_none()
    }

    /// Shifts both bounds. Open bands have no upper bound to move and are returned as-is.
    pub fn with_mass_offset(self, grams: u16) -> Self {
        match self.hi {
            Some(hi) => Self::new(self.lo.saturating_add(grams), hi.saturating_add(grams)),
            None => self,
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Reads a rendered label back. Any two integers separated by non-digits are
    /// accepted (`"60–70g"`, `"60-70 g"`); a single `"NNg+"` yields an open band.
    pub fn parse_label(label: &str) -> Option<Self> {
        let (range, open) = patterns()?;

        if let Some(captures) = range.captures(label) {
            let lo = captures.get(1)?.as_str().parse().ok()?;
            let hi = captures.get(2)?.as_str().parse().ok()?;
            return Some(Self::new(lo, hi));
        }

        let captures = open.captures(label)?;
        let lo = captures.get(1)?.as_str().parse().ok()?;
        Some(Self::open(lo))
    }
}

impl fmt::Display for WeightBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hi {
            Some(hi) => write!(f, "{}–{}g", self.lo, hi),
            None => write!(f, "{}g+", self.lo),
        }
    }
}

impl Serialize for WeightBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for WeightBand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_label(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized weight band `{raw}`")))
    }
}

/// String form of [`WeightBand::with_mass_offset`]. Labels that do not carry two
/// integers come back unchanged.
pub fn add_mass_offset_label(label: &str) -> String {
    match WeightBand::parse_label(label) {
        Some(band) if !band.is_open() => band.with_mass_offset(MASS_OFFSET_G).label(),
        _ => label.to_string(),
    }
}

fn patterns() -> Option<(&'static Regex, &'static Regex)> {
    static RANGE: OnceLock<Option<Regex>> = OnceLock::new();
    static OPEN: OnceLock<Option<Regex>> = OnceLock::new();

    let range = RANGE
        .get_or_init(|| Regex::new(r"(\d+)\D+(\d+)").ok())
        .as_ref()?;
    let open = OPEN
        .get_or_init(|| Regex::new(r"^\s*(\d+)\s*g\s*\+\s*$").ok())
        .as_ref()?;
    Some((range, open))
}
