use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One NAV row exactly as the catalog source reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNavPoint {
    pub date: String,
    pub nav: String,
}

/// Parse a NAV string. Anything unparseable or non-finite becomes 0.0 so the
/// downstream zero guards take over instead of an error.
pub fn parse_nav(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Single dated NAV observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavObservation {
    pub date: String,
    pub nav: f64,
}

impl NavObservation {
    pub fn new(date: impl Into<String>, nav: f64) -> Self {
        Self { date: date.into(), nav }
    }

    /// Calendar date of the observation. Accepts ISO-8601 (`2024-10-25`) and
    /// the catalog's day-first format (`25-10-2024`).
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let s = self.date.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(s, "%d-%m-%Y"))
            .ok()
    }
}

impl From<&RawNavPoint> for NavObservation {
    fn from(raw: &RawNavPoint) -> Self {
        Self {
            date: raw.date.clone(),
            nav: parse_nav(&raw.nav),
        }
    }
}

/// NAV history ordered most-recent-first: index 0 is the latest observation.
///
/// Horizon lookups are positional (trading-day offsets), so rows are never
/// reordered or dropped, even when a value fails to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavHistory(Vec<NavObservation>);

impl NavHistory {
    pub fn new(observations: Vec<NavObservation>) -> Self {
        Self(observations)
    }

    pub fn from_raw(points: &[RawNavPoint]) -> Self {
        Self(points.iter().map(NavObservation::from).collect())
    }

    /// Build from bare NAV values (most-recent-first) with no dates attached.
    pub fn from_navs(navs: &[f64]) -> Self {
        Self(navs.iter().map(|&nav| NavObservation::new("", nav)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NavObservation> {
        self.0.get(index)
    }

    pub fn latest(&self) -> Option<&NavObservation> {
        self.0.first()
    }

    pub fn oldest(&self) -> Option<&NavObservation> {
        self.0.last()
    }

    pub fn observations(&self) -> &[NavObservation] {
        &self.0
    }

    pub fn navs(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|o| o.nav)
    }
}

impl From<Vec<NavObservation>> for NavHistory {
    fn from(observations: Vec<NavObservation>) -> Self {
        Self(observations)
    }
}
