//! Optional vital-sign readings supplied alongside the symptom selection.
//!
//! Every vital is either a finite number or absent. Absent vitals never contribute to scoring
//! or red-flag checks, and raw caller input that does not parse as a number is treated as
//! absent rather than rejected.

use serde::Serialize;

/// The four vitals the engine understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VitalSign {
    Age,
    /// Symptom duration in days.
    Duration,
    /// Body temperature in degrees Celsius.
    Temperature,
    /// Heart rate in beats per minute.
    HeartRate,
}

impl VitalSign {
    /// Unit suffix used when rendering a threshold, including any separating space.
    pub fn unit(self) -> &'static str {
        match self {
            VitalSign::Age => " years",
            VitalSign::Duration => " days",
            VitalSign::Temperature => "°C",
            VitalSign::HeartRate => " bpm",
        }
    }
}

/// A set of optional vital readings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vitals {
    pub age: Option<f64>,
    pub duration: Option<f64>,
    pub temp: Option<f64>,
    pub hr: Option<f64>,
}

impl Vitals {
    /// Creates a reading set, dropping any non-finite value to absent.
    pub fn new(age: Option<f64>, duration: Option<f64>, temp: Option<f64>, hr: Option<f64>) -> Self {
        Self {
            age: age.filter(|v| v.is_finite()),
            duration: duration.filter(|v| v.is_finite()),
            temp: temp.filter(|v| v.is_finite()),
            hr: hr.filter(|v| v.is_finite()),
        }
    }

    /// Builds vitals from raw text fields as typed by a user.
    pub fn from_raw(age: &str, duration: &str, temp: &str, hr: &str) -> Self {
        Self::new(
            parse_vital(age),
            parse_vital(duration),
            parse_vital(temp),
            parse_vital(hr),
        )
    }

    /// Returns the reading for `sign`, if present.
    pub fn get(&self, sign: VitalSign) -> Option<f64> {
        match sign {
            VitalSign::Age => self.age,
            VitalSign::Duration => self.duration,
            VitalSign::Temperature => self.temp,
            VitalSign::HeartRate => self.hr,
        }
    }
}

/// Normalizes a raw vital input.
///
/// Empty input, text that is not a number, and non-finite numbers all map to `None`.
pub fn parse_vital(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vital_accepts_numbers() {
        assert_eq!(parse_vital("38.5"), Some(38.5));
        assert_eq!(parse_vital("  42 "), Some(42.0));
        assert_eq!(parse_vital("-3"), Some(-3.0));
        assert_eq!(parse_vital("1e2"), Some(100.0));
    }

    #[test]
    fn test_parse_vital_treats_garbage_as_absent() {
        assert_eq!(parse_vital(""), None);
        assert_eq!(parse_vital("   "), None);
        assert_eq!(parse_vital("hot"), None);
        assert_eq!(parse_vital("38,5"), None);
        assert_eq!(parse_vital("NaN"), None);
        assert_eq!(parse_vital("inf"), None);
    }

    #[test]
    fn test_from_raw_maps_each_field() {
        let vitals = Vitals::from_raw("30", "", "39.2", "abc");
        assert_eq!(vitals.age, Some(30.0));
        assert_eq!(vitals.duration, None);
        assert_eq!(vitals.get(VitalSign::Temperature), Some(39.2));
        assert_eq!(vitals.get(VitalSign::HeartRate), None);
    }

    #[test]
    fn test_new_drops_non_finite() {
        let vitals = Vitals::new(Some(f64::NAN), Some(2.0), Some(f64::INFINITY), None);
        assert_eq!(vitals, Vitals::new(None, Some(2.0), None, None));
    }
}
