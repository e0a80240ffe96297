//! Display state and chart series derived from a query result.
//!
//! Everything here is a pure function of the most recent result set.
//! [`DisplayState`] and [`ChartSeries`] are kept separate because the
//! error path replaces the readings but leaves the chart at its last
//! drawn state.

use chrono::{DateTime, Utc};

use super::reading::{Field, Reading};

/// Static alarm limits, fixed for the lifetime of the app.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Temperature limit in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity limit in percent.
    pub humidity: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature: 35.0,
            humidity: 80.0,
        }
    }
}

/// The displayed value for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReadingCell {
    /// No record for this field in the last result set.
    Missing,
    /// The last tick failed; the previous value must not be shown.
    Error,
    /// Latest value for the field.
    Value(f64),
}

impl ReadingCell {
    /// Text shown in the readings panel (without the unit suffix).
    pub fn label(&self) -> String {
        match self {
            ReadingCell::Missing => "--".to_string(),
            ReadingCell::Error => "-- (error)".to_string(),
            ReadingCell::Value(v) => format!("{:.1}", v),
        }
    }

    /// The numeric value, if one is displayed.
    pub fn value(&self) -> Option<f64> {
        match self {
            ReadingCell::Value(v) => Some(*v),
            _ => None,
        }
    }

    fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) => ReadingCell::Value(v),
            None => ReadingCell::Missing,
        }
    }
}

/// Latest readings plus the alarm flag.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub temperature: ReadingCell,
    pub humidity: ReadingCell,
    pub alarm: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            temperature: ReadingCell::Missing,
            humidity: ReadingCell::Missing,
            alarm: false,
        }
    }
}

impl DisplayState {
    /// Compute the display state from one query result.
    ///
    /// Per field the value is the first record encountered in query
    /// order; a field with no records shows the placeholder. The alarm
    /// fires if either present value exceeds its limit.
    pub fn from_readings(readings: &[Reading], thresholds: &Thresholds) -> Self {
        let mut temperature = None;
        let mut humidity = None;

        for reading in readings {
            match reading.field {
                Field::Temperature => {
                    if temperature.is_none() {
                        temperature = Some(reading.value);
                    }
                }
                Field::Humidity => {
                    if humidity.is_none() {
                        humidity = Some(reading.value);
                    }
                }
            }
        }

        let alarm = temperature.is_some_and(|v| v > thresholds.temperature)
            || humidity.is_some_and(|v| v > thresholds.humidity);

        Self {
            temperature: ReadingCell::from_option(temperature),
            humidity: ReadingCell::from_option(humidity),
            alarm,
        }
    }

    /// The state shown after a failed tick.
    ///
    /// Both readings become error placeholders; the alarm indicator is
    /// carried over unchanged, matching the chart's left-as-drawn
    /// behavior on this path.
    pub fn after_error(alarm: bool) -> Self {
        Self {
            temperature: ReadingCell::Error,
            humidity: ReadingCell::Error,
            alarm,
        }
    }
}

/// Two parallel time-ordered series for the line chart.
///
/// Points are `(unix seconds, value)`, drawn from the same result set
/// as the display state in a single pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub temperature: Vec<(f64, f64)>,
    pub humidity: Vec<(f64, f64)>,
}

impl ChartSeries {
    /// Build both series from one query result, preserving query order.
    pub fn from_readings(readings: &[Reading]) -> Self {
        let mut series = Self::default();
        for reading in readings {
            let point = (reading.time.timestamp() as f64, reading.value);
            match reading.field {
                Field::Temperature => series.temperature.push(point),
                Field::Humidity => series.humidity.push(point),
            }
        }
        series
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty() && self.humidity.is_empty()
    }

    /// Time bounds across both series, padded when degenerate.
    pub fn x_bounds(&self) -> [f64; 2] {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (x, _) in self.temperature.iter().chain(self.humidity.iter()) {
            min = min.min(*x);
            max = max.max(*x);
        }
        if !min.is_finite() {
            return [0.0, 1.0];
        }
        if min == max {
            // A single instant still needs a drawable span
            [min - 30.0, max + 30.0]
        } else {
            [min, max]
        }
    }

    /// Value bounds across both series, padded so lines stay off the frame.
    pub fn y_bounds(&self) -> [f64; 2] {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (_, y) in self.temperature.iter().chain(self.humidity.iter()) {
            min = min.min(*y);
            max = max.max(*y);
        }
        if !min.is_finite() {
            return [0.0, 100.0];
        }
        [(min - 5.0).floor(), (max + 5.0).ceil()]
    }
}

/// Format a unix-seconds axis position as `HH:MM:SS`.
pub fn format_epoch(secs: f64) -> String {
    DateTime::<Utc>::from_timestamp(secs as i64, 0)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn reading(secs: i64, field: Field, value: f64) -> Reading {
        Reading {
            time: utc().timestamp_opt(secs, 0).unwrap(),
            field,
            value,
        }
    }

    #[test]
    fn test_temperature_over_limit_triggers_alarm() {
        let readings = vec![
            reading(0, Field::Temperature, 36.0),
            reading(0, Field::Humidity, 50.0),
        ];
        let state = DisplayState::from_readings(&readings, &Thresholds::default());
        assert!(state.alarm);
        assert_eq!(state.temperature.label(), "36.0");
        assert_eq!(state.humidity.label(), "50.0");
    }

    #[test]
    fn test_humidity_alone_triggers_alarm() {
        let readings = vec![
            reading(0, Field::Temperature, 30.0),
            reading(0, Field::Humidity, 85.0),
        ];
        let state = DisplayState::from_readings(&readings, &Thresholds::default());
        assert!(state.alarm);
    }

    #[test]
    fn test_within_limits_no_alarm() {
        let readings = vec![
            reading(0, Field::Temperature, 34.9),
            reading(0, Field::Humidity, 80.0),
        ];
        let state = DisplayState::from_readings(&readings, &Thresholds::default());
        // Limits are exclusive: exactly at the limit does not alarm
        assert!(!state.alarm);
    }

    #[test]
    fn test_empty_result_set() {
        let state = DisplayState::from_readings(&[], &Thresholds::default());
        assert_eq!(state.temperature, ReadingCell::Missing);
        assert_eq!(state.humidity, ReadingCell::Missing);
        assert_eq!(state.temperature.label(), "--");
        assert!(!state.alarm);
    }

    #[test]
    fn test_missing_field_shows_placeholder_not_stale_value() {
        let readings = vec![reading(0, Field::Temperature, 36.0)];
        let state = DisplayState::from_readings(&readings, &Thresholds::default());
        assert_eq!(state.humidity, ReadingCell::Missing);
        assert!(state.alarm);

        // A later result with no temperature must not keep the old one
        let readings = vec![reading(10, Field::Humidity, 40.0)];
        let state = DisplayState::from_readings(&readings, &Thresholds::default());
        assert_eq!(state.temperature, ReadingCell::Missing);
        assert_eq!(state.humidity.label(), "40.0");
        assert!(!state.alarm);
    }

    #[test]
    fn test_first_record_per_field_wins() {
        let readings = vec![
            reading(0, Field::Temperature, 20.0),
            reading(10, Field::Temperature, 25.0),
            reading(20, Field::Temperature, 30.0),
        ];
        let state = DisplayState::from_readings(&readings, &Thresholds::default());
        assert_eq!(state.temperature, ReadingCell::Value(20.0));
    }

    #[test]
    fn test_after_error_replaces_readings_and_keeps_alarm() {
        let state = DisplayState::after_error(true);
        assert_eq!(state.temperature, ReadingCell::Error);
        assert_eq!(state.humidity, ReadingCell::Error);
        assert_eq!(state.temperature.label(), "-- (error)");
        assert!(state.alarm);

        assert!(!DisplayState::after_error(false).alarm);
    }

    #[test]
    fn test_chart_series_split_by_field_in_order() {
        let readings = vec![
            reading(0, Field::Temperature, 20.0),
            reading(0, Field::Humidity, 60.0),
            reading(10, Field::Temperature, 21.0),
            reading(10, Field::Humidity, 61.0),
        ];
        let series = ChartSeries::from_readings(&readings);
        assert_eq!(series.temperature, vec![(0.0, 20.0), (10.0, 21.0)]);
        assert_eq!(series.humidity, vec![(0.0, 60.0), (10.0, 61.0)]);
        assert!(!series.is_empty());
    }

    #[test]
    fn test_chart_bounds() {
        let readings = vec![
            reading(100, Field::Temperature, 20.0),
            reading(160, Field::Humidity, 60.0),
        ];
        let series = ChartSeries::from_readings(&readings);
        assert_eq!(series.x_bounds(), [100.0, 160.0]);
        assert_eq!(series.y_bounds(), [15.0, 65.0]);
    }

    #[test]
    fn test_chart_bounds_degenerate() {
        assert_eq!(ChartSeries::default().x_bounds(), [0.0, 1.0]);
        assert_eq!(ChartSeries::default().y_bounds(), [0.0, 100.0]);

        let series = ChartSeries::from_readings(&[reading(60, Field::Temperature, 20.0)]);
        assert_eq!(series.x_bounds(), [30.0, 90.0]);
    }

    #[test]
    fn test_format_epoch() {
        assert_eq!(format_epoch(0.0), "00:00:00");
        assert_eq!(format_epoch(3661.0), "01:01:01");
    }
}
