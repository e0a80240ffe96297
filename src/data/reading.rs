//! A single sensor reading as returned by the store.

use chrono::{DateTime, FixedOffset};

/// Named numeric series in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Temperature,
    Humidity,
}

impl Field {
    /// The `_field` name used in the store.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Temperature => "temperature",
            Field::Humidity => "humidity",
        }
    }

    /// Map a `_field` column value back to a known field.
    ///
    /// Returns `None` for fields the dashboard does not display.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "temperature" => Some(Field::Temperature),
            "humidity" => Some(Field::Humidity),
            _ => None,
        }
    }
}

/// One record from the windowed range query.
///
/// Immutable once returned by the store; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub time: DateTime<FixedOffset>,
    pub field: Field,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        assert_eq!(Field::from_name("temperature"), Some(Field::Temperature));
        assert_eq!(Field::from_name("humidity"), Some(Field::Humidity));
        assert_eq!(Field::Temperature.name(), "temperature");
        assert_eq!(Field::Humidity.name(), "humidity");
    }

    #[test]
    fn test_unknown_field_is_none() {
        assert_eq!(Field::from_name("pressure"), None);
        assert_eq!(Field::from_name(""), None);
        // Field matching is exact, not case-insensitive
        assert_eq!(Field::from_name("Temperature"), None);
    }
}
