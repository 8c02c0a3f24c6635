//! Base implementation of records for logging.
use crate::error::RacerError;
use chrono::prelude::{DateTime, Local};
use std::collections::{hash_map::Iter, HashMap};

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone)]
pub enum RecordValue {
    /// A single floating-point value, typically used for metrics like episode return.
    Scalar(f32),

    /// A timestamp with local timezone, useful for logging events.
    DateTime(DateTime<Local>),

    /// A text value, e.g., the path of a saved model.
    String(String),
}

/// A container for storing key-value pairs of various data types.
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f32, RacerError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(RacerError::RecordValueTypeError("Scalar".to_string())),
            None => Err(RacerError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a string value from the record.
    pub fn get_string(&self, k: &str) -> Result<String, RacerError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(RacerError::RecordValueTypeError("String".to_string())),
            None => Err(RacerError::RecordKeyError(k.to_string())),
        }
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_value() {
        let mut record = Record::from_slice(&[
            ("env_steps", RecordValue::Scalar(1.0)),
            ("checkpoint", RecordValue::String("a".into())),
        ]);
        record.insert("env_steps", RecordValue::Scalar(2.0));
        assert_eq!(record.get_scalar("env_steps").unwrap(), 2.0);
        assert_eq!(record.get_string("checkpoint").unwrap(), "a");
        assert_eq!(record.iter().count(), 2);
    }

    #[test]
    fn test_typed_getters_report_errors() {
        let record = Record::from_scalar("reward", 1.5);
        assert!(matches!(
            record.get_string("reward"),
            Err(RacerError::RecordValueTypeError(_))
        ));
        assert!(matches!(
            record.get_scalar("missing"),
            Err(RacerError::RecordKeyError(_))
        ));
    }
}
