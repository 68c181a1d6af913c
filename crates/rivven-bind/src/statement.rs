//! Statement traits for rivven-bind
//!
//! - StatementBinder: positional binding, one value per placeholder
//! - ParameterBuffer: a binder that collects values for later execution
//! - PreparedStatement: parameterized statement execution

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{Error, Result};
use crate::types::Value;

/// Positional value binding for a prepared statement
///
/// Positions are 1-based. Implementations may reject a value (for example
/// an out-of-range position) by returning [`Error::Bind`].
pub trait StatementBinder {
    /// Bind `value` at `position`
    fn bind_value(&mut self, position: usize, value: Value) -> Result<()>;

    /// Bind SQL NULL
    fn bind_null(&mut self, position: usize) -> Result<()> {
        self.bind_value(position, Value::Null)
    }

    /// Bind a string
    fn bind_string(&mut self, position: usize, value: String) -> Result<()> {
        self.bind_value(position, Value::String(value))
    }

    /// Bind a byte array
    fn bind_bytes(&mut self, position: usize, value: Vec<u8>) -> Result<()> {
        self.bind_value(position, Value::Bytes(value))
    }

    /// Bind a 64-bit integer
    fn bind_i64(&mut self, position: usize, value: i64) -> Result<()> {
        self.bind_value(position, Value::Int64(value))
    }

    /// Bind a 32-bit integer
    fn bind_i32(&mut self, position: usize, value: i32) -> Result<()> {
        self.bind_value(position, Value::Int32(value))
    }

    /// Bind a double
    fn bind_f64(&mut self, position: usize, value: f64) -> Result<()> {
        self.bind_value(position, Value::Float64(value))
    }

    /// Bind a float
    fn bind_f32(&mut self, position: usize, value: f32) -> Result<()> {
        self.bind_value(position, Value::Float32(value))
    }

    /// Bind a date
    fn bind_date(&mut self, position: usize, value: NaiveDate) -> Result<()> {
        self.bind_value(position, Value::Date(value))
    }

    /// Bind a timestamp without timezone
    fn bind_datetime(&mut self, position: usize, value: NaiveDateTime) -> Result<()> {
        self.bind_value(position, Value::DateTime(value))
    }

    /// Bind a timestamp with timezone
    fn bind_timestamp(&mut self, position: usize, value: DateTime<Utc>) -> Result<()> {
        self.bind_value(position, Value::DateTimeTz(value))
    }
}

impl<T: StatementBinder + ?Sized> StatementBinder for &mut T {
    fn bind_value(&mut self, position: usize, value: Value) -> Result<()> {
        (**self).bind_value(position, value)
    }
}

/// Collects positional values for one statement execution
///
/// Positions that were never bound read back as `Value::Null`. An optional
/// capacity rejects positions past the statement's placeholder count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBuffer {
    values: Vec<Value>,
    capacity: Option<usize>,
}

impl ParameterBuffer {
    /// Create an unbounded buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer that accepts positions `1..=count`
    ///
    /// Every position starts as `Value::Null`, so a position nothing binds
    /// still reaches the statement.
    pub fn with_capacity(count: usize) -> Self {
        Self {
            values: vec![Value::Null; count],
            capacity: Some(count),
        }
    }

    /// Value bound at `position`, if the position has been reached
    pub fn get(&self, position: usize) -> Option<&Value> {
        position.checked_sub(1).and_then(|idx| self.values.get(idx))
    }

    /// Number of positions covered so far
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing has been bound
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bound values in position order
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume the buffer, returning values in position order
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

}

impl StatementBinder for ParameterBuffer {
    fn bind_value(&mut self, position: usize, value: Value) -> Result<()> {
        if position == 0 {
            return Err(Error::bind(position, "parameter positions start at 1"));
        }
        if let Some(capacity) = self.capacity {
            if position > capacity {
                return Err(Error::bind(
                    position,
                    format!("statement has only {} parameters", capacity),
                ));
            }
        }
        if self.values.len() < position {
            self.values.resize(position, Value::Null);
        }
        self.values[position - 1] = value;
        Ok(())
    }
}

/// A prepared statement
#[async_trait]
pub trait PreparedStatement: Send + Sync {
    /// Execute the prepared statement with given parameters
    async fn execute(&self, params: &[Value]) -> Result<u64>;

    /// Get the SQL string
    fn sql(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_fills_gaps_with_null() {
        let mut buf = ParameterBuffer::new();
        buf.bind_i64(3, 42).unwrap();

        assert_eq!(buf.len(), 3);
        assert_eq!(buf.get(1), Some(&Value::Null));
        assert_eq!(buf.get(2), Some(&Value::Null));
        assert_eq!(buf.get(3), Some(&Value::Int64(42)));
        assert_eq!(buf.get(0), None);
    }

    #[test]
    fn test_buffer_overwrites_position() {
        let mut buf = ParameterBuffer::new();
        buf.bind_string(1, "a".into()).unwrap();
        buf.bind_string(1, "b".into()).unwrap();
        assert_eq!(buf.values(), &[Value::String("b".into())]);
    }

    #[test]
    fn test_buffer_rejects_position_zero() {
        let mut buf = ParameterBuffer::new();
        let err = buf.bind_null(0).unwrap_err();
        assert!(err.is_binding());
        assert_eq!(err.position(), Some(0));
    }

    #[test]
    fn test_buffer_capacity() {
        let mut buf = ParameterBuffer::with_capacity(2);
        assert_eq!(buf.values(), &[Value::Null, Value::Null]);
        buf.bind_i32(2, 1).unwrap();
        assert_eq!(buf.values(), &[Value::Null, Value::Int32(1)]);
        let err = buf.bind_i32(3, 1).unwrap_err();
        assert_eq!(err.position(), Some(3));
        assert!(err.to_string().contains("only 2 parameters"));
    }

    #[test]
    fn test_binder_through_mut_ref() {
        fn bind_twice(mut binder: impl StatementBinder) {
            binder.bind_f64(1, 1.5).unwrap();
            binder.bind_f32(2, 2.5).unwrap();
        }

        let mut buf = ParameterBuffer::new();
        bind_twice(&mut buf);
        assert_eq!(buf.into_values(), vec![Value::Float64(1.5), Value::Float32(2.5)]);
    }
}
