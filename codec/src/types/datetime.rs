//! Sheet implementation for [chrono::DateTime] in UTC.

use crate::{Error, Shape, Sheet, Value};
use chrono::{DateTime, Utc};

impl Sheet for DateTime<Utc> {
    #[inline]
    fn shape() -> Shape {
        Shape::DateTime
    }

    #[inline]
    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }

    #[inline]
    fn from_value(value: Value) -> Result<Self, Error> {
        value.into_datetime()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_datetime() {
        let value = Utc.with_ymd_and_hms(2023, 7, 1, 8, 0, 0).unwrap();
        assert_eq!(<DateTime<Utc>>::shape(), Shape::DateTime);
        assert_eq!(<DateTime<Utc>>::from_value(value.to_value()).unwrap(), value);
        assert!(<DateTime<Utc>>::from_value(Value::Optional(None)).is_err());
    }
}
