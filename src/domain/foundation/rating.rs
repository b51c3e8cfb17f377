//! Rating value object for reviews (1 to 10 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Review rating on a 1..=10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 10;

    /// Creates a Rating from an integer, returning error if out of range.
    pub fn try_from_i32(value: i32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "rating",
                Self::MIN,
                Self::MAX,
                value,
            ));
        }
        Ok(Self(value as u8))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> i32 {
        self.0 as i32
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<i32> for Rating {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_from_i32(value)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        rating.value()
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_accepts_bounds() {
        assert_eq!(Rating::try_from_i32(1).unwrap().value(), 1);
        assert_eq!(Rating::try_from_i32(10).unwrap().value(), 10);
    }

    #[test]
    fn rating_rejects_out_of_range_values() {
        assert!(Rating::try_from_i32(0).is_err());
        assert!(Rating::try_from_i32(11).is_err());
        assert!(Rating::try_from_i32(-3).is_err());
    }

    #[test]
    fn rating_default_is_midpoint() {
        assert_eq!(Rating::default().value(), 5);
    }

    #[test]
    fn rating_displays_out_of_ten() {
        assert_eq!(Rating::try_from_i32(8).unwrap().to_string(), "8/10");
    }

    #[test]
    fn rating_round_trips_as_number() {
        let rating: Rating = serde_json::from_str("7").unwrap();
        assert_eq!(serde_json::to_string(&rating).unwrap(), "7");
        assert!(serde_json::from_str::<Rating>("42").is_err());
    }
}
