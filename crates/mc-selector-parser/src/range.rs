//! Integer ranges as written in selector arguments.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// An inclusive integer range: `n`, `min..max`, `min..` or `..max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeParseError {
    #[error("empty range")]
    Empty,
    #[error("invalid range bound: {0}")]
    InvalidNumber(#[from] ParseIntError),
    #[error("range minimum {min} is greater than maximum {max}")]
    Inverted { min: i32, max: i32 },
}

impl IntRange {
    #[must_use]
    pub const fn exact(value: i32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    #[must_use]
    pub const fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }
}

impl FromStr for IntRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RangeParseError::Empty);
        }

        let Some((min, max)) = s.split_once("..") else {
            return Ok(Self::exact(s.parse()?));
        };

        if min.is_empty() && max.is_empty() {
            return Err(RangeParseError::Empty);
        }

        let min = if min.is_empty() { i32::MIN } else { min.parse()? };
        let max = if max.is_empty() { i32::MAX } else { max.parse()? };
        if min > max {
            return Err(RangeParseError::Inverted { min, max });
        }

        Ok(Self { min, max })
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (min, max) if min == max => write!(f, "{min}"),
            (i32::MIN, max) => write!(f, "..{max}"),
            (min, i32::MAX) => write!(f, "{min}.."),
            (min, max) => write!(f, "{min}..{max}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact() {
        let range: IntRange = "5".parse().unwrap();
        assert_eq!(range, IntRange::exact(5));
        assert!(range.contains(5));
        assert!(!range.contains(4));
    }

    #[test]
    fn test_bounded() {
        let range: IntRange = "1..5".parse().unwrap();
        assert!(range.contains(1));
        assert!(range.contains(5));
        assert!(!range.contains(0));
        assert!(!range.contains(6));
    }

    #[test]
    fn test_open_ended() {
        let at_least: IntRange = "10..".parse().unwrap();
        assert!(at_least.contains(10));
        assert!(at_least.contains(i32::MAX));
        assert!(!at_least.contains(9));

        let at_most: IntRange = "..-3".parse().unwrap();
        assert!(at_most.contains(-3));
        assert!(at_most.contains(i32::MIN));
        assert!(!at_most.contains(-2));
    }

    #[test]
    fn test_invalid() {
        assert_eq!("".parse::<IntRange>(), Err(RangeParseError::Empty));
        assert_eq!("..".parse::<IntRange>(), Err(RangeParseError::Empty));
        assert_eq!(
            "5..1".parse::<IntRange>(),
            Err(RangeParseError::Inverted { min: 5, max: 1 })
        );
        assert!(matches!(
            "a..3".parse::<IntRange>(),
            Err(RangeParseError::InvalidNumber(_))
        ));
        assert!("1.5".parse::<IntRange>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!("3".parse::<IntRange>().unwrap().to_string(), "3");
        assert_eq!("1..4".parse::<IntRange>().unwrap().to_string(), "1..4");
        assert_eq!("..4".parse::<IntRange>().unwrap().to_string(), "..4");
        assert_eq!("2..".parse::<IntRange>().unwrap().to_string(), "2..");
    }
}
