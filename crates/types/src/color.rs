//! Node colors.
//!
//! A node either holds an assigned color `1, 2, ...` or, while it is in the
//! middle of a recolor transaction, one of two placeholder values. The
//! placeholders order below every assigned color, so comparisons such as
//! "the ceiling exceeds the current color" hold for placeholders too.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transient placeholder held during recoloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Placeholder {
    /// Set when a recolor transaction starts. Raw value `-1`.
    First,
    /// The second step of a transaction. Raw value `0`.
    Second,
}

/// A node color.
///
/// Ordering: `Transitional(First) < Transitional(Second) < Assigned(1) < Assigned(2) < ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    /// Placeholder held while recoloring.
    Transitional(Placeholder),
    /// A real color. Always at least 1.
    Assigned(u32),
}

impl Color {
    /// Lowest real color.
    pub const FIRST: Color = Color::Assigned(1);

    /// Build a color from its integer encoding.
    ///
    /// `-1` and `0` are the placeholders and positive values are assigned
    /// colors. Anything below `-1` has no encoding and yields None.
    pub fn from_raw(value: i64) -> Option<Self> {
        match value {
            -1 => Some(Color::Transitional(Placeholder::First)),
            0 => Some(Color::Transitional(Placeholder::Second)),
            v if v > 0 => u32::try_from(v).ok().map(Color::Assigned),
            _ => None,
        }
    }

    /// Integer encoding, as handed to snapshot consumers.
    pub fn raw(self) -> i64 {
        match self {
            Color::Transitional(Placeholder::First) => -1,
            Color::Transitional(Placeholder::Second) => 0,
            Color::Assigned(c) => i64::from(c),
        }
    }

    /// Whether this is a real (non-placeholder) color.
    pub fn is_assigned(self) -> bool {
        matches!(self, Color::Assigned(_))
    }

    /// The assigned value, if any.
    pub fn assigned(self) -> Option<u32> {
        match self {
            Color::Assigned(c) => Some(c),
            Color::Transitional(_) => None,
        }
    }

    /// First candidate worth trying when searching for a color for a node
    /// currently holding `self`: the color itself, never below 1.
    pub fn search_floor(self) -> u32 {
        match self {
            Color::Assigned(c) => c.max(1),
            Color::Transitional(_) => 1,
        }
    }

    /// Whether this color lies in `[1, bound]`.
    pub fn within(self, bound: u32) -> bool {
        matches!(self, Color::Assigned(c) if c >= 1 && c <= bound)
    }

    /// The placeholder that follows this color in a recolor transaction.
    ///
    /// Returns None once the placeholders are used up.
    pub fn next_placeholder(self) -> Option<Self> {
        match self {
            Color::Transitional(Placeholder::First) => {
                Some(Color::Transitional(Placeholder::Second))
            }
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::FIRST
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color::Assigned(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_order_below_assigned() {
        let first = Color::Transitional(Placeholder::First);
        let second = Color::Transitional(Placeholder::Second);

        assert!(first < second);
        assert!(second < Color::Assigned(1));
        assert!(Color::Assigned(1) < Color::Assigned(2));
    }

    #[test]
    fn test_raw_encoding() {
        assert_eq!(Color::from_raw(-1), Some(Color::Transitional(Placeholder::First)));
        assert_eq!(Color::from_raw(0), Some(Color::Transitional(Placeholder::Second)));
        assert_eq!(Color::from_raw(4), Some(Color::Assigned(4)));
        assert_eq!(Color::from_raw(-2), None);

        for raw in [-1, 0, 1, 9] {
            assert_eq!(Color::from_raw(raw).map(Color::raw), Some(raw));
        }
    }

    #[test]
    fn test_search_floor() {
        assert_eq!(Color::Transitional(Placeholder::First).search_floor(), 1);
        assert_eq!(Color::Transitional(Placeholder::Second).search_floor(), 1);
        assert_eq!(Color::Assigned(5).search_floor(), 5);
    }

    #[test]
    fn test_within_bound() {
        assert!(Color::Assigned(3).within(3));
        assert!(!Color::Assigned(4).within(3));
        assert!(!Color::Transitional(Placeholder::Second).within(3));
        assert!(!Color::Assigned(1).within(0));
    }

    #[test]
    fn test_next_placeholder() {
        let first = Color::Transitional(Placeholder::First);
        let second = Color::Transitional(Placeholder::Second);

        assert_eq!(first.next_placeholder(), Some(second));
        assert_eq!(second.next_placeholder(), None);
        assert_eq!(Color::Assigned(2).next_placeholder(), None);
    }
}
