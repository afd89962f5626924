//! # Bound Resolution
//!
//! Policy bounds are optional. An absent lower or upper bound means
//! "unbounded" for the bound's value type: `0..=usize::MAX` for sizes and
//! lengths, `i64::MIN..=i64::MAX` for integers, `f64::MIN..=f64::MAX` for
//! floats. [`Bounds<T>`] resolves the pair once, parameterized over the
//! value type, so every check in the validator uses the same rule.

use std::fmt;

use serde_json::Number;

/// A value type that can appear as a schema bound.
pub trait BoundValue: Copy + PartialOrd + fmt::Display {
    /// Lower bound used when the policy omits one.
    const UNBOUNDED_MIN: Self;
    /// Upper bound used when the policy omits one.
    const UNBOUNDED_MAX: Self;

    /// Convert a policy number into this bound type.
    fn from_number(n: &Number) -> Option<Self>;

    /// Convert a policy number used as an inclusive lower bound.
    fn lower_from_number(n: &Number) -> Option<Self> {
        Self::from_number(n)
    }

    /// Convert a policy number used as an inclusive upper bound.
    fn upper_from_number(n: &Number) -> Option<Self> {
        Self::from_number(n)
    }
}

impl BoundValue for usize {
    const UNBOUNDED_MIN: Self = 0;
    const UNBOUNDED_MAX: Self = usize::MAX;

    fn from_number(n: &Number) -> Option<Self> {
        n.as_u64().and_then(|v| usize::try_from(v).ok())
    }
}

impl BoundValue for i64 {
    const UNBOUNDED_MIN: Self = i64::MIN;
    const UNBOUNDED_MAX: Self = i64::MAX;

    fn from_number(n: &Number) -> Option<Self> {
        if let Some(v) = n.as_i64() {
            return Some(v);
        }
        if n.as_u64().is_some() {
            // Larger than i64::MAX.
            return Some(i64::MAX);
        }
        // `as` saturates for out-of-range floats.
        n.as_f64().map(|f| f as i64)
    }

    // A fractional bound admits only the integers inside it.
    fn lower_from_number(n: &Number) -> Option<Self> {
        integral_bound(n, f64::ceil)
    }

    fn upper_from_number(n: &Number) -> Option<Self> {
        integral_bound(n, f64::floor)
    }
}

fn integral_bound(n: &Number, round: fn(f64) -> f64) -> Option<i64> {
    if n.is_f64() {
        n.as_f64().map(|f| round(f) as i64)
    } else {
        i64::from_number(n)
    }
}

impl BoundValue for f64 {
    const UNBOUNDED_MIN: Self = f64::MIN;
    const UNBOUNDED_MAX: Self = f64::MAX;

    fn from_number(n: &Number) -> Option<Self> {
        n.as_f64()
    }
}

/// An inclusive `[min, max]` range with defaults already applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    /// Inclusive lower bound.
    pub min: T,
    /// Inclusive upper bound.
    pub max: T,
}

impl<T: BoundValue> Bounds<T> {
    /// Resolve optional bounds, substituting the unbounded default for
    /// each missing side.
    pub fn resolve(min: Option<T>, max: Option<T>) -> Self {
        Self {
            min: min.unwrap_or(T::UNBOUNDED_MIN),
            max: max.unwrap_or(T::UNBOUNDED_MAX),
        }
    }

    /// Resolve optional policy numbers. A number that cannot be
    /// represented as `T` is treated as absent.
    pub fn from_numbers(min: Option<&Number>, max: Option<&Number>) -> Self {
        Self::resolve(
            min.and_then(T::lower_from_number),
            max.and_then(T::upper_from_number),
        )
    }

    /// Returns `true` if `value` lies within the inclusive range.
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

impl<T: fmt::Display> fmt::Display for Bounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
