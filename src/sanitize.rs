//! Conversion of fallible extractor accessors into optional record fields.
//!
//! Upstream extractors report missing data inconsistently: some raise, some
//! return an empty string, some return `0`. [`sanitize`] folds all of these
//! into `None` for ordinary fields, while [`sanitize_numeric`] keeps `0` for
//! timing fields where zero minutes is real data.

use log::debug;
use std::fmt::Display;

/// Values that upstream extractors use as an "absent" sentinel.
pub trait Vacuous {
    fn is_vacuous(&self) -> bool;
}

impl Vacuous for String {
    fn is_vacuous(&self) -> bool {
        self.is_empty()
    }
}

impl Vacuous for &str {
    fn is_vacuous(&self) -> bool {
        self.is_empty()
    }
}

impl Vacuous for bool {
    fn is_vacuous(&self) -> bool {
        false
    }
}

macro_rules! vacuous_when_zero {
    ($($ty:ty),*) => {
        $(impl Vacuous for $ty {
            fn is_vacuous(&self) -> bool {
                *self == 0 as $ty
            }
        })*
    };
}

vacuous_when_zero!(i32, i64, u32, u64, usize, f32, f64);

// Collections pass through even when empty.
impl<T> Vacuous for Vec<T> {
    fn is_vacuous(&self) -> bool {
        false
    }
}

impl<K, V> Vacuous for std::collections::BTreeMap<K, V> {
    fn is_vacuous(&self) -> bool {
        false
    }
}

/// Values that can be read as a whole number of units.
pub trait Numeric {
    fn to_whole(&self) -> Option<i64>;
}

macro_rules! numeric_int {
    ($($ty:ty),*) => {
        $(impl Numeric for $ty {
            fn to_whole(&self) -> Option<i64> {
                i64::try_from(*self).ok()
            }
        })*
    };
}

numeric_int!(i32, i64, u32, u64, usize);

impl Numeric for f64 {
    fn to_whole(&self) -> Option<i64> {
        if self.is_finite() {
            Some(self.trunc() as i64)
        } else {
            None
        }
    }
}

impl Numeric for f32 {
    fn to_whole(&self) -> Option<i64> {
        f64::from(*self).to_whole()
    }
}

impl Numeric for serde_json::Value {
    fn to_whole(&self) -> Option<i64> {
        match self {
            serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64()?.to_whole()),
            _ => None,
        }
    }
}

impl Numeric for String {
    fn to_whole(&self) -> Option<i64> {
        None
    }
}

/// Call `accessor`, returning its value or `None` when it fails, yields
/// nothing, or yields a vacuous value (`0`, `""`).
pub fn sanitize<T, E>(field: &str, accessor: impl FnOnce() -> Result<Option<T>, E>) -> Option<T>
where
    T: Vacuous,
    E: Display,
{
    match accessor() {
        Ok(Some(value)) if value.is_vacuous() => None,
        Ok(value) => value,
        Err(e) => {
            debug!("Accessor for {} failed: {}", field, e);
            None
        }
    }
}

/// Numeric variant of [`sanitize`]: `0` is preserved, floats are truncated
/// and non-numeric values become `None`.
pub fn sanitize_numeric<T, E>(
    field: &str,
    accessor: impl FnOnce() -> Result<Option<T>, E>,
) -> Option<i64>
where
    T: Numeric,
    E: Display,
{
    match accessor() {
        Ok(value) => value.and_then(|v| v.to_whole()),
        Err(e) => {
            debug!("Numeric accessor for {} failed: {}", field, e);
            None
        }
    }
}
