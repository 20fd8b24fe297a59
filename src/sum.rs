// Copyright 2025 Cowboy AI, LLC.

//! Variadic numeric summation
//!
//! Numbers arrive either spread as separate arguments or wrapped in one
//! array-like argument. Both conventions build a [`SumInput`] and are
//! normalized into the same ordered sequence before reduction.

use std::iter::Sum;

/// Numbers to be summed, as passed by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SumInput<T> {
    /// Each number was passed as its own argument
    Args(Vec<T>),
    /// All numbers were passed as a single array argument
    Array(Vec<T>),
}

impl<T> SumInput<T> {
    /// Build the spread form
    pub fn args(values: impl IntoIterator<Item = T>) -> Self {
        SumInput::Args(values.into_iter().collect())
    }

    /// Build the wrapped form
    pub fn array(values: impl IntoIterator<Item = T>) -> Self {
        SumInput::Array(values.into_iter().collect())
    }

    /// Normalize either form into the ordered sequence of numbers
    pub fn into_values(self) -> Vec<T> {
        match self {
            SumInput::Args(values) | SumInput::Array(values) => values,
        }
    }
}

impl<T> Default for SumInput<T> {
    fn default() -> Self {
        SumInput::Args(Vec::new())
    }
}

impl<T> From<Vec<T>> for SumInput<T> {
    fn from(values: Vec<T>) -> Self {
        SumInput::Array(values)
    }
}

impl<T, const N: usize> From<[T; N]> for SumInput<T> {
    fn from(values: [T; N]) -> Self {
        SumInput::array(values)
    }
}

impl<T: Clone> From<&[T]> for SumInput<T> {
    fn from(values: &[T]) -> Self {
        SumInput::array(values.iter().cloned())
    }
}

/// Sum the numbers left to right; an empty input sums to zero
///
/// # Examples
///
/// ```rust
/// use cim_odometer::{sum, SumInput};
///
/// assert_eq!(sum(vec![1, 2, 3, 5]), 11);
/// assert_eq!(sum(SumInput::args([2, 3])), 5);
/// assert_eq!(sum(SumInput::<i64>::default()), 0);
/// ```
pub fn sum<T, I>(input: I) -> T
where
    I: Into<SumInput<T>>,
    T: Sum<T>,
{
    input.into().into_values().into_iter().sum()
}

/// Sum numbers passed either as separate arguments or as one array literal
///
/// ```rust
/// use cim_odometer::sum;
///
/// let nothing: i32 = sum!();
/// assert_eq!(nothing, 0);
/// assert_eq!(sum!(-1), -1);
/// assert_eq!(sum!(1, 2, 3, 5), 11);
/// assert_eq!(sum!([1, 2, 3, 5]), 11);
/// assert_eq!(sum!(0.5, 0.25), 0.75);
/// ```
///
/// Sequences only known at runtime go through the [`sum()`](crate::sum()) function.
#[macro_export]
macro_rules! sum {
    () => {
        $crate::sum::sum($crate::sum::SumInput::default())
    };
    ([$($value:expr),* $(,)?]) => {
        $crate::sum::sum($crate::sum::SumInput::array([$($value),*]))
    };
    ($($value:expr),+ $(,)?) => {
        $crate::sum::sum($crate::sum::SumInput::args([$($value),+]))
    };
}
