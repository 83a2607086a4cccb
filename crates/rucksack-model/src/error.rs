// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


//! Error taxonomy for building, loading and solving knapsack instances.
//!
//! Every failure is terminal for the instance at hand: validation is
//! deterministic, so retrying cannot help. `KnapsackError` aggregates the
//! individual kinds so callers can propagate with `?` and still tell a
//! malformed instance apart from an instance that is merely too large.

use crate::index::ItemIndex;
use num_traits::ToPrimitive;
use thiserror::Error;

/// Widens an offending number for error reporting.
#[inline]
pub(crate) fn widen<T: ToPrimitive>(value: T) -> i128 {
    value.to_i128().unwrap_or_default()
}

/// The attribute of an item an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    Weight,
    Volume,
    Value,
}

impl std::fmt::Display for ItemField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemField::Weight => write!(f, "weight"),
            ItemField::Volume => write!(f, "volume"),
            ItemField::Value => write!(f, "value"),
        }
    }
}

/// The constrained resource a capacity error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Weight,
    Volume,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Weight => write!(f, "weight"),
            Dimension::Volume => write!(f, "volume"),
        }
    }
}

/// Raw item data that cannot form a valid instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The per-item sequences do not have the same length.
    #[error("expected {expected} {field} entries (one per weight), found {found}")]
    LengthMismatch {
        field: ItemField,
        expected: usize,
        found: usize,
    },
    /// An item attribute is zero or negative.
    #[error("{field} of {item} must be positive, got {value}")]
    NonPositive {
        item: ItemIndex,
        field: ItemField,
        value: i128,
    },
    /// The total of an attribute over all items does not fit the numeric type.
    #[error("total {field} of all items overflows the numeric type")]
    Overflow { field: ItemField },
}

/// A capacity that is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{dimension} capacity must be positive, got {value}")]
pub struct CapacityError {
    pub dimension: Dimension,
    pub value: i128,
}

/// Instance text that does not follow the expected layout.
#[derive(Debug, Error)]
pub enum MalformedInputError {
    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input contains no capacity line.
    #[error("missing capacity line")]
    MissingHeader,
    /// A line carries the wrong number of tokens.
    #[error("line {line}: expected {expected} tokens, found {found}")]
    TokenCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A token is not an integer of the requested type.
    #[error("line {line}: could not parse token '{token}' as type {type_name}")]
    Parse {
        line: usize,
        token: String,
        type_name: &'static str,
    },
}

/// A table that cannot be held within the configured budget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceExhaustedError {
    /// The table would need more memory than the budget allows.
    #[error("table needs {required} bytes but the memory budget is {budget} bytes")]
    BudgetExceeded { required: usize, budget: usize },
    /// The table dimensions cannot be represented on this platform.
    #[error("table dimensions overflow the address space")]
    DimensionOverflow,
    /// The allocator refused the table.
    #[error("allocating {bytes} bytes for the table failed")]
    AllocationFailed { bytes: usize },
}

/// Any error raised while turning input into an optimal solution.
#[derive(Debug, Error)]
pub enum KnapsackError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    #[error(transparent)]
    MalformedInput(#[from] MalformedInputError),
    #[error(transparent)]
    ResourceExhausted(#[from] ResourceExhaustedError),
    /// The search stopped before it proved a solution optimal.
    #[error("search stopped before proving optimality: {reason}")]
    Aborted { reason: String },
}

impl KnapsackError {
    /// Returns `true` if the error describes an instance that is valid but too
    /// large for the configured resources.
    #[inline]
    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, KnapsackError::ResourceExhausted(_))
    }
}

impl From<std::io::Error> for KnapsackError {
    fn from(e: std::io::Error) -> Self {
        KnapsackError::MalformedInput(MalformedInputError::Io(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_name_item_and_field() {
        let err = ValidationError::NonPositive {
            item: ItemIndex::new(2),
            field: ItemField::Volume,
            value: 0,
        };
        assert_eq!(err.to_string(), "volume of ItemIndex(2) must be positive, got 0");

        let err = ValidationError::LengthMismatch {
            field: ItemField::Value,
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "expected 3 value entries (one per weight), found 2"
        );
    }

    #[test]
    fn test_capacity_message() {
        let err = CapacityError {
            dimension: Dimension::Weight,
            value: -4,
        };
        assert_eq!(err.to_string(), "weight capacity must be positive, got -4");
    }

    #[test]
    fn test_aggregate_is_transparent() {
        let err: KnapsackError = ResourceExhaustedError::BudgetExceeded {
            required: 2048,
            budget: 1024,
        }
        .into();
        assert!(err.is_resource_exhausted());
        assert_eq!(
            err.to_string(),
            "table needs 2048 bytes but the memory budget is 1024 bytes"
        );

        let err: KnapsackError = ValidationError::Overflow {
            field: ItemField::Weight,
        }
        .into();
        assert!(!err.is_resource_exhausted());
        assert!(matches!(err, KnapsackError::Validation(_)));
    }

    #[test]
    fn test_io_errors_become_malformed_input() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: KnapsackError = io.into();
        assert!(matches!(
            err,
            KnapsackError::MalformedInput(MalformedInputError::Io(_))
        ));
    }
}
