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


//! Plain-text instance loader.
//!
//! Instances are line oriented. The first record holds the capacities, every
//! further record describes one item:
//!
//! ```raw
//! W V          # dual format: weight and volume capacity
//! w v value    # one line per item
//! ```
//!
//! The single-constraint format drops the volume column:
//!
//! ```raw
//! C            # capacity
//! w value      # one line per item
//! ```
//!
//! Blank lines are skipped and `#` starts a comment that runs to the end of
//! the line. Structural problems (missing header, wrong number of tokens,
//! tokens that are not integers) are reported as `MalformedInputError` with
//! the 1-based line number; the parsed numbers then go through the same
//! validation as programmatically built instances, so non-positive entries
//! surface as `ValidationError` or `CapacityError`.

use crate::{
    error::{KnapsackError, MalformedInputError},
    instance::Instance,
};
use num_traits::PrimInt;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    marker::PhantomData,
    path::Path,
    str::FromStr,
};

/// The layout of the instance text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InstanceFormat {
    /// `W V` header and `weight volume value` item lines.
    #[default]
    Dual,
    /// `C` header and `weight value` item lines.
    Single,
}

impl InstanceFormat {
    #[inline]
    fn header_tokens(self) -> usize {
        match self {
            InstanceFormat::Dual => 2,
            InstanceFormat::Single => 1,
        }
    }

    #[inline]
    fn item_tokens(self) -> usize {
        match self {
            InstanceFormat::Dual => 3,
            InstanceFormat::Single => 2,
        }
    }
}

impl std::fmt::Display for InstanceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceFormat::Dual => write!(f, "Dual"),
            InstanceFormat::Single => write!(f, "Single"),
        }
    }
}

/// A configurable loader for knapsack instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceLoader<T> {
    format: InstanceFormat,
    _marker: PhantomData<T>,
}

impl<T> Default for InstanceLoader<T> {
    fn default() -> Self {
        Self {
            format: InstanceFormat::Dual,
            _marker: PhantomData,
        }
    }
}

impl<T> InstanceLoader<T>
where
    T: PrimInt + FromStr,
{
    /// Creates a loader for the dual-constraint format.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader for the dual-constraint format.
    #[inline]
    pub fn dual() -> Self {
        Self::default()
    }

    /// Creates a loader for the single-constraint format.
    #[inline]
    pub fn single() -> Self {
        Self::default().with_format(InstanceFormat::Single)
    }

    /// Sets the expected format.
    #[inline]
    pub fn with_format(mut self, format: InstanceFormat) -> Self {
        self.format = format;
        self
    }

    #[inline]
    pub fn format(&self) -> InstanceFormat {
        self.format
    }

    /// Loads an instance from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Instance<T>, KnapsackError> {
        let mut scanner = LineScanner::new(rdr);

        let header = scanner
            .next_record()?
            .ok_or(MalformedInputError::MissingHeader)?;
        let capacities = header.parse_all::<T>(self.format.header_tokens())?;

        let mut weights = Vec::new();
        let mut volumes = Vec::new();
        let mut values = Vec::new();

        while let Some(record) = scanner.next_record()? {
            let fields = record.parse_all::<T>(self.format.item_tokens())?;
            match self.format {
                InstanceFormat::Dual => {
                    weights.push(fields[0]);
                    volumes.push(fields[1]);
                    values.push(fields[2]);
                }
                InstanceFormat::Single => {
                    weights.push(fields[0]);
                    values.push(fields[1]);
                }
            }
        }

        log::debug!(
            "parsed {} instance with {} items from {} lines",
            self.format,
            weights.len(),
            scanner.line()
        );

        match self.format {
            InstanceFormat::Dual => {
                Instance::from_sequences(capacities[0], capacities[1], &weights, &volumes, &values)
            }
            InstanceFormat::Single => {
                Instance::single_from_sequences(capacities[0], &weights, &values)
            }
        }
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Instance<T>, KnapsackError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Instance<T>, KnapsackError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Instance<T>, KnapsackError> {
        self.from_bufread(s.as_bytes())
    }
}

/// One non-empty line of input, split into tokens.
struct Record {
    line: usize,
    tokens: Vec<String>,
}

impl Record {
    /// Parses exactly `expected` tokens.
    fn parse_all<T>(&self, expected: usize) -> Result<Vec<T>, MalformedInputError>
    where
        T: FromStr,
    {
        if self.tokens.len() != expected {
            return Err(MalformedInputError::TokenCount {
                line: self.line,
                expected,
                found: self.tokens.len(),
            });
        }

        self.tokens
            .iter()
            .map(|token| {
                token.parse::<T>().map_err(|_| MalformedInputError::Parse {
                    line: self.line,
                    token: token.clone(),
                    type_name: std::any::type_name::<T>(),
                })
            })
            .collect()
    }
}

/// Reads records line by line, skipping blanks and `#` comments.
struct LineScanner<R> {
    rdr: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> LineScanner<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            line: 0,
        }
    }

    /// Returns the number of lines consumed so far.
    #[inline]
    fn line(&self) -> usize {
        self.line
    }

    fn next_record(&mut self) -> Result<Option<Record>, MalformedInputError> {
        loop {
            self.buf.clear();
            if self.rdr.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let content = match self.buf.find('#') {
                Some(pos) => &self.buf[..pos],
                None => self.buf.as_str(),
            };

            let tokens: Vec<String> = content.split_whitespace().map(str::to_owned).collect();
            if !tokens.is_empty() {
                return Ok(Some(Record {
                    line: self.line,
                    tokens,
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{CapacityError, Dimension, ItemField, ValidationError},
        index::ItemIndex,
        instance::ConstraintKind,
    };

    type IntegerType = i64;

    #[test]
    fn test_loads_dual_instance() {
        let text = "50 60\n10 20 60\n\n20 25 100\n30 30 120\n";
        let instance = InstanceLoader::<IntegerType>::new()
            .from_str(text)
            .expect("valid instance");

        assert_eq!(instance.kind(), ConstraintKind::Dual);
        assert_eq!(instance.weight_capacity(), 50);
        assert_eq!(instance.volume_capacity(), Some(60));
        assert_eq!(instance.num_items(), 3);
        assert_eq!(instance.item(ItemIndex::new(1)).volume(), 25);
        assert_eq!(instance.total_value(), 280);
    }

    #[test]
    fn test_loads_single_instance_with_comments() {
        let text = "# capacity\n50\n10 60 # first\n   \n20 100\n30 120\n";
        let instance = InstanceLoader::<IntegerType>::single()
            .from_str(text)
            .expect("valid instance");

        assert_eq!(instance.kind(), ConstraintKind::Single);
        assert_eq!(instance.weight_capacity(), 50);
        assert_eq!(instance.num_items(), 3);
        assert_eq!(instance.item(ItemIndex::new(2)).weight(), 30);
    }

    #[test]
    fn test_header_only_yields_empty_instance() {
        let instance = InstanceLoader::<IntegerType>::dual()
            .from_str("5 5\n")
            .expect("valid instance");
        assert_eq!(instance.num_items(), 0);
    }

    #[test]
    fn test_missing_header() {
        let err = InstanceLoader::<IntegerType>::new()
            .from_str("\n  \n# nothing\n")
            .unwrap_err();
        assert!(matches!(
            err,
            KnapsackError::MalformedInput(MalformedInputError::MissingHeader)
        ));
    }

    #[test]
    fn test_wrong_token_count_names_line() {
        let err = InstanceLoader::<IntegerType>::new()
            .from_str("50 60\n10 20 60\n\n20 25\n")
            .unwrap_err();
        match err {
            KnapsackError::MalformedInput(MalformedInputError::TokenCount {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 4);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected token count error, got {other:?}"),
        }

        let err = InstanceLoader::<IntegerType>::new()
            .from_str("50\n")
            .unwrap_err();
        assert!(matches!(
            err,
            KnapsackError::MalformedInput(MalformedInputError::TokenCount { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_error_structure() {
        let err = InstanceLoader::<IntegerType>::new()
            .from_str("50 60\n10 abc 60\n")
            .unwrap_err();
        match err {
            KnapsackError::MalformedInput(MalformedInputError::Parse {
                line,
                token,
                type_name,
            }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "abc");
                assert_eq!(type_name, "i64");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_numbers_surface_as_validation_errors() {
        let err = InstanceLoader::<IntegerType>::new()
            .from_str("0 60\n10 20 60\n")
            .unwrap_err();
        assert!(matches!(
            err,
            KnapsackError::Capacity(CapacityError {
                dimension: Dimension::Weight,
                value: 0
            })
        ));

        let err = InstanceLoader::<IntegerType>::new()
            .from_str("50 60\n10 20 60\n10 20 -1\n")
            .unwrap_err();
        assert!(matches!(
            err,
            KnapsackError::Validation(ValidationError::NonPositive {
                field: ItemField::Value,
                value: -1,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = InstanceLoader::<IntegerType>::new()
            .from_path("/definitely/not/here/instance.txt")
            .unwrap_err();
        assert!(matches!(
            err,
            KnapsackError::MalformedInput(MalformedInputError::Io(_))
        ));
    }
}
