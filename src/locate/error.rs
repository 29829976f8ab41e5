// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with locating frequencies on a beam frequency map. All of
//! these are raised before any output coefficients are written.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocateError {
    #[error("The beam frequency map has {nud} frequencies, but the staging buffer can only hold {limit}")]
    AxisTooLong { nud: usize, limit: usize },

    #[error("The beam frequency map is empty")]
    EmptyAxis,

    #[error("The output coefficients have shape {got:?}, but shape {expected:?} was expected")]
    FreqDataShape {
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("The beam frequency map isn't sorted ascendingly; frequency {index} ({value}) is less than the one before it")]
    AxisNotAscending { index: usize, value: f64 },

    #[error("The beam frequency map has a duplicate frequency at index {index} ({value})")]
    DuplicateAxisValue { index: usize, value: f64 },

    #[error("The beam frequency map has a non-finite frequency at index {index} ({value})")]
    NonFiniteAxisValue { index: usize, value: f64 },

    #[error("The execution group size must be at least 1")]
    ZeroGroupSize,
}
