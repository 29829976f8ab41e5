// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Numeric types usable for query frequencies, beam frequencies and output
//! coefficients.
//!
//! Query and beam frequencies may have different precisions. Both are widened
//! to `f64` before being compared or used in arithmetic; coefficients are
//! narrowed to the query precision only when they are written out.

use num_traits::{AsPrimitive, Float};

pub trait FreqFloat: Float + AsPrimitive<f64> + Send + Sync + std::fmt::Debug {
    /// Convert a double-precision value into this type. This may lose
    /// precision.
    fn narrow(v: f64) -> Self;

    /// Convert this value to double precision. This is lossless.
    #[inline]
    fn widen(self) -> f64 {
        self.as_()
    }
}

impl FreqFloat for f32 {
    #[inline]
    fn narrow(v: f64) -> f32 {
        v as f32
    }
}

impl FreqFloat for f64 {
    #[inline]
    fn narrow(v: f64) -> f64 {
        v
    }
}
