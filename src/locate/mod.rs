// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to locate query frequencies on a beam frequency map.
//!
//! For each query frequency, three coefficients are produced for a downstream
//! beam sampler:
//!
//! - `scale`: the extrapolation factor applied when the query is outside the
//!   beam frequency map (1 otherwise);
//! - `ratio`: the weight of the lower bracketing beam frequency;
//! - `grid`: the index of the lower bracketing beam frequency.
//!
//! The beam frequency map is staged once per invocation and then shared
//! read-only by all execution groups; every query is independent of every
//! other query.

mod config;
mod error;
mod precision;
mod search;
mod stage;

pub use config::{AxisValidation, LocatorConfig};
pub use error::LocateError;
pub use precision::FreqFloat;
pub use search::{bracket, Bracket, Regime};

use std::num::NonZeroUsize;

use itertools::Itertools;
use log::{debug, trace};
use ndarray::prelude::*;
use rayon::prelude::*;

use crate::constants::{GRID_ROW, NUM_COEFFS, RATIO_ROW, SCALE_ROW};
use stage::StagedAxis;

/// The coefficients for a single query frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreqCoeffs<F> {
    pub scale: F,
    pub ratio: F,
    pub grid: F,
}

/// Get the coefficients of a single query frequency against an
/// already-staged, double-precision beam frequency map.
pub fn locate_frequency(axis: &[f64], freq: f64) -> Result<FreqCoeffs<f64>, LocateError> {
    if axis.is_empty() {
        return Err(LocateError::EmptyAxis);
    }
    Ok(coeffs_on_staged(axis, freq))
}

/// `axis` must not be empty; staging guarantees this.
fn coeffs_on_staged(axis: &[f64], freq: f64) -> FreqCoeffs<f64> {
    let nud = axis.len();
    let bracket = bracket(axis, freq);
    match bracket.regime(nud) {
        Regime::BelowRange => FreqCoeffs {
            scale: freq / axis[0],
            ratio: 1.0,
            grid: 0.0,
        },

        Regime::AboveRange => FreqCoeffs {
            scale: freq / axis[nud - 1],
            ratio: 0.0,
            grid: nud as f64 - 2.0,
        },

        Regime::InRange => {
            let lower_freq = axis[bracket.lower as usize];
            let upper_freq = axis[bracket.upper as usize];
            FreqCoeffs {
                scale: 1.0,
                ratio: (upper_freq - freq) / (upper_freq - lower_freq),
                grid: bracket.lower as f64,
            }
        }
    }
}

/// An object that locates query frequencies on beam frequency maps.
#[derive(Debug, Clone)]
pub struct FreqLocator {
    beam_nud_limit: usize,
    group_size: NonZeroUsize,
    validation: AxisValidation,
}

impl FreqLocator {
    pub fn new(config: LocatorConfig) -> Result<FreqLocator, LocateError> {
        let LocatorConfig {
            beam_nud_limit,
            group_size,
            validation,
        } = config;
        let group_size = NonZeroUsize::new(group_size).ok_or(LocateError::ZeroGroupSize)?;
        Ok(FreqLocator {
            beam_nud_limit,
            group_size,
            validation,
        })
    }

    pub fn config(&self) -> LocatorConfig {
        LocatorConfig {
            beam_nud_limit: self.beam_nud_limit,
            group_size: self.group_size.get(),
            validation: self.validation,
        }
    }

    /// Generate coefficients for every query frequency. The coefficients are
    /// returned in an array with dimensions `[3][nchan]`; see
    /// [`FreqLocator::locate_frequencies`].
    ///
    /// # Errors
    ///
    /// See [`FreqLocator::locate_frequencies`].
    pub fn locate_frequencies_new<Q: FreqFloat, B: FreqFloat>(
        &self,
        frequencies: &[Q],
        beam_freq_map: &[B],
    ) -> Result<Array2<Q>, LocateError> {
        let mut freq_data = Array2::zeros((NUM_COEFFS, frequencies.len()));
        self.locate_frequencies(frequencies, beam_freq_map, freq_data.view_mut())?;
        Ok(freq_data)
    }

    /// Generate coefficients for every query frequency, overwriting
    /// `freq_data`.
    ///
    /// `frequencies`: The query frequencies, in any order.
    ///
    /// `beam_freq_map`: The beam frequencies. These *must* be sorted
    /// ascendingly, and there must be no more than `beam_nud_limit` of them.
    ///
    /// `freq_data`: A mutable view with dimensions `[3][nchan]`, where `nchan`
    /// is the number of query frequencies. Row 0 holds the scales, row 1 the
    /// ratios and row 2 the grid indices.
    ///
    /// # Errors
    ///
    /// This function returns an error if `freq_data` has the wrong shape, or
    /// if the beam frequency map fails validation. When an error is returned,
    /// `freq_data` has not been touched.
    pub fn locate_frequencies<Q: FreqFloat, B: FreqFloat>(
        &self,
        frequencies: &[Q],
        beam_freq_map: &[B],
        mut freq_data: ArrayViewMut2<Q>,
    ) -> Result<(), LocateError> {
        let nchan = frequencies.len();
        let expected = (NUM_COEFFS, nchan);
        if freq_data.dim() != expected {
            return Err(LocateError::FreqDataShape {
                expected,
                got: freq_data.dim(),
            });
        }

        let staged = StagedAxis::stage(beam_freq_map, self.beam_nud_limit, self.group_size)?;
        let axis = staged.as_slice();
        if self.validation == AxisValidation::Full {
            validate_axis(axis)?;
        }

        let group_size = self.group_size.get();
        debug!(
            "Locating {nchan} frequencies on {} beam frequencies ({} execution groups of up to {group_size})",
            axis.len(),
            nchan.div_ceil(group_size),
        );

        // Iterate over execution groups; each gets a disjoint part of the
        // output and shares the staged beam frequencies.
        freq_data
            .axis_chunks_iter_mut(Axis(1), group_size)
            .into_par_iter()
            .zip(frequencies.par_chunks(group_size))
            .enumerate()
            .for_each(|(i_group, (mut group_freq_data, group_freqs))| {
                trace!("Execution group {i_group}: {} frequencies", group_freqs.len());
                group_freq_data
                    .axis_iter_mut(Axis(1))
                    .zip(group_freqs)
                    .for_each(|(mut coeffs, &freq)| {
                        let FreqCoeffs { scale, ratio, grid } =
                            coeffs_on_staged(axis, freq.widen());
                        coeffs[SCALE_ROW] = Q::narrow(scale);
                        coeffs[RATIO_ROW] = Q::narrow(ratio);
                        coeffs[GRID_ROW] = Q::narrow(grid);
                    });
            });

        Ok(())
    }
}

impl Default for FreqLocator {
    fn default() -> Self {
        let LocatorConfig {
            beam_nud_limit,
            group_size,
            validation,
        } = LocatorConfig::default();
        FreqLocator {
            beam_nud_limit,
            group_size: NonZeroUsize::new(group_size).unwrap_or(NonZeroUsize::MIN),
            validation,
        }
    }
}

/// Check that a staged beam frequency map is finite and strictly ascending.
fn validate_axis(axis: &[f64]) -> Result<(), LocateError> {
    if let Some((index, &value)) = axis.iter().find_position(|f| !f.is_finite()) {
        return Err(LocateError::NonFiniteAxisValue { index, value });
    }

    for (index, (&prev, &value)) in axis.iter().tuple_windows().enumerate() {
        // Report the index of the second frequency of the pair.
        let index = index + 1;
        if value < prev {
            return Err(LocateError::AxisNotAscending { index, value });
        }
        if value == prev {
            return Err(LocateError::DuplicateAxisValue { index, value });
        }
    }

    trace!("Beam frequency map passed validation");
    Ok(())
}
