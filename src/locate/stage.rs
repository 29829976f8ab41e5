// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Staging of a beam frequency map into a fixed-capacity buffer shared by all
//! execution groups.

use std::num::NonZeroUsize;

use log::trace;
use rayon::prelude::*;

use super::{FreqFloat, LocateError};

/// A beam frequency map copied into double precision. Once staged, the buffer
/// is only ever read.
#[derive(Debug, Clone)]
pub(crate) struct StagedAxis {
    freqs: Vec<f64>,
}

impl StagedAxis {
    /// Copy `beam_freq_map` into a double-precision buffer. Maps with more
    /// than `limit` frequencies are rejected. The copy is split between `num_workers` workers, each
    /// writing a disjoint part of the buffer. This function returns only
    /// when every worker has finished, so all staged values are visible to
    /// any subsequent reader.
    pub(crate) fn stage<B: FreqFloat>(
        beam_freq_map: &[B],
        limit: usize,
        num_workers: NonZeroUsize,
    ) -> Result<StagedAxis, LocateError> {
        let nud = beam_freq_map.len();
        if nud > limit {
            return Err(LocateError::AxisTooLong { nud, limit });
        }
        if nud == 0 {
            return Err(LocateError::EmptyAxis);
        }

        // `limit` is only an upper bound; allocate what is actually staged.
        let mut freqs = vec![0.0; nud];
        let chunk_size = nud.div_ceil(num_workers.get());
        trace!("Staging {nud} beam frequencies with chunks of {chunk_size}");
        freqs
            .par_chunks_mut(chunk_size)
            .zip(beam_freq_map.par_chunks(chunk_size))
            .for_each(|(staged, freqs)| {
                staged
                    .iter_mut()
                    .zip(freqs)
                    .for_each(|(staged, &freq)| *staged = freq.widen());
            });

        Ok(StagedAxis { freqs })
    }

    pub(crate) fn as_slice(&self) -> &[f64] {
        &self.freqs
    }
}
