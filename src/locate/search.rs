// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Binary search of a staged beam frequency map.

/// The pair of beam frequency map indices bracketing a query frequency.
/// `upper` is always `lower + 1`. `lower` is -1 when the query is below the
/// map, and `upper` is the map length when the query is above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub lower: isize,
    pub upper: isize,
}

/// Where a query frequency falls relative to a beam frequency map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    BelowRange,
    AboveRange,
    InRange,
}

impl Bracket {
    pub fn regime(self, nud: usize) -> Regime {
        if self.lower == -1 {
            Regime::BelowRange
        } else if self.upper == nud as isize {
            Regime::AboveRange
        } else {
            Regime::InRange
        }
    }
}

/// Find the indices of `axis` bracketing `freq`. `axis` must be sorted
/// ascendingly.
///
/// An exact match stops the search immediately; the matched index becomes
/// `lower`, so an exact match behaves like a query just above that sample.
pub fn bracket(axis: &[f64], freq: f64) -> Bracket {
    let mut lower: isize = 0;
    let mut upper: isize = axis.len() as isize - 1;

    while lower <= upper {
        let mid = lower + (upper - lower) / 2;
        let beam_freq = axis[mid as usize];
        if beam_freq < freq {
            lower = mid + 1;
        } else if beam_freq > freq {
            upper = mid - 1;
        } else {
            lower = mid;
            break;
        }
    }

    // When the search converges without a match, lower == upper + 1.
    let lower = lower.min(upper);
    Bracket {
        lower,
        upper: lower + 1,
    }
}
