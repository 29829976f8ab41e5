// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Locate observation frequencies within the frequency axis of a beam cube.

Each query frequency is mapped to a scale, a ratio and a grid index, which a
beam sampler uses to interpolate (or extrapolate) along the frequency axis.
 */

mod cli;
pub mod constants;
pub mod locate;

// Re-exports.
pub use cli::{BeamFreq, BeamFreqError};
pub use locate::{
    bracket, locate_frequency, AxisValidation, Bracket, FreqCoeffs, FreqFloat, FreqLocator,
    LocateError, LocatorConfig, Regime,
};
