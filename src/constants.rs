// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All coefficient arithmetic is done in double precision before converting to
the output precision, if it is ever required.
 */

/// The default capacity of the buffer that the beam frequency map is staged
/// into. Beam frequency maps longer than this are rejected.
pub const DEFAULT_BEAM_NUD_LIMIT: usize = 128;

/// The default number of query frequencies handled by a single execution
/// group.
pub const DEFAULT_GROUP_SIZE: usize = 32;

/// The number of coefficients produced per query frequency (scale, ratio and
/// grid).
pub const NUM_COEFFS: usize = 3;

/// Row of the output coefficients holding the extrapolation scale.
pub const SCALE_ROW: usize = 0;

/// Row of the output coefficients holding the interpolation ratio.
pub const RATIO_ROW: usize = 1;

/// Row of the output coefficients holding the grid index.
pub const GRID_ROW: usize = 2;
