// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Settings that are fixed for the lifetime of a [`super::FreqLocator`].

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::constants::{DEFAULT_BEAM_NUD_LIMIT, DEFAULT_GROUP_SIZE};

/// How thoroughly a beam frequency map is checked before it is used.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AxisValidation {
    /// Check the capacity of the staging buffer, and that the map is not
    /// empty, ascendingly sorted, free of duplicates and finite.
    #[default]
    #[strum(serialize = "full")]
    Full,

    /// Only check the capacity of the staging buffer and that the map is not
    /// empty. Unsorted or duplicated maps give undefined (but memory-safe)
    /// results; division by zero produces IEEE-754 NaN or infinity.
    #[strum(serialize = "capacity")]
    Capacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// The maximum number of beam frequencies that can be staged.
    pub beam_nud_limit: usize,

    /// The number of query frequencies handled by each execution group.
    pub group_size: usize,

    pub validation: AxisValidation,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            beam_nud_limit: DEFAULT_BEAM_NUD_LIMIT,
            group_size: DEFAULT_GROUP_SIZE,
            validation: AxisValidation::default(),
        }
    }
}
