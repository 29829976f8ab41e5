// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all beamfreq-related errors. This should be the *only*
//! error enum that is publicly visible from the command-line interface.

use thiserror::Error;

use super::locate::LocateArgsError;
use crate::locate::LocateError;

/// The *only* publicly visible error from the beamfreq binary.
#[derive(Error, Debug)]
pub enum BeamFreqError {
    /// An error related to the arguments of `locate`.
    #[error("{0}")]
    LocateArgs(String),

    /// An error raised while locating frequencies.
    #[error("{0}")]
    Locate(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// An error related to writing coefficients.
    #[error("{0}")]
    Output(String),

    /// A generic error that can't be clarified further with documentation,
    /// e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

impl From<LocateArgsError> for BeamFreqError {
    fn from(e: LocateArgsError) -> Self {
        Self::LocateArgs(e.to_string())
    }
}

impl From<LocateError> for BeamFreqError {
    fn from(e: LocateError) -> Self {
        Self::Locate(e.to_string())
    }
}

impl From<std::io::Error> for BeamFreqError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<log::SetLoggerError> for BeamFreqError {
    fn from(e: log::SetLoggerError) -> Self {
        Self::Generic(e.to_string())
    }
}
