// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Things shared by `beamfreq` subcommands: argument-file handling and pretty
//! printing.

use std::{borrow::Cow, path::Path, str::FromStr};

use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

lazy_static::lazy_static! {
    pub(super) static ref SERDE_FILE_TYPES_COMMA_SEPARATED: String = SerdeFileType::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *SERDE_FILE_TYPES_COMMA_SEPARATED);
}

/// File formats that arguments can be read from and coefficients written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub(super) enum SerdeFileType {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

impl SerdeFileType {
    /// Determine the file type from the extension of `path`.
    pub(super) fn from_path(path: &Path) -> Option<SerdeFileType> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| SerdeFileType::from_str(&e).ok())
    }
}

/// Read an arguments file into the type expected by the calling function.
/// Errors are returned from the calling function as a `BeamFreqError`.
macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use crate::cli::common::{SerdeFileType, SERDE_FILE_TYPES_COMMA_SEPARATED};

        let arg_file = &$arg_file;
        let file_type = SerdeFileType::from_path(arg_file).ok_or_else(|| {
            BeamFreqError::ArgFile(format!(
                "Argument file '{}' doesn't have a recognised file extension! Valid extensions are: {}",
                arg_file.display(),
                *SERDE_FILE_TYPES_COMMA_SEPARATED
            ))
        })?;
        debug!("Parsing {file_type} argument file {}", arg_file.display());
        let contents = std::fs::read_to_string(arg_file)?;
        let parsed = match file_type {
            SerdeFileType::Toml => toml::from_str(&contents).map_err(|e| e.to_string()),
            SerdeFileType::Json => serde_json::from_str(&contents).map_err(|e| e.to_string()),
        };
        parsed.map_err(|e| {
            BeamFreqError::ArgFile(format!(
                "Couldn't decode {file_type} structure from '{}':\n{e}",
                arg_file.display()
            ))
        })?
    });
}
pub(super) use unpack_arg_file;

/// Prints a bold title followed by a tree of lines at the info level.
pub(super) struct InfoPrinter {
    title: Cow<'static, str>,
    lines: Vec<Cow<'static, str>>,
}

impl InfoPrinter {
    pub(super) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            lines: vec![],
        }
    }

    pub(super) fn push(&mut self, line: Cow<'static, str>) {
        self.lines.push(line);
    }

    pub(super) fn extend(&mut self, lines: Vec<Cow<'static, str>>) {
        self.lines.extend(lines);
    }

    pub(super) fn display(self) {
        log::info!("{}", console::style(self.title).bold());
        let num_lines = self.lines.len();
        for (i, line) in self.lines.into_iter().enumerate() {
            let branch = if i + 1 == num_lines { '└' } else { '├' };
            log::info!("{branch} {line}");
        }
        log::info!("");
    }
}
