// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The `locate` subcommand.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use clap::Parser;
use itertools::Itertools;
use log::{debug, info};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use super::{
    common::{unpack_arg_file, InfoPrinter, SerdeFileType, ARG_FILE_HELP},
    BeamFreqError,
};
use crate::{
    constants::{DEFAULT_BEAM_NUD_LIMIT, DEFAULT_GROUP_SIZE, GRID_ROW, RATIO_ROW, SCALE_ROW},
    locate::{AxisValidation, FreqLocator, LocatorConfig},
};

lazy_static::lazy_static! {
    static ref BEAM_NUD_LIMIT_HELP: String =
        format!("The maximum number of beam frequencies that can be staged. Default: {DEFAULT_BEAM_NUD_LIMIT}");

    static ref GROUP_SIZE_HELP: String =
        format!("The number of query frequencies handled by each execution group. Default: {DEFAULT_GROUP_SIZE}");

    static ref VALIDATIONS_COMMA_SEPARATED: String = AxisValidation::iter().join(", ");

    static ref VALIDATION_HELP: String =
        format!("How thoroughly the beam frequencies are checked before use. Valid options are: {}. Default: {}", *VALIDATIONS_COMMA_SEPARATED, AxisValidation::default());

    static ref PRECISIONS_COMMA_SEPARATED: String = Precision::iter().join(", ");

    static ref FREQ_PRECISION_HELP: String =
        format!("The float precision of the query frequencies and the output coefficients. Valid options are: {}. Default: {}", *PRECISIONS_COMMA_SEPARATED, Precision::default());

    static ref BEAM_PRECISION_HELP: String =
        format!("The float precision of the beam frequencies. Valid options are: {}. Default: {}", *PRECISIONS_COMMA_SEPARATED, Precision::default());

    static ref OUTPUT_HELP: String =
        format!("Write the coefficients to this file. Supported formats: {}", *super::common::SERDE_FILE_TYPES_COMMA_SEPARATED);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString)]
pub(super) enum Precision {
    #[strum(serialize = "single")]
    Single,

    #[default]
    #[strum(serialize = "double")]
    Double,
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct LocateArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The query frequencies to locate on the beam frequencies [Hz].
    #[clap(short, long, multiple_values(true), help_heading = "INPUT")]
    pub(super) freqs: Option<Vec<f64>>,

    /// The frequencies of the beam cube [Hz]. These must be sorted
    /// ascendingly.
    #[clap(short, long, multiple_values(true), help_heading = "INPUT")]
    pub(super) beam_freqs: Option<Vec<f64>>,

    #[clap(long, help = BEAM_NUD_LIMIT_HELP.as_str(), help_heading = "LOCATOR")]
    pub(super) beam_nud_limit: Option<usize>,

    #[clap(long, help = GROUP_SIZE_HELP.as_str(), help_heading = "LOCATOR")]
    pub(super) group_size: Option<usize>,

    #[clap(long, help = VALIDATION_HELP.as_str(), help_heading = "LOCATOR")]
    pub(super) validation: Option<String>,

    #[clap(long, help = FREQ_PRECISION_HELP.as_str(), help_heading = "LOCATOR")]
    pub(super) freq_precision: Option<String>,

    #[clap(long, help = BEAM_PRECISION_HELP.as_str(), help_heading = "LOCATOR")]
    pub(super) beam_precision: Option<String>,

    #[clap(short, long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT", parse(from_os_str))]
    pub(super) output: Option<PathBuf>,
}

impl LocateArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct. Where applicable, it will prefer CLI parameters
    /// over those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<LocateArgs, BeamFreqError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let LocateArgs {
                args_file: _,
                freqs,
                beam_freqs,
                beam_nud_limit,
                group_size,
                validation,
                freq_precision,
                beam_precision,
                output,
            } = unpack_arg_file!(arg_file);

            Ok(LocateArgs {
                args_file: None,
                freqs: cli_args.freqs.or(freqs),
                beam_freqs: cli_args.beam_freqs.or(beam_freqs),
                beam_nud_limit: cli_args.beam_nud_limit.or(beam_nud_limit),
                group_size: cli_args.group_size.or(group_size),
                validation: cli_args.validation.or(validation),
                freq_precision: cli_args.freq_precision.or(freq_precision),
                beam_precision: cli_args.beam_precision.or(beam_precision),
                output: cli_args.output.or(output),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<LocateParams, LocateArgsError> {
        debug!("{:#?}", self);

        // Expose all the struct fields to ensure they're all used.
        let LocateArgs {
            args_file: _,
            freqs,
            beam_freqs,
            beam_nud_limit,
            group_size,
            validation,
            freq_precision,
            beam_precision,
            output,
        } = self;

        let freqs = match freqs {
            Some(f) if !f.is_empty() => f,
            _ => return Err(LocateArgsError::NoFreqs),
        };
        let beam_freqs = match beam_freqs {
            Some(f) if !f.is_empty() => f,
            _ => return Err(LocateArgsError::NoBeamFreqs),
        };

        let validation = match validation {
            Some(v) => AxisValidation::from_str(&v.to_lowercase())
                .map_err(|_| LocateArgsError::BadValidation(v))?,
            None => AxisValidation::default(),
        };
        let parse_precision = |p: Option<String>| match p {
            Some(p) => {
                Precision::from_str(&p.to_lowercase()).map_err(|_| LocateArgsError::BadPrecision(p))
            }
            None => Ok(Precision::default()),
        };
        let freq_precision = parse_precision(freq_precision)?;
        let beam_precision = parse_precision(beam_precision)?;

        let locator = FreqLocator::new(LocatorConfig {
            beam_nud_limit: beam_nud_limit.unwrap_or(DEFAULT_BEAM_NUD_LIMIT),
            group_size: group_size.unwrap_or(DEFAULT_GROUP_SIZE),
            validation,
        })
        .map_err(|_| LocateArgsError::ZeroGroupSize)?;

        let output = match output {
            Some(o) => match SerdeFileType::from_path(&o) {
                Some(t) => Some((o, t)),
                None => return Err(LocateArgsError::OutputFileExt(o)),
            },
            None => None,
        };

        let config = locator.config();
        let mut printer = InfoPrinter::new("Locating frequencies".into());
        printer.extend(vec![
            format!("{} query frequencies ({freq_precision} precision)", freqs.len()).into(),
            format!("{} beam frequencies ({beam_precision} precision)", beam_freqs.len()).into(),
            format!("Staging capacity: {}", config.beam_nud_limit).into(),
            format!("Execution group size: {}", config.group_size).into(),
            format!("Beam frequency validation: {}", config.validation).into(),
        ]);
        if let Some((o, _)) = &output {
            printer.push(format!("Writing coefficients to {}", o.display()).into());
        }
        printer.display();

        Ok(LocateParams {
            freqs,
            beam_freqs,
            locator,
            freq_precision,
            beam_precision,
            output,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), BeamFreqError> {
        debug!("Converting arguments into parameters");
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let freq_data = params.locate()?;
        params.report(freq_data.view());
        if let Some((path, file_type)) = &params.output {
            write_coeffs(freq_data.view(), path, *file_type)?;
            info!("Wrote {}", path.display());
        }

        Ok(())
    }
}

pub(super) struct LocateParams {
    pub(super) freqs: Vec<f64>,
    pub(super) beam_freqs: Vec<f64>,
    pub(super) locator: FreqLocator,
    pub(super) freq_precision: Precision,
    pub(super) beam_precision: Precision,
    pub(super) output: Option<(PathBuf, SerdeFileType)>,
}

impl LocateParams {
    /// Locate the query frequencies with the requested precisions. The
    /// coefficients are always returned in double precision.
    pub(super) fn locate(&self) -> Result<Array2<f64>, BeamFreqError> {
        let freqs_single = || self.freqs.iter().map(|&f| f as f32).collect::<Vec<_>>();
        let beam_freqs_single = || self.beam_freqs.iter().map(|&f| f as f32).collect::<Vec<_>>();

        let freq_data = match (self.freq_precision, self.beam_precision) {
            (Precision::Double, Precision::Double) => self
                .locator
                .locate_frequencies_new(&self.freqs, &self.beam_freqs)?,

            (Precision::Double, Precision::Single) => self
                .locator
                .locate_frequencies_new(&self.freqs, &beam_freqs_single())?,

            (Precision::Single, Precision::Double) => self
                .locator
                .locate_frequencies_new(&freqs_single(), &self.beam_freqs)?
                .mapv(f64::from),

            (Precision::Single, Precision::Single) => self
                .locator
                .locate_frequencies_new(&freqs_single(), &beam_freqs_single())?
                .mapv(f64::from),
        };
        Ok(freq_data)
    }

    fn report(&self, freq_data: ArrayView2<f64>) {
        let mut printer = InfoPrinter::new("Coefficients".into());
        printer.extend(
            self.freqs
                .iter()
                .zip(freq_data.axis_iter(Axis(1)))
                .map(|(freq, coeffs)| {
                    format!(
                        "{freq} Hz: scale {} ratio {} grid {}",
                        coeffs[SCALE_ROW], coeffs[RATIO_ROW], coeffs[GRID_ROW]
                    )
                    .into()
                })
                .collect(),
        );
        printer.display();
    }
}

/// The on-disk representation of coefficients.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(super) struct CoeffsFile {
    pub(super) scale: Vec<f64>,
    pub(super) ratio: Vec<f64>,
    pub(super) grid: Vec<f64>,
}

impl From<ArrayView2<'_, f64>> for CoeffsFile {
    fn from(freq_data: ArrayView2<f64>) -> Self {
        CoeffsFile {
            scale: freq_data.row(SCALE_ROW).to_vec(),
            ratio: freq_data.row(RATIO_ROW).to_vec(),
            grid: freq_data.row(GRID_ROW).to_vec(),
        }
    }
}

pub(super) fn write_coeffs(
    freq_data: ArrayView2<f64>,
    path: &Path,
    file_type: SerdeFileType,
) -> Result<(), BeamFreqError> {
    // JSON has no NaN or infinity; serde_json would silently write `null`.
    // TOML represents them natively.
    if file_type == SerdeFileType::Json {
        if let Some((i_row, i_chan)) = freq_data
            .indexed_iter()
            .find(|(_, c)| !c.is_finite())
            .map(|(i, _)| i)
        {
            return Err(BeamFreqError::Output(format!(
                "Coefficient {} of query frequency {i_chan} is not finite ({}); use a toml output file to keep it",
                ["scale", "ratio", "grid"][i_row],
                freq_data[(i_row, i_chan)]
            )));
        }
    }

    let coeffs = CoeffsFile::from(freq_data);
    let mut f = BufWriter::new(File::create(path)?);
    match file_type {
        SerdeFileType::Toml => {
            let s = toml::to_string(&coeffs).map_err(|e| {
                BeamFreqError::Output(format!("Couldn't encode coefficients as toml: {e}"))
            })?;
            f.write_all(s.as_bytes())?;
        }
        SerdeFileType::Json => {
            serde_json::to_writer_pretty(&mut f, &coeffs).map_err(|e| {
                BeamFreqError::Output(format!("Couldn't encode coefficients as json: {e}"))
            })?;
        }
    }
    f.flush()?;
    Ok(())
}

#[derive(Error, Debug)]
pub(super) enum LocateArgsError {
    #[error("No query frequencies were supplied")]
    NoFreqs,

    #[error("No beam frequencies were supplied")]
    NoBeamFreqs,

    #[error("Couldn't parse validation '{0}'. Valid options are: {}", *VALIDATIONS_COMMA_SEPARATED)]
    BadValidation(String),

    #[error("Couldn't parse precision '{0}'. Valid options are: {}", *PRECISIONS_COMMA_SEPARATED)]
    BadPrecision(String),

    #[error("The execution group size must be at least 1")]
    ZeroGroupSize,

    #[error("Output file '{}' doesn't have a recognised file extension! Valid extensions are: {}", .0.display(), *super::common::SERDE_FILE_TYPES_COMMA_SEPARATED)]
    OutputFileExt(PathBuf),
}
