// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{fs::File, io::Write};

use approx::assert_abs_diff_eq;
use indoc::indoc;
use serde::Deserialize;
use tempfile::TempDir;

use crate::{beamfreq, get_cmd_output};

#[derive(Deserialize)]
struct Coeffs {
    scale: Vec<f64>,
    ratio: Vec<f64>,
    grid: Vec<f64>,
}

#[test]
fn test_locate_prints_coefficients() {
    #[rustfmt::skip]
    let cmd = beamfreq()
        .args([
            "locate",
            "--freqs", "0.5", "2.5", "4",
            "--beam-freqs", "1", "2", "3",
        ])
        .ok();
    assert!(cmd.is_ok(), "locate failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("beamfreq locate"), "{stdout}");
    assert!(stdout.contains("Coefficients"), "{stdout}");
    assert!(stdout.contains("2.5 Hz: scale 1 ratio 0.5 grid 1"), "{stdout}");
    assert!(stdout.contains("0.5 Hz: scale 0.5 ratio 1 grid 0"), "{stdout}");
    assert!(stdout.contains("beamfreq locate complete."), "{stdout}");
}

#[test]
fn test_locate_writes_json() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("coeffs.json");

    #[rustfmt::skip]
    let cmd = beamfreq()
        .args([
            "locate",
            "--freqs", "0.5", "2.5", "4",
            "--beam-freqs", "1", "2", "3",
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "locate failed: {}", cmd.err().unwrap());

    let contents = std::fs::read_to_string(&output).unwrap();
    let coeffs: Coeffs = serde_json::from_str(&contents).unwrap();
    assert_abs_diff_eq!(coeffs.scale.as_slice(), [0.5, 1.0, 4.0 / 3.0].as_slice());
    assert_abs_diff_eq!(coeffs.ratio.as_slice(), [1.0, 0.5, 0.0].as_slice());
    assert_abs_diff_eq!(coeffs.grid.as_slice(), [0.0, 1.0, 1.0].as_slice());
}

#[test]
fn test_locate_writes_toml_in_single_precision() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("coeffs.toml");

    #[rustfmt::skip]
    let cmd = beamfreq()
        .args([
            "locate",
            "--freqs", "170e6", "171.28e6",
            "--beam-freqs", "167.68e6", "168.96e6", "170.24e6", "171.52e6",
            "--freq-precision", "single",
            "--beam-precision", "single",
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "locate failed: {}", cmd.err().unwrap());

    let contents = std::fs::read_to_string(&output).unwrap();
    let coeffs: Coeffs = toml::from_str(&contents).unwrap();
    assert_abs_diff_eq!(coeffs.scale.as_slice(), [1.0, 1.0].as_slice());
    assert_abs_diff_eq!(coeffs.grid.as_slice(), [1.0, 2.0].as_slice());
    assert_abs_diff_eq!(coeffs.ratio[0], 0.1875, epsilon = 1e-4);
    assert_abs_diff_eq!(coeffs.ratio[1], 0.1875, epsilon = 1e-4);
}

#[test]
fn test_locate_args_file_with_cli_override() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = tmp_dir.path().join("args.toml");
    let output = tmp_dir.path().join("coeffs.json");
    let mut f = File::create(&args_file).unwrap();
    f.write_all(
        indoc! {r#"
            freqs = [0.5]
            beam_freqs = [1.0, 2.0, 3.0]
            group_size = 1
        "#}
        .as_bytes(),
    )
    .unwrap();
    drop(f);

    #[rustfmt::skip]
    let cmd = beamfreq()
        .args([
            "locate",
            &format!("{}", args_file.display()),
            "--freqs", "1.5",
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "locate failed: {}", cmd.err().unwrap());

    let contents = std::fs::read_to_string(&output).unwrap();
    let coeffs: Coeffs = serde_json::from_str(&contents).unwrap();
    assert_abs_diff_eq!(coeffs.scale.as_slice(), [1.0].as_slice());
    assert_abs_diff_eq!(coeffs.ratio.as_slice(), [0.5].as_slice());
    assert_abs_diff_eq!(coeffs.grid.as_slice(), [0.0].as_slice());
}

#[test]
fn test_locate_save_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let saved = tmp_dir.path().join("saved.toml");

    #[rustfmt::skip]
    let cmd = beamfreq()
        .args([
            "locate",
            "--freqs", "2.5",
            "--beam-freqs", "1", "2", "3",
            "--validation", "capacity",
            "--save-toml", &format!("{}", saved.display()),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "locate failed: {}", cmd.err().unwrap());

    let contents = std::fs::read_to_string(&saved).unwrap();
    assert!(contents.contains("freqs = [2.5]"), "{contents}");
    assert!(contents.contains("validation = \"capacity\""), "{contents}");

    // The saved file reproduces the run.
    let cmd = beamfreq()
        .args(["locate", &format!("{}", saved.display())])
        .ok();
    assert!(cmd.is_ok(), "locate failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("2.5 Hz: scale 1 ratio 0.5 grid 1"), "{stdout}");
}

#[test]
fn test_locate_too_many_beam_freqs() {
    #[rustfmt::skip]
    let cmd = beamfreq()
        .args([
            "locate",
            "--freqs", "2.5",
            "--beam-freqs", "1", "2", "3",
            "--beam-nud-limit", "2",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("staging buffer"), "{stderr}");
}

#[test]
fn test_locate_unsorted_beam_freqs() {
    #[rustfmt::skip]
    let cmd = beamfreq()
        .args([
            "locate",
            "--freqs", "2.5",
            "--beam-freqs", "1", "3", "2",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("sorted ascendingly"), "{stderr}");
}

#[test]
fn test_locate_no_freqs() {
    let cmd = beamfreq()
        .args(["locate", "--beam-freqs", "1", "2"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("No query frequencies"), "{stderr}");
}

#[test]
fn test_locate_nan_ratio_needs_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let json_file = tmp_dir.path().join("coeffs.json");
    let toml_file = tmp_dir.path().join("coeffs.toml");

    // A query on a duplicated beam frequency gives a 0/0 ratio.
    #[rustfmt::skip]
    let cmd = beamfreq()
        .args([
            "locate",
            "--freqs", "2",
            "--beam-freqs", "1", "2", "2", "3",
            "--validation", "capacity",
            "-o", &format!("{}", json_file.display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("not finite"), "{stderr}");
    assert!(!json_file.exists());

    #[rustfmt::skip]
    let cmd = beamfreq()
        .args([
            "locate",
            "--freqs", "2",
            "--beam-freqs", "1", "2", "2", "3",
            "--validation", "capacity",
            "-o", &format!("{}", toml_file.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "locate failed: {}", cmd.err().unwrap());
    let contents = std::fs::read_to_string(&toml_file).unwrap();
    let coeffs: Coeffs = toml::from_str(&contents).unwrap();
    assert!(coeffs.ratio[0].is_nan());
    assert_abs_diff_eq!(coeffs.scale.as_slice(), [1.0].as_slice());
    assert_abs_diff_eq!(coeffs.grid.as_slice(), [1.0].as_slice());
}
