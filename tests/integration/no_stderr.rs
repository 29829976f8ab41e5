// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{beamfreq, get_cmd_output};

#[test]
fn test_locate_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("coeffs.json");

    #[rustfmt::skip]
    let cmd = beamfreq()
        .args([
            "locate",
            "--freqs", "150e6", "170e6", "200e6",
            "--beam-freqs", "160e6", "180e6",
            "--output", &format!("{}", output.display()),
        ])
        .ok();
    assert!(
        cmd.is_ok(),
        "locate failed on simple input: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_dry_run_no_stderr() {
    #[rustfmt::skip]
    let cmd = beamfreq()
        .args([
            "locate",
            "--freqs", "1", "2",
            "--beam-freqs", "1", "3",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "dry run failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("Dry run"), "{stdout}");
    assert!(!stdout.contains("Coefficients"), "{stdout}");
}
