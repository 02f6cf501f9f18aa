#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Organization, CAGE, assessor, contract.
pub const METADATA: &[&str] = &["Acme Machining", "", "Jordan Lee", ""];

/// One line per presented question for a Level 2 shop with an MFA gap,
/// no SPRS submission and BYOD in use. 37 questions are presented and
/// 6 dependents are skipped.
pub const LEVEL_TWO_ANSWERS: &[&str] = &[
    // system inventory
    "3", "n", "n", "y", "y", "2", "n", "n", "y",
    // data flow
    "y", "y", "3", "1", "3", "1", "1", "n", "n",
    // boundary
    "n", "y", "1", "n", "y", "y", "n", "y", "n",
    // access control
    "y", "4", "y", "1", "1", "1", "1", "1", "1", "y",
];

pub fn script(parts: &[&[&str]]) -> String {
    let mut s = String::new();
    for part in parts {
        for line in *part {
            s.push_str(line);
            s.push('\n');
        }
    }
    s
}

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub work: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let work = tmp.path().join("work");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&work).expect("create work dir");
        Self {
            _tmp: tmp,
            home,
            work,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("cmmc-scope");
        cmd.env("HOME", &self.home)
            .env_remove("RUST_LOG")
            .current_dir(&self.work);
        cmd
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.work.join(name)
    }

    pub fn path_str(&self, name: &str) -> String {
        self.path(name).to_str().expect("utf8 path").to_string()
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_stdin(&self, args: &[&str], input: String) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .write_stdin(input)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    /// Run expecting failure and return the JSON error envelope.
    pub fn run_json_err(&self, args: &[&str], input: Option<String>) -> Value {
        let mut cmd = self.cmd();
        cmd.arg("--json").args(args);
        if let Some(input) = input {
            cmd.write_stdin(input);
        }
        let out = cmd.assert().failure().get_output().stdout.clone();
        serde_json::from_slice(&out).expect("valid json error output")
    }

    pub fn read_json(&self, name: &str) -> Value {
        let raw = fs::read_to_string(self.path(name)).expect("read json file");
        serde_json::from_str(&raw).expect("parse json file")
    }

    /// Full Level 2 assessment written to `name`.
    pub fn complete_assessment(&self, name: &str) -> Value {
        let out = self.path_str(name);
        self.run_json_stdin(
            &["assess", "--output", &out],
            script(&[METADATA, LEVEL_TWO_ANSWERS]),
        )
    }
}
