//! Command helper methods for Test.

use super::fixtures::{REPOSITORY, USERNAME};
use super::Test;
use assert_cmd::Command;
use std::process::Output;

const PROXY_VARS: &[&str] = &[
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
];

impl Test {
    /// Create a travis-encrypt command pointed at the local key server.
    ///
    /// Returns a Command configured with:
    /// - TRAVIS_ENCRYPT_API_URL set to the test server
    /// - NO_COLOR set so output can be matched literally
    /// - Current directory set to the test project directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd =
            Command::cargo_bin("travis-encrypt").expect("failed to find travis-encrypt binary");
        cmd.env("TRAVIS_ENCRYPT_API_URL", self.server.url());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("TRAVIS_ENCRYPT_LOG");
        for var in PROXY_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Encrypt `password` for the fixture repository with extra arguments.
    pub fn encrypt(&self, password: &str, args: &[&str]) -> Output {
        self.cmd()
            .args(["--password", password])
            .args(args)
            .args([USERNAME, REPOSITORY])
            .output()
            .expect("failed to run travis-encrypt")
    }

    /// Encrypt `password` into the project's `.travis.yml`.
    pub fn encrypt_to_file(&self, password: &str, args: &[&str]) -> Output {
        self.cmd()
            .args(["--password", password])
            .args(args)
            .args([USERNAME, REPOSITORY, ".travis.yml"])
            .output()
            .expect("failed to run travis-encrypt")
    }

    /// Encrypt every variable in `env_file`, optionally into `.travis.yml`.
    pub fn encrypt_env_file(&self, env_file: &str, to_file: bool) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["--env-file", env_file, USERNAME, REPOSITORY]);
        if to_file {
            cmd.arg(".travis.yml");
        }
        cmd.output().expect("failed to run travis-encrypt --env-file")
    }
}
