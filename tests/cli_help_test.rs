#[cfg(test)]
mod cli_help_tests {
    use assert_cmd::prelude::*;
    use predicates::prelude::*;
    use std::process::Command;
    use tempfile::TempDir;

    fn edgecli(config_dir: &TempDir) -> Command {
        let mut cmd = Command::cargo_bin("edgecli").unwrap();
        cmd.env("EDGECLI_CONFIG_DIR", config_dir.path())
            .env_remove("EDGECLI_TOKEN")
            .env_remove("EDGECLI_FORMAT")
            .env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn test_cli_help_output() {
        let config_dir = TempDir::new().unwrap();
        edgecli(&config_dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("cache-settings"))
            .stdout(predicate::str::contains("edge-applications"))
            .stdout(predicate::str::contains("config"))
            .stdout(predicate::str::contains("-v, --verbose"))
            .stdout(predicate::str::contains("-V, --version"));
    }

    #[test]
    fn test_update_help_lists_every_field_flag() {
        let config_dir = TempDir::new().unwrap();
        let assert_result = edgecli(&config_dir)
            .args(["cache-settings", "update", "--help"])
            .assert()
            .success();
        let output = assert_result.get_output();
        let help_output = String::from_utf8_lossy(&output.stdout);

        for flag in [
            "--application-id",
            "--cache-settings-id",
            "--in",
            "--name",
            "--browser-cache-settings",
            "--browser-cache-settings-maximum-ttl",
            "--cdn-cache-settings",
            "--cdn-cache-settings-maximum-ttl",
            "--cache-by-query-string",
            "--query-string-fields",
            "--enable-caching-string-sort",
            "--cache-by-cookies",
            "--cookie-names",
            "--adaptive-delivery-action",
            "--device-group",
            "--enable-caching-for-post",
            "--enable-caching-for-options",
            "--l2-caching-enabled",
            "--slice-configuration-enabled",
            "--slice-l2-caching-enabled",
            "--slice-configuration-range",
        ] {
            assert!(help_output.contains(flag), "missing {flag} in help");
        }
    }

    #[test]
    fn test_missing_flags_exit_with_usage_error() {
        let config_dir = TempDir::new().unwrap();
        edgecli(&config_dir)
            .args(["cache-settings", "update", "-a", "1673635841"])
            .assert()
            .code(exitcode::USAGE)
            .stderr(predicate::str::contains("ERROR:"))
            .stderr(predicate::str::contains("required flags are missing"));
    }

    #[test]
    fn test_malformed_document_exits_with_data_error() {
        let config_dir = TempDir::new().unwrap();
        let document = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/error.json");
        edgecli(&config_dir)
            .args(["cache-settings", "update", "-a", "1673635841", "--in", document])
            .assert()
            .code(exitcode::DATAERR)
            .stderr(predicate::str::contains("failed to parse input file"));
    }

    #[test]
    fn test_config_path_uses_override_directory() {
        let config_dir = TempDir::new().unwrap();
        edgecli(&config_dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.yml"));
    }

    #[test]
    fn test_config_show_masks_the_token() {
        let config_dir = TempDir::new().unwrap();
        edgecli(&config_dir)
            .env("EDGECLI_TOKEN", "very-secret")
            .args(["config", "show", "--format", "yaml"])
            .assert()
            .success()
            .stdout(predicate::str::contains("api_url"))
            .stdout(predicate::str::contains("very-secret").not());
    }
}
