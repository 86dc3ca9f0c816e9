//! End-to-end tests for the sitegen binary.
//!
//! Every test runs with an empty config home and logging off, and never
//! reaches a real generation service.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BUNDLE: &str = r#"{
    "title": "Coffee Shop",
    "html": "<!DOCTYPE html><html><head><title>x</title></head><body><h1>Beans</h1></body></html>",
    "css": "h1 { color: brown; }",
    "js": "console.log('ready');"
}"#;

/// Get a Command for the sitegen binary with an isolated environment.
fn sitegen(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sitegen").expect("sitegen binary should exist");
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("SITEGEN_LOG", "off")
        .env_remove("SITEGEN_CONFIG")
        .env_remove("SITEGEN_API_URL")
        .env_remove("SITEGEN_LOG_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

fn write_bundle(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("bundle.json");
    std::fs::write(&path, BUNDLE).unwrap();
    path
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout should be JSON")
}

fn write_config(home: &Path, content: &str) -> PathBuf {
    let dir = home.join("sitegen");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    std::fs::write(&path, content).unwrap();
    path
}

mod preview {
    use super::*;

    #[test]
    fn prints_composed_document() {
        let home = TempDir::new().unwrap();
        let input = write_bundle(&home);

        sitegen(&home)
            .arg("preview")
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
            .stdout(predicate::str::contains("<title>Coffee Shop</title>"))
            .stdout(predicate::str::contains("<style>h1 { color: brown; }</style>"))
            .stdout(predicate::str::contains("<h1>Beans</h1>"))
            .stdout(predicate::str::contains("<title>x</title>").not());
    }

    #[test]
    fn reads_stdin() {
        let home = TempDir::new().unwrap();

        sitegen(&home)
            .args(["preview", "-"])
            .write_stdin(BUNDLE)
            .assert()
            .success()
            .stdout(predicate::str::contains("<script>console.log('ready');</script>"));
    }

    #[test]
    fn iframe_embed_uses_viewport_and_sandbox() {
        let home = TempDir::new().unwrap();
        let input = write_bundle(&home);

        sitegen(&home)
            .arg("preview")
            .arg(&input)
            .args(["--iframe", "--viewport", "mobile"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("<iframe"))
            .stdout(predicate::str::contains("375px"))
            .stdout(predicate::str::contains(r#"sandbox="allow-scripts allow-same-origin""#))
            .stdout(predicate::str::contains(r#"data-render-key="1""#));
    }

    #[test]
    fn data_url() {
        let home = TempDir::new().unwrap();
        let input = write_bundle(&home);

        sitegen(&home)
            .arg("preview")
            .arg(&input)
            .arg("--data-url")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("data:text/html;base64,"));
    }

    #[test]
    fn untrusted_title_is_escaped() {
        let home = TempDir::new().unwrap();

        sitegen(&home)
            .args(["preview", "-", "--escape-untrusted"])
            .write_stdin(r#"{"title": "</title><script>alert(1)</script>", "html": ""}"#)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "<title>&lt;/title&gt;&lt;script&gt;alert(1)&lt;/script&gt;</title>",
            ));
    }

    #[test]
    fn untrusted_mode_from_config_file() {
        let home = TempDir::new().unwrap();
        write_config(home.path(), r#"{"composer": {"escape_mode": "untrusted"}}"#);

        sitegen(&home)
            .args(["preview", "-"])
            .write_stdin(r#"{"title": "A & B", "html": ""}"#)
            .assert()
            .success()
            .stdout(predicate::str::contains("<title>A &amp; B</title>"));
    }

    #[test]
    fn writes_output_file() {
        let home = TempDir::new().unwrap();
        let input = write_bundle(&home);
        let out = home.path().join("preview.html");

        sitegen(&home)
            .arg("preview")
            .arg(&input)
            .arg("--out")
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("wrote preview"));

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("<h1>Beans</h1>"));
    }
}

mod package {
    use super::*;

    #[test]
    fn writes_three_files() {
        let home = TempDir::new().unwrap();
        let input = write_bundle(&home);
        let out_dir = home.path().join("site");

        sitegen(&home)
            .arg("package")
            .arg(&input)
            .arg("--out-dir")
            .arg(&out_dir)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "packaged 3 files",
            ))
            .stdout(predicate::str::contains("index.html, styles.css, script.js"));

        assert_eq!(
            std::fs::read_to_string(out_dir.join("styles.css")).unwrap(),
            "h1 { color: brown; }"
        );
        assert_eq!(
            std::fs::read_to_string(out_dir.join("script.js")).unwrap(),
            "console.log('ready');"
        );
        let index = std::fs::read_to_string(out_dir.join("index.html")).unwrap();
        assert!(index.contains("<title>Generated Website</title>"));
        assert!(index.contains("<style>h1 { color: brown; }</style>"));
    }

    #[test]
    fn json_lists_files_in_order() {
        let home = TempDir::new().unwrap();
        let input = write_bundle(&home);

        let output = sitegen(&home)
            .args(["--format", "json", "package"])
            .arg(&input)
            .arg("--out-dir")
            .arg(home.path().join("site"))
            .output()
            .unwrap();
        assert!(output.status.success());

        let json = stdout_json(&output.stdout);
        let names: Vec<&str> = json["files"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["filename"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["index.html", "styles.css", "script.js"]);
        assert_eq!(json["title"], "Coffee Shop");
    }

    #[test]
    fn requires_a_target() {
        let home = TempDir::new().unwrap();
        let input = write_bundle(&home);

        sitegen(&home)
            .arg("package")
            .arg(&input)
            .assert()
            .failure()
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn archive_then_verify() {
        let home = TempDir::new().unwrap();
        let input = write_bundle(&home);
        let archive = home.path().join("site.zip");

        sitegen(&home)
            .arg("package")
            .arg(&input)
            .arg("--archive")
            .arg(&archive)
            .assert()
            .success();

        sitegen(&home)
            .arg("verify")
            .arg(&archive)
            .assert()
            .success()
            .stdout(predicate::str::contains("verified 3 files"))
            .stdout(predicate::str::contains("Coffee Shop"));
    }

    #[test]
    fn verify_rejects_truncated_archive() {
        let home = TempDir::new().unwrap();
        let input = write_bundle(&home);
        let archive = home.path().join("site.zip");

        sitegen(&home)
            .arg("package")
            .arg(&input)
            .arg("--archive")
            .arg(&archive)
            .assert()
            .success();

        let bytes = std::fs::read(&archive).unwrap();
        std::fs::write(&archive, &bytes[..bytes.len() / 2]).unwrap();

        sitegen(&home).arg("verify").arg(&archive).assert().code(13);
    }
}

mod stats {
    use super::*;

    #[test]
    fn summary_line() {
        let home = TempDir::new().unwrap();
        let input = write_bundle(&home);

        sitegen(&home)
            .arg("stats")
            .arg(&input)
            .assert()
            .success()
            .stdout(predicate::str::contains("CSS 20 B (1 lines)"))
            .stdout(predicate::str::contains("JavaScript 21 B (1 lines)"));
    }

    #[test]
    fn json_report() {
        let home = TempDir::new().unwrap();

        let output = sitegen(&home)
            .args(["-f", "json", "stats", "-"])
            .write_stdin(r#"{"title": "t", "html": "<p>\n</p>", "css": "", "js": null}"#)
            .output()
            .unwrap();
        assert!(output.status.success());

        let json = stdout_json(&output.stdout);
        assert_eq!(json["code"]["html"]["lines"], 2);
        assert_eq!(json["code"]["css"]["bytes"], 0);
        assert_eq!(json["code"]["javascript"]["size"], "0 B");
        assert_eq!(json["total_bytes"], 8);
    }
}

mod catalogues {
    use super::*;

    #[test]
    fn offline_schemes() {
        let home = TempDir::new().unwrap();

        sitegen(&home)
            .args(["schemes", "--offline"])
            .assert()
            .success()
            .stdout(predicate::str::contains("ocean"))
            .stdout(predicate::str::contains("sunset"));
    }

    #[test]
    fn offline_styles_json() {
        let home = TempDir::new().unwrap();

        let output = sitegen(&home)
            .args(["--format", "json", "styles", "--offline"])
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(stdout_json(&output.stdout)["styles"][0]["id"], "modern");
    }
}

mod generate {
    use super::*;

    #[test]
    fn offline_generation_writes_website() {
        let home = TempDir::new().unwrap();
        let out = home.path().join("site.json");

        sitegen(&home)
            .args(["generate", "A bakery in Lisbon. Fresh bread daily.", "--offline"])
            .arg("--out")
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("generated \"A bakery in Lisbon\""));

        let website: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(website["title"], "A bakery in Lisbon");
        assert_eq!(website["color_scheme"], "default");

        // The written website previews like any other document
        sitegen(&home)
            .arg("preview")
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("<title>A bakery in Lisbon</title>"));
    }

    #[test]
    fn save_conflicts_with_offline() {
        let home = TempDir::new().unwrap();

        sitegen(&home)
            .args(["generate", "x", "--offline", "--save", "name"])
            .assert()
            .failure();
    }
}

mod projects {
    use super::*;

    #[test]
    fn invalid_id_is_argument_error() {
        let home = TempDir::new().unwrap();

        sitegen(&home)
            .args(["projects", "show", "not-an-id"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("invalid project id"));
    }

    #[test]
    fn unreachable_service_is_remote_error() {
        let home = TempDir::new().unwrap();

        sitegen(&home)
            .args(["--api-url", "http://127.0.0.1:1", "projects", "list"])
            .assert()
            .code(22);
    }

    #[test]
    fn json_error_on_stderr() {
        let home = TempDir::new().unwrap();

        let output = sitegen(&home)
            .args(["-f", "json", "projects", "delete", "zz"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(10));

        let error: Value = serde_json::from_slice(&output.stderr).unwrap();
        assert_eq!(error["status"], "error");
        assert_eq!(error["error"]["name"], "ERR_ARGS");
    }
}

mod config {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let home = TempDir::new().unwrap();

        sitegen(&home)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("source=built-in defaults"))
            .stdout(predicate::str::contains("api_url=http://localhost:8000"));
    }

    #[test]
    fn env_api_url_override() {
        let home = TempDir::new().unwrap();

        let output = sitegen(&home)
            .env("SITEGEN_API_URL", "https://api.example")
            .args(["-f", "json", "config", "show"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json = stdout_json(&output.stdout);
        assert_eq!(json["config"]["api_url"], "https://api.example");
        assert_eq!(json["api_url_overridden"], true);
        assert!(json["source"].is_null());
    }

    #[test]
    fn xdg_file_is_source() {
        let home = TempDir::new().unwrap();
        let path = write_config(home.path(), r#"{"timeout_secs": 5}"#);

        sitegen(&home)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains(path.display().to_string()))
            .stdout(predicate::str::contains("timeout=5s"));
    }

    #[test]
    fn bad_schema_version_is_config_error() {
        let home = TempDir::new().unwrap();
        write_config(home.path(), r#"{"schema_version": "0.1.0"}"#);

        sitegen(&home)
            .args(["config", "show"])
            .assert()
            .code(11)
            .stderr(predicate::str::contains("Schema version mismatch"));
    }

    #[test]
    fn missing_explicit_config() {
        let home = TempDir::new().unwrap();

        sitegen(&home)
            .arg("--config")
            .arg(home.path().join("missing.json"))
            .args(["config", "show"])
            .assert()
            .code(11);
    }
}

mod errors {
    use super::*;

    #[test]
    fn missing_input_is_not_found() {
        let home = TempDir::new().unwrap();

        sitegen(&home)
            .args(["stats", "/definitely/missing/bundle.json"])
            .assert()
            .code(12)
            .stderr(predicate::str::contains("cannot read"));
    }

    #[test]
    fn non_json_input_is_argument_error() {
        let home = TempDir::new().unwrap();

        sitegen(&home)
            .args(["preview", "-"])
            .write_stdin("<html>not json</html>")
            .assert()
            .code(10)
            .stderr(predicate::str::contains("not a website document"));
    }

    #[test]
    fn unknown_command_fails() {
        let home = TempDir::new().unwrap();

        sitegen(&home)
            .arg("nonexistent-command")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error"));
    }
}
