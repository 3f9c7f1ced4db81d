//! CLI workflow tests.
//!
//! Each test runs the `lockbox` binary against its own temporary HOME.

mod support;

use std::fs;

use predicates::prelude::*;
use support::range_server::RangeServer;
use support::*;

#[test]
fn test_new_creates_store_and_key() {
    let t = Test::new();
    assert_success(&t.new_store());

    assert!(t.store_path().exists());
    let keys = t.home.path().join(".lockbox").join("keys");
    let identities: Vec<_> = fs::read_dir(&keys).unwrap().collect();
    assert_eq!(identities.len(), 1);
}

#[test]
fn test_new_refuses_to_clobber() {
    let t = Test::with_properties(&[("keep", "me")]);

    let output = t.new_store();
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
    assert_value(&t, "keep", "me");

    t.cmd().args(["new", "--force"]).assert().success();
    assert_eq!(t.list_json()["count"], 0);
}

#[test]
fn test_set_get_roundtrip() {
    let t = Test::with_properties(STANDARD_PROPERTIES);
    for (name, value) in STANDARD_PROPERTIES {
        assert_value(&t, name, value);
    }
}

#[test]
fn test_store_file_hides_plaintext() {
    let t = Test::with_properties(STANDARD_PROPERTIES);
    let raw = fs::read_to_string(t.store_path()).unwrap();
    for (name, value) in STANDARD_PROPERTIES {
        assert!(!raw.contains(name));
        if !value.is_empty() {
            assert!(!raw.contains(value));
        }
    }
}

#[test]
fn test_set_reads_piped_value() {
    let t = Test::init();
    t.cmd()
        .args(["set", "piped"])
        .write_stdin("from stdin\n")
        .assert()
        .success();
    assert_value(&t, "piped", "from stdin");
}

#[test]
fn test_set_overwrites() {
    let t = Test::init();
    assert_success(&t.set("k", "one"));
    let output = t.set("k", "two");
    assert_success(&output);
    assert_stdout_contains(&output, "updated");
    assert_value(&t, "k", "two");
}

#[test]
fn test_list_json() {
    let t = Test::with_properties(&[("b", "2"), ("a", "1")]);
    let json = t.list_json();
    assert_eq!(json["count"], 2);
    let names: Vec<&str> = json["names"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(names.contains(&"a"));
    assert!(names.contains(&"b"));
}

#[test]
fn test_list_empty() {
    let t = Test::init();
    let output = t.list();
    assert_success(&output);
    assert_stdout_contains(&output, "no properties stored");
}

#[test]
fn test_get_missing_property() {
    let t = Test::init();
    let output = t.get("nope");
    assert_failure(&output);
    assert_stderr_contains(&output, "property not found: nope");
}

#[test]
fn test_commands_without_store() {
    let t = Test::new();
    let output = t.list();
    assert_failure(&output);
    assert_stderr_contains(&output, "no store found");
    assert_stderr_contains(&output, "lockbox new");
}

#[test]
fn test_rm_present_and_absent() {
    let t = Test::with_properties(&[("gone", "soon")]);

    let output = t.rm("gone");
    assert_success(&output);
    assert_stdout_contains(&output, "removed");
    assert_failure(&t.get("gone"));

    let before = fs::read(t.store_path()).unwrap();
    let output = t.rm("gone");
    assert_success(&output);
    assert_stdout_contains(&output, "not found");
    assert_eq!(fs::read(t.store_path()).unwrap(), before);
}

#[test]
fn test_rm_requires_confirmation_when_not_interactive() {
    let t = Test::with_properties(&[("keep", "me")]);
    t.cmd()
        .args(["rm", "keep"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    assert_value(&t, "keep", "me");
}

#[test]
fn test_generate_stores_random_value() {
    let t = Test::init();
    let output = t
        .cmd()
        .args(["generate", "db", "--length", "40", "--show"])
        .output()
        .unwrap();
    assert_success(&output);

    let shown = stdout(&output).trim_end().to_string();
    assert_eq!(shown.len(), 40);
    assert!(shown.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_value(&t, "db", &shown);
}

#[test]
fn test_generate_uses_configured_length() {
    let t = Test::init();
    fs::write(
        t.home.path().join(".lockbox").join("config.toml"),
        "length = 12\n",
    )
    .unwrap();

    assert_success(&t.cmd().args(["generate", "api"]).output().unwrap());
    let output = t.get("api");
    assert_eq!(stdout(&output).trim_end().len(), 12);
}

#[test]
fn test_generate_rejects_zero_length() {
    let t = Test::init();
    t.cmd()
        .args(["generate", "db", "--length", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid length"));
}

#[test]
fn test_password_prints_without_storing() {
    let t = Test::init();
    let output = t
        .cmd()
        .args(["password", "--length", "64", "--special"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output).trim_end_matches('\n').len(), 64);
    assert_eq!(t.list_json()["count"], 0);
}

#[test]
fn test_no_special_overrides_config() {
    let t = Test::init();
    fs::write(
        t.home.path().join(".lockbox").join("config.toml"),
        "special = true\n",
    )
    .unwrap();

    let output = t
        .cmd()
        .args(["password", "--length", "200", "--no-special"])
        .output()
        .unwrap();
    assert_success(&output);
    let value = stdout(&output).trim_end_matches('\n').to_string();
    assert_eq!(value.len(), 200);
    assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));

    let output = t
        .cmd()
        .args(["generate", "api", "--length", "200", "--no-special", "--show"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(stdout(&output)
        .trim_end_matches('\n')
        .chars()
        .all(|c| c.is_ascii_alphanumeric()));

    t.cmd()
        .args(["password", "--special", "--no-special"])
        .assert()
        .failure();
}

#[test]
fn test_store_flag_and_env_override() {
    let t = Test::new();
    let custom = t.home.path().join("elsewhere.dat");

    t.cmd()
        .args(["new", "--store"])
        .arg(&custom)
        .assert()
        .success();
    assert!(custom.exists());
    assert!(!t.store_path().exists());

    t.cmd()
        .env("LOCKBOX_STORE", &custom)
        .args(["set", "k", "v"])
        .assert()
        .success();
    t.cmd()
        .args(["get", "k", "--store"])
        .arg(&custom)
        .assert()
        .success()
        .stdout("v\n");
}

#[test]
fn test_other_home_cannot_decrypt() {
    let alice = Test::with_properties(&[("token", "abc")]);
    let mallory = Test::init();

    mallory
        .cmd()
        .args(["get", "token", "--store"])
        .arg(alice.store_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("decryption failed"));
}

#[test]
fn test_read_without_key_does_not_create_one() {
    let alice = Test::with_properties(&[("token", "abc")]);
    let stranger = Test::new();

    stranger
        .cmd()
        .args(["get", "token", "--store"])
        .arg(alice.store_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no protection key"));
    assert!(!stranger.home.path().join(".lockbox").join("keys").exists());
}

#[test]
fn test_corrupt_store_reported() {
    let t = Test::init();
    fs::write(t.store_path(), "%%% not base64 %%%").unwrap();
    t.cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"));
}

#[test]
fn test_check_breached_password() {
    let server = RangeServer::start(200, "1E4C9B93F3F0682250B6CF8331B7EE68FD8:9545824\r\n");
    let t = Test::new();

    let output = t
        .cmd()
        .args(["check", "--json", "--endpoint", server.endpoint.as_str()])
        .write_stdin("password\n")
        .output()
        .unwrap();
    assert_success(&output);

    let verdict: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(verdict["is_breached"], true);
    assert_eq!(verdict["times_seen"], 9545824);
}

#[test]
fn test_check_clean_password_via_env_endpoint() {
    let server = RangeServer::start(200, "0018A45C4D1DEF81644B54AB7F969B88D65:1\r\n");
    let t = Test::new();

    t.cmd()
        .env("LOCKBOX_ENDPOINT", &server.endpoint)
        .arg("check")
        .write_stdin("password\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_check_unreachable_index() {
    let t = Test::new();
    t.cmd()
        .args(["check", "--endpoint", "http://127.0.0.1:1/range"])
        .write_stdin("password\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("breach index unavailable"));
}

#[test]
fn test_check_refuses_remote_plain_http() {
    let t = Test::new();
    t.cmd()
        .args(["check", "--endpoint", "http://192.0.2.2:8080/range"])
        .write_stdin("password\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("loopback"));
}

#[test]
fn test_verbose_logs_to_stderr_without_secrets() {
    let t = Test::init();
    let output = t
        .cmd()
        .args(["--verbose", "set", "token", "hunter2"])
        .output()
        .unwrap();
    assert_success(&output);

    let err = stderr(&output);
    assert!(err.contains("DEBUG"), "expected debug logs, got: {}", err);
    assert!(!err.contains("hunter2"));
}

#[test]
fn test_default_no_log_output() {
    let t = Test::init();
    let output = t.list();
    assert_success(&output);
    let err = stderr(&output);
    assert!(!err.contains("DEBUG") && !err.contains("TRACE"));
}

#[test]
fn test_completions() {
    let t = Test::new();
    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}
