#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PASSCODE: &str = "open-sesame";

/// A scratch catalog: its own data file and an empty config file, so runs
/// never touch the user's real settings.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("prodcat.toml"), "").unwrap();
        Self { dir }
    }

    fn data_file(&self) -> PathBuf {
        self.dir.path().join("products.json")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("prodcat"));
        for var in [
            "PRODCAT_MAX_PRODUCTS",
            "PRODCAT_BACKEND",
            "PRODCAT_REMOTE_URL",
            "PRODCAT_SEED_FILE",
            "PRODCAT_DECLARATION_NAME",
            "PRODCAT_PASSCODE",
            "PRODCAT_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.env("PRODCAT_DATA_FILE", self.data_file().as_os_str())
            .env("PRODCAT_ADMIN_PASSCODE", PASSCODE)
            .arg("--config")
            .arg(self.dir.path().join("prodcat.toml"));
        cmd
    }

    fn admin(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--passcode", PASSCODE]);
        cmd
    }

    fn add(&self, name: &str) -> assert_cmd::assert::Assert {
        self.admin()
            .args([
                "add",
                "--name",
                name,
                "--description",
                &format!("{} description", name),
                "--usage",
                &format!("How to use {}", name),
                "--link",
                "https://example.com/item",
            ])
            .assert()
    }
}

#[test]
fn test_add_then_list_and_status() {
    let sandbox = Sandbox::new();

    sandbox
        .add("Desk Lamp")
        .success()
        .stdout(predicate::str::contains("Product added (1): Desk Lamp"));

    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Desk Lamp"));

    sandbox
        .cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Products: 1 / 150"))
        .stdout(predicate::str::contains("Backend:  file"));

    assert!(sandbox.data_file().exists());
}

#[test]
fn test_naked_run_lists_catalog() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("No products found."));
}

#[test]
fn test_admin_commands_need_passcode() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args([
            "add",
            "--name",
            "Lamp",
            "--description",
            "d",
            "--usage",
            "u",
            "--link",
            "l",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Unauthorized"));

    sandbox
        .cmd()
        .args(["--passcode", "wrong", "export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unauthorized"));

    assert!(!sandbox.data_file().exists());
}

#[test]
fn test_passcode_from_environment() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("PRODCAT_PASSCODE", PASSCODE)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Synced with file backend"));
}

#[test]
fn test_empty_field_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox
        .admin()
        .args([
            "add",
            "--name",
            "Lamp",
            "--description",
            "",
            "--usage",
            "u",
            "--link",
            "l",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required field: description"));
}

#[test]
fn test_capacity_limit_warns_and_keeps_catalog() {
    let sandbox = Sandbox::new();

    for name in ["A", "B"] {
        sandbox
            .add(name)
            .success()
            .stdout(predicate::str::contains("Product added"));
    }

    // Rerun with a lower limit so the third add hits it.
    sandbox
        .admin()
        .env("PRODCAT_MAX_PRODUCTS", "2")
        .args([
            "add",
            "--name",
            "C",
            "--description",
            "C description",
            "--usage",
            "How to use C",
            "--link",
            "https://example.com/item",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog is full (2 of 2 products)"));

    sandbox
        .cmd()
        .env("PRODCAT_MAX_PRODUCTS", "2")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("(full)"));

    sandbox
        .cmd()
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"C\"").not());
}

#[test]
fn test_update_and_delete_by_position() {
    let sandbox = Sandbox::new();
    sandbox.add("Lamp").success();
    sandbox.add("Desk").success();

    sandbox
        .admin()
        .args(["update", "2", "--name", "Standing Desk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product updated (2): Standing Desk"));

    sandbox
        .admin()
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product deleted (1): Lamp"));

    sandbox
        .cmd()
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Standing Desk"))
        .stdout(predicate::str::contains("Desk description"));
}

#[test]
fn test_export_then_import_round_trip() {
    let sandbox = Sandbox::new();
    sandbox.add("Lamp").success();
    sandbox.add("Desk").success();

    let output = sandbox.admin().arg("export").output().unwrap();
    assert!(output.status.success());
    let exported = String::from_utf8(output.stdout).unwrap();
    assert!(exported.starts_with("export const HARDCODED_PRODUCTS: Product[] = ["));
    assert!(exported.trim_end().ends_with("];"));

    let other = Sandbox::new();
    other
        .admin()
        .arg("import")
        .write_stdin(exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 products (replaced 0)."));

    other
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Lamp"))
        .stdout(predicate::str::contains("2. Desk"));
}

#[test]
fn test_bare_export_is_json_array() {
    let sandbox = Sandbox::new();
    sandbox.add("Lamp").success();

    let output = sandbox.admin().args(["export", "--bare"]).output().unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(1));
    assert_eq!(parsed[0]["usageInstructions"], "How to use Lamp");
}

#[test]
fn test_import_missing_field_fails_without_changes() {
    let sandbox = Sandbox::new();
    sandbox.add("Lamp").success();

    let bad = r#"[{"id":"x","name":"X","description":"d","usageInstructions":"u"}]"#;
    sandbox
        .admin()
        .arg("import")
        .write_stdin(bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field: externalLink"));

    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Lamp"));
}

#[test]
fn test_import_over_maximum_fails_without_changes() {
    let sandbox = Sandbox::new();
    sandbox.add("Lamp").success();

    let two = r#"[
  {"id":"a","name":"A","description":"d","usageInstructions":"u","externalLink":"l"},
  {"id":"b","name":"B","description":"d","usageInstructions":"u","externalLink":"l"}
]"#;
    sandbox
        .admin()
        .env("PRODCAT_MAX_PRODUCTS", "1")
        .arg("import")
        .write_stdin(two)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("exceeds maximum: 2 products given"));

    sandbox
        .cmd()
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lamp"));
}

#[test]
fn test_import_from_file() {
    let sandbox = Sandbox::new();
    let file = sandbox.dir.path().join("catalog.ts");
    fs::write(
        &file,
        r#"export const SHOP: Product[] = [
  {"id":"p1","name":"Kettle","description":"Boils water","usageInstructions":"Fill and switch on","externalLink":"https://example.com/kettle"}
];"#,
    )
    .unwrap();

    sandbox
        .admin()
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 products"));

    sandbox
        .cmd()
        .args(["search", "water"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Kettle"));
}

#[test]
fn test_seed_backend_lists_builtin_products() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["--backend", "seed", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("starter-guide"));

    assert!(!sandbox.data_file().exists());
}

#[test]
fn test_config_masks_passcode() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("max_products = 150"))
        .stdout(predicate::str::contains(PASSCODE).not());
}

#[test]
fn test_missing_config_file_is_an_error() {
    let sandbox = Sandbox::new();
    let mut cmd = Command::new(cargo_bin("prodcat"));
    cmd.arg("--config")
        .arg(sandbox.dir.path().join("nope.toml"))
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
