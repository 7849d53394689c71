use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use festival_pdf::{generate_all, load_dishes, Assets, DocumentKind, FestivalContext};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_festival-pdf"))
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

/// Run the binary against `input` with assets pointed into the temp dir.
fn run_in(dir: &TempDir, input: &Path, extra: &[&str]) -> std::process::Output {
    let out = dir.path().to_str().expect("utf-8 temp path");
    let logo = dir.path().join("heritage_fest.png");
    let qr = dir.path().join("menu_qr.png");
    cargo_bin()
        .arg(input)
        .args(["-o", out])
        .arg("--logo")
        .arg(&logo)
        .arg("--qr")
        .arg(&qr)
        .args(extra)
        .output()
        .expect("Failed to execute command")
}

fn assert_pdf(path: &Path) {
    assert!(path.exists(), "{} was not created", path.display());
    let bytes = fs::read(path).expect("Failed to read PDF");
    assert!(bytes.starts_with(b"%PDF"), "{} is not a PDF", path.display());
    assert!(bytes.len() > 500, "{} is too small", path.display());
}

#[test]
fn test_generates_every_document() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let output = run_in(&dir, &fixture("dishes.csv"), &[]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    for n in 1..=3 {
        assert_pdf(&dir.path().join(format!("dish_cards/dish_card_{n}.pdf")));
    }
    assert!(!dir.path().join("dish_cards/dish_card_4.pdf").exists());
    assert!(!dir.path().join("dish_cards/dish_card_0.pdf").exists());

    assert_pdf(&dir.path().join("menu.pdf"));
    assert_pdf(&dir.path().join("dish_card.pdf"));
    for sign in ["table_1", "table_2", "table_3", "enter", "exit"] {
        assert_pdf(&dir.path().join(format!("{sign}_sign.pdf")));
    }
}

#[test]
fn test_only_menu() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let output = run_in(&dir, &fixture("dishes.csv"), &["--only", "menu"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    assert_pdf(&dir.path().join("menu.pdf"));
    assert!(!dir.path().join("dish_cards").exists());
    assert!(!dir.path().join("enter_sign.pdf").exists());
}

#[test]
fn test_signs_with_generated_qr_and_labels() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let output = run_in(
        &dir,
        &fixture("dishes.csv"),
        &[
            "--only",
            "signs",
            "--menu-url",
            "https://example.org/menu",
            "--dietary-labels",
        ],
    );
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_pdf(&dir.path().join("table_3_sign.pdf"));
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let output = run_in(&dir, &dir.path().join("nonexistent.csv"), &[]);

    assert!(!output.status.success(), "Command should have failed for missing input");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "unexpected stderr: {stderr}");
    assert!(!dir.path().join("menu.pdf").exists());
}

#[test]
fn test_undecodable_input() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let output = run_in(&dir, &fixture("broken_encoding.csv"), &[]);

    assert!(!output.status.success(), "Command should have failed for bad encoding");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("utf-8, utf-8-sig, utf-16"), "unexpected stderr: {stderr}");
}

#[test]
fn test_corrupt_logo_fails() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    fs::write(dir.path().join("heritage_fest.png"), b"not an image").unwrap();
    let output = run_in(&dir, &fixture("dishes.csv"), &[]);
    assert!(!output.status.success(), "Command should have failed for a corrupt logo");
}

#[test]
fn test_library_tables_from_fixture() {
    let dishes = load_dishes(&fixture("dishes.csv")).expect("fixture should load");
    let tables: Vec<(&str, u8)> = dishes
        .iter()
        .map(|d| (d.name.as_str(), d.table().get()))
        .collect();
    assert_eq!(
        tables,
        vec![
            ("Chicken Biryani", 3),
            ("Vegetable Samosa", 1),
            ("Tres Leches Cake", 3),
        ]
    );
}

#[test]
fn test_library_cards_are_numbered_from_one() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let dishes = load_dishes(&fixture("dishes.csv")).expect("fixture should load");
    let ctx = FestivalContext::new(dishes, Assets::default(), dir.path());

    let written = generate_all(&ctx, &[DocumentKind::Cards]).expect("cards should generate");
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["dish_card_1.pdf", "dish_card_2.pdf", "dish_card_3.pdf"]
    );
}
