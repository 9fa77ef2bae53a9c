use std::fs;
use std::path::Path;
use std::process::Command;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_idcard-sheets"))
}

/// Workspace with empty backgrounds/, fonts/ and hasil/ directories.
fn setup() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    for sub in ["backgrounds", "fonts", "hasil"] {
        fs::create_dir_all(dir.path().join(sub)).expect("Failed to create directory");
    }
    dir
}

fn write_roster(dir: &Path, body: &str) -> String {
    let path = dir.join("roster.csv");
    fs::write(&path, body).expect("Failed to write roster");
    path.to_string_lossy().into_owned()
}

fn add_background(dir: &Path, name: &str) {
    image::RgbaImage::from_pixel(400, 200, image::Rgba([0, 0, 0, 255]))
        .save(dir.join("backgrounds").join(name))
        .expect("Failed to write background");
}

fn add_font_fixture(dir: &Path) {
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSans.ttf");
    fs::copy(fixture, dir.join("fonts").join("DejaVuSans.ttf")).expect("Failed to copy font fixture");
}

fn run_in(dir: &Path, roster: &str, extra: &[&str]) -> std::process::Output {
    let backgrounds = dir.join("backgrounds");
    let fonts = dir.join("fonts");
    let output = dir.join("hasil");
    cargo_bin()
        .args(["-i", roster])
        .args(["--backgrounds", backgrounds.to_str().unwrap()])
        .args(["--fonts", fonts.to_str().unwrap()])
        .args(["-o", output.to_str().unwrap()])
        .args(extra)
        .output()
        .expect("Failed to execute command")
}

fn output_is_empty(dir: &Path) -> bool {
    fs::read_dir(dir.join("hasil"))
        .expect("Failed to read output directory")
        .next()
        .is_none()
}

#[test]
fn test_help() {
    let output = cargo_bin().arg("--help").output().expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--input"));
    assert!(stdout.contains("--backgrounds"));
}

#[test]
fn test_successful_run_with_manifest_and_pdf() {
    let dir = setup();
    add_font_fixture(dir.path());
    image::RgbaImage::from_pixel(200, 120, image::Rgba([0, 0, 0, 255]))
        .save(dir.path().join("backgrounds").join("HITAM.png"))
        .unwrap();
    image::RgbaImage::from_pixel(200, 120, image::Rgba([240, 140, 20, 255]))
        .save(dir.path().join("backgrounds").join("ORANYE.png"))
        .unwrap();
    let roster = write_roster(
        dir.path(),
        "nama,background,font,jumlah\nANDI BUDI,HITAM.png,DejaVuSans.ttf,1\nSITI AMINAH,ORANYE.png,DejaVuSans.ttf,1\n",
    );

    let output = run_in(
        dir.path(),
        &roster,
        &["--run-id", "ok", "--manifest", "--pdf", "--margin-x", "40", "--margin-y", "30"],
    );

    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let run_dir = dir.path().join("hasil").join("ok");
    for file in ["labelnama_0.png", "labelnama_1.png", "combined_all.png", "manifest.json", "combined_all.pdf"] {
        assert!(run_dir.join(file).is_file(), "{} should exist", file);
    }

    let pdf = fs::read(run_dir.join("combined_all.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(run_dir.join("manifest.json")).unwrap()).unwrap();
    assert_eq!(manifest["run_id"], "ok");
    assert_eq!(manifest["row_sheets"].as_array().map(|a| a.len()), Some(2));

    let combined = image::open(run_dir.join("combined_all.png")).unwrap();
    let sheet_height = 5 * 120 + 4 * 30;
    assert_eq!(combined.width(), 9 * 200 + 8 * 30);
    assert_eq!(combined.height(), 2 * sheet_height + 50);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Generated:"), "stdout: {}", stdout);
    assert!(stdout.contains("combined_all.pdf"), "stdout: {}", stdout);
    assert!(stdout.contains("Manifest:"), "stdout: {}", stdout);
    assert!(stdout.contains("Run ID: ok"), "stdout: {}", stdout);
    assert!(stdout.contains("ANDI BUDI: "), "stdout: {}", stdout);
    assert!(stdout.contains("SITI AMINAH: "), "stdout: {}", stdout);
}

#[test]
fn test_missing_background() {
    let dir = setup();
    let roster = write_roster(
        dir.path(),
        "nama,background,font,jumlah\nANDI BUDI,HITAM.png,Roboto.ttf,1\n",
    );

    let output = run_in(dir.path(), &roster, &["--run-id", "nobg"]);

    assert!(!output.status.success(), "Command should have failed for missing background");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Background file not found"), "stderr: {}", stderr);
    assert!(output_is_empty(dir.path()), "No output should be written");
}

#[test]
fn test_missing_font() {
    let dir = setup();
    add_background(dir.path(), "HITAM.png");
    let roster = write_roster(
        dir.path(),
        "nama,background,font,jumlah\nANDI BUDI,HITAM.png,Roboto.ttf,1\n",
    );

    let output = run_in(dir.path(), &roster, &[]);

    assert!(!output.status.success(), "Command should have failed for missing font");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Font file not found"), "stderr: {}", stderr);
    assert!(output_is_empty(dir.path()));
}

#[test]
fn test_missing_resource_on_later_row() {
    let dir = setup();
    add_background(dir.path(), "HITAM.png");
    let roster = write_roster(
        dir.path(),
        "nama,background,font,jumlah\nANDI,HITAM.png,Roboto.ttf,1\nBUDI,BIRU.png,Roboto.ttf,1\n",
    );

    let output = run_in(dir.path(), &roster, &[]);

    assert!(!output.status.success());
    assert!(output_is_empty(dir.path()));
}

#[test]
fn test_unparseable_font() {
    let dir = setup();
    add_background(dir.path(), "HITAM.png");
    fs::write(dir.path().join("fonts").join("Broken.ttf"), b"not a font").unwrap();
    let roster = write_roster(
        dir.path(),
        "nama,background,font,jumlah\nANDI,HITAM.png,Broken.ttf,1\n",
    );

    let output = run_in(dir.path(), &roster, &[]);

    assert!(!output.status.success(), "Command should have failed for a broken font");
    assert!(output_is_empty(dir.path()));
}

#[test]
fn test_missing_column() {
    let dir = setup();
    let roster = write_roster(dir.path(), "nama,background,jumlah\nANDI,HITAM.png,1\n");

    let output = run_in(dir.path(), &roster, &[]);

    assert!(!output.status.success(), "Command should have failed for missing column");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Malformed input"), "stderr: {}", stderr);
}

#[test]
fn test_non_numeric_quantity() {
    let dir = setup();
    let roster = write_roster(
        dir.path(),
        "nama,background,font,jumlah\nANDI,HITAM.png,Roboto.ttf,satu\n",
    );

    let output = run_in(dir.path(), &roster, &[]);

    assert!(!output.status.success(), "Command should have failed for non-numeric jumlah");
}

#[test]
fn test_invalid_roster_file() {
    let dir = setup();
    let output = run_in(dir.path(), "nonexistent.csv", &[]);

    assert!(!output.status.success(), "Command should have failed for missing roster");
}

#[test]
fn test_invalid_font_range() {
    let dir = setup();
    let roster = write_roster(
        dir.path(),
        "nama,background,font,jumlah\nANDI,HITAM.png,Roboto.ttf,1\n",
    );

    let output = run_in(
        dir.path(),
        &roster,
        &["--min-font-size", "60", "--max-font-size", "40"],
    );

    assert!(!output.status.success(), "Command should have failed for inverted font range");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid configuration"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_run_id() {
    let dir = setup();
    add_background(dir.path(), "HITAM.png");
    let roster = write_roster(
        dir.path(),
        "nama,background,font,jumlah\nANDI,HITAM.png,Roboto.ttf,1\n",
    );

    let output = run_in(dir.path(), &roster, &["--run-id", "../escape"]);

    assert!(!output.status.success(), "Command should have failed for a path-like run id");
    assert!(output_is_empty(dir.path()));
}
