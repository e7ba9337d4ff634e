//! Integration tests for the compare CLI
//!
//! A shell script stands in for `pdftotext`; it copies the "PDF" (a plain
//! text file) to the output path, so the tests control the extracted text.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const AGREEMENT: &str = "Die Parteien vereinbaren eine Verkürzung der Arbeitszeit auf 13 Wochen.\n";

fn compare() -> Command {
    let mut cmd = Command::cargo_bin("compare").unwrap();
    cmd.env_remove("DEBUG").env_remove("DRAFTMATCH_PDFTOTEXT");
    cmd
}

fn write_pdf(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[cfg(unix)]
fn stub_extractor(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-pdftotext");
    fs::write(&path, format!("#!/bin/sh\n[ \"$1\" = \"-v\" ] && exit 0\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_requires_two_files() {
    compare()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));

    compare()
        .arg("a.pdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PDF_B"));
}

#[test]
fn test_help() {
    compare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PDF_A"))
        .stdout(predicate::str::contains("--chunk-size"))
        .stdout(predicate::str::contains("--normalization"));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let existing = write_pdf(dir.path(), "a.pdf", AGREEMENT);

    compare()
        .arg(&existing)
        .arg(dir.path().join("fehlt.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"))
        .stderr(predicate::str::contains("fehlt.pdf"));
}

#[test]
fn test_missing_extractor() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", AGREEMENT);
    let b = write_pdf(dir.path(), "b.pdf", AGREEMENT);

    compare()
        .arg(&a)
        .arg(&b)
        .arg("--pdftotext")
        .arg("draftmatch-no-such-extractor")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "draftmatch-no-such-extractor is not installed",
        ));
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", AGREEMENT);
    let config = dir.path().join("draftmatch.toml");
    fs::write(&config, "[matching]\nchunk_size = \"fünf\"\n").unwrap();

    compare()
        .arg(&a)
        .arg(&a)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

#[cfg(unix)]
mod with_stub_extractor {
    use super::*;

    #[test]
    fn test_identical_sentence_report() {
        let dir = TempDir::new().unwrap();
        let extractor = stub_extractor(dir.path(), "cp \"$4\" \"$5\"");
        let a = write_pdf(dir.path(), "entwurf_a.pdf", AGREEMENT);
        let b = write_pdf(dir.path(), "entwurf_b.pdf", AGREEMENT);
        let report = dir.path().join("bericht.txt");

        compare()
            .arg(&a)
            .arg(&b)
            .arg("--pdftotext")
            .arg(&extractor)
            .arg("-o")
            .arg(&report)
            .assert()
            .success()
            .stdout(predicate::str::contains("Extrahiere Text aus PDF Dateien..."))
            .stdout(predicate::str::contains("Verarbeite 'entwurf_a.pdf'..."))
            .stdout(predicate::str::contains("Suche nach Übereinstimmungen..."))
            .stdout(predicate::str::contains(
                "1 einzigartige Übereinstimmungen gefunden.",
            ));

        let content = fs::read_to_string(&report).unwrap();
        assert!(content.starts_with(
            "=== Übereinstimmung 1 ===\nGefundener Übereinstimmender Text:\n>>> der Arbeitszeit auf 13 Wochen.\n\n"
        ));
        assert!(content.contains("Kontext aus 'entwurf_a.pdf':\n-------------------\n>>> Die Parteien"));
        assert!(content.contains("Kontext aus 'entwurf_b.pdf':"));
        assert!(!content.contains("Textfarbe"));
        assert!(content.ends_with("1 einzigartige Übereinstimmungen gefunden.\n"));
    }

    #[test]
    fn test_no_matches_report_in_working_directory() {
        let dir = TempDir::new().unwrap();
        let extractor = stub_extractor(dir.path(), "cp \"$4\" \"$5\"");
        let a = write_pdf(dir.path(), "a.pdf", "A B C D E F.\n");
        let b = write_pdf(dir.path(), "b.pdf", "X B C D E Y.\n");

        compare()
            .current_dir(dir.path())
            .arg(&a)
            .arg(&b)
            .arg("--pdftotext")
            .arg(&extractor)
            .assert()
            .success()
            .stdout(predicate::str::contains("Keine Übereinstimmungen gefunden."));

        let content = fs::read_to_string(dir.path().join("vergleich_output.txt")).unwrap();
        assert_eq!(content, "Keine Übereinstimmungen gefunden.\n");
    }

    #[test]
    fn test_json_lines_output() {
        let dir = TempDir::new().unwrap();
        let extractor = stub_extractor(dir.path(), "cp \"$4\" \"$5\"");
        let a = write_pdf(
            dir.path(),
            "a.pdf",
            "Einleitung.\nWir senken die Steuern für Familien deutlich.\n",
        );
        let b = write_pdf(dir.path(), "b.pdf", "wir senken die Steuern für alle.\n");
        let report = dir.path().join("bericht.jsonl");

        compare()
            .arg(&a)
            .arg(&b)
            .arg("--pdftotext")
            .arg(&extractor)
            .arg("--format")
            .arg("json")
            .arg("--no-colors")
            .arg("--quiet")
            .arg("-o")
            .arg(&report)
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&report).unwrap();
        let records: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "match");
        assert_eq!(records[0]["documents"][0]["label"], "a.pdf");
        assert_eq!(records[0]["documents"][0]["index"], 1);
        assert_eq!(records[0]["documents"][0]["before"][0], "Einleitung.");
        assert_eq!(records[1]["type"], "summary");
        assert_eq!(records[1]["matches"], 1);
    }

    #[test]
    fn test_chunk_size_option() {
        let dir = TempDir::new().unwrap();
        let extractor = stub_extractor(dir.path(), "cp \"$4\" \"$5\"");
        let a = write_pdf(dir.path(), "a.pdf", "A B C D E F.\n");
        let b = write_pdf(dir.path(), "b.pdf", "X B C D E Y.\n");
        let report = dir.path().join("bericht.txt");

        compare()
            .arg(&a)
            .arg(&b)
            .arg("--pdftotext")
            .arg(&extractor)
            .arg("-n")
            .arg("4")
            .arg("-o")
            .arg(&report)
            .assert()
            .success();

        let content = fs::read_to_string(&report).unwrap();
        assert!(content.contains(">>> B C D E\n"));
    }

    fn kept_text_files(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                name.starts_with("draftmatch-") && name.ends_with(".txt")
            })
            .count()
    }

    #[test]
    fn test_debug_mode_keeps_text_but_not_results() {
        let dir = TempDir::new().unwrap();
        let extractor = stub_extractor(dir.path(), "cp \"$4\" \"$5\"");
        let a = write_pdf(
            dir.path(),
            "a.pdf",
            "Einleitung.\nDie Parteien vereinbaren eine Verkürzung der Arbeitszeit auf 13 Wochen.\n",
        );
        let b = write_pdf(dir.path(), "b.pdf", AGREEMENT);

        let run = |name: &str, debug: Option<&str>| {
            let temp = dir.path().join(format!("tmp-{name}"));
            fs::create_dir(&temp).unwrap();
            let report = dir.path().join(format!("{name}.txt"));

            let mut cmd = compare();
            cmd.env("TMPDIR", &temp)
                .arg(&a)
                .arg(&b)
                .arg("--pdftotext")
                .arg(&extractor)
                .arg("-o")
                .arg(&report);
            match debug {
                Some("flag") => {
                    cmd.arg("--debug");
                }
                Some(value) => {
                    cmd.env("DEBUG", value);
                }
                None => {}
            }
            cmd.assert().success();

            (fs::read(&report).unwrap(), kept_text_files(&temp))
        };

        let (plain, plain_kept) = run("plain", None);
        let (flag, flag_kept) = run("flag", Some("flag"));
        let (env, env_kept) = run("env", Some("1"));

        assert!(String::from_utf8_lossy(&plain).contains("1 einzigartige"));
        assert_eq!(plain, flag);
        assert_eq!(plain, env);
        assert_eq!(plain_kept, 0);
        assert_eq!(flag_kept, 2);
        assert_eq!(env_kept, 2);
    }

    #[test]
    fn test_extraction_failure_writes_no_report() {
        let dir = TempDir::new().unwrap();
        let extractor = stub_extractor(dir.path(), "echo 'Syntax Error: broken file' >&2\nexit 1");
        let a = write_pdf(dir.path(), "a.pdf", AGREEMENT);
        let report = dir.path().join("bericht.txt");

        compare()
            .arg(&a)
            .arg(&a)
            .arg("--pdftotext")
            .arg(&extractor)
            .arg("-o")
            .arg(&report)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Text extraction failed"))
            .stderr(predicate::str::contains("Syntax Error"));

        assert!(!report.exists());
    }
}
