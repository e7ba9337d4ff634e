//! Text extraction through an external `pdftotext`-compatible program

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

/// Runs the extractor as `<program> -layout -enc UTF-8 <pdf> <txt>`
#[derive(Debug, Clone)]
pub struct TextExtractor {
    program: String,
    keep_files: bool,
}

/// Text of one extracted document
#[derive(Debug)]
pub struct ExtractedText {
    /// Label shown in reports, the file name of the source PDF
    pub label: String,
    pub text: String,
    /// Location of the kept text file, when temp files are kept
    pub kept_at: Option<PathBuf>,
}

impl TextExtractor {
    pub fn new(program: impl Into<String>, keep_files: bool) -> Self {
        Self {
            program: program.into(),
            keep_files,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Fail unless the extractor program can be started
    pub fn check_available(&self) -> Result<()> {
        let spawned = Command::new(&self.program)
            .arg("-v")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match spawned {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(CliError::DependencyMissing(self.program.clone()).into())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to start {}", self.program)),
            Ok(_) => Ok(()),
        }
    }

    /// Extract the text of a PDF.
    ///
    /// The text goes through a temporary file that is removed afterwards
    /// unless the extractor was created with `keep_files`.
    pub fn extract(&self, pdf: &Path) -> Result<ExtractedText> {
        ensure_exists(pdf)?;

        let temp = tempfile::Builder::new()
            .prefix("draftmatch-")
            .suffix(".txt")
            .tempfile()
            .context("Failed to create temporary file")?;

        let output = Command::new(&self.program)
            .args(["-layout", "-enc", "UTF-8"])
            .arg(pdf)
            .arg(temp.path())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CliError::DependencyMissing(self.program.clone()),
                _ => extraction_failed(pdf, e.to_string()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => output.status.to_string(),
                message => format!("{}: {message}", output.status),
            };
            return Err(extraction_failed(pdf, reason).into());
        }

        let bytes = fs::read(temp.path())
            .with_context(|| format!("Failed to read extracted text for {}", pdf.display()))?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        log::debug!(
            "Extracted {} bytes of text from {}",
            text.len(),
            pdf.display()
        );

        let kept_at = if self.keep_files {
            let (_, path) = temp
                .keep()
                .with_context(|| format!("Failed to keep {}", pdf.display()))?;
            log::info!("Keeping extracted text at {}", path.display());
            Some(path)
        } else {
            None
        };

        Ok(ExtractedText {
            label: display_label(pdf),
            text,
            kept_at,
        })
    }
}

/// Fail with `FileNotFound` unless `path` is an existing file
pub fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::FileNotFound(path.display().to_string()).into())
    }
}

/// File name used to label a document in reports
pub fn display_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn extraction_failed(pdf: &Path, reason: String) -> CliError {
    CliError::ExtractionFailed {
        path: pdf.display().to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_display_label_uses_file_name() {
        assert_eq!(display_label(Path::new("/tmp/entwurf/regierung.pdf")), "regierung.pdf");
        assert_eq!(display_label(Path::new("b.pdf")), "b.pdf");
    }

    #[test]
    fn test_missing_input_is_file_not_found() {
        let err = ensure_exists(Path::new("/nonexistent/a.pdf")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_directory_is_not_an_input() {
        let dir = TempDir::new().unwrap();
        assert!(ensure_exists(dir.path()).is_err());
    }

    #[test]
    fn test_missing_program_is_dependency_error() {
        let extractor = TextExtractor::new("draftmatch-no-such-extractor", false);
        let err = extractor.check_available().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::DependencyMissing(_))
        ));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("extractor.sh");
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_extract_reads_output_file() {
            let dir = TempDir::new().unwrap();
            let program = script(dir.path(), r#"[ "$1" = "-v" ] && exit 0; cp "$4" "$5""#);
            let pdf = dir.path().join("entwurf.pdf");
            fs::write(&pdf, "Die Pflege wird gestärkt.\n").unwrap();

            let extractor = TextExtractor::new(program.display().to_string(), false);
            extractor.check_available().unwrap();
            let extracted = extractor.extract(&pdf).unwrap();

            assert_eq!(extracted.label, "entwurf.pdf");
            assert_eq!(extracted.text, "Die Pflege wird gestärkt.\n");
            assert!(extracted.kept_at.is_none());
        }

        #[test]
        fn test_keep_files_leaves_text_behind() {
            let dir = TempDir::new().unwrap();
            let program = script(dir.path(), r#"cp "$4" "$5""#);
            let pdf = dir.path().join("a.pdf");
            fs::write(&pdf, "Text.").unwrap();

            let extractor = TextExtractor::new(program.display().to_string(), true);
            let extracted = extractor.extract(&pdf).unwrap();

            let kept = extracted.kept_at.unwrap();
            assert_eq!(fs::read_to_string(&kept).unwrap(), "Text.");
            fs::remove_file(kept).unwrap();
        }

        #[test]
        fn test_nonzero_exit_is_extraction_failure() {
            let dir = TempDir::new().unwrap();
            let program = script(dir.path(), "echo 'Syntax Error' >&2; exit 1");
            let pdf = dir.path().join("kaputt.pdf");
            fs::write(&pdf, "kein pdf").unwrap();

            let extractor = TextExtractor::new(program.display().to_string(), false);
            let err = extractor.extract(&pdf).unwrap_err();

            match err.downcast_ref::<CliError>() {
                Some(CliError::ExtractionFailed { reason, .. }) => {
                    assert!(reason.contains("Syntax Error"))
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
