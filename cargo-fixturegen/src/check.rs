//! Staleness check of generated fixtures against a fresh in-memory pass.

use std::collections::BTreeMap;
use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use fixturegen::{Generator, MemorySink, load_crate_dir};

use crate::cache;
use crate::error::CliError;
use crate::metadata::Settings;
use crate::run::log_failures;

/// Differences between a fresh pass and the output directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Number of artefacts compared.
    pub checked: usize,
    /// Artefacts whose content on disk differs, or that the previous
    /// manifest lists but no definition generates any more.
    pub stale: Vec<Utf8PathBuf>,
    /// Artefacts absent from disk.
    pub missing: Vec<Utf8PathBuf>,
}

impl CheckReport {
    /// Returns `true` when every artefact matches.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.stale.is_empty() && self.missing.is_empty()
    }
}

/// Generates into memory and compares the result with `settings.out_dir`.
///
/// Nothing is written.
///
/// # Errors
///
/// Returns [`CliError::Generation`] when any definition fails, or an I/O
/// error when existing output cannot be read.
pub fn run(settings: &Settings) -> Result<CheckReport, CliError> {
    let loaded = load_crate_dir(&settings.src_dir)?;
    let sink = MemorySink::new();
    let report = Generator::new(settings.options())
        .run(&loaded.index, &sink)
        .with_source_failures(loaded.failures);
    log_failures(&report);
    report.into_result()?;
    let expected = sink.into_artifacts();
    let orphans = cache::read_manifest(&settings.out_dir)
        .map(|manifest| manifest.orphans(expected.keys()))
        .unwrap_or_default();
    compare(&expected, &orphans, &settings.out_dir)
}

/// Compares `expected` artefacts, keyed by relative path, with `out_dir`.
///
/// Each of `orphans` still present on disk is reported as stale.
///
/// # Errors
///
/// Returns an I/O error other than a missing file or directory.
pub fn compare(
    expected: &BTreeMap<Utf8PathBuf, String>,
    orphans: &[Utf8PathBuf],
    out_dir: &Utf8Path,
) -> Result<CheckReport, CliError> {
    let mut report = CheckReport {
        checked: expected.len(),
        ..CheckReport::default()
    };
    let dir = match Dir::open_ambient_dir(out_dir, ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            report.missing = expected.keys().cloned().collect();
            return Ok(report);
        }
        Err(err) => return Err(CliError::io(out_dir, err)),
    };

    for (path, content) in expected {
        match dir.read_to_string(path) {
            Ok(existing) if existing == *content => {}
            Ok(_) => report.stale.push(path.clone()),
            Err(err) if err.kind() == ErrorKind::NotFound => report.missing.push(path.clone()),
            Err(err) => return Err(CliError::io(out_dir.join(path), err)),
        }
    }
    report
        .stale
        .extend(orphans.iter().filter(|path| dir.is_file(path)).cloned());
    Ok(report)
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "temporary directories are created by the tests themselves"
    )]

    use super::*;
    use rstest::rstest;

    fn expected() -> BTreeMap<Utf8PathBuf, String> {
        BTreeMap::from([
            ("a_fixture.rs".into(), "a\n".to_owned()),
            ("nested/b_fixture.rs".into(), "b\n".to_owned()),
        ])
    }

    #[rstest]
    fn absent_output_directory_reports_everything_missing() {
        let report = compare(&expected(), &[], Utf8Path::new("/nonexistent/fixturegen-out"))
            .expect("missing directory is not an error");
        assert_eq!(report.missing.len(), 2);
        assert!(report.stale.is_empty());
        assert!(!report.is_clean());
    }

    #[rstest]
    fn classifies_matching_stale_and_missing_files() {
        let guard = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(guard.path().to_path_buf())
            .expect("tempdir path is UTF-8");
        std::fs::write(root.join("a_fixture.rs"), "a\n").expect("write a");
        let clean = compare(
            &BTreeMap::from([("a_fixture.rs".into(), "a\n".to_owned())]),
            &[],
            &root,
        )
        .expect("compare");
        assert!(clean.is_clean());

        std::fs::write(root.join("a_fixture.rs"), "edited\n").expect("edit a");
        let report = compare(&expected(), &[], &root).expect("compare");
        assert_eq!(report.checked, 2);
        assert_eq!(report.stale, [Utf8PathBuf::from("a_fixture.rs")]);
        assert_eq!(report.missing, [Utf8PathBuf::from("nested/b_fixture.rs")]);
    }

    #[rstest]
    fn orphans_on_disk_are_stale() {
        let guard = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(guard.path().to_path_buf())
            .expect("tempdir path is UTF-8");
        std::fs::write(root.join("a_fixture.rs"), "a\n").expect("write a");
        std::fs::write(root.join("old_fixture.rs"), "old\n").expect("write orphan");
        let orphans = [
            Utf8PathBuf::from("old_fixture.rs"),
            Utf8PathBuf::from("already_removed_fixture.rs"),
        ];
        let report = compare(
            &BTreeMap::from([("a_fixture.rs".into(), "a\n".to_owned())]),
            &orphans,
            &root,
        )
        .expect("compare");
        assert_eq!(report.checked, 1);
        assert_eq!(report.stale, [Utf8PathBuf::from("old_fixture.rs")]);
        assert!(report.missing.is_empty());
        assert!(!report.is_clean());
    }
}
