//! Behaviour of the subcommand flow over a crate laid out on disk.

use std::ffi::OsString;

use anyhow::{Context, Result, ensure};
use camino::Utf8PathBuf;
use cargo_fixturegen::cache::{MANIFEST_FILE, read_manifest};
use cargo_fixturegen::cli::normalise_args;
use cargo_fixturegen::{Args, CliError, Outcome, Settings, execute};
use clap::Parser;
use fixturegen::NamingStyle;
use rstest::{fixture, rstest};
use tempfile::TempDir;

const LIB: &str = "pub mod datasets;\n";

const DATASETS: &str = r#"
pub struct Order {
    pub reference: String,
    pub lines: u32,
}

#[fixturegen::dataset(entity = Order, data_model = OrderModel)]
pub struct OrderDataSet;

impl OrderDataSet {
    pub fn build(model: OrderModel) -> Order {
        Order { reference: model.reference, lines: model.lines }
    }

    pub fn build_invalid() -> OrderModel {
        OrderModel { reference: String::new(), lines: 0 }
    }
}

#[derive(Default)]
pub struct OrderModel {
    pub reference: String,
    pub lines: u32,
}
"#;

const FIXTURE: &str = "datasets/order_fixture.rs";

struct Project {
    _guard: TempDir,
    settings: Settings,
}

impl Project {
    fn write_source(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.settings.src_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, content).with_context(|| format!("write {path}"))
    }

    fn fixture_path(&self) -> Utf8PathBuf {
        self.settings.out_dir.join(FIXTURE)
    }
}

#[fixture]
fn sandbox() -> Result<Project> {
    let guard = tempfile::tempdir().context("create temp dir")?;
    let root = Utf8PathBuf::from_path_buf(guard.path().to_path_buf())
        .map_err(|path| anyhow::anyhow!("non-UTF-8 path: {}", path.display()))?;
    let project = Project {
        _guard: guard,
        settings: Settings {
            src_dir: root.join("src"),
            out_dir: root.join("out"),
            naming: NamingStyle::Snake,
        },
    };
    project.write_source("lib.rs", LIB)?;
    project.write_source("datasets/mod.rs", DATASETS)?;
    Ok(project)
}

fn run(project: &Project, extra: &[&str]) -> Result<(Result<Outcome, CliError>, String)> {
    let argv = std::iter::once("cargo-fixturegen")
        .chain(extra.iter().copied())
        .map(OsString::from);
    let parsed = Args::try_parse_from(normalise_args(argv))?;
    let mut out = Vec::new();
    let result = execute(&parsed, &project.settings, &mut out);
    Ok((result, String::from_utf8(out)?))
}

#[rstest]
fn generation_writes_fixture_and_manifest(sandbox: Result<Project>) -> Result<()> {
    let project = sandbox?;
    let (result, stdout) = run(&project, &[])?;
    let Outcome::Generated(generated) = result? else {
        anyhow::bail!("expected a generation pass");
    };
    ensure!(generated.len() == 1);
    ensure!(
        stdout.contains("generated crate::datasets::OrderFixture -> "),
        "stdout: {stdout}"
    );

    let text = std::fs::read_to_string(project.fixture_path())?;
    ensure!(text.contains("pub fn invalid_fixture() -> Self {"));
    ensure!(text.contains("model: <OrderModel as ::core::default::Default>::default(),"));

    let manifest = read_manifest(&project.settings.out_dir).context("manifest written")?;
    ensure!(manifest.artifacts == [Utf8PathBuf::from(FIXTURE)]);
    Ok(())
}

#[rstest]
fn check_detects_stale_and_missing_output(sandbox: Result<Project>) -> Result<()> {
    let project = sandbox?;
    let (missing, _) = run(&project, &["--check"])?;
    ensure!(
        matches!(missing, Err(CliError::OutOfDate { stale: 0, missing: 1 })),
        "{missing:?}"
    );
    ensure!(!project.fixture_path().exists(), "check writes nothing");

    run(&project, &[])?.0?;
    let (clean, stdout) = run(&project, &["fixturegen", "--check"])?;
    ensure!(matches!(clean?, Outcome::UpToDate { checked: 1 }));
    ensure!(stdout.contains("1 fixture(s) up to date"), "stdout: {stdout}");

    std::fs::write(project.fixture_path(), "// edited by hand\n")?;
    let (stale, report) = run(&project, &["--check"])?;
    ensure!(
        matches!(stale, Err(CliError::OutOfDate { stale: 1, missing: 0 })),
        "{stale:?}"
    );
    ensure!(report.contains("stale "), "stdout: {report}");
    Ok(())
}

#[rstest]
fn cache_skips_unchanged_sources(sandbox: Result<Project>) -> Result<()> {
    let project = sandbox?;
    ensure!(matches!(run(&project, &["--cache"])?.0?, Outcome::Generated(_)));
    ensure!(matches!(run(&project, &["--cache"])?.0?, Outcome::Cached));

    project.write_source("extra.rs", "pub struct Unrelated;\n")?;
    ensure!(matches!(run(&project, &["--cache"])?.0?, Outcome::Generated(_)));

    std::fs::remove_file(project.fixture_path())?;
    ensure!(
        matches!(run(&project, &["--cache"])?.0?, Outcome::Generated(_)),
        "a missing artefact invalidates the cache"
    );
    ensure!(project.settings.out_dir.join(MANIFEST_FILE).is_file());
    Ok(())
}

#[rstest]
fn failing_definition_fails_the_run_after_writing_valid_ones(
    sandbox: Result<Project>,
) -> Result<()> {
    let project = sandbox?;
    project.write_source(
        "broken.rs",
        "#[fixturegen::dataset(data_model = Missing)]\npub struct Broken;\n",
    )?;
    let (result, stdout) = run(&project, &[])?;
    let err = match result {
        Err(CliError::Generation(err)) => err,
        other => anyhow::bail!("expected a generation failure, got {other:?}"),
    };
    ensure!(err.to_string().contains("crate::broken::Broken"), "{err}");
    ensure!(stdout.contains("OrderFixture"), "stdout: {stdout}");
    ensure!(project.fixture_path().is_file());
    ensure!(
        !project.settings.out_dir.join(MANIFEST_FILE).exists(),
        "no manifest after a failed pass"
    );
    Ok(())
}

const PARCELS: &str = r"
pub struct Parcel {
    pub grams: u32,
}

#[fixturegen::dataset(entity = Parcel, data_model = ParcelModel)]
pub struct ParcelDataSet;

impl ParcelDataSet {
    pub fn build(model: ParcelModel) -> Parcel {
        Parcel { grams: model.grams }
    }
}

#[derive(Default)]
pub struct ParcelModel {
    pub grams: u32,
}
";

#[rstest]
fn fixtures_of_deleted_definitions_are_stale_then_removed(
    sandbox: Result<Project>,
) -> Result<()> {
    let project = sandbox?;
    project.write_source("parcels.rs", PARCELS)?;
    let orphan = project.settings.out_dir.join("parcels/parcel_fixture.rs");
    run(&project, &[])?.0?;
    ensure!(orphan.is_file(), "parcel fixture generated");

    project.write_source("parcels.rs", "pub struct Parcel;\n")?;
    let (stale, report) = run(&project, &["--check"])?;
    ensure!(
        matches!(stale, Err(CliError::OutOfDate { stale: 1, missing: 0 })),
        "{stale:?}"
    );
    ensure!(report.contains(&format!("stale {orphan}")), "stdout: {report}");

    let (result, stdout) = run(&project, &[])?;
    ensure!(matches!(result?, Outcome::Generated(generated) if generated.len() == 1));
    ensure!(stdout.contains(&format!("removed {orphan}")), "stdout: {stdout}");
    ensure!(!orphan.exists(), "orphan pruned");
    ensure!(project.fixture_path().is_file(), "live fixture kept");

    let manifest = read_manifest(&project.settings.out_dir).context("manifest rewritten")?;
    ensure!(manifest.artifacts == [Utf8PathBuf::from(FIXTURE)]);
    ensure!(matches!(run(&project, &["--check"])?.0?, Outcome::UpToDate { checked: 1 }));
    Ok(())
}
