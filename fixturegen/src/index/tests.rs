//! Tests for source indexing and path resolution.
#![expect(
    clippy::expect_used,
    reason = "fixture sources are literals; a parse failure is a test bug"
)]

use super::*;
use anyhow::{Context, Result, ensure};
use camino::Utf8Path;
use rstest::{fixture, rstest};

fn segments(path: &str) -> Vec<String> {
    QualifiedName::parse(path).segments().to_vec()
}

#[fixture]
fn index() -> SourceIndex {
    let mut index = SourceIndex::new();
    index
        .parse_str(
            &QualifiedName::crate_root(),
            r"
            pub mod domain;
            pub mod datasets;
            mod inline {
                pub struct Nested { pub value: u8 }
            }
            ",
        )
        .expect("root parses");
    index
        .parse_str(
            &QualifiedName::parse("crate::domain"),
            r"
            pub struct PurchaseContract { pub reference: String }
            pub enum Status { Open, Closed }
            ",
        )
        .expect("domain parses");
    index
        .parse_str(
            &QualifiedName::parse("crate::datasets"),
            r"
            use crate::domain::PurchaseContract;
            use super::domain::{self, Status as ContractStatus};
            use crate::inline::*;
            use serde;

            pub struct DataSet;

            impl DataSet {
                pub fn build(model: DataModel) -> PurchaseContract { todo!() }
                pub fn build_valid() -> DataModel { todo!() }
                pub fn helper(&self) {}
            }

            impl Default for DataSet {
                fn default() -> Self { Self }
            }

            pub struct DataModel { pub reference: String }
            ",
        )
        .expect("datasets parse");
    index
}

#[rstest]
#[case::use_binding("PurchaseContract", "crate::domain::PurchaseContract")]
#[case::renamed_import("ContractStatus", "crate::domain::Status")]
#[case::self_import("domain::Status", "crate::domain::Status")]
#[case::local_type("DataModel", "crate::datasets::DataModel")]
#[case::absolute("crate::domain::Status", "crate::domain::Status")]
#[case::super_relative("super::domain::PurchaseContract", "crate::domain::PurchaseContract")]
#[case::glob_import("Nested", "crate::inline::Nested")]
#[case::external("chrono::DateTime", "chrono::DateTime")]
#[case::extern_crate_import("serde::Serialize", "serde::Serialize")]
#[case::unknown_bare("Unknown", "crate::datasets::Unknown")]
fn resolves_paths_relative_to_module(
    index: SourceIndex,
    #[case] written: &str,
    #[case] expected: &str,
) {
    let module = QualifiedName::parse("crate::datasets");
    let resolved = index.resolve_path(&module, &segments(written));
    assert_eq!(resolved.to_string(), expected);
}

#[rstest]
fn records_inline_modules_and_children(index: SourceIndex) -> Result<()> {
    let root = index
        .module(&QualifiedName::crate_root())
        .context("root module indexed")?;
    ensure!(
        root.children == ["domain", "datasets", "inline"],
        "children in declaration order: {:?}",
        root.children
    );
    ensure!(
        index
            .lookup_type(&QualifiedName::parse("crate::inline::Nested"))
            .is_some(),
        "inline module content is indexed"
    );
    Ok(())
}

#[rstest]
fn records_inherent_impls_only(index: SourceIndex) -> Result<()> {
    let module = index
        .module(&QualifiedName::parse("crate::datasets"))
        .context("datasets module indexed")?;
    ensure!(module.impls.len() == 1, "trait impls are skipped");
    let functions = &module.impls.first().context("impl recorded")?.functions;
    let names: Vec<_> = functions.iter().map(|f| f.name.as_str()).collect();
    ensure!(names == ["build", "build_valid", "helper"], "names: {names:?}");
    let helper = functions.last().context("helper recorded")?;
    ensure!(helper.has_receiver && helper.params == 0, "receiver is not a parameter");
    ensure!(!helper.is_nullary(), "methods are not nullary");
    Ok(())
}

#[rstest]
#[case::crate_root("lib.rs", Some("crate"))]
#[case::binary_root("main.rs", Some("crate"))]
#[case::module_file("domain.rs", Some("crate::domain"))]
#[case::mod_rs("datasets/mod.rs", Some("crate::datasets"))]
#[case::nested_file("datasets/contracts.rs", Some("crate::datasets::contracts"))]
#[case::nested_lib("datasets/lib.rs", Some("crate::datasets::lib"))]
#[case::not_rust("datasets/README.md", None)]
fn maps_files_to_modules(#[case] relative: &str, #[case] expected: Option<&str>) {
    let module = module_path_for(Utf8Path::new(relative)).map(|m| m.to_string());
    assert_eq!(module.as_deref(), expected);
}

#[rstest]
fn loads_directory_and_reports_parse_failures() -> Result<()> {
    let tempdir = tempfile::tempdir().context("create temp dir")?;
    let root = camino::Utf8PathBuf::from_path_buf(tempdir.path().to_path_buf())
        .map_err(|path| anyhow::anyhow!("non-UTF-8 path: {}", path.display()))?;
    std::fs::create_dir_all(root.join("datasets")).context("create datasets dir")?;
    std::fs::create_dir_all(root.join("bin")).context("create bin dir")?;
    std::fs::write(root.join("lib.rs"), "pub mod datasets;").context("write lib.rs")?;
    std::fs::write(root.join("main.rs"), "fn main() {}").context("write main.rs")?;
    std::fs::write(root.join("datasets/mod.rs"), "pub struct Model { pub a: u8 }")
        .context("write mod.rs")?;
    std::fs::write(root.join("datasets/broken.rs"), "pub struct {").context("write broken.rs")?;
    std::fs::write(root.join("bin/tool.rs"), "pub struct Tool;").context("write tool.rs")?;

    let loaded = load_crate_dir(&root)?;
    let files: Vec<_> = loaded.files.iter().map(|f| f.as_str()).collect();
    ensure!(
        files == ["datasets/broken.rs", "datasets/mod.rs", "lib.rs"],
        "visited files: {files:?}"
    );
    ensure!(loaded.failures.len() == 1, "one parse failure expected");
    ensure!(
        loaded
            .index
            .lookup_type(&QualifiedName::parse("crate::datasets::Model"))
            .is_some(),
        "parsable files are indexed"
    );
    Ok(())
}
