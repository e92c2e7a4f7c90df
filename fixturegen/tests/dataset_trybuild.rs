//! trybuild coverage for the `#[dataset(...)]` attribute.
//!
//! Ensures annotated structs, enums and nested-module data models compile,
//! and that a missing key or a non-conforming `build` is rejected.

#[test]
fn dataset_attribute_compiles() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/dataset_struct.rs");
    t.pass("tests/trybuild/dataset_qualified_paths.rs");
    t.compile_fail("tests/trybuild/dataset_missing_data_model.rs");
    t.compile_fail("tests/trybuild/dataset_wrong_build.rs");
}
