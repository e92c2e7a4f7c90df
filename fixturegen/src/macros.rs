//! Macros for mounting generated fixtures.

/// Mounts a fixture generated by [`build::Builder`](crate::build::Builder).
///
/// Expands to a public module named `$module` whose body is the generated file
/// at `$path`, relative to `$OUT_DIR/fixturegen`. Invoke it inside the module
/// that declares the dataset definition; every generated file names the exact
/// invocation in its header.
///
/// ```ignore
/// pub mod datasets {
///     fixturegen::include_fixture!(purchase_contract_fixture, "datasets/purchase_contract_fixture.rs");
///     pub use purchase_contract_fixture::PurchaseContractFixture;
/// }
/// ```
#[macro_export]
macro_rules! include_fixture {
    ($module:ident, $path:literal) => {
        #[doc = concat!("Generated fixture module `", stringify!($module), "`.")]
        pub mod $module {
            include!(concat!(env!("OUT_DIR"), "/fixturegen/", $path));
        }
    };
}
