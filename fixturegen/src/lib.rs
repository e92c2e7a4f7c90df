//! Compile-time generation of fluent test fixtures.
//!
//! A *dataset definition* is a type annotated with
//! `#[fixturegen::dataset(entity = E, data_model = M)]` whose inherent
//! functions build an entity `E` from a data model `M`:
//!
//! ```ignore
//! #[fixturegen::dataset(entity = PurchaseContract, data_model = DataModel)]
//! pub struct PurchaseContractDataSet;
//!
//! impl PurchaseContractDataSet {
//!     pub fn build(model: DataModel) -> PurchaseContract { /* ... */ }
//!     pub fn build_valid() -> DataModel { /* optional */ }
//!     pub fn build_invalid() -> DataModel { /* optional */ }
//! }
//! ```
//!
//! For every definition the generator writes a `PurchaseContractFixture`
//! module offering `default_fixture`, `with_model`, per-field `with_*`,
//! `without_*` and `get_*` methods and a terminal `build`. Generation runs
//! from a build script through [`build::Builder`] or from the
//! `cargo fixturegen` subcommand. Both parse the crate's sources; user code is
//! never loaded or executed.

pub mod build;
mod error;
mod fields;
mod generator;
mod index;
mod macros;
mod metadata;
mod probe;
mod sink;
mod synth;

#[cfg(feature = "macros")]
pub use fixturegen_macros::dataset;

pub use error::{AggregatedErrors, FixtureError, SchemaError, SinkError};
pub use fields::{FieldDescriptor, introspect, is_primitive_like, render_type};
pub use generator::{GeneratedArtifact, GenerationReport, Generator};
pub use index::{
    CRATE_ROOT, FnDecl, ImplDecl, LoadedIndex, ModuleIndex, QualifiedName, SourceIndex, TypeDecl,
    TypeShape, load_crate_dir, module_path_for,
};
pub use metadata::{
    ANNOTATION, AnnotatedType, DATA_MODEL_ATTRIBUTE, DatasetDefinition, ENTITY_ATTRIBUTE, discover,
    extract, is_dataset_attribute,
};
pub use probe::{BUILD_FN, CapabilitySet, INVALID_FACTORY_FN, VALID_FACTORY_FN, probe};
pub use sink::{ArtifactSink, DirSink, MemorySink, artifact_relative_path, mount_path};
pub use synth::{
    DefaultModel, FixtureArtifact, FixtureMethod, MethodKind, NamingStyle, SynthOptions,
    UnknownNamingStyle, capitalize, plan, render, synthesize,
};
