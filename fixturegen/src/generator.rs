//! Runs the generation pipeline over every dataset definition in an index.

use std::collections::BTreeMap;

use camino::Utf8PathBuf;

use crate::error::FixtureError;
use crate::fields::introspect;
use crate::index::{QualifiedName, SourceIndex};
use crate::metadata::{AnnotatedType, discover, extract};
use crate::probe::{CapabilitySet, probe};
use crate::sink::ArtifactSink;
use crate::synth::{SynthOptions, plan, render};

/// Summary of one generated fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Dataset definition the fixture was generated from.
    pub definition: QualifiedName,
    /// Qualified name of the fixture type.
    pub artifact: QualifiedName,
    /// Path of the artefact relative to the sink root.
    pub path: Utf8PathBuf,
    /// Number of data-model fields covered.
    pub fields: usize,
    /// Optional factories that were detected.
    pub capabilities: CapabilitySet,
}

/// Outcome of a generation pass.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Fixtures written, in index order.
    pub generated: Vec<GeneratedArtifact>,
    /// Failures, each scoped to one definition or source file.
    pub failures: Vec<FixtureError>,
}

impl GenerationReport {
    /// Returns `true` when the pass recorded no failures.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Prepends failures that happened before generation, such as parse errors.
    #[must_use]
    pub fn with_source_failures(mut self, mut failures: Vec<FixtureError>) -> Self {
        failures.append(&mut self.failures);
        self.failures = failures;
        self
    }

    /// Converts the report into the generated list or a combined error.
    ///
    /// # Errors
    ///
    /// Returns the single failure, or [`FixtureError::Aggregate`] when the pass
    /// recorded several.
    pub fn into_result(self) -> Result<Vec<GeneratedArtifact>, FixtureError> {
        match FixtureError::try_aggregate(self.failures) {
            Some(err) => Err(err),
            None => Ok(self.generated),
        }
    }
}

/// Drives extraction, probing, introspection, synthesis and persistence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generator {
    options: SynthOptions,
}

impl Generator {
    /// Creates a generator with the given synthesis options.
    #[must_use]
    pub const fn new(options: SynthOptions) -> Self {
        Self { options }
    }

    /// Synthesis options in use.
    #[must_use]
    pub const fn options(&self) -> SynthOptions {
        self.options
    }

    /// Generates a fixture for every annotated type in `index`.
    ///
    /// A failing definition is recorded in the report and does not stop the
    /// remaining definitions from being generated.
    pub fn run<S>(&self, index: &SourceIndex, sink: &S) -> GenerationReport
    where
        S: ArtifactSink + ?Sized,
    {
        let mut report = GenerationReport::default();
        let mut claimed = BTreeMap::new();
        for annotated in discover(index) {
            match self.generate_one(index, annotated, sink, &mut claimed) {
                Ok(generated) => {
                    tracing::debug!(
                        definition = %generated.definition,
                        artifact = %generated.artifact,
                        fields = generated.fields,
                        "fixture generated"
                    );
                    report.generated.push(generated);
                }
                Err(err) => {
                    tracing::warn!(
                        definition = %annotated.qualified_name(),
                        error = %err,
                        "fixture generation failed"
                    );
                    report.failures.push(err);
                }
            }
        }
        report
    }

    fn generate_one<S>(
        &self,
        index: &SourceIndex,
        annotated: AnnotatedType<'_>,
        sink: &S,
        claimed: &mut BTreeMap<QualifiedName, QualifiedName>,
    ) -> Result<GeneratedArtifact, FixtureError>
    where
        S: ArtifactSink + ?Sized,
    {
        let definition = extract(index, annotated)?;
        let artifact_name = definition.artifact_name();
        if let Some(first) = claimed.get(&artifact_name) {
            return Err(FixtureError::DuplicateArtifact {
                definition: definition.base,
                artifact: artifact_name,
                first: first.clone(),
            });
        }
        claimed.insert(artifact_name, definition.base.clone());

        let capabilities = probe(index, &definition);
        let fields = introspect(index, &definition);
        let artifact = plan(&definition, capabilities, &fields, self.options);
        let text = render(&artifact);
        sink.write(&artifact.name, &text)
            .map_err(|source| FixtureError::Sink {
                artifact: artifact.name.clone(),
                source,
            })?;

        Ok(GeneratedArtifact {
            path: artifact.relative_path(),
            definition: definition.base,
            artifact: artifact.name,
            fields: fields.len(),
            capabilities,
        })
    }
}
