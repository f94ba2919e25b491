//! Question paper generation pipeline
//!
//! Criteria are resolved against the question bank by reservoir sampling,
//! grouped into sections, bound to the exam and laid out for rendering.

mod artifact;
mod assembler;
mod criterion;
mod layout;
mod render;
mod resolver;
mod sampler;
mod scheme;
mod selection;

#[cfg(test)]
pub use artifact::MockArtifactStore;
pub use artifact::ArtifactStore;
pub use assembler::{AssembledPaper, AssemblyStatus, SectionAssembler};
pub use criterion::{Classifier, Criterion};
pub use layout::{
    artifact_stem, wrap_text, PaperDocument, PaperItem, PaperSection, WrapRule,
};
pub use render::{DocumentFormat, DocumentRenderer};
pub use resolver::CriteriaResolver;
pub use sampler::sample;
pub use scheme::{
    scheme_for, ClassificationScheme, MarkScheme, PartScheme, PART_B_MIN_MARK, PART_C_MIN_MARK,
};
pub use selection::{Section, SectionedSelection, CANONICAL_SECTIONS, PART_A, PART_B, PART_C};
