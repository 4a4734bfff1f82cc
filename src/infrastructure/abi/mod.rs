//! ABI infrastructure - artifact lookup, extraction and output

mod extractor;
mod resolver;
mod writer;

pub use extractor::AbiExtractor;
pub use resolver::{ArtifactResolver, DEFAULT_ARTIFACTS_ROOT, DEFAULT_SOURCE_EXTENSION};
pub use writer::{AbiWriter, OutputDir};
