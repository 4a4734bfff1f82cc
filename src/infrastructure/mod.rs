//! Infrastructure layer - filesystem side of the pipeline
//!
//! This layer contains:
//! - Artifact path resolution for the build output tree
//! - ABI extraction from artifact JSON
//! - Atomic ABI file output

pub mod abi;

pub use abi::{AbiExtractor, AbiWriter, ArtifactResolver, OutputDir};
