//! Umbrella crate re-exporting the tube geometry analyzer's component
//! crates behind Cargo features, mirroring how a CAD kernel split across
//! many small crates is usually consumed as one dependency.
//!
//! Enable only what you need: `decode` to turn files into meshes, `length`
//! and `bend` for the two estimator families, `analysis` for the full
//! pipeline, `pricing` for the standalone quote calculator.

#![cfg_attr(not(debug_assertions), deny(warnings))]

#[cfg(feature = "tubeline-core")]
pub use tubeline_core as core;
#[cfg(feature = "tubeline-mesh")]
pub use tubeline_mesh as mesh;
#[cfg(feature = "tubeline-units")]
pub use tubeline_units as units;
#[cfg(feature = "tubeline-geometry")]
pub use tubeline_geometry as geometry;
#[cfg(feature = "tubeline-decode")]
pub use tubeline_decode as decode;
#[cfg(feature = "tubeline-length")]
pub use tubeline_length as length;
#[cfg(feature = "tubeline-bend")]
pub use tubeline_bend as bend;
#[cfg(feature = "tubeline-analysis")]
pub use tubeline_analysis as analysis;
#[cfg(feature = "tubeline-pricing")]
pub use tubeline_pricing as pricing;

#[cfg(feature = "tubeline-analysis")]
pub use tubeline_analysis::{analyze, AnalysisResult};
