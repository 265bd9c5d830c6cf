//! Unit of measure inference: turns decoder metadata, STEP header text, and
//! bounding-box scale into a canonical [`Unit`] plus a confidence score.

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![deny(clippy::all, rust_2018_idioms)]

mod metadata;
mod resolver;
mod unit;
mod validator;

pub use metadata::{MetadataBag, RawPrefix, SourceFormat};
pub use resolver::{resolve, ResolvedUnit};
pub use unit::Unit;
pub use validator::validate;
