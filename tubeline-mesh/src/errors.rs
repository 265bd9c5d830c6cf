use thiserror::Error;

/// Errors surfaced while assembling or validating a [`crate::MeshSet`].
#[derive(Debug, Error)]
pub enum Error {
    /// The decoder adapter produced zero meshes with zero vertices between them.
    #[error("decoded mesh set contains no vertices")]
    EmptyGeometry,
}
