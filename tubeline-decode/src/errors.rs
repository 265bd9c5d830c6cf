use thiserror::Error;

/// Fatal decode-stage failures. Individual length/bend estimators have
/// their own non-fatal `EstimatorSkipped` notion further down the
/// pipeline; everything here aborts the request.
#[derive(Debug, Error)]
pub enum Error {
    /// The filename extension is not one of `{step, stp, iges, igs, dxf}`.
    #[error("unsupported file format: {0:?}")]
    UnsupportedFormat(String),
    /// The underlying tessellator/parser reported failure.
    #[error("failed to decode file: {0}")]
    DecodeFailure(String),
    /// Decoding succeeded syntactically but yielded no vertices.
    #[error("decoded file contains no geometry")]
    EmptyGeometry,
}

impl From<tubeline_mesh::Error> for Error {
    fn from(error: tubeline_mesh::Error) -> Self {
        match error {
            tubeline_mesh::Error::EmptyGeometry => Error::EmptyGeometry,
        }
    }
}
