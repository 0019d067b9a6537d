use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoundError {
    #[error("Projection error: {0}")]
    Projection(#[from] ProjError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid shape: {0}")]
    Shape(String),

    #[error("Geodesic error: {0}")]
    Geodesic(String),
}

#[derive(Error, Debug)]
pub enum ProjError {
    #[error("Unknown CRS: {0}")]
    UnknownCrs(String),

    #[error("Transform failed: {0}")]
    TransformFailed(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Coordinate sequences differ in length: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
