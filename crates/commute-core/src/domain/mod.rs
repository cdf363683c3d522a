//! Domain model (locations, pairs, samples, service responses, errors).

pub mod errors;
pub mod ids;
pub mod location;
pub mod matrix;
pub mod sample;

pub use self::errors::{CollectorError, MatrixError, StoreError};
pub use self::ids::{RunId, SampleId};
pub use self::location::{Coordinates, Location};
pub use self::matrix::{DistanceMatrixResponse, MatrixRow, Measurement};
pub use self::sample::{CommutePair, CommuteSample};
