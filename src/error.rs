//! Errors reported by the containers.
//!
//! Only conditions a caller can recover from are errors. Out-of-range positions and
//! malformed hash functions are caller bugs and panic instead.

use crate::raw_vec;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility = "pub(crate)")]
pub enum Error {
    /// A container was configured with values it can't work with.
    #[snafu(display("Invalid argument: {}", reason))]
    InvalidArgument { reason: &'static str },

    /// Storage could not be allocated or grown. The container is left as it was.
    #[snafu(display("Out of memory: {}", source))]
    OutOfMemory { source: raw_vec::Error },
}
