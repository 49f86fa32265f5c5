//! Re-exports of std values used by the container and the stream entry points.
pub use std::io::{Error, ErrorKind, Read, Write};
