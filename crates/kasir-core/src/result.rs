//! Result type alias shared by every layer.

use crate::KasirError;

/// A specialized `Result` type for Kasir operations.
pub type KasirResult<T> = Result<T, KasirError>;
