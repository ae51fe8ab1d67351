//! Wire-level tags and the typed value codec for GSDEP.
//!
//! GSDEP payloads are textual rather than fixed-width binary: integers and
//! floats travel as decimal ASCII, lists as `[a, b, c]`, mappings as compact
//! JSON objects. This keeps the protocol debuggable on the wire and
//! independent of either peer's native numeric representation, at the cost
//! of a canonical text grammar this crate pins exactly.

pub mod error;
pub mod tag;
pub mod value;

pub use error::{Result, WireError};
pub use tag::{Channel, DataType};
pub use value::TypedValue;
