//! Directory-information core types.
//!
//! - Parameter: case-insensitive ordered parameter map
//! - Value: typed values for encoding and decoded DATE/TIME results
//! - Field: one decoded content line
//! - Directory: an ordered field container

mod directory;
mod field;
pub mod parameter;
mod value;

pub use directory::Directory;
pub use field::Field;
pub use parameter::{Parameter, Params};
pub use value::{DirDate, DirDateTime, DirTime, FieldValue, TransferEncoding, Zone};
