//! Department datasets as served by the REST backend.

pub mod code;
pub mod geo;
pub mod lenient;
pub mod records;

pub use code::{DepartmentCode, Keyed};
pub use records::*;
