//! Foundation types shared by every layer: values, statuses and errors.

pub mod error;
pub mod status;
pub mod value;

pub use error::{Error, Result, ValidationError};
pub use status::Status;
pub use value::{ConversionError, Interval, Value};
