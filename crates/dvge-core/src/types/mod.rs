//! Type system for DVGE scripting
//!
//! - Runtime values
//! - Data type tags driving coercion

pub mod data_type;
pub mod value;

pub use data_type::DataType;
pub use value::Value;
