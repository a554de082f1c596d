//! Variable context and store access

mod lookup;
mod store;

pub use lookup::{VariableContext, VariableResolver};
pub use store::VariableStore;
