//! Expression evaluation: interpolation, interpretation and the evaluator facade

mod evaluator;
mod interpolate;
mod interpreter;

pub use evaluator::ExpressionEvaluator;
pub use interpolate::{interpolate, literal_token};
pub use interpreter::Interpreter;
