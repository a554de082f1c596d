//! Condition Records
//!
//! A condition record is the editor's unit of branching logic:
//!
//! ```yaml
//! variable: hp
//! value: "50"
//! operator: ">="
//! data_type: number
//! negated: false
//! ```
//!
//! A value beginning with `$` references another variable:
//!
//! ```yaml
//! variable: gold
//! value: "$price"
//! operator: ">="
//! data_type: number
//! ```
//!
//! ## Supported Operators
//! - comparison: `==`, `!=`, `<`, `<=`, `>`, `>=`
//! - arithmetic: `+`, `-`, `*`, `/`, `%`, `**`
//! - logical: `and`, `or`, `not`
//! - string: `contains`, `starts_with`, `ends_with`, `matches`, `length`, `empty`, `not_empty`
//! - collection: `in`, `not_in`, `has`, `count`, `any`, `all`
//!
//! Unknown operator names are kept as [`ConditionOperator::Unrecognized`]
//! and evaluate as `==`.

mod operator;
mod types;

pub use operator::{ConditionOperator, Logic};
pub use types::{Condition, VARIABLE_REFERENCE_PREFIX};
