//! Built-in function catalog
//!
//! The catalog is a closed enum resolved by name. Expressions may only call
//! the functions listed here; anything else is an unknown-function error.

pub mod date;
pub mod list;
pub mod math;
pub mod string;

pub use date::{Clock, FixedClock, SystemClock};

use crate::error::{Result, RuntimeError};
use crate::options::EvaluatorOptions;
use dvge_core::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Group a built-in belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FunctionGroup {
    String,
    List,
    Math,
    Date,
}

impl FunctionGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionGroup::String => "string",
            FunctionGroup::List => "list",
            FunctionGroup::Math => "math",
            FunctionGroup::Date => "date",
        }
    }
}

/// Accepted argument counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// One of the listed counts
    Exactly(&'static [usize]),
    /// At least this many
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exactly(counts) => counts.contains(&count),
            Arity::AtLeast(min) => count >= *min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(counts) => {
                let parts: Vec<String> = counts.iter().map(|n| n.to_string()).collect();
                f.write_str(&parts.join(" or "))
            }
            Arity::AtLeast(min) => write!(f, "at least {}", min),
        }
    }
}

/// Everything a built-in may read besides its arguments
#[derive(Debug, Clone, Copy)]
pub struct CallEnv<'a> {
    pub clock: &'a dyn Clock,
    pub options: &'a EvaluatorOptions,
}

/// A catalog function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFunction {
    // String
    Contains,
    StartsWith,
    EndsWith,
    Matches,
    Length,
    Empty,
    NotEmpty,

    // List
    In,
    NotIn,
    Has,
    Count,
    Any,
    All,

    // Math
    Abs,
    Round,
    Floor,
    Ceil,
    Min,
    Max,
    Sum,
    Avg,
    Sqrt,
    Pow,
    Random,

    // Date
    Now,
    Today,
    Age,
    DaysSince,
    FormatDate,
}

use BuiltinFunction as F;

impl BuiltinFunction {
    /// Every catalog function
    pub const ALL: [BuiltinFunction; 29] = [
        F::Contains,
        F::StartsWith,
        F::EndsWith,
        F::Matches,
        F::Length,
        F::Empty,
        F::NotEmpty,
        F::In,
        F::NotIn,
        F::Has,
        F::Count,
        F::Any,
        F::All,
        F::Abs,
        F::Round,
        F::Floor,
        F::Ceil,
        F::Min,
        F::Max,
        F::Sum,
        F::Avg,
        F::Sqrt,
        F::Pow,
        F::Random,
        F::Now,
        F::Today,
        F::Age,
        F::DaysSince,
        F::FormatDate,
    ];

    /// Look up a function by the name used in expressions
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            F::Contains => "contains",
            F::StartsWith => "starts_with",
            F::EndsWith => "ends_with",
            F::Matches => "matches",
            F::Length => "length",
            F::Empty => "empty",
            F::NotEmpty => "not_empty",
            F::In => "in",
            F::NotIn => "not_in",
            F::Has => "has",
            F::Count => "count",
            F::Any => "any",
            F::All => "all",
            F::Abs => "abs",
            F::Round => "round",
            F::Floor => "floor",
            F::Ceil => "ceil",
            F::Min => "min",
            F::Max => "max",
            F::Sum => "sum",
            F::Avg => "avg",
            F::Sqrt => "sqrt",
            F::Pow => "pow",
            F::Random => "random",
            F::Now => "now",
            F::Today => "today",
            F::Age => "age",
            F::DaysSince => "days_since",
            F::FormatDate => "format_date",
        }
    }

    pub fn group(&self) -> FunctionGroup {
        match self {
            F::Contains | F::StartsWith | F::EndsWith | F::Matches | F::Length | F::Empty
            | F::NotEmpty => FunctionGroup::String,
            F::In | F::NotIn | F::Has | F::Count | F::Any | F::All => FunctionGroup::List,
            F::Abs
            | F::Round
            | F::Floor
            | F::Ceil
            | F::Min
            | F::Max
            | F::Sum
            | F::Avg
            | F::Sqrt
            | F::Pow
            | F::Random => FunctionGroup::Math,
            F::Now | F::Today | F::Age | F::DaysSince | F::FormatDate => FunctionGroup::Date,
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            F::Contains | F::StartsWith | F::EndsWith | F::Matches => Arity::Exactly(&[2]),
            F::In | F::NotIn | F::Has | F::Pow => Arity::Exactly(&[2]),
            F::Length | F::Empty | F::NotEmpty | F::Count | F::Any | F::All => {
                Arity::Exactly(&[1])
            }
            F::Abs | F::Floor | F::Ceil | F::Avg | F::Sqrt | F::Age | F::DaysSince => {
                Arity::Exactly(&[1])
            }
            F::Round | F::Sum | F::FormatDate => Arity::Exactly(&[1, 2]),
            F::Min | F::Max => Arity::AtLeast(1),
            F::Random => Arity::Exactly(&[0, 2]),
            F::Now | F::Today => Arity::Exactly(&[0]),
        }
    }

    /// Call signature shown in editor help
    pub fn signature(&self) -> &'static str {
        match self {
            F::Contains => "contains(text, substring)",
            F::StartsWith => "starts_with(text, prefix)",
            F::EndsWith => "ends_with(text, suffix)",
            F::Matches => "matches(text, pattern)",
            F::Length => "length(text)",
            F::Empty => "empty(text)",
            F::NotEmpty => "not_empty(text)",
            F::In => "in(item, list)",
            F::NotIn => "not_in(item, list)",
            F::Has => "has(list, item)",
            F::Count => "count(list)",
            F::Any => "any(list)",
            F::All => "all(list)",
            F::Abs => "abs(number)",
            F::Round => "round(number[, ndigits])",
            F::Floor => "floor(number)",
            F::Ceil => "ceil(number)",
            F::Min => "min(numbers)",
            F::Max => "max(numbers)",
            F::Sum => "sum(numbers[, start])",
            F::Avg => "avg(numbers)",
            F::Sqrt => "sqrt(number)",
            F::Pow => "pow(base, exponent)",
            F::Random => "random([low, high])",
            F::Now => "now()",
            F::Today => "today()",
            F::Age => "age(birth_date)",
            F::DaysSince => "days_since(date)",
            F::FormatDate => "format_date(date[, format])",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            F::Contains => "Check if text contains substring",
            F::StartsWith => "Check if text starts with prefix",
            F::EndsWith => "Check if text ends with suffix",
            F::Matches => "Check if text matches regex pattern",
            F::Length => "Get length of text",
            F::Empty => "Check if text is empty",
            F::NotEmpty => "Check if text is not empty",
            F::In => "Check if item is in list",
            F::NotIn => "Check if item is not in list",
            F::Has => "Check if list contains item",
            F::Count => "Get count of items in list",
            F::Any => "Check if any item in list is true",
            F::All => "Check if all items in list are true",
            F::Abs => "Get absolute value",
            F::Round => "Round to nearest integer, or to ndigits decimals (ties to even)",
            F::Floor => "Round down to an integer",
            F::Ceil => "Round up to an integer",
            F::Min => "Get minimum value",
            F::Max => "Get maximum value",
            F::Sum => "Sum all numbers",
            F::Avg => "Calculate average",
            F::Sqrt => "Get square root",
            F::Pow => "Raise base to exponent",
            F::Random => "Get random number 0-1, or an integer between low and high",
            F::Now => "Get current date and time",
            F::Today => "Get current date",
            F::Age => "Calculate age from birth date",
            F::DaysSince => "Days since given date",
            F::FormatDate => "Format a date",
        }
    }

    /// Call the function after checking the argument count
    pub fn call(self, args: &[Value], env: &CallEnv<'_>) -> Result<Value> {
        let arity = self.arity();
        if !arity.accepts(args.len()) {
            return Err(self.arity_error(args.len()));
        }

        let fold = env.options.case_insensitive_strings;
        let date_format = env.options.date_format.as_str();

        let value = match (self, args) {
            (F::Contains, [text, sub]) => Value::Bool(string::contains(text, sub, fold)),
            (F::StartsWith, [text, prefix]) => Value::Bool(string::starts_with(text, prefix, fold)),
            (F::EndsWith, [text, suffix]) => Value::Bool(string::ends_with(text, suffix, fold)),
            (F::Matches, [text, pattern]) => Value::Bool(string::matches(text, pattern)?),
            (F::Length, [text]) => Value::Integer(string::length(text)),
            (F::Empty, [text]) => Value::Bool(string::empty(text)),
            (F::NotEmpty, [text]) => Value::Bool(string::not_empty(text)),

            (F::In, [item, coll]) => Value::Bool(list::is_in(item, coll)?),
            (F::NotIn, [item, coll]) => Value::Bool(list::not_in(item, coll)?),
            (F::Has, [coll, item]) => Value::Bool(list::has(coll, item)?),
            (F::Count, [coll]) => Value::Integer(list::count(coll)),
            (F::Any, [coll]) => Value::Bool(list::any(coll)),
            (F::All, [coll]) => Value::Bool(list::all(coll)),

            (F::Abs, [x]) => math::abs(x)?,
            (F::Round, [x]) => math::round(x, None)?,
            (F::Round, [x, digits]) => math::round(x, Some(digits))?,
            (F::Floor, [x]) => math::floor(x)?,
            (F::Ceil, [x]) => math::ceil(x)?,
            (F::Min, values) => math::min(values)?,
            (F::Max, values) => math::max(values)?,
            (F::Sum, [items]) => math::sum(items, None)?,
            (F::Sum, [items, start]) => math::sum(items, Some(start))?,
            (F::Avg, [items]) => math::avg(items)?,
            (F::Sqrt, [x]) => math::sqrt(x)?,
            (F::Pow, [base, exp]) => math::pow(base, exp)?,
            (F::Random, []) => math::random(None)?,
            (F::Random, [lo, hi]) => math::random(Some((lo, hi)))?,

            (F::Now, []) => date::now(env.clock),
            (F::Today, []) => date::today(env.clock),
            (F::Age, [birth]) => date::age(birth, env.clock, date_format),
            (F::DaysSince, [day]) => date::days_since(day, env.clock, date_format),
            (F::FormatDate, [day]) => date::format_date(day, None, date_format),
            (F::FormatDate, [day, format]) => {
                let format = format.to_string();
                date::format_date(day, Some(&format), date_format)
            }

            (function, args) => return Err(function.arity_error(args.len())),
        };
        Ok(value)
    }

    fn arity_error(&self, actual: usize) -> RuntimeError {
        RuntimeError::ArityMismatch {
            function: self.name().to_string(),
            expected: self.arity().to_string(),
            actual,
        }
    }
}

impl fmt::Display for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a function name or fail with an unknown-function error
pub fn lookup(name: &str) -> Result<BuiltinFunction> {
    BuiltinFunction::from_name(name).ok_or_else(|| RuntimeError::UnknownFunction(name.to_string()))
}

/// Signature to description for every catalog function
pub fn list_functions() -> BTreeMap<String, String> {
    BuiltinFunction::ALL
        .iter()
        .map(|f| (f.signature().to_string(), f.description().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn call(name: &str, args: &[Value]) -> Result<Value> {
        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let options = EvaluatorOptions::default();
        let env = CallEnv {
            clock: &clock,
            options: &options,
        };
        lookup(name)?.call(args, &env)
    }

    #[test]
    fn test_names_round_trip() {
        for function in BuiltinFunction::ALL {
            assert_eq!(BuiltinFunction::from_name(function.name()), Some(function));
        }
        assert_eq!(BuiltinFunction::from_name("eval"), None);
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(
            lookup("undefined_func"),
            Err(RuntimeError::UnknownFunction("undefined_func".to_string()))
        );
    }

    #[test]
    fn test_arity_checked() {
        assert_eq!(
            call("abs", &[]),
            Err(RuntimeError::ArityMismatch {
                function: "abs".to_string(),
                expected: "1".to_string(),
                actual: 0,
            })
        );
        match call("random", &[Value::Integer(1)]) {
            Err(RuntimeError::ArityMismatch { expected, .. }) => assert_eq!(expected, "0 or 2"),
            other => panic!("Expected arity mismatch, got {:?}", other),
        }
        assert!(call("min", &[]).is_err());
    }

    #[test]
    fn test_call_dispatch() {
        assert_eq!(
            call("starts_with", &["Alice".into(), "al".into()]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(call("count", &[Value::Array(vec![Value::Null])]).unwrap(), Value::Integer(1));
        assert_eq!(
            call("max", &[Value::Integer(1), Value::Integer(9)]).unwrap(),
            Value::Integer(9)
        );
        assert_eq!(call("today", &[]).unwrap(), Value::String("2024-06-15".into()));
        assert_eq!(
            call("format_date", &["2024-06-15".into(), "%d %B".into()]).unwrap(),
            Value::String("15 June".into())
        );
    }

    #[test]
    fn test_list_functions_covers_catalog() {
        let listed = list_functions();
        assert_eq!(listed.len(), BuiltinFunction::ALL.len());
        assert_eq!(
            listed.get("contains(text, substring)").map(String::as_str),
            Some("Check if text contains substring")
        );
        assert!(listed.contains_key("random([low, high])"));
    }

    #[test]
    fn test_groups() {
        assert_eq!(BuiltinFunction::Matches.group(), FunctionGroup::String);
        assert_eq!(BuiltinFunction::Has.group(), FunctionGroup::List);
        assert_eq!(BuiltinFunction::Random.group(), FunctionGroup::Math);
        assert_eq!(BuiltinFunction::DaysSince.group(), FunctionGroup::Date);
    }
}
