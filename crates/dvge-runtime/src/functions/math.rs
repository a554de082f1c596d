//! Math built-ins

use crate::error::{Result, RuntimeError};
use crate::operators::{add, compare_values, div, pow as pow_op};
use dvge_core::Value;
use rand::Rng;
use std::cmp::Ordering;

/// Round half to even
fn round_half_even(x: f64) -> f64 {
    let rounded = x.round();
    if (x - x.trunc()).abs() == 0.5 {
        2.0 * (x / 2.0).round()
    } else {
        rounded
    }
}

fn finite_to_integer(x: f64, function: &str) -> Result<Value> {
    if !x.is_finite() {
        return Err(RuntimeError::MathDomain(format!(
            "{}() cannot convert {} to an integer",
            function, x
        )));
    }
    if x.abs() >= 9.2e18 {
        return Ok(Value::Float(x));
    }
    Ok(Value::Integer(x as i64))
}

pub fn abs(x: &Value) -> Result<Value> {
    match x {
        Value::Integer(n) => Ok(n
            .checked_abs()
            .map(Value::Integer)
            .unwrap_or(Value::Float((*n as f64).abs()))),
        Value::Bool(b) => Ok(Value::Integer(i64::from(*b))),
        other => Ok(Value::Float(other.expect_number()?.abs())),
    }
}

/// `round(x)` gives an integer; `round(x, n)` keeps the input's kind
pub fn round(x: &Value, ndigits: Option<&Value>) -> Result<Value> {
    match ndigits {
        None => match x {
            Value::Integer(_) => Ok(x.clone()),
            other => finite_to_integer(round_half_even(other.expect_number()?), "round"),
        },
        Some(n) => {
            let digits = n.expect_integer()?;
            match x {
                Value::Integer(_) | Value::Bool(_) if digits >= 0 => {
                    Ok(Value::Integer(x.expect_integer()?))
                }
                other => {
                    let value = other.expect_number()?;
                    let scale = 10f64.powi(i32::try_from(digits.unsigned_abs().min(308)).unwrap_or(0));
                    let scaled = if digits >= 0 { value * scale } else { value / scale };
                    if !scaled.is_finite() {
                        return Ok(Value::Float(value));
                    }
                    let rounded = if digits >= 0 {
                        round_half_even(scaled) / scale
                    } else {
                        round_half_even(scaled) * scale
                    };
                    Ok(match x {
                        Value::Integer(_) | Value::Bool(_) => finite_to_integer(rounded, "round")?,
                        _ => Value::Float(rounded),
                    })
                }
            }
        }
    }
}

pub fn floor(x: &Value) -> Result<Value> {
    match x {
        Value::Integer(_) => Ok(x.clone()),
        other => finite_to_integer(other.expect_number()?.floor(), "floor"),
    }
}

pub fn ceil(x: &Value) -> Result<Value> {
    match x {
        Value::Integer(_) => Ok(x.clone()),
        other => finite_to_integer(other.expect_number()?.ceil(), "ceil"),
    }
}

/// Pick the extreme value from one list argument or several arguments
fn extreme(function: &str, args: &[Value], wanted: Ordering) -> Result<Value> {
    let items: &[Value] = match args {
        [single] => single.expect_array()?,
        many => many,
    };

    let mut iter = items.iter();
    let mut best = iter.next().ok_or_else(|| {
        RuntimeError::InvalidOperation(format!("{}() arg is an empty sequence", function))
    })?;
    for item in iter {
        match compare_values(item, best) {
            Some(order) if order == wanted => best = item,
            Some(_) => {}
            None => {
                return Err(RuntimeError::TypeError(format!(
                    "{}() cannot compare {} and {}",
                    function,
                    item.type_name(),
                    best.type_name()
                )))
            }
        }
    }
    Ok(best.clone())
}

pub fn min(args: &[Value]) -> Result<Value> {
    extreme("min", args, Ordering::Less)
}

pub fn max(args: &[Value]) -> Result<Value> {
    extreme("max", args, Ordering::Greater)
}

pub fn sum(items: &Value, start: Option<&Value>) -> Result<Value> {
    let start = start.cloned().unwrap_or(Value::Integer(0));
    items
        .expect_array()?
        .iter()
        .try_fold(start, |acc, item| add(&acc, item))
}

/// Mean of a list; 0 for an empty list
pub fn avg(items: &Value) -> Result<Value> {
    let list = items.expect_array()?;
    if list.is_empty() {
        return Ok(Value::Integer(0));
    }
    let total = sum(items, None)?;
    div(&total, &Value::Integer(i64::try_from(list.len()).unwrap_or(i64::MAX)))
}

pub fn sqrt(x: &Value) -> Result<Value> {
    let value = x.expect_number()?;
    if value < 0.0 {
        return Err(RuntimeError::MathDomain(format!("sqrt() of negative number {}", value)));
    }
    Ok(Value::Float(value.sqrt()))
}

pub fn pow(base: &Value, exponent: &Value) -> Result<Value> {
    pow_op(base, exponent)
}

/// `random()` in `[0, 1)`, or `random(lo, hi)` as an integer in `[lo, hi]`
pub fn random(bounds: Option<(&Value, &Value)>) -> Result<Value> {
    let mut rng = rand::thread_rng();
    match bounds {
        None => Ok(Value::Float(rng.gen::<f64>())),
        Some((lo, hi)) => {
            let (lo, hi) = (lo.expect_integer()?, hi.expect_integer()?);
            if lo > hi {
                return Err(RuntimeError::InvalidOperation(format!(
                    "random() empty range {}..={}",
                    lo, hi
                )));
            }
            Ok(Value::Integer(rng.gen_range(lo..=hi)))
        }
    }
}
