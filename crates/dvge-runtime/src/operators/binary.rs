//! Binary operator execution

use super::comparison::execute_compare;
use crate::error::{Result, RuntimeError};
use dvge_core::ast::Operator;
use dvge_core::Value;

/// Longest string or list a repetition may produce
const MAX_REPEAT_LEN: usize = 1 << 20;

/// Execute a binary operation
///
/// `and` / `or` return one of their operands like the expression language
/// does; the interpreter short-circuits before calling this.
pub(crate) fn execute_binary_op(left: &Value, op: &Operator, right: &Value) -> Result<Value> {
    match op {
        Operator::Add => add(left, right),
        Operator::Sub => sub(left, right),
        Operator::Mul => mul(left, right),
        Operator::Div => div(left, right),
        Operator::Mod => modulo(left, right),
        Operator::Pow => pow(left, right),
        Operator::And => Ok(if left.is_truthy() {
            right.clone()
        } else {
            left.clone()
        }),
        Operator::Or => Ok(if left.is_truthy() {
            left.clone()
        } else {
            right.clone()
        }),
        comparison => execute_compare(left, comparison, right).map(Value::Bool),
    }
}

/// Integer view for integer arithmetic; booleans count as 0 and 1
fn int_pair(left: &Value, right: &Value) -> Option<(i64, i64)> {
    match (left, right) {
        (Value::Integer(_) | Value::Bool(_), Value::Integer(_) | Value::Bool(_)) => {
            Some((left.as_i64()?, right.as_i64()?))
        }
        _ => None,
    }
}

fn float_pair(left: &Value, right: &Value) -> Option<(f64, f64)> {
    if left.is_numeric() && right.is_numeric() {
        Some((left.as_f64()?, right.as_f64()?))
    } else {
        None
    }
}

fn unsupported(symbol: &str, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::TypeError(format!(
        "unsupported operand types for {}: {} and {}",
        symbol,
        left.type_name(),
        right.type_name()
    ))
}

/// Integer op with overflow falling back to float
fn int_or_float(
    left: &Value,
    right: &Value,
    symbol: &str,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value> {
    if let Some((l, r)) = int_pair(left, right) {
        return Ok(match int_op(l, r) {
            Some(n) => Value::Integer(n),
            None => Value::Float(float_op(l as f64, r as f64)),
        });
    }
    float_pair(left, right)
        .map(|(l, r)| Value::Float(float_op(l, r)))
        .ok_or_else(|| unsupported(symbol, left, right))
}

pub(crate) fn add(left: &Value, right: &Value) -> Result<Value> {
    match (left, right) {
        (Value::String(l), Value::String(r)) => Ok(Value::String(format!("{}{}", l, r))),
        (Value::Array(l), Value::Array(r)) => {
            Ok(Value::Array(l.iter().chain(r.iter()).cloned().collect()))
        }
        _ => int_or_float(left, right, "+", i64::checked_add, |l, r| l + r),
    }
}

pub(crate) fn sub(left: &Value, right: &Value) -> Result<Value> {
    int_or_float(left, right, "-", i64::checked_sub, |l, r| l - r)
}

pub(crate) fn mul(left: &Value, right: &Value) -> Result<Value> {
    match (left, right) {
        (Value::String(s), count) | (count, Value::String(s))
            if matches!(count, Value::Integer(_) | Value::Bool(_)) =>
        {
            let times = repeat_count(count, s.len())?;
            Ok(Value::String(s.repeat(times)))
        }
        (Value::Array(items), count) | (count, Value::Array(items))
            if matches!(count, Value::Integer(_) | Value::Bool(_)) =>
        {
            let times = repeat_count(count, items.len())?;
            Ok(Value::Array(
                std::iter::repeat(items.iter())
                    .take(times)
                    .flatten()
                    .cloned()
                    .collect(),
            ))
        }
        _ => int_or_float(left, right, "*", i64::checked_mul, |l, r| l * r),
    }
}

fn repeat_count(count: &Value, unit_len: usize) -> Result<usize> {
    let times = usize::try_from(count.as_i64().unwrap_or(0).max(0)).unwrap_or(usize::MAX);
    if unit_len.saturating_mul(times) > MAX_REPEAT_LEN {
        return Err(RuntimeError::InvalidOperation(format!(
            "repetition result exceeds {} elements",
            MAX_REPEAT_LEN
        )));
    }
    Ok(times)
}

/// True division; the result is always a float
pub(crate) fn div(left: &Value, right: &Value) -> Result<Value> {
    let (l, r) = float_pair(left, right).ok_or_else(|| unsupported("/", left, right))?;
    if r == 0.0 {
        return Err(RuntimeError::DivisionByZero);
    }
    Ok(Value::Float(l / r))
}

/// Modulo whose result takes the sign of the divisor
pub(crate) fn modulo(left: &Value, right: &Value) -> Result<Value> {
    if let Some((l, r)) = int_pair(left, right) {
        if r == 0 {
            return Err(RuntimeError::DivisionByZero);
        }
        let m = l.checked_rem(r).unwrap_or(0);
        return Ok(Value::Integer(if m != 0 && (m < 0) != (r < 0) {
            m + r
        } else {
            m
        }));
    }

    let (l, r) = float_pair(left, right).ok_or_else(|| unsupported("%", left, right))?;
    if r == 0.0 {
        return Err(RuntimeError::DivisionByZero);
    }
    let m = l % r;
    Ok(Value::Float(if m != 0.0 && (m < 0.0) != (r < 0.0) {
        m + r
    } else {
        m
    }))
}

/// Exponentiation; negative integer exponents produce floats
pub(crate) fn pow(left: &Value, right: &Value) -> Result<Value> {
    if let Some((base, exp)) = int_pair(left, right) {
        if exp >= 0 {
            let exact = u32::try_from(exp).ok().and_then(|e| base.checked_pow(e));
            return Ok(match exact {
                Some(n) => Value::Integer(n),
                None => Value::Float((base as f64).powf(exp as f64)),
            });
        }
    }

    let (base, exp) = float_pair(left, right).ok_or_else(|| unsupported("**", left, right))?;
    if base == 0.0 && exp < 0.0 {
        return Err(RuntimeError::DivisionByZero);
    }
    let result = base.powf(exp);
    if result.is_nan() && !base.is_nan() && !exp.is_nan() {
        return Err(RuntimeError::MathDomain(format!(
            "{} ** {} has no real result",
            base, exp
        )));
    }
    Ok(Value::Float(result))
}
