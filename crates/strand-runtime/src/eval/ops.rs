//! `aten::` operator implementations.

use std::sync::Arc;

use parking_lot::Mutex;
use smol_str::SmolStr;
use strand_hir::AtenOp;

use crate::error::RuntimeError;
use crate::value::Value;

/// Applies `op` to `inputs`. Returns `None` for operators without a result.
pub fn apply(op: AtenOp, inputs: Vec<Value>) -> Result<Option<Value>, RuntimeError> {
    let mismatch = || RuntimeError::TypeMismatch(SmolStr::new(op.name()));
    let result = match (op, inputs.as_slice()) {
        (AtenOp::Eq, [a, b]) => Value::Bool(a == b),
        (AtenOp::Ne, [a, b]) => Value::Bool(a != b),
        (AtenOp::Lt | AtenOp::Le | AtenOp::Gt | AtenOp::Ge, [a, b]) => {
            let ordering = compare(a, b).ok_or_else(mismatch)?;
            Value::Bool(match op {
                AtenOp::Lt => ordering.is_lt(),
                AtenOp::Le => ordering.is_le(),
                AtenOp::Gt => ordering.is_gt(),
                _ => ordering.is_ge(),
            })
        }
        (AtenOp::Add | AtenOp::Sub | AtenOp::Mul | AtenOp::Div | AtenOp::Remainder, [a, b]) => {
            arithmetic(op, a, b)?
        }
        (AtenOp::Neg, [Value::Int(value)]) => {
            Value::Int(value.checked_neg().ok_or(RuntimeError::Overflow)?)
        }
        (AtenOp::Neg, [Value::Float(value)]) => Value::Float(-value),
        (AtenOp::Not, [Value::Bool(value)]) => Value::Bool(!value),
        (AtenOp::And, [Value::Bool(a), Value::Bool(b)]) => Value::Bool(*a && *b),
        (AtenOp::Or, [Value::Bool(a), Value::Bool(b)]) => Value::Bool(*a || *b),
        (AtenOp::Append, [Value::List(items), item]) => {
            if reaches_list(item, items) {
                return Err(RuntimeError::TypeMismatch(SmolStr::new(
                    "aten::append: a list cannot contain itself",
                )));
            }
            items.lock().push(item.clone());
            return Ok(None);
        }
        #[allow(clippy::cast_possible_wrap)]
        (AtenOp::Len, [Value::List(items)]) => Value::Int(items.lock().len() as i64),
        #[allow(clippy::cast_possible_wrap)]
        (AtenOp::Len, [Value::Str(text)]) => Value::Int(text.chars().count() as i64),
        (AtenOp::GetItem, [Value::List(items), Value::Int(index)]) => {
            let items = items.lock();
            let len = items.len();
            normalize_index(*index, len)
                .and_then(|position| items.get(position).cloned())
                .ok_or(RuntimeError::IndexOutOfBounds { index: *index, len })?
        }
        #[allow(clippy::cast_precision_loss)]
        (AtenOp::Tensor, [Value::Int(value)]) => Value::Tensor(*value as f64),
        (AtenOp::Tensor, [Value::Float(value)]) => Value::Tensor(*value),
        (AtenOp::Tensor, [Value::Bool(value)]) => Value::Tensor(f64::from(u8::from(*value))),
        _ => return Err(mismatch()),
    };
    Ok(Some(result))
}

/// Returns `true` if `target` is `value` or is nested anywhere inside it.
fn reaches_list(value: &Value, target: &Arc<Mutex<Vec<Value>>>) -> bool {
    match value {
        Value::List(items) => {
            Arc::ptr_eq(items, target)
                || items.lock().iter().any(|item| reaches_list(item, target))
        }
        Value::Object(object) => object
            .attributes()
            .any(|(_, attribute)| reaches_list(attribute, target)),
        _ => false,
    }
}

fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let position = if index < 0 { index + len } else { index };
    if (0..len).contains(&position) {
        usize::try_from(position).ok()
    } else {
        None
    }
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Int(value) => Some(*value as f64),
        Value::Float(value) => Some(*value),
        _ => None,
    }
}

fn compare(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
    match (a, b) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => as_f64(a)?.partial_cmp(&as_f64(b)?),
    }
}

fn arithmetic(op: AtenOp, a: &Value, b: &Value) -> Result<Value, RuntimeError> {
    let mismatch = || RuntimeError::TypeMismatch(SmolStr::new(op.name()));
    match (a, b) {
        (Value::Str(a), Value::Str(b)) if op == AtenOp::Add => {
            Ok(Value::Str(SmolStr::new(format!("{a}{b}"))))
        }
        (Value::Int(a), Value::Int(b)) if op != AtenOp::Div => {
            let result = match op {
                AtenOp::Add => a.checked_add(*b),
                AtenOp::Sub => a.checked_sub(*b),
                AtenOp::Mul => a.checked_mul(*b),
                _ => {
                    if *b == 0 {
                        return Err(RuntimeError::DivisionByZero);
                    }
                    a.checked_rem(*b).map(|rem| floor_rem(rem, *b))
                }
            };
            result.map(Value::Int).ok_or(RuntimeError::Overflow)
        }
        _ => {
            let (a, b) = (as_f64(a).ok_or_else(mismatch)?, as_f64(b).ok_or_else(mismatch)?);
            let result = match op {
                AtenOp::Add => a + b,
                AtenOp::Sub => a - b,
                AtenOp::Mul => a * b,
                AtenOp::Div | AtenOp::Remainder if b == 0.0 => {
                    return Err(RuntimeError::DivisionByZero)
                }
                AtenOp::Div => a / b,
                _ => {
                    let rem = a % b;
                    if rem != 0.0 && (rem < 0.0) != (b < 0.0) {
                        rem + b
                    } else {
                        rem
                    }
                }
            };
            Ok(Value::Float(result))
        }
    }
}

/// Remainder with the sign of the divisor.
fn floor_rem(rem: i64, divisor: i64) -> i64 {
    if rem != 0 && (rem < 0) != (divisor < 0) {
        rem + divisor
    } else {
        rem
    }
}
