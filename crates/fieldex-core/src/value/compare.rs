use crate::value::{Value, rank::canonical_rank};
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

// 2^63 and 2^64 are exactly representable as f64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

/// Total canonical comparator backing `Ord`/`Eq for Value` and every index
/// key scan.
///
/// Ordering rules:
/// 1. Canonical variant rank
/// 2. Variant-specific comparison for same-ranked values
///
/// Numeric variants compare by numeric value only, so `Int(0)`, `Uint(0)`
/// and `Float64(0.0)` are one key.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    canonical_rank(left)
        .cmp(&canonical_rank(right))
        .then_with(|| canonical_cmp_same_rank(left, right))
}

/// Exact cross-variant numeric comparison; returns None if either side is
/// not numeric.
#[must_use]
pub fn numeric_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    let cmp = match (left, right) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Uint(a), Value::Uint(b)) => a.cmp(b),
        (Value::Float64(a), Value::Float64(b)) => a.cmp(b),
        (Value::Int(a), Value::Uint(b)) => i128::from(*a).cmp(&i128::from(*b)),
        (Value::Uint(a), Value::Int(b)) => i128::from(*a).cmp(&i128::from(*b)),
        (Value::Int(a), Value::Float64(b)) => cmp_i64_f64(*a, b.get()),
        (Value::Float64(a), Value::Int(b)) => cmp_i64_f64(*b, a.get()).reverse(),
        (Value::Uint(a), Value::Float64(b)) => cmp_u64_f64(*a, b.get()),
        (Value::Float64(a), Value::Uint(b)) => cmp_u64_f64(*b, a.get()).reverse(),
        _ => return None,
    };

    Some(cmp)
}

fn canonical_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    if let Some(cmp) = numeric_cmp(left, right) {
        return cmp;
    }

    match (left, right) {
        (Value::Blob(a), Value::Blob(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

// Compare without casting the integer side into f64, which loses precision
// above 2^53.
#[expect(clippy::cast_possible_truncation)]
fn cmp_i64_f64(int: i64, float: f64) -> Ordering {
    if float >= I64_BOUND {
        return Ordering::Less;
    }
    if float < -I64_BOUND {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    int.cmp(&(whole as i64))
        .then_with(|| fraction_cmp(float - whole))
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cmp_u64_f64(uint: u64, float: f64) -> Ordering {
    if float < 0.0 {
        return Ordering::Greater;
    }
    if float >= U64_BOUND {
        return Ordering::Less;
    }

    let whole = float.trunc();
    uint.cmp(&(whole as u64))
        .then_with(|| fraction_cmp(float - whole))
}

// An integer equal to the whole part sits below a positive remainder and
// above a negative one.
fn fraction_cmp(fraction: f64) -> Ordering {
    0.0_f64.partial_cmp(&fraction).unwrap_or(Ordering::Equal)
}

///
/// NumericKey
///
/// Hash form shared by numerically equal values of every numeric variant.
/// Integral values hash as `i128`; anything else hashes by float bits.
///

#[derive(Hash)]
enum NumericKey {
    Integral(i128),
    Fractional(u64),
}

#[expect(clippy::cast_possible_truncation)]
fn numeric_key(value: &Value) -> Option<NumericKey> {
    let key = match value {
        Value::Int(i) => NumericKey::Integral(i128::from(*i)),
        Value::Uint(u) => NumericKey::Integral(i128::from(*u)),
        Value::Float64(x) => {
            let x = x.get();
            // integral floats inside the u64/i64 span convert to i128 exactly
            if x.fract() == 0.0 && (-I64_BOUND..U64_BOUND).contains(&x) {
                NumericKey::Integral(x as i128)
            } else {
                NumericKey::Fractional(x.to_bits())
            }
        }
        _ => return None,
    };

    Some(key)
}

/// Hash `value` consistently with `canonical_cmp` equality.
pub(super) fn canonical_hash<H: Hasher>(value: &Value, state: &mut H) {
    canonical_rank(value).hash(state);

    if let Some(key) = numeric_key(value) {
        key.hash(state);
        return;
    }

    match value {
        Value::Blob(bytes) => bytes.hash(state),
        Value::Bool(b) => b.hash(state),
        Value::Text(s) => s.hash(state),
        _ => {}
    }
}
