//! Deep structural equality over [`Value`].

use crate::Value;

/// Deep equality check between two values.
///
/// - floats compare by bit pattern, so a decoded float equals the encoded one
///   even for `NaN`, and `0.0` differs from `-0.0`;
/// - arrays compare element-wise in order;
/// - maps compare as multisets of key/value pairs; order is ignored and
///   duplicate keys are matched one-to-one;
/// - values of different variants are never equal, e.g. `1` and `1.0`.
///
/// # Examples
///
/// ```
/// use msgpack_codec::{deep_equal, Value};
///
/// let a = Value::Map(vec![(Value::from("a"), Value::from(1)), (Value::from("b"), Value::Nil)]);
/// let b = Value::Map(vec![(Value::from("b"), Value::Nil), (Value::from("a"), Value::from(1))]);
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&Value::from(1), &Value::from(1.0)));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Bin(a), Value::Bin(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Map(a), Value::Map(b)) => map_equal(a, b),
        (Value::Extension(a), Value::Extension(b)) => a == b,
        _ => false,
    }
}

fn map_equal(a: &[(Value, Value)], b: &[(Value, Value)]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let pair_equal = |(ka, va): &(Value, Value), (kb, vb): &(Value, Value)| {
        deep_equal(ka, kb) && deep_equal(va, vb)
    };
    let mut used = vec![false; b.len()];
    // Everything below `first_unused` is already matched.
    let mut first_unused = 0;
    for (i, pair) in a.iter().enumerate() {
        let j = if !used[i] && pair_equal(pair, &b[i]) {
            i
        } else {
            match (first_unused..b.len()).find(|&j| !used[j] && pair_equal(pair, &b[j])) {
                Some(j) => j,
                None => return false,
            }
        };
        used[j] = true;
        while first_unused < used.len() && used[first_unused] {
            first_unused += 1;
        }
    }
    true
}
