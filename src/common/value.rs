use im::OrdMap;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use super::{GeoPoint, Timestamp};

// Kind ranks. Values of different kinds order by rank alone; integers and
// doubles share a rank and compare mathematically.
pub const TYPE_ORDER_NULL: u8 = 0;
pub const TYPE_ORDER_BOOLEAN: u8 = 1;
pub const TYPE_ORDER_NUMBER: u8 = 2;
pub const TYPE_ORDER_TIMESTAMP: u8 = 3;
pub const TYPE_ORDER_STRING: u8 = 4;
pub const TYPE_ORDER_BYTES: u8 = 5;
pub const TYPE_ORDER_REFERENCE: u8 = 6;
pub const TYPE_ORDER_GEO_POINT: u8 = 7;
pub const TYPE_ORDER_ARRAY: u8 = 8;
pub const TYPE_ORDER_MAP: u8 = 9;

/// Largest magnitude at which every integer is exactly representable as a
/// double.
const MAX_SAFE_INTEGER: u64 = 1 << 53;

/// First double at or above which every value exceeds any `i64`.
const I64_RANGE_END: f64 = 9_223_372_036_854_775_808.0; // 2^63

const HASH_PRIME: u64 = 31;

/// Compare two doubles under the total order used for sorting: NaN sorts
/// below every number and equals itself, `-0.0` equals `0.0`.
#[inline]
pub(crate) fn compare_doubles(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Compare a double against a signed 64-bit integer without losing
/// precision for magnitudes beyond 2^53.
fn compare_mixed(double: f64, int: i64) -> Ordering {
    if double.is_nan() {
        return Ordering::Less;
    }
    if int.unsigned_abs() <= MAX_SAFE_INTEGER {
        // the integer is exactly representable, an ordinary double compare
        // is exact
        return compare_doubles(double, int as f64);
    }
    if double >= I64_RANGE_END {
        return Ordering::Greater;
    }
    if double < -I64_RANGE_END {
        return Ordering::Less;
    }
    // both operands now fit the signed 64-bit range; compare the floored
    // double first, then account for a fractional remainder
    let floor = double.floor();
    match (floor as i64).cmp(&int) {
        Ordering::Equal if double > floor => Ordering::Greater,
        ordering => ordering,
    }
}

/// Bit pattern used when hashing a double, canonicalised so every value
/// that compares equal hashes equally: `-0.0` collapses to `0.0` and
/// integral doubles in the signed 64-bit range collapse to that integer.
#[inline]
pub(crate) fn canonical_double_bits(value: f64) -> u64 {
    if value.is_nan() {
        return value.to_bits();
    }
    if value == 0.0 {
        return 0;
    }
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < I64_RANGE_END {
        return (value as i64) as u64;
    }
    value.to_bits()
}

/// Order-insensitive byte hash shared by strings, bytes and references.
fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut acc = 0u64;
    for byte in bytes {
        acc = acc.wrapping_mul(HASH_PRIME).wrapping_add(*byte as u64);
    }
    acc
}

/// Canonical in-memory form of every field datum in a document.
///
/// A `Value` is one of ten kinds. Each kind has a fixed rank (see the
/// `TYPE_ORDER_*` constants); the rank is the primary sort key across kinds
/// and the structural comparator the secondary one within a kind.
///
/// # Characteristics
/// - **Immutable**: values are never mutated in place; documents replace them
/// - **Totally ordered**: [`Ord`] is a total order suitable for bucketing and
///   index layout; NaN equals itself and sorts below every other number
/// - **Cheap to clone**: maps are persistent ordered maps with O(1) clone
/// - **Serializable**: round-trips through serde stably
///
/// # Usage
///
/// Create values using the `From` trait or the [`val!`](crate::val) macro:
/// ```rust,ignore
/// let number = Value::from(42);
/// let text = val!("hello");
/// let nested = vmap! { "a": { "b": 1 } };
/// ```
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
pub enum Value {
    /// The null value.
    #[default]
    Null,
    /// A boolean value; `false` sorts before `true`.
    Bool(bool),
    /// A signed 64-bit integer. Shares its rank with [`Value::Double`].
    Integer(i64),
    /// A 64-bit IEEE-754 double. Shares its rank with [`Value::Integer`].
    Double(f64),
    /// A timestamp with nanosecond precision.
    Timestamp(Timestamp),
    /// A UTF-8 string; ordered by code point.
    String(String),
    /// Opaque binary data; ordered bytewise.
    Bytes(Vec<u8>),
    /// A canonical resource path naming another document.
    Reference(String),
    /// A latitude/longitude pair.
    GeoPoint(GeoPoint),
    /// An order-significant sequence of values; duplicates allowed.
    Array(Vec<Value>),
    /// An ordered mapping from unique UTF-8 names to values.
    Map(OrdMap<String, Value>),
}

impl Value {
    /// Returns the fixed rank of this value's kind.
    #[inline]
    pub fn type_order(&self) -> u8 {
        match self {
            Value::Null => TYPE_ORDER_NULL,
            Value::Bool(_) => TYPE_ORDER_BOOLEAN,
            Value::Integer(_) | Value::Double(_) => TYPE_ORDER_NUMBER,
            Value::Timestamp(_) => TYPE_ORDER_TIMESTAMP,
            Value::String(_) => TYPE_ORDER_STRING,
            Value::Bytes(_) => TYPE_ORDER_BYTES,
            Value::Reference(_) => TYPE_ORDER_REFERENCE,
            Value::GeoPoint(_) => TYPE_ORDER_GEO_POINT,
            Value::Array(_) => TYPE_ORDER_ARRAY,
            Value::Map(_) => TYPE_ORDER_MAP,
        }
    }

    /// Equality as observed by the `==`, `in`, `array_contains` and
    /// `array_contains_any` query operators.
    ///
    /// This is the comparator's equivalence with one restriction: a NaN
    /// operand never matches anything, including another NaN. Sorting, on
    /// the other hand, must bucket NaN deterministically, which is why
    /// [`Ord`] treats NaN as equal to itself.
    pub fn query_equals(&self, other: &Value) -> bool {
        if self.is_nan() || other.is_nan() {
            return false;
        }
        self.cmp(other) == Ordering::Equal
    }

    /// Computes the structural hash of this value.
    ///
    /// Consistent with [`Ord`]'s equivalence: values that compare equal hash
    /// equally. Maps hash their entries in key order, arrays positionally,
    /// both with `31 * acc + part` mixing. Doubles hash through
    /// [`canonical_double_bits`], so an integral double hashes like the
    /// matching integer and NaN hashes by bit pattern.
    pub fn hash_code(&self) -> u64 {
        match self {
            Value::Null => 0,
            Value::Bool(v) => *v as u64,
            Value::Integer(v) => *v as u64,
            Value::Double(v) => canonical_double_bits(*v),
            Value::Timestamp(ts) => (ts.seconds() as u64)
                .wrapping_mul(HASH_PRIME)
                .wrapping_add(ts.nanos() as u64),
            Value::String(v) => hash_bytes(v.as_bytes()),
            Value::Bytes(v) => hash_bytes(v),
            Value::Reference(v) => hash_bytes(v.as_bytes()),
            Value::GeoPoint(point) => canonical_double_bits(point.latitude())
                .wrapping_mul(HASH_PRIME)
                .wrapping_add(canonical_double_bits(point.longitude())),
            Value::Array(values) => {
                let mut acc = 0u64;
                for value in values {
                    acc = acc.wrapping_mul(HASH_PRIME).wrapping_add(value.hash_code());
                }
                acc
            }
            Value::Map(map) => {
                let mut acc = 0u64;
                for (key, value) in map {
                    acc = acc
                        .wrapping_mul(HASH_PRIME)
                        .wrapping_add(hash_bytes(key.as_bytes()));
                    acc = acc.wrapping_mul(HASH_PRIME).wrapping_add(value.hash_code());
                }
                acc
            }
        }
    }

    /// Renders this value in a form that is unambiguous across kinds, so
    /// the integer `3` and the string `"3"` never collide. Used to build
    /// filter canonical ids.
    pub fn canonical_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Integer(v) => v.to_string(),
            Value::Double(v) => format!("{:?}", v),
            Value::Timestamp(ts) => format!("ts({},{})", ts.seconds(), ts.nanos()),
            Value::String(v) => {
                format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\""))
            }
            Value::Bytes(v) => {
                let mut out = String::with_capacity(v.len() * 2 + 7);
                out.push_str("bytes(");
                for byte in v {
                    out.push_str(&format!("{:02x}", byte));
                }
                out.push(')');
                out
            }
            Value::Reference(v) => format!("ref({})", v),
            Value::GeoPoint(point) => point.to_string(),
            Value::Array(values) => {
                let parts: Vec<String> = values.iter().map(Value::canonical_string).collect();
                format!("[{}]", parts.join(","))
            }
            Value::Map(map) => {
                let parts: Vec<String> = map
                    .iter()
                    .map(|(key, value)| format!("{}:{}", key, value.canonical_string()))
                    .collect();
                format!("{{{}}}", parts.join(","))
            }
        }
    }

    /// Returns the boolean payload if this is a [`Value::Bool`].
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer payload if this is a [`Value::Integer`].
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the double payload if this is a [`Value::Double`].
    #[inline]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the timestamp payload if this is a [`Value::Timestamp`].
    #[inline]
    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Value::Timestamp(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the string payload if this is a [`Value::String`].
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the bytes payload if this is a [`Value::Bytes`].
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the resource path if this is a [`Value::Reference`].
    #[inline]
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Value::Reference(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the geo point payload if this is a [`Value::GeoPoint`].
    #[inline]
    pub fn as_geo_point(&self) -> Option<&GeoPoint> {
        match self {
            Value::GeoPoint(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Value::Array`].
    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the entries if this is a [`Value::Map`].
    #[inline]
    pub fn as_map(&self) -> Option<&OrdMap<String, Value>> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Checks if this is [`Value::Null`].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Checks if this is a NaN double.
    #[inline]
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Double(v) if v.is_nan())
    }

    /// Checks if this is an integer or a double.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Double(_))
    }

    /// Checks if this is [`Value::Integer`].
    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Checks if this is [`Value::Double`].
    #[inline]
    pub fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    /// Checks if this is [`Value::String`].
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Checks if this is [`Value::Reference`].
    #[inline]
    pub fn is_reference(&self) -> bool {
        matches!(self, Value::Reference(_))
    }

    /// Checks if this is [`Value::Array`].
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Checks if this is [`Value::Map`].
    #[inline]
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Takes the value, replacing it with [`Value::Null`].
    pub fn take(&mut self) -> Value {
        std::mem::replace(self, Value::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        let left_order = self.type_order();
        let right_order = other.type_order();
        if left_order != right_order {
            return left_order.cmp(&right_order);
        }

        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Double(a), Value::Double(b)) => compare_doubles(*a, *b),
            (Value::Double(a), Value::Integer(b)) => compare_mixed(*a, *b),
            (Value::Integer(a), Value::Double(b)) => compare_mixed(*b, *a).reverse(),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            (Value::Reference(a), Value::Reference(b)) => a.cmp(b),
            (Value::GeoPoint(a), Value::GeoPoint(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => {
                let min_len = a.len().min(b.len());
                for i in 0..min_len {
                    let ordering = a[i].cmp(&b[i]);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                a.len().cmp(&b.len())
            }
            (Value::Map(a), Value::Map(b)) => {
                let mut left = a.iter();
                let mut right = b.iter();
                loop {
                    match (left.next(), right.next()) {
                        (Some((left_key, left_value)), Some((right_key, right_value))) => {
                            let key_ordering = left_key.cmp(right_key);
                            if key_ordering != Ordering::Equal {
                                return key_ordering;
                            }
                            let value_ordering = left_value.cmp(right_value);
                            if value_ordering != Ordering::Equal {
                                return value_ordering;
                            }
                        }
                        // only equal if both iterators are exhausted
                        (None, None) => return Ordering::Equal,
                        (Some(_), None) => return Ordering::Greater,
                        (None, Some(_)) => return Ordering::Less,
                    }
                }
            }
            _ => unreachable!("values of the same kind rank must share a variant"),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_string())
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<Timestamp> for Value {
    #[inline]
    fn from(value: Timestamp) -> Self {
        Value::Timestamp(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<GeoPoint> for Value {
    #[inline]
    fn from(value: GeoPoint) -> Self {
        Value::GeoPoint(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<OrdMap<String, Value>> for Value {
    fn from(value: OrdMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

/// A macro to create a [`Value`] from a given expression.
///
/// Literal maps and arrays nest:
///
/// ```rust,ignore
/// let scalar = val!(42);
/// let array = val!([1, 2, 3]);
/// let nested = val!({ "a": { "b": 1 } });
/// ```
#[macro_export]
macro_rules! val {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::vmap! { $($key : $value),* }
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::val!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}

/// A macro to create a [`Value::Map`] from key/value pairs.
///
/// ```rust,ignore
/// let map = vmap! { "a": 1, "b": { "c": "text" } };
/// ```
#[macro_export]
macro_rules! vmap {
    () => {
        $crate::common::Value::Map($crate::common::OrdMap::new())
    };

    ($($key:tt : $value:tt),+ $(,)?) => {{
        let mut map = $crate::common::OrdMap::new();
        $(
            map.insert(::std::string::String::from($key), $crate::val!($value));
        )+
        $crate::common::Value::Map(map)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    mod mixed_number_tests {
        use super::*;

        #[test]
        fn test_compare_mixed_within_safe_range() {
            assert_eq!(compare_mixed(1.5, 1), Ordering::Greater);
            assert_eq!(compare_mixed(1.5, 2), Ordering::Less);
            assert_eq!(compare_mixed(2.0, 2), Ordering::Equal);
            assert_eq!(compare_mixed(-0.0, 0), Ordering::Equal);
        }

        #[test]
        fn test_compare_mixed_nan_below_all_numbers() {
            assert_eq!(compare_mixed(f64::NAN, 0), Ordering::Less);
            assert_eq!(compare_mixed(f64::NAN, i64::MIN), Ordering::Less);
        }

        #[test]
        fn test_compare_mixed_infinities() {
            assert_eq!(compare_mixed(f64::INFINITY, i64::MAX), Ordering::Greater);
            assert_eq!(compare_mixed(f64::NEG_INFINITY, i64::MIN), Ordering::Less);
        }

        #[test]
        fn test_compare_mixed_beyond_double_precision() {
            // 2^53 + 1 is the first integer a double cannot represent
            let boundary = (1i64 << 53) + 1;
            assert_eq!(compare_mixed((1i64 << 53) as f64, boundary), Ordering::Less);
            assert_eq!(compare_mixed(((1i64 << 53) + 2) as f64, boundary), Ordering::Greater);
        }

        #[test]
        fn test_compare_mixed_near_i64_bounds() {
            assert_eq!(compare_mixed(1e19, i64::MAX), Ordering::Greater);
            assert_eq!(compare_mixed(-1e19, i64::MIN), Ordering::Less);
            assert_eq!(compare_mixed(9.0e18, i64::MAX), Ordering::Less);
        }

        #[test]
        fn test_compare_mixed_small_double_against_huge_int() {
            let int = (1i64 << 53) + 5;
            assert_eq!(compare_mixed(0.5, int), Ordering::Less);
            assert_eq!(compare_mixed(-0.5, -int), Ordering::Greater);
        }
    }

    mod ordering_tests {
        use super::*;
        use crate::{val, vmap};

        #[test]
        fn test_cross_kind_ladder() {
            let ladder = vec![
                Value::Null,
                val!(false),
                val!(true),
                val!(1),
                val!(1.5),
                val!(2),
                Value::Timestamp(Timestamp::new(1, 0).unwrap()),
                val!(""),
                val!("a"),
                Value::Bytes(vec![0x00]),
                Value::Reference("a/b".to_string()),
                Value::GeoPoint(GeoPoint::new(0.0, 0.0).unwrap()),
                val!([]),
                val!([1]),
                vmap! {},
                vmap! { "a": 1 },
            ];
            for window in ladder.windows(2) {
                assert!(
                    window[0] < window[1],
                    "{} should sort before {}",
                    window[0],
                    window[1]
                );
            }
        }

        #[test]
        fn test_comparison_is_antisymmetric() {
            let values = vec![
                Value::Null,
                val!(true),
                val!(3),
                val!(3.0),
                val!(f64::NAN),
                val!("abc"),
                val!([1, "a"]),
                vmap! { "x": 1 },
            ];
            for a in &values {
                for b in &values {
                    assert_eq!(a.cmp(b), b.cmp(a).reverse());
                }
            }
        }

        #[test]
        fn test_nan_sorts_below_numbers_and_equals_itself() {
            assert!(val!(f64::NAN) < val!(f64::NEG_INFINITY));
            assert!(val!(f64::NAN) < val!(0));
            assert_eq!(val!(f64::NAN).cmp(&val!(f64::NAN)), Ordering::Equal);
            // but stays above every boolean
            assert!(val!(f64::NAN) > val!(true));
        }

        #[test]
        fn test_negative_zero_equals_zero() {
            assert_eq!(val!(-0.0), val!(0.0));
            assert_eq!(val!(-0.0), val!(0));
        }

        #[test]
        fn test_integer_and_double_interleave() {
            assert_eq!(val!(1).cmp(&val!(1.0)), Ordering::Equal);
            assert!(val!(1) < val!(1.5));
            assert!(val!(1.5) < val!(2));
            assert!(val!(i64::MAX) < val!(1e19));
            assert!(val!(i64::MIN) > val!(-1e19));
        }

        #[test]
        fn test_array_prefix_sorts_first() {
            assert!(val!([1, 2]) < val!([1, 2, 0]));
            assert!(val!([1, 3]) > val!([1, 2, 99]));
            assert_eq!(val!([1, 2]).cmp(&val!([1, 2])), Ordering::Equal);
        }

        #[test]
        fn test_map_compares_by_sorted_keys_then_values() {
            assert!(vmap! { "a": 1 } < vmap! { "b": 0 });
            assert!(vmap! { "a": 1 } < vmap! { "a": 2 });
            // shorter map is a prefix of the longer one
            assert!(vmap! { "a": 1 } < vmap! { "a": 1, "b": 0 });
            assert_eq!(
                vmap! { "b": 2, "a": 1 }.cmp(&vmap! { "a": 1, "b": 2 }),
                Ordering::Equal
            );
        }

        #[test]
        fn test_bytes_compare_unsigned() {
            assert!(Value::Bytes(vec![0x7f]) < Value::Bytes(vec![0x80]));
            assert!(Value::Bytes(vec![0x01]) < Value::Bytes(vec![0x01, 0x00]));
        }

        #[test]
        fn test_kind_separation_follows_rank() {
            let int = val!(7);
            let text = val!("7");
            assert_eq!(
                int.cmp(&text),
                int.type_order().cmp(&text.type_order())
            );
        }
    }

    mod equality_and_hash_tests {
        use super::*;
        use crate::{val, vmap};

        #[test]
        fn test_query_equals_rejects_nan() {
            assert!(!val!(f64::NAN).query_equals(&val!(f64::NAN)));
            assert!(!val!(f64::NAN).query_equals(&val!(0.0)));
            assert!(!val!(0.0).query_equals(&val!(f64::NAN)));
        }

        #[test]
        fn test_query_equals_matches_comparator_equivalence() {
            assert!(val!(1).query_equals(&val!(1.0)));
            assert!(val!("a").query_equals(&val!("a")));
            assert!(Value::Null.query_equals(&Value::Null));
            assert!(!val!(1).query_equals(&val!("1")));
        }

        #[test]
        fn test_equal_values_hash_equally() {
            let pairs = vec![
                (val!(1), val!(1.0)),
                (val!(-0.0), val!(0.0)),
                (val!(0), val!(-0.0)),
                (val!(f64::NAN), val!(f64::NAN)),
                (vmap! { "b": 2, "a": 1 }, vmap! { "a": 1, "b": 2 }),
                (val!([1.0, 2]), val!([1, 2.0])),
            ];
            for (a, b) in pairs {
                assert_eq!(a, b);
                assert_eq!(a.hash_code(), b.hash_code());
            }
        }

        #[test]
        fn test_distinct_kinds_hash_differently() {
            assert_ne!(val!(3).hash_code(), val!("3").hash_code());
        }
    }

    mod canonical_string_tests {
        use super::*;
        use crate::{val, vmap};

        #[test]
        fn test_canonical_string_distinguishes_kinds() {
            assert_eq!(val!(3).canonical_string(), "3");
            assert_eq!(val!(3.0).canonical_string(), "3.0");
            assert_eq!(val!("3").canonical_string(), "\"3\"");
            assert_eq!(
                Value::Reference("a/b".to_string()).canonical_string(),
                "ref(a/b)"
            );
            assert_eq!(Value::Bytes(vec![0xde, 0xad]).canonical_string(), "bytes(dead)");
        }

        #[test]
        fn test_canonical_string_nests() {
            assert_eq!(
                vmap! { "b": [1, "x"], "a": (Value::Null) }.canonical_string(),
                "{a:null,b:[1,\"x\"]}"
            );
        }
    }

    mod factory_tests {
        use super::*;
        use crate::val;

        #[test]
        fn test_from_primitives() {
            assert_eq!(Value::from(true), Value::Bool(true));
            assert_eq!(Value::from(42i64), Value::Integer(42));
            assert_eq!(Value::from(42i32), Value::Integer(42));
            assert_eq!(Value::from(1.25), Value::Double(1.25));
            assert_eq!(Value::from("text"), Value::String("text".to_string()));
            assert_eq!(Value::from(()), Value::Null);
        }

        #[test]
        fn test_accessors() {
            assert_eq!(val!(42).as_integer(), Some(42));
            assert_eq!(val!(42).as_double(), None);
            assert_eq!(val!("x").as_str(), Some("x"));
            assert_eq!(val!([1]).as_array().map(|a| a.len()), Some(1));
            assert!(Value::Null.is_null());
            assert!(val!(f64::NAN).is_nan());
            assert!(!val!(1.0).is_nan());
        }

        #[test]
        fn test_take_leaves_null() {
            let mut value = val!(42);
            let taken = value.take();
            assert_eq!(taken, val!(42));
            assert!(value.is_null());
        }
    }
}
