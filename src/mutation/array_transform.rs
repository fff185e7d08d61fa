use std::fmt::Display;

use crate::common::Value;

/// An idempotent transform of an array-valued field.
///
/// Both variants treat a missing, null or non-array prior value as an empty
/// array, and both are idempotent: applying the same transform twice yields
/// the same array as applying it once. Element equality is the comparator's
/// equivalence, under which NaN equals itself; this keeps `Union` from
/// appending a NaN element twice.
///
/// Equality between transforms is tag-sensitive: a union and a remove over
/// the same elements are different transforms.
///
/// # Examples
///
/// ```rust,ignore
/// use halite::mutation::ArrayTransform;
/// use halite::val;
///
/// let union = ArrayTransform::union(vec![val!(1), val!(2)]);
/// assert_eq!(union.apply(Some(&val!([2, 4]))), val!([2, 4, 1]));
///
/// let remove = ArrayTransform::remove(vec![val!(2)]);
/// assert_eq!(remove.apply(Some(&val!([1, 2, 2, 3]))), val!([1, 3]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum ArrayTransform {
    /// Appends each element that is not already present, preserving the
    /// order of pre-existing elements. Duplicates already in the prior
    /// array survive; duplicates among the new elements collapse to the
    /// first occurrence.
    Union(Vec<Value>),
    /// Removes every occurrence of each element from the prior array.
    Remove(Vec<Value>),
}

impl ArrayTransform {
    /// Creates a union transform.
    pub fn union(elements: Vec<Value>) -> ArrayTransform {
        ArrayTransform::Union(elements)
    }

    /// Creates a remove transform.
    pub fn remove(elements: Vec<Value>) -> ArrayTransform {
        ArrayTransform::Remove(elements)
    }

    /// Returns the elements this transform carries.
    pub fn elements(&self) -> &[Value] {
        match self {
            ArrayTransform::Union(elements) | ArrayTransform::Remove(elements) => elements,
        }
    }

    /// Applies this transform to the prior field value, returning the new
    /// array value.
    ///
    /// The local and remote application coincide: the server echoes no
    /// transform result for array operations, so the client recomputes the
    /// identical array on its own.
    pub fn apply(&self, prior: Option<&Value>) -> Value {
        let mut result = coerced_array(prior);
        match self {
            ArrayTransform::Union(elements) => {
                for element in elements {
                    if !result.contains(element) {
                        result.push(element.clone());
                    }
                }
            }
            ArrayTransform::Remove(elements) => {
                result.retain(|existing| !elements.contains(existing));
            }
        }
        Value::Array(result)
    }

    /// Transforms never need a base value for conflict resolution; they are
    /// idempotent.
    pub fn compute_base_value(&self, _current: Option<&Value>) -> Option<Value> {
        None
    }
}

impl Display for ArrayTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (name, elements) = match self {
            ArrayTransform::Union(elements) => ("union", elements),
            ArrayTransform::Remove(elements) => ("remove", elements),
        };
        let parts: Vec<String> = elements.iter().map(Value::canonical_string).collect();
        write!(f, "{}([{}])", name, parts.join(","))
    }
}

/// Copies the prior value's elements if it is an array, and starts from an
/// empty array for null or any other kind.
fn coerced_array(prior: Option<&Value>) -> Vec<Value> {
    match prior {
        Some(Value::Array(elements)) => elements.clone(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::val;

    #[test]
    fn test_union_appends_missing_elements() {
        let transform = ArrayTransform::union(vec![val!(1), val!(2), val!(2), val!(3)]);
        let result = transform.apply(Some(&val!([2, 4])));
        assert_eq!(result, val!([2, 4, 1, 3]));
    }

    #[test]
    fn test_union_preserves_existing_duplicates() {
        let transform = ArrayTransform::union(vec![val!(1)]);
        let result = transform.apply(Some(&val!([2, 2])));
        assert_eq!(result, val!([2, 2, 1]));
    }

    #[test]
    fn test_union_is_idempotent() {
        let transform = ArrayTransform::union(vec![val!("x"), val!(1)]);
        let once = transform.apply(Some(&val!(["a"])));
        let twice = transform.apply(Some(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_union_nan_is_idempotent() {
        let transform = ArrayTransform::union(vec![val!(f64::NAN)]);
        let once = transform.apply(None);
        let twice = transform.apply(Some(&once));
        assert_eq!(once.as_array().unwrap().len(), 1);
        assert_eq!(twice.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_union_matches_across_number_kinds() {
        let transform = ArrayTransform::union(vec![val!(1.0)]);
        let result = transform.apply(Some(&val!([1])));
        assert_eq!(result, val!([1]));
    }

    #[test]
    fn test_remove_drops_every_occurrence() {
        let transform = ArrayTransform::remove(vec![val!(2)]);
        let result = transform.apply(Some(&val!([1, 2, 3, 2, 2])));
        assert_eq!(result, val!([1, 3]));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let transform = ArrayTransform::remove(vec![val!(2)]);
        let once = transform.apply(Some(&val!([1, 2, 3])));
        let twice = transform.apply(Some(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_array_prior_coerces_to_empty() {
        assert_eq!(
            ArrayTransform::remove(vec![val!(1)]).apply(Some(&Value::Null)),
            val!([])
        );
        assert_eq!(
            ArrayTransform::remove(vec![val!(1)]).apply(None),
            val!([])
        );
        assert_eq!(
            ArrayTransform::union(vec![val!(1)]).apply(Some(&val!("scalar"))),
            val!([1])
        );
    }

    #[test]
    fn test_equality_is_tag_sensitive() {
        let union = ArrayTransform::union(vec![val!(1)]);
        let remove = ArrayTransform::remove(vec![val!(1)]);
        assert_ne!(union, remove);
        assert_eq!(union, ArrayTransform::union(vec![val!(1)]));
    }

    #[test]
    fn test_compute_base_value_is_none() {
        let transform = ArrayTransform::union(vec![val!(1)]);
        assert!(transform.compute_base_value(Some(&val!([1]))).is_none());
    }
}
