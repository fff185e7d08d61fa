use im::OrdMap;
use itertools::{EitherOrBoth, Itertools};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use crate::common::{FieldPath, Value, TYPE_ORDER_MAP};
use crate::errors::{ErrorKind, HaliteError, HaliteResult};

use super::FieldMask;

/// A single field stored in an overlay: either a plain value or a nested
/// object state carrying overlays of its own.
///
/// Map-kinded values are always held as [`FieldValue::Object`], never as
/// `Primitive(Value::Map)`, so path descent has exactly one representation
/// to follow.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum FieldValue {
    /// A non-map value.
    Primitive(Value),
    /// A nested object state.
    Object(ObjectValue),
}

impl FieldValue {
    /// Wraps a value, lifting maps into nested object states.
    pub fn of(value: Value) -> FieldValue {
        match value {
            Value::Map(map) => FieldValue::Object(ObjectValue::from_map(map)),
            other => FieldValue::Primitive(other),
        }
    }

    /// Materialises this field back into a plain [`Value`].
    pub fn to_value(&self) -> Value {
        match self {
            FieldValue::Primitive(value) => value.clone(),
            FieldValue::Object(object) => object.to_value(),
        }
    }

    /// Returns the kind rank of the materialised value.
    pub fn type_order(&self) -> u8 {
        match self {
            FieldValue::Primitive(value) => value.type_order(),
            FieldValue::Object(_) => TYPE_ORDER_MAP,
        }
    }
}

/// A pending-write marker layered over a base map child of the same name.
///
/// A field set to [`Value::Null`] and a deleted field are distinct states:
/// the former is `Present(Primitive(Value::Null))`, the latter `Deleted`.
/// Both round-trip cleanly through [`ObjectValue::get`] and iteration.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum Overlay {
    /// The child exists with the given field value, replacing any base
    /// entry of the same name.
    Present(FieldValue),
    /// A tombstone masking any base entry of the same name.
    Deleted,
}

/// A persistent, map-rooted document state supporting path-addressed
/// mutation.
///
/// An `ObjectValue` pairs an immutable base map (typically a server
/// snapshot) with an ordered overlay layer of pending writes. `set` and
/// `delete` return a new `ObjectValue` sharing all unchanged substructure;
/// the base map is never mutated and remains shared with every prior
/// version. A mutation at depth *d* allocates *O(d)* new nodes.
///
/// # Examples
///
/// ```rust,ignore
/// let original = ObjectValue::try_from(vmap! { "a": { "b": 1, "c": 2 } })?;
/// let updated = original
///     .set(&FieldPath::parse("a.b")?, val!(5))?
///     .delete(&FieldPath::parse("a.c")?)?;
///
/// assert_eq!(updated.get(&FieldPath::parse("a")?), Some(vmap! { "b": 5 }));
/// assert_eq!(updated.get(&FieldPath::parse("a.c")?), None);
/// // the original snapshot is untouched
/// assert_eq!(original.get(&FieldPath::parse("a.c")?), Some(val!(2)));
/// ```
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct ObjectValue {
    base: OrdMap<String, Value>,
    overlays: OrdMap<String, Overlay>,
}

impl ObjectValue {
    /// Creates an empty object state.
    pub fn empty() -> ObjectValue {
        ObjectValue {
            base: OrdMap::new(),
            overlays: OrdMap::new(),
        }
    }

    /// Creates an object state rooted at the given base map with no
    /// pending writes.
    pub fn from_map(base: OrdMap<String, Value>) -> ObjectValue {
        ObjectValue {
            base,
            overlays: OrdMap::new(),
        }
    }

    /// Reads the value at `path`, overlays first, base map second.
    ///
    /// Returns `None` when the path crosses a tombstone, a non-map value or
    /// an absent name. The empty path yields the whole object as a map.
    pub fn get(&self, path: &FieldPath) -> Option<Value> {
        if path.is_empty() {
            return Some(self.to_value());
        }

        let child_name = path.segment(0);
        match self.overlays.get(child_name) {
            Some(Overlay::Deleted) => None,
            Some(Overlay::Present(field_value)) => {
                if path.len() == 1 {
                    Some(field_value.to_value())
                } else if let FieldValue::Object(child) = field_value {
                    child.get(&path.pop_first())
                } else {
                    None
                }
            }
            None => {
                let mut value = self.base.get(child_name);
                let mut index = 1;
                while index < path.len() {
                    match value {
                        Some(Value::Map(map)) => {
                            value = map.get(path.segment(index));
                            index += 1;
                        }
                        _ => return None,
                    }
                }
                value.cloned()
            }
        }
    }

    /// Returns a new object state with `value` installed at `path`.
    ///
    /// Intermediate names that are missing or hold non-map values are
    /// replaced by fresh nested objects; intermediate maps are descended
    /// into, preserving their siblings.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is empty.
    pub fn set(&self, path: &FieldPath, value: Value) -> HaliteResult<ObjectValue> {
        if path.is_empty() {
            log::error!("Cannot set a value at an empty field path");
            return Err(HaliteError::new(
                "Cannot set a value at an empty field path",
                ErrorKind::InvalidArgument,
            ));
        }

        let child_name = path.segment(0);
        if path.len() == 1 {
            return Ok(self.set_child(child_name, FieldValue::of(value)));
        }

        let child = self.child_object(child_name).set(&path.pop_first(), value)?;
        Ok(self.set_child(child_name, FieldValue::Object(child)))
    }

    /// Returns a new object state with a tombstone installed at `path`.
    ///
    /// Deleting an absent field is a no-op in effect but still records the
    /// tombstone. Deleting below a non-map value changes nothing: a
    /// primitive is never coerced into a map just to delete inside it.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is empty.
    pub fn delete(&self, path: &FieldPath) -> HaliteResult<ObjectValue> {
        if path.is_empty() {
            log::error!("Cannot delete a value at an empty field path");
            return Err(HaliteError::new(
                "Cannot delete a value at an empty field path",
                ErrorKind::InvalidArgument,
            ));
        }

        let child_name = path.segment(0);
        if path.len() == 1 {
            return Ok(ObjectValue {
                base: self.base.clone(),
                overlays: self
                    .overlays
                    .update(child_name.to_string(), Overlay::Deleted),
            });
        }

        match self.overlays.get(child_name) {
            Some(Overlay::Present(FieldValue::Object(child))) => {
                let child = child.delete(&path.pop_first())?;
                Ok(self.set_child(child_name, FieldValue::Object(child)))
            }
            // a primitive overlay or a tombstone has nothing to delete inside
            Some(_) => Ok(self.clone()),
            None => match self.base.get(child_name) {
                Some(Value::Map(map)) => {
                    let child = ObjectValue::from_map(map.clone()).delete(&path.pop_first())?;
                    Ok(self.set_child(child_name, FieldValue::Object(child)))
                }
                _ => Ok(self.clone()),
            },
        }
    }

    /// Iterates the merged logical state in ascending name order.
    ///
    /// Base and overlay streams are both pre-sorted; the merge emits the
    /// smaller name at each step, lets the overlay win on ties and skips
    /// tombstoned names entirely. The iterator is lazy and single-pass;
    /// call `iter()` again to restart.
    pub fn iter(&self) -> impl Iterator<Item = (String, Value)> + '_ {
        self.base
            .iter()
            .merge_join_by(self.overlays.iter(), |(base_key, _), (overlay_key, _)| {
                base_key.cmp(overlay_key)
            })
            .filter_map(|merged| match merged {
                EitherOrBoth::Left((key, value)) => Some((key.clone(), value.clone())),
                EitherOrBoth::Right((key, overlay))
                | EitherOrBoth::Both(_, (key, overlay)) => match overlay {
                    Overlay::Present(field_value) => Some((key.clone(), field_value.to_value())),
                    Overlay::Deleted => None,
                },
            })
    }

    /// Materialises the merged logical state into a [`Value::Map`].
    pub fn to_value(&self) -> Value {
        if self.overlays.is_empty() {
            return Value::Map(self.base.clone());
        }
        Value::Map(self.iter().collect())
    }

    /// Recursively extracts the set of leaf paths present in this object.
    ///
    /// An empty nested map contributes the path to the map itself, so the
    /// object can be rebuilt exactly, empty maps included.
    pub fn field_mask(&self) -> FieldMask {
        let mut fields = BTreeSet::new();
        for (name, value) in self.iter() {
            let current = FieldPath::from_single_segment(name);
            match value {
                Value::Map(map) => {
                    let nested = ObjectValue::from_map(map).field_mask();
                    if nested.is_empty() {
                        // preserve the empty map itself
                        fields.insert(current);
                    } else {
                        for nested_path in nested.paths() {
                            fields.insert(current.append_path(nested_path));
                        }
                    }
                }
                _ => {
                    fields.insert(current);
                }
            }
        }
        FieldMask::from_set(fields)
    }

    /// Returns the number of fields in the merged logical state.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Checks whether the merged logical state has no fields.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Computes the structural hash of the merged state, consistent with
    /// [`Value::Map`] hashing.
    pub fn hash_code(&self) -> u64 {
        self.to_value().hash_code()
    }

    fn set_child(&self, child_name: &str, field_value: FieldValue) -> ObjectValue {
        ObjectValue {
            base: self.base.clone(),
            overlays: self
                .overlays
                .update(child_name.to_string(), Overlay::Present(field_value)),
        }
    }

    /// Resolves the child to recurse into for a nested `set`: an existing
    /// nested object or base map keeps its contents, anything else starts
    /// empty.
    fn child_object(&self, child_name: &str) -> ObjectValue {
        match self.overlays.get(child_name) {
            Some(Overlay::Present(FieldValue::Object(child))) => child.clone(),
            Some(_) => ObjectValue::empty(),
            None => match self.base.get(child_name) {
                Some(Value::Map(map)) => ObjectValue::from_map(map.clone()),
                _ => ObjectValue::empty(),
            },
        }
    }
}

impl TryFrom<Value> for ObjectValue {
    type Error = HaliteError;

    fn try_from(value: Value) -> HaliteResult<ObjectValue> {
        match value {
            Value::Map(map) => Ok(ObjectValue::from_map(map)),
            other => {
                log::error!("Cannot root an object state at a {} value", other);
                Err(HaliteError::new(
                    "Object state must be rooted at a map value",
                    ErrorKind::InvalidArgument,
                ))
            }
        }
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ObjectValue {}

impl PartialOrd for ObjectValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ObjectValue {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut left = self.iter();
        let mut right = other.iter();
        loop {
            match (left.next(), right.next()) {
                (Some((left_key, left_value)), Some((right_key, right_value))) => {
                    let key_ordering = left_key.cmp(&right_key);
                    if key_ordering != Ordering::Equal {
                        return key_ordering;
                    }
                    let value_ordering = left_value.cmp(&right_value);
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
}

impl Hash for ObjectValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl Display for ObjectValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_value())
    }
}
