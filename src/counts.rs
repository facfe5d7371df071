use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;

use crate::bag::{Bag, Count};
use crate::element::{Element, Value};
use crate::error::BagError;

/// Anything that can present itself as `element => count` pairs, and can
/// therefore stand on the right-hand side of the bag operators.
///
/// Implement it for your own record types to combine them with bags:
///
/// ```
/// use multibag::{Bag, BagError, Count, ToCounts, Value};
///
/// struct Point { x: i64, y: i64 }
///
/// impl ToCounts<Value> for Point {
///     fn counts(&self) -> Result<Vec<(Value, Count)>, BagError> {
///         Ok(vec![(Value::sym("x"), self.x), (Value::sym("y"), self.y)])
///     }
/// }
///
/// let bag = Bag::from_elements(vec![Value::from("precipice")]).unwrap();
/// let sum = bag.sum(&Point { x: 2, y: 3 }).unwrap();
/// assert_eq!(sum.count(&Value::sym("y")), 3);
/// ```
pub trait ToCounts<T: Element> {
    fn counts(&self) -> Result<Vec<(T, Count)>, BagError>;

    /// The operand as a bag, built through the same path as
    /// [`Bag::from_counts`] unless it already is one.
    fn coerce(&self) -> Result<Cow<'_, Bag<T>>, BagError> {
        let mut bag = Bag::new();
        for (element, count) in self.counts()? {
            bag.add(element, count)?;
        }
        Ok(Cow::Owned(bag))
    }
}

impl<T: Element> ToCounts<T> for Bag<T> {
    fn counts(&self) -> Result<Vec<(T, Count)>, BagError> {
        Ok(self.iter_with_count().map(|(e, c)| (e.clone(), c)).collect())
    }

    fn coerce(&self) -> Result<Cow<'_, Bag<T>>, BagError> {
        Ok(Cow::Borrowed(self))
    }
}

fn pairs<'a, T, C, I>(entries: I) -> Vec<(T, Count)>
where
    T: Element + 'a,
    C: Copy + Into<Count> + 'a,
    I: IntoIterator<Item = (&'a T, &'a C)>,
{
    entries.into_iter().map(|(e, c)| (e.clone(), (*c).into())).collect()
}

impl<T: Element, C: Copy + Into<Count>, S: BuildHasher> ToCounts<T> for HashMap<T, C, S> {
    fn counts(&self) -> Result<Vec<(T, Count)>, BagError> {
        Ok(pairs(self))
    }
}

impl<T: Element, C: Copy + Into<Count>, S: BuildHasher> ToCounts<T> for IndexMap<T, C, S> {
    fn counts(&self) -> Result<Vec<(T, Count)>, BagError> {
        Ok(pairs(self))
    }
}

impl<T: Element, C: Copy + Into<Count>> ToCounts<T> for BTreeMap<T, C> {
    fn counts(&self) -> Result<Vec<(T, Count)>, BagError> {
        Ok(pairs(self))
    }
}

impl<T: Element, C: Copy + Into<Count>> ToCounts<T> for [(T, C)] {
    fn counts(&self) -> Result<Vec<(T, Count)>, BagError> {
        Ok(pairs(self.iter().map(|(e, c)| (e, c))))
    }
}

impl<T: Element, C: Copy + Into<Count>, const N: usize> ToCounts<T> for [(T, C); N] {
    fn counts(&self) -> Result<Vec<(T, Count)>, BagError> {
        self.as_slice().counts()
    }
}

impl<T: Element, C: Copy + Into<Count>> ToCounts<T> for Vec<(T, C)> {
    fn counts(&self) -> Result<Vec<(T, Count)>, BagError> {
        self.as_slice().counts()
    }
}

/// Only `Value::Map` carries counts; every other kind is rejected by name.
impl ToCounts<Value> for Value {
    fn counts(&self) -> Result<Vec<(Value, Count)>, BagError> {
        match self {
            Value::Map(entries) => Ok(entries.clone()),
            other => Err(BagError::UnsupportedOperand { type_name: other.type_name() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bags_coerce_without_copying() {
        let bag = Bag::from_elements(["a", "b", "b"]).unwrap();
        assert!(matches!(bag.coerce().unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn maps_drop_non_positive_entries() {
        let mut map = HashMap::new();
        map.insert("pathos", 1);
        map.insert("chaos", 0);
        map.insert("star", -3);
        let bag = map.coerce().unwrap();
        assert_eq!(bag.size(), 1);
        assert_eq!(bag.count("pathos"), 1);
        assert!(!bag.contains("star"));
    }

    #[test]
    fn narrow_count_types_widen() {
        let counts: BTreeMap<char, u8> = [('a', 2u8), ('b', 1u8)].into_iter().collect();
        assert_eq!(counts.coerce().unwrap().size(), 3);
        let pairs: Vec<(&str, i32)> = vec![("x", 4), ("y", -1)];
        assert_eq!(pairs.coerce().unwrap().uniq_size(), 1);
    }

    #[test]
    fn absent_keys_are_refused() {
        let map = vec![(Value::Nil, 2)];
        assert_eq!(map.coerce().err(), Some(BagError::InvalidElement));
    }

    #[test]
    fn scalar_values_are_unsupported() {
        assert_eq!(
            Value::Int(42).counts().err(),
            Some(BagError::UnsupportedOperand { type_name: "integer" })
        );
        assert_eq!(
            Value::sym("symbol").coerce().err(),
            Some(BagError::UnsupportedOperand { type_name: "symbol" })
        );
        let map = Value::Map(vec![(Value::from("k"), 3)]);
        assert_eq!(map.coerce().unwrap().count(&Value::from("k")), 3);
    }
}
