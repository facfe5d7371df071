use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use crate::bag::Count;

/// A value that can be stored in a [`Bag`](crate::Bag).
///
/// Keys only need equality and hashing. Two capabilities are checked at run
/// time instead of being required up front:
///
/// * `is_absent` marks the null-like values a bag refuses to store;
/// * `try_cmp` orders two elements when they are mutually orderable, and
///   answers `None` when they are not.
pub trait Element: Eq + Hash + Clone + fmt::Debug {
    fn is_absent(&self) -> bool {
        false
    }

    fn try_cmp(&self, other: &Self) -> Option<Ordering>;

    /// Bare name for symbol-like elements, rendered as `name: count`.
    fn symbol_name(&self) -> Option<&str> {
        None
    }
}

macro_rules! ordered_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                fn try_cmp(&self, other: &Self) -> Option<Ordering> {
                    Some(self.cmp(other))
                }
            }
        )*
    };
}

ordered_element!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, String, ()
);

impl<'a> Element for &'a str {
    fn try_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Element> Element for Option<T> {
    fn is_absent(&self) -> bool {
        match self {
            Some(inner) => inner.is_absent(),
            None => true,
        }
    }

    fn try_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Some(a), Some(b)) => a.try_cmp(b),
            (None, None) => Some(Ordering::Equal),
            _ => None,
        }
    }

    fn symbol_name(&self) -> Option<&str> {
        self.as_ref().and_then(Element::symbol_name)
    }
}

impl<A: Element, B: Element> Element for (A, B) {
    fn try_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.0.try_cmp(&other.0)? {
            Ordering::Equal => self.1.try_cmp(&other.1),
            ord => Some(ord),
        }
    }
}

/// Dynamically typed element, for bags whose members are not all of one kind.
///
/// Values of different kinds are never orderable against each other, so a
/// `Bag<Value>` mixing integers and strings has no natural order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Str(String),
    Sym(String),
    List(Vec<Value>),
    Map(Vec<(Value, Count)>),
}

impl Value {
    pub fn sym(name: impl Into<String>) -> Self {
        Value::Sym(name.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Str(_) => "string",
            Value::Sym(_) => "symbol",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

impl Element for Value {
    fn is_absent(&self) -> bool {
        matches!(self, Value::Nil)
    }

    fn try_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (Value::Sym(a), Value::Sym(b)) => Some(a.cmp(b)),
            (Value::List(a), Value::List(b)) => try_cmp_seq(a.iter(), b.iter()),
            // booleans, nil and maps only know equality
            (a, b) if a == b => Some(Ordering::Equal),
            _ => None,
        }
    }

    fn symbol_name(&self) -> Option<&str> {
        match self {
            Value::Sym(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Sym(s) => write!(f, ":{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item:?}")?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, count)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match key.symbol_name() {
                        Some(name) => write!(f, "{name}: {count}")?,
                        None => write!(f, "{key:?} => {count}")?,
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

/// Lexicographic order over two sequences, `None` as soon as a pair of
/// elements turns out not to be orderable.
pub(crate) fn try_cmp_seq<'a, T: Element + 'a>(
    a: impl IntoIterator<Item = &'a T>,
    b: impl IntoIterator<Item = &'a T>,
) -> Option<Ordering> {
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (Some(x), Some(y)) => match x.try_cmp(y)? {
                Ordering::Equal => continue,
                ord => return Some(ord),
            },
            (Some(_), None) => return Some(Ordering::Greater),
            (None, Some(_)) => return Some(Ordering::Less),
            (None, None) => return Some(Ordering::Equal),
        }
    }
}

/// Stable merge sort over a fallible comparison. Gives up with `None` on the
/// first pair of items that cannot be ordered.
pub(crate) fn try_sort_by<U, F>(mut items: Vec<U>, cmp: &F) -> Option<Vec<U>>
where
    F: Fn(&U, &U) -> Option<Ordering>,
{
    if items.len() <= 1 {
        return Some(items);
    }
    let right = items.split_off(items.len() / 2);
    let left = try_sort_by(items, cmp)?;
    let right = try_sort_by(right, cmp)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        let take_right = cmp(r, l)? == Ordering::Less;
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    Some(merged)
}
