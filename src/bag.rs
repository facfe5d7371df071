use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use indexmap::map::Entry;
use indexmap::{Equivalent, IndexMap};
use rand::Rng;

use crate::counts::ToCounts;
use crate::element::{try_cmp_seq, try_sort_by, Element};
use crate::error::BagError;
use crate::log::{debug, trace};

pub type Count = i64;

/// A multiset: each distinct element is stored once, with the number of
/// times it occurs.
///
/// Every stored count is strictly positive. Mutations that would leave a
/// count at zero or below remove the element instead. Elements enumerate in
/// first-insertion order, and that order is stable until the bag changes.
#[derive(Clone)]
pub struct Bag<T> {
    contents: IndexMap<T, Count>,
}

impl<T> Bag<T> {
    pub fn new() -> Self {
        Bag { contents: IndexMap::new() }
    }
}

impl<T> Default for Bag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Bag<T> {
    /// Every item counts once; repeats accumulate.
    pub fn from_elements<I: IntoIterator<Item = T>>(elements: I) -> Result<Self, BagError> {
        let mut bag = Bag::new();
        for element in elements {
            bag.push(element)?;
        }
        Ok(bag)
    }

    /// Entries with a count of zero or less are dropped.
    pub fn from_counts<R: ToCounts<T> + ?Sized>(source: &R) -> Result<Self, BagError> {
        Ok(source.coerce()?.into_owned())
    }

    // Mutation

    /// Changes the count of `element` by `occurrences`, which may be negative.
    ///
    /// With `std::ops::Add` in scope, `bag.add(..)` on a `Bag` value resolves to
    /// the operator on `&Bag` first; call it as `Bag::add(&mut bag, ..)` there.
    pub fn add(&mut self, element: T, occurrences: Count) -> Result<&mut Self, BagError> {
        if element.is_absent() {
            return Err(BagError::InvalidElement);
        }
        self.adjust(element, occurrences);
        Ok(self)
    }

    pub fn push(&mut self, element: T) -> Result<&mut Self, BagError> {
        self.add(element, 1)
    }

    pub fn remove(&mut self, element: T, occurrences: Count) -> Result<&mut Self, BagError> {
        self.add(element, occurrences.saturating_neg())
    }

    /// Drops every occurrence of `element`, whatever its count.
    pub fn remove_all<Q>(&mut self, element: &Q) -> &mut Self
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.contents.shift_remove(element);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.contents.clear();
        self
    }

    fn adjust(&mut self, element: T, delta: Count) {
        if delta == 0 {
            return;
        }
        match self.contents.entry(element) {
            Entry::Occupied(mut entry) => {
                let count = entry.get().saturating_add(delta);
                if count > 0 {
                    *entry.get_mut() = count;
                } else {
                    trace!("dropping {:?} from bag", entry.key());
                    entry.shift_remove();
                }
            }
            Entry::Vacant(entry) => {
                if delta > 0 {
                    entry.insert(delta);
                }
            }
        }
    }

    // Queries

    pub fn occurrences_of<Q>(&self, element: &Q) -> Count
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.contents.get(element).copied().unwrap_or(0)
    }

    pub fn count<Q>(&self, element: &Q) -> Count
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.occurrences_of(element)
    }

    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.occurrences_of(element) > 0
    }

    /// Total number of occurrences.
    pub fn size(&self) -> Count {
        self.contents.values().fold(0, |total, &count| total.saturating_add(count))
    }

    pub fn len(&self) -> Count {
        self.size()
    }

    /// Number of distinct elements.
    pub fn uniq_size(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    // Views

    /// Every element, repeated as many times as it occurs.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { entries: self.contents.iter(), current: None, remaining: 0 }
    }

    pub fn iter_with_count(&self) -> impl Iterator<Item = (&T, Count)> + Clone + '_ {
        self.contents.iter().map(|(element, &count)| (element, count))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    pub fn to_map(&self) -> IndexMap<T, Count> {
        self.contents.clone()
    }

    pub fn keys(&self) -> Vec<&T> {
        self.contents.keys().collect()
    }

    pub fn values(&self) -> Vec<Count> {
        self.contents.values().copied().collect()
    }

    pub fn to_set(&self) -> HashSet<&T> {
        self.contents.keys().collect()
    }

    /// Most frequent first; equal counts keep enumeration order.
    pub fn sorted_by_count(&self) -> Vec<(&T, Count)> {
        let mut pairs: Vec<_> = self.iter_with_count().collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }

    /// Entries in ascending element order, or `None` when the elements cannot
    /// all be ordered against each other.
    pub fn sorted_elements(&self) -> Option<IndexMap<T, Count>> {
        let pairs: Vec<_> = self.iter_with_count().collect();
        let sorted = try_sort_by(pairs, &|a: &(&T, Count), b: &(&T, Count)| T::try_cmp(a.0, b.0))?;
        Some(sorted.into_iter().map(|(element, count)| (element.clone(), count)).collect())
    }

    /// Running totals over [`sorted_by_count`](Self::sorted_by_count).
    pub fn cumulative_counts(&self) -> Vec<(&T, Count)> {
        let mut total: Count = 0;
        self.sorted_by_count()
            .into_iter()
            .map(|(element, count)| {
                total = count.saturating_add(total);
                (element, total)
            })
            .collect()
    }

    // Algebra

    pub fn sum<R: ToCounts<T> + ?Sized>(&self, other: &R) -> Result<Bag<T>, BagError> {
        let other = other.coerce()?;
        Ok(self.sum_bag(&other))
    }

    pub fn intersect<R: ToCounts<T> + ?Sized>(&self, other: &R) -> Result<Bag<T>, BagError> {
        let other = other.coerce()?;
        Ok(self.intersect_bag(&other))
    }

    pub fn difference<R: ToCounts<T> + ?Sized>(&self, other: &R) -> Result<Bag<T>, BagError> {
        let other = other.coerce()?;
        Ok(self.difference_bag(&other))
    }

    fn sum_bag(&self, other: &Bag<T>) -> Bag<T> {
        let mut result = self.clone();
        for (element, &count) in &other.contents {
            result.adjust(element.clone(), count);
        }
        debug!(
            "sum of {} and {} distinct elements -> {}",
            self.uniq_size(),
            other.uniq_size(),
            result.uniq_size()
        );
        result
    }

    fn intersect_bag(&self, other: &Bag<T>) -> Bag<T> {
        let mut result = Bag::new();
        for (element, &count) in &self.contents {
            let other_count = other.occurrences_of(element);
            if other_count > 0 {
                result.adjust(element.clone(), count.min(other_count));
            }
        }
        debug!(
            "intersection of {} and {} distinct elements -> {}",
            self.uniq_size(),
            other.uniq_size(),
            result.uniq_size()
        );
        result
    }

    fn difference_bag(&self, other: &Bag<T>) -> Bag<T> {
        let mut result = Bag::new();
        for (element, &count) in &self.contents {
            result.adjust(element.clone(), count - other.occurrences_of(element));
        }
        debug!(
            "difference of {} and {} distinct elements -> {}",
            self.uniq_size(),
            other.uniq_size(),
            result.uniq_size()
        );
        result
    }

    // Sampling

    /// One element, each occurrence being equally likely.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        let target = rng.gen_range(0..self.size());
        let mut running: Count = 0;
        self.contents
            .iter()
            .find(|(_, count)| {
                running = count.saturating_add(running);
                target < running
            })
            .map(|(element, _)| element)
    }

    /// `n` independent draws, with replacement. An empty bag yields nothing
    /// for any `n`.
    pub fn sample_n<R: Rng + ?Sized>(&self, n: i64, rng: &mut R) -> Result<Vec<&T>, BagError> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        if n < 0 {
            return Err(BagError::InvalidArgument { reason: "negative array size" });
        }
        debug!("drawing {} samples from {} occurrences", n, self.size());
        Ok((0..n).filter_map(|_| self.sample(&mut *rng)).collect())
    }

    // Order

    /// Bags order by size, then by number of distinct elements, then by their
    /// sorted contents. `None` when the contents have to be compared but the
    /// elements are not mutually orderable.
    pub fn compare(&self, other: &Bag<T>) -> Option<Ordering> {
        match self.size().cmp(&other.size()) {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        match self.uniq_size().cmp(&other.uniq_size()) {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        let by_element = |a: &&T, b: &&T| T::try_cmp(*a, *b);
        let mine = try_sort_by(self.iter().collect(), &by_element)?;
        let theirs = try_sort_by(other.iter().collect(), &by_element)?;
        try_cmp_seq(mine.iter().copied(), theirs.iter().copied())
    }
}

impl<T: Element> PartialEq for Bag<T> {
    fn eq(&self, other: &Self) -> bool {
        self.contents == other.contents
    }
}

impl<T: Element> Eq for Bag<T> {}

impl<T: Element> PartialOrd for Bag<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl<'a, T: Element> std::ops::Add<&'a Bag<T>> for &'a Bag<T> {
    type Output = Bag<T>;

    fn add(self, other: &'a Bag<T>) -> Bag<T> {
        self.sum_bag(other)
    }
}

impl<'a, T: Element> std::ops::BitAnd<&'a Bag<T>> for &'a Bag<T> {
    type Output = Bag<T>;

    fn bitand(self, other: &'a Bag<T>) -> Bag<T> {
        self.intersect_bag(other)
    }
}

impl<'a, T: Element> std::ops::Sub<&'a Bag<T>> for &'a Bag<T> {
    type Output = Bag<T>;

    fn sub(self, other: &'a Bag<T>) -> Bag<T> {
        self.difference_bag(other)
    }
}

pub struct Iter<'a, T> {
    entries: indexmap::map::Iter<'a, T, Count>,
    current: Option<&'a T>,
    remaining: Count,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter { entries: self.entries.clone(), current: self.current, remaining: self.remaining }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        while self.remaining == 0 {
            let (element, &count) = self.entries.next()?;
            self.current = Some(element);
            self.remaining = count;
        }
        self.remaining -= 1;
        self.current
    }
}

impl<'a, T: Element> IntoIterator for &'a Bag<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
