//! Counted multisets ("bags").
//!
//! A [`Bag`] stores each distinct element once together with a positive
//! occurrence count. Bags combine with each other, or with anything that
//! implements [`ToCounts`], through sum, intersection and difference; they
//! sample elements proportionally to their counts using a caller-supplied
//! random source; and they form a partial order.
//!
//! ```
//! use multibag::Bag;
//!
//! let a = Bag::from_elements(["will", "power", "power", "X"]).unwrap();
//! let b = Bag::from_elements(["power", "X", "X", "eternal"]).unwrap();
//! let sum = a.sum(&b).unwrap();
//! assert_eq!(sum.size(), 8);
//! assert_eq!(sum.count("power"), 3);
//! ```
pub mod bag;
pub mod counts;
pub mod element;
pub mod error;
mod log;
pub mod render;

pub use bag::{Bag, Count, Iter};
pub use counts::ToCounts;
pub use element::{Element, Value};
pub use error::BagError;
