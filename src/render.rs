//! Text forms of a bag, built only from its `(element, count)` pairs.
//!
//! The inspect form is one line, `#<Bag: {"abyss" => 2, "soul" => 1}>`.
//! The pretty form drops the braces and, once it no longer fits the requested
//! width, puts every entry on a line of its own:
//!
//! ```text
//! #<Bag
//!  "transvaluation" => 2,
//!  "perspectivism" => 1>
//! ```

use std::fmt;

use crate::bag::{Bag, Count};
use crate::element::Element;

fn entry<T: Element>(element: &T, count: Count) -> String {
    match element.symbol_name() {
        Some(name) => format!("{name}: {count}"),
        None => format!("{element:?} => {count}"),
    }
}

fn entries<T: Element>(bag: &Bag<T>) -> Vec<String> {
    bag.iter_with_count().map(|(element, count)| entry(element, count)).collect()
}

pub fn inspect<T: Element>(bag: &Bag<T>) -> String {
    format!("#<Bag: {{{}}}>", entries(bag).join(", "))
}

pub fn pretty<T: Element>(bag: &Bag<T>, width: usize) -> String {
    let entries = entries(bag);
    let flat: String = format!("#<Bag {}>", entries.join(", "));
    if entries.is_empty() {
        "#<Bag>".to_owned()
    } else if flat.chars().count() <= width {
        flat
    } else {
        format!("#<Bag\n {}>", entries.join(",\n "))
    }
}

impl<T: Element> fmt::Display for Bag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&inspect(self))
    }
}

impl<T: Element> fmt::Debug for Bag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&inspect(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Value;

    fn words(list: &[&'static str]) -> Bag<&'static str> {
        Bag::from_elements(list.iter().copied()).unwrap()
    }

    #[test]
    fn inspect_format() {
        let bag = words(&["abyss", "abyss", "soul"]);
        assert_eq!(inspect(&bag), "#<Bag: {\"abyss\" => 2, \"soul\" => 1}>");
        assert_eq!(bag.to_string(), format!("{bag:?}"));
        assert_eq!(inspect(&Bag::<&str>::new()), "#<Bag: {}>");
    }

    #[test]
    fn pretty_empty() {
        assert_eq!(pretty(&Bag::<&str>::new(), 79), "#<Bag>");
    }

    #[test]
    fn pretty_on_one_line() {
        assert_eq!(pretty(&words(&["abyss", "abyss", "abyss"]), 79), "#<Bag \"abyss\" => 3>");
        let out = pretty(&words(&["eternal", "eternal", "chaos"]), 79);
        assert!(out.contains("\"eternal\" => 2"));
        assert!(out.contains("\"chaos\" => 1"));
    }

    #[test]
    fn pretty_breaks_lines() {
        let out = pretty(&words(&["transvaluation", "transvaluation", "perspectivism"]), 30);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines, vec!["#<Bag", " \"transvaluation\" => 2,", " \"perspectivism\" => 1>"]);
    }

    #[test]
    fn pretty_large_bag() {
        let letters: Vec<String> = ('a'..='z').map(String::from).collect();
        let bag = Bag::from_elements(letters.iter().chain(&letters).cloned()).unwrap();
        let out = pretty(&bag, 40);
        assert!(out.lines().count() > 10);
        assert!(out.starts_with("#<Bag"));
        assert!(out.contains("\"z\" => 2"));
    }

    #[test]
    fn pretty_keeps_enumeration_order() {
        let out = pretty(&words(&["circumference", "slant", "diadem"]), 79);
        let first = out.find("circumference").unwrap();
        let second = out.find("slant").unwrap();
        let third = out.find("diadem").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn symbols_integers_and_nesting() {
        let symbols = Bag::from_elements(vec![
            Value::sym("dionysian"),
            Value::sym("dionysian"),
            Value::sym("apollonian"),
        ])
        .unwrap();
        assert_eq!(pretty(&symbols, 79), "#<Bag dionysian: 2, apollonian: 1>");

        let ints = Bag::from_elements([1, 1, 1, 2, 3]).unwrap();
        assert_eq!(pretty(&ints, 79), "#<Bag 1 => 3, 2 => 1, 3 => 1>");

        let nested = Bag::from_elements(vec![
            Value::Map(vec![(Value::sym("nihil"), 1)]),
            Value::Map(vec![(Value::sym("nihil"), 1)]),
            Value::List(vec![Value::from("untergang")]),
        ])
        .unwrap();
        assert_eq!(inspect(&nested), "#<Bag: {{nihil: 1} => 2, [\"untergang\"] => 1}>");
    }
}
