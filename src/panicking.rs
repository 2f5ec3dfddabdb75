//! Panicking shorthands for callers that treat a bad config as fatal.
//!
//! Every function here forwards to its `Result`-returning counterpart and
//! panics with the error's message on failure: a missing key, a value of
//! the wrong type, or a file that does not parse.

use std::path::Path;

use crate::conf::Conf;
use crate::error::Result;
use crate::item::Item;
use crate::loader::{self, Record};
use crate::parser::Parser;

fn or_panic<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("{e}"),
    }
}

impl Parser {
    /// # Panics
    ///
    /// Panics if the input cannot be read or parsed.
    pub fn parse_or_panic(self) -> Conf {
        or_panic(self.parse())
    }
}

impl Conf {
    pub fn item_or_panic(&self, key: &str) -> &Item {
        or_panic(self.get_item(key))
    }

    pub fn int_or_panic(&self, key: &str) -> i64 {
        or_panic(self.get_int(key))
    }

    pub fn float_or_panic(&self, key: &str) -> f64 {
        or_panic(self.get_float(key))
    }

    pub fn string_or_panic(&self, key: &str) -> String {
        or_panic(self.get_string(key))
    }

    pub fn int_array_or_panic(&self, key: &str) -> Vec<i64> {
        or_panic(self.get_int_array(key))
    }

    pub fn float_array_or_panic(&self, key: &str) -> Vec<f64> {
        or_panic(self.get_float_array(key))
    }

    pub fn string_array_or_panic(&self, key: &str) -> Vec<String> {
        or_panic(self.get_string_array(key))
    }
}

/// [`load`](crate::load), panicking on failure.
pub fn load_or_panic<T: Record>(target: &mut T, conf: &mut Conf) {
    or_panic(loader::load(target, conf))
}

/// [`load_new`](crate::load_new), panicking on failure.
pub fn load_new_or_panic<T: Record + Default>(conf: &mut Conf) -> T {
    or_panic(loader::load_new(conf))
}

/// [`load_file`](crate::load_file), panicking on failure.
pub fn load_file_or_panic<T: Record>(target: &mut T, path: impl AsRef<Path>) {
    or_panic(loader::load_file(target, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Conf {
        Parser::from_text("StringItem: value\nIntItem: 1000\n[@IntArray]: 10 12 13\nFloatItem: 2.5")
            .parse_or_panic()
    }

    #[test]
    fn test_getters_return_values() {
        let conf = sample();
        assert_eq!(conf.string_or_panic("StringItem"), "value");
        assert_eq!(conf.int_or_panic("IntItem"), 1000);
        assert_eq!(conf.float_or_panic("FloatItem"), 2.5);
        assert_eq!(conf.int_array_or_panic("IntArray"), vec![10, 12, 13]);
        assert_eq!(conf.item_or_panic("IntArray").raw_key(), "[@IntArray]");
    }

    #[test]
    #[should_panic(expected = "no key 'Missing'")]
    fn test_missing_key_panics() {
        sample().int_or_panic("Missing");
    }

    #[test]
    #[should_panic(expected = "not an array")]
    fn test_not_array_panics() {
        sample().string_array_or_panic("StringItem");
    }

    #[test]
    #[should_panic(expected = "missing ':' separator")]
    fn test_parse_panics() {
        Parser::from_text("no separator here").parse_or_panic();
    }

    #[derive(Debug, Default)]
    struct Counts {
        int_item: u16,
        float_item: f32,
    }

    crate::record!(Counts {
        field "IntItem" => int_item,
        field "FloatItem" => float_item,
    });

    #[test]
    fn test_load_new_or_panic() {
        let counts: Counts = load_new_or_panic(&mut sample());
        assert_eq!(counts.int_item, 1000);
        assert_eq!(counts.float_item, 2.5);
    }

    #[test]
    #[should_panic(expected = "does not fit in u16")]
    fn test_load_new_or_panic_on_overflow() {
        let mut conf = Parser::from_text("IntItem: 70000").parse_or_panic();
        let _: Counts = load_new_or_panic(&mut conf);
    }

    #[test]
    fn test_panic_can_be_caught() {
        let result = std::panic::catch_unwind(|| sample().float_array_or_panic("StringItem"));
        assert!(result.is_err());
    }
}
