//! Sectioned key/value configuration files.
//!
//! ```text
//! StringItem: value
//! IntItem: 1000
//! [@IntArray]: 10 12 13
//! [@IntArray1@,]: 1, 2, 3, 4, 5
//!
//! [Section1]
//! IntVal: 100
//! ```
//!
//! A key written `[@name]` is an array split on spaces; `[@name@,]` picks
//! the separator. [`Parser`] reads a file into a [`Conf`], whose typed
//! getters coerce values on demand. [`load`] copies a `Conf` into any type
//! implementing [`Record`].

mod conf;
mod error;
mod item;
pub mod key;
pub mod loader;
mod macros;
mod options;
mod panicking;
mod parser;

pub use conf::{Conf, Section, GLOBAL_SECTION};
pub use error::{ConfError, LookupError, Result, SchemaError, SyntaxError, TypeError};
pub use item::{Item, DEFAULT_SEPARATOR};
pub use loader::{
    load, load_file, load_new, Field, FieldKind, FieldType, Record, Schema, SchemaBuilder, Value,
};
pub use options::{ParseOptions, DEFAULT_COMMENT, KV_SEPARATOR};
pub use panicking::{load_file_or_panic, load_new_or_panic, load_or_panic};
pub use parser::Parser;
