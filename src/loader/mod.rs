//! Populate typed records from a parsed [`Conf`].
//!
//! Each record type describes its fields once in a [`Schema`]; [`load`]
//! walks that schema, maps every field name to a config key, coerces the
//! value to the field's declared kind, and assigns it. Nested records are
//! filled from the section named after the field.
//!
//! ```
//! use sectconf::{record, Conf};
//!
//! #[derive(Debug, Default)]
//! struct Limits {
//!     max_conns: u32,
//! }
//!
//! #[derive(Debug, Default)]
//! struct Settings {
//!     name: String,
//!     ports: Vec<u16>,
//!     limits: Limits,
//! }
//!
//! record!(Limits { field "MaxConns" => max_conns });
//! record!(Settings {
//!     field "Name" => name,
//!     field "Ports" => ports,
//!     section "Limits" => limits,
//! });
//!
//! let mut conf: Conf = "name: api\n[@ports@,]: 80, 443\n[limits]\nmax_conns: 64"
//!     .parse()
//!     .unwrap();
//! let settings: Settings = sectconf::load_new(&mut conf).unwrap();
//! assert_eq!(settings.ports, vec![80, 443]);
//! assert_eq!(settings.limits.max_conns, 64);
//! ```

mod naming;
mod schema;
mod value;

use std::path::Path;

use tracing::{debug, trace};

use crate::conf::Conf;
use crate::error::{Result, SchemaError, TypeError};

pub use naming::{candidates, resolve, snake_case};
pub use schema::{Field, Schema, SchemaBuilder};
pub use value::{FieldKind, FieldType, Value};

use schema::Assign;

/// A type whose fields can be populated by [`load`].
///
/// Implement it with [`record!`](crate::record), or by hand with
/// [`Schema::builder`] when a field needs [`SchemaBuilder::read_only`] or
/// [`SchemaBuilder::unsupported`].
pub trait Record: Sized + 'static {
    /// Field descriptors, built on first use and cached.
    fn schema() -> &'static Schema<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Global,
    Nested,
}

/// Copy values from `conf` into `target`.
///
/// Fields the config does not mention keep their current value. The first
/// failure stops the load; fields assigned before it stay assigned.
pub fn load<T: Record>(target: &mut T, conf: &mut Conf) -> Result<()> {
    conf.set_global_section();
    load_fields(target, conf, Scope::Global)
}

/// Parse the file at `path` and load it into `target`.
pub fn load_file<T: Record>(target: &mut T, path: impl AsRef<Path>) -> Result<()> {
    let mut conf = Conf::from_file(path)?;
    load(target, &mut conf)
}

/// Load into a fresh `T::default()`, so anything the config leaves out
/// keeps its default.
pub fn load_new<T: Record + Default>(conf: &mut Conf) -> Result<T> {
    let mut target = T::default();
    load(&mut target, conf)?;
    Ok(target)
}

pub(crate) fn load_section<T: Record>(target: &mut T, conf: &mut Conf) -> Result<()> {
    load_fields(target, conf, Scope::Nested)
}

fn load_fields<T: Record>(target: &mut T, conf: &mut Conf, scope: Scope) -> Result<()> {
    for field in T::schema().fields() {
        load_field(target, field, conf, scope)?;
    }
    Ok(())
}

fn load_field<T>(target: &mut T, field: &Field<T>, conf: &mut Conf, scope: Scope) -> Result<()> {
    if field.kind() == FieldKind::ReadOnly {
        return Err(SchemaError::ReadOnlyField {
            field: field.name().to_string(),
        }
        .into());
    }

    let Some(key) = resolve(field.name(), conf) else {
        trace!(
            event = "sectconf.loader.field_absent",
            field = field.name(),
            section = conf.current_section()
        );
        return Ok(());
    };

    debug!(
        event = "sectconf.loader.field_resolved",
        field = field.name(),
        key = %key,
        kind = ?field.kind()
    );

    match &field.assign {
        Assign::Section(assign) => {
            if scope == Scope::Nested {
                return Err(unsupported(field));
            }
            conf.section(&key)?;
            let result = assign(target, conf);
            conf.set_global_section();
            result
        }
        Assign::Value(assign) => {
            let value = match field.kind() {
                FieldKind::Integer => Value::Int(conf.get_int(&key)?),
                FieldKind::Float => Value::Float(conf.get_float(&key)?),
                FieldKind::String => Value::String(conf.get_string(&key)?),
                FieldKind::IntegerSlice => Value::IntArray(conf.get_int_array(&key)?),
                FieldKind::FloatSlice => Value::FloatArray(conf.get_float_array(&key)?),
                FieldKind::StringSlice => Value::StringArray(conf.get_string_array(&key)?),
                _ => return Err(unsupported(field)),
            };
            assign(target, value)
        }
        Assign::Never => Err(unsupported(field)),
    }
}

fn unsupported<T>(field: &Field<T>) -> crate::error::ConfError {
    TypeError::Unsupported {
        field: field.name().to_string(),
        type_name: field.type_name(),
    }
    .into()
}
