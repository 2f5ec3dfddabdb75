//! Field descriptor tables
//!
//! A [`Schema`] lists the fields of one record type in declaration order:
//! name, declared kind, and how to assign a coerced value. It is built once
//! per type, usually by [`record!`](crate::record), and cached.

use std::any::type_name;
use std::fmt;

use crate::conf::Conf;
use crate::error::Result;

use super::value::{FieldKind, FieldType, Value};
use super::{load_section, Record};

type AssignValue<T> = Box<dyn Fn(&mut T, Value) -> Result<()> + Send + Sync>;
type AssignSection<T> = Box<dyn Fn(&mut T, &mut Conf) -> Result<()> + Send + Sync>;

pub(crate) enum Assign<T> {
    Value(AssignValue<T>),
    Section(AssignSection<T>),
    Never,
}

/// Descriptor of one record field.
pub struct Field<T> {
    name: &'static str,
    kind: FieldKind,
    type_name: &'static str,
    pub(crate) assign: Assign<T>,
}

impl<T> Field<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Rust type of the field, for error messages
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Ordered field descriptors of a record type.
pub struct Schema<T> {
    fields: Vec<Field<T>>,
}

impl<T> Schema<T> {
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder { fields: Vec::new() }
    }

    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field<T>> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

pub struct SchemaBuilder<T> {
    fields: Vec<Field<T>>,
}

impl<T: 'static> SchemaBuilder<T> {
    /// A scalar or slice field, reached through `access`.
    pub fn field<V, F>(mut self, name: &'static str, access: F) -> Self
    where
        V: FieldType + 'static,
        F: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        let assign = move |target: &mut T, value: Value| -> Result<()> {
            *access(target) = V::from_value(value, name)?;
            Ok(())
        };
        self.fields.push(Field {
            name,
            kind: V::KIND,
            type_name: type_name::<V>(),
            assign: Assign::Value(Box::new(assign)),
        });
        self
    }

    /// A nested record filled from the section matching `name`.
    pub fn section<R, F>(mut self, name: &'static str, access: F) -> Self
    where
        R: Record,
        F: Fn(&mut T) -> &mut R + Send + Sync + 'static,
    {
        let assign = move |target: &mut T, conf: &mut Conf| -> Result<()> {
            load_section(access(target), conf)
        };
        self.fields.push(Field {
            name,
            kind: FieldKind::Section,
            type_name: type_name::<R>(),
            assign: Assign::Section(Box::new(assign)),
        });
        self
    }

    /// A field the loader must not write. Loading a record with one fails.
    pub fn read_only(mut self, name: &'static str) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::ReadOnly,
            type_name: "",
            assign: Assign::Never,
        });
        self
    }

    /// A field of type `V` the loader cannot convert to. Loading fails only
    /// if the config actually names it.
    pub fn unsupported<V>(mut self, name: &'static str) -> Self {
        self.fields.push(Field {
            name,
            kind: FieldKind::Unsupported,
            type_name: type_name::<V>(),
            assign: Assign::Never,
        });
        self
    }

    pub fn build(self) -> Schema<T> {
        Schema {
            fields: self.fields,
        }
    }
}
