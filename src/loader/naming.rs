//! Field name to config key mapping
//!
//! A field named `AExampleField` is looked up, in order, as
//! `a_example_field`, `aexamplefield` and `AExampleField`.

use crate::conf::Conf;

/// Lower snake case: every ASCII uppercase letter becomes `_` plus its
/// lowercase form, except at the very start.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Lookup names for `name`, highest priority first.
pub fn candidates(name: &str) -> [String; 3] {
    [snake_case(name), name.to_lowercase(), name.to_string()]
}

/// First candidate that names an item of the current section or any
/// declared section.
pub fn resolve(name: &str, conf: &Conf) -> Option<String> {
    candidates(name)
        .into_iter()
        .find(|candidate| conf.has_item(candidate) || conf.has_section(candidate))
}
