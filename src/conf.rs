//! Section store and lookup API

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use tracing::warn;

use crate::error::{ConfError, LookupError, Result};
use crate::item::Item;
use crate::parser::Parser;

/// Name of the reserved section holding entries declared before any header
pub const GLOBAL_SECTION: &str = "__global__";

/// A named group of items.
#[derive(Debug, Clone, Default)]
pub struct Section {
    name: String,
    line: usize,
    items: HashMap<String, Item>,
    item_lines: HashMap<String, usize>,
}

impl Section {
    pub(crate) fn new(name: &str, line: usize) -> Self {
        Self {
            name: name.to_string(),
            line,
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Line of the header that declared this section (0 for global)
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Item> {
        self.items.get(key)
    }

    /// Insert an item read from `line`. A repeated key replaces the earlier
    /// item.
    pub(crate) fn insert(&mut self, item: Item, line: usize) {
        let key = item.key().to_string();
        if let Some(first) = self.item_lines.get(&key) {
            warn!(
                event = "sectconf.conf.duplicate_key",
                section = %self.name,
                key = %key,
                first_line = first,
                line,
                "Key repeated in section, later value wins"
            );
        } else {
            self.item_lines.insert(key.clone(), line);
        }
        self.items.insert(key, item);
    }
}

/// Parsed configuration: sections of items plus the current-section cursor.
#[derive(Debug, Clone)]
pub struct Conf {
    sections: HashMap<String, Section>,
    current: String,
}

impl Default for Conf {
    fn default() -> Self {
        Self::new()
    }
}

impl Conf {
    /// An empty configuration holding only the global section.
    pub fn new() -> Self {
        let mut sections = HashMap::new();
        sections.insert(GLOBAL_SECTION.to_string(), Section::new(GLOBAL_SECTION, 0));
        Self {
            sections,
            current: GLOBAL_SECTION.to_string(),
        }
    }

    /// Read and parse a config file with default options.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Parser::from_path(path).parse()
    }

    /// Register a new section and make it current.
    ///
    /// Returns the line of the earlier declaration if the name is taken.
    pub(crate) fn declare_section(
        &mut self,
        name: &str,
        line: usize,
    ) -> std::result::Result<(), usize> {
        if let Some(existing) = self.sections.get(name) {
            return Err(existing.line());
        }
        self.sections
            .insert(name.to_string(), Section::new(name, line));
        self.current = name.to_string();
        Ok(())
    }

    /// Store an item in the current section.
    pub(crate) fn insert(&mut self, item: Item, line: usize) {
        // The cursor only ever names a registered section.
        if let Some(section) = self.sections.get_mut(&self.current) {
            section.insert(item, line);
        }
    }

    fn current_section_ref(&self) -> Option<&Section> {
        self.sections.get(&self.current)
    }

    pub fn get_section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// The section the cursor points at.
    pub fn current(&self) -> Option<&Section> {
        self.current_section_ref()
    }

    /// Name of the section lookups currently resolve against
    pub fn current_section(&self) -> &str {
        &self.current
    }

    /// Make `name` the current section.
    pub fn section(&mut self, name: &str) -> Result<()> {
        if !self.sections.contains_key(name) {
            return Err(LookupError::MissingSection {
                name: name.to_string(),
            }
            .into());
        }
        self.current = name.to_string();
        Ok(())
    }

    /// Point the cursor back at the global section.
    pub fn set_global_section(&mut self) {
        self.current = GLOBAL_SECTION.to_string();
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Declared section names in declaration order, global first.
    pub fn section_names(&self) -> Vec<&str> {
        let mut sections: Vec<&Section> = self.sections.values().collect();
        sections.sort_by_key(|s| s.line());
        sections.into_iter().map(Section::name).collect()
    }

    /// Whether the current section holds `key`. Other sections are not
    /// searched.
    pub fn has_item(&self, key: &str) -> bool {
        self.current_section_ref()
            .is_some_and(|section| section.get(key).is_some())
    }

    pub fn get_item(&self, key: &str) -> Result<&Item> {
        self.current_section_ref()
            .and_then(|section| section.get(key))
            .ok_or_else(|| {
                LookupError::MissingKey {
                    key: key.to_string(),
                    section: self.current.clone(),
                }
                .into()
            })
    }

    /// Items of the current section, sorted by key.
    pub fn items(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self
            .current_section_ref()
            .map(|section| section.items.values().collect())
            .unwrap_or_default();
        items.sort_by(|a, b| a.key().cmp(b.key()));
        items
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.get_item(key)?.to_int()
    }

    pub fn get_float(&self, key: &str) -> Result<f64> {
        self.get_item(key)?.to_float()
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        Ok(self.get_item(key)?.to_str().to_string())
    }

    pub fn get_int_array(&self, key: &str) -> Result<Vec<i64>> {
        self.get_item(key)?.to_int_array()
    }

    pub fn get_float_array(&self, key: &str) -> Result<Vec<f64>> {
        self.get_item(key)?.to_float_array()
    }

    pub fn get_string_array(&self, key: &str) -> Result<Vec<String>> {
        self.get_item(key)?.to_string_array()
    }
}

impl FromStr for Conf {
    type Err = ConfError;

    fn from_str(s: &str) -> Result<Self> {
        Parser::from_text(s).parse()
    }
}
