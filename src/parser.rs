//! Line-oriented parser for the sectioned key/value format
//!
//! ```text
//! # comment
//! StringItem: value
//! [@IntArray]: 10 12 13
//! [@FloatArray@,]: 1.5, 2.5
//!
//! [Section1]
//! IntVal: 100
//! ```
//!
//! The input is read one line at a time and each line is classified once:
//! blank, comment, section header, or `key: value`. A failure stops the
//! parse at that line.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::conf::Conf;
use crate::error::{ConfError, Result, SyntaxError};
use crate::item::{Item, SPACE_CHARS};
use crate::key::{self, KeyShape};
use crate::options::{ParseOptions, KV_SEPARATOR};

enum Source {
    Path(PathBuf),
    Text(String),
    Reader(Box<dyn Read>),
}

/// Builds a [`Conf`] from a file, a string, or any reader.
pub struct Parser {
    source: Source,
    options: ParseOptions,
}

impl Parser {
    /// Parse the file at `path`. The file is opened by [`Parser::parse`].
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::with_source(Source::Path(path.as_ref().to_path_buf()))
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::with_source(Source::Text(text.into()))
    }

    pub fn from_reader(reader: impl Read + 'static) -> Self {
        Self::with_source(Source::Reader(Box::new(reader)))
    }

    fn with_source(source: Source) -> Self {
        Self {
            source,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the parse to completion.
    ///
    /// Nothing is returned on failure; a half-built configuration is never
    /// handed to the caller.
    pub fn parse(self) -> Result<Conf> {
        self.options.validate()?;

        match self.source {
            Source::Path(path) => {
                let label = path.display().to_string();
                let file = File::open(&path).map_err(|e| ConfError::io(label.clone(), e))?;
                run(BufReader::new(file), &label, &self.options)
            }
            Source::Text(text) => run(text.as_bytes(), "<text>", &self.options),
            Source::Reader(reader) => run(BufReader::new(reader), "<reader>", &self.options),
        }
    }
}

/// Parser states. Each line walks `Start → ReadingKey → ReadingValue →
/// HavePair → Start` unless it is skipped or declares a section.
enum State {
    Start,
    ReadingKey { line: usize, text: String },
    ReadingValue { line: usize, key: String, rest: String },
    HavePair { line: usize, raw_key: String, value: String },
    Done,
}

struct Lines<R: BufRead> {
    inner: std::io::Lines<R>,
    number: usize,
}

impl<R: BufRead> Lines<R> {
    fn next(&mut self, label: &str) -> Result<Option<(usize, String)>> {
        match self.inner.next() {
            None => Ok(None),
            Some(Err(e)) => Err(ConfError::io(label, e)),
            Some(Ok(text)) => {
                self.number += 1;
                Ok(Some((self.number, text)))
            }
        }
    }

    /// Whether nothing but blank and comment lines remain. Consumes the
    /// rest of the input; an unreadable line counts as content.
    fn only_trivia_left(&mut self, comment: char) -> bool {
        self.inner.by_ref().all(|text| {
            text.is_ok_and(|text| {
                let text = text.trim_matches(SPACE_CHARS);
                text.is_empty() || text.starts_with(comment)
            })
        })
    }
}

fn run<R: BufRead>(reader: R, label: &str, options: &ParseOptions) -> Result<Conf> {
    let mut conf = Conf::new();
    let mut lines = Lines {
        inner: reader.lines(),
        number: 0,
    };
    let separator = options.separator_byte();
    let mut item_count = 0usize;
    let mut state = State::Start;

    debug!(event = "sectconf.parser.started", source = label);

    loop {
        state = match state {
            State::Start => match lines.next(label)? {
                None => State::Done,
                Some((line, text)) => {
                    let text = text.trim_matches(SPACE_CHARS);
                    if text.is_empty() || text.starts_with(options.comment) {
                        State::Start
                    } else if is_section_header(text) {
                        declare_section(&mut conf, text, line)?;
                        State::Start
                    } else {
                        State::ReadingKey {
                            line,
                            text: text.to_string(),
                        }
                    }
                }
            },

            State::ReadingKey { line, text } => {
                let Some((key, rest)) = text.split_once(KV_SEPARATOR) else {
                    return Err(SyntaxError::MissingSeparator {
                        line,
                        text: text.clone(),
                    }
                    .into());
                };
                let key = key.trim_matches(SPACE_CHARS);
                if key.is_empty() {
                    return Err(SyntaxError::EmptyKey { line }.into());
                }
                State::ReadingValue {
                    line,
                    key: key.to_string(),
                    rest: rest.to_string(),
                }
            }

            State::ReadingValue { line, key, rest } => {
                let value = rest.trim_matches(SPACE_CHARS);
                if value.is_empty() {
                    let err = if lines.only_trivia_left(options.comment) {
                        SyntaxError::DanglingKey { line, key }
                    } else {
                        SyntaxError::EmptyValue { line, key }
                    };
                    return Err(err.into());
                }
                State::HavePair {
                    line,
                    raw_key: key,
                    value: value.to_string(),
                }
            }

            State::HavePair {
                line,
                raw_key,
                value,
            } => {
                if key::classify(&raw_key) == KeyShape::Malformed {
                    return Err(SyntaxError::MalformedKey { line, key: raw_key }.into());
                }
                let item = Item::with_separator(&raw_key, &value, separator);
                trace!(
                    event = "sectconf.parser.item",
                    section = conf.current_section(),
                    key = item.key(),
                    line
                );
                conf.insert(item, line);
                item_count += 1;
                State::Start
            }

            State::Done => break,
        };
    }

    conf.set_global_section();
    debug!(
        event = "sectconf.parser.completed",
        source = label,
        lines = lines.number,
        items = item_count,
        sections = conf.section_names().len()
    );

    Ok(conf)
}

/// `[name]` on its own line. Key/value lines always carry a ':' so a
/// composite key such as `[@k]: v` never reads as a header.
fn is_section_header(text: &str) -> bool {
    text.starts_with('[') && text.ends_with(']') && !text.contains(KV_SEPARATOR)
}

fn declare_section(conf: &mut Conf, text: &str, line: usize) -> Result<()> {
    let name = text[1..text.len() - 1].trim_matches(SPACE_CHARS);
    if name.is_empty() {
        return Err(SyntaxError::EmptySectionName { line }.into());
    }

    conf.declare_section(name, line).map_err(|first| SyntaxError::DuplicateSection {
        line,
        name: name.to_string(),
        first,
    })?;

    debug!(event = "sectconf.parser.section", section = name, line);
    Ok(())
}
