//! INI storage for the AWS `credentials` and `config` files.
//!
//! The dialect is the one the AWS CLI reads:
//! - `[section]` headers, section names are case-sensitive
//! - `key = value` or `key: value` pairs, keys are folded to lowercase
//! - `#` and `;` comment lines and blank lines are dropped
//! - a line indented deeper than its key continues that key's value
//! - text after a header's closing `]` is ignored
//!
//! Files round-trip semantically, not byte for byte. Section order and key
//! order are kept so a rewrite produces a minimal diff.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::SwitchError;
use crate::fs_utils::{StagedWrite, stage_write, write_atomic};

/// Ordered key/value pairs of one section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set a value, keeping the key's position if it already exists
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn append_line(&mut self, key: &str, line: &str) {
        if let Some((_, value)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            value.push('\n');
            value.push_str(line);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Section {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut section = Section::new();
        for (k, v) in iter {
            section.set(k, v);
        }
        section
    }
}

/// An INI file held in memory, sections in definition order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    sections: Vec<(String, Section)>,
}

impl ConfigFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a file
    ///
    /// # Errors
    /// - [`SwitchError::FileNotFound`] if `path` does not exist
    /// - [`SwitchError::Parse`] on malformed content
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SwitchError::FileNotFound(path.to_path_buf()).into());
        }

        let text =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let file = Self::parse(&text, path)?;
        log::debug!(
            "loaded {} section(s) from {}",
            file.sections.len(),
            path.display()
        );
        Ok(file)
    }

    /// Parse INI text; `origin` is only used in error messages
    pub fn parse(text: &str, origin: &Path) -> Result<Self, SwitchError> {
        let mut file = ConfigFile::new();
        let mut current: Option<usize> = None;
        let mut last_key: Option<String> = None;
        // indent of the line that opened the current key or section
        let mut indent_level = 0;

        let parse_err = |line: usize, message: &str| SwitchError::Parse {
            path: origin.to_path_buf(),
            line,
            message: message.to_string(),
        };

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                last_key = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let cur_indent = raw.len() - raw.trim_start().len();
            if cur_indent > indent_level {
                if let (Some(sec), Some(key)) = (current, last_key.as_deref()) {
                    file.sections[sec].1.append_line(key, trimmed);
                    continue;
                }
            }
            indent_level = cur_indent;

            if let Some(header) = section_header(trimmed) {
                let name = header.trim();
                if name.is_empty() {
                    return Err(parse_err(line_no, "empty section name"));
                }
                current = Some(file.section_index_or_insert(name));
                last_key = None;
                continue;
            }

            let Some(sec) = current else {
                return Err(parse_err(line_no, "missing section header"));
            };
            let Some(split) = trimmed.find(['=', ':']) else {
                return Err(parse_err(line_no, "expected `key = value`"));
            };

            let key = trimmed[..split].trim().to_lowercase();
            if key.is_empty() {
                return Err(parse_err(line_no, "empty key"));
            }
            let value = trimmed[split + 1..].trim();

            file.sections[sec].1.set(key.clone(), value);
            last_key = Some(key);
        }

        Ok(file)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Create an empty section if `name` is absent; returns whether it was created
    pub fn ensure_section(&mut self, name: &str) -> bool {
        if self.contains_section(name) {
            return false;
        }
        self.sections.push((name.to_string(), Section::new()));
        true
    }

    /// The named section, created empty if absent
    pub fn entry(&mut self, name: &str) -> &mut Section {
        let idx = self.section_index_or_insert(name);
        &mut self.sections[idx].1
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> + Clone {
        self.sections.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> + Clone {
        self.sections.iter().map(|(n, _)| n.as_str())
    }

    /// Serialize into a temporary file beside `path`; commit to replace `path`
    pub fn stage(&self, path: &Path) -> Result<StagedWrite> {
        stage_write(path, &self.to_string())
    }

    /// Atomically replace `path` with this file's contents
    pub fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, &self.to_string())
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.sections.push((name.to_string(), Section::new()));
                self.sections.len() - 1
            }
        }
    }
}

/// Name between `[` and the last `]`; anything after it is ignored
fn section_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let close = rest.rfind(']')?;
    Some(&rest[..close])
}

impl fmt::Display for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, section) in &self.sections {
            writeln!(f, "[{}]", name)?;
            for (key, value) in section.iter() {
                writeln!(f, "{} = {}", key, value.replace('\n', "\n\t"))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
