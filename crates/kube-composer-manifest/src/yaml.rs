//! Order-preserving YAML emitter for Kubernetes object graphs.
//!
//! Output layout is fixed: two spaces per nesting level, sequence items of
//! mappings start with a lone dash and continue on the next line, one level
//! deeper:
//! ```yaml
//! containers:
//!   -
//!     name: web
//!     args:
//!       - --verbose
//! ```
//! Keys are written in the order of the source mapping, `null` values are
//! skipped together with their key.

use std::borrow::Cow;

use serde_json::Value;
use tracing::instrument;

use crate::error::{ManifestError, Result};

/// How string scalars are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScalarStyle {
	/// Strings are written verbatim, never quoted or escaped.
	///
	/// Values containing `: `, ` #`, leading indicators or line breaks will
	/// not read back as the same string.
	#[default]
	Plain,
	/// Strings that would not read back verbatim are written double-quoted,
	/// empty mappings are written as `{}`.
	Quoted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YamlFormat {
	pub scalars: ScalarStyle,
}

impl YamlFormat {
	pub const PLAIN: Self = Self {
		scalars: ScalarStyle::Plain,
	};
	pub const QUOTED: Self = Self {
		scalars: ScalarStyle::Quoted,
	};

	fn quoted(self) -> bool {
		self.scalars == ScalarStyle::Quoted
	}

	/// Render a single document, whose root must be a mapping.
	#[instrument(level = "trace", skip_all)]
	pub fn render(self, value: &Value) -> Result<String> {
		let mut buf = String::new();
		self.render_buf(value, &mut buf)?;
		Ok(buf)
	}

	pub fn render_buf(self, value: &Value, buf: &mut String) -> Result<()> {
		let entries = entries(value).ok_or(ManifestError::NotAMapping(kind_name(value)))?;
		self.mapping(entries, 0, buf, &mut String::new())
	}

	fn mapping<'v>(
		self,
		entries: impl Iterator<Item = (Cow<'v, str>, &'v Value)>,
		indent: usize,
		buf: &mut String,
		path: &mut String,
	) -> Result<()> {
		let spaces = "  ".repeat(indent);
		for (key, value) in entries {
			if value.is_null() {
				continue;
			}
			let path_len = path.len();
			if !path.is_empty() {
				path.push('.');
			}
			path.push_str(&key);

			buf.push_str(&spaces);
			self.scalar_str(&key, buf);
			buf.push(':');
			match value {
				Value::Object(map) if map.is_empty() => {
					buf.push_str(if self.quoted() { " {}\n" } else { "\n" });
				}
				Value::Object(_) => {
					buf.push('\n');
					self.mapping(entries_of(value), indent + 1, buf, path)?;
				}
				Value::Array(items) if items.is_empty() => buf.push_str(" []\n"),
				Value::Array(items) => {
					buf.push('\n');
					for (i, item) in items.iter().enumerate() {
						let item_len = path.len();
						path.push_str(&format!("[{i}]"));
						self.sequence_item(item, indent, &spaces, buf, path)?;
						path.truncate(item_len);
					}
				}
				scalar => {
					buf.push(' ');
					self.scalar(scalar, buf);
					buf.push('\n');
				}
			}
			path.truncate(path_len);
		}
		Ok(())
	}

	fn sequence_item(
		self,
		item: &Value,
		indent: usize,
		spaces: &str,
		buf: &mut String,
		path: &mut String,
	) -> Result<()> {
		buf.push_str(spaces);
		buf.push_str("  -");
		match item {
			Value::Null => return Err(ManifestError::NullElement(path.clone())),
			Value::Object(map) if map.is_empty() && self.quoted() => buf.push_str(" {}\n"),
			Value::Array(items) if items.is_empty() && self.quoted() => buf.push_str(" []\n"),
			Value::Object(_) | Value::Array(_) => {
				buf.push('\n');
				self.mapping(entries_of(item), indent + 2, buf, path)?;
			}
			scalar => {
				buf.push(' ');
				self.scalar(scalar, buf);
				buf.push('\n');
			}
		}
		Ok(())
	}

	fn scalar(self, value: &Value, buf: &mut String) {
		match value {
			Value::String(s) => self.scalar_str(s, buf),
			Value::Bool(b) => buf.push_str(if *b { "true" } else { "false" }),
			Value::Number(n) => buf.push_str(&n.to_string()),
			// Containers and nulls are laid out by the caller
			Value::Null | Value::Array(_) | Value::Object(_) => {}
		}
	}

	fn scalar_str(self, s: &str, buf: &mut String) {
		if self.quoted() && yaml_needs_quotes(s) {
			escape_string_json_buf(s, buf);
		} else {
			buf.push_str(s);
		}
	}
}

/// Render a document with the default, unquoted style.
pub fn to_yaml(value: &Value) -> Result<String> {
	YamlFormat::PLAIN.render(value)
}

/// Key/value pairs of a container value.
///
/// Sequences enumerate as a mapping keyed by their indices, as happens when a
/// sequence appears directly inside another one.
fn entries(value: &Value) -> Option<Box<dyn Iterator<Item = (Cow<'_, str>, &Value)> + '_>> {
	match value {
		Value::Object(map) => Some(Box::new(
			map.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), v)),
		)),
		Value::Array(items) => Some(Box::new(
			items
				.iter()
				.enumerate()
				.map(|(i, v)| (Cow::Owned(i.to_string()), v)),
		)),
		_ => None,
	}
}

fn entries_of(value: &Value) -> Box<dyn Iterator<Item = (Cow<'_, str>, &Value)> + '_> {
	entries(value).unwrap_or_else(|| Box::new(std::iter::empty()))
}

fn kind_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "a sequence",
		Value::Object(_) => "a mapping",
	}
}

fn escape_string_json_buf(s: &str, buf: &mut String) {
	buf.push('"');
	for c in s.chars() {
		match c {
			'"' => buf.push_str("\\\""),
			'\\' => buf.push_str("\\\\"),
			'\n' => buf.push_str("\\n"),
			'\r' => buf.push_str("\\r"),
			'\t' => buf.push_str("\\t"),
			c if c.is_control() => buf.push_str(&format!("\\u{:04x}", c as u32)),
			c => buf.push(c),
		}
	}
	buf.push('"');
}

/// From <https://github.com/chyh1990/yaml-rust/blob/da52a68615f2ecdd6b7e4567019f280c433c1521/src/emitter.rs#L289>
/// With added date check
fn yaml_needs_quotes(string: &str) -> bool {
	fn need_quotes_spaces(string: &str) -> bool {
		string.starts_with(' ') || string.ends_with(' ')
	}

	string.is_empty()
		|| need_quotes_spaces(string)
		|| string.starts_with(|c| matches!(c, '&' | '*' | '?' | '|' | '-' | '<' | '>' | '=' | '!' | '%' | '@'))
		|| string.contains(|c| matches!(c, ':' | '{' | '}' | '[' | ']' | ',' | '#' | '`' | '\"' | '\'' | '\\' | '\0'..='\x06' | '\t' | '\n' | '\r' | '\x0e'..='\x1a' | '\x1c'..='\x1f'))
		|| [
			// http://yaml.org/type/bool.html
			"yes", "Yes", "YES", "no", "No", "NO", "True", "TRUE", "true", "False", "FALSE", "false",
			"on", "On", "ON", "off", "Off", "OFF", // http://yaml.org/type/null.html
			"null", "Null", "NULL", "~",
			"y", "Y", "n", "N",
			"-.inf", "+.inf", ".inf",
			"-", "---", ""
		].contains(&string)
		|| (string.chars().all(|c| matches!(c, '0'..='9' | '-'))
			&& string.chars().filter(|c| *c == '-').count() == 2)
		|| string.starts_with('.')
		|| string.starts_with("0x")
		|| string.parse::<i64>().is_ok()
		|| string.parse::<f64>().is_ok()
}
