//! Reader for the legacy plist emitter dialect.
//!
//! Emitter definitions ship as an XML property list: a `plist` root holding a
//! single `dict`, whose children alternate between `key` elements and typed
//! value elements (`integer`, `real`, or anything else treated as a string).
//! This module reads exactly that shape into a flat [`ParamTable`]; it is a
//! dialect reader, not a general XML parser.
//!
//! Structural mismatches (wrong root, a non-`dict` first child, a value
//! without a preceding key) reject the document with
//! [`LoadError::MalformedFile`] before any field mapping is attempted.
//!
//! # Example
//!
//! ```ignore
//! let table = plist::parse(r#"
//!     <plist version="1.0"><dict>
//!         <key>maxParticles</key><integer>64</integer>
//!         <key>speed</key><real>100.0</real>
//!     </dict></plist>
//! "#)?;
//! assert_eq!(table.require_i32("maxParticles")?, 64);
//! ```

use crate::error::LoadError;
use crate::params::{ParamTable, Value};

/// Parse a plist document into a flat parameter table.
pub fn parse(source: &str) -> Result<ParamTable, LoadError> {
    let mut scanner = Scanner::new(source);

    match scanner.next_tag()? {
        Tag::Open(name) if name == "plist" => {}
        _ => return Err(malformed("root element is not plist")),
    }
    match scanner.next_tag()? {
        Tag::Open(name) if name == "dict" => {}
        _ => return Err(malformed("plist does not contain a dict")),
    }

    let mut table = ParamTable::new();
    loop {
        let tag = scanner.next_tag()?;
        let key = match tag {
            Tag::Close(name) if name == "dict" => break,
            Tag::Open(name) if name == "key" => scanner.read_text("key")?,
            _ => return Err(malformed("expected key element in dict")),
        };

        let (kind, raw) = match scanner.next_tag()? {
            Tag::Open(name) => {
                let text = scanner.read_text(&name)?;
                (name, text)
            }
            Tag::SelfClose(name) => (name, String::new()),
            Tag::Close(_) => return Err(malformed(&format!("key {} has no value", key))),
        };

        let value = match kind.as_str() {
            "integer" => Value::Int(
                raw.trim()
                    .parse()
                    .map_err(|_| malformed(&format!("key {} has a bad integer", key)))?,
            ),
            "real" => Value::Float(
                raw.trim()
                    .parse()
                    .map_err(|_| malformed(&format!("key {} has a bad real", key)))?,
            ),
            _ => Value::Str(raw),
        };
        table.insert(key, value);
    }

    Ok(table)
}

fn malformed(msg: &str) -> LoadError {
    LoadError::MalformedFile(msg.to_string())
}

/// An element boundary in the document.
enum Tag {
    Open(String),
    Close(String),
    SelfClose(String),
}

/// Cursor-based scanner over the document text.
struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self { rest: source }
    }

    /// Advance past whitespace, the XML declaration, doctype and comments.
    fn skip_misc(&mut self) {
        loop {
            self.rest = self.rest.trim_start();
            if let Some(after) = self.rest.strip_prefix("<?") {
                self.rest = after.split_once("?>").map_or("", |(_, r)| r);
            } else if let Some(after) = self.rest.strip_prefix("<!--") {
                self.rest = after.split_once("-->").map_or("", |(_, r)| r);
            } else if let Some(after) = self.rest.strip_prefix("<!") {
                self.rest = after.split_once('>').map_or("", |(_, r)| r);
            } else {
                return;
            }
        }
    }

    /// Read the next element boundary.
    fn next_tag(&mut self) -> Result<Tag, LoadError> {
        self.skip_misc();
        let after = self
            .rest
            .strip_prefix('<')
            .ok_or_else(|| malformed("expected an element"))?;
        let (inner, rest) = after
            .split_once('>')
            .ok_or_else(|| malformed("unterminated element"))?;
        self.rest = rest;

        if let Some(name) = inner.strip_prefix('/') {
            return Ok(Tag::Close(name.trim().to_string()));
        }
        let (inner, self_closing) = match inner.strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (inner, false),
        };
        // Attributes (e.g. plist version="1.0") are carried but never used.
        let name = inner
            .split_whitespace()
            .next()
            .ok_or_else(|| malformed("element has no name"))?
            .to_string();
        if self_closing {
            Ok(Tag::SelfClose(name))
        } else {
            Ok(Tag::Open(name))
        }
    }

    /// Read text content up to the matching close tag, consuming it.
    fn read_text(&mut self, name: &str) -> Result<String, LoadError> {
        let close = format!("</{}>", name);
        let (text, rest) = self
            .rest
            .split_once(close.as_str())
            .ok_or_else(|| malformed(&format!("unterminated {} element", name)))?;
        self.rest = rest;
        Ok(unescape(text))
    }
}

/// Resolve the predefined XML entities.
fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let table = parse(
            r#"<?xml version="1.0"?>
            <plist version="1.0">
              <dict>
                <key>maxParticles</key><integer>64</integer>
                <key>speed</key><real>100.5</real>
                <key>textureFileName</key><string>fire.png</string>
              </dict>
            </plist>"#,
        )
        .unwrap();

        assert_eq!(table.require_i32("maxParticles").unwrap(), 64);
        assert_eq!(table.require_f32("speed").unwrap(), 100.5);
        assert_eq!(table.require_str("textureFileName").unwrap(), "fire.png");
    }

    #[test]
    fn test_non_plist_root_is_rejected() {
        assert!(matches!(
            parse("<dict></dict>"),
            Err(LoadError::MalformedFile(_))
        ));
    }

    #[test]
    fn test_missing_dict_is_rejected() {
        assert!(matches!(
            parse("<plist><array></array></plist>"),
            Err(LoadError::MalformedFile(_))
        ));
    }

    #[test]
    fn test_value_without_key_is_rejected() {
        let doc = "<plist><dict><integer>3</integer></dict></plist>";
        assert!(matches!(parse(doc), Err(LoadError::MalformedFile(_))));
    }

    #[test]
    fn test_key_without_value_is_rejected() {
        let doc = "<plist><dict><key>speed</key></dict></plist>";
        assert!(matches!(parse(doc), Err(LoadError::MalformedFile(_))));
    }

    #[test]
    fn test_bad_number_is_rejected() {
        let doc = "<plist><dict><key>speed</key><real>fast</real></dict></plist>";
        assert!(matches!(parse(doc), Err(LoadError::MalformedFile(_))));
    }

    #[test]
    fn test_entities_in_strings() {
        let doc =
            "<plist><dict><key>textureFileName</key><string>a&amp;b.png</string></dict></plist>";
        let table = parse(doc).unwrap();
        assert_eq!(table.require_str("textureFileName").unwrap(), "a&b.png");
    }
}
