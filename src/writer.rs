// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Provides the `StreamWriter` trait, the low-level sink a feed is written to, and
//! `ItemWriter`, its implementation on top of rxml.

use crate::error::{Error, Result};

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rxml::writer::{Encoder, Item, SimpleNamespaces};

use tracing::debug;

const DECLARATION: &[u8] = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Escapes an attribute value for use between double quotes, with named entities for the XML
/// special characters and character references for whitespace that would be normalized away.
pub fn escape_attribute(raw: &str) -> Cow<str> {
    fn to_escape(c: char) -> bool {
        matches!(c, '<' | '>' | '&' | '"' | '\t' | '\n' | '\r')
    }

    if !raw.contains(to_escape) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\t' => escaped.push_str("&#x9;"),
            '\n' => escaped.push_str("&#xA;"),
            '\r' => escaped.push_str("&#xD;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// An incremental XML token sink.
///
/// Implementations escape attribute values and text themselves; callers hand over raw strings.
pub trait StreamWriter {
    /// Writes the `<?xml?>` declaration for version 1.0 in UTF-8.
    fn start_document(&mut self) -> Result<()>;

    /// Enables or disables indentation for everything written afterwards.
    fn set_indent(&mut self, indent: bool);

    /// Opens an element. Attributes may follow until text or a child element is written.
    fn start_element(&mut self, name: &str) -> Result<()>;

    /// Adds an attribute to the element that was just opened.
    fn write_attribute(&mut self, name: &str, value: &str) -> Result<()>;

    /// Writes text inside the current element.
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// Writes a complete element with optional text and no attributes.
    fn write_element(&mut self, name: &str, content: Option<&str>) -> Result<()> {
        self.start_element(name)?;
        if let Some(content) = content {
            self.write_text(content)?;
        }
        self.end_element()
    }

    /// Closes the innermost open element.
    fn end_element(&mut self) -> Result<()>;

    /// Closes every element still open and finishes the document.
    fn end_document(&mut self) -> Result<()>;

    /// Flushes buffered output to the destination.
    fn flush(&mut self) -> Result<()>;
}

impl<S: StreamWriter + ?Sized> StreamWriter for &mut S {
    fn start_document(&mut self) -> Result<()> {
        (**self).start_document()
    }

    fn set_indent(&mut self, indent: bool) {
        (**self).set_indent(indent)
    }

    fn start_element(&mut self, name: &str) -> Result<()> {
        (**self).start_element(name)
    }

    fn write_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        (**self).write_attribute(name, value)
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        (**self).write_text(text)
    }

    fn write_element(&mut self, name: &str, content: Option<&str>) -> Result<()> {
        (**self).write_element(name, content)
    }

    fn end_element(&mut self) -> Result<()> {
        (**self).end_element()
    }

    fn end_document(&mut self) -> Result<()> {
        (**self).end_document()
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Settings of an `ItemWriter`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WriterConfig {
    /// Whether elements are put on their own, indented line.
    pub indent: bool,
    /// What one level of indentation is made of.
    pub indent_unit: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            indent: false,
            indent_unit: String::from("  "),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DocumentState {
    Empty,
    Started,
    Finished,
}

// An open element; `nested` is set once it received an element child, `text` once it
// received text. Elements holding text are not indented further.
struct Frame {
    nested: bool,
    text: bool,
}

/// Wrapper around a [`std::io::Write`] and an [`rxml::writer::Encoder`], writing every item to
/// the destination as soon as it is encoded.
pub struct ItemWriter<W> {
    writer: W,
    encoder: Encoder<SimpleNamespaces>,
    config: WriterConfig,
    state: DocumentState,
    stack: Vec<Frame>,
    head_open: bool,
}

impl ItemWriter<BufWriter<File>> {
    /// Creates (or truncates) the file at `path` and writes to it.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(ItemWriter::new(BufWriter::new(file)))
    }
}

impl<W: Write> ItemWriter<W> {
    /// Wraps `writer` with the default configuration.
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, WriterConfig::default())
    }

    /// Wraps `writer` with the given configuration.
    pub fn with_config(writer: W, config: WriterConfig) -> Self {
        Self {
            writer,
            encoder: Encoder::new(),
            config,
            state: DocumentState::Empty,
            stack: Vec::new(),
            head_open: false,
        }
    }

    /// Gives the destination back.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write(&mut self, item: Item<'_>) -> Result<()> {
        let mut buf = rxml::bytes::BytesMut::new();
        self.encoder.encode_into_bytes(item, &mut buf)?;
        self.writer.write_all(&buf[..])?;
        Ok(())
    }

    fn newline(&mut self, depth: usize) -> Result<()> {
        if self.config.indent {
            self.writer.write_all(b"\n")?;
            for _ in 0..depth {
                self.writer.write_all(self.config.indent_unit.as_bytes())?;
            }
        }
        Ok(())
    }

    fn close_head(&mut self) -> Result<()> {
        if self.head_open {
            self.head_open = false;
            self.write(Item::ElementHeadEnd)?;
        }
        Ok(())
    }

    fn ensure_started(&self) -> Result<()> {
        match self.state {
            DocumentState::Started => Ok(()),
            DocumentState::Empty => Err(Error::WriterState("the document has not been started")),
            DocumentState::Finished => Err(Error::WriterState("the document is already finished")),
        }
    }
}

impl<W: Write> StreamWriter for ItemWriter<W> {
    fn start_document(&mut self) -> Result<()> {
        if self.state != DocumentState::Empty {
            return Err(Error::WriterState("the document has already been started"));
        }
        self.writer.write_all(DECLARATION)?;
        self.state = DocumentState::Started;
        debug!("document started");
        Ok(())
    }

    fn set_indent(&mut self, indent: bool) {
        self.config.indent = indent;
    }

    fn start_element(&mut self, name: &str) -> Result<()> {
        self.ensure_started()?;
        self.close_head()?;
        let depth = self.stack.len();
        if let Some(parent) = self.stack.last_mut() {
            parent.nested = true;
            if !parent.text {
                self.newline(depth)?;
            }
        }
        self.write(Item::ElementHeadStart(None, name.try_into()?))?;
        self.stack.push(Frame {
            nested: false,
            text: false,
        });
        self.head_open = true;
        Ok(())
    }

    fn write_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        if !self.head_open {
            return Err(Error::WriterState(
                "attributes must directly follow the element start",
            ));
        }
        // The encoder has already flushed `<name`, so the pair goes straight to the
        // destination; rxml would write `"` as `&#34;`.
        <&rxml::NcNameStr>::try_from(name)?;
        <&rxml::CDataStr>::try_from(value)?;
        write!(self.writer, " {}=\"{}\"", name, escape_attribute(value))?;
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.stack.is_empty() {
            return Err(Error::WriterState("text must be written inside an element"));
        }
        self.close_head()?;
        if let Some(frame) = self.stack.last_mut() {
            frame.text = true;
        }
        self.write(Item::Text(text.try_into()?))
    }

    fn end_element(&mut self) -> Result<()> {
        let frame = match self.stack.pop() {
            Some(frame) => frame,
            None => return Err(Error::WriterState("no element is open")),
        };
        if self.head_open {
            // Childless: the encoder closes the head as `/>`.
            self.head_open = false;
        } else if frame.nested && !frame.text {
            self.newline(self.stack.len())?;
        }
        self.write(Item::ElementFoot)
    }

    fn end_document(&mut self) -> Result<()> {
        self.ensure_started()?;
        while !self.stack.is_empty() {
            self.end_element()?;
        }
        if self.config.indent {
            self.writer.write_all(b"\n")?;
        }
        self.state = DocumentState::Finished;
        debug!("document finished");
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
