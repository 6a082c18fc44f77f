//! Minimal CSV record writer.
//!
//! Fields are quoted only when they contain a separator, a quote or a line
//! break; embedded quotes are doubled. String cells bypass that rule and are
//! always quoted.

use std::{
    borrow::Cow,
    io::{self, Write},
};

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
pub const LINE_TERMINATOR: &str = "\r\n";

const SEPARATOR: u8 = b',';
const QUOTE: char = '"';

/// Escape one field with the quote-if-needed rule.
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if !needs_quotes(value) {
        return Cow::Borrowed(value);
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push(QUOTE);
    quoted.push_str(&value.replace(QUOTE, "\"\""));
    quoted.push(QUOTE);
    Cow::Owned(quoted)
}

fn needs_quotes(value: &str) -> bool {
    value
        .bytes()
        .any(|b| matches!(b, SEPARATOR | b'"' | b'\n' | b'\r'))
}

pub struct CsvWriter<W: Write> {
    dest: W,
    at_record_start: bool,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(dest: W) -> Self {
        Self {
            dest,
            at_record_start: true,
        }
    }

    /// Write `value` as the next field, quoting only when needed.
    pub fn field(&mut self, value: &str) -> io::Result<()> {
        self.separate()?;
        self.dest.write_all(escape_field(value).as_bytes())
    }

    /// Write `value` as the next field, always quoted.
    pub fn quoted_field(&mut self, value: &str) -> io::Result<()> {
        self.separate()?;
        self.write_quoted(value)
    }

    /// Write a whole record with the quote-if-needed rule.
    pub fn record<I, S>(&mut self, fields: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for field in fields {
            self.field(field.as_ref())?;
        }
        self.end_record()
    }

    pub fn end_record(&mut self) -> io::Result<()> {
        self.at_record_start = true;
        self.dest.write_all(LINE_TERMINATOR.as_bytes())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.dest.flush()
    }

    pub fn into_inner(self) -> W {
        self.dest
    }

    fn separate(&mut self) -> io::Result<()> {
        if self.at_record_start {
            self.at_record_start = false;
            Ok(())
        } else {
            self.dest.write_all(&[SEPARATOR])
        }
    }

    fn write_quoted(&mut self, value: &str) -> io::Result<()> {
        self.dest.write_all(b"\"")?;
        for (i, part) in value.split(QUOTE).enumerate() {
            if i > 0 {
                self.dest.write_all(b"\"\"")?;
            }
            self.dest.write_all(part.as_bytes())?;
        }
        self.dest.write_all(b"\"")
    }
}
