use std::fmt::{self, Write};

static INDENT: &str = "  ";

/// Minimal indenting XML writer.
///
/// Every element is written on its own line. Elements without text are written in the short
/// `<name />` form. Text content is escaped, raw fragments are inserted as they are.
#[derive(Debug, Default)]
pub(crate) struct XmlWriter {
    out: String,
    open: Vec<&'static str>,
}

impl XmlWriter {
    pub(crate) fn new() -> XmlWriter {
        XmlWriter::default()
    }

    pub(crate) fn declaration(&mut self) -> fmt::Result {
        writeln!(self.out, "<?xml version='1.0' encoding='utf-8'?>")
    }

    pub(crate) fn start(
        &mut self,
        name: &'static str,
        attributes: &[(&str, &str)],
    ) -> fmt::Result {
        self.indent()?;
        write!(self.out, "<{name}")?;
        for (key, value) in attributes {
            write!(self.out, " {key}=\"{}\"", escape_attribute(value))?;
        }
        self.out.write_str(">\n")?;
        self.open.push(name);
        Ok(())
    }

    pub(crate) fn end(&mut self) -> fmt::Result {
        let name = self.open.pop().ok_or(fmt::Error)?;
        self.indent()?;
        writeln!(self.out, "</{name}>")
    }

    pub(crate) fn empty(&mut self, name: &str) -> fmt::Result {
        self.indent()?;
        writeln!(self.out, "<{name} />")
    }

    pub(crate) fn element(&mut self, name: &str, text: &str) -> fmt::Result {
        if text.is_empty() {
            return self.empty(name);
        }
        self.indent()?;
        writeln!(self.out, "<{name}>{}</{name}>", escape_text(text))
    }

    /// Inserts `fragment` unescaped on its own line. Leading and trailing whitespace is trimmed,
    /// the content in between is kept byte for byte.
    pub(crate) fn raw(&mut self, fragment: &str) -> fmt::Result {
        self.indent()?;
        writeln!(self.out, "{}", fragment.trim())
    }

    /// Fails if an element is still open.
    pub(crate) fn finish(mut self) -> Result<String, fmt::Error> {
        if !self.open.is_empty() {
            return Err(fmt::Error);
        }
        let len = self.out.trim_end().len();
        self.out.truncate(len);
        Ok(self.out)
    }

    fn indent(&mut self) -> fmt::Result {
        for _ in 0..self.open.len() {
            self.out.write_str(INDENT)?;
        }
        Ok(())
    }
}

fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attribute(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            _ => out.push(ch),
        }
    }
    out
}
