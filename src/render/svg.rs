//! Minimal SVG markup writer.
//!
//! Elements are written in call order with two-space indentation; attribute
//! values and text are escaped on the way in. Output only depends on the
//! calls made, so identical input produces identical bytes.

use std::fmt::{Display, Write};

/// A start tag under construction.
#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self { tag, attrs: Vec::new() }
    }

    pub fn attr(mut self, name: &'static str, value: impl Display) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    pub fn attr_opt(self, name: &'static str, value: Option<impl Display>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    fn write_start(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }
    }
}

#[derive(Debug, Default)]
pub struct SvgWriter {
    out: String,
    open: Vec<&'static str>,
}

impl SvgWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn indent(&mut self) {
        for _ in 0..self.open.len() {
            self.out.push_str("  ");
        }
    }

    /// Write a start tag and descend into it.
    pub fn open(&mut self, el: Element) {
        self.indent();
        el.write_start(&mut self.out);
        self.out.push_str(">\n");
        self.open.push(el.tag);
    }

    /// Close the innermost open element.
    pub fn close(&mut self) {
        if let Some(tag) = self.open.pop() {
            self.indent();
            let _ = writeln!(self.out, "</{tag}>");
        }
    }

    /// Write an element without children.
    pub fn leaf(&mut self, el: Element) {
        self.indent();
        el.write_start(&mut self.out);
        self.out.push_str("/>\n");
    }

    /// Write an element whose only child is escaped text.
    pub fn text(&mut self, el: Element, text: &str) {
        self.indent();
        el.write_start(&mut self.out);
        let _ = writeln!(self.out, ">{}</{}>", escape(text), el.tag);
    }

    /// Write an element whose body is emitted verbatim, wrapped in CDATA.
    pub fn cdata(&mut self, el: Element, body: &str) {
        self.indent();
        el.write_start(&mut self.out);
        let _ = writeln!(self.out, "><![CDATA[\n{body}]]></{}>", el.tag);
    }

    /// Close any open elements and return the document.
    pub fn finish(mut self) -> String {
        while !self.open.is_empty() {
            self.close();
        }
        self.out
    }
}

/// Escape text for use in attribute values and character data.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Shortest round-trip form of a number, with `-0` folded into `0`.
pub fn num(v: f64) -> String {
    if v == 0.0 { "0".to_string() } else { format!("{v}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_elements_are_indented_and_escaped() {
        let mut w = SvgWriter::new();
        w.open(Element::new("g").attr("id", "a&b"));
        w.leaf(Element::new("rect").attr("x", num(1.5)).attr_opt("fill", None::<&str>));
        w.text(Element::new("text"), "<tip>");
        let out = w.finish();
        assert_eq!(
            out,
            "<g id=\"a&amp;b\">\n  <rect x=\"1.5\"/>\n  <text>&lt;tip&gt;</text>\n</g>\n"
        );
    }

    #[test]
    fn num_prints_shortest_form() {
        assert_eq!(num(-0.0), "0");
        assert_eq!(num(40.0), "40");
        assert_eq!(num(0.1 + 0.2), "0.30000000000000004");
    }
}
