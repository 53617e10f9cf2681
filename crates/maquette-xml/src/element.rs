//! A minimal XML element tree.
//!
//! [`XmlElement`] is the in-memory document shape shared by the reader
//! and the writer. Encoding builds an element tree from the model and
//! serializes it; decoding parses a document into a tree and walks it.

/// One XML element: tag name, attributes, text content, children.
///
/// Attribute and child order is preserved. Text is accumulated across
/// child elements and exposed trimmed, so indentation whitespace around
/// children does not count as content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Create a text-only element, e.g. `<name>Order</name>`.
    pub fn text_element(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.text = text.into();
        element
    }

    /// Get the tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the trimmed text content.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Get the attributes in document order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Get the child elements in document order.
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Find the first child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Iterate the children with the given tag name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Append an attribute.
    pub fn push_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Append raw text content.
    pub fn append_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Serialize this element (and everything below it) as an indented
    /// document fragment without an XML declaration.
    pub fn to_xml_fragment(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out, 0);
        out
    }

    /// Serialize this element as a full document with an XML declaration.
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.write_into(&mut out, 0);
        out
    }

    fn write_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }

        let text = self.text();
        if text.is_empty() && self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }
        out.push('>');

        if self.children.is_empty() {
            out.push_str(&escape_text(text));
        } else {
            out.push('\n');
            if !text.is_empty() {
                out.push_str(&"  ".repeat(depth + 1));
                out.push_str(&escape_text(text));
                out.push('\n');
            }
            for child in &self.children {
                child.write_into(out, depth + 1);
            }
            out.push_str(&indent);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push_str(">\n");
    }
}

/// Escape text content for serialization.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for serialization.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_elements_self_close() {
        let element = XmlElement::new("fields");
        assert_eq!(element.to_xml_fragment(), "<fields/>\n");
    }

    #[test]
    fn text_elements_render_inline() {
        let element = XmlElement::text_element("name", "Order");
        assert_eq!(element.to_xml_fragment(), "<name>Order</name>\n");
    }

    #[test]
    fn special_characters_are_escaped() {
        let mut element = XmlElement::text_element("type", "Map<K, V>");
        element.push_attr("note", "a \"quoted\" & bracketed <value>");
        assert_eq!(
            element.to_xml_fragment(),
            "<type note=\"a &quot;quoted&quot; &amp; bracketed &lt;value&gt;\">\
             Map&lt;K, V&gt;</type>\n"
        );
    }

    #[test]
    fn children_are_indented() {
        let mut parent = XmlElement::new("methods");
        parent.push_child(XmlElement::text_element("method", "run"));
        assert_eq!(
            parent.to_xml_fragment(),
            "<methods>\n  <method>run</method>\n</methods>\n"
        );
    }
}
