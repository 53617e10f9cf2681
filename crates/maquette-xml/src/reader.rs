//! A winnow-based reader for the XML subset the codec emits.
//!
//! The reader handles declarations, comments, attributes, self-closing
//! tags, and the five predefined entities plus numeric character
//! references. It produces an [`XmlElement`] tree; structural validation
//! against the model schema happens in the decoder, not here.

use winnow::{
    Parser,
    ascii::multispace0,
    error::{ContextError, ErrMode, ModalResult},
    token::{take_till, take_until, take_while},
};

use crate::{element::XmlElement, error::XmlError};

/// Parse a complete document into its root element.
///
/// The whole input must be consumed; trailing content other than
/// whitespace and comments is an error.
pub(crate) fn parse_document(input: &str) -> Result<XmlElement, XmlError> {
    document.parse(input).map_err(|err| {
        XmlError::malformed(
            "document",
            format!("XML syntax error at offset {}", err.offset()),
        )
    })
}

fn cut() -> ErrMode<ContextError> {
    ErrMode::Cut(ContextError::new())
}

fn document(input: &mut &str) -> ModalResult<XmlElement> {
    misc(input)?;
    let root = element(input)?;
    misc(input)?;
    Ok(root)
}

/// Skip whitespace, comments, and declarations/processing instructions.
fn misc(input: &mut &str) -> ModalResult<()> {
    loop {
        multispace0.parse_next(input)?;
        if input.starts_with("<!--") {
            comment(input)?;
        } else if input.starts_with("<?") {
            declaration(input)?;
        } else {
            return Ok(());
        }
    }
}

fn comment(input: &mut &str) -> ModalResult<()> {
    ("<!--", take_until(0.., "-->"), "-->")
        .void()
        .parse_next(input)
}

fn declaration(input: &mut &str) -> ModalResult<()> {
    ("<?", take_till(0.., '>'), '>').void().parse_next(input)
}

fn name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, ':' | '_' | '-' | '.')
    })
    .parse_next(input)
}

fn attributes(input: &mut &str) -> ModalResult<Vec<(String, String)>> {
    let mut attrs = Vec::new();
    loop {
        multispace0.parse_next(input)?;
        if input.starts_with('>') || input.starts_with('/') || input.is_empty() {
            return Ok(attrs);
        }
        let key = name(input)?.to_string();
        multispace0.parse_next(input)?;
        '='.parse_next(input)?;
        multispace0.parse_next(input)?;
        let value = quoted(input)?;
        attrs.push((key, value));
    }
}

fn quoted(input: &mut &str) -> ModalResult<String> {
    let mut quote = if input.starts_with('\'') { '\'' } else { '"' };
    quote.parse_next(input)?;
    let raw = take_till(0.., quote).parse_next(input)?;
    quote.parse_next(input)?;
    decode_entities(raw)
}

fn element(input: &mut &str) -> ModalResult<XmlElement> {
    '<'.parse_next(input)?;
    let tag = name(input)?.to_string();
    let mut element = XmlElement::new(tag);
    for (key, value) in attributes(input)? {
        element.push_attr(key, value);
    }

    if input.starts_with("/>") {
        "/>".parse_next(input)?;
        return Ok(element);
    }
    '>'.parse_next(input)?;

    loop {
        if input.starts_with("</") {
            break;
        }
        if input.is_empty() {
            // Unterminated element.
            return Err(cut());
        }
        if input.starts_with("<!--") {
            comment(input)?;
        } else if input.starts_with('<') {
            let child = self::element(input)?;
            element.push_child(child);
        } else {
            let chunk = take_till(1.., '<').parse_next(input)?;
            element.append_text(&decode_entities(chunk)?);
        }
    }

    "</".parse_next(input)?;
    let close = name(input)?;
    if close != element.name() {
        return Err(cut());
    }
    multispace0.parse_next(input)?;
    '>'.parse_next(input)?;
    Ok(element)
}

/// Replace entity references with the characters they stand for.
///
/// Supports `&lt; &gt; &amp; &quot; &apos;` and decimal/hex character
/// references. An unterminated or unrecognized reference is an error.
fn decode_entities(raw: &str) -> Result<String, ErrMode<ContextError>> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];
        let end = rest.find(';').ok_or_else(cut)?;
        let entity = &rest[..end];
        rest = &rest[end + 1..];
        let decoded = match entity {
            "lt" => '<',
            "gt" => '>',
            "amp" => '&',
            "quot" => '"',
            "apos" => '\'',
            _ => {
                let code = entity
                    .strip_prefix("#x")
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| entity.strip_prefix('#').map(|dec| dec.parse::<u32>()))
                    .ok_or_else(cut)?
                    .map_err(|_| cut())?;
                char::from_u32(code).ok_or_else(cut)?
            }
        };
        out.push(decoded);
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_declaration_attributes_and_nesting() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
            <project>
              <package name="org.mql.shop">
                <class>
                  <name>Order</name>
                </class>
              </package>
            </project>"#;

        let root = parse_document(doc).expect("document should parse");
        assert_eq!(root.name(), "project");
        let package = root.child("package").expect("package child");
        assert_eq!(package.attr("name"), Some("org.mql.shop"));
        let class = package.child("class").expect("class child");
        assert_eq!(class.child("name").map(XmlElement::text), Some("Order"));
    }

    #[test]
    fn parses_self_closing_and_comments() {
        let doc = "<a><!-- members --><b x='1'/><b x=\"2\"/></a>";
        let root = parse_document(doc).expect("document should parse");
        let values: Vec<_> = root.children_named("b").filter_map(|b| b.attr("x")).collect();
        assert_eq!(values, ["1", "2"]);
    }

    #[test]
    fn decodes_entities_in_text_and_attributes() {
        let doc = "<t a=\"x &quot;y&quot; &#38; z\">Map&lt;K, V&gt; &#x41;</t>";
        let root = parse_document(doc).expect("document should parse");
        assert_eq!(root.attr("a"), Some("x \"y\" & z"));
        assert_eq!(root.text(), "Map<K, V> A");
    }

    #[test]
    fn mismatched_close_tag_is_rejected() {
        let err = parse_document("<a><b></a></b>").unwrap_err();
        assert!(matches!(err, XmlError::Malformed { .. }));
    }

    #[test]
    fn unterminated_element_is_rejected() {
        assert!(parse_document("<a><b>").is_err());
        assert!(parse_document("").is_err());
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(parse_document("<a/>extra").is_err());
    }
}
