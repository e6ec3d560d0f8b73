use xml::reader::{EventReader, XmlEvent};

/// `element_text` - collect the text content of the first element with the given local name
///
/// namespace prefixes are ignored, entities arrive decoded and CDATA counts as text.
/// returns None for an absent element or an unparseable document so that the
/// caller can fall back to its default
#[must_use]
pub fn element_text(xml: &str, element: &str) -> Option<String> {
    let parser = EventReader::new(xml.as_bytes());
    let mut inside = false;
    let mut text = String::new();
    for e in parser {
        match e {
            Ok(XmlEvent::StartElement { name, .. }) => {
                if name.local_name == element {
                    inside = true;
                }
            }
            Ok(XmlEvent::EndElement { name }) => {
                if inside && name.local_name == element {
                    return Some(text);
                }
            }
            Ok(XmlEvent::Characters(value) | XmlEvent::CData(value)) => {
                if inside {
                    text.push_str(&value);
                }
            }
            Err(_) => return None,
            _ => {}
        }
    }
    None
}
