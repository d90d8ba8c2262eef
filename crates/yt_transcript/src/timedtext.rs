use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{TranscriptError, TranscriptSegment};

static TEXT_ELEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text\b([^>]*?)(?:/>|>(.*?)</text>)").unwrap());

static ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z_:][\w:.-]*)="([^"]*)""#).unwrap());

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[xX][0-9A-Fa-f]+|#[0-9]+|[A-Za-z]+);").unwrap());

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Parses a timedtext XML document into segments, in document order.
///
/// # Returns
/// * `Ok(Vec<TranscriptSegment>)` with every non-empty `<text>` element
/// * `Err(ParseError)` if the body is not a timedtext document or an element
///   lacks a usable `start` attribute
pub fn parse_timedtext(xml: &str) -> Result<Vec<TranscriptSegment>, TranscriptError> {
    if !xml.contains("<transcript") {
        return Err(TranscriptError::ParseError(
            "Timedtext response has no <transcript> root element",
        ));
    }

    let mut segments = Vec::new();

    for element in TEXT_ELEMENT_RE.captures_iter(xml) {
        let raw = element.get(2).map(|m| m.as_str()).unwrap_or_default();
        // the XML layer escapes the already HTML-escaped caption, so decode twice
        let text = decode_entities(&decode_entities(raw));
        let text = TAG_RE.replace_all(&text, "");

        if text.is_empty() {
            continue;
        }

        let attributes = element.get(1).map(|m| m.as_str()).unwrap_or_default();
        let start = attribute(attributes, "start")
            .and_then(|v| v.parse::<f64>().ok())
            .ok_or(TranscriptError::ParseError(
                "Timedtext element is missing a numeric 'start' attribute",
            ))?;
        let duration = attribute(attributes, "dur")
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0);

        segments.push(TranscriptSegment {
            text: text.into_owned(),
            start,
            duration,
        });
    }

    Ok(segments)
}

fn attribute<'a>(attributes: &'a str, name: &str) -> Option<&'a str> {
    ATTRIBUTE_RE
        .captures_iter(attributes)
        .find(|cap| &cap[1] == name)
        .and_then(|cap| cap.get(2))
        .map(|m| m.as_str())
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |cap: &Captures| {
            let entity = &cap[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };

            decoded
                .map(String::from)
                .unwrap_or_else(|| cap[0].to_string())
        })
        .into_owned()
}
