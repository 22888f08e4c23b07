//! Utility functions for text decoding and markup escaping.
//!
//! Attribute values and text content in the nested encoding must have the
//! markup special characters escaped when writing and the entity references
//! resolved when reading.

/// Converts raw bytes read from a file into a [String].
///
/// Input is decoded as UTF-8; if that fails, the bytes are taken as
/// ISO-8859-1, which older Neurolucida exports declare.
///
/// # Examples
/// ```
/// # use nlxml::parser::utils::bytes_to_string;
/// assert_eq!(bytes_to_string("Purkinje".as_bytes()), "Purkinje");
/// assert_eq!(bytes_to_string("Zelle Ä".as_bytes()), "Zelle Ä");
/// assert_eq!(bytes_to_string(b"Zelle \xC4"), "Zelle Ä");
/// ```
pub fn bytes_to_string(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Escapes the five markup special characters for use in attribute values
/// and text content.
///
/// # Examples
/// ```
/// # use nlxml::parser::utils::escape_markup;
/// assert_eq!(escape_markup("Soma"), "Soma");
/// assert_eq!(escape_markup("CA1 <left>"), "CA1 &lt;left&gt;");
/// assert_eq!(escape_markup("\"Dot\" & 'Circle'"), "&quot;Dot&quot; &amp; &apos;Circle&apos;");
/// ```
pub fn escape_markup(text: &str) -> String {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return text.to_string();
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Resolves the predefined entities and numeric character references
/// (`&#65;`, `&#x41;`) in a piece of markup text.
///
/// Unknown or malformed references are kept verbatim.
///
/// # Examples
/// ```
/// # use nlxml::parser::utils::unescape_markup;
/// assert_eq!(unescape_markup("Soma"), "Soma");
/// assert_eq!(unescape_markup("CA1 &lt;left&gt;"), "CA1 <left>");
/// assert_eq!(unescape_markup("&#65;&#x42;C"), "ABC");
/// assert_eq!(unescape_markup("R&D &unknown; &"), "R&D &unknown; &");
/// ```
pub fn unescape_markup(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut unescaped = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        unescaped.push_str(&rest[..amp]);
        let candidate = &rest[amp..];

        let resolved = candidate
            .find(';')
            .and_then(|semi| resolve_entity(&candidate[1..semi]).map(|ch| (ch, semi)));

        match resolved {
            Some((ch, semi)) => {
                unescaped.push(ch);
                rest = &candidate[semi + 1..];
            }
            None => {
                unescaped.push('&');
                rest = &candidate[1..];
            }
        }
    }
    unescaped.push_str(rest);
    unescaped
}

/// Maps an entity name (without `&` and `;`) to its character.
fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or(name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}
