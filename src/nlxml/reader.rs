//! Pull-style markup reader on top of [ByteParser].
//!
//! The reader turns the input into a stream of [MarkupEvent]s and checks that
//! elements are properly nested. It understands what Neurolucida files use:
//! elements, attributes in single or double quotes, text, entity references,
//! CDATA sections, comments, processing instructions and a DOCTYPE. It does
//! not validate against a schema.

use crate::model::Color;
use crate::nlxml::color::decode_hex_color;
use crate::nlxml::defs::NAME_DELIMITERS;
use crate::parser::byte_parser::{ByteParser, ConsumeMode};
use crate::parser::byte_source::ByteSource;
use crate::parser::utils::{bytes_to_string, unescape_markup};
use crate::parser::{ParsingError, ParsingErrorType};

// =#========================================================================#=
// EVENTS
// =#========================================================================#=
/// A start or empty element tag with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    pub(crate) name: String,
    attributes: Vec<(String, String)>,
    /// Byte offset of the opening `<`
    pub(crate) position: usize,
}

impl Element {
    /// Returns the unescaped value of the first attribute called `name`.
    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Event produced by [MarkupReader::next_event].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MarkupEvent {
    /// `<name ...>`
    Start(Element),
    /// `<name .../>`
    Empty(Element),
    /// `</name>`
    End(String),
    /// Non-blank text content, unescaped
    Text(String),
    /// End of input with all elements closed
    Eof,
}

// =#========================================================================#=
// MARKUP READER
// =#========================================================================#=
pub(crate) struct MarkupReader<S: ByteSource> {
    parser: ByteParser<S>,
    /// Names of currently open elements
    open: Vec<String>,
}

impl<S: ByteSource> MarkupReader<S> {
    pub(crate) fn new(mut parser: ByteParser<S>) -> Self {
        parser.skip_bom();
        Self {
            parser,
            open: Vec::new(),
        }
    }

    /// Number of currently open elements.
    pub(crate) fn depth(&self) -> usize {
        self.open.len()
    }

    /// Returns the 1-based line of byte offset `pos`, for log messages.
    pub(crate) fn line_at(&self, pos: usize) -> usize {
        self.parser.line_at(pos)
    }

    /// Reads the next event.
    ///
    /// # Errors
    /// Returns `UnexpectedEOF` if the input ends inside a construct or with
    /// elements still open, and `InvalidMarkup` for malformed tags and for
    /// closing tags that do not match the innermost open element.
    pub(crate) fn next_event(&mut self) -> Result<MarkupEvent, ParsingError> {
        loop {
            if self.parser.is_eof() {
                if self.open.is_empty() {
                    return Ok(MarkupEvent::Eof);
                }
                return Err(ParsingError::unexpected_eof(&self.parser));
            }

            if !self.parser.peek_is(b'<') {
                if let Some(text) = self.read_text() {
                    return Ok(MarkupEvent::Text(text));
                }
                continue;
            }

            if self.parser.consume_if_sequence(b"<?") {
                self.skip_past(b"?>")?;
            } else if self.parser.consume_if_sequence(b"<!--") {
                self.skip_past(b"-->")?;
            } else if self.parser.consume_if_sequence(b"<![CDATA[") {
                let Some(content) = self.parser.take_until_sequence(b"]]>") else {
                    return Err(ParsingError::unexpected_eof(&self.parser));
                };
                return Ok(MarkupEvent::Text(bytes_to_string(&content)));
            } else if self.parser.consume_if_sequence(b"<!") {
                self.skip_declaration()?;
            } else if self.parser.consume_if_sequence(b"</") {
                return self.read_end_tag();
            } else {
                return self.read_start_tag();
            }
        }
    }

    /// Skips all events up to and including the end tag of the element whose
    /// [MarkupEvent::Start] was just returned.
    pub(crate) fn skip_element(&mut self) -> Result<(), ParsingError> {
        let depth = self.depth();
        while self.depth() >= depth {
            if self.next_event()? == MarkupEvent::Eof {
                return Err(ParsingError::unexpected_eof(&self.parser));
            }
        }
        Ok(())
    }

    // ============================================================================
    // Lexing helpers (private)
    // ============================================================================
    /// Reads text up to the next `<`; blank text yields `None`.
    fn read_text(&mut self) -> Option<String> {
        let start = self.parser.position();
        self.parser.consume_until(b'<', ConsumeMode::Exclusive);
        let raw = bytes_to_string(self.parser.slice_from(start));
        if raw.trim().is_empty() {
            None
        } else {
            Some(unescape_markup(&raw))
        }
    }

    fn skip_past(&mut self, terminator: &[u8]) -> Result<(), ParsingError> {
        if self
            .parser
            .consume_until_sequence(terminator, ConsumeMode::Inclusive)
        {
            Ok(())
        } else {
            Err(ParsingError::unexpected_eof(&self.parser))
        }
    }

    /// Skips `<!DOCTYPE ...>` including an internal subset in brackets.
    fn skip_declaration(&mut self) -> Result<(), ParsingError> {
        match self
            .parser
            .consume_until_any(b"[>", ConsumeMode::Inclusive)
        {
            Some(b'[') => {
                self.skip_past(b"]")?;
                self.skip_past(b">")
            }
            Some(_) => Ok(()),
            None => Err(ParsingError::unexpected_eof(&self.parser)),
        }
    }

    /// Reads `name>` after `</` and checks it against the innermost open element.
    fn read_end_tag(&mut self) -> Result<MarkupEvent, ParsingError> {
        let position = self.parser.position() - 2;
        let name = self.parser.parse_token(NAME_DELIMITERS);
        self.parser.skip_whitespace();
        if !self.parser.consume_if(b'>') {
            return Err(self.eof_or_invalid(format!("unterminated closing tag </{name}")));
        }

        match self.open.pop() {
            Some(open) if open == name => Ok(MarkupEvent::End(name)),
            Some(open) => Err(ParsingError::at_position(
                ParsingErrorType::InvalidMarkup(format!(
                    "closing tag </{name}> does not match <{open}>"
                )),
                &self.parser,
                position,
            )),
            None => Err(ParsingError::at_position(
                ParsingErrorType::InvalidMarkup(format!("closing tag </{name}> without element")),
                &self.parser,
                position,
            )),
        }
    }

    /// Reads `<name attr="value" ...>` or `<name .../>`.
    fn read_start_tag(&mut self) -> Result<MarkupEvent, ParsingError> {
        let position = self.parser.position();
        self.parser.next_byte(); // '<'
        let name = self.parser.parse_token(NAME_DELIMITERS);
        if name.is_empty() {
            return Err(self.eof_or_invalid("element without name".to_string()));
        }

        let mut attributes = Vec::new();
        loop {
            self.parser.skip_whitespace();
            if self.parser.consume_if_sequence(b"/>") {
                let element = Element {
                    name,
                    attributes,
                    position,
                };
                return Ok(MarkupEvent::Empty(element));
            }
            if self.parser.consume_if(b'>') {
                self.open.push(name.clone());
                let element = Element {
                    name,
                    attributes,
                    position,
                };
                return Ok(MarkupEvent::Start(element));
            }

            let key = self.parser.parse_token(NAME_DELIMITERS);
            if key.is_empty() {
                return Err(self.eof_or_invalid(format!("malformed attribute in <{name}>")));
            }
            self.parser.skip_whitespace();
            if !self.parser.consume_if(b'=') {
                return Err(self.eof_or_invalid(format!("attribute '{key}' without value")));
            }
            self.parser.skip_whitespace();
            let value = self.parser.parse_quoted()?;
            attributes.push((key, unescape_markup(&bytes_to_string(&value))));
        }
    }

    fn eof_or_invalid(&self, msg: String) -> ParsingError {
        if self.parser.is_eof() {
            ParsingError::unexpected_eof(&self.parser)
        } else {
            ParsingError::invalid_markup(&self.parser, msg)
        }
    }

    // ============================================================================
    // Typed attribute reads
    // ============================================================================
    /// Reads a string attribute; absent is empty.
    pub(crate) fn str_attribute(&self, element: &Element, name: &str) -> String {
        element.attribute(name).unwrap_or_default().to_string()
    }

    /// Reads a number attribute; absent is `0`.
    pub(crate) fn f64_attribute(&self, element: &Element, name: &str) -> Result<f64, ParsingError> {
        match element.attribute(name) {
            None => Ok(0.0),
            Some(value) => value
                .trim()
                .parse::<f64>()
                .map_err(|_| self.invalid_attribute(element, name, value)),
        }
    }

    /// Reads a count attribute; absent is `0`.
    pub(crate) fn usize_attribute(
        &self,
        element: &Element,
        name: &str,
    ) -> Result<usize, ParsingError> {
        match element.attribute(name) {
            None => Ok(0),
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| self.invalid_attribute(element, name, value)),
        }
    }

    /// Reads a boolean attribute (`true`/`false`, any case, or `1`/`0`); absent is `false`.
    pub(crate) fn bool_attribute(&self, element: &Element, name: &str) -> Result<bool, ParsingError> {
        let Some(value) = element.attribute(name) else {
            return Ok(false);
        };
        match value.trim() {
            "1" => Ok(true),
            "0" => Ok(false),
            v if v.eq_ignore_ascii_case("true") => Ok(true),
            v if v.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(self.invalid_attribute(element, name, value)),
        }
    }

    /// Reads a `#RRGGBB` color attribute; absent is black.
    pub(crate) fn color_attribute(&self, element: &Element, name: &str) -> Result<Color, ParsingError> {
        let Some(value) = element.attribute(name) else {
            return Ok(Color::BLACK);
        };
        decode_hex_color(value.trim()).ok_or_else(|| {
            ParsingError::at_position(
                ParsingErrorType::InvalidColor(value.to_string()),
                &self.parser,
                element.position,
            )
        })
    }

    fn invalid_attribute(&self, element: &Element, name: &str, value: &str) -> ParsingError {
        ParsingError::at_position(
            ParsingErrorType::InvalidAttribute {
                name: name.to_string(),
                value: value.to_string(),
            },
            &self.parser,
            element.position,
        )
    }
}
