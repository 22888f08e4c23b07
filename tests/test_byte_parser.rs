use nlxml::parser::byte_parser::ByteParser;
use nlxml::parser::byte_parser::ConsumeMode::{Exclusive, Inclusive};
use nlxml::parser::{ErrorCategory, ParsingErrorType};

#[test]
fn test_skip_whitespace() {
    let mut parser = ByteParser::for_str(" \r  \t\n \t x y");
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'x'));

    parser.next_byte(); // skip x
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'y'));
}

#[test]
fn test_skip_inline_whitespace_stops_at_newline() {
    let mut parser = ByteParser::for_str(" \t\r\n 2");
    parser.skip_inline_whitespace();
    assert_eq!(parser.peek(), Some(b'\n'));
    assert!(parser.skip_line());
    parser.skip_inline_whitespace();
    assert_eq!(parser.next_byte(), Some(b'2'));
    assert!(!parser.skip_line());
}

#[test]
fn test_consume_until_inclusive() {
    let mut parser = ByteParser::for_str("<point x=\"1\"/>");
    assert!(parser.consume_until(b'"', Inclusive));
    assert_eq!(parser.peek(), Some(b'1'));
    assert_eq!(parser.position(), 10);
}

#[test]
fn test_consume_until_exclusive() {
    let mut parser = ByteParser::for_str("<point x=\"1\"/>");
    assert!(parser.consume_until(b'"', Exclusive));
    assert_eq!(parser.peek(), Some(b'"'));
    assert_eq!(parser.position(), 9);
    assert!(!parser.consume_until(b'#', Exclusive));
    assert!(parser.is_eof());
}

#[test]
fn test_consume_until_any() {
    let mut parser = ByteParser::for_str("tree color=x/>");
    let found = parser.consume_until_any(b" />", Inclusive);
    assert_eq!(found, Some(b' '));
    assert_eq!(parser.position(), 5);

    let found = parser.consume_until_any(b" />", Exclusive);
    assert_eq!(found, Some(b'/'));
    assert_eq!(parser.peek(), Some(b'/'));

    let mut parser = ByteParser::for_str("no delimiter here");
    assert!(parser.consume_until_any(b"<>", Inclusive).is_none());
}

#[test]
fn test_consume_until_sequence() {
    let mut parser = ByteParser::for_str("<!-- note -- still note -->rest");
    assert!(parser.consume_until_sequence(b"-->", Inclusive));
    assert_eq!(parser.peek(), Some(b'r'));

    let mut parser = ByteParser::for_str("<!-- unterminated");
    assert!(!parser.consume_until_sequence(b"-->", Inclusive));
    assert!(parser.is_eof());
}

#[test]
fn test_skip_bom() {
    let mut parser = ByteParser::for_bytes(b"\xEF\xBB\xBF1 1");
    assert!(parser.skip_bom());
    assert_eq!(parser.peek(), Some(b'1'));
    assert!(!parser.skip_bom());

    let mut parser = ByteParser::for_bytes(b"\xEF\xBBx");
    assert!(!parser.skip_bom());
    assert_eq!(parser.position(), 0);
}

#[test]
fn test_take_until_sequence() {
    let mut parser = ByteParser::for_str("<![CDATA[a < b]]>tail");
    assert!(parser.consume_if_sequence(b"<![CDATA["));
    assert_eq!(parser.take_until_sequence(b"]]>"), Some(b"a < b".to_vec()));
    assert!(parser.peek_is_sequence(b"tail"));
    assert_eq!(parser.take_until_sequence(b"]]>"), None);
}

#[test]
fn test_consume_if() {
    let mut parser = ByteParser::for_str("</branch>");
    assert!(!parser.consume_if(b'/'));
    assert!(parser.consume_if(b'<'));
    assert!(parser.consume_if(b'/'));
    assert!(!parser.consume_if_sequence(b"tree"));
    assert!(parser.consume_if_sequence(b"branch"));
    assert!(parser.peek_is(b'>'));
}

#[test]
fn test_parse_token() {
    let mut parser = ByteParser::for_str("branch leaf=\"High\"");
    assert_eq!(parser.parse_token(b" =/>"), "branch");
    assert_eq!(parser.parse_token(b" =/>"), "");
    parser.skip_whitespace();
    assert_eq!(parser.parse_token(b" =/>"), "leaf");
    assert!(parser.consume_if(b'='));
    assert_eq!(parser.parse_quoted().unwrap(), b"High".to_vec());
    assert!(parser.is_eof());
}

#[test]
fn test_parse_quoted_single_and_errors() {
    let mut parser = ByteParser::for_str("'Dot \"A\"'");
    assert_eq!(parser.parse_quoted().unwrap(), b"Dot \"A\"".to_vec());

    let mut parser = ByteParser::for_str("High");
    let error = parser.parse_quoted().unwrap_err();
    assert!(matches!(error.kind(), ParsingErrorType::InvalidMarkup(_)));

    let mut parser = ByteParser::for_str("\"High");
    let error = parser.parse_quoted().unwrap_err();
    assert_eq!(error.kind(), &ParsingErrorType::UnexpectedEOF);
    assert_eq!(error.category(), ErrorCategory::Format);
}

#[test]
fn test_line_numbers() {
    let mut parser = ByteParser::for_str("1 1 0 0 0 1 -1\n2 0 1 0 0 1 1\n3 6 2 0 0 1 2");
    assert_eq!(parser.line_number(), 1);
    parser.skip_line();
    assert_eq!(parser.line_number(), 2);
    let start = parser.position();
    parser.skip_line();
    assert_eq!(parser.line_number(), 3);
    assert_eq!(parser.line_at(start), 2);
    assert_eq!(parser.line_at(0), 1);
}

#[test]
fn test_slice_and_context() {
    let mut parser = ByteParser::for_str("<mbf version=\"4.0\">");
    parser.consume_until(b' ', Exclusive);
    assert_eq!(parser.slice_from(1), b"mbf");
    assert_eq!(parser.get_context_as_string(8), " version");

    parser.set_position(0);
    assert_eq!(parser.peek(), Some(b'<'));
}
