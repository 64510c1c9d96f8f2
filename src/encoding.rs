//! Percent-encoding helpers following the OAuth 1.0a conventions.
//!
//! [`encode`] only leaves the RFC 3986 unreserved characters untouched,
//! [`decode`] is lenient and understands the legacy `%uXXXX` escapes some
//! servers still emit.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything but `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes every UTF-8 byte of `source` outside the unreserved set
/// as `%XX` with uppercase hex digits.
pub fn encode(source: &str) -> String {
    utf8_percent_encode(source, OAUTH_ENCODE_SET).to_string()
}

/// Decodes a transmission-encoded string.
///
/// `+` becomes a space, `%XX` yields a raw byte and `%uXXXX` yields one
/// UTF-16 code unit. Consecutive raw bytes are collected and interpreted as
/// UTF-8 once the run ends; invalid sequences are replaced with U+FFFD.
/// Malformed escapes are kept literally.
pub fn decode(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let count = chars.len();
    let mut decoder = Decoder::with_capacity(source.len());

    let mut pos = 0;
    while pos < count {
        let mut ch = chars[pos];

        if ch == '+' {
            ch = ' ';
        } else if ch == '%' && pos + 2 < count {
            if chars[pos + 1] == 'u' && pos + 5 < count {
                if let Some(unit) = hex_unit(&chars[pos + 2..pos + 6]) {
                    decoder.push_unit(unit);
                    pos += 6;
                    continue;
                }
            } else if let (Some(h), Some(l)) =
                (hex_digit(chars[pos + 1]), hex_digit(chars[pos + 2]))
            {
                decoder.push_byte((h << 4 | l) as u8);
                pos += 3;
                continue;
            }
        }

        if ch.is_ascii() {
            decoder.push_byte(ch as u8);
        } else {
            decoder.push_char(ch);
        }
        pos += 1;
    }

    decoder.finish()
}

/// Parses a `name=value&name=value` body, decoding names and values.
///
/// See [`parse_query_with`].
pub fn parse_query(source: &str) -> Vec<(Option<String>, String)> {
    parse_query_with(source, true)
}

/// Parses a `name=value&name=value` body into ordered pairs.
///
/// The first `=` of a segment splits the name from the value. A segment
/// without `=` has no name, which also makes a trailing `&` produce one
/// extra `(None, "")` entry. Names and values go through [`decode`] when
/// `urlencoded` is set.
pub fn parse_query_with(source: &str, urlencoded: bool) -> Vec<(Option<String>, String)> {
    if source.is_empty() {
        return Vec::new();
    }

    let convert = |s: &str| {
        if urlencoded {
            decode(s)
        } else {
            s.to_string()
        }
    };

    source
        .split('&')
        .map(|segment| match segment.split_once('=') {
            Some((name, value)) => (Some(convert(name)), convert(value)),
            None => (None, convert(segment)),
        })
        .collect()
}

fn hex_digit(ch: char) -> Option<u32> {
    ch.to_digit(16)
}

fn hex_unit(digits: &[char]) -> Option<u16> {
    digits
        .iter()
        .try_fold(0u32, |acc, &d| hex_digit(d).map(|v| acc << 4 | v))
        .map(|v| v as u16)
}

/// Output accumulator local to a single [`decode`] call.
///
/// Raw bytes and UTF-16 units are buffered separately and converted when a
/// value of the other kind arrives.
struct Decoder {
    output: String,
    bytes: Vec<u8>,
    units: Vec<u16>,
}

impl Decoder {
    fn with_capacity(capacity: usize) -> Self {
        Decoder {
            output: String::with_capacity(capacity),
            bytes: Vec::new(),
            units: Vec::new(),
        }
    }

    fn push_byte(&mut self, byte: u8) {
        self.flush_units();
        self.bytes.push(byte);
    }

    fn push_unit(&mut self, unit: u16) {
        self.flush_bytes();
        self.units.push(unit);
    }

    fn push_char(&mut self, ch: char) {
        self.flush_bytes();
        self.flush_units();
        self.output.push(ch);
    }

    fn flush_bytes(&mut self) {
        if !self.bytes.is_empty() {
            self.output.push_str(&String::from_utf8_lossy(&self.bytes));
            self.bytes.clear();
        }
    }

    fn flush_units(&mut self) {
        if !self.units.is_empty() {
            self.output.extend(
                char::decode_utf16(self.units.drain(..))
                    .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
            );
        }
    }

    fn finish(mut self) -> String {
        self.flush_bytes();
        self.flush_units();
        self.output
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn encode_unreserved_passthrough() {
        let s = "ABCxyz0189-._~";
        assert_eq!(encode(s), s);
    }

    #[test]
    fn encode_reserved_and_multibyte() {
        assert_eq!(encode("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode("http://x/y?z"), "http%3A%2F%2Fx%2Fy%3Fz");
        assert_eq!(encode("\n"), "%0A");
        assert_eq!(encode("少女"), "%E5%B0%91%E5%A5%B3");
        assert_eq!(encode(""), "");
    }

    #[test]
    fn decode_basics() {
        assert_eq!(decode("a+b"), "a b");
        assert_eq!(decode("%41"), "A");
        assert_eq!(decode("%u0041"), "A");
        assert_eq!(decode("%e5%b0%91%E5%A5%B3"), "少女");
    }

    #[test]
    fn decode_malformed_is_literal() {
        assert_eq!(decode("%zz"), "%zz");
        assert_eq!(decode("%4"), "%4");
        assert_eq!(decode("100%"), "100%");
        assert_eq!(decode("%u00"), "%u00");
        assert_eq!(decode("%u00zz"), "%u00zz");
    }

    #[test]
    fn decode_mixed_runs() {
        // a literal ASCII char does not break a multi-byte run
        assert_eq!(decode("%E7%B5%82x"), "終x");
        assert_eq!(decode("終%E6%9C%AB旅"), "終末旅");
        assert_eq!(decode("%uD83D%uDE00"), "\u{1F600}");
        assert_eq!(decode("%u7D42%E6%9C%AB"), "終末");
    }

    #[test]
    fn decode_invalid_utf8_is_replaced() {
        assert_eq!(decode("%FF"), "\u{FFFD}");
    }

    #[test]
    fn round_trip() {
        for s in &[
            "",
            "plain",
            " !\"#$%&'()*+,-./0123456789:;<=>?@[\\]^_`{|}~",
            "Hello Ladies + Gentlemen, a signed OAuth request!",
            "終末旅行",
            "emoji \u{1F600} and ü",
        ] {
            assert_eq!(&decode(&encode(s)), s);
        }
    }

    #[test]
    fn parse_query_pairs() {
        assert_eq!(
            parse_query("a=1&b=2"),
            vec![
                (Some("a".to_string()), "1".to_string()),
                (Some("b".to_string()), "2".to_string())
            ]
        );
        assert_eq!(
            parse_query("a=1&"),
            vec![(Some("a".to_string()), "1".to_string()), (None, String::new())]
        );
        assert_eq!(parse_query("x"), vec![(None, "x".to_string())]);
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn parse_query_first_equals_splits() {
        assert_eq!(
            parse_query("oauth_token==&k=a%3Db"),
            vec![
                (Some("oauth_token".to_string()), "=".to_string()),
                (Some("k".to_string()), "a=b".to_string())
            ]
        );
    }

    #[test]
    fn parse_query_raw() {
        assert_eq!(
            parse_query_with("a%20b=c+d", false),
            vec![(Some("a%20b".to_string()), "c+d".to_string())]
        );
    }
}
