//! Response parser for the batchexecute stream
//!
//! The endpoint answers with newline-delimited chunks. Only the line that
//! carries the translate RPC id matters; it wraps a JSON-encoded string
//! which in turn holds the positional translation payload:
//!
//! ```text
//! response[0][2]          detected source language
//! response[0][0]          source pronunciation
//! response[1][0]          variants (one or two)
//! response[1][0][0][1]    destination pronunciation
//! response[1][0][0][5]    sentence fragments, first field is text
//! ```

use bytes::{Buf, BytesMut};
use futures_util::StreamExt;
use serde_json::Value;
use tracing::debug;

use crate::core::errors::{ParseError, TransportError};
use crate::core::languages;
use crate::core::models::{Language, TranslatedResult, TranslatedText};
use crate::core::rpc::TRANSLATE_RPC_ID;
use crate::core::transport::BodyStream;

/// Splits a chunked body into lines
#[derive(Debug, Default)]
pub struct LineScanner {
    buffer: BytesMut,
}

impl LineScanner {
    /// Empty scanner
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of the body
    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Pop the next complete line, without its terminator
    pub fn next_line(&mut self) -> Option<String> {
        let pos = self.buffer.iter().position(|b| *b == b'\n')?;
        let line = self.buffer.split_to(pos);
        self.buffer.advance(1);
        Some(Self::decode(&line))
    }

    /// Drain whatever is left once the body has ended
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest = self.buffer.split();
        Some(Self::decode(&rest))
    }

    fn decode(line: &[u8]) -> String {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        String::from_utf8_lossy(line).into_owned()
    }
}

fn is_marker_line(line: &str) -> bool {
    line.contains(TRANSLATE_RPC_ID)
}

/// Read the body until the marker line shows up.
///
/// Returns `Ok(None)` when the body ends without one. Chunks after the
/// marker line are never polled.
pub async fn find_marker_line(mut body: BodyStream) -> Result<Option<String>, TransportError> {
    let mut scanner = LineScanner::new();

    while let Some(chunk) = body.next().await {
        scanner.push(&chunk?);
        while let Some(line) = scanner.next_line() {
            if is_marker_line(&line) {
                return Ok(Some(line));
            }
        }
    }

    Ok(scanner.finish().filter(|line| is_marker_line(line)))
}

/// Positional view into the untyped payload, tracking where it points
struct Cursor<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> Cursor<'a> {
    fn root(value: &'a Value) -> Self {
        Self {
            value,
            path: "response".to_string(),
        }
    }

    fn shape(&self, expected: &'static str) -> ParseError {
        ParseError::Shape {
            path: self.path.clone(),
            expected,
        }
    }

    fn array(&self) -> Result<&'a Vec<Value>, ParseError> {
        self.value.as_array().ok_or_else(|| self.shape("array"))
    }

    fn get(&self, index: usize) -> Result<Cursor<'a>, ParseError> {
        let value = self
            .array()?
            .get(index)
            .ok_or_else(|| self.shape("more elements"))?;
        Ok(Cursor {
            value,
            path: format!("{}[{}]", self.path, index),
        })
    }

    fn items(&self) -> Result<Vec<Cursor<'a>>, ParseError> {
        Ok(self
            .array()?
            .iter()
            .enumerate()
            .map(|(i, value)| Cursor {
                value,
                path: format!("{}[{}]", self.path, i),
            })
            .collect())
    }

    fn str(&self) -> Result<&'a str, ParseError> {
        self.value.as_str().ok_or_else(|| self.shape("string"))
    }

    fn opt_str(&self) -> Result<Option<String>, ParseError> {
        match self.value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            _ => Err(self.shape("string or null")),
        }
    }
}

/// The shapes a translation payload comes in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseVariant {
    /// Input was a URL; the text comes back unchanged, without pronunciation
    UrlOnly {
        /// The input URL
        text: String,
    },
    /// One translation assembled from sentence fragments
    Single {
        /// Concatenated fragments
        text: String,
        /// Source romanization at `response[0][0]`
        src_pronunciation: Option<String>,
        /// Destination romanization at `response[1][0][0][1]`
        dest_pronunciation: Option<String>,
    },
    /// Feminine and masculine variants
    Gendered {
        /// First variant
        feminine: String,
        /// Second variant
        masculine: String,
        /// Source romanization at `response[0][0]`
        src_pronunciation: Option<String>,
        /// Destination romanization at `response[1][0][0][1]`
        dest_pronunciation: Option<String>,
    },
}

/// Decoded marker line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePayload {
    /// Language code at `response[0][2]`
    pub detected_lang: String,
    /// Translated text and pronunciations
    pub variant: ResponseVariant,
}

impl ResponsePayload {
    /// Combine with the requested destination into the caller-facing result
    pub fn into_result(self, dest_lang: &str) -> Result<TranslatedResult, ParseError> {
        if languages::language_name(&self.detected_lang.to_lowercase()).is_none() {
            return Err(ParseError::UnknownLanguage(self.detected_lang));
        }

        let (text, src_pronunciation, dest_pronunciation) = match self.variant {
            ResponseVariant::UrlOnly { text } => (TranslatedText::Single(text), None, None),
            ResponseVariant::Single {
                text,
                src_pronunciation,
                dest_pronunciation,
            } => (TranslatedText::Single(text), src_pronunciation, dest_pronunciation),
            ResponseVariant::Gendered {
                feminine,
                masculine,
                src_pronunciation,
                dest_pronunciation,
            } => (
                TranslatedText::Gendered { feminine, masculine },
                src_pronunciation,
                dest_pronunciation,
            ),
        };

        Ok(TranslatedResult {
            text,
            src_lang: Language::new(self.detected_lang),
            dest_lang: Language::new(dest_lang),
            src_pronunciation,
            dest_pronunciation,
        })
    }
}

/// Decode the marker line into its payload
pub fn parse_marker_line(line: &str) -> Result<ResponsePayload, ParseError> {
    let outer: Value = serde_json::from_str(line)?;
    let inner = Cursor {
        value: &outer,
        path: "line".to_string(),
    }
    .get(0)?
    .get(2)?
    .str()?;

    let response: Value = serde_json::from_str(inner)?;
    parse_payload(&response)
}

fn parse_payload(response: &Value) -> Result<ResponsePayload, ParseError> {
    let root = Cursor::root(response);
    let detected_lang = root.get(0)?.get(2)?.str()?.to_string();
    let variants = root.get(1)?.get(0)?.items()?;

    let variant = match variants.as_slice() {
        [only] => {
            let fields = only.array()?;
            if fields.len() <= 5 {
                ResponseVariant::UrlOnly {
                    text: only.get(0)?.str()?.to_string(),
                }
            } else {
                let mut text = String::new();
                for sentence in only.get(5)?.items()? {
                    text.push_str(sentence.get(0)?.str()?.trim());
                    text.push(' ');
                }
                ResponseVariant::Single {
                    text,
                    src_pronunciation: root.get(0)?.get(0)?.opt_str()?,
                    dest_pronunciation: only.get(1)?.opt_str()?,
                }
            }
        }
        [first, second] => ResponseVariant::Gendered {
            feminine: first.get(0)?.str()?.to_string(),
            masculine: second.get(0)?.str()?.to_string(),
            src_pronunciation: root.get(0)?.get(0)?.opt_str()?,
            dest_pronunciation: first.get(1)?.opt_str()?,
        },
        other => return Err(ParseError::UnexpectedVariantCount(other.len())),
    };

    debug!(
        "Parsed {} response, detected language {}",
        variant_name(&variant),
        detected_lang
    );

    Ok(ResponsePayload {
        detected_lang,
        variant,
    })
}

fn variant_name(variant: &ResponseVariant) -> &'static str {
    match variant {
        ResponseVariant::UrlOnly { .. } => "url-only",
        ResponseVariant::Single { .. } => "single",
        ResponseVariant::Gendered { .. } => "gendered",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use bytes::Bytes;
    use futures_util::stream;
    use serde_json::json;

    /// Wrap an inner payload the way the endpoint does
    pub(crate) fn marker_line(response: &Value) -> String {
        let inner = serde_json::to_string(response).unwrap();
        serde_json::to_string(&json!([["wrb.fr", "MkEWBc", inner, null, null, null, "generic"]]))
            .unwrap()
    }

    pub(crate) fn single_response() -> Value {
        json!([
            ["Helo wɝld", null, "en", [[["Hello", "world"]]]],
            [[[
                null,
                "ˈola ˈmundo",
                null,
                null,
                null,
                [["Hola ", null, null, []], [" mundo", null, null, []]]
            ]], "es", 1, "en", ["Hello world", "en", "es", true]]
        ])
    }

    pub(crate) fn gendered_response() -> Value {
        json!([
            [null, null, "en"],
            [[
                ["Estoy cansada", null, null, null, null, [["Estoy cansada"]], "(feminine)"],
                ["Estoy cansado", null, null, null, null, [["Estoy cansado"]], "(masculine)"]
            ], "es"]
        ])
    }

    pub(crate) fn body_of(chunks: Vec<&str>) -> BodyStream {
        let chunks: Vec<_> = chunks
            .into_iter()
            .map(|c| Ok::<_, TransportError>(Bytes::from(c.to_string())))
            .collect();
        stream::iter(chunks).boxed()
    }

    #[test]
    fn test_single_variant_concatenates_fragments() {
        let payload = parse_marker_line(&marker_line(&single_response())).unwrap();
        assert_eq!(payload.detected_lang, "en");
        assert_eq!(
            payload.variant,
            ResponseVariant::Single {
                text: "Hola mundo ".to_string(),
                src_pronunciation: Some("Helo wɝld".to_string()),
                dest_pronunciation: Some("ˈola ˈmundo".to_string()),
            }
        );
    }

    #[test]
    fn test_gendered_variants() {
        let result = parse_marker_line(&marker_line(&gendered_response()))
            .unwrap()
            .into_result("es")
            .unwrap();

        assert_eq!(
            result.text,
            TranslatedText::Gendered {
                feminine: "Estoy cansada".to_string(),
                masculine: "Estoy cansado".to_string(),
            }
        );
        assert_eq!(result.src_pronunciation, None);
        assert_eq!(result.dest_pronunciation, None);
        assert_eq!(result.to_string(), "Estoy cansado");
    }

    #[test]
    fn test_url_only_response() {
        let response = json!([
            [null, null, "en"],
            [[["https://example.com/", null, null]], "fr"]
        ]);
        let result = parse_marker_line(&marker_line(&response))
            .unwrap()
            .into_result("fr")
            .unwrap();

        assert_eq!(result.text, TranslatedText::Single("https://example.com/".to_string()));
        assert_eq!(result.src_pronunciation, None);
        assert_eq!(result.dest_pronunciation, None);
        assert_eq!(result.src_lang.name.as_deref(), Some("english"));
        assert_eq!(result.dest_lang.name.as_deref(), Some("french"));
    }

    #[test]
    fn test_detected_language_is_case_insensitive() {
        let response = json!([
            [null, null, "zh-CN"],
            [[[null, null, null, null, null, [["Hello"]]]], "en"]
        ]);
        let result = parse_marker_line(&marker_line(&response))
            .unwrap()
            .into_result("en")
            .unwrap();
        assert_eq!(result.src_lang.code, "zh-CN");
        assert_eq!(result.src_lang.name.as_deref(), Some("chinese (simplified)"));
    }

    #[test]
    fn test_unknown_detected_language() {
        let response = json!([
            [null, null, "xx-unknown"],
            [[[null, null, null, null, null, [["Hello"]]]], "en"]
        ]);
        let err = parse_marker_line(&marker_line(&response))
            .unwrap()
            .into_result("en")
            .unwrap_err();
        assert!(matches!(err, ParseError::UnknownLanguage(code) if code == "xx-unknown"));
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(
            parse_marker_line("not json MkEWBc"),
            Err(ParseError::Json(_))
        ));

        let inner_not_json = r#"[["wrb.fr","MkEWBc","{oops",null]]"#;
        assert!(matches!(
            parse_marker_line(inner_not_json),
            Err(ParseError::Json(_))
        ));

        let err = parse_marker_line(&marker_line(&json!([[null, null, 7]]))).unwrap_err();
        match err {
            ParseError::Shape { path, expected } => {
                assert_eq!(path, "response[0][2]");
                assert_eq!(expected, "string");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_variant_count() {
        let response = json!([[null, null, "en"], [[["a"], ["b"], ["c"]], "es"]]);
        assert!(matches!(
            parse_marker_line(&marker_line(&response)),
            Err(ParseError::UnexpectedVariantCount(3))
        ));
    }

    #[test]
    fn test_line_scanner_handles_split_chunks() {
        let mut scanner = LineScanner::new();
        scanner.push(b")]}'\r\n\r\n12");
        assert_eq!(scanner.next_line().as_deref(), Some(")]}'"));
        assert_eq!(scanner.next_line().as_deref(), Some(""));
        assert_eq!(scanner.next_line(), None);
        scanner.push(b"34\n[[\"di\"");
        assert_eq!(scanner.next_line().as_deref(), Some("1234"));
        assert_eq!(scanner.finish().as_deref(), Some("[[\"di\""));
        assert_eq!(scanner.finish(), None);
    }

    #[tokio::test]
    async fn test_find_marker_line_across_chunks() {
        let line = marker_line(&single_response());
        let (head, tail) = line.split_at(10);
        let first = format!(")]}}'\n\n1234\n{}", head);
        let second = format!("{}\n58\n[[\"di\",17]]\n", tail);

        let found = find_marker_line(body_of(vec![first.as_str(), second.as_str()])).await.unwrap();
        assert_eq!(found, Some(line));
    }

    #[tokio::test]
    async fn test_find_marker_line_without_trailing_newline() {
        let line = marker_line(&gendered_response());
        let found = find_marker_line(body_of(vec![line.as_str()])).await.unwrap();
        assert_eq!(found, Some(line));
    }

    #[tokio::test]
    async fn test_find_marker_line_missing() {
        let found = find_marker_line(body_of(vec![")]}'\n", "[[\"e\",4,null,null,37]]\n"]))
            .await
            .unwrap();
        assert_eq!(found, None);
    }
}
