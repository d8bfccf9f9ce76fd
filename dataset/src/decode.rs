//! Payload decoding: optional gzip, then JSON.

use std::io::Read;

use flate2::read::GzDecoder;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{DatasetError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Whether `bytes` start with the gzip magic number.
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Turn a fetched payload into text, inflating it first if it is gzipped.
///
/// Compression is sniffed from the content, so a plain file served under a
/// `.gz` name still decodes.
pub fn decode_text(path: &str, bytes: Vec<u8>) -> Result<String> {
    if is_gzip(&bytes) {
        let mut text = String::new();
        GzDecoder::new(bytes.as_slice())
            .read_to_string(&mut text)
            .map_err(|e| DatasetError::Decode {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        debug!("Inflated {path} to {} bytes", text.len());
        Ok(text)
    } else {
        String::from_utf8(bytes).map_err(|e| DatasetError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Keys that may carry a point's label, in order of precedence. Word
/// families publish `word`, token families `token`; older files use
/// `label`.
const LABEL_KEYS: [&str; 3] = ["word", "token", "label"];

/// One entry of a reduced dataset, as published.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub word: String,
    pub cluster: Option<i32>,
    pub edges: Option<Vec<i64>>,
}

impl RawPoint {
    /// Read one entry. Returns `None` unless it has numeric `x`/`y`/`z`
    /// and a string label.
    ///
    /// Integral floats are accepted for `cluster` and edge indices. A
    /// non-integral cluster is treated as missing and non-integral edge
    /// indices are dropped one by one.
    pub fn from_value(entry: &Value) -> Option<Self> {
        let coordinate = |key: &str| entry.get(key).and_then(Value::as_f64).map(|v| v as f32);
        let word = LABEL_KEYS
            .iter()
            .find_map(|key| entry.get(*key).and_then(Value::as_str))?;

        let cluster = entry
            .get("cluster")
            .and_then(as_integer)
            .and_then(|c| i32::try_from(c).ok());
        let edges = entry
            .get("edges")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(as_integer).collect());

        Some(Self {
            x: coordinate("x")?,
            y: coordinate("y")?,
            z: coordinate("z")?,
            word: word.to_string(),
            cluster,
            edges,
        })
    }
}

/// An integer, or a float with no fractional part that fits in `i64`.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = value.as_f64()?;
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

/// Parse a JSON array of raw points, skipping entries that do not have
/// numeric coordinates and a label.
pub fn parse_points(path: &str, text: &str) -> Result<Vec<RawPoint>> {
    let entries: Vec<Value> = serde_json::from_str(text)?;
    let total = entries.len();

    let points: Vec<RawPoint> = entries.iter().filter_map(RawPoint::from_value).collect();

    if points.len() < total {
        warn!("Skipped {} malformed entries in {path}", total - points.len());
    }
    if points.is_empty() {
        return Err(DatasetError::Empty(path.to_string()));
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn gzip(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_decode_plain_and_gzip() {
        let text = r#"[{"x": 1, "y": 2, "z": 3, "word": "a"}]"#;
        assert_eq!(decode_text("p", text.as_bytes().to_vec()).unwrap(), text);
        assert_eq!(decode_text("p.gz", gzip(text)).unwrap(), text);
    }

    #[test]
    fn test_corrupt_gzip_is_decode_error() {
        // Gzip magic followed by an unsupported compression method.
        let bytes = vec![0x1f, 0x8b, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff];
        assert!(matches!(
            decode_text("p.gz", bytes),
            Err(DatasetError::Decode { .. })
        ));
    }

    #[test]
    fn test_label_aliases_and_defaults() {
        let points = parse_points(
            "p",
            r#"[
                {"x": 0, "y": 0, "z": 0, "word": "cat", "cluster": 3, "edges": [1]},
                {"x": 1, "y": 1, "z": 1, "token": "Ġthe"},
                {"x": 2, "y": 2, "z": 2, "label": "dog", "cluster": null}
            ]"#,
        )
        .unwrap();

        let labels: Vec<&str> = points.iter().map(|p| p.word.as_str()).collect();
        assert_eq!(labels, vec!["cat", "Ġthe", "dog"]);
        assert_eq!(points[0].cluster, Some(3));
        assert_eq!(points[1].cluster, None);
        assert_eq!(points[1].edges, None);
        assert_eq!(points[2].cluster, None);
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let points = parse_points(
            "p",
            r#"[
                {"x": 0, "y": 0, "z": 0, "word": "ok"},
                {"x": "zero", "y": 0, "z": 0, "word": "bad-x"},
                {"x": 0, "y": 0, "word": "no-z"},
                {"x": 0, "y": 0, "z": 0}
            ]"#,
        )
        .unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_word_takes_precedence_over_label() {
        let points = parse_points(
            "p",
            r#"[
                {"x": 0, "y": 0, "z": 0, "word": "cat", "label": "Cat (noun)"},
                {"x": 1, "y": 1, "z": 1, "token": 5, "label": "dog"}
            ]"#,
        )
        .unwrap();

        let labels: Vec<&str> = points.iter().map(|p| p.word.as_str()).collect();
        assert_eq!(labels, vec!["cat", "dog"]);
    }

    #[test]
    fn test_integral_floats_accepted() {
        let points = parse_points(
            "p",
            r#"[
                {"x": 0, "y": 0, "z": 0, "word": "a", "cluster": 2.0, "edges": [1.0, 1.5, -1, "2"]},
                {"x": 1, "y": 1, "z": 1, "word": "b", "cluster": 2.5, "edges": [0.0]}
            ]"#,
        )
        .unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].cluster, Some(2));
        assert_eq!(points[0].edges, Some(vec![1, -1]));
        assert_eq!(points[1].cluster, None);
        assert_eq!(points[1].edges, Some(vec![0]));
    }

    #[test]
    fn test_empty_or_non_array_payload() {
        assert!(matches!(parse_points("p", "[]"), Err(DatasetError::Empty(_))));
        assert!(matches!(
            parse_points("p", r#"{"x": 1}"#),
            Err(DatasetError::Serialization(_))
        ));
    }
}
