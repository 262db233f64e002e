//! Source text decoding.
//!
//! The source encoding is always declared; bytes that do not fit the declared
//! encoding fail the load instead of being silently replaced.

use std::borrow::Cow;

use encoding_rs::Encoding;

use crate::error::{IngestionError, Result};

/// Resolve a WHATWG encoding label ("latin1", "iso-8859-1", "utf-8", ...)
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| IngestionError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// Decode complete source bytes
///
/// A BOM matching the declared encoding is stripped. Returns `None` when the
/// input contains sequences that are malformed for `encoding`.
pub fn decode_source<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Option<Cow<'a, str>> {
    let bytes = match Encoding::for_bom(bytes) {
        Some((bom_encoding, bom_len)) if bom_encoding == encoding => &bytes[bom_len..],
        _ => bytes,
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        None
    } else {
        Some(text)
    }
}
