//! # String Utilities

use core::ops::Range;

/// Replace every byte covered by `spans` with an ASCII space.
///
/// The result has the same byte length as `text`, so offsets into it stay
/// valid offsets into the original. Spans must fall on char boundaries, which
/// holds for regex match ranges; the result is then valid UTF-8.
pub fn blank_spans<I>(
    text: &str,
    spans: I,
) -> String
where
    I: IntoIterator<Item = Range<usize>>,
{
    let mut bytes = text.as_bytes().to_vec();
    for span in spans {
        bytes[span].fill(b' ');
    }
    match String::from_utf8(bytes) {
        Ok(s) => s,
        // only reachable with spans that split a multibyte char.
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}
