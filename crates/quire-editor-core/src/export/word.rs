//! Legacy word processor export.
//!
//! The output is the markup itself, labelled as `application/msword`. Word
//! opens such files by sniffing the HTML, so no binary `.doc` structure is
//! produced. Formatting survives only as far as the HTML import does.

pub const WORD_MEDIA_TYPE: &str = "application/msword";

/// Wrap the raw markup as the bytes of a `.doc` file.
pub fn to_word_like(content: &str) -> Vec<u8> {
    content.as_bytes().to_vec()
}
