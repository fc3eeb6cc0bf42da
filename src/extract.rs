//! Post title extraction
//!
//! hikr renders the photo title as the first link inside the `div13` content
//! block. The extractor finds it with plain first-occurrence substring
//! searches, not an HTML parse:
//!
//! 1. the first `div13` in the document,
//! 2. the first `</div>` after it, which closes the block,
//! 3. inside the block, the first `<a`, the first `>` after it, and the first
//!    `</a>` after that.
//!
//! The text between that `>` and `</a>` is returned verbatim, including any
//! surrounding whitespace or nested markup. Every step short-circuits with an
//! [`ExtractError`] as soon as a delimiter is missing.

use crate::error::ExtractError;

/// Marker identifying the content block that holds the title link
pub const CONTENT_BLOCK_MARKER: &str = "div13";

const BLOCK_END: &str = "</div>";
const LINK_START: &str = "<a";
const TAG_END: &str = ">";
const LINK_END: &str = "</a>";

/// Extract the post title from the raw bytes of a post page
///
/// Invalid UTF-8 sequences are replaced with U+FFFD before searching.
///
/// # Examples
///
/// ```
/// use hikr_dl::extract::extract_title;
///
/// let html = br#"<div class="div13"><a href="/gallery/">My Title</a></div>"#;
/// assert_eq!(extract_title(html).unwrap(), "My Title");
/// ```
pub fn extract_title(html: &[u8]) -> Result<String, ExtractError> {
    let text = String::from_utf8_lossy(html);
    extract_title_str(&text).map(str::to_string)
}

/// Same as [`extract_title`] on text that is already decoded
pub fn extract_title_str(html: &str) -> Result<&str, ExtractError> {
    let block = content_block(html)?;
    link_text(block)
}

/// The text from the marker up to, not including, the closing `</div>`
fn content_block(html: &str) -> Result<&str, ExtractError> {
    let start = html
        .find(CONTENT_BLOCK_MARKER)
        .ok_or(ExtractError::MarkerNotFound)?;
    let rest = &html[start..];
    let end = rest.find(BLOCK_END).ok_or(ExtractError::UnterminatedBlock)?;
    Ok(&rest[..end])
}

fn link_text(block: &str) -> Result<&str, ExtractError> {
    let link = block
        .find(LINK_START)
        .map(|pos| &block[pos..])
        .ok_or(ExtractError::LinkNotFound)?;
    let inner = link
        .find(TAG_END)
        .map(|pos| &link[pos + TAG_END.len()..])
        .ok_or(ExtractError::LinkNotFound)?;
    let end = inner.find(LINK_END).ok_or(ExtractError::LinkNotFound)?;
    Ok(&inner[..end])
}
