use sha2::{Digest, Sha256};

/// Outcome of the conditional-fetch check. Must be decided before any
/// pagination header is emitted: a not-modified response carries
/// neither a cursor nor a new tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Freshness {
    NotModified,
    /// The weak validator to attach, already in `W/<hex>` form.
    Fresh(String),
}

/// Stable fingerprint of a result page, taken over the first row's id.
pub fn generate(id: &str) -> String {
    hex::encode(Sha256::digest(id.as_bytes()))
}

/// Compare the page fingerprint against the client's `If-None-Match`
/// value. Matching follows the original behavior: the header may carry
/// several validators, a substring hit counts.
pub fn evaluate(first_id: &str, if_none_match: Option<&str>) -> Freshness {
    let tag = generate(first_id);
    match if_none_match {
        Some(header) if !header.is_empty() && header.contains(&tag) => Freshness::NotModified,
        _ => Freshness::Fresh(format!("W/{}", tag)),
    }
}
