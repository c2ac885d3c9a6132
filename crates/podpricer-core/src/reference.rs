//! Selection of the reference ("Large") variant that anchors per-variant
//! pricing.

use crate::options::resolve_labels;
use crate::products::{ProductOption, Variant};

/// Size labels accepted as "Large", compared case-insensitively after
/// trimming.
const LARGE_SIZE_LABELS: [&str; 2] = ["large", "l"];

/// How the reference variant was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceMatch {
    /// The variant's resolved size is "Large"/"L".
    Large,
    /// No Large variant exists; the first variant stands in.
    FirstFallback,
}

/// Returns the first variant whose resolved size is "large" or "l"; otherwise
/// the first variant; `None` only for an empty variant list.
#[must_use]
pub fn select_reference<'a>(
    variants: &'a [Variant],
    options: &[ProductOption],
) -> Option<&'a Variant> {
    select_reference_with_match(variants, options).map(|(variant, _)| variant)
}

/// Like [`select_reference`], also reporting whether the Large match or the
/// first-variant fallback was used.
#[must_use]
pub fn select_reference_with_match<'a>(
    variants: &'a [Variant],
    options: &[ProductOption],
) -> Option<(&'a Variant, ReferenceMatch)> {
    variants
        .iter()
        .find(|v| is_large(&resolve_labels(v, options).size))
        .map(|v| (v, ReferenceMatch::Large))
        .or_else(|| variants.first().map(|v| (v, ReferenceMatch::FirstFallback)))
}

fn is_large(size: &str) -> bool {
    let size = size.trim().to_lowercase();
    LARGE_SIZE_LABELS.contains(&size.as_str())
}
