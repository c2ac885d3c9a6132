//! Size/color label resolution for variants.
//!
//! Catalog data arrives in several shapes: variants may reference option
//! values by ID, carry a free-form name → title object, or carry nothing
//! usable at all. Resolution tries, per axis and in order:
//!
//! 1. value-ID lookup against the product's option table (or direct key
//!    matching when the variant carries a name → title object);
//! 2. matching tokens of the variant title against known value titles;
//! 3. the [`UNKNOWN_LABEL`] sentinel.
//!
//! Size and color are resolved independently: a size found by ID lookup does
//! not stop the title fallback from recovering a missing color.

use std::collections::{HashMap, HashSet};

use crate::products::{
    LabeledVariant, OptionsRepr, Product, ProductOption, ResolvedLabels, Variant, UNKNOWN_LABEL,
};

/// Which display axis an option describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Size,
    Color,
    Other,
}

/// Classifies an option axis by case-insensitive substring match on its type
/// and name. Size wins when both match.
#[must_use]
pub fn classify(option: &ProductOption) -> OptionKind {
    let name = option.name.to_lowercase();
    let option_type = option.option_type.to_lowercase();
    let mentions = |needle: &str| name.contains(needle) || option_type.contains(needle);

    if mentions("size") {
        OptionKind::Size
    } else if mentions("color") || mentions("colour") {
        OptionKind::Color
    } else {
        OptionKind::Other
    }
}

fn is_size_key(key: &str) -> bool {
    key.to_lowercase().contains("size")
}

fn is_color_key(key: &str) -> bool {
    let key = key.to_lowercase();
    key.contains("color") || key.contains("colour")
}

#[derive(Debug, Clone, Copy)]
struct ValueMeta<'a> {
    kind: OptionKind,
    title: &'a str,
}

/// Maps every option value ID to its axis kind and display title. Values with
/// an empty title fall back to their ID; values with an empty ID are skipped.
fn build_value_lookup(options: &[ProductOption]) -> HashMap<&str, ValueMeta<'_>> {
    let mut lookup = HashMap::new();
    for option in options {
        let kind = classify(option);
        for value in &option.values {
            if value.id.is_empty() {
                continue;
            }
            let title = if value.title.is_empty() {
                value.id.as_str()
            } else {
                value.title.as_str()
            };
            lookup.insert(value.id.as_str(), ValueMeta { kind, title });
        }
    }
    lookup
}

/// Partial result while strategies run; `None` means still unresolved.
#[derive(Debug, Default)]
struct Partial {
    size: Option<String>,
    color: Option<String>,
}

impl Partial {
    fn is_complete(&self) -> bool {
        self.size.is_some() && self.color.is_some()
    }
}

fn resolve_from_options(repr: &OptionsRepr, options: &[ProductOption]) -> Partial {
    let mut partial = Partial::default();
    match repr {
        OptionsRepr::ByIdList(ids) => {
            let lookup = build_value_lookup(options);
            for id in ids {
                let Some(meta) = lookup.get(id.as_str()) else {
                    continue;
                };
                match meta.kind {
                    OptionKind::Size if partial.size.is_none() => {
                        partial.size = Some(meta.title.to_string());
                    }
                    OptionKind::Color if partial.color.is_none() => {
                        partial.color = Some(meta.title.to_string());
                    }
                    _ => {}
                }
            }
        }
        OptionsRepr::ByNameMap(pairs) => {
            for (key, value) in pairs {
                if value.is_empty() {
                    continue;
                }
                if partial.size.is_none() && is_size_key(key) {
                    partial.size = Some(value.clone());
                }
                if partial.color.is_none() && is_color_key(key) {
                    partial.color = Some(value.clone());
                }
            }
        }
    }
    partial
}

/// Splits a variant title on `/` and then `-`, trimming and dropping empty
/// tokens. `"Heather Navy / 2XL"` yields `["Heather Navy", "2XL"]`.
fn title_tokens(title: &str) -> Vec<&str> {
    title
        .split('/')
        .flat_map(|part| part.split('-'))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn resolve_from_title(title: &str, options: &[ProductOption]) -> Partial {
    let mut known_sizes = HashSet::new();
    let mut known_colors = HashSet::new();
    for option in options {
        let bucket = match classify(option) {
            OptionKind::Size => &mut known_sizes,
            OptionKind::Color => &mut known_colors,
            OptionKind::Other => continue,
        };
        bucket.extend(option.values.iter().map(|v| v.title.as_str()));
    }

    let tokens = title_tokens(title);
    let first_in = |known: &HashSet<&str>| {
        tokens
            .iter()
            .find(|t| known.contains(**t))
            .map(|t| (*t).to_string())
    };

    Partial {
        size: first_in(&known_sizes),
        color: first_in(&known_colors),
    }
}

/// Resolves the human-readable size and color of `variant`.
///
/// Total: any input, including a variant with no options or an empty option
/// table, yields two strings; unresolved axes are [`UNKNOWN_LABEL`].
#[must_use]
pub fn resolve_labels(variant: &Variant, options: &[ProductOption]) -> ResolvedLabels {
    let mut partial = variant
        .options
        .as_ref()
        .map(|repr| resolve_from_options(repr, options))
        .unwrap_or_default();

    if !partial.is_complete() {
        let fallback = resolve_from_title(&variant.title, options);
        partial.size = partial.size.or(fallback.size);
        partial.color = partial.color.or(fallback.color);
    }

    ResolvedLabels {
        size: partial.size.unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        color: partial.color.unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
    }
}

/// Resolves labels for every variant of `product`, preserving order.
#[must_use]
pub fn label_variants(product: &Product) -> Vec<LabeledVariant> {
    product
        .variants
        .iter()
        .map(|variant| LabeledVariant {
            labels: resolve_labels(variant, &product.options),
            variant: variant.clone(),
        })
        .collect()
}

#[cfg(test)]
#[path = "options_test.rs"]
mod tests;
