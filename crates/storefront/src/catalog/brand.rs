//! Brand detection from product names.
//!
//! Square items have no brand field; the shop's naming convention puts the
//! brand (or its abbreviation) at the start of every item name.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Brand used when no pattern matches.
pub const DEFAULT_BRAND: &str = "Color Wow";

/// Category name for men's grooming products.
pub const MENS_CATEGORY: &str = "Mens Products";

pub const THE_DOUX: &str = "The Doux";

/// Ordered name patterns; the first match wins.
const BRAND_PATTERNS: &[(&str, &str)] = &[
    (r"^b&b\s|^bumble", "Bumble and Bumble"),
    (r"^olaplex", "Olaplex"),
    (r"^ouai", "OUAI"),
    (r"^living proof", "Living Proof"),
    (r"^cw\s", "Color Wow"),
    (r"^doux\b", THE_DOUX),
    (r"^the doux", THE_DOUX),
    (r"^redken brews", "Redken Brews"),
    (r"^american crew", "American Crew"),
    (r"^18\.21\s*man\s*made", "18.21 Man Made"),
    (r"^pete\s*&\s*pedro", "Pete & Pedro"),
    (r"^big sexy hair|^sexy hair style", "Sexy Hair"),
    (r"^l3vel3", "L3VEL3"),
    (r"^the good sh[*i]t", "The Good Sh*t"),
];

/// Brands whose products belong in the men's category.
pub const MENS_BRANDS: &[&str] = &[
    "Redken Brews",
    "American Crew",
    "18.21 Man Made",
    "Pete & Pedro",
    "Sexy Hair",
    "L3VEL3",
    "The Good Sh*t",
];

static COMPILED: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    BRAND_PATTERNS
        .iter()
        .map(|&(pattern, brand)| {
            let re = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("brand patterns are valid regular expressions");
            (re, brand)
        })
        .collect()
});

/// The brand for an item name.
#[must_use]
pub fn extract_brand(name: &str) -> &'static str {
    COMPILED
        .iter()
        .find(|(re, _)| re.is_match(name))
        .map_or(DEFAULT_BRAND, |&(_, brand)| brand)
}

#[must_use]
pub fn is_mens_brand(brand: &str) -> bool {
    MENS_BRANDS.contains(&brand)
}

/// Square's category when set, else the men's category for men's brands.
#[must_use]
pub fn resolve_category(category: Option<String>, brand: &str) -> Option<String> {
    category.or_else(|| is_mens_brand(brand).then(|| MENS_CATEGORY.to_string()))
}
