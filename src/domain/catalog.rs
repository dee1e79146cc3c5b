//! Catalog Domain Models
//!
//! Blueprints, print providers and size variants as the external catalog
//! describes them, plus the local size/price allow-list that decides which
//! variants a canvas product is offered in.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::SizePrice;

/// Title of the catalog blueprint every canvas product is built on
pub const CANVAS_BLUEPRINT_TITLE: &str = "Matte Canvas, Stretched, 1.25\"";

/// Glyphs the catalog uses interchangeably for the inch mark
const INCH_MARKS: [char; 7] = [
    '"',
    '\u{201C}', // left double quotation mark
    '\u{201D}', // right double quotation mark
    '\u{201E}',
    '\u{201F}',
    '\u{2033}', // double prime
    '\u{FF02}', // fullwidth quotation mark
];

// ============================================================================
// Catalog Entries
// ============================================================================

/// Catalog blueprint (product type)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Print provider able to produce a blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintProvider {
    pub id: u64,
    pub title: String,
}

/// Variant option labels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantOptions {
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub depth: Option<String>,
    #[serde(default)]
    pub orientation: Option<String>,
}

/// Size variant of a blueprint at one provider
///
/// `price` never comes from the catalog; it is assigned from the
/// [`DesiredSizeTable`] when the variant is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub options: VariantOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
}

impl Variant {
    /// Size label with inch marks folded, if the variant has one
    pub fn normalized_size(&self) -> Option<String> {
        self.options.size.as_deref().map(normalize_size_label)
    }
}

/// Shipping rates for one method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingProfile {
    #[serde(default)]
    pub first_item: u64,
    #[serde(default)]
    pub additional_items: u64,
    #[serde(default)]
    pub handling_time: u64,
}

/// Shipping table for a provider, missing values read as zero
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    #[serde(default)]
    pub standard: ShippingProfile,
    #[serde(default)]
    pub express: ShippingProfile,
}

/// Shipping method chosen for a product
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
}

impl ShippingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "standard",
            ShippingMethod::Express => "express",
        }
    }
}

impl ShippingInfo {
    /// Rates of one method
    pub fn profile(&self, method: ShippingMethod) -> &ShippingProfile {
        match method {
            ShippingMethod::Standard => &self.standard,
            ShippingMethod::Express => &self.express,
        }
    }
}

/// Everything the catalog resolver produces for one session
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCatalog {
    pub blueprint: Blueprint,
    pub provider: PrintProvider,
    /// Allow-listed variants with prices, ascending by size
    pub variants: Vec<Variant>,
    pub shipping: ShippingInfo,
}

// ============================================================================
// Size Labels
// ============================================================================

/// Fold the inch-mark glyphs (and a doubled `''`) of a size label to a plain
/// double quote
///
/// Idempotent: a normalized label normalizes to itself.
pub fn normalize_size_label(label: &str) -> String {
    label
        .trim()
        .replace("''", "\"")
        .chars()
        .map(|c| if INCH_MARKS.contains(&c) { '"' } else { c })
        .collect()
}

/// Leading integer of a size label (`12" x 12"` -> 12)
pub fn size_prefix(label: &str) -> Option<u32> {
    let digits: String = label
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Order two labels by their numeric prefix; labels without one sort last
fn compare_sizes(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a.and_then(size_prefix), b.and_then(size_prefix)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort variants ascending by numeric size, then id
pub fn sort_by_size(variants: &mut [Variant]) {
    variants.sort_by(|a, b| {
        compare_sizes(a.options.size.as_deref(), b.options.size.as_deref())
            .then_with(|| a.id.cmp(&b.id))
    });
}

// ============================================================================
// Desired Size Table
// ============================================================================

/// Allow-list of size labels and the price each sells for, in cents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredSizeTable {
    prices: BTreeMap<String, u32>,
}

impl DesiredSizeTable {
    /// Build a table; labels are normalized on the way in
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let prices = entries
            .into_iter()
            .map(|(label, cents)| (normalize_size_label(label.as_ref()), cents))
            .collect();
        DesiredSizeTable { prices }
    }

    pub fn from_settings(sizes: &[SizePrice]) -> Self {
        Self::new(sizes.iter().map(|s| (s.size.as_str(), s.cents)))
    }

    /// Price for a size label in any inch-mark spelling
    pub fn price_for(&self, label: &str) -> Option<u32> {
        self.prices.get(&normalize_size_label(label)).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Keep the variants whose size is allow-listed, priced and sorted
    ///
    /// Input order is irrelevant; variants without a size option are dropped.
    pub fn select<I>(&self, variants: I) -> Vec<Variant>
    where
        I: IntoIterator<Item = Variant>,
    {
        let mut selected: Vec<Variant> = variants
            .into_iter()
            .filter_map(|mut variant| {
                let price = variant.options.size.as_deref().and_then(|s| self.price_for(s))?;
                variant.price = Some(price);
                Some(variant)
            })
            .collect();

        sort_by_size(&mut selected);
        selected
    }
}

impl Default for DesiredSizeTable {
    fn default() -> Self {
        Self::from_settings(&crate::config::CatalogSettings::default().desired_sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: u64, size: &str) -> Variant {
        Variant {
            id,
            title: format!("{} / 1.25\"", size),
            options: VariantOptions {
                size: Some(size.to_string()),
                ..Default::default()
            },
            price: None,
        }
    }

    #[test]
    fn test_normalize_folds_curly_marks() {
        assert_eq!(normalize_size_label("6\u{201D} x 6\u{201D}"), "6\" x 6\"");
        assert_eq!(normalize_size_label("12\u{2033} x 12\u{2033}"), "12\" x 12\"");
        assert_eq!(normalize_size_label("  8\u{FF02} x 8\u{201C} "), "8\" x 8\"");
        assert_eq!(normalize_size_label("10'' x 10''"), "10\" x 10\"");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for label in ["6\u{201D} x 6\u{201D}", "20\" x 20\"", "10x10", "", "\u{2033}", "14''' x 14''"] {
            let once = normalize_size_label(label);
            assert_eq!(normalize_size_label(&once), once);
        }
    }

    #[test]
    fn test_size_prefix() {
        assert_eq!(size_prefix("12\" x 12\""), Some(12));
        assert_eq!(size_prefix("6x6"), Some(6));
        assert_eq!(size_prefix("x6"), None);
    }

    #[test]
    fn test_sort_is_numeric_not_lexicographic() {
        let table = DesiredSizeTable::new([("20x20", 5000), ("6x6", 2000), ("12x12", 3000)]);
        let selected = table.select(vec![variant(1, "20x20"), variant(2, "6x6"), variant(3, "12x12")]);

        let sizes: Vec<_> = selected.iter().map(|v| v.options.size.clone().unwrap()).collect();
        assert_eq!(sizes, vec!["6x6", "12x12", "20x20"]);
    }

    #[test]
    fn test_select_is_intersection_with_table_prices() {
        let table = DesiredSizeTable::default();
        let input = vec![
            variant(10, "8\" x 8\""),
            variant(11, "6\u{201D} x 6\u{201D}"),
            variant(12, "16\" x 16\""),
            Variant { options: VariantOptions::default(), ..variant(13, "unused") },
        ];

        let selected = table.select(input.clone());

        assert_eq!(selected.len(), 2);
        for v in &selected {
            assert!(input.iter().any(|i| i.id == v.id));
            assert_eq!(v.price, table.price_for(v.options.size.as_deref().unwrap()));
        }
        assert_eq!(selected[0].id, 11);
        assert_eq!(selected[0].price, Some(2000));
        assert_eq!(selected[1].price, Some(4000));
    }

    #[test]
    fn test_shipping_defaults_to_zero() {
        let info: ShippingInfo = serde_json::from_value(serde_json::json!({
            "standard": { "first_item": 799 }
        }))
        .unwrap();

        assert_eq!(info.standard.first_item, 799);
        assert_eq!(info.profile(ShippingMethod::Standard).first_item, 799);
        assert_eq!(info.profile(ShippingMethod::Express).first_item, 0);
        assert_eq!(info.standard.additional_items, 0);
        assert_eq!(info.express, ShippingProfile::default());
    }
}
