//! Structured ingredients from well-formed ingredient list markup.
//!
//! Recognizes lists shaped like
//!
//! ```html
//! <ul class="ingredient-list">
//!   <li><span>375 g</span><span>camembert au lait cru</span></li>
//! </ul>
//! <ul class="kitchen-list">
//!   <li>2 càs huile d'olive</li>
//!   <li>sel</li>
//! </ul>
//! ```
//!
//! The primary list is all-or-nothing: one malformed item means the page is
//! not the layout we think it is, and the caller falls back to raw strings.

use log::debug;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

use crate::dom;
use crate::model::StructuredIngredient;

static QUANTITY_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([\d.,/]+)\s*(.*)$").expect("valid regex"));

static PANTRY_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([\d.,/]+)\s*(\S+)\s+(.+)$").expect("valid regex"));

/// Parse the page's ingredient list into quantity/unit/name triples, followed
/// by the pantry staples list when present.
///
/// Returns `None` when there is no recognized list, when any primary item does
/// not have exactly two inline parts or has a blank name, or when nothing was
/// found.
pub fn extract_structured_ingredients(document: &Html) -> Option<Vec<StructuredIngredient>> {
    let list = dom::select_first(document, "ul.ingredient-list")?;

    let mut results = Vec::new();
    for item in dom::child_elements(list, "li") {
        let spans = dom::child_elements(item, "span");
        let [quantity_unit, name] = spans.as_slice() else {
            debug!(
                "Ingredient item has {} inline parts instead of 2, skipping structuring",
                spans.len()
            );
            return None;
        };

        // Nested decoration (e.g. an organic badge) is kept as separate words
        let name = clean_ingredient_name(&dom::joined_text(*name, " "));
        if name.is_empty() {
            debug!("Ingredient item has a blank name, skipping structuring");
            return None;
        }

        let (quantity, unit) = split_quantity_unit(&dom::stripped_text(*quantity_unit));
        results.push(StructuredIngredient { quantity, unit, name });
    }

    if let Some(pantry) = dom::select_first(document, "ul.kitchen-list") {
        for item in dom::child_elements(pantry, "li") {
            let text = dom::stripped_text(item);
            if !text.is_empty() {
                results.push(parse_pantry_item(&text));
            }
        }
    }

    debug!("Structured {} ingredients", results.len());
    if results.is_empty() {
        None
    } else {
        Some(results)
    }
}

/// Split a combined quantity/unit string.
///
/// `"375 g"` → `("375", "g")`, `"3x"` → `("3", "x")`, `"0,25"` → `("0.25", "")`.
/// Text without a numeric prefix is returned whole as the unit.
pub fn split_quantity_unit(text: &str) -> (String, String) {
    let text = text.trim();
    if text.is_empty() {
        return (String::new(), String::new());
    }

    match QUANTITY_UNIT.captures(text) {
        Some(caps) => (caps[1].replace(',', "."), caps[2].trim().to_string()),
        None => (String::new(), text.to_string()),
    }
}

/// Parse a pantry staple such as `"2 càs huile d'olive"` or `"sel"`.
pub fn parse_pantry_item(text: &str) -> StructuredIngredient {
    let text = text.trim();

    match PANTRY_ITEM.captures(text) {
        Some(caps) => StructuredIngredient {
            quantity: caps[1].replace(',', "."),
            unit: caps[2].to_string(),
            name: clean_ingredient_name(&caps[3]),
        },
        None => StructuredIngredient {
            quantity: String::new(),
            unit: String::new(),
            name: clean_ingredient_name(text),
        },
    }
}

/// Collapse non-breaking and repeated whitespace. Parentheticals are kept as
/// they often carry useful detail such as a weight.
pub fn clean_ingredient_name(name: &str) -> String {
    name.replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
