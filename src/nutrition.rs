//! Serving size inference from per-portion and per-100g calorie figures.
//!
//! Sites that show nutrition both per portion and per 100g implicitly give
//! away the portion weight: `portion_kcal / per_100g_kcal * 100` grams.

use log::debug;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

use crate::dom;
use crate::model::NutrientTable;

/// Ids of tabs or sections holding per-100g values.
const PER_100G_IDS: [&str; 3] = ["quantity", "100g", "per100g"];

/// Energy labels, most specific first.
const ENERGY_LABELS: [&str; 5] = ["Énergie (kCal)", "Énergie (kcal)", "Calories", "kcal", "kCal"];

/// Elements that delimit a nutrition block around a "100g" marker.
const SECTION_TAGS: [&str; 4] = ["div", "section", "table", "ul"];

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\d.]+").expect("valid regex"));

/// Add `servingSize` to the table when it can be derived from the page.
///
/// The table is returned unchanged when it is empty, already has a serving
/// size, has no parsable calorie value, or when the page shows no per-100g
/// figure.
pub fn infer_serving_size(document: &Html, nutrients: Option<NutrientTable>) -> Option<NutrientTable> {
    let mut nutrients = nutrients?;
    if nutrients.is_empty() || nutrients.get("servingSize").is_some_and(|s| !s.is_empty()) {
        return Some(nutrients);
    }

    let Some(per_portion) = nutrients
        .get("calories")
        .and_then(|calories| extract_numeric_value(calories))
        .filter(|kcal| *kcal > 0.0)
    else {
        return Some(nutrients);
    };

    let Some(per_100g) = find_per_100g_calories(document) else {
        return Some(nutrients);
    };

    let grams = (per_portion / per_100g * 100.0).round();
    if grams > 0.0 {
        debug!(
            "Inferred serving size {}g from {} kcal per portion and {} kcal per 100g",
            grams, per_portion, per_100g
        );
        nutrients.insert("servingSize".to_string(), format!("{}g", grams as i64));
    }

    Some(nutrients)
}

/// Find a strictly positive per-100g calorie value on the page.
pub fn find_per_100g_calories(document: &Html) -> Option<f64> {
    let by_id = PER_100G_IDS.iter().find_map(|id| {
        let section = dom::select_first(document, &format!("[id='{id}']"))?;
        extract_kcal_from_section(section).filter(|kcal| *kcal > 0.0)
    });
    if by_id.is_some() {
        return by_id;
    }

    document
        .root_element()
        .descendants()
        .filter(|node| {
            node.value()
                .as_text()
                .is_some_and(|text| text.to_lowercase().contains("100g"))
        })
        .find_map(|marker| {
            let section = marker
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| SECTION_TAGS.contains(&el.value().name()))?;
            extract_kcal_from_section(section).filter(|kcal| *kcal > 0.0)
        })
}

/// Value next to the first energy label found inside `section`.
///
/// The label's parent element is expected to be followed by the element
/// holding the value, as in `<span>Calories</span><span>250 kcal</span>`.
pub fn extract_kcal_from_section(section: ElementRef) -> Option<f64> {
    ENERGY_LABELS.iter().find_map(|label| {
        let text_node = section
            .descendants()
            .find(|node| node.value().as_text().is_some_and(|text| text.contains(*label)))?;
        let parent = text_node.parent().and_then(ElementRef::wrap)?;
        let value = dom::next_element_sibling(parent)?;
        Some(extract_numeric_value(&value.text().collect::<String>()).unwrap_or(0.0))
    })
}

/// First number in a display string: `"876kCal"` → 876, `"32,5 g"` → 32.5.
pub fn extract_numeric_value(text: &str) -> Option<f64> {
    let normalized = text.replace(',', ".").replace(' ', "");
    NUMBER.find(&normalized)?.as_str().parse().ok()
}
