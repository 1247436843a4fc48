//! Text clean-up for sites with poor schema.org data.
//!
//! Some sites (Marmiton is the usual offender) publish a lowercase title, put
//! the ingredient list in the description, and repeat the title and the
//! ingredients in the keywords.

use std::collections::HashSet;

/// A description with fewer alphanumeric characters left once ingredient
/// names are removed is considered to be an ingredient list.
const MIN_DESCRIPTION_RESIDUE: usize = 20;

/// Lowercased ingredient name, ignoring any parenthesized detail.
fn ingredient_name(ingredient: &str) -> String {
    ingredient
        .to_lowercase()
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Capitalize the first letter of an all-lowercase title.
pub fn clean_title(title: Option<String>) -> Option<String> {
    let title = title.filter(|t| !t.is_empty())?;
    if title != title.to_lowercase() {
        return Some(title);
    }

    let mut chars = title.chars();
    match chars.next() {
        Some(first) => Some(first.to_uppercase().chain(chars).collect()),
        None => None,
    }
}

/// Drop a description that is really the ingredient list in disguise.
pub fn clean_description(description: Option<String>, ingredients: &[String]) -> Option<String> {
    let description = description.filter(|d| !d.is_empty())?;
    if ingredients.is_empty() {
        return Some(description);
    }

    let mut residue = description.to_lowercase();
    for name in ingredients.iter().map(|i| ingredient_name(i)) {
        if !name.is_empty() {
            residue = residue.replace(&name, "");
        }
    }

    let residue_len = residue.chars().filter(|c| c.is_alphanumeric()).count();
    if residue_len < MIN_DESCRIPTION_RESIDUE {
        return None;
    }
    Some(description)
}

/// Remove keywords that repeat the title or an ingredient name.
pub fn clean_keywords(
    keywords: Option<Vec<String>>,
    ingredients: &[String],
    title: Option<&str>,
) -> Option<Vec<String>> {
    let keywords = keywords.filter(|k| !k.is_empty())?;

    let ingredient_names: HashSet<String> = ingredients
        .iter()
        .map(|i| ingredient_name(i))
        .filter(|name| !name.is_empty())
        .collect();
    let title = title.map(str::to_lowercase).unwrap_or_default();

    let cleaned: Vec<String> = keywords
        .into_iter()
        .filter(|keyword| {
            let keyword = keyword.to_lowercase();
            keyword != title && !ingredient_names.contains(&keyword)
        })
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
