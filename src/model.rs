use serde::Serialize;
use std::collections::BTreeMap;

/// Nutrient name (e.g. `calories`, `fatContent`) to its display string
pub type NutrientTable = BTreeMap<String, String>;

/// Attributes of an anchor found on the page
pub type Link = BTreeMap<String, String>;

/// A named group of raw ingredient lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientGroup {
    pub purpose: Option<String>,
    pub ingredients: Vec<String>,
}

/// Recipe fields as reported by the extractor, after sanitization.
///
/// Every field is independently optional. `None` always means the value is
/// absent; `Some(0)` is only produced for the timing fields and `ratings_count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExtractedRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub ingredient_groups: Option<Vec<IngredientGroup>>,
    pub instructions: Option<String>,
    pub instructions_list: Option<Vec<String>>,
    pub total_time: Option<i64>,
    pub prep_time: Option<i64>,
    pub cook_time: Option<i64>,
    pub yields: Option<String>,
    pub image: Option<String>,
    pub host: Option<String>,
    pub canonical_url: Option<String>,
    pub site_name: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub cooking_method: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub dietary_restrictions: Option<Vec<String>>,
    pub ratings: Option<f64>,
    pub ratings_count: Option<i64>,
    pub nutrients: Option<NutrientTable>,
    pub equipment: Option<Vec<String>>,
    pub links: Option<Vec<Link>>,
}

/// Ingredient line split into its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredIngredient {
    pub quantity: String,
    pub unit: String,
    pub name: String,
}

/// Instructions grouped under an optional step title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredInstructionGroup {
    pub title: Option<String>,
    pub instructions: Vec<String>,
}

/// Outcome of the login-wall check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthWallResult {
    pub is_blocked: bool,
    pub host: String,
}

/// The record returned to callers: the raw fields (with title, description,
/// keywords, image and nutrients replaced by their cleaned variants) plus the
/// DOM-derived structures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalRecord {
    #[serde(flatten)]
    pub raw: RawExtractedRecord,
    pub parsed_ingredients: Option<Vec<StructuredIngredient>>,
    pub parsed_instructions: Option<Vec<StructuredInstructionGroup>>,
}
