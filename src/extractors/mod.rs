use crate::error::ExtractorError;
use crate::model::{IngredientGroup, Link, NutrientTable};

mod registry;
mod schema_org;

pub use self::registry::{is_supported, supported_hosts};
pub use self::schema_org::SchemaOrgExtractor;

/// What an accessor yields: `Ok(None)` when the page simply lacks the field,
/// `Err` when the extractor cannot produce it or the data is unusable.
pub type FieldResult<T> = Result<Option<T>, ExtractorError>;

/// Per-field access to the recipe found on one page.
///
/// Every accessor defaults to [`ExtractorError::NotImplemented`] so an
/// extractor only overrides the fields it knows how to read.
pub trait RecipeExtractor {
    fn title(&self) -> FieldResult<String> {
        Err(ExtractorError::NotImplemented("title"))
    }

    fn description(&self) -> FieldResult<String> {
        Err(ExtractorError::NotImplemented("description"))
    }

    fn ingredients(&self) -> FieldResult<Vec<String>> {
        Err(ExtractorError::NotImplemented("ingredients"))
    }

    fn ingredient_groups(&self) -> FieldResult<Vec<IngredientGroup>> {
        Err(ExtractorError::NotImplemented("ingredient_groups"))
    }

    fn instructions(&self) -> FieldResult<String> {
        Err(ExtractorError::NotImplemented("instructions"))
    }

    fn instructions_list(&self) -> FieldResult<Vec<String>> {
        Err(ExtractorError::NotImplemented("instructions_list"))
    }

    /// Minutes.
    fn total_time(&self) -> FieldResult<u32> {
        Err(ExtractorError::NotImplemented("total_time"))
    }

    /// Minutes.
    fn prep_time(&self) -> FieldResult<u32> {
        Err(ExtractorError::NotImplemented("prep_time"))
    }

    /// Minutes.
    fn cook_time(&self) -> FieldResult<u32> {
        Err(ExtractorError::NotImplemented("cook_time"))
    }

    fn yields(&self) -> FieldResult<String> {
        Err(ExtractorError::NotImplemented("yields"))
    }

    fn image(&self) -> FieldResult<String> {
        Err(ExtractorError::NotImplemented("image"))
    }

    fn host(&self) -> FieldResult<String> {
        Err(ExtractorError::NotImplemented("host"))
    }

    fn canonical_url(&self) -> FieldResult<String> {
        Err(ExtractorError::NotImplemented("canonical_url"))
    }

    fn site_name(&self) -> FieldResult<String> {
        Err(ExtractorError::NotImplemented("site_name"))
    }

    fn author(&self) -> FieldResult<String> {
        Err(ExtractorError::NotImplemented("author"))
    }

    fn language(&self) -> FieldResult<String> {
        Err(ExtractorError::NotImplemented("language"))
    }

    fn category(&self) -> FieldResult<String> {
        Err(ExtractorError::NotImplemented("category"))
    }

    fn cuisine(&self) -> FieldResult<String> {
        Err(ExtractorError::NotImplemented("cuisine"))
    }

    fn cooking_method(&self) -> FieldResult<String> {
        Err(ExtractorError::NotImplemented("cooking_method"))
    }

    fn keywords(&self) -> FieldResult<Vec<String>> {
        Err(ExtractorError::NotImplemented("keywords"))
    }

    fn dietary_restrictions(&self) -> FieldResult<Vec<String>> {
        Err(ExtractorError::NotImplemented("dietary_restrictions"))
    }

    fn ratings(&self) -> FieldResult<f64> {
        Err(ExtractorError::NotImplemented("ratings"))
    }

    fn ratings_count(&self) -> FieldResult<u32> {
        Err(ExtractorError::NotImplemented("ratings_count"))
    }

    fn nutrients(&self) -> FieldResult<NutrientTable> {
        Err(ExtractorError::NotImplemented("nutrients"))
    }

    fn equipment(&self) -> FieldResult<Vec<String>> {
        Err(ExtractorError::NotImplemented("equipment"))
    }

    fn links(&self) -> FieldResult<Vec<Link>> {
        Err(ExtractorError::NotImplemented("links"))
    }
}
