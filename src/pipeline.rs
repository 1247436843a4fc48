//! One page in, one [`FinalRecord`] (or a typed failure) out.
//!
//! The login-wall check runs first so a login form is never reported as a
//! recipe. After extraction, every heuristic works on the same parsed
//! document and degrades to `None` or to the raw value on its own.

use log::debug;
use scraper::Html;
use url::Url;

use crate::auth;
use crate::cleaners;
use crate::error::ScrapeError;
use crate::extractors::{self, RecipeExtractor, SchemaOrgExtractor};
use crate::image;
use crate::ingredients;
use crate::instructions;
use crate::model::{FinalRecord, RawExtractedRecord};
use crate::nutrition;
use crate::sanitize::{sanitize, sanitize_numeric};
use crate::tags;

/// Process a fetched page
///
/// This pipeline:
/// 1. Rejects pages that are really a login form
/// 2. Rejects unsupported hosts unless `wild_mode` is set
/// 3. Reads the schema.org Recipe with [`SchemaOrgExtractor`]
/// 4. Runs [`extract_all`] over the extractor and the document
///
/// `final_url` is where the request ended up after redirects. It falls back to
/// `request_url` when absent or not a valid URL.
pub fn process(
    html: &str,
    request_url: &str,
    final_url: Option<&str>,
    wild_mode: bool,
) -> Result<FinalRecord, ScrapeError> {
    check_url(request_url)?;

    let rendered_url = final_url
        .filter(|url| Url::parse(url).is_ok())
        .unwrap_or(request_url);
    let wall = auth::detect_auth_wall(html, rendered_url, request_url);
    if wall.is_blocked {
        return Err(ScrapeError::AuthenticationRequired { host: wall.host });
    }

    if !wild_mode && !extractors::is_supported(&wall.host) {
        return Err(ScrapeError::UnsupportedHost { host: wall.host });
    }

    let document = Html::parse_document(html);
    let extractor = SchemaOrgExtractor::new(&document, request_url)?;
    Ok(extract_all(&extractor, &document))
}

/// Reject request URLs that cannot be parsed as absolute URLs.
pub(crate) fn check_url(url: &str) -> Result<(), ScrapeError> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|e| ScrapeError::ExtractionFailure(format!("Invalid URL {url}: {e}")))
}

/// Run every accessor of `extractor` through the sanitizer, then apply the
/// DOM heuristics and cleaners.
pub fn extract_all(extractor: &dyn RecipeExtractor, document: &Html) -> FinalRecord {
    let mut raw = sanitize_record(extractor);
    let ingredient_lines = raw.ingredients.clone().unwrap_or_default();

    let keywords = match raw.keywords.take() {
        Some(keywords) if !keywords.is_empty() => Some(keywords),
        _ => {
            debug!("No keywords from the extractor, trying __NEXT_DATA__");
            tags::keywords_from_next_data(document)
        }
    };

    raw.title = cleaners::clean_title(raw.title.take());
    raw.description = cleaners::clean_description(raw.description.take(), &ingredient_lines);
    raw.keywords = cleaners::clean_keywords(keywords, &ingredient_lines, raw.title.as_deref());
    raw.image = image::resolve_image(raw.image.take(), document);
    raw.nutrients = nutrition::infer_serving_size(document, raw.nutrients.take());

    FinalRecord {
        raw,
        parsed_ingredients: ingredients::extract_structured_ingredients(document),
        parsed_instructions: instructions::extract_structured_instructions(document),
    }
}

fn sanitize_record(extractor: &dyn RecipeExtractor) -> RawExtractedRecord {
    RawExtractedRecord {
        title: sanitize("title", || extractor.title()),
        description: sanitize("description", || extractor.description()),
        ingredients: sanitize("ingredients", || extractor.ingredients()),
        ingredient_groups: sanitize("ingredient_groups", || extractor.ingredient_groups()),
        instructions: sanitize("instructions", || extractor.instructions()),
        instructions_list: sanitize("instructions_list", || extractor.instructions_list()),
        total_time: sanitize_numeric("total_time", || extractor.total_time()),
        prep_time: sanitize_numeric("prep_time", || extractor.prep_time()),
        cook_time: sanitize_numeric("cook_time", || extractor.cook_time()),
        yields: sanitize("yields", || extractor.yields()),
        image: sanitize("image", || extractor.image()),
        host: sanitize("host", || extractor.host()),
        canonical_url: sanitize("canonical_url", || extractor.canonical_url()),
        site_name: sanitize("site_name", || extractor.site_name()),
        author: sanitize("author", || extractor.author()),
        language: sanitize("language", || extractor.language()),
        category: sanitize("category", || extractor.category()),
        cuisine: sanitize("cuisine", || extractor.cuisine()),
        cooking_method: sanitize("cooking_method", || extractor.cooking_method()),
        keywords: sanitize("keywords", || extractor.keywords()),
        dietary_restrictions: sanitize("dietary_restrictions", || {
            extractor.dietary_restrictions()
        }),
        ratings: sanitize("ratings", || extractor.ratings()),
        ratings_count: sanitize_numeric("ratings_count", || extractor.ratings_count()),
        nutrients: sanitize("nutrients", || extractor.nutrients()),
        equipment: sanitize("equipment", || extractor.equipment()),
        links: sanitize("links", || extractor.links()),
    }
}
