use html_escape::decode_html_entities;
use log::debug;
use regex::Regex;
use scraper::{Html, Selector};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

use super::{FieldResult, RecipeExtractor};
use crate::auth::normalize_host;
use crate::dom;
use crate::error::{ExtractorError, ScrapeError};
use crate::linked_data;
use crate::model::{IngredientGroup, Link, NutrientTable};

/// `P[nD][T[nH][n-nM][nS]]`, the minute part may be a range.
static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^P(?:(\d+(?:\.\d+)?)D)?(?:T(?:(\d+(?:\.\d+)?)H)?(?:(?:\d+-)?(\d+(?:\.\d+)?)M)?(?:(\d+(?:\.\d+)?)S)?)?$",
    )
    .expect("valid regex")
});

/// Reads the first schema.org Recipe embedded as JSON-LD in the page.
pub struct SchemaOrgExtractor<'a> {
    document: &'a Html,
    recipe: Value,
    url: String,
}

impl<'a> SchemaOrgExtractor<'a> {
    pub fn new(document: &'a Html, url: &str) -> Result<Self, ScrapeError> {
        let recipe = linked_data::first_recipe(document).ok_or_else(|| {
            ScrapeError::ExtractionFailure("No schema.org Recipe found on the page".to_string())
        })?;
        debug!("SchemaOrgExtractor: found recipe for {}", url);

        Ok(Self {
            document,
            recipe,
            url: url.to_string(),
        })
    }

    fn field<T: DeserializeOwned>(&self, key: &'static str) -> FieldResult<T> {
        match self.recipe.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| ExtractorError::Malformed {
                    field: key,
                    reason: e.to_string(),
                }),
        }
    }

    fn joined(&self, key: &'static str) -> FieldResult<String> {
        Ok(self
            .field::<OneOrMany<String>>(key)?
            .map(|values| {
                values
                    .into_vec()
                    .iter()
                    .map(|v| decode_html_symbols(v).trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ")
            }))
    }

    fn duration(&self, key: &'static str) -> FieldResult<u32> {
        match self.field::<Scalar>(key)? {
            Some(value) => parse_minutes(key, &value),
            None => Ok(None),
        }
    }

    fn meta_content(&self, selector: &str) -> Option<String> {
        dom::select_first(self.document, selector)?
            .value()
            .attr("content")
            .map(|content| decode_html_symbols(content).trim().to_string())
    }
}

impl RecipeExtractor for SchemaOrgExtractor<'_> {
    fn title(&self) -> FieldResult<String> {
        Ok(self
            .field::<String>("name")?
            .map(|name| decode_html_symbols(&name).trim().to_string()))
    }

    fn description(&self) -> FieldResult<String> {
        Ok(self.field::<TextValue>("description")?.map(|desc| {
            let text = match desc {
                TextValue::Text(text) => text,
                TextValue::Object(obj) => obj.text,
            };
            decode_html_symbols(&text).trim().to_string()
        }))
    }

    fn ingredients(&self) -> FieldResult<Vec<String>> {
        Ok(self
            .field::<OneOrMany<Ingredient>>("recipeIngredient")?
            .map(|items| {
                items
                    .into_vec()
                    .into_iter()
                    .filter_map(Ingredient::into_line)
                    .collect()
            }))
    }

    fn ingredient_groups(&self) -> FieldResult<Vec<IngredientGroup>> {
        Ok(self.ingredients()?.map(|ingredients| {
            vec![IngredientGroup {
                purpose: None,
                ingredients,
            }]
        }))
    }

    fn instructions(&self) -> FieldResult<String> {
        Ok(self.instructions_list()?.map(|steps| steps.join("\n")))
    }

    fn instructions_list(&self) -> FieldResult<Vec<String>> {
        let Some(instructions) = self.field::<Instruction>("recipeInstructions")? else {
            return Ok(None);
        };

        let mut steps = Vec::new();
        instructions.collect_into(&mut steps);
        Ok(Some(
            steps
                .iter()
                .map(|step| decode_html_symbols(step).trim().to_string())
                .filter(|step| !step.is_empty())
                .collect(),
        ))
    }

    fn total_time(&self) -> FieldResult<u32> {
        if let Some(total) = self.duration("totalTime")? {
            return Ok(Some(total));
        }
        match (self.prep_time()?, self.cook_time()?) {
            (Some(prep), Some(cook)) => prep.checked_add(cook).map(Some).ok_or_else(|| {
                ExtractorError::Malformed {
                    field: "totalTime",
                    reason: format!("prepTime {prep} + cookTime {cook} overflows"),
                }
            }),
            _ => Ok(None),
        }
    }

    fn prep_time(&self) -> FieldResult<u32> {
        self.duration("prepTime")
    }

    fn cook_time(&self) -> FieldResult<u32> {
        self.duration("cookTime")
    }

    fn yields(&self) -> FieldResult<String> {
        let Some(yields) = self.field::<OneOrMany<Scalar>>("recipeYield")? else {
            return Ok(None);
        };

        // Prefer the descriptive variant ("15 pieces") over the bare number
        let values: Vec<String> = yields.into_vec().iter().map(Scalar::as_text).collect();
        let chosen = values
            .iter()
            .find(|v| v.contains(char::is_alphabetic))
            .or_else(|| values.first())
            .cloned()
            .unwrap_or_default();
        Ok(Some(format_yield(chosen)))
    }

    fn image(&self) -> FieldResult<String> {
        Ok(self
            .recipe
            .get("image")
            .and_then(linked_data::image_url)
            .map(decode_html_symbols))
    }

    fn host(&self) -> FieldResult<String> {
        Ok(Some(normalize_host(&self.url)))
    }

    fn canonical_url(&self) -> FieldResult<String> {
        let href = dom::select_first(self.document, "link[rel='canonical']")
            .and_then(|link| link.value().attr("href"));

        let Some(href) = href else {
            return Ok(Some(self.url.clone()));
        };
        let resolved = Url::parse(&self.url)
            .and_then(|base| base.join(href))
            .map(|url| url.to_string())
            .unwrap_or_else(|_| href.to_string());
        Ok(Some(resolved))
    }

    fn site_name(&self) -> FieldResult<String> {
        Ok(self.meta_content("meta[property='og:site_name']"))
    }

    fn author(&self) -> FieldResult<String> {
        Ok(self.field::<OneOrMany<Named>>("author")?.map(|authors| {
            authors
                .into_vec()
                .into_iter()
                .filter_map(Named::into_name)
                .collect::<Vec<_>>()
                .join(", ")
        }))
    }

    fn language(&self) -> FieldResult<String> {
        Ok(dom::select_first(self.document, "html")
            .and_then(|html| html.value().attr("lang"))
            .map(|lang| lang.trim().to_string()))
    }

    fn category(&self) -> FieldResult<String> {
        self.joined("recipeCategory")
    }

    fn cuisine(&self) -> FieldResult<String> {
        self.joined("recipeCuisine")
    }

    fn cooking_method(&self) -> FieldResult<String> {
        self.joined("cookingMethod")
    }

    fn keywords(&self) -> FieldResult<Vec<String>> {
        let Some(keywords) = self.field::<OneOrMany<String>>("keywords")? else {
            return Ok(None);
        };

        let mut seen = HashSet::new();
        Ok(Some(
            keywords
                .into_vec()
                .iter()
                .flat_map(|entry| entry.split(','))
                .map(|keyword| decode_html_symbols(keyword).trim().to_string())
                .filter(|keyword| !keyword.is_empty() && seen.insert(keyword.to_lowercase()))
                .collect(),
        ))
    }

    fn dietary_restrictions(&self) -> FieldResult<Vec<String>> {
        Ok(self
            .field::<OneOrMany<String>>("suitableForDiet")?
            .map(|diets| {
                diets
                    .into_vec()
                    .iter()
                    .flat_map(|entry| entry.split(','))
                    .map(clean_diet_value)
                    .filter(|diet| !diet.is_empty())
                    .collect()
            }))
    }

    fn ratings(&self) -> FieldResult<f64> {
        let Some(rating) = self.field::<AggregateRating>("aggregateRating")? else {
            return Ok(None);
        };
        let Some(value) = rating.rating_value else {
            return Ok(None);
        };

        match value.as_f64() {
            Some(value) => Ok(Some((value * 100.0).round() / 100.0)),
            None => Err(ExtractorError::Malformed {
                field: "aggregateRating",
                reason: format!("ratingValue {:?} is not a number", value.as_text()),
            }),
        }
    }

    fn ratings_count(&self) -> FieldResult<u32> {
        let Some(rating) = self.field::<AggregateRating>("aggregateRating")? else {
            return Ok(None);
        };
        let Some(count) = rating.rating_count.or(rating.review_count) else {
            return Ok(None);
        };

        match count.as_f64() {
            Some(count) if count >= 0.0 => Ok(Some(count as u32)),
            _ => Err(ExtractorError::Malformed {
                field: "aggregateRating",
                reason: format!("ratingCount {:?} is not a count", count.as_text()),
            }),
        }
    }

    fn nutrients(&self) -> FieldResult<NutrientTable> {
        Ok(self.field::<Map<String, Value>>("nutrition")?.map(|nutrition| {
            nutrition
                .iter()
                .filter(|(key, _)| !key.starts_with('@'))
                .filter_map(|(key, value)| {
                    let text = match value {
                        Value::String(text) => decode_html_symbols(text).trim().to_string(),
                        Value::Number(number) => number.to_string(),
                        _ => return None,
                    };
                    (!text.is_empty()).then(|| (key.clone(), text))
                })
                .collect()
        }))
    }

    fn equipment(&self) -> FieldResult<Vec<String>> {
        Ok(self.field::<OneOrMany<Named>>("tool")?.map(|tools| {
            tools
                .into_vec()
                .into_iter()
                .filter_map(Named::into_name)
                .collect()
        }))
    }

    fn links(&self) -> FieldResult<Vec<Link>> {
        let Ok(selector) = Selector::parse("a[href]") else {
            return Ok(None);
        };
        Ok(Some(
            self.document
                .select(&selector)
                .map(|anchor| {
                    anchor
                        .value()
                        .attrs()
                        .map(|(name, value)| (name.to_string(), value.to_string()))
                        .collect()
                })
                .collect(),
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(values) => values,
            OneOrMany::One(value) => vec![value],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(Number),
}

impl Scalar {
    fn as_text(&self) -> String {
        match self {
            Scalar::Text(text) => text.trim().to_string(),
            Scalar::Number(number) => number.to_string(),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Text(text) => text.trim().replace(',', ".").parse().ok(),
            Scalar::Number(number) => number.as_f64(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TextObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextValue {
    Text(String),
    Object(TextObject),
}

#[derive(Debug, Deserialize)]
struct NamedObject {
    name: Option<String>,
}

/// A person, organization or thing given either by name or as an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Named {
    Name(String),
    Object(NamedObject),
}

impl Named {
    fn into_name(self) -> Option<String> {
        let name = match self {
            Named::Name(name) => name,
            Named::Object(obj) => obj.name?,
        };
        let name = decode_html_symbols(&name).trim().to_string();
        (!name.is_empty()).then_some(name)
    }
}

#[derive(Debug, Deserialize)]
struct IngredientObject {
    name: String,
    amount: Option<Scalar>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Ingredient {
    Text(String),
    Object(IngredientObject),
}

impl Ingredient {
    fn into_line(self) -> Option<String> {
        let line = match self {
            Ingredient::Text(text) => decode_html_symbols(&text),
            Ingredient::Object(obj) => {
                let name = decode_html_symbols(&obj.name);
                match obj.amount.map(|amount| amount.as_text()) {
                    Some(amount) if !amount.is_empty() => format!("{amount} {}", name.trim()),
                    _ => name,
                }
            }
        };
        let line = line.trim();
        (!line.is_empty()).then(|| line.to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Instruction {
    Text(String),
    List(Vec<Instruction>),
    HowTo(HowTo),
    Untyped(HowToStep),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "@type")]
enum HowTo {
    HowToStep(HowToStep),
    HowToSection(HowToSection),
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement", default)]
    item_list_element: Vec<Instruction>,
}

impl Instruction {
    /// Flatten sections and nested lists into step texts, in document order.
    fn collect_into(self, steps: &mut Vec<String>) {
        match self {
            Instruction::Text(text) => steps.extend(text.lines().map(str::to_string)),
            Instruction::List(items) => items.into_iter().for_each(|item| item.collect_into(steps)),
            Instruction::HowTo(HowTo::HowToSection(section)) => section
                .item_list_element
                .into_iter()
                .for_each(|item| item.collect_into(steps)),
            Instruction::HowTo(HowTo::HowToStep(step)) | Instruction::Untyped(step) => {
                // Prefer text over name
                if let Some(text) = step.text.or(step.name) {
                    steps.push(text);
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct AggregateRating {
    #[serde(rename = "ratingValue")]
    rating_value: Option<Scalar>,
    #[serde(rename = "ratingCount")]
    rating_count: Option<Scalar>,
    #[serde(rename = "reviewCount")]
    review_count: Option<Scalar>,
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn clean_diet_value(diet: &str) -> String {
    diet.trim()
        .trim_start_matches("https://schema.org/")
        .trim_start_matches("http://schema.org/")
        .replace("Diet", "")
        .trim()
        .to_string()
}

/// Bare numbers become "N servings".
fn format_yield(value: String) -> String {
    match value.parse::<f64>() {
        Ok(n) if n == 1.0 => "1 serving".to_string(),
        Ok(n) if n > 0.0 && n.fract() == 0.0 => format!("{} servings", n as i64),
        _ => value,
    }
}

/// Duration in whole minutes from an ISO 8601 duration or a bare number of
/// minutes. An empty string counts as absent.
fn parse_minutes(field: &'static str, value: &Scalar) -> FieldResult<u32> {
    if let Scalar::Number(number) = value {
        return match number.as_f64() {
            Some(minutes) if minutes >= 0.0 => Ok(Some(minutes.round() as u32)),
            _ => Err(ExtractorError::Malformed {
                field,
                reason: format!("negative duration {number}"),
            }),
        };
    }

    let text = value.as_text();
    if text.is_empty() {
        return Ok(None);
    }
    if let Ok(minutes) = text.parse::<u32>() {
        return Ok(Some(minutes));
    }

    let Some(caps) = ISO_DURATION.captures(&text) else {
        return Err(ExtractorError::Malformed {
            field,
            reason: format!("unrecognized duration {text:?}"),
        });
    };
    let part = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    let minutes = part(1) * 1440.0 + part(2) * 60.0 + part(3) + part(4) / 60.0;
    Ok(Some(minutes.round() as u32))
}
