use recipe_scraper::{scrape_from_html, ScrapeError, ScrapeResponse};
use serde_json::Value;

const SIMPLE_RECIPE_HTML: &str = r#"
<!DOCTYPE html>
<html>
<head>
    <script type="application/ld+json">
    {
        "@context": "https://schema.org",
        "@type": "Recipe",
        "name": "Chocolate Cake",
        "description": "A delicious chocolate cake recipe",
        "recipeIngredient": ["200g flour", "100g sugar", "50g cocoa powder"],
        "recipeInstructions": "Mix all ingredients and bake at 180°C for 30 minutes.",
        "prepTime": "PT15M",
        "cookTime": "PT30M",
        "totalTime": "PT45M",
        "recipeYield": "8 servings",
        "author": {"@type": "Person", "name": "Chef Test"},
        "image": "https://example.com/cake.jpg"
    }
    </script>
</head>
<body></body>
</html>
"#;

const NO_RECIPE_HTML: &str = r#"
<!DOCTYPE html>
<html>
<head><title>Not a recipe</title></head>
<body><p>This page has no recipe.</p></body>
</html>
"#;

const NEXT_DATA_HTML: &str = r#"
<!DOCTYPE html>
<html>
<head>
    <script id="__NEXT_DATA__" type="application/json">
    {
        "props": {
            "pageProps": {
                "recipe": {
                    "name": "Test Recipe",
                    "tags": [
                        {"name": "Quick", "displayLabel": true},
                        {"name": "internal-tag", "displayLabel": false},
                        {"name": "Vegetarian", "displayLabel": true}
                    ]
                }
            }
        }
    }
    </script>
    <script type="application/ld+json">
    {
        "@type": "Recipe",
        "name": "Test Recipe",
        "recipeIngredient": ["1 cup rice"]
    }
    </script>
</head>
<body></body>
</html>
"#;

/// Meal-kit style page: sloppy schema.org data, but rich markup.
const MEAL_KIT_HTML: &str = r#"
<!DOCTYPE html>
<html lang="fr">
<head>
    <title>Camembert rôti - Quitoque</title>
    <script type="application/ld+json">
    {
        "@context": "https://schema.org",
        "@type": "Recipe",
        "name": "camembert rôti",
        "description": "camembert au lait cru, petits pains",
        "recipeIngredient": ["camembert au lait cru", "petits pains"],
        "recipeInstructions": [
            {"@type": "HowToStep", "text": "Préchauffez votre four à 200°C."},
            {"@type": "HowToStep", "text": "Enfournez le tout 12 à 15 min."}
        ],
        "keywords": "camembert rôti, petits pains, apéritif, rapide",
        "nutrition": {"@type": "NutritionInformation", "calories": "876 kCal", "fatContent": "66 g"},
        "totalTime": "PT0M"
    }
    </script>
</head>
<body>
    <ul class="ingredient-list">
        <li><span>375 g</span><span>camembert au lait cru <em>bio</em></span></li>
        <li><span>2</span><span>petits&nbsp;pains</span></li>
    </ul>
    <ul class="kitchen-list">
        <li>2 càs huile d'olive</li>
        <li>   </li>
        <li>sel</li>
    </ul>
    <div id="preparation-steps">
        <div class="toggle">
            <p class="bold">1. Le camembert rôti</p>
            <ul><li>Préchauffez votre four à 200°C.</li></ul>
        </div>
        <div class="toggle">
            <p class="bold">2. Les mouillettes</p>
            <ul><li>Coupez les petits pains.</li><li>Enfournez le tout 12 à 15 min.</li></ul>
        </div>
    </div>
    <div id="quantity">
        <div><span>Énergie (kCal)</span><span>297</span></div>
    </div>
</body>
</html>
"#;

#[test]
fn test_success_with_valid_recipe() {
    let record = scrape_from_html(SIMPLE_RECIPE_HTML, "https://example.com/recipe", true, None).unwrap();
    let raw = &record.raw;

    assert_eq!(raw.title.as_deref(), Some("Chocolate Cake"));
    assert_eq!(raw.description.as_deref(), Some("A delicious chocolate cake recipe"));
    assert_eq!(raw.ingredients.as_ref().map(Vec::len), Some(3));
    assert!(raw.ingredients.as_ref().unwrap().contains(&"200g flour".to_string()));
    assert_eq!(raw.prep_time, Some(15));
    assert_eq!(raw.cook_time, Some(30));
    assert_eq!(raw.total_time, Some(45));
    assert_eq!(raw.yields.as_deref(), Some("8 servings"));
    assert_eq!(raw.author.as_deref(), Some("Chef Test"));
    assert_eq!(raw.image.as_deref(), Some("https://example.com/cake.jpg"));
    assert_eq!(raw.host.as_deref(), Some("example.com"));
    assert_eq!(raw.canonical_url.as_deref(), Some("https://example.com/recipe"));
    assert_eq!(raw.keywords, None);
    assert_eq!(raw.ratings, None);
    assert_eq!(record.parsed_ingredients, None);
    assert_eq!(record.parsed_instructions, None);
}

#[test]
fn test_envelope_uses_camel_case_and_nulls() {
    let result = scrape_from_html(SIMPLE_RECIPE_HTML, "https://example.com/recipe", true, None);
    let json = ScrapeResponse::from_result(result).to_json().unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["prepTime"], 15);
    assert_eq!(value["data"]["title"], "Chocolate Cake");
    assert!(value["data"]["siteName"].is_null());
    assert!(value["data"]["parsedIngredients"].is_null());
    assert_eq!(value["data"]["links"], Value::Array(vec![]));
}

#[test]
fn test_failure_with_no_recipe() {
    let result = scrape_from_html(NO_RECIPE_HTML, "https://example.com/page", true, None);
    assert!(matches!(result, Err(ScrapeError::ExtractionFailure(_))));

    let value: Value =
        serde_json::from_str(&ScrapeResponse::from_result(result).to_json().unwrap()).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["error"]["type"], "ExtractionFailure");
}

#[test]
fn test_wild_mode() {
    assert!(scrape_from_html(SIMPLE_RECIPE_HTML, "https://example.com/recipe", true, None).is_ok());

    let strict = scrape_from_html(SIMPLE_RECIPE_HTML, "https://example.com/recipe", false, None);
    match strict {
        Err(ScrapeError::UnsupportedHost { host }) => assert_eq!(host, "example.com"),
        other => panic!("expected UnsupportedHost, got {other:?}"),
    }

    // Listed hosts are fine without wild mode
    assert!(
        scrape_from_html(SIMPLE_RECIPE_HTML, "https://www.allrecipes.com/recipe/1", false, None)
            .is_ok()
    );
}

#[test]
fn test_returns_auth_error_on_login_redirect() {
    let html = "<html><head><title>Connexion</title></head></html>";
    let result = scrape_from_html(
        html,
        "https://www.quitoque.fr/products/recipe-123",
        true,
        Some("https://www.quitoque.fr/login"),
    );

    let value: Value =
        serde_json::from_str(&ScrapeResponse::from_result(result).to_json().unwrap()).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["error"]["type"], "AuthenticationRequired");
    assert_eq!(value["error"]["host"], "quitoque.fr");
}

#[test]
fn test_auth_wall_wins_over_recipe_data() {
    // A login page that still embeds recipe teaser data must not be reported as a recipe
    let html = SIMPLE_RECIPE_HTML.replace("<head>", "<head><title>Sign in to continue</title>");
    let result = scrape_from_html(&html, "https://example.com/recipe", true, Some("https://example.com/x"));
    assert!(matches!(result, Err(ScrapeError::AuthenticationRequired { .. })));
}

#[test]
fn test_oversized_durations_do_not_abort_the_record() {
    let html = r#"<script type="application/ld+json">
        {"@type": "Recipe", "name": "Slow Stew", "prepTime": 4294967295, "cookTime": "PT1M"}
    </script>"#;
    let record = scrape_from_html(html, "https://example.com/r", true, None).unwrap();
    assert_eq!(record.raw.title.as_deref(), Some("Slow Stew"));
    assert_eq!(record.raw.cook_time, Some(1));
    assert_eq!(record.raw.total_time, None);
}

#[test]
fn test_keywords_fall_back_to_next_data() {
    let record = scrape_from_html(NEXT_DATA_HTML, "https://example.com/recipe", true, None).unwrap();
    assert_eq!(
        record.raw.keywords,
        Some(vec!["Quick".to_string(), "Vegetarian".to_string()])
    );
}

#[test]
fn test_meal_kit_page_is_cleaned_and_structured() {
    let record = scrape_from_html(MEAL_KIT_HTML, "https://www.quitoque.fr/recette/42", false, None).unwrap();
    let raw = &record.raw;

    assert_eq!(raw.title.as_deref(), Some("Camembert rôti"));
    assert_eq!(raw.description, None);
    assert_eq!(
        raw.keywords,
        Some(vec!["apéritif".to_string(), "rapide".to_string()])
    );
    assert_eq!(raw.total_time, Some(0));
    assert_eq!(raw.language.as_deref(), Some("fr"));
    assert_eq!(raw.host.as_deref(), Some("quitoque.fr"));

    let nutrients = raw.nutrients.as_ref().unwrap();
    assert_eq!(nutrients["servingSize"], "295g");
    assert_eq!(nutrients["calories"], "876 kCal");

    let ingredients = record.parsed_ingredients.as_ref().unwrap();
    assert_eq!(ingredients.len(), 4);
    assert_eq!(
        (ingredients[0].quantity.as_str(), ingredients[0].unit.as_str(), ingredients[0].name.as_str()),
        ("375", "g", "camembert au lait cru bio")
    );
    assert_eq!(
        (ingredients[1].quantity.as_str(), ingredients[1].unit.as_str(), ingredients[1].name.as_str()),
        ("2", "", "petits pains")
    );
    assert_eq!(
        (ingredients[2].quantity.as_str(), ingredients[2].unit.as_str(), ingredients[2].name.as_str()),
        ("2", "càs", "huile d'olive")
    );
    assert_eq!(ingredients[3].name, "sel");
    assert!(ingredients[3].quantity.is_empty());

    let steps = record.parsed_instructions.as_ref().unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].title.as_deref(), Some("Le camembert rôti"));
    assert_eq!(steps[1].title.as_deref(), Some("Les mouillettes"));
    assert_eq!(steps[1].instructions.len(), 2);
}

#[test]
fn test_scraping_is_idempotent() {
    let url = "https://www.quitoque.fr/recette/42";
    let first = scrape_from_html(MEAL_KIT_HTML, url, true, None).unwrap();
    let second = scrape_from_html(MEAL_KIT_HTML, url, true, None).unwrap();
    assert_eq!(first, second);

    let first = serde_json::to_string(&first).unwrap();
    let second = serde_json::to_string(&second).unwrap();
    assert_eq!(first, second);
}
