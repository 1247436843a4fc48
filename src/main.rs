use log::debug;
use recipe_scraper::{
    list_auth_hosts, list_supported_hosts, load_config, RecipeScraper, ScrapeResponse,
};
use serde::Serialize;
use std::{env, fs, process};

const USAGE: &str = "Usage:
  recipe-scraper <url>
  recipe-scraper --strict <url>
  recipe-scraper --html <file> <url> [final-url]
  recipe-scraper --auth <url>      (reads RECIPE_SCRAPER_USERNAME / RECIPE_SCRAPER_PASSWORD)
  recipe-scraper --hosts
  recipe-scraper --auth-hosts";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = load_config()?;
    debug!("{:?}", config);
    let scraper = RecipeScraper::builder().from_config(&config);

    let success = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["--hosts"] => emit(ScrapeResponse::ok(list_supported_hosts()))?,
        ["--auth-hosts"] => emit(ScrapeResponse::ok(list_auth_hosts()))?,
        ["--strict", url] => emit(ScrapeResponse::from_result(
            scraper.wild_mode(false).build().scrape_from_url(url),
        ))?,
        ["--html", file, url, rest @ ..] if rest.len() <= 1 => {
            let html = fs::read_to_string(file)?;
            let final_url = rest.first().copied();
            emit(ScrapeResponse::from_result(
                scraper.build().scrape_from_html(&html, url, final_url),
            ))?
        }
        ["--auth", url] => {
            let Some((username, password)) = credentials() else {
                eprintln!("RECIPE_SCRAPER_USERNAME and RECIPE_SCRAPER_PASSWORD must be set\n\n{USAGE}");
                process::exit(2);
            };
            emit(ScrapeResponse::from_result(
                scraper
                    .build()
                    .scrape_authenticated(url, &username, &password),
            ))?
        }
        [url] if !url.starts_with("--") => {
            emit(ScrapeResponse::from_result(scraper.build().scrape_from_url(url)))?
        }
        _ => {
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if !success {
        process::exit(1);
    }
    Ok(())
}

fn credentials() -> Option<(String, String)> {
    let username = env::var("RECIPE_SCRAPER_USERNAME").ok()?;
    let password = env::var("RECIPE_SCRAPER_PASSWORD").ok()?;
    Some((username, password))
}

/// Print the envelope, returning whether it reports success.
fn emit<T: Serialize>(response: ScrapeResponse<T>) -> Result<bool, serde_json::Error> {
    println!("{}", response.to_json()?);
    Ok(response.success)
}
