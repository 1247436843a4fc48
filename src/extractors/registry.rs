use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Hosts whose recipe pages are known to carry usable schema.org data.
static SUPPORTED_HOSTS: LazyLock<BTreeSet<&'static str>> = LazyLock::new(|| {
    BTreeSet::from([
        "allrecipes.com",
        "bbc.co.uk",
        "bbcgoodfood.com",
        "bonappetit.com",
        "budgetbytes.com",
        "chefkoch.de",
        "cuisineaz.com",
        "delish.com",
        "eatingwell.com",
        "epicurious.com",
        "food.com",
        "food52.com",
        "foodnetwork.com",
        "giallozafferano.it",
        "hellofresh.com",
        "hellofresh.fr",
        "jamieoliver.com",
        "journaldesfemmes.fr",
        "kitchenstories.com",
        "marmiton.org",
        "nytimes.com",
        "quitoque.fr",
        "recettes.qc.ca",
        "seriouseats.com",
        "simplyrecipes.com",
        "tasty.co",
        "thekitchn.com",
        "thepioneerwoman.com",
        "bettybossi.ch",
        "ricardocuisine.com",
    ])
});

/// Sorted list of supported hosts.
pub fn supported_hosts() -> Vec<String> {
    SUPPORTED_HOSTS.iter().map(|host| host.to_string()).collect()
}

/// Whether `host` is in the registry, ignoring case and a `www.` prefix.
pub fn is_supported(host: &str) -> bool {
    let host = host.trim().to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    SUPPORTED_HOSTS.contains(host)
}
