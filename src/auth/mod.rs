//! Login-wall detection and site-specific login handlers.

mod quitoque;

pub use quitoque::QuitoqueLoginHandler;

use log::warn;
use regex::Regex;
use reqwest::blocking::Client;
use std::sync::LazyLock;
use url::Url;

use crate::model::AuthWallResult;

/// Path fragments of login pages sites redirect to.
const AUTH_URL_PATTERNS: [&str; 7] = [
    "/login",
    "/signin",
    "/sign-in",
    "/auth",
    "/connexion",
    "/account/login",
    "/user/login",
];

/// Words that show up in the `<title>` of a login page.
const AUTH_TITLE_KEYWORDS: [&str; 7] = [
    "login",
    "sign in",
    "connexion",
    "se connecter",
    "log in",
    "anmelden",
    "iniciar sesión",
];

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").expect("valid regex"));

/// Lowercased authority of `url` without a leading `www.`.
///
/// Falls back to the lowercased input when it is not an absolute URL.
pub fn normalize_host(url: &str) -> String {
    let authority = match Url::parse(url) {
        Ok(parsed) => match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        },
        Err(_) => url.to_string(),
    };

    let authority = authority.to_lowercase();
    match authority.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => authority,
    }
}

/// Decide whether the user was sent to a login page instead of the recipe.
///
/// `final_url` is the URL after redirects; `request_url` is the one that was
/// asked for and names the host in the result.
pub fn detect_auth_wall(html: &str, final_url: &str, request_url: &str) -> AuthWallResult {
    let host = normalize_host(request_url);

    let final_path = Url::parse(final_url)
        .map(|url| url.path().to_lowercase())
        .unwrap_or_default();
    if let Some(pattern) = AUTH_URL_PATTERNS.iter().find(|p| final_path.contains(*p)) {
        warn!("Redirected to login page ({}) for {}", pattern, host);
        return AuthWallResult {
            is_blocked: true,
            host,
        };
    }

    if let Some(title) = TITLE.captures(html).map(|caps| caps[1].to_lowercase()) {
        if let Some(keyword) = AUTH_TITLE_KEYWORDS.iter().find(|k| title.contains(*k)) {
            warn!("Login page title ({}) for {}", keyword, host);
            return AuthWallResult {
                is_blocked: true,
                host,
            };
        }
    }

    AuthWallResult {
        is_blocked: false,
        host,
    }
}

/// Site-specific authentication handshake.
///
/// `session` keeps the cookies set during login, so it must be used for the
/// requests that follow.
pub trait LoginHandler: Send + Sync {
    /// Log in with the given credentials, returning whether it succeeded.
    fn login(&self, session: &Client, username: &str, password: &str) -> bool;

    /// Normalized host this handler serves.
    fn host(&self) -> &str;

    /// Login page URL.
    fn login_url(&self) -> String;
}

static HANDLERS: LazyLock<Vec<Box<dyn LoginHandler>>> =
    LazyLock::new(|| vec![Box::new(QuitoqueLoginHandler::default())]);

/// Login handler registered for `host`, ignoring case and a `www.` prefix.
pub fn get_handler(host: &str) -> Option<&'static dyn LoginHandler> {
    let host = host.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    HANDLERS
        .iter()
        .find(|handler| handler.host() == host)
        .map(|handler| handler.as_ref())
}

/// Hosts that have a registered login handler.
pub fn auth_hosts() -> Vec<String> {
    HANDLERS.iter().map(|handler| handler.host().to_string()).collect()
}
