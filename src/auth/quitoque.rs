use log::{debug, info, warn};
use reqwest::blocking::Client;
use scraper::Html;

use super::LoginHandler;
use crate::dom;

const QUITOQUE_BASE_URL: &str = "https://www.quitoque.fr";
const CSRF_FIELD: &str = "_csrf_shop_security_token";

/// Form login for quitoque.fr: fetch the CSRF token from the login page,
/// then post the credentials to `/login-check`.
pub struct QuitoqueLoginHandler {
    base_url: String,
}

impl Default for QuitoqueLoginHandler {
    fn default() -> Self {
        Self::with_base_url(QUITOQUE_BASE_URL)
    }
}

impl QuitoqueLoginHandler {
    /// Handler talking to another origin, e.g. a local test server.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn csrf_token(html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let input = dom::select_first(&document, &format!("input[name='{CSRF_FIELD}']"))?;
        Some(input.value().attr("value").unwrap_or_default().to_string())
    }

    fn try_login(
        &self,
        session: &Client,
        username: &str,
        password: &str,
    ) -> Result<bool, reqwest::Error> {
        let login_page = session.get(self.login_url()).send()?.error_for_status()?.text()?;

        let Some(token) = Self::csrf_token(&login_page) else {
            warn!("No CSRF token on the Quitoque login page");
            return Ok(false);
        };

        let form = [
            ("_username", username),
            ("_password", password),
            (CSRF_FIELD, token.as_str()),
        ];
        let response = session
            .post(format!("{}/login-check", self.base_url))
            .form(&form)
            .send()?;

        debug!(
            "Quitoque login-check ended at {} with status {}",
            response.url(),
            response.status()
        );
        Ok(!response.url().as_str().contains("/login") && response.status().as_u16() == 200)
    }
}

impl LoginHandler for QuitoqueLoginHandler {
    fn login(&self, session: &Client, username: &str, password: &str) -> bool {
        match self.try_login(session, username, password) {
            Ok(true) => {
                info!("Logged in to {}", self.host());
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!("Quitoque login request failed: {}", e);
                false
            }
        }
    }

    fn host(&self) -> &str {
        "quitoque.fr"
    }

    fn login_url(&self) -> String {
        format!("{}/login", self.base_url)
    }
}
