//! Login handshake.

use crate::api::client::SiteClient;
use crate::error::{Error, Result};
use crate::markup;

/// Path of the login form, relative to the site origin.
pub const LOGIN_PATH: &str = "login";

/// Log in with the site's form-based login.
///
/// Fetches the login page for its CSRF token, submits the credentials and
/// checks that the redirect chain ends on the site root. Anything else,
/// including landing back on the login page, means the credentials were
/// rejected.
pub async fn login(client: &SiteClient, email: &str, password: &str) -> Result<()> {
    let page = client.get_html(LOGIN_PATH).await?;

    let token = markup::csrf_token(&page)
        .ok_or_else(|| Error::Authentication("missing csrf token".to_string()))?;
    tracing::debug!("Found CSRF token ({} chars)", token.len());

    let effective_url = client
        .post_form(
            LOGIN_PATH,
            &[
                ("email", email),
                ("password", password),
                ("_csrf_token", token.as_str()),
            ],
        )
        .await?;

    let landing = client.base_url();
    if effective_url != *landing {
        tracing::debug!(
            "Login ended on {} instead of {}",
            effective_url,
            landing
        );
        return Err(Error::Authentication("authorization failed".to_string()));
    }

    Ok(())
}
