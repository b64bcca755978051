//! HTTP session client for the course site.

use std::sync::Arc;

use reqwest::{cookie::Jar, redirect, Client, Response};
use url::Url;

use crate::error::{Error, Result};

/// Maximum redirects followed while downloading a resource.
pub const DOWNLOAD_MAX_REDIRECTS: usize = 2;

/// Cookie-backed HTTP client bound to one site origin.
///
/// Page requests and resource downloads use two reqwest clients that share a
/// single cookie jar, so the session established at login is seen by both.
pub struct SiteClient {
    client: Client,
    download_client: Client,
    base_url: Url,
}

impl SiteClient {
    /// Create a client for the given site origin.
    pub fn new(base_url: Url, user_agent: &str) -> Result<Self> {
        let jar = Arc::new(Jar::default());

        let client = Client::builder()
            .user_agent(user_agent)
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|e| Error::Site(format!("Failed to create HTTP client: {}", e)))?;

        let download_client = Client::builder()
            .user_agent(user_agent)
            .cookie_provider(jar)
            .redirect(redirect::Policy::limited(DOWNLOAD_MAX_REDIRECTS))
            .build()
            .map_err(|e| Error::Site(format!("Failed to create download client: {}", e)))?;

        Ok(Self {
            client,
            download_client,
            base_url,
        })
    }

    /// The site origin every relative path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path or absolute URL against the site origin.
    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// GET a page and return its body.
    pub async fn get_html(&self, path: &str) -> Result<String> {
        let url = self.url(path)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(Error::Site(format!("HTTP {} for {}", status, url)));
        }

        Ok(response.text().await?)
    }

    /// POST a form and return the effective URL after redirects.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<Url> {
        let url = self.url(path)?;
        tracing::debug!("POST {}", url);

        let response = self.client.post(url).form(form).send().await?;
        tracing::debug!(
            "Response status: {}, effective URL: {}",
            response.status(),
            response.url()
        );

        Ok(response.url().clone())
    }

    /// Start downloading a resource, following at most [`DOWNLOAD_MAX_REDIRECTS`] redirects.
    pub async fn download(&self, url: &Url) -> Result<Response> {
        tracing::debug!("GET {} (download)", url);

        let response = self.download_client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download file: HTTP {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> SiteClient {
        SiteClient::new(Url::parse(&server.uri()).unwrap(), "test-agent").unwrap()
    }

    #[test]
    fn test_url_resolution() {
        let client =
            SiteClient::new(Url::parse("https://symfonycasts.com/").unwrap(), "ua").unwrap();
        assert_eq!(
            client.url("login").unwrap().as_str(),
            "https://symfonycasts.com/login"
        );
        assert_eq!(
            client.url("/screencast/symfony").unwrap().as_str(),
            "https://symfonycasts.com/screencast/symfony"
        );
        assert_eq!(
            client.url("https://cdn.example.com/v.mp4").unwrap().as_str(),
            "https://cdn.example.com/v.mp4"
        );
    }

    #[tokio::test]
    async fn test_get_html_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.get_html("/missing").await.unwrap_err();
        assert!(matches!(err, Error::Site(_)));
    }

    #[tokio::test]
    async fn test_cookies_are_shared_with_downloads() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/set"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "SESSION=xyz; Path=/")
                    .set_body_string("ok"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/file"))
            .and(header("cookie", "SESSION=xyz"))
            .respond_with(ResponseTemplate::new(200).set_body_string("payload"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.get_html("/set").await.unwrap();

        let url = client.url("/file").unwrap();
        let response = client.download(&url).await.unwrap();
        assert_eq!(response.text().await.unwrap(), "payload");
    }

    #[tokio::test]
    async fn test_download_redirect_limit() {
        let server = MockServer::start().await;
        let hops = [
            ("/r1", "/r2"),
            ("/r2", "/r3"),
            ("/r3", "/r4"),
            ("/r4", "/final"),
        ];
        for (from, to) in hops {
            Mock::given(method("GET"))
                .and(path(from))
                .respond_with(ResponseTemplate::new(302).insert_header("location", to))
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/final"))
            .respond_with(ResponseTemplate::new(200).set_body_string("done"))
            .mount(&server)
            .await;

        let client = client_for(&server);

        // A single hop is followed.
        let url = client.url("/r4").unwrap();
        assert!(client.download(&url).await.is_ok());

        // Four hops are not.
        let url = client.url("/r1").unwrap();
        assert!(client.download(&url).await.is_err());
    }
}
