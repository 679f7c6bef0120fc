//! DuckDuckGo HTML search provider
//!
//! Posts the query to the HTML-only search endpoint and scrapes the result
//! blocks. No API key is needed.

use crate::config::{DiscoveryConfig, HttpConfig};
use crate::crawler::build_http_client;
use crate::discovery::{DiscoveryError, SearchHit, SearchProvider};
use crate::url::extract_netloc;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// Search provider backed by DuckDuckGo's HTML endpoint
#[derive(Debug, Clone)]
pub struct DuckDuckGoHtml {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl DuckDuckGoHtml {
    /// Creates the provider
    pub fn new(http: &HttpConfig, discovery: &DiscoveryConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(http)?,
            endpoint: discovery.endpoint.clone(),
            timeout: http.page_timeout(),
        })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoHtml {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, DiscoveryError> {
        tracing::debug!("Searching DuckDuckGo for '{}'", query);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("q", query)])
            .header("Accept", "text/html")
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_results(&body, max_results)
    }
}

/// Extracts search hits from a DuckDuckGo HTML result page
pub fn parse_results(body: &str, max_results: usize) -> Result<Vec<SearchHit>, DiscoveryError> {
    let result_sel = selector(".result")?;
    let link_sel = selector("a.result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let doc = Html::parse_document(body);
    let mut hits = Vec::new();

    for result in doc.select(&result_sel) {
        if hits.len() >= max_results {
            break;
        }

        let Some(link) = result.select(&link_sel).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href").and_then(unwrap_redirect) else {
            continue;
        };

        let title = link.text().collect::<String>().trim().to_string();
        let title = if title.is_empty() {
            extract_netloc(&href)
        } else {
            title
        };

        let body = result
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        hits.push(SearchHit { title, href, body });
    }

    Ok(hits)
}

fn selector(css: &str) -> Result<Selector, DiscoveryError> {
    Selector::parse(css).map_err(|e| DiscoveryError::Parse(format!("bad selector '{}': {}", css, e)))
}

/// Resolves a result href to the destination URL
///
/// Result links are often wrapped as `//duckduckgo.com/l/?uddg=<encoded>&rut=...`.
/// Returns `None` for anything that does not end up as an HTTP(S) URL.
fn unwrap_redirect(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    let url = Url::parse(&absolute).ok()?;
    let redirect = url
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .and_then(|(_, value)| Url::parse(&value).ok());
    let target = redirect.unwrap_or(url);

    match target.scheme() {
        "http" | "https" => Some(target.to_string()),
        _ => None,
    }
}
