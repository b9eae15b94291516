use std::{collections::HashSet, time::Duration};

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use url::Url;

use crate::{configuration::SearchSettings, domain::search_result::SearchResult};

use super::{SearchClient, SearchError};

const RESULT_SELECTOR: &str = "div.result";
const TITLE_SELECTOR: &str = "a.result__a";
const SNIPPET_SELECTOR: &str = ".result__snippet";
const AD_CLASS: &str = "result--ad";
const AD_REDIRECT_PATH: &str = "/y.js";

/// Scrapes the no-javascript DuckDuckGo results page.
pub struct DuckDuckGoClient {
    endpoint: String,
}

#[derive(Serialize)]
struct DuckDuckGoQuery<'a> {
    q: &'a str,
}

impl DuckDuckGoClient {
    pub fn new(settings: &SearchSettings) -> Self {
        DuckDuckGoClient {
            endpoint: settings.endpoint.clone(),
        }
    }
}

#[async_trait]
impl SearchClient for DuckDuckGoClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        timeout: Duration,
    ) -> Result<Vec<SearchResult>, SearchError> {
        // A fresh client per query, dropped on every return path
        let client = reqwest::Client::builder()
            .user_agent(fake_user_agent::get_rua())
            .timeout(timeout)
            .build()?;

        let res = client
            .get(&self.endpoint)
            .query(&DuckDuckGoQuery { q: query })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let html_content = res.text().await?;
        let results = parse_results(&html_content, max_results)?;

        if results.is_empty() {
            if let Some(reason) = detect_challenge(&html_content) {
                return Err(SearchError::Blocked(reason));
            }
            log::info!("Found no results on query: {}", query);
        }

        Ok(results)
    }
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Selector(format!("{}: {:?}", css, e)))
}

pub fn parse_results(
    html_content: &str,
    max_results: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let result_selector = selector(RESULT_SELECTOR)?;
    let title_selector = selector(TITLE_SELECTOR)?;
    let snippet_selector = selector(SNIPPET_SELECTOR)?;

    let html_document = Html::parse_document(html_content);
    let mut seen_urls = HashSet::new();
    let mut results = vec![];

    for container in html_document.select(&result_selector) {
        if results.len() >= max_results {
            break;
        }
        if container.value().classes().any(|class| class == AD_CLASS) {
            continue;
        }

        let Some(anchor) = container.select(&title_selector).next() else {
            continue;
        };
        let Some(url) = anchor.value().attr("href").and_then(resolve_href) else {
            continue;
        };
        if is_ad_redirect(&url) {
            continue;
        }
        if !seen_urls.insert(url.clone()) {
            continue;
        }

        let body = container
            .select(&snippet_selector)
            .next()
            .map(element_text)
            .unwrap_or_default();

        results.push(SearchResult {
            url,
            title: element_text(anchor),
            body,
        });
    }

    Ok(results)
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Turns a result href into the destination url, unwrapping `/l/?uddg=` redirects.
pub fn resolve_href(href: &str) -> Option<String> {
    let href = href.trim();
    let absolute = match href {
        h if h.starts_with("http://") || h.starts_with("https://") => h.to_string(),
        h if h.starts_with("//") => format!("https:{}", h),
        h if h.starts_with('/') => format!("https://duckduckgo.com{}", h),
        _ => return None,
    };

    let parsed = Url::parse(&absolute).ok()?;
    let is_redirect = parsed
        .host_str()
        .is_some_and(|host| host.ends_with("duckduckgo.com"))
        && parsed.path().starts_with("/l/");

    if !is_redirect {
        return Some(absolute);
    }

    let (_, target) = parsed.query_pairs().find(|(key, _)| key == "uddg")?;
    let mut target = Url::parse(target.trim()).ok()?;
    target.set_fragment(None);
    Some(target.to_string())
}

fn is_ad_redirect(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| {
        parsed
            .host_str()
            .is_some_and(|host| host.ends_with("duckduckgo.com"))
            && parsed.path() == AD_REDIRECT_PATH
    })
}

fn detect_challenge(html_content: &str) -> Option<&'static str> {
    let content = html_content.to_lowercase();

    match content {
        c if c.contains("anomaly-modal") || c.contains("anomaly.js") => {
            Some("duckduckgo anomaly page")
        }
        c if c.contains("challenge-form") => Some("duckduckgo challenge form"),
        c if c.contains("g-recaptcha") || c.contains("verify you are human") => {
            Some("captcha challenge")
        }
        _ => None,
    }
}
