use std::sync::Arc;

use crate::{
    configuration::SearchSettings,
    domain::{
        company::CompanyRecord,
        enrichment::EnrichmentResult,
        keywords::extract_keywords,
        search_result::SearchResult,
        validation::validate,
    },
};

use super::SearchClient;

const PROFILE_DOMAIN: &str = "instagram.com";
const PLATFORM_QUERY_TERM: &str = "instagram";

pub fn build_profile_search_query(legal_name: &str, municipality: &str) -> String {
    format!(r#""{}" {} {}"#, legal_name, municipality, PLATFORM_QUERY_TERM)
}

/// Drops the query string and any trailing slash from a profile url.
pub fn canonicalize_profile_url(url: &str) -> String {
    let base = match url.split_once('?') {
        Some((base, _)) => base,
        None => url,
    };
    base.strip_suffix('/').unwrap_or(base).to_string()
}

/// Resolves one company to its profile url.
#[derive(Clone)]
pub struct ProfileResolver {
    search_client: Arc<dyn SearchClient>,
    settings: SearchSettings,
}

impl ProfileResolver {
    pub fn new(search_client: Arc<dyn SearchClient>, settings: SearchSettings) -> Self {
        ProfileResolver {
            search_client,
            settings,
        }
    }

    pub async fn resolve_profile(&self, record: &CompanyRecord) -> EnrichmentResult {
        let (Some(legal_name), Some(municipality)) =
            (record.search_name(), record.search_municipality())
        else {
            log::info!("Skipping {}: missing legal name or municipality", record.tax_id);
            return EnrichmentResult::insufficient_data(record);
        };

        let keywords = extract_keywords(record);
        let query = build_profile_search_query(legal_name, municipality);

        tokio::time::sleep(self.settings.request_delay()).await;

        let candidates = self.search_or_empty(&query).await;

        for candidate in candidates
            .iter()
            .take(self.settings.max_results)
            .filter(|c| c.url.contains(PROFILE_DOMAIN))
        {
            let outcome = validate(
                &keywords,
                &candidate.snippet(),
                self.settings.validation_threshold,
            );

            if outcome.is_match {
                let profile_url = canonicalize_profile_url(&candidate.url);
                log::info!(
                    "Validated {} for {} | matched: {:?}",
                    profile_url,
                    record.tax_id,
                    outcome.matched_words
                );
                return EnrichmentResult::validated(record, &profile_url, &keywords, &outcome);
            }
        }

        log::info!("No validated profile for {} on query: {}", record.tax_id, query);
        EnrichmentResult::not_found(record)
    }

    async fn search_or_empty(&self, query: &str) -> Vec<SearchResult> {
        match self
            .search_client
            .search(query, self.settings.max_results, self.settings.timeout())
            .await
        {
            Ok(results) => results,
            Err(e) => {
                log::error!("Error during search '{}': {:?}", query, e);
                vec![]
            }
        }
    }
}
