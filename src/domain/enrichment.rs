use serde::Serialize;

use super::{company::CompanyRecord, keywords::KeywordSet, validation::ValidationOutcome};

pub const NOT_FOUND: &str = "not found";
pub const INSUFFICIENT_DATA: &str = "insufficient data";
pub const TASK_FAILED: &str = "task failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Validated,
    NoValidatedProfile,
    InsufficientData,
    TaskFailure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichmentResult {
    #[serde(rename = "cnpj_basico")]
    pub tax_id: String,
    #[serde(rename = "razao_social")]
    pub legal_name: String,
    #[serde(rename = "municipio")]
    pub municipality: String,
    #[serde(rename = "instagram_url")]
    pub profile_url: String,
    pub status: ValidationStatus,
    pub matched_words: String,
    pub keywords_used: String,
}

impl EnrichmentResult {
    fn new(record: &CompanyRecord, profile_url: &str, status: ValidationStatus) -> Self {
        EnrichmentResult {
            tax_id: record.tax_id.clone(),
            legal_name: record.legal_name.clone().unwrap_or_default(),
            municipality: record.municipality.clone().unwrap_or_default(),
            profile_url: profile_url.to_string(),
            status,
            matched_words: String::new(),
            keywords_used: String::new(),
        }
    }

    pub fn validated(
        record: &CompanyRecord,
        profile_url: &str,
        keywords: &KeywordSet,
        outcome: &ValidationOutcome,
    ) -> Self {
        EnrichmentResult {
            matched_words: outcome.matched_words.join(","),
            keywords_used: keywords.joined(),
            ..Self::new(record, profile_url, ValidationStatus::Validated)
        }
    }

    pub fn not_found(record: &CompanyRecord) -> Self {
        Self::new(record, NOT_FOUND, ValidationStatus::NoValidatedProfile)
    }

    pub fn insufficient_data(record: &CompanyRecord) -> Self {
        Self::new(record, INSUFFICIENT_DATA, ValidationStatus::InsufficientData)
    }

    pub fn task_failure(record: &CompanyRecord) -> Self {
        Self::new(record, TASK_FAILED, ValidationStatus::TaskFailure)
    }
}
