use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        company::CompanyRecord,
        enrichment::{EnrichmentResult, ValidationStatus},
    },
    services::BatchOrchestrator,
};

#[derive(Deserialize)]
struct EnrichBody {
    cnae: Option<String>,
    companies: Vec<CompanyRecord>,
}

#[derive(Serialize)]
struct EnrichResponse {
    batch_id: Uuid,
    cnae: Option<String>,
    total: usize,
    validated: usize,
    results: Vec<EnrichmentResult>,
}

/// Keeps the companies whose primary CNAE equals `cnae`, or all of them.
pub fn filter_by_cnae(companies: Vec<CompanyRecord>, cnae: Option<&str>) -> Vec<CompanyRecord> {
    match cnae.map(str::trim).filter(|c| !c.is_empty()) {
        Some(cnae) => companies
            .into_iter()
            .filter(|c| c.primary_cnae.trim() == cnae)
            .collect(),
        None => companies,
    }
}

#[post("/enrich")]
pub async fn enrich_companies(
    body: web::Json<EnrichBody>,
    orchestrator: web::Data<BatchOrchestrator>,
) -> HttpResponse {
    let EnrichBody { cnae, companies } = body.into_inner();
    let companies = filter_by_cnae(companies, cnae.as_deref());

    log::info!(
        "Enrich request for cnae {:?} with {} companies",
        cnae,
        companies.len()
    );

    let batch_id = Uuid::new_v4();
    let results = match companies.is_empty() {
        true => vec![],
        false => orchestrator.run_batch_with_id(batch_id, companies).await,
    };
    let validated = results
        .iter()
        .filter(|r| r.status == ValidationStatus::Validated)
        .count();

    HttpResponse::Ok().json(EnrichResponse {
        batch_id,
        cnae,
        total: results.len(),
        validated,
        results,
    })
}
