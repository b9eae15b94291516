use std::sync::Arc;

use tokio::sync::{
    mpsc::{self, UnboundedReceiver, UnboundedSender},
    Mutex,
};
use uuid::Uuid;

use crate::domain::{
    company::CompanyRecord,
    enrichment::{EnrichmentResult, ValidationStatus},
};

use super::ProfileResolver;

type JobReceiver = Arc<Mutex<UnboundedReceiver<CompanyRecord>>>;

/// Fans `ProfileResolver` out over a fixed number of workers.
pub struct BatchOrchestrator {
    resolver: Arc<ProfileResolver>,
    worker_count: usize,
}

impl BatchOrchestrator {
    pub fn new(resolver: ProfileResolver, worker_count: usize) -> Self {
        BatchOrchestrator {
            resolver: Arc::new(resolver),
            worker_count: worker_count.max(1),
        }
    }

    /// Resolves every record. Results arrive in completion order, one per
    /// input record; a record whose task blew up comes back as `TaskFailure`.
    pub async fn run_batch(&self, records: Vec<CompanyRecord>) -> Vec<EnrichmentResult> {
        self.run_batch_with_id(Uuid::new_v4(), records).await
    }

    /// Same as [`BatchOrchestrator::run_batch`], tagging log lines with `batch_id`.
    pub async fn run_batch_with_id(
        &self,
        batch_id: Uuid,
        records: Vec<CompanyRecord>,
    ) -> Vec<EnrichmentResult> {
        let total = records.len();
        log::info!(
            "Batch {} started with {} companies on {} workers",
            batch_id,
            total,
            self.worker_count
        );

        let (job_sender, job_receiver) = mpsc::unbounded_channel::<CompanyRecord>();
        let (result_sender, mut result_receiver) = mpsc::unbounded_channel::<EnrichmentResult>();

        for record in records {
            if let Err(e) = job_sender.send(record) {
                log::error!("Batch {} job queue closed early: {:?}", batch_id, e);
            }
        }
        drop(job_sender);

        let job_receiver: JobReceiver = Arc::new(Mutex::new(job_receiver));
        for worker_id in 0..self.worker_count.min(total) {
            tokio::spawn(profile_worker(
                batch_id,
                worker_id,
                self.resolver.clone(),
                job_receiver.clone(),
                result_sender.clone(),
            ));
        }
        drop(result_sender);

        let mut results = Vec::with_capacity(total);
        while let Some(result) = result_receiver.recv().await {
            results.push(result);
        }

        let validated = results
            .iter()
            .filter(|r| r.status == ValidationStatus::Validated)
            .count();
        log::info!(
            "Batch {} finished: {} results, {} validated profiles",
            batch_id,
            results.len(),
            validated
        );

        results
    }
}

async fn profile_worker(
    batch_id: Uuid,
    worker_id: usize,
    resolver: Arc<ProfileResolver>,
    job_receiver: JobReceiver,
    result_sender: UnboundedSender<EnrichmentResult>,
) {
    loop {
        let next = job_receiver.lock().await.recv().await;
        let Some(record) = next else {
            break;
        };

        let task_resolver = resolver.clone();
        let task_record = record.clone();
        let task = tokio::spawn(async move { task_resolver.resolve_profile(&task_record).await });

        let result = match task.await {
            Ok(result) => result,
            Err(e) => {
                log::error!(
                    "Batch {} worker {} failed on company {}: {:?}",
                    batch_id,
                    worker_id,
                    record.tax_id,
                    e
                );
                EnrichmentResult::task_failure(&record)
            }
        };

        if let Err(e) = result_sender.send(result) {
            log::error!("Batch {} result channel closed: {:?}", batch_id, e);
            break;
        }
    }
}
