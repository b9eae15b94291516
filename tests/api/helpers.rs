use std::{
    collections::HashMap,
    net::TcpListener,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use lookout::{
    configuration::SearchSettings,
    domain::search_result::SearchResult,
    services::{build_profile_search_query, SearchClient, SearchError},
    startup::run,
};

#[derive(Default)]
pub struct CannedSearchClient {
    responses: HashMap<String, Vec<SearchResult>>,
    calls: AtomicUsize,
}

impl CannedSearchClient {
    pub fn with_profile(mut self, legal_name: &str, municipality: &str, handle: &str) -> Self {
        self.responses.insert(
            build_profile_search_query(legal_name, municipality),
            vec![SearchResult {
                url: format!("https://www.instagram.com/{}/", handle),
                title: format!("{} (@{})", legal_name, handle),
                body: format!("{} em {}", legal_name, municipality),
            }],
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchClient for CannedSearchClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        _timeout: Duration,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .responses
            .get(query)
            .map(|r| r.iter().take(max_results).cloned().collect())
            .unwrap_or_default())
    }
}

pub struct TestApp {
    pub address: String,
    pub search_client: Arc<CannedSearchClient>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_enrich(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/enrich", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub fn spawn_app(search_client: CannedSearchClient) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let search_client = Arc::new(search_client);

    let settings = SearchSettings {
        request_delay_secs: 0,
        worker_count: 3,
        ..Default::default()
    };
    let server = run(listener, search_client.clone(), settings).expect("Failed to bind address");
    tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        search_client,
        api_client: reqwest::Client::new(),
    }
}
