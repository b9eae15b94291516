use std::{collections::HashMap, net::TcpListener, time::Duration};

use actix_web::{http::header::ContentType, web, App, HttpResponse, HttpServer};
use lookout::{
    configuration::SearchSettings,
    services::{DuckDuckGoClient, SearchClient, SearchError},
};

const TIMEOUT: Duration = Duration::from_secs(5);

const RESULTS_PAGE: &str = r##"
    <html><body>
      <div class="result result--ad">
        <h2><a class="result__a" href="https://duckduckgo.com/y.js?ad_provider=bing&amp;u3=x">Padaria Sponsor</a></h2>
        <a class="result__snippet" href="#">Anúncio</a>
      </div>
      <div class="result results_links">
        <h2><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.instagram.com%2Fpadariasilva%2F&amp;rut=abc">Padaria Silva (@padariasilva)</a></h2>
        <a class="result__snippet" href="#">Pães artesanais em Recife</a>
      </div>
      <div class="result results_links">
        <h2><a class="result__a" href="https://padariasilva.com.br/">Padaria Silva - Site oficial</a></h2>
        <div class="result__snippet">Desde 1970</div>
      </div>
      <div class="result results_links">
        <h2><a class="result__a" href="https://www.facebook.com/padariasilva">Padaria Silva | Facebook</a></h2>
        <div class="result__snippet">Curta a página</div>
      </div>
      <div class="result results_links">
        <h2><a class="result__a" href="https://www.instagram.com/outrapadaria/">Outra Padaria</a></h2>
        <div class="result__snippet">Olinda</div>
      </div>
    </body></html>
"##;

const CHALLENGE_PAGE: &str = r##"
    <html><body>
      <div class="anomaly-modal__mask"></div>
      <form id="challenge-form" action="/anomaly.js" method="post"></form>
    </body></html>
"##;

const EMPTY_PAGE: &str = r##"
    <html><body>
      <div class="no-results">No results.</div>
    </body></html>
"##;

async fn results_page(query: web::Query<HashMap<String, String>>) -> HttpResponse {
    if query.get("q").map(String::as_str) != Some("\"Padaria Silva\" Recife instagram") {
        return HttpResponse::BadRequest().finish();
    }
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(RESULTS_PAGE)
}

async fn unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().finish()
}

async fn challenge_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(CHALLENGE_PAGE)
}

async fn empty_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(EMPTY_PAGE)
}

/// Serves canned DuckDuckGo pages on a random local port and returns its base url.
fn spawn_search_provider() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = HttpServer::new(|| {
        App::new()
            .route("/html/", web::get().to(results_page))
            .route("/unavailable/", web::get().to(unavailable))
            .route("/challenge/", web::get().to(challenge_page))
            .route("/empty/", web::get().to(empty_page))
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to listen on address")
    .run();
    tokio::spawn(server);

    format!("http://127.0.0.1:{}", port)
}

fn client_for(endpoint: String) -> DuckDuckGoClient {
    DuckDuckGoClient::new(&SearchSettings {
        endpoint,
        ..Default::default()
    })
}

#[tokio::test]
async fn search_returns_organic_results_in_provider_order() {
    let address = spawn_search_provider();
    let client = client_for(format!("{}/html/", address));

    let results = client
        .search("\"Padaria Silva\" Recife instagram", 3, TIMEOUT)
        .await
        .unwrap();

    let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://www.instagram.com/padariasilva/",
            "https://padariasilva.com.br/",
            "https://www.facebook.com/padariasilva",
        ]
    );
    assert_eq!(results[0].title, "Padaria Silva (@padariasilva)");
    assert_eq!(results[0].body, "Pães artesanais em Recife");
}

#[tokio::test]
async fn search_honours_a_smaller_cap() {
    let address = spawn_search_provider();
    let client = client_for(format!("{}/html/", address));

    let results = client
        .search("\"Padaria Silva\" Recife instagram", 1, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "https://www.instagram.com/padariasilva/");
}

#[tokio::test]
async fn non_success_status_is_a_status_error() {
    let address = spawn_search_provider();
    let client = client_for(format!("{}/unavailable/", address));

    let outcome = client.search("padaria", 3, TIMEOUT).await;

    assert!(
        matches!(outcome, Err(SearchError::Status(503))),
        "unexpected outcome: {:?}",
        outcome
    );
}

#[tokio::test]
async fn challenge_page_is_a_blocked_error() {
    let address = spawn_search_provider();
    let client = client_for(format!("{}/challenge/", address));

    let outcome = client.search("padaria", 3, TIMEOUT).await;

    assert!(
        matches!(outcome, Err(SearchError::Blocked(_))),
        "unexpected outcome: {:?}",
        outcome
    );
}

#[tokio::test]
async fn page_without_results_is_empty_not_an_error() {
    let address = spawn_search_provider();
    let client = client_for(format!("{}/empty/", address));

    let results = client.search("padaria", 3, TIMEOUT).await.unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn unreachable_provider_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let client = client_for(format!("http://127.0.0.1:{}/html/", port));

    let outcome = client.search("padaria", 3, TIMEOUT).await;

    assert!(
        matches!(outcome, Err(SearchError::Request(_))),
        "unexpected outcome: {:?}",
        outcome
    );
}
