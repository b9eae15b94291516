pub mod batch_orchestrator;
pub mod duckduckgo_scraper;
pub mod profile_resolver;
pub mod search_client;

pub use batch_orchestrator::*;
pub use duckduckgo_scraper::*;
pub use profile_resolver::*;
pub use search_client::*;
