pub mod enrich_route;
pub mod health_route;

pub use enrich_route::*;
pub use health_route::*;
