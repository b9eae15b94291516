pub mod company;
pub mod enrichment;
pub mod keywords;
pub mod normalize;
pub mod search_result;
pub mod validation;
