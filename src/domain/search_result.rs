use serde::Serialize;

/// One candidate returned by the search provider, in provider order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub body: String,
}

impl SearchResult {
    /// Text handed to the validator: body followed by title.
    pub fn snippet(&self) -> String {
        format!("{} {}", self.body, self.title)
    }
}
