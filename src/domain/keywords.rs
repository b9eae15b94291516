use std::collections::BTreeSet;

use itertools::Itertools;

use super::{
    company::{CompanyRecord, KeywordField},
    normalize::normalize_field,
};

const MIN_KEYWORD_LEN: usize = 2;

pub const KEYWORD_FIELDS: [KeywordField; 5] = [
    KeywordField::LegalName,
    KeywordField::TradeName,
    KeywordField::Municipality,
    KeywordField::Neighborhood,
    KeywordField::Street,
];

/// Generic tokens that say nothing about which company a page belongs to.
/// Stored already normalized.
pub const STOP_WORDS: &[&str] = &[
    // legal forms
    "ltda", "me", "epp", "eireli", "sa", "s/a", "s.a.", "mei", "cia", "ss", "slu",
    // commerce
    "comercio", "servicos", "industria", "empresa", "grupo", "loja", "holding",
    "participacoes", "representacoes", "distribuidora", "importacao", "exportacao",
    // address
    "rua", "r.", "avenida", "av", "av.", "travessa", "alameda", "rodovia", "estrada",
    "praca", "largo", "via", "quadra", "lote", "sala", "centro", "bairro",
    "jardim", "vila", "conjunto",
    // connectives
    "de", "da", "do", "das", "dos", "em", "na", "no", "com", "para", "por",
    // country and web
    "brasil", "br", "www", "http", "https", "instagram",
];

/// Normalized, de-duplicated tokens describing one company.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(BTreeSet<String>);

impl KeywordSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.0.contains(keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Comma-joined keywords in sorted order.
    pub fn joined(&self) -> String {
        self.iter().join(",")
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        KeywordSet(iter.into_iter().map(Into::into).collect())
    }
}

pub fn extract_keywords(record: &CompanyRecord) -> KeywordSet {
    KEYWORD_FIELDS
        .iter()
        .map(|&field| normalize_field(record.field(field)))
        .flat_map(|value| {
            value
                .split_whitespace()
                .filter(|token| token.chars().count() >= MIN_KEYWORD_LEN)
                .map(str::to_string)
                .collect::<Vec<String>>()
        })
        .filter(|token| !STOP_WORDS.contains(&token.as_str()))
        .collect()
}
