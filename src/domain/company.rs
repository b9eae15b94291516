use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::field_attributes::deserialize_string_from_number;

/// One row of the company table, named after the Receita Federal columns.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CompanyRecord {
    #[serde(rename = "cnpj_basico", deserialize_with = "deserialize_string_from_number")]
    pub tax_id: String,
    #[serde(rename = "razao_social", default)]
    pub legal_name: Option<String>,
    #[serde(rename = "nome_fantasia", default)]
    pub trade_name: Option<String>,
    #[serde(rename = "municipio", default)]
    pub municipality: Option<String>,
    #[serde(rename = "tipo_logradouro", default)]
    pub street_type: Option<String>,
    #[serde(rename = "logradouro", default)]
    pub street: Option<String>,
    #[serde(
        rename = "numero",
        deserialize_with = "deserialize_option_string_from_number",
        default
    )]
    pub street_number: Option<String>,
    #[serde(rename = "complemento", default)]
    pub address_complement: Option<String>,
    #[serde(rename = "bairro", default)]
    pub neighborhood: Option<String>,
    #[serde(
        rename = "cep",
        deserialize_with = "deserialize_option_string_from_number",
        default
    )]
    pub postal_code: Option<String>,
    #[serde(rename = "uf", default)]
    pub state: Option<String>,
    #[serde(
        rename = "ddd_1",
        deserialize_with = "deserialize_option_string_from_number",
        default
    )]
    pub phone_area_code: Option<String>,
    #[serde(
        rename = "telefone_1",
        deserialize_with = "deserialize_option_string_from_number",
        default
    )]
    pub phone: Option<String>,
    #[serde(rename = "correio_eletronico", default)]
    pub email: Option<String>,
    #[serde(
        rename = "situacao_cadastral",
        deserialize_with = "deserialize_option_string_from_number",
        default
    )]
    pub registration_status: Option<String>,
    #[serde(
        rename = "cnae_fiscal_principal",
        deserialize_with = "deserialize_string_from_number",
        default
    )]
    pub primary_cnae: String,
}

/// Textual fields of a company that feed the keyword set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeywordField {
    LegalName,
    TradeName,
    Municipality,
    Neighborhood,
    Street,
}

impl CompanyRecord {
    pub fn field(&self, field: KeywordField) -> Option<&str> {
        let value = match field {
            KeywordField::LegalName => &self.legal_name,
            KeywordField::TradeName => &self.trade_name,
            KeywordField::Municipality => &self.municipality,
            KeywordField::Neighborhood => &self.neighborhood,
            KeywordField::Street => &self.street,
        };
        value.as_deref()
    }

    /// Trimmed legal name, `None` when missing or blank.
    pub fn search_name(&self) -> Option<&str> {
        non_blank(self.legal_name.as_deref())
    }

    /// Trimmed municipality, `None` when missing or blank.
    pub fn search_municipality(&self) -> Option<&str> {
        non_blank(self.municipality.as_deref())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
    Float(f64),
}

/// Columns that pandas reads as integers arrive as JSON numbers.
fn deserialize_option_string_from_number<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::String(s) => s,
        StringOrNumber::Integer(i) => i.to_string(),
        StringOrNumber::Float(f) => f.to_string(),
    }))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
