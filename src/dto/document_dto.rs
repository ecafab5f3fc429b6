use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDocumentRequest {
    #[serde(alias = "tipo")]
    #[validate(length(max = 50), custom = "validate_not_blank")]
    pub kind: String,
    #[serde(alias = "nombre")]
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub name: String,
    #[serde(default, alias = "numero")]
    #[validate(length(max = 100))]
    pub number: Option<String>,
    #[serde(default, alias = "fecha_vencimiento")]
    pub expires_on: Option<NaiveDate>,
    #[serde(default, alias = "notas")]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DocumentListQuery {
    pub warning_days: Option<i64>,
}
