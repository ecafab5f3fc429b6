use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{validate_not_blank, validate_time_input};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[serde(alias = "nombre")]
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub name: String,
    #[serde(alias = "fecha")]
    pub scheduled_on: NaiveDate,
    #[serde(default, alias = "destino")]
    #[validate(length(max = 100))]
    pub destination: Option<String>,
    #[serde(default, alias = "hora")]
    #[validate(custom = "validate_time_input")]
    pub scheduled_at: Option<String>,
    #[serde(default, alias = "ubicacion")]
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,
}

/// Sin `completed` se alterna el estado actual
#[derive(Debug, Default, Deserialize)]
pub struct CompleteActivityRequest {
    #[serde(default, alias = "completada")]
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ActivityStateResponse {
    pub id: i64,
    pub completed: bool,
}
