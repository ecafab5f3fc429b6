use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::lodging::Lodging;
use crate::services::lodging_service::StaySummary;
use crate::utils::validation::{validate_not_blank, validate_strictly_after, validate_time_input};

pub const DEFAULT_CHECK_IN_TIME: &str = "15:00";
pub const DEFAULT_CHECK_OUT_TIME: &str = "11:00";

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_lodging_dates"))]
pub struct CreateLodgingRequest {
    #[serde(alias = "nombre")]
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub name: String,
    #[serde(alias = "destino")]
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub destination: String,
    #[serde(alias = "direccion")]
    #[validate(length(max = 300), custom = "validate_not_blank")]
    pub address: String,
    #[serde(alias = "fecha_checkin")]
    pub check_in_date: NaiveDate,
    #[serde(default, alias = "hora_checkin")]
    #[validate(custom = "validate_time_input")]
    pub check_in_time: Option<String>,
    #[serde(alias = "fecha_checkout")]
    pub check_out_date: NaiveDate,
    #[serde(default, alias = "hora_checkout")]
    #[validate(custom = "validate_time_input")]
    pub check_out_time: Option<String>,
    #[serde(default, alias = "incluye_desayuno")]
    pub breakfast_included: bool,
    #[serde(default, alias = "numero_confirmacion")]
    #[validate(length(max = 100))]
    pub confirmation_number: Option<String>,
    #[serde(default, alias = "codigo_pin")]
    #[validate(length(max = 20))]
    pub pin_code: Option<String>,
    #[serde(default, alias = "numero_checkin")]
    #[validate(length(max = 50))]
    pub check_in_number: Option<String>,
}

fn validate_lodging_dates(request: &CreateLodgingRequest) -> Result<(), ValidationError> {
    validate_strictly_after(request.check_in_date, request.check_out_date)
}

#[derive(Debug, Serialize)]
pub struct LodgingListResponse {
    pub lodgings: Vec<Lodging>,
    pub summary: StaySummary,
}
