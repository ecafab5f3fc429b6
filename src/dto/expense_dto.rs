use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::expense::Expense;
use crate::utils::validation::{validate_not_blank, CURRENCY_CODE};

pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_expense_amount"))]
pub struct CreateExpenseRequest {
    #[serde(alias = "categoria")]
    #[validate(length(max = 50), custom = "validate_not_blank")]
    pub category: String,
    #[serde(alias = "descripcion")]
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub description: String,
    #[serde(alias = "monto")]
    pub amount: Decimal,
    #[serde(default, alias = "fecha")]
    pub spent_on: Option<NaiveDate>,
    #[serde(default, alias = "moneda")]
    #[validate(regex = "CURRENCY_CODE")]
    pub currency: Option<String>,
}

fn validate_expense_amount(request: &CreateExpenseRequest) -> Result<(), ValidationError> {
    if request.amount <= Decimal::ZERO {
        return Err(ValidationError::new("amount_not_positive"));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    pub total: Decimal,
    pub by_category: BTreeMap<String, Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_expense() {
        let request: CreateExpenseRequest = serde_json::from_value(json!({
            "category": "comida",
            "description": "Almuerzo",
            "amount": "25.40",
            "currency": "PEN"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.spent_on, None);
    }

    #[test]
    fn test_non_positive_amount_is_rejected() {
        let request: CreateExpenseRequest = serde_json::from_value(json!({
            "category": "comida",
            "description": "Almuerzo",
            "amount": 0
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_lowercase_currency_is_rejected() {
        let request: CreateExpenseRequest = serde_json::from_value(json!({
            "category": "comida",
            "description": "Almuerzo",
            "amount": 3,
            "currency": "usd"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }
}
