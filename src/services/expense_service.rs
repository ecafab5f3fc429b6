//! Totales de gastos

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::expense::Expense;

pub fn total_amount(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

pub fn totals_by_category(expenses: &[Expense]) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(Decimal::ZERO) += expense.amount;
    }
    totals
}
