//! Vencimiento de documentos, estadísticas y revisión antes del viaje

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    Expired,
    Expiring,
    Valid,
    Undated,
}

impl ExpiryStatus {
    pub fn classify(expires_on: Option<NaiveDate>, today: NaiveDate, warning_days: i64) -> Self {
        match expires_on {
            None => ExpiryStatus::Undated,
            Some(date) if date < today => ExpiryStatus::Expired,
            Some(date) if date <= today + Duration::days(warning_days) => ExpiryStatus::Expiring,
            Some(_) => ExpiryStatus::Valid,
        }
    }
}

/// Documentos de un viaje separados por estado de vencimiento
#[derive(Debug, Default, Serialize)]
pub struct ExpiryReport {
    pub warning_days: i64,
    pub expired: Vec<Document>,
    pub expiring: Vec<Document>,
    pub valid: Vec<Document>,
    pub undated: Vec<Document>,
}

impl ExpiryReport {
    pub fn build(documents: Vec<Document>, today: NaiveDate, warning_days: i64) -> Self {
        let mut report = ExpiryReport {
            warning_days,
            ..Default::default()
        };
        for document in documents {
            match ExpiryStatus::classify(document.expires_on, today, warning_days) {
                ExpiryStatus::Expired => report.expired.push(document),
                ExpiryStatus::Expiring => report.expiring.push(document),
                ExpiryStatus::Valid => report.valid.push(document),
                ExpiryStatus::Undated => report.undated.push(document),
            }
        }
        report
    }

    /// Documentos que requieren atención
    pub fn needs_attention(&self) -> usize {
        self.expired.len() + self.expiring.len()
    }
}

/// Ventana usada para marcar documentos críticos en la revisión del viaje
pub const CRITICAL_WARNING_DAYS: i64 = 15;

/// Tipos esenciales y recomendados, con los nombres aceptados para cada uno
const ESSENTIAL_KINDS: &[(&str, &[&str])] = &[
    ("pasaporte", &["pasaporte", "passport"]),
    ("visa", &["visa"]),
    ("seguro", &["seguro", "insurance"]),
];
const RECOMMENDED_KINDS: &[(&str, &[&str])] = &[
    ("reserva", &["reserva", "booking", "reservation"]),
    ("ticket", &["ticket", "boleto"]),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentStats {
    pub total: usize,
    pub with_expiry: usize,
    pub without_expiry: usize,
    pub expired: usize,
    pub expiring: usize,
    pub valid: usize,
    pub needs_attention: usize,
    pub by_kind: BTreeMap<String, usize>,
}

impl DocumentStats {
    pub fn build(documents: &[Document], today: NaiveDate, warning_days: i64) -> Self {
        let mut stats = DocumentStats {
            total: documents.len(),
            with_expiry: 0,
            without_expiry: 0,
            expired: 0,
            expiring: 0,
            valid: 0,
            needs_attention: 0,
            by_kind: BTreeMap::new(),
        };
        for document in documents {
            *stats.by_kind.entry(document.kind.clone()).or_insert(0) += 1;
            match ExpiryStatus::classify(document.expires_on, today, warning_days) {
                ExpiryStatus::Expired => stats.expired += 1,
                ExpiryStatus::Expiring => stats.expiring += 1,
                ExpiryStatus::Valid => stats.valid += 1,
                ExpiryStatus::Undated => stats.without_expiry += 1,
            }
        }
        stats.with_expiry = stats.total - stats.without_expiry;
        stats.needs_attention = stats.expired + stats.expiring;
        stats
    }
}

/// Documentos que faltan o requieren atención antes de viajar
#[derive(Debug, Serialize)]
pub struct DocumentCheck {
    pub complete: bool,
    pub total_documents: usize,
    pub missing_essential: Vec<&'static str>,
    pub missing_recommended: Vec<&'static str>,
    pub critical: Vec<Document>,
}

fn missing(kinds: &[(&'static str, &[&str])], present: &[String]) -> Vec<&'static str> {
    kinds
        .iter()
        .filter(|(_, names)| !present.iter().any(|kind| names.contains(&kind.as_str())))
        .map(|&(kind, _)| kind)
        .collect()
}

impl DocumentCheck {
    pub fn build(documents: Vec<Document>, today: NaiveDate) -> Self {
        let present: Vec<String> = documents.iter().map(|d| d.kind.trim().to_lowercase()).collect();
        let missing_essential = missing(ESSENTIAL_KINDS, &present);
        let missing_recommended = missing(RECOMMENDED_KINDS, &present);
        let total_documents = documents.len();

        let report = ExpiryReport::build(documents, today, CRITICAL_WARNING_DAYS);
        let critical: Vec<Document> = report.expired.into_iter().chain(report.expiring).collect();

        Self {
            complete: missing_essential.is_empty() && critical.is_empty(),
            total_documents,
            missing_essential,
            missing_recommended,
            critical,
        }
    }
}
