//! Resumen de estancias en alojamientos y cobertura del viaje

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::lodging::Lodging;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaySummary {
    pub total_nights: i64,
    pub total_lodgings: usize,
    pub average_nights: f64,
    pub nights_by_destination: BTreeMap<String, i64>,
}

impl StaySummary {
    pub fn from_lodgings(lodgings: &[Lodging]) -> Self {
        let mut nights_by_destination = BTreeMap::new();
        let mut total_nights = 0;

        for lodging in lodgings {
            let nights = lodging.nights();
            total_nights += nights;
            *nights_by_destination.entry(destination_key(lodging)).or_insert(0) += nights;
        }

        let average_nights = if lodgings.is_empty() {
            0.0
        } else {
            (total_nights as f64 / lodgings.len() as f64 * 10.0).round() / 10.0
        };

        Self {
            total_nights,
            total_lodgings: lodgings.len(),
            average_nights,
            nights_by_destination,
        }
    }
}

/// Direcciones más cortas se consideran incompletas
pub const MIN_ADDRESS_LENGTH: usize = 10;

/// Alojamientos en un mismo destino a partir de los cuales se sugiere consolidar
const CONSOLIDATE_ABOVE: usize = 2;

fn destination_key(lodging: &Lodging) -> String {
    if lodging.destination.trim().is_empty() {
        "otros".to_string()
    } else {
        lodging.destination.to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GapKind {
    Start,
    Between,
    End,
}

/// Noches del viaje sin alojamiento
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageGap {
    pub kind: GapKind,
    pub from: NaiveDate,
    pub until: NaiveDate,
    pub nights: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_lodging: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_lodging: Option<String>,
}

/// Cobertura de alojamiento entre el inicio y el fin del viaje.
/// Un viaje sin alojamientos nunca tiene cobertura completa.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LodgingCoverage {
    pub complete: bool,
    pub gaps: Vec<CoverageGap>,
    pub uncovered_nights: i64,
    pub first_check_in: Option<NaiveDate>,
    pub last_check_out: Option<NaiveDate>,
}

impl LodgingCoverage {
    /// `lodgings` debe venir ordenado por fecha de entrada
    pub fn check(trip_start: NaiveDate, trip_end: NaiveDate, lodgings: &[Lodging]) -> Self {
        let Some(first) = lodgings.first() else {
            return Self {
                complete: false,
                gaps: Vec::new(),
                uncovered_nights: 0,
                first_check_in: None,
                last_check_out: None,
            };
        };

        let mut gaps = Vec::new();
        if first.check_in_date > trip_start {
            gaps.push(CoverageGap {
                kind: GapKind::Start,
                from: trip_start,
                until: first.check_in_date,
                nights: (first.check_in_date - trip_start).num_days(),
                previous_lodging: None,
                next_lodging: Some(first.name.clone()),
            });
        }

        // Se compara contra la salida más tardía vista hasta ahora, así un
        // alojamiento solapado no esconde un hueco posterior
        let mut covered_until = first;
        for next in &lodgings[1..] {
            if covered_until.check_out_date < next.check_in_date {
                gaps.push(CoverageGap {
                    kind: GapKind::Between,
                    from: covered_until.check_out_date,
                    until: next.check_in_date,
                    nights: (next.check_in_date - covered_until.check_out_date).num_days(),
                    previous_lodging: Some(covered_until.name.clone()),
                    next_lodging: Some(next.name.clone()),
                });
            }
            if next.check_out_date > covered_until.check_out_date {
                covered_until = next;
            }
        }

        if covered_until.check_out_date < trip_end {
            gaps.push(CoverageGap {
                kind: GapKind::End,
                from: covered_until.check_out_date,
                until: trip_end,
                nights: (trip_end - covered_until.check_out_date).num_days(),
                previous_lodging: Some(covered_until.name.clone()),
                next_lodging: None,
            });
        }

        Self {
            complete: gaps.is_empty(),
            uncovered_nights: gaps.iter().map(|g| g.nights).sum(),
            gaps,
            first_check_in: Some(first.check_in_date),
            last_check_out: Some(covered_until.check_out_date),
        }
    }
}

/// Revisión de los alojamientos de un viaje con recomendaciones
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LodgingCheck {
    pub complete: bool,
    pub total_lodgings: usize,
    pub distinct_destinations: usize,
    pub with_breakfast: usize,
    pub without_confirmation: Vec<i64>,
    pub incomplete_address: Vec<i64>,
    pub coverage: LodgingCoverage,
    pub recommendations: Vec<String>,
}

impl LodgingCheck {
    pub fn build(trip_start: NaiveDate, trip_end: NaiveDate, lodgings: &[Lodging]) -> Self {
        let coverage = LodgingCoverage::check(trip_start, trip_end, lodgings);
        let without_confirmation: Vec<i64> = lodgings
            .iter()
            .filter(|l| l.confirmation_number.is_none())
            .map(|l| l.id)
            .collect();
        let incomplete_address: Vec<i64> = lodgings
            .iter()
            .filter(|l| l.address.trim().chars().count() < MIN_ADDRESS_LENGTH)
            .map(|l| l.id)
            .collect();

        let mut per_destination: BTreeMap<String, usize> = BTreeMap::new();
        for lodging in lodgings {
            *per_destination.entry(destination_key(lodging)).or_insert(0) += 1;
        }
        let distinct_destinations = lodgings
            .iter()
            .filter(|l| !l.destination.trim().is_empty())
            .map(|l| l.destination.to_lowercase())
            .collect::<BTreeSet<_>>()
            .len();

        let mut recommendations = Vec::new();
        if lodgings.is_empty() {
            recommendations.push("Agregar información de alojamientos para el viaje".to_string());
        } else {
            if !coverage.complete {
                recommendations.push(format!(
                    "Cubrir {} huecos de alojamiento ({} noches sin alojamiento)",
                    coverage.gaps.len(),
                    coverage.uncovered_nights
                ));
            }
            if !without_confirmation.is_empty() {
                recommendations.push(format!(
                    "Agregar números de confirmación para {} alojamientos",
                    without_confirmation.len()
                ));
            }
            if !incomplete_address.is_empty() {
                recommendations.push(format!("Completar direcciones para {} alojamientos", incomplete_address.len()));
            }
            for (destination, count) in &per_destination {
                if *count > CONSOLIDATE_ABOVE {
                    recommendations.push(format!(
                        "Considerar consolidar alojamientos en {} ({} alojamientos)",
                        destination, count
                    ));
                }
            }
        }

        Self {
            complete: coverage.complete && without_confirmation.is_empty() && incomplete_address.is_empty(),
            total_lodgings: lodgings.len(),
            distinct_destinations,
            with_breakfast: lodgings.iter().filter(|l| l.breakfast_included).count(),
            without_confirmation,
            incomplete_address,
            coverage,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn lodging(destination: &str, check_in: u32, check_out: u32) -> Lodging {
        Lodging {
            id: check_in as i64,
            trip_id: 1,
            destination: destination.to_string(),
            name: "Hostal".to_string(),
            address: "Av. Sol 123".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2024, 3, check_in).unwrap(),
            check_in_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 3, check_out).unwrap(),
            check_out_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            breakfast_included: false,
            confirmation_number: None,
            pin_code: None,
            check_in_number: None,
        }
    }

    #[test]
    fn test_stay_summary() {
        let summary = StaySummary::from_lodgings(&[
            lodging("Cusco", 1, 4),
            lodging("cusco", 6, 7),
            lodging("Lima", 4, 6),
        ]);

        assert_eq!(summary.total_nights, 6);
        assert_eq!(summary.total_lodgings, 3);
        assert_eq!(summary.average_nights, 2.0);
        assert_eq!(summary.nights_by_destination["cusco"], 4);
        assert_eq!(summary.nights_by_destination["lima"], 2);
    }

    #[test]
    fn test_average_is_rounded_to_one_decimal() {
        let summary = StaySummary::from_lodgings(&[lodging("Lima", 1, 2), lodging("Lima", 2, 4), lodging("Lima", 4, 8)]);
        assert_eq!(summary.total_nights, 7);
        assert_eq!(summary.average_nights, 2.3);
    }

    #[test]
    fn test_empty_summary() {
        let summary = StaySummary::from_lodgings(&[]);
        assert_eq!(summary.total_nights, 0);
        assert_eq!(summary.average_nights, 0.0);
    }

    #[test]
    fn test_coverage_finds_start_between_and_end_gaps() {
        let coverage = LodgingCoverage::check(
            date(1),
            date(12),
            &[lodging("Lima", 2, 4), lodging("Cusco", 6, 9)],
        );

        let kinds: Vec<GapKind> = coverage.gaps.iter().map(|g| g.kind).collect();
        assert_eq!(kinds, vec![GapKind::Start, GapKind::Between, GapKind::End]);
        assert_eq!(coverage.gaps.iter().map(|g| g.nights).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(coverage.uncovered_nights, 6);
        assert!(!coverage.complete);
        assert_eq!(coverage.gaps[1].from, date(4));
        assert_eq!(coverage.gaps[1].until, date(6));
    }

    #[test]
    fn test_back_to_back_stays_cover_the_trip() {
        let coverage = LodgingCoverage::check(date(1), date(7), &[lodging("Lima", 1, 4), lodging("Cusco", 4, 7)]);

        assert!(coverage.complete);
        assert_eq!(coverage.uncovered_nights, 0);
        assert_eq!(coverage.first_check_in, Some(date(1)));
        assert_eq!(coverage.last_check_out, Some(date(7)));
    }

    #[test]
    fn test_overlapping_stay_does_not_hide_a_later_gap() {
        // La segunda estancia queda dentro de la primera; el hueco real va de 10 a 12
        let coverage = LodgingCoverage::check(
            date(1),
            date(14),
            &[lodging("Lima", 1, 10), lodging("Lima", 3, 5), lodging("Cusco", 12, 14)],
        );

        assert_eq!(coverage.gaps.len(), 1);
        assert_eq!(coverage.gaps[0].from, date(10));
        assert_eq!(coverage.gaps[0].until, date(12));
    }

    #[test]
    fn test_trip_without_lodgings_is_not_covered() {
        let coverage = LodgingCoverage::check(date(1), date(5), &[]);
        assert!(!coverage.complete);
        assert!(coverage.gaps.is_empty());

        let check = LodgingCheck::build(date(1), date(5), &[]);
        assert!(!check.complete);
        assert_eq!(check.recommendations, vec!["Agregar información de alojamientos para el viaje"]);
    }

    #[test]
    fn test_lodging_check_flags_missing_details() {
        let mut confirmed = lodging("Cusco", 1, 3);
        confirmed.confirmation_number = Some("ABC123".to_string());
        let mut short_address = lodging("Cusco", 3, 5);
        short_address.address = "Sol 1".to_string();
        short_address.confirmation_number = Some("XYZ".to_string());
        let unconfirmed = lodging("Lima", 5, 7);

        let check = LodgingCheck::build(date(1), date(7), &[confirmed, short_address, unconfirmed]);

        assert!(!check.complete);
        assert!(check.coverage.complete);
        assert_eq!(check.without_confirmation, vec![5]);
        assert_eq!(check.incomplete_address, vec![3]);
        assert_eq!(check.distinct_destinations, 2);
        assert_eq!(check.recommendations.len(), 2);
    }

    #[test]
    fn test_lodging_check_suggests_consolidating() {
        let stays: Vec<Lodging> = [(1, 2), (2, 3), (3, 4)]
            .into_iter()
            .map(|(i, o)| {
                let mut l = lodging("Cusco", i, o);
                l.confirmation_number = Some(format!("C{i}"));
                l
            })
            .collect();

        let check = LodgingCheck::build(date(1), date(4), &stays);

        assert!(check.complete);
        assert_eq!(check.recommendations, vec!["Considerar consolidar alojamientos en cusco (3 alojamientos)"]);
    }
}
