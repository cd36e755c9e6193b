//! # Events Module
//!
//! Banquet hall quoting: a booking's total is the hall's day rate plus a
//! flat surcharge for each selected add-on service.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Optional add-on services for a hall event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventService {
    Dj,
    Decoration,
    Catering,
}

impl EventService {
    /// Flat surcharge added to the day rate when the service is selected.
    // TODO: per-plate catering pricing once plate counts are captured at
    // booking time; until then catering is quoted separately and carries no
    // flat fee.
    pub fn surcharge(&self) -> Money {
        match self {
            EventService::Dj => Money::from_cents(500000),
            EventService::Decoration => Money::from_cents(200000),
            EventService::Catering => Money::zero(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventService::Dj => "DJ",
            EventService::Decoration => "Decoration",
            EventService::Catering => "Catering",
        }
    }
}

/// Day rate plus the selected services' surcharges.
pub fn quote_event(day_rate: Money, services: &[EventService]) -> Money {
    services
        .iter()
        .fold(day_rate, |total, s| total + s.surcharge())
}

/// Comma-joined service labels for the booking record (`DJ, Decoration`).
pub fn services_summary(services: &[EventService]) -> String {
    services
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_sums_surcharges() {
        let day_rate = Money::from_cents(2000000); // 20000.00
        let quoted = quote_event(day_rate, &[EventService::Dj, EventService::Decoration]);
        assert_eq!(quoted.cents(), 2700000); // +5000 +2000
    }

    #[test]
    fn quote_bare_hall() {
        let day_rate = Money::from_cents(500000);
        assert_eq!(quote_event(day_rate, &[]).cents(), 500000);
    }

    #[test]
    fn catering_has_no_flat_fee() {
        let day_rate = Money::from_cents(1000000);
        assert_eq!(quote_event(day_rate, &[EventService::Catering]), day_rate);
    }

    #[test]
    fn summary_joins_labels() {
        assert_eq!(
            services_summary(&[EventService::Dj, EventService::Decoration]),
            "DJ, Decoration"
        );
        assert_eq!(services_summary(&[]), "");
    }
}
