//! Built-in seed data.

use rust_decimal::Decimal;

use riskwatch_types::RiskEvent;

/// The policies every default store starts with, in seed order.
pub fn seed_events() -> Vec<RiskEvent> {
    vec![
        RiskEvent::new(
            "P12345",
            Decimal::new(500_000, 0),
            "Florida",
            "Hurricane",
            vec![
                String::from("2021-HurricaneMinor"),
                String::from("2023-HurricaneMajor"),
            ],
        ),
        RiskEvent::new(
            "P67890",
            Decimal::new(250_000, 0),
            "California",
            "Earthquake",
            Vec::new(),
        ),
    ]
}
