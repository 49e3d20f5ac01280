//! The risk event record.
//!
//! A [`RiskEvent`] describes one insured property's exposure: what it is
//! worth, where it is, what kind of peril it is exposed to, and the labels
//! of claims previously filed against the policy. Records are immutable
//! once built; the event store owns the canonical copies and everything
//! downstream works on shared references or clones.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::{Validate, ValidationError};

use crate::ids::PolicyId;

/// A single insured property and its risk exposure.
///
/// JSON shape:
///
/// ```json
/// {
///   "policy_id": "P12345",
///   "property_value": 500000,
///   "insured_location": "Florida",
///   "event_type": "Hurricane",
///   "claim_history": ["2021-HurricaneMinor", "2023-HurricaneMajor"]
/// }
/// ```
///
/// `property_value` is fixed-point on the Rust side but travels as a JSON
/// number. `claim_history` may be omitted on input and defaults to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RiskEvent {
    /// Unique identifier for the insurance policy.
    #[validate(custom(function = "validate_policy_id"))]
    pub policy_id: PolicyId,
    /// Monetary value of the insured property. Never negative.
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_non_negative"))]
    #[ts(type = "number")]
    pub property_value: Decimal,
    /// Free-form geographic label (e.g. `Florida`). Not normalized.
    #[validate(length(min = 1, message = "insured_location must not be empty"))]
    pub insured_location: String,
    /// Free-form peril category (e.g. `Hurricane`).
    #[validate(length(min = 1, message = "event_type must not be empty"))]
    pub event_type: String,
    /// Labels of previous claims, in the order they were recorded.
    #[serde(default)]
    pub claim_history: Vec<String>,
}

impl RiskEvent {
    /// Build a risk event from its parts.
    ///
    /// This does not validate; call [`Validate::validate`] on the result
    /// (the event store does so for every record it accepts).
    pub fn new(
        policy_id: impl Into<PolicyId>,
        property_value: Decimal,
        insured_location: impl Into<String>,
        event_type: impl Into<String>,
        claim_history: Vec<String>,
    ) -> Self {
        Self {
            policy_id: policy_id.into(),
            property_value,
            insured_location: insured_location.into(),
            event_type: event_type.into(),
            claim_history,
        }
    }

    /// Number of claims previously filed against this policy.
    pub fn claim_count(&self) -> usize {
        self.claim_history.len()
    }
}

/// Reject empty policy identifiers.
fn validate_policy_id(policy_id: &PolicyId) -> Result<(), ValidationError> {
    if policy_id.is_empty() {
        return Err(ValidationError::new("empty_policy_id")
            .with_message("policy_id must not be empty".into()));
    }
    Ok(())
}

/// Reject negative monetary amounts.
fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("negative_property_value")
            .with_message("property_value must not be negative".into()));
    }
    Ok(())
}
