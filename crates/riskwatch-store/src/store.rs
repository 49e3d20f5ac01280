//! The canonical collection of risk events.
//!
//! Records keep their insertion order for listing; an ordered index maps
//! each [`PolicyId`] to its position for exact-match lookup.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::Path;

use riskwatch_types::{PolicyId, RiskEvent};
use tracing::info;
use validator::Validate;

use crate::error::StoreError;
use crate::seed::seed_events;

/// Read-only store of [`RiskEvent`] records keyed by policy identifier.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<RiskEvent>,
    index: BTreeMap<PolicyId, usize>,
}

impl EventStore {
    /// Build a store from a list of records, keeping their order.
    ///
    /// Every record is validated and policy identifiers must be unique.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRecord`] for the first record that
    /// fails validation, or [`StoreError::DuplicatePolicy`] for the first
    /// repeated identifier.
    pub fn from_events(events: Vec<RiskEvent>) -> Result<Self, StoreError> {
        let mut index = BTreeMap::new();

        for (position, event) in events.iter().enumerate() {
            event.validate().map_err(|e| StoreError::InvalidRecord {
                policy_id: event.policy_id.clone(),
                reason: e.to_string(),
            })?;

            match index.entry(event.policy_id.clone()) {
                Entry::Occupied(_) => {
                    return Err(StoreError::DuplicatePolicy {
                        policy_id: event.policy_id.clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }
        }

        info!(count = events.len(), "Event store seeded");

        Ok(Self { events, index })
    }

    /// Build a store holding the built-in seed policies.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in seed itself is invalid.
    pub fn seeded() -> Result<Self, StoreError> {
        Self::from_events(seed_events())
    }

    /// Build a store from a JSON array of risk events.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if the text is not a JSON array of
    /// risk events, or any error from [`EventStore::from_events`].
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let events: Vec<RiskEvent> = serde_json::from_str(json)?;
        Self::from_events(events)
    }

    /// Build a store from a JSON seed file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read, or any error
    /// from [`EventStore::from_json_str`].
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        info!(path = %path.display(), "Loading seed file");
        Self::from_json_str(&contents)
    }

    /// All records in insertion order.
    pub fn list_all(&self) -> &[RiskEvent] {
        &self.events
    }

    /// Look up a record by exact policy identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that identifier.
    /// Identifiers that differ only in case are different identifiers.
    pub fn get(&self, policy_id: &str) -> Result<&RiskEvent, StoreError> {
        self.index
            .get(policy_id)
            .and_then(|&position| self.events.get(position))
            .ok_or_else(|| StoreError::NotFound {
                policy_id: policy_id.to_owned(),
            })
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn seeded() -> EventStore {
        let result = EventStore::seeded();
        assert!(result.is_ok());
        result.unwrap_or_default()
    }

    #[test]
    fn seeded_store_lists_in_seed_order() {
        let store = seeded();
        let ids: Vec<&str> = store
            .list_all()
            .iter()
            .map(|e| e.policy_id.as_str())
            .collect();
        assert_eq!(ids, vec!["P12345", "P67890"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn get_returns_matching_record() {
        let store = seeded();
        for event in store.list_all() {
            assert_eq!(store.get(event.policy_id.as_str()).ok(), Some(event));
        }

        let florida = store.get("P12345");
        assert!(florida.is_ok());
        if let Ok(florida) = florida {
            assert_eq!(florida.insured_location, "Florida");
            assert_eq!(florida.claim_count(), 2);
        }
    }

    #[test]
    fn get_unknown_ids_is_not_found() {
        let store = seeded();
        for id in ["P99999", "", "p12345", " P12345"] {
            assert!(
                matches!(store.get(id), Err(StoreError::NotFound { .. })),
                "{id:?}"
            );
        }
    }

    #[test]
    fn repeated_reads_are_identical() {
        let store = seeded();
        assert_eq!(store.list_all(), store.list_all());
        assert_eq!(store.get("P67890").ok(), store.get("P67890").ok());
    }

    #[test]
    fn duplicate_policy_ids_are_rejected() {
        let mut events = seed_events();
        let first = events.first().cloned();
        events.extend(first);
        let result = EventStore::from_events(events);
        assert!(matches!(
            result,
            Err(StoreError::DuplicatePolicy { policy_id }) if policy_id.as_str() == "P12345"
        ));
    }

    #[test]
    fn negative_value_is_rejected() {
        let event = RiskEvent::new("P1", Decimal::new(-5, 0), "Texas", "Flood", Vec::new());
        let result = EventStore::from_events(vec![event]);
        assert!(matches!(result, Err(StoreError::InvalidRecord { .. })));
    }

    #[test]
    fn empty_store_is_valid() {
        let result = EventStore::from_events(Vec::new());
        assert!(result.is_ok());

        if let Ok(store) = result {
            assert!(store.is_empty());
            assert!(store.list_all().is_empty());
        }
    }

    #[test]
    fn loads_json_seed() {
        let json = r#"[
            {"policy_id": "T1", "property_value": 120000.5, "insured_location": "Texas", "event_type": "Flood", "claim_history": ["2019-Flood"]},
            {"policy_id": "T2", "property_value": 80000, "insured_location": "Texas", "event_type": "Hail"}
        ]"#;
        let result = EventStore::from_json_str(json);
        assert!(result.is_ok());

        if let Ok(store) = result {
            assert_eq!(store.len(), 2);
            assert_eq!(
                store.get("T1").ok().map(|e| e.property_value),
                Some(Decimal::new(1_200_005, 1))
            );
            assert_eq!(store.get("T2").ok().map(RiskEvent::claim_count), Some(0));
        }
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = EventStore::from_json_str(r#"{"policy_id": "T1"}"#);
        assert!(matches!(result, Err(StoreError::Json { .. })));
    }
}
