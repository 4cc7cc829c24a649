//! Run-time quota ledger.
//!
//! Both matcher passes share one mutable `invigilator_id → assigned`
//! map, seeded from the snapshot's persisted counters. Keeping the
//! counters here, rather than mutating fields on the snapshot objects,
//! keeps a dry run side-effect free and re-runnable against the same
//! snapshot.
//!
//! Invariant: `assigned <= quota` for every invigilator after every
//! successful reservation. A reservation that would break it is rejected,
//! not clamped.

use std::collections::HashMap;

use crate::error::EngineError;
use crate::models::Invigilator;

/// Mutable per-run quota counters for the invigilator pool.
#[derive(Debug, Clone)]
pub struct QuotaLedger {
    caps: HashMap<String, u32>,
    assigned: HashMap<String, u32>,
}

impl QuotaLedger {
    /// Seeds the ledger from the snapshot pool's persisted counters.
    pub fn from_pool(pool: &[Invigilator]) -> Self {
        let mut caps = HashMap::with_capacity(pool.len());
        let mut assigned = HashMap::with_capacity(pool.len());
        for inv in pool {
            caps.insert(inv.id.clone(), inv.quota);
            assigned.insert(inv.id.clone(), inv.assigned_quota);
        }
        Self { caps, assigned }
    }

    /// Current assigned count for an invigilator (0 for unknown ids).
    pub fn assigned(&self, invigilator_id: &str) -> u32 {
        self.assigned.get(invigilator_id).copied().unwrap_or(0)
    }

    /// Remaining capacity, saturating at zero.
    pub fn remaining(&self, invigilator_id: &str) -> u32 {
        let cap = self.caps.get(invigilator_id).copied().unwrap_or(0);
        cap.saturating_sub(self.assigned(invigilator_id))
    }

    /// Whether one more assignment fits under the cap.
    pub fn has_capacity(&self, invigilator_id: &str) -> bool {
        match self.caps.get(invigilator_id) {
            Some(&cap) => self.assigned(invigilator_id) < cap,
            None => false,
        }
    }

    /// Reserves one assignment slot, returning the assigned count
    /// *before* the reservation (the display value the preview shows).
    ///
    /// Fails for unknown ids and for reservations that would exceed the
    /// cap; the counter is left untouched on failure.
    pub fn reserve(&mut self, invigilator_id: &str) -> Result<u32, EngineError> {
        let cap = *self
            .caps
            .get(invigilator_id)
            .ok_or_else(|| EngineError::UnknownInvigilator(invigilator_id.to_string()))?;
        let count = self
            .assigned
            .get_mut(invigilator_id)
            .ok_or_else(|| EngineError::UnknownInvigilator(invigilator_id.to_string()))?;
        if *count >= cap {
            return Err(EngineError::QuotaExhausted(invigilator_id.to_string()));
        }
        let before = *count;
        *count += 1;
        Ok(before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<Invigilator> {
        vec![
            Invigilator::faculty("I1", "Dr. Arun", "P1").with_quota(2),
            Invigilator::staff("I2", "Ms. Siriporn").with_quota(1).with_assigned(1),
        ]
    }

    #[test]
    fn test_seeding_from_pool() {
        let ledger = QuotaLedger::from_pool(&pool());
        assert_eq!(ledger.assigned("I1"), 0);
        assert_eq!(ledger.remaining("I1"), 2);
        assert_eq!(ledger.assigned("I2"), 1);
        assert_eq!(ledger.remaining("I2"), 0);
    }

    #[test]
    fn test_reserve_returns_prior_count() {
        let mut ledger = QuotaLedger::from_pool(&pool());
        assert_eq!(ledger.reserve("I1").unwrap(), 0);
        assert_eq!(ledger.reserve("I1").unwrap(), 1);
        assert_eq!(ledger.assigned("I1"), 2);
    }

    #[test]
    fn test_reserve_rejects_at_cap() {
        let mut ledger = QuotaLedger::from_pool(&pool());
        ledger.reserve("I1").unwrap();
        ledger.reserve("I1").unwrap();
        assert!(!ledger.has_capacity("I1"));
        assert!(matches!(
            ledger.reserve("I1"),
            Err(EngineError::QuotaExhausted(_))
        ));
        // Counter untouched by the failed reservation
        assert_eq!(ledger.assigned("I1"), 2);
    }

    #[test]
    fn test_already_full_from_snapshot() {
        let mut ledger = QuotaLedger::from_pool(&pool());
        assert!(!ledger.has_capacity("I2"));
        assert!(ledger.reserve("I2").is_err());
    }

    #[test]
    fn test_unknown_invigilator() {
        let mut ledger = QuotaLedger::from_pool(&pool());
        assert!(!ledger.has_capacity("I99"));
        assert!(matches!(
            ledger.reserve("I99"),
            Err(EngineError::UnknownInvigilator(_))
        ));
    }
}
