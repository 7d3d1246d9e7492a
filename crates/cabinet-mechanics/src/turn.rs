//! Bookkeeping at the start of each turn.

use cabinet_core::{Cabinet, MinisterId};

/// What the turn hook changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnStart {
    /// Ministers displaced or dismissed last turn, now settled in the pool.
    pub returned_to_pool: Vec<MinisterId>,
}

/// Clear last turn's fabricated evidence and settle removals.
pub fn begin_turn(cabinet: &mut Cabinet) -> TurnStart {
    for minister in cabinet.iter_mut() {
        minister.ledger.fabricated_evidence = 0;
    }
    let returned_to_pool = cabinet.take_just_removed();
    tracing::debug!(returned = returned_to_pool.len(), "turn started");
    TurnStart { returned_to_pool }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinet_core::{Background, HiddenTraits, Minister, Ministry};

    #[test]
    fn resets_and_settles() {
        let mut cabinet = Cabinet::new();
        let a = cabinet.enlist(Minister::new("A", Background::Officer, HiddenTraits::new(2, &[], 2))).unwrap();
        let b = cabinet.enlist(Minister::new("B", Background::Officer, HiddenTraits::new(2, &[], 2))).unwrap();
        cabinet.appoint(a, Some(Ministry::Military)).unwrap();
        cabinet.appoint(b, Some(Ministry::Military)).unwrap();
        cabinet.minister_mut(b).unwrap().ledger.fabricate_evidence();

        let start = begin_turn(&mut cabinet);
        assert_eq!(start.returned_to_pool, vec![a]);
        assert_eq!(cabinet.minister(b).unwrap().ledger.fabricated_evidence, 0);
        assert!(!cabinet.minister(a).unwrap().just_removed());

        let again = begin_turn(&mut cabinet);
        assert!(again.returned_to_pool.is_empty());
    }
}
