use super::SessionError;
use crate::Card;

/// Sorted, deduplicated copy of `indices`, bounds-checked against `len`.
pub(super) fn unique_indices(indices: &[usize], len: usize) -> Result<Vec<usize>, SessionError> {
    let mut unique = indices.to_vec();
    unique.sort_unstable();
    unique.dedup();
    if let Some(&idx) = unique.iter().find(|&&idx| idx >= len) {
        return Err(SessionError::InvalidCardIndex(idx));
    }
    Ok(unique)
}

/// Remove already-validated positions from `hand`, highest index first.
pub(super) fn take_cards(hand: &mut Vec<Card>, unique: &[usize]) -> Vec<Card> {
    let mut order = unique.to_vec();
    order.sort_unstable_by(|a, b| b.cmp(a));
    let mut picked = Vec::with_capacity(order.len());
    for idx in order {
        if idx < hand.len() {
            picked.push(hand.remove(idx));
        }
    }
    picked
}
