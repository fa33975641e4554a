//! Weighted random destination selection.
//!
//! Given a node's ordered target list, pick one destination id. Chances are
//! relative weights, not probabilities — they need not sum to 1.

use rand::Rng;

use crate::config::TargetRef;

/// Pick one target id from a weighted list, or `None` if nothing is
/// selectable.
///
/// Entries with chance ≤ 0 are dropped for this call only; the caller's list
/// is untouched. The draw is uniform in `[0, total)` and walks the surviving
/// entries in their original order, subtracting each chance until one covers
/// the remaining draw. If floating-point rounding lets the walk run off the
/// end, the last surviving entry wins — a list with any positive chance never
/// yields `None`.
pub fn choose_target(targets: &[TargetRef], rng: &mut impl Rng) -> Option<u32> {
    let remaining: Vec<&TargetRef> = targets.iter().filter(|t| t.chance > 0.0).collect();
    if remaining.is_empty() {
        return None;
    }

    let total: f32 = remaining.iter().map(|t| t.chance).sum();
    let mut point = rng.gen::<f32>() * total;

    for target in &remaining {
        if point < target.chance {
            return Some(target.id);
        }
        point -= target.chance;
    }

    // Rounding pushed the draw past every bucket.
    Some(remaining[remaining.len() - 1].id)
}
