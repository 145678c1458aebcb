//! Neighbour-fraction rules shared by the contagion, sentiment, and
//! near-miss logic.
//!
//! A household with no neighbours has no fraction at all: every rule built
//! on [`fraction_exceeds`] evaluates to "not triggered" for it.

use fdm_core::AgentId;

/// Share of `neighbours` satisfying `pred`, or `None` with no neighbours.
pub fn neighbour_fraction<F>(neighbours: &[AgentId], mut pred: F) -> Option<f64>
where
    F: FnMut(AgentId) -> bool,
{
    if neighbours.is_empty() {
        return None;
    }
    let hits = neighbours.iter().filter(|&&n| pred(n)).count();
    Some(hits as f64 / neighbours.len() as f64)
}

/// `true` iff strictly more than `threshold` of the neighbours satisfy
/// `pred`.
pub fn fraction_exceeds<F>(neighbours: &[AgentId], threshold: f64, pred: F) -> bool
where
    F: FnMut(AgentId) -> bool,
{
    neighbour_fraction(neighbours, pred).is_some_and(|f| f > threshold)
}

/// `true` iff any neighbour satisfies `pred`.
pub fn any_neighbour<F>(neighbours: &[AgentId], mut pred: F) -> bool
where
    F: FnMut(AgentId) -> bool,
{
    neighbours.iter().any(|&n| pred(n))
}
