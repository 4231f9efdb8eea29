//! Pairwise comparisons between the two compared agents.

use deskpulse_core::{AgentMetrics, Comparison, ResponseComparison, VolumeDelta};
use std::cmp::Ordering;

/// Compare the totals of two agents.
///
/// Reports [`Comparison::NoData`] when either side has no records in range.
pub fn compare_volume(first: &AgentMetrics, second: &AgentMetrics) -> Comparison {
    if first.total == 0 || second.total == 0 {
        return Comparison::NoData;
    }

    let difference = first.total as i64 - second.total as i64;
    let larger = first.total.max(second.total);
    let percent = difference.unsigned_abs() as f64 / larger as f64 * 100.0;
    let leader = match first.total.cmp(&second.total) {
        Ordering::Greater => Some(first.agent.clone()),
        Ordering::Less => Some(second.agent.clone()),
        Ordering::Equal => None,
    };

    Comparison::Delta(VolumeDelta {
        first: first.agent.clone(),
        second: second.agent.clone(),
        first_total: first.total,
        second_total: second.total,
        difference,
        percent,
        leader,
    })
}

/// Decide which agent responds faster by average wait.
///
/// An average of zero means "no wait data", so the other agent wins by
/// default; two zero averages tie.
pub fn compare_response(first: &AgentMetrics, second: &AgentMetrics) -> ResponseComparison {
    if first.total == 0 && second.total == 0 {
        return ResponseComparison::NoData;
    }

    let (a, b) = (first.average_wait, second.average_wait);
    let gap_minutes = (a - b).abs();
    let faster_first = match (a == 0.0, b == 0.0) {
        (true, true) => return ResponseComparison::Tie,
        (true, false) => false,
        (false, true) => true,
        (false, false) => match a.partial_cmp(&b) {
            Some(Ordering::Less) => true,
            Some(Ordering::Greater) => false,
            _ => return ResponseComparison::Tie,
        },
    };

    let (faster, slower) = if faster_first {
        (first, second)
    } else {
        (second, first)
    };
    ResponseComparison::Faster {
        faster: faster.agent.clone(),
        slower: slower.agent.clone(),
        gap_minutes,
    }
}
