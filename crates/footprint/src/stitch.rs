//! Ring stitching: joins open point sequences that share endpoints into
//! closed rings.
//!
//! The search is greedy. When several sequences meet at one vertex the first
//! one found in pool order is taken; this is an accepted heuristic, not a
//! planar reconstruction.

use bevy::log::debug;

use crate::coords::LatLon;

/// Endpoint matching tolerance in degrees.
pub const DEFAULT_TOLERANCE_DEG: f64 = 1e-6;

/// Minimum point count of a closed ring (three vertices plus the closing point).
const MIN_RING_POINTS: usize = 4;

/// Result of one stitching pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StitchOutcome {
    pub rings: Vec<Vec<LatLon>>,
    /// Chains that could not be closed or were too short.
    pub dropped: usize,
}

/// Stitch a pool of sequences into closed rings.
///
/// Each pass removes one sequence and keeps splicing in any remaining
/// sequence whose head or tail touches the current head or tail (reversing
/// it when needed) until nothing matches. A chain whose ends meet is closed
/// with its own head point; open chains and rings under four points are
/// dropped.
pub fn stitch_rings(segments: Vec<Vec<LatLon>>, tolerance: f64) -> StitchOutcome {
    let mut pool: Vec<Vec<LatLon>> = segments.into_iter().filter(|s| !s.is_empty()).collect();
    let mut outcome = StitchOutcome::default();

    while !pool.is_empty() {
        let mut current = pool.remove(0);
        while !is_closed(&current, tolerance) {
            let Some(splice) = find_match(&current, &pool, tolerance) else {
                break;
            };
            let candidate = pool.remove(splice.index);
            join(&mut current, candidate, splice.join);
        }

        let head = current[0];
        let closed = current.len() > 1 && head.near(&current[current.len() - 1], tolerance);
        if closed {
            let last = current.len() - 1;
            current[last] = head;
        }
        if closed && current.len() >= MIN_RING_POINTS {
            outcome.rings.push(current);
        } else {
            debug!(
                "ring stitcher: dropping {} chain of {} points",
                if closed { "short" } else { "open" },
                current.len()
            );
            outcome.dropped += 1;
        }
    }
    outcome
}

fn is_closed(points: &[LatLon], tolerance: f64) -> bool {
    points.len() >= MIN_RING_POINTS && points[0].near(&points[points.len() - 1], tolerance)
}

#[derive(Debug, Clone, Copy)]
enum Join {
    /// Candidate head touches current tail.
    TailToHead,
    /// Candidate tail touches current tail.
    TailToTail,
    /// Candidate tail touches current head.
    HeadToTail,
    /// Candidate head touches current head.
    HeadToHead,
}

struct Splice {
    index: usize,
    join: Join,
}

fn find_match(current: &[LatLon], pool: &[Vec<LatLon>], tolerance: f64) -> Option<Splice> {
    let head = current[0];
    let tail = current[current.len() - 1];
    pool.iter().enumerate().find_map(|(index, candidate)| {
        let c_head = candidate[0];
        let c_tail = candidate[candidate.len() - 1];
        let join = if tail.near(&c_head, tolerance) {
            Join::TailToHead
        } else if tail.near(&c_tail, tolerance) {
            Join::TailToTail
        } else if head.near(&c_tail, tolerance) {
            Join::HeadToTail
        } else if head.near(&c_head, tolerance) {
            Join::HeadToHead
        } else {
            return None;
        };
        Some(Splice { index, join })
    })
}

fn join(current: &mut Vec<LatLon>, mut candidate: Vec<LatLon>, how: Join) {
    match how {
        Join::TailToHead => current.extend(candidate.into_iter().skip(1)),
        Join::TailToTail => {
            candidate.reverse();
            current.extend(candidate.into_iter().skip(1));
        }
        Join::HeadToTail => {
            candidate.pop();
            candidate.append(current);
            *current = candidate;
        }
        Join::HeadToHead => {
            candidate.reverse();
            candidate.pop();
            candidate.append(current);
            *current = candidate;
        }
    }
}
