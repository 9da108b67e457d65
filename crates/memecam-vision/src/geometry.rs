//! Pure geometry over normalized landmark points.
//!
//! Distances use x and y only; depth is ignored.

use memecam_models::{HandLandmarks, LandmarkPoint};

/// Wrist index in the 21-point hand model.
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// All five fingertips, thumb first.
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Euclidean distance between two points.
#[inline]
pub fn distance(p1: LandmarkPoint, p2: LandmarkPoint) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    dx.hypot(dy)
}

/// Mean distance from the wrist to each of the five fingertips.
pub fn average_tip_distance_to_wrist(hand: &HandLandmarks) -> f64 {
    let wrist = hand.point(WRIST);
    let total: f64 = FINGERTIPS
        .iter()
        .map(|&tip| distance(wrist, hand.point(tip)))
        .sum();
    total / FINGERTIPS.len() as f64
}

/// Smallest and largest `y` in the set.
pub fn vertical_range(points: &[LandmarkPoint]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }

    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    Some((min_y, max_y))
}

/// Point with the largest `y` (lowest on screen). First one wins on ties.
pub fn lowest_point(points: &[LandmarkPoint]) -> Option<LandmarkPoint> {
    let mut lowest: Option<LandmarkPoint> = None;
    for &p in points {
        match lowest {
            Some(current) if p.y <= current.y => {}
            _ => lowest = Some(p),
        }
    }
    lowest
}
