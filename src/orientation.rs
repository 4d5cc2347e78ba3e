use geo_types::{Coord, LineString};

/// What part of the filled area a ring bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingRole {
    Outer,
    Hole,
}

/// The ring order convention the input follows.
///
/// Shapefiles wind outer rings clockwise and holes counter-clockwise
/// (y pointing up); OGC and GeoJSON use the opposite order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winding {
    #[default]
    ClockwiseOuter,
    CounterClockwiseOuter,
}

/// Twice the signed area of a closed ring: positive when the ring runs
/// counter-clockwise in a y-up frame.
pub fn shoelace_sum(ring: &LineString<f64>) -> f64 {
    ring.0
        .windows(2)
        .map(|w| w[0].x * w[1].y - w[0].y * w[1].x)
        .sum()
}

/// True when the ring has fewer than 3 distinct vertices.
pub fn is_degenerate(ring: &LineString<f64>) -> bool {
    let mut coords = ring.coords();
    let Some(first) = coords.next() else {
        return true;
    };
    let mut second: Option<&Coord<f64>> = None;
    for c in coords {
        match second {
            None if c != first => second = Some(c),
            Some(s) if c != first && c != s => return false,
            _ => {}
        }
    }
    true
}

/// Classifies a closed ring by the sign of its shoelace sum.
///
/// A zero sum, or a degenerate ring, is always `Outer`.
pub fn classify(ring: &LineString<f64>, winding: Winding) -> RingRole {
    if is_degenerate(ring) {
        return RingRole::Outer;
    }
    let sum = shoelace_sum(ring);
    let is_hole = match winding {
        Winding::ClockwiseOuter => sum > 0.0,
        Winding::CounterClockwiseOuter => sum < 0.0,
    };
    if is_hole {
        RingRole::Hole
    } else {
        RingRole::Outer
    }
}
