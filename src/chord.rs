use crate::orientation::RingRole;
use crate::scanline::Intersection;
use geo_types::Coord;

/// A filled span on one scan-line, `a.x <= b.x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chord {
    pub a: Intersection,
    pub b: Intersection,
}

impl Chord {
    pub fn length(&self) -> f64 {
        (self.b.x - self.a.x).hypot(self.b.y - self.a.y)
    }

    pub fn midpoint(&self) -> Coord<f64> {
        Coord {
            x: (self.a.x + self.b.x) * 0.5,
            y: (self.a.y + self.b.y) * 0.5,
        }
    }
}

/// Stable sort by ascending x. Crossings with equal x keep emission order;
/// NaN sorts after every finite x.
pub fn sort_by_x(crossings: &mut [Intersection]) {
    crossings.sort_by(|a, b| a.x.total_cmp(&b.x));
}

/// Whether the span between the `j`th and `j + 1`th sorted crossings lies
/// inside the filled area.
fn bounds_filled_span(j: usize, a: &Intersection, b: &Intersection) -> bool {
    match (a.role, b.role) {
        (RingRole::Outer, RingRole::Outer) => a.ring == b.ring && j % 2 == 0,
        (RingRole::Outer, RingRole::Hole) | (RingRole::Hole, RingRole::Outer) => true,
        (RingRole::Hole, RingRole::Hole) => false,
    }
}

/// Yields the chords bounded by adjacent crossings of a sorted scan-line.
pub fn pairs(sorted: &[Intersection]) -> impl Iterator<Item = Chord> + '_ {
    sorted
        .windows(2)
        .enumerate()
        .filter(|(j, w)| bounds_filled_span(*j, &w[0], &w[1]))
        .map(|(_, w)| Chord { a: w[0], b: w[1] })
}
