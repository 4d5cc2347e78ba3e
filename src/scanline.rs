use crate::orientation::{RingRole, Winding, classify, is_degenerate};
use crate::shape::PolygonShape;

/// Where a ring edge crosses a horizontal scan-line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub x: f64,
    pub y: f64,
    pub ring: usize,
    pub role: RingRole,
}

/// Collects every crossing of the line `y` with the rings of `shape`, in
/// ring then edge order.
///
/// An edge counts as crossing when one endpoint is strictly on one side and
/// the other is on the line or beyond it on the other side, so a vertex
/// that sits exactly on the line is attributed to the edge leaving it. Such
/// a vertex is emitted twice for hole rings to keep the hole's crossing
/// count even.
pub fn intersect(shape: &PolygonShape, y: f64, winding: Winding) -> Vec<Intersection> {
    let mut crossings = Vec::new();

    for (ring_index, ring) in shape.rings().iter().enumerate() {
        if is_degenerate(ring) {
            log::trace!("skipping degenerate ring {}", ring_index);
            continue;
        }
        let role = classify(ring, winding);

        for edge in ring.lines() {
            let (x3, y3) = edge.start.x_y();
            let (x4, y4) = edge.end.x_y();
            if !((y3 >= y && y4 < y) || (y3 <= y && y4 > y)) {
                continue;
            }

            let crossing = if y3 == y {
                Intersection {
                    x: x3,
                    y: y3,
                    ring: ring_index,
                    role,
                }
            } else {
                Intersection {
                    x: x3 + (x4 - x3) * (y - y3) / (y4 - y3),
                    y,
                    ring: ring_index,
                    role,
                }
            };
            if y3 == y && role == RingRole::Hole {
                crossings.push(crossing);
            }
            crossings.push(crossing);
        }
    }

    crossings
}
