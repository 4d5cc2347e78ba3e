use geo_types::{Coord, LineString, MultiPolygon, Polygon, Rect};

/// A polygon record as the labeler sees it: a bounding box plus an ordered
/// list of closed rings. Which ring is a hole is decided later from the
/// ring's winding, not from its position in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    bbox: Rect<f64>,
    rings: Vec<LineString<f64>>,
}

impl PolygonShape {
    /// Builds a shape from a caller-supplied bounding box.
    ///
    /// Open rings are closed. A box that does not cover every vertex is
    /// expanded until it does.
    pub fn new(bbox: Rect<f64>, rings: impl IntoIterator<Item = LineString<f64>>) -> Self {
        let rings: Vec<LineString<f64>> = rings
            .into_iter()
            .map(|mut ring| {
                ring.close();
                ring
            })
            .collect();

        let bbox = match vertex_bounds(&rings) {
            Some(bounds) if !covers(&bbox, &bounds) => {
                log::debug!("expanding stale bounding box {:?} to {:?}", bbox, bounds);
                Rect::new(
                    Coord {
                        x: bbox.min().x.min(bounds.min().x),
                        y: bbox.min().y.min(bounds.min().y),
                    },
                    Coord {
                        x: bbox.max().x.max(bounds.max().x),
                        y: bbox.max().y.max(bounds.max().y),
                    },
                )
            }
            _ => bbox,
        };

        PolygonShape { bbox, rings }
    }

    /// Builds a shape whose bounding box is computed from the rings.
    pub fn from_rings(rings: impl IntoIterator<Item = LineString<f64>>) -> Self {
        let rings: Vec<LineString<f64>> = rings.into_iter().collect();
        let bbox = vertex_bounds(&rings).unwrap_or_else(|| Rect::new(Coord::zero(), Coord::zero()));
        Self::new(bbox, rings)
    }

    pub fn bbox(&self) -> Rect<f64> {
        self.bbox
    }

    pub fn rings(&self) -> &[LineString<f64>] {
        &self.rings
    }
}

impl From<Polygon<f64>> for PolygonShape {
    fn from(polygon: Polygon<f64>) -> Self {
        let (exterior, interiors) = polygon.into_inner();
        PolygonShape::from_rings(std::iter::once(exterior).chain(interiors))
    }
}

impl From<MultiPolygon<f64>> for PolygonShape {
    fn from(multi: MultiPolygon<f64>) -> Self {
        PolygonShape::from_rings(multi.into_iter().flat_map(|polygon| {
            let (exterior, interiors) = polygon.into_inner();
            std::iter::once(exterior).chain(interiors)
        }))
    }
}

fn vertex_bounds(rings: &[LineString<f64>]) -> Option<Rect<f64>> {
    let mut coords = rings.iter().flat_map(|ring| ring.coords());
    let first = *coords.next()?;
    let (min, max) = coords.fold((first, first), |(min, max), c| {
        (
            Coord {
                x: min.x.min(c.x),
                y: min.y.min(c.y),
            },
            Coord {
                x: max.x.max(c.x),
                y: max.y.max(c.y),
            },
        )
    });
    Some(Rect::new(min, max))
}

fn covers(outer: &Rect<f64>, inner: &Rect<f64>) -> bool {
    outer.min().x <= inner.min().x
        && outer.min().y <= inner.min().y
        && outer.max().x >= inner.max().x
        && outer.max().y >= inner.max().y
}
