use crate::chord::{Chord, pairs, sort_by_x};
use crate::error::{Error, Result};
use crate::orientation::Winding;
use crate::scanline::intersect;
use crate::shape::PolygonShape;
use geo_types::Coord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelOptions {
    quality: u32,
    winding: Winding,
}

impl LabelOptions {
    /// `quality` is the number of horizontal lines sampled per polygon.
    pub fn new(quality: u32, winding: Winding) -> Result<Self> {
        if quality == 0 {
            return Err(Error::InvalidQuality(quality));
        }
        Ok(LabelOptions { quality, winding })
    }

    pub fn quality(&self) -> u32 {
        self.quality
    }

    pub fn winding(&self) -> Winding {
        self.winding
    }
}

/// The y-coordinates of the sampled scan-lines, bottom to top.
///
/// The box's height is split into `quality + 1` bands; the top and bottom
/// edges are never sampled.
pub fn scan_lines(shape: &PolygonShape, quality: u32) -> impl Iterator<Item = f64> {
    let bbox = shape.bbox();
    let ymin = bbox.min().y;
    let band = bbox.height() / (quality as f64 + 1.0);
    (1..=quality).map(move |i| ymin + band * i as f64)
}

/// Finds the longest filled chord over all sampled scan-lines.
///
/// Ties go to the chord found last.
pub fn widest_chord(shape: &PolygonShape, options: &LabelOptions) -> Result<Chord> {
    let best = scan_lines(shape, options.quality).fold(None, |best: Option<Chord>, y| {
        let mut crossings = intersect(shape, y, options.winding);
        sort_by_x(&mut crossings);
        pairs(&crossings).fold(best, |best, chord| match best {
            Some(current) if chord.length() < current.length() => Some(current),
            _ => Some(chord),
        })
    });

    let chord = best.ok_or(Error::NoInteriorFound {
        quality: options.quality,
    })?;
    log::trace!(
        "widest chord {:?} -> {:?} (length {})",
        chord.a,
        chord.b,
        chord.length()
    );
    Ok(chord)
}

/// Returns a point strictly inside the filled area of `shape`: the midpoint
/// of its widest sampled chord.
pub fn point_on_surface(shape: &PolygonShape, options: &LabelOptions) -> Result<Coord<f64>> {
    widest_chord(shape, options).map(|chord| chord.midpoint())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::algorithm::Contains;
    use geo_types::{LineString, Point, Polygon, line_string};
    use proptest::prelude::*;

    fn ccw(quality: u32) -> LabelOptions {
        LabelOptions::new(quality, Winding::CounterClockwiseOuter).unwrap()
    }

    fn square() -> LineString<f64> {
        line_string![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 4.0)]
    }

    fn centered_hole() -> LineString<f64> {
        line_string![(x: 1.0, y: 1.0), (x: 1.0, y: 3.0), (x: 3.0, y: 3.0), (x: 3.0, y: 1.0)]
    }

    #[test]
    fn test_invalid_quality() {
        assert_eq!(
            LabelOptions::new(0, Winding::ClockwiseOuter),
            Err(Error::InvalidQuality(0))
        );
        assert!(LabelOptions::new(1, Winding::ClockwiseOuter).is_ok());
    }

    #[test]
    fn test_scan_lines_skip_box_edges() {
        let shape = PolygonShape::from_rings(vec![square()]);
        assert_eq!(scan_lines(&shape, 1).collect::<Vec<_>>(), vec![2.0]);
        assert_eq!(scan_lines(&shape, 3).collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_square() -> Result<()> {
        let shape = PolygonShape::from_rings(vec![square()]);
        assert_eq!(point_on_surface(&shape, &ccw(1))?, Coord { x: 2.0, y: 2.0 });
        Ok(())
    }

    #[test]
    fn test_square_in_shapefile_order() -> Result<()> {
        let cw_square = LineString::new(square().0.into_iter().rev().collect());
        let shape = PolygonShape::from_rings(vec![cw_square]);
        let options = LabelOptions::new(1, Winding::default())?;
        assert_eq!(point_on_surface(&shape, &options)?, Coord { x: 2.0, y: 2.0 });
        Ok(())
    }

    #[test]
    fn test_square_with_hole() -> Result<()> {
        let shape = PolygonShape::from_rings(vec![square(), centered_hole()]);
        let chord = widest_chord(&shape, &ccw(1))?;
        assert_eq!(chord.length(), 1.0);
        // the later of the two tied chords wins
        assert_eq!(chord.midpoint(), Coord { x: 3.5, y: 2.0 });

        let hole = Polygon::new(centered_hole(), vec![]);
        assert!(!hole.contains(&Point::from(chord.midpoint())));
        Ok(())
    }

    #[test]
    fn test_wrong_winding_finds_nothing() {
        // a lone ring read with the wrong convention is all hole
        let shape = PolygonShape::from_rings(vec![square()]);
        let options = LabelOptions::new(4, Winding::ClockwiseOuter).unwrap();
        assert_eq!(
            point_on_surface(&shape, &options),
            Err(Error::NoInteriorFound { quality: 4 })
        );
    }

    #[test]
    fn test_degenerate_ring_finds_nothing() {
        let shape = PolygonShape::from_rings(vec![line_string![(x: 0.0, y: 0.0), (x: 4.0, y: 4.0)]]);
        assert_eq!(
            point_on_surface(&shape, &ccw(3)),
            Err(Error::NoInteriorFound { quality: 3 })
        );
    }

    #[test]
    fn test_empty_shape_finds_nothing() {
        let shape = PolygonShape::from_rings(Vec::new());
        assert_eq!(
            point_on_surface(&shape, &ccw(2)),
            Err(Error::NoInteriorFound { quality: 2 })
        );
    }

    #[test]
    fn test_widest_line_wins() {
        // an L shape: the wide foot is at the bottom
        let shape = PolygonShape::from_rings(vec![line_string![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 2.0),
            (x: 2.0, y: 2.0),
            (x: 2.0, y: 10.0),
            (x: 0.0, y: 10.0),
        ]]);
        let point = point_on_surface(&shape, &ccw(9)).unwrap();
        assert_eq!(point, Coord { x: 5.0, y: 1.0 });
    }

    #[test]
    fn test_concave_shape_avoids_notch() {
        // a U shape whose centroid sits in the notch
        let u = Polygon::new(
            line_string![
                (x: 0.0, y: 0.0),
                (x: 6.0, y: 0.0),
                (x: 6.0, y: 6.0),
                (x: 4.0, y: 6.0),
                (x: 4.0, y: 1.0),
                (x: 2.0, y: 1.0),
                (x: 2.0, y: 6.0),
                (x: 0.0, y: 6.0),
            ],
            vec![],
        );
        let shape = PolygonShape::from(u.clone());
        for quality in 1..20 {
            let point = point_on_surface(&shape, &ccw(quality)).unwrap();
            assert!(u.contains(&Point::from(point)), "{quality}: {point:?}");
        }
    }

    #[test]
    fn test_multi_part_shape() {
        // two disjoint squares side by side, both outer
        let shape = PolygonShape::from_rings(vec![
            square(),
            line_string![(x: 10.0, y: 0.0), (x: 13.0, y: 0.0), (x: 13.0, y: 4.0), (x: 10.0, y: 4.0)],
        ]);
        let point = point_on_surface(&shape, &ccw(1)).unwrap();
        assert_eq!(point, Coord { x: 2.0, y: 2.0 });
    }

    #[test]
    fn test_repeatable() -> Result<()> {
        let shape = PolygonShape::from_rings(vec![square(), centered_hole()]);
        let options = ccw(7);
        assert_eq!(
            point_on_surface(&shape, &options)?,
            point_on_surface(&shape, &options)?
        );
        Ok(())
    }

    /// A convex polygon with counter-clockwise vertices on a circle.
    fn convex_polygon() -> impl Strategy<Value = Polygon<f64>> {
        (
            3usize..16,
            prop::collection::vec(-0.3f64..0.3, 16),
            1.0f64..100.0,
            -1000.0f64..1000.0,
            -1000.0f64..1000.0,
        )
            .prop_map(|(n, jitter, radius, cx, cy)| {
                let step = std::f64::consts::TAU / n as f64;
                let coords: Vec<Coord<f64>> = (0..n)
                    .map(|i| {
                        let angle = step * (i as f64 + jitter[i]);
                        Coord {
                            x: cx + radius * angle.cos(),
                            y: cy + radius * angle.sin(),
                        }
                    })
                    .collect();
                Polygon::new(LineString::new(coords), vec![])
            })
    }

    proptest! {
        #[test]
        fn convex_label_is_inside(polygon in convex_polygon(), quality in 1u32..40) {
            let shape = PolygonShape::from(polygon.clone());
            let point = point_on_surface(&shape, &ccw(quality)).unwrap();
            prop_assert!(polygon.contains(&Point::from(point)));
        }

        #[test]
        fn label_avoids_hole(
            x0 in 0.5f64..4.0,
            y0 in 0.5f64..4.0,
            w in 0.5f64..5.0,
            h in 0.5f64..5.0,
            quality in 1u32..30,
        ) {
            let outer = line_string![
                (x: 0.0, y: 0.0),
                (x: 10.0, y: 0.0),
                (x: 10.0, y: 10.0),
                (x: 0.0, y: 10.0),
            ];
            // clockwise
            let hole = line_string![
                (x: x0, y: y0),
                (x: x0, y: y0 + h),
                (x: x0 + w, y: y0 + h),
                (x: x0 + w, y: y0),
            ];
            let shape = PolygonShape::from_rings(vec![outer.clone(), hole.clone()]);
            let point = Point::from(point_on_surface(&shape, &ccw(quality)).unwrap());
            prop_assert!(Polygon::new(outer, vec![]).contains(&point));
            prop_assert!(!Polygon::new(hole, vec![]).contains(&point));
        }
    }
}
