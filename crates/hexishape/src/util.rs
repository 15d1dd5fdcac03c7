use std::hash::Hash;

use geo_types::{Coord, LineString};
use indexmap::IndexSet;

/// union of multiple sequences of values.
///
/// Every distinct value is contained exactly once, ordered by its first
/// occurrence within the concatenation of the input sequences.
pub fn flatten<I, S, T>(sequences: I) -> Vec<T>
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = T>,
    T: Eq + Hash,
{
    sequences
        .into_iter()
        .flatten()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// mean of all vertices of the exterior ring (the first one) of a polygon.
///
/// This is not the geometric centroid: it is not weighted by area and a
/// closing vertex duplicating the first one is counted like any other vertex.
/// It is only meant as a seed point for polygons too small to contain any
/// cell center.
pub fn centroid(rings: &[LineString<f64>]) -> Option<Coord<f64>> {
    let exterior = rings.first()?;
    if exterior.0.is_empty() {
        return None;
    }
    let (sum_x, sum_y) = exterior
        .coords()
        .fold((0.0, 0.0), |(x, y), coord| (x + coord.x, y + coord.y));
    let n = exterior.0.len() as f64;
    Some(Coord {
        x: sum_x / n,
        y: sum_y / n,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo_types::{Coord, LineString};

    use super::{centroid, flatten};

    #[test]
    fn flatten_keeps_first_occurrence_order() {
        let flat = flatten(vec![vec!["c", "a", "b"], vec!["b", "d", "a"], vec![], vec!["e"]]);
        assert_eq!(flat, vec!["c", "a", "b", "d", "e"]);
    }

    #[test]
    fn flatten_dedups_within_a_sequence() {
        let flat = flatten([vec![3u64, 3, 1, 3]]);
        assert_eq!(flat, vec![3, 1]);
    }

    #[test]
    fn flatten_empty() {
        let flat: Vec<u64> = flatten(Vec::<Vec<u64>>::new());
        assert!(flat.is_empty());
    }

    #[test]
    fn centroid_counts_closing_vertex() {
        let exterior = LineString::from(vec![
            Coord::from((0.0, 0.0)),
            Coord::from((4.0, 0.0)),
            Coord::from((4.0, 4.0)),
            Coord::from((0.0, 4.0)),
            Coord::from((0.0, 0.0)),
        ]);
        let c = centroid(&[exterior]).unwrap();
        assert_relative_eq!(c.x, 8.0 / 5.0);
        assert_relative_eq!(c.y, 8.0 / 5.0);
    }

    #[test]
    fn centroid_ignores_holes() {
        let exterior = LineString::from(vec![
            Coord::from((0.0, 0.0)),
            Coord::from((2.0, 0.0)),
            Coord::from((2.0, 2.0)),
            Coord::from((0.0, 2.0)),
        ]);
        let hole = LineString::from(vec![
            Coord::from((1.5, 1.5)),
            Coord::from((1.8, 1.5)),
            Coord::from((1.8, 1.8)),
        ]);
        let c = centroid(&[exterior, hole]).unwrap();
        assert_relative_eq!(c.x, 1.0);
        assert_relative_eq!(c.y, 1.0);
    }

    #[test]
    fn centroid_without_exterior() {
        assert!(centroid(&[]).is_none());
        assert!(centroid(&[LineString::new(vec![])]).is_none());
    }
}
