//! Batch distance annotation with optional parallelism.
//!
//! Search results arrive as a list of records that may or may not carry a
//! location. These helpers attach a [`Distance`] to each record, order them
//! nearest first and optionally cut them down to a radius.

use crate::{Coordinate, Distance, Location};

/// Anything that may have a position.
pub trait Located {
    /// Where the item is, if anywhere.
    fn location(&self) -> Location;
}

impl Located for Location {
    fn location(&self) -> Location {
        *self
    }
}

impl Located for Coordinate {
    fn location(&self) -> Location {
        Location::At(*self)
    }
}

/// Pairs every item with its distance from `origin`.
///
/// Items without a location get [`Distance::Unknown`] and are kept. Input
/// order is preserved.
///
/// # Example
/// ```
/// use profinder_geo::{annotate, Coordinate, Distance, Location};
///
/// let origin = Coordinate::new(52.52, 13.405);
/// let items = vec![Location::At(origin), Location::NoLocation];
///
/// let annotated = annotate(&origin, items);
/// assert_eq!(annotated[0].1, Distance::Known(0.0));
/// assert_eq!(annotated[1].1, Distance::Unknown);
/// ```
pub fn annotate<T: Located + Send>(origin: &Coordinate, items: Vec<T>) -> Vec<(T, Distance)> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items
            .into_par_iter()
            .map(|item| annotate_single(origin, item))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items
            .into_iter()
            .map(|item| annotate_single(origin, item))
            .collect()
    }
}

/// Sorts nearest first, unknown distances last.
///
/// The sort is stable: ties and unknown distances keep their relative order.
pub fn sort_by_distance<T, F>(items: &mut [T], distance: F)
where
    F: Fn(&T) -> Distance,
{
    items.sort_by(|a, b| distance(a).sort_key().total_cmp(&distance(b).sort_key()));
}

/// Drops items whose known distance exceeds `radius_km`.
///
/// Unknown distances are kept only when `keep_unknown` is set.
pub fn retain_within_radius<T, F>(items: &mut Vec<T>, radius_km: f64, keep_unknown: bool, distance: F)
where
    F: Fn(&T) -> Distance,
{
    items.retain(|item| match distance(item) {
        Distance::Known(km) => km <= radius_km,
        Distance::Unknown => keep_unknown,
    });
}

#[inline]
fn annotate_single<T: Located>(origin: &Coordinate, item: T) -> (T, Distance) {
    let distance = Distance::from(item.location().distance_to(origin));
    (item, distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRANKFURT: Coordinate = Coordinate::new(50.1109, 8.6821);

    fn create_test_items() -> Vec<(u32, Location)> {
        vec![
            // Berlin
            (1, Location::At(Coordinate::new(52.5200, 13.4050))),
            // No location
            (2, Location::NoLocation),
            // Paris
            (3, Location::At(Coordinate::new(48.8566, 2.3522))),
            // Mainz
            (4, Location::At(Coordinate::new(49.9929, 8.2473))),
        ]
    }

    impl Located for (u32, Location) {
        fn location(&self) -> Location {
            self.1
        }
    }

    #[test]
    fn test_annotate_preserves_order_and_unknowns() {
        let results = annotate(&FRANKFURT, create_test_items());

        let ids: Vec<u32> = results.iter().map(|(item, _)| item.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(results[1].1, Distance::Unknown);

        let berlin = results[0].1.km().unwrap();
        assert!(berlin > 400.0 && berlin < 450.0, "Berlin: {}", berlin);
    }

    #[test]
    fn test_sort_puts_unknown_last() {
        let mut results = annotate(&FRANKFURT, create_test_items());
        sort_by_distance(&mut results, |(_, d)| *d);

        let ids: Vec<u32> = results.iter().map(|(item, _)| item.0).collect();
        assert_eq!(ids, vec![4, 1, 3, 2]);
    }

    #[test]
    fn test_sort_is_stable_for_unknowns() {
        let mut items = vec![(10, Distance::Unknown), (11, Distance::Known(1.0)), (12, Distance::Unknown)];
        sort_by_distance(&mut items, |(_, d)| *d);

        let ids: Vec<u32> = items.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![11, 10, 12]);
    }

    #[test]
    fn test_radius_filter() {
        let mut results = annotate(&FRANKFURT, create_test_items());
        retain_within_radius(&mut results, 450.0, true, |(_, d)| *d);

        let ids: Vec<u32> = results.iter().map(|(item, _)| item.0).collect();
        // Paris (~480 km) drops out; the record without a location stays
        assert_eq!(ids, vec![1, 2, 4]);

        retain_within_radius(&mut results, 450.0, false, |(_, d)| *d);
        assert!(results.iter().all(|(_, d)| d.is_known()));
    }
}
