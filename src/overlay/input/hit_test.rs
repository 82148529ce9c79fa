//! Hit-testing for overlay regions.
//!
//! Determines which registered region (if any) contains a tap point.

use crate::overlay::types::{Point, Region};

/// Resolve the region at `point`.
///
/// Regions are checked in registration order and the first one whose
/// inclusive bounds contain the point wins, so overlapping regions are
/// resolved by order alone.
///
/// # Arguments
/// * `point` - Tap location in screen coordinates
/// * `regions` - Regions in screen coordinates, in registration order
///
/// # Returns
/// The first matching region, or None
pub fn resolve(point: Point, regions: &[Region]) -> Option<&Region> {
    regions.iter().find(|region| region.bounds.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::types::{Bounds, RegionKind};
    use crate::routing::ActionKind;

    fn regions() -> Vec<Region> {
        vec![
            Region::control(ActionKind::StartRecording, Bounds::new(0.0, 0.0, 40.0, 40.0)),
            Region::control(ActionKind::StopRecording, Bounds::new(50.0, 0.0, 90.0, 40.0)),
            Region::new(RegionKind::Background, Bounds::new(0.0, 0.0, 100.0, 50.0)),
        ]
    }

    #[test]
    fn test_resolves_button() {
        let regions = regions();
        let hit = resolve(Point::new(60.0, 20.0), &regions).unwrap();
        assert_eq!(hit.kind, RegionKind::Control(ActionKind::StopRecording));
    }

    #[test]
    fn test_edges_are_inclusive() {
        let regions = regions();
        let hit = resolve(Point::new(40.0, 40.0), &regions).unwrap();
        assert_eq!(hit.kind, RegionKind::Control(ActionKind::StartRecording));

        let hit = resolve(Point::new(50.0, 0.0), &regions).unwrap();
        assert_eq!(hit.kind, RegionKind::Control(ActionKind::StopRecording));
    }

    #[test]
    fn test_gap_falls_through_to_background() {
        let regions = regions();
        let hit = resolve(Point::new(45.0, 20.0), &regions).unwrap();
        assert_eq!(hit.kind, RegionKind::Background);
    }

    #[test]
    fn test_outside() {
        let regions = regions();
        assert!(resolve(Point::new(100.5, 20.0), &regions).is_none());
        assert!(resolve(Point::new(-1.0, -1.0), &regions).is_none());
        assert!(resolve(Point::new(10.0, 10.0), &[]).is_none());
    }

    #[test]
    fn test_first_registered_wins_on_overlap() {
        let a = Region::control(ActionKind::Screenshot, Bounds::new(0.0, 0.0, 50.0, 50.0));
        let b = Region::control(ActionKind::StartRecording, Bounds::new(25.0, 25.0, 75.0, 75.0));

        let ab = [a, b];
        let hit = resolve(Point::new(30.0, 30.0), &ab).unwrap();
        assert_eq!(hit.kind, RegionKind::Control(ActionKind::Screenshot));

        let ba = [b, a];
        let hit = resolve(Point::new(30.0, 30.0), &ba).unwrap();
        assert_eq!(hit.kind, RegionKind::Control(ActionKind::StartRecording));
    }
}
