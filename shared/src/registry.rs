use serde::{Deserialize, Serialize};

use crate::colors::Rgba;
use crate::error::MapError;
use crate::region::{Bounds, Point, Region, point_in_region};

/// Position of a region in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub usize);

/// Ordered, read-only list of regions. Order is the overlap tie-break:
/// the earliest declared region wins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionRegistry {
    regions: Vec<Region>,
}

impl RegionRegistry {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn from_json(json: &str) -> Result<Self, MapError> {
        serde_json::from_str(json).map_err(|e| MapError::Config(format!("region table: {e}")))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.regions
            .iter()
            .enumerate()
            .map(|(idx, region)| (RegionId(idx), region))
    }

    /// Id of the first region containing `point`.
    pub fn find_hit(&self, point: Point) -> Option<RegionId> {
        self.iter()
            .find(|(_, region)| point_in_region(point, region))
            .map(|(id, _)| id)
    }

    /// The default map: five areas of the sample world image.
    pub fn sample() -> Self {
        Self::new(vec![
            Region::rect("Desert", Bounds::new(30.0, 30.0, 250.0, 180.0))
                .with_destination("desert.html")
                .with_highlight(Rgba::new(255, 193, 7, 0.4))
                .with_reward("coin", 10)
                .with_reward("stone", 1),
            Region::rect("Forest", Bounds::new(300.0, 20.0, 320.0, 250.0))
                .with_destination("forest.html")
                .with_highlight(Rgba::new(76, 175, 80, 0.4))
                .with_reward("wood", 15)
                .with_reward("fish", 1),
            Region::rect("Castle", Bounds::new(50.0, 300.0, 200.0, 180.0))
                .with_destination("castle.html")
                .with_highlight(Rgba::new(121, 85, 72, 0.4)),
            Region::rect("Mountains", Bounds::new(380.0, 340.0, 250.0, 150.0))
                .with_destination("mountains.html")
                .with_highlight(Rgba::new(158, 158, 158, 0.4))
                .with_reward("stone", 20)
                .with_reward("coin", 2),
            Region::rect("Lake", Bounds::new(40.0, 220.0, 200.0, 100.0))
                .with_destination("lake.html")
                .with_highlight(Rgba::new(33, 150, 243, 0.4))
                .with_reward("fish", 5),
        ])
    }
}

/// First region (registry order) containing `point`.
pub fn find_hit_region(point: Point, registry: &RegionRegistry) -> Option<&Region> {
    registry
        .regions()
        .iter()
        .find(|region| point_in_region(point, region))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_never_hits() {
        let registry = RegionRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.find_hit(Point::new(0.0, 0.0)), None);
        assert!(find_hit_region(Point::new(0.0, 0.0), &registry).is_none());
    }

    #[test]
    fn earliest_declared_wins_on_overlap() {
        let registry = RegionRegistry::new(vec![
            Region::rect("outer", Bounds::new(0.0, 0.0, 100.0, 100.0)),
            Region::rect("inner", Bounds::new(25.0, 25.0, 50.0, 50.0)),
            Region::rect("side", Bounds::new(90.0, 0.0, 50.0, 50.0)),
        ]);
        assert_eq!(registry.find_hit(Point::new(50.0, 50.0)), Some(RegionId(0)));
        assert_eq!(registry.find_hit(Point::new(95.0, 10.0)), Some(RegionId(0)));
        assert_eq!(registry.find_hit(Point::new(120.0, 10.0)), Some(RegionId(2)));
        assert_eq!(
            find_hit_region(Point::new(50.0, 50.0), &registry).map(|r| r.name.as_str()),
            Some("outer")
        );
    }

    #[test]
    fn reordering_changes_the_winner() {
        let registry = RegionRegistry::new(vec![
            Region::rect("inner", Bounds::new(25.0, 25.0, 50.0, 50.0)),
            Region::rect("outer", Bounds::new(0.0, 0.0, 100.0, 100.0)),
        ]);
        assert_eq!(
            find_hit_region(Point::new(50.0, 50.0), &registry).map(|r| r.name.as_str()),
            Some("inner")
        );
        assert_eq!(registry.find_hit(Point::new(5.0, 5.0)), Some(RegionId(1)));
    }

    #[test]
    fn sample_map_castle_wins_strip_shared_with_lake() {
        // Lake [40,220,200,100] and Castle [50,300,200,180] share y in 300..=320.
        let registry = RegionRegistry::sample();
        let name_at = |x, y| {
            find_hit_region(Point::new(x, y), &registry).map(|r| r.name.clone())
        };
        assert_eq!(name_at(100.0, 310.0).as_deref(), Some("Castle"));
        assert_eq!(name_at(100.0, 250.0).as_deref(), Some("Lake"));
    }

    #[test]
    fn parses_json_table_in_order() {
        let registry = RegionRegistry::from_json(
            r#"[
                {"name": "a", "coords": [0, 0, 10, 10]},
                {"name": "b", "coords": [0, 0, 10, 10]}
            ]"#,
        )
        .expect("valid table");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find_hit(Point::new(5.0, 5.0)), Some(RegionId(0)));
    }

    #[test]
    fn malformed_table_is_a_config_error() {
        assert!(matches!(
            RegionRegistry::from_json("{not json"),
            Err(MapError::Config(_))
        ));
    }
}
