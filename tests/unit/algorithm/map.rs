//! Tests for building and querying the compatibility map

#[cfg(test)]
mod tests {
    use chunkweave::AssemblyError;
    use chunkweave::algorithm::map::{CompatibilityEntry, CompatibilityMap};
    use chunkweave::spatial::face::Face;
    use chunkweave::spatial::tiles::{AssetHandle, Connector, TileId, TilePrototype, TileRegistry};
    use glam::IVec2;

    fn registry(tiles: &[(&str, &[(Face, i32, i32)])]) -> TileRegistry {
        let size = IVec2::splat(10);
        let mut registry = TileRegistry::new(size, size);
        for &(name, connectors) in tiles {
            let connectors = connectors
                .iter()
                .map(|&(face, x, y)| Connector::new(face, IVec2::new(x, y), 1))
                .collect();
            registry
                .register(TilePrototype::new(AssetHandle::new(name), size, size, connectors))
                .expect("valid tile");
        }
        registry
    }

    // Tests that a single matching candidate is recorded for the connector face
    // Verified by inserting entries under the candidate instead of the anchor
    #[test]
    fn test_build_records_matching_candidate() {
        let registry = registry(&[("a", &[(Face::Right, 9, 5)]), ("b", &[(Face::Left, 0, 5)])]);
        let map = CompatibilityMap::build(&registry).expect("valid registry");

        let entries = map
            .query(TileId(0), Face::Right)
            .expect("registered")
            .expect("non-empty");
        assert_eq!(entries, &[CompatibilityEntry::new(TileId(1), 0.0)]);
        assert_eq!(map.tile_count(), 2);
    }

    // Tests entry order: candidate tiles in registry order, then checker order
    // Verified by iterating faces in the outer loop of a pair
    #[test]
    fn test_entry_order_follows_registry() {
        let registry = registry(&[("a", &[(Face::Right, 9, 5)]), ("b", &[(Face::Left, 0, 5)])]);
        let map = CompatibilityMap::build(&registry).expect("valid registry");

        let entries = map
            .query(TileId(0), Face::Up)
            .expect("registered")
            .expect("non-empty");
        let expected = [
            CompatibilityEntry::new(TileId(0), 180.0),
            CompatibilityEntry::new(TileId(0), 0.0),
            CompatibilityEntry::new(TileId(0), 90.0),
            CompatibilityEntry::new(TileId(1), 180.0),
            CompatibilityEntry::new(TileId(1), 270.0),
            CompatibilityEntry::new(TileId(1), 0.0),
        ];
        assert_eq!(entries, &expected);
    }

    // Tests the distinction between an empty face and an unknown tile
    // Verified by returning an empty slice for faces without entries
    #[test]
    fn test_query_empty_face_and_unknown_tile() {
        let registry = registry(&[
            ("a", &[(Face::Right, 9, 5)]),
            ("c", &[(Face::Right, 9, 2), (Face::Right, 9, 8)]),
        ]);
        let map = CompatibilityMap::build(&registry).expect("valid registry");

        assert!(matches!(map.query(TileId(1), Face::Right), Ok(None)));
        assert!(matches!(
            map.query(TileId(7), Face::Right),
            Err(AssemblyError::UnknownTile {
                index: 7,
                registered: 2
            })
        ));
    }

    // Tests exact containment on tile and rotation
    // Verified by comparing rotations modulo a full turn
    #[test]
    fn test_is_compatible_exact() {
        let registry = registry(&[("a", &[(Face::Right, 9, 5)]), ("b", &[(Face::Left, 0, 5)])]);
        let map = CompatibilityMap::build(&registry).expect("valid registry");

        let listed = CompatibilityEntry::new(TileId(1), 0.0);
        assert!(map.is_compatible(TileId(0), Face::Right, listed).expect("registered"));

        let wrong_rotation = CompatibilityEntry::new(TileId(1), 360.0);
        assert!(!map
            .is_compatible(TileId(0), Face::Right, wrong_rotation)
            .expect("registered"));

        let wrong_tile = CompatibilityEntry::new(TileId(0), 0.0);
        assert!(!map
            .is_compatible(TileId(0), Face::Right, wrong_tile)
            .expect("registered"));

        assert!(map.is_compatible(TileId(9), Face::Up, listed).is_err());
    }

    // Tests the entry total across tiles and faces
    // Verified by counting only the first face of each tile
    #[test]
    fn test_entry_count() {
        let registry = registry(&[("bare", &[])]);
        let map = CompatibilityMap::build(&registry).expect("valid registry");

        // A bare tile fits against itself in four rotations on each face
        assert_eq!(map.entry_count(), 16);
        map.log_summary(&registry);
    }
}
