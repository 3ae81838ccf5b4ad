//! Tests for layout rendering and PNG export

#[cfg(test)]
mod tests {
    use chunkweave::AssemblyError;
    use chunkweave::algorithm::assembler::{AssemblerConfig, GridAssembler};
    use chunkweave::algorithm::map::CompatibilityMap;
    use chunkweave::algorithm::selection::RandomSelector;
    use chunkweave::io::configuration::PIXELS_PER_CELL;
    use chunkweave::io::image::{export_layout_as_png, layout_bounds, render_cells};
    use chunkweave::io::tileset::TileSet;
    use chunkweave::spatial::grid::GridCell;
    use chunkweave::spatial::tiles::{AssetHandle, TileId};
    use glam::IVec2;

    fn tileset() -> TileSet {
        TileSet::builtin(5, IVec2::splat(10)).expect("odd size")
    }

    fn tile(tileset: &TileSet, name: &str) -> TileId {
        tileset
            .registry()
            .find(&AssetHandle::new(name))
            .expect("built-in tile")
    }

    fn assembler(tileset: &TileSet) -> GridAssembler {
        let registry = tileset.registry().clone();
        let map = CompatibilityMap::build(&registry).expect("valid tiles");
        let config = AssemblerConfig {
            chunk_grid_size: registry.grid_size(),
            chunk_real_size: registry.real_size(),
            block_radius: 1,
            central_tile: tileset.central_tile(),
        };
        GridAssembler::new(registry, map, config, RandomSelector::new(4)).expect("valid config")
    }

    // Tests bounds cover every cell inclusively
    // Verified by using an exclusive upper bound
    #[test]
    fn test_layout_bounds() {
        let cells = [
            GridCell::new(IVec2::new(-2, 1), TileId(0), 0.0),
            GridCell::new(IVec2::new(3, -4), TileId(0), 0.0),
        ];
        assert_eq!(
            layout_bounds(&cells),
            Some((IVec2::new(-2, -4), IVec2::new(3, 1)))
        );
        assert_eq!(layout_bounds(&Vec::<GridCell>::new()), None);
    }

    // Tests rotation is applied counter-clockwise and y points up
    // Verified by sampling the mask with the cell rotation unnegated
    #[test]
    fn test_render_rotated_corner() {
        let tileset = tileset();
        let corner = tile(&tileset, "corner");
        let bounds = (IVec2::ZERO, IVec2::ZERO);

        let turned = GridCell::new(IVec2::ZERO, corner, 90.0);
        let img = render_cells([&turned], &tileset, bounds, 1).expect("known tile");
        assert_eq!(img.dimensions(), (5, 5));

        // Corner opens up and right; turned a quarter it opens left and up
        let left = img.get_pixel(0, 2);
        let right = img.get_pixel(4, 2);
        let top = img.get_pixel(2, 0);
        let bottom = img.get_pixel(2, 4);
        assert_eq!(left, top);
        assert_eq!(right, bottom);
        assert_ne!(left, right);
        assert_eq!(img.get_pixel(2, 2), left);

        let upright = GridCell::new(IVec2::ZERO, corner, 0.0);
        let img_upright = render_cells([&upright], &tileset, bounds, 1).expect("known tile");
        assert_eq!(img_upright.get_pixel(4, 2), left);
        assert_eq!(img_upright.get_pixel(0, 2), right);
        assert_eq!(img_upright.get_pixel(2, 0), top);
        assert_eq!(img_upright.get_pixel(2, 4), bottom);
    }

    // Tests placement in the image and dimming of inactive cells
    // Verified by drawing every cell at the image origin
    #[test]
    fn test_render_layout_positions() {
        let tileset = tileset();
        let mut assembler = assembler(&tileset);
        assembler.start(&mut ()).expect("first start");
        assembler.update(IVec2::ZERO, &mut ()).expect("no deadlock");
        assembler.update(IVec2::new(0, 1), &mut ()).expect("no deadlock");

        let bounds = layout_bounds(assembler.cells()).expect("cells placed");
        assert_eq!(bounds, (IVec2::new(-1, -1), IVec2::new(1, 2)));
        let img = render_cells(assembler.cells(), &tileset, bounds, 2).expect("known tiles");
        assert_eq!(img.dimensions(), (3 * 5 * 2, 4 * 5 * 2));

        // The inactive bottom row is darker than the active row above it
        let brightness = |x: u32, y: u32| {
            let [r, g, b, _] = img.get_pixel(x, y).0;
            u32::from(r) + u32::from(g) + u32::from(b)
        };
        let bottom_row_y = img.height() - 1;
        let active_row_y = img.height() - 1 - 10;
        for x in 0..img.width() {
            assert!(brightness(x, bottom_row_y) < brightness(x, active_row_y));
        }
        assert!(img.pixels().all(|p| p.0[3] == 255));
    }

    // Tests unknown tile handles are reported
    // Verified by skipping cells without a mask
    #[test]
    fn test_render_unknown_tile() {
        let tileset = tileset();
        let cell = GridCell::new(IVec2::ZERO, TileId(17), 0.0);
        assert!(matches!(
            render_cells([&cell], &tileset, (IVec2::ZERO, IVec2::ZERO), 1),
            Err(AssemblyError::UnknownTile { index: 17, .. })
        ));
    }

    // Tests export writes a PNG sized to the placed cells
    // Verified by exporting only the active cells
    #[test]
    fn test_export_layout_as_png() {
        let tileset = tileset();
        let mut assembler = assembler(&tileset);
        assembler.start(&mut ()).expect("first start");
        assembler.update(IVec2::ZERO, &mut ()).expect("no deadlock");

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("layout.png");
        export_layout_as_png(&assembler, &tileset, &path).expect("exported");

        let written = image::open(&path).expect("readable PNG");
        let side = 3 * 5 * PIXELS_PER_CELL;
        assert_eq!((written.width(), written.height()), (side, side));
    }

    // Tests export without any placed cell
    // Verified by writing an empty image
    #[test]
    fn test_export_without_cells() {
        let tileset = tileset();
        let assembler = assembler(&tileset);
        let dir = tempfile::tempdir().expect("tempdir");

        let path = dir.path().join("layout.png");
        assert!(matches!(
            export_layout_as_png(&assembler, &tileset, &path),
            Err(AssemblyError::InvalidSourceData { .. })
        ));
        assert!(!path.exists());
    }

    // Tests bounds too wide for a single image
    // Verified by computing the pixel size in 32-bit arithmetic
    #[test]
    fn test_render_oversized_bounds() {
        let tileset = tileset();
        let cell = GridCell::new(IVec2::new(i32::MAX, 0), TileId(0), 0.0);
        let bounds = (IVec2::new(i32::MIN, 0), IVec2::new(i32::MAX, 0));

        assert!(matches!(
            render_cells([&cell], &tileset, bounds, 1),
            Err(AssemblyError::InvalidParameter { .. })
        ));
    }
}
