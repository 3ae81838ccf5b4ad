//! Tests for command-line interface parsing and simulation runs

#[cfg(test)]
mod tests {
    use chunkweave::AssemblyError;
    use chunkweave::io::cli::{Cli, SimulationRunner};
    use chunkweave::io::configuration::{
        DEFAULT_BLOCK_RADIUS, DEFAULT_CHUNK_GRID_SIZE, DEFAULT_HEADING, DEFAULT_SEED,
        DEFAULT_TICKS,
    };
    use clap::Parser;
    use glam::IVec2;
    use image::{GrayAlphaImage, LumaA};
    use std::path::PathBuf;

    // Tests CLI parsing with only the required output argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "layout.png"]);

        assert_eq!(cli.output, PathBuf::from("layout.png"));
        assert_eq!(cli.tiles, None);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.ticks, DEFAULT_TICKS);
        assert_eq!(cli.radius, DEFAULT_BLOCK_RADIUS);
        assert_eq!(cli.grid_size, DEFAULT_CHUNK_GRID_SIZE);
        assert!((cli.heading - DEFAULT_HEADING).abs() < f32::EPSILON);
        assert!(!cli.visualize);
        assert!(!cli.quiet);
    }

    // Tests CLI parsing with all available arguments
    // Verified by dropping negative number support on the heading
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "out/layout.png",
            "--tiles",
            "assets/roads",
            "--seed",
            "7",
            "--ticks",
            "30",
            "--radius",
            "3",
            "--speed",
            "4.5",
            "--heading",
            "-45",
            "--grid-size",
            "7",
            "--real-size",
            "20",
            "--visualize",
            "--quiet",
        ]);

        assert_eq!(cli.tiles, Some(PathBuf::from("assets/roads")));
        assert_eq!(cli.seed, 7);
        assert_eq!(cli.ticks, 30);
        assert_eq!(cli.radius, 3);
        assert!((cli.speed - 4.5).abs() < f32::EPSILON);
        assert!((cli.heading + 45.0).abs() < f32::EPSILON);
        assert_eq!(cli.grid_size, 7);
        assert_eq!(cli.real_size, 20);
        assert!(cli.visualize);
        assert!(cli.quiet);
        assert!(!cli.should_show_progress());
    }

    // Tests the animation is written next to the layout image
    // Verified by placing the animation in the working directory
    #[test]
    fn test_visualization_path() {
        let cli = Cli::parse_from(["program", "out/run/layout.png"]);
        assert_eq!(
            cli.visualization_path(),
            PathBuf::from("out/run/layout_visualization.gif")
        );

        let bare = Cli::parse_from(["program", "layout.png"]);
        assert_eq!(
            bare.visualization_path(),
            PathBuf::from("layout_visualization.gif")
        );
    }

    // Tests a complete run with the built-in tiles
    // Verified by skipping the animation export
    #[test]
    fn test_runner_builtin_tiles() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("layout.png");
        let cli = Cli::parse_from([
            "program".into(),
            output.clone().into_os_string(),
            "--ticks".into(),
            "6".into(),
            "--grid-size".into(),
            "5".into(),
            "--speed".into(),
            "8".into(),
            "--visualize".into(),
            "--quiet".into(),
        ]);

        let summary = SimulationRunner::new(cli).run().expect("run succeeds");
        assert_eq!(summary.ticks, 6);
        assert_eq!(summary.active_cells, 25);
        assert!(summary.placed_cells >= 25);
        assert_eq!(summary.output, output);
        assert!(output.exists());

        let gif = summary.visualization.expect("requested");
        assert_eq!(gif, dir.path().join("layout_visualization.gif"));
        assert!(gif.exists());
    }

    // Tests a run over tiles loaded from a directory
    // Verified by ignoring the tiles argument
    #[test]
    fn test_runner_tile_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tiles = dir.path().join("tiles");
        std::fs::create_dir(&tiles).expect("tile directory");
        GrayAlphaImage::from_fn(3, 3, |x, y| {
            if x == 1 || y == 1 {
                LumaA([0, 255])
            } else {
                LumaA([255, 255])
            }
        })
        .save(tiles.join("plus.png"))
        .expect("write tile");

        let output = dir.path().join("plus_layout.png");
        let cli = Cli::parse_from([
            "program".into(),
            output.clone().into_os_string(),
            "--tiles".into(),
            tiles.into_os_string(),
            "--ticks".into(),
            "2".into(),
            "--radius".into(),
            "1".into(),
            "--quiet".into(),
        ]);

        let summary = SimulationRunner::new(cli).run().expect("run succeeds");
        assert_eq!(summary.final_center, IVec2::ZERO);
        assert_eq!(summary.placed_cells, 9);
        assert_eq!(summary.visualization, None);

        let written = image::open(&output).expect("readable PNG");
        assert_eq!(written.width(), 3 * 3 * 4);
    }

    // Tests rejection of a non-positive world size
    // Verified by letting zero sizes reach the projection
    #[test]
    fn test_runner_rejects_zero_real_size() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cli = Cli::parse_from([
            "program".into(),
            dir.path().join("layout.png").into_os_string(),
            "--real-size".into(),
            "0".into(),
            "--quiet".into(),
        ]);

        assert!(matches!(
            SimulationRunner::new(cli).run(),
            Err(AssemblyError::InvalidParameter {
                parameter: "real_size",
                ..
            })
        ));
    }
}
