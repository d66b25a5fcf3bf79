//! Tests for history rendering and PNG export

#[cfg(test)]
mod tests {
    use ringca::AutomatonError;
    use ringca::automaton::{AutomatonEngine, StoppingPolicy, TransitionFunction};
    use ringca::io::image::{export_history_as_png, render_history};
    use ringca::io::initial::single_seed;
    use ringca::lattice::{History, Retention};
    use tempfile::TempDir;

    fn rule184_history() -> History {
        let rule = TransitionFunction::elementary(184).unwrap();
        let policy = StoppingPolicy::evolve(2).unwrap();
        let (history, _) = AutomatonEngine::new()
            .run(single_seed(4).unwrap(), &rule, policy)
            .unwrap();
        history
    }

    // Tests each cell becomes a scale×scale block, live cells black
    // Verified by swapping the live and dead intensities
    #[test]
    fn test_render_history_blocks() {
        let image = render_history(&rule184_history(), 3).unwrap();
        assert_eq!(image.dimensions(), (12, 9));

        // Step 0 has its live cell at column 1
        assert_eq!(image.get_pixel(3, 0).0, [0]);
        assert_eq!(image.get_pixel(5, 2).0, [0]);
        assert_eq!(image.get_pixel(0, 0).0, [255]);
        // Step 2 has moved it to column 3
        assert_eq!(image.get_pixel(9, 6).0, [0]);
        assert_eq!(image.get_pixel(3, 6).0, [255]);
    }

    #[test]
    fn test_render_single_generation() {
        let history = History::new(single_seed(5).unwrap(), Retention::All);
        let image = render_history(&history, 1).unwrap();
        assert_eq!(image.dimensions(), (5, 1));
        assert_eq!(image.get_pixel(1, 0).0, [0]);
    }

    #[test]
    fn test_render_rejects_zero_scale() {
        assert!(matches!(
            render_history(&rule184_history(), 0),
            Err(AutomatonError::InvalidParameter {
                parameter: "scale",
                ..
            })
        ));
    }

    // Tests export creates missing directories and writes a readable PNG
    #[test]
    fn test_export_history_as_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("history.png");

        export_history_as_png(&rule184_history(), 2, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_luma8();
        assert_eq!(decoded.dimensions(), (8, 6));
        assert_eq!(decoded.get_pixel(2, 0).0, [0]);
    }

    #[test]
    fn test_export_to_directory_fails() {
        let dir = TempDir::new().unwrap();
        let result = export_history_as_png(&rule184_history(), 1, dir.path());
        assert!(result.is_err());
    }
}
