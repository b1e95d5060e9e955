//! Tests for PNG figure export including directory creation and overwrite

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use sitescout::io::error::VisualizationError;
    use sitescout::io::image::export_figure_as_png;
    use tempfile::TempDir;

    // Tests PNG file creation inside a missing directory
    // Verified by disabling directory creation
    #[test]
    fn test_export_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("reports/nested/figure.png");
        let figure = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255]));

        export_figure_as_png(&figure, &output).unwrap();

        let reloaded = image::open(&output).unwrap().to_rgba8();
        assert_eq!(reloaded.dimensions(), (4, 3));
        assert_eq!(reloaded.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    // Tests a second export replaces the first
    // Verified by skipping existing files
    #[test]
    fn test_export_overwrites() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("figure.png");

        export_figure_as_png(&RgbaImage::new(2, 2), &output).unwrap();
        export_figure_as_png(&RgbaImage::new(5, 1), &output).unwrap();

        let reloaded = image::open(&output).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (5, 1));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    // Tests an unwritable destination is reported as a directory failure
    // Verified by unwrapping create_dir_all
    #[test]
    fn test_export_parent_is_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("reports");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = export_figure_as_png(&RgbaImage::new(1, 1), &blocker.join("figure.png"));

        assert!(matches!(result, Err(VisualizationError::FileSystem { .. })));
    }
}
