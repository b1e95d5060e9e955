//! Tests for figure layout and band rendering

#[cfg(test)]
mod tests {
    use image::Rgba;
    use ndarray::Array2;
    use sitescout::io::error::VisualizationError;
    use sitescout::raster::colormap::viridis;
    use sitescout::raster::render::{FigureLayout, Placement, render_band};
    use sitescout::raster::{Band, SampleType};

    fn band(data: Array2<f64>) -> Band {
        Band {
            index: 8,
            dtype: SampleType::U16,
            description: None,
            data,
        }
    }

    fn small_layout() -> FigureLayout {
        FigureLayout {
            width: 100,
            height: 100,
            axes: [0.1, 0.1, 0.8, 0.8],
        }
    }

    // Tests the default canvas geometry
    // Verified by swapping width and height
    #[test]
    fn test_default_layout() {
        let layout = FigureLayout::default();

        assert_eq!((layout.width, layout.height), (1200, 1000));
        assert_eq!(layout.axes, [0.125, 0.11, 0.775, 0.77]);
    }

    // Tests equal-aspect fitting centres the band in the axes
    // Verified by stretching to fill both axes dimensions
    #[test]
    fn test_place_equal_aspect() {
        let layout = small_layout();

        assert_eq!(
            layout.place(4, 2),
            Some(Placement {
                x: 10,
                y: 30,
                width: 80,
                height: 40
            })
        );
        assert_eq!(
            layout.place(10, 10),
            Some(Placement {
                x: 10,
                y: 10,
                width: 80,
                height: 80
            })
        );
        assert_eq!(layout.place(0, 3), None);
    }

    // Tests stretched extremes map to the colormap endpoints
    // Verified by stretching over the full dtype range
    #[test]
    fn test_render_colors() {
        let data = Array2::from_shape_vec((2, 2), vec![100.0, 200.0, 300.0, 500.0]).unwrap();
        let figure = render_band(&band(data), None, "title", &small_layout()).unwrap();

        assert_eq!(figure.title, "title");
        assert!((figure.stretch.min - 100.0).abs() < f64::EPSILON);
        assert!((figure.stretch.max - 500.0).abs() < f64::EPSILON);
        let p = figure.placement;
        assert_eq!(figure.image.get_pixel(p.x, p.y), &Rgba(viridis(0.0)));
        assert_eq!(
            figure.image.get_pixel(p.x + p.width - 1, p.y + p.height - 1),
            &Rgba(viridis(1.0))
        );
    }

    // Tests nodata pixels are transparent and the frame and background are drawn
    // Verified by colouring nodata with the colormap floor
    #[test]
    fn test_render_nodata_frame_background() {
        let data = Array2::from_shape_vec((2, 2), vec![0.0, 5.0, 10.0, 15.0]).unwrap();
        let figure = render_band(&band(data), Some(0.0), "t", &small_layout()).unwrap();
        let p = figure.placement;

        assert_eq!(figure.image.get_pixel(p.x, p.y), &Rgba([0, 0, 0, 0]));
        assert_eq!(figure.image.get_pixel(p.x - 1, p.y - 1), &Rgba([0, 0, 0, 255]));
        assert_eq!(figure.image.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(figure.image.dimensions(), (100, 100));
    }

    // Tests a band without valid samples cannot be rendered
    // Verified by rendering an all-transparent image
    #[test]
    fn test_render_all_nodata() {
        let data = Array2::from_elem((3, 3), -9999.0);

        let result = render_band(&band(data), Some(-9999.0), "t", &small_layout());

        assert!(matches!(result, Err(VisualizationError::Render { .. })));
    }

    // Tests an empty band cannot be rendered
    // Verified by returning the blank canvas
    #[test]
    fn test_render_empty() {
        let result = render_band(&band(Array2::zeros((0, 4))), None, "t", &small_layout());

        assert!(matches!(result, Err(VisualizationError::Render { .. })));
    }
}
