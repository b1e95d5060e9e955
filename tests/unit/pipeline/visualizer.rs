//! Tests for the image visualization stage

#[cfg(test)]
mod tests {
    use crate::support::{
        StubFetcher, settings_in, write_eight_band, write_gray16, write_three_band,
    };
    use sitescout::io::error::{FetchError, VisualizationError};
    use sitescout::pipeline::events::{MemorySink, StageEvent};
    use sitescout::pipeline::visualizer::{Acquisition, ImageVisualizer};
    use sitescout::raster::render::FigureLayout;
    use sitescout::raster::{SampleType, SelectionReason};
    use tempfile::TempDir;

    fn small_layout() -> FigureLayout {
        FigureLayout {
            width: 120,
            height: 100,
            axes: [0.125, 0.11, 0.775, 0.77],
        }
    }

    // Tests an existing raster is rendered without downloading
    // Verified by always fetching
    #[test]
    fn test_present_raster_rendered() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(dir.path());
        write_eight_band(&settings.raster_path, 6, 4);
        let fetcher = StubFetcher::failing();
        let sink = MemorySink::new();

        let report = ImageVisualizer::new(&settings, &fetcher, &sink)
            .with_layout(small_layout())
            .run();

        assert!(matches!(report.acquisition, Acquisition::AlreadyPresent));
        assert_eq!(fetcher.calls(), 0);
        let summary = report.result.unwrap();
        assert_eq!(summary.band_count, 8);
        assert_eq!(summary.dtypes, vec![SampleType::U16; 8]);
        assert_eq!(summary.band, 8);
        assert_eq!(summary.reason, SelectionReason::Conventional);
        assert_eq!(
            summary.title,
            "Sentinel-2: Band 8 (NIR) - Vegetation Anomaly Detection"
        );
        assert!(settings.figure_path.exists());

        let events = sink.events();
        assert!(events.contains(&StageEvent::RasterLoaded {
            path: settings.raster_path.clone(),
            band_count: 8,
            width: 6,
            height: 4,
        }));
        let described = events
            .iter()
            .filter(|e| matches!(e, StageEvent::BandDescribed { .. }))
            .count();
        assert_eq!(described, 8);
        assert!(matches!(
            events.last(),
            Some(StageEvent::FigureSaved { .. })
        ));
    }

    // Tests rasters with fewer than eight bands show the first band
    // Verified by requiring band 8 unconditionally
    #[test]
    fn test_fallback_band_rendered() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(dir.path());
        write_three_band(&settings.raster_path, 3, 3);
        let sink = MemorySink::new();

        let report = ImageVisualizer::new(&settings, &StubFetcher::failing(), &sink)
            .with_layout(small_layout())
            .run();

        let summary = report.result.unwrap();
        assert_eq!(summary.band, 1);
        assert_eq!(summary.title, "Sentinel-2: Band 1 (only band available)");
        assert!(sink.events().contains(&StageEvent::BandSelected {
            band: 1,
            reason: SelectionReason::Fallback,
        }));
    }

    // Tests a missing raster is downloaded once and then rendered
    // Verified by skipping the render after a download
    #[test]
    fn test_download_then_render() {
        let dir = TempDir::new().unwrap();
        let fixture = dir.path().join("fixture.tif");
        write_gray16(&fixture, 5, 5);
        let settings = settings_in(dir.path());
        let fetcher = StubFetcher::copying(&fixture);
        let sink = MemorySink::new();

        let report = ImageVisualizer::new(&settings, &fetcher, &sink)
            .with_layout(small_layout())
            .run();

        assert_eq!(fetcher.calls(), 1);
        assert!(matches!(report.acquisition, Acquisition::Downloaded { .. }));
        assert!(report.is_rendered());
        let events = sink.events();
        assert_eq!(
            events.first(),
            Some(&StageEvent::RasterMissing {
                path: settings.raster_path.clone(),
                url: settings.raster_url.clone(),
            })
        );
        assert!(matches!(
            events.get(1),
            Some(StageEvent::RasterDownloaded { .. })
        ));
    }

    // Tests a failed download is recorded and the open failure follows without raising
    // Verified by returning early after the download failure
    #[test]
    fn test_download_failure_recorded() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(dir.path());
        let fetcher = StubFetcher::failing();
        let sink = MemorySink::new();

        let report = ImageVisualizer::new(&settings, &fetcher, &sink).run();

        assert_eq!(fetcher.calls(), 1);
        assert!(matches!(
            report.acquisition,
            Acquisition::DownloadFailed(FetchError::Status { status: 404, .. })
        ));
        assert!(matches!(
            report.result,
            Err(VisualizationError::Open { .. })
        ));
        assert!(!settings.figure_path.exists());

        let events = sink.events();
        assert!(matches!(events.get(1), Some(StageEvent::DownloadFailed { .. })));
        assert!(matches!(
            events.last(),
            Some(StageEvent::VisualizationFailed { .. })
        ));
    }

    // Tests an undecodable raster is a soft failure
    // Verified by panicking on decode errors
    #[test]
    fn test_undecodable_raster() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(dir.path());
        std::fs::create_dir_all(settings.raster_path.parent().unwrap()).unwrap();
        std::fs::write(&settings.raster_path, b"not a raster").unwrap();
        let sink = MemorySink::new();

        let report = ImageVisualizer::new(&settings, &StubFetcher::failing(), &sink).run();

        assert!(matches!(report.acquisition, Acquisition::AlreadyPresent));
        assert!(matches!(
            report.result,
            Err(VisualizationError::Decode { .. })
        ));
    }
}
