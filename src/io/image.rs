//! PNG export for rendered figures

use crate::io::error::VisualizationError;
use image::RgbaImage;
use std::path::Path;

/// Write the figure as a PNG, replacing any previous file at `output_path`
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn export_figure_as_png(
    figure: &RgbaImage,
    output_path: &Path,
) -> Result<(), VisualizationError> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| VisualizationError::FileSystem {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    figure
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| VisualizationError::Save {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
