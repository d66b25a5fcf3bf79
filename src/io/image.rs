//! PNG export of a generation history

use crate::io::configuration::{DEAD_PIXEL, LIVE_PIXEL};
use crate::io::error::{AutomatonError, Result, invalid_parameter};
use crate::lattice::History;
use image::{GrayImage, Luma};
use std::path::Path;

/// Render a history as a grayscale image
///
/// One row of `scale`×`scale` blocks per retained generation, oldest at the
/// top; live cells are black and dead cells white.
///
/// # Errors
///
/// Returns an error if `scale` is zero or the image would exceed `u32` bounds
pub fn render_history(history: &History, scale: u32) -> Result<GrayImage> {
    if scale == 0 {
        return Err(invalid_parameter("scale", &scale, &"must be at least 1"));
    }

    let too_large = || invalid_parameter("scale", &scale, &"rendered image is too large");
    let width = u32::try_from(history.width())
        .ok()
        .and_then(|w| w.checked_mul(scale))
        .ok_or_else(too_large)?;
    let height = u32::try_from(history.len())
        .ok()
        .and_then(|h| h.checked_mul(scale))
        .ok_or_else(too_large)?;

    let cells = history.to_array();
    let mut img = GrayImage::from_pixel(width, height, Luma([DEAD_PIXEL]));
    for ((row, col), _) in cells.indexed_iter().filter(|(_, value)| **value != 0) {
        let top = row as u32 * scale;
        let left = col as u32 * scale;
        for y in top..top + scale {
            for x in left..left + scale {
                img.put_pixel(x, y, Luma([LIVE_PIXEL]));
            }
        }
    }

    Ok(img)
}

/// Export a history as a PNG image, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - `scale` is zero or the image would be too large
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_history_as_png(history: &History, scale: u32, output_path: &Path) -> Result<()> {
    let img = render_history(history, scale)?;

    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(|e| AutomatonError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AutomatonError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
