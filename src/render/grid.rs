//! Poster-grid composition.
//!
//! The grid is a fixed `cols × rows` canvas filled row-major, left to
//! right, top to bottom. A cell whose source item has no resolvable
//! poster stays blank (transparent); the canvas never shrinks to fit
//! the available content.

use futures::future::join_all;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::warn;

/// Cell geometry for one composed grid.
#[derive(Debug, Clone, Copy)]
pub struct GridSpec {
    pub cols: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl GridSpec {
    /// Standard 2:3 poster cell.
    pub fn posters(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cell_width: 230,
            cell_height: 345,
        }
    }

    pub fn capacity(&self) -> usize {
        (self.cols * self.rows) as usize
    }
}

/// Compose the grid. `cells` is in display order; items beyond the
/// grid's capacity are ignored, and a short supply leaves the trailing
/// cells blank.
pub fn compose_grid(spec: &GridSpec, cells: &[Option<RgbaImage>]) -> RgbaImage {
    let mut canvas = RgbaImage::new(
        spec.cols * spec.cell_width,
        spec.rows * spec.cell_height,
    );

    for (i, cell) in cells.iter().take(spec.capacity()).enumerate() {
        let Some(poster) = cell else { continue };

        let col = (i as u32) % spec.cols;
        let row = (i as u32) / spec.cols;
        let scaled = imageops::resize(
            poster,
            spec.cell_width,
            spec.cell_height,
            FilterType::Triangle,
        );
        imageops::overlay(
            &mut canvas,
            &scaled,
            (col * spec.cell_width) as i64,
            (row * spec.cell_height) as i64,
        );
    }

    canvas
}

/// Fetch and decode poster images for the grid, one per item. A failed
/// fetch or decode degrades that cell to blank, never the whole grid.
pub async fn fetch_poster_cells(
    client: &reqwest::Client,
    urls: &[Option<String>],
) -> Vec<Option<RgbaImage>> {
    let fetches = urls.iter().map(|url| async move {
        let url = url.as_deref()?;
        let bytes = match client.get(url).send().await {
            Ok(response) => match response.bytes().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(url, error = %e, "poster body read failed, cell left blank");
                    return None;
                }
            },
            Err(e) => {
                warn!(url, error = %e, "poster fetch failed, cell left blank");
                return None;
            }
        };
        match image::load_from_memory(&bytes) {
            Ok(img) => Some(img.to_rgba8()),
            Err(e) => {
                warn!(url, error = %e, "poster decode failed, cell left blank");
                None
            }
        }
    });

    join_all(fetches).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32, px: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(w, h, px)
    }

    #[test]
    fn grid_dimensions_are_fixed_regardless_of_content() {
        let spec = GridSpec {
            cols: 3,
            rows: 2,
            cell_width: 10,
            cell_height: 15,
        };
        let red = Rgba([255, 0, 0, 255]);
        // 4 supplied items: posters at 0 and 2, blanks at 1 and 3.
        let cells = vec![
            Some(solid(10, 15, red)),
            None,
            Some(solid(10, 15, red)),
            None,
        ];

        let canvas = compose_grid(&spec, &cells);
        assert_eq!(canvas.width(), 30);
        assert_eq!(canvas.height(), 30);

        // Row-major placement: cell 0 and 2 painted, 1 and 3 transparent.
        assert_eq!(canvas.get_pixel(0, 0)[3], 255);
        assert_eq!(canvas.get_pixel(10, 0)[3], 0);
        assert_eq!(canvas.get_pixel(20, 0)[3], 255);
        assert_eq!(canvas.get_pixel(0, 15)[3], 0);
        // Cells never supplied (4 and 5) are blank too.
        assert_eq!(canvas.get_pixel(10, 15)[3], 0);
        assert_eq!(canvas.get_pixel(20, 15)[3], 0);
    }

    #[test]
    fn oversupply_is_ignored_beyond_capacity() {
        let spec = GridSpec {
            cols: 2,
            rows: 1,
            cell_width: 4,
            cell_height: 4,
        };
        let green = Rgba([0, 255, 0, 255]);
        let cells: Vec<_> = (0..5).map(|_| Some(solid(4, 4, green))).collect();
        let canvas = compose_grid(&spec, &cells);
        assert_eq!((canvas.width(), canvas.height()), (8, 4));
    }

    #[test]
    fn posters_are_scaled_to_the_cell() {
        let spec = GridSpec {
            cols: 1,
            rows: 1,
            cell_width: 8,
            cell_height: 12,
        };
        let blue = Rgba([0, 0, 255, 255]);
        let canvas = compose_grid(&spec, &[Some(solid(100, 200, blue))]);
        assert_eq!(canvas.get_pixel(7, 11)[3], 255);
    }
}
