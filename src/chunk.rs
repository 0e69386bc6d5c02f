//! Chunk grid over a reference image
//!
//! Reference images are worked on in fixed-size square chunks. The grid
//! covers the whole image; tiles on the right and bottom edges are
//! clamped to the image bounds and may be smaller than [`CHUNK_SIZE`].
//! Tiles are extracted in memory from the decoded image.

use std::path::Path;

use color_cluster::Rgb;

use crate::error::InputError;

/// Edge length of a full chunk, in image pixels.
pub const CHUNK_SIZE: u32 = 32;

/// The chunk grid of an image: how many chunks cover it and where each
/// chunk's crop box sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkGrid {
    image_width: u32,
    image_height: u32,
    chunks_x: u32,
    chunks_y: u32,
}

/// Crop box of one chunk within the image, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Pixels of one extracted chunk, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgb>,
}

impl ChunkGrid {
    /// Grid covering a `width` x `height` image with ceiling division,
    /// so partial edge chunks still get a tile.
    pub fn new(width: u32, height: u32) -> Result<Self, InputError> {
        if width == 0 || height == 0 {
            return Err(InputError::InvalidChunk { width, height });
        }
        Ok(Self {
            image_width: width,
            image_height: height,
            chunks_x: width.div_ceil(CHUNK_SIZE),
            chunks_y: height.div_ceil(CHUNK_SIZE),
        })
    }

    pub fn chunks_x(&self) -> u32 {
        self.chunks_x
    }

    pub fn chunks_y(&self) -> u32 {
        self.chunks_y
    }

    pub fn total(&self) -> usize {
        (self.chunks_x as usize) * (self.chunks_y as usize)
    }

    /// Crop box of chunk `index` (row-major over the grid), clamped to
    /// the image bounds.
    pub fn tile_rect(&self, index: usize) -> Result<TileRect, InputError> {
        if index >= self.total() {
            return Err(InputError::ChunkIndexOutOfRange {
                index,
                total: self.total(),
            });
        }
        // Grid math stays in usize: total() can exceed u32 even though
        // each axis fits
        let cx = (index % self.chunks_x as usize) as u32;
        let cy = (index / self.chunks_x as usize) as u32;
        let x = cx * CHUNK_SIZE;
        let y = cy * CHUNK_SIZE;
        Ok(TileRect {
            x,
            y,
            width: CHUNK_SIZE.min(self.image_width - x),
            height: CHUNK_SIZE.min(self.image_height - y),
        })
    }
}

/// Decode an image file into a row-major RGB pixel buffer.
///
/// Alpha is discarded; transparent pixels composite onto black, which is
/// what the `image` crate's RGB conversion does.
pub fn load_pixels(path: &Path) -> Result<(Vec<Rgb>, u32, u32), InputError> {
    let decoded = image::open(path)?.to_rgb8();
    let (width, height) = decoded.dimensions();
    let pixels = decoded
        .pixels()
        .map(|p| Rgb::new(p.0[0], p.0[1], p.0[2]))
        .collect();
    Ok((pixels, width, height))
}

/// Extract one tile's pixels from a full row-major image buffer.
pub fn extract_tile(pixels: &[Rgb], image_width: u32, rect: TileRect) -> Tile {
    let mut out = Vec::with_capacity((rect.width as usize) * (rect.height as usize));
    for y in rect.y..rect.y + rect.height {
        let row = (y as usize) * (image_width as usize);
        out.extend_from_slice(&pixels[row + rect.x as usize..row + (rect.x + rect.width) as usize]);
    }
    Tile {
        width: rect.width,
        height: rect.height,
        pixels: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions_round_up() {
        let grid = ChunkGrid::new(64, 64).unwrap();
        assert_eq!((grid.chunks_x(), grid.chunks_y()), (2, 2));
        assert_eq!(grid.total(), 4);

        let grid = ChunkGrid::new(65, 33).unwrap();
        assert_eq!((grid.chunks_x(), grid.chunks_y()), (3, 2));
        assert_eq!(grid.total(), 6);

        let grid = ChunkGrid::new(1, 1).unwrap();
        assert_eq!(grid.total(), 1);
    }

    #[test]
    fn test_zero_sized_image_is_rejected() {
        assert!(ChunkGrid::new(0, 64).is_err());
        assert!(ChunkGrid::new(64, 0).is_err());
    }

    #[test]
    fn test_tile_rects_are_row_major_and_clamped() {
        // 65x33: right column is 1 wide, bottom row is 1 tall
        let grid = ChunkGrid::new(65, 33).unwrap();

        assert_eq!(
            grid.tile_rect(0).unwrap(),
            TileRect {
                x: 0,
                y: 0,
                width: 32,
                height: 32
            }
        );
        assert_eq!(
            grid.tile_rect(2).unwrap(),
            TileRect {
                x: 64,
                y: 0,
                width: 1,
                height: 32
            }
        );
        assert_eq!(
            grid.tile_rect(3).unwrap(),
            TileRect {
                x: 0,
                y: 32,
                width: 32,
                height: 1
            }
        );
        assert_eq!(
            grid.tile_rect(5).unwrap(),
            TileRect {
                x: 64,
                y: 32,
                width: 1,
                height: 1
            }
        );
    }

    #[test]
    fn test_tile_rect_handles_indices_past_u32() {
        // u32::MAX on both axes gives 2^27 chunks per row, so row-major
        // indices past the 40th row no longer fit in u32
        let grid = ChunkGrid::new(u32::MAX, u32::MAX).unwrap();
        assert_eq!(grid.chunks_x(), 1 << 27);

        let index = (grid.chunks_x() as usize) * 40 + 3;
        assert!(index > u32::MAX as usize);
        assert_eq!(
            grid.tile_rect(index).unwrap(),
            TileRect {
                x: 96,
                y: 1280,
                width: 32,
                height: 32
            }
        );
    }

    #[test]
    fn test_tile_index_out_of_range() {
        let grid = ChunkGrid::new(64, 64).unwrap();
        assert!(matches!(
            grid.tile_rect(4),
            Err(InputError::ChunkIndexOutOfRange { index: 4, total: 4 })
        ));
    }

    #[test]
    fn test_tile_rects_tile_the_whole_image() {
        let grid = ChunkGrid::new(100, 70).unwrap();
        let covered: u64 = (0..grid.total())
            .map(|i| {
                let r = grid.tile_rect(i).unwrap();
                u64::from(r.width) * u64::from(r.height)
            })
            .sum();
        assert_eq!(covered, 100 * 70);
    }

    #[test]
    fn test_extract_tile_pulls_the_right_pixels() {
        // 4x4 image with unique colors keyed by position
        let width = 4u32;
        let pixels: Vec<Rgb> = (0..16).map(|i| Rgb::new(i as u8, 0, 0)).collect();

        let tile = extract_tile(
            &pixels,
            width,
            TileRect {
                x: 2,
                y: 1,
                width: 2,
                height: 2,
            },
        );

        assert_eq!(tile.width, 2);
        assert_eq!(tile.height, 2);
        assert_eq!(
            tile.pixels,
            vec![
                Rgb::new(6, 0, 0),
                Rgb::new(7, 0, 0),
                Rgb::new(10, 0, 0),
                Rgb::new(11, 0, 0)
            ]
        );
    }
}
