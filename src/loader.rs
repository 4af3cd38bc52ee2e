//! Heightfield sources: decoded images and the built-in terrain.

use std::f32::consts::TAU;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::types::Heightfield;

/// Decode an image file and use its red channel as heights.
pub fn load_heightmap(path: &Path) -> Result<Heightfield> {
    let img = image::open(path)
        .with_context(|| format!("failed to decode heightmap {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    let red: Vec<u8> = img.pixels().map(|p| p[0]).collect();
    let hf = Heightfield::from_red_channel(width as usize, height as usize, &red)
        .with_context(|| format!("invalid heightmap {}", path.display()))?;
    info!(path = %path.display(), width, height, "heightmap loaded");
    Ok(hf)
}

/// Rolling hills on a `size x size` grid.
pub fn synthetic_terrain(size: usize) -> Heightfield {
    let n = size.max(1) as f32;
    Heightfield::from_fn(size, size, |row, col| {
        let u = row as f32 / n;
        let v = col as f32 / n;
        let hills = (u * TAU).sin() * (v * TAU).cos();
        let ridge = ((u + v) * TAU * 2.0).sin();
        0.5 + 0.3 * hills + 0.15 * ridge
    })
}

/// Load `path` when given, otherwise build the synthetic terrain.
pub fn load_or_synthesize(path: Option<&Path>, synthetic_size: usize) -> Result<Heightfield> {
    match path {
        Some(path) => load_heightmap(path),
        None => {
            info!(size = synthetic_size, "using synthetic terrain");
            Ok(synthetic_terrain(synthetic_size))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_terrain_stays_in_unit_range() {
        let hf = synthetic_terrain(16);
        assert_eq!((hf.width(), hf.height()), (16, 16));
        assert!(hf.samples().iter().all(|s| (0.0..=1.0).contains(s)));
        assert!(hf.samples().iter().any(|&s| s != hf.samples()[0]));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_heightmap(Path::new("/nonexistent/heightmap.png")).unwrap_err();
        assert!(err.to_string().contains("heightmap"));
    }

    #[test]
    fn red_channel_becomes_heights() {
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgba([255, 0, 0, 255]));
        let path = std::env::temp_dir().join(format!("heightview-{}.png", std::process::id()));
        img.save(&path).unwrap();

        let hf = load_heightmap(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!((hf.width(), hf.height()), (3, 2));
        assert_eq!(hf.get(1, 2), Some(1.0));
        assert_eq!(hf.get(0, 0), Some(0.0));
    }
}
