use std::path::{Path, PathBuf};

use image::{imageops::FilterType, ImageReader};
use log::info;
use thiserror::Error;

use crate::{common::Bitmap, config::ResizeConfig};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: '{}'", .0.display())]
    NotFound(PathBuf),
    #[error("unable to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to decode '{}'", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decodes an image file and drops every channel except RGB.
pub fn load_rgb(path: &Path) -> Result<image::RgbImage, LoadError> {
    match path.try_exists() {
        Ok(true) => {}
        Ok(false) => return Err(LoadError::NotFound(path.to_owned())),
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_owned(),
                source,
            })
        }
    }
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
    let img = reader.decode().map_err(|source| LoadError::Decode {
        path: path.to_owned(),
        source,
    })?;
    Ok(img.to_rgb8())
}

/// Loads the configured background image and scales it to the target size
/// with a Lanczos filter, ignoring the source aspect ratio.
pub fn load_resized(config: &ResizeConfig) -> Result<Bitmap, LoadError> {
    let img = load_rgb(&config.input_path)?;
    info!("Source size: {} x {}", img.width(), img.height());
    info!("Resizing to {} x {}", config.width, config.height);
    let resized = image::imageops::resize(&img, config.width, config.height, FilterType::Lanczos3);
    Ok(Bitmap::from(resized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::write_mem;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mem_assets_{}_{}", std::process::id(), name))
    }

    #[test]
    fn missing_input_names_the_path() {
        let config = ResizeConfig {
            input_path: temp_path("does_not_exist.ppm"),
            mem_path: temp_path("never_written.mem"),
            ..ResizeConfig::default()
        };
        let err = load_resized(&config).unwrap_err();
        assert!(matches!(&err, LoadError::NotFound(p) if *p == config.input_path));
        assert!(err.to_string().contains("does_not_exist.ppm"));
        assert!(!config.mem_path.exists());
    }

    #[test]
    fn unreachable_input_is_not_reported_missing() {
        let file = temp_path("plain_file");
        std::fs::write(&file, b"x").unwrap();
        // A regular file used as a directory fails with ENOTDIR, not ENOENT.
        let result = load_rgb(&file.join("inner.png"));
        std::fs::remove_file(&file).unwrap();
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn undecodable_input_is_reported() {
        let path = temp_path("garbage.png");
        std::fs::write(&path, b"not an image").unwrap();
        let result = load_rgb(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(LoadError::Decode { .. })));
    }

    #[test]
    fn resize_hits_target_size_for_any_source() {
        for (w, h) in [(7, 5), (50, 3)] {
            let path = temp_path(&format!("src_{w}x{h}.png"));
            image::RgbaImage::from_pixel(w, h, image::Rgba([200, 100, 50, 10]))
                .save(&path)
                .unwrap();
            let config = ResizeConfig {
                input_path: path.clone(),
                mem_path: temp_path("unused.mem"),
                width: 32,
                height: 24,
            };
            let bitmap = load_resized(&config).unwrap();
            std::fs::remove_file(&path).unwrap();
            assert_eq!((bitmap.width(), bitmap.height()), (32, 24));
            let mut out = vec![];
            assert_eq!(write_mem(&mut out, &bitmap).unwrap(), 32 * 24);
        }
    }

    #[test]
    fn reads_ppm_backgrounds() {
        let path = temp_path("flat.ppm");
        let mut ppm = b"P6\n2 2\n255\n".to_vec();
        ppm.extend([255, 0, 0].repeat(4));
        std::fs::write(&path, &ppm).unwrap();
        let config = ResizeConfig {
            input_path: path.clone(),
            mem_path: temp_path("unused.mem"),
            width: 4,
            height: 3,
        };
        let bitmap = load_resized(&config).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(bitmap.pixels().len(), 12);
        assert!(bitmap.pixels().iter().all(|&p| p == [255, 0, 0]));
    }
}
