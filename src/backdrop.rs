//! Background selection
//!
//! The presentation layer draws either the configured image or, when that
//! asset is missing, a generated static starfield.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::sim::starfield::{PLACEHOLDER_STAR_COUNT, Starfield};

#[derive(Debug, Clone, PartialEq)]
pub enum Backdrop {
    /// Image file to scale over the play area
    Image(PathBuf),
    /// Black sky with white one-pixel stars
    Placeholder(Starfield),
}

impl Backdrop {
    /// Use the image at `path` if it exists, otherwise generate a placeholder
    pub fn resolve(path: &Path, width: f32, height: f32, rng: &mut impl Rng) -> Self {
        if path.is_file() {
            log::info!("Using background {}", path.display());
            return Backdrop::Image(path.to_path_buf());
        }
        log::warn!(
            "{} not found, using a generated starfield background",
            path.display()
        );
        Backdrop::Placeholder(Starfield::generate(
            PLACEHOLDER_STAR_COUNT,
            width,
            height,
            rng,
        ))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Backdrop::Placeholder(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use tempfile::TempDir;

    #[test]
    fn test_missing_image_falls_back() {
        let dir = TempDir::new().unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let backdrop = Backdrop::resolve(&dir.path().join("bg.png"), 800.0, 600.0, &mut rng);
        match backdrop {
            Backdrop::Placeholder(field) => assert_eq!(field.stars.len(), PLACEHOLDER_STAR_COUNT),
            other => panic!("expected placeholder, got {other:?}"),
        }
    }

    #[test]
    fn test_existing_image_is_used() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bg.png");
        std::fs::write(&path, b"not really a png").unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let backdrop = Backdrop::resolve(&path, 800.0, 600.0, &mut rng);
        assert_eq!(backdrop, Backdrop::Image(path));
    }
}
