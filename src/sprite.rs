//! Sprite handles and sprite resolution.
//!
//! Texture data itself lives with the renderer; the emitter only needs a
//! lightweight handle carrying the sprite's pixel rectangle so the vertex
//! builder can skip degenerate (zero-size) sprites. Resolution from the
//! `textureFileName` value in an emitter definition is delegated to a
//! [`SpriteResolver`], so hosts can plug in an atlas, a resource cache, or
//! the bundled directory resolver.
//!
//! # Example
//!
//! ```ignore
//! // Closures are resolvers too:
//! let resolver = |name: &str| Some(Sprite::new(name, 32, 32));
//! emitter.load_str(document, &resolver)?;
//! ```

use std::path::PathBuf;

/// A resolved sprite: a name plus its pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    /// The name the sprite was resolved under (usually a file name).
    pub name: String,
    /// Width of the sprite rectangle in pixels.
    pub width: u32,
    /// Height of the sprite rectangle in pixels.
    pub height: u32,
}

impl Sprite {
    /// Create a sprite handle.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// Whether the sprite rectangle has zero area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Lookup from sprite name to sprite handle.
///
/// Returning `None` makes the enclosing load fail with
/// [`LoadError::ResourceNotFound`](crate::LoadError::ResourceNotFound).
pub trait SpriteResolver {
    /// Resolve a sprite by name.
    fn resolve(&self, name: &str) -> Option<Sprite>;
}

impl<F> SpriteResolver for F
where
    F: Fn(&str) -> Option<Sprite>,
{
    fn resolve(&self, name: &str) -> Option<Sprite> {
        self(name)
    }
}

/// Resolver that looks sprites up as image files under a directory.
///
/// Only the image header is read (via [`image::image_dimensions`]); pixel
/// upload is the renderer's concern. Supports the formats the legacy files
/// use: PNG and JPEG.
#[derive(Debug, Clone)]
pub struct DirectorySpriteResolver {
    root: PathBuf,
}

impl DirectorySpriteResolver {
    /// Create a resolver rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SpriteResolver for DirectorySpriteResolver {
    fn resolve(&self, name: &str) -> Option<Sprite> {
        let path = self.root.join(name);
        match image::image_dimensions(&path) {
            Ok((width, height)) => Some(Sprite::new(name, width, height)),
            Err(err) => {
                log::warn!("sprite {} not readable at {:?}: {}", name, path, err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_resolver() {
        let resolver = |name: &str| {
            if name == "fire.png" {
                Some(Sprite::new(name, 16, 16))
            } else {
                None
            }
        };
        assert!(resolver.resolve("fire.png").is_some());
        assert!(resolver.resolve("missing.png").is_none());
    }

    #[test]
    fn test_empty_sprite() {
        assert!(Sprite::new("a", 0, 4).is_empty());
        assert!(Sprite::new("a", 4, 0).is_empty());
        assert!(!Sprite::new("a", 4, 4).is_empty());
    }

    #[test]
    fn test_directory_resolver_missing_file() {
        let resolver = DirectorySpriteResolver::new("/nonexistent");
        assert!(resolver.resolve("fire.png").is_none());
    }
}
