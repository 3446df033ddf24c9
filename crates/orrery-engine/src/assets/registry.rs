use std::collections::HashMap;

use crate::error::OrreryError;
use crate::texture::bitmap::{Bitmap, Rgba};

/// Flat color substituted while a texture is loading or after it failed.
pub const FALLBACK_COLOR: u32 = 0x888888;
/// Edge length of the fallback bitmap.
pub const FALLBACK_SIZE: u32 = 256;

/// Handle to a texture owned by a `TextureRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Load state of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureStatus {
    /// Requested; the host has not reported back yet. Renders with the fallback.
    Pending,
    /// Real pixels are available.
    Ready,
    /// Load failed (or no path given); the fallback is permanent.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct TextureEntry {
    pub key: String,
    pub status: TextureStatus,
    pub bitmap: Bitmap,
}

/// Texture cache keyed by path, owned by one scene.
///
/// Loading is asynchronous and host-driven: `request` hands out an id at once
/// (backed by the fallback bitmap), the host fetches `pending()` paths and
/// reports through `resolve`. Each path is loaded at most once.
pub struct TextureRegistry {
    by_key: HashMap<String, TextureId>,
    entries: Vec<TextureEntry>,
    /// Ids whose pixels changed since the host last called `take_updated`.
    updated: Vec<TextureId>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            by_key: HashMap::new(),
            entries: Vec::new(),
            updated: Vec::new(),
        }
    }

    /// Deterministic flat-color bitmap used for pending and failed loads.
    pub fn fallback_bitmap() -> Bitmap {
        Bitmap::filled(FALLBACK_SIZE, FALLBACK_SIZE, Rgba::from_hex(FALLBACK_COLOR))
    }

    /// Get (or start loading) the texture at `path`.
    pub fn request(&mut self, path: &str) -> TextureId {
        if let Some(id) = self.by_key.get(path) {
            return *id;
        }
        let status = if path.trim().is_empty() {
            log::warn!("texture requested with empty path, using fallback");
            TextureStatus::Fallback
        } else {
            TextureStatus::Pending
        };
        self.push(path, status, Self::fallback_bitmap())
    }

    /// Register a bitmap produced in-process (e.g. a synthesized ring).
    pub fn insert_generated(&mut self, key: &str, bitmap: Bitmap) -> TextureId {
        if let Some(id) = self.by_key.get(key).copied() {
            let entry = &mut self.entries[id.0 as usize];
            entry.bitmap = bitmap;
            entry.status = TextureStatus::Ready;
            self.updated.push(id);
            return id;
        }
        self.push(key, TextureStatus::Ready, bitmap)
    }

    /// Report the outcome of a host-side load.
    ///
    /// Unknown paths are ignored. A failure keeps the fallback and logs a warning;
    /// it never fails the scene.
    pub fn resolve(&mut self, path: &str, result: Result<Bitmap, OrreryError>) -> Option<TextureId> {
        let Some(id) = self.by_key.get(path).copied() else {
            log::debug!("ignoring texture result for unrequested path {path}");
            return None;
        };
        let entry = &mut self.entries[id.0 as usize];
        match result {
            Ok(bitmap) => {
                log::debug!("texture loaded: {path} ({}x{})", bitmap.width(), bitmap.height());
                entry.bitmap = bitmap;
                entry.status = TextureStatus::Ready;
                self.updated.push(id);
            }
            Err(err) => {
                log::warn!("failed to load texture {path}: {err}; using fallback");
                entry.bitmap = Self::fallback_bitmap();
                entry.status = TextureStatus::Fallback;
            }
        }
        Some(id)
    }

    pub fn get(&self, id: TextureId) -> Option<&TextureEntry> {
        self.entries.get(id.0 as usize)
    }

    pub fn id_of(&self, key: &str) -> Option<TextureId> {
        self.by_key.get(key).copied()
    }

    /// Paths still waiting on the host.
    pub fn pending(&self) -> impl Iterator<Item = (TextureId, &str)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.status == TextureStatus::Pending)
            .map(|(i, e)| (TextureId(i as u32), e.key.as_str()))
    }

    /// Drain the list of textures whose pixels changed.
    pub fn take_updated(&mut self) -> Vec<TextureId> {
        std::mem::take(&mut self.updated)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Release every texture (scene teardown).
    pub fn clear(&mut self) {
        self.by_key.clear();
        self.entries.clear();
        self.updated.clear();
    }

    fn push(&mut self, key: &str, status: TextureStatus, bitmap: Bitmap) -> TextureId {
        let id = TextureId(self.entries.len() as u32);
        self.entries.push(TextureEntry {
            key: key.to_string(),
            status,
            bitmap,
        });
        self.by_key.insert(key.to_string(), id);
        if status == TextureStatus::Ready {
            self.updated.push(id);
        }
        id
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_path_is_loaded_once() {
        let mut reg = TextureRegistry::new();
        let a = reg.request("textures/earth.jpg");
        let b = reg.request("textures/earth.jpg");
        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.pending().count(), 1);
    }

    #[test]
    fn pending_texture_renders_fallback() {
        let mut reg = TextureRegistry::new();
        let id = reg.request("textures/mars.jpg");
        let entry = reg.get(id).unwrap();
        assert_eq!(entry.status, TextureStatus::Pending);
        assert_eq!(entry.bitmap, TextureRegistry::fallback_bitmap());
    }

    #[test]
    fn failed_load_keeps_fallback() {
        let mut reg = TextureRegistry::new();
        let id = reg.request("textures/missing.jpg");
        let err = OrreryError::Texture {
            path: "textures/missing.jpg".into(),
            reason: "404".into(),
        };
        assert_eq!(reg.resolve("textures/missing.jpg", Err(err)), Some(id));
        let entry = reg.get(id).unwrap();
        assert_eq!(entry.status, TextureStatus::Fallback);
        assert_eq!(entry.bitmap.get(0, 0), Some(Rgba::from_hex(FALLBACK_COLOR)));
        assert_eq!(reg.pending().count(), 0);
    }

    #[test]
    fn successful_load_replaces_pixels() {
        let mut reg = TextureRegistry::new();
        let id = reg.request("textures/sun.jpg");
        let bmp = Bitmap::filled(2, 2, Rgba::from_hex(0xffaa00));
        reg.resolve("textures/sun.jpg", Ok(bmp.clone()));
        assert_eq!(reg.get(id).unwrap().bitmap, bmp);
        assert_eq!(reg.take_updated(), vec![id]);
        assert!(reg.take_updated().is_empty());
    }

    #[test]
    fn empty_path_is_immediate_fallback() {
        let mut reg = TextureRegistry::new();
        let id = reg.request("");
        assert_eq!(reg.get(id).unwrap().status, TextureStatus::Fallback);
        assert_eq!(reg.pending().count(), 0);
    }

    #[test]
    fn unknown_resolve_is_ignored() {
        let mut reg = TextureRegistry::new();
        assert!(reg.resolve("nope.jpg", Ok(Bitmap::new(1, 1))).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn fresh_registries_do_not_share_entries() {
        let mut a = TextureRegistry::new();
        a.request("textures/earth.jpg");
        let b = TextureRegistry::new();
        assert!(b.id_of("textures/earth.jpg").is_none());
    }

    #[test]
    fn clear_releases_everything() {
        let mut reg = TextureRegistry::new();
        reg.request("a.jpg");
        reg.insert_generated("ring:x", Bitmap::new(4, 4));
        reg.clear();
        assert!(reg.is_empty());
        assert!(reg.take_updated().is_empty());
    }
}
