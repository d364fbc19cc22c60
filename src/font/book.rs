//! System font lookup.
//!
//! Maps font family names to TTF files on disk, with separate regular and
//! bold variants, a default-family fallback chain, and Noto Emoji probing
//! for the emoji face. Font *discovery and download* is the caller's
//! problem; the book only reads files that are already present.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ab_glyph::FontArc;
use log::warn;

use super::{FallbackTypeface, FontProvider, FontSet, TtfTypeface, Typeface};

/// Regular/bold file pair for one font family.
#[derive(Debug, Clone)]
struct Family {
    regular: PathBuf,
    bold: PathBuf,
}

/// Well-known Noto Emoji locations, probed in order.
const EMOJI_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/NotoEmoji-Regular.ttf",
    "/usr/share/fonts/noto/NotoEmoji-Regular.ttf",
    "/usr/share/fonts/noto-emoji/NotoEmoji-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoEmoji-Regular.ttf",
];

/// Resolves font requests against the fonts installed on the system.
///
/// Resolution order for a requested family name: the named family (bold
/// variant if requested), then the book's default family, then DejaVu.
/// If no file loads at all, a [`FallbackTypeface`] is returned so rendering
/// still succeeds.
pub struct FontBook {
    default_family: String,
    families: HashMap<String, Family>,
    /// Parsed font files, keyed by path. `None` caches a failed load so a
    /// broken file is only reported once.
    cache: Mutex<HashMap<PathBuf, Option<FontArc>>>,
}

impl FontBook {
    /// Build the book with the stock family map.
    pub fn with_system_fonts(default_family: &str) -> Self {
        let mut families = HashMap::new();
        families.insert(
            "DejaVu".to_string(),
            Family {
                regular: "/usr/share/fonts/dejavu/DejaVuSans.ttf".into(),
                bold: "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf".into(),
            },
        );
        families.insert(
            "DejaVuBold".to_string(),
            Family {
                regular: "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf".into(),
                bold: "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf".into(),
            },
        );
        families.insert(
            "Liberation".to_string(),
            Family {
                regular: "/usr/share/fonts/liberation/LiberationSans-Regular.ttf".into(),
                bold: "/usr/share/fonts/liberation/LiberationSans-Bold.ttf".into(),
            },
        );

        Self {
            default_family: default_family.to_string(),
            families,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Register an additional family (e.g. fonts placed by the supervisor).
    pub fn add_family(&mut self, name: &str, regular: PathBuf, bold: Option<PathBuf>) {
        let bold = bold.unwrap_or_else(|| regular.clone());
        self.families
            .insert(name.to_string(), Family { regular, bold });
    }

    /// Log availability warnings at startup: missing families and a missing
    /// emoji font are worth knowing about before the first print request.
    pub fn probe(&self) {
        for (name, family) in &self.families {
            if !family.regular.exists() && !family.bold.exists() {
                warn!("font family '{}' not found on this system", name);
            }
        }
        if !EMOJI_CANDIDATES.iter().any(|p| Path::new(p).exists()) {
            warn!("no emoji font found, emoji will render as boxes");
        }
    }

    fn load_file(&self, path: &Path) -> Option<FontArc> {
        if let Some(cached) = self.cache.lock().unwrap().get(path) {
            return cached.clone();
        }
        let loaded = std::fs::read(path)
            .ok()
            .and_then(|bytes| FontArc::try_from_vec(bytes).ok());
        if loaded.is_none() && path.exists() {
            warn!("failed to parse font file {}", path.display());
        }
        self.cache
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), loaded.clone());
        loaded
    }

    fn family_path(&self, name: &str, bold: bool) -> Option<PathBuf> {
        self.families.get(name).map(|family| {
            if bold {
                family.bold.clone()
            } else {
                family.regular.clone()
            }
        })
    }

    /// Resolve the primary face: requested family, then the default family,
    /// then DejaVu.
    fn primary_face(&self, size: u32, bold: bool, name: Option<&str>) -> Arc<dyn Typeface> {
        let mut chain: Vec<&str> = Vec::new();
        if let Some(requested) = name {
            chain.push(requested);
        }
        chain.push(&self.default_family);
        chain.push("DejaVu");

        for family in chain {
            if let Some(path) = self.family_path(family, bold) {
                if let Some(font) = self.load_file(&path) {
                    return Arc::new(TtfTypeface::new(font, size as f32));
                }
            }
        }
        warn!("no usable font file found, using built-in fallback glyphs");
        Arc::new(FallbackTypeface::new(size))
    }

    fn emoji_face(&self, size: u32) -> Option<Arc<dyn Typeface>> {
        for candidate in EMOJI_CANDIDATES {
            let path = Path::new(candidate);
            if path.exists() {
                if let Some(font) = self.load_file(path) {
                    return Some(Arc::new(TtfTypeface::new(font, size as f32)));
                }
            }
        }
        None
    }
}

impl FontProvider for FontBook {
    fn resolve(&self, size: u32, bold: bool, font_name: Option<&str>) -> FontSet {
        FontSet::new(self.primary_face(size, bold, font_name), self.emoji_face(size))
    }
}

// ============================================================================
// TESTS
// ============================================================================
