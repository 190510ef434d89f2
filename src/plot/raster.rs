//! SVG → PNG rasterization via resvg.
//!
//! Plotters writes the chart as an SVG document; resvg turns that into pixels.
//! Text is shaped by usvg against the system font database, so the font set
//! is loaded once per run and shared by every chart.

use std::sync::Arc;

use tracing::{debug, warn};
use usvg::fontdb;

/// Families tried (in order) as the generic `sans-serif` font.
const PREFERRED_SANS: &[&str] = &[
    "Arial",
    "Helvetica",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
];

/// Reusable SVG rasterizer holding the font database.
#[derive(Clone)]
pub struct Rasterizer {
    fonts: Arc<fontdb::Database>,
}

impl Rasterizer {
    /// A rasterizer without any fonts (text is dropped, shapes still render).
    pub fn without_fonts() -> Self {
        Self {
            fonts: Arc::new(fontdb::Database::new()),
        }
    }

    /// Load the system fonts and pick a sans-serif family that actually exists.
    pub fn with_system_fonts() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        match pick_sans_family(&db) {
            Some(family) => {
                debug!(faces = db.len(), %family, "loaded system fonts");
                db.set_sans_serif_family(family);
            }
            None => warn!("no system fonts found; chart text will not be rendered"),
        }

        Self {
            fonts: Arc::new(db),
        }
    }

    /// Rasterize `svg` onto a white `width`×`height` canvas and encode it as PNG.
    pub fn svg_to_png(&self, svg: &str, width: u32, height: u32) -> Result<Vec<u8>, String> {
        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fonts);

        let tree = usvg::Tree::from_str(svg, &options).map_err(|e| format!("invalid SVG: {e}"))?;

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| format!("cannot allocate a {width}x{height} canvas"))?;
        pixmap.fill(tiny_skia::Color::WHITE);

        let size = tree.size();
        let transform = tiny_skia::Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        pixmap.encode_png().map_err(|e| format!("PNG encoding failed: {e}"))
    }
}

fn pick_sans_family(db: &fontdb::Database) -> Option<String> {
    let families: Vec<&str> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.as_str()))
        .collect();

    PREFERRED_SANS
        .iter()
        .find(|preferred| families.contains(*preferred))
        .map(|s| s.to_string())
        .or_else(|| families.first().map(|s| s.to_string()))
}
