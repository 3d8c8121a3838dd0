use std::collections::HashMap;
use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, point};
use anyhow::Result;
use px_core::config::RenderConfig;
use px_core::frame::{AsciiGrid, FrameBuffer};

use crate::builtin;

/// Polices monospace candidates, essayées dans l'ordre quand aucun chemin
/// n'est configuré.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/gnu-free/FreeMono.otf",
    "C:\\Windows\\Fonts\\consola.ttf",
];

/// Convertit une AsciiGrid en pixels RGBA.
///
/// Un atlas alpha par caractère est pré-calculé à la construction, soit
/// depuis une police vectorielle, soit depuis les glyphes intégrés
/// ([`crate::builtin`]). La géométrie de cellule est fixée par la
/// configuration, pas par les métriques de la police : le canvas de sortie
/// fait toujours `grid.width × cell_width` par `grid.height × cell_height`.
pub struct Rasterizer {
    cell_width: u32,
    cell_height: u32,
    /// Maps a char to its 1D alpha buffer (size = cell_width * cell_height).
    glyph_cache: HashMap<char, Vec<u8>>,
    /// Fallback pour un caractère absent de l'atlas.
    empty_glyph: Vec<u8>,
}

impl Rasterizer {
    /// Construit l'atlas depuis des données de police (TTF/OTF).
    ///
    /// Les caractères ASCII imprimables et ceux de `charset` sont mis en
    /// cache ; un glyphe plus large que la cellule est rogné.
    ///
    /// # Errors
    /// Retourne une erreur si la police fournie est invalide.
    pub fn from_font_bytes(
        font_data: Vec<u8>,
        config: &RenderConfig,
        charset: &str,
    ) -> Result<Self> {
        let font = FontVec::try_from_vec(font_data)?;
        let scale = PxScale::from(config.font_px);

        let mut rasterizer = Self::empty(config);
        rasterizer.cache_chars(&font, scale, (32..=126).filter_map(char::from_u32));
        rasterizer.cache_chars(&font, scale, charset.chars());
        Ok(rasterizer)
    }

    /// Construit l'atlas depuis les glyphes intégrés, sans police.
    #[must_use]
    pub fn builtin(config: &RenderConfig, charset: &str) -> Self {
        let mut rasterizer = Self::empty(config);
        for ch in charset.chars() {
            let mut buffer =
                vec![0u8; (rasterizer.cell_width * rasterizer.cell_height) as usize];
            for y in 0..rasterizer.cell_height {
                for x in 0..rasterizer.cell_width {
                    if builtin::coverage(ch, x, y, rasterizer.cell_width, rasterizer.cell_height)
                    {
                        buffer[(y * rasterizer.cell_width + x) as usize] = 255;
                    }
                }
            }
            rasterizer.glyph_cache.insert(ch, buffer);
        }
        rasterizer
    }

    /// Charge la meilleure source de glyphes disponible. Ne peut pas échouer :
    /// chemin configuré, puis polices système connues, puis glyphes intégrés.
    #[must_use]
    pub fn load(config: &RenderConfig, charset: &str) -> Self {
        if let Some(path) = &config.font_path {
            match std::fs::read(path) {
                Ok(data) => match Self::from_font_bytes(data, config, charset) {
                    Ok(rasterizer) => return rasterizer,
                    Err(e) => log::warn!("Police invalide {} : {e}", path.display()),
                },
                Err(e) => log::warn!("Police illisible {} : {e}", path.display()),
            }
        }

        for candidate in FONT_CANDIDATES {
            if let Ok(data) = std::fs::read(Path::new(candidate)) {
                if let Ok(rasterizer) = Self::from_font_bytes(data, config, charset) {
                    log::debug!("Police système : {candidate}");
                    return rasterizer;
                }
            }
        }

        log::warn!("Aucune police monospace trouvée : glyphes intégrés utilisés");
        Self::builtin(config, charset)
    }

    fn empty(config: &RenderConfig) -> Self {
        let cell_width = config.cell_width.max(1);
        let cell_height = config.cell_height.max(1);
        Self {
            cell_width,
            cell_height,
            glyph_cache: HashMap::new(),
            empty_glyph: vec![0u8; (cell_width * cell_height) as usize],
        }
    }

    fn cache_chars<F: Font>(
        &mut self,
        font: &F,
        scale: PxScale,
        chars: impl Iterator<Item = char>,
    ) {
        for ch in chars {
            if self.glyph_cache.contains_key(&ch) {
                continue;
            }
            // glyph_id 0 = .notdef : caractère absent de la police.
            let gid = font.glyph_id(ch);
            if gid.0 == 0 && ch != '\0' {
                continue;
            }

            let mut buffer = vec![0u8; (self.cell_width * self.cell_height) as usize];

            let ascent_px = font.ascent_unscaled() * scale.y / font.height_unscaled();
            let glyph = gid.with_scale_and_position(scale, point(0.0, ascent_px));

            if let Some(outline) = font.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                #[allow(clippy::cast_possible_wrap)]
                outline.draw(|x, y, v| {
                    let px = (x as i32 + bounds.min.x as i32).max(0) as u32;
                    let py = (y as i32 + bounds.min.y as i32).max(0) as u32;
                    if px < self.cell_width && py < self.cell_height {
                        let idx = (py * self.cell_width + px) as usize;
                        if idx < buffer.len() {
                            buffer[idx] = (v * 255.0).round() as u8;
                        }
                    }
                });
            }
            self.glyph_cache.insert(ch, buffer);
        }
    }

    /// Dimensions du canvas produit pour une grille donnée.
    #[must_use]
    pub fn target_dimensions(&self, grid_w: u16, grid_h: u16) -> (u32, u32) {
        (
            u32::from(grid_w) * self.cell_width,
            u32::from(grid_h) * self.cell_height,
        )
    }

    /// Rendu de la grille sur un canvas transparent.
    ///
    /// Pour chaque cellule non-espace : remplit le rectangle de la cellule
    /// avec `background` si son alpha est non nul, puis composite le glyphe
    /// avec la couleur de la cellule (source-over). Les cellules espace sont
    /// entièrement sautées : ni fond, ni glyphe.
    #[must_use]
    pub fn render(&self, grid: &AsciiGrid, background: (u8, u8, u8, u8)) -> FrameBuffer {
        let (width, height) = self.target_dimensions(grid.width, grid.height);
        let mut fb = FrameBuffer::new(width, height);

        let (bg_r, bg_g, bg_b, bg_a) = background;
        let under_a = f32::from(bg_a) / 255.0;

        for gy in 0..grid.height {
            for gx in 0..grid.width {
                let cell = grid.get(gx, gy);
                if cell.ch == ' ' {
                    continue;
                }
                let alpha_map = self.glyph_cache.get(&cell.ch).unwrap_or(&self.empty_glyph);
                let (fg_r, fg_g, fg_b, _) = cell.color;

                let x0 = u32::from(gx) * self.cell_width;
                let y0 = u32::from(gy) * self.cell_height;

                for cy in 0..self.cell_height {
                    let row = ((y0 + cy) * width + x0) * 4;
                    for cx in 0..self.cell_width {
                        let glyph_a =
                            f32::from(alpha_map[(cy * self.cell_width + cx) as usize]) / 255.0;

                        let out_a = glyph_a + under_a * (1.0 - glyph_a);
                        if out_a <= 0.0 {
                            continue;
                        }

                        let blend = |fg: u8, bg: u8| -> u8 {
                            let v = (f32::from(fg) * glyph_a
                                + f32::from(bg) * under_a * (1.0 - glyph_a))
                                / out_a;
                            v.round() as u8
                        };

                        let idx = (row + cx * 4) as usize;
                        fb.data[idx] = blend(fg_r, bg_r);
                        fb.data[idx + 1] = blend(fg_g, bg_g);
                        fb.data[idx + 2] = blend(fg_b, bg_b);
                        fb.data[idx + 3] = (out_a * 255.0).round() as u8;
                    }
                }
            }
        }

        fb
    }
}
