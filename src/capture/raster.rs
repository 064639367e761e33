use crate::capture::data_url::png_data_url;
use crate::capture::{Artifact, CaptureResult, Rasterizer};
use crate::error::CaptureError;
use crate::ui::frame::Frame;
use crate::ui::style::{Color, Style};
use font8x8::UnicodeFonts;
use serde::Deserialize;
use unicode_width::UnicodeWidthChar;

const GLYPH_SIZE: u32 = 8;
const CELL_WIDTH: u32 = GLYPH_SIZE;
const CELL_HEIGHT: u32 = GLYPH_SIZE + 4;
const MAX_PIXELS: u64 = 64 * 1024 * 1024;

type Rgba = [u8; 4];

const DEFAULT_FOREGROUND: Rgba = [0xe6, 0xe6, 0xe6, 0xff];
const DEFAULT_BACKGROUND: Rgba = [0x1e, 0x1e, 0x24, 0xff];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RasterOptions {
    /// Integer pixel scale applied to every glyph.
    pub scale: u32,
    /// Blank cells around the region.
    pub padding: u32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 2,
            padding: 1,
        }
    }
}

/// Paints a [`Frame`] with an 8x8 bitmap font and encodes it as a PNG data URL.
#[derive(Debug, Clone, Default)]
pub struct FrameRasterizer {
    options: RasterOptions,
}

impl FrameRasterizer {
    pub fn new(options: RasterOptions) -> Self {
        Self { options }
    }

    pub fn paint(&self, region: &Frame) -> Result<Canvas, CaptureError> {
        if region.height() == 0 || region.is_blank() {
            return Err(CaptureError::EmptyRegion);
        }
        let scale = self.options.scale.clamp(1, 8);
        let pad = self.options.padding;
        let cols = region.width() as u32 + pad * 2;
        let rows = region.height() as u32 + pad * 2;
        let width = cols * CELL_WIDTH * scale;
        let height = rows * CELL_HEIGHT * scale;
        if u64::from(width) * u64::from(height) > MAX_PIXELS {
            return Err(CaptureError::Render(format!(
                "region of {}x{} pixels exceeds the canvas limit",
                width, height
            )));
        }

        let mut canvas = Canvas::new(width, height, DEFAULT_BACKGROUND);
        for (row, line) in region.lines().iter().enumerate() {
            let mut col = 0u32;
            for span in line {
                for ch in span.text.chars() {
                    let cells = UnicodeWidthChar::width(ch).unwrap_or(0) as u32;
                    if cells == 0 {
                        continue;
                    }
                    let x = (col + pad) * CELL_WIDTH * scale;
                    let y = (row as u32 + pad) * CELL_HEIGHT * scale;
                    paint_cell(&mut canvas, x, y, cells, scale, ch, span.style);
                    col += cells;
                }
            }
        }
        Ok(canvas)
    }
}

impl Rasterizer for FrameRasterizer {
    async fn rasterize(&self, region: &Frame) -> CaptureResult {
        let canvas = self.paint(region)?;
        let png = canvas.encode_png()?;
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            bytes = png.len(),
            "rasterized form region"
        );
        Ok(Artifact::new(png_data_url(&png)))
    }
}

/// RGBA8 pixel buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32, fill: Rgba) -> Self {
        let pixels = fill
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(out)
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        for py in y..(y + h).min(self.height) {
            for px in x..(x + w).min(self.width) {
                let idx = ((py * self.width + px) * 4) as usize;
                self.pixels[idx..idx + 4].copy_from_slice(&color);
            }
        }
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, CaptureError> {
        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|err| CaptureError::Encode(format!("png header failed: {}", err)))?;
        writer
            .write_image_data(&self.pixels)
            .map_err(|err| CaptureError::Encode(format!("png write failed: {}", err)))?;
        writer
            .finish()
            .map_err(|err| CaptureError::Encode(format!("png finish failed: {}", err)))?;
        Ok(out)
    }
}

fn paint_cell(canvas: &mut Canvas, x: u32, y: u32, cells: u32, scale: u32, ch: char, style: Style) {
    let background = style
        .background
        .and_then(rgba)
        .unwrap_or(DEFAULT_BACKGROUND);
    let mut foreground = style.color.and_then(rgba).unwrap_or(DEFAULT_FOREGROUND);
    if style.dim {
        foreground = blend(foreground, background);
    }

    canvas.fill_rect(
        x,
        y,
        CELL_WIDTH * scale * cells,
        CELL_HEIGHT * scale,
        background,
    );
    if ch == ' ' {
        return;
    }

    let glyph = glyph_for(ch);
    let top = y + (CELL_HEIGHT - GLYPH_SIZE) / 2 * scale;
    for (gy, bits) in glyph.iter().enumerate() {
        for gx in 0..GLYPH_SIZE {
            if bits & (1 << gx) == 0 {
                continue;
            }
            let px = x + gx * scale;
            let py = top + gy as u32 * scale;
            canvas.fill_rect(px, py, scale, scale, foreground);
            if style.bold {
                canvas.fill_rect(px + 1, py, scale, scale, foreground);
            }
        }
    }
}

fn glyph_for(ch: char) -> [u8; 8] {
    font8x8::BASIC_FONTS
        .get(ch)
        .or_else(|| font8x8::LATIN_FONTS.get(ch))
        .or_else(|| font8x8::BOX_FONTS.get(ch))
        .or_else(|| font8x8::BLOCK_FONTS.get(ch))
        .or_else(|| font8x8::MISC_FONTS.get(ch))
        .or_else(|| font8x8::BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn rgba(color: Color) -> Option<Rgba> {
    let rgb = match color {
        Color::Reset => return None,
        Color::Black => [0x00, 0x00, 0x00],
        Color::DarkGrey => [0x6c, 0x6c, 0x74],
        Color::Grey => [0xa8, 0xa8, 0xb0],
        Color::Red => [0xe6, 0x00, 0x00],
        Color::Green => [0x3c, 0xb3, 0x71],
        Color::Yellow => [0xe5, 0xc0, 0x7b],
        Color::Blue => [0x3b, 0x6e, 0xd8],
        Color::Magenta => [0xc6, 0x78, 0xdd],
        Color::Cyan => [0x56, 0xb6, 0xc2],
        Color::White => [0xff, 0xff, 0xff],
    };
    Some([rgb[0], rgb[1], rgb[2], 0xff])
}

fn blend(a: Rgba, b: Rgba) -> Rgba {
    let mix = |x: u8, y: u8| ((u16::from(x) + u16::from(y)) / 2) as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]), 0xff]
}
