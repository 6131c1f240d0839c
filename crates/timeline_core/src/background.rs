//! Tiled ruler and grid background
//!
//! Both bands are drawn from one-second tiles: a ruler tile with a major line
//! at each second and minor ticks every 100ms, and a body tile with matching
//! vertical gridlines and a row separator along its bottom. The tiles are
//! shifted by a phase derived from `left`, so gridlines stay on absolute
//! millisecond marks while panning.

use std::ops::Range;
use crate::config::ChartConfig;
use crate::constants::{MS_PER_TICK, MS_PER_TILE};
use crate::render::BackgroundSurface;
use crate::viewport::Viewport;

/// 24-bit `0xRRGGBB` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

pub const RULER_FILL: Rgb = Rgb(0xDDDDDD);
pub const BODY_FILL: Rgb = Rgb(0xFFFFFF);
pub const RULER_MAJOR: Rgb = Rgb(0xBBBBBB);
pub const RULER_MINOR: Rgb = Rgb(0xCCCCCC);
pub const GRID_LINE: Rgb = Rgb(0xEEEEEE);
pub const SEPARATOR: Rgb = Rgb(0x666666);

/// One-pixel line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub color: Rgb,
}

impl Line {
    pub fn vertical(x: f64, top: f64, bottom: f64, color: Rgb) -> Self {
        Self { x0: x, y0: top, x1: x, y1: bottom, color }
    }

    pub fn horizontal(y: f64, left: f64, right: f64, color: Rgb) -> Self {
        Self { x0: left, y0: y, x1: right, y1: y, color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Ruler,
    Body,
}

/// A repeatable background cell, lines in tile coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub band: Band,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
    pub lines: Vec<Line>,
}

/// Centre a one-pixel line on a pixel.
pub fn snap(px: f64) -> f64 {
    px.floor() + 0.5
}

/// Horizontal tile offset keeping tile edges on whole seconds.
pub fn tile_phase(left: f64, pixel_per_ms: f64) -> f64 {
    let into_tile = left - (left / MS_PER_TILE).floor() * MS_PER_TILE;
    -(into_tile * pixel_per_ms).round()
}

/// Tick positions inside a tile, excluding the tile edge.
fn tick_offsets(width: f64) -> impl Iterator<Item = f64> {
    let ticks = (MS_PER_TILE / MS_PER_TICK) as usize;
    (1..ticks).map(move |i| snap(width / MS_PER_TILE * i as f64 * MS_PER_TICK))
}

pub fn ruler_tile(pixel_per_ms: f64, height: f64) -> Tile {
    let width = MS_PER_TILE * pixel_per_ms;
    let mut lines = vec![Line::vertical(snap(0.0), 0.0, height, RULER_MAJOR)];
    lines.extend(tick_offsets(width).map(|x| Line::vertical(x, height * 0.75, height, RULER_MINOR)));
    Tile {
        band: Band::Ruler,
        width,
        height,
        fill: RULER_FILL,
        lines,
    }
}

pub fn body_tile(pixel_per_ms: f64, height: f64) -> Tile {
    let width = MS_PER_TILE * pixel_per_ms;
    let mut lines = vec![
        Line::vertical(snap(0.0), 0.0, height, GRID_LINE),
        Line::horizontal(snap(height - 1.0), 0.0, width, GRID_LINE),
    ];
    lines.extend(tick_offsets(width).map(|x| Line::vertical(x, 0.0, height, GRID_LINE)));
    Tile {
        band: Band::Body,
        width,
        height,
        fill: BODY_FILL,
        lines,
    }
}

#[derive(Debug)]
struct TileCache {
    pixel_per_ms: f64,
    ruler: Tile,
    body: Tile,
}

#[derive(Debug)]
pub struct BackgroundRenderer {
    ruler_height: f64,
    row_height: f64,
    width: f64,
    height: f64,
    tiles: Option<TileCache>,
}

impl BackgroundRenderer {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            ruler_height: config.ruler_height_px,
            row_height: config.row_height_px,
            width: 0.0,
            height: 0.0,
            tiles: None,
        }
    }

    /// Resize the surface; tiles are rebuilt on the next redraw.
    pub fn resize(&mut self, width: f64, height: f64, surface: &mut impl BackgroundSurface) {
        self.width = width;
        self.height = height;
        self.tiles = None;
        surface.resize(width, height);
    }

    /// Rebuild the tiles if the scale changed. Returns `true` if it did.
    pub fn ensure_tiles(&mut self, pixel_per_ms: f64) -> bool {
        if self.tiles.as_ref().is_some_and(|t| t.pixel_per_ms == pixel_per_ms) {
            return false;
        }
        tracing::trace!("Rebuilding background tiles at {pixel_per_ms} px/ms");
        self.tiles = Some(TileCache {
            pixel_per_ms,
            ruler: ruler_tile(pixel_per_ms, self.ruler_height),
            body: body_tile(pixel_per_ms, self.row_height),
        });
        true
    }

    pub fn ruler(&self) -> Option<&Tile> {
        self.tiles.as_ref().map(|t| &t.ruler)
    }

    pub fn body(&self) -> Option<&Tile> {
        self.tiles.as_ref().map(|t| &t.body)
    }

    fn ruler_rows(&self) -> Range<f64> {
        0.0..self.ruler_height
    }

    fn body_rows(&self) -> Range<f64> {
        (self.ruler_height + 1.0)..self.height.max(self.ruler_height + 1.0)
    }

    pub fn redraw(&mut self, viewport: &Viewport, surface: &mut impl BackgroundSurface) {
        surface.clear_background();

        let pixel_per_ms = viewport.pixel_per_ms();
        if pixel_per_ms.is_finite() && pixel_per_ms > 0.0 {
            self.ensure_tiles(pixel_per_ms);
            let phase = tile_phase(viewport.left(), pixel_per_ms);
            if let Some(tiles) = &self.tiles {
                surface.fill_tiled(Band::Ruler, self.ruler_rows(), &tiles.ruler, phase);
                surface.fill_tiled(Band::Body, self.body_rows(), &tiles.body, phase);
            }
        }

        let y = snap(self.ruler_height);
        surface.stroke(Line::horizontal(y, 0.0, self.width, SEPARATOR));
    }
}
