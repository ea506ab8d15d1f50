// src/visual/canvas.rs
//! The shared drawing surface: a fixed logical coordinate space rasterised
//! onto a grid of braille dots, two columns by four rows per terminal cell.
//!
//! Logical coordinates run from `(0, 0)` at the top-left to
//! `(width, height)` at the bottom-right, y pointing down.

use ratatui::style::Color;

/// Logical canvas width.
pub const CANVAS_WIDTH: f64 = 900.0;
/// Logical canvas height.
pub const CANVAS_HEIGHT: f64 = 450.0;

const DOTS_PER_CELL_X: usize = 2;
const DOTS_PER_CELL_Y: usize = 4;

/// Braille bit for the dot at `(column, row)` within a cell.
const DOT_BITS: [[u8; DOTS_PER_CELL_Y]; DOTS_PER_CELL_X] =
    [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

/// Logical size of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const DEFAULT: CanvasSize = CanvasSize {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
    };

    /// Vertical extent the pulsing geometry is scaled against.
    pub fn usable_height(&self) -> f64 {
        self.height - 20.0
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Text placed on the canvas after the dots, centered on a logical point.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: Color,
}

/// Braille raster covering `cols` x `rows` terminal cells.
pub struct Canvas {
    size: CanvasSize,
    cols: usize,
    rows: usize,
    /// Braille bit pattern per cell
    dots: Vec<u8>,
    /// Foreground per cell; the last shape painted into a cell wins
    colors: Vec<Option<Color>>,
    labels: Vec<Label>,
}

impl Canvas {
    pub fn new(size: CanvasSize, cols: usize, rows: usize) -> Self {
        Self {
            size,
            cols,
            rows,
            dots: vec![0; cols * rows],
            colors: vec![None; cols * rows],
            labels: Vec::new(),
        }
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Change the cell grid, discarding everything drawn.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.dots = vec![0; cols * rows];
        self.colors = vec![None; cols * rows];
        self.labels.clear();
    }

    /// Erase to the background.
    pub fn clear(&mut self) {
        self.dots.iter_mut().for_each(|d| *d = 0);
        self.colors.iter_mut().for_each(|c| *c = None);
        self.labels.clear();
    }

    fn dot_width(&self) -> usize {
        self.cols * DOTS_PER_CELL_X
    }

    fn dot_height(&self) -> usize {
        self.rows * DOTS_PER_CELL_Y
    }

    /// Logical size of one dot along each axis.
    fn dot_pitch(&self) -> (f64, f64) {
        (
            self.size.width / self.dot_width().max(1) as f64,
            self.size.height / self.dot_height().max(1) as f64,
        )
    }

    /// Logical coordinates of the center of dot `(dx, dy)`.
    fn dot_center(&self, dx: usize, dy: usize) -> (f64, f64) {
        let (px, py) = self.dot_pitch();
        ((dx as f64 + 0.5) * px, (dy as f64 + 0.5) * py)
    }

    /// Dot containing the logical point, if it is on the canvas.
    fn dot_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !(0.0..=self.size.width).contains(&x) || !(0.0..=self.size.height).contains(&y) {
            return None;
        }
        let (px, py) = self.dot_pitch();
        let dx = ((x / px) as usize).min(self.dot_width().checked_sub(1)?);
        let dy = ((y / py) as usize).min(self.dot_height().checked_sub(1)?);
        Some((dx, dy))
    }

    /// Range of dot indices whose centers may fall in `[lo, hi]` along one axis.
    fn dot_span(lo: f64, hi: f64, pitch: f64, count: usize) -> std::ops::Range<usize> {
        let start = (lo / pitch - 0.5).ceil().max(0.0) as usize;
        let end = ((hi / pitch - 0.5).floor() + 1.0).clamp(0.0, count as f64) as usize;
        start..end.max(start)
    }

    fn set_dot(&mut self, dx: usize, dy: usize, color: Color) {
        let cell = (dy / DOTS_PER_CELL_Y) * self.cols + dx / DOTS_PER_CELL_X;
        self.dots[cell] |= DOT_BITS[dx % DOTS_PER_CELL_X][dy % DOTS_PER_CELL_Y];
        self.colors[cell] = Some(color);
    }

    /// Light the single dot under a logical point.
    pub fn plot(&mut self, x: f64, y: f64, color: Color) {
        if let Some((dx, dy)) = self.dot_at(x, y) {
            self.set_dot(dx, dy, color);
        }
    }

    /// Filled axis-aligned ellipse. Negative extents are taken by magnitude;
    /// anything smaller than a dot still lights the dot under its center.
    pub fn fill_ellipse(&mut self, cx: f64, cy: f64, width: f64, height: f64, color: Color) {
        let (rx, ry) = (width.abs() / 2.0, height.abs() / 2.0);
        let (px, py) = self.dot_pitch();
        let xs = Self::dot_span(cx - rx, cx + rx, px, self.dot_width());
        let ys = Self::dot_span(cy - ry, cy + ry, py, self.dot_height());

        let mut painted = false;
        if rx > 0.0 && ry > 0.0 {
            for dy in ys {
                for dx in xs.clone() {
                    let (x, y) = self.dot_center(dx, dy);
                    let (nx, ny) = ((x - cx) / rx, (y - cy) / ry);
                    if nx * nx + ny * ny <= 1.0 {
                        self.set_dot(dx, dy, color);
                        painted = true;
                    }
                }
            }
        }
        if !painted && (rx > 0.0 || ry > 0.0) {
            self.plot(cx, cy, color);
        }
    }

    /// Outline of an axis-aligned ellipse.
    pub fn stroke_ellipse(&mut self, cx: f64, cy: f64, width: f64, height: f64, color: Color) {
        let (rx, ry) = (width.abs() / 2.0, height.abs() / 2.0);
        let (px, py) = self.dot_pitch();
        // Enough steps that neighbouring samples are under a dot apart
        let steps = ((2.0 * std::f64::consts::PI * (rx / px).max(ry / py)).ceil() as usize * 2).max(8);
        for i in 0..steps {
            let t = i as f64 / steps as f64 * std::f64::consts::TAU;
            self.plot(cx + rx * t.cos(), cy + ry * t.sin(), color);
        }
    }

    /// Straight segment between two logical points.
    pub fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Color) {
        let (px, py) = self.dot_pitch();
        let steps = ((x1 - x0).abs() / px).max((y1 - y0).abs() / py).ceil() as usize;
        if steps == 0 {
            self.plot(x0, y0, color);
            return;
        }
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.plot(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t, color);
        }
    }

    /// Filled closed polygon (even-odd rule), scanned one dot row at a time.
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color) {
        if points.len() < 3 {
            return;
        }
        let (px, _) = self.dot_pitch();
        let mut crossings: Vec<f64> = Vec::with_capacity(points.len());

        for dy in 0..self.dot_height() {
            let (_, y) = self.dot_center(0, dy);
            crossings.clear();
            for (i, &(x0, y0)) in points.iter().enumerate() {
                let (x1, y1) = points[(i + 1) % points.len()];
                if (y0 <= y) != (y1 <= y) {
                    crossings.push(x0 + (y - y0) / (y1 - y0) * (x1 - x0));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));

            for pair in crossings.chunks_exact(2) {
                for dx in Self::dot_span(pair[0], pair[1], px, self.dot_width()) {
                    self.set_dot(dx, dy, color);
                }
            }
        }
    }

    /// Queue text centered on a logical point.
    pub fn label(&mut self, x: f64, y: f64, text: impl Into<String>, color: Color) {
        self.labels.push(Label {
            x,
            y,
            text: text.into(),
            color,
        });
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Terminal cell holding a logical point.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        self.dot_at(x, y)
            .map(|(dx, dy)| (dx / DOTS_PER_CELL_X, dy / DOTS_PER_CELL_Y))
    }

    /// Braille glyph and color of a cell, or `None` if nothing was drawn there.
    pub fn cell(&self, col: usize, row: usize) -> Option<(char, Color)> {
        let idx = row * self.cols + col;
        let bits = *self.dots.get(idx)?;
        if bits == 0 {
            return None;
        }
        let glyph = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
        Some((glyph, self.colors[idx].unwrap_or(Color::White)))
    }

    /// Whether the dot under a logical point is lit.
    pub fn is_lit(&self, x: f64, y: f64) -> bool {
        self.dot_at(x, y).is_some_and(|(dx, dy)| {
            let cell = (dy / DOTS_PER_CELL_Y) * self.cols + dx / DOTS_PER_CELL_X;
            self.dots[cell] & DOT_BITS[dx % DOTS_PER_CELL_X][dy % DOTS_PER_CELL_Y] != 0
        })
    }

    /// Total lit dots.
    pub fn lit_dots(&self) -> u32 {
        self.dots.iter().map(|d| d.count_ones()).sum()
    }
}
