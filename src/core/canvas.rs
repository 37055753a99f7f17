/// RGBA color with straight (non-premultiplied) alpha
pub type Rgba = [u8; 4];

/// 2D drawing operations for canvas
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Overwrite every pixel, alpha included
    Clear(Rgba),

    /// Blend a single pixel
    Pixel { x: i32, y: i32, color: Rgba },

    /// Blend a filled rectangle
    Rect { x: i32, y: i32, width: u32, height: u32, color: Rgba },

    /// Blend a filled circle centred at (cx, cy)
    FilledCircle { cx: i32, cy: i32, radius: f32, color: Rgba },

    /// Blend a line; `smooth` selects coverage-weighted (Wu) stepping over Bresenham
    Line { x1: f32, y1: f32, x2: f32, y2: f32, color: Rgba, smooth: bool },
}

/// RGBA pixel buffer with source-over blending
#[derive(Clone)]
pub struct Canvas {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Create a fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width as usize) * (height as usize) * 4],
            width,
            height,
        }
    }

    /// Apply an operation and return the canvas (builder style)
    pub fn draw(mut self, op: DrawOp) -> Self {
        self.execute(&op);
        self
    }

    pub fn execute(&mut self, op: &DrawOp) {
        match *op {
            DrawOp::Clear(color) => self.clear(color),
            DrawOp::Pixel { x, y, color } => self.blend_pixel(x, y, color, 1.0),
            DrawOp::Rect { x, y, width, height, color } => self.fill_rect(x, y, width, height, color),
            DrawOp::FilledCircle { cx, cy, radius, color } => self.fill_circle(cx, cy, radius, color),
            DrawOp::Line { x1, y1, x2, y2, color, smooth } => {
                if smooth {
                    self.draw_line_smooth(x1, y1, x2, y2, color)
                } else {
                    self.draw_line(x1.round() as i32, y1.round() as i32, x2.round() as i32, y2.round() as i32, color)
                }
            }
        }
    }

    /// Resize, discarding contents
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; (width as usize) * (height as usize) * 4];
    }

    fn clear(&mut self, color: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    /// Source-over blend of `color` scaled by `coverage` onto (x, y)
    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let sa = (color[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let dst = &mut self.pixels[idx..idx + 4];
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        for c in 0..3 {
            let s = color[c] as f32;
            let d = dst[c] as f32;
            dst[c] = ((s * sa + d * da * (1.0 - sa)) / out_a).round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_a * 255.0).round() as u8;
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                self.blend_pixel(x + dx, y + dy, color, 1.0);
            }
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: f32, color: Rgba) {
        if radius <= 0.5 {
            self.blend_pixel(cx, cy, color, 1.0);
            return;
        }
        let reach = radius.ceil() as i32;
        let r_sq = radius * radius;

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if (dx * dx + dy * dy) as f32 <= r_sq {
                    self.blend_pixel(cx + dx, cy + dy, color, 1.0);
                }
            }
        }
    }

    /// Bresenham's algorithm
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba) {
        let (mut x, mut y) = (x1, y1);

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend_pixel(x, y, color, 1.0);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Xiaolin Wu's algorithm: two pixels per step weighted by coverage
    fn draw_line_smooth(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgba) {
        let steep = (y2 - y1).abs() > (x2 - x1).abs();
        let (mut x1, mut y1, mut x2, mut y2) = if steep { (y1, x1, y2, x2) } else { (x1, y1, x2, y2) };
        if x1 > x2 {
            std::mem::swap(&mut x1, &mut x2);
            std::mem::swap(&mut y1, &mut y2);
        }

        let dx = x2 - x1;
        let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { (y2 - y1) / dx };

        let start = x1.round() as i32;
        let end = x2.round() as i32;
        let mut intery = y1 + gradient * (start as f32 - x1);

        for x in start..=end {
            let base = intery.floor();
            let frac = intery - base;
            let (a, b) = (base as i32, base as i32 + 1);
            if steep {
                self.blend_pixel(a, x, color, 1.0 - frac);
                self.blend_pixel(b, x, color, frac);
            } else {
                self.blend_pixel(x, a, color, 1.0 - frac);
                self.blend_pixel(x, b, color, frac);
            }
            intery += gradient;
        }
    }

    /// Blend `src` onto this canvas, stretched to the destination rectangle
    /// with nearest-neighbour sampling
    pub fn blit_scaled(&mut self, src: &Canvas, x: i32, y: i32, width: u32, height: u32) {
        if width == 0 || height == 0 || src.width == 0 || src.height == 0 {
            return;
        }
        for dy in 0..height {
            let sy = ((dy as u64 * src.height as u64) / height as u64) as u32;
            for dx in 0..width {
                let sx = ((dx as u64 * src.width as u64) / width as u64) as u32;
                let color = src.pixel(sx, sy);
                if color[3] > 0 {
                    self.blend_pixel(x + dx as i32, y + dy as i32, color, 1.0);
                }
            }
        }
    }

    /// Read a pixel; out-of-range reads are transparent
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2], self.pixels[idx + 3]]
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels with any coverage
    pub fn covered_pixels(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] > 0).count()
    }
}
