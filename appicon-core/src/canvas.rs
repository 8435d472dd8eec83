//! Raster Primitives
//!
//! Shapes are rasterized into a `Coverage` mask first and then painted in one
//! pass, so a union of overlapping shapes blends each pixel once. Bounding
//! boxes are inclusive on both ends; anything outside the image is clipped.

use image::RgbaImage;

use crate::style::Color;

/// Alpha-over compositing for a single pixel. Out-of-bounds writes are dropped.
pub fn blend_pixel(img: &mut RgbaImage, x: i64, y: i64, color: Color) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    let px = img.get_pixel_mut(x as u32, y as u32);
    match color.0[3] {
        255 => px.0 = color.0,
        0 => {}
        a => {
            let src_a = a as f32 / 255.0;
            let dst_a = px.0[3] as f32 / 255.0;
            let out_a = src_a + dst_a * (1.0 - src_a);
            let mix = |s: u8, d: u8| -> u8 {
                ((s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a)
                    .round()
                    .clamp(0.0, 255.0) as u8
            };
            px.0 = [
                mix(color.0[0], px.0[0]),
                mix(color.0[1], px.0[1]),
                mix(color.0[2], px.0[2]),
                (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
            ];
        }
    }
}

/// Clamp an inclusive span to `[0, limit)`. `None` when nothing is left.
fn clip_span(lo: i64, hi: i64, limit: u32) -> Option<(i64, i64)> {
    let lo = lo.max(0);
    let hi = hi.min(limit as i64 - 1);
    (lo <= hi).then_some((lo, hi))
}

/// Set of covered pixels for one fill.
pub struct Coverage {
    width: u32,
    height: u32,
    covered: Vec<bool>,
}

impl Coverage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            covered: vec![false; width as usize * height as usize],
        }
    }

    pub fn for_image(img: &RgbaImage) -> Self {
        Self::new(img.width(), img.height())
    }

    fn mark(&mut self, x: i64, y: i64) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.covered[y as usize * self.width as usize + x as usize] = true;
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.covered[y as usize * self.width as usize + x as usize]
    }

    pub fn count(&self) -> usize {
        self.covered.iter().filter(|c| **c).count()
    }

    pub fn rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) -> &mut Self {
        let (Some((x0, x1)), Some((y0, y1))) = (
            clip_span(x0, x1, self.width),
            clip_span(y0, y1, self.height),
        ) else {
            return self;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.mark(x, y);
            }
        }
        self
    }

    /// Ellipse inscribed in the inclusive box. A pixel is covered when its
    /// center lies inside the ellipse.
    pub fn ellipse(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) -> &mut Self {
        if x1 < x0 || y1 < y0 {
            return self;
        }
        let rx = (x1 - x0 + 1) as f64 / 2.0;
        let ry = (y1 - y0 + 1) as f64 / 2.0;
        let cx = x0 as f64 + rx;
        let cy = y0 as f64 + ry;

        let (Some((sx0, sx1)), Some((sy0, sy1))) = (
            clip_span(x0, x1, self.width),
            clip_span(y0, y1, self.height),
        ) else {
            return self;
        };
        for y in sy0..=sy1 {
            let dy = (y as f64 + 0.5 - cy) / ry;
            for x in sx0..=sx1 {
                let dx = (x as f64 + 0.5 - cx) / rx;
                if dx * dx + dy * dy <= 1.0 {
                    self.mark(x, y);
                }
            }
        }
        self
    }

    /// Even-odd scanline fill sampled at pixel centers.
    pub fn polygon(&mut self, points: &[(i64, i64)]) -> &mut Self {
        if points.len() < 3 {
            return self;
        }
        let min_y = points.iter().map(|p| p.1).min().unwrap_or(0);
        let max_y = points.iter().map(|p| p.1).max().unwrap_or(0);
        let Some((y0, y1)) = clip_span(min_y, max_y, self.height) else {
            return self;
        };

        let edges: Vec<_> = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(&(ax, ay), &(bx, by))| (ax as f64, ay as f64, bx as f64, by as f64))
            .collect();

        let mut crossings: Vec<f64> = Vec::with_capacity(edges.len());
        for y in y0..=y1 {
            let sy = y as f64 + 0.5;
            crossings.clear();
            for &(ax, ay, bx, by) in &edges {
                let (lo, hi) = if ay < by { (ay, by) } else { (by, ay) };
                if sy < lo || sy >= hi {
                    continue;
                }
                crossings.push(ax + (sy - ay) / (by - ay) * (bx - ax));
            }
            crossings.sort_by(|a, b| a.total_cmp(b));

            for pair in crossings.chunks_exact(2) {
                let left = (pair[0] - 0.5).ceil() as i64;
                let right = (pair[1] - 0.5).floor() as i64;
                for x in left..=right {
                    self.mark(x, y);
                }
            }
        }
        self
    }

    pub fn paint(&self, img: &mut RgbaImage, color: Color) {
        let width = self.width as usize;
        for (i, _) in self.covered.iter().enumerate().filter(|(_, c)| **c) {
            blend_pixel(img, (i % width) as i64, (i / width) as i64, color);
        }
    }
}

pub fn fill_rect(img: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
    Coverage::for_image(img).rect(x0, y0, x1, y1).paint(img, color);
}

pub fn fill_ellipse(img: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
    Coverage::for_image(img).ellipse(x0, y0, x1, y1).paint(img, color);
}

pub fn fill_polygon(img: &mut RgbaImage, points: &[(i64, i64)], color: Color) {
    Coverage::for_image(img).polygon(points).paint(img, color);
}
