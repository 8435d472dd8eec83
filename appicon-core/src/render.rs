//! Icon Renderer
//!
//! Paints the archive icon (gradient, rounded box, zipper, pull tab, crown
//! and gem) onto a square canvas. Layer order is fixed: later shapes cover
//! earlier ones.

use image::RgbaImage;

use crate::canvas::{fill_ellipse, fill_polygon, fill_rect, Coverage};
use crate::style::{Color, IconStyle};

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static RENDER_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_render_call_count() -> u32 {
    RENDER_CALL_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_render_call_count() {
    RENDER_CALL_COUNT.store(0, Ordering::SeqCst);
}

/// `(n * ratio)` truncated toward zero.
fn frac(n: i64, ratio: f64) -> i64 {
    (n as f64 * ratio) as i64
}

/// Every measurement of the icon for a given side length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconGeometry {
    pub size: i64,
    pub center: i64,
    pub box_left: i64,
    pub box_top: i64,
    pub box_right: i64,
    pub box_bottom: i64,
    pub corner_radius: i64,
    pub tooth_width: i64,
    pub tooth_height: i64,
    pub tooth_step: i64,
    pub zipper_top: i64,
    pub zipper_bottom: i64,
    pub pull_radius: i64,
    pub crown_top: i64,
    pub crown_height: i64,
    pub crown_half_width: i64,
    pub gem_radius: i64,
}

impl IconGeometry {
    pub fn new(size: u32) -> Self {
        let n = size as i64;
        let center = n / 2;

        let box_size = frac(n, 0.5);
        let box_left = center - box_size / 2;
        let box_top = center - box_size / 2 + frac(n, 0.05);

        let zipper_inset = frac(n, 0.08);

        Self {
            size: n,
            center,
            box_left,
            box_top,
            box_right: box_left + box_size,
            box_bottom: box_top + box_size,
            corner_radius: frac(n, 0.05),
            tooth_width: frac(n, 0.08),
            tooth_height: frac(n, 0.04),
            // Below ~17px the step truncates to zero; one pixel keeps the loop finite.
            tooth_step: frac(n, 0.06).max(1),
            zipper_top: box_top + zipper_inset,
            zipper_bottom: box_top + box_size - zipper_inset,
            pull_radius: frac(n, 0.08),
            crown_top: frac(n, 0.12),
            crown_height: frac(n, 0.12),
            crown_half_width: frac(n, 0.25),
            gem_radius: frac(n, 0.025),
        }
    }

    /// Top edge of each tooth, with `true` for the left side.
    pub fn teeth(&self) -> Vec<(i64, bool)> {
        let limit = self.zipper_bottom - self.tooth_height;
        let mut teeth = vec![];
        let mut y = self.zipper_top;
        let mut left = true;
        while y < limit {
            teeth.push((y, left));
            y += self.tooth_step;
            left = !left;
        }
        teeth
    }

    /// Seven-point crown outline, left to right along the silhouette.
    pub fn crown_points(&self) -> [(i64, i64); 7] {
        let left = self.center - self.crown_half_width;
        let right = self.center + self.crown_half_width;
        let base = self.crown_top + self.crown_height;
        let dip = self.crown_top + self.crown_height / 2;
        let inset = self.crown_half_width / 2;
        [
            (left, base),
            (left, dip),
            (left + inset, base),
            (self.center, self.crown_top),
            (right - inset, base),
            (right, dip),
            (right, base),
        ]
    }
}

/// Per-pixel diagonal gradient: `ratio = (x + y) / 2N`.
fn paint_gradient(img: &mut RgbaImage, start: Color, end: Color) {
    let n = img.width() as f64;
    // Color depends only on x + y, so compute each diagonal once.
    let diagonals: Vec<[u8; 4]> = (0..(2 * img.width()).saturating_sub(1))
        .map(|d| start.lerp(end, d as f64 / (2.0 * n)).0)
        .collect();
    for (x, y, px) in img.enumerate_pixels_mut() {
        px.0 = diagonals[(x + y) as usize];
    }
}

/// Two cross strips plus four corner circles, painted as one union.
fn paint_rounded_rect(img: &mut RgbaImage, g: &IconGeometry, fill: Color) {
    let (x1, y1, x2, y2, r) = (g.box_left, g.box_top, g.box_right, g.box_bottom, g.corner_radius);
    Coverage::for_image(img)
        .rect(x1 + r, y1, x2 - r, y2)
        .rect(x1, y1 + r, x2, y2 - r)
        .ellipse(x1, y1, x1 + 2 * r, y1 + 2 * r)
        .ellipse(x2 - 2 * r, y1, x2, y1 + 2 * r)
        .ellipse(x1, y2 - 2 * r, x1 + 2 * r, y2)
        .ellipse(x2 - 2 * r, y2 - 2 * r, x2, y2)
        .paint(img, fill);
}

fn paint_zipper(img: &mut RgbaImage, g: &IconGeometry, style: &IconStyle) {
    let left_fill = style.gradient_start.with_alpha(255);
    let right_fill = style.gradient_end.with_alpha(255);
    for (y, left) in g.teeth() {
        if left {
            fill_rect(img, g.center - g.tooth_width, y, g.center - 2, y + g.tooth_height, left_fill);
        } else {
            fill_rect(img, g.center + 2, y, g.center + g.tooth_width, y + g.tooth_height, right_fill);
        }
    }

    let pull_y = g.zipper_top - g.pull_radius;
    fill_ellipse(
        img,
        g.center - g.pull_radius,
        pull_y,
        g.center + g.pull_radius,
        pull_y + 2 * g.pull_radius,
        style.gold,
    );
}

fn paint_crown(img: &mut RgbaImage, g: &IconGeometry, style: &IconStyle) {
    fill_polygon(img, &g.crown_points(), style.gold);
    fill_ellipse(
        img,
        g.center - g.gem_radius,
        g.crown_top + g.gem_radius,
        g.center + g.gem_radius,
        g.crown_top + 3 * g.gem_radius,
        style.gem,
    );
}

/// Render the icon at `size`×`size`.
pub fn render_icon(size: u32, style: &IconStyle) -> RgbaImage {
    #[cfg(feature = "test-hooks")]
    RENDER_CALL_COUNT.fetch_add(1, Ordering::SeqCst);

    let geometry = IconGeometry::new(size);
    log::debug!("icon geometry for {}px: {:?}", size, geometry);

    let mut img = RgbaImage::new(size, size);
    paint_gradient(&mut img, style.gradient_start, style.gradient_end);
    paint_rounded_rect(&mut img, &geometry, style.box_fill);
    paint_zipper(&mut img, &geometry, style);
    paint_crown(&mut img, &geometry, style);
    img
}
