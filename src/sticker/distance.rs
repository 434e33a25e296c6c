//! Two-pass chamfer distance transform.
//!
//! Approximates the Euclidean distance from every pixel to the nearest
//! content pixel using integer neighbour weights: a forward raster pass
//! (top-left to bottom-right) propagates distances from the upper/left
//! neighbours, a backward pass (bottom-right to top-left) from the
//! lower/right ones.

use super::mask::ContentMask;

/// Distance assigned to pixels not yet reached.
const UNREACHED: u32 = u32::MAX / 2;

/// Integer step costs of the chamfer kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChamferWeights {
    /// Cost of a horizontal or vertical step.
    pub orthogonal: u32,
    /// Cost of a diagonal step.
    pub diagonal: u32,
}

impl Default for ChamferWeights {
    fn default() -> Self {
        Self {
            orthogonal: 3,
            diagonal: 4,
        }
    }
}

/// Chamfer distances, in weight units, for every pixel of a mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    width: u32,
    height: u32,
    weights: ChamferWeights,
    values: Vec<u32>,
}

impl DistanceField {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw chamfer distance at `(x, y)`.
    pub fn raw(&self, x: u32, y: u32) -> u32 {
        self.values[y as usize * self.width as usize + x as usize]
    }

    /// Distance at `(x, y)` in pixels, i.e. divided by the orthogonal weight.
    ///
    /// Infinite when the mask had no content at all.
    pub fn pixels(&self, x: u32, y: u32) -> f32 {
        let raw = self.raw(x, y);
        if raw >= UNREACHED {
            return f32::INFINITY;
        }
        raw as f32 / self.weights.orthogonal.max(1) as f32
    }
}

/// Runs the two-pass chamfer transform over a content mask.
pub fn chamfer_distance(mask: &ContentMask, weights: ChamferWeights) -> DistanceField {
    let width = mask.width() as usize;
    let height = mask.height() as usize;
    let mut d: Vec<u32> = mask
        .cells()
        .iter()
        .map(|&content| if content { 0 } else { UNREACHED })
        .collect();

    let ortho = weights.orthogonal;
    let diag = weights.diagonal;
    let relax = |d: &mut [u32], at: usize, from: usize, cost: u32| {
        let candidate = d[from].saturating_add(cost);
        if candidate < d[at] {
            d[at] = candidate;
        }
    };

    // Forward: left, upper-left, up, upper-right.
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            if x > 0 {
                relax(&mut d, i, i - 1, ortho);
            }
            if y > 0 {
                let up = i - width;
                relax(&mut d, i, up, ortho);
                if x > 0 {
                    relax(&mut d, i, up - 1, diag);
                }
                if x + 1 < width {
                    relax(&mut d, i, up + 1, diag);
                }
            }
        }
    }

    // Backward: right, lower-right, down, lower-left.
    for y in (0..height).rev() {
        for x in (0..width).rev() {
            let i = y * width + x;
            if x + 1 < width {
                relax(&mut d, i, i + 1, ortho);
            }
            if y + 1 < height {
                let down = i + width;
                relax(&mut d, i, down, ortho);
                if x + 1 < width {
                    relax(&mut d, i, down + 1, diag);
                }
                if x > 0 {
                    relax(&mut d, i, down - 1, diag);
                }
            }
        }
    }

    DistanceField {
        width: mask.width(),
        height: mask.height(),
        weights,
        values: d,
    }
}
