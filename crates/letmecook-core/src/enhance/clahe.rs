//! Contrast-limited adaptive histogram equalization on a single channel.
//!
//! The channel is split into a grid of tiles. Each tile gets its own
//! equalization curve built from a clipped histogram, and every pixel is
//! mapped through a bilinear blend of the curves of the four nearest tile
//! centres so no seams appear at tile borders.

use super::EnhancementSettings;

/// Per-tile lookup tables, `bins` entries per tile, row-major over the grid.
struct TileMappings {
    luts: Vec<f32>,
    bins: usize,
    tiles_x: usize,
}

impl TileMappings {
    #[inline]
    fn lookup(&self, tx: usize, ty: usize, bin: usize) -> f32 {
        self.luts[(ty * self.tiles_x + tx) * self.bins + bin]
    }
}

/// Equalize `values` (normalized to [0,1], row-major `width * height`).
///
/// The caller guarantees that the image is at least one pixel per tile in
/// both axes and that the settings are valid.
pub(super) fn equalize(
    values: &[f32],
    width: usize,
    height: usize,
    settings: &EnhancementSettings,
) -> Vec<f32> {
    let tiles_x = settings.tile_grid.width as usize;
    let tiles_y = settings.tile_grid.height as usize;
    let bins = settings.bin_count as usize;
    debug_assert!(width >= tiles_x && height >= tiles_y);
    debug_assert_eq!(values.len(), width * height);

    let tile_w = width / tiles_x;
    let tile_h = height / tiles_y;

    let mut luts = Vec::with_capacity(tiles_x * tiles_y * bins);
    for ty in 0..tiles_y {
        let y0 = ty * tile_h;
        let y1 = if ty == tiles_y - 1 { height } else { y0 + tile_h };
        for tx in 0..tiles_x {
            let x0 = tx * tile_w;
            let x1 = if tx == tiles_x - 1 { width } else { x0 + tile_w };

            let mut hist = vec![0u32; bins];
            for row in y0..y1 {
                for &v in &values[row * width + x0..row * width + x1] {
                    hist[bin_index(v, bins)] += 1;
                }
            }

            let tile_pixels = ((x1 - x0) * (y1 - y0)) as f32;
            let limit = ((settings.clip_limit * tile_pixels) as u32).max(1);
            clip_histogram(&mut hist, limit);
            luts.extend(cumulative_mapping(&hist));
        }
    }
    let mappings = TileMappings {
        luts,
        bins,
        tiles_x,
    };

    let columns = axis_weights(width, tile_w, tiles_x);
    let rows = axis_weights(height, tile_h, tiles_y);

    let mut out = Vec::with_capacity(values.len());
    for (y, &(ty0, ty1, ay)) in rows.iter().enumerate() {
        for (x, &(tx0, tx1, ax)) in columns.iter().enumerate() {
            let bin = bin_index(values[y * width + x], bins);

            let top = mappings.lookup(tx0, ty0, bin) * (1.0 - ax)
                + mappings.lookup(tx1, ty0, bin) * ax;
            let bottom = mappings.lookup(tx0, ty1, bin) * (1.0 - ax)
                + mappings.lookup(tx1, ty1, bin) * ax;
            out.push(top * (1.0 - ay) + bottom * ay);
        }
    }
    out
}

#[inline]
fn bin_index(value: f32, bins: usize) -> usize {
    ((value.clamp(0.0, 1.0) * bins as f32) as usize).min(bins - 1)
}

/// Clip every bin at `limit` and spread the clipped mass over bins that
/// still have headroom. Mass that fits nowhere (every bin full) is dropped.
fn clip_histogram(hist: &mut [u32], limit: u32) {
    let mut excess: u64 = hist
        .iter()
        .map(|&count| count.saturating_sub(limit) as u64)
        .sum();
    if excess == 0 {
        return;
    }
    for count in hist.iter_mut() {
        *count = (*count).min(limit);
    }

    while excess > 0 {
        let open: Vec<usize> = (0..hist.len()).filter(|&i| hist[i] < limit).collect();
        if open.is_empty() {
            break;
        }

        let share = excess / open.len() as u64;
        if share == 0 {
            // Fewer units than open bins: one unit each, evenly spaced.
            let units = excess as usize;
            for k in 0..units {
                hist[open[k * open.len() / units]] += 1;
            }
            excess = 0;
        } else {
            for &i in &open {
                let add = share.min((limit - hist[i]) as u64);
                hist[i] += add as u32;
                excess -= add;
            }
        }
    }
}

/// Normalized cumulative distribution: bin -> [0,1].
fn cumulative_mapping(hist: &[u32]) -> Vec<f32> {
    let total: u64 = hist.iter().map(|&count| count as u64).sum();
    if total == 0 {
        // Identity for an empty tile.
        let last = (hist.len().max(2) - 1) as f32;
        return (0..hist.len()).map(|i| i as f32 / last).collect();
    }

    let mut running = 0u64;
    hist.iter()
        .map(|&count| {
            running += count as u64;
            running as f32 / total as f32
        })
        .collect()
}

/// For each coordinate along one axis: the two neighbouring tile indices
/// and the blend weight of the second one.
fn axis_weights(len: usize, tile: usize, tiles: usize) -> Vec<(usize, usize, f32)> {
    let last = tiles as i64 - 1;
    (0..len)
        .map(|i| {
            let pos = (i as f32 + 0.5) / tile as f32 - 0.5;
            let base = pos.floor();
            let lo = (base as i64).clamp(0, last) as usize;
            let hi = (base as i64 + 1).clamp(0, last) as usize;
            (lo, hi, pos - base)
        })
        .collect()
}
