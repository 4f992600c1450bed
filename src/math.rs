//! Pure coordinate math, free of Bevy ECS dependencies.
//!
//! Everything here operates on plain `Hex` / `Vec2` / numeric inputs so the
//! grid geometry can be unit-tested without spinning up an `App`.

use bevy::prelude::Vec2;
use hexx::Hex;

/// √3, the horizontal stride factor of a pointy-top hex layout.
const SQRT_3: f32 = 1.732_050_8;

/// Planar position of a hex center in a pointy-top axial layout.
///
/// `x = size·(√3·q + (√3/2)·r)`, `y = size·(1.5·r)`. The visual layout of the
/// board depends on this exact projection, so it is written out here rather
/// than delegated.
pub fn axial_to_planar(hex: Hex, hex_size: f32) -> Vec2 {
    let q = hex.x as f32;
    let r = hex.y as f32;
    Vec2::new(
        hex_size * (SQRT_3 * q + SQRT_3 / 2.0 * r),
        hex_size * (1.5 * r),
    )
}

/// Hex coordinate containing a planar position; inverse of [`axial_to_planar`].
///
/// Applies the inverse projection, then cube-rounds the fractional axial
/// coordinates to the nearest cell. Used by the pointer adapter to turn a
/// click position into a cell coordinate.
pub fn planar_to_axial(pos: Vec2, hex_size: f32) -> Hex {
    let q = (SQRT_3 / 3.0 * pos.x - pos.y / 3.0) / hex_size;
    let r = (2.0 / 3.0 * pos.y) / hex_size;
    axial_round(q, r)
}

/// True iff `b` is one of the six unit-distance neighbors of `a`.
///
/// Exactly the six axial direction vectors
/// `{(+1,0), (+1,-1), (0,-1), (-1,0), (-1,+1), (0,+1)}` — no diagonals, no
/// distance-2 cells, and a hex is never adjacent to itself.
pub fn is_adjacent(a: Hex, b: Hex) -> bool {
    a.all_neighbors().contains(&b)
}

/// Hex size fitted to a viewport: `min(w,h) / (R·4)`, clamped to `[20, 25]`.
pub fn fit_hex_size(viewport_w: f32, viewport_h: f32, radius: u32) -> f32 {
    (viewport_w.min(viewport_h) / (radius as f32 * 4.0)).clamp(20.0, 25.0)
}

/// Rounds fractional axial coordinates to the nearest hex.
///
/// Standard cube rounding: round all three cube components, then recompute
/// the one with the largest rounding error from the other two so the
/// `x + y + z = 0` invariant holds.
fn axial_round(q: f32, r: f32) -> Hex {
    let x = q;
    let z = r;
    let y = -x - z;

    let mut rx = x.round();
    let mut ry = y.round();
    let mut rz = z.round();

    let dx = (rx - x).abs();
    let dy = (ry - y).abs();
    let dz = (rz - z).abs();

    if dx > dy && dx > dz {
        rx = -ry - rz;
    } else if dy > dz {
        ry = -rx - rz;
    } else {
        rz = -rx - ry;
    }

    Hex::new(rx as i32, rz as i32)
}
