//! Billboard sprite projection and depth-buffer occlusion.

use crate::camera::Camera;
use crate::raycast::RenderContext;
use crate::types::{Rgb, Vec2};

/// Entities closer than this along the camera axis are treated as behind it.
const MIN_SPRITE_DEPTH: f64 = 0.1;
/// Guard against a degenerate camera basis before inverting it.
const MIN_BASIS_DET: f64 = 1e-9;

/// A world-space point entity handed to the projector by the simulation. The
/// scale drives the billboard footprint; `v_offset_px` shifts the billboard
/// vertically on screen (pickup bobbing, blood height).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteInstance {
    pub pos: Vec2,
    pub scale: f64,
    pub v_offset_px: f64,
    pub color: Rgb,
}

/// Screen-space projection of one sprite. Column bounds are stored unclipped;
/// `visible_columns` clips and applies the depth test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteProjection {
    /// Camera-space depth; the value compared against the wall depth buffer.
    pub depth: f64,
    pub screen_x: i32,
    pub size: i32,
    pub draw_start_x: i32,
    pub draw_end_x: i32,
    pub draw_start_y: i32,
    pub draw_end_y: i32,
    pub color: Rgb,
}

/// Transform the sprite into camera space via the inverse of the
/// [dir, plane] basis and project it onto the screen. Returns `None` for
/// sprites behind the camera, a degenerate basis, or a zero-size projection.
pub fn project(
    camera: &Camera,
    ctx: &RenderContext,
    instance: &SpriteInstance,
) -> Option<SpriteProjection> {
    let rel = instance.pos.sub(camera.pos);

    let det = camera.plane.x * camera.dir.y - camera.dir.x * camera.plane.y;
    if det.abs() < MIN_BASIS_DET {
        return None;
    }
    let inv_det = 1.0 / det;
    let transform_x = inv_det * (camera.dir.y * rel.x - camera.dir.x * rel.y);
    let transform_y = inv_det * (-camera.plane.y * rel.x + camera.plane.x * rel.y);

    if transform_y <= MIN_SPRITE_DEPTH {
        return None;
    }

    let screen_width = ctx.screen_width as i32;
    let screen_height = ctx.screen_height as i32;

    let screen_x = ((f64::from(screen_width) / 2.0) * (1.0 + transform_x / transform_y)) as i32;
    let size = ((f64::from(screen_height) / transform_y).abs() * instance.scale) as i32;
    if size <= 0 {
        return None;
    }

    let v_shift = instance.v_offset_px as i32;
    let draw_start_y = (-size / 2 + screen_height / 2 + v_shift).max(0);
    let draw_end_y = (size / 2 + screen_height / 2 + v_shift).min(screen_height - 1);

    Some(SpriteProjection {
        depth: transform_y,
        screen_x,
        size,
        draw_start_x: -size / 2 + screen_x,
        draw_end_x: size / 2 + screen_x,
        draw_start_y,
        draw_end_y,
        color: instance.color,
    })
}

/// Screen columns of this sprite that survive clipping and are nearer than
/// the wall already rendered there.
pub fn visible_columns<'a>(
    projection: &'a SpriteProjection,
    ctx: &'a RenderContext,
) -> impl Iterator<Item = usize> + 'a {
    let start = projection.draw_start_x.max(0) as usize;
    let end = projection.draw_end_x.clamp(0, ctx.screen_width as i32) as usize;
    (start..end).filter(move |&column| projection.depth < ctx.depth[column])
}

/// Painter's order: farthest first, so nearer sprites overdraw farther ones
/// sharing the same columns. The depth buffer alone cannot order sprites that
/// are both nearer than the wall.
pub fn sort_back_to_front(projections: &mut [SpriteProjection]) {
    projections.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}
