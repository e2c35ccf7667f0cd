//! Line traces against actor colliders and static geometry.

use glam::Vec3;
use hecs::{Entity, World};

use shooter_core::components::{Collider, Item, StaticBox};
use shooter_core::constants::SURFACE_TRACE_DEPTH;
use shooter_core::enums::SurfaceType;
use shooter_core::types::Transform;

/// Result of a line trace on the visibility channel.
#[derive(Debug, Clone, PartialEq)]
pub struct HitResult {
    pub blocking_hit: bool,
    pub location: Vec3,
    /// Actor hit; None for static geometry or no hit.
    pub actor: Option<Entity>,
    /// Bone of the shape hit, if it names one.
    pub bone: Option<String>,
    pub surface: SurfaceType,
    pub trace_start: Vec3,
    pub trace_end: Vec3,
}

impl HitResult {
    fn miss(start: Vec3, end: Vec3) -> Self {
        Self {
            blocking_hit: false,
            location: end,
            actor: None,
            bone: None,
            surface: SurfaceType::Default,
            trace_start: start,
            trace_end: end,
        }
    }
}

/// Segment parameter in [0, 1] of the first entry into a sphere.
/// A segment starting inside reports 0.
pub fn segment_sphere(start: Vec3, end: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let d = end - start;
    let oc = start - center;
    let a = d.dot(d);
    let c = oc.dot(oc) - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    if a <= f32::EPSILON {
        return None;
    }
    let b = 2.0 * oc.dot(d);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&t).then_some(t)
}

/// Segment parameter in [0, 1] of the first entry into a box (slab test).
pub fn segment_aabb(start: Vec3, end: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let d = end - start;
    let inv = Vec3::ONE / d;

    let t1 = (min - start) * inv;
    let t2 = (max - start) * inv;
    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax || tmin > 1.0 {
        return None;
    }
    Some(tmin.max(0.0))
}

/// Trace from `start` to `end`, returning the nearest blocking hit.
///
/// Items only block while their state says so; entities in `ignore` never do.
pub fn line_trace(
    world: &World,
    geometry: &[StaticBox],
    start: Vec3,
    end: Vec3,
    ignore: &[Entity],
) -> HitResult {
    let mut best: Option<(f32, Option<Entity>, Option<String>, SurfaceType)> = None;

    for (entity, (transform, collider)) in world.query::<(&Transform, &Collider)>().iter() {
        if ignore.contains(&entity) {
            continue;
        }
        if let Ok(item) = world.get::<&Item>(entity) {
            if !item.properties().blocks_visibility {
                continue;
            }
        }
        for shape in &collider.shapes {
            let center = transform.location + shape.offset;
            if let Some(t) = segment_sphere(start, end, center, shape.radius) {
                if best.as_ref().map_or(true, |(bt, ..)| t < *bt) {
                    best = Some((t, Some(entity), shape.bone.clone(), SurfaceType::Default));
                }
            }
        }
    }

    for b in geometry {
        if let Some(t) = segment_aabb(start, end, b.min, b.max) {
            if best.as_ref().map_or(true, |(bt, ..)| t < *bt) {
                best = Some((t, None, None, b.surface));
            }
        }
    }

    match best {
        Some((t, actor, bone, surface)) => HitResult {
            blocking_hit: true,
            location: start + (end - start) * t,
            actor,
            bone,
            surface,
            trace_start: start,
            trace_end: end,
        },
        None => HitResult::miss(start, end),
    }
}

/// Physical surface below `from`. Default when nothing is within reach.
pub fn surface_type(geometry: &[StaticBox], from: Vec3) -> SurfaceType {
    let end = from - Vec3::new(0.0, 0.0, SURFACE_TRACE_DEPTH);
    geometry
        .iter()
        .filter_map(|b| segment_aabb(from, end, b.min, b.max).map(|t| (t, b.surface)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, surface)| surface)
        .unwrap_or_default()
}
