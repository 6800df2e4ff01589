use glam::{Vec2, Vec3};

/// World-space ray with a normalized direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Pointer position (relative to the element's top-left corner) to NDC.
///
/// Returns `None` for a degenerate element size.
#[inline]
pub fn pointer_ndc(x: f32, y: f32, width: f32, height: f32) -> Option<Vec2> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0))
}

/// True when `(x, y)` lies within an element of the given size.
#[inline]
pub fn pointer_inside(x: f32, y: f32, width: f32, height: f32) -> bool {
    (0.0..=width).contains(&x) && (0.0..=height).contains(&y)
}

/// Index of the nearest sphere hit by `ray`, if any.
pub fn pick_nearest(
    ray: &Ray,
    centers: impl IntoIterator<Item = (usize, Vec3)>,
    radius: f32,
) -> Option<usize> {
    let mut best = None::<(usize, f32)>;
    for (i, center) in centers {
        if let Some(t) = ray_sphere(ray.origin, ray.dir, center, radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}
