//! Visibility ordering - painter's algorithm over projected triangles
//!
//! Each triangle gets the depth key `|z0 + z1 + z2|` from the view-space
//! depths of its projected vertices. Triangles are drawn in descending key
//! order (farthest first), so nearer faces overwrite farther ones.
//!
//! The sort is stable: equal keys keep build order.
//!
//! The key is a centroid-depth approximation. Interpenetrating triangles, or
//! triangles whose vertices span very different depths, can be misordered.
//! Heightfields with bounded local slope render correctly in practice.

use glam::Vec3;

/// Depth key of one triangle.
#[inline]
pub fn depth_key(tri: [u32; 3], projected: &[Vec3]) -> f32 {
    let z = |i: u32| projected[i as usize].z;
    (z(tri[0]) + z(tri[1]) + z(tri[2])).abs()
}

/// Depth keys for every triangle, in build order.
pub fn depth_keys(triangles: &[[u32; 3]], projected: &[Vec3]) -> Vec<f32> {
    triangles.iter().map(|&t| depth_key(t, projected)).collect()
}

/// Stable back-to-front sort of triangle indices by their keys.
///
/// Sorting an already sorted order returns it unchanged.
pub fn sort_back_to_front(order: &mut [u32], keys: &[f32]) {
    order.sort_by(|&a, &b| keys[b as usize].total_cmp(&keys[a as usize]));
}

/// Painter's order for `triangles`, computed from the current projection.
pub fn back_to_front(triangles: &[[u32; 3]], projected: &[Vec3]) -> Vec<u32> {
    let keys = depth_keys(triangles, projected);
    let mut order: Vec<u32> = (0..triangles.len() as u32).collect();
    sort_back_to_front(&mut order, &keys);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_depth(z: f32) -> [Vec3; 3] {
        [Vec3::new(0.0, 0.0, z / 3.0); 3]
    }

    #[test]
    fn farthest_first() {
        let mut projected = Vec::new();
        for z in [-5.0, -10.0, -2.0] {
            projected.extend(at_depth(z));
        }
        let tris = [[0, 1, 2], [3, 4, 5], [6, 7, 8]];
        assert_eq!(back_to_front(&tris, &projected), vec![1, 0, 2]);
    }

    #[test]
    fn equal_keys_keep_build_order() {
        let keys = [1.0, 3.0, 1.0, 3.0, 1.0];
        let mut order = vec![0, 1, 2, 3, 4];
        sort_back_to_front(&mut order, &keys);
        assert_eq!(order, vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn resorting_is_idempotent() {
        let keys = [0.5, 7.0, 2.0, 7.0, 0.1, 2.0];
        let mut order: Vec<u32> = (0..keys.len() as u32).collect();
        sort_back_to_front(&mut order, &keys);
        let once = order.clone();
        sort_back_to_front(&mut order, &keys);
        assert_eq!(order, once);
    }

    #[test]
    fn key_is_absolute_sum() {
        let projected = [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(0.0, 0.0, 0.5),
        ];
        assert!((depth_key([0, 1, 2], &projected) - 2.5).abs() < 1e-6);
    }
}
