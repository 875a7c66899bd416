//! Closed polygon shapes in body-local coordinates.

use crate::float::Float;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// A closed polygon described by its vertices around a local origin.
///
/// The last vertex connects back to the first. Shapes are the rest pose of a
/// body: shape matching pulls the point masses toward this outline.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosedShape<F: Float> {
    vertices: AllocVec<Vec2<F>>,
}

impl<F: Float> ClosedShape<F> {
    /// Build from vertices, re-centred so their average sits at the origin.
    pub fn from_vertices(vertices: AllocVec<Vec2<F>>) -> Self {
        let mut shape = ClosedShape { vertices };
        shape.recenter();
        shape
    }

    /// Axis-aligned rectangle of the given full size.
    pub fn rectangle(size: Vec2<F>) -> Self {
        let half = size.scale(F::half());
        ClosedShape::from_vertices(alloc::vec![
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ])
    }

    /// Regular polygon with `points` vertices on a circle of `radius`.
    pub fn circle(radius: F, points: usize) -> Self {
        let step = F::two() * F::pi() / F::from_f32(points as f32);
        let vertices = (0..points)
            .map(|i| {
                let angle = -step * F::from_f32(i as f32);
                Vec2::new(angle.cos() * radius, angle.sin() * radius)
            })
            .collect();
        ClosedShape::from_vertices(vertices)
    }

    pub fn rotated(&self, angle: F) -> Self {
        ClosedShape {
            vertices: self.vertices.iter().map(|v| v.rotate(angle)).collect(),
        }
    }

    /// Scale each axis independently.
    pub fn scaled(&self, scale: Vec2<F>) -> Self {
        ClosedShape {
            vertices: self.vertices.iter().map(|v| v.component_mul(scale)).collect(),
        }
    }

    /// The vertices rotated by `angle` and then moved to `position`.
    pub fn transformed(&self, position: Vec2<F>, angle: F) -> AllocVec<Vec2<F>> {
        self.vertices.iter().map(|v| v.rotate(angle) + position).collect()
    }

    pub fn vertices(&self) -> &[Vec2<F>] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn recenter(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        let n = F::from_f32(self.vertices.len() as f32);
        let mut sum = Vec2::zero();
        for v in &self.vertices {
            sum += *v;
        }
        let center = sum.scale(F::one() / n);
        for v in self.vertices.iter_mut() {
            *v -= center;
        }
    }
}

/// Shoelace area, positive when the vertices wind counter-clockwise in a
/// y-up frame (clockwise on a y-down canvas).
pub fn signed_area<F: Float>(vertices: &[Vec2<F>]) -> F {
    let n = vertices.len();
    if n < 3 {
        return F::zero();
    }
    let mut sum = F::zero();
    for i in 0..n {
        let j = (i + 1) % n;
        sum = sum + vertices[i].cross(vertices[j]);
    }
    sum * F::half()
}

/// Unit normal of the edge `from -> to` pointing away from the polygon
/// interior, given the polygon's signed area.
pub fn outward_normal<F: Float>(from: Vec2<F>, to: Vec2<F>, signed_area: F) -> Vec2<F> {
    let edge = to - from;
    let normal = (-edge.perp()).normalize();
    if signed_area < F::zero() { -normal } else { normal }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_is_centred() {
        let shape = ClosedShape::rectangle(Vec2::new(2.0f64, 4.0));
        assert_eq!(shape.len(), 4);
        assert_eq!(shape.vertices()[0], Vec2::new(-1.0, -2.0));
        assert_eq!(shape.vertices()[2], Vec2::new(1.0, 2.0));
    }

    #[test]
    fn off_centre_vertices_are_recentred() {
        let shape = ClosedShape::from_vertices(alloc::vec![
            Vec2::new(10.0f64, 10.0),
            Vec2::new(12.0, 10.0),
            Vec2::new(11.0, 13.0),
        ]);
        let sum = shape.vertices().iter().fold(Vec2::zero(), |acc, v| acc + *v);
        assert!(sum.length() < 1e-9, "sum = {:?}", sum);
    }

    #[test]
    fn circle_vertices_lie_on_radius() {
        let shape = ClosedShape::circle(2.0f64, 12);
        assert_eq!(shape.len(), 12);
        for v in shape.vertices() {
            assert!((v.length() - 2.0).abs() < 1e-9, "vertex {:?} off the circle", v);
        }
    }

    #[test]
    fn outward_normal_points_away_from_centre() {
        let shape = ClosedShape::rectangle(Vec2::new(2.0f64, 2.0));
        let v = shape.vertices();
        let area = signed_area(v);
        assert!((area.abs() - 4.0).abs() < 1e-9);
        for i in 0..v.len() {
            let j = (i + 1) % v.len();
            let mid = (v[i] + v[j]).scale(0.5);
            let n = outward_normal(v[i], v[j], area);
            assert!(n.dot(mid) > 0.0, "edge {} normal {:?} points inward", i, n);
        }
    }

    #[test]
    fn transformed_moves_and_rotates() {
        let shape = ClosedShape::rectangle(Vec2::new(2.0f64, 2.0));
        let world = shape.transformed(Vec2::new(5.0, 5.0), core::f64::consts::PI);
        // (-1,-1) rotated half a turn is (1,1).
        assert!((world[0].x - 6.0).abs() < 1e-9);
        assert!((world[0].y - 6.0).abs() < 1e-9);
    }
}
