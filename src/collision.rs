//! Body/body penetration detection and response.

use crate::body::Body;
use crate::config::WorldConfig;
use crate::float::Float;
use crate::shape::{outward_normal, signed_area};
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Aabb<F: Float> {
    pub min: Vec2<F>,
    pub max: Vec2<F>,
}

impl<F: Float> Aabb<F> {
    pub fn from_points(points: impl Iterator<Item = Vec2<F>>) -> Self {
        let mut iter = points;
        let Some(first) = iter.next() else {
            return Aabb::default();
        };
        iter.fold(Aabb { min: first, max: first }, |acc, p| Aabb {
            min: Vec2::new(acc.min.x.min(p.x), acc.min.y.min(p.y)),
            max: Vec2::new(acc.max.x.max(p.x), acc.max.y.max(p.y)),
        })
    }

    pub fn intersects(&self, other: &Aabb<F>) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn contains(&self, p: Vec2<F>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// A point of body `a` found inside body `b`, with the edge of `b` it
/// should be pushed out through.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact<F: Float> {
    pub body_a: usize,
    pub point: usize,
    pub body_b: usize,
    pub edge_start: usize,
    pub edge_end: usize,
    /// Position of the hit along the edge, 0 at `edge_start`.
    pub edge_t: F,
    /// Outward normal of the edge on body `b`.
    pub normal: Vec2<F>,
    pub penetration: F,
}

/// Collect contacts for every point of `a` that lies inside `b`.
///
/// Each intruding point is matched to the nearest edge of `b` that faces it
/// (edge normal opposing the point's own outward normal). When no edge faces
/// it, the nearest edge overall is used.
pub fn detect<F: Float>(
    a_index: usize,
    a: &Body<F>,
    b_index: usize,
    b: &Body<F>,
    penetration_threshold: F,
    out: &mut AllocVec<Contact<F>>,
) {
    let b_points = b.points();
    let n = b_points.len();
    if n < 3 {
        return;
    }
    let b_positions: AllocVec<Vec2<F>> = b_points.iter().map(|p| p.position).collect();
    let b_area = signed_area(&b_positions);
    let a_positions: AllocVec<Vec2<F>> = a.points().iter().map(|p| p.position).collect();
    let a_area = signed_area(&a_positions);

    for (i, &p) in a_positions.iter().enumerate() {
        if !b.aabb().contains(p) || !b.contains(p) {
            continue;
        }
        let point_normal = vertex_normal(&a_positions, i, a_area);

        let mut nearest: Option<EdgeHit<F>> = None;
        let mut facing: Option<EdgeHit<F>> = None;
        for s in 0..n {
            let e = (s + 1) % n;
            let (t, dist_sq) = closest_on_segment(p, b_positions[s], b_positions[e]);
            let hit = EdgeHit {
                start: s,
                end: e,
                t,
                dist_sq,
                normal: outward_normal(b_positions[s], b_positions[e], b_area),
            };
            if nearest.map_or(true, |h| dist_sq < h.dist_sq) {
                nearest = Some(hit);
            }
            if hit.normal.dot(point_normal) <= F::zero()
                && facing.map_or(true, |h| dist_sq < h.dist_sq)
            {
                facing = Some(hit);
            }
        }
        let Some(hit) = facing.or(nearest) else {
            continue;
        };
        let penetration = hit.dist_sq.sqrt();
        if penetration > penetration_threshold {
            continue;
        }
        out.push(Contact {
            body_a: a_index,
            point: i,
            body_b: b_index,
            edge_start: hit.start,
            edge_end: hit.end,
            edge_t: hit.t,
            normal: hit.normal,
            penetration,
        });
    }
}

#[derive(Copy, Clone)]
struct EdgeHit<F: Float> {
    start: usize,
    end: usize,
    t: F,
    dist_sq: F,
    normal: Vec2<F>,
}

/// Outward normal at vertex `i`, averaged from its two adjacent edges.
/// Zero for outlines with fewer than three vertices.
fn vertex_normal<F: Float>(positions: &[Vec2<F>], i: usize, area: F) -> Vec2<F> {
    let n = positions.len();
    if n < 3 {
        return Vec2::zero();
    }
    let prev = positions[(i + n - 1) % n];
    let next = positions[(i + 1) % n];
    let p = positions[i];
    (outward_normal(prev, p, area) + outward_normal(p, next, area)).normalize()
}

fn closest_on_segment<F: Float>(p: Vec2<F>, a: Vec2<F>, b: Vec2<F>) -> (F, F) {
    let ab = b - a;
    let len_sq = ab.length_sq();
    let t = if len_sq.is_near_zero(F::from_f32(1e-12)) {
        F::zero()
    } else {
        ((p - a).dot(ab) / len_sq).clamp(F::zero(), F::one())
    };
    let hit = a + ab.scale(t);
    (t, p.distance_sq(hit))
}

/// Inverse-mass split of one contact. The edge acts as a single mass equal
/// to the sum of its two endpoints, infinite when either is immovable.
#[derive(Copy, Clone)]
struct MassSplit<F: Float> {
    inv_a: F,
    inv_b: F,
    inv_total: F,
    wa: F,
    wb: F,
}

impl<F: Float> MassSplit<F> {
    fn of(bodies: &[Body<F>], c: &Contact<F>) -> Option<Self> {
        let pa = &bodies[c.body_a].points()[c.point];
        let b_points = bodies[c.body_b].points();
        let (b1, b2) = (&b_points[c.edge_start], &b_points[c.edge_end]);
        let inv_b = if b1.is_immovable() || b2.is_immovable() {
            F::zero()
        } else {
            F::one() / (b1.mass + b2.mass)
        };
        let inv_total = pa.inv_mass + inv_b;
        if inv_total.is_near_zero(F::from_f32(1e-12)) {
            return None;
        }
        Some(MassSplit {
            inv_a: pa.inv_mass,
            inv_b,
            inv_total,
            wa: F::one() - c.edge_t,
            wb: c.edge_t,
        })
    }
}

/// Keep one contact per intruding point: the deepest.
fn deepest_per_point<F: Float>(contacts: &[Contact<F>]) -> AllocVec<Contact<F>> {
    let mut kept: AllocVec<Contact<F>> = AllocVec::with_capacity(contacts.len());
    for c in contacts.iter().filter(|c| c.body_a != c.body_b) {
        match kept.iter_mut().find(|k| k.body_a == c.body_a && k.point == c.point) {
            Some(k) if c.penetration > k.penetration => *k = *c,
            Some(_) => {}
            None => kept.push(*c),
        }
    }
    kept
}

/// Push penetrating points out and reflect their relative velocity.
///
/// Each intruding point is resolved once, against its deepest contact.
/// Position corrections are gathered first and every point moves by the
/// average of the corrections it received, so an edge touched by several
/// points is not pushed once per contact. Velocities change only for
/// contacts that are still closing.
pub fn resolve<F: Float>(bodies: &mut [Body<F>], contacts: &[Contact<F>], config: &WorldConfig<F>) {
    let contacts = deepest_per_point(contacts);
    if contacts.is_empty() {
        return;
    }

    let mut offsets = AllocVec::with_capacity(bodies.len());
    let mut total = 0;
    for body in bodies.iter() {
        offsets.push(total);
        total += body.point_count();
    }
    let mut moves: AllocVec<(Vec2<F>, u32)> = alloc::vec![(Vec2::zero(), 0); total];
    let mut add_move = |slot: usize, delta: Vec2<F>| {
        let entry = &mut moves[slot];
        entry.0 += delta;
        entry.1 += 1;
    };

    for c in &contacts {
        let Some(split) = MassSplit::of(bodies, c) else {
            continue;
        };
        let push = c.normal.scale(c.penetration);
        if split.inv_a > F::zero() {
            add_move(offsets[c.body_a] + c.point, push.scale(split.inv_a / split.inv_total));
        }
        let edge_push = push.scale(split.inv_b / split.inv_total);
        for (idx, w) in [(c.edge_start, split.wa), (c.edge_end, split.wb)] {
            if split.inv_b > F::zero() && w > F::zero() {
                add_move(offsets[c.body_b] + idx, -edge_push.scale(w));
            }
        }
    }

    for (body, &offset) in bodies.iter_mut().zip(offsets.iter()) {
        for (i, p) in body.points_mut().iter_mut().enumerate() {
            let (delta, count) = moves[offset + i];
            if count > 0 {
                p.position += delta.scale(F::one() / F::from_f32(count as f32));
            }
        }
    }

    let one = F::one();
    for c in &contacts {
        let Some(split) = MassSplit::of(bodies, c) else {
            continue;
        };
        let (a, b) = pair_mut(bodies, c.body_a, c.body_b);
        let b_points = b.points();
        let edge_velocity = b_points[c.edge_start].velocity.scale(split.wa)
            + b_points[c.edge_end].velocity.scale(split.wb);
        let relative = a.points()[c.point].velocity - edge_velocity;
        let closing = relative.dot(c.normal);
        if closing >= F::zero() {
            continue;
        }
        let tangent = relative - c.normal.scale(closing);
        let impulse = c.normal.scale(-(one + config.elasticity) * closing / split.inv_total);
        let friction = tangent.scale(config.friction / split.inv_total);
        let change = impulse - friction;

        a.points_mut()[c.point].velocity += change.scale(split.inv_a);
        let b_points = b.points_mut();
        for (idx, w) in [(c.edge_start, split.wa), (c.edge_end, split.wb)] {
            b_points[idx].velocity -= change.scale(split.inv_b * w);
        }
    }
}

fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert!(a != b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
