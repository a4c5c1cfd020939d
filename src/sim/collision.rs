//! Box-vs-box collision resolution
//!
//! A moving body that overlaps a solid is pushed out along the axis with the
//! smaller penetration (minimum translation). Which side of the solid was hit
//! decides the velocity response, so that is what gets reported back.

use glam::Vec2;

use super::geom::Aabb;

/// Side of the solid the body ended up against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Body pushed out to the solid's left
    Left,
    /// Body pushed out to the solid's right
    Right,
    /// Body resting on top of the solid
    Top,
    /// Body pushed below the solid (head bump)
    Bottom,
}

impl Side {
    /// True for side hits resolved on the X axis
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

/// Result of resolving one overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    pub side: Side,
    /// Corrected top-left position of the body
    pub position: Vec2,
    /// Midpoint of the touching edge, used to place impact effects
    pub contact: Vec2,
}

/// Penetration depth of `body` into `solid` on each axis.
///
/// Each component is the smaller of the two far-edge overlaps.
pub fn overlap_depth(body: &Aabb, solid: &Aabb) -> Vec2 {
    Vec2::new(
        (body.right() - solid.left()).min(solid.right() - body.left()),
        (body.bottom() - solid.top()).min(solid.bottom() - body.top()),
    )
}

/// Resolve `body` against `solid`, or `None` if they do not overlap.
///
/// Ties between the axes resolve vertically so a body sliding onto a
/// corner lands rather than bouncing off.
pub fn resolve_aabb(body: &Aabb, solid: &Aabb) -> Option<CollisionResult> {
    if !body.intersects(solid) {
        return None;
    }

    let depth = overlap_depth(body, solid);

    if depth.x < depth.y {
        let (side, x) = if body.left() < solid.left() {
            (Side::Left, solid.left() - body.size.x)
        } else {
            (Side::Right, solid.right())
        };
        let contact_x = if side == Side::Left {
            solid.left()
        } else {
            solid.right()
        };
        Some(CollisionResult {
            side,
            position: Vec2::new(x, body.pos.y),
            contact: Vec2::new(contact_x, body.pos.y + body.size.y / 2.0),
        })
    } else if body.top() < solid.top() {
        Some(CollisionResult {
            side: Side::Top,
            position: Vec2::new(body.pos.x, solid.top() - body.size.y),
            contact: Vec2::new(body.pos.x + body.size.x / 2.0, solid.top()),
        })
    } else {
        Some(CollisionResult {
            side: Side::Bottom,
            position: Vec2::new(body.pos.x, solid.bottom()),
            contact: Vec2::new(body.pos.x + body.size.x / 2.0, solid.bottom()),
        })
    }
}

/// Find the first solid a box overlaps
pub fn first_overlap<'a, I>(body: &Aabb, solids: I) -> Option<&'a Aabb>
where
    I: IntoIterator<Item = &'a Aabb>,
{
    solids.into_iter().find(|s| body.intersects(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overlap_no_result() {
        let body = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let solid = Aabb::new(50.0, 0.0, 10.0, 10.0);
        assert_eq!(resolve_aabb(&body, &solid), None);
    }

    #[test]
    fn test_landing_on_top() {
        // Body sunk 5 units into a wide floor
        let body = Aabb::new(100.0, 415.0, 40.0, 40.0);
        let floor = Aabb::new(0.0, 450.0, 800.0, 20.0);

        let hit = resolve_aabb(&body, &floor).unwrap();
        assert_eq!(hit.side, Side::Top);
        assert_eq!(hit.position, Vec2::new(100.0, 410.0));
        assert_eq!(hit.contact, Vec2::new(120.0, 450.0));
    }

    #[test]
    fn test_head_bump() {
        let body = Aabb::new(100.0, 465.0, 40.0, 40.0);
        let ceiling = Aabb::new(0.0, 450.0, 800.0, 20.0);

        let hit = resolve_aabb(&body, &ceiling).unwrap();
        assert_eq!(hit.side, Side::Bottom);
        assert_eq!(hit.position.y, 470.0);
    }

    #[test]
    fn test_side_hits() {
        let wall = Aabb::new(200.0, 0.0, 50.0, 400.0);

        let from_left = resolve_aabb(&Aabb::new(165.0, 100.0, 40.0, 40.0), &wall).unwrap();
        assert_eq!(from_left.side, Side::Left);
        assert_eq!(from_left.position.x, 160.0);
        assert_eq!(from_left.contact, Vec2::new(200.0, 120.0));

        let from_right = resolve_aabb(&Aabb::new(245.0, 100.0, 40.0, 40.0), &wall).unwrap();
        assert_eq!(from_right.side, Side::Right);
        assert_eq!(from_right.position.x, 250.0);
        assert!(from_right.side.is_horizontal());
    }

    #[test]
    fn test_overlap_depth() {
        let body = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let solid = Aabb::new(7.0, 9.0, 100.0, 100.0);
        assert_eq!(overlap_depth(&body, &solid), Vec2::new(3.0, 1.0));
    }

    #[test]
    fn test_first_overlap() {
        let solids = [
            Aabb::new(100.0, 0.0, 10.0, 10.0),
            Aabb::new(0.0, 0.0, 10.0, 10.0),
            Aabb::new(5.0, 0.0, 10.0, 10.0),
        ];
        let body = Aabb::new(2.0, 2.0, 4.0, 4.0);
        assert_eq!(first_overlap(&body, &solids), Some(&solids[1]));
        assert_eq!(first_overlap(&Aabb::new(500.0, 0.0, 1.0, 1.0), &solids), None);
    }
}
