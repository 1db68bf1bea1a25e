//! Collision detection between the player and falling objects
//!
//! Everything on screen is treated as a point with a shared circular
//! threshold. Objects move a few units per tick against a 50 unit threshold,
//! so a discrete overlap test cannot tunnel.

use glam::Vec2;

use crate::consts::COLLISION_DISTANCE;

/// Check whether two objects collide using the default threshold
#[inline]
pub fn collides(a: Vec2, b: Vec2) -> bool {
    collides_within(a, b, COLLISION_DISTANCE)
}

/// Check whether two centres are strictly closer than `threshold`
#[inline]
pub fn collides_within(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance(b) < threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_close_objects_collide() {
        // distance ~22.4
        let player = Vec2::new(400.0, 500.0);
        let block = Vec2::new(420.0, 510.0);
        assert!(collides(player, block));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let a = Vec2::new(0.0, 0.0);
        assert!(!collides(a, Vec2::new(50.0, 0.0)));
        assert!(collides(a, Vec2::new(49.9, 0.0)));
        assert!(!collides(a, Vec2::new(30.0, 40.0)));
    }

    #[test]
    fn test_custom_threshold() {
        let a = Vec2::new(10.0, 10.0);
        let b = Vec2::new(10.0, 30.0);
        assert!(collides_within(a, b, 25.0));
        assert!(!collides_within(a, b, 20.0));
    }

    proptest! {
        #[test]
        fn collision_is_symmetric(
            ax in -1000.0f32..1000.0,
            ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0,
            by in -1000.0f32..1000.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(collides(a, b), collides(b, a));
        }

        #[test]
        fn object_always_collides_with_itself(x in 0.0f32..800.0, y in 0.0f32..600.0) {
            let p = Vec2::new(x, y);
            prop_assert!(collides(p, p));
        }
    }
}
