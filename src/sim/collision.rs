//! Narrow phase, elastic response and wall reflection
//!
//! Radius doubles as mass. Contacts are frictionless: only the velocity
//! components along the line of centers are exchanged.

use glam::Vec2;

use super::ball::Ball;

/// What `resolve_ball_collision` did with a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Velocities were exchanged along the normal
    Resolved,
    /// Already moving apart along the normal, left untouched
    Separating,
    /// Centers coincide so there is no normal, left untouched
    Degenerate,
}

/// Exact overlap test: center distance <= sum of radii (tangent counts)
pub fn balls_interact(a: &Ball, b: &Ball) -> bool {
    let dist = (b.center() - a.center()).length();
    dist <= a.radius + b.radius
}

/// Elastic collision between two touching balls
///
/// Writes back the new direction and speed of both balls unless they are
/// already separating or their centers coincide.
pub fn resolve_ball_collision(a: &mut Ball, b: &mut Ball) -> ContactOutcome {
    let delta = b.center() - a.center();
    let len = delta.length();
    if len < f32::EPSILON {
        return ContactOutcome::Degenerate;
    }
    let normal = delta / len;

    // Normal speeds
    let p1 = a.velocity().dot(normal);
    let p2 = b.velocity().dot(normal);
    if p1 < 0.0 && p2 > 0.0 {
        return ContactOutcome::Separating;
    }

    // 1D elastic exchange along the normal
    let (m1, m2) = (a.radius, b.radius);
    let masses = m1 + m2;
    let u1 = 2.0 * m2 * p2 / masses + (m1 - m2) * p1 / masses;
    let u2 = 2.0 * m1 * p1 / masses + (m2 - m1) * p2 / masses;

    // Tangential speeds pass through unchanged
    let tangent = Vec2::new(normal.y, -normal.x);
    let t1 = a.velocity().dot(tangent);
    let t2 = b.velocity().dot(tangent);

    apply_velocity(a, normal * u1 + tangent * t1);
    apply_velocity(b, normal * u2 + tangent * t2);

    ContactOutcome::Resolved
}

/// Split a velocity into speed and unit direction
///
/// A ball brought to rest keeps its old direction.
fn apply_velocity(ball: &mut Ball, velocity: Vec2) {
    let speed = velocity.length();
    if speed > f32::EPSILON {
        ball.dir = velocity / speed;
        ball.speed = speed;
    } else {
        ball.speed = 0.0;
    }
}

/// Force direction inward on any axis where the ball touches a wall
///
/// Only position is checked, so a ball already heading inward is left
/// heading inward. Position is never clamped. Returns whether any wall
/// condition fired.
pub fn bounce_off_walls(ball: &mut Ball, arena: Vec2) -> bool {
    let far = arena - Vec2::splat(2.0 * ball.radius);
    let mut touched = false;

    if ball.pos.y <= 0.0 {
        ball.dir.y = ball.dir.y.abs();
        touched = true;
    }
    if ball.pos.x <= 0.0 {
        ball.dir.x = ball.dir.x.abs();
        touched = true;
    }
    if ball.pos.y >= far.y {
        ball.dir.y = -ball.dir.y.abs();
        touched = true;
    }
    if ball.pos.x >= far.x {
        ball.dir.x = -ball.dir.x.abs();
        touched = true;
    }

    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball_at_center(center: Vec2, dir: Vec2, radius: f32, speed: f32) -> Ball {
        Ball::new(center - Vec2::splat(radius), dir, radius, speed)
    }

    fn head_on_pair() -> (Ball, Ball) {
        let a = ball_at_center(Vec2::new(100.0, 100.0), Vec2::X, 10.0, 60.0);
        let b = ball_at_center(Vec2::new(119.0, 100.0), -Vec2::X, 10.0, 60.0);
        (a, b)
    }

    #[test]
    fn test_interact_overlap_tangent_and_miss() {
        let (a, b) = head_on_pair();
        assert!(balls_interact(&a, &b));

        let tangent = ball_at_center(Vec2::new(120.0, 100.0), Vec2::X, 10.0, 0.0);
        assert!(balls_interact(&a, &tangent));

        let apart = ball_at_center(Vec2::new(120.5, 100.0), Vec2::X, 10.0, 0.0);
        assert!(!balls_interact(&a, &apart));
    }

    #[test]
    fn test_head_on_equal_masses_swap_normal_velocity() {
        let (mut a, mut b) = head_on_pair();
        let outcome = resolve_ball_collision(&mut a, &mut b);
        assert_eq!(outcome, ContactOutcome::Resolved);

        assert!((a.dir - -Vec2::X).length() < 1e-5);
        assert!((b.dir - Vec2::X).length() < 1e-5);
        assert!((a.speed - 60.0).abs() < 1e-3);
        assert!((b.speed - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_glancing_contact_keeps_tangential_component() {
        // b sits diagonally below-right of a, a moves straight right
        let mut a = ball_at_center(Vec2::new(100.0, 100.0), Vec2::X, 10.0, 60.0);
        let mut b = ball_at_center(Vec2::new(114.0, 114.0), Vec2::X, 10.0, 0.0);
        let normal = (b.center() - a.center()).normalize();
        let tangent = Vec2::new(normal.y, -normal.x);
        let before_t = a.velocity().dot(tangent);

        assert_eq!(resolve_ball_collision(&mut a, &mut b), ContactOutcome::Resolved);
        assert!((a.velocity().dot(tangent) - before_t).abs() < 1e-3);
        // Equal masses: a gives up all of its normal speed to b
        assert!(a.velocity().dot(normal).abs() < 1e-3);
        assert!((b.velocity().dot(normal) - 60.0 * normal.x).abs() < 1e-3);
    }

    #[test]
    fn test_moving_ball_stopped_keeps_unit_direction() {
        let mut a = ball_at_center(Vec2::new(100.0, 100.0), Vec2::X, 10.0, 60.0);
        let mut b = ball_at_center(Vec2::new(119.0, 100.0), Vec2::X, 10.0, 0.0);
        assert_eq!(resolve_ball_collision(&mut a, &mut b), ContactOutcome::Resolved);
        assert!(a.speed.abs() < 1e-3);
        assert!((a.dir.length() - 1.0).abs() < 1e-5);
        assert!((b.speed - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_heavier_ball_barely_slows() {
        let mut a = ball_at_center(Vec2::new(100.0, 100.0), Vec2::X, 20.0, 60.0);
        let mut b = ball_at_center(Vec2::new(129.0, 100.0), Vec2::X, 10.0, 0.0);
        resolve_ball_collision(&mut a, &mut b);
        // u1 = (20 - 10) / 30 * 60 = 20, u2 = 40 / 30 * 60 = 80
        assert!((a.speed - 20.0).abs() < 1e-3);
        assert!((b.speed - 80.0).abs() < 1e-3);
    }

    #[test]
    fn test_separating_pair_is_untouched() {
        let mut a = ball_at_center(Vec2::new(100.0, 100.0), -Vec2::X, 10.0, 60.0);
        let mut b = ball_at_center(Vec2::new(119.0, 100.0), Vec2::X, 12.0, 80.0);
        let (a0, b0) = (a, b);
        assert_eq!(resolve_ball_collision(&mut a, &mut b), ContactOutcome::Separating);
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn test_coincident_centers_are_skipped() {
        let mut a = ball_at_center(Vec2::new(50.0, 50.0), Vec2::X, 10.0, 60.0);
        let mut b = ball_at_center(Vec2::new(50.0, 50.0), Vec2::Y, 10.0, 60.0);
        let (a0, b0) = (a, b);
        assert_eq!(resolve_ball_collision(&mut a, &mut b), ContactOutcome::Degenerate);
        assert_eq!(a, a0);
        assert_eq!(b, b0);
        assert!(a.dir.is_finite() && b.dir.is_finite());
    }

    #[test]
    fn test_left_wall_flips_x_only() {
        let mut ball = Ball::new(Vec2::new(0.0, 50.0), -Vec2::X, 10.0, 60.0);
        assert!(bounce_off_walls(&mut ball, Vec2::new(1024.0, 768.0)));
        assert_eq!(ball.dir, Vec2::X);
    }

    #[test]
    fn test_wall_reflection_is_idempotent_when_heading_inward() {
        let dir = Vec2::new(0.6, -0.8);
        let mut ball = Ball::new(Vec2::new(0.0, 50.0), dir, 10.0, 60.0);
        assert!(bounce_off_walls(&mut ball, Vec2::new(1024.0, 768.0)));
        assert!((ball.dir - dir).length() < 1e-6);
    }

    #[test]
    fn test_far_corner_flips_both_axes() {
        let arena = Vec2::new(200.0, 100.0);
        let dir = Vec2::new(1.0, 1.0).normalize();
        let mut ball = Ball::new(Vec2::new(181.0, 81.0), dir, 10.0, 60.0);
        assert!(bounce_off_walls(&mut ball, arena));
        assert!(ball.dir.x < 0.0 && ball.dir.y < 0.0);
        assert!((ball.dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_interior_ball_is_untouched() {
        let dir = Vec2::new(-0.6, 0.8);
        let mut ball = Ball::new(Vec2::new(300.0, 300.0), dir, 10.0, 60.0);
        assert!(!bounce_off_walls(&mut ball, Vec2::new(1024.0, 768.0)));
        assert_eq!(ball.dir, dir);
    }

    fn contact_pair() -> impl Strategy<Value = (Ball, Ball)> {
        (
            10.0f32..20.0,
            10.0f32..20.0,
            0.0f32..std::f32::consts::TAU,
            0.1f32..0.99,
            0.0f32..std::f32::consts::TAU,
            0.0f32..std::f32::consts::TAU,
            0.0f32..120.0,
            0.0f32..120.0,
        )
            .prop_map(|(r1, r2, contact_angle, overlap, a1, a2, s1, s2)| {
                let c1 = Vec2::new(500.0, 400.0);
                let c2 = c1 + crate::direction_from_angle(contact_angle) * (r1 + r2) * overlap;
                let a = ball_at_center(c1, crate::direction_from_angle(a1), r1, s1);
                let b = ball_at_center(c2, crate::direction_from_angle(a2), r2, s2);
                (a, b)
            })
    }

    proptest! {
        #[test]
        fn prop_direction_stays_unit((mut a, mut b) in contact_pair()) {
            resolve_ball_collision(&mut a, &mut b);
            prop_assert!((a.dir.length() - 1.0).abs() < 1e-4);
            prop_assert!((b.dir.length() - 1.0).abs() < 1e-4);
            prop_assert!(a.speed >= 0.0 && b.speed >= 0.0);
        }

        #[test]
        fn prop_resolution_is_order_independent((a, b) in contact_pair()) {
            let (mut a1, mut b1) = (a, b);
            let (mut a2, mut b2) = (a, b);
            let forward = resolve_ball_collision(&mut a1, &mut b1);
            let swapped = resolve_ball_collision(&mut b2, &mut a2);
            prop_assert_eq!(forward, swapped);

            let tol = 1e-3 * (1.0 + a.speed + b.speed);
            prop_assert!((a1.velocity() - a2.velocity()).length() < tol);
            prop_assert!((b1.velocity() - b2.velocity()).length() < tol);
        }

        #[test]
        fn prop_elastic_collision_conserves_momentum((mut a, mut b) in contact_pair()) {
            let before = a.velocity() * a.radius + b.velocity() * b.radius;
            let scale = a.speed * a.radius + b.speed * b.radius;
            resolve_ball_collision(&mut a, &mut b);
            let after = a.velocity() * a.radius + b.velocity() * b.radius;
            prop_assert!((before - after).length() < 1e-3 * (1.0 + scale));
        }
    }
}
