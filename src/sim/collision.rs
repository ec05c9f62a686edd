//! Proximity collisions between targets
//!
//! Not a physical response: two targets whose centers come within the
//! threshold simply trade speed and heading.

use super::target::Target;

/// Whole-pixel distance between two target centers (truncated)
#[inline]
pub fn center_distance(a: &Target, b: &Target) -> i32 {
    (a.center - b.center).as_vec2().length() as i32
}

/// Swap velocities of every active pair within `(w, h)` of each other.
///
/// Pairs `(i, j)` with `i < j` are visited once each, in index order, so a
/// target may swap several times in one pass as later pairs see the values
/// left by earlier ones. Returns the number of swaps.
pub fn resolve_collisions(targets: &mut [Target], w: i32, h: i32) -> usize {
    let mut swaps = 0;
    let n = targets.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = targets.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];
            if !a.active || !b.active {
                continue;
            }

            let distance = center_distance(a, b);
            if distance <= w || distance <= h {
                a.swap_velocity(b);
                swaps += 1;
                log::debug!("Collision {} <-> {} at distance {}", i, j, distance);
            }
        }
    }

    swaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn target_centered(cx: i32, cy: i32, speed: f32, heading: f32) -> Target {
        let mut rng = Pcg32::seed_from_u64(0);
        let size = IVec2::new(20, 20);
        let mut t = Target::new(
            IVec2::new(cx, cy) - size / 2,
            0.0,
            0.0,
            IVec2::new(640, 480),
            size,
            &mut rng,
        );
        t.center_origin();
        t.speed = speed;
        t.heading = heading;
        t
    }

    #[test]
    fn test_coincident_pair_swaps_once() {
        let mut targets = vec![
            target_centered(100, 100, 5.0, 1.0),
            target_centered(100, 100, 9.0, 4.0),
        ];
        let swaps = resolve_collisions(&mut targets, 20, 20);

        assert_eq!(swaps, 1);
        assert_eq!((targets[0].speed, targets[0].heading()), (9.0, 4.0));
        assert_eq!((targets[1].speed, targets[1].heading()), (5.0, 1.0));
    }

    #[test]
    fn test_distant_pair_untouched() {
        let mut targets = vec![
            target_centered(100, 100, 5.0, 1.0),
            target_centered(300, 300, 9.0, 4.0),
        ];
        assert_eq!(resolve_collisions(&mut targets, 20, 20), 0);
        assert_eq!((targets[0].speed, targets[0].heading), (5.0, 1.0));
        assert_eq!((targets[1].speed, targets[1].heading), (9.0, 4.0));
    }

    #[test]
    fn test_threshold_uses_either_dimension() {
        // 30 px apart: outside w=20 but inside h=30
        let mut targets = vec![
            target_centered(100, 100, 5.0, 1.0),
            target_centered(130, 100, 9.0, 4.0),
        ];
        assert_eq!(resolve_collisions(&mut targets, 20, 30), 1);

        // 31.6 px truncates to 31
        let mut targets = vec![
            target_centered(100, 100, 5.0, 1.0),
            target_centered(130, 110, 9.0, 4.0),
        ];
        assert_eq!(resolve_collisions(&mut targets, 31, 10), 1);
        assert_eq!(resolve_collisions(&mut targets, 30, 10), 0);
    }

    #[test]
    fn test_inactive_targets_skipped() {
        let mut targets = vec![
            target_centered(100, 100, 5.0, 1.0),
            target_centered(100, 100, 9.0, 4.0),
        ];
        targets[1].active = false;
        assert_eq!(resolve_collisions(&mut targets, 20, 20), 0);
        assert_eq!(targets[0].speed, 5.0);
    }

    #[test]
    fn test_triangular_sweep_visits_each_pair() {
        // Three coincident targets: pairs (0,1), (0,2), (1,2)
        let mut targets = vec![
            target_centered(50, 50, 1.0, 0.1),
            target_centered(50, 50, 2.0, 0.2),
            target_centered(50, 50, 3.0, 0.3),
        ];
        assert_eq!(resolve_collisions(&mut targets, 10, 10), 3);
        // (0,1): [2,1,3]; (0,2): [3,1,2]; (1,2): [3,2,1]
        let speeds: Vec<f32> = targets.iter().map(|t| t.speed).collect();
        assert_eq!(speeds, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(resolve_collisions(&mut [], 10, 10), 0);
        let mut one = vec![target_centered(10, 10, 1.0, 0.0)];
        assert_eq!(resolve_collisions(&mut one, 10, 10), 0);
    }
}
