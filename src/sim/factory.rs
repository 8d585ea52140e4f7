//! Entity factory
//!
//! Pure function of (id, arena, rng). Pass a seeded `Pcg32` for reproducible
//! output.

use glam::Vec2;
use rand::Rng;

use super::state::{Arena, Entity, ShapeKind};
use crate::consts::*;

/// Create a new entity with randomized kind, geometry and placement.
///
/// The returned shape always fits inside `arena`: if the arena is smaller
/// than the drawn size, the size shrinks to the arena's short side.
pub fn create_entity<R: Rng + ?Sized>(id: u32, arena: Arena, rng: &mut R) -> Entity {
    let kind = ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())];

    let size = rng
        .random_range(SHAPE_MIN_SIZE..SHAPE_MAX_SIZE)
        .min(arena.width)
        .min(arena.height);

    let max_x = (arena.width - size).max(0.0);
    let max_y = (arena.height - size).max(0.0);
    let pos = Vec2::new(rng.random_range(0.0..=max_x), rng.random_range(0.0..=max_y));

    let rotation = rng.random_range(0.0..360.0);
    let float_period = rng.random_range(FLOAT_PERIOD_MIN..FLOAT_PERIOD_MAX);

    Entity {
        id,
        kind,
        color: kind.color(),
        size,
        pos,
        rotation,
        float_period,
        pending_destruction: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_entity_fits_arena() {
        let mut rng = Pcg32::seed_from_u64(7);
        let arena = Arena::new(640.0, 480.0);
        for id in 0..500 {
            let e = create_entity(id, arena, &mut rng);
            assert_eq!(e.id, id);
            assert!(arena.contains_square(e.pos, e.size), "entity {id} clips: {e:?}");
            assert!((SHAPE_MIN_SIZE..SHAPE_MAX_SIZE).contains(&e.size));
            assert!((0.0..360.0).contains(&e.rotation));
            assert!((FLOAT_PERIOD_MIN..FLOAT_PERIOD_MAX).contains(&e.float_period));
            assert_eq!(e.color, e.kind.color());
            assert!(!e.pending_destruction);
        }
    }

    #[test]
    fn test_tiny_arena_shrinks_shape() {
        let mut rng = Pcg32::seed_from_u64(3);
        let arena = Arena::new(30.0, 20.0);
        for id in 0..50 {
            let e = create_entity(id, arena, &mut rng);
            assert!(e.size <= 20.0);
            assert!(arena.contains_square(e.pos, e.size));
        }
    }

    #[test]
    fn test_seeded_factory_is_deterministic() {
        let arena = Arena::default();
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for id in 0..20 {
            assert_eq!(create_entity(id, arena, &mut a), create_entity(id, arena, &mut b));
        }
    }

    #[test]
    fn test_all_kinds_eventually_drawn() {
        let mut rng = Pcg32::seed_from_u64(11);
        let arena = Arena::default();
        let mut seen = std::collections::HashSet::new();
        for id in 0..500 {
            seen.insert(create_entity(id, arena, &mut rng).kind);
        }
        assert_eq!(seen.len(), ShapeKind::ALL.len());
    }
}
