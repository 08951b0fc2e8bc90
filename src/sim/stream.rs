//! Barrier stream: spawning, scrolling and pruning
//!
//! Spawns are counted in ticks, not time, so the horizontal distance between
//! barriers is `speed * spawn_interval`.

use rand_pcg::Pcg32;

use super::barrier::Barrier;
use crate::World;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct BarrierStream {
    /// Live barriers in spawn order (leftmost first)
    barriers: Vec<Barrier>,
    /// Ticks since the stream was last cleared
    tick_counter: u64,
    spawn_interval: u64,
    speed: f32,
    gap: f32,
    world: World,
    rng: Pcg32,
}

impl BarrierStream {
    pub fn new(world: World, tuning: &Tuning, rng: Pcg32) -> Self {
        Self {
            barriers: Vec::new(),
            tick_counter: 0,
            spawn_interval: tuning.spawn_interval.max(1),
            speed: tuning.speed,
            gap: tuning.gap,
            world,
            rng,
        }
    }

    /// Append a barrier just past the right edge of the world
    pub fn spawn(&mut self) {
        let barrier = Barrier::new(&self.world, self.world.width, self.speed, self.gap, &mut self.rng);
        log::debug!(
            "Barrier spawned at tick {} (gap {}..{})",
            self.tick_counter,
            barrier.top_height,
            barrier.bottom_y
        );
        self.barriers.push(barrier);
    }

    /// Advance one tick: scroll, prune, then maybe spawn
    ///
    /// Returns true if a barrier was spawned this tick.
    pub fn update(&mut self) -> bool {
        for barrier in &mut self.barriers {
            barrier.update();
        }
        self.barriers.retain(|b| !b.is_off_screen());

        self.tick_counter += 1;
        if self.tick_counter % self.spawn_interval == 0 {
            self.spawn();
            return true;
        }
        false
    }

    /// Number of barriers the entity cleared since the last call
    ///
    /// Each barrier reports its pass at most once over its lifetime.
    pub fn count_passed(&mut self, entity_x: f32) -> u32 {
        self.barriers
            .iter_mut()
            .map(|b| b.is_passed(entity_x))
            .filter(|&passed| passed)
            .count() as u32
    }

    /// Drop every barrier and restart the spawn counter
    pub fn clear(&mut self) {
        self.barriers.clear();
        self.tick_counter = 0;
    }

    pub fn barriers(&self) -> &[Barrier] {
        &self.barriers
    }

    #[cfg(test)]
    pub(crate) fn barriers_mut(&mut self) -> &mut Vec<Barrier> {
        &mut self.barriers
    }

    pub fn tick_counter(&self) -> u64 {
        self.tick_counter
    }

    pub fn len(&self) -> usize {
        self.barriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.barriers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn stream_with(spawn_interval: u64, speed: f32) -> BarrierStream {
        let tuning = Tuning {
            spawn_interval,
            speed,
            ..Tuning::default()
        };
        BarrierStream::new(World::new(480.0, 700.0), &tuning, Pcg32::seed_from_u64(42))
    }

    #[test]
    fn test_no_second_barrier_before_interval() {
        let mut stream = stream_with(300, 1.0);
        stream.spawn();

        for tick in 1..300 {
            assert!(!stream.update(), "unexpected spawn at tick {tick}");
            assert_eq!(stream.len(), 1);
        }

        assert!(stream.update());
        assert_eq!(stream.tick_counter(), 300);
        assert_eq!(stream.len(), 2);
    }

    #[test]
    fn test_spawn_lands_at_right_edge() {
        let mut stream = stream_with(5, 2.5);
        stream.spawn();
        assert_eq!(stream.barriers()[0].x, 480.0);

        for _ in 0..5 {
            stream.update();
        }
        // Old barrier moved 5 ticks, new one fresh at the edge
        assert_eq!(stream.barriers()[0].x, 480.0 - 12.5);
        assert_eq!(stream.barriers()[1].x, 480.0);
    }

    #[test]
    fn test_prunes_off_screen_and_keeps_order() {
        let mut stream = stream_with(1000, 10.0);
        let world = World::new(480.0, 700.0);
        stream.barriers_mut().push(Barrier::with_top_height(&world, -80.0, 10.0, 180.0, 100.0));
        stream.barriers_mut().push(Barrier::with_top_height(&world, 100.0, 10.0, 180.0, 200.0));
        stream.barriers_mut().push(Barrier::with_top_height(&world, 300.0, 10.0, 180.0, 300.0));

        stream.update();

        assert_eq!(stream.len(), 2);
        assert_eq!(stream.barriers()[0].top_height, 200.0);
        assert_eq!(stream.barriers()[1].top_height, 300.0);
    }

    #[test]
    fn test_pruning_does_not_shift_spawn_cadence() {
        let mut stream = stream_with(10, 100.0);
        stream.spawn();

        let mut spawn_ticks = Vec::new();
        for _ in 0..40 {
            if stream.update() {
                spawn_ticks.push(stream.tick_counter());
            }
        }
        assert_eq!(spawn_ticks, vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_count_passed_is_one_shot() {
        let mut stream = stream_with(1000, 2.5);
        let world = World::new(480.0, 700.0);
        stream.barriers_mut().push(Barrier::with_top_height(&world, 0.0, 2.5, 180.0, 200.0));
        stream.barriers_mut().push(Barrier::with_top_height(&world, 10.0, 2.5, 180.0, 200.0));
        stream.barriers_mut().push(Barrier::with_top_height(&world, 300.0, 2.5, 180.0, 200.0));

        assert_eq!(stream.count_passed(100.0), 2);
        assert_eq!(stream.count_passed(100.0), 0);
        assert_eq!(stream.count_passed(150.0), 0);
    }

    #[test]
    fn test_clear_resets_counter() {
        let mut stream = stream_with(3, 2.5);
        stream.spawn();
        for _ in 0..7 {
            stream.update();
        }
        assert!(!stream.is_empty());

        stream.clear();
        assert!(stream.is_empty());
        assert_eq!(stream.tick_counter(), 0);
    }
}
