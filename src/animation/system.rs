use crate::scene::Scene;
use crate::utils::Time;

/// Animation system.
///
/// Drives every [`AnimationMachine`](crate::animation::AnimationMachine)
/// attached to a scene. Uses the `std::mem::take` technique so machines can
/// mutate the scene's arrangements while being iterated.
pub struct AnimationSystem;

impl AnimationSystem {
    /// Ticks all machines in the scene.
    ///
    /// # Arguments
    /// * `scene` - Scene reference
    /// * `now` - Current animation-clock time
    ///
    /// Returns the total number of state transitions taken.
    pub fn update(scene: &mut Scene, now: Time) -> usize {
        // Temporarily take all machines out to avoid borrow conflicts
        let mut machines = std::mem::take(&mut scene.animations);
        let limit = scene.settings.zero_duration_advance_limit;

        let mut transitions = 0;
        for (_handle, machine) in &mut machines {
            let limit = limit.unwrap_or_else(|| machine.state_count());
            transitions += machine.tick_bounded(now, &mut scene.arrangements, limit);
        }

        // Return machines after update
        scene.animations = machines;
        transitions
    }
}
