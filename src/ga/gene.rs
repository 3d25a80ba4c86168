//! A single activity assignment.

use super::operators::resample_other;
use crate::catalog::{ActivityId, Catalog, FacilitatorId, RoomId, SlotId};
use rand::Rng;

/// One activity's (room, time slot, facilitator) assignment.
///
/// The activity is fixed at creation; room, time, and facilitator mutate
/// independently. `Gene` is `Copy`: every copy is a full, independent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gene {
    activity: ActivityId,
    room: RoomId,
    time: SlotId,
    facilitator: FacilitatorId,
}

impl Gene {
    /// Creates a gene with an explicit assignment.
    pub fn new(activity: ActivityId, room: RoomId, time: SlotId, facilitator: FacilitatorId) -> Self {
        Self {
            activity,
            room,
            time,
            facilitator,
        }
    }

    /// Creates a gene for `activity` with a uniformly random assignment.
    pub fn random<R: Rng>(activity: ActivityId, catalog: &Catalog, rng: &mut R) -> Self {
        Self {
            activity,
            room: RoomId(rng.random_range(0..catalog.room_count())),
            time: SlotId(rng.random_range(0..catalog.time_slot_count())),
            facilitator: FacilitatorId(rng.random_range(0..catalog.facilitator_count())),
        }
    }

    #[inline]
    pub fn activity(&self) -> ActivityId {
        self.activity
    }

    #[inline]
    pub fn room(&self) -> RoomId {
        self.room
    }

    #[inline]
    pub fn time(&self) -> SlotId {
        self.time
    }

    #[inline]
    pub fn facilitator(&self) -> FacilitatorId {
        self.facilitator
    }

    /// Moves the activity to a different, uniformly chosen room.
    pub fn mutate_room<R: Rng>(&mut self, catalog: &Catalog, rng: &mut R) {
        self.room = RoomId(resample_other(self.room.index(), catalog.room_count(), rng));
    }

    /// Moves the activity to a different, uniformly chosen time slot.
    pub fn mutate_time<R: Rng>(&mut self, catalog: &Catalog, rng: &mut R) {
        self.time = SlotId(resample_other(self.time.index(), catalog.time_slot_count(), rng));
    }

    /// Hands the activity to a different, uniformly chosen facilitator.
    pub fn mutate_facilitator<R: Rng>(&mut self, catalog: &Catalog, rng: &mut R) {
        self.facilitator = FacilitatorId(resample_other(
            self.facilitator.index(),
            catalog.facilitator_count(),
            rng,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_random_gene_in_range() {
        let catalog = Catalog::university_preset();
        let mut rng = create_rng(42);
        for id in catalog.activity_ids() {
            let gene = Gene::random(id, &catalog, &mut rng);
            assert_eq!(gene.activity(), id);
            assert!(gene.room().index() < catalog.room_count());
            assert!(gene.time().index() < catalog.time_slot_count());
            assert!(gene.facilitator().index() < catalog.facilitator_count());
        }
    }

    #[test]
    fn test_mutate_room_always_changes() {
        let catalog = Catalog::university_preset();
        let mut rng = create_rng(42);
        let mut gene = Gene::random(ActivityId(0), &catalog, &mut rng);
        for _ in 0..1000 {
            let before = gene.room();
            gene.mutate_room(&catalog, &mut rng);
            assert_ne!(gene.room(), before);
        }
    }

    #[test]
    fn test_mutate_time_and_facilitator_always_change() {
        let catalog = Catalog::university_preset();
        let mut rng = create_rng(5);
        let mut gene = Gene::random(ActivityId(3), &catalog, &mut rng);
        for _ in 0..1000 {
            let time = gene.time();
            let facilitator = gene.facilitator();
            gene.mutate_time(&catalog, &mut rng);
            gene.mutate_facilitator(&catalog, &mut rng);
            assert_ne!(gene.time(), time);
            assert_ne!(gene.facilitator(), facilitator);
        }
    }

    #[test]
    fn test_mutation_touches_only_its_field() {
        let catalog = Catalog::university_preset();
        let mut rng = create_rng(9);
        let original = Gene::new(ActivityId(2), RoomId(1), SlotId(4), FacilitatorId(7));

        let mut gene = original;
        gene.mutate_room(&catalog, &mut rng);
        assert_eq!(gene.activity(), original.activity());
        assert_eq!(gene.time(), original.time());
        assert_eq!(gene.facilitator(), original.facilitator());

        let mut gene = original;
        gene.mutate_time(&catalog, &mut rng);
        assert_eq!(gene.room(), original.room());
        assert_eq!(gene.facilitator(), original.facilitator());
    }

    #[test]
    fn test_copy_is_independent() {
        let catalog = Catalog::university_preset();
        let mut rng = create_rng(1);
        let parent = Gene::new(ActivityId(0), RoomId(0), SlotId(0), FacilitatorId(0));
        let mut child = parent;
        child.mutate_room(&catalog, &mut rng);
        child.mutate_time(&catalog, &mut rng);
        child.mutate_facilitator(&catalog, &mut rng);
        assert_eq!(parent, Gene::new(ActivityId(0), RoomId(0), SlotId(0), FacilitatorId(0)));
        assert_ne!(child, parent);
    }
}
