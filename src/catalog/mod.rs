//! Timetabling domain catalog.
//!
//! The catalog is the fixed, read-only problem dataset: activities, rooms,
//! time slots, facilitators, and the named global rules. The search engine
//! only reads it.
//!
//! A catalog is assembled by name through [`CatalogBuilder`]. Building
//! resolves every name to a dense index and rejects inputs the search
//! cannot work with:
//!
//! - unknown names in facilitator lists or rules
//! - duplicate names within a table
//! - tables with fewer than two entries (mutation could not change them)
//! - fewer than three activities (no valid crossover point)
//!
//! # Example
//!
//! ```
//! use u_timetable::catalog::{Catalog, Meridiem, TimeSlot};
//!
//! let catalog = Catalog::builder()
//!     .facilitators(["Lock", "Glen", "Banks"])
//!     .room("Roman 216", 30)
//!     .room("Logos 325", 450)
//!     .time_slot(TimeSlot::from_12h(10, Meridiem::Am))
//!     .time_slot(TimeSlot::from_12h(11, Meridiem::Am))
//!     .activity("A", 25, ["Lock"], ["Glen"])
//!     .activity("B", 25, ["Glen"], ["Banks"])
//!     .activity("C", 25, ["Banks"], ["Lock"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(catalog.activity_count(), 3);
//! assert!(catalog.room_by_name("Roman 216").is_ok());
//! assert!(catalog.room_by_name("Nowhere").is_err());
//! ```

mod presets;
mod rules;
mod types;

pub use rules::{FacilitatorLoad, LinkedCourses, ScheduleRules, SectionPair};
pub use types::{
    Activity, ActivityId, FacilitatorFit, FacilitatorId, Meridiem, Room, RoomId, SlotId, TimeSlot,
};

use crate::error::{Result, TimetableError};
use std::collections::{HashMap, HashSet};

/// Immutable timetabling dataset.
#[derive(Debug, Clone)]
pub struct Catalog {
    activities: Vec<Activity>,
    rooms: Vec<Room>,
    time_slots: Vec<TimeSlot>,
    facilitators: Vec<String>,
    rules: ScheduleRules,
    activity_index: HashMap<String, ActivityId>,
    room_index: HashMap<String, RoomId>,
    facilitator_index: HashMap<String, FacilitatorId>,
}

impl Catalog {
    /// Starts an empty builder.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// All activities in enumeration order. This order fixes gene order.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// All rooms.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All time slots.
    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    /// All facilitator names.
    pub fn facilitators(&self) -> &[String] {
        &self.facilitators
    }

    /// Resolved global scoring rules.
    pub fn rules(&self) -> &ScheduleRules {
        &self.rules
    }

    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn time_slot_count(&self) -> usize {
        self.time_slots.len()
    }

    pub fn facilitator_count(&self) -> usize {
        self.facilitators.len()
    }

    /// Activity ids in enumeration order.
    pub fn activity_ids(&self) -> impl ExactSizeIterator<Item = ActivityId> {
        (0..self.activities.len()).map(ActivityId)
    }

    /// # Panics
    /// Panics if `id` was not issued by this catalog.
    pub fn activity(&self, id: ActivityId) -> &Activity {
        &self.activities[id.index()]
    }

    /// # Panics
    /// Panics if `id` was not issued by this catalog.
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.index()]
    }

    /// # Panics
    /// Panics if `id` was not issued by this catalog.
    pub fn time_slot(&self, id: SlotId) -> &TimeSlot {
        &self.time_slots[id.index()]
    }

    /// # Panics
    /// Panics if `id` was not issued by this catalog.
    pub fn facilitator_name(&self, id: FacilitatorId) -> &str {
        &self.facilitators[id.index()]
    }

    /// Looks up an activity by name.
    pub fn activity_by_name(&self, name: &str) -> Result<ActivityId> {
        self.activity_index
            .get(name)
            .copied()
            .ok_or_else(|| TimetableError::UnknownActivity(name.to_string()))
    }

    /// Looks up a room by name.
    pub fn room_by_name(&self, name: &str) -> Result<RoomId> {
        self.room_index
            .get(name)
            .copied()
            .ok_or_else(|| TimetableError::UnknownRoom(name.to_string()))
    }

    /// Looks up a facilitator by name.
    pub fn facilitator_by_name(&self, name: &str) -> Result<FacilitatorId> {
        self.facilitator_index
            .get(name)
            .copied()
            .ok_or_else(|| TimetableError::UnknownFacilitator(name.to_string()))
    }

    /// Hours between two slots.
    #[inline]
    pub fn hours_between(&self, a: SlotId, b: SlotId) -> u32 {
        self.time_slot(a).hours_between(self.time_slot(b))
    }
}

// ============================================================================
// Builder
// ============================================================================

#[derive(Debug, Clone)]
struct ActivityDraft {
    name: String,
    expected_enrollment: u32,
    preferred: Vec<String>,
    other: Vec<String>,
}

/// Name-based catalog assembly.
///
/// Nothing is checked until [`build`](CatalogBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    facilitators: Vec<String>,
    rooms: Vec<Room>,
    time_slots: Vec<TimeSlot>,
    activities: Vec<ActivityDraft>,
    section_pairs: Vec<(String, String)>,
    linked_courses: Vec<((String, String), (String, String))>,
    proximity_rooms: Vec<String>,
    exempt_facilitators: Vec<String>,
    facilitator_load: FacilitatorLoad,
}

impl CatalogBuilder {
    /// Adds one facilitator.
    pub fn facilitator(mut self, name: impl Into<String>) -> Self {
        self.facilitators.push(name.into());
        self
    }

    /// Adds several facilitators.
    pub fn facilitators<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facilitators.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds a room.
    pub fn room(mut self, name: impl Into<String>, capacity: u32) -> Self {
        self.rooms.push(Room::new(name, capacity));
        self
    }

    /// Adds a time slot.
    pub fn time_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slots.push(slot);
        self
    }

    /// Adds an activity with its preferred and other facilitator lists.
    pub fn activity<P, O, S1, S2>(
        mut self,
        name: impl Into<String>,
        expected_enrollment: u32,
        preferred: P,
        other: O,
    ) -> Self
    where
        P: IntoIterator<Item = S1>,
        O: IntoIterator<Item = S2>,
        S1: Into<String>,
        S2: Into<String>,
    {
        self.activities.push(ActivityDraft {
            name: name.into(),
            expected_enrollment,
            preferred: preferred.into_iter().map(Into::into).collect(),
            other: other.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Declares two activities as sections of the same course.
    pub fn section_pair(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.section_pairs.push((first.into(), second.into()));
        self
    }

    /// Declares two two-section courses whose sections should be close in time.
    pub fn linked_courses(
        mut self,
        x: (impl Into<String>, impl Into<String>),
        y: (impl Into<String>, impl Into<String>),
    ) -> Self {
        self.linked_courses
            .push(((x.0.into(), x.1.into()), (y.0.into(), y.1.into())));
        self
    }

    /// Marks a room as one consecutive activities should not straddle.
    pub fn proximity_room(mut self, name: impl Into<String>) -> Self {
        self.proximity_rooms.push(name.into());
        self
    }

    /// Exempts a facilitator from the underuse penalty.
    pub fn exempt_facilitator(mut self, name: impl Into<String>) -> Self {
        self.exempt_facilitators.push(name.into());
        self
    }

    /// Overrides the facilitator load bounds.
    pub fn facilitator_load(mut self, max: usize, min: usize) -> Self {
        self.facilitator_load = FacilitatorLoad { max, min };
        self
    }

    /// Validates and resolves everything into a [`Catalog`].
    pub fn build(self) -> Result<Catalog> {
        let facilitator_index = index_names("facilitator", &self.facilitators, FacilitatorId)?;
        let room_names: Vec<String> = self.rooms.iter().map(|r| r.name.clone()).collect();
        let room_index = index_names("room", &room_names, RoomId)?;
        let activity_names: Vec<String> =
            self.activities.iter().map(|a| a.name.clone()).collect();
        let activity_index = index_names("activity", &activity_names, ActivityId)?;

        let slot_labels: Vec<String> = self.time_slots.iter().map(|s| s.label.clone()).collect();
        index_names("time slot", &slot_labels, SlotId)?;
        let mut hours = HashSet::new();
        for slot in &self.time_slots {
            if !hours.insert(slot.hour) {
                return Err(TimetableError::DuplicateName {
                    kind: "time slot hour",
                    name: slot.label.clone(),
                });
            }
        }

        require_distinct("room", self.rooms.len())?;
        require_distinct("time slot", self.time_slots.len())?;
        require_distinct("facilitator", self.facilitators.len())?;
        if self.activities.len() < 3 {
            return Err(TimetableError::DegenerateDomain(format!(
                "need at least 3 activities for crossover, got {}",
                self.activities.len()
            )));
        }

        let resolve_facilitator = |name: &str| {
            facilitator_index
                .get(name)
                .copied()
                .ok_or_else(|| TimetableError::UnknownFacilitator(name.to_string()))
        };
        let resolve_activity = |name: &str| {
            activity_index
                .get(name)
                .copied()
                .ok_or_else(|| TimetableError::UnknownActivity(name.to_string()))
        };
        let resolve_room = |name: &str| {
            room_index
                .get(name)
                .copied()
                .ok_or_else(|| TimetableError::UnknownRoom(name.to_string()))
        };

        let mut activities = Vec::with_capacity(self.activities.len());
        for draft in &self.activities {
            activities.push(Activity {
                name: draft.name.clone(),
                expected_enrollment: draft.expected_enrollment,
                preferred_facilitators: draft
                    .preferred
                    .iter()
                    .map(|n| resolve_facilitator(n.as_str()))
                    .collect::<Result<_>>()?,
                other_facilitators: draft
                    .other
                    .iter()
                    .map(|n| resolve_facilitator(n.as_str()))
                    .collect::<Result<_>>()?,
            });
        }

        let section_pair = |(a, b): &(String, String)| -> Result<SectionPair> {
            Ok(SectionPair {
                first: resolve_activity(a.as_str())?,
                second: resolve_activity(b.as_str())?,
            })
        };

        let rules = ScheduleRules {
            section_pairs: self
                .section_pairs
                .iter()
                .map(section_pair)
                .collect::<Result<_>>()?,
            linked_courses: self
                .linked_courses
                .iter()
                .map(|(x, y)| {
                    Ok(LinkedCourses {
                        x: section_pair(x)?,
                        y: section_pair(y)?,
                    })
                })
                .collect::<Result<_>>()?,
            proximity_rooms: self
                .proximity_rooms
                .iter()
                .map(|n| resolve_room(n.as_str()))
                .collect::<Result<_>>()?,
            exempt_facilitators: self
                .exempt_facilitators
                .iter()
                .map(|n| resolve_facilitator(n.as_str()))
                .collect::<Result<_>>()?,
            facilitator_load: self.facilitator_load,
        };

        Ok(Catalog {
            activities,
            rooms: self.rooms,
            time_slots: self.time_slots,
            facilitators: self.facilitators,
            rules,
            activity_index,
            room_index,
            facilitator_index,
        })
    }
}

/// Maps names to ids, rejecting duplicates.
fn index_names<T: Copy>(
    kind: &'static str,
    names: &[String],
    make_id: fn(usize) -> T,
) -> Result<HashMap<String, T>> {
    let mut index = HashMap::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        if index.insert(name.clone(), make_id(i)).is_some() {
            return Err(TimetableError::DuplicateName {
                kind,
                name: name.clone(),
            });
        }
    }
    Ok(index)
}

/// Mutation resamples until the value changes, which needs two entries.
fn require_distinct(kind: &str, len: usize) -> Result<()> {
    if len < 2 {
        return Err(TimetableError::DegenerateDomain(format!(
            "{kind} table needs at least 2 entries, got {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_builder() -> CatalogBuilder {
        Catalog::builder()
            .facilitators(["Lock", "Glen", "Banks"])
            .room("Small", 30)
            .room("Hall", 300)
            .time_slot(TimeSlot::from_12h(10, Meridiem::Am))
            .time_slot(TimeSlot::from_12h(11, Meridiem::Am))
            .activity("A", 25, ["Lock"], ["Glen"])
            .activity("B", 40, ["Glen"], ["Banks"])
            .activity("C", 60, ["Banks"], Vec::<String>::new())
    }

    #[test]
    fn test_build_small_catalog() {
        let catalog = small_builder().build().unwrap();
        assert_eq!(catalog.activity_count(), 3);
        assert_eq!(catalog.room_count(), 2);
        assert_eq!(catalog.time_slot_count(), 2);
        assert_eq!(catalog.facilitator_count(), 3);

        let b = catalog.activity_by_name("B").unwrap();
        assert_eq!(catalog.activity(b).expected_enrollment, 40);
        assert_eq!(
            catalog.activity(b).preferred_facilitators,
            vec![catalog.facilitator_by_name("Glen").unwrap()]
        );
    }

    #[test]
    fn test_lookup_not_found() {
        let catalog = small_builder().build().unwrap();
        assert_eq!(
            catalog.activity_by_name("Z"),
            Err(TimetableError::UnknownActivity("Z".into()))
        );
        assert_eq!(
            catalog.room_by_name("Attic"),
            Err(TimetableError::UnknownRoom("Attic".into()))
        );
        assert_eq!(
            catalog.facilitator_by_name("Nobody"),
            Err(TimetableError::UnknownFacilitator("Nobody".into()))
        );
    }

    #[test]
    fn test_unknown_facilitator_in_activity() {
        let err = small_builder()
            .activity("D", 10, ["Ghost"], Vec::<String>::new())
            .build()
            .unwrap_err();
        assert_eq!(err, TimetableError::UnknownFacilitator("Ghost".into()));
    }

    #[test]
    fn test_unknown_names_in_rules() {
        let err = small_builder().section_pair("A", "Q").build().unwrap_err();
        assert_eq!(err, TimetableError::UnknownActivity("Q".into()));

        let err = small_builder().proximity_room("Annex").build().unwrap_err();
        assert_eq!(err, TimetableError::UnknownRoom("Annex".into()));

        let err = small_builder().exempt_facilitator("Tyler").build().unwrap_err();
        assert_eq!(err, TimetableError::UnknownFacilitator("Tyler".into()));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = small_builder().room("Small", 10).build().unwrap_err();
        assert!(matches!(err, TimetableError::DuplicateName { kind: "room", .. }));

        let err = small_builder()
            .time_slot(TimeSlot::new("ten", 10))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TimetableError::DuplicateName {
                kind: "time slot hour",
                ..
            }
        ));
    }

    #[test]
    fn test_degenerate_tables_rejected() {
        let err = Catalog::builder()
            .facilitators(["Lock", "Glen"])
            .room("Only", 30)
            .time_slot(TimeSlot::new("10AM", 10))
            .time_slot(TimeSlot::new("11AM", 11))
            .activity("A", 10, ["Lock"], Vec::<String>::new())
            .activity("B", 10, ["Lock"], Vec::<String>::new())
            .activity("C", 10, ["Lock"], Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, TimetableError::DegenerateDomain(_)));
    }

    #[test]
    fn test_too_few_activities_rejected() {
        let err = Catalog::builder()
            .facilitators(["Lock", "Glen"])
            .room("R1", 30)
            .room("R2", 60)
            .time_slot(TimeSlot::new("10AM", 10))
            .time_slot(TimeSlot::new("11AM", 11))
            .activity("A", 10, ["Lock"], Vec::<String>::new())
            .activity("B", 10, ["Glen"], Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, TimetableError::DegenerateDomain(_)));
    }

    #[test]
    fn test_rules_resolved() {
        let catalog = small_builder()
            .section_pair("A", "B")
            .linked_courses(("A", "B"), ("B", "C"))
            .proximity_room("Hall")
            .exempt_facilitator("Banks")
            .facilitator_load(5, 2)
            .build()
            .unwrap();
        let rules = catalog.rules();
        assert_eq!(rules.section_pairs.len(), 1);
        assert_eq!(rules.linked_courses.len(), 1);
        assert_eq!(rules.proximity_rooms, vec![RoomId(1)]);
        assert_eq!(rules.exempt_facilitators, vec![FacilitatorId(2)]);
        assert_eq!(rules.facilitator_load, FacilitatorLoad { max: 5, min: 2 });
    }
}
