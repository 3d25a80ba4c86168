//! Declarative global scoring rules.
//!
//! The whole-schedule fitness terms are driven by this data rather than by
//! hardcoded course or room names. Rules are stated by name on the
//! [`CatalogBuilder`](super::CatalogBuilder) and resolved to indices when
//! the catalog is built.

use super::types::{ActivityId, FacilitatorId, RoomId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Two sections of the same course, which should be spread apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SectionPair {
    pub first: ActivityId,
    pub second: ActivityId,
}

impl SectionPair {
    /// Both sections, in declaration order.
    pub fn sections(&self) -> [ActivityId; 2] {
        [self.first, self.second]
    }
}

/// Two two-section courses whose sections should sit close in time.
///
/// Pairings are scored in the order `(x.first, y.first)`,
/// `(x.second, y.first)`, `(x.first, y.second)`, `(x.second, y.second)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkedCourses {
    pub x: SectionPair,
    pub y: SectionPair,
}

impl LinkedCourses {
    /// The four cross-course pairings in scoring order.
    pub fn pairings(&self) -> [(ActivityId, ActivityId); 4] {
        [
            (self.x.first, self.y.first),
            (self.x.second, self.y.first),
            (self.x.first, self.y.second),
            (self.x.second, self.y.second),
        ]
    }
}

/// Bounds on how many activities one facilitator should oversee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FacilitatorLoad {
    /// A facilitator with more activities than this is overloaded.
    pub max: usize,
    /// A facilitator with fewer activities than this is underused.
    pub min: usize,
}

impl Default for FacilitatorLoad {
    fn default() -> Self {
        Self { max: 4, min: 3 }
    }
}

/// Resolved global rules consumed by the fitness evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleRules {
    /// Course sections that should be more than four hours apart.
    pub section_pairs: Vec<SectionPair>,
    /// Course pairs whose sections should be scheduled near each other.
    pub linked_courses: Vec<LinkedCourses>,
    /// Rooms far from the rest; consecutive activities should not straddle
    /// this set.
    pub proximity_rooms: Vec<RoomId>,
    /// Facilitators exempt from the underuse penalty.
    pub exempt_facilitators: Vec<FacilitatorId>,
    /// Load bounds for the facilitator-count terms.
    pub facilitator_load: FacilitatorLoad,
}

impl ScheduleRules {
    /// True if exactly one of the two rooms is a proximity room.
    pub fn straddles_proximity(&self, a: RoomId, b: RoomId) -> bool {
        self.proximity_rooms.contains(&a) != self.proximity_rooms.contains(&b)
    }

    /// True if `facilitator` is exempt from the underuse penalty.
    pub fn is_exempt(&self, facilitator: FacilitatorId) -> bool {
        self.exempt_facilitators.contains(&facilitator)
    }
}
