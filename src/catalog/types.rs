//! Catalog record types.
//!
//! Records are plain values. Genes refer to them through the dense index
//! newtypes below, so offspring never share state with their parents.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! index_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name(pub usize);

        impl $name {
            /// Position of the record in its catalog table.
            #[inline]
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

index_newtype!(
    /// Index of an [`Activity`] in the catalog's activity table.
    ActivityId
);
index_newtype!(
    /// Index of a [`Room`] in the catalog's room table.
    RoomId
);
index_newtype!(
    /// Index of a [`TimeSlot`] in the catalog's time-slot table.
    SlotId
);
index_newtype!(
    /// Index of a facilitator in the catalog's facilitator table.
    FacilitatorId
);

/// A course section to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Activity {
    /// Unique activity name (e.g. `"SLA101A"`).
    pub name: String,
    /// Expected number of enrolled students.
    pub expected_enrollment: u32,
    /// Facilitators who should preferably oversee the activity.
    pub preferred_facilitators: Vec<FacilitatorId>,
    /// Facilitators who may oversee the activity.
    pub other_facilitators: Vec<FacilitatorId>,
}

impl Activity {
    /// How well `facilitator` matches this activity.
    pub fn facilitator_fit(&self, facilitator: FacilitatorId) -> FacilitatorFit {
        if self.preferred_facilitators.contains(&facilitator) {
            FacilitatorFit::Preferred
        } else if self.other_facilitators.contains(&facilitator) {
            FacilitatorFit::Other
        } else {
            FacilitatorFit::Unlisted
        }
    }
}

/// Classification of a facilitator relative to an activity's lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacilitatorFit {
    /// Listed as preferred.
    Preferred,
    /// Listed as an acceptable alternative.
    Other,
    /// In neither list.
    Unlisted,
}

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Room {
    /// Unique room name (e.g. `"Roman 201"`).
    pub name: String,
    /// Seating capacity.
    pub capacity: u32,
}

impl Room {
    /// Creates a room.
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// Half of the day on a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Meridiem {
    Am,
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => f.write_str("AM"),
            Meridiem::Pm => f.write_str("PM"),
        }
    }
}

/// A one-hour teaching slot.
///
/// Slots are ordered by `hour`, the start hour on a 24-hour clock. The
/// difference between two slots in hours drives the spacing rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSlot {
    /// Display label (e.g. `"10AM"`).
    pub label: String,
    /// Start hour, 0–23.
    pub hour: u32,
}

impl TimeSlot {
    /// Creates a slot from a label and a 24-hour start hour.
    pub fn new(label: impl Into<String>, hour: u32) -> Self {
        Self {
            label: label.into(),
            hour,
        }
    }

    /// Creates a slot from a 12-hour clock reading.
    ///
    /// `12 AM` maps to hour 0 and `12 PM` to hour 12.
    ///
    /// ```
    /// use u_timetable::catalog::{Meridiem, TimeSlot};
    ///
    /// assert_eq!(TimeSlot::from_12h(1, Meridiem::Pm).hour, 13);
    /// assert_eq!(TimeSlot::from_12h(12, Meridiem::Pm).hour, 12);
    /// assert_eq!(TimeSlot::from_12h(12, Meridiem::Am).hour, 0);
    /// ```
    pub fn from_12h(hour: u32, meridiem: Meridiem) -> Self {
        let hour24 = match (meridiem, hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Pm, h) if h < 12 => h + 12,
            (_, h) => h,
        };
        Self {
            label: format!("{hour}{meridiem}"),
            hour: hour24,
        }
    }

    /// Absolute difference between two slots, in hours.
    #[inline]
    pub fn hours_between(&self, other: &TimeSlot) -> u32 {
        self.hour.abs_diff(other.hour)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
