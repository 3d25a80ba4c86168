//! Built-in reference dataset.

use super::types::{Meridiem, TimeSlot};
use super::{Catalog, CatalogBuilder};

const FACILITATORS: [&str; 10] = [
    "Lock", "Glen", "Banks", "Richards", "Shaw", "Singer", "Uther", "Tyler", "Numen", "Zeldin",
];

const ROOMS: [(&str, u32); 9] = [
    ("Slater 003", 45),
    ("Roman 216", 30),
    ("Loft 206", 75),
    ("Roman 201", 50),
    ("Loft 310", 108),
    ("Beach 201", 60),
    ("Beach 301", 75),
    ("Logos 325", 450),
    ("Frank 119", 60),
];

const SLOTS: [(u32, Meridiem); 6] = [
    (10, Meridiem::Am),
    (11, Meridiem::Am),
    (12, Meridiem::Pm),
    (1, Meridiem::Pm),
    (2, Meridiem::Pm),
    (3, Meridiem::Pm),
];

/// (name, enrollment, preferred, other)
type ActivityRow = (&'static str, u32, &'static [&'static str], &'static [&'static str]);

const ACTIVITIES: [ActivityRow; 11] = [
    ("SLA101A", 50, &["Glen", "Lock", "Banks", "Zeldin"], &["Numen", "Richards"]),
    ("SLA101B", 50, &["Glen", "Lock", "Banks", "Zeldin"], &["Numen", "Richards"]),
    ("SLA191A", 50, &["Glen", "Lock", "Banks", "Zeldin"], &["Numen", "Richards"]),
    ("SLA191B", 50, &["Glen", "Lock", "Banks", "Zeldin"], &["Numen", "Richards"]),
    ("SLA201", 50, &["Glen", "Banks", "Zeldin", "Shaw"], &["Numen", "Richards", "Singer"]),
    ("SLA291", 50, &["Lock", "Banks", "Zeldin", "Singer"], &["Numen", "Richards", "Shaw", "Tyler"]),
    ("SLA303", 60, &["Glen", "Zeldin", "Banks"], &["Numen", "Singer", "Shaw"]),
    (
        "SLA304",
        25,
        &["Glen", "Banks", "Tyler"],
        &["Numen", "Singer", "Shaw", "Richards", "Uther", "Zeldin"],
    ),
    ("SLA394", 20, &["Tyler", "Singer"], &["Richards", "Zeldin"]),
    ("SLA449", 60, &["Tyler", "Singer", "Shaw"], &["Zeldin", "Uther"]),
    ("SLA451", 100, &["Tyler", "Singer", "Shaw"], &["Zeldin", "Uther", "Richards", "Banks"]),
];

impl Catalog {
    /// Builder pre-filled with the reference university dataset.
    ///
    /// Eleven SLA activities, nine rooms, six hourly slots from 10 AM to
    /// 3 PM, and ten facilitators. SLA101 and SLA191 each have two sections
    /// and are linked; Roman 201 and Beach 201 are the proximity rooms;
    /// Tyler is exempt from the underuse penalty.
    pub fn university_preset_builder() -> CatalogBuilder {
        let mut builder = Catalog::builder().facilitators(FACILITATORS);
        for (name, capacity) in ROOMS {
            builder = builder.room(name, capacity);
        }
        for (hour, meridiem) in SLOTS {
            builder = builder.time_slot(TimeSlot::from_12h(hour, meridiem));
        }
        for (name, enrollment, preferred, other) in ACTIVITIES {
            builder = builder.activity(
                name,
                enrollment,
                preferred.iter().copied(),
                other.iter().copied(),
            );
        }
        builder
            .section_pair("SLA101A", "SLA101B")
            .section_pair("SLA191A", "SLA191B")
            .linked_courses(("SLA101A", "SLA101B"), ("SLA191A", "SLA191B"))
            .proximity_room("Roman 201")
            .proximity_room("Beach 201")
            .exempt_facilitator("Tyler")
    }

    /// The reference university dataset.
    ///
    /// ```
    /// use u_timetable::catalog::Catalog;
    ///
    /// let catalog = Catalog::university_preset();
    /// assert_eq!(catalog.activity_count(), 11);
    /// assert_eq!(catalog.room_count(), 9);
    /// ```
    pub fn university_preset() -> Catalog {
        Self::university_preset_builder()
            .build()
            .expect("built-in dataset is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_tables() {
        let catalog = Catalog::university_preset();
        assert_eq!(catalog.activity_count(), 11);
        assert_eq!(catalog.room_count(), 9);
        assert_eq!(catalog.time_slot_count(), 6);
        assert_eq!(catalog.facilitator_count(), 10);

        let hours: Vec<u32> = catalog.time_slots().iter().map(|s| s.hour).collect();
        assert_eq!(hours, vec![10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_preset_rules() {
        let catalog = Catalog::university_preset();
        let rules = catalog.rules();
        assert_eq!(rules.section_pairs.len(), 2);
        assert_eq!(rules.linked_courses.len(), 1);
        assert_eq!(
            rules.proximity_rooms,
            vec![
                catalog.room_by_name("Roman 201").unwrap(),
                catalog.room_by_name("Beach 201").unwrap()
            ]
        );
        assert_eq!(
            rules.exempt_facilitators,
            vec![catalog.facilitator_by_name("Tyler").unwrap()]
        );
    }

    #[test]
    fn test_preset_enrollment() {
        let catalog = Catalog::university_preset();
        let id = catalog.activity_by_name("SLA451").unwrap();
        assert_eq!(catalog.activity(id).expected_enrollment, 100);
        let logos = catalog.room_by_name("Logos 325").unwrap();
        assert_eq!(catalog.room(logos).capacity, 450);
    }
}
