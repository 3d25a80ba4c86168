//! Schedule fitness.
//!
//! Fitness is the sum of a local term for every gene plus three
//! whole-schedule terms driven by the catalog's [`ScheduleRules`]. Higher is
//! better. Evaluation is deterministic and reads nothing but the catalog and
//! the individual's genes, so individuals can be scored in parallel.
//!
//! # Local term (per gene)
//!
//! | Condition | Delta |
//! |---|---|
//! | shares room and slot with another gene | −0.5 |
//! | room smaller than enrollment | −0.5 |
//! | room above 6× enrollment | −0.4 |
//! | room at 3× up to 6× enrollment | −0.2 |
//! | otherwise | +0.3 |
//! | preferred facilitator / other facilitator / unlisted | +0.5 / +0.2 / −0.1 |
//! | facilitator free of other genes in this slot / double-booked | +0.2 / −0.2 |
//! | facilitator load above max | −0.5 |
//! | facilitator load below min, unless exempt | −0.4 |
//!
//! # Global terms
//!
//! - **Section spacing**: sections of one course more than 4 hours apart
//!   +0.5; in the same slot −0.5.
//! - **Linked courses**: the first pairing exactly 1 hour apart +0.5
//!   (−0.4 if it straddles the proximity rooms); otherwise the first pairing
//!   more than 1 hour apart +0.25; otherwise the first pairing in the same
//!   slot −0.25.
//! - **Back-to-back**: the first facilitator found with two activities in
//!   consecutive slots +0.5 (−0.4 if that pair straddles the proximity
//!   rooms). Applied at most once per schedule.

use super::gene::Gene;
use super::individual::Individual;
use crate::catalog::{
    Catalog, FacilitatorFit, FacilitatorId, LinkedCourses, RoomId, ScheduleRules, SectionPair,
    SlotId,
};
use std::collections::HashMap;

const ROOM_TIME_CONFLICT: f64 = -0.5;
const ROOM_TOO_SMALL: f64 = -0.5;
const ROOM_OVER_6X: f64 = -0.4;
const ROOM_OVER_3X: f64 = -0.2;
const ROOM_FITS: f64 = 0.3;

const FACILITATOR_PREFERRED: f64 = 0.5;
const FACILITATOR_OTHER: f64 = 0.2;
const FACILITATOR_UNLISTED: f64 = -0.1;

const FACILITATOR_SLOT_FREE: f64 = 0.2;
const FACILITATOR_SLOT_CLASH: f64 = -0.2;
const FACILITATOR_OVERLOADED: f64 = -0.5;
const FACILITATOR_UNDERUSED: f64 = -0.4;

const SECTIONS_SPREAD: f64 = 0.5;
const SECTIONS_SAME_SLOT: f64 = -0.5;
const SECTION_SPREAD_HOURS: u32 = 4;

const LINKED_CONSECUTIVE: f64 = 0.5;
const LINKED_SPACED: f64 = 0.25;
const LINKED_SAME_SLOT: f64 = -0.25;

const BACK_TO_BACK: f64 = 0.5;
const PROXIMITY_PENALTY: f64 = -0.4;

/// Fitness split into its terms.
///
/// [`total`](FitnessBreakdown::total) equals [`FitnessEvaluator::evaluate`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitnessBreakdown {
    /// Sum of per-gene local scores.
    pub local: f64,
    /// Section-spacing term over all section pairs.
    pub section_spacing: f64,
    /// Linked-course term over all linked course pairs.
    pub linked_courses: f64,
    /// Facilitator back-to-back term.
    pub back_to_back: f64,
}

impl FitnessBreakdown {
    pub fn total(&self) -> f64 {
        self.local + self.section_spacing + self.linked_courses + self.back_to_back
    }
}

/// Occupancy counts shared by every gene's local score.
struct Tallies {
    room_slot: HashMap<(RoomId, SlotId), usize>,
    slot_facilitator: HashMap<(SlotId, FacilitatorId), usize>,
    facilitator_load: Vec<usize>,
}

impl Tallies {
    fn new(catalog: &Catalog, genes: &[Gene]) -> Self {
        let mut room_slot = HashMap::with_capacity(genes.len());
        let mut slot_facilitator = HashMap::with_capacity(genes.len());
        let mut facilitator_load = vec![0usize; catalog.facilitator_count()];
        for gene in genes {
            *room_slot.entry((gene.room(), gene.time())).or_insert(0) += 1;
            *slot_facilitator
                .entry((gene.time(), gene.facilitator()))
                .or_insert(0) += 1;
            facilitator_load[gene.facilitator().index()] += 1;
        }
        Self {
            room_slot,
            slot_facilitator,
            facilitator_load,
        }
    }
}

/// Scores individuals against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    catalog: &'a Catalog,
}

impl<'a> FitnessEvaluator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Total fitness of `individual`.
    pub fn evaluate(&self, individual: &Individual) -> f64 {
        self.breakdown(individual).total()
    }

    /// Fitness of `individual`, term by term.
    pub fn breakdown(&self, individual: &Individual) -> FitnessBreakdown {
        let genes = individual.genes();
        let rules = self.catalog.rules();
        let tallies = Tallies::new(self.catalog, genes);

        FitnessBreakdown {
            local: genes.iter().map(|g| self.gene_score(g, &tallies)).sum(),
            section_spacing: rules
                .section_pairs
                .iter()
                .map(|pair| self.section_spacing(individual, pair))
                .sum(),
            linked_courses: rules
                .linked_courses
                .iter()
                .map(|linked| self.linked_courses(genes, linked))
                .sum(),
            back_to_back: self.back_to_back(genes),
        }
    }

    /// Local scores of every gene, in gene order.
    pub fn local_scores(&self, individual: &Individual) -> Vec<f64> {
        let genes = individual.genes();
        let tallies = Tallies::new(self.catalog, genes);
        genes.iter().map(|g| self.gene_score(g, &tallies)).collect()
    }

    fn gene_score(&self, gene: &Gene, tallies: &Tallies) -> f64 {
        let activity = self.catalog.activity(gene.activity());
        let room = self.catalog.room(gene.room());
        let rules = self.catalog.rules();
        let mut score = 0.0;

        // Counts include the gene itself.
        if tallies.room_slot[&(gene.room(), gene.time())] > 1 {
            score += ROOM_TIME_CONFLICT;
        }

        score += capacity_score(room.capacity, activity.expected_enrollment);

        score += match activity.facilitator_fit(gene.facilitator()) {
            FacilitatorFit::Preferred => FACILITATOR_PREFERRED,
            FacilitatorFit::Other => FACILITATOR_OTHER,
            FacilitatorFit::Unlisted => FACILITATOR_UNLISTED,
        };

        score += if tallies.slot_facilitator[&(gene.time(), gene.facilitator())] > 1 {
            FACILITATOR_SLOT_CLASH
        } else {
            FACILITATOR_SLOT_FREE
        };

        let load = tallies.facilitator_load[gene.facilitator().index()];
        if load > rules.facilitator_load.max {
            score += FACILITATOR_OVERLOADED;
        } else if load < rules.facilitator_load.min && !rules.is_exempt(gene.facilitator()) {
            score += FACILITATOR_UNDERUSED;
        }

        score
    }

    fn section_spacing(&self, individual: &Individual, pair: &SectionPair) -> f64 {
        let [a, b] = pair.sections().map(|id| individual.gene(id));
        if self.catalog.hours_between(a.time(), b.time()) > SECTION_SPREAD_HOURS {
            SECTIONS_SPREAD
        } else if a.time() == b.time() {
            SECTIONS_SAME_SLOT
        } else {
            0.0
        }
    }

    /// Condition-major chain: every pairing is tried against one condition
    /// before the next condition is considered.
    fn linked_courses(&self, genes: &[Gene], linked: &LinkedCourses) -> f64 {
        let pairings = linked
            .pairings()
            .map(|(x, y)| (&genes[x.index()], &genes[y.index()]));
        let hours = |(x, y): &(&Gene, &Gene)| self.catalog.hours_between(x.time(), y.time());

        if let Some((x, y)) = pairings.iter().find(|p| hours(*p) == 1) {
            LINKED_CONSECUTIVE + proximity_penalty(self.catalog.rules(), x, y)
        } else if pairings.iter().any(|p| hours(p) > 1) {
            LINKED_SPACED
        } else if pairings.iter().any(|(x, y)| x.time() == y.time()) {
            LINKED_SAME_SLOT
        } else {
            0.0
        }
    }

    /// Facilitators are visited in order of first appearance in the gene
    /// list; only the first consecutive pair found is scored.
    fn back_to_back(&self, genes: &[Gene]) -> f64 {
        let mut first_seen = Vec::new();
        let mut groups: Vec<Vec<&Gene>> = vec![Vec::new(); self.catalog.facilitator_count()];
        for gene in genes {
            let group = &mut groups[gene.facilitator().index()];
            if group.is_empty() {
                first_seen.push(gene.facilitator());
            }
            group.push(gene);
        }

        for facilitator in first_seen {
            let group = &groups[facilitator.index()];
            for (i, a) in group.iter().enumerate() {
                for b in &group[i + 1..] {
                    if self.catalog.hours_between(a.time(), b.time()) == 1 {
                        return BACK_TO_BACK + proximity_penalty(self.catalog.rules(), a, b);
                    }
                }
            }
        }
        0.0
    }
}

/// Room-size score for an activity of `enrollment` in a room of `capacity`.
///
/// Exactly 3× and exactly 6× both land in the −0.2 bracket.
///
/// ```
/// use u_timetable::ga::capacity_score;
///
/// assert_eq!(capacity_score(20, 30), -0.5);
/// assert_eq!(capacity_score(30, 10), -0.2);
/// assert_eq!(capacity_score(61, 10), -0.4);
/// assert_eq!(capacity_score(25, 10), 0.3);
/// ```
pub fn capacity_score(capacity: u32, enrollment: u32) -> f64 {
    let capacity = u64::from(capacity);
    let enrollment = u64::from(enrollment);
    if enrollment > capacity {
        ROOM_TOO_SMALL
    } else if capacity > 6 * enrollment {
        ROOM_OVER_6X
    } else if capacity >= 3 * enrollment {
        ROOM_OVER_3X
    } else {
        ROOM_FITS
    }
}

fn proximity_penalty(rules: &ScheduleRules, a: &Gene, b: &Gene) -> f64 {
    if rules.straddles_proximity(a.room(), b.room()) {
        PROXIMITY_PENALTY
    } else {
        0.0
    }
}

// ============================================================================
// Tests
// ============================================================================
