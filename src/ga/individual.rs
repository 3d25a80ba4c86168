//! Candidate schedules.

use super::fitness::FitnessEvaluator;
use super::gene::Gene;
use super::operators::single_point_crossover;
use crate::catalog::{ActivityId, Catalog};
use crate::error::{Result, TimetableError};
use rand::Rng;
use std::fmt;

/// One complete candidate schedule (chromosome).
///
/// Holds exactly one [`Gene`] per catalog activity, in catalog order, so
/// gene `i` always schedules activity `i`. Fitness and mating probability
/// are cached and start out unset.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genes: Vec<Gene>,
    fitness: Option<f64>,
    mating_probability: Option<f64>,
}

impl Individual {
    /// Creates an individual with a random assignment for every activity.
    pub fn random<R: Rng>(catalog: &Catalog, rng: &mut R) -> Self {
        let genes = catalog
            .activity_ids()
            .map(|id| Gene::random(id, catalog, rng))
            .collect();
        Self::unscored(genes)
    }

    /// Creates an individual from explicit genes.
    ///
    /// Fails unless `genes` holds exactly one gene per catalog activity, in
    /// catalog order, with every index inside the catalog's tables.
    pub fn from_genes(catalog: &Catalog, genes: Vec<Gene>) -> Result<Self> {
        if genes.len() != catalog.activity_count() {
            return Err(TimetableError::InvalidChromosome(format!(
                "expected {} genes, got {}",
                catalog.activity_count(),
                genes.len()
            )));
        }
        for (i, gene) in genes.iter().enumerate() {
            if gene.activity() != ActivityId(i) {
                return Err(TimetableError::InvalidChromosome(format!(
                    "gene {i} schedules activity {} instead of {i}",
                    gene.activity().index()
                )));
            }
            if gene.room().index() >= catalog.room_count()
                || gene.time().index() >= catalog.time_slot_count()
                || gene.facilitator().index() >= catalog.facilitator_count()
            {
                return Err(TimetableError::InvalidChromosome(format!(
                    "gene {i} references an entry outside the catalog"
                )));
            }
        }
        Ok(Self::unscored(genes))
    }

    fn unscored(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            fitness: None,
            mating_probability: None,
        }
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// The gene scheduling `activity`.
    ///
    /// # Panics
    /// Panics if `activity` is outside the catalog this individual was built from.
    pub fn gene(&self, activity: ActivityId) -> &Gene {
        &self.genes[activity.index()]
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Cached fitness; `None` until evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Cached softmax weight; `None` until assigned by the population.
    pub fn mating_probability(&self) -> Option<f64> {
        self.mating_probability
    }

    pub fn set_mating_probability(&mut self, probability: f64) {
        self.mating_probability = Some(probability);
    }

    /// Computes, caches, and returns fitness.
    pub fn evaluate(&mut self, catalog: &Catalog) -> f64 {
        let fitness = FitnessEvaluator::new(catalog).evaluate(self);
        self.fitness = Some(fitness);
        fitness
    }

    /// Single-point crossover with `other`.
    ///
    /// Returns two unscored offspring: `self`'s head with `other`'s tail,
    /// and the complement. Genes are copied, so editing an offspring never
    /// touches a parent.
    ///
    /// # Panics
    /// Panics if the parents differ in length or have fewer than 3 genes.
    pub fn crossover<R: Rng>(&self, other: &Individual, rng: &mut R) -> (Individual, Individual) {
        let (first, second) = single_point_crossover(&self.genes, &other.genes, rng);
        (Self::unscored(first), Self::unscored(second))
    }

    /// Mutates every gene with independent per-field trials.
    ///
    /// For each gene, room, then facilitator, then time slot is resampled
    /// with probability `rate` each. Returns the number of fields changed;
    /// when it is non-zero the cached fitness and mating probability are
    /// cleared.
    ///
    /// # Panics
    /// Panics if `rate` is outside `[0, 1]`.
    pub fn mutate<R: Rng>(&mut self, catalog: &Catalog, rate: f64, rng: &mut R) -> usize {
        let mut changed = 0;
        for gene in &mut self.genes {
            if rng.random_bool(rate) {
                gene.mutate_room(catalog, rng);
                changed += 1;
            }
            if rng.random_bool(rate) {
                gene.mutate_facilitator(catalog, rng);
                changed += 1;
            }
            if rng.random_bool(rate) {
                gene.mutate_time(catalog, rng);
                changed += 1;
            }
        }
        if changed > 0 {
            self.fitness = None;
            self.mating_probability = None;
        }
        changed
    }

    /// Human-readable schedule.
    ///
    /// ```
    /// use u_timetable::catalog::Catalog;
    /// use u_timetable::ga::Individual;
    /// use u_timetable::random::create_rng;
    ///
    /// let catalog = Catalog::university_preset();
    /// let schedule = Individual::random(&catalog, &mut create_rng(1));
    /// let text = schedule.display(&catalog).to_string();
    /// assert!(text.starts_with("Schedule = {"));
    /// assert!(text.contains("SLA101A = {"));
    /// ```
    pub fn display<'a>(&'a self, catalog: &'a Catalog) -> ScheduleDisplay<'a> {
        ScheduleDisplay {
            individual: self,
            catalog,
        }
    }
}

/// [`Display`](fmt::Display) adapter returned by [`Individual::display`].
pub struct ScheduleDisplay<'a> {
    individual: &'a Individual,
    catalog: &'a Catalog,
}

impl fmt::Display for ScheduleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schedule = {{")?;
        for gene in self.individual.genes() {
            writeln!(f, "\t{} = {{", self.catalog.activity(gene.activity()).name)?;
            writeln!(f, "\t\tRoom = {}", self.catalog.room(gene.room()).name)?;
            writeln!(f, "\t\tTime = {}", self.catalog.time_slot(gene.time()))?;
            writeln!(
                f,
                "\t\tFacilitator = {}",
                self.catalog.facilitator_name(gene.facilitator())
            )?;
            writeln!(f, "\t}}")?;
        }
        if let Some(fitness) = self.individual.fitness() {
            writeln!(f, "\tFitness = {fitness:.3}")?;
        }
        write!(f, "}}")
    }
}
