//! Population lifecycle.
//!
//! A [`Population`] moves through
//! `Seeded → Ranked → (Culled → Reproducing → Ranked)*`:
//!
//! 1. **Rank**: score every individual without a fitness, sort best first.
//! 2. **Cull**: keep the better half.
//! 3. **Reproduce**: assign softmax mating weights, then breed pairs of
//!    offspring (crossover + mutation) until the target size is reached.
//! 4. **Re-rank**: score only the offspring, sort again.
//!
//! Survivors keep their fitness across generations, so the best fitness
//! never decreases from one generation to the next.

use super::config::TimetableConfig;
use super::fitness::FitnessEvaluator;
use super::individual::Individual;
use super::selection::{pick_parents, softmax, Picker};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::random::{rng_from_option, TimetableRng};
use log::{debug, trace};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The evolving set of candidate schedules.
///
/// Owns its individuals and its random generator exclusively; the catalog
/// is borrowed read-only.
///
/// # Usage
///
/// ```
/// use u_timetable::catalog::Catalog;
/// use u_timetable::ga::{Population, TimetableConfig};
///
/// let catalog = Catalog::university_preset();
/// let config = TimetableConfig::default().with_population_size(20).with_seed(42);
/// let mut population = Population::new(&catalog, config).unwrap();
///
/// for _ in 0..5 {
///     population.run_generation();
/// }
/// assert_eq!(population.len(), 20);
/// assert_eq!(population.generation(), 5);
/// let best = population.best().unwrap();
/// println!("{}", best.display(&catalog));
/// ```
#[derive(Debug, Clone)]
pub struct Population<'c> {
    catalog: &'c Catalog,
    config: TimetableConfig,
    individuals: Vec<Individual>,
    generation: usize,
    ranked: bool,
    rng: TimetableRng,
}

impl<'c> Population<'c> {
    /// Seeds a population of random individuals.
    ///
    /// Individuals start unscored; the first call to
    /// [`run_generation`](Self::run_generation) (or [`rank`](Self::rank))
    /// scores them.
    pub fn new(catalog: &'c Catalog, config: TimetableConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = rng_from_option(config.seed);

        let individuals: Vec<Individual> = (0..config.population_size)
            .map(|_| Individual::random(catalog, &mut rng))
            .collect();

        debug!(
            "seeded population of {} over {} activities",
            individuals.len(),
            catalog.activity_count()
        );

        Ok(Self {
            catalog,
            config,
            individuals,
            generation: 0,
            ranked: false,
            rng,
        })
    }

    /// Scores every unscored individual and sorts best first.
    pub fn rank(&mut self) {
        evaluate_pending(self.catalog, &mut self.individuals, self.config.parallel);
        sort_descending(&mut self.individuals);
        self.ranked = true;
    }

    /// Runs one generation: cull, reproduce, re-rank.
    ///
    /// Ranks first if the population has never been ranked.
    pub fn run_generation(&mut self) {
        if !self.ranked {
            self.rank();
        }

        let survivors = self.cull();
        self.reproduce();

        evaluate_pending(
            self.catalog,
            &mut self.individuals[survivors..],
            self.config.parallel,
        );
        sort_descending(&mut self.individuals);
        self.generation += 1;

        debug!(
            "generation {}: best {:.3}, mean {:.3}",
            self.generation,
            self.best_fitness().unwrap_or(f64::NAN),
            self.mean_fitness().unwrap_or(f64::NAN)
        );
    }

    /// Drops the lower half. Returns the number of survivors.
    fn cull(&mut self) -> usize {
        let survivors = self.individuals.len() / 2;
        self.individuals.truncate(survivors);
        survivors
    }

    /// Breeds offspring from the survivors until the target size is reached.
    ///
    /// Offspring come in pairs; if only one slot remains, the second child
    /// of the last pair is dropped.
    fn reproduce(&mut self) {
        let fitness: Vec<f64> = self
            .individuals
            .iter()
            .map(|ind| ind.fitness().unwrap_or(f64::NEG_INFINITY))
            .collect();
        let weights = softmax(&fitness);
        for (ind, &weight) in self.individuals.iter_mut().zip(&weights) {
            ind.set_mating_probability(weight);
        }

        let parents = self.individuals.len();
        let target = self.config.population_size;
        let rate = self.config.mutation_rate;
        let mut offspring = Vec::with_capacity(target.saturating_sub(parents));
        let mut picker = Picker::new(&weights);

        while parents + offspring.len() < target {
            let (a, b) = pick_parents(&mut picker, &mut self.rng);
            trace!("mating {a} x {b}");
            let (mut first, mut second) =
                self.individuals[a].crossover(&self.individuals[b], &mut self.rng);
            first.mutate(self.catalog, rate, &mut self.rng);
            offspring.push(first);
            if parents + offspring.len() < target {
                second.mutate(self.catalog, rate, &mut self.rng);
                offspring.push(second);
            }
        }

        self.individuals.extend(offspring);
    }

    /// Individuals, best first after the latest ranking.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Whether the population has been ranked at least once.
    pub fn is_ranked(&self) -> bool {
        self.ranked
    }

    /// Best individual of the latest ranking; `None` before the first one.
    pub fn best(&self) -> Option<&Individual> {
        if self.ranked {
            self.individuals.first()
        } else {
            None
        }
    }

    /// Fitness of [`best`](Self::best).
    pub fn best_fitness(&self) -> Option<f64> {
        self.best().and_then(Individual::fitness)
    }

    /// Mean fitness over the population; `None` before the first ranking.
    pub fn mean_fitness(&self) -> Option<f64> {
        if !self.ranked || self.individuals.is_empty() {
            return None;
        }
        let total: f64 = self
            .individuals
            .iter()
            .map(|ind| ind.fitness().unwrap_or(0.0))
            .sum();
        Some(total / self.individuals.len() as f64)
    }

    /// Renders the best schedule as text.
    pub fn describe_best(&self) -> Option<String> {
        self.best().map(|ind| ind.display(self.catalog).to_string())
    }
}

/// Scores every individual in `individuals` that has no fitness yet.
#[cfg(feature = "parallel")]
fn evaluate_pending(catalog: &Catalog, individuals: &mut [Individual], parallel: bool) {
    if parallel {
        let evaluator = FitnessEvaluator::new(catalog);
        individuals
            .par_iter_mut()
            .filter(|ind| !ind.is_evaluated())
            .for_each(|ind| {
                let f = evaluator.evaluate(ind);
                ind.set_fitness(f);
            });
    } else {
        evaluate_sequential(catalog, individuals);
    }
}

/// Scores every individual in `individuals` that has no fitness yet.
#[cfg(not(feature = "parallel"))]
fn evaluate_pending(catalog: &Catalog, individuals: &mut [Individual], _parallel: bool) {
    evaluate_sequential(catalog, individuals);
}

fn evaluate_sequential(catalog: &Catalog, individuals: &mut [Individual]) {
    let evaluator = FitnessEvaluator::new(catalog);
    for ind in individuals.iter_mut().filter(|ind| !ind.is_evaluated()) {
        let f = evaluator.evaluate(ind);
        ind.set_fitness(f);
    }
}

/// Stable sort, highest fitness first.
fn sort_descending(individuals: &mut [Individual]) {
    individuals.sort_by(|a, b| {
        let fa = a.fitness().unwrap_or(f64::NEG_INFINITY);
        let fb = b.fitness().unwrap_or(f64::NEG_INFINITY);
        fb.total_cmp(&fa)
    });
}

// ============================================================================
// Tests
// ============================================================================
