#![crate_name = "genepop"]
//! Read, reshape and write population genetics records in the GenePop format.
//!
//! A [`Record`] is built by [`parse`] (or by hand), mutated in place with the
//! removal methods, split into independent records with [`Partition`], and
//! turned back into text with [`serialize`].

pub mod prelude;

pub mod error;
pub mod genotype;
pub mod matrix;
pub mod parser;
pub mod partition;
pub mod writer;

pub use error::{GenePopError, Result};
pub use genotype::{Allele, AllelePair, Width};
pub use matrix::AlleleMatrix;
pub use parser::{parse, ParserBuilder};
pub use partition::{split_in_loci, split_in_pops, Partition};
pub use writer::{serialize, write_record};

pub type Genotypes = Vec<AllelePair>;
pub type Loci = Vec<String>;

/// One genotyped individual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub name: String,
    /// One pair per locus, in the order of the owning record's loci.
    pub genotypes: Genotypes,
}

impl Individual {
    pub fn new(name: &str, genotypes: Genotypes) -> Self {
        Self {
            name: name.into(),
            genotypes,
        }
    }
}

/// An ordered group of individuals. The format does not name populations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    fn remove_locus(&mut self, pos: usize) {
        for individual in self.individuals.iter_mut() {
            individual.genotypes.remove(pos);
        }
    }

    /// Copy of this population keeping only the genotype at `pos`.
    fn project_locus(&self, pos: usize) -> Self {
        Self {
            individuals: self
                .individuals
                .iter()
                .map(|individual| Individual {
                    name: individual.name.clone(),
                    genotypes: vec![individual.genotypes[pos]],
                })
                .collect(),
        }
    }
}

impl From<Vec<Individual>> for Population {
    fn from(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }
}

/// The complete contents of one GenePop file.
///
/// Every individual of every population holds exactly one genotype per
/// locus, aligned with `loci()`. All mutation goes through methods that
/// keep this true.
#[derive(Debug, Clone)]
pub struct Record {
    comment: String,
    loci: Loci,
    populations: Vec<Population>,
    marker_width: Option<Width>,
}

impl PartialEq for Record {
    // The genotype width is formatting metadata, not content.
    fn eq(&self, other: &Self) -> bool {
        self.comment == other.comment
            && self.loci == other.loci
            && self.populations == other.populations
    }
}

impl Eq for Record {}

impl Record {
    /// Constructs a `Record` with no populations.
    pub fn new(comment: &str, loci: Loci) -> Self {
        Self {
            comment: comment.into(),
            loci,
            populations: vec![],
            marker_width: None,
        }
    }

    pub(crate) fn from_parts(
        comment: String,
        loci: Loci,
        populations: Vec<Population>,
        marker_width: Option<Width>,
    ) -> Self {
        Self {
            comment,
            loci,
            populations,
            marker_width,
        }
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn loci(&self) -> &[String] {
        &self.loci
    }

    pub fn populations(&self) -> &[Population] {
        &self.populations
    }

    pub fn population(&self, pos: usize) -> Option<&Population> {
        self.populations.get(pos)
    }

    /// Total number of individuals across all populations.
    pub fn n_individuals(&self) -> usize {
        self.populations.iter().map(Population::len).sum()
    }

    /// Genotype width this record was read with, if it was parsed.
    pub fn marker_width(&self) -> Option<Width> {
        self.marker_width
    }

    /// Overrides the genotype width used when writing.
    pub fn set_marker_width(&mut self, width: Option<Width>) {
        self.marker_width = width;
    }

    /// Appends a population after checking every individual's genotype count.
    pub fn add_population(&mut self, population: Population) -> Result<()> {
        let expected = self.loci.len();
        if let Some(individual) = population
            .individuals
            .iter()
            .find(|individual| individual.genotypes.len() != expected)
        {
            return Err(GenePopError::LocusCountMismatch {
                line: 0,
                individual: individual.name.clone(),
                expected,
                found: individual.genotypes.len(),
            });
        }
        self.populations.push(population);
        Ok(())
    }

    /// Removes the population at `pos`, shifting later populations down.
    pub fn remove_population(&mut self, pos: usize) -> Result<()> {
        if pos >= self.populations.len() {
            return Err(GenePopError::IndexOutOfRange {
                index: pos,
                len: self.populations.len(),
            });
        }
        self.populations.remove(pos);
        log::debug!(
            "removed population {}, {} remain",
            pos,
            self.populations.len()
        );
        Ok(())
    }

    /// Removes the locus at `pos` and its genotype from every individual.
    pub fn remove_locus_by_position(&mut self, pos: usize) -> Result<()> {
        if pos >= self.loci.len() {
            return Err(GenePopError::IndexOutOfRange {
                index: pos,
                len: self.loci.len(),
            });
        }
        self.drop_locus(pos);
        Ok(())
    }

    // `pos` must be a valid locus index.
    fn drop_locus(&mut self, pos: usize) {
        let name = self.loci.remove(pos);
        for population in self.populations.iter_mut() {
            population.remove_locus(pos);
        }
        log::debug!("removed locus {} ({:?})", pos, name);
    }

    /// Removes the first locus called `name`.
    ///
    /// An unknown name leaves the record untouched and is not an error.
    pub fn remove_locus_by_name(&mut self, name: &str) {
        match self.loci.iter().position(|locus| locus == name) {
            Some(pos) => self.drop_locus(pos),
            None => log::debug!("locus {:?} not present, nothing removed", name),
        }
    }

    /// Fresh record with the same comment and width holding only the
    /// genotype for locus `pos`.
    pub(crate) fn project_locus(&self, pos: usize) -> Self {
        Self {
            comment: self.comment.clone(),
            loci: vec![self.loci[pos].clone()],
            populations: self
                .populations
                .iter()
                .map(|population| population.project_locus(pos))
                .collect(),
            marker_width: self.marker_width,
        }
    }

    /// Fresh record with all loci and only population `pos`.
    pub(crate) fn project_population(&self, pos: usize) -> Self {
        Self {
            comment: self.comment.clone(),
            loci: self.loci.clone(),
            populations: vec![self.populations[pos].clone()],
            marker_width: self.marker_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn sample_record() -> Result<Record> {
        let mut record = Record::new(
            "Simple",
            vec!["loci1".into(), "another".into(), "and finally".into()],
        );
        record.add_population(Population::from(vec![
            Individual::new(
                "Ind1",
                vec![(1, 2).into(), (3, 3).into(), (200, 201).into()],
            ),
            Individual::new(
                "Ind2",
                vec![
                    AllelePair::new(Some(2), None),
                    (3, 3).into(),
                    AllelePair::missing(),
                ],
            ),
        ]))?;
        record.add_population(Population::from(vec![Individual::new(
            "Other1",
            vec![(1, 1).into(), (4, 3).into(), (200, 200).into()],
        )]))?;
        record.add_population(Population::new())?;
        Ok(record)
    }

    #[test]
    fn test_remove_population_shifts_later_populations() -> Result<(), Box<dyn Error>> {
        let mut record = sample_record()?;
        record.remove_population(0)?;
        assert_eq!(record.populations().len(), 2);
        let first = record.population(0).ok_or("missing population")?;
        assert_eq!(first.len(), 1);
        assert_eq!(first.individuals()[0].name, "Other1");
        Ok(())
    }

    #[test]
    fn test_remove_population_out_of_range() -> Result<(), Box<dyn Error>> {
        let mut record = sample_record()?;
        assert!(matches!(
            record.remove_population(3),
            Err(GenePopError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(record, sample_record()?);
        Ok(())
    }

    #[test]
    fn test_remove_locus_by_position_drops_genotype_column() -> Result<(), Box<dyn Error>> {
        let mut record = sample_record()?;
        record.remove_locus_by_position(0)?;
        assert_eq!(record.loci(), &["another", "and finally"]);
        for population in record.populations() {
            for individual in population.individuals() {
                assert_eq!(individual.genotypes.len(), 2);
            }
        }
        let ind1 = &record.populations()[0].individuals()[0];
        assert_eq!(
            ind1.genotypes,
            vec![AllelePair::from((3, 3)), AllelePair::from((200, 201))]
        );
        Ok(())
    }

    #[test]
    fn test_remove_locus_by_position_out_of_range() -> Result<(), Box<dyn Error>> {
        let mut record = sample_record()?;
        assert!(record.remove_locus_by_position(3).is_err());
        assert_eq!(record.loci().len(), 3);
        Ok(())
    }

    #[test]
    fn test_remove_locus_by_name() -> Result<(), Box<dyn Error>> {
        let mut record = sample_record()?;
        record.remove_locus_by_name("another");
        assert_eq!(record.loci(), &["loci1", "and finally"]);
        let other1 = &record.populations()[1].individuals()[0];
        assert_eq!(
            other1.genotypes,
            vec![AllelePair::from((1, 1)), AllelePair::from((200, 200))]
        );
        Ok(())
    }

    #[test]
    fn test_remove_unknown_locus_is_a_no_op() -> Result<(), Box<dyn Error>> {
        let mut record = sample_record()?;
        record.remove_locus_by_name("does-not-exist");
        assert_eq!(record, sample_record()?);
        Ok(())
    }

    #[test]
    fn test_add_population_rejects_short_genotypes() {
        let mut record = Record::new("", vec!["a".into(), "b".into()]);
        let result = record.add_population(Population::from(vec![Individual::new(
            "x",
            vec![(1, 1).into()],
        )]));
        assert!(matches!(
            result,
            Err(GenePopError::LocusCountMismatch {
                expected: 2,
                found: 1,
                ..
            })
        ));
        assert!(record.populations().is_empty());
    }

    #[test]
    fn test_equality_ignores_marker_width() -> Result<(), Box<dyn Error>> {
        let mut record = sample_record()?;
        record.set_marker_width(Some(Width::Two));
        assert_eq!(record, sample_record()?);
        assert_eq!(record.n_individuals(), 3);
        Ok(())
    }
}
