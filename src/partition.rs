//! Splitting a record into independent single-locus or single-population records.

use crate::error::{GenePopError, Result};
use crate::Record;
use std::collections::BTreeMap;

/// Derived records keyed by locus or population name.
pub type Partitions = BTreeMap<String, Record>;

pub trait Partition {
    /// One record per locus, each holding every population with only that locus.
    ///
    /// Loci sharing a name collapse into one entry; the later locus wins.
    fn split_in_loci(&self) -> Partitions;

    /// One record per population, keyed by `pop_names[i]` for population `i`.
    ///
    /// Repeated names collapse into one entry; the later population wins.
    fn split_in_pops<S: AsRef<str>>(&self, pop_names: &[S]) -> Result<Partitions>;
}

impl Partition for Record {
    fn split_in_loci(&self) -> Partitions {
        let partitions: Partitions = self
            .loci()
            .iter()
            .enumerate()
            .map(|(pos, name)| (name.clone(), self.project_locus(pos)))
            .collect();
        log::debug!(
            "split {} loci into {} records",
            self.loci().len(),
            partitions.len()
        );
        partitions
    }

    fn split_in_pops<S: AsRef<str>>(&self, pop_names: &[S]) -> Result<Partitions> {
        if pop_names.len() != self.populations().len() {
            return Err(GenePopError::ArityMismatch {
                expected: self.populations().len(),
                found: pop_names.len(),
            });
        }
        let partitions: Partitions = pop_names
            .iter()
            .enumerate()
            .map(|(pos, name)| (name.as_ref().to_owned(), self.project_population(pos)))
            .collect();
        log::debug!(
            "split {} populations into {} records",
            pop_names.len(),
            partitions.len()
        );
        Ok(partitions)
    }
}

pub fn split_in_loci(record: &Record) -> Partitions {
    record.split_in_loci()
}

pub fn split_in_pops<S: AsRef<str>>(record: &Record, pop_names: &[S]) -> Result<Partitions> {
    record.split_in_pops(pop_names)
}
