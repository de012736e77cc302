//! Dense allele-code view of a [`Record`].

use crate::Record;
use ndarray::{s, Array2, ArrayView2};
use std::ops::Range;

/// Allele codes of every individual, populations stacked in order.
///
/// Each locus occupies two adjacent columns. Missing alleles are 0, the
/// same sentinel the text format uses.
pub struct AlleleMatrix {
    data: Array2<u32>,
    loci: Vec<(usize, usize)>,
    populations: Vec<Range<usize>>,
}

impl AlleleMatrix {
    pub fn from_record(record: &Record) -> Self {
        let n_loci = record.loci().len();
        let mut data = Array2::<u32>::zeros((record.n_individuals(), 2 * n_loci));
        let mut populations = Vec::with_capacity(record.populations().len());

        let mut row = 0;
        for population in record.populations() {
            let start = row;
            for individual in population.individuals() {
                for (locus, pair) in individual.genotypes.iter().enumerate() {
                    data[[row, 2 * locus]] = pair.first().unwrap_or(0);
                    data[[row, 2 * locus + 1]] = pair.second().unwrap_or(0);
                }
                row += 1;
            }
            populations.push(start..row);
        }

        Self {
            data,
            loci: (0..n_loci).map(|i| (2 * i, 2 * i + 2)).collect(),
            populations,
        }
    }

    pub fn data(&self) -> &Array2<u32> {
        &self.data
    }

    /// (individuals, columns)
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Both allele columns of locus `pos`.
    pub fn locus(&self, pos: usize) -> Option<ArrayView2<'_, u32>> {
        self.loci
            .get(pos)
            .map(|(start, end)| self.data.slice(s![.., *start..*end]))
    }

    /// Rows belonging to population `pos`.
    pub fn population_rows(&self, pos: usize) -> Option<Range<usize>> {
        self.populations.get(pos).cloned()
    }
}
