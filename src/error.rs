//! Errors raised while reading, reshaping or writing GenePop records.

use thiserror::Error;

/// Every failure the engine reports to its caller.
///
/// Line numbers are 1-based. Errors raised by the genotype codec outside of
/// a parse carry line 0.
#[derive(Error, Debug)]
pub enum GenePopError {
    /// Structural problem in the text (section order, separators, markers).
    #[error("line {line}: {reason}")]
    Format { line: usize, reason: String },

    /// The first `Pop` marker was reached before any locus name.
    #[error("line {line}: no locus names before the first Pop marker")]
    EmptyLociList { line: usize },

    /// A genotype field whose length does not match the genotype width.
    #[error("line {line}: genotype field `{field}` is not two {width}-digit alleles")]
    MalformedGenotype {
        line: usize,
        field: String,
        width: usize,
    },

    /// An individual with a genotype count different from the locus count.
    #[error("line {line}: individual `{individual}` has {found} genotypes, expected {expected}")]
    LocusCountMismatch {
        line: usize,
        individual: String,
        expected: usize,
        found: usize,
    },

    #[error("allele {allele} does not fit in {width} digits")]
    AlleleOverflow { allele: u32, width: usize },

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("expected {expected} population names, got {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = GenePopError> = std::result::Result<T, E>;

impl GenePopError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            reason: reason.into(),
        }
    }

    /// Attaches a line number to errors that carry one.
    pub(crate) fn at_line(self, at: usize) -> Self {
        match self {
            Self::Format { reason, .. } => Self::Format { line: at, reason },
            Self::EmptyLociList { .. } => Self::EmptyLociList { line: at },
            Self::MalformedGenotype { field, width, .. } => Self::MalformedGenotype {
                line: at,
                field,
                width,
            },
            Self::LocusCountMismatch {
                individual,
                expected,
                found,
                ..
            } => Self::LocusCountMismatch {
                line: at,
                individual,
                expected,
                found,
            },
            other => other,
        }
    }

    /// The input line this error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Format { line, .. }
            | Self::EmptyLociList { line }
            | Self::MalformedGenotype { line, .. }
            | Self::LocusCountMismatch { line, .. } => Some(*line),
            _ => None,
        }
    }
}
