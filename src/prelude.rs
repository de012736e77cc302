pub use crate::error::{GenePopError, Result};
pub use crate::genotype::{decode_field, detect_width, encode_field, Allele, AllelePair, Width};
pub use crate::matrix::AlleleMatrix;
pub use crate::parser::{parse, ParserBuilder};
pub use crate::partition::{split_in_loci, split_in_pops, Partition};
pub use crate::writer::{serialize, write_record};
pub use crate::{Genotypes, Individual, Loci, Population, Record};
