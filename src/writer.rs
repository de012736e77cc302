//! Writing a [`Record`] back to GenePop text.
//!
//! Output is canonical: one locus name per line and `name , field field ...`
//! individual lines. Genotypes use the width the record was parsed with, or
//! three digits for records built by hand.

use crate::error::Result;
use crate::genotype::{encode_field, Width};
use crate::{Individual, Record};
use std::io::Write;

/// Renders the full GenePop text of `record`.
pub fn serialize(record: &Record) -> Result<String> {
    let width = record.marker_width().unwrap_or_default();

    let mut text = String::new();
    text.push_str(record.comment());
    text.push('\n');
    for locus in record.loci() {
        text.push_str(locus);
        text.push('\n');
    }
    for population in record.populations() {
        text.push_str("Pop\n");
        for individual in population.individuals() {
            text.push_str(&individual_line(individual, width)?);
            text.push('\n');
        }
    }
    Ok(text)
}

fn individual_line(individual: &Individual, width: Width) -> Result<String> {
    let fields = individual
        .genotypes
        .iter()
        .map(|pair| encode_field(pair, width))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("{} , {}", individual.name, fields.join(" ")))
}

/// Serializes `record` into `writer`. Nothing is written if encoding fails.
pub fn write_record<W: Write>(record: &Record, mut writer: W) -> Result<()> {
    let text = serialize(record)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}
