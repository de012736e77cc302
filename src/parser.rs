//! Reading GenePop text into a [`Record`].
//!
//! The grammar is line oriented:
//!
//! ```text
//! comment line
//! locus names, one per line or comma separated
//! Pop
//! name , 0101 0202 ...
//! Pop
//! ...
//! ```
//!
//! `Pop` markers match case-insensitively after trimming. The genotype width
//! is detected from the first genotype field unless the builder forces one.

use crate::error::{GenePopError, Result};
use crate::genotype::{decode_field, detect_width, Width};
use crate::{Genotypes, Individual, Loci, Population, Record};
use std::io::Read;

/// Parses a complete GenePop text with width auto-detection.
pub fn parse(text: &str) -> Result<Record> {
    ParserBuilder::new().from_str(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Comment,
    ReadingLoci,
    InPopulation,
}

/// How a line in the locus section is read.
enum LocusLine<'a> {
    Blank,
    Single(&'a str),
    List(&'a str),
}

fn classify_locus_line(line: &str) -> LocusLine<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LocusLine::Blank
    } else if trimmed.contains(',') {
        LocusLine::List(trimmed)
    } else {
        LocusLine::Single(trimmed)
    }
}

fn is_pop_marker(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("pop")
}

fn split_locus_list(line_no: usize, line: &str) -> Result<Vec<String>> {
    // No quoting in GenePop: every comma separates two names.
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());

    let mut names = vec![];
    for row in rdr.records() {
        let row = row.map_err(|e| GenePopError::format(line_no, e.to_string()))?;
        names.extend(
            row.iter()
                .filter(|name| !name.is_empty())
                .map(String::from),
        );
    }
    Ok(names)
}

/// Single forward pass over the lines of one file.
struct Parser {
    state: State,
    width: Option<Width>,
    comment: String,
    loci: Loci,
    populations: Vec<Population>,
}

impl Parser {
    fn new(width: Option<Width>) -> Self {
        Self {
            state: State::Comment,
            width,
            comment: String::new(),
            loci: vec![],
            populations: vec![],
        }
    }

    fn feed(&mut self, line_no: usize, line: &str) -> Result<()> {
        match self.state {
            State::Comment => {
                self.comment = line.to_owned();
                self.state = State::ReadingLoci;
            }
            State::ReadingLoci if is_pop_marker(line) => {
                if self.loci.is_empty() {
                    return Err(GenePopError::EmptyLociList { line: line_no });
                }
                self.populations.push(Population::new());
                self.state = State::InPopulation;
            }
            State::ReadingLoci => self.accumulate_loci(line_no, line)?,
            State::InPopulation if is_pop_marker(line) => {
                self.populations.push(Population::new());
            }
            State::InPopulation if line.trim().is_empty() => {}
            State::InPopulation => self.read_individual(line_no, line)?,
        }
        Ok(())
    }

    fn accumulate_loci(&mut self, line_no: usize, line: &str) -> Result<()> {
        match classify_locus_line(line) {
            LocusLine::Blank => {}
            LocusLine::Single(name) => self.loci.push(name.to_owned()),
            LocusLine::List(names) => {
                let names = split_locus_list(line_no, names)?;
                self.loci.extend(names);
            }
        }
        Ok(())
    }

    fn read_individual(&mut self, line_no: usize, line: &str) -> Result<()> {
        let (name, fields) = line.split_once(',').ok_or_else(|| {
            GenePopError::format(line_no, "individual line has no `,` after the name")
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(GenePopError::format(line_no, "individual line has no name"));
        }

        let fields: Vec<&str> = fields.split_whitespace().collect();
        if fields.len() != self.loci.len() {
            return Err(GenePopError::LocusCountMismatch {
                line: line_no,
                individual: name.to_owned(),
                expected: self.loci.len(),
                found: fields.len(),
            });
        }

        let width = match self.width {
            Some(width) => width,
            None => {
                // Loci are never empty here, so there is a first field.
                let width = detect_width(fields[0]).map_err(|e| e.at_line(line_no))?;
                log::debug!("detected {}-digit alleles at line {}", width, line_no);
                self.width = Some(width);
                width
            }
        };

        let genotypes = fields
            .iter()
            .map(|field| decode_field(field, width))
            .collect::<Result<Genotypes>>()
            .map_err(|e| e.at_line(line_no))?;

        match self.populations.last_mut() {
            Some(population) => {
                population.push(Individual::new(name, genotypes));
                Ok(())
            }
            None => Err(GenePopError::format(
                line_no,
                "individual before the first Pop marker",
            )),
        }
    }

    fn finish(self, last_line: usize) -> Result<Record> {
        match self.state {
            State::Comment => Err(GenePopError::format(1, "empty input")),
            State::ReadingLoci => Err(GenePopError::format(
                last_line,
                "missing Pop marker after the locus names",
            )),
            State::InPopulation => {
                log::debug!(
                    "parsed {} loci in {} populations ({} individuals)",
                    self.loci.len(),
                    self.populations.len(),
                    self.populations.iter().map(Population::len).sum::<usize>()
                );
                Ok(Record::from_parts(
                    self.comment,
                    self.loci,
                    self.populations,
                    self.width,
                ))
            }
        }
    }
}

/// Configures and runs the GenePop parser.
pub struct ParserBuilder {
    width: Option<Width>,
}

impl ParserBuilder {
    /// Construct a new parser builder that auto-detects the genotype width
    pub fn new() -> Self {
        Self { width: None }
    }

    /// Forces the genotype width instead of detecting it.
    pub fn width(&mut self, width: Width) -> &mut Self {
        self.width = Some(width);
        self
    }

    /// Parses a complete text. Nothing is returned unless the whole text is valid.
    pub fn from_str(&self, text: &str) -> Result<Record> {
        let mut parser = Parser::new(self.width);
        let mut last_line = 0;
        for (idx, line) in text.lines().enumerate() {
            last_line = idx + 1;
            parser.feed(last_line, line)?;
        }
        parser.finish(last_line)
    }

    pub fn from_reader(&self, mut reader: Box<dyn Read>) -> Result<Record> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.from_str(&text)
    }
}

impl Default for ParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}
