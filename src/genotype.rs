//! Encoding and decoding of single genotype fields.
//!
//! A GenePop genotype field is a run of digits holding two alleles of
//! equal width, e.g. `0102` (width 2) or `200201` (width 3). An allele made
//! only of zeros is missing data.

use crate::error::{GenePopError, Result};
use std::fmt;

/// An allele code. `None` is missing data.
pub type Allele = Option<u32>;

/// Number of digits per allele. This is a property of the whole file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    Two,
    Three,
}

impl Width {
    pub fn digits(self) -> usize {
        match self {
            Width::Two => 2,
            Width::Three => 3,
        }
    }

    /// Largest allele code representable in this width.
    pub fn max_allele(self) -> u32 {
        match self {
            Width::Two => 99,
            Width::Three => 999,
        }
    }
}

impl Default for Width {
    fn default() -> Self {
        Width::Three
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digits())
    }
}

/// The two alleles one individual carries at one locus.
///
/// Zero is the format's missing sentinel, so a zero code given to
/// [`AllelePair::new`] is stored as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AllelePair {
    first: Allele,
    second: Allele,
}

impl AllelePair {
    pub fn new(first: Allele, second: Allele) -> Self {
        Self {
            first: first.filter(|&code| code != 0),
            second: second.filter(|&code| code != 0),
        }
    }

    /// A pair with both alleles missing.
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn first(&self) -> Allele {
        self.first
    }

    pub fn second(&self) -> Allele {
        self.second
    }

    pub fn alleles(&self) -> (Allele, Allele) {
        (self.first, self.second)
    }

    pub fn is_missing(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }
}

impl From<(u32, u32)> for AllelePair {
    fn from((first, second): (u32, u32)) -> Self {
        Self::new(Some(first), Some(second))
    }
}

fn malformed(field: &str, width: Width) -> GenePopError {
    GenePopError::MalformedGenotype {
        line: 0,
        field: field.to_owned(),
        width: width.digits(),
    }
}

/// Picks the genotype width from the first field of a file.
///
/// Six digits is read as two 3-digit alleles, four digits as two 2-digit
/// alleles. Anything else cannot open a file.
pub fn detect_width(field: &str) -> Result<Width> {
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(field, Width::default()));
    }
    match field.len() {
        6 => Ok(Width::Three),
        4 => Ok(Width::Two),
        _ => Err(malformed(field, Width::default())),
    }
}

/// Decodes one genotype field at an already established width.
pub fn decode_field(field: &str, width: Width) -> Result<AllelePair> {
    let digits = width.digits();
    if field.len() != 2 * digits || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(field, width));
    }
    let (first, second) = field.split_at(digits);
    Ok(AllelePair::new(decode_allele(first), decode_allele(second)))
}

// Callers guarantee `group` is 2 or 3 ASCII digits, so the fold cannot overflow.
fn decode_allele(group: &str) -> Allele {
    let code = group
        .bytes()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
    Some(code).filter(|&code| code != 0)
}

/// Encodes a pair as one fixed-width genotype field.
pub fn encode_field(pair: &AllelePair, width: Width) -> Result<String> {
    let mut field = String::with_capacity(2 * width.digits());
    for allele in &[pair.first, pair.second] {
        field.push_str(&encode_allele(*allele, width)?);
    }
    Ok(field)
}

fn encode_allele(allele: Allele, width: Width) -> Result<String> {
    let digits = width.digits();
    match allele {
        None => Ok("0".repeat(digits)),
        Some(code) if code > width.max_allele() => Err(GenePopError::AlleleOverflow {
            allele: code,
            width: digits,
        }),
        Some(code) => Ok(format!("{:0width$}", code, width = digits)),
    }
}
