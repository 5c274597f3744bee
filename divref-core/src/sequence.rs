//! Assembly of synthetic haplotype sequences from a reference window.
//!
//! This is the forward direction of [`crate::translate`]: a sequence built here with a given
//! context size is exactly the coordinate space that `VariantIntervals` inverts.
use crate::errors::{DivRefError, Result};
use crate::models::Variant;

///
/// A contiguous stretch of reference bases on one contig, addressed by genomic position.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceWindow {
    pub contig: String,
    /// genomic position of `bases[0]`
    pub start: i64,
    pub bases: Vec<u8>,
}

impl ReferenceWindow {
    pub fn new(contig: &str, start: i64, bases: &str) -> Self {
        ReferenceWindow {
            contig: contig.to_string(),
            start,
            bases: bases.as_bytes().to_vec(),
        }
    }

    pub fn end(&self) -> i64 {
        self.start + self.bases.len() as i64
    }

    ///
    /// Bases at genomic positions `[start, end)`
    ///
    pub fn fetch(&self, start: i64, end: i64) -> Result<&[u8]> {
        if start < self.start || end > self.end() || start > end {
            return Err(DivRefError::ReferenceWindowOutOfBounds {
                contig: self.contig.clone(),
                window_start: self.start,
                window_end: self.end(),
                start,
                end,
            });
        }
        let lo = (start - self.start) as usize;
        let hi = (end - self.start) as usize;
        Ok(&self.bases[lo..hi])
    }
}

///
/// Build the haplotype sequence for `variants` over `reference`.
///
/// The sequence is `context_size` reference bases before the first variant, then each
/// alternate allele followed by the reference bases up to the next variant, and finally
/// `context_size` reference bases after the last variant's reference span.
///
/// # Arguments
///
/// - reference: window covering every base the sequence needs
/// - variants: non-overlapping edits on the window's contig, in any order
/// - context_size: flanking reference bases on either side
///
pub fn haplotype_sequence(
    reference: &ReferenceWindow,
    variants: &[Variant],
    context_size: i64,
) -> Result<String> {
    let mut sorted: Vec<&Variant> = variants.iter().collect();
    sorted.sort_by_key(|v| v.position);

    let Some(first) = sorted.first() else {
        return Err(DivRefError::EmptyHaplotype(reference.contig.clone()));
    };

    for v in sorted.iter() {
        if v.chromosome != reference.contig {
            return Err(DivRefError::MixedChromosomes(
                reference.contig.clone(),
                v.chromosome.clone(),
            ));
        }
    }

    let mut sequence = Vec::new();
    sequence.extend_from_slice(reference.fetch(first.position - context_size, first.position)?);

    for (i, v) in sorted.iter().enumerate() {
        let gap_end = match sorted.get(i + 1) {
            Some(next) if next.position < v.reference_end() => {
                return Err(DivRefError::OverlappingVariants(v.render(), next.render()));
            }
            Some(next) => next.position,
            None => v.reference_end() + context_size,
        };

        sequence.extend_from_slice(v.alternate.as_bytes());
        sequence.extend_from_slice(reference.fetch(v.reference_end(), gap_end)?);
    }

    Ok(String::from_utf8_lossy(&sequence).into_owned())
}
