//! Coordinate translation between haplotype space and reference space.
//!
//! A haplotype sequence starts `context_size` reference bases before its first variant and then
//! alternates between alternate alleles and the reference bases separating them. Every indel
//! shifts the local offset between the two coordinate systems, so a haplotype coordinate is
//! always resolved relative to the nearest edit around it rather than through one global offset.
use crate::models::{Interval, Variant};

/// Which end of a half-open query a coordinate is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Start,
    End,
}

///
/// The haplotype-space intervals of a haplotype's variants, built for one context size.
///
#[derive(Debug, Clone)]
pub struct VariantIntervals<'a> {
    variants: &'a [Variant],
    intervals: Vec<Interval>,
}

impl<'a> VariantIntervals<'a> {
    ///
    /// Project each variant onto the 0-based coordinates of the haplotype sequence.
    ///
    /// Each interval spans the variant's alternate allele, since those are the bases present
    /// in the sequence. `variants` must be non-empty and sorted by position.
    ///
    pub fn build(variants: &'a [Variant], context_size: i64) -> Self {
        let mut intervals = Vec::with_capacity(variants.len());

        let mut offset = variants.first().map_or(0, |v| v.position - context_size);
        for v in variants {
            let start = v.position - offset;
            intervals.push(Interval {
                start,
                end: start + v.alt_len(),
            });
            offset += v.ref_len() - v.alt_len();
        }

        VariantIntervals {
            variants,
            intervals,
        }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    ///
    /// First and last index of the variants intersecting `[start, end)`.
    ///
    /// Intervals are sorted and disjoint, so the hits always form one contiguous run.
    ///
    pub fn overlapping(&self, start: i64, end: i64) -> Option<(usize, usize)> {
        let mut hits = self
            .intervals
            .iter()
            .enumerate()
            .filter(|(_, iv)| iv.overlap(start, end))
            .map(|(i, _)| i);

        let first = hits.next()?;
        let last = hits.last().unwrap_or(first);
        Some((first, last))
    }

    ///
    /// Translate one haplotype-space coordinate into reference space.
    ///
    /// Coordinates in the leading context shift linearly from the first variant. Coordinates
    /// inside an edit snap to the edited reference span: its start for [`Side::Start`], its end
    /// for [`Side::End`]. Anything else is carried from the end of the nearest preceding edit.
    ///
    pub fn to_reference(&self, coord: i64, side: Side) -> i64 {
        let (Some(first_variant), Some(first_interval)) =
            (self.variants.first(), self.intervals.first())
        else {
            return coord;
        };

        if coord < first_interval.start {
            return first_variant.position - (first_interval.start - coord);
        }

        let mut last_smaller = 0;
        for (i, iv) in self.intervals.iter().enumerate() {
            if iv.contains(coord) {
                let v = &self.variants[i];
                return match side {
                    Side::Start => v.position,
                    Side::End => v.reference_end(),
                };
            }

            if iv.start > coord {
                break;
            }

            last_smaller = i;
        }

        let v = &self.variants[last_smaller];
        v.reference_end() + (coord - self.intervals[last_smaller].end)
    }
}
