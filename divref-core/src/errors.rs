use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DivRefError {
    #[error("Malformed variant token (expected chrom:pos:ref:alt): {0}")]
    MalformedVariantToken(String),

    #[error("Malformed frequency value: {0}")]
    MalformedFrequency(String),

    #[error("Invalid query interval [{start}, {end}): start must be >= 0 and less than end")]
    InvalidQueryInterval { start: i64, end: i64 },

    #[error("Haplotype {0} has no variants")]
    EmptyHaplotype(String),

    #[error("Haplotype {id} declares {expected} variants but lists {found}")]
    VariantCountMismatch {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error(
        "Haplotype {id} has {found} frequencies for population {population}, expected {expected}"
    )]
    FrequencyCountMismatch {
        id: String,
        population: String,
        expected: usize,
        found: usize,
    },

    #[error("Variants {0} and {1} overlap or are out of order")]
    OverlappingVariants(String, String),

    #[error("Variants span more than one chromosome: {0} and {1}")]
    MixedChromosomes(String, String),

    #[error("Reference window {contig}:{window_start}-{window_end} does not cover {start}-{end}")]
    ReferenceWindowOutOfBounds {
        contig: String,
        window_start: i64,
        window_end: i64,
        start: i64,
        end: i64,
    },
}

pub type Result<T> = std::result::Result<T, DivRefError>;
