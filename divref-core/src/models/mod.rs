pub mod haplotype;
pub mod interval;
pub mod mapping;
pub mod variant;

// re-export for cleaner imports
pub use self::haplotype::{Haplotype, HaplotypeRecord, HaplotypeSummary};
pub use self::interval::Interval;
pub use self::mapping::ReferenceMapping;
pub use self::variant::{Variant, parse_variant_list};
