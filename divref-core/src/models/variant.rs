use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::DivRefError;

///
/// A single reference-to-allele edit, `chrom:pos:ref:alt`, with a 1-based position.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Variant {
    pub chromosome: String,
    pub position: i64,
    pub reference: String,
    pub alternate: String,
}

impl Variant {
    ///
    /// Render the variant back into its `chrom:pos:ref:alt` token
    ///
    pub fn render(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.chromosome, self.position, self.reference, self.alternate
        )
    }

    /// Number of reference bases replaced by this edit.
    pub fn ref_len(&self) -> i64 {
        self.reference.len() as i64
    }

    /// Number of bases this edit contributes to a haplotype sequence.
    pub fn alt_len(&self) -> i64 {
        self.alternate.len() as i64
    }

    /// First reference position after the edited span.
    pub fn reference_end(&self) -> i64 {
        self.position + self.ref_len()
    }
}

fn is_allele(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphabetic() || b == b'*')
}

impl FromStr for Variant {
    type Err = DivRefError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let malformed = || DivRefError::MalformedVariantToken(token.to_string());

        let fields: Vec<&str> = token.split(':').collect();
        let [chromosome, position, reference, alternate] = fields.as_slice() else {
            return Err(malformed());
        };

        if chromosome.is_empty() || !is_allele(reference) || !is_allele(alternate) {
            return Err(malformed());
        }

        let position = position.parse::<i64>().map_err(|_| malformed())?;
        if position < 1 {
            return Err(malformed());
        }

        Ok(Variant {
            chromosome: chromosome.to_string(),
            position,
            reference: reference.to_string(),
            alternate: alternate.to_string(),
        })
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

///
/// Parse a comma-joined list of variant tokens, as stored in the haplotype table.
///
pub fn parse_variant_list(s: &str) -> Result<Vec<Variant>, DivRefError> {
    s.split(',')
        .filter(|token| !token.trim().is_empty())
        .map(Variant::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_parse_variant() {
        let v: Variant = "chr12:90349349:T:TATG".parse().unwrap();
        assert_eq!(v.chromosome, "chr12");
        assert_eq!(v.position, 90349349);
        assert_eq!(v.reference, "T");
        assert_eq!(v.alternate, "TATG");
        assert_eq!(v.reference_end(), 90349350);
        assert_eq!(v.alt_len(), 4);
    }

    #[rstest]
    #[case("1:500:A:T")]
    #[case("chrX:1:ACGT:A")]
    #[case("chr12:90349349:T:TATGCAAGTG")]
    fn test_render_round_trip(#[case] token: &str) {
        let v: Variant = token.parse().unwrap();
        assert_eq!(v.render(), token);
        assert_eq!(v.render().parse::<Variant>().unwrap(), v);
        assert_eq!(v.to_string(), token);
    }

    #[rstest]
    #[case("1:500:A")]
    #[case("1:500:A:T:G")]
    #[case("1:0:A:T")]
    #[case("1:-4:A:T")]
    #[case("1:abc:A:T")]
    #[case("1:500::T")]
    #[case("1:500:A:")]
    #[case(":500:A:T")]
    #[case("1:500:A:1")]
    fn test_malformed_tokens(#[case] token: &str) {
        let result = token.parse::<Variant>();
        assert_eq!(
            result,
            Err(DivRefError::MalformedVariantToken(token.to_string()))
        );
    }

    #[rstest]
    fn test_parse_variant_list() {
        let vs = parse_variant_list("1:500:A:T, 1:505:C:G,1:510:T:A").unwrap();
        assert_eq!(vs.len(), 3);
        assert_eq!(vs[1].position, 505);
        assert!(parse_variant_list("1:500:A:T,garbage").is_err());
    }
}
