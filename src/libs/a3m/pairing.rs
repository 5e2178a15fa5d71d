use indexmap::IndexMap;

/// Header fragments marking hits from environmental databases.
pub const ENV_MARKERS: [&str; 2] = ["E+", "E-"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    Paired,
    Unpaired,
}

/// A header is unpaired if it carries an environmental marker or has no
/// tab at all; every other header is paired across chains.
///
/// ```
/// use afmsa::{classify, Pairing};
/// assert_eq!(classify(">UniRef100_P69905\t0.98"), Pairing::Paired);
/// assert_eq!(classify(">UniRef100_P69905"), Pairing::Unpaired);
/// assert_eq!(classify(">SRR5438\tE+00"), Pairing::Unpaired);
/// ```
pub fn classify(header: &str) -> Pairing {
    if ENV_MARKERS.iter().any(|m| header.contains(m)) || !header.contains('\t') {
        Pairing::Unpaired
    } else {
        Pairing::Paired
    }
}

/// Join key of a header: the header without trailing whitespace.
pub fn normalize_header(header: &str) -> String {
    header.trim_end().to_string()
}

/// One chain's hits, split by [`classify`] into header -> sequence maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainEntries {
    pub paired: IndexMap<String, String>,
    pub unpaired: IndexMap<String, String>,
}

impl ChainEntries {
    /// Reads `rows` as header/sequence pairs. A trailing header without a
    /// sequence is ignored; a repeated header keeps its first position and
    /// takes the latest sequence.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let mut entries = Self::default();

        for pair in rows.chunks_exact(2) {
            let header = normalize_header(pair[0].as_ref());
            let seq = pair[1].as_ref().trim().to_string();
            match classify(&header) {
                Pairing::Paired => entries.paired.insert(header, seq),
                Pairing::Unpaired => entries.unpaired.insert(header, seq),
            };
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(">101\t102"), Pairing::Paired);
        assert_eq!(classify(">101"), Pairing::Unpaired);
        assert_eq!(classify(">hit\tE-05"), Pairing::Unpaired);
        // the marker counts anywhere, even without a tab
        assert_eq!(classify(">E+hit"), Pairing::Unpaired);
    }

    #[test]
    fn test_from_rows() {
        let rows = [
            ">101\t102",
            "ABC",
            ">101",
            "ABC",
            ">pa\tx",
            "A-C",
            ">env\tE+0",
            "AbBC",
            ">pa\tx",
            "AAC",
            ">dangling",
        ];
        let entries = ChainEntries::from_rows(&rows);

        assert_eq!(
            entries.paired.keys().collect::<Vec<_>>(),
            vec![">101\t102", ">pa\tx"]
        );
        assert_eq!(entries.paired[">pa\tx"], "AAC");
        assert_eq!(
            entries.unpaired.keys().collect::<Vec<_>>(),
            vec![">101", ">env\tE+0"]
        );
        assert_eq!(entries.unpaired[">env\tE+0"], "AbBC");
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(">hit\tx \r"), ">hit\tx");
    }
}
