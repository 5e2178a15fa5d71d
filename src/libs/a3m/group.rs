use crate::libs::a3m::header::{parse_chain_names, A3mHeader};
use crate::libs::a3m::split::{split_by_chains, visible_len};
use crate::libs::error::MsaError;
use indexmap::IndexMap;

/// Rows of each chain keyed by chain name, in source order.
pub type PerChainAlignment = IndexMap<String, Vec<String>>;

/// A multi-chain A3M held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct A3m {
    pub header: A3mHeader,
    pub chain_names: Vec<String>,
    /// Everything after the header line: the chain-name marker, the query,
    /// then alternating hit headers and sequences.
    pub rows: Vec<String>,
}

impl A3m {
    /// Builds the alignment from raw lines. Lines are trimmed and blank
    /// lines ignored. The query must span exactly the declared width.
    ///
    /// ```
    /// let a3m = afmsa::A3m::from_lines(["#3,2\t1,1", ">101\t102", "ABCDE"]).unwrap();
    /// assert_eq!(a3m.chain_names, vec!["101", "102"]);
    /// assert_eq!(a3m.query_segments(), vec!["ABC", "DE"]);
    /// ```
    pub fn from_lines<I, S>(lines: I) -> Result<Self, MsaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = lines
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty());

        let header = match lines.next() {
            Some(line) => A3mHeader::parse(&line)?,
            None => return Err(MsaError::MalformedHeader("empty input".to_string())),
        };
        let rows: Vec<String> = lines.collect();
        if rows.len() < 2 || !rows[0].starts_with('>') {
            return Err(MsaError::MalformedHeader(
                "missing chain-name line or query sequence".to_string(),
            ));
        }

        let chain_names = parse_chain_names(&rows[0]);
        if chain_names.len() != header.chain_count() {
            return Err(MsaError::ChainCountMismatch {
                lengths: header.chain_count(),
                names: chain_names.len(),
            });
        }
        for (i, name) in chain_names.iter().enumerate() {
            if chain_names[..i].contains(name) {
                return Err(MsaError::MalformedHeader(format!(
                    "duplicate chain name {}",
                    name
                )));
            }
        }

        let found = visible_len(&rows[1]);
        if found != header.total_len() {
            return Err(MsaError::LengthMismatch {
                expected: header.total_len(),
                found,
            });
        }

        Ok(Self {
            header,
            chain_names,
            rows,
        })
    }

    pub fn query(&self) -> &str {
        &self.rows[1]
    }

    /// The query cut into its chains.
    pub fn query_segments(&self) -> Vec<&str> {
        split_by_chains(self.query(), &self.header.lengths)
    }

    /// Every row, split vertically into one alignment per chain.
    pub fn group_by_chain(&self) -> PerChainAlignment {
        group_rows(&self.header.lengths, &self.chain_names, &self.rows)
    }
}

/// Headers (`>` lines) are copied to every chain; sequence rows are cut
/// with [`split_by_chains`] and each segment goes to its own chain.
pub fn group_rows<S: AsRef<str>>(
    lengths: &[usize],
    chain_names: &[String],
    rows: &[S],
) -> PerChainAlignment {
    let mut per_chain: PerChainAlignment = chain_names
        .iter()
        .map(|name| (name.clone(), Vec::with_capacity(rows.len())))
        .collect();

    for row in rows {
        let row = row.as_ref();
        if row.starts_with('>') {
            for chain_rows in per_chain.values_mut() {
                chain_rows.push(row.to_string());
            }
        } else {
            let segments = split_by_chains(row.trim(), lengths);
            for (chain_rows, segment) in per_chain.values_mut().zip(segments) {
                chain_rows.push(segment.to_string());
            }
        }
    }

    per_chain
}
