use crate::libs::error::MsaError;
use itertools::Itertools;
use std::fmt;

/// The canonical first line, `#<lengths>\t<copies>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct A3mHeader {
    /// Visible columns of each chain
    pub lengths: Vec<usize>,
    /// Stoichiometry of each chain, may be shorter than `lengths`
    pub copies: Vec<usize>,
}

impl A3mHeader {
    pub fn new(lengths: Vec<usize>, copies: Vec<usize>) -> Self {
        Self { lengths, copies }
    }

    /// Parses the canonical header line.
    ///
    /// ```
    /// let header = afmsa::A3mHeader::parse("#3,4,2\t1,2,1").unwrap();
    /// assert_eq!(header.lengths, vec![3, 4, 2]);
    /// assert_eq!(header.copies_of(1), 2);
    /// assert_eq!(header.total_len(), 9);
    /// ```
    pub fn parse(line: &str) -> Result<Self, MsaError> {
        let body = line
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| MsaError::MalformedHeader(line.to_string()))?;

        let mut fields = body.split_whitespace();
        let lengths = match fields.next() {
            Some(field) => parse_list(field, line)?,
            None => return Err(MsaError::MalformedHeader(line.to_string())),
        };
        if lengths.iter().any(|&l| l == 0) {
            return Err(MsaError::MalformedHeader(line.to_string()));
        }
        let copies = match fields.next() {
            Some(field) => parse_list(field, line)?,
            None => vec![],
        };

        Ok(Self { lengths, copies })
    }

    pub fn chain_count(&self) -> usize {
        self.lengths.len()
    }

    /// Sum of declared lengths, the visible width of every row.
    pub fn total_len(&self) -> usize {
        self.lengths.iter().sum()
    }

    /// Copy count of the 0-based chain `idx`, `1` when undeclared.
    pub fn copies_of(&self, idx: usize) -> usize {
        self.copies.get(idx).copied().unwrap_or(1)
    }
}

impl fmt::Display for A3mHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}\t{}",
            self.lengths.iter().join(","),
            self.copies.iter().join(",")
        )
    }
}

fn parse_list(field: &str, line: &str) -> Result<Vec<usize>, MsaError> {
    field
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<usize>()
                .map_err(|_| MsaError::MalformedHeader(line.to_string()))
        })
        .collect()
}

/// Splits the chain-name marker line `>101\t102` into its identifiers.
pub fn parse_chain_names(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('>').unwrap_or(line);
    line.split('\t').map(|s| s.to_string()).collect()
}

/// Numbering of chain identifiers in headers: chain `k` (1-based) is
/// written as `>{offset + k}`, so `>101`, `>102`, ... by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainIds {
    pub offset: usize,
}

impl Default for ChainIds {
    fn default() -> Self {
        Self { offset: 100 }
    }
}

impl ChainIds {
    pub fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// Identifier of the 1-based chain `chain`.
    pub fn id(&self, chain: usize) -> usize {
        self.offset + chain
    }

    /// `>101\t102\t...` for `count` chains.
    pub fn marker_line(&self, count: usize) -> String {
        format!(">{}", (1..=count).map(|k| self.id(k)).join("\t"))
    }

    /// Prefix of the header opening the combined cross-chain block, `>101\t102`.
    pub fn paired_prefix(&self) -> String {
        format!(">{}\t{}", self.id(1), self.id(2))
    }

    /// The 1-based chain a `>1xx` header names, if its first field is a
    /// chain identifier.
    ///
    /// ```
    /// let ids = afmsa::ChainIds::default();
    /// assert_eq!(ids.chain_of(">102"), Some(2));
    /// assert_eq!(ids.chain_of(">101\t102"), Some(1));
    /// assert_eq!(ids.chain_of(">UniRef100_A0A\t98"), None);
    /// assert_eq!(ids.chain_of(">100"), None);
    /// ```
    pub fn chain_of(&self, header: &str) -> Option<usize> {
        let first = header.strip_prefix('>')?.split('\t').next()?.trim_end();
        let id = first.parse::<usize>().ok()?;
        if id > self.offset {
            Some(id - self.offset)
        } else {
            None
        }
    }
}
