use crate::libs::a3m::header::A3mHeader;
use crate::libs::a3m::pairing::ChainEntries;
use std::collections::BTreeSet;

/// Paired rows across all chains.
///
/// Headers from every chain are unioned and sorted, so the output does not
/// depend on the order chains or hits were supplied in. A chain lacking a
/// header contributes a gap run of its declared length.
pub fn build_paired(chains: &[ChainEntries], lengths: &[usize]) -> Vec<String> {
    let headers: BTreeSet<&str> = chains
        .iter()
        .flat_map(|c| c.paired.keys().map(|k| k.as_str()))
        .collect();

    let mut rows = Vec::with_capacity(headers.len() * 2);
    for header in headers {
        let mut seq = String::new();
        for (chain, &len) in chains.iter().zip(lengths) {
            match chain.paired.get(header) {
                Some(segment) => seq.push_str(segment),
                None => seq.push_str(&"-".repeat(len)),
            }
        }
        rows.push(header.to_string());
        rows.push(seq);
    }

    rows
}

/// Unpaired rows, each padded with gaps to the full width.
///
/// Chains are visited in order and hits keep their order within a chain.
/// Every hit becomes its own row; rows of different chains are never merged.
pub fn build_unpaired(chains: &[ChainEntries], lengths: &[usize]) -> Vec<String> {
    let mut rows = vec![];

    for (i, chain) in chains.iter().enumerate() {
        let before = "-".repeat(lengths.iter().take(i).sum());
        let after = "-".repeat(lengths.iter().skip(i + 1).sum());

        for (header, seq) in &chain.unpaired {
            rows.push(header.clone());
            rows.push(format!("{}{}{}", before, seq, after));
        }
    }

    rows
}

/// Assembles a full alignment: header line, paired rows, unpaired rows.
///
/// ```
/// use afmsa::{merge_chains, A3mHeader, ChainEntries};
///
/// let a = ChainEntries::from_rows(&[">p\t1", "AB", ">u", "Ab"]);
/// let b = ChainEntries::from_rows(&[">p\t1", "C"]);
/// let header = A3mHeader::new(vec![2, 1], vec![1, 1]);
///
/// let lines = merge_chains(&[a, b], &header);
/// assert_eq!(lines, vec!["#2,1\t1,1", ">p\t1", "ABC", ">u", "Ab-"]);
/// ```
pub fn merge_chains(chains: &[ChainEntries], header: &A3mHeader) -> Vec<String> {
    let mut lines = vec![header.to_string()];
    lines.extend(build_paired(chains, &header.lengths));
    lines.extend(build_unpaired(chains, &header.lengths));
    lines
}
