//! Removal of one chain's alignment data from a multi-chain A3M.
//!
//! The file is read line by line. The target chain's own block (`>10k` and
//! its hits) is dropped. In the cross-chain block opened by `>101\t102`,
//! the query row is kept and the target's columns of every hit become a gap
//! run when other chains still pair with each other; with only two chains the
//! whole block is dropped.

use crate::libs::a3m::header::{A3mHeader, ChainIds};
use crate::libs::a3m::split::split_by_chains;
use crate::libs::error::MsaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalState {
    /// Nothing read yet, the next line must be the `#` header
    AwaitHeader,
    /// Lines are copied unchanged
    Passthrough,
    /// Just past the marker of a paired block with more than two chains; the
    /// next sequence row is the query and is kept as it is
    PairedQuery,
    /// Paired block with more than two chains, the target's columns are gapped
    EditPaired,
    /// Paired block of a dimer, dropped
    SkipPaired,
    /// The target chain's own block, dropped
    SkipChainBlock,
}

/// The chain to remove together with the declared layout it is cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPlan {
    /// 1-based
    pub target: usize,
    pub lengths: Vec<usize>,
    pub ids: ChainIds,
    /// `>101\t102`, the start of the cross-chain block
    pub marker: String,
}

impl RemovalPlan {
    /// Reads the declared lengths from the header line and checks that
    /// `target` names one of the chains.
    pub fn from_header(line: &str, target: usize, ids: ChainIds) -> Result<Self, MsaError> {
        let header = A3mHeader::parse(line)?;
        if target == 0 || target > header.chain_count() {
            return Err(MsaError::InvalidChain {
                chain: target,
                count: header.chain_count(),
            });
        }

        Ok(Self {
            target,
            lengths: header.lengths,
            ids,
            marker: ids.paired_prefix(),
        })
    }

    /// Next state and the line to emit, if any, for one body line.
    pub fn transition(&self, state: RemovalState, line: &str) -> (RemovalState, Option<String>) {
        if line.starts_with(&self.marker) {
            return if self.lengths.len() > 2 {
                (RemovalState::PairedQuery, Some(line.to_string()))
            } else {
                (RemovalState::SkipPaired, None)
            };
        }

        if line.starts_with('>') {
            if self.ids.chain_of(line) == Some(self.target) {
                return (RemovalState::SkipChainBlock, None);
            }
            if !line.contains('\t') {
                return (RemovalState::Passthrough, Some(line.to_string()));
            }
        }

        match state {
            RemovalState::SkipPaired | RemovalState::SkipChainBlock => (state, None),
            RemovalState::PairedQuery if !line.trim().is_empty() => {
                (RemovalState::EditPaired, Some(line.to_string()))
            }
            RemovalState::EditPaired if !line.starts_with('>') && !line.trim().is_empty() => {
                (state, Some(self.gap_target(line)))
            }
            _ => (state, Some(line.to_string())),
        }
    }

    /// Replaces the target chain's segment of a full-width row, insertions
    /// included, with a gap run of its declared length. Other segments are
    /// copied verbatim.
    ///
    /// ```
    /// let plan = afmsa::RemovalPlan::from_header("#3,4,2\t1,1,1", 2, Default::default()).unwrap();
    /// assert_eq!(plan.gap_target("ABCdEFGHIJ"), "ABC----IJ");
    /// ```
    pub fn gap_target(&self, row: &str) -> String {
        let segments = split_by_chains(row.trim_end(), &self.lengths);

        let mut edited = String::with_capacity(row.len());
        for (i, (segment, &len)) in segments.iter().zip(&self.lengths).enumerate() {
            if i + 1 == self.target {
                edited.push_str(&"-".repeat(len));
            } else {
                edited.push_str(segment);
            }
        }
        edited
    }
}

/// Drives a [`RemovalPlan`] over lines as they arrive.
#[derive(Debug, Clone)]
pub struct ChainRemover {
    target: usize,
    ids: ChainIds,
    plan: Option<RemovalPlan>,
    state: RemovalState,
}

impl ChainRemover {
    pub fn new(target: usize, ids: ChainIds) -> Self {
        Self {
            target,
            ids,
            plan: None,
            state: RemovalState::AwaitHeader,
        }
    }

    pub fn state(&self) -> RemovalState {
        self.state
    }

    /// Consumes one line and returns what to write for it.
    pub fn push(&mut self, line: &str) -> Result<Option<String>, MsaError> {
        let (next, emit) = match &self.plan {
            None => {
                let plan = RemovalPlan::from_header(line, self.target, self.ids)?;
                self.plan = Some(plan);
                (RemovalState::Passthrough, Some(line.to_string()))
            }
            Some(plan) => plan.transition(self.state, line),
        };

        if next != self.state {
            log::debug!("{:?} -> {:?} at {:?}", self.state, next, line);
        }
        self.state = next;

        Ok(emit)
    }
}

/// Removes chain `target` (1-based) from an A3M given as lines.
///
/// Fails without producing anything when the header is unusable or the
/// chain does not exist.
pub fn remove_chain<I, S>(lines: I, target: usize, ids: ChainIds) -> Result<Vec<String>, MsaError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut remover = ChainRemover::new(target, ids);
    let mut out = vec![];

    for line in lines {
        if let Some(emit) = remover.push(line.as_ref())? {
            out.push(emit);
        }
    }

    if remover.state() == RemovalState::AwaitHeader {
        return Err(MsaError::MalformedHeader("empty input".to_string()));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::a3m::group::A3m;
    use crate::libs::a3m::split::visible_len;

    fn dimer() -> Vec<&'static str> {
        vec![
            "#3,2\t1,1",
            ">101\t102",
            "ABCDE",
            ">p1\tx",
            "ABC-E",
            ">101",
            "ABC--",
            ">h1\ty",
            "AB---",
            ">102",
            "---DE",
            ">h2\tz",
            "---D-",
        ]
    }

    fn trimer() -> Vec<&'static str> {
        vec![
            "#3,4,2\t1,1,1",
            ">101\t102\t103",
            "MKVLLQRGG",
            ">p1\tx",
            "MKaVLLQRG-",
            ">p2\tx",
            "M-VLxLQRGg",
            ">101",
            "MKV------",
            ">h1\ty",
            "M-V------",
            ">102",
            "---LLQR--",
            ">h2\ty",
            "---LxL-R--",
            ">103",
            "-------GG",
            ">h3\ty",
            "-------G-",
        ]
    }

    #[test]
    fn test_remove_from_dimer() {
        let out = remove_chain(dimer(), 2, ChainIds::default()).unwrap();
        assert_eq!(out, vec!["#3,2\t1,1", ">101", "ABC--", ">h1\ty", "AB---"]);

        let out = remove_chain(dimer(), 1, ChainIds::default()).unwrap();
        assert_eq!(out, vec!["#3,2\t1,1", ">102", "---DE", ">h2\tz", "---D-"]);
    }

    #[test]
    fn test_remove_from_trimer() {
        let out = remove_chain(trimer(), 2, ChainIds::default()).unwrap();
        assert_eq!(
            out,
            vec![
                "#3,4,2\t1,1,1",
                ">101\t102\t103",
                "MKVLLQRGG",
                ">p1\tx",
                "MKaV----G-",
                ">p2\tx",
                "M-V----Gg",
                ">101",
                "MKV------",
                ">h1\ty",
                "M-V------",
                ">103",
                "-------GG",
                ">h3\ty",
                "-------G-",
            ]
        );

        for row in out.iter().skip(1).filter(|l| !l.starts_with('>')) {
            assert_eq!(visible_len(row), 9);
        }
    }

    #[test]
    fn test_remove_last_chain_drops_trailing_insertions() {
        let out = remove_chain(trimer(), 3, ChainIds::default()).unwrap();
        assert_eq!(out[2], "MKVLLQRGG");
        assert_eq!(out[4], "MKaVLLQR--");
        assert_eq!(out[6], "M-VLxLQR--");
        assert!(!out.iter().any(|l| l == ">103"));
    }

    #[test]
    fn test_invalid_chain() {
        for chain in [0, 4, 5] {
            let err = remove_chain(trimer(), chain, ChainIds::default()).unwrap_err();
            assert_eq!(err, MsaError::InvalidChain { chain, count: 3 });
        }
    }

    #[test]
    fn test_missing_header() {
        let err = remove_chain([">101\t102", "ABCDE"], 1, ChainIds::default()).unwrap_err();
        assert!(matches!(err, MsaError::MalformedHeader(_)));

        let err = remove_chain(Vec::<String>::new(), 1, ChainIds::default()).unwrap_err();
        assert!(matches!(err, MsaError::MalformedHeader(_)));
    }

    #[test]
    fn test_transitions() {
        let plan = RemovalPlan::from_header("#3,4,2\t1,1,1", 2, ChainIds::default()).unwrap();

        let (state, emit) = plan.transition(RemovalState::Passthrough, ">101\t102\t103");
        assert_eq!(state, RemovalState::PairedQuery);
        assert_eq!(emit.as_deref(), Some(">101\t102\t103"));

        let (state, emit) = plan.transition(state, "MKVLLQRGG");
        assert_eq!(state, RemovalState::EditPaired);
        assert_eq!(emit.as_deref(), Some("MKVLLQRGG"));

        let (state, emit) = plan.transition(state, "MKaVLLQRG-");
        assert_eq!(state, RemovalState::EditPaired);
        assert_eq!(emit.as_deref(), Some("MKaV----G-"));

        let (state, emit) = plan.transition(RemovalState::EditPaired, ">hit\tx");
        assert_eq!(state, RemovalState::EditPaired);
        assert_eq!(emit.as_deref(), Some(">hit\tx"));

        let (state, emit) = plan.transition(RemovalState::EditPaired, ">102");
        assert_eq!(state, RemovalState::SkipChainBlock);
        assert!(emit.is_none());

        let (state, emit) = plan.transition(RemovalState::SkipChainBlock, ">hit\tx");
        assert_eq!(state, RemovalState::SkipChainBlock);
        assert!(emit.is_none());

        let (state, emit) = plan.transition(RemovalState::SkipChainBlock, ">103");
        assert_eq!(state, RemovalState::Passthrough);
        assert_eq!(emit.as_deref(), Some(">103"));
    }

    #[test]
    fn test_dimer_paired_block_skipped() {
        let plan = RemovalPlan::from_header("#3,2\t1,1", 1, ChainIds::default()).unwrap();
        let (state, emit) = plan.transition(RemovalState::Passthrough, ">101\t102");
        assert_eq!(state, RemovalState::SkipPaired);
        assert!(emit.is_none());

        let (state, emit) = plan.transition(state, "ABCDE");
        assert_eq!(state, RemovalState::SkipPaired);
        assert!(emit.is_none());
    }

    #[test]
    fn test_custom_offset() {
        let lines = ["#2,2,2\t1,1,1", ">201\t202\t203", "AABBCC", ">202", "--BB--", ">203", "----CC"];
        let out = remove_chain(lines, 2, ChainIds::new(200)).unwrap();
        assert_eq!(out, vec!["#2,2,2\t1,1,1", ">201\t202\t203", "AABBCC", ">203", "----CC"]);
    }

    #[test]
    fn test_query_survives_removal() {
        let original = A3m::from_lines(trimer()).unwrap();

        for target in 1..=3 {
            let out = remove_chain(trimer(), target, ChainIds::default()).unwrap();
            assert_eq!(out[2], trimer()[2]);

            let edited = A3m::from_lines(&out).unwrap();
            assert_eq!(edited.query_segments(), original.query_segments());
            assert_eq!(edited.query_segments()[1], "LLQR");
        }
    }
}
