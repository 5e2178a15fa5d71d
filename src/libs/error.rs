/// Faults raised while reading or editing an alignment.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MsaError {
    /// The query row does not cover the declared chain lengths.
    #[error("Length of full sequence {found} does not match total length {expected}")]
    LengthMismatch { expected: usize, found: usize },
    /// Chain numbers are 1-based and bounded by the declared chain count.
    #[error("Chain number {chain} is larger than the number of chains ({count}) or 0")]
    InvalidChain { chain: usize, count: usize },
    /// The first line is not a usable `#<lengths>\t<copies>` line.
    #[error("Malformed A3M header: {0}")]
    MalformedHeader(String),
    #[error("{lengths} chain lengths declared but {names} chain names found")]
    ChainCountMismatch { lengths: usize, names: usize },
    #[error("The alignment has {chains} chains but the job has {proteins} proteins")]
    ProteinCountMismatch { chains: usize, proteins: usize },
    /// A key the job structure needs is absent.
    #[error("Missing expected field: {0}")]
    MissingField(String),
    #[error("The server only supports one seed, got {0}")]
    TooManySeeds(usize),
}
