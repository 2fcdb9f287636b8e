use thiserror::Error;

/// Failures surfaced by the codec. Every variant is distinct so that callers
/// can map them to their own exit codes; none of them is retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HuffmanError {
    /// The header and the payload disagree about emptiness: an empty
    /// frequency table next to a non-empty payload, or vice versa.
    #[error("empty frequency table with non-empty payload, or vice versa")]
    EmptyAlphabetMismatch,

    /// The header is structurally invalid.
    #[error("corrupt container header: {0}")]
    CorruptHeader(&'static str),

    /// The bit payload ran out before the expected symbol count was decoded,
    /// or the declared padding is outside 0..=7.
    #[error("corrupt bit stream: {0}")]
    CorruptStream(&'static str),

    /// A tree construction sanity check failed. Signals a bug in the codec,
    /// not bad input; fatal.
    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(&'static str),

    /// A symbol occurs more often than the container's 32-bit frequency
    /// field can represent.
    #[error("symbol {symbol:#04x} occurs {count} times, exceeding the container frequency range")]
    FrequencyOverflow { symbol: u8, count: u64 },
}
