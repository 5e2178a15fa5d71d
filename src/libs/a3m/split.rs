/// Lowercase residues are insertions relative to the query and take no column.
pub fn is_insertion(c: char) -> bool {
    c.is_lowercase()
}

/// Number of alignment columns in `seq`: uppercase letters and gaps.
///
/// ```
/// assert_eq!(afmsa::visible_len("AB-cdE"), 4);
/// ```
pub fn visible_len(seq: &str) -> usize {
    seq.chars().filter(|&c| !is_insertion(c)).count()
}

/// Splits an aligned row into one segment per chain.
///
/// Characters are taken left to right; every non-insertion character counts
/// towards the current chain and the segment closes as soon as the chain's
/// declared length is reached. An insertion right at a boundary therefore
/// opens the next segment. Insertions after the last column stay with the
/// last chain, so the segments always concatenate back to `seq`.
///
/// A row that runs out early yields a short (or empty) tail without error.
///
/// ```
/// let segments = afmsa::split_by_chains("ABCxyDE", &[3, 2]);
/// assert_eq!(segments, vec!["ABC", "xyDE"]);
/// ```
pub fn split_by_chains<'a>(seq: &'a str, lengths: &[usize]) -> Vec<&'a str> {
    let mut segments = Vec::with_capacity(lengths.len());
    let mut chars = seq.char_indices();
    let mut start = 0;

    for &target in lengths {
        let mut visible = 0;
        let mut end = start;
        while visible < target {
            match chars.next() {
                Some((i, c)) => {
                    end = i + c.len_utf8();
                    if !is_insertion(c) {
                        visible += 1;
                    }
                }
                None => break,
            }
        }
        segments.push(&seq[start..end]);
        start = end;
    }

    // trailing insertions
    if start < seq.len() {
        if let Some(last) = segments.last_mut() {
            let last_start = start - last.len();
            *last = &seq[last_start..];
        }
    }

    segments
}
