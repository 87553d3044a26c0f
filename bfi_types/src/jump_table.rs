use crate::error::ResolveError;
use core::fmt;

/// Matching bracket positions for a program.
///
/// Holds one slot per source byte. Slots for `[` and `]` point at their partner,
/// every other slot is `None`, so a loop boundary check is a single index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JumpTable {
    matching_brackets: Vec<Option<usize>>,
}

impl JumpTable {
    /// Scan `source` once, pairing each `]` with the most recent unmatched `[`.
    ///
    /// Fails on the first `]` that has nothing to close, or, after the scan, on the
    /// leftmost `[` that was never closed.
    pub fn resolve(source: &[u8]) -> Result<Self, ResolveError> {
        let mut matching_brackets = vec![None; source.len()];
        // Track the open brackets with a stack
        let mut open_brackets = Vec::new();

        for (index, byte) in source.iter().enumerate() {
            match byte {
                b'[' => open_brackets.push(index),
                b']' => {
                    let Some(open_bracket) = open_brackets.pop() else {
                        let err = ResolveError::UnmatchedClosing { position: index };
                        log::debug!("Rejected program: {}", err);
                        return Err(err);
                    };
                    matching_brackets[open_bracket] = Some(index);
                    matching_brackets[index] = Some(open_bracket);
                }
                _ => {}
            }
        }

        // The bottom of the stack is the outermost, leftmost leftover
        if let Some(&position) = open_brackets.first() {
            let err = ResolveError::UnmatchedOpening { position };
            log::debug!("Rejected program: {}", err);
            return Err(err);
        }

        log::debug!(
            "Resolved {} bracket pairs over {} bytes",
            matching_brackets.iter().flatten().count() / 2,
            source.len()
        );
        Ok(JumpTable { matching_brackets })
    }

    pub fn get(&self, index: usize) -> Option<usize> {
        self.matching_brackets.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.matching_brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matching_brackets.is_empty()
    }

    /// All `(open, close)` pairs, ordered by the position of the opening bracket.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.matching_brackets
            .iter()
            .enumerate()
            .filter_map(|(index, partner)| match partner {
                Some(close) if *close > index => Some((index, *close)),
                _ => None,
            })
    }
}

impl fmt::Display for JumpTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self
            .pairs()
            .map(|(open, close)| format!("{}<->{}", open, close))
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "{{{}}}", pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_brackets_pair_up() {
        // "+[-[<<[+[--->]-[<<<]]]>>>-]"
        let table = JumpTable::resolve(b"+[-[<<[+[--->]-[<<<]]]>>>-]").expect("balanced");
        let pairs: Vec<(usize, usize)> = table.pairs().collect();
        assert_eq!(pairs, vec![(1, 26), (3, 21), (6, 20), (8, 13), (15, 19)]);
        assert_eq!(table.get(0), None);
        assert_eq!(table.get(26), Some(1));
        assert_eq!(table.len(), 27);
    }

    #[test]
    fn test_table_is_an_involution() {
        let source = b"[[]][[[]][]]comment[ ]";
        let table = JumpTable::resolve(source).expect("balanced");
        for (index, byte) in source.iter().enumerate() {
            match byte {
                b'[' | b']' => {
                    let partner = table.get(index).expect("every bracket has a partner");
                    assert_eq!(table.get(partner), Some(index));
                    assert_ne!(source[partner], *byte);
                }
                _ => assert_eq!(table.get(index), None),
            }
        }
    }

    #[test]
    fn test_unmatched_closing_reports_first_excess() {
        assert_eq!(
            JumpTable::resolve(b"]"),
            Err(ResolveError::UnmatchedClosing { position: 0 })
        );
        assert_eq!(
            JumpTable::resolve(b"[]]+]"),
            Err(ResolveError::UnmatchedClosing { position: 2 })
        );
    }

    #[test]
    fn test_unmatched_opening_reports_leftmost() {
        assert_eq!(
            JumpTable::resolve(b"["),
            Err(ResolveError::UnmatchedOpening { position: 0 })
        );
        assert_eq!(
            JumpTable::resolve(b"+[[[]"),
            Err(ResolveError::UnmatchedOpening { position: 1 })
        );
    }

    #[test]
    fn test_closing_error_wins_over_pending_opening() {
        // The scan stops on the stray `]` before it can see the dangling `[`
        assert_eq!(
            JumpTable::resolve(b"][["),
            Err(ResolveError::UnmatchedClosing { position: 0 })
        );
    }

    #[test]
    fn test_empty_and_bracketless_sources() {
        let table = JumpTable::resolve(b"").expect("empty is balanced");
        assert!(table.is_empty());
        let table = JumpTable::resolve(b"+-<>., hello").expect("no brackets");
        assert_eq!(table.pairs().count(), 0);
        assert_eq!(format!("{}", table), "{}");
    }

    #[test]
    fn test_display_lists_pairs() {
        let table = JumpTable::resolve(b"[[]]").expect("balanced");
        assert_eq!(format!("{}", table), "{0<->3, 1<->2}");
    }
}
