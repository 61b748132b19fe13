use apibake_core::LayoutError;

use crate::canvas::OutlineId;

/// Open outline items by level. A header at `level` must sit directly under an open item at
/// `level - 1`; it then replaces the item at `level` and closes everything deeper.
#[derive(Debug, Default)]
pub struct OutlineTracker {
    open: Vec<OutlineId>,
}

impl OutlineTracker {
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn check(&self, level: usize) -> Result<(), LayoutError> {
        if level > self.depth() {
            return Err(LayoutError::OutlineStructure {
                level,
                depth: self.depth(),
            });
        }
        Ok(())
    }

    /// Parent for a new item at `level`. Call [`check`](Self::check) first.
    pub fn parent(&self, level: usize) -> Option<OutlineId> {
        level.checked_sub(1).and_then(|i| self.open.get(i).copied())
    }

    pub fn open(&mut self, level: usize, id: OutlineId) {
        self.open.truncate(level);
        self.open.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipping_a_level_fails() {
        let mut outline = OutlineTracker::default();
        outline.check(0).unwrap();
        outline.open(0, 0);

        let err = outline.check(2).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::OutlineStructure { level: 2, depth: 1 }
        ));
    }

    #[test]
    fn test_siblings_replace_open_slot() {
        let mut outline = OutlineTracker::default();
        outline.open(0, 0);
        assert_eq!(outline.parent(1), Some(0));
        outline.open(1, 1);
        assert_eq!(outline.parent(1), Some(0));
        outline.open(1, 2);
        assert_eq!(outline.depth(), 2);

        // A new root closes the children of the old one
        assert_eq!(outline.parent(0), None);
        outline.open(0, 3);
        assert_eq!(outline.depth(), 1);
        assert!(outline.check(2).is_err());
    }
}
