//! Selection set with a primary instance

use furnish_core::InstanceId;

/// Selected instances. The primary one is the drag target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    primary: Option<InstanceId>,
    extra: Vec<InstanceId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select exactly one instance
    pub fn select(&mut self, id: InstanceId) {
        self.primary = Some(id);
        self.extra.clear();
    }

    /// Make an already selected instance primary, keeping the rest
    pub fn promote(&mut self, id: InstanceId) {
        if self.primary == Some(id) {
            return;
        }
        if let Some(pos) = self.extra.iter().position(|e| *e == id) {
            self.extra.remove(pos);
            if let Some(old) = self.primary.replace(id) {
                self.extra.insert(0, old);
            }
        }
    }

    /// Add or remove an instance; a new selection becomes primary
    pub fn toggle(&mut self, id: InstanceId) {
        if self.primary == Some(id) {
            self.primary = if self.extra.is_empty() {
                None
            } else {
                Some(self.extra.remove(0))
            };
        } else if let Some(pos) = self.extra.iter().position(|e| *e == id) {
            self.extra.remove(pos);
        } else if let Some(old) = self.primary.replace(id) {
            self.extra.insert(0, old);
        }
    }

    pub fn clear(&mut self) {
        self.primary = None;
        self.extra.clear();
    }

    /// Drop every id for which `keep` returns false
    pub fn retain(&mut self, mut keep: impl FnMut(InstanceId) -> bool) {
        self.extra.retain(|id| keep(*id));
        if let Some(primary) = self.primary {
            if !keep(primary) {
                self.primary = if self.extra.is_empty() {
                    None
                } else {
                    Some(self.extra.remove(0))
                };
            }
        }
    }

    pub fn primary(&self) -> Option<InstanceId> {
        self.primary
    }

    /// All selected ids, primary first
    pub fn ids(&self) -> Vec<InstanceId> {
        self.primary.iter().chain(self.extra.iter()).copied().collect()
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.primary == Some(id) || self.extra.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }

    pub fn len(&self) -> usize {
        self.primary.map_or(0, |_| 1 + self.extra.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_replaces() {
        let mut selection = Selection::new();
        selection.select(InstanceId(1));
        selection.toggle(InstanceId(2));
        selection.select(InstanceId(3));
        assert_eq!(selection.ids(), vec![InstanceId(3)]);
    }

    #[test]
    fn test_toggle_builds_multi_selection() {
        let mut selection = Selection::new();
        selection.toggle(InstanceId(1));
        selection.toggle(InstanceId(2));
        assert_eq!(selection.primary(), Some(InstanceId(2)));
        assert_eq!(selection.ids(), vec![InstanceId(2), InstanceId(1)]);

        selection.toggle(InstanceId(2));
        assert_eq!(selection.primary(), Some(InstanceId(1)));
        selection.toggle(InstanceId(1));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_promote_and_retain() {
        let mut selection = Selection::new();
        selection.toggle(InstanceId(1));
        selection.toggle(InstanceId(2));
        selection.toggle(InstanceId(3));
        selection.promote(InstanceId(1));
        assert_eq!(selection.primary(), Some(InstanceId(1)));
        assert_eq!(selection.len(), 3);

        selection.retain(|id| id != InstanceId(1));
        assert_eq!(selection.len(), 2);
        assert!(selection.primary().is_some());
        assert!(!selection.contains(InstanceId(1)));
    }
}
