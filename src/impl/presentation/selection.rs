use crate::entities::{Client, ClientId};

/// Selected client ids in selection order, without duplicates. The first
/// one is the primary selection.
#[derive(Debug, Default)]
pub struct SelectionManager {
    selected: Vec<ClientId>,
    pick_mode: bool,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = ClientId>) {
        self.selected.clear();
        for id in ids {
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
        }
    }

    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: ClientId) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn selected(&self) -> &[ClientId] {
        &self.selected
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn primary(&self) -> Option<ClientId> {
        self.selected.first().copied()
    }

    pub fn is_pick_mode(&self) -> bool {
        self.pick_mode
    }

    pub fn enter_pick_mode(&mut self) {
        self.pick_mode = true;
        self.selected.truncate(1);
    }

    pub fn exit_pick_mode(&mut self) {
        self.pick_mode = false;
    }

    /// In pick mode, the client to hand back to the caller flow.
    pub fn resolve_pick<'a>(&self, clients: &'a [Client]) -> Option<&'a Client> {
        if !self.pick_mode {
            return None;
        }
        let id = self.primary()?;
        clients.iter().find(|c| c.id == id)
    }

    /// Drops ids that are no longer loaded, e.g. after a refresh.
    pub fn retain_existing(&mut self, clients: &[Client]) {
        self.selected
            .retain(|id| clients.iter().any(|c| c.id == *id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::usecases::clients_usecase::fakes::client;

    #[test]
    fn deduplicates_and_keeps_order() {
        let mut s = SelectionManager::new();
        s.set_selection([3, 1, 3, 2]);
        assert_eq!(s.selected(), &[3, 1, 2]);
        assert_eq!(s.primary(), Some(3));
        assert!(!s.toggle(1));
        assert!(s.toggle(7));
        assert_eq!(s.selected(), &[3, 2, 7]);
        s.clear();
        assert!(!s.has_selection());
        assert_eq!(s.primary(), None);
    }

    #[test]
    fn resolves_pick_only_in_pick_mode() {
        let clients = vec![client(1, "A"), client(2, "B")];
        let mut s = SelectionManager::new();
        s.set_selection([2, 1]);
        assert!(s.resolve_pick(&clients).is_none());

        s.enter_pick_mode();
        assert_eq!(s.count(), 1);
        assert_eq!(s.resolve_pick(&clients).map(|c| c.id), Some(2));

        s.set_selection([9]);
        assert!(s.resolve_pick(&clients).is_none());
        s.exit_pick_mode();
        assert!(!s.is_pick_mode());
    }

    #[test]
    fn forgets_clients_that_disappeared() {
        let mut s = SelectionManager::new();
        s.set_selection([1, 2, 3]);
        s.retain_existing(&[client(2, "B")]);
        assert_eq!(s.selected(), &[2]);
    }
}
