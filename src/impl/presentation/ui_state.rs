use crate::entities::{ButtonStates, Connectivity, UiSnapshot};

pub const LABEL_EDIT: &str = "Editar";
pub const LABEL_VIEW: &str = "Visualizar";
pub const LABEL_PICK: &str = "Selecionar";

/// Toolbar enablement for the client list.
pub struct UiStateManager;

impl UiStateManager {
    /// Decision table:
    /// - offline: nothing that writes remotely; editing opens read-only.
    /// - unstable: reads and single-record writes, no delete or batch.
    /// - uploading: no second upload, no delete, no batch.
    /// - pick mode: the primary action returns the selection; no delete,
    ///   batch, upload or file browsing.
    pub fn compute(s: &UiSnapshot) -> ButtonStates {
        let online = s.connectivity == Connectivity::Online;
        let reachable = s.connectivity.allows_writes();
        let primary_label = if s.pick_mode {
            LABEL_PICK
        } else if !reachable {
            LABEL_VIEW
        } else {
            LABEL_EDIT
        };
        ButtonStates {
            new: reachable && !s.pick_mode,
            edit: s.has_selection,
            delete: s.has_selection && online && !s.uploading && !s.pick_mode,
            upload: s.has_selection && reachable && !s.uploading && !s.pick_mode,
            open_files: s.has_selection && reachable && !s.pick_mode,
            batch: s.has_selection && online && !s.uploading && !s.pick_mode,
            primary_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(connectivity: Connectivity) -> UiSnapshot {
        UiSnapshot {
            has_selection: true,
            connectivity,
            uploading: false,
            pick_mode: false,
        }
    }

    #[test]
    fn online_with_selection_enables_everything() {
        let b = UiStateManager::compute(&snapshot(Connectivity::Online));
        assert!(b.new && b.edit && b.delete && b.upload && b.open_files && b.batch);
        assert_eq!(b.primary_label, LABEL_EDIT);
    }

    #[test]
    fn nothing_selected_keeps_only_new() {
        let mut s = snapshot(Connectivity::Online);
        s.has_selection = false;
        let b = UiStateManager::compute(&s);
        assert!(b.new);
        assert!(!(b.edit || b.delete || b.upload || b.open_files || b.batch));
    }

    #[test]
    fn offline_blocks_remote_writes() {
        let b = UiStateManager::compute(&snapshot(Connectivity::Offline));
        assert!(!(b.new || b.delete || b.upload || b.open_files || b.batch));
        assert!(b.edit);
        assert_eq!(b.primary_label, LABEL_VIEW);
    }

    #[test]
    fn unstable_blocks_delete_and_batch() {
        let b = UiStateManager::compute(&snapshot(Connectivity::Unstable));
        assert!(b.new && b.edit && b.upload && b.open_files);
        assert!(!b.delete && !b.batch);
        assert_eq!(b.primary_label, LABEL_EDIT);
    }

    #[test]
    fn uploading_blocks_upload_delete_and_batch() {
        let mut s = snapshot(Connectivity::Online);
        s.uploading = true;
        let b = UiStateManager::compute(&s);
        assert!(!(b.upload || b.delete || b.batch));
        assert!(b.new && b.edit && b.open_files);
    }

    #[test]
    fn pick_mode_relabels_primary_action() {
        let mut s = snapshot(Connectivity::Offline);
        s.pick_mode = true;
        let b = UiStateManager::compute(&s);
        assert_eq!(b.primary_label, LABEL_PICK);
        assert!(b.edit);
        assert!(!(b.new || b.delete || b.batch || b.upload));
    }
}
