#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Unstable,
    Offline,
}

/// Snapshot of everything the client list toolbar depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiSnapshot {
    pub has_selection: bool,
    pub connectivity: Connectivity,
    pub uploading: bool,
    pub pick_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonStates {
    pub new: bool,
    pub edit: bool,
    pub delete: bool,
    pub upload: bool,
    pub open_files: bool,
    pub batch: bool,
    /// Label of the primary action button.
    pub primary_label: &'static str,
}

impl Connectivity {
    pub fn allows_writes(&self) -> bool {
        !matches!(self, Connectivity::Offline)
    }
}
