use crate::entities::Connectivity;

pub const DEFAULT_OFFLINE_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivitySnapshot {
    pub state: Connectivity,
    pub label: &'static str,
    /// The state differs from the one before the last probe.
    pub changed: bool,
}

/// Tracks reachability of the backend from periodic probe results.
#[derive(Debug)]
pub struct ConnectivityStateManager {
    threshold: u32,
    consecutive_failures: u32,
    state: Connectivity,
    changed: bool,
}

impl Connectivity {
    pub fn label(&self) -> &'static str {
        match self {
            Connectivity::Online => "Online",
            Connectivity::Unstable => "Instável",
            Connectivity::Offline => "Offline",
        }
    }
}

impl ConnectivityStateManager {
    /// A threshold of zero is treated as one.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            consecutive_failures: 0,
            state: Connectivity::Online,
            changed: false,
        }
    }

    pub fn record_probe(&mut self, success: bool) -> ConnectivitySnapshot {
        let next = if success {
            self.consecutive_failures = 0;
            Connectivity::Online
        } else {
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            if self.consecutive_failures >= self.threshold {
                Connectivity::Offline
            } else {
                Connectivity::Unstable
            }
        };
        self.changed = next != self.state;
        if self.changed {
            tracing::info!(
                from = self.state.label(),
                to = next.label(),
                failures = self.consecutive_failures,
                "connectivity changed"
            );
        }
        self.state = next;
        self.snapshot()
    }

    pub fn state(&self) -> Connectivity {
        self.state
    }

    pub fn snapshot(&self) -> ConnectivitySnapshot {
        ConnectivitySnapshot {
            state: self.state,
            label: self.state.label(),
            changed: self.changed,
        }
    }
}

impl Default for ConnectivityStateManager {
    fn default() -> Self {
        Self::new(DEFAULT_OFFLINE_THRESHOLD)
    }
}
