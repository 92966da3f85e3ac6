use super::utils::format_timestamp;
use crate::entities::Notification;

pub const POPUP_WIDTH: usize = 48;

/// Unread counter for the bell icon: hidden at zero, capped at "9+".
pub fn badge_text(unread: usize) -> String {
    match unread {
        0 => String::new(),
        1..=9 => unread.to_string(),
        _ => "9+".to_string(),
    }
}

/// Popup lines for a notification: header (timestamp and actor), then the
/// message wrapped to `width`.
pub fn notification_lines(n: &Notification, width: usize) -> Vec<String> {
    let mut header = format_timestamp(n.created_at);
    if let Some(actor) = n.actor.as_deref().filter(|a| !a.trim().is_empty()) {
        if !header.is_empty() {
            header.push_str(" · ");
        }
        header.push_str(actor.trim());
    }
    let mut lines = Vec::new();
    if !header.is_empty() {
        lines.push(header);
    }
    lines.extend(
        textwrap::wrap(n.message.trim(), width.max(8))
            .into_iter()
            .map(|l| l.into_owned()),
    );
    lines
}
