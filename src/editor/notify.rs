#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    CursorMoved,
    DataChanged,
}

/// Pending notifications, coalesced so that each kind fires at most once
/// per drained batch no matter how many times it was raised.
#[derive(Debug, Clone, Copy, Default)]
pub struct Notifications {
    cursor_moved: bool,
    data_changed: bool,
}

impl Notifications {
    pub fn cursor_moved(&mut self) {
        self.cursor_moved = true;
    }

    pub fn data_changed(&mut self) {
        self.data_changed = true;
    }

    pub fn is_empty(&self) -> bool {
        !self.cursor_moved && !self.data_changed
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        let mut out = Vec::with_capacity(2);
        if std::mem::take(&mut self.cursor_moved) {
            out.push(Notification::CursorMoved);
        }
        if std::mem::take(&mut self.data_changed) {
            out.push(Notification::DataChanged);
        }
        out
    }
}
