use std::rc::Rc;

use yew::Reducible;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Success,
}

impl Severity {
    pub fn class(&self) -> &'static str {
        match self {
            Severity::Error => "alert alert-danger alert-dismissible",
            Severity::Success => "alert alert-success alert-dismissible",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
}

pub enum NoticeAction {
    Push { severity: Severity, message: String },
    Dismiss(u64),
}

/// Banners currently on screen, oldest first. Both the close button and the
/// expiry timer dismiss by id, so whichever comes second finds nothing to do.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationStack {
    next_id: u64,
    pub items: Vec<Notification>,
}

impl NotificationStack {
    pub fn push(&mut self, severity: Severity, message: String) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notification {
            id,
            severity,
            message,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }
}

impl Reducible for NotificationStack {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            NoticeAction::Push { severity, message } => {
                next.push(severity, message);
            }
            NoticeAction::Dismiss(id) => {
                if !next.dismiss(id) {
                    return self;
                }
            }
        }
        Rc::new(next)
    }
}
