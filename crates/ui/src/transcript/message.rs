use chrono::{DateTime, Local};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Assistant",
        }
    }
}

/// Whether an entry carries content or reports a failed query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageKind {
    #[default]
    Reply,
    Failure,
}

/// One entry of the conversation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    kind: MessageKind,
    text: String,
    sent_at: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self { role, kind: MessageKind::Reply, text: text.into(), sent_at: Local::now() }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Assistant entry standing in for a query that never produced an answer
    pub fn failure(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Failure, ..Self::assistant(text) }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn is_failure(&self) -> bool {
        self.kind == MessageKind::Failure
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sent_at(&self) -> DateTime<Local> {
        self.sent_at
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
