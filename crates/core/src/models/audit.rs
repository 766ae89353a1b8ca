//! The structured record posted to the audit log channel.

use serde::Serialize;

/// Discord's embed field value limit, in characters.
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Cut `text` to at most `limit` characters without splitting a code point.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl LogField {
    pub fn new(name: impl Into<String>, value: impl AsRef<str>, inline: bool) -> Self {
        Self {
            name: name.into(),
            value: truncate_chars(value.as_ref(), FIELD_VALUE_LIMIT),
            inline,
        }
    }
}

/// Who triggered an event and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActorContext {
    pub user_id: u64,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEvent {
    pub title: String,
    pub fields: Vec<LogField>,
    pub actor: Option<ActorContext>,
}

impl LogEvent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            actor: None,
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl AsRef<str>, inline: bool) -> Self {
        self.fields.push(LogField::new(name, value, inline));
        self
    }

    pub fn with_actor(mut self, actor: ActorContext) -> Self {
        self.actor = Some(actor);
        self
    }

    /// The fields as they appear in the log channel.
    ///
    /// With an actor context the acting user, the originating channel and the
    /// originating guild are appended, in that order, after the caller's
    /// fields.
    pub fn rendered_fields(&self) -> Vec<LogField> {
        let mut fields = self.fields.clone();

        if let Some(actor) = &self.actor {
            fields.push(LogField::new("Actor", user_ref(actor.user_id), false));
            fields.push(LogField::new("Channel", channel_ref(actor.channel_id), false));
            let guild = match actor.guild_id {
                Some(id) => format!("`{}`", id),
                None => "direct message".to_string(),
            };
            fields.push(LogField::new("Guild", guild, false));
        }

        fields
    }
}

/// A user mention followed by the raw id, e.g. ``<@1> (`1`)``.
pub fn user_ref(id: u64) -> String {
    format!("<@{}> (`{}`)", id, id)
}

pub fn channel_ref(id: u64) -> String {
    format!("<#{}> (`{}`)", id, id)
}

pub fn role_ref(id: u64) -> String {
    format!("<@&{}> (`{}`)", id, id)
}
