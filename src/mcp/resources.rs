//! `cursor://` resource addressing.

use std::fmt;

pub const SCHEME: &str = "cursor://";

/// A readable MCP resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorResource {
    /// `cursor://projects`
    Projects,
    /// `cursor://projects/detailed`
    ProjectsDetailed,
    /// `cursor://projects/{name}/chat`
    Chat(String),
    /// `cursor://projects/{name}/composers`
    Composers(String),
    /// `cursor://composers/{id}`
    Composer(String),
}

impl CursorResource {
    /// Parse a resource URI. Returns `None` for anything unrecognised.
    pub fn parse(uri: &str) -> Option<Self> {
        let path = uri.strip_prefix(SCHEME)?;
        let segments: Vec<&str> = path.split('/').collect();

        match segments.as_slice() {
            ["projects"] => Some(Self::Projects),
            ["projects", "detailed"] => Some(Self::ProjectsDetailed),
            ["projects", name, "chat"] if !name.is_empty() => Some(Self::Chat(name.to_string())),
            ["projects", name, "composers"] if !name.is_empty() => {
                Some(Self::Composers(name.to_string()))
            }
            ["composers", id] if !id.is_empty() => Some(Self::Composer(id.to_string())),
            _ => None,
        }
    }

    pub fn uri(&self) -> String {
        match self {
            Self::Projects => format!("{}projects", SCHEME),
            Self::ProjectsDetailed => format!("{}projects/detailed", SCHEME),
            Self::Chat(name) => format!("{}projects/{}/chat", SCHEME, name),
            Self::Composers(name) => format!("{}projects/{}/composers", SCHEME, name),
            Self::Composer(id) => format!("{}composers/{}", SCHEME, id),
        }
    }

    /// Human-readable name shown in resource listings.
    pub fn display_name(&self) -> String {
        match self {
            Self::Projects => "Cursor projects".to_string(),
            Self::ProjectsDetailed => "Cursor projects (detailed)".to_string(),
            Self::Chat(name) => format!("{} chat data", name),
            Self::Composers(name) => format!("{} composer sessions", name),
            Self::Composer(id) => format!("Composer {}", id),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Projects => "Project names mapped to their state.vscdb paths",
            Self::ProjectsDetailed => "Project names mapped to full project metadata",
            Self::Chat(_) => "AI chat panel data stored for the project",
            Self::Composers(_) => "Composer session IDs referenced by the project",
            Self::Composer(_) => "Composer session data from global storage",
        }
    }
}

impl fmt::Display for CursorResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}
