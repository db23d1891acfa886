/// Errors surfaced by the session layer. Invalid moves are not errors:
/// they are silently rejected with no state change.
#[derive(Debug)]
pub enum PortalError {
    /// Session start referenced a catalog id that does not exist.
    EntryNotFound(String),
}

impl std::fmt::Display for PortalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntryNotFound(id) => write!(f, "catalog entry not found: {id}"),
        }
    }
}

impl std::error::Error for PortalError {}
