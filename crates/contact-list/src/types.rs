use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Missing column: {0}")]
    MissingColumns(String),
}

pub type Result<T> = std::result::Result<T, ContactError>;

/// A single directory entry.
///
/// `enabled` is the curation flag: disabled entries stay in the list but
/// are left out of generated booklets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub number: String,
    pub enabled: bool,
}

impl Contact {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Key used to recognise the same entry imported twice
    pub fn dedup_key(&self) -> (String, String) {
        (
            self.name.trim().to_lowercase(),
            self.number.trim().to_string(),
        )
    }
}

/// A phone number shared by several entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub number: String,
    pub names: Vec<String>,
}
