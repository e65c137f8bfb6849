use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

use crate::AppResult;

/// The id-keyed list resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Food,
    Potty,
    Sleep,
    Todo,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Food,
        Collection::Potty,
        Collection::Sleep,
        Collection::Todo,
    ];

    /// URL and file slug, e.g. `potty-entries`.
    pub fn slug(self) -> &'static str {
        match self {
            Collection::Food => "food-entries",
            Collection::Potty => "potty-entries",
            Collection::Sleep => "sleep-entries",
            Collection::Todo => "todo-entries",
        }
    }

    pub fn api_path(self) -> String {
        format!("/api/{}", self.slug())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Collection::Food => "food entry",
            Collection::Potty => "potty entry",
            Collection::Sleep => "sleep entry",
            Collection::Todo => "todo entry",
        };
        f.write_str(label)
    }
}

/// The single-record resources stored as a whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Singleton {
    TrainingTasks,
    PuppyInfo,
}

impl Singleton {
    pub fn slug(self) -> &'static str {
        match self {
            Singleton::TrainingTasks => "training-tasks",
            Singleton::PuppyInfo => "puppy-info",
        }
    }
}

/// A record stored in one of the list resources, keyed by a client-visible id.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Checks field-level rules that serde cannot express.
    fn validate(&self) -> AppResult<()> {
        Ok(())
    }

    /// Assigns a fresh id when the client did not send one.
    fn ensure_id(&mut self) {
        if self.id().trim().is_empty() {
            self.set_id(uuid::Uuid::new_v4().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_paths() {
        assert_eq!(Collection::Potty.api_path(), "/api/potty-entries");
        assert_eq!(Collection::Todo.slug(), "todo-entries");
        assert_eq!(Collection::Sleep.to_string(), "sleep entry");
    }
}
