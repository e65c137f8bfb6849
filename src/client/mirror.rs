use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::api::ClientResult;

/// One slot of the local mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorKey {
    Training,
    Food,
    Potty,
    Sleep,
    Todo,
    Puppy,
    ActiveNap,
}

impl MirrorKey {
    pub fn name(self) -> &'static str {
        match self {
            MirrorKey::Training => "husky-puppy-trainer",
            MirrorKey::Food => "husky-food-entries",
            MirrorKey::Potty => "husky-potty-entries",
            MirrorKey::Sleep => "husky-sleep-entries",
            MirrorKey::Todo => "husky-todo-entries",
            MirrorKey::Puppy => "husky-puppy-info",
            MirrorKey::ActiveNap => "husky-active-nap",
        }
    }
}

/// Last known client state, one JSON file per key, used when the server
/// cannot be reached.
#[derive(Debug, Clone)]
pub struct LocalMirror {
    dir: PathBuf,
}

impl LocalMirror {
    pub async fn open(dir: impl Into<PathBuf>) -> ClientResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: MirrorKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.name()))
    }

    pub async fn store<T: Serialize + ?Sized>(&self, key: MirrorKey, value: &T) -> ClientResult<()> {
        let bytes = serde_json::to_vec(value)?;
        tokio::fs::write(self.path_for(key), bytes).await?;
        Ok(())
    }

    /// `None` when the key was never written.
    pub async fn load<T: DeserializeOwned>(&self, key: MirrorKey) -> ClientResult<Option<T>> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_mirror() -> LocalMirror {
        let dir = std::env::temp_dir().join(format!("puppy-mirror-{}", uuid::Uuid::new_v4()));
        LocalMirror::open(dir).await.unwrap()
    }

    #[tokio::test]
    async fn test_unwritten_key_is_none() {
        let mirror = temp_mirror().await;
        let loaded: Option<Vec<String>> = mirror.load(MirrorKey::Food).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_store_then_load() {
        let mirror = temp_mirror().await;
        mirror
            .store(MirrorKey::Potty, &vec!["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        let loaded: Option<Vec<String>> = mirror.load(MirrorKey::Potty).await.unwrap();
        assert_eq!(loaded, Some(vec!["a".to_string(), "b".to_string()]));
        assert!(mirror.dir().join("husky-potty-entries.json").is_file());
    }
}
