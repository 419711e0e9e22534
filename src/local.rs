use std::path::Path;

use anyhow::{Context, Result};

use crate::record::PlayerRecord;

/// Read the static fallback file: a plain JSON array of player records.
/// Read-only; nothing in the service ever writes it.
pub async fn load_players(path: &Path) -> Result<Vec<PlayerRecord>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_players() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"24-1","name":"Test","rating":"90","position":"ST","club":"FC","nation":"N"}}]"#
        )
        .unwrap();

        let players = load_players(file.path()).await.unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Test");
        assert_eq!(players[0].rating, "90");
        assert!(players[0].stats.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let result = load_players(Path::new("does/not/exist.json")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(load_players(file.path()).await.is_err());
    }
}
