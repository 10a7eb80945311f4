use std::path::{Component, Path, PathBuf};

use tracing::info;

use crate::error::AppError;
use crate::model::BookRecord;
use crate::normalize::sanitize_for_filename;

pub const NOT_MARKDOWN: &str = "This file is not md file, Please open md file";
pub const NO_ACTIVE_FILE: &str = "There's no active file, Please open new file";

/// Applies rendered book info to markdown notes inside a vault directory.
pub struct NoteWriter {
    vault_root: PathBuf,
}

impl NoteWriter {
    pub fn new(vault_root: PathBuf) -> Self {
        Self { vault_root }
    }

    /// Resolve a vault-relative path to an existing markdown note.
    pub fn locate(&self, note_path: &str) -> Result<PathBuf, AppError> {
        let relative = Path::new(note_path.trim());
        let inside_vault = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if relative.as_os_str().is_empty() || !inside_vault {
            return Err(AppError::Note(format!(
                "note path must be relative to the vault: {note_path}"
            )));
        }

        if relative.extension().and_then(|ext| ext.to_str()) != Some("md") {
            return Err(AppError::Note(NOT_MARKDOWN.to_string()));
        }

        let path = self.vault_root.join(relative);
        if !path.is_file() {
            return Err(AppError::Note(NO_ACTIVE_FILE.to_string()));
        }
        Ok(path)
    }

    /// The lookup query for a note: its file name without extension.
    pub fn query_for(note: &Path) -> String {
        note.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Prepend `record.body` to the note and rename it after the book.
    ///
    /// Returns the note's new path. Nothing is written when the new name is already taken.
    pub async fn apply(&self, note: &Path, record: &BookRecord) -> Result<PathBuf, AppError> {
        let target = target_path(note, &record.display_title);
        if target != note && tokio::fs::try_exists(&target).await? {
            return Err(AppError::Note(format!(
                "a note named {} already exists",
                self.relative(&target)
            )));
        }

        let text = tokio::fs::read_to_string(note).await?;
        tokio::fs::write(note, format!("{}\n\n{}", record.body, text)).await?;

        if target != note {
            tokio::fs::rename(note, &target).await?;
        }

        info!(
            from = %self.relative(note),
            to = %self.relative(&target),
            "book info written"
        );
        Ok(target)
    }

    /// Vault-relative form of `path`, for messages and tool output.
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.vault_root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}

fn target_path(note: &Path, display_title: &str) -> PathBuf {
    let file_name = sanitize_for_filename(display_title);
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return note.to_path_buf();
    }
    note.with_file_name(format!("{file_name}.md"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> BookRecord {
        BookRecord {
            display_title: title.to_string(),
            body: "---\ntitle: x\n---\n\n# x".to_string(),
        }
    }

    fn write_note(root: &Path, rel: &str, text: &str) -> PathBuf {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn locate_rejects_non_markdown() {
        let dir = tempfile::tempdir().unwrap();
        write_note(dir.path(), "book.txt", "");
        let writer = NoteWriter::new(dir.path().to_path_buf());

        let err = writer.locate("book.txt").unwrap_err();
        assert_eq!(err.to_string(), NOT_MARKDOWN);
    }

    #[test]
    fn locate_rejects_missing_note() {
        let dir = tempfile::tempdir().unwrap();
        let writer = NoteWriter::new(dir.path().to_path_buf());

        let err = writer.locate("missing.md").unwrap_err();
        assert_eq!(err.to_string(), NO_ACTIVE_FILE);
    }

    #[test]
    fn locate_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let writer = NoteWriter::new(dir.path().to_path_buf());

        assert!(writer.locate("../outside.md").is_err());
        assert!(writer.locate("/etc/passwd.md").is_err());
        assert!(writer.locate("  ").is_err());
    }

    #[test]
    fn query_is_file_stem() {
        assert_eq!(NoteWriter::query_for(Path::new("reading/듄 1.md")), "듄 1");
    }

    #[tokio::test]
    async fn apply_prepends_body_and_renames() {
        let dir = tempfile::tempdir().unwrap();
        let note = write_note(dir.path(), "reading/dune.md", "my notes");
        let writer = NoteWriter::new(dir.path().to_path_buf());

        let located = writer.locate("reading/dune.md").unwrap();
        assert_eq!(located, note);
        let target = writer.apply(&located, &record("Dune A Novel")).await.unwrap();

        assert_eq!(target, dir.path().join("reading/Dune A Novel.md"));
        assert!(!note.exists());
        let text = std::fs::read_to_string(&target).unwrap();
        assert_eq!(text, "---\ntitle: x\n---\n\n# x\n\nmy notes");
        assert_eq!(writer.relative(&target), "reading/Dune A Novel.md");
    }

    #[tokio::test]
    async fn apply_sanitizes_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let note = write_note(dir.path(), "q.md", "");
        let writer = NoteWriter::new(dir.path().to_path_buf());

        let target = writer.apply(&note, &record("C++ Primer: 5th Ed.")).await.unwrap();

        assert_eq!(target, dir.path().join("C Primer 5th Ed.md"));
    }

    #[tokio::test]
    async fn apply_keeps_name_when_sanitized_title_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let note = write_note(dir.path(), "q.md", "body");
        let writer = NoteWriter::new(dir.path().to_path_buf());

        let target = writer.apply(&note, &record("???")).await.unwrap();

        assert_eq!(target, note);
        assert!(std::fs::read_to_string(&note).unwrap().ends_with("\n\nbody"));
    }

    #[tokio::test]
    async fn apply_refuses_to_overwrite_existing_note() {
        let dir = tempfile::tempdir().unwrap();
        let note = write_note(dir.path(), "q.md", "original");
        write_note(dir.path(), "Dune.md", "other");
        let writer = NoteWriter::new(dir.path().to_path_buf());

        let err = writer.apply(&note, &record("Dune")).await.unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&note).unwrap(), "original");
    }
}
