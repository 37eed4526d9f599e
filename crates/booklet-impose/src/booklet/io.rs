//! Writing finished booklets

use crate::types::*;
use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Save the booklet. The target is replaced only once the whole file
/// has been written.
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || {
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        write_atomic(&path, &bytes).map_err(|source| BookletError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok::<_, BookletError>(())
    })
    .await?
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
