use crate::core_ftpcommand::error::PathError;
use crate::core_ftpcommand::handlers::ControlWriter;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Resolves a client-supplied path against the restricted root.
///
/// The raw argument is rejected outright if it contains a parent directory
/// reference. The joined candidate is then canonicalized, which resolves
/// symlinks and `.` segments; a target that does not exist yet (an upload or
/// rename destination) is resolved through its parent directory instead.
/// The canonical result must stay inside the canonical root.
///
/// Every file-touching command calls this independently. Nothing is cached
/// between commands.
pub fn confine(root: &Path, user_path: &str) -> Result<PathBuf, PathError> {
    if user_path.contains("..") {
        return Err(PathError::Traversal(user_path.to_string()));
    }

    let canonical_root = root.canonicalize()?;
    let candidate = canonical_root.join(user_path);

    let resolved = match candidate.canonicalize() {
        Ok(path) => path,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let parent = candidate
                .parent()
                .ok_or_else(|| PathError::Escape(candidate.clone()))?;
            let file_name = candidate
                .file_name()
                .ok_or_else(|| PathError::Escape(candidate.clone()))?;
            parent.canonicalize()?.join(file_name)
        }
        Err(e) => return Err(PathError::Resolve(e)),
    };

    if !resolved.starts_with(&canonical_root) {
        return Err(PathError::Escape(resolved));
    }

    Ok(resolved)
}

/// Writes one reply (or raw payload) on the control connection.
pub async fn send_response(writer: &ControlWriter, message: &[u8]) -> Result<(), std::io::Error> {
    let mut writer = writer.lock().await;
    writer.write_all(message).await?;
    debug!("Sent: {}", String::from_utf8_lossy(message).trim_end());
    Ok(())
}
