use std::io;
use std::path::Path;

use super::types::DownloadedFile;

/// Regular files directly inside `dir`, sorted by file name.
///
/// Nothing ties a file to the tool run that produced it; in a shared
/// directory this includes leftovers from earlier and concurrent requests.
pub async fn list_files(dir: &Path) -> io::Result<Vec<DownloadedFile>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        // Follows symlinks, like a plain `is_file` check
        let metadata = match tokio::fs::metadata(entry.path()).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => return Err(err),
        };

        if !metadata.is_file() {
            continue;
        }

        files.push(DownloadedFile {
            path: entry.path(),
            file_name: entry.file_name().to_string_lossy().into_owned(),
        });
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}

/// First file in `dir` by name, if any
pub async fn first_file(dir: &Path) -> io::Result<Option<DownloadedFile>> {
    Ok(list_files(dir).await?.into_iter().next())
}
