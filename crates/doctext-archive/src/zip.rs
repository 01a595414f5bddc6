//! ZIP archive member enumeration
//!
//! Walks a ZIP archive held in memory and hands every file member, in archive
//! order, to a processor callback. Problems that only affect one member
//! (encryption, size limits, a damaged local header) are delivered to the
//! processor as that member's `Err` contents so the caller can keep going.
//! Problems with the archive as a whole (not a ZIP, truncated central
//! directory) are returned from the walk itself.

use crate::error::ArchiveError;
use crate::RESOURCE_FORK_PREFIX;
use log::debug;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// One file member of a ZIP archive
#[derive(Debug)]
pub struct ZipMember {
    /// Path of the member as recorded in the archive (e.g. `reports/q1.xlsx`)
    pub name: String,
    /// Decompressed bytes, or the reason they could not be read
    pub contents: Result<Vec<u8>, ArchiveError>,
}

/// Whether an archive path belongs to a macOS resource fork folder.
#[inline]
#[must_use]
pub fn is_resource_fork(name: &str) -> bool {
    name.starts_with(RESOURCE_FORK_PREFIX)
}

#[inline]
fn is_directory_name(name: &str) -> bool {
    name.ends_with('/') || name.ends_with('\\')
}

/// Walk the file members of a ZIP archive in archive order
///
/// Directory records and resource-fork members are skipped without being
/// reported. Every other member is decompressed (up to `max_file_size` bytes)
/// and passed to `processor`.
///
/// # Returns
///
/// The number of members passed to `processor`.
///
/// # Errors
///
/// Returns `ArchiveError::InvalidZip` if `data` is not a readable ZIP archive.
///
/// # Examples
///
/// ```no_run
/// use doctext_archive::zip::extract_zip_streaming;
///
/// let data = std::fs::read("archive.zip").unwrap();
/// let count = extract_zip_streaming(&data, 1_000_000, |member| {
///     println!("{}", member.name);
/// })
/// .unwrap();
/// println!("{count} members");
/// ```
#[must_use = "this function returns a Result that should be checked for errors"]
pub fn extract_zip_streaming<F>(
    data: &[u8],
    max_file_size: u64,
    mut processor: F,
) -> Result<usize, ArchiveError>
where
    F: FnMut(ZipMember),
{
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    let mut delivered = 0;

    for i in 0..archive.len() {
        let Some(name) = archive.name_for_index(i).map(str::to_string) else {
            continue;
        };

        if is_directory_name(&name) {
            continue;
        }

        if is_resource_fork(&name) {
            debug!("Skipping resource fork entry: {name}");
            continue;
        }

        let contents = read_member(&mut archive, i, &name, max_file_size);
        processor(ZipMember { name, contents });
        delivered += 1;
    }

    Ok(delivered)
}

fn read_member(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    index: usize,
    name: &str,
    max_file_size: u64,
) -> Result<Vec<u8>, ArchiveError> {
    let declared_size = {
        let raw = archive.by_index_raw(index)?;
        if raw.encrypted() {
            return Err(ArchiveError::PasswordProtected {
                name: name.to_string(),
            });
        }
        raw.size()
    };

    if declared_size > max_file_size {
        return Err(ArchiveError::FileTooLarge {
            name: name.to_string(),
            size: declared_size,
            max: max_file_size,
        });
    }

    let mut file = archive.by_index(index)?;
    let mut contents = Vec::with_capacity(usize::try_from(declared_size).unwrap_or_default());

    // Headers can understate the real size, so cap the read as well
    file.by_ref()
        .take(max_file_size.saturating_add(1))
        .read_to_end(&mut contents)?;

    let actual_size = contents.len() as u64;
    if actual_size > max_file_size {
        return Err(ArchiveError::FileTooLarge {
            name: name.to_string(),
            size: actual_size,
            max: max_file_size,
        });
    }

    Ok(contents)
}
