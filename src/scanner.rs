//! Archive scanner (C1): walks a raw mod directory and pairs every `*.z`
//! archive with its `.uncompressed_size` sidecar.

use crate::{model::ArchiveRecord, Result};
use std::{
    fs, io::BufRead as _,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Walks `raw_mod_dir` and returns every `*.z` archive found beneath it, in
/// deterministic (lexicographic) path order.
///
/// `raw_mod_dir` is promoted to its parent before walking, so the mod-ID
/// directory itself is retained as the first component of every
/// [`ArchiveRecord::rel_path`] — this is what lets the output tree mirror
/// per-mod layout under the output root.
pub fn scan(raw_mod_dir: &Path) -> Result<Vec<ArchiveRecord>> {
    let walk_root = raw_mod_dir.parent().unwrap_or(raw_mod_dir);

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(walk_root) {
        let entry = entry?;
        if entry.file_type().is_file() {
            let path = entry.into_path();
            if is_archive_name(&path) {
                paths.push(path);
            }
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|abs_path| {
            let rel_path = abs_path
                .strip_prefix(walk_root)
                .unwrap_or(&abs_path)
                .to_path_buf();
            let expected_uncompressed_size = read_sidecar_size(&abs_path);
            Ok(ArchiveRecord {
                abs_path,
                rel_path,
                expected_uncompressed_size,
            })
        })
        .collect()
}

/// `^.+\.z$`, case-sensitive. `.+` is greedy, so an inner `.z` (e.g.
/// `foo.z.z`, as seen on re-archived assets) doesn't change anything —
/// only the trailing `.z` is structurally required. A name ending in a
/// bare `zz` with no dot, like `foo.zz`, does not match.
fn is_archive_name(path: &Path) -> bool {
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => name.len() > 2 && name.ends_with(".z"),
        None => false,
    }
}

/// Reads the decimal integer on the first line of `<path>.uncompressed_size`.
///
/// A missing or unreadable sidecar is a warning, not a fatal error: the
/// expected size simply defaults to 0 and the archive still decodes.
fn read_sidecar_size(archive_path: &Path) -> u64 {
    let sidecar_path = sidecar_path_for(archive_path);
    let file = match fs::File::open(&sidecar_path) {
        Ok(file) => file,
        Err(_) => {
            log::warn!("sidecar missing or unreadable, defaulting to 0: {}", sidecar_path.display());
            return 0;
        }
    };

    let mut first_line = String::new();
    if std::io::BufReader::new(file).read_line(&mut first_line).is_err() {
        log::warn!("could not read sidecar: {}", sidecar_path.display());
        return 0;
    }

    match first_line.trim().parse() {
        Ok(size) => size,
        Err(_) => {
            log::warn!("sidecar did not contain a decimal size: {}", sidecar_path.display());
            0
        }
    }
}

fn sidecar_path_for(archive_path: &Path) -> PathBuf {
    let mut name = archive_path.as_os_str().to_owned();
    name.push(".uncompressed_size");
    PathBuf::from(name)
}
