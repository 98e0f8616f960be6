//! Output writer (C3): mirrors the decoded tree under an output root and
//! places the synthesized `.mod` descriptor atomically.

use crate::Result;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt as _;

/// Computes the output path for a decoded archive: `output_root` joined
/// with `rel_path`, stripped of its trailing `.z`.
#[must_use]
pub fn output_path_for(output_root: &Path, rel_path: &Path) -> PathBuf {
    let stripped = strip_z_suffix(rel_path);
    output_root.join(stripped)
}

fn strip_z_suffix(rel_path: &Path) -> PathBuf {
    match rel_path.to_str() {
        Some(s) if s.ends_with(".z") => PathBuf::from(&s[..s.len() - 2]),
        _ => rel_path.to_path_buf(),
    }
}

/// Writes a decoded archive's bytes to `dest`, creating intermediate
/// directories as needed. Mode is `0644` on Unix (owner rw, others r); the
/// mode is a no-op on platforms without Unix permission bits.
pub fn write_decoded(dest: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, data)?;
    set_mode_0644(dest)?;
    Ok(())
}

/// Writes `data` to `dest` by first writing a sibling temporary file and
/// renaming it into place, so a reader never observes a half-written file.
/// Used for the `.mod` descriptor, per §4.7.
pub fn write_atomically(dest: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_path = dest.to_path_buf();
    let tmp_name = format!(
        ".{}.tmp",
        dest.file_name().and_then(|n| n.to_str()).unwrap_or("descriptor")
    );
    tmp_path.set_file_name(tmp_name);

    {
        let mut tmp_file = fs::File::create(&tmp_path)?;
        tmp_file.write_all(data)?;
        tmp_file.sync_all()?;
    }
    fs::rename(&tmp_path, dest)?;
    Ok(())
}

#[cfg(unix)]
fn set_mode_0644(path: &Path) -> Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o644);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode_0644(_path: &Path) -> Result<()> {
    Ok(())
}
