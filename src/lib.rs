#![warn(clippy::pedantic, clippy::std_instead_of_core)]
#![allow(clippy::enum_glob_use, clippy::missing_errors_doc, clippy::module_name_repetitions)]

//! Binary codec for ARK: Survival Evolved workshop mods.
//!
//! A freshly downloaded mod directory is a tree of per-file zlib-compressed
//! `*.z` archives plus two binary metadata sidecars (`mod.info`,
//! `modmeta.info`). This crate turns that tree into an installable mod: a
//! mirrored tree of decompressed assets plus a synthesized `<modID>.mod`
//! descriptor the game reads to register the mod.
//!
//! This crate is the codec only. Downloading a mod (invoking `steamcmd`,
//! walking its output into a working directory) is the caller's job; this
//! crate consumes the resulting directory.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! fn example() -> arkmod_codec::Result<()> {
//!     let raw_mod_dir = Path::new("./rawmods/731604991");
//!     let output_root = Path::new("./mods");
//!
//!     let summary = arkmod_codec::unpack(raw_mod_dir, output_root)?;
//!     println!("unpacked {} archives", summary.archives_unpacked);
//!
//!     arkmod_codec::synthesize_descriptor(raw_mod_dir, output_root)?;
//!     Ok(())
//! }
//! ```

mod archive;
mod descriptor;
mod error;
mod mod_info;
mod mod_meta;
mod model;
mod scanner;
mod strings;
mod writer;

pub use error::{Error, Result};
pub use model::{ArchiveHeader, ArchiveRecord, ChunkMetadata, ModMetaPair};
pub use strings::Ue4String;

pub mod prelude {
    //! Commonly imported together.
    pub use crate::{model::ArchiveRecord, Error, Result, UnpackSummary};
}

use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

/// Outcome of a single [`unpack`] call. Non-fatal conditions encountered
/// along the way (a missing sidecar, a size mismatch) are not counted here
/// — they are logged through the `log` facade, and a caller that cares
/// about their volume should install a `log::Log` that counts them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnpackSummary {
    pub archives_unpacked: usize,
}

/// Decodes every `*.z` archive under `raw_mod_dir` and writes the
/// decompressed tree under `output_root`, mirroring relative layout with
/// the mod-ID directory retained as the first path component.
///
/// This does not write the `.mod` descriptor; call
/// [`synthesize_descriptor`] separately (the CLI composes both).
pub fn unpack(raw_mod_dir: &Path, output_root: &Path) -> Result<UnpackSummary> {
    validate_raw_mod_dir(raw_mod_dir)?;

    let records = scanner::scan(raw_mod_dir)?;
    let mut summary = UnpackSummary::default();

    for record in &records {
        let file = File::open(&record.abs_path)?;
        let mut reader = BufReader::new(file);
        let data = archive::decode(&mut reader, &record.abs_path)?;

        if data.len() as u64 != record.expected_uncompressed_size
            && record.expected_uncompressed_size != 0
        {
            log::warn!(
                "decoded size for {} ({} bytes) does not match sidecar ({} bytes)",
                record.abs_path.display(),
                data.len(),
                record.expected_uncompressed_size
            );
        }

        let dest = writer::output_path_for(output_root, &record.rel_path);
        writer::write_decoded(&dest, &data)?;

        summary.archives_unpacked += 1;
    }

    Ok(summary)
}

/// Parses `mod.info` and `modmeta.info` under `raw_mod_dir`, synthesizes
/// the `<modID>.mod` descriptor, and writes it atomically under
/// `output_root`. The mod ID is parsed from `raw_mod_dir`'s basename.
///
/// Returns the path of the written descriptor.
pub fn synthesize_descriptor(raw_mod_dir: &Path, output_root: &Path) -> Result<PathBuf> {
    validate_raw_mod_dir(raw_mod_dir)?;

    let mod_id = parse_mod_id(raw_mod_dir)?;

    let mod_info_path = raw_mod_dir.join("mod.info");
    let mod_info = {
        let file = File::open(&mod_info_path)?;
        let mut reader = BufReader::new(file);
        mod_info::parse(&mut reader, &mod_info_path)?
    };

    let mod_meta_path = raw_mod_dir.join("modmeta.info");
    let mod_meta = {
        let file = File::open(&mod_meta_path)?;
        let mut reader = BufReader::new(file);
        mod_meta::parse(&mut reader, &mod_meta_path)?
    };

    let bytes = descriptor::build(mod_id, mod_info.all(), &mod_meta);

    let dest = output_root.join(format!("{mod_id}.mod"));
    writer::write_atomically(&dest, &bytes)?;

    Ok(dest)
}

fn validate_raw_mod_dir(raw_mod_dir: &Path) -> Result<()> {
    let metadata = fs::metadata(raw_mod_dir)
        .map_err(|_| Error::InputNotFound(raw_mod_dir.to_path_buf()))?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory(raw_mod_dir.to_path_buf()));
    }
    Ok(())
}

/// The mod ID is the decimal basename of the raw mod directory — it is
/// never discovered any other way.
fn parse_mod_id(raw_mod_dir: &Path) -> Result<u32> {
    raw_mod_dir
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.parse().ok())
        .ok_or_else(|| Error::InvalidModId(raw_mod_dir.to_path_buf()))
}
