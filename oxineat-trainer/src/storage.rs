use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Creates (or truncates) the file at `path`, creating missing
/// parent folders, and hands a buffered writer to `write`.
pub(crate) fn persist<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    write(&mut out)?;
    out.flush()
}
