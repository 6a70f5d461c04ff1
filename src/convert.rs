use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::error::Error;

/// Binaries looked up on PATH when no explicit engine is configured.
const ENGINE_CANDIDATES: &[&str] = &["soffice", "libreoffice"];

/// LibreOffice output filter for WordprocessingML.
const DOCX_FILTER: &str = "docx:MS Word 2007 XML";

/// Handle to one conversion: `open` the source, `convert` into a
/// destination, `close` to release the source and the staging directory.
pub struct Converter {
    source: PathBuf,
    source_file: File,
    engine: PathBuf,
    staging: TempDir,
}

impl Converter {
    /// Locate an engine and take a handle on the source file.
    pub fn open(source: &Path) -> Result<Self, Error> {
        let engine = find_engine()?;
        let source_file = File::open(source)?;
        let staging = tempfile::Builder::new().prefix("pdfside-").tempdir()?;
        log::debug!(
            "opened {} (engine: {}, staging: {})",
            source.display(),
            engine.display(),
            staging.path().display()
        );
        Ok(Converter {
            source: source.to_path_buf(),
            source_file,
            engine,
            staging,
        })
    }

    /// Run the engine against the source and move the result to `dest`.
    pub fn convert(&mut self, dest: &Path) -> Result<(), Error> {
        // A second soffice instance refuses to start against a locked
        // default profile, so every run gets its own.
        let profile = self.staging.path().join("profile");

        let mut cmd = Command::new(&self.engine);
        cmd.arg("--headless")
            .arg(format!("-env:UserInstallation={}", dir_url(&profile)))
            .arg("--infilter=writer_pdf_import")
            .arg("--convert-to")
            .arg(DOCX_FILTER)
            .arg("--outdir")
            .arg(self.staging.path())
            .arg(&self.source);
        log::debug!("running {cmd:?}");

        let output = cmd.output().map_err(|e| {
            Error::EngineFailed(format!("could not run {}: {e}", self.engine.display()))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::EngineFailed(format!(
                "{} exited with {}: {}",
                self.engine.display(),
                output.status,
                stderr.trim()
            )));
        }
        if !output.stdout.is_empty() {
            log::debug!("engine: {}", String::from_utf8_lossy(&output.stdout).trim());
        }
        if !output.stderr.is_empty() {
            log::debug!("engine stderr: {}", String::from_utf8_lossy(&output.stderr).trim());
        }

        let staged = staged_output(self.staging.path(), &self.source);
        if staged.exists() {
            move_file(&staged, dest)?;
        } else {
            // The engine exited cleanly without writing anything. The
            // destination stays absent and the caller's existence check
            // reports it; no error category of our own here.
            log::warn!("engine produced no output for {}", self.source.display());
        }
        Ok(())
    }

    /// Release the source handle and remove the staging directory.
    pub fn close(self) {
        let Converter {
            source,
            source_file,
            staging,
            ..
        } = self;
        drop(source_file);
        if let Err(e) = staging.close() {
            log::warn!("could not remove staging dir: {e}");
        }
        log::debug!("converter closed for {}", source.display());
    }
}

fn find_engine() -> Result<PathBuf, Error> {
    // An explicit override never falls back to the PATH candidates.
    if let Ok(val) = std::env::var("PDFSIDE_ENGINE") {
        let val = val.trim();
        if !val.is_empty() {
            return locate(Path::new(val)).ok_or_else(|| {
                Error::EngineNotFound(format!("PDFSIDE_ENGINE is set but '{val}' was not found"))
            });
        }
    }

    for candidate in engine_candidates() {
        if let Some(path) = locate(&candidate) {
            return Ok(path);
        }
    }
    Err(Error::EngineNotFound(format!(
        "none of {} found; install LibreOffice or set PDFSIDE_ENGINE",
        ENGINE_CANDIDATES.join(", ")
    )))
}

fn engine_candidates() -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    candidates.extend(ENGINE_CANDIDATES.iter().map(PathBuf::from));

    #[cfg(target_os = "macos")]
    candidates.push("/Applications/LibreOffice.app/Contents/MacOS/soffice".into());

    #[cfg(target_os = "windows")]
    {
        if let Ok(pf) = std::env::var("ProgramFiles") {
            candidates.push(
                PathBuf::from(pf)
                    .join("LibreOffice")
                    .join("program")
                    .join("soffice.exe"),
            );
        } else {
            candidates.push("C:\\Program Files\\LibreOffice\\program\\soffice.exe".into());
        }
    }

    candidates
}

/// Resolve a bare program name via PATH; names with separators are taken as-is.
fn locate(program: &Path) -> Option<PathBuf> {
    if program.components().count() > 1 {
        return program.is_file().then(|| program.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        #[cfg(windows)]
        {
            let with_exe = candidate.with_extension("exe");
            if with_exe.is_file() {
                return Some(with_exe);
            }
        }
    }
    None
}

/// `file://` URL for the engine's per-run user profile directory.
fn dir_url(dir: &Path) -> String {
    let mut path = dir.to_string_lossy().replace('\\', "/");
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    // The engine rejects URLs with raw spaces, which show up in temp
    // paths under Windows user directories.
    let path = path.replace('%', "%25").replace(' ', "%20");
    format!("file://{path}")
}

/// The engine names its result after the source stem, so `a/b/x.pdf`
/// staged into `s/` comes out as `s/x.docx`.
fn staged_output(staging: &Path, source: &Path) -> PathBuf {
    match source.with_extension("docx").file_name() {
        Some(name) => staging.join(name),
        None => staging.join("output.docx"),
    }
}

fn move_file(from: &Path, to: &Path) -> Result<(), Error> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    // Staging lives in the system temp dir, often a different filesystem
    // than the destination, where rename cannot work.
    fs::copy(from, to)?;
    let _ = fs::remove_file(from);
    Ok(())
}
