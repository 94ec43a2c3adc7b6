//! Archive assembly: transforms candidates and writes zip entries.

use crate::ExportError;
use crate::Result;
use crate::config::ExportConfig;
use crate::ignore::IgnoreChecker;
use crate::report::ExportReport;
use crate::strip::strip_marked_regions;
use crate::walker::CandidateFile;
use crate::walker::collect_candidates;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::info;
use tracing::warn;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Content transform applied to one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transform {
    /// Byte-for-byte copy.
    Verbatim,
    /// Decode UTF-8, remove marked regions, re-encode.
    StripRegions,
    /// Remove the exact redaction-flag substring from the descriptor.
    StripDescriptorFlag,
}

/// Exports the configured base directory into one zip archive.
///
/// Enumerates non-excluded files, applies the redaction transforms when
/// enabled, and writes one entry per candidate, named by its normalized
/// base-relative path. All-or-nothing: any read or write failure aborts
/// the export with an error naming the offending path, and no report is
/// returned.
///
/// # Examples
///
/// ```no_run
/// use distpack_core::ExportConfig;
/// use distpack_core::export_archive;
///
/// let config = ExportConfig::new("/project", "/project/dist").with_redact(true);
/// let report = export_archive(&config)?;
/// println!("wrote {} entries to {}", report.files_added, report.archive_path.display());
/// # Ok::<(), distpack_core::ExportError>(())
/// ```
///
/// # Errors
///
/// Returns an error if the base directory is missing or not a directory,
/// if the tree cannot be enumerated or read, or if the archive cannot be
/// created or written.
pub fn export_archive(config: &ExportConfig) -> Result<ExportReport> {
    config.validate()?;

    std::fs::create_dir_all(&config.output_dir).map_err(|source| {
        ExportError::CreateOutputDir {
            path: config.output_dir.clone(),
            source,
        }
    })?;

    // Resolve both roots so the output-dir exclusion holds regardless of
    // how the caller spelled the paths.
    let base_dir = canonicalized(&config.base_dir)?;
    let output_dir = canonicalized(&config.output_dir)?;
    let archive_path = output_dir.join(&config.archive_name);

    let file = File::create(&archive_path).map_err(|source| ExportError::Write {
        path: archive_path.clone(),
        source,
    })?;

    let mut checker = IgnoreChecker::new(&base_dir, &output_dir);
    let candidates = collect_candidates(&base_dir, &mut checker)?;
    debug!(count = candidates.len(), "collected export candidates");

    let mut report = write_archive(file, &candidates, config)?;
    report.archive_path = archive_path;

    info!(
        archive = %report.archive_path.display(),
        files = report.files_added,
        redacted = report.files_redacted,
        "created export archive"
    );
    Ok(report)
}

/// Writes all candidates into a zip stream.
///
/// Split from [`export_archive`] so tests can assemble into any
/// `Write + Seek` target.
fn write_archive<W: Write + Seek>(
    writer: W,
    candidates: &[CandidateFile],
    config: &ExportConfig,
) -> Result<ExportReport> {
    let mut zip = ZipWriter::new(writer);
    let mut report = ExportReport::default();
    let start = std::time::Instant::now();

    let options = if config.compression_level == 0 {
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
    } else {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(config.compression_level)))
    };

    // Reusable buffer for verbatim streaming.
    let mut buffer = vec![0u8; 64 * 1024];

    for candidate in candidates {
        zip.start_file(&candidate.archive_name, options)
            .map_err(|source| ExportError::Archive {
                path: PathBuf::from(&candidate.archive_name),
                source,
            })?;

        match transform_for(candidate, config) {
            Transform::Verbatim => {
                report.bytes_written += copy_verbatim(candidate, &mut zip, &mut buffer)?;
            }
            Transform::StripRegions => {
                let text = read_text(&candidate.path)?;
                let outcome = strip_marked_regions(&text, &config.tokens);
                if outcome.unterminated {
                    warn!(
                        path = %candidate.path.display(),
                        "unterminated redaction marker; remainder of file ships unredacted"
                    );
                    report.add_warning(format!(
                        "unterminated redaction marker in {}",
                        candidate.archive_name
                    ));
                }
                if outcome.changed() {
                    info!(path = %candidate.path.display(), "redacted marked regions");
                    report.files_redacted += 1;
                }
                write_entry_bytes(&mut zip, candidate, outcome.text.as_bytes())?;
                report.bytes_written += outcome.text.len() as u64;
            }
            Transform::StripDescriptorFlag => {
                let text = read_text(&candidate.path)?;
                let cleaned = text.replace(&config.tokens.descriptor_flag, "");
                if cleaned.len() != text.len() {
                    info!(path = %candidate.path.display(), "removed redaction flag from descriptor");
                    report.files_redacted += 1;
                }
                write_entry_bytes(&mut zip, candidate, cleaned.as_bytes())?;
                report.bytes_written += cleaned.len() as u64;
            }
        }

        report.files_added += 1;
    }

    zip.finish().map_err(|source| ExportError::Archive {
        path: PathBuf::from("<archive>"),
        source,
    })?;

    report.duration = start.elapsed();
    Ok(report)
}

/// Chooses the transform for one candidate under the active policy.
fn transform_for(candidate: &CandidateFile, config: &ExportConfig) -> Transform {
    if !config.redact {
        return Transform::Verbatim;
    }

    let file_name = candidate.path.file_name().and_then(|n| n.to_str());
    if file_name == Some(config.tokens.descriptor_name.as_str()) {
        return Transform::StripDescriptorFlag;
    }

    let extension = candidate.path.extension().and_then(|e| e.to_str());
    if let Some(ext) = extension
        && config.tokens.source_extensions.iter().any(|s| s == ext)
    {
        return Transform::StripRegions;
    }

    Transform::Verbatim
}

/// Streams a file into the current zip entry byte-for-byte.
fn copy_verbatim<W: Write + Seek>(
    candidate: &CandidateFile,
    zip: &mut ZipWriter<W>,
    buffer: &mut [u8],
) -> Result<u64> {
    let mut file = open_candidate(&candidate.path)?;
    let mut bytes_written = 0u64;

    loop {
        let bytes_read = file.read(buffer).map_err(|source| ExportError::Read {
            path: candidate.path.clone(),
            source,
        })?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])
            .map_err(|source| ExportError::Write {
                path: candidate.path.clone(),
                source,
            })?;
        bytes_written += bytes_read as u64;
    }

    Ok(bytes_written)
}

/// Writes transformed bytes into the current zip entry.
fn write_entry_bytes<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    candidate: &CandidateFile,
    bytes: &[u8],
) -> Result<()> {
    zip.write_all(bytes).map_err(|source| ExportError::Write {
        path: candidate.path.clone(),
        source,
    })
}

/// Opens a candidate, mapping a missing file to the consistency error.
fn open_candidate(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ExportError::Vanished {
                path: path.to_path_buf(),
            }
        } else {
            ExportError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Reads a candidate as UTF-8 text for a redaction transform.
fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => ExportError::Vanished {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::InvalidData => ExportError::NonUtf8Content {
            path: path.to_path_buf(),
            source,
        },
        _ => ExportError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn canonicalized(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })
}
