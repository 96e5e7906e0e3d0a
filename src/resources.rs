//! Resource management for SFLizer
//!
//! Locates, downloads and caches the tokenizer model used for tagging and
//! lemmatization. Resources live in the per-user data directory.

use flate2::read::GzDecoder;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// nlprule release whose binaries match the linked crate version
const NLPRULE_RELEASE: &str = "0.6.4";

const TOKENIZER_FILE: &str = "en_tokenizer.bin";

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Failed to download {url}: {reason}")]
    Download { url: String, reason: String },
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ResourceError {
    fn io(path: &Path, source: io::Error) -> Self {
        ResourceError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        }
    }
}

/// Resource download status
#[derive(Debug, Clone)]
pub enum DownloadStatus {
    AlreadyExists,
    Downloading { file: String, progress: u64, total: u64 },
    Unpacking { file: String },
    Completed,
}

/// Get the base resource directory (XDG data directory)
pub fn get_resource_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sflizer")
        .join("resources")
}

pub fn get_model_dir() -> PathBuf {
    get_resource_dir().join("nlprule").join(NLPRULE_RELEASE)
}

pub fn get_tokenizer_path() -> PathBuf {
    get_model_dir().join(TOKENIZER_FILE)
}

pub fn is_tokenizer_available() -> bool {
    get_tokenizer_path().exists()
}

fn tokenizer_url() -> String {
    format!(
        "https://github.com/bminixhofer/nlprule/releases/download/{}/{}.gz",
        NLPRULE_RELEASE, TOKENIZER_FILE
    )
}

/// Ensure the tokenizer model is available, downloading if necessary.
/// Returns the model file path.
pub fn ensure_tokenizer_model<F>(on_progress: F) -> Result<PathBuf, ResourceError>
where
    F: Fn(DownloadStatus),
{
    let model_path = get_tokenizer_path();
    if model_path.exists() {
        on_progress(DownloadStatus::AlreadyExists);
        return Ok(model_path);
    }

    let model_dir = get_model_dir();
    fs::create_dir_all(&model_dir).map_err(|e| ResourceError::io(&model_dir, e))?;

    let url = tokenizer_url();
    let archive_path = model_dir.join(format!("{}.gz", TOKENIZER_FILE));
    info!("Downloading tokenizer model from {}...", url);
    download_file(&url, &archive_path, |progress, total| {
        on_progress(DownloadStatus::Downloading {
            file: TOKENIZER_FILE.to_string(),
            progress,
            total,
        });
    })?;

    on_progress(DownloadStatus::Unpacking {
        file: TOKENIZER_FILE.to_string(),
    });
    gunzip(&archive_path, &model_path)?;
    if let Err(e) = fs::remove_file(&archive_path) {
        warn!("Could not remove {:?}: {}", archive_path, e);
    }

    on_progress(DownloadStatus::Completed);
    info!("Tokenizer model ready at {:?}", model_path);
    Ok(model_path)
}

/// Decompress `archive` into `dest` through a temporary file
fn gunzip(archive: &Path, dest: &Path) -> Result<(), ResourceError> {
    let input = fs::File::open(archive).map_err(|e| ResourceError::io(archive, e))?;
    let mut decoder = GzDecoder::new(input);

    let temp_path = dest.with_extension("unpack");
    let mut output = fs::File::create(&temp_path).map_err(|e| ResourceError::io(&temp_path, e))?;
    io::copy(&mut decoder, &mut output).map_err(|e| ResourceError::io(&temp_path, e))?;

    fs::rename(&temp_path, dest).map_err(|e| ResourceError::io(dest, e))
}

/// Download a file with progress tracking
fn download_file<F>(url: &str, dest: &Path, on_progress: F) -> Result<(), ResourceError>
where
    F: Fn(u64, u64),
{
    let response = ureq::get(url).call().map_err(|e| ResourceError::Download {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let total_size = response
        .header("content-length")
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    let mut reader = response.into_reader();

    // Use a temporary file to avoid partial downloads
    let temp_path = dest.with_extension("download");
    let mut file = fs::File::create(&temp_path).map_err(|e| ResourceError::io(&temp_path, e))?;

    let mut downloaded: u64 = 0;
    let mut buffer = [0u8; 8192];
    let mut last_progress_update = std::time::Instant::now();

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| ResourceError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if bytes_read == 0 {
            break;
        }

        file.write_all(&buffer[..bytes_read])
            .map_err(|e| ResourceError::io(&temp_path, e))?;

        downloaded += bytes_read as u64;

        // At most every 100ms
        if last_progress_update.elapsed().as_millis() >= 100 {
            on_progress(downloaded, total_size);
            last_progress_update = std::time::Instant::now();
        }
    }

    on_progress(downloaded, total_size);

    fs::rename(&temp_path, dest).map_err(|e| ResourceError::io(dest, e))?;

    Ok(())
}
