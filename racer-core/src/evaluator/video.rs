//! Listing of recorded videos.
use anyhow::Result;
use std::{
    fmt,
    path::{Path, PathBuf},
};

const VIDEO_EXTENSION: &str = "mp4";

/// A video file written by a recording environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    /// Path of the file.
    pub path: PathBuf,

    /// Size of the file in bytes.
    pub size: u64,
}

impl VideoFile {
    /// Size of the file in megabytes.
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / (1024. * 1024.)
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Videos found in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReport {
    dir: PathBuf,
    videos: Vec<VideoFile>,
}

impl VideoReport {
    /// Lists `*.mp4` files in `dir`, sorted by file name.
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut videos = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_video = path
                .extension()
                .map_or(false, |ext| ext == VIDEO_EXTENSION);
            if path.is_file() && is_video {
                let size = std::fs::metadata(&path)?.len();
                videos.push(VideoFile { path, size });
            }
        }
        videos.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(Self {
            dir: dir.to_path_buf(),
            videos,
        })
    }

    /// Returns the videos.
    pub fn videos(&self) -> &[VideoFile] {
        &self.videos
    }

    /// Returns the number of videos.
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    /// Returns `true` if no video was found.
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

impl fmt::Display for VideoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, video) in self.videos.iter().enumerate() {
            writeln!(f, "{}. {} ({:.2} MB)", i + 1, video.file_name(), video.size_mb())?;
        }
        write!(
            f,
            "{} video(s) saved in {:?}",
            self.videos.len(),
            self.dir
        )
    }
}
