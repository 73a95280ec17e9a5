//! PNG and text output, and output path generation

use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

fn create_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    create_parent(path)?;
    image.save_with_format(path, image::ImageFormat::Png)?;
    tracing::info!(path = %path.display(), "saved image");
    Ok(())
}

/// Write a text file, creating parent directories as needed.
pub fn save_text(text: &str, path: &Path) -> Result<(), OutputError> {
    create_parent(path)?;
    std::fs::write(path, text)?;
    Ok(())
}

/// Generate the path for an output derived from `input`.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `input.<extension>` next to the input |
/// | `-o out.png` | `out.png` |
/// | `-o dir/` | `dir/input.<extension>` |
pub fn generate_output_path(input: &Path, extension: &str, output_arg: Option<&Path>) -> PathBuf {
    let file_name = || {
        let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
        format!("{}.{}", stem, extension)
    };
    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(file_name())
            } else {
                output.to_path_buf()
            }
        }
        None => input.with_file_name(file_name()),
    }
}
