//! Input file handling and path utilities.

use std::path::{Path, PathBuf};

use rollshift_core::decoders::ImageFormat;

/// Supported image extensions for batch processing
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff"];

/// Output format used when neither `--format` nor the output path names one.
pub const DEFAULT_OUTPUT_FORMAT: ImageFormat = ImageFormat::Jpeg;

/// Determine the output path and format for an input.
///
/// * `out` naming an existing directory: `<dir>/<stem>_positive.<ext>`
/// * `out` naming a file: used as-is; its extension picks the format unless
///   `format` is given
/// * no `out`: `<stem>_positive.<ext>` next to the input
pub fn determine_output_path(
    input: &Path,
    out: Option<&Path>,
    format: Option<ImageFormat>,
) -> Result<(PathBuf, ImageFormat), String> {
    if let Some(out_path) = out.filter(|p| !p.is_dir()) {
        let format = match format {
            Some(format) => format,
            None => ImageFormat::from_path(out_path).map_err(|e| e.to_string())?,
        };
        return Ok((out_path.to_path_buf(), format));
    }

    let format = format.unwrap_or(DEFAULT_OUTPUT_FORMAT);
    let filename = input
        .file_stem()
        .ok_or_else(|| format!("Invalid input filename: {}", input.display()))?
        .to_string_lossy();
    let dir = match out {
        Some(dir) => dir,
        None => input.parent().unwrap_or(Path::new(".")),
    };
    Ok((
        dir.join(format!("{}_positive.{}", filename, format.extension())),
        format,
    ))
}

/// Expand a list of inputs (files and directories) into a list of image files.
///
/// Directories are scanned for supported image files. If `recursive` is
/// true, subdirectories are also scanned.
pub fn expand_inputs(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            collect_images_from_dir(input, recursive, &mut files)?;
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(format!("Path not found: {}", input.display()));
        }
    }

    // Sort for consistent ordering
    files.sort();
    Ok(files)
}

fn collect_images_from_dir(
    dir: &Path,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> Result<(), String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Error reading directory entry: {}", e))?;
        let path = entry.path();

        if path.is_dir() {
            if recursive {
                collect_images_from_dir(&path, recursive, files)?;
            }
        } else if is_supported_image(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_output_path_next_to_input() {
        let (path, format) =
            determine_output_path(Path::new("/scans/roll1/frame01.tif"), None, None).unwrap();
        assert_eq!(path, PathBuf::from("/scans/roll1/frame01_positive.jpg"));
        assert_eq!(format, ImageFormat::Jpeg);
    }

    #[test]
    fn test_output_path_in_directory_with_format() {
        let dir = tempfile::tempdir().unwrap();
        let (path, format) = determine_output_path(
            Path::new("frame02.png"),
            Some(dir.path()),
            Some(ImageFormat::Tiff),
        )
        .unwrap();
        assert_eq!(path, dir.path().join("frame02_positive.tif"));
        assert_eq!(format, ImageFormat::Tiff);
    }

    #[test]
    fn test_output_path_explicit_file() {
        let (path, format) =
            determine_output_path(Path::new("a.jpg"), Some(Path::new("out/b.png")), None).unwrap();
        assert_eq!(path, PathBuf::from("out/b.png"));
        assert_eq!(format, ImageFormat::Png);

        assert!(determine_output_path(Path::new("a.jpg"), Some(Path::new("out/b.gif")), None)
            .is_err());
    }

    #[test]
    fn test_expand_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("b.JPG"), b"").unwrap();
        fs::write(dir.path().join("a.png"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::write(nested.join("c.tif"), b"").unwrap();

        let flat = expand_inputs(&[dir.path().to_path_buf()], false).unwrap();
        assert_eq!(
            flat,
            vec![dir.path().join("a.png"), dir.path().join("b.JPG")]
        );

        let deep = expand_inputs(&[dir.path().to_path_buf()], true).unwrap();
        assert_eq!(deep.len(), 3);
        assert!(deep.contains(&nested.join("c.tif")));

        assert!(expand_inputs(&[dir.path().join("missing.png")], false).is_err());
    }
}
