use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// A raw `(distance, energy)` sample as read from a PMF file.
pub type Sample = (f64, f64);

#[derive(Debug, Error)]
pub enum PmfFileError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid number '{token}' on line {line} of '{path}'")]
    Parse {
        path: String,
        line: usize,
        token: String,
    },
    #[error("Non-finite value '{token}' on line {line} of '{path}'")]
    NonFinite {
        path: String,
        line: usize,
        token: String,
    },
    #[error("Negative distance {value} on line {line} of '{path}'")]
    NegativeDistance {
        path: String,
        line: usize,
        value: f64,
    },
    #[error("Dangling distance without energy at the end of '{path}'")]
    UnpairedValue { path: String },
}

/// Reads whitespace separated `(distance, energy)` pairs.
///
/// The format has no header and no comments; any non-numeric token is an error,
/// and so are `inf` and `nan`.
pub fn read_samples(path: &Path) -> Result<Vec<Sample>, PmfFileError> {
    let content = std::fs::read_to_string(path).map_err(|e| PmfFileError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    parse_samples(&content, path)
}

pub fn parse_samples(content: &str, path: &Path) -> Result<Vec<Sample>, PmfFileError> {
    let path_str = || path.to_string_lossy().to_string();
    let mut samples = Vec::new();
    let mut pending: Option<f64> = None;

    for (line_idx, line) in content.lines().enumerate() {
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| PmfFileError::Parse {
                path: path_str(),
                line: line_idx + 1,
                token: token.to_string(),
            })?;
            if !value.is_finite() {
                return Err(PmfFileError::NonFinite {
                    path: path_str(),
                    line: line_idx + 1,
                    token: token.to_string(),
                });
            }
            match pending.take() {
                None => {
                    if value < 0.0 {
                        return Err(PmfFileError::NegativeDistance {
                            path: path_str(),
                            line: line_idx + 1,
                            value,
                        });
                    }
                    pending = Some(value);
                }
                Some(x) => samples.push((x, value)),
            }
        }
    }

    if pending.is_some() {
        return Err(PmfFileError::UnpairedValue { path: path_str() });
    }
    Ok(samples)
}

pub fn write_samples<I>(path: &Path, samples: I) -> Result<(), PmfFileError>
where
    I: IntoIterator<Item = Sample>,
{
    let io_err = |e: std::io::Error| PmfFileError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    for (x, y) in samples {
        writeln!(writer, "{x} {y}").map_err(io_err)?;
    }
    writer.flush().map_err(io_err)
}
