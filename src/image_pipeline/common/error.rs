use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Image is too large to process: {pixels} pixels (limit: {limit} pixels)")]
    ImageTooLarge { pixels: u64, limit: u64 },

    #[error("Resized image needs a {columns} x {rows} cell grid, beyond what a worksheet can address")]
    GridTooLarge { columns: u64, rows: u64 },

    #[error("Output path not found: {0}")]
    OutputPathNotFound(String),

    #[error("Permission denied writing output file: {0}")]
    PermissionDenied(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to encode spreadsheet: {0}")]
    EncodeError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load configuration file: {0}")]
    ConfigFileError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConversionError {
    /// Failures caused by the source file: missing, unreadable, corrupt or oversized.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            ConversionError::InputNotFound(_)
                | ConversionError::InputReadError(_)
                | ConversionError::UnsupportedFormat(_)
                | ConversionError::DecodeError(_)
                | ConversionError::InvalidDimensions(_, _)
                | ConversionError::ImageTooLarge { .. }
                | ConversionError::GridTooLarge { .. }
        )
    }

    /// Failures raised while persisting the finished document.
    pub fn is_output(&self) -> bool {
        matches!(
            self,
            ConversionError::OutputPathNotFound(_)
                | ConversionError::PermissionDenied(_)
                | ConversionError::OutputWriteError(_)
                | ConversionError::EncodeError(_)
        )
    }

    /// Maps an I/O failure on `path` while writing output onto the output taxonomy.
    pub(crate) fn from_output_io(path: &std::path::Path, err: std::io::Error) -> Self {
        let detail = format!("{}: {}", path.display(), err);
        match err.kind() {
            std::io::ErrorKind::NotFound => ConversionError::OutputPathNotFound(detail),
            std::io::ErrorKind::PermissionDenied => ConversionError::PermissionDenied(detail),
            _ => ConversionError::OutputWriteError(detail),
        }
    }

    /// Maps an I/O failure on `path` while reading input onto the input taxonomy.
    pub(crate) fn from_input_io(path: &std::path::Path, err: std::io::Error) -> Self {
        let detail = format!("{}: {}", path.display(), err);
        match err.kind() {
            std::io::ErrorKind::NotFound => ConversionError::InputNotFound(detail),
            _ => ConversionError::InputReadError(detail),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
