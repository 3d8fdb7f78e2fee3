use crate::error::BmpError;

/// Resource limits for a decode operation.
///
/// All fields default to `None` (no limit). Checked once the header has
/// been parsed, before any pixel buffer is allocated.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size in bytes of the decoded pixel buffer.
    pub max_alloc_bytes: Option<u64>,
}

impl Limits {
    /// Check declared dimensions against limits.
    pub(crate) fn check_dimensions(&self, width: u32, height: u32) -> Result<(), BmpError> {
        if let Some(max_w) = self.max_width {
            if width > max_w {
                return Err(BmpError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if height > max_h {
                return Err(BmpError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(BmpError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that the output allocation stays within limits.
    pub(crate) fn check_alloc(&self, bytes: u64) -> Result<(), BmpError> {
        if let Some(max_bytes) = self.max_alloc_bytes {
            if bytes > max_bytes {
                return Err(BmpError::LimitExceeded(format!(
                    "allocation of {bytes} bytes exceeds memory limit {max_bytes}"
                )));
            }
        }
        Ok(())
    }
}
