//! Per-face color attribute.

/// RGB color with floating point channels in `[0, 1]`.
///
/// This is the only per-face attribute the converter carries today.
/// Exporters that need a color for an untagged face fall back to
/// [`FaceColor::MID_GRAY`].
///
/// # Example
///
/// ```
/// use atlas_types::FaceColor;
///
/// let c = FaceColor::new(1.0, 0.5, 0.0);
/// assert_eq!(c.quantize(), (255, 127, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceColor {
    /// Red channel in `[0, 1]`.
    pub r: f32,
    /// Green channel in `[0, 1]`.
    pub g: f32,
    /// Blue channel in `[0, 1]`.
    pub b: f32,
}

impl FaceColor {
    /// Mid-gray, the default for faces with no color attribute.
    pub const MID_GRAY: Self = Self::new(0.5, 0.5, 0.5);

    /// Create a color from RGB channels.
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Quantize each channel from `[0, 1]` to `{0, ..., 255}`.
    ///
    /// Quantization is by **truncation** (`floor(c * 255)` for
    /// in-range input), matching the colored-face export encoding.
    /// Out-of-range channels are clamped first.
    ///
    /// # Example
    ///
    /// ```
    /// use atlas_types::FaceColor;
    ///
    /// assert_eq!(FaceColor::MID_GRAY.quantize(), (127, 127, 127));
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation and sign loss are safe: channels are clamped to [0.0, 1.0] before * 255.0
    pub fn quantize(self) -> (u8, u8, u8) {
        (
            (self.r.clamp(0.0, 1.0) * 255.0) as u8,
            (self.g.clamp(0.0, 1.0) * 255.0) as u8,
            (self.b.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }

    /// The bit-pattern identity of this color.
    ///
    /// Used to group faces by distinct color value without hashing
    /// floats directly.
    #[inline]
    #[must_use]
    pub const fn key(self) -> [u32; 3] {
        [self.r.to_bits(), self.g.to_bits(), self.b.to_bits()]
    }
}

impl Default for FaceColor {
    fn default() -> Self {
        Self::MID_GRAY
    }
}

impl From<(f32, f32, f32)> for FaceColor {
    fn from((r, g, b): (f32, f32, f32)) -> Self {
        Self::new(r, g, b)
    }
}
