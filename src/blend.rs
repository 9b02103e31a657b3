//! Blend modes and the legacy blend-factor tables.
//!
//! The legacy format encodes blend state as a pair of raw GL-style factor
//! constants (`blendFuncSource` / `blendFuncDestination`), but renderers want
//! a semantic blend mode. The fixed 7-entry tables below map between the two
//! representations; an exact match on both factors selects the mode, and
//! anything else falls back to [`BlendMode::Alpha`].

/// Semantic blend modes understood by sprite renderers.
///
/// Variant order matches the factor tables: `BlendMode as usize` indexes
/// [`SRC_BLEND_FACTORS`] and [`DEST_BLEND_FACTORS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Overwrite the destination (ONE, ZERO).
    Replace,
    /// Additive blending (ONE, ONE). Overlapping particles glow.
    Add,
    /// Multiplicative blending (DST_COLOR, ZERO). Darkens; good for smoke.
    Multiply,
    /// Standard alpha blending (SRC_ALPHA, ONE_MINUS_SRC_ALPHA).
    #[default]
    Alpha,
    /// Additive with source alpha (SRC_ALPHA, ONE).
    AddAlpha,
    /// Premultiplied alpha (ONE, ONE_MINUS_SRC_ALPHA).
    PremulAlpha,
    /// Inverse destination alpha (ONE_MINUS_DST_ALPHA, DST_ALPHA).
    InvDestAlpha,
}

/// Source blend factors, one per [`BlendMode`], in the legacy GL encoding.
pub const SRC_BLEND_FACTORS: [i32; 7] = [
    1,      // GL_ONE
    1,      // GL_ONE
    0x0306, // GL_DST_COLOR
    0x0302, // GL_SRC_ALPHA
    0x0302, // GL_SRC_ALPHA
    1,      // GL_ONE
    0x0305, // GL_ONE_MINUS_DST_ALPHA
];

/// Destination blend factors, one per [`BlendMode`], in the legacy GL encoding.
pub const DEST_BLEND_FACTORS: [i32; 7] = [
    0,      // GL_ZERO
    1,      // GL_ONE
    0,      // GL_ZERO
    0x0303, // GL_ONE_MINUS_SRC_ALPHA
    1,      // GL_ONE
    0x0303, // GL_ONE_MINUS_SRC_ALPHA
    0x0304, // GL_DST_ALPHA
];

const MODES: [BlendMode; 7] = [
    BlendMode::Replace,
    BlendMode::Add,
    BlendMode::Multiply,
    BlendMode::Alpha,
    BlendMode::AddAlpha,
    BlendMode::PremulAlpha,
    BlendMode::InvDestAlpha,
];

impl BlendMode {
    /// Map a raw source/destination factor pair to a blend mode.
    ///
    /// Exact-match lookup against the factor tables; unknown pairs default
    /// to [`BlendMode::Alpha`].
    pub fn from_factors(src: i32, dest: i32) -> Self {
        for (i, mode) in MODES.iter().enumerate() {
            if SRC_BLEND_FACTORS[i] == src && DEST_BLEND_FACTORS[i] == dest {
                return *mode;
            }
        }
        BlendMode::Alpha
    }

    /// The legacy (source, destination) factor pair for this mode.
    pub fn factors(&self) -> (i32, i32) {
        let i = *self as usize;
        (SRC_BLEND_FACTORS[i], DEST_BLEND_FACTORS[i])
    }
}
