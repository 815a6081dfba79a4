//! Level loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable level files.
//! Supports both compressed (brotli) and uncompressed RON files.
//! - Reading: Auto-detects format by checking for valid RON start
//! - Writing: Always uses brotli compression

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use thiserror::Error;

use super::LevelDefinition;

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum placements in any single list
    pub const MAX_PER_KIND: usize = 4096;
    /// Maximum world dimension
    pub const MAX_WORLD_SIZE: f32 = 100_000.0;
    /// Maximum coordinate value (prevents overflow issues)
    pub const MAX_COORD: f32 = 1_000_000.0;
    /// Maximum key length
    pub const MAX_KEY_LEN: usize = 128;
}

/// Error type for level lookup and loading
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("Level '{key}' is not registered")]
    NotFound { key: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Decompression error: {0}")]
    Decompress(String),
    #[error("Compression error: {0}")]
    Compress(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Check if a float is valid (not NaN or Inf)
fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

fn check_count(kind: &str, len: usize) -> Result<(), String> {
    if len > limits::MAX_PER_KIND {
        return Err(format!("too many {} ({} > {})", kind, len, limits::MAX_PER_KIND));
    }
    Ok(())
}

fn check_coords(kind: &str, index: usize, values: &[f32]) -> Result<(), String> {
    if values.iter().all(|v| is_valid_float(*v)) {
        Ok(())
    } else {
        Err(format!("{}[{}]: invalid coordinate", kind, index))
    }
}

fn validate_inner(level: &LevelDefinition) -> Result<(), String> {
    if level.key.is_empty() || level.key.len() > limits::MAX_KEY_LEN {
        return Err(format!("key length must be 1..={}", limits::MAX_KEY_LEN));
    }

    let b = level.bounds;
    if !(b.width > 0.0 && b.width <= limits::MAX_WORLD_SIZE)
        || !(b.height > 0.0 && b.height <= limits::MAX_WORLD_SIZE)
    {
        return Err(format!("bounds out of range ({} x {})", b.width, b.height));
    }
    if !(level.goal_x > 0.0) || !is_valid_float(level.goal_x) {
        return Err(format!("goal_x must be positive (got {})", level.goal_x));
    }
    check_coords("player_start", 0, &[level.player_start.x, level.player_start.y])?;

    check_count("platforms", level.platforms.len())?;
    for (i, p) in level.platforms.iter().enumerate() {
        check_coords("platforms", i, &[p.x, p.y, p.width])?;
        if p.width <= 0.0 {
            return Err(format!("platforms[{}]: width must be positive", i));
        }
    }

    for (kind, points) in [
        ("pads", &level.pads),
        ("coins", &level.coins),
        ("rings", &level.rings),
        ("spikes", &level.spikes),
    ] {
        check_count(kind, points.len())?;
        for (i, p) in points.iter().enumerate() {
            check_coords(kind, i, &[p.x, p.y])?;
        }
    }

    check_count("smashers", level.smashers.len())?;
    for (i, s) in level.smashers.iter().enumerate() {
        check_coords("smashers", i, &[s.x, s.top_y, s.gap])?;
        if s.gap <= 0.0 {
            return Err(format!("smashers[{}]: gap must be positive", i));
        }
    }

    check_count("crawlers", level.crawlers.len())?;
    for (i, c) in level.crawlers.iter().enumerate() {
        check_coords("crawlers", i, &[c.x, c.y, c.left, c.right, c.speed])?;
        if c.left > c.right {
            return Err(format!("crawlers[{}]: left ({}) > right ({})", i, c.left, c.right));
        }
    }

    check_count("flyers", level.flyers.len())?;
    for (i, f) in level.flyers.iter().enumerate() {
        check_coords("flyers", i, &[f.x, f.y, f.amplitude, f.speed])?;
    }

    Ok(())
}

/// Validate a level read from an untrusted source
pub fn validate_level(level: &LevelDefinition) -> Result<(), LevelError> {
    validate_inner(level).map_err(LevelError::Validation)
}

/// Load a level from a RON string (for embedded levels or testing)
pub fn load_level_from_str(s: &str) -> Result<LevelDefinition, LevelError> {
    let level: LevelDefinition = ron::from_str(s)?;
    validate_level(&level)?;
    Ok(level)
}

/// Parse level bytes, either plain RON or brotli-compressed RON
pub fn load_level_from_bytes(bytes: &[u8]) -> Result<LevelDefinition, LevelError> {
    // Detect format: RON files start with '(', a comment or whitespace, brotli is binary
    let is_plain_ron = bytes
        .first()
        .map(|&b| matches!(b, b'(' | b'/' | b' ' | b'\n' | b'\r' | b'\t'))
        .unwrap_or(false);

    let contents = if is_plain_ron {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| LevelError::Decompress(format!("invalid UTF-8: {}", e)))?
    } else {
        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut Cursor::new(bytes), &mut decompressed)
            .map_err(|e| LevelError::Decompress(format!("brotli decompression failed: {}", e)))?;
        String::from_utf8(decompressed)
            .map_err(|e| LevelError::Decompress(format!("invalid UTF-8 after decompression: {}", e)))?
    };

    load_level_from_str(&contents)
}

/// Load a level from a RON file (supports both compressed and uncompressed)
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<LevelDefinition, LevelError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    load_level_from_bytes(&bytes)
}

/// Serialize a level to pretty RON text
pub fn serialize_level(level: &LevelDefinition) -> Result<String, LevelError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());
    Ok(ron::ser::to_string_pretty(level, config)?)
}

/// Save a level as brotli-compressed RON
pub fn save_level<P: AsRef<Path>>(level: &LevelDefinition, path: P) -> Result<(), LevelError> {
    let ron_string = serialize_level(level)?;
    let mut compressed = Vec::new();
    compress_into(ron_string.as_bytes(), &mut compressed)?;
    fs::write(path, compressed)?;
    Ok(())
}

/// Brotli-compress `bytes` into `out` (quality 6, window 22)
fn compress_into<W: Write>(bytes: &[u8], out: &mut W) -> Result<(), LevelError> {
    brotli::BrotliCompress(
        &mut Cursor::new(bytes),
        out,
        &brotli::enc::BrotliEncoderParams {
            quality: 6,
            lgwin: 22,
            ..Default::default()
        },
    )
    .map_err(|e| LevelError::Compress(format!("brotli compression failed: {}", e)))?;
    Ok(())
}
