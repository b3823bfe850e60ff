// Hex color to RGBA conversion for map layers
use super::error::DashboardError;

/// Alpha applied to every map marker.
pub const MARKER_ALPHA: u8 = 160;

/// Convert `#RRGGBB` into `[r, g, b, MARKER_ALPHA]`.
///
/// Leading `#` characters are stripped. Anything other than exactly six hex
/// digits afterwards is rejected instead of being truncated.
pub fn hex_to_rgba(hex_color: &str) -> Result<[u8; 4], DashboardError> {
    let digits = hex_color.trim_start_matches('#');
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DashboardError::InvalidColorFormat(hex_color.to_string()));
    }

    let channel = |start: usize| {
        u8::from_str_radix(&digits[start..start + 2], 16)
            .map_err(|_| DashboardError::InvalidColorFormat(hex_color.to_string()))
    };

    Ok([channel(0)?, channel(2)?, channel(4)?, MARKER_ALPHA])
}
