//! Color helpers
//!
//! Colors are authored as sRGB hex values (0xRRGGBB) and shaded in linear
//! space; the surface is an sRGB format so the encode back happens on write.

/// Decodes one sRGB channel in [0, 1] to linear
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Converts 0xRRGGBB to opaque linear RGBA
pub fn hex_to_linear_rgba(hex: u32) -> [f32; 4] {
    let [r, g, b] = hex_to_srgb(hex);
    [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), 1.0]
}

/// Splits 0xRRGGBB into sRGB channels in [0, 1] without decoding
pub fn hex_to_srgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
