//! Color math shared by the themed layers and the curtain overlay

use ratatui::style::Color;

/// Linear interpolation between two channel values
pub fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let t = t.clamp(0.0, 1.0);
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

/// Mix two colors, `t = 0.0` is `a` and `t = 1.0` is `b`
///
/// Only RGB colors interpolate. Named and indexed colors have no channel
/// values, so they switch over at the midpoint.
pub fn mix(a: Color, b: Color, t: f32) -> Color {
    match (a, b) {
        (Color::Rgb(ar, ag, ab), Color::Rgb(br, bg, bb)) => {
            Color::Rgb(lerp_u8(ar, br, t), lerp_u8(ag, bg, t), lerp_u8(ab, bb, t))
        }
        _ if t < 0.5 => a,
        _ => b,
    }
}

/// Scale an RGB color toward black
pub fn dim(color: Color, factor: f32) -> Color {
    mix(Color::Rgb(0, 0, 0), color, factor)
}

/// Smoothstep easing on `0.0..=1.0`
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
