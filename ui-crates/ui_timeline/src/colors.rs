//! Colors for trace bars and the tiled background

use gpui::*;
use timeline_core::background::Rgb;

/// Bars without a domain.
const DEFAULT_TRACE: u32 = 0xBBDDFF;
/// Module loading keeps its own, well-known cyan.
const MODULES_TRACE: u32 = 0xBBFFFF;

/// Light palette so the black labels stay readable.
fn get_palette() -> [Hsla; 8] {
    [
        hsla(210.0 / 360.0, 0.75, 0.85, 1.0), // Blue
        hsla(30.0 / 360.0, 0.80, 0.82, 1.0),  // Orange
        hsla(140.0 / 360.0, 0.70, 0.82, 1.0), // Green
        hsla(340.0 / 360.0, 0.75, 0.86, 1.0), // Pink
        hsla(270.0 / 360.0, 0.70, 0.86, 1.0), // Purple
        hsla(50.0 / 360.0, 0.75, 0.80, 1.0),  // Yellow
        hsla(160.0 / 360.0, 0.70, 0.80, 1.0), // Teal
        hsla(10.0 / 360.0, 0.75, 0.84, 1.0),  // Red-Orange
    ]
}

fn domain_hash(domain: &str) -> usize {
    domain
        .bytes()
        .fold(0usize, |hash, b| hash.wrapping_mul(31).wrapping_add(b as usize))
}

/// Bar color for a trace domain. Stable across runs.
pub fn domain_color(domain: Option<&str>) -> Hsla {
    match domain {
        None => rgb(DEFAULT_TRACE).into(),
        Some("Modules") => rgb(MODULES_TRACE).into(),
        Some(domain) => {
            let palette = get_palette();
            palette[domain_hash(domain) % palette.len()]
        }
    }
}

pub fn background_color(color: Rgb) -> Hsla {
    rgb(color.0).into()
}

pub fn label_color() -> Rgba {
    rgb(0x000000)
}

pub fn trace_border_color() -> Rgba {
    rgb(0x999999)
}

pub fn status_bar_color() -> Rgba {
    rgb(0x252525)
}

pub fn status_text_color() -> Rgba {
    rgb(0xcccccc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_colors_are_stable() {
        assert_eq!(domain_color(Some("Runtime")), domain_color(Some("Runtime")));
        assert_eq!(domain_color(None), Hsla::from(rgb(DEFAULT_TRACE)));
        assert_eq!(domain_color(Some("Modules")), Hsla::from(rgb(MODULES_TRACE)));
    }

    #[test]
    fn test_palette_is_light() {
        assert!(get_palette().iter().all(|c| c.l >= 0.8));
    }
}
