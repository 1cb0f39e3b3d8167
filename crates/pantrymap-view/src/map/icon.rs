use pantrymap_core::MarkerStyle;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const BADGE_SIZE: u32 = 40;
const PIN_GLYPH: &str = "fa-apple-alt";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerIcon {
    /// Image icon from a `data:` URL, anchored at its centre.
    Image { url: String, size: u32 },
    /// SDK pin element with a glyph.
    Pin {
        background: String,
        border: String,
        glyph: &'static str,
    },
}

/// Icon for a pantry marker in `color`.
///
/// `color` is interpolated into SVG markup, so it must already be a
/// validated hex colour.
#[must_use]
pub fn marker_icon(style: MarkerStyle, color: &str) -> MarkerIcon {
    match style {
        MarkerStyle::Badge => MarkerIcon::Image {
            url: svg_data_url(&badge_svg(color)),
            size: BADGE_SIZE,
        },
        MarkerStyle::Pin => MarkerIcon::Pin {
            background: color.to_string(),
            border: color.to_string(),
            glyph: PIN_GLYPH,
        },
    }
}

fn badge_svg(color: &str) -> String {
    format!(
        concat!(
            r#"<svg width="40" height="40" viewBox="0 0 40 40" xmlns="http://www.w3.org/2000/svg">"#,
            r#"<circle cx="20" cy="20" r="18" fill="{color}" stroke="white" stroke-width="2"/>"#,
            r#"<text x="20" y="25" text-anchor="middle" fill="white" "#,
            r#"font-family="Arial, sans-serif" font-size="16" font-weight="bold">🏪</text>"#,
            "</svg>"
        ),
        color = color
    )
}

fn svg_data_url(svg: &str) -> String {
    format!(
        "data:image/svg+xml;charset=UTF-8,{}",
        utf8_percent_encode(svg, URI_COMPONENT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_is_percent_encoded_svg() {
        let MarkerIcon::Image { url, size } = marker_icon(MarkerStyle::Badge, "#28a745") else {
            panic!("expected image icon");
        };
        assert_eq!(size, 40);
        assert!(url.starts_with("data:image/svg+xml;charset=UTF-8,%3Csvg"));
        assert!(url.contains("fill%3D%22%2328a745%22"), "got: {url}");
        assert!(!url.contains(' '));
    }

    #[test]
    fn pin_uses_color_for_background_and_border() {
        let icon = marker_icon(MarkerStyle::Pin, "#dc3545");
        assert_eq!(
            icon,
            MarkerIcon::Pin {
                background: "#dc3545".to_string(),
                border: "#dc3545".to_string(),
                glyph: PIN_GLYPH,
            }
        );
    }
}
