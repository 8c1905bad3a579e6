//! Color-name to display-hex lookup used when normalizing CSV rows and
//! cart payloads. Names the table does not know resolve to `None` and the
//! variant is stored without a hex code.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static COLOR_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("BLACK", "#000000"),
        ("SAGE GREEN", "#B2AC88"),
        ("CHERRY LACQUER", "#532D3A"),
        ("ELECTRIC INDIGO", "#6f00ff"),
        ("MAUVE", "#E0B0FF"),
        ("CELESTIAL YELLOW", "#FFE6A2"),
        ("DUSTED GRAPE", "#ab92b3"),
        ("SEPIA MIDNIGHT PLUM", "#553842"),
        ("TERRACOTTA", "#E2725B"),
        ("DIGITAL MIST", "#646D7E"),
        ("OLIVE GREEN", "#BAB86C"),
        ("CAMOUFLAGE", "#78866b"),
        ("NAVY BLUE", "#000080"),
        ("SKY BLUE", "#87CEEB"),
        ("WHITE", "#ffffff"),
        ("INDIGO", "#4B0082"),
        ("GREEN", "#00FF00"),
        ("GRAY", "#808080"),
        ("GREY", "#808080"),
        ("RED", "#ff0000"),
        ("MAROON", "#800000"),
    ])
});

/// Display hex code for a color name, if the palette knows it.
pub fn hex_for_color(name: &str) -> Option<&'static str> {
    COLOR_CODES.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_colors_resolve() {
        assert_eq!(hex_for_color("BLACK"), Some("#000000"));
        assert_eq!(hex_for_color("GREY"), hex_for_color("GRAY"));
    }

    #[test]
    fn unknown_colors_have_no_code() {
        assert_eq!(hex_for_color("COATS COLOR"), None);
        assert_eq!(hex_for_color("black"), None); // lookups are exact-case
    }
}
