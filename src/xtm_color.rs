use ratatui::style::Color;
use term_color_support::ColorSupport;

/// A trait to extend Ratatui's Color with cross-platform consistency methods.
pub trait WTMatch {
    /// Adjusts the color to match the Windows Terminal (Campbell) visual style
    /// based on the current terminal's color capabilities.
    fn wtmatch(self) -> Color;
}

/// Pick the best representation of an RGB sample for the current terminal
/// Falls back to the 256-color index, then to `basic` on 16-color terminals
fn adapt(rgb: (u8, u8, u8), index256: u8, basic: Color) -> Color {
    let support = ColorSupport::stdout();
    if support.has_16m {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    } else if support.has_256 {
        Color::Indexed(index256)
    } else {
        basic
    }
}

impl WTMatch for Color {
    fn wtmatch(self) -> Color {
        // Campbell RGB values with their closest stable 256-color index
        let mapping = match self {
            Color::Black =>         Some(((12, 12, 12),   232)),
            Color::Red =>           Some(((197, 15, 31),  160)),
            Color::Green =>         Some(((19, 161, 14),  28)),
            Color::Blue =>          Some(((0, 55, 218),   20)),
            Color::Cyan =>          Some(((58, 150, 221), 38)),
            Color::Gray =>          Some(((204, 204, 204), 250)),
            Color::DarkGray =>      Some(((118, 118, 118), 243)),
            Color::LightBlue =>     Some(((59, 120, 255), 63)),
            Color::Yellow =>        Some(((193, 156, 0),  178)),
            Color::White =>         Some(((242, 242, 242), 255)),
            _ => None, // Custom RGB or Indexed colors are returned as-is
        };

        match mapping {
            Some((rgb, index256)) => adapt(rgb, index256, self),
            None => self,
        }
    }
}

/// Foreground color of the digit drawn on a revealed cell
pub fn danger_color(level: u8) -> Color {
    match level {
        1 => Color::Blue.wtmatch(),
        2 => Color::Green.wtmatch(),
        3 => Color::Red.wtmatch(),
        4 => adapt((0, 82, 172), 25, Color::Magenta),  // dark blue
        5 => adapt((190, 33, 55), 124, Color::LightRed), // maroon
        6 => adapt((0, 255, 255), 51, Color::Cyan),
        7 => Color::Black.wtmatch(),
        8 => Color::DarkGray.wtmatch(),
        _ => adapt((255, 109, 194), 205, Color::LightMagenta), // pink
    }
}
