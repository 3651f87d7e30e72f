use ratatui::style::Color;
use term_color_support::ColorSupport;

/// Normalize the ANSI colors used by the game to the Windows Terminal (Campbell) palette
pub trait WTMatch {
    fn wtmatch(self) -> Color;
}

impl WTMatch for Color {
    fn wtmatch(self) -> Color {
        let support = ColorSupport::stdout();

        // Some(((R, G, B), ANSI_256_Index))
        let mapping = match self {
            Color::Black =>      Some(((12, 12, 12),    232)),
            Color::Red =>        Some(((197, 15, 31),   160)),
            Color::Green =>      Some(((19, 161, 14),   28)),
            Color::Yellow =>     Some(((193, 156, 0),   178)),
            Color::Gray =>       Some(((204, 204, 204), 250)),
            Color::DarkGray =>   Some(((118, 118, 118), 243)),
            Color::LightBlue =>  Some(((59, 120, 255),  63)),
            Color::White =>      Some(((242, 242, 242), 255)),
            _ => None,
        };

        match mapping {
            Some((rgb, _)) if support.has_16m => Color::Rgb(rgb.0, rgb.1, rgb.2),
            Some((_, index256)) if support.has_256 => Color::Indexed(index256),
            _ => self,
        }
    }
}

/// Foreground and background of a feedback tile
pub fn tile_colors(matched: bool) -> (Color, Color) {
    if matched {
        (Color::Black.wtmatch(), Color::Green.wtmatch())
    } else {
        (Color::White.wtmatch(), Color::Red.wtmatch())
    }
}
