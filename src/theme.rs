use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub border_active: Color,
    pub border_inactive: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,

    // Dump
    pub address: Color,
    pub address_bg: Color,
    pub hex_bytes: Color,
    pub hex_ascii: Color,
    pub nonprintable: Color,
    pub row_band: Color,
    pub pane_border: Color,
    pub word_divider: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
    pub cursor_pending: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub selection_mirror_bg: Color,

    // Dialogs and side views
    pub dialog_bg: Color,
    pub dialog_fg: Color,
    pub dialog_border: Color,
    pub menu_selected_bg: Color,
    pub menu_selected_fg: Color,
    pub gauge: Color,

    pub highlight_fg: Color,
    pub error_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

// Solarized Palette
struct Solarized;
impl Solarized {
    const BASE03: Color = Color::Rgb(0, 43, 54);
    const BASE02: Color = Color::Rgb(7, 54, 66);
    const BASE01: Color = Color::Rgb(88, 110, 117);
    const BASE00: Color = Color::Rgb(101, 123, 131);
    const BASE0: Color = Color::Rgb(131, 148, 150);
    const BASE1: Color = Color::Rgb(147, 161, 161);
    const BASE2: Color = Color::Rgb(238, 232, 213);
    const BASE3: Color = Color::Rgb(253, 246, 227);
    const YELLOW: Color = Color::Rgb(181, 137, 0);
    const ORANGE: Color = Color::Rgb(203, 75, 22);
    const RED: Color = Color::Rgb(220, 50, 47);
    const MAGENTA: Color = Color::Rgb(211, 54, 130);
    const BLUE: Color = Color::Rgb(38, 139, 210);
    const CYAN: Color = Color::Rgb(42, 161, 152);
    const GREEN: Color = Color::Rgb(133, 153, 0);
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Solarized Light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "Solarized Dark",
            background: Solarized::BASE03,
            foreground: Solarized::BASE0,
            border_active: Solarized::BLUE,
            border_inactive: Solarized::BASE01,
            status_bar_bg: Solarized::BASE02,
            status_bar_fg: Solarized::BASE1,

            address: Solarized::YELLOW,
            address_bg: Solarized::BASE02,
            hex_bytes: Solarized::BASE1,
            hex_ascii: Solarized::CYAN,
            nonprintable: Solarized::BASE01,
            row_band: Solarized::BASE02,
            pane_border: Solarized::BASE01,
            word_divider: Solarized::BASE02,
            cursor_fg: Solarized::BASE03,
            cursor_bg: Solarized::BASE1,
            cursor_pending: Solarized::ORANGE,
            selection_bg: Solarized::BLUE,
            selection_fg: Solarized::BASE3,
            selection_mirror_bg: Solarized::BASE01,

            dialog_bg: Solarized::BASE02,
            dialog_fg: Solarized::BASE0,
            dialog_border: Solarized::BASE1,
            menu_selected_bg: Solarized::BASE01,
            menu_selected_fg: Solarized::BASE3,
            gauge: Solarized::GREEN,

            highlight_fg: Solarized::MAGENTA,
            error_fg: Solarized::RED,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Solarized Light",
            background: Solarized::BASE3,
            foreground: Solarized::BASE00,
            border_active: Solarized::BLUE,
            border_inactive: Solarized::BASE1,
            status_bar_bg: Solarized::BASE2,
            status_bar_fg: Solarized::BASE01,

            address: Solarized::BASE01,
            address_bg: Solarized::BASE2,
            hex_bytes: Solarized::BASE00,
            hex_ascii: Solarized::CYAN,
            nonprintable: Solarized::BASE1,
            row_band: Solarized::BASE2,
            pane_border: Solarized::BASE1,
            word_divider: Solarized::BASE2,
            cursor_fg: Solarized::BASE3,
            cursor_bg: Solarized::BASE01,
            cursor_pending: Solarized::ORANGE,
            selection_bg: Solarized::BLUE,
            selection_fg: Solarized::BASE3,
            selection_mirror_bg: Solarized::BASE1,

            dialog_bg: Solarized::BASE2,
            dialog_fg: Solarized::BASE00,
            dialog_border: Solarized::BASE01,
            menu_selected_bg: Solarized::BASE1,
            menu_selected_fg: Solarized::BASE3,
            gauge: Solarized::GREEN,

            highlight_fg: Solarized::MAGENTA,
            error_fg: Solarized::RED,
        }
    }

    pub fn all_names() -> Vec<&'static str> {
        vec!["Solarized Dark", "Solarized Light"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_falls_back_to_dark() {
        assert_eq!(Theme::from_name("Solarized Light").name, "Solarized Light");
        assert_eq!(Theme::from_name("nope").name, "Solarized Dark");
        for name in Theme::all_names() {
            assert_eq!(Theme::from_name(name).name, name);
        }
    }
}
