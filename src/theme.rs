use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub name: &'static str,
    pub title: Color,
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub state_open: Color,
    pub state_closed: Color,
    pub label: Color,
    pub error: Color,
    pub background: Color,
    pub selection: Color,
    pub quick_filter_active: Color,
    pub code_background: Color,
}

pub const PALETTES: [Palette; 3] = [
    Palette {
        name: "azure",
        title: Color::Rgb(0, 120, 212),
        accent: Color::Rgb(80, 230, 255),
        text: Color::Rgb(230, 236, 244),
        muted: Color::Rgb(128, 138, 152),
        state_open: Color::Rgb(16, 124, 16),
        state_closed: Color::Rgb(209, 52, 56),
        label: Color::Rgb(255, 185, 0),
        error: Color::Rgb(232, 17, 35),
        background: Color::Rgb(12, 16, 24),
        selection: Color::Rgb(0, 69, 120),
        quick_filter_active: Color::Rgb(0, 120, 212),
        code_background: Color::Rgb(24, 30, 42),
    },
    Palette {
        name: "terminal",
        title: Color::Cyan,
        accent: Color::LightCyan,
        text: Color::White,
        muted: Color::DarkGray,
        state_open: Color::Green,
        state_closed: Color::Red,
        label: Color::Yellow,
        error: Color::LightRed,
        background: Color::Reset,
        selection: Color::Blue,
        quick_filter_active: Color::Magenta,
        code_background: Color::Reset,
    },
    Palette {
        name: "paper",
        title: Color::Rgb(36, 41, 47),
        accent: Color::Rgb(9, 105, 218),
        text: Color::Rgb(31, 35, 40),
        muted: Color::Rgb(101, 109, 118),
        state_open: Color::Rgb(26, 127, 55),
        state_closed: Color::Rgb(130, 80, 223),
        label: Color::Rgb(154, 103, 0),
        error: Color::Rgb(207, 34, 46),
        background: Color::Rgb(255, 255, 255),
        selection: Color::Rgb(221, 244, 255),
        quick_filter_active: Color::Rgb(9, 105, 218),
        code_background: Color::Rgb(246, 248, 250),
    },
];

/// Looks a palette up by name, falling back to the first one.
pub fn resolve_palette(name: Option<&str>) -> &'static Palette {
    name.and_then(|name| {
        PALETTES
            .iter()
            .find(|palette| palette.name.eq_ignore_ascii_case(name.trim()))
    })
    .unwrap_or(&PALETTES[0])
}
