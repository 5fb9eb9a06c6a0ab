use ratatui::style::Color;

pub struct Theme {
    #[allow(dead_code)] // Background color field for future use
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_cell_bg: Color,
    pub op_move: Color,    // < and >
    pub op_arith: Color,   // + and -
    pub op_io: Color,      // . and ,
    pub op_bracket: Color, // [ and ]
    pub number: Color,     // Cell values and counters
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_cell_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for the active row
    op_move: Color::Rgb(148, 226, 213),        // Cyan/teal for pointer moves
    op_arith: Color::Rgb(205, 214, 244),       // Default fg for cell arithmetic
    op_io: Color::Rgb(250, 179, 135),          // Orange for byte I/O
    op_bracket: Color::Rgb(137, 180, 250),     // Blue for loop brackets
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
};
