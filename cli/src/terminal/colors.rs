use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::Cyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const FOUND: Color = Color::Green;
pub const REJECTED: Color = Color::Yellow;
pub const NO_RESPONSE: Color = Color::Red;
pub const VULNERABLE: Color = Color::Magenta;
