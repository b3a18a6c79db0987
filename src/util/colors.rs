use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x00639be9);
pub const SECONDARY: Color = Color::from_u32(0x009fb9e9);
pub const NEUTRAL: Color = Color::from_u32(0x00404040);
pub const BACKGROUND: Color = Color::from_u32(0x000d0d0d);
pub const ERROR: Color = Color::from_u32(0x00e06c75);
