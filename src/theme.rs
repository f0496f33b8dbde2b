use eframe::egui::Color32;

// Color Palette
// Primary Colors
pub const PRIMARY_BUTTON_BG: Color32 = Color32::from_rgb(76, 154, 255); // Vibrant blue for primary actions
pub const SECONDARY_BUTTON_BG: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 0);

// Text Colors
pub const BUTTON_MAIN_TEXT: Color32 = Color32::from_rgb(255, 255, 255); // White text for buttons
pub const SECONDARY_TEXT: Color32 = Color32::from_rgb(138, 138, 143); // Medium gray for secondary text
pub const TEXT_ERROR: Color32 = Color32::from_rgb(220, 38, 38); // Red for error messages

// UI Elements
pub const STATUS_BG: Color32 = Color32::from_rgb(248, 248, 248); // Status frame background
pub const BORDER_COLOR: Color32 = Color32::from_rgba_premultiplied(60, 60, 67, 15); // Subtle border

// Sizing & Spacing
pub const ROUNDING_BUTTON: f32 = 6.0;
pub const MIN_SIZE_BUTTON: egui::Vec2 = egui::Vec2::new(140.0, 40.0);

pub const BUTTON_FONT_SIZE: f32 = 16.0;
