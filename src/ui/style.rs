/// Compile-time layout tokens, not user-overridable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTokens {
    pub spacing_4: i32,
    pub spacing_8: i32,
    pub spacing_12: i32,
    pub spacing_16: i32,
    pub spacing_24: i32,
    pub panel_radius: u16,
    pub control_radius: u16,
    pub control_size: u16,
    pub border_width: u16,
    pub thumbnail_size: i32,
    pub gallery_width: i32,
    pub window_default_width: i32,
    pub window_default_height: i32,
    pub curtain_duration_ms: u32,
    pub motion_hover_ms: u32,
    pub toast_duration_ms: u32,
}

pub const LAYOUT_TOKENS: StyleTokens = StyleTokens {
    spacing_4: 4,
    spacing_8: 8,
    spacing_12: 12,
    spacing_16: 16,
    spacing_24: 24,
    panel_radius: 18,
    control_radius: 12,
    control_size: 40,
    border_width: 1,
    thumbnail_size: 96,
    gallery_width: 260,
    window_default_width: 1180,
    window_default_height: 760,
    curtain_duration_ms: 600,
    motion_hover_ms: 160,
    toast_duration_ms: 2_000,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTokens {
    pub window_background: &'static str,
    pub landing_background: &'static str,
    pub panel_background: &'static str,
    pub canvas_background: &'static str,
    pub border_color: &'static str,
    pub text_color: &'static str,
    pub accent_color: &'static str,
    pub accent_text_color: &'static str,
}

pub const COLOR_TOKENS: ColorTokens = ColorTokens {
    window_background: "#ffffff",
    landing_background: "#1f1b2e",
    panel_background: "#f5f3fa",
    canvas_background: "#ffffff",
    border_color: "#d9d4e7",
    text_color: "#2b2540",
    accent_color: "#7c5cff",
    accent_text_color: "#ffffff",
};

#[cfg(test)]
mod tests {
    use super::{COLOR_TOKENS, LAYOUT_TOKENS};

    #[test]
    fn layout_tokens_keep_required_control_size() {
        assert_eq!(LAYOUT_TOKENS.control_size, 40);
    }

    #[test]
    fn curtain_runs_for_six_hundred_milliseconds() {
        assert_eq!(LAYOUT_TOKENS.curtain_duration_ms, 600);
    }

    #[test]
    fn thumbnails_fit_inside_gallery_column() {
        let tokens = LAYOUT_TOKENS;
        assert!(tokens.thumbnail_size * 2 + tokens.spacing_8 * 3 <= tokens.gallery_width);
    }

    #[test]
    fn color_tokens_are_hex_rgb() {
        for value in [
            COLOR_TOKENS.window_background,
            COLOR_TOKENS.landing_background,
            COLOR_TOKENS.panel_background,
            COLOR_TOKENS.canvas_background,
            COLOR_TOKENS.border_color,
            COLOR_TOKENS.text_color,
            COLOR_TOKENS.accent_color,
            COLOR_TOKENS.accent_text_color,
        ] {
            assert_eq!(value.len(), 7, "{value}");
            assert!(value.starts_with('#'));
            assert!(value[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
