use crate::ui::{ColorTokens, StyleTokens};
use gtk4::CssProvider;

pub(super) fn install_runtime_css(tokens: StyleTokens, colors: ColorTokens, motion_enabled: bool) {
    let css = runtime_css(tokens, colors, motion_enabled);
    let provider = CssProvider::new();
    provider.load_from_data(&css);
    if let Some(display) = gtk4::gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    } else {
        tracing::warn!("no display available; runtime css not installed");
    }
}

fn runtime_css(tokens: StyleTokens, colors: ColorTokens, motion_enabled: bool) -> String {
    let motion_hover_ms = if motion_enabled {
        tokens.motion_hover_ms
    } else {
        0
    };
    format!(
        "
window.stickerboard-root {{
  background: {window_background};
  color: {text_color};
}}
.landing-page {{
  background: {landing_background};
  padding: {spacing_24}px;
}}
.landing-page label {{
  color: {accent_text_color};
}}
.landing-title {{
  font-size: 40px;
  font-weight: 800;
  letter-spacing: 2px;
}}
.landing-tagline {{
  font-size: 15px;
  opacity: 0.8;
}}
.landing-enter {{
  border-radius: {control_radius}px;
  background: {accent_color};
  color: {accent_text_color};
  padding: {spacing_8}px {spacing_24}px;
  font-weight: 700;
  transition: opacity {motion_hover_ms}ms ease-out;
}}
.landing-enter:hover {{
  opacity: 0.9;
}}
.gallery-panel {{
  background: {panel_background};
  border-right: {border_width}px solid {border_color};
  padding: {spacing_8}px;
}}
.gallery-tab {{
  border-radius: {control_radius}px;
  padding: {spacing_4}px {spacing_12}px;
  transition: background {motion_hover_ms}ms ease-out;
}}
.gallery-tab.active {{
  background: {accent_color};
  color: {accent_text_color};
}}
.gallery-thumbnail {{
  border-radius: {control_radius}px;
  border: {border_width}px solid transparent;
  transition: border-color {motion_hover_ms}ms ease-out;
}}
.gallery-thumbnail:hover {{
  border-color: {accent_color};
}}
.gallery-empty {{
  opacity: 0.7;
}}
.board-toolbar {{
  padding: {spacing_8}px;
  border-bottom: {border_width}px solid {border_color};
}}
.board-canvas {{
  background: {canvas_background};
  border: {border_width}px solid {border_color};
  border-radius: {panel_radius}px;
}}
.toast-label {{
  margin-bottom: {spacing_16}px;
  padding: {spacing_8}px {spacing_16}px;
  border-radius: {control_radius}px;
  background: rgba(0, 0, 0, 0.78);
  color: #ffffff;
}}
",
        window_background = colors.window_background,
        landing_background = colors.landing_background,
        panel_background = colors.panel_background,
        canvas_background = colors.canvas_background,
        border_color = colors.border_color,
        text_color = colors.text_color,
        accent_color = colors.accent_color,
        accent_text_color = colors.accent_text_color,
        spacing_4 = tokens.spacing_4,
        spacing_8 = tokens.spacing_8,
        spacing_12 = tokens.spacing_12,
        spacing_16 = tokens.spacing_16,
        spacing_24 = tokens.spacing_24,
        control_radius = tokens.control_radius,
        panel_radius = tokens.panel_radius,
        border_width = tokens.border_width,
        motion_hover_ms = motion_hover_ms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{COLOR_TOKENS, LAYOUT_TOKENS};

    #[test]
    fn runtime_css_highlights_active_tab_with_accent() {
        let css = runtime_css(LAYOUT_TOKENS, COLOR_TOKENS, true);
        assert!(css.contains(".gallery-tab.active"));
        assert!(css.contains(COLOR_TOKENS.accent_color));
        assert!(css.contains("160ms"));
    }

    #[test]
    fn runtime_css_drops_hover_motion_when_animations_disabled() {
        let css = runtime_css(LAYOUT_TOKENS, COLOR_TOKENS, false);
        assert!(css.contains("0ms ease-out"));
        assert!(!css.contains("160ms"));
    }
}
