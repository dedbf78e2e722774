use crate::ui::StyleTokens;
use gtk4::prelude::*;
use gtk4::{Align, Box as GtkBox, Button, Label, Orientation};

#[derive(Clone)]
pub(super) struct LandingUi {
    pub(super) root: GtkBox,
    pub(super) enter_button: Button,
}

pub(super) fn build_landing_ui(style_tokens: StyleTokens) -> LandingUi {
    let root = GtkBox::new(Orientation::Vertical, style_tokens.spacing_16);
    root.add_css_class("landing-page");
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.set_halign(Align::Fill);
    root.set_valign(Align::Fill);

    let content = GtkBox::new(Orientation::Vertical, style_tokens.spacing_12);
    content.set_halign(Align::Center);
    content.set_valign(Align::Center);
    content.set_vexpand(true);

    let title = Label::new(Some("Stickerboard"));
    title.add_css_class("landing-title");

    let tagline = Label::new(Some(
        "Drag stickers onto the board, arrange them, and save a PNG.",
    ));
    tagline.add_css_class("landing-tagline");
    tagline.set_wrap(true);
    tagline.set_justify(gtk4::Justification::Center);

    let enter_button = Button::with_label("Enter");
    enter_button.add_css_class("landing-enter");
    enter_button.set_halign(Align::Center);
    enter_button.set_margin_top(style_tokens.spacing_16);
    enter_button.set_tooltip_text(Some("Open the board (Enter)"));

    content.append(&title);
    content.append(&tagline);
    content.append(&enter_button);
    root.append(&content);

    LandingUi { root, enter_button }
}
