use gtk4::prelude::*;
use gtk4::Button;

pub fn icon_button(
    icon_name: &str,
    tooltip: &str,
    control_size: i32,
    extra_classes: &[&str],
) -> Button {
    let button = Button::from_icon_name(icon_name);
    button.set_focus_on_click(false);
    button.set_tooltip_text(Some(tooltip));
    button.add_css_class("flat");
    button.add_css_class("icon-button");
    for css_class in extra_classes {
        button.add_css_class(css_class);
    }
    button.set_size_request(control_size, control_size);
    button
}

/// Gallery category tab; the selected one carries the `active` class.
pub fn tab_button(label: &str, active: bool) -> Button {
    let button = Button::with_label(label);
    button.set_focus_on_click(false);
    button.add_css_class("flat");
    button.add_css_class("gallery-tab");
    if active {
        button.add_css_class("active");
    }
    button
}
