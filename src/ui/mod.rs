pub mod style;
pub mod widgets;

pub use style::{ColorTokens, StyleTokens, COLOR_TOKENS, LAYOUT_TOKENS};
pub use widgets::{icon_button, tab_button};
