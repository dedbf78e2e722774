use std::cell::RefCell;
use std::rc::Rc;

use crate::gallery::{CategoryFilter, Gallery, GalleryItem};
use crate::placement::fitted_thumbnail_width;
use crate::ui::{tab_button, StyleTokens};
use gtk4::prelude::*;
use gtk4::{
    gdk, Align, Box as GtkBox, Button, FlowBox, FlowBoxChild, Label, Orientation, Picture,
    PolicyType, ScrolledWindow, SelectionMode,
};

/// Thumbnail being dragged, remembered from drag start until the drop.
#[derive(Debug, Clone)]
pub(super) struct DragSession {
    pub(super) item: GalleryItem,
    pub(super) displayed_width: f64,
}

/// The gallery drag in flight, if any. Cleared by a drop or when the drag ends.
#[derive(Debug, Default)]
pub(super) struct DragTracker {
    session: Option<DragSession>,
}

impl DragTracker {
    pub(super) fn begin(&mut self, session: DragSession) {
        self.session = Some(session);
    }

    pub(super) fn end(&mut self) {
        self.session = None;
    }

    /// Hands out the session only when `dropped_id` names the dragged item.
    pub(super) fn take_matching(&mut self, dropped_id: &str) -> Option<DragSession> {
        match self.session.take() {
            Some(session) if session.item.id == dropped_id => Some(session),
            Some(session) => {
                tracing::debug!(
                    dropped_id,
                    expected = session.item.id.as_str(),
                    "ignoring drop with mismatched sticker id"
                );
                None
            }
            None => {
                tracing::debug!(dropped_id, "ignoring drop that did not start in the gallery");
                None
            }
        }
    }
}

pub(super) type CurrentDrag = Rc<RefCell<DragTracker>>;

/// Which tab is highlighted and which thumbnails are shown for a selected filter.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TabSelection {
    active_tabs: Vec<bool>,
    visible_items: Vec<bool>,
}

fn tab_selection(
    filters: &[CategoryFilter],
    items: &[GalleryItem],
    selected: &CategoryFilter,
) -> TabSelection {
    TabSelection {
        active_tabs: filters.iter().map(|filter| filter == selected).collect(),
        visible_items: items
            .iter()
            .map(|item| Gallery::is_visible(item, selected))
            .collect(),
    }
}

#[derive(Clone)]
pub(super) struct GalleryPanel {
    pub(super) root: GtkBox,
}

/// Widgets a tab click updates. Shared strongly by every tab handler.
struct GalleryFilterWidgets {
    filters: Vec<CategoryFilter>,
    tabs: Vec<Button>,
    items: Vec<GalleryItem>,
    thumbnails: Vec<FlowBoxChild>,
}

impl GalleryFilterWidgets {
    fn select(&self, selected: &CategoryFilter) {
        let selection = tab_selection(&self.filters, &self.items, selected);
        for (tab, active) in self.tabs.iter().zip(&selection.active_tabs) {
            if *active {
                tab.add_css_class("active");
            } else {
                tab.remove_css_class("active");
            }
        }
        for (child, visible) in self.thumbnails.iter().zip(&selection.visible_items) {
            child.set_visible(*visible);
        }
        tracing::debug!(
            filter = selected.label(),
            visible = selection.visible_items.iter().filter(|visible| **visible).count(),
            "gallery filter applied"
        );
    }
}

pub(super) fn build_gallery_panel(
    style_tokens: StyleTokens,
    gallery: &Gallery,
    gallery_dir_label: &str,
    current_drag: &CurrentDrag,
) -> GalleryPanel {
    let root = GtkBox::new(Orientation::Vertical, style_tokens.spacing_8);
    root.add_css_class("gallery-panel");
    root.set_size_request(style_tokens.gallery_width, -1);

    if gallery.is_empty() {
        let empty = Label::new(Some(&format!("No stickers found in\n{gallery_dir_label}")));
        empty.add_css_class("gallery-empty");
        empty.set_wrap(true);
        empty.set_valign(Align::Center);
        empty.set_vexpand(true);
        root.append(&empty);
        return GalleryPanel { root };
    }

    let tab_row = FlowBox::new();
    tab_row.set_selection_mode(SelectionMode::None);
    tab_row.set_column_spacing(style_tokens.spacing_4 as u32);
    tab_row.set_row_spacing(style_tokens.spacing_4 as u32);
    tab_row.add_css_class("gallery-tabs");

    let thumbnails_box = FlowBox::new();
    thumbnails_box.set_selection_mode(SelectionMode::None);
    thumbnails_box.set_homogeneous(true);
    thumbnails_box.set_max_children_per_line(2);
    thumbnails_box.set_column_spacing(style_tokens.spacing_8 as u32);
    thumbnails_box.set_row_spacing(style_tokens.spacing_8 as u32);
    thumbnails_box.set_valign(Align::Start);

    let items = gallery.items().to_vec();
    let thumbnails = items
        .iter()
        .map(|item| {
            let child = build_thumbnail(style_tokens, item, current_drag);
            thumbnails_box.insert(&child, -1);
            child
        })
        .collect();

    let filters = gallery.filters();
    let tabs = filters
        .iter()
        .map(|filter| {
            let button = tab_button(filter.label(), *filter == CategoryFilter::All);
            tab_row.insert(&button, -1);
            button
        })
        .collect::<Vec<_>>();

    // Tab buttons and their handlers live as long as the window, so the
    // button -> handler -> widgets cycle is never collected early.
    let widgets = Rc::new(GalleryFilterWidgets {
        filters,
        tabs: tabs.clone(),
        items,
        thumbnails,
    });
    for (button, filter) in tabs.iter().zip(widgets.filters.clone()) {
        let widgets = widgets.clone();
        button.connect_clicked(move |_| widgets.select(&filter));
    }

    let scroller = ScrolledWindow::new();
    scroller.set_policy(PolicyType::Never, PolicyType::Automatic);
    scroller.set_vexpand(true);
    scroller.set_child(Some(&thumbnails_box));

    root.append(&tab_row);
    root.append(&scroller);
    GalleryPanel { root }
}

fn build_thumbnail(
    style_tokens: StyleTokens,
    item: &GalleryItem,
    current_drag: &CurrentDrag,
) -> FlowBoxChild {
    let picture = Picture::for_filename(&item.path);
    picture.set_can_shrink(true);
    picture.set_size_request(style_tokens.thumbnail_size, style_tokens.thumbnail_size);
    picture.add_css_class("gallery-thumbnail");
    picture.set_tooltip_text(Some(item.id.as_str()));

    let drag_source = gtk4::DragSource::new();
    drag_source.set_actions(gdk::DragAction::COPY);
    {
        let item = item.clone();
        let current_drag = current_drag.clone();
        let picture_for_drag = picture.clone();
        drag_source.connect_prepare(move |source, x, y| {
            let displayed_width = fitted_thumbnail_width(
                f64::from(picture_for_drag.width()),
                f64::from(picture_for_drag.height()),
                item.natural,
            );
            current_drag.borrow_mut().begin(DragSession {
                item: item.clone(),
                displayed_width,
            });

            let icon = gtk4::WidgetPaintable::new(Some(&picture_for_drag));
            source.set_icon(Some(&icon), x as i32, y as i32);
            tracing::debug!(item = item.id.as_str(), displayed_width, "sticker drag started");
            Some(gdk::ContentProvider::for_value(&item.id.to_value()))
        });
    }
    {
        let current_drag = current_drag.clone();
        drag_source.connect_drag_end(move |_, _, _| {
            current_drag.borrow_mut().end();
        });
    }
    picture.add_controller(drag_source);

    let child = FlowBoxChild::new();
    child.set_child(Some(&picture));
    child
}
