use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::input::{resolve_shortcut, InputContext, ShortcutAction};
use crate::state::{AppEvent, AppState, StateMachine};
use crate::ui::{COLOR_TOKENS, LAYOUT_TOKENS};
use gtk4::prelude::*;
use gtk4::{glib, Application, ApplicationWindow, Stack, StackTransitionType};

mod board_history;
mod board_runtime;
mod bootstrap;
mod canvas;
mod gallery_panel;
mod input_bridge;
mod landing;
mod runtime_css;
mod runtime_support;

use self::board_runtime::{build_board_ui, BoardUi, BoardUiDeps};
use self::bootstrap::bootstrap_app_runtime;
use self::input_bridge::{normalize_shortcut_key, shortcut_modifiers};
use self::landing::build_landing_ui;
use self::runtime_css::install_runtime_css;
use self::runtime_support::gtk_launch_args;

const APPLICATION_ID: &str = "io.github.stickerboard";
const LANDING_PAGE: &str = "landing";
const BOARD_PAGE: &str = "board";

type EnterBoard = Rc<dyn Fn()>;

fn page_for_state(state: AppState) -> &'static str {
    match state {
        AppState::Landing => LANDING_PAGE,
        AppState::Opening | AppState::Board => BOARD_PAGE,
    }
}

fn input_context_for_state(state: AppState) -> InputContext {
    InputContext {
        in_landing: state == AppState::Landing,
        in_board: state == AppState::Board,
    }
}

fn curtain_duration_ms(curtain_ms: u32, motion_enabled: bool) -> u32 {
    if motion_enabled {
        curtain_ms
    } else {
        0
    }
}

/// Landing → Opening, swap pages, then Opening → Board once the curtain has lifted.
fn build_enter_board(
    machine: &Rc<RefCell<StateMachine>>,
    stack: &Stack,
    board_ui: &BoardUi,
    curtain_ms: u32,
) -> EnterBoard {
    let machine = machine.clone();
    let stack = stack.clone();
    let board_canvas = board_ui.board_canvas.clone();
    Rc::new(move || {
        if !machine.borrow().can_transition(AppEvent::EnterRequested) {
            tracing::debug!(state = ?machine.borrow().state(), "enter ignored");
            return;
        }
        if let Err(err) = machine.borrow_mut().transition(AppEvent::EnterRequested) {
            tracing::warn!(%err, "enter transition failed");
            return;
        }
        stack.set_visible_child_name(BOARD_PAGE);

        let machine = machine.clone();
        let board_canvas = board_canvas.clone();
        glib::timeout_add_local_once(
            Duration::from_millis(u64::from(curtain_ms)),
            move || {
                match machine.borrow_mut().transition(AppEvent::CurtainOpened) {
                    Ok(state) => tracing::info!(?state, "curtain opened"),
                    Err(err) => tracing::warn!(%err, "curtain finished in unexpected state"),
                }
                board_canvas.grab_focus();
            },
        );
    })
}

fn connect_shortcuts(
    window: &ApplicationWindow,
    machine: &Rc<RefCell<StateMachine>>,
    board_ui: &BoardUi,
    enter_board: &EnterBoard,
) {
    let key_controller = gtk4::EventControllerKey::new();
    key_controller.set_propagation_phase(gtk4::PropagationPhase::Capture);
    let machine = machine.clone();
    let board_ui = board_ui.clone();
    let enter_board = enter_board.clone();
    key_controller.connect_key_pressed(move |_, key, keycode, modifier| {
        let Some(shortcut_key) = normalize_shortcut_key(key, keycode) else {
            return glib::Propagation::Proceed;
        };
        let context = input_context_for_state(machine.borrow().state());
        let Some(action) = resolve_shortcut(shortcut_key, shortcut_modifiers(modifier), context)
        else {
            return glib::Propagation::Proceed;
        };
        tracing::debug!(?action, "shortcut");

        let button = match action {
            ShortcutAction::LandingEnter => {
                (enter_board.as_ref())();
                return glib::Propagation::Stop;
            }
            ShortcutAction::BoardUndo => &board_ui.undo_button,
            ShortcutAction::BoardRedo => &board_ui.redo_button,
            ShortcutAction::BoardReset => &board_ui.reset_button,
            ShortcutAction::BoardSave => &board_ui.save_button,
        };
        if button.is_sensitive() {
            button.emit_clicked();
        }
        glib::Propagation::Stop
    });
    window.add_controller(key_controller);
}

pub struct App {
    machine: StateMachine,
}

impl App {
    pub fn new() -> Self {
        Self {
            machine: StateMachine::new(),
        }
    }

    pub fn start(&mut self) -> AppResult<()> {
        let bootstrap = bootstrap_app_runtime();
        if !bootstrap.show_landing {
            tracing::info!(event = "skip_landing", from = ?self.machine.state());
            self.machine.transition(AppEvent::SkipLanding)?;
        }

        let shared_machine = Rc::new(RefCell::new(std::mem::take(&mut self.machine)));
        let gallery_dir_label = bootstrap.gallery_dir_label();
        let gallery = Rc::new(bootstrap.gallery);
        let export_service = bootstrap.export_service;
        let canvas_size = bootstrap.canvas_size;

        tracing::info!("starting gtk runtime");
        let application = Application::new(
            Some(APPLICATION_ID),
            gtk4::gio::ApplicationFlags::NON_UNIQUE,
        );

        let machine_for_activate = shared_machine.clone();
        let activate_once = Rc::new(Cell::new(false));
        application.connect_activate(move |app| {
            if activate_once.replace(true) {
                tracing::debug!("ignoring duplicate gtk activate signal");
                return;
            }
            let style_tokens = LAYOUT_TOKENS;
            let motion_enabled = gtk4::Settings::default()
                .map(|settings| settings.is_gtk_enable_animations())
                .unwrap_or(true);
            install_runtime_css(style_tokens, COLOR_TOKENS, motion_enabled);

            let window = ApplicationWindow::new(app);
            window.add_css_class("stickerboard-root");
            window.set_title(Some("Stickerboard"));
            window.set_default_size(
                style_tokens.window_default_width,
                style_tokens.window_default_height,
            );

            let landing = build_landing_ui(style_tokens);
            let board_ui = build_board_ui(BoardUiDeps {
                style_tokens,
                gallery: gallery.as_ref(),
                gallery_dir_label: &gallery_dir_label,
                canvas_size,
                export_service: export_service.clone(),
            });

            let curtain_ms = curtain_duration_ms(style_tokens.curtain_duration_ms, motion_enabled);
            let stack = Stack::new();
            stack.set_transition_type(StackTransitionType::UnderUp);
            stack.set_transition_duration(curtain_ms);
            stack.add_named(&landing.root, Some(LANDING_PAGE));
            stack.add_named(&board_ui.root, Some(BOARD_PAGE));
            stack.set_visible_child_name(page_for_state(machine_for_activate.borrow().state()));

            let enter_board =
                build_enter_board(&machine_for_activate, &stack, &board_ui, curtain_ms);
            {
                let enter_board = enter_board.clone();
                landing.enter_button.connect_clicked(move |_| (enter_board.as_ref())());
            }
            connect_shortcuts(&window, &machine_for_activate, &board_ui, &enter_board);

            window.set_child(Some(&stack));
            tracing::info!(
                state = ?machine_for_activate.borrow().state(),
                motion_enabled,
                "presenting stickerboard window"
            );
            window.present();
            if machine_for_activate.borrow().state() == AppState::Board {
                board_ui.board_canvas.grab_focus();
            } else {
                landing.enter_button.grab_focus();
            }
        });

        let exit_code = application.run_with_args(&gtk_launch_args());

        self.machine = std::mem::take(&mut *shared_machine.borrow_mut());
        if exit_code != glib::ExitCode::SUCCESS {
            return Err(AppError::Runtime(format!("{exit_code:?}")));
        }
        Ok(())
    }

    pub fn state(&self) -> AppState {
        self.machine.state()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
