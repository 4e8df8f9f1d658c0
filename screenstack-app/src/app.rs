use std::time::Duration;

use eframe::egui;
use tracing::{debug, error, info};

use screenstack_core::{ScreenError, ScreensController, TransitionEvent, ViewTypeId};
use screenstack_layout::LayoutLoader;

use crate::preferences::AppPreferences;
use crate::screens;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub(crate) const APP_NAME: &str = "ScreenStack";
/// Longest frame time fed to the transition; avoids skipping a whole fade
/// after the window was stalled.
const MAX_FRAME_DT: f32 = 0.1;

// ---------------------------------------------------------------------------
// Application struct
// ---------------------------------------------------------------------------

pub(crate) struct ScreenStackApp {
    pub(crate) screens: ScreensController<LayoutLoader>,
    pub(crate) preferences: AppPreferences,

    // Input collected while drawing, applied after the frame's UI
    pub(crate) pending_handler: Option<String>,
    pub(crate) back_requested: bool,

    titled_view: Option<ViewTypeId>,
}

// ---------------------------------------------------------------------------
// Constructor
// ---------------------------------------------------------------------------

impl ScreenStackApp {
    pub(crate) fn new(prefs: AppPreferences) -> Result<Self, ScreenError> {
        let loader = screens::builtin_loader(Some(prefs.layouts_directory()));
        let mut screens = ScreensController::new(loader, prefs.navigator_options());

        let initial = screens::view_id_for(&prefs.initial_view);
        info!("Initial screen: {initial}");
        screens.show(initial)?;

        Ok(Self {
            screens,
            preferences: prefs,
            pending_handler: None,
            back_requested: false,
            titled_view: None,
        })
    }

    /// Run everything the user asked for during this frame, then let the
    /// container apply the navigation screens queued.
    fn apply_pending(&mut self) -> Result<(), ScreenError> {
        if let Some(handler) = self.pending_handler.take() {
            if let Some(view) = self.screens.displayed_view_mut() {
                debug!("Invoking handler {handler}");
                view.controller.invoke(&handler)?;
            }
        }
        if std::mem::take(&mut self.back_requested) && self.screens.can_go_back() {
            self.screens.back()?;
        }
        self.screens.process_requests()?;
        Ok(())
    }

    fn sync_window_title(&mut self, ctx: &egui::Context) {
        if self.titled_view.as_ref() == self.screens.displayed() {
            return;
        }
        self.titled_view = self.screens.displayed().cloned();
        let title = match self.screens.displayed_view() {
            Some(view) if !view.root.title.is_empty() => {
                format!("{APP_NAME} \u{2014} {}", view.root.title)
            }
            _ => APP_NAME.to_string(),
        };
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
    }
}

/// Navigation failures are not recoverable.
fn fatal(err: ScreenError) -> ! {
    error!("Navigation failed: {err}");
    std::process::exit(1)
}

// ---------------------------------------------------------------------------
// eframe::App
// ---------------------------------------------------------------------------

impl eframe::App for ScreenStackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        let dt = ctx.input(|i| i.stable_dt).clamp(0.0, MAX_FRAME_DT);
        if let Some(TransitionEvent::Swapped(id)) = self.screens.tick(Duration::from_secs_f32(dt))
        {
            debug!("Now displaying {id}");
        }
        self.sync_window_title(ctx);

        self.draw_breadcrumb_bar(ctx);
        self.draw_container(ctx);

        let text_editing = ctx.memory(|m| m.focused().is_some());
        if !text_editing
            && ctx.input(|i| {
                i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Backspace)
            })
        {
            self.back_requested = true;
        }

        if let Err(e) = self.apply_pending() {
            fatal(e);
        }

        if self.screens.is_transitioning() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!(
            "Window closed after visiting {} screen(s)",
            self.screens.registry().len()
        );
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub(crate) fn run() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting {APP_NAME}");

    let prefs = AppPreferences::load();

    let viewport = egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([prefs.window_width, prefs.window_height]);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            egui_material_icons::initialize(&cc.egui_ctx);
            let app = ScreenStackApp::new(prefs)?;
            Ok(Box::new(app))
        }),
    )
}
