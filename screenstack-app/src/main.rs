mod app;
mod app_dir;
mod preferences;
mod screens;
mod ui;

fn main() -> eframe::Result {
    app::run()
}
