use std::fs;

use screenstack_core::{
    ControlledScreen, LoadError, NavigatorOptions, ScreenError, ScreenParent, ScreensController,
    TransitionTimings, ViewLoader, ViewTypeId,
};
use screenstack_layout::{LayoutLoader, Widget};

struct MainScreen;
struct SettingsScreen;

#[derive(Default)]
struct Screen {
    parent: Option<ScreenParent>,
}

impl ControlledScreen for Screen {
    fn set_screen_parent(&mut self, parent: ScreenParent) {
        self.parent = Some(parent);
    }

    fn screen_parent(&self) -> Option<&ScreenParent> {
        self.parent.as_ref()
    }
}

const MAIN: &str = r#"{
    "controller": "Screen",
    "title": "Main",
    "children": [ { "type": "label", "text": "embedded" } ]
}"#;

const SETTINGS: &str = r#"{
    "controller": "Screen",
    "title": "Settings",
    "children": [ { "type": "button", "text": "Back", "on_click": "back" } ]
}"#;

fn loader() -> LayoutLoader {
    LayoutLoader::new()
        .with_embedded("MainScreen", MAIN)
        .with_embedded("SettingsScreen", SETTINGS)
        .with_controller("Screen", || Box::new(Screen::default()))
}

#[test]
fn loads_embedded_layout() {
    let mut loader = loader();
    let view = loader.load(&ViewTypeId::of::<MainScreen>()).unwrap();
    assert_eq!(view.root.title, "Main");
    assert!(view.controller.screen_parent().is_none());
}

#[test]
fn directory_overrides_embedded_layout() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("MainScreen.json"),
        r#"{ "controller": "Screen", "title": "From disk" }"#,
    )
    .unwrap();

    let mut loader = loader().with_directory(dir.path());
    let id = ViewTypeId::of::<MainScreen>();
    assert_eq!(
        loader.resource_path(&id),
        Some(dir.path().join("MainScreen.json"))
    );
    assert_eq!(loader.load(&id).unwrap().root.title, "From disk");
    // Views without a file still fall back to the embedded copy.
    assert_eq!(
        loader
            .load(&ViewTypeId::of::<SettingsScreen>())
            .unwrap()
            .root
            .title,
        "Settings"
    );
}

#[test]
fn custom_extension_is_used_for_lookup() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Panel.layout"),
        r#"{ "controller": "Screen", "children": [ { "type": "separator" } ] }"#,
    )
    .unwrap();

    let mut loader = loader().with_directory(dir.path()).with_extension("layout");
    let view = loader.load(&ViewTypeId::new("demo::Panel")).unwrap();
    assert_eq!(view.root.children, vec![Widget::Separator]);
}

#[test]
fn missing_layout_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut loader = loader().with_directory(dir.path());
    let err = loader.load(&ViewTypeId::new("demo::Nowhere")).err().unwrap();
    match err {
        LoadError::NotFound { view, location } => {
            assert_eq!(view.simple_name(), "Nowhere");
            assert!(location.contains("Nowhere.json"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_layout_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("MainScreen.json"), "{ not json").unwrap();

    let mut loader = loader().with_directory(dir.path());
    let err = loader.load(&ViewTypeId::of::<MainScreen>()).err().unwrap();
    assert!(matches!(err, LoadError::Invalid { .. }));
}

#[test]
fn unregistered_controller_is_reported() {
    let mut loader = LayoutLoader::new().with_embedded("MainScreen", MAIN);
    let err = loader.load(&ViewTypeId::of::<MainScreen>()).err().unwrap();
    assert!(
        matches!(err, LoadError::MissingController { ref controller, .. } if controller == "Screen")
    );
}

#[test]
fn container_navigates_layout_views() {
    let mut c = ScreensController::new(
        loader(),
        NavigatorOptions {
            timings: TransitionTimings::instant(),
            ..Default::default()
        },
    );
    c.show(ViewTypeId::of::<MainScreen>()).unwrap();
    c.finish_transition();
    c.show(ViewTypeId::of::<SettingsScreen>()).unwrap();
    c.finish_transition();

    let view = c.displayed_view_mut().unwrap();
    assert_eq!(view.root.handlers(), vec!["back"]);
    view.controller.invoke("back").unwrap();
    c.process_requests().unwrap();
    c.finish_transition();
    assert_eq!(c.displayed_view().unwrap().root.title, "Main");

    let err = c.show(ViewTypeId::new("demo::Missing")).unwrap_err();
    assert!(matches!(err, ScreenError::Load(LoadError::NotFound { .. })));
}
