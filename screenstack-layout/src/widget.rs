use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// A parsed layout description: the controller to attach and the widget tree
/// to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Name of the controller factory registered with the loader.
    pub controller: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub children: Vec<Widget>,
}

/// One node of a layout's widget tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
    Heading {
        text: String,
    },
    Label {
        text: String,
    },
    /// Clicking runs the controller handler named by `on_click`.
    Button {
        text: String,
        on_click: String,
    },
    Separator,
    Spacer {
        #[serde(default = "default_spacer_height")]
        height: f32,
    },
    Row {
        #[serde(default)]
        children: Vec<Widget>,
    },
    Column {
        #[serde(default)]
        children: Vec<Widget>,
    },
}

fn default_spacer_height() -> f32 {
    12.0
}

impl Layout {
    /// Parse and validate a JSON layout description.
    pub fn parse(json: &str) -> Result<Self, LayoutError> {
        let layout: Layout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.controller.trim().is_empty() {
            return Err(LayoutError::Invalid("missing controller name".into()));
        }
        self.children.iter().try_for_each(Widget::validate)
    }

    /// Every handler name referenced by a button, in document order.
    pub fn handlers(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for child in &self.children {
            child.collect_handlers(&mut out);
        }
        out
    }
}

impl Widget {
    fn validate(&self) -> Result<(), LayoutError> {
        match self {
            Self::Button { text, on_click } if on_click.trim().is_empty() => Err(
                LayoutError::Invalid(format!("button `{text}` has no on_click handler")),
            ),
            Self::Spacer { height } if !height.is_finite() || *height < 0.0 => Err(
                LayoutError::Invalid(format!("spacer height {height} must be >= 0")),
            ),
            Self::Row { children } | Self::Column { children } => {
                children.iter().try_for_each(Widget::validate)
            }
            _ => Ok(()),
        }
    }

    fn collect_handlers<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Button { on_click, .. } => out.push(on_click.as_str()),
            Self::Row { children } | Self::Column { children } => {
                for child in children {
                    child.collect_handlers(out);
                }
            }
            _ => {}
        }
    }
}
