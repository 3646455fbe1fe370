//! Scene files: a container and its components described in TOML
//!
//! Scenes give the command line a way to feed the layout without a real
//! toolkit. Components are laid out in the order they appear in the file.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::{
    infer_grid, Constraint, ContainerGeometry, GridSpec, InferenceItem, Insets, KoalaLayout,
    LayoutError, Rect, Size, Widget,
};

/// Errors that can occur when loading or writing scenes
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write scene TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("component '{name}' is declared more than once")]
    DuplicateComponent { name: String },
}

/// The container a scene's components live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneContainer {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub insets: Insets,
}

impl SceneContainer {
    pub fn geometry(&self) -> ContainerGeometry {
        ContainerGeometry::new(Size::new(self.width, self.height), self.insets)
    }
}

/// One component of a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneComponent {
    pub name: String,
    pub preferred: Size,
    /// Defaults to the preferred size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Size>,
    /// Current on-screen bounds; unplaced components sit at the origin with no size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Rect>,
    /// Components without a constraint get the layout's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Constraint>,
}

impl SceneComponent {
    pub fn widget(&self) -> Widget<String> {
        Widget::new(self.name.clone(), self.preferred)
            .with_minimum(self.minimum.unwrap_or(self.preferred))
            .with_bounds(self.bounds.unwrap_or_default())
    }
}

/// A container, its grid and its components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub container: SceneContainer,
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default, rename = "component")]
    pub components: Vec<SceneComponent>,
}

impl FromStr for Scene {
    type Err = SceneError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let scene: Scene = toml::from_str(content)?;
        scene.check_unique_names()?;
        Ok(scene)
    }
}

impl Scene {
    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    pub fn to_toml(&self) -> Result<String, SceneError> {
        Ok(toml::to_string(self)?)
    }

    fn check_unique_names(&self) -> Result<(), SceneError> {
        let mut seen = HashSet::new();
        for component in &self.components {
            if !seen.insert(component.name.as_str()) {
                return Err(SceneError::DuplicateComponent {
                    name: component.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// The components as layout children, in file order
    pub fn widgets(&self) -> Vec<Widget<String>> {
        self.components.iter().map(SceneComponent::widget).collect()
    }

    /// A layout with the scene's grid and the constraints the scene declares
    pub fn layout(&self) -> Result<KoalaLayout<String>, LayoutError> {
        let mut layout = KoalaLayout::new(self.grid.columns(), self.grid.rows())?;
        for component in &self.components {
            if let Some(constraint) = &component.constraint {
                layout.set_constraints(component.name.clone(), constraint.clone());
            }
        }
        Ok(layout)
    }

    /// A copy of this scene whose grid and constraints are inferred from the
    /// components' current bounds.
    ///
    /// Bounds are taken relative to the client area, so laying out the
    /// result inside the same container puts grid-aligned components back
    /// where they were.
    pub fn inferred(&self) -> Result<Scene, LayoutError> {
        let view = self.container.geometry().view();
        let items: Vec<InferenceItem> = self
            .components
            .iter()
            .map(|c| {
                let b = c.bounds.unwrap_or_default();
                InferenceItem::new(
                    Rect::new(b.x - view.x, b.y - view.y, b.width, b.height),
                    c.preferred,
                )
            })
            .collect();
        let inferred = infer_grid(&items, view.size());

        let grid = GridSpec::new(inferred.columns(), inferred.rows())?;
        let components = self
            .components
            .iter()
            .zip(inferred.constraints)
            .map(|(component, constraint)| SceneComponent {
                constraint: Some(constraint),
                ..component.clone()
            })
            .collect();
        Ok(Scene {
            container: self.container,
            grid,
            components,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Anchor, Fill, GridPosition};

    const SCENE: &str = r#"
[container]
width = 200
height = 100

[grid]
columns = 2
rows = 1

[[component]]
name = "ok"
preferred = { width = 80, height = 24 }
constraint = { grid_x = 0, fill = "none", anchor = "south_east" }

[[component]]
name = "cancel"
preferred = { width = 80, height = 24 }
minimum = { width = 40, height = 20 }
constraint = { grid_x = "relative" }
"#;

    #[test]
    fn test_parse_scene() {
        let scene: Scene = SCENE.parse().unwrap();
        assert_eq!(scene.container.width, 200);
        assert!(scene.container.insets.is_zero());
        assert_eq!(scene.grid, GridSpec::new(2, 1).unwrap());
        assert_eq!(scene.components.len(), 2);

        let ok = scene.components[0].constraint.as_ref().unwrap();
        assert_eq!(ok.fill, Fill::None);
        assert_eq!(ok.anchor, Anchor::SouthEast);

        let cancel = scene.components[1].constraint.as_ref().unwrap();
        assert_eq!(cancel.grid_x, GridPosition::Relative);
        assert_eq!(scene.components[1].minimum, Some(Size::new(40, 20)));
    }

    #[test]
    fn test_grid_defaults_to_single_cell() {
        let scene: Scene = "[container]\nwidth = 10\nheight = 10\n".parse().unwrap();
        assert_eq!(scene.grid, GridSpec::default());
        assert!(scene.components.is_empty());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let source = r#"
[container]
width = 10
height = 10

[[component]]
name = "a"
preferred = { width = 1, height = 1 }

[[component]]
name = "a"
preferred = { width = 1, height = 1 }
"#;
        let err = source.parse::<Scene>().unwrap_err();
        assert!(matches!(err, SceneError::DuplicateComponent { name } if name == "a"));
    }

    #[test]
    fn test_zero_grid_rejected() {
        let source = "[container]\nwidth = 10\nheight = 10\n[grid]\ncolumns = 0\nrows = 1\n";
        assert!(matches!(
            source.parse::<Scene>(),
            Err(SceneError::ParseError(_))
        ));
    }

    #[test]
    fn test_toml_roundtrip_preserves_sentinels() {
        let scene: Scene = SCENE.parse().unwrap();
        let reparsed: Scene = scene.to_toml().unwrap().parse().unwrap();
        assert_eq!(reparsed, scene);
    }

    #[test]
    fn test_widget_defaults() {
        let scene: Scene = SCENE.parse().unwrap();
        let widgets = scene.widgets();
        assert_eq!(widgets[0].minimum, Size::new(80, 24));
        assert_eq!(widgets[0].bounds, Rect::zero());
        assert_eq!(widgets[1].minimum, Size::new(40, 20));
    }
}
