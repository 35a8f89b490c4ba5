use anyhow::{Context, Result};
use serde::Serialize;

use super::SceneModel;

#[derive(Debug, Serialize)]
pub struct SceneExport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub nodes: Vec<NodeExport>,
    pub edges: Vec<EdgeExport>,
    pub bounds: [f32; 4],
}

#[derive(Debug, Serialize)]
pub struct NodeExport {
    pub id: String,
    pub label: String,
    pub display_label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct EdgeExport {
    pub from: String,
    pub to: String,
}

impl SceneModel {
    pub fn to_export(&self) -> SceneExport {
        let bounds = self.content_bounds();
        SceneExport {
            placeholder: self.placeholder_message().map(str::to_owned),
            nodes: self
                .nodes()
                .map(|node| NodeExport {
                    id: node.id.to_owned(),
                    label: node.label.to_owned(),
                    display_label: node.display_label.to_owned(),
                    x: node.rect.min.x,
                    y: node.rect.min.y,
                    width: node.rect.width(),
                    height: node.rect.height(),
                })
                .collect(),
            edges: self
                .edges()
                .map(|(from, to)| EdgeExport {
                    from: from.id.clone(),
                    to: to.id.clone(),
                })
                .collect(),
            bounds: [bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y],
        }
    }
}

pub fn scene_to_json(scene: &SceneModel) -> Result<String> {
    serde_json::to_string_pretty(&scene.to_export()).context("failed to serialize scene")
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn exports_nodes_edges_and_layout() {
        let scene = SceneModel::from_dot_text(
            "\"a\" [label=\"main\"];\n\"b\" [label=\"helper\"];\n\"a\" -> \"b\";",
        );
        let json: Value = serde_json::from_str(&scene_to_json(&scene).expect("serializes"))
            .expect("valid json");

        assert!(json.get("placeholder").is_none());
        assert_eq!(json["nodes"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["nodes"][1]["id"], "b");
        assert_eq!(json["nodes"][1]["x"], 200.0);
        assert_eq!(json["nodes"][1]["width"], 150.0);
        assert_eq!(json["edges"][0]["from"], "a");
        assert_eq!(json["edges"][0]["to"], "b");
    }

    #[test]
    fn exports_placeholder_message() {
        let scene = SceneModel::from_dot_text("not a graph");
        let export = scene.to_export();

        assert_eq!(export.placeholder.as_deref(), Some(super::super::NO_NODES_MESSAGE));
        assert!(export.nodes.is_empty());
        assert!(export.edges.is_empty());
    }
}
