/// Click selection: at most one planet glows.

use orrery_engine::{Color, NodeId, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(NodeId),
}

impl Selection {
    pub fn selected(&self) -> Option<NodeId> {
        match *self {
            Selection::Selected(id) => Some(id),
            Selection::Unselected => None,
        }
    }

    /// Apply a click result. A hit selects that mesh (re-selecting the same
    /// mesh keeps it lit); a miss clears the selection. The previous
    /// highlight is always removed first.
    pub fn click(&mut self, scene: &mut Scene, hit: Option<NodeId>, highlight: Color) {
        if let Some(previous) = self.selected() {
            set_emissive(scene, previous, Color::BLACK);
        }
        *self = match hit {
            Some(id) => {
                set_emissive(scene, id, highlight);
                Selection::Selected(id)
            }
            None => Selection::Unselected,
        };
    }
}

fn set_emissive(scene: &mut Scene, id: NodeId, color: Color) {
    if let Some(mesh) = scene.get_mut(id).and_then(|n| n.mesh.as_mut()) {
        mesh.material.emissive = color;
    }
}
