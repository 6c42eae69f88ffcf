//! Scene graph: the ordered collection of mesh and light nodes.
//!
//! The scene owns every node for the lifetime of the viewer. Nodes are never
//! removed, so the typed ids handed out on insertion stay valid forever.

use crate::data_structures::{
    light::Light,
    model::{Geometry, MaterialId, StandardMaterial},
    transform::Transform,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LightId(usize);

/// A drawable node: geometry, a shared material and a transform.
#[derive(Clone, Debug)]
pub struct MeshNode {
    pub geometry: Geometry,
    pub material: MaterialId,
    pub transform: Transform,
}

#[derive(Clone, Debug)]
enum Node {
    Mesh(MeshNode),
    Light(Light),
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    materials: Vec<StandardMaterial>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_material(&mut self, material: StandardMaterial) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn material(&self, id: MaterialId) -> Option<&StandardMaterial> {
        self.materials.get(id.0)
    }

    pub fn materials(&self) -> &[StandardMaterial] {
        &self.materials
    }

    pub fn add_mesh(&mut self, mesh: MeshNode) -> MeshId {
        self.nodes.push(Node::Mesh(mesh));
        MeshId(self.nodes.len() - 1)
    }

    pub fn add_light(&mut self, light: Light) -> LightId {
        self.nodes.push(Node::Light(light));
        LightId(self.nodes.len() - 1)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&MeshNode> {
        match self.nodes.get(id.0) {
            Some(Node::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut MeshNode> {
        match self.nodes.get_mut(id.0) {
            Some(Node::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        match self.nodes.get(id.0) {
            Some(Node::Light(light)) => Some(light),
            _ => None,
        }
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut Light> {
        match self.nodes.get_mut(id.0) {
            Some(Node::Light(light)) => Some(light),
            _ => None,
        }
    }

    /// Mesh nodes in insertion (draw) order.
    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &MeshNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| match node {
                Node::Mesh(mesh) => Some((MeshId(i), mesh)),
                Node::Light(_) => None,
            })
    }

    pub fn lights(&self) -> impl Iterator<Item = (LightId, &Light)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| match node {
                Node::Light(light) => Some((LightId(i), light)),
                Node::Mesh(_) => None,
            })
    }
}
