//! The viewer's fixed set of objects: procedural geometry (see `mesh`) and
//! the single material every mesh shares.

use cgmath::Vector3;

use crate::data_structures::{
    model::{MaterialId, StandardMaterial},
    scene_graph::{MeshId, MeshNode, Scene},
    transform::Transform,
};

pub mod mesh;

/// Handles of the meshes created by [`populate_scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneObjects {
    pub sphere: MeshId,
    pub cube: MeshId,
    pub torus: MeshId,
    pub plane: MeshId,
    pub material: MaterialId,
}

impl SceneObjects {
    /// The meshes animated by the render loop. The ground plane stays put.
    pub fn rotating(&self) -> [MeshId; 3] {
        [self.sphere, self.cube, self.torus]
    }
}

pub fn standard_material() -> StandardMaterial {
    StandardMaterial {
        roughness: 0.4,
        ..Default::default()
    }
}

/// Adds the sphere, cube, torus and ground plane to `scene`.
pub fn populate_scene(scene: &mut Scene) -> SceneObjects {
    let material = scene.add_material(standard_material());

    let sphere = scene.add_mesh(MeshNode {
        geometry: mesh::sphere(0.5, 32, 32),
        material,
        transform: Transform::at((-1.5, 0.0, 0.0)),
    });
    let cube = scene.add_mesh(MeshNode {
        geometry: mesh::cuboid(0.75, 0.75, 0.75),
        material,
        transform: Transform::new(),
    });
    let torus = scene.add_mesh(MeshNode {
        geometry: mesh::torus(0.3, 0.2, 32, 64),
        material,
        transform: Transform::at((1.5, 0.0, 0.0)),
    });
    let plane = scene.add_mesh(MeshNode {
        geometry: mesh::plane(5.0, 5.0),
        material,
        transform: Transform {
            position: Vector3::new(0.0, -0.65, 0.0),
            rotation: Vector3::new(-std::f32::consts::PI * 0.5, 0.0, 0.0),
            ..Transform::new()
        },
    });

    SceneObjects {
        sphere,
        cube,
        torus,
        plane,
        material,
    }
}
