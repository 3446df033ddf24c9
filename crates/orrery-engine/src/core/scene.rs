use std::f32::consts::TAU;

use glam::Vec3;

use crate::camera::controller::{FocusTarget, PositionProvider};
use crate::components::mesh::{Color, LineMaterial, RingMesh, SphereMesh, SurfaceMaterial};
use crate::core::body::{BodyId, BodyState};
use crate::core::motion::MotionSample;
use crate::geometry::orbit_path::OrbitGuide;
use crate::geometry::starfield::Starfield;
use crate::systems::lighting::LightRig;

/// The sun at the origin.
#[derive(Debug, Clone)]
pub struct SunNode {
    pub mesh: SphereMesh,
    pub material: SurfaceMaterial,
}

/// Ring plane attached to a body.
#[derive(Debug, Clone)]
pub struct RingNode {
    pub mesh: RingMesh,
    pub material: SurfaceMaterial,
}

/// Orbit guide line with its own material.
#[derive(Debug, Clone)]
pub struct OrbitLine {
    pub guide: OrbitGuide,
    pub material: LineMaterial,
}

/// One orbiting body in the scene graph.
#[derive(Debug, Clone)]
pub struct BodyNode {
    pub id: BodyId,
    pub name: String,
    /// Semi-major axis, used to frame the body when focused.
    pub orbit_radius: f32,
    pub mesh: SphereMesh,
    pub material: SurfaceMaterial,
    pub ring: Option<RingNode>,
    pub orbit: OrbitLine,
    pub state: BodyState,
}

/// Fully assembled scene. Built once by `SceneAssembler`; afterwards only
/// transforms and visibility flags change.
pub struct SolarScene {
    pub(crate) starfield: Starfield,
    pub(crate) lights: LightRig,
    pub(crate) sun: SunNode,
    pub(crate) bodies: Vec<BodyNode>,
    pub(crate) clear_color: Color,
    pub(crate) orbits_visible: bool,
}

impl SolarScene {
    /// Write one integration result into body `index`. Returns false for an
    /// out-of-range index.
    pub fn apply_motion(&mut self, index: usize, sample: MotionSample) -> bool {
        let Some(node) = self.bodies.get_mut(index) else {
            return false;
        };
        node.state.position = sample.position;
        node.state.rotation = (node.state.rotation + sample.self_rotation_delta).rem_euclid(TAU);
        true
    }

    /// Flip every orbit line's material flag in place.
    pub fn set_orbits_visible(&mut self, visible: bool) {
        self.orbits_visible = visible;
        for node in &mut self.bodies {
            node.orbit.material.visible = visible;
        }
    }

    /// Returns the new visibility.
    pub fn toggle_orbits(&mut self) -> bool {
        self.set_orbits_visible(!self.orbits_visible);
        self.orbits_visible
    }

    pub fn orbits_visible(&self) -> bool {
        self.orbits_visible
    }

    /// Case-insensitive lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&BodyNode> {
        self.bodies.iter().find(|n| n.name.eq_ignore_ascii_case(name))
    }

    /// Camera focus target for a named body.
    pub fn focus_target(&self, name: &str) -> Option<FocusTarget> {
        self.find_by_name(name).map(|n| FocusTarget {
            body: n.id,
            orbit_radius: n.orbit_radius,
        })
    }

    pub fn body(&self, id: BodyId) -> Option<&BodyNode> {
        self.bodies.get(id.0 as usize)
    }

    pub fn bodies(&self) -> &[BodyNode] {
        &self.bodies
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn sun(&self) -> &SunNode {
        &self.sun
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl PositionProvider for SolarScene {
    fn position_of(&self, body: BodyId) -> Option<Vec3> {
        self.body(body).map(|n| n.state.position)
    }
}
