//! One-shot scene construction from a validated body table.

use std::f64::consts::TAU;

use crate::api::config::ViewerConfig;
use crate::assets::registry::TextureRegistry;
use crate::components::mesh::{Color, LineMaterial, RingMesh, SphereMesh, SurfaceMaterial};
use crate::core::body::{BodyParams, BodyState};
use crate::core::motion::OrbitalMotionIntegrator;
use crate::core::rng::Rng;
use crate::core::scene::{BodyNode, OrbitLine, RingNode, SolarScene, SunNode};
use crate::core::table::BodyTable;
use crate::error::{OrreryError, OrreryResult};
use crate::geometry::orbit_path::build_path;
use crate::geometry::starfield::Starfield;
use crate::systems::lighting::LightRig;
use crate::texture::ring::RingTextureCache;

// Independent streams so e.g. changing the star count leaves phases alone.
const PHASE_STREAM: u64 = 1;
const STAR_STREAM: u64 = 2;
const RING_STREAM: u64 = 3;

/// Builds a `SolarScene`. Textures and ring bitmaps go into the caches passed
/// in, which the caller owns for the scene's lifetime.
pub struct SceneAssembler<'a> {
    config: &'a ViewerConfig,
    integrator: OrbitalMotionIntegrator,
}

impl<'a> SceneAssembler<'a> {
    pub fn new(config: &'a ViewerConfig) -> Self {
        Self {
            config,
            integrator: OrbitalMotionIntegrator::new(config.sim.self_rotation_step),
        }
    }

    pub fn assemble(
        &self,
        table: &BodyTable,
        textures: &mut TextureRegistry,
        rings: &mut RingTextureCache,
    ) -> OrreryResult<SolarScene> {
        self.config.validate()?;
        let scene_cfg = &self.config.scene;

        let mut root = Rng::new(self.config.sim.seed);
        let mut phase_rng = root.fork(PHASE_STREAM);
        let mut star_rng = root.fork(STAR_STREAM);
        let mut ring_rng = root.fork(RING_STREAM);

        let offsets = self.phase_offsets(table, &mut phase_rng)?;

        let starfield = Starfield::generate(scene_cfg.star_count, scene_cfg.star_spread, &mut star_rng);

        let sun_texture = textures.request(&scene_cfg.sun_texture);
        let sun = SunNode {
            mesh: SphereMesh::new(scene_cfg.sun_radius).with_segments(64),
            material: SurfaceMaterial::textured(sun_texture).with_emissive(
                Color::from_hex(scene_cfg.sun_emissive),
                scene_cfg.sun_emissive_intensity,
            ),
        };

        let mut bodies = Vec::with_capacity(table.len());
        for ((id, params), offset) in table.iter().zip(offsets) {
            let texture = textures.request(&params.texture);
            let ring = params.ring.map(|desc| {
                let inner = desc.inner_radius_factor * params.radius;
                let outer = desc.outer_radius_factor * params.radius;
                let tex = rings.get_or_synthesize(desc.ring_type, inner, outer, textures, &mut ring_rng);
                RingNode {
                    mesh: RingMesh::new(inner, outer, tex),
                    material: SurfaceMaterial::textured(tex).see_through(),
                }
            });

            let mut material = LineMaterial::new(Color::from_hex(scene_cfg.orbit_color), scene_cfg.orbit_opacity);
            material.visible = scene_cfg.orbits_visible;

            let mut state = BodyState::new(offset);
            state.position = self.initial_position(params, offset);

            bodies.push(BodyNode {
                id,
                name: params.name.clone(),
                orbit_radius: params.a,
                mesh: SphereMesh::new(params.radius),
                material: SurfaceMaterial::textured(texture),
                ring,
                orbit: OrbitLine {
                    guide: build_path(params.a, params.b, params.inclination, scene_cfg.orbit_segments),
                    material,
                },
                state,
            });
        }

        log::info!(
            "scene assembled: {} bodies, {} stars, {} textures",
            bodies.len(),
            starfield.len(),
            textures.len()
        );

        Ok(SolarScene {
            starfield,
            lights: LightRig::from_config(&scene_cfg.lights),
            sun,
            bodies,
            clear_color: Color::from_hex(scene_cfg.clear_color),
            orbits_visible: scene_cfg.orbits_visible,
        })
    }

    /// Explicit offsets when configured, else uniform in [0, TAU) from the seed.
    fn phase_offsets(&self, table: &BodyTable, rng: &mut Rng) -> OrreryResult<Vec<f64>> {
        match &self.config.sim.phase_offsets {
            Some(fixed) if fixed.len() != table.len() => Err(OrreryError::InvalidConfig(format!(
                "{} phase offsets for {} bodies",
                fixed.len(),
                table.len()
            ))),
            Some(fixed) => Ok(fixed.clone()),
            None => Ok((0..table.len()).map(|_| rng.next_f64() * TAU).collect()),
        }
    }

    fn initial_position(&self, params: &BodyParams, offset: f64) -> glam::Vec3 {
        self.integrator.compute_position(params, offset, 0.0, 1.0).position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::registry::TextureStatus;
    use crate::core::body::{RingDescriptor, RingType};
    use glam::Vec3;

    fn table() -> BodyTable {
        BodyTable::new(vec![
            BodyParams::new("Earth", 16.0, 15.98, 365.0)
                .with_radius(1.2)
                .with_texture("textures/earth.jpg"),
            BodyParams::new("Saturn", 38.0, 37.8, 10759.0)
                .with_radius(1.8)
                .with_inclination(2.5)
                .with_texture("textures/saturn.jpg")
                .with_ring(RingDescriptor::for_type(RingType::Saturn)),
            BodyParams::new("Uranus", 48.0, 47.8, 30687.0)
                .with_radius(1.4)
                .with_texture("textures/uranus.jpg")
                .with_ring(RingDescriptor::for_type(RingType::Uranus)),
        ])
        .unwrap()
    }

    fn config() -> ViewerConfig {
        let mut config = ViewerConfig::default().with_seed(7);
        config.scene.star_count = 50;
        config
    }

    fn build(config: &ViewerConfig) -> (SolarScene, TextureRegistry, RingTextureCache) {
        let mut textures = TextureRegistry::new();
        let mut rings = RingTextureCache::new();
        let scene = SceneAssembler::new(config)
            .assemble(&table(), &mut textures, &mut rings)
            .unwrap();
        (scene, textures, rings)
    }

    #[test]
    fn one_node_per_body_in_order() {
        let (scene, _, _) = build(&config());
        let names: Vec<&str> = scene.bodies().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Earth", "Saturn", "Uranus"]);
        assert_eq!(scene.starfield().len(), 50);
        assert_eq!(scene.sun().mesh.radius, 4.0);
        assert_eq!(scene.sun().material.emissive_intensity, 2.0);
    }

    #[test]
    fn rings_only_where_described() {
        let (scene, textures, rings) = build(&config());
        assert!(scene.bodies()[0].ring.is_none());
        let saturn = scene.bodies()[1].ring.as_ref().unwrap();
        assert!((saturn.mesh.inner_radius - 1.4 * 1.8).abs() < 1e-5);
        assert!((saturn.mesh.outer_radius - 2.4 * 1.8).abs() < 1e-5);
        assert!(saturn.material.transparent);
        assert_eq!(rings.len(), 2);
        let ring_tex = textures.get(saturn.mesh.texture).unwrap();
        assert_eq!(ring_tex.status, TextureStatus::Ready);
    }

    #[test]
    fn textures_are_requested_once_per_path() {
        let (_, textures, _) = build(&config());
        // sun + 3 planets pending, 2 rings generated
        assert_eq!(textures.pending().count(), 4);
        assert_eq!(textures.len(), 6);
    }

    #[test]
    fn phases_are_seeded_and_in_range() {
        let (a, _, _) = build(&config());
        let (b, _, _) = build(&config());
        for (na, nb) in a.bodies().iter().zip(b.bodies()) {
            assert_eq!(na.state.start_offset, nb.state.start_offset);
            assert!((0.0..TAU).contains(&na.state.start_offset));
        }
        let (c, _, _) = build(&config().with_seed(8));
        assert_ne!(a.bodies()[0].state.start_offset, c.bodies()[0].state.start_offset);
    }

    #[test]
    fn fixed_phases_override_seed() {
        let config = config().with_phase_offsets(vec![0.0, 0.0, 0.0]);
        let (scene, _, _) = build(&config);
        let earth = &scene.bodies()[0];
        assert_eq!(earth.state.start_offset, 0.0);
        assert!((earth.state.position - Vec3::new(16.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn phase_count_mismatch_fails() {
        let config = config().with_phase_offsets(vec![0.0]);
        let result = SceneAssembler::new(&config).assemble(
            &table(),
            &mut TextureRegistry::new(),
            &mut RingTextureCache::new(),
        );
        assert!(matches!(result, Err(OrreryError::InvalidConfig(_))));
    }

    #[test]
    fn orbit_guides_follow_config() {
        let mut config = config();
        config.scene.orbit_segments = 24;
        config.scene.orbits_visible = false;
        let (scene, _, _) = build(&config);
        let guide = &scene.bodies()[1].orbit;
        assert_eq!(guide.guide.points().len(), 25);
        assert!(!guide.material.visible);
        assert!(!scene.orbits_visible());
        assert_eq!(guide.material.opacity, 0.3);
    }

    #[test]
    fn lights_follow_config() {
        let mut config = config();
        config.scene.lights.point_intensity = 50.0;
        config.scene.lights.directional_position = [0.0, 100.0, 0.0];
        let (scene, _, _) = build(&config);
        assert_eq!(scene.lights().point.intensity, 50.0);
        assert_eq!(scene.lights().directional.direction(), glam::Vec3::NEG_Y);
    }

    #[test]
    fn star_count_does_not_shift_phases() {
        let (a, _, _) = build(&config());
        let mut more_stars = config();
        more_stars.scene.star_count = 500;
        let (b, _, _) = build(&more_stars);
        assert_eq!(a.bodies()[2].state.start_offset, b.bodies()[2].state.start_offset);
    }
}
