//! Softbox viewer: drives the simulate-then-draw loop and presents the
//! software framebuffer in a window.
//!
//! Usage: `softbox [scene.ron]`. Engine settings are read from `softbox.ron`
//! in the working directory when present.

use std::sync::Arc;

use macroquad::prelude as mq;

use softbox::config::{load_config, EngineConfig};
use softbox::error::EngineError;
use softbox::physics::{self, PhysicsItem, Ray};
use softbox::rasterizer::{project_2d, render, Camera, Color, FrameBuffer, Light, Texture, Vec3, HEIGHT, WIDTH};
use softbox::world::{create_box, load_scene, Scene};
use softbox::VERSION;

const CONFIG_PATH: &str = "softbox.ron";

/// Horizontal nudge per frame while A/D is held
const NUDGE: f32 = 0.05;

/// Yaw added to every mesh per frame
const SPIN: f32 = 0.02;

fn window_conf() -> mq::Conf {
    mq::Conf {
        window_title: format!("Softbox v{}", VERSION),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: true,
        ..Default::default()
    }
}

fn load_engine_config() -> EngineConfig {
    match load_config(CONFIG_PATH) {
        Ok(config) => {
            log::info!("Loaded {}", CONFIG_PATH);
            config
        }
        Err(EngineError::Io(_)) => EngineConfig::default(),
        Err(e) => {
            log::error!("Ignoring {}: {}", CONFIG_PATH, e);
            EngineConfig::default()
        }
    }
}

/// A falling crate over an anchored, textured floor
fn demo_scene() -> Scene {
    let mut scene = Scene::new();

    scene.add_mesh(
        create_box("crate", 0.5, 0.5, 0.5)
            .with_position(Vec3::new(0.25, 6.0, 0.0))
            .with_physics(PhysicsItem::new(true, 1.0)),
    );

    let checker = Texture::checkerboard(32, 32, Color::WHITE, Color::new(0.4, 0.4, 0.45, 1.0));
    let mut floor = create_box("floor", 4.0, 0.5, 4.0)
        .with_position(Vec3::new(0.0, -2.0, 0.0))
        .with_texture(Arc::new(checker));
    floor.physics.collider_fix_value = 0.0;
    scene.add_mesh(floor);

    scene.add_light(Light::new(Vec3::new(0.0, 10.0, -10.0), 1.0, 1000.0));
    scene
}

/// Meshes that fall this far are put back at their spawn point
const RESPAWN_Y: f32 = -5.0;

fn read_nudge() -> f32 {
    if mq::is_key_down(mq::KeyCode::A) {
        -NUDGE
    } else if mq::is_key_down(mq::KeyCode::D) {
        NUDGE
    } else {
        0.0
    }
}

/// Per-frame scene input: spin every mesh, nudge the first one along X and
/// respawn it once it has fallen out of the world
fn apply_input(scene: &mut Scene, dx: f32, spawn: Vec3) {
    for mesh in &mut scene.meshes {
        mesh.rotation.y += SPIN;
    }

    if let Some(first) = scene.meshes.first_mut() {
        first.position.x += dx;
        if first.position.y <= RESPAWN_Y {
            first.position = spawn;
        }
    }
}

/// Tint the first light while the probe ray hits something
fn run_probe(scene: &mut Scene, probe: &Ray) {
    let hit = scene.raycast(probe);
    if let Some(light) = scene.lights.first_mut() {
        let level = if hit.is_some() { 0.0 } else { 1.0 };
        light.color.r = level;
        light.color.b = level;
    }
}

fn draw_probe(fb: &FrameBuffer, camera: &Camera, probe: &Ray) {
    let transform = camera.projection_matrix(fb.width, fb.height) * camera.view_matrix();
    let start = project_2d(probe.origin, &transform, fb.width, fb.height);
    let end = project_2d(probe.at(probe.length), &transform, fb.width, fb.height);
    fb.draw_line(start, end, Color::YELLOW);
}

fn present(fb: &FrameBuffer) {
    let texture = mq::Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.to_rgba());
    texture.set_filter(mq::FilterMode::Nearest);

    mq::draw_texture_ex(
        &texture,
        0.0,
        0.0,
        mq::WHITE,
        mq::DrawTextureParams {
            dest_size: Some(mq::vec2(mq::screen_width(), mq::screen_height())),
            ..Default::default()
        },
    );
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = load_engine_config();

    let mut scene = match std::env::args().nth(1) {
        Some(path) => match load_scene(&path) {
            Ok(scene) => scene,
            Err(e) => {
                log::error!("Failed to load {}: {}, using demo scene", path, e);
                demo_scene()
            }
        },
        None => demo_scene(),
    };
    let spawn = scene.meshes.first().map(|m| m.position).unwrap_or_default();

    let camera = config.camera.to_camera();
    let mut fb = FrameBuffer::new(config.width, config.height);
    let probe = Ray::new(Vec3::new(0.0, 5.0, 0.0), 10.0, 5, Vec3::NEG_Y);

    log::info!("=== Softbox v{} === {} meshes", VERSION, scene.meshes.len());

    loop {
        let [r, g, b, a] = config.clear_color;
        fb.clear(r, g, b, a);

        apply_input(&mut scene, read_nudge(), spawn);
        physics::step(&mut scene, &config.physics);
        run_probe(&mut scene, &probe);

        render(&fb, &camera, &scene);
        draw_probe(&fb, &camera, &probe);

        mq::clear_background(mq::BLACK);
        present(&fb);

        mq::next_frame().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_input_nudges_and_spins() {
        let mut scene = demo_scene();
        let spawn = scene.meshes[0].position;

        apply_input(&mut scene, NUDGE, spawn);
        assert!((scene.meshes[0].position.x - (spawn.x + NUDGE)).abs() < 1e-6);
        assert!(scene.meshes.iter().all(|m| (m.rotation.y - SPIN).abs() < 1e-6));
    }

    #[test]
    fn test_fallen_mesh_respawns_at_spawn() {
        let mut scene = demo_scene();
        let spawn = scene.meshes[0].position;

        scene.meshes[0].position = Vec3::new(1.0, -4.9, 0.0);
        apply_input(&mut scene, 0.0, spawn);
        assert_eq!(scene.meshes[0].position.y, -4.9);

        scene.meshes[0].position = Vec3::new(1.0, -5.0, 0.0);
        apply_input(&mut scene, 0.0, spawn);
        assert_eq!(scene.meshes[0].position, spawn);
    }

    #[test]
    fn test_probe_tints_light_while_hitting() {
        let mut scene = demo_scene();
        let probe = Ray::new(Vec3::new(0.0, 5.0, 0.0), 10.0, 5, Vec3::NEG_Y);

        // The floor sits under the probe
        run_probe(&mut scene, &probe);
        assert_eq!((scene.lights[0].color.r, scene.lights[0].color.b), (0.0, 0.0));

        scene.meshes.clear();
        run_probe(&mut scene, &probe);
        assert_eq!((scene.lights[0].color.r, scene.lights[0].color.b), (1.0, 1.0));
    }
}
