//! Simple ray tracer example.
//!
//! Describes a glass box in front of a mirror and a colored backdrop, then
//! saves the frame in PPM format.

use glint_core::{
    CameraDescription, LightDescription, ObjectDescription, SceneDescription, Shape, Transform,
};
use glint_renderer::{
    Color, ImageBuffer, Material, RayTracer, Scene, TraceConfig, Vec3, DEFAULT_BUCKET_SIZE,
};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    env_logger::init();

    println!("Glint Ray Tracer - Simple Example");
    println!("=================================");

    // Build the scene
    let start = std::time::Instant::now();
    let scene = match Scene::from_description(&describe_scene()) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Invalid scene: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Scene built with {} objects in {:?}",
        scene.object_count(),
        start.elapsed()
    );

    let config = TraceConfig {
        max_depth: 6,
        ..Default::default()
    };
    let mut tracer = match RayTracer::new(config) {
        Ok(tracer) => tracer,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracer.set_scene(scene);
    tracer.trace_setup(480, 270);

    println!(
        "Rendering {}x{} @ depth {}...",
        tracer.buffer().width(),
        tracer.buffer().height(),
        tracer.config().max_depth
    );

    let start = std::time::Instant::now();
    tracer.render(DEFAULT_BUCKET_SIZE);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    if let Err(e) = save_ppm(tracer.buffer(), filename) {
        eprintln!("Failed to save image: {}", e);
        std::process::exit(1);
    }
    println!("Saved to {}", filename);
}

fn describe_scene() -> SceneDescription {
    let mut scene = SceneDescription::new("simple");
    scene.camera = CameraDescription {
        position: Vec3::new(3.0, 2.0, 6.0),
        look_at: Vec3::ZERO,
        up: Vec3::Y,
        fov: 40.0,
        aspect_ratio: 16.0 / 9.0,
    };

    scene.add_material(Material {
        ambient: Color::splat(0.2),
        ..Material::new("floor", Color::new(0.6, 0.6, 0.55))
    });
    scene.add_material(Material {
        specular: Color::splat(0.8),
        shininess: 0.6,
        reflective: Color::splat(0.1),
        transmissive: Color::splat(0.85),
        index: 1.5,
        ..Material::new("glass", Color::ZERO)
    });
    scene.add_material(Material {
        specular: Color::ONE,
        shininess: 0.9,
        reflective: Color::splat(0.8),
        ..Material::new("mirror", Color::splat(0.1))
    });
    scene.add_material(Material {
        ambient: Color::new(0.3, 0.05, 0.05),
        ..Material::new("backdrop", Color::new(0.8, 0.1, 0.1))
    });

    // Floor
    scene.add_object(ObjectDescription::new(Shape::Box, "floor").with_transform(Transform {
        translation: Vec3::new(0.0, -0.6, 0.0),
        scale: Vec3::new(12.0, 0.2, 12.0),
        ..Default::default()
    }));

    // Glass cube rotated toward the camera
    scene.add_object(ObjectDescription::new(Shape::Box, "glass").with_transform(Transform {
        rotation: Vec3::new(0.0, 35.0, 0.0),
        ..Default::default()
    }));

    // Mirror ball behind it
    scene.add_object(
        ObjectDescription::new(Shape::Sphere, "mirror").with_transform(
            Transform::from_translation(Vec3::new(-1.5, 0.3, -1.5)).with_uniform_scale(1.6),
        ),
    );

    // Red backdrop
    scene.add_object(ObjectDescription::new(Shape::Box, "backdrop").with_transform(Transform {
        translation: Vec3::new(0.0, 2.5, -4.0),
        scale: Vec3::new(12.0, 6.0, 0.2),
        ..Default::default()
    }));

    scene.add_light(LightDescription::Point {
        position: Vec3::new(2.0, 5.0, 3.0),
        color: Color::splat(0.9),
    });
    scene.add_light(LightDescription::Directional {
        direction: Vec3::new(-1.0, -1.0, -0.5),
        color: Color::splat(0.4),
    });
    scene.add_light(LightDescription::Ambient {
        color: Color::splat(0.3),
    });

    scene
}

/// Write the buffer as plain PPM, top row first.
fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "255")?;

    for j in (0..image.height()).rev() {
        for i in 0..image.width() {
            let [r, g, b] = image.get(i, j).unwrap_or_default();
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    writer.flush()
}
