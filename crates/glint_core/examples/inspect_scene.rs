//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/glass_box.json

use std::env;

use glint_core::{load_scene, LightDescription, MaterialRef};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-json>");
        println!("\nExamples:");
        println!("  cargo run --example inspect_scene -- scenes/glass_box.json");
        println!("  cargo run --example inspect_scene -- scenes/lit_box.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            println!("\n=== Scene: {} ===", scene.name);
            println!("Objects: {}", scene.object_count());
            println!("Lights: {}", scene.light_count());

            println!("\n--- Materials ---");
            for material in &scene.materials {
                let role = if material.is_emissive() {
                    "emissive"
                } else if material.is_absorptive() {
                    "opaque"
                } else {
                    "reflective/transmissive"
                };
                println!("  '{}' ({}, index {})", material.name, role, material.index);
            }

            println!("\n--- Objects ---");
            for (i, object) in scene.objects.iter().enumerate() {
                let material = match &object.material {
                    MaterialRef::Named(name) => name.as_str(),
                    MaterialRef::Inline(_) => "<inline>",
                };
                println!(
                    "  [{}] {:?} '{}' at {:?} material {}",
                    i, object.shape, object.name, object.transform.translation, material
                );
            }

            println!("\n--- Lights ---");
            for light in &scene.lights {
                match light {
                    LightDescription::Directional { direction, color } => {
                        println!("  directional {:?} color {:?}", direction, color)
                    }
                    LightDescription::Point { position, color } => {
                        println!("  point {:?} color {:?}", position, color)
                    }
                    LightDescription::Ambient { color } => println!("  ambient {:?}", color),
                }
            }
        }
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    }
}
