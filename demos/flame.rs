//! # Flame Demo (Headless)
//!
//! Loads a flame emitter from an embedded plist document, runs it for a few
//! seconds on a fixed clock and prints the pool population and vertex
//! counts. No window, no GPU; the vertex stream goes to stdout statistics
//! instead of a sprite batcher.
//!
//! Run with: `cargo run --example flame`

use ember2d::prelude::*;

const FLAME_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>textureFileName</key><string>flame.png</string>
    <key>duration</key><real>-1.0</real>
    <key>emitterType</key><integer>0</integer>
    <key>sourcePositionx</key><real>0.0</real>
    <key>sourcePositiony</key><real>0.0</real>
    <key>sourcePositionVariancex</key><real>6.0</real>
    <key>sourcePositionVariancey</key><real>2.0</real>
    <key>maxParticles</key><integer>96</integer>
    <key>particleLifespan</key><real>0.9</real>
    <key>particleLifespanVariance</key><real>0.3</real>
    <key>startParticleSize</key><real>28.0</real>
    <key>startParticleSizeVariance</key><real>8.0</real>
    <key>finishParticleSize</key><real>4.0</real>
    <key>finishParticleSizeVariance</key><real>0.0</real>
    <key>angle</key><real>1.5708</real>
    <key>angleVariance</key><real>0.35</real>
    <key>speed</key><real>70.0</real>
    <key>speedVariance</key><real>20.0</real>
    <key>gravityx</key><real>0.0</real>
    <key>gravityy</key><real>30.0</real>
    <key>radialAcceleration</key><real>0.0</real>
    <key>radialAccelVariance</key><real>0.0</real>
    <key>tangentialAcceleration</key><real>0.0</real>
    <key>tangentialAccelVariance</key><real>5.0</real>
    <key>maxRadius</key><real>0.0</real>
    <key>maxRadiusVariance</key><real>0.0</real>
    <key>minRadius</key><real>0.0</real>
    <key>rotatePerSecond</key><real>0.0</real>
    <key>rotatePerSecondVariance</key><real>0.0</real>
    <key>startColorRed</key><real>1.0</real>
    <key>startColorGreen</key><real>0.55</real>
    <key>startColorBlue</key><real>0.1</real>
    <key>startColorAlpha</key><real>1.0</real>
    <key>startColorVarianceRed</key><real>0.0</real>
    <key>startColorVarianceGreen</key><real>0.15</real>
    <key>startColorVarianceBlue</key><real>0.0</real>
    <key>startColorVarianceAlpha</key><real>0.0</real>
    <key>finishColorRed</key><real>0.7</real>
    <key>finishColorGreen</key><real>0.05</real>
    <key>finishColorBlue</key><real>0.0</real>
    <key>finishColorAlpha</key><real>0.0</real>
    <key>finishColorVarianceRed</key><real>0.0</real>
    <key>finishColorVarianceGreen</key><real>0.0</real>
    <key>finishColorVarianceBlue</key><real>0.0</real>
    <key>finishColorVarianceAlpha</key><real>0.0</real>
    <key>blendFuncSource</key><integer>770</integer>
    <key>blendFuncDestination</key><integer>1</integer>
</dict>
</plist>
"#;

fn main() {
    env_logger::init();

    // A host would look sprites up in its atlas; here a closure fakes one.
    let resolver = |name: &str| Some(Sprite::new(name, 64, 64));

    let mut emitter = ParticleEmitter::new().with_rng_seed(2024);
    emitter
        .load_str(FLAME_PLIST, &resolver)
        .expect("embedded plist is well formed");

    println!("=== Ember2D Flame Demo ===");
    println!(
        "sprite: {}, capacity: {}, blend: {:?}",
        emitter.config().sprite().map(|s| s.name.as_str()).unwrap_or("<none>"),
        emitter.config().max_particles(),
        emitter.config().blend_mode(),
    );
    println!();

    let mut clock = FrameClock::fixed(1.0 / 60.0);
    for _ in 0..300 {
        let (elapsed, dt) = clock.update();
        emitter.advance(dt);
        let (vertices, rebuilt) = emitter.build_vertices();
        let vertex_count = vertices.len();

        if clock.frame() % 30 == 0 {
            println!(
                "t = {:>4.1}s  live = {:>3}  vertices = {:>4}  rebuilt = {}",
                elapsed,
                emitter.live_count(),
                vertex_count,
                rebuilt,
            );
        }
    }

    println!();
    println!("done: {} frames simulated", clock.frame());
}
