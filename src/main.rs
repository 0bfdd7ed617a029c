use ripple::engine::Engine;
use ripple::scene;
use ripple::settings;

#[cfg(feature = "macroquad")]
#[macroquad::main("ripple")]
async fn main() {
    use macroquad::prelude::*;

    let settings = settings::load_config().unwrap();
    println!("{}", settings);

    let mut engine = Engine::new(settings);
    ripple::scene::demo_scene(&mut engine).unwrap();

    loop {
        engine.tick();
        clear_background(Color::from_rgba(26, 26, 26, 255));
        ripple::helpers::draw_scene(&engine);
        next_frame().await
    }
}

#[cfg(not(feature = "macroquad"))]
fn main() {
    let settings = settings::load_config().unwrap();
    println!("{}", settings);

    let ticks = settings.ticks;
    let mut engine = Engine::new(settings);
    scene::demo_scene(&mut engine).unwrap();

    let mut peak = 0;
    for _ in 0..ticks {
        engine.tick();
        peak = peak.max(engine.wavefronts().len());
    }

    println!(
        "ran {} ticks: {} live wavefronts, peak {}",
        ticks,
        engine.wavefronts().len(),
        peak
    );
}
