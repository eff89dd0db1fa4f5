mod demo;

use tickwin_engine::device::GpuInit;
use tickwin_engine::logging::{init_logging, LoggingConfig};
use tickwin_engine::platform::WinitPlatform;
use tickwin_engine::window::{exit_on_error, Window, WindowConfig};

use demo::DemoEngine;

fn main() {
    init_logging(LoggingConfig::default());

    let config = WindowConfig::new(1080, 720)
        .resizable(true)
        .vsync(true)
        .title("tickwin demo");

    let mut window = Window::new(config, WinitPlatform::new(GpuInit::default()));
    let mut engine = DemoEngine::default();

    if let Err(err) = window.start(&mut engine) {
        exit_on_error(err);
    }

    log::info!(
        "ran {} frames and {} ticks",
        engine.frames(),
        engine.ticks()
    );
}
