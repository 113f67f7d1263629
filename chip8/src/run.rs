use std::fs;
use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::{error, info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use emu8_core::Chip8;
use emu8_display::{Beeper, Display, Mute, Renderer, Sound, TextDisplay};

use crate::config::Settings;
use crate::keymap::{keymap, layout};

pub fn run(settings: Settings) -> anyhow::Result<()> {
    let mut chip8 = Chip8::with_config(settings.core.clone());

    // Load ROM
    let rom = fs::read(&settings.rom)
        .with_context(|| format!("unable to open {}", settings.rom.display()))?;
    chip8
        .load_rom(&rom)
        .with_context(|| format!("unable to load {}", settings.rom.display()))?;
    info!("loaded {} ({} bytes)", settings.rom.display(), rom.len());

    if settings.show_keymapping {
        info!("keypad bindings:\n{}", layout());
    }

    // The console has no window to take keys from, and stays silent
    let sdl = if settings.console {
        None
    } else {
        Some(sdl2::init().map_err(anyhow::Error::msg)?)
    };
    let mut renderer: Box<dyn Renderer> = match &sdl {
        Some(sdl) => Box::new(Display::new(sdl, settings.scale)?),
        None => Box::new(TextDisplay::new(io::stdout())?),
    };
    let mut sound: Box<dyn Sound> = match &sdl {
        Some(sdl) if !settings.mute => match Beeper::new(sdl) {
            Ok(beeper) => Box::new(beeper),
            Err(e) => {
                warn!("no audio, continuing muted: {}", e);
                Box::new(Mute)
            }
        },
        _ => Box::new(Mute),
    };
    let mut events = match &sdl {
        Some(sdl) => Some(sdl.event_pump().map_err(anyhow::Error::msg)?),
        None => None,
    };

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / settings.clock_speed_hz;
    let mut last_cycle: Instant = Instant::now();

    // Whether or not the clock speed should be respected
    let mut fast_forward: bool = false;

    'event: loop {
        // Render the current frame if it changed
        if let Some(frame) = chip8.take_frame() {
            renderer.render(&frame)?;
        }

        // Handle input
        if let Some(events) = events.as_mut() {
            for event in events.poll_iter() {
                match event {
                    Event::Quit { .. }
                    | Event::KeyDown {
                        keycode: Some(Keycode::Escape),
                        ..
                    } => break 'event,
                    Event::KeyDown {
                        keycode: Some(key),
                        repeat: false,
                        ..
                    } => match (key, keymap(key)) {
                        (_, Some(kc)) => chip8.key_press(kc)?,
                        (Keycode::Space, _) => fast_forward = true,
                        _ => continue,
                    },
                    Event::KeyUp {
                        keycode: Some(key), ..
                    } => match (key, keymap(key)) {
                        (_, Some(kc)) => chip8.key_release(kc)?,
                        (Keycode::Space, _) => fast_forward = false,
                        _ => continue,
                    },
                    _ => continue,
                };
            }
        }

        // Update state
        if let Err(fault) = chip8.step() {
            error!("halting: {}", fault);
            sound.set_active(false);
            return Err(fault.into());
        }
        sound.set_active(chip8.sound_active());

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("quit");
    Ok(())
}
