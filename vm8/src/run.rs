use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use color_eyre::eyre::{eyre, Result, WrapErr};
use log::{error, info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use vm8_core::Machine;
use vm8_display::Display;

use crate::args::Args;
use crate::audio::Beeper;
use crate::keymap::keymap;

const TITLE: &str = "vm8";

pub fn run(args: &Args) -> Result<()> {
    let mut machine = Machine::with_config(args.machine_config());

    // Load ROM
    let file = File::open(&args.rom)
        .wrap_err_with(|| format!("unable to open {}", args.rom.display()))?;
    let mut reader = BufReader::new(file);
    machine
        .load_rom(&mut reader)
        .wrap_err_with(|| format!("unable to load {}", args.rom.display()))?;
    info!("loaded {}", args.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| eyre!(e))?;
    let mut display = Display::new(&sdl, TITLE, args.scale)?;
    let mut beeper = match Beeper::new(&sdl) {
        Ok(beeper) => Some(beeper),
        Err(e) => {
            warn!("continuing without sound: {}", e);
            None
        }
    };
    let mut events = sdl.event_pump().map_err(|e| eyre!(e))?;

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / args.clock.max(1);
    let timer_period = Duration::from_secs(1) / args.timer_hz.max(1);
    let mut last_cycle = Instant::now();
    let mut last_tick = last_cycle;
    let mut last_second = last_cycle;
    let mut frames: u32 = 0;

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;
    // Whether the machine's state should be stepped forwards or backwards
    let mut rewind = false;

    'event: loop {
        // Render the current frame if it changed
        if let Some(frame) = machine.take_frame() {
            display.render(&frame)?;
            frames += 1;
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => machine.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => rewind = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => machine.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    (Keycode::Escape, _) => rewind = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        let now = Instant::now();
        if rewind {
            if machine.rewind() {
                display.render(machine.frame())?;
            }
            last_tick = now;
        } else {
            if machine.fault().is_none() {
                if let Err(fault) = machine.step() {
                    error!("halted at {:#05X}: {}", machine.registers().pc, fault);
                }
            }
            while now.duration_since(last_tick) >= timer_period {
                machine.tick_timers();
                last_tick += timer_period;
            }
        }

        if let Some(beeper) = beeper.as_mut() {
            beeper.set_playing(machine.registers().sound_timer > args.sound_threshold);
        }

        if now.duration_since(last_second) >= Duration::from_secs(1) {
            display.set_title(&format!("{} | FPS: {}", TITLE, frames))?;
            frames = 0;
            last_second = now;
        }

        // Handle timing
        let elapsed_cycle_time = now.duration_since(last_cycle);
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    Ok(())
}
