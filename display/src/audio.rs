use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

use crate::DisplayError;

/// Plays a tone while the sound timer is running
pub trait Sound {
    fn set_active(&mut self, active: bool);
}

const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.25;

struct SquareWave {
    phase_inc: f32,
    phase: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase < 0.5 { VOLUME } else { -VOLUME };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// A square wave on the default SDL2 playback device
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    playing: bool,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, DisplayError> {
        let audio = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio.open_playback(None, &desired, |spec| {
            log::debug!("audio device opened at {} Hz", spec.freq);
            SquareWave {
                phase_inc: TONE_HZ / spec.freq as f32,
                phase: 0.0,
            }
        })?;
        Ok(Beeper {
            device,
            playing: false,
        })
    }
}

impl Sound for Beeper {
    fn set_active(&mut self, active: bool) {
        if active == self.playing {
            return;
        }
        log::trace!("tone {}", if active { "on" } else { "off" });
        if active {
            self.device.resume();
        } else {
            self.device.pause();
        }
        self.playing = active;
    }
}

/// For when there's no audio device, or no wish for one
pub struct Mute;

impl Sound for Mute {
    fn set_active(&mut self, _active: bool) {}
}
