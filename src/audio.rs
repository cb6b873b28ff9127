use std::f32::consts::TAU;
use std::io::{self, Write};

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};

use crate::config::AudioConfig;

const SAMPLE_RATE: u32 = 44_100;
const PEAK: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    /// A point was scored.
    Score,
    Flap,
    GameOver,
}

/// Sound playback as seen by the games. Implementations decide what a cue
/// actually sounds like.
pub trait Audio {
    fn play(&mut self, cue: Cue);
    /// Stop whatever gameplay sound is running.
    fn stop(&mut self);
    /// Clamped to 0.0..=1.0.
    fn set_volume(&mut self, volume: f32);
}

/// Mono tone gliding linearly from `from_hz` to `to_hz`, fading out.
fn sweep(from_hz: f32, to_hz: f32, secs: f32, square: bool) -> Vec<f32> {
    let n = (SAMPLE_RATE as f32 * secs) as usize;
    let mut phase = 0.0f32;
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            let hz = from_hz + (to_hz - from_hz) * t;
            phase = (phase + hz / SAMPLE_RATE as f32).fract();
            let wave = if square {
                if phase < 0.5 { 1.0 } else { -1.0 }
            } else {
                (phase * TAU).sin()
            };
            wave * PEAK * (1.0 - t)
        })
        .collect()
}

fn cue_samples(cue: Cue) -> Vec<f32> {
    match cue {
        Cue::Flap => sweep(400.0, 800.0, 0.12, false),
        Cue::Score => {
            let mut samples = sweep(880.0, 880.0, 0.08, false);
            samples.extend(sweep(1320.0, 1320.0, 0.12, false));
            samples
        }
        Cue::GameOver => sweep(400.0, 80.0, 0.5, true),
    }
}

/// Plays cues on the default sound device. Each cue gets its own sink so
/// sounds overlap.
pub struct RodioAudio {
    // Dropping the stream silences everything.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    playing: Vec<Sink>,
    volume: f32,
    flap: Vec<f32>,
    score: Vec<f32>,
    game_over: Vec<f32>,
}

impl RodioAudio {
    pub fn try_new(volume: f32) -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            playing: Vec::new(),
            volume: volume.clamp(0.0, 1.0),
            flap: cue_samples(Cue::Flap),
            score: cue_samples(Cue::Score),
            game_over: cue_samples(Cue::GameOver),
        })
    }

    fn samples(&self, cue: Cue) -> &[f32] {
        match cue {
            Cue::Flap => &self.flap,
            Cue::Score => &self.score,
            Cue::GameOver => &self.game_over,
        }
    }
}

impl Audio for RodioAudio {
    fn play(&mut self, cue: Cue) {
        self.playing.retain(|sink| !sink.empty());
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(self.volume);
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, self.samples(cue).to_vec()));
                self.playing.push(sink);
            }
            Err(e) => log::warn!("could not play {:?}: {e}", cue),
        }
    }

    fn stop(&mut self) {
        for sink in self.playing.drain(..) {
            sink.stop();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        for sink in &self.playing {
            sink.set_volume(self.volume);
        }
    }
}

/// The sound device when there is one, else the terminal fallback.
pub fn open(config: &AudioConfig) -> Box<dyn Audio> {
    match RodioAudio::try_new(config.volume) {
        Ok(audio) => {
            log::info!("audio on the default sound device");
            Box::new(audio)
        }
        Err(e) => {
            log::warn!("no sound device ({e}), using the terminal bell");
            Box::new(TerminalAudio::new(config.volume, config.bell))
        }
    }
}

/// Fallback backend: cues go to the log and the game-over cue rings the
/// terminal bell.
pub struct TerminalAudio {
    volume: f32,
    bell: bool,
}

impl TerminalAudio {
    pub fn new(volume: f32, bell: bool) -> Self {
        let mut audio = Self { volume: 1.0, bell };
        audio.set_volume(volume);
        audio
    }

    fn ring(&self) {
        let mut out = io::stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            log::warn!("terminal bell failed: {e}");
        }
    }
}

impl Audio for TerminalAudio {
    fn play(&mut self, cue: Cue) {
        log::debug!("cue {:?} at volume {:.2}", cue, self.volume);
        if cue == Cue::GameOver && self.bell && self.volume > 0.0 {
            self.ring();
        }
    }

    fn stop(&mut self) {
        log::debug!("gameplay audio stopped");
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}

/// Keeps every call, for driving games without a terminal.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<Cue>,
    pub stops: usize,
    pub volume: f32,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|c| **c == cue).count()
    }
}

impl Audio for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }

    fn stop(&mut self) {
        self.stops += 1;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}
