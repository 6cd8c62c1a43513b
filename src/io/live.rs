//! Live capture from the default input device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use rtrb::{Producer, RingBuffer};
use tracing::{error, info, warn};

use crate::{graph::live::LiveFeed, LabError};

/// An open capture stream. Capture stops when this is dropped.
///
/// `cpal::Stream` is not `Send` on every platform, so this stays on the
/// thread that opened it; only the [`LiveFeed`] crosses threads.
pub struct LiveCapture {
    sample_rate: u32,
    device_name: String,
    _stream: cpal::Stream,
}

impl LiveCapture {
    /// Open the default input device, downmixing to mono into a ring of
    /// `capacity` samples.
    ///
    /// Captured audio is played at the output rate without resampling, so a
    /// device running at a different rate will sound pitch-shifted.
    pub fn open_default(capacity: usize) -> Result<(Self, LiveFeed), LabError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| LabError::LiveInput("no default input device".into()))?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".into());

        let config = device
            .default_input_config()
            .map_err(|err| LabError::LiveInput(err.to_string()))?;
        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        let (tx, rx) = RingBuffer::new(capacity);

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config.into(), tx, channels),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config.into(), tx, channels),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config.into(), tx, channels),
            other => {
                return Err(LabError::LiveInput(format!(
                    "unsupported sample format {:?}",
                    other
                )))
            }
        }?;

        stream
            .play()
            .map_err(|err| LabError::LiveInput(err.to_string()))?;
        info!(device = %device_name, sample_rate, channels, "live capture started");

        Ok((
            Self {
                sample_rate,
                device_name,
                _stream: stream,
            },
            LiveFeed::new(rx),
        ))
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut tx: Producer<f32>,
    channels: usize,
) -> Result<cpal::Stream, LabError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let mut overflowed = false;
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let dropped = push_mono(data, channels, &mut tx);
                if dropped > 0 && !overflowed {
                    warn!(dropped, "live capture ring full, dropping input");
                    overflowed = true;
                }
            },
            |err| error!("live capture error: {}", err),
            None,
        )
        .map_err(|err| LabError::LiveInput(err.to_string()))
}

/// Average each interleaved frame to one sample and push it.
///
/// Returns the number of frames dropped because the ring was full.
fn push_mono<T>(data: &[T], channels: usize, tx: &mut Producer<f32>) -> usize
where
    T: Sample,
    f32: FromSample<T>,
{
    let channels = channels.max(1);
    let scale = 1.0 / channels as f32;
    let mut dropped = 0;
    for frame in data.chunks(channels) {
        let sum: f32 = frame.iter().map(|s| s.to_sample::<f32>()).sum();
        if tx.push(sum * scale).is_err() {
            dropped += 1;
        }
    }
    dropped
}
