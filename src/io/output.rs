//! Monitor output on the default playback device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use tracing::{error, info};

use crate::{engine::AudioRenderer, LabError, MAX_BLOCK_SIZE};

/// The default output device and its preferred configuration.
///
/// Opened before the lab is built, since the lab needs the device's sample
/// rate.
pub struct OutputDevice {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
}

impl OutputDevice {
    pub fn open_default() -> Result<Self, LabError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| LabError::Stream("no default output device".into()))?;
        let config = device
            .default_output_config()
            .map_err(|err| LabError::Stream(err.to_string()))?;
        Ok(Self { device, config })
    }

    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate().0 as f32
    }

    pub fn channels(&self) -> usize {
        self.config.channels() as usize
    }

    pub fn name(&self) -> String {
        self.device.name().unwrap_or_else(|_| "unknown".into())
    }

    /// Build and start the output stream, rendering through `renderer`.
    pub fn start(self, renderer: AudioRenderer) -> Result<MonitorStream, LabError> {
        let channels = self.channels();
        let sample_rate = self.sample_rate();
        let config: cpal::StreamConfig = self.config.clone().into();

        let stream = match self.config.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&self.device, &config, renderer, channels),
            cpal::SampleFormat::I16 => build_stream::<i16>(&self.device, &config, renderer, channels),
            cpal::SampleFormat::U16 => build_stream::<u16>(&self.device, &config, renderer, channels),
            other => {
                return Err(LabError::Stream(format!(
                    "unsupported sample format {:?}",
                    other
                )))
            }
        }?;

        stream
            .play()
            .map_err(|err| LabError::Stream(err.to_string()))?;
        info!(device = %self.name(), sample_rate, channels, "monitor output started");

        Ok(MonitorStream {
            sample_rate,
            channels,
            _stream: stream,
        })
    }
}

/// A playing output stream. Playback stops when this is dropped.
pub struct MonitorStream {
    sample_rate: f32,
    channels: usize,
    _stream: cpal::Stream,
}

impl MonitorStream {
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    renderer: AudioRenderer,
    channels: usize,
) -> Result<cpal::Stream, LabError>
where
    T: SizedSample + FromSample<f32>,
{
    let mut scratch = vec![0.0f32; MAX_BLOCK_SIZE * channels.max(1)];
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                // Render in chunks so the scratch buffer never has to grow
                for chunk in data.chunks_mut(scratch.len()) {
                    let block = &mut scratch[..chunk.len()];
                    renderer.render_interleaved(block, channels);
                    for (out, &sample) in chunk.iter_mut().zip(block.iter()) {
                        *out = <T as Sample>::from_sample(sample);
                    }
                }
            },
            |err| error!("monitor output error: {}", err),
            None,
        )
        .map_err(|err| LabError::Stream(err.to_string()))
}
