//! Offline audio graph probe
//!
//! Renders a fixed oscillator into an offline context and reduces the
//! captured samples to one numeric token. The render is raced against a
//! fixed timeout so the collector resolves the sentinel instead of
//! hanging when the audio stack never completes.

use futures::future::{self, Either};
use futures::pin_mut;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioBuffer, OfflineAudioContext, OscillatorType};

use crate::record::{Signal, AUDIO_NOT_SUPPORTED};

const SAMPLE_RATE: f32 = 44_100.0;
// 100ms capture window
const CAPTURE_FRAMES: u32 = 4_410;
const OSCILLATOR_HZ: f32 = 10_000.0;
// upper bound on the whole probe; offline rendering finishes well inside it
const RENDER_TIMEOUT_MS: u32 = 1_000;

pub async fn collect() -> Signal<String> {
    let render = render_graph();
    let timeout = TimeoutFuture::new(RENDER_TIMEOUT_MS);
    pin_mut!(render, timeout);

    match future::select(render, timeout).await {
        Either::Left((Ok(token), _)) => Signal::Ok(token),
        Either::Left((Err(err), _)) => {
            log::debug!("audio render failed: {:?}", err);
            Signal::Unavailable(AUDIO_NOT_SUPPORTED)
        }
        Either::Right(((), _)) => {
            log::debug!("audio render timed out after {}ms", RENDER_TIMEOUT_MS);
            Signal::Unavailable(AUDIO_NOT_SUPPORTED)
        }
    }
}

async fn render_graph() -> Result<String, JsValue> {
    let ctx = OfflineAudioContext::new_with_number_of_channels_and_length_and_sample_rate(
        1,
        CAPTURE_FRAMES,
        SAMPLE_RATE,
    )?;

    let oscillator = ctx.create_oscillator()?;
    oscillator.set_type(OscillatorType::Triangle);
    oscillator.frequency().set_value(OSCILLATOR_HZ);
    oscillator.connect_with_audio_node(&ctx.destination())?;
    oscillator.start()?;

    let rendered = JsFuture::from(ctx.start_rendering()?).await?;
    let buffer: AudioBuffer = rendered
        .dyn_into()
        .map_err(|_| JsValue::from_str("rendering did not yield an AudioBuffer"))?;

    let samples = buffer.get_channel_data(0)?;
    let sum: f64 = samples.iter().map(|s| s.abs() as f64).sum();
    Ok(format!("{}", sum))
}
