//! Ambient-audio input adapter: a looping track analysed into byte-range
//! frequency amplitudes for the particle field.

use crate::constants::*;
use crate::core::SharedInputState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct AudioFeed {
    pub ctx: web::AudioContext,
    pub element: web::HtmlAudioElement,
    pub analyser: Option<web::AnalyserNode>,
}

/// Build the ambient playback graph: element -> analyser -> destination.
/// Any failure here degrades to "no audio reactivity" at the caller.
pub fn build_ambient_feed() -> anyhow::Result<AudioFeed> {
    let element = web::HtmlAudioElement::new_with_src(AMBIENT_AUDIO_SRC)
        .map_err(|e| anyhow::anyhow!("audio element: {:?}", e))?;
    element.set_loop(true);
    element.set_volume(DEFAULT_VOLUME);

    let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("audio context: {:?}", e))?;
    let analyser = web::AnalyserNode::new(&ctx).ok();
    if let Some(a) = &analyser {
        a.set_fft_size(ANALYSER_FFT_SIZE);
    }

    match ctx.create_media_element_source(&element) {
        Ok(source) => match &analyser {
            Some(a) => {
                _ = source.connect_with_audio_node(a);
                _ = a.connect_with_audio_node(&ctx.destination());
            }
            None => {
                _ = source.connect_with_audio_node(&ctx.destination());
            }
        },
        Err(e) => log::warn!("media element source: {:?}", e),
    }

    Ok(AudioFeed {
        ctx,
        element,
        analyser,
    })
}

/// Sample the analyser on its own cadence, independent of the frame loop,
/// overwriting the shared amplitude sequence each tick.
pub fn start_sampling(feed: &AudioFeed, shared: Rc<RefCell<SharedInputState>>) {
    let Some(analyser) = feed.analyser.clone() else {
        log::warn!("analyser unavailable; audio reactivity disabled");
        return;
    };
    let mut buf = vec![0u8; analyser.frequency_bin_count() as usize];
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        analyser.get_byte_frequency_data(&mut buf);
        shared.borrow_mut().set_audio(&buf);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        if let Err(e) = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            AUDIO_POLL_MS,
        ) {
            log::warn!("audio sampling interval: {:?}", e);
        }
    }
    closure.forget();
}

/// Toggle ambient playback, resuming a suspended context first. Returns
/// whether the track is playing afterwards.
pub fn toggle_playback(feed: &AudioFeed) -> bool {
    if feed.element.paused() {
        if feed.ctx.state() == web::AudioContextState::Suspended {
            _ = feed.ctx.resume();
        }
        _ = feed.element.play();
        true
    } else {
        _ = feed.element.pause();
        false
    }
}
