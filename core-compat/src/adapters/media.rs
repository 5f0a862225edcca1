//! Media adapter
//!
//! Providers report elapsed time as of a capture timestamp. Legacy widgets
//! read a single `elapsed` value, so while playback is running it is
//! extrapolated to the current time.

use super::{AdapterContext, CompatAdapter, Publisher};
use crate::published::LegacySnapshot;
use bridge_traits::{Clock, MediaData, MediaProvider, Namespace, NowPlaying, Subscription};
use chrono::{DateTime, Utc};
use core_runtime::events::UpdateTrigger;
use std::sync::Arc;
use tracing::debug;

pub struct MediaAdapter {
    provider: Option<Arc<MediaProvider>>,
    clock: Arc<dyn Clock>,
    publisher: Publisher,
    _subscription: Option<Subscription>,
}

impl MediaAdapter {
    pub fn new(context: &AdapterContext) -> Self {
        let publisher = Publisher::new(Namespace::Media, context);
        let provider = context.providers.media().cloned();
        let clock = Arc::clone(&context.clock);

        let subscription = match &provider {
            Some(provider) => {
                let publisher = publisher.clone();
                let clock = Arc::clone(&clock);
                Some(provider.observe(Arc::new(move |data: &MediaData| {
                    publisher.publish(to_legacy(data, clock.now()), UpdateTrigger::ProviderChange);
                })))
            }
            None => {
                debug!("No media provider registered");
                None
            }
        };

        Self {
            provider,
            clock,
            publisher,
            _subscription: subscription,
        }
    }
}

impl CompatAdapter for MediaAdapter {
    fn namespace(&self) -> Namespace {
        Namespace::Media
    }

    fn on_first_update(&self) {
        match self.provider.as_ref().and_then(|provider| provider.current()) {
            Some(data) => self.publisher.publish(
                to_legacy(&data, self.clock.now()),
                UpdateTrigger::FirstUpdate,
            ),
            None => self.publisher.skip_first_update(),
        }
    }
}

/// Legacy media fields as of `now`.
pub fn to_legacy(data: &MediaData, now: DateTime<Utc>) -> LegacySnapshot {
    let snapshot = LegacySnapshot::new()
        .with("isPlaying", data.is_playing)
        .with("source", data.source_bundle.clone().unwrap_or_default());

    let Some(item) = &data.now_playing else {
        return snapshot
            .with("title", "")
            .with("artist", "")
            .with("album", "")
            .with("artwork", "")
            .with("duration", 0.0)
            .with("elapsed", 0.0)
            .with("progress", 0.0);
    };

    let elapsed = elapsed_at(item, data.is_playing, now);
    let progress = if item.duration_secs > 0.0 {
        elapsed / item.duration_secs
    } else {
        0.0
    };

    snapshot
        .with("title", item.title.as_str())
        .with("artist", item.artist.as_str())
        .with("album", item.album.as_str())
        .with("artwork", item.artwork_url.clone().unwrap_or_default())
        .with("duration", item.duration_secs)
        .with("elapsed", elapsed)
        .with("progress", progress)
}

/// Elapsed seconds at `now`, clamped to the item's duration when known.
fn elapsed_at(item: &NowPlaying, playing: bool, now: DateTime<Utc>) -> f64 {
    let mut elapsed = item.elapsed_secs;
    if playing {
        let drift = (now - item.captured_at).num_milliseconds() as f64 / 1000.0;
        elapsed += drift.max(0.0);
    }

    if item.duration_secs > 0.0 {
        elapsed.clamp(0.0, item.duration_secs)
    } else {
        elapsed.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::test_support::{context, RecordingHost};
    use bridge_desktop::InMemoryProvider;
    use bridge_traits::ProviderRegistry;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn media(is_playing: bool, elapsed_secs: f64, captured_secs_ago: i64) -> MediaData {
        MediaData {
            is_playing,
            now_playing: Some(NowPlaying {
                title: "Teardrop".to_string(),
                artist: "Massive Attack".to_string(),
                album: "Mezzanine".to_string(),
                artwork_url: None,
                duration_secs: 200.0,
                elapsed_secs,
                captured_at: now() - Duration::seconds(captured_secs_ago),
            }),
            source_bundle: Some("com.apple.Music".to_string()),
        }
    }

    #[test]
    fn test_extrapolates_while_playing() {
        let snapshot = to_legacy(&media(true, 30.0, 10), now());

        assert_eq!(snapshot.get("elapsed"), Some(&json!(40.0)));
        assert_eq!(snapshot.get("progress"), Some(&json!(0.2)));
        assert_eq!(snapshot.get("title"), Some(&json!("Teardrop")));
        assert_eq!(snapshot.get("artwork"), Some(&json!("")));
        assert_eq!(snapshot.get("source"), Some(&json!("com.apple.Music")));
    }

    #[test]
    fn test_paused_elapsed_is_frozen() {
        let snapshot = to_legacy(&media(false, 30.0, 10), now());
        assert_eq!(snapshot.get("elapsed"), Some(&json!(30.0)));
        assert_eq!(snapshot.get("isPlaying"), Some(&json!(false)));
    }

    #[test]
    fn test_elapsed_clamped_to_duration() {
        let snapshot = to_legacy(&media(true, 190.0, 60), now());
        assert_eq!(snapshot.get("elapsed"), Some(&json!(200.0)));
        assert_eq!(snapshot.get("progress"), Some(&json!(1.0)));
    }

    #[test]
    fn test_nothing_loaded() {
        let data = MediaData {
            is_playing: false,
            now_playing: None,
            source_bundle: None,
        };
        let snapshot = to_legacy(&data, now());

        assert_eq!(snapshot.get("title"), Some(&json!("")));
        assert_eq!(snapshot.get("duration"), Some(&json!(0.0)));
        assert_eq!(snapshot.get("progress"), Some(&json!(0.0)));
        assert_eq!(snapshot.get("source"), Some(&json!("")));
    }

    #[test]
    fn test_adapter_uses_injected_clock() {
        let provider = Arc::new(InMemoryProvider::with_data(media(true, 0.0, 5)));
        let host = Arc::new(RecordingHost::default());
        let registry = ProviderRegistry::builder().media(provider.clone()).build();
        let context = context(registry, Arc::clone(&host));

        MediaAdapter::new(&context).on_first_update();

        assert_eq!(host.calls(), vec!["media"]);
        assert_eq!(
            context
                .published
                .get(Namespace::Media)
                .and_then(|s| s.get("elapsed").cloned()),
            Some(json!(5.0))
        );
    }
}
