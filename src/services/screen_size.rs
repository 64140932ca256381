//! Viewport tracking and screen-size buckets.
//!
//! Buckets, checked in this order (first match wins):
//!
//! ```text
//! extraLarge  width >= 1070
//! large       771..=1669
//! medium      560..=770
//! small       481..=559
//! mobile      everything else
//! ```
//!
//! Because `extraLarge` is checked first, `large` only ever matches 771..=1069.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ScreenSize {
    ExtraLarge,
    Large,
    Medium,
    Small,
    Mobile,
}

impl ScreenSize {
    pub fn from_width(width: u32) -> Self {
        if width >= 1070 {
            ScreenSize::ExtraLarge
        } else if (771..=1669).contains(&width) {
            ScreenSize::Large
        } else if (560..=770).contains(&width) {
            ScreenSize::Medium
        } else if (481..=559).contains(&width) {
            ScreenSize::Small
        } else {
            ScreenSize::Mobile
        }
    }
}

type ResizeListener = Box<dyn Fn(u32) + Send + Sync>;

/// A visitor's viewport: current width plus resize listeners
#[derive(Clone)]
pub struct Viewport {
    inner: Arc<ViewportInner>,
}

struct ViewportInner {
    width: AtomicU32,
    next_listener: AtomicU64,
    listeners: Mutex<HashMap<u64, ResizeListener>>,
}

impl Viewport {
    pub fn new(width: u32) -> Self {
        Self {
            inner: Arc::new(ViewportInner {
                width: AtomicU32::new(width),
                next_listener: AtomicU64::new(0),
                listeners: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn width(&self) -> u32 {
        self.inner.width.load(Ordering::SeqCst)
    }

    /// Applies a resize and notifies every listener synchronously
    pub fn resize(&self, width: u32) {
        self.inner.width.store(width, Ordering::SeqCst);
        let listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for listener in listeners.values() {
            listener(width);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn add_listener(&self, listener: ResizeListener) -> ListenerHandle {
        let id = self.inner.next_listener.fetch_add(1, Ordering::SeqCst);
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id, listener);
        ListenerHandle {
            viewport: self.clone(),
            id,
        }
    }

    fn remove_listener(&self, id: u64) {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&id);
    }
}

/// Unregisters a resize listener when dropped
struct ListenerHandle {
    viewport: Viewport,
    id: u64,
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.viewport.remove_listener(self.id);
    }
}

/// Tracks the screen-size bucket of a viewport for as long as it lives
pub struct ScreenSizeObserver {
    current: watch::Receiver<ScreenSize>,
    _listener: ListenerHandle,
}

impl ScreenSizeObserver {
    pub fn attach(viewport: &Viewport) -> Self {
        let (tx, rx) = watch::channel(ScreenSize::from_width(viewport.width()));
        let listener = viewport.add_listener(Box::new(move |width| {
            tx.send_if_modified(|size| {
                let next = ScreenSize::from_width(width);
                let changed = *size != next;
                *size = next;
                changed
            });
        }));

        Self {
            current: rx,
            _listener: listener,
        }
    }

    pub fn current(&self) -> ScreenSize {
        *self.current.borrow()
    }

    /// A receiver that is notified whenever the bucket changes
    pub fn subscribe(&self) -> watch::Receiver<ScreenSize> {
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(ScreenSize::from_width(1920), ScreenSize::ExtraLarge);
        assert_eq!(ScreenSize::from_width(1070), ScreenSize::ExtraLarge);
        assert_eq!(ScreenSize::from_width(1069), ScreenSize::Large);
        assert_eq!(ScreenSize::from_width(771), ScreenSize::Large);
        assert_eq!(ScreenSize::from_width(770), ScreenSize::Medium);
        assert_eq!(ScreenSize::from_width(560), ScreenSize::Medium);
        assert_eq!(ScreenSize::from_width(559), ScreenSize::Small);
        assert_eq!(ScreenSize::from_width(481), ScreenSize::Small);
        assert_eq!(ScreenSize::from_width(480), ScreenSize::Mobile);
        assert_eq!(ScreenSize::from_width(0), ScreenSize::Mobile);
    }

    #[test]
    fn test_every_width_has_one_bucket() {
        for width in 0..2500 {
            let expected = match width {
                w if w >= 1070 => ScreenSize::ExtraLarge,
                771..=1069 => ScreenSize::Large,
                560..=770 => ScreenSize::Medium,
                481..=559 => ScreenSize::Small,
                _ => ScreenSize::Mobile,
            };
            assert_eq!(ScreenSize::from_width(width), expected, "width {}", width);
        }
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_string(&ScreenSize::ExtraLarge).unwrap();
        assert_eq!(json, "\"extraLarge\"");
        let json = serde_json::to_string(&ScreenSize::Mobile).unwrap();
        assert_eq!(json, "\"mobile\"");
    }

    #[test]
    fn test_observer_initial_value_and_resize() {
        let viewport = Viewport::new(1280);
        let observer = ScreenSizeObserver::attach(&viewport);
        assert_eq!(observer.current(), ScreenSize::ExtraLarge);

        viewport.resize(600);
        assert_eq!(observer.current(), ScreenSize::Medium);

        viewport.resize(320);
        assert_eq!(observer.current(), ScreenSize::Mobile);
    }

    #[test]
    fn test_drop_unregisters_listener() {
        let viewport = Viewport::new(800);
        let observer = ScreenSizeObserver::attach(&viewport);
        assert_eq!(viewport.listener_count(), 1);

        drop(observer);
        assert_eq!(viewport.listener_count(), 0);
        viewport.resize(300);
    }

    #[tokio::test]
    async fn test_subscribers_see_bucket_changes() {
        let viewport = Viewport::new(1280);
        let observer = ScreenSizeObserver::attach(&viewport);
        let mut rx = observer.subscribe();

        viewport.resize(500);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), ScreenSize::Small);
    }
}
