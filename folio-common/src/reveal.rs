//! Reveal-on-scroll bookkeeping.
//!
//! Visibility is reported as a one-way stream of [`VisibilityEvent`]s; the
//! set of revealed tiles is a fold over that stream and never shrinks.

use futures::channel::mpsc;
use futures::{Stream, StreamExt};
use std::collections::BTreeSet;

use crate::config::GalleryConfig;

/// A tile crossed (or left) the visibility threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityEvent {
    pub index: usize,
    pub became_visible: bool,
}

impl VisibilityEvent {
    pub fn visible(index: usize) -> Self {
        Self {
            index,
            became_visible: true,
        }
    }

    pub fn hidden(index: usize) -> Self {
        Self {
            index,
            became_visible: false,
        }
    }
}

pub type VisibilitySender = mpsc::UnboundedSender<VisibilityEvent>;
pub type VisibilityReceiver = mpsc::UnboundedReceiver<VisibilityEvent>;

pub fn visibility_channel() -> (VisibilitySender, VisibilityReceiver) {
    mpsc::unbounded()
}

/// Indices whose tiles have been revealed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevealSet {
    revealed: BTreeSet<usize>,
    /// Set when visibility tracking is unavailable
    reveal_everything: bool,
}

impl RevealSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Returns true if the tile was newly revealed.
    ///
    /// Leaving the viewport is ignored: reveals are one-way.
    pub fn apply(&mut self, event: VisibilityEvent) -> bool {
        if !event.became_visible {
            return false;
        }
        self.revealed.insert(event.index)
    }

    /// How long to wait before applying `event`, or `None` if it reveals
    /// nothing. Later tiles wait longer under a staggered config.
    pub fn reveal_delay(&self, event: VisibilityEvent, config: &GalleryConfig) -> Option<u64> {
        if !event.became_visible || self.is_revealed(event.index) {
            return None;
        }
        Some(config.reveal_delay_ms(event.index))
    }

    /// Fail open: treat every tile as revealed from now on
    pub fn reveal_all(&mut self) {
        self.reveal_everything = true;
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.reveal_everything || self.revealed.contains(&index)
    }

    /// Number of tiles revealed by visibility events
    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    /// Reduce a whole event stream into a set
    pub async fn fold<S>(events: S) -> Self
    where
        S: Stream<Item = VisibilityEvent>,
    {
        events
            .fold(Self::new(), |mut set, event| async move {
                set.apply(event);
                set
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::stream;

    #[test]
    fn test_reveal_is_one_way() {
        let mut set = RevealSet::new();
        assert!(set.apply(VisibilityEvent::visible(2)));
        assert!(!set.apply(VisibilityEvent::hidden(2)));
        assert!(set.is_revealed(2));
        assert!(!set.is_revealed(1));
    }

    #[test]
    fn test_repeat_visibility_is_not_new() {
        let mut set = RevealSet::new();
        assert!(set.apply(VisibilityEvent::visible(0)));
        assert!(!set.apply(VisibilityEvent::visible(0)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_reveal_delay_staggers_by_index() {
        let set = RevealSet::new();
        let tiles = GalleryConfig::convention_tiles();
        assert_eq!(set.reveal_delay(VisibilityEvent::visible(0), &tiles), Some(0));
        assert_eq!(set.reveal_delay(VisibilityEvent::visible(3), &tiles), Some(300));
        let masonry = GalleryConfig::masonry();
        assert_eq!(set.reveal_delay(VisibilityEvent::visible(3), &masonry), Some(0));
    }

    #[test]
    fn test_no_delay_for_hidden_or_revealed_tiles() {
        let config = GalleryConfig::convention_tiles();
        let mut set = RevealSet::new();
        assert_eq!(set.reveal_delay(VisibilityEvent::hidden(2), &config), None);

        set.apply(VisibilityEvent::visible(2));
        assert_eq!(set.reveal_delay(VisibilityEvent::visible(2), &config), None);

        let mut everything = RevealSet::new();
        everything.reveal_all();
        assert_eq!(everything.reveal_delay(VisibilityEvent::visible(5), &config), None);
    }

    #[test]
    fn test_delayed_reveal_still_lands() {
        let config = GalleryConfig::convention_tiles();
        let mut set = RevealSet::new();
        let event = VisibilityEvent::visible(4);
        assert_eq!(set.reveal_delay(event, &config), Some(400));
        // Tile scrolled out again before the delay elapsed
        assert!(!set.apply(VisibilityEvent::hidden(4)));
        assert!(set.apply(event));
        assert!(set.is_revealed(4));
    }

    #[test]
    fn test_reveal_all_fails_open() {
        let mut set = RevealSet::new();
        set.reveal_all();
        assert!(set.is_revealed(0));
        assert!(set.is_revealed(999));
    }

    #[test]
    fn test_fold_over_stream() {
        let events = stream::iter(vec![
            VisibilityEvent::visible(3),
            VisibilityEvent::hidden(3),
            VisibilityEvent::hidden(1),
            VisibilityEvent::visible(0),
        ]);
        let set = block_on(RevealSet::fold(events));
        assert!(set.is_revealed(0));
        assert!(set.is_revealed(3));
        assert!(!set.is_revealed(1));
    }

    #[test]
    fn test_fold_over_channel() {
        let (tx, rx) = visibility_channel();
        tx.unbounded_send(VisibilityEvent::visible(4)).unwrap();
        tx.unbounded_send(VisibilityEvent::visible(1)).unwrap();
        drop(tx);
        let set = block_on(RevealSet::fold(rx));
        assert_eq!(set.len(), 2);
    }
}
