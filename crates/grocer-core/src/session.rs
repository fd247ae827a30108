//! A buy-list session: the store mirrored into a location fragment.
//!
//! The session moves through three phases:
//!
//! - [`SessionPhase::Uninitialized`]: nothing read yet.
//! - [`SessionPhase::Hydrated`]: the fragment was decoded and seeded the
//!   store. The next sync is the mount sync and does not write.
//! - [`SessionPhase::Synced`]: every sync re-encodes the list into the
//!   fragment.
//!
//! [`ListSession::open`] runs hydration and the mount sync back to back, which
//! is what front-ends want. The individual steps stay public so the ordering
//! can be driven explicitly.

use crate::buy_list::BuyListStore;
use crate::codec::{decode_fragment, encode_fragment, Decoded};
use crate::location::FragmentHost;
use crate::models::Product;
use crate::share::{share_link, Clipboard, ShareOutcome, ShareState};
use crate::toast::{Clock, SystemClock, TimedFlag, Toast, COPIED_DURATION};

/// Lifecycle of the fragment mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Hydrated,
    Synced,
}

/// Buy list bound to a location fragment
#[derive(Debug)]
pub struct ListSession<H: FragmentHost, C: Clock = SystemClock> {
    host: H,
    clock: C,
    store: BuyListStore,
    phase: SessionPhase,
    toast: Toast,
    copied: TimedFlag,
}

impl<H: FragmentHost> ListSession<H> {
    /// Hydrate from `host` and run the mount sync, using the system clock.
    pub fn open(host: H) -> Self {
        Self::open_with_clock(host, SystemClock)
    }
}

impl<H: FragmentHost, C: Clock> ListSession<H, C> {
    #[must_use]
    pub fn new(host: H, clock: C) -> Self {
        Self {
            host,
            clock,
            store: BuyListStore::new(),
            phase: SessionPhase::Uninitialized,
            toast: Toast::default(),
            copied: TimedFlag::new(COPIED_DURATION),
        }
    }

    pub fn open_with_clock(host: H, clock: C) -> Self {
        let mut session = Self::new(host, clock);
        session.hydrate();
        session.sync();
        session
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub const fn store(&self) -> &BuyListStore {
        &self.store
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Decode the fragment and seed the store. Only the first call has any
    /// effect.
    ///
    /// A fragment whose payload cannot be parsed is cleared so the broken
    /// state does not survive a reload.
    pub fn hydrate(&mut self) {
        if self.phase != SessionPhase::Uninitialized {
            tracing::warn!("Buy list already hydrated; ignoring repeated hydration");
            return;
        }

        let fragment = self.host.fragment();
        let items = match decode_fragment(fragment.as_deref()) {
            Ok(Decoded::List { items, rejected }) => {
                if rejected > 0 {
                    tracing::debug!("Dropped {} invalid buy list entries from URL", rejected);
                }
                items
            }
            Ok(Decoded::NotAList) => {
                tracing::debug!("Buy list in URL is not an array; starting empty");
                Vec::new()
            }
            Ok(Decoded::Absent) => Vec::new(),
            Err(error) => {
                tracing::warn!("Failed to parse buy list from URL fragment: {}", error);
                self.host.replace_fragment(None);
                Vec::new()
            }
        };

        self.store = BuyListStore::from_items(items);
        self.phase = SessionPhase::Hydrated;
        tracing::debug!("Hydrated buy list with {} items", self.store.len());
    }

    /// Mirror the store into the fragment, honouring the current phase.
    pub fn sync(&mut self) {
        match self.phase {
            SessionPhase::Uninitialized => {
                tracing::debug!("Ignoring buy list sync before hydration");
            }
            SessionPhase::Hydrated => {
                tracing::debug!("Skipping mount sync of freshly hydrated buy list");
                self.phase = SessionPhase::Synced;
            }
            SessionPhase::Synced => self.persist(),
        }
    }

    fn persist(&mut self) {
        match encode_fragment(self.store.items()) {
            Ok(fragment) => self.host.replace_fragment(fragment.as_deref()),
            Err(error) => {
                tracing::warn!("Failed to update URL fragment with buy list: {}", error);
            }
        }
    }

    /// Add `product` to the list and show the "added" toast. Returns the new
    /// item's id.
    pub fn add(&mut self, product: &Product) -> String {
        let id = self.store.add_at(product, self.clock.now_ms()).id.clone();
        let notice = BuyListStore::added_notice(&product.name);
        self.toast.show(notice, self.clock.now());
        self.sync();
        id
    }

    /// Remove an item; unknown ids leave the list and fragment untouched.
    pub fn remove(&mut self, item_id: &str) -> bool {
        let removed = self.store.remove(item_id);
        if removed {
            self.sync();
        }
        removed
    }

    /// Toggle an item's taken flag; unknown ids are ignored.
    pub fn toggle_taken(&mut self, item_id: &str) -> bool {
        let toggled = self.store.toggle_taken(item_id);
        if toggled {
            self.sync();
        }
        toggled
    }

    /// Currently visible toast message.
    #[must_use]
    pub fn toast_message(&self) -> Option<&str> {
        self.toast.message(self.clock.now())
    }

    #[must_use]
    pub fn share_state(&self) -> ShareState {
        if self.store.is_empty() {
            ShareState::Disabled
        } else if self.copied.is_raised(self.clock.now()) {
            ShareState::Copied
        } else {
            ShareState::Ready
        }
    }

    /// Link to hand to another user, or `None` while the list is empty.
    #[must_use]
    pub fn share_link(&self) -> Option<String> {
        if self.store.is_empty() {
            None
        } else {
            Some(share_link(&self.host))
        }
    }

    /// Copy the share link to `clipboard`.
    ///
    /// Clipboard failures are logged and reported, never propagated.
    pub fn share(&mut self, clipboard: &mut impl Clipboard) -> ShareOutcome {
        if self.share_state() != ShareState::Ready {
            return ShareOutcome::Disabled;
        }
        let Some(link) = self.share_link() else {
            return ShareOutcome::Disabled;
        };

        match clipboard.write_text(&link) {
            Ok(()) => {
                self.copied.raise(self.clock.now());
                ShareOutcome::Copied(link)
            }
            Err(error) => {
                tracing::error!("Failed to copy list URL: {}", error);
                ShareOutcome::Failed(link)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::LIST_MARKER;
    use crate::location::MemoryLocation;
    use crate::models::{BuyListItem, Store};
    use crate::share::ClipboardError;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    /// Location that counts fragment writes.
    #[derive(Debug, Default)]
    struct RecordingHost {
        fragment: Option<String>,
        writes: usize,
    }

    impl RecordingHost {
        fn with_fragment(fragment: &str) -> Self {
            Self {
                fragment: Some(fragment.to_string()),
                writes: 0,
            }
        }
    }

    impl FragmentHost for RecordingHost {
        fn origin(&self) -> String {
            "https://grocer.example".to_string()
        }

        fn fragment(&self) -> Option<String> {
            self.fragment.clone()
        }

        fn replace_fragment(&mut self, fragment: Option<&str>) {
            self.fragment = fragment.map(str::to_string);
            self.writes += 1;
        }
    }

    /// Clock that only moves when told to.
    #[derive(Debug, Clone)]
    struct ManualClock {
        start: Instant,
        offset_ms: Rc<Cell<u64>>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                start: Instant::now(),
                offset_ms: Rc::new(Cell::new(0)),
            }
        }

        fn advance(&self, duration: Duration) {
            let millis = u64::try_from(duration.as_millis()).unwrap();
            self.offset_ms.set(self.offset_ms.get() + millis);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            1_700_000_000_000 + i64::try_from(self.offset_ms.get()).unwrap()
        }

        fn now(&self) -> Instant {
            self.start + Duration::from_millis(self.offset_ms.get())
        }
    }

    #[derive(Debug, Default)]
    struct RecordingClipboard {
        text: Option<String>,
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError("no display".to_string()))
        }
    }

    fn milk() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Milk 2L".to_string(),
            store: Store::Coles,
            price: 3.50,
            quantity: "2L".to_string(),
            discount_amount: 0.0,
        }
    }

    fn coffee() -> Product {
        Product {
            id: "p2".to_string(),
            name: "Instant Coffee 200g".to_string(),
            store: Store::Aldi,
            price: 5.00,
            quantity: "200g".to_string(),
            discount_amount: 1.00,
        }
    }

    fn open_recording(
        host: RecordingHost,
    ) -> (ListSession<RecordingHost, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (ListSession::open_with_clock(host, clock.clone()), clock)
    }

    #[test]
    fn test_phases_advance_hydrate_then_sync() {
        let mut session = ListSession::new(RecordingHost::default(), ManualClock::new());
        assert_eq!(session.phase(), SessionPhase::Uninitialized);

        session.sync();
        assert_eq!(session.phase(), SessionPhase::Uninitialized);

        session.hydrate();
        assert_eq!(session.phase(), SessionPhase::Hydrated);

        session.sync();
        assert_eq!(session.phase(), SessionPhase::Synced);
        assert_eq!(session.host().writes, 0);
    }

    #[test]
    fn test_open_does_not_rewrite_hydrated_fragment() {
        let mut seed = ListSession::open_with_clock(RecordingHost::default(), ManualClock::new());
        seed.add(&milk());
        let fragment = seed.host().fragment.clone().unwrap();

        let (session, _) = open_recording(RecordingHost::with_fragment(&fragment));
        assert_eq!(session.phase(), SessionPhase::Synced);
        assert_eq!(session.store().len(), 1);
        assert_eq!(session.host().writes, 0);
        assert_eq!(session.host().fragment.as_deref(), Some(fragment.as_str()));
    }

    #[test]
    fn test_add_writes_fragment_and_shows_toast() {
        let (mut session, clock) = open_recording(RecordingHost::default());
        let id = session.add(&milk());

        assert_eq!(id, "p1-1700000000000");
        assert!((session.store().total() - 3.50).abs() < 1e-9);
        assert_eq!(session.host().writes, 1);
        assert!(session
            .host()
            .fragment
            .as_deref()
            .unwrap()
            .starts_with(LIST_MARKER));
        assert_eq!(session.toast_message(), Some("'Milk 2L' added to list"));

        clock.advance(Duration::from_secs(3));
        assert_eq!(session.toast_message(), None);
    }

    #[test]
    fn test_taken_discounted_item_zeroes_total() {
        let (mut session, _) = open_recording(RecordingHost::default());
        let id = session.add(&coffee());

        assert!(session.toggle_taken(&id));
        assert!(session.store().total().abs() < 1e-9);
        let item = session.store().get(&id).unwrap();
        assert!(item.is_taken);
        assert!((item.price - 5.00).abs() < 1e-9);

        let reopened = ListSession::open(RecordingHost::with_fragment(
            session.host().fragment.as_deref().unwrap(),
        ));
        assert!(reopened.store().get(&id).unwrap().is_taken);
    }

    #[test]
    fn test_remove_missing_id_leaves_list_and_fragment() {
        let (mut session, clock) = open_recording(RecordingHost::default());
        session.add(&milk());
        clock.advance(Duration::from_millis(1));
        session.add(&coffee());
        let before = session.store().clone();
        let writes = session.host().writes;

        assert!(!session.remove("missing"));
        assert!(!session.toggle_taken("missing"));
        assert_eq!(session.store(), &before);
        assert_eq!(session.host().writes, writes);
    }

    #[test]
    fn test_removing_last_item_clears_fragment_and_disables_share() {
        let (mut session, _) = open_recording(RecordingHost::default());
        let id = session.add(&milk());
        assert_eq!(session.share_state(), ShareState::Ready);

        assert!(session.remove(&id));
        assert_eq!(session.host().fragment, None);
        assert_eq!(session.share_state(), ShareState::Disabled);
        assert_eq!(session.share_link(), None);
        assert_eq!(
            session.share(&mut RecordingClipboard::default()),
            ShareOutcome::Disabled
        );
    }

    #[test]
    fn test_malformed_fragment_starts_empty_and_is_cleared() {
        let (session, _) = open_recording(RecordingHost::with_fragment("list=%5B%7Bbroken"));
        assert!(session.store().is_empty());
        assert_eq!(session.host().fragment, None);
        assert_eq!(session.host().writes, 1);
        assert_eq!(session.phase(), SessionPhase::Synced);
    }

    #[test]
    fn test_bad_percent_encoding_starts_empty_and_is_cleared() {
        let (session, _) = open_recording(RecordingHost::with_fragment("list=%E0%A4%A"));
        assert!(session.store().is_empty());
        assert_eq!(session.host().fragment, None);
    }

    #[test]
    fn test_non_array_payload_starts_empty_without_clearing() {
        let fragment = format!("{LIST_MARKER}{}", urlencoding::encode("{\"a\":1}"));
        let (session, _) = open_recording(RecordingHost::with_fragment(&fragment));
        assert!(session.store().is_empty());
        assert_eq!(session.host().fragment.as_deref(), Some(fragment.as_str()));
    }

    #[test]
    fn test_foreign_fragment_is_left_alone_until_first_change() {
        let (mut session, _) = open_recording(RecordingHost::with_fragment("section-2"));
        assert!(session.store().is_empty());
        assert_eq!(session.host().fragment.as_deref(), Some("section-2"));

        session.add(&milk());
        assert!(session
            .host()
            .fragment
            .as_deref()
            .unwrap()
            .starts_with(LIST_MARKER));
    }

    #[test]
    fn test_round_trip_through_fragment_preserves_items() {
        let (mut session, clock) = open_recording(RecordingHost::default());
        session.add(&milk());
        clock.advance(Duration::from_millis(5));
        let coffee_id = session.add(&coffee());
        session.toggle_taken(&coffee_id);

        let fragment = session.host().fragment.clone().unwrap();
        let (reopened, _) = open_recording(RecordingHost::with_fragment(&fragment));
        assert_eq!(reopened.store().items(), session.store().items());

        let mut reencoded = reopened;
        reencoded.persist();
        assert_eq!(reencoded.host().fragment.as_deref(), Some(fragment.as_str()));
    }

    #[test]
    fn test_hydrate_twice_is_ignored() {
        let item = BuyListItem::from_product("x-1".to_string(), &milk());
        let fragment = format!(
            "{LIST_MARKER}{}",
            urlencoding::encode(&serde_json::to_string(&[item]).unwrap())
        );
        let mut session =
            ListSession::new(RecordingHost::with_fragment(&fragment), ManualClock::new());
        session.hydrate();
        session.sync();
        session.add(&coffee());
        session.hydrate();

        assert_eq!(session.store().len(), 2);
    }

    #[test]
    fn test_share_copies_link_and_flips_to_copied() {
        let host = MemoryLocation::parse("https://grocer.example/app").unwrap();
        let clock = ManualClock::new();
        let mut session = ListSession::open_with_clock(host, clock.clone());
        session.add(&milk());

        let mut clipboard = RecordingClipboard::default();
        let outcome = session.share(&mut clipboard);
        let link = clipboard.text.clone().unwrap();

        assert_eq!(outcome, ShareOutcome::Copied(link.clone()));
        assert!(link.starts_with("https://grocer.example#list="));
        assert_eq!(session.share_state(), ShareState::Copied);
        assert_eq!(session.share(&mut clipboard), ShareOutcome::Disabled);

        clock.advance(Duration::from_secs(2));
        assert_eq!(session.share_state(), ShareState::Ready);
    }

    #[test]
    fn test_share_failure_is_reported_not_raised() {
        let (mut session, _) = open_recording(RecordingHost::default());
        session.add(&milk());

        let outcome = session.share(&mut BrokenClipboard);
        assert!(matches!(outcome, ShareOutcome::Failed(_)));
        assert_eq!(session.share_state(), ShareState::Ready);
    }
}
