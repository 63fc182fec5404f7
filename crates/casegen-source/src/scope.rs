//! Flow-local override slots
//!
//! Each [`DataSource`](crate::DataSource) owns one override slot per logical
//! call flow. Two stores back the slot:
//! - a thread-local stack per source for synchronous scopes, which only
//!   exist for the duration of a closure and never span a suspension point
//! - a tokio task-local snapshot for asynchronous scopes, which follows the
//!   future across awaits and worker threads and is invisible to other tasks
//!
//! Every entry carries a global sequence number; the most recently entered
//! scope visible in the current flow wins. Nested scopes therefore strictly
//! nest regardless of which store they live in.

use casegen_model::ArgsCode;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::future::Future;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_SEQ: AtomicU64 = AtomicU64::new(1);

/// Process-unique data source identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(u64);

impl SourceId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value
    #[inline]
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "source-{}", self.0)
    }
}

/// One active override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) args_code: ArgsCode,
    seq: u64,
}

impl Frame {
    fn new(args_code: ArgsCode) -> Self {
        Self {
            args_code,
            seq: NEXT_SEQ.fetch_add(1, Ordering::Relaxed),
        }
    }

    fn newest(a: Option<Self>, b: Option<Self>) -> Option<Self> {
        match (a, b) {
            (Some(a), Some(b)) => Some(if a.seq > b.seq { a } else { b }),
            (a, b) => a.or(b),
        }
    }
}

type Slots = im::HashMap<SourceId, Frame>;

thread_local! {
    static SYNC_SLOTS: RefCell<HashMap<SourceId, Vec<Frame>>> = RefCell::new(HashMap::new());
}

tokio::task_local! {
    static TASK_SLOTS: Slots;
}

/// Innermost override for `source` visible in the current flow
pub(crate) fn active_frame(source: SourceId) -> Option<Frame> {
    let sync = SYNC_SLOTS
        .try_with(|slots| slots.borrow().get(&source).and_then(|stack| stack.last().copied()))
        .ok()
        .flatten();
    let task = TASK_SLOTS
        .try_with(|slots| slots.get(&source).copied())
        .ok()
        .flatten();
    Frame::newest(sync, task)
}

/// Run `future` with `args_code` active for `source`
pub(crate) async fn scope_async<F: Future>(
    source: SourceId,
    args_code: ArgsCode,
    future: F,
) -> F::Output {
    let snapshot = OverrideSnapshot::capture().with_frame(source, Frame::new(args_code));
    tracing::debug!(%source, %args_code, "entered async args code override");
    let output = snapshot.scope(future).await;
    tracing::debug!(%source, "left async args code override");
    output
}

/// Synchronous override scope
///
/// While alive, the owning source reports the override's args code on this
/// thread. Dropping the guard, or calling [`restore`](Self::restore), removes
/// exactly this guard's frame; the newest remaining frame, if any, becomes
/// active again.
///
/// Only handed out for the duration of a closure by
/// [`DataSource::run_with_override`](crate::DataSource::run_with_override).
#[must_use = "the override ends as soon as the guard is dropped"]
#[derive(Debug)]
pub(crate) struct OverrideGuard {
    source: SourceId,
    frame: Frame,
    restored: bool,
    // bound to the thread whose slot it modified
    _not_send: PhantomData<Rc<()>>,
}

impl OverrideGuard {
    pub(crate) fn enter(source: SourceId, args_code: ArgsCode) -> Self {
        let frame = Frame::new(args_code);
        SYNC_SLOTS.with(|slots| slots.borrow_mut().entry(source).or_default().push(frame));
        tracing::debug!(%source, %args_code, "entered args code override");
        Self {
            source,
            frame,
            restored: false,
            _not_send: PhantomData,
        }
    }

    /// Remove this guard's frame
    ///
    /// Idempotent: later calls, including the one from `Drop`, do nothing.
    pub(crate) fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        let source = self.source;
        let seq = self.frame.seq;
        // slot may already be gone during thread teardown
        let _ = SYNC_SLOTS.try_with(|slots| {
            let mut slots = slots.borrow_mut();
            if let Some(stack) = slots.get_mut(&source) {
                stack.retain(|frame| frame.seq != seq);
                if stack.is_empty() {
                    slots.remove(&source);
                }
            }
        });
        tracing::debug!(
            %source,
            args_code = %self.frame.args_code,
            "restored args code override"
        );
    }
}

impl Drop for OverrideGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Overrides active in the current flow, captured for another task
///
/// Task-local state does not cross `tokio::spawn`. Capture a snapshot before
/// spawning and wrap the spawned future with [`scope`](Self::scope) to carry
/// the active overrides into the child task.
///
/// # Example
/// ```
/// use casegen_model::ArgsCode;
/// use casegen_source::{DataSource, OverrideSnapshot};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = Arc::new(DataSource::new(ArgsCode::Instance));
/// let snapshot =
///     source.run_with_override(|_| OverrideSnapshot::capture(), Some(ArgsCode::Properties));
///
/// let child = Arc::clone(&source);
/// let seen = tokio::spawn(snapshot.scope(async move { child.args_code() }))
///     .await
///     .unwrap();
/// assert_eq!(seen, ArgsCode::Properties);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct OverrideSnapshot {
    slots: Slots,
}

impl OverrideSnapshot {
    /// Capture the overrides visible right now
    #[must_use]
    pub fn capture() -> Self {
        let mut slots = TASK_SLOTS
            .try_with(|slots| slots.clone())
            .unwrap_or_default();
        let _ = SYNC_SLOTS.try_with(|sync| {
            for (source, stack) in sync.borrow().iter() {
                let Some(frame) = stack.last().copied() else {
                    continue;
                };
                if Frame::newest(Some(frame), slots.get(source).copied()) == Some(frame) {
                    slots.insert(*source, frame);
                }
            }
        });
        Self { slots }
    }

    /// Number of overridden sources
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no source is overridden
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Args code captured for `source`
    #[must_use]
    pub fn args_code(&self, source: SourceId) -> Option<ArgsCode> {
        self.slots.get(&source).map(|frame| frame.args_code)
    }

    fn with_frame(mut self, source: SourceId, frame: Frame) -> Self {
        self.slots.insert(source, frame);
        self
    }

    /// Run `future` with these overrides active
    pub async fn scope<F: Future>(self, future: F) -> F::Output {
        TASK_SLOTS.scope(self.slots, future).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_ids_are_unique() {
        let a = SourceId::next();
        let b = SourceId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn guard_sets_and_clears_slot() {
        let source = SourceId::next();
        assert!(active_frame(source).is_none());
        {
            let _guard = OverrideGuard::enter(source, ArgsCode::Properties);
            assert_eq!(
                active_frame(source).map(|f| f.args_code),
                Some(ArgsCode::Properties)
            );
        }
        assert!(active_frame(source).is_none());
    }

    #[test]
    fn restore_is_idempotent() {
        let source = SourceId::next();
        let _outer = OverrideGuard::enter(source, ArgsCode::Instance);
        let mut inner = OverrideGuard::enter(source, ArgsCode::Properties);

        inner.restore();
        inner.restore();
        assert!(inner.restored);
        assert_eq!(
            active_frame(source).map(|f| f.args_code),
            Some(ArgsCode::Instance)
        );
        drop(inner);
        assert_eq!(
            active_frame(source).map(|f| f.args_code),
            Some(ArgsCode::Instance)
        );
    }

    #[test]
    fn out_of_order_release_leaves_no_stale_frame() {
        let source = SourceId::next();
        let outer = OverrideGuard::enter(source, ArgsCode::Properties);
        let inner = OverrideGuard::enter(source, ArgsCode::Instance);

        drop(outer);
        assert_eq!(
            active_frame(source).map(|f| f.args_code),
            Some(ArgsCode::Instance)
        );
        drop(inner);
        assert!(active_frame(source).is_none());
        assert!(SYNC_SLOTS.with(|slots| !slots.borrow().contains_key(&source)));
    }

    #[test]
    fn release_of_middle_frame_keeps_top_active() {
        let source = SourceId::next();
        let bottom = OverrideGuard::enter(source, ArgsCode::Instance);
        let middle = OverrideGuard::enter(source, ArgsCode::Instance);
        let top = OverrideGuard::enter(source, ArgsCode::Properties);

        drop(middle);
        assert_eq!(
            active_frame(source).map(|f| f.args_code),
            Some(ArgsCode::Properties)
        );
        drop(top);
        assert_eq!(
            active_frame(source).map(|f| f.args_code),
            Some(ArgsCode::Instance)
        );
        drop(bottom);
        assert!(active_frame(source).is_none());
    }

    #[test]
    fn newest_frame_wins() {
        let older = Frame::new(ArgsCode::Instance);
        let newer = Frame::new(ArgsCode::Properties);
        assert_eq!(Frame::newest(Some(older), Some(newer)), Some(newer));
        assert_eq!(Frame::newest(Some(newer), Some(older)), Some(newer));
        assert_eq!(Frame::newest(None, Some(older)), Some(older));
        assert_eq!(Frame::newest(None, None), None);
    }

    #[test]
    fn snapshot_captures_sync_overrides() {
        let source = SourceId::next();
        assert!(OverrideSnapshot::capture().args_code(source).is_none());

        let _guard = OverrideGuard::enter(source, ArgsCode::Properties);
        let snapshot = OverrideSnapshot::capture();
        assert_eq!(snapshot.args_code(source), Some(ArgsCode::Properties));
        assert!(!snapshot.is_empty());
    }
}
