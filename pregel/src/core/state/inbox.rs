//! Per-vertex message slots.
//!
//! Every vertex owns two slots of the same [`Inbox`] type: the *current* one,
//! read by the vertex during a superstep, and the *next* one, written by
//! senders under the vertex lock. At the barrier the two are swapped.
//!
//! [`Mailbox`] keeps every message, [`Combined`] folds them on arrival so that
//! at most one value survives per vertex and superstep.

use std::{fmt, marker::PhantomData};

use pregel_api::core::state::agg::Combiner;

/// Vertices are shared across worker threads, so both slots must be `Sync`.
pub trait Inbox<M>: Default + Send + Sync + 'static {
    /// Adds a message. Called with the owning vertex lock held.
    fn deliver(&mut self, msg: M);

    /// Removes and returns one pending message.
    fn next_message(&mut self) -> Option<M>;

    fn has_message(&self) -> bool;

    /// Number of pending messages (at most one for combined delivery).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        !self.has_message()
    }

    /// Drops pending messages, keeping any allocation for reuse.
    fn clear(&mut self);
}

/// Unbounded mailbox, every message is delivered as sent.
pub struct Mailbox<M> {
    messages: Vec<M>,
}

impl<M> Default for Mailbox<M> {
    fn default() -> Self {
        Self { messages: vec![] }
    }
}

impl<M: fmt::Debug> fmt::Debug for Mailbox<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.messages.iter()).finish()
    }
}

impl<M: Send + Sync + 'static> Inbox<M> for Mailbox<M> {
    #[inline]
    fn deliver(&mut self, msg: M) {
        self.messages.push(msg);
    }

    #[inline]
    fn next_message(&mut self) -> Option<M> {
        self.messages.pop()
    }

    fn has_message(&self) -> bool {
        !self.messages.is_empty()
    }

    fn len(&self) -> usize {
        self.messages.len()
    }

    fn clear(&mut self) {
        self.messages.clear();
    }
}

/// Single reducible slot, messages are folded into it with `C` as they arrive.
pub struct Combined<M, C> {
    value: Option<M>,
    _combiner: PhantomData<fn() -> C>,
}

impl<M, C> Default for Combined<M, C> {
    fn default() -> Self {
        Self {
            value: None,
            _combiner: PhantomData,
        }
    }
}

impl<M: fmt::Debug, C> fmt::Debug for Combined<M, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Combined").field(&self.value).finish()
    }
}

impl<M: Send + Sync + 'static, C: Combiner<M>> Inbox<M> for Combined<M, C> {
    #[inline]
    fn deliver(&mut self, msg: M) {
        match &mut self.value {
            Some(acc) => C::combine(acc, msg),
            None => self.value = Some(msg),
        }
    }

    #[inline]
    fn next_message(&mut self) -> Option<M> {
        self.value.take()
    }

    fn has_message(&self) -> bool {
        self.value.is_some()
    }

    fn len(&self) -> usize {
        self.value.is_some() as usize
    }

    fn clear(&mut self) {
        self.value = None;
    }
}

#[cfg(test)]
mod inbox_test {
    use super::*;
    use pregel_api::core::state::agg::{MinDef, SumDef};
    use pretty_assertions::assert_eq;

    #[test]
    fn mailbox_keeps_every_message() {
        let mut mb: Mailbox<u32> = Mailbox::default();
        assert!(mb.is_empty());
        mb.deliver(3);
        mb.deliver(1);
        mb.deliver(3);
        assert_eq!(mb.len(), 3);

        let mut seen = vec![];
        while let Some(m) = mb.next_message() {
            seen.push(m);
        }
        seen.sort();
        assert_eq!(seen, vec![1, 3, 3]);
        assert!(!mb.has_message());
    }

    #[test]
    fn combined_keeps_one_value() {
        let mut slot: Combined<u32, MinDef<u32>> = Combined::default();
        slot.deliver(9);
        slot.deliver(4);
        slot.deliver(7);
        assert_eq!(slot.len(), 1);
        assert_eq!(slot.next_message(), Some(4));
        assert_eq!(slot.next_message(), None);
    }

    #[test]
    fn combined_sum() {
        let mut slot: Combined<u64, SumDef<u64>> = Combined::default();
        for i in 1..=4 {
            slot.deliver(i);
        }
        assert!(slot.has_message());
        assert_eq!(slot.next_message(), Some(10));
    }

    #[test]
    fn clear_drops_pending() {
        let mut mb: Mailbox<u8> = Mailbox::default();
        mb.deliver(1);
        mb.clear();
        assert!(mb.is_empty());

        let mut slot: Combined<u8, MinDef<u8>> = Combined::default();
        slot.deliver(1);
        slot.clear();
        assert_eq!(slot.next_message(), None);
    }

    #[test]
    fn bundled_inboxes_are_sync() {
        fn is_sync<T: Sync>() {}
        fn inbox_is_sync<M, I: Inbox<M>>() {
            is_sync::<I>()
        }
        inbox_is_sync::<u32, Mailbox<u32>>();
        inbox_is_sync::<u32, Combined<u32, MinDef<u32>>>();
        inbox_is_sync::<f64, Combined<f64, SumDef<f64>>>();
    }
}
