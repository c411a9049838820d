//! Combining messages that target the same vertex within one superstep.

use std::{marker::PhantomData, ops::AddAssign};

use num_traits::{Bounded, Zero};

/// A commutative monoid over messages.
///
/// Associativity
///    For all a, b and c, combine(combine(a, b), c) == combine(a, combine(b, c)).
/// Commutativity
///    For all a and b, combine(a, b) == combine(b, a).
/// Identity element
///    combine(zero(), a) == a for every a.
///
/// The engine relies on these laws: messages are reduced in whatever order the
/// senders happen to take the target's lock.
pub trait Combiner<M>: Send + Sync + 'static {
    fn zero() -> M;

    fn combine(acc: &mut M, incoming: M);
}

pub struct MinDef<A> {
    _marker: PhantomData<fn() -> A>,
}

impl<A> Combiner<A> for MinDef<A>
where
    A: Bounded + PartialOrd + 'static,
{
    fn zero() -> A {
        A::max_value()
    }

    fn combine(acc: &mut A, incoming: A) {
        if incoming < *acc {
            *acc = incoming;
        }
    }
}

pub struct MaxDef<A> {
    _marker: PhantomData<fn() -> A>,
}

impl<A> Combiner<A> for MaxDef<A>
where
    A: Bounded + PartialOrd + 'static,
{
    fn zero() -> A {
        A::min_value()
    }

    fn combine(acc: &mut A, incoming: A) {
        if incoming > *acc {
            *acc = incoming;
        }
    }
}

pub struct SumDef<A> {
    _marker: PhantomData<fn() -> A>,
}

impl<A> Combiner<A> for SumDef<A>
where
    A: Zero + AddAssign<A> + 'static,
{
    fn zero() -> A {
        A::zero()
    }

    fn combine(acc: &mut A, incoming: A) {
        *acc += incoming;
    }
}

/// Folds an iterator of messages with `C`, starting from the identity element.
pub fn fold_with<M, C: Combiner<M>>(messages: impl IntoIterator<Item = M>) -> M {
    let mut acc = C::zero();
    for m in messages {
        C::combine(&mut acc, m);
    }
    acc
}
