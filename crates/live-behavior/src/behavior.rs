//! The `Behavior` trait, the main extension point for user code.

use std::marker::PhantomData;

use crate::{Action, BehaviorContext, BehaviorResult};

/// One unit of per-tick entity logic.
///
/// A behavior is stateful: anything it needs to remember across ticks (a
/// countdown, a current speed, a "stop next tick" flag) lives in the
/// implementing type.  The queue calls [`tick`][Self::tick] once per pass
/// while the behavior is registered and not paused.
///
/// # Type parameters
///
/// - `E`: the owner type handed out as `ctx.owner`.
/// - `A`: the per-pass extra argument (`()` for tick queues).
///
/// # Example
///
/// ```rust
/// use live_behavior::{Action, Behavior, BehaviorContext, BehaviorResult};
///
/// struct Counter { left: u32 }
///
/// impl Behavior<u32> for Counter {
///     fn tick(&mut self, ctx: &mut BehaviorContext<'_, u32>) -> BehaviorResult<Action<u32>> {
///         *ctx.owner += 1;
///         self.left -= 1;
///         Ok(if self.left == 0 { Action::Remove } else { Action::Continue })
///     }
/// }
/// ```
pub trait Behavior<E, A = ()>: Send + 'static {
    /// Do one tick's worth of work and report what should happen next.
    ///
    /// Returning `Err` never panics the pass; the queue's
    /// [`FailurePolicy`](live_core::FailurePolicy) decides what happens.
    fn tick(&mut self, ctx: &mut BehaviorContext<'_, E, A>) -> BehaviorResult<Action<E, A>>;

    /// Human-readable name used in logs and introspection.
    fn label(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<E: 'static, A: 'static> Behavior<E, A> for Box<dyn Behavior<E, A>> {
    #[inline]
    fn tick(&mut self, ctx: &mut BehaviorContext<'_, E, A>) -> BehaviorResult<Action<E, A>> {
        (**self).tick(ctx)
    }

    fn label(&self) -> &'static str {
        (**self).label()
    }
}

// ── Closure adapter ───────────────────────────────────────────────────────────

/// A [`Behavior`] backed by a closure.  Build with [`from_fn`].
pub struct FnBehavior<E, A, F> {
    f:       F,
    _marker: PhantomData<fn(&mut E, &A)>,
}

/// Wrap a closure as a behavior.
///
/// State the closure captures by move persists across ticks, which is how
/// per-registration arguments are bound.
pub fn from_fn<E, A, F>(f: F) -> FnBehavior<E, A, F>
where
    F: FnMut(&mut BehaviorContext<'_, E, A>) -> BehaviorResult<Action<E, A>> + Send + 'static,
{
    FnBehavior { f, _marker: PhantomData }
}

impl<E: 'static, A: 'static, F> Behavior<E, A> for FnBehavior<E, A, F>
where
    F: FnMut(&mut BehaviorContext<'_, E, A>) -> BehaviorResult<Action<E, A>> + Send + 'static,
{
    #[inline]
    fn tick(&mut self, ctx: &mut BehaviorContext<'_, E, A>) -> BehaviorResult<Action<E, A>> {
        (self.f)(ctx)
    }

    fn label(&self) -> &'static str {
        "closure"
    }
}
