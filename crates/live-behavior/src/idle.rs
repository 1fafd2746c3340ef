use crate::{Action, Behavior, BehaviorContext, BehaviorResult};

/// A behavior that does nothing and stays registered.
///
/// Used as the inner behavior of [`suspend`](crate::suspend), and handy as a
/// placeholder while an id is reserved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Idle;

impl<E: 'static, A: 'static> Behavior<E, A> for Idle {
    #[inline]
    fn tick(&mut self, _ctx: &mut BehaviorContext<'_, E, A>) -> BehaviorResult<Action<E, A>> {
        Ok(Action::Continue)
    }

    fn label(&self) -> &'static str {
        "idle"
    }
}
