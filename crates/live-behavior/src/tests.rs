//! Unit tests for live-behavior.

use live_core::{BehaviorId, FailurePolicy, ManualClock, PauseStates};

use crate::{
    Action, Behavior, BehaviorContext, BehaviorError, BehaviorQueue, BehaviorResult, Idle,
    Registration, Timed, suspend, timed,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Owner used by most tests: every invocation appends its id.
type Log = Vec<BehaviorId>;

/// Appends its own id to the log on every tick.
struct Recorder;

impl Behavior<Log> for Recorder {
    fn tick(&mut self, ctx: &mut BehaviorContext<'_, Log>) -> BehaviorResult<Action<Log>> {
        let id = ctx.id();
        ctx.owner.push(id);
        Ok(Action::Continue)
    }
}

/// Appends its own id, then unregisters itself.
struct OneShot;

impl Behavior<Log> for OneShot {
    fn tick(&mut self, ctx: &mut BehaviorContext<'_, Log>) -> BehaviorResult<Action<Log>> {
        let id = ctx.id();
        ctx.owner.push(id);
        Ok(Action::Remove)
    }
}

fn pass(queue: &mut BehaviorQueue<Log>, log: &mut Log) {
    queue.run_pass(log, &PauseStates::new(), &()).unwrap();
}

fn count(log: &Log, id: BehaviorId) -> usize {
    log.iter().filter(|&&x| x == id).count()
}

// ── Registration ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod registration_tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let mut queue = BehaviorQueue::<Log>::new();
        let a = queue.register(Recorder);
        let b = queue.register(Recorder);
        assert_ne!(a, b);
        assert!(matches!((a, b), (BehaviorId::Auto(_), BehaviorId::Auto(_))));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn named_id_is_returned_verbatim() {
        let mut queue = BehaviorQueue::<Log>::new();
        let id = queue.register_with(Recorder, Registration::new().id("mouselook"));
        assert_eq!(id, BehaviorId::Named("mouselook"));
        assert!(queue.contains(id));
    }

    #[test]
    fn duplicate_explicit_id_overwrites() {
        let mut queue = BehaviorQueue::<Log>::new();
        queue.register_with(Recorder, Registration::new().id("slot"));
        queue.register_with(Idle, Registration::new().id("slot"));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.lookup(BehaviorId::Named("slot")).unwrap().label(), "idle");

        let mut log = Log::new();
        pass(&mut queue, &mut log);
        assert!(log.is_empty(), "overwritten recorder must not run");
    }

    #[test]
    fn lookup_unknown_is_not_found() {
        let queue = BehaviorQueue::<Log>::new();
        let missing = BehaviorId::Named("ghost");
        assert_eq!(queue.lookup(missing).err(), Some(BehaviorError::NotFound(missing)));
    }

    #[test]
    fn pause_tag_is_stored() {
        let mut queue = BehaviorQueue::<Log>::new();
        let id = queue.register_with(Recorder, Registration::new().pause_when("menu"));
        assert_eq!(queue.pause_tag(id).unwrap().map(|t| t.as_str()), Some("menu"));
        let plain = queue.register(Recorder);
        assert_eq!(queue.pause_tag(plain).unwrap(), None);
    }

    #[test]
    fn closure_captures_state_across_ticks() {
        let mut queue = BehaviorQueue::<u32>::new();
        let mut calls = 0;
        queue.register_fn(move |ctx| {
            calls += 1;
            *ctx.owner = calls * 10;
            Ok(Action::Continue)
        });
        let mut owner = 0;
        for _ in 0..3 {
            queue.run_pass(&mut owner, &PauseStates::new(), &()).unwrap();
        }
        assert_eq!(owner, 30);
    }
}

// ── Removal ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod removal_tests {
    use super::*;

    #[test]
    fn self_removal_is_invoked_exactly_once() {
        let mut queue = BehaviorQueue::<Log>::new();
        let id = queue.register(OneShot);
        let mut log = Log::new();
        for _ in 0..5 {
            pass(&mut queue, &mut log);
        }
        assert_eq!(count(&log, id), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn self_removal_through_context() {
        let mut queue = BehaviorQueue::<Log>::new();
        let id = queue.register_fn(|ctx| {
            let me = ctx.id();
            ctx.owner.push(me);
            ctx.remove(me);
            Ok(Action::Continue)
        });
        let mut log = Log::new();
        pass(&mut queue, &mut log);
        pass(&mut queue, &mut log);
        assert_eq!(count(&log, id), 1);
    }

    #[test]
    fn unregister_outside_a_pass_skips_the_next_pass() {
        let mut queue = BehaviorQueue::<Log>::new();
        let id = queue.register(Recorder);
        queue.unregister(id);

        assert!(queue.is_pending_removal(id));
        assert!(!queue.contains(id));
        assert!(queue.lookup(id).is_err());

        let mut log = Log::new();
        pass(&mut queue, &mut log);
        assert!(log.is_empty());
        assert!(!queue.is_pending_removal(id));
    }

    #[test]
    fn unregister_is_idempotent_and_ignores_unknown_ids() {
        let mut queue = BehaviorQueue::<Log>::new();
        let id = queue.register(Recorder);
        queue.unregister(id);
        queue.unregister(id);
        queue.unregister(BehaviorId::Named("never-registered"));

        let mut log = Log::new();
        let stats = queue.run_pass(&mut log, &PauseStates::new(), &()).unwrap();
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.invoked, 0);
    }

    #[test]
    fn removing_a_peer_never_invokes_it_afterwards() {
        let mut queue = BehaviorQueue::<Log>::new();
        let victim = queue.register_with(Recorder, Registration::new().id("victim"));
        queue.register_fn(move |ctx| {
            ctx.remove(victim);
            Ok(Action::Continue)
        });

        let mut log = Log::new();
        pass(&mut queue, &mut log);
        // Iteration order is unspecified: the victim may have run before its
        // killer, but at most once.
        assert!(count(&log, victim) <= 1);

        log.clear();
        pass(&mut queue, &mut log);
        pass(&mut queue, &mut log);
        assert_eq!(count(&log, victim), 0);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn reregistering_a_pending_id_revives_it() {
        let mut queue = BehaviorQueue::<Log>::new();
        let id = queue.register_with(Idle, Registration::new().id("again"));
        queue.unregister(id);
        queue.register_with(Recorder, Registration::new().id("again"));

        let mut log = Log::new();
        pass(&mut queue, &mut log);
        assert_eq!(count(&log, id), 1);
        assert!(queue.contains(id));
    }
}

// ── Additions and replacement ─────────────────────────────────────────────────

#[cfg(test)]
mod mutation_tests {
    use super::*;

    #[test]
    fn actions_debug_print_the_replacement_label() {
        assert_eq!(format!("{:?}", Action::<Log>::Remove), "Remove");
        assert_eq!(format!("{:?}", Action::<Log>::replace(Idle)), r#"Replace("idle")"#);
        assert!(Action::<Log>::Continue.is_continue());
    }

    #[test]
    fn spawned_behavior_first_runs_next_pass() {
        let mut queue = BehaviorQueue::<Log>::new();
        let mut spawned = None;
        let spawner = queue.register_fn(move |ctx| {
            if spawned.is_none() {
                spawned = Some(ctx.spawn(Recorder));
            }
            Ok(Action::Continue)
        });

        let mut log = Log::new();
        let stats = queue.run_pass(&mut log, &PauseStates::new(), &()).unwrap();
        assert!(log.is_empty());
        assert_eq!(stats.added, 1);
        assert_eq!(queue.len(), 2);

        pass(&mut queue, &mut log);
        assert_eq!(log.len(), 1);
        assert_ne!(log[0], spawner);
    }

    #[test]
    fn replace_keeps_id_and_pause_tag() {
        let mut queue = BehaviorQueue::<Log>::new();
        let id = queue.register_with(
            from_fn_replace_with_recorder(),
            Registration::new().id("phase").pause_when("menu"),
        );

        let mut log = Log::new();
        let stats = queue.run_pass(&mut log, &PauseStates::new(), &()).unwrap();
        assert_eq!(stats.replaced, 1);
        assert!(log.is_empty(), "replacement must not run in the same pass");

        pass(&mut queue, &mut log);
        assert_eq!(log, vec![id]);
        assert_eq!(queue.pause_tag(id).unwrap().map(|t| t.as_str()), Some("menu"));

        let paused: PauseStates = ["menu"].into_iter().collect();
        queue.run_pass(&mut log, &paused, &()).unwrap();
        assert_eq!(log, vec![id]);
    }

    fn from_fn_replace_with_recorder() -> impl Behavior<Log> {
        crate::from_fn(|_ctx: &mut BehaviorContext<'_, Log>| Ok(Action::replace(Recorder)))
    }

    #[test]
    fn removal_wins_over_replacement() {
        let mut queue = BehaviorQueue::<Log>::new();
        let id = queue.register_fn(|ctx| {
            let me = ctx.id();
            ctx.remove(me);
            Ok(Action::replace(Recorder))
        });

        let mut log = Log::new();
        pass(&mut queue, &mut log);
        pass(&mut queue, &mut log);
        assert!(log.is_empty());
        assert!(!queue.contains(id));
    }

    #[test]
    fn removing_a_spawn_in_the_same_pass_cancels_it() {
        let mut queue = BehaviorQueue::<Log>::new();
        queue.register_fn(|ctx| {
            let child = ctx.spawn(Recorder);
            ctx.remove(child);
            Ok(Action::Remove)
        });

        let mut log = Log::new();
        pass(&mut queue, &mut log);
        pass(&mut queue, &mut log);
        assert!(log.is_empty());
        assert!(queue.is_empty());
    }
}

// ── Pausing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pause_tests {
    use super::*;

    type Trace = Vec<(BehaviorId, u32)>;

    /// Writes an internal counter into the owner so resumption is observable.
    struct Step(u32);

    impl Behavior<Trace> for Step {
        fn tick(&mut self, ctx: &mut BehaviorContext<'_, Trace>) -> BehaviorResult<Action<Trace>> {
            self.0 += 1;
            let id = ctx.id();
            ctx.owner.push((id, self.0));
            Ok(Action::Continue)
        }
    }

    #[test]
    fn matching_tag_is_skipped_others_run() {
        let mut queue = BehaviorQueue::<Trace>::new();
        let x = queue.register_with(Step(0), Registration::new().pause_when("X"));
        let y = queue.register_with(Step(0), Registration::new().pause_when("Y"));
        let free = queue.register(Step(0));

        let paused: PauseStates = ["X"].into_iter().collect();
        let mut log = Vec::new();
        for _ in 0..3 {
            let stats = queue.run_pass(&mut log, &paused, &()).unwrap();
            assert_eq!(stats.paused, 1);
            assert_eq!(stats.invoked, 2);
        }
        assert!(log.iter().all(|(id, _)| *id != x));
        assert_eq!(log.iter().filter(|(id, _)| *id == y).count(), 3);
        assert_eq!(log.iter().filter(|(id, _)| *id == free).count(), 3);
    }

    #[test]
    fn paused_behavior_resumes_from_its_state() {
        let mut queue = BehaviorQueue::<Trace>::new();
        let x = queue.register_with(Step(0), Registration::new().pause_when("X"));
        let mut pause = PauseStates::new();
        let mut log = Vec::new();

        queue.run_pass(&mut log, &pause, &()).unwrap();
        queue.run_pass(&mut log, &pause, &()).unwrap();

        pause.push("X");
        for _ in 0..4 {
            queue.run_pass(&mut log, &pause, &()).unwrap();
        }

        pause.remove("X");
        queue.run_pass(&mut log, &pause, &()).unwrap();
        assert_eq!(log, vec![(x, 1), (x, 2), (x, 3)]);
    }

    #[test]
    fn untagged_behaviors_ignore_pauses() {
        let mut queue = BehaviorQueue::<Log>::new();
        let id = queue.register(Recorder);
        let paused: PauseStates = ["X", "Y", "menu"].into_iter().collect();
        let mut log = Log::new();
        queue.run_pass(&mut log, &paused, &()).unwrap();
        assert_eq!(log, vec![id]);
    }
}

// ── Failure policy ────────────────────────────────────────────────────────────

#[cfg(test)]
mod failure_tests {
    use super::*;

    fn failing() -> impl Behavior<Log> {
        crate::from_fn(|ctx: &mut BehaviorContext<'_, Log>| {
            let id = ctx.id();
            ctx.owner.push(id);
            Err(BehaviorError::failed(id, "boom"))
        })
    }

    #[test]
    fn isolate_keeps_the_behavior() {
        let mut queue = BehaviorQueue::<Log>::with_policy(FailurePolicy::Isolate);
        let id = queue.register(failing());
        let mut log = Log::new();
        let stats = queue.run_pass(&mut log, &PauseStates::new(), &()).unwrap();
        assert_eq!(stats.failed, 1);
        pass(&mut queue, &mut log);
        assert_eq!(count(&log, id), 2);
    }

    #[test]
    fn evict_removes_the_behavior() {
        let mut queue = BehaviorQueue::<Log>::with_policy(FailurePolicy::Evict);
        let id = queue.register(failing());
        let survivor = queue.register(Recorder);
        let mut log = Log::new();
        pass(&mut queue, &mut log);
        pass(&mut queue, &mut log);
        assert_eq!(count(&log, id), 1);
        assert_eq!(count(&log, survivor), 2);
    }

    #[test]
    fn abort_returns_the_error_after_applying_changes() {
        let mut queue = BehaviorQueue::<Log>::with_policy(FailurePolicy::Abort);
        let id = queue.register_fn(|ctx| {
            let me = ctx.id();
            ctx.spawn(Idle);
            Err(BehaviorError::failed(me, "boom"))
        });
        let mut log = Log::new();
        let err = queue.run_pass(&mut log, &PauseStates::new(), &()).unwrap_err();
        assert!(matches!(err, BehaviorError::Failed { id: failed, .. } if failed == id));
        assert_eq!(queue.len(), 2, "spawned behavior is still applied");
    }
}

// ── Timed / suspend ───────────────────────────────────────────────────────────

#[cfg(test)]
mod timed_tests {
    use super::*;

    #[test]
    fn delegates_until_expiry_then_removes() {
        let clock = ManualClock::new();
        let mut queue = BehaviorQueue::<Log>::new();
        let inner_calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let seen = inner_calls.clone();
        let id = queue.register(timed(
            crate::from_fn(move |_ctx: &mut BehaviorContext<'_, Log>| {
                seen.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                Ok(Action::Continue)
            }),
            2.0,
            &clock.shared(),
        ));

        let mut log = Log::new();
        pass(&mut queue, &mut log); // t = 0
        clock.advance(1.0);
        pass(&mut queue, &mut log); // t = 1
        assert_eq!(inner_calls.load(std::sync::atomic::Ordering::Relaxed), 2);
        assert!(queue.contains(id));

        clock.advance(1.0);
        pass(&mut queue, &mut log); // t = 2: expired
        assert_eq!(inner_calls.load(std::sync::atomic::Ordering::Relaxed), 2);
        assert!(!queue.contains(id));
    }

    #[test]
    fn switches_to_followup_under_the_same_id() {
        let clock = ManualClock::new();
        let mut queue = BehaviorQueue::<Log>::new();
        let id = queue.register_with(
            timed(Idle, 2.0, &clock.shared()).then(Recorder),
            Registration::new().id("wobble"),
        );

        let mut log = Log::new();
        pass(&mut queue, &mut log);
        clock.advance(2.0);
        let stats = queue.run_pass(&mut log, &PauseStates::new(), &()).unwrap();
        assert_eq!(stats.replaced, 1);
        assert!(log.is_empty());

        pass(&mut queue, &mut log);
        assert_eq!(log, vec![id]);
    }

    #[test]
    fn countdown_starts_at_construction() {
        let clock = ManualClock::new();
        let shared = clock.shared();
        let wrapper: Timed<Log> = timed(Recorder, 1.0, &shared);
        clock.advance(5.0);
        assert_eq!(wrapper.remaining(), 0.0);

        let mut queue = BehaviorQueue::<Log>::new();
        queue.register(wrapper);
        let mut log = Log::new();
        pass(&mut queue, &mut log);
        assert!(log.is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn suspend_waits_then_hands_over() {
        let clock = ManualClock::new();
        let mut queue = BehaviorQueue::<Log>::new();
        let id = queue.register(suspend(0.5, &clock.shared()).then(OneShot));

        let mut log = Log::new();
        for _ in 0..3 {
            pass(&mut queue, &mut log);
            clock.advance(0.1);
        }
        assert!(log.is_empty());

        clock.advance(0.5);
        pass(&mut queue, &mut log); // swap in OneShot
        pass(&mut queue, &mut log); // OneShot runs and removes itself
        pass(&mut queue, &mut log);
        assert_eq!(log, vec![id]);
        assert!(queue.is_empty());
    }

    #[test]
    fn suspend_without_followup_removes_itself() {
        let clock = ManualClock::new();
        let mut queue = BehaviorQueue::<Log>::new();
        queue.register(suspend(1.0, &clock.shared()));
        let mut log = Log::new();
        pass(&mut queue, &mut log);
        assert_eq!(queue.len(), 1);
        clock.advance(1.5);
        pass(&mut queue, &mut log);
        assert!(queue.is_empty());
    }

    #[test]
    fn inner_replace_keeps_the_countdown() {
        let clock = ManualClock::new();
        let mut queue = BehaviorQueue::<Log>::new();
        let inner = crate::from_fn(|_ctx: &mut BehaviorContext<'_, Log>| Ok(Action::replace(Recorder)));
        let id = queue.register(timed(inner, 1.0, &clock.shared()));

        let mut log = Log::new();
        pass(&mut queue, &mut log);
        pass(&mut queue, &mut log);
        assert_eq!(log, vec![id]);
        assert_eq!(queue.lookup(id).unwrap().label(), "timed");

        clock.advance(1.0);
        pass(&mut queue, &mut log);
        assert!(queue.is_empty());
    }

    #[test]
    fn works_on_a_queue_with_extra_arguments() {
        let clock = ManualClock::new();
        let mut queue = BehaviorQueue::<Vec<u32>, u32>::new();
        queue.register(timed(
            crate::from_fn(|ctx: &mut BehaviorContext<'_, Vec<u32>, u32>| {
                let other = *ctx.args;
                ctx.owner.push(other);
                Ok(Action::Continue)
            }),
            1.0,
            &clock.shared(),
        ));

        let mut touched = Vec::new();
        queue.run_pass(&mut touched, &PauseStates::new(), &7).unwrap();
        queue.run_pass(&mut touched, &PauseStates::new(), &9).unwrap();
        clock.advance(1.0);
        queue.run_pass(&mut touched, &PauseStates::new(), &11).unwrap();
        assert_eq!(touched, vec![7, 9]);
        assert!(queue.is_empty());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[derive(Clone, Debug)]
    enum Op {
        Register,
        Unregister(prop::sample::Index),
        Pass,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            2 => Just(Op::Register),
            1 => any::<prop::sample::Index>().prop_map(Op::Unregister),
            2 => Just(Op::Pass),
        ]
    }

    proptest! {
        #[test]
        fn unregistered_entries_never_run_again(ops in prop::collection::vec(op(), 1..80)) {
            let mut queue = BehaviorQueue::<Log>::new();
            let mut registered = Vec::new();
            let mut dead = HashSet::new();

            for op in ops {
                match op {
                    Op::Register => registered.push(queue.register(Recorder)),
                    Op::Unregister(idx) => {
                        if !registered.is_empty() {
                            let id = registered[idx.index(registered.len())];
                            queue.unregister(id);
                            dead.insert(id);
                        }
                    }
                    Op::Pass => {
                        let mut log = Log::new();
                        pass(&mut queue, &mut log);
                        for id in &log {
                            prop_assert!(!dead.contains(id), "{id} ran after unregister");
                        }
                        for id in registered.iter().filter(|id| !dead.contains(id)) {
                            prop_assert_eq!(count(&log, *id), 1);
                        }
                    }
                }
            }
        }
    }
}
