// Integration tests for the run-state machine and controller

use braintty::loader::program::Program;
use braintty::tape::cells::DEFAULT_TAPE_CELLS;
use braintty::vm::control::{Command, Controller, RunState, transition};
use braintty::vm::engine::{CycleOutcome, Engine};
use braintty::vm::errors::{ControlError, Fault};
use braintty::vm::observer::{EngineObserver, EngineSnapshot, FinishReason, NullObserver};

/// Records the callback sequence for ordering assertions.
#[derive(Default)]
struct RecordingObserver {
    events: Vec<String>,
}

impl EngineObserver for RecordingObserver {
    fn on_start(&mut self) {
        self.events.push("start".to_string());
    }

    fn on_tick(&mut self, snapshot: &EngineSnapshot<'_>) {
        self.events.push(format!("tick@{}", snapshot.executed));
    }

    fn on_finish(&mut self, reason: &FinishReason) {
        self.events.push(format!("finish:{:?}", reason));
    }
}

fn controller_for(source: &str, input: &[u8]) -> Controller {
    let program = Program::load(source).expect("Load failed");
    Controller::new(Engine::new(program, input.to_vec(), DEFAULT_TAPE_CELLS))
}

// === TRANSITION TABLE ===

#[test]
fn test_legal_transitions() {
    assert_eq!(transition(RunState::Stopped, Command::Start), Ok(RunState::Running));
    assert_eq!(transition(RunState::Stopped, Command::Step), Ok(RunState::Paused));
    assert_eq!(transition(RunState::Running, Command::Pause), Ok(RunState::Paused));
    assert_eq!(transition(RunState::Running, Command::Stop), Ok(RunState::Stopped));
    assert_eq!(transition(RunState::Paused, Command::Start), Ok(RunState::Running));
    assert_eq!(transition(RunState::Paused, Command::Step), Ok(RunState::Paused));
    assert_eq!(transition(RunState::Paused, Command::Stop), Ok(RunState::Stopped));
}

#[test]
fn test_illegal_transitions_are_rejected() {
    let illegal = [
        (RunState::Stopped, Command::Pause),
        (RunState::Stopped, Command::Stop),
        (RunState::Running, Command::Start),
        (RunState::Running, Command::Step),
        (RunState::Paused, Command::Pause),
    ];

    for (state, command) in illegal {
        assert_eq!(
            transition(state, command),
            Err(ControlError::InvalidTransition { state, command }),
            "Expected ({:?}, {:?}) to be rejected",
            state,
            command
        );
    }
}

#[test]
fn test_rejected_command_changes_nothing() {
    let mut controller = controller_for("+++", b"");

    let err = controller.pause().expect_err("Pause from stopped should fail");

    assert_eq!(
        err,
        ControlError::InvalidTransition {
            state: RunState::Stopped,
            command: Command::Pause,
        }
    );
    assert_eq!(controller.state(), RunState::Stopped);
    assert_eq!(controller.engine().executed(), 0);
}

// === RUNNING AND OBSERVING ===

#[test]
fn test_run_emits_ordered_callbacks() {
    let mut controller = controller_for("+++", b"");
    let mut observer = RecordingObserver::default();

    controller.start(1, &mut observer).expect("Start failed");
    assert_eq!(controller.state(), RunState::Running);

    while controller.run_tick(&mut observer).is_some() {}

    assert_eq!(controller.state(), RunState::Stopped);
    assert_eq!(
        observer.events,
        vec!["start", "tick@1", "tick@2", "tick@3", "finish:Complete"]
    );

    // Once stopped, the scheduler has nothing to do
    assert!(controller.run_tick(&mut observer).is_none());
    assert_eq!(observer.events.len(), 5);
}

#[test]
fn test_final_tick_precedes_finish() {
    let mut controller = controller_for("+++", b"");
    let mut observer = RecordingObserver::default();

    controller
        .run_to_completion(2, &mut observer)
        .expect("Run failed");

    // The last cycle is observed before the finish notification
    assert_eq!(
        observer.events,
        vec!["start", "tick@2", "tick@3", "finish:Complete"]
    );
}

#[test]
fn test_quantum_does_not_change_results() {
    let mut baseline = controller_for("++>+++++[<+>-]", b"");
    baseline
        .run_to_completion(1, &mut NullObserver)
        .expect("Run failed");

    for quantum in [5, 1000] {
        let mut controller = controller_for("++>+++++[<+>-]", b"");
        controller
            .run_to_completion(quantum, &mut NullObserver)
            .expect("Run failed");

        assert_eq!(controller.engine().executed(), baseline.engine().executed());
        assert_eq!(controller.engine().pc(), baseline.engine().pc());
        assert_eq!(
            controller.engine().tape().get(0),
            baseline.engine().tape().get(0)
        );
        assert_eq!(
            controller.engine().tape().get(1),
            baseline.engine().tape().get(1)
        );
    }

    assert_eq!(baseline.engine().tape().get(0), 7);
    assert_eq!(baseline.engine().tape().get(1), 0);
}

#[test]
fn test_stepping_matches_free_run() {
    let mut stepped = controller_for("++>+++++[<+>-]", b"");
    loop {
        let outcome = stepped.step(&mut NullObserver).expect("Step failed");
        if outcome != CycleOutcome::Continuing {
            break;
        }
    }

    let mut free = controller_for("++>+++++[<+>-]", b"");
    free.run_to_completion(4096, &mut NullObserver)
        .expect("Run failed");

    assert_eq!(stepped.engine().executed(), free.engine().executed());
    assert_eq!(stepped.engine().tape().get(0), free.engine().tape().get(0));
    assert_eq!(stepped.state(), RunState::Stopped);
}

#[test]
fn test_pause_and_resume_preserve_output() {
    let mut straight = controller_for("++++++++[>++++++++<-]>+.+.+.", b"");
    straight
        .run_to_completion(4096, &mut NullObserver)
        .expect("Run failed");
    assert_eq!(straight.engine().output().bytes(), b"ABC");

    let mut interrupted = controller_for("++++++++[>++++++++<-]>+.+.+.", b"");
    interrupted.start(7, &mut NullObserver).expect("Start failed");
    interrupted.run_tick(&mut NullObserver);
    interrupted.run_tick(&mut NullObserver);
    interrupted.pause().expect("Pause failed");
    assert_eq!(interrupted.state(), RunState::Paused);

    // Resuming does not reset; the run picks up where it paused
    interrupted.start(7, &mut NullObserver).expect("Resume failed");
    while interrupted.run_tick(&mut NullObserver).is_some() {}

    assert_eq!(interrupted.state(), RunState::Stopped);
    assert_eq!(interrupted.engine().output().bytes(), b"ABC");
    assert_eq!(interrupted.engine().executed(), straight.engine().executed());
}

#[test]
fn test_step_from_stopped_begins_fresh_run() {
    let mut controller = controller_for("++", b"");
    let mut observer = RecordingObserver::default();

    assert_eq!(
        controller.step(&mut observer).expect("Step failed"),
        CycleOutcome::Continuing
    );
    assert_eq!(controller.state(), RunState::Paused);
    assert_eq!(controller.engine().executed(), 1);

    assert_eq!(
        controller.step(&mut observer).expect("Step failed"),
        CycleOutcome::ProgramComplete
    );
    assert_eq!(controller.state(), RunState::Stopped);

    // A step out of Stopped resets the engine and starts over
    controller.step(&mut observer).expect("Step failed");
    assert_eq!(controller.engine().executed(), 1);
    assert_eq!(
        observer.events,
        vec![
            "start",
            "tick@1",
            "tick@2",
            "finish:Complete",
            "start",
            "tick@1"
        ]
    );
}

// === INPUT STARVATION ===

#[test]
fn test_starved_run_pauses_and_resumes_after_feed() {
    let mut controller = controller_for(",[.,]", b"hi");
    let mut observer = RecordingObserver::default();

    controller.start(4096, &mut observer).expect("Start failed");
    let outcome = controller.run_tick(&mut observer);

    assert_eq!(outcome, Some(CycleOutcome::InputExhausted));
    assert!(controller.state().is_paused());
    assert_eq!(controller.engine().output().bytes(), b"hi");

    // No finish yet; the run is only suspended
    assert_eq!(observer.events, vec!["start", "tick@6"]);

    controller.feed_input(b"!");
    controller.start(4096, &mut observer).expect("Resume failed");
    let outcome = controller.run_tick(&mut observer);

    assert_eq!(outcome, Some(CycleOutcome::InputExhausted));
    assert_eq!(controller.engine().output().bytes(), b"hi!");

    controller.stop(&mut observer).expect("Stop failed");
    assert_eq!(controller.state(), RunState::Stopped);
    assert_eq!(
        observer.events,
        vec!["start", "tick@6", "tick@9", "finish:InputStarved"]
    );
}

#[test]
fn test_step_retries_blocked_read() {
    let mut controller = controller_for(",,", b"A");

    assert_eq!(
        controller.step(&mut NullObserver).expect("Step failed"),
        CycleOutcome::Continuing
    );
    assert_eq!(controller.engine().tape().get(0), b'A');

    // The second read finds nothing and stays put
    assert_eq!(
        controller.step(&mut NullObserver).expect("Step failed"),
        CycleOutcome::InputExhausted
    );
    assert_eq!(controller.state(), RunState::Paused);
    assert_eq!(controller.engine().pc(), 1);

    // Stepping again without a feed blocks again rather than faulting
    assert_eq!(
        controller.step(&mut NullObserver).expect("Step failed"),
        CycleOutcome::InputExhausted
    );
    assert_eq!(controller.engine().pc(), 1);

    controller.feed_input(b"B");
    assert_eq!(
        controller.step(&mut NullObserver).expect("Step failed"),
        CycleOutcome::ProgramComplete
    );
    assert_eq!(controller.engine().tape().get(0), b'B');
    assert_eq!(controller.state(), RunState::Stopped);
}

// === STOPPING ===

#[test]
fn test_stop_mid_run_retains_engine_state() {
    let mut controller = controller_for("+[>+]", b"");
    let mut observer = RecordingObserver::default();

    controller.start(64, &mut observer).expect("Start failed");
    assert_eq!(
        controller.run_tick(&mut observer),
        Some(CycleOutcome::Continuing)
    );

    controller.stop(&mut observer).expect("Stop failed");

    assert_eq!(controller.state(), RunState::Stopped);
    assert_eq!(controller.engine().executed(), 64);
    assert!(controller.engine().mem_ptr() > 0);
    assert_eq!(
        observer.events,
        vec!["start", "tick@64", "finish:Stopped"]
    );
}

#[test]
fn test_fault_stops_the_run() {
    let mut controller = controller_for("+<", b"");
    let mut observer = RecordingObserver::default();

    controller.start(4096, &mut observer).expect("Start failed");
    let outcome = controller.run_tick(&mut observer);

    let fault = match outcome {
        Some(CycleOutcome::Aborted(fault)) => fault,
        other => panic!("Expected an abort, got {:?}", other),
    };
    assert_eq!(fault, Fault::PointerUnderflow { pc: 1 });
    assert_eq!(fault.pc(), 1);
    assert_eq!(controller.state(), RunState::Stopped);

    let expected = format!(
        "finish:{:?}",
        FinishReason::Fault(Fault::PointerUnderflow { pc: 1 })
    );
    assert_eq!(observer.events.last(), Some(&expected));
}

#[test]
fn test_zero_quantum_is_rejected_before_starting() {
    let mut controller = controller_for("+++", b"");
    let mut observer = RecordingObserver::default();

    let err = controller
        .start(0, &mut observer)
        .expect_err("Zero quantum should fail");

    assert_eq!(err, ControlError::ZeroQuantum);
    assert_eq!(controller.state(), RunState::Stopped);
    assert!(observer.events.is_empty(), "No callbacks should have fired");
}
