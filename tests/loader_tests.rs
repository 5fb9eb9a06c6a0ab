// Integration tests for program loading and the jump table

use braintty::loader::opcode::Opcode;
use braintty::loader::program::{LoadError, Program};

#[test]
fn test_filter_keeps_only_instructions() {
    let program = Program::load("read a byte: , then bump it twice: ++ done").expect("Load failed");

    assert_eq!(program.len(), 3);
    assert_eq!(program.op(0), Some(Opcode::Input));
    assert_eq!(program.op(1), Some(Opcode::Increment));
    assert_eq!(program.op(2), Some(Opcode::Increment));
}

#[test]
fn test_loading_filtered_text_is_idempotent() {
    let program = Program::load("set +[ the cell ]+ and move >> on").expect("Load failed");
    let reloaded = Program::load(&program.to_text()).expect("Reload failed");

    assert_eq!(program, reloaded);
}

#[test]
fn test_comment_only_source_loads_empty() {
    let program = Program::load("no instructions anywhere in this text").expect("Load failed");

    assert!(program.is_empty());
    assert_eq!(program.op(0), None);
}

#[test]
fn test_jump_table_is_symmetric() {
    let program = Program::load("++[>[->+<]<-]>[[]]").expect("Load failed");

    for pc in 0..program.len() {
        match program.op(pc) {
            Some(Opcode::LoopStart) | Some(Opcode::LoopEnd) => {
                let target = program.jump_target(pc).expect("Bracket without a partner");
                assert_eq!(
                    program.jump_target(target),
                    Some(pc),
                    "Jump pairing is not symmetric at instruction {}",
                    pc
                );
            }
            _ => {
                assert_eq!(program.jump_target(pc), None);
            }
        }
    }
}

#[test]
fn test_nested_brackets_pair_innermost_first() {
    let program = Program::load("[[][]]").expect("Load failed");

    assert_eq!(program.jump_target(0), Some(5));
    assert_eq!(program.jump_target(1), Some(2));
    assert_eq!(program.jump_target(3), Some(4));
}

#[test]
fn test_unmatched_close_is_rejected() {
    let err = Program::load("+]").expect_err("Load should fail");

    assert_eq!(
        err,
        LoadError::UnbalancedBrackets {
            position: 1,
            bracket: Opcode::LoopEnd,
        }
    );
}

#[test]
fn test_unmatched_open_is_rejected() {
    let err = Program::load("[[]").expect_err("Load should fail");

    assert_eq!(
        err,
        LoadError::UnbalancedBrackets {
            position: 0,
            bracket: Opcode::LoopStart,
        }
    );
}

#[test]
fn test_error_position_counts_instructions_not_characters() {
    // The ']' is the second instruction even though comment text precedes it
    let source = "first comes a plus + and here it breaks ]";
    let err = Program::load(source).expect_err("Load should fail");

    assert_eq!(
        err,
        LoadError::UnbalancedBrackets {
            position: 1,
            bracket: Opcode::LoopEnd,
        }
    );
}
