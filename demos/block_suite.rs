// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A test program written as one block of test code. Exits 0.

use verdict::{check_eq, check_fail, check_throws_matching, TestResult};

#[derive(Debug)]
enum Command {
    Push(i64),
    Pop,
}

#[derive(Debug, PartialEq)]
enum StackError {
    Underflow,
    UnknownCommand(String),
}

fn parse(line: &str) -> Result<Command, StackError> {
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
        (Some("push"), Some(n)) => n
            .parse()
            .map(Command::Push)
            .map_err(|_| StackError::UnknownCommand(line.to_string())),
        (Some("pop"), None) => Ok(Command::Pop),
        _ => Err(StackError::UnknownCommand(line.to_string())),
    }
}

fn apply(stack: &mut Vec<i64>, command: Command) -> Result<(), StackError> {
    match command {
        Command::Push(n) => stack.push(n),
        Command::Pop => {
            stack.pop().ok_or(StackError::Underflow)?;
        }
    }
    Ok(())
}

#[verdict::main("block demo")]
fn stack_machine() -> TestResult {
    let mut stack = Vec::new();
    for line in ["push 1", "push 2", "pop"] {
        let command = match parse(line) {
            Ok(command) => command,
            Err(e) => check_fail!("could not parse {:?}: {:?}", line, e),
        };
        if let Err(e) = apply(&mut stack, command) {
            check_fail!("{:?} failed: {:?}", line, e);
        }
    }
    check_eq!(stack, [1]);

    check_throws_matching!(parse("jump"), StackError::UnknownCommand(_));
    check_throws_matching!(apply(&mut Vec::new(), Command::Pop), StackError::Underflow);
    Ok(())
}
