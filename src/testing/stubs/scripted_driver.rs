use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::{Result, bail};

use crate::ui::cli::drivers::PromptDriver;

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Bool(bool),
    Text(String),
    Number(u64),
    Pick(usize),
}

/// Replays canned answers in order; fails on a type mismatch or when it
/// runs out, naming the prompt that was asked.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    answers: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedDriver {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::default(),
        }
    }

    /// Titles of every prompt asked so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, title: &str) -> Result<Answer> {
        self.asked.borrow_mut().push(title.to_string());
        match self.answers.borrow_mut().pop_front() {
            Some(a) => Ok(a),
            None => bail!("no scripted answer left for {title:?}"),
        }
    }
}

impl PromptDriver for ScriptedDriver {
    fn ask_bool(&self, title: &str, _help: &str, _default: bool) -> Result<bool> {
        match self.next(title)? {
            Answer::Bool(b) => Ok(b),
            other => bail!("expected bool for {title:?}, script has {other:?}"),
        }
    }

    fn ask_string(&self, title: &str, _help: &str, _default: &str) -> Result<String> {
        match self.next(title)? {
            Answer::Text(s) => Ok(s),
            other => bail!("expected text for {title:?}, script has {other:?}"),
        }
    }

    fn ask_u64(&self, title: &str, _help: &str, _default: u64, _min: Option<u64>) -> Result<u64> {
        match self.next(title)? {
            Answer::Number(n) => Ok(n),
            other => bail!("expected number for {title:?}, script has {other:?}"),
        }
    }

    fn ask_select(&self, title: &str, _help: &str, options: &[String]) -> Result<usize> {
        match self.next(title)? {
            Answer::Pick(i) if i < options.len() => Ok(i),
            other => bail!(
                "expected pick among {} for {title:?}, script has {other:?}",
                options.len()
            ),
        }
    }
}
