#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};

use gitstamp_core::{
    ArtifactSinkPort, ClockPort, CommandOutput, CommandPort, LiveProvenance, PortError,
    ProvenanceEntry, ResourceStorePort,
};

/// Answers git invocations from a table keyed by the joined argument list.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, (Option<i32>, String, String)>,
    calls: Cell<usize>,
}

impl ScriptedRunner {
    pub fn respond(mut self, args: &str, code: i32, stdout: &str, stderr: &str) -> Self {
        self.responses.insert(
            args.to_owned(),
            (Some(code), stdout.to_owned(), stderr.to_owned()),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl CommandPort for ScriptedRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        _working_dir: &Path,
    ) -> Result<CommandOutput, PortError> {
        self.calls.set(self.calls.get() + 1);
        match self.responses.get(&args.join(" ")) {
            Some((code, stdout, stderr)) => Ok(CommandOutput::from_raw(
                *code,
                stdout.clone(),
                stderr.clone(),
            )),
            None => Err(PortError::Spawn {
                program: program.to_owned(),
                message: "No such file or directory (os error 2)".to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TestClock(pub DateTime<Utc>);

impl Default for TestClock {
    fn default() -> Self {
        Self(
            Utc.with_ymd_and_hms(2026, 3, 7, 9, 5, 2)
                .single()
                .expect("valid test instant"),
        )
    }
}

impl ClockPort for TestClock {
    fn now_utc(&self) -> Result<DateTime<Utc>, PortError> {
        Ok(self.0)
    }
}

pub const HEAD: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678";

pub fn clean_repo() -> ScriptedRunner {
    ScriptedRunner::default()
        .respond("rev-parse HEAD", 0, &format!("{HEAD}\n"), "")
        .respond("status --porcelain", 0, "", "")
}

pub fn live(runner: ScriptedRunner) -> LiveProvenance<ScriptedRunner, TestClock> {
    LiveProvenance::new(runner, TestClock::default(), "git", "/work/project")
}

/// In-memory destination tree that can also be read back as an embedded store.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    entries: Rc<RefCell<HashMap<String, String>>>,
    reads: Rc<Cell<usize>>,
}

impl MemoryTree {
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let tree = Self::default();
        for (k, v) in entries {
            tree.entries
                .borrow_mut()
                .insert((*k).to_owned(), (*v).to_owned());
        }
        tree
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ResourceStorePort for MemoryTree {
    fn read(&self, key: &str) -> Result<Option<String>, PortError> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.get(key))
    }
}

impl ArtifactSinkPort for MemoryTree {
    fn describe(&self) -> String {
        "memory".to_owned()
    }

    fn write_entry(&self, entry: ProvenanceEntry, contents: &str) -> Result<(), PortError> {
        self.entries
            .borrow_mut()
            .insert(entry.resource_key(), contents.to_owned());
        Ok(())
    }

    fn remove_all(&self) -> Result<(), PortError> {
        let mut entries = self.entries.borrow_mut();
        if entries.is_empty() {
            return Err(PortError::NotFound("memory".to_owned()));
        }
        entries.clear();
        Ok(())
    }
}
