//! An auditing engine decorator for tests.

use crate::adapter::Adapter;
use crate::engine::{ComputationError, Engine, EngineConfig, OasisEngine, RawHandle};
use oasis_compute::MarkupFormat;
use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
    rc::Rc,
};

/// The number of times each engine operation was called.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub normalize: usize,
    pub parse: usize,
    pub render: usize,
    pub simplify: usize,
    pub release: usize,
}

impl Calls {
    /// The total number of calls.
    pub fn total(&self) -> usize {
        self.normalize + self.parse + self.render + self.simplify + self.release
    }
}

/// Wraps an engine, counting every call and panicking on any misuse of a handle: rendering,
/// simplifying or releasing a handle that is not live.
#[derive(Debug)]
pub struct AuditEngine<E> {
    inner: E,
    calls: Cell<Calls>,
    live: HashSet<u32>,
    released: HashSet<u32>,
}

impl<E: Engine> AuditEngine<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            calls: Cell::new(Calls::default()),
            live: HashSet::new(),
            released: HashSet::new(),
        }
    }

    pub fn calls(&self) -> Calls {
        self.calls.get()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    fn count(&self, f: impl FnOnce(&mut Calls)) {
        let mut calls = self.calls.get();
        f(&mut calls);
        self.calls.set(calls);
    }

    fn check_live(&self, op: &str, handle: RawHandle) {
        assert!(!handle.is_none(), "{op} called with the sentinel handle");
        assert!(!self.released.contains(&handle.0), "{op} called with released handle {}", handle.0);
        assert!(self.live.contains(&handle.0), "{op} called with unknown handle {}", handle.0);
    }

    fn track(&mut self, handle: RawHandle) -> RawHandle {
        if !handle.is_none() {
            assert!(self.live.insert(handle.0), "engine reissued live handle {}", handle.0);
        }
        handle
    }
}

impl<E: Engine> Engine for AuditEngine<E> {
    fn normalize(&self, raw: &str) -> String {
        self.count(|calls| calls.normalize += 1);
        self.inner.normalize(raw)
    }

    fn parse(&mut self, normalized: &str) -> RawHandle {
        self.count(|calls| calls.parse += 1);
        let handle = self.inner.parse(normalized);
        self.track(handle)
    }

    fn render(&self, handle: RawHandle) -> String {
        self.count(|calls| calls.render += 1);
        self.check_live("render", handle);
        self.inner.render(handle)
    }

    fn simplify(&mut self, handle: RawHandle) -> Result<RawHandle, ComputationError> {
        self.count(|calls| calls.simplify += 1);
        self.check_live("simplify", handle);
        let result = self.inner.simplify(handle)?;
        Ok(self.track(result))
    }

    fn release(&mut self, handle: RawHandle) {
        self.count(|calls| calls.release += 1);
        self.check_live("release", handle);
        self.live.remove(&handle.0);
        self.released.insert(handle.0);
        self.inner.release(handle);
    }

    fn live_handles(&self) -> Option<usize> {
        Some(self.live_count())
    }
}

/// An audited bundled engine that renders plain text.
pub type TestEngine = AuditEngine<OasisEngine>;

/// Creates an audited bundled engine that renders plain text, shared so that it can be inspected
/// after everything using it has been dropped.
pub fn shared_engine() -> Rc<RefCell<TestEngine>> {
    let config = EngineConfig { format: MarkupFormat::Text, ..Default::default() };
    Rc::new(RefCell::new(AuditEngine::new(OasisEngine::new(config))))
}

/// Creates an adapter over a fresh audited engine.
pub fn audited() -> Adapter<TestEngine> {
    Adapter::from_shared(shared_engine())
}
