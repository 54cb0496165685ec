use std::cell::RefCell;
use std::rc::Rc;

use microasm_core::config::{Config, Variant};
use microasm_core::cpu::io::ScriptedIo;
use microasm_core::num::NumericKind;
use microasm_core::sim::Session;

pub struct TestContext {
    pub session: Session,
    pub io: Rc<RefCell<ScriptedIo>>,
}

impl TestContext {
    /// Builds a context for the given variant with default config and no
    /// scripted input.
    pub fn new(variant: Variant) -> Self {
        Self::with_inputs(variant, Vec::<String>::new())
    }

    /// Builds a context with queued input lines for INP instructions.
    pub fn with_inputs<I, S>(variant: Variant, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Config::default();
        config.machine.variant = variant;
        Self::with_config_and_inputs(config, inputs)
    }

    /// Builds a context from a full config with queued input lines.
    pub fn with_config_and_inputs<I, S>(config: Config, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let io = Rc::new(RefCell::new(ScriptedIo::new(inputs)));
        let session = Session::with_io(config, Box::new(Rc::clone(&io))).unwrap();
        Self { session, io }
    }

    pub fn base() -> Self {
        Self::new(Variant::Base)
    }

    pub fn extended() -> Self {
        Self::new(Variant::Extended)
    }

    pub fn rs() -> Self {
        Self::new(Variant::Rs)
    }

    /// A context whose machine words are the given numeric kind.
    pub fn with_numeric(variant: Variant, numeric: NumericKind) -> Self {
        let mut config = Config::default();
        config.machine.variant = variant;
        config.machine.numeric = numeric;
        Self::with_config_and_inputs(config, Vec::<String>::new())
    }

    /// Assembles `source` and returns the emitted words.
    pub fn compile(&mut self, source: &str) -> Vec<u64> {
        self.session.assemble(source).unwrap().to_vec()
    }

    /// Assembles and loads `source`, ready to step.
    pub fn load(&mut self, source: &str) {
        self.session.assemble_and_load(source).unwrap();
    }

    /// Assembles, loads and runs `source` to the halt; returns the cycle
    /// count.
    pub fn run(&mut self, source: &str) -> u64 {
        self.load(source);
        self.session.run().unwrap()
    }

    /// Runs one cycle and returns the continue flag.
    pub fn step(&mut self) -> bool {
        self.session.step().unwrap()
    }

    /// Reads a register by name.
    pub fn reg(&self, name: &str) -> u64 {
        self.session.cpu().reg_by_name(name).unwrap()
    }

    /// Writes a register by name.
    pub fn set_reg(&mut self, name: &str, value: u64) {
        assert!(self.session.cpu_mut().set_reg_by_name(name, value));
    }

    /// Reads one word of memory at a byte address.
    pub fn mem_word(&self, addr: u64) -> u64 {
        self.session.cpu().mem.read_word(addr).unwrap()
    }

    /// All output the program has emitted so far.
    pub fn output(&self) -> String {
        self.io.borrow().captured()
    }
}
