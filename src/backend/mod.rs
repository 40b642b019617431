use anyhow::Result;

use crate::ast::Program;
use crate::table::SymbolTable;

pub mod bytecode;
pub mod interpreter;
pub mod machine;

/// Final state of one program run, shared by both execution strategies.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// Lines produced by Print statements, in program order.
    pub printed: Vec<String>,
    /// Variable bindings at the end of the run.
    pub table: SymbolTable,
    /// Operands left on the machine stack, expected to be zero; always
    /// zero for the tree-walking path.
    pub stack_depth: usize,
}

pub trait Backend {
    fn name(&self) -> &'static str;
    fn run(&mut self, program: &Program) -> Result<Execution>;
}

pub fn backends() -> Vec<Box<dyn Backend>> {
    vec![
        Box::new(interpreter::Interpreter::new()),
        Box::new(machine::MachineBackend::new()),
    ]
}
