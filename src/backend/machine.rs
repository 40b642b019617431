use anyhow::{Result, bail};

use crate::ast::{BinaryOperator, Program, UnaryOperator};
use crate::backend::bytecode::{Instruction, compile};
use crate::backend::{Backend, Execution};
use crate::errors::Fault;
use crate::table::SymbolTable;

/// The abstract stack machine. It holds no state between runs; each
/// `execute` call builds a fresh run context and tears it down on return,
/// fault or not.
pub struct Machine;

impl Machine {
    pub fn new() -> Self {
        Self
    }

    /// Run a compiled program one instruction at a time, in order, and
    /// return the final state. A fault aborts the run mid-stream.
    pub fn execute(&self, instructions: &[Instruction]) -> Result<Execution> {
        let mut run = RunContext::default();
        for instruction in instructions {
            run.step(instruction)?;
        }
        Ok(run.finish())
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a listing of a compiled program, one instruction per line.
pub fn display_instructions(instructions: &[Instruction]) -> String {
    let mut listing = String::from("\nCompiled code:\n");
    for instruction in instructions {
        listing.push_str(&instruction.to_string());
        listing.push('\n');
    }
    listing
}

/// Live operand stack and variable table of one machine run.
#[derive(Default)]
struct RunContext {
    stack: Vec<i64>,
    table: SymbolTable,
    printed: Vec<String>,
}

impl RunContext {
    fn step(&mut self, instruction: &Instruction) -> Result<()> {
        match instruction {
            Instruction::PushConst(value) => self.stack.push(*value),
            Instruction::Load(name) => {
                let value = self
                    .table
                    .get(name)
                    .ok_or_else(|| Fault::UninitializedVariable(name.clone()))?;
                self.stack.push(value);
            }
            Instruction::Store(name) => {
                let value = self.pop()?;
                self.table.set(name, value);
            }
            Instruction::Add => self.binary(BinaryOperator::Add)?,
            Instruction::Subtract => self.binary(BinaryOperator::Subtract)?,
            Instruction::Multiply => self.binary(BinaryOperator::Multiply)?,
            Instruction::Divide => self.binary(BinaryOperator::Divide)?,
            Instruction::Negate => self.unary(UnaryOperator::Negate)?,
            Instruction::SquareRoot => self.unary(UnaryOperator::SquareRoot)?,
            Instruction::Print => {
                let value = self.pop()?;
                self.printed.push(format!("*** {value} "));
            }
        }
        Ok(())
    }

    fn binary(&mut self, op: BinaryOperator) -> Result<()> {
        // The right operand is the more recently pushed, so it pops first.
        let right = self.pop()?;
        let left = self.pop()?;
        self.stack.push(op.apply(left, right)?);
        Ok(())
    }

    fn unary(&mut self, op: UnaryOperator) -> Result<()> {
        let operand = self.pop()?;
        self.stack.push(op.apply(operand));
        Ok(())
    }

    fn pop(&mut self) -> Result<i64> {
        match self.stack.pop() {
            Some(value) => Ok(value),
            None => bail!("operand stack underflow"),
        }
    }

    fn finish(self) -> Execution {
        Execution {
            printed: self.printed,
            table: self.table,
            stack_depth: self.stack.len(),
        }
    }
}

/// Compile-then-execute strategy behind the common backend seam.
pub struct MachineBackend;

impl MachineBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MachineBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MachineBackend {
    fn name(&self) -> &'static str {
        "machine"
    }

    fn run(&mut self, program: &Program) -> Result<Execution> {
        Machine::new().execute(&compile(program))
    }
}
