use crate::ast::Program;
use crate::backend::bytecode::{self, Instruction};
use crate::backend::{Execution, interpreter};
use crate::errors::Fault;
use crate::parser;
use crate::token::TokenStream;

/// Facade over a parsed program: render it in infix form, interpret it
/// directly, or compile it for the stack machine.
pub struct ParseTree {
    root: Program,
}

impl ParseTree {
    /// Parse the entire token stream into the tree's root program. A
    /// parse fault means no tree is produced at all.
    pub fn new(tokens: &mut TokenStream) -> Result<Self, Fault> {
        Ok(Self {
            root: parser::parse(tokens)?,
        })
    }

    pub fn root(&self) -> &Program {
        &self.root
    }

    /// Render the program under a header line, one statement per line in
    /// infix form.
    pub fn display_program(&self) -> String {
        format!("Parsed program:\n{}", self.root.infix())
    }

    /// Execute the program against a fresh variable table, returning the
    /// printed lines and the final bindings.
    pub fn interpret(&self) -> Result<Execution, Fault> {
        interpreter::interpret(&self.root)
    }

    /// Emit the machine instruction sequence for the whole program. The
    /// caller decides when (and whether) to hand it to a machine.
    pub fn compile(&self) -> Vec<Instruction> {
        bytecode::compile(&self.root)
    }
}
