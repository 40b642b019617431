use anyhow::Result;

use crate::ast::{Action, Expression, Program};
use crate::backend::{Backend, Execution};
use crate::errors::Fault;
use crate::table::SymbolTable;

/// Tree-walking backend that executes the AST directly, without
/// compilation.
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for Interpreter {
    fn name(&self) -> &'static str {
        "interpreter"
    }

    fn run(&mut self, program: &Program) -> Result<Execution> {
        Ok(interpret(program)?)
    }
}

/// Execute the program's actions in order against a fresh variable table.
/// A fault aborts the run immediately; nothing mutated earlier is rolled
/// back or reported.
pub fn interpret(program: &Program) -> Result<Execution, Fault> {
    let mut table = SymbolTable::new();
    let mut printed = Vec::new();
    for action in &program.actions {
        execute_action(action, &mut table, &mut printed)?;
    }
    Ok(Execution {
        printed,
        table,
        stack_depth: 0,
    })
}

fn execute_action(
    action: &Action,
    table: &mut SymbolTable,
    printed: &mut Vec<String>,
) -> Result<(), Fault> {
    match action {
        Action::Assignment { target, value } => {
            let value = evaluate(value, table)?;
            table.set(target, value);
        }
        Action::Print(expression) => {
            let value = evaluate(expression, table)?;
            printed.push(format!("*** {value} "));
        }
    }
    Ok(())
}

/// Evaluate an expression against the current variable table. Children
/// are evaluated depth-first, left to right.
pub fn evaluate(expression: &Expression, table: &SymbolTable) -> Result<i64, Fault> {
    match expression {
        Expression::Constant(value) => Ok(*value),
        Expression::Variable(name) => table
            .get(name)
            .ok_or_else(|| Fault::UninitializedVariable(name.clone())),
        Expression::Unary { op, operand } => Ok(op.apply(evaluate(operand, table)?)),
        Expression::Binary { op, left, right } => {
            let left = evaluate(left, table)?;
            let right = evaluate(right, table)?;
            op.apply(left, right)
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::interpret;
    use crate::ast::Program;
    use crate::errors::Fault;
    use crate::lexer::tokenize;
    use crate::parser;

    fn program(source: &str) -> Program {
        parser::parse(&mut tokenize(source)).expect("parse failed")
    }

    #[test]
    fn assignment_binds_into_the_table_without_output() {
        let execution = interpret(&program(":= x 3")).expect("interpret failed");
        assert!(execution.printed.is_empty());
        assert_eq!(execution.table.get("x"), Some(3));
        assert_eq!(execution.table.len(), 1);
    }

    #[test]
    fn bare_expression_prints_with_the_fixed_marker() {
        let execution = interpret(&program("+ 3 4")).expect("interpret failed");
        assert_eq!(execution.printed, vec!["*** 7 ".to_string()]);
        assert!(execution.table.is_empty());
    }

    #[test]
    fn negation_prints_the_negated_value() {
        let execution = interpret(&program("_ 5")).expect("interpret failed");
        assert_eq!(execution.printed, vec!["*** -5 ".to_string()]);
    }

    #[test]
    fn square_root_truncates() {
        let execution = interpret(&program("# 9")).expect("interpret failed");
        assert_eq!(execution.printed, vec!["*** 3 ".to_string()]);
    }

    #[test]
    fn division_by_zero_faults_with_operand_context() {
        let fault = interpret(&program(":= y / 10 0")).expect_err("expected fault");
        assert_eq!(fault, Fault::DivideByZero("10/0".to_string()));
    }

    #[test]
    fn reading_an_unbound_variable_faults() {
        let fault = interpret(&program("+ q 1")).expect_err("expected fault");
        assert_eq!(fault, Fault::UninitializedVariable("q".to_string()));
    }

    #[test]
    fn statements_share_one_environment_in_order() {
        let source = indoc! {"
            := x * 3 4
            := y / x 5
            + x y
        "};
        let execution = interpret(&program(source)).expect("interpret failed");
        assert_eq!(execution.printed, vec!["*** 14 ".to_string()]);
        let entries: Vec<_> = execution.table.iter().collect();
        assert_eq!(entries, vec![("x", 12), ("y", 2)]);
    }
}
