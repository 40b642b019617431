use std::fmt;

use crate::ast::{Action, BinaryOperator, Expression, Program, UnaryOperator};

/// The machine's instruction set. Binary opcodes pop their right operand
/// first (it is the more recently pushed), apply the operator, and push
/// the result.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    PushConst(i64),
    Load(String),
    Store(String),
    Add,
    Subtract,
    Multiply,
    Divide,
    Negate,
    SquareRoot,
    Print,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PushConst(value) => write!(f, "PUSH {value}"),
            Self::Load(name) => write!(f, "LOAD {name}"),
            Self::Store(name) => write!(f, "STORE {name}"),
            Self::Add => write!(f, "ADD"),
            Self::Subtract => write!(f, "SUB"),
            Self::Multiply => write!(f, "MUL"),
            Self::Divide => write!(f, "DIV"),
            Self::Negate => write!(f, "NEG"),
            Self::SquareRoot => write!(f, "SQRT"),
            Self::Print => write!(f, "PRINT"),
        }
    }
}

/// Flatten the program into one instruction sequence, each action's
/// emission concatenated in program order.
pub fn compile(program: &Program) -> Vec<Instruction> {
    let mut code = Vec::new();
    for action in &program.actions {
        code.extend(compile_action(action));
    }
    code
}

fn compile_action(action: &Action) -> Vec<Instruction> {
    let mut code = Vec::new();
    match action {
        Action::Assignment { target, value } => {
            compile_expression(value, &mut code);
            code.push(Instruction::Store(target.clone()));
        }
        Action::Print(expression) => {
            compile_expression(expression, &mut code);
            code.push(Instruction::Print);
        }
    }
    code
}

fn compile_expression(expression: &Expression, code: &mut Vec<Instruction>) {
    match expression {
        Expression::Constant(value) => code.push(Instruction::PushConst(*value)),
        Expression::Variable(name) => code.push(Instruction::Load(name.clone())),
        Expression::Unary { op, operand } => {
            compile_expression(operand, code);
            code.push(match op {
                UnaryOperator::Negate => Instruction::Negate,
                UnaryOperator::SquareRoot => Instruction::SquareRoot,
            });
        }
        Expression::Binary { op, left, right } => {
            compile_expression(left, code);
            compile_expression(right, code);
            code.push(match op {
                BinaryOperator::Add => Instruction::Add,
                BinaryOperator::Subtract => Instruction::Subtract,
                BinaryOperator::Multiply => Instruction::Multiply,
                BinaryOperator::Divide => Instruction::Divide,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Instruction, compile};
    use crate::ast::{Action, Expression, Program};
    use crate::lexer::tokenize;
    use crate::parser;

    #[test]
    fn assignment_then_print_compiles_to_the_expected_sequence() {
        let mut program = Program::new();
        program.add_action(
            Action::assignment("x".to_string(), Expression::Constant(2)).expect("valid"),
        );
        program.add_action(Action::Print(Expression::Variable("x".to_string())));

        let code = compile(&program);
        assert_eq!(
            code,
            vec![
                Instruction::PushConst(2),
                Instruction::Store("x".to_string()),
                Instruction::Load("x".to_string()),
                Instruction::Print,
            ]
        );
    }

    #[test]
    fn operands_are_emitted_left_then_right_then_opcode() {
        let program = parser::parse(&mut tokenize(":= y / 10 _ 2")).expect("parse failed");
        let code = compile(&program);
        assert_eq!(
            code,
            vec![
                Instruction::PushConst(10),
                Instruction::PushConst(2),
                Instruction::Negate,
                Instruction::Divide,
                Instruction::Store("y".to_string()),
            ]
        );
    }

    #[test]
    fn instructions_render_as_their_mnemonics() {
        let rendered: Vec<String> = [
            Instruction::PushConst(2),
            Instruction::Load("x".to_string()),
            Instruction::Store("x".to_string()),
            Instruction::Add,
            Instruction::Subtract,
            Instruction::Multiply,
            Instruction::Divide,
            Instruction::Negate,
            Instruction::SquareRoot,
            Instruction::Print,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(
            rendered,
            vec![
                "PUSH 2", "LOAD x", "STORE x", "ADD", "SUB", "MUL", "DIV", "NEG", "SQRT", "PRINT",
            ]
        );
    }
}
