//! Bytecode disassembler for debugging.

use std::fmt::Write;

use crate::bytecode::instruction::{Instruction, Opcode};
use crate::bytecode::program::Program;

/// Disassemble a compiled program into human-readable output.
pub fn disassemble(program: &Program) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "== program ({} words, {} strings, {} functions) ==",
        program.bytecode.len(),
        program.string_pool.len(),
        program.functions.len()
    )
    .unwrap();

    for (offset, word) in program.bytecode.iter().enumerate() {
        // Label function entry points as they come up.
        for (name, addr) in &program.functions {
            if *addr as usize == offset {
                writeln!(&mut output, "{}:", name).unwrap();
            }
        }

        disassemble_instruction(Instruction::from_word(*word), offset, &mut output);
    }

    output
}

/// Disassemble a single instruction into `output`.
fn disassemble_instruction(inst: Instruction, offset: usize, output: &mut String) {
    write!(output, "{:04} ", offset).unwrap();

    let Some(opcode) = inst.opcode() else {
        writeln!(output, "DATA {:#010x}", inst.word()).unwrap();
        return;
    };

    match opcode {
        Opcode::Mov => {
            writeln!(output, "{:<6}r{}, {}", opcode.name(), inst.op1(), inst.op2()).unwrap();
        }
        Opcode::Copy => {
            writeln!(
                output,
                "{:<6}r{}, r{}",
                opcode.name(),
                inst.op1(),
                inst.op2()
            )
            .unwrap();
        }
        Opcode::Loads => {
            writeln!(
                output,
                "{:<6}r{}, s{}",
                opcode.name(),
                inst.op1(),
                inst.op2()
            )
            .unwrap();
        }
        Opcode::Add
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::Div
        | Opcode::Eq
        | Opcode::Neq
        | Opcode::Lt
        | Opcode::Gt
        | Opcode::Lte
        | Opcode::Gte => {
            writeln!(
                output,
                "{:<6}r{}, r{}, r{}",
                opcode.name(),
                inst.op1(),
                inst.op2(),
                inst.op3()
            )
            .unwrap();
        }
        Opcode::Inc | Opcode::Dec => {
            writeln!(output, "{:<6}r{}", opcode.name(), inst.op1()).unwrap();
        }
        Opcode::Jmp => {
            writeln!(output, "{:<6}{}", opcode.name(), inst.target()).unwrap();
        }
        Opcode::Jz | Opcode::Jnz => {
            writeln!(
                output,
                "{:<6}r{}, {}",
                opcode.name(),
                inst.op1(),
                inst.target()
            )
            .unwrap();
        }
        Opcode::Call => {
            writeln!(
                output,
                "{:<6}{}, r{}, {}",
                opcode.name(),
                inst.op1(),
                inst.op2(),
                inst.op3()
            )
            .unwrap();
        }
        Opcode::Ret | Opcode::Prf | Opcode::Prfe | Opcode::Hlt => {
            writeln!(output, "{}", opcode.name()).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::compiler::Compiler;
    use crate::lexer::Scanner;
    use crate::parser::Parser;

    fn compile(source: &str) -> Program {
        let tokens = Scanner::new(source).scan_tokens().unwrap();
        let ast = Parser::new(tokens).parse().unwrap();
        Compiler::new().compile(&ast).unwrap()
    }

    #[test]
    fn test_disassembles_every_word() {
        let program = compile("fn add(a: int, b: int) -> int { return a + b; } print(add(1, 2));");
        let words = program.bytecode.len();
        let listing = disassemble(&program);
        // One line per word, plus the header and the function label.
        assert_eq!(listing.lines().count(), words + 2);
        assert!(listing.contains("add:"));
        assert!(listing.contains("HLT"));
    }

    #[test]
    fn test_mov_formatting() {
        let program = compile("let x = 5;");
        let listing = disassemble(&program);
        assert!(listing.contains("MOV   r0, 5"));
    }

    #[test]
    fn test_loads_formatting() {
        let program = compile("let s = \"hey\";");
        let listing = disassemble(&program);
        assert!(listing.contains("LOADS r0, s0"));
    }
}
