//! Bytecode toolchain for the Juno register machine.
//!
//! - `instruction`: packed 32-bit instruction words and opcode definitions
//! - `program`: the compiled artifact bundle (code, string pool, functions)
//! - `compiler`: transforms the AST into a `Program`
//! - `vm`: register-based virtual machine executing a `Program`
//! - `disassembler`: debug output for bytecode inspection
//! - `image`: binary framing for persisting a `Program`

pub mod compiler;
pub mod disassembler;
pub mod image;
pub mod instruction;
pub mod program;
pub mod vm;

pub use compiler::Compiler;
pub use disassembler::disassemble;
pub use instruction::{Instruction, Opcode};
pub use program::Program;
pub use vm::{Machine, NativeFn, PRINT_NATIVE_ID};
