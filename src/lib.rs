//! Juno: a small expression-oriented language compiled to a packed 32-bit
//! bytecode and executed on a register-based virtual machine.
//!
//! The pipeline is strictly linear:
//!
//! ```text
//! source -> Scanner -> tokens -> Parser -> AST -> Compiler -> Program -> Machine
//! ```
//!
//! Each stage owns its output; nothing writes back into its input.

pub mod ast;
pub mod bytecode;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;

use error::JunoError;

/// Parse source code into an AST without compiling.
pub fn parse(source: &str) -> Result<Vec<ast::Stmt>, JunoError> {
    let tokens = lexer::Scanner::new(source).scan_tokens()?;
    let ast = parser::Parser::new(tokens).parse()?;
    Ok(ast)
}

/// Compile source code to a bytecode program without executing.
pub fn compile(source: &str) -> Result<bytecode::Program, JunoError> {
    let ast = parse(source)?;
    let program = bytecode::Compiler::new().compile(&ast)?;
    Ok(program)
}

/// Run a Juno program from source code.
///
/// Returns the machine's register 0 at halt.
pub fn run(source: &str) -> Result<u32, JunoError> {
    run_with_options(source, false)
}

/// Run a Juno program, optionally printing a disassembly first.
pub fn run_with_options(source: &str, disassemble: bool) -> Result<u32, JunoError> {
    let program = compile(source)?;

    if disassemble {
        print!("{}", bytecode::disassemble(&program));
        println!("---");
    }

    let mut machine = bytecode::Machine::new();
    machine.load_program(program);
    let result = machine.execute()?;

    Ok(result)
}

/// Run a Juno program from a file path.
pub fn run_file(path: &std::path::Path, disassemble: bool) -> Result<u32, JunoError> {
    let source = std::fs::read_to_string(path)?;
    run_with_options(&source, disassemble)
}
