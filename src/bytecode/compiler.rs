//! Bytecode compiler: transforms the AST into a `Program`.
//!
//! Compilation is two passes over the top-level statement list. A prologue
//! JMP is emitted first and patched later so execution skips the function
//! bodies; pass one records each prototype's entry address and compiles its
//! body; pass two compiles the remaining statements in source order; an
//! epilogue HLT closes the program.

use std::collections::HashMap;

use crate::ast::{BinaryOp, Expr, ExprKind, FunctionDecl, Stmt, StmtKind};
use crate::bytecode::instruction::{Instruction, Opcode, NATIVE_ID_BASE};
use crate::bytecode::program::Program;
use crate::bytecode::vm::PRINT_NATIVE_ID;
use crate::error::CompileError;
use crate::span::Span;

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;

/// User function entry addresses must stay below the native id range.
const MAX_FUNCTION_ADDRESS: usize = (NATIVE_ID_BASE - 1) as usize;

/// A lexical scope: the register cursor at entry plus the variables
/// declared inside. Popping the scope rewinds the cursor to `start_register`,
/// reclaiming locals and temporaries in one stroke.
struct Scope {
    start_register: u8,
    variables: HashMap<String, u8>,
}

impl Scope {
    fn new(start_register: u8) -> Self {
        Self {
            start_register,
            variables: HashMap::new(),
        }
    }
}

/// The bytecode compiler.
pub struct Compiler {
    program: Program,
    scopes: Vec<Scope>,
    /// Monotone allocation cursor into the register file.
    next_register: u8,
    /// Native function ids known at compile time (name -> id >= 128).
    natives: HashMap<String, u8>,
}

impl Compiler {
    pub fn new() -> Self {
        let mut natives = HashMap::new();
        natives.insert("print".to_string(), PRINT_NATIVE_ID);

        Self {
            program: Program::new(),
            scopes: Vec::new(),
            next_register: 0,
            natives,
        }
    }

    /// Compile a program into a bytecode artifact bundle.
    pub fn compile(&mut self, ast: &[Stmt]) -> CompileResult<Program> {
        self.program = Program::new();
        self.scopes.clear();
        self.next_register = 0;

        self.enter_scope();

        // Prologue: jump over the function bodies to the global code.
        // Target patched once the prototypes are emitted.
        let prologue = self.program.emit(Instruction::jump(Opcode::Jmp, 0, 0));

        for stmt in ast {
            if let StmtKind::Function(decl) = &stmt.kind {
                self.compile_prototype(decl)?;
            }
        }

        let entry = self.jump_target(self.program.next_address(), Span::default())?;
        self.program
            .patch(prologue, Instruction::jump(Opcode::Jmp, 0, entry));

        for stmt in ast {
            if matches!(stmt.kind, StmtKind::Function(_)) {
                continue;
            }
            self.compile_statement(stmt)?;
        }

        self.program.emit(Instruction::bare(Opcode::Hlt));
        self.exit_scope();

        Ok(std::mem::take(&mut self.program))
    }

    // ===== Registers and scopes =====

    fn alloc_register(&mut self, span: Span) -> CompileResult<u8> {
        if self.next_register == u8::MAX {
            return Err(CompileError::RegisterExhausted(span));
        }
        let reg = self.next_register;
        self.next_register += 1;
        Ok(reg)
    }

    fn enter_scope(&mut self) {
        self.scopes.push(Scope::new(self.next_register));
    }

    fn exit_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            self.next_register = scope.start_register;
        }
    }

    fn declare_variable(&mut self, name: &str, register: u8, span: Span) -> CompileResult<()> {
        let scope = self
            .scopes
            .last_mut()
            .ok_or_else(|| CompileError::new("no enclosing scope", span))?;
        scope.variables.insert(name.to_string(), register);
        Ok(())
    }

    /// Resolve a variable, innermost scope first.
    fn find_variable(&self, name: &str) -> Option<u8> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.variables.get(name).copied())
    }

    fn jump_target(&self, addr: usize, span: Span) -> CompileResult<u16> {
        u16::try_from(addr)
            .map_err(|_| CompileError::new(format!("jump target {} out of range", addr), span))
    }

    // ===== Prototypes =====

    /// Record a function's entry address and compile its body. The register
    /// cursor is rebased to zero so parameters land in registers 0, 1, 2, …
    /// matching the caller's base-register convention.
    fn compile_prototype(&mut self, decl: &FunctionDecl) -> CompileResult<()> {
        let addr = self.program.next_address();
        if addr > MAX_FUNCTION_ADDRESS {
            return Err(CompileError::FunctionAddressOutOfRange {
                name: decl.name.clone(),
                address: addr,
                span: decl.span,
            });
        }

        self.program.functions.insert(decl.name.clone(), addr as u8);

        let saved_register = self.next_register;
        self.next_register = 0;
        self.enter_scope();

        for param in &decl.params {
            let reg = self.alloc_register(param.span)?;
            self.declare_variable(&param.name, reg, param.span)?;
        }

        self.compile_statement(&decl.body)?;

        // A fall-through body still has to return to its caller.
        let last = self.program.bytecode.last().copied();
        let ends_in_ret =
            last.is_some_and(|w| Instruction::from_word(w).opcode() == Some(Opcode::Ret));
        if !ends_in_ret {
            self.program.emit(Instruction::bare(Opcode::Ret));
        }

        self.exit_scope();
        self.next_register = saved_register;

        Ok(())
    }

    // ===== Statements =====

    fn compile_statement(&mut self, stmt: &Stmt) -> CompileResult<()> {
        match &stmt.kind {
            StmtKind::Expression(expr) => {
                self.compile_expression(expr)?;
                Ok(())
            }

            StmtKind::Let {
                name,
                initializer,
                comptime,
                type_annotation: _,
            } => {
                // A comptime initializer that folds lowers as a plain
                // number; anything else takes the normal path.
                let saved = self.next_register;
                let reg = match comptime.then(|| fold_constant(initializer)).flatten() {
                    Some(value) => self.compile_number(value, initializer.span)?,
                    None => self.compile_expression(initializer)?,
                };

                // A freshly allocated result register becomes the variable
                // directly; an initializer that resolved to an existing
                // variable's register gets its own, or the two names would
                // alias one register.
                let reg = if reg < saved {
                    let fresh = self.alloc_register(stmt.span)?;
                    self.program
                        .emit(Instruction::new(Opcode::Copy, fresh, reg, 0));
                    fresh
                } else {
                    reg
                };

                self.declare_variable(name, reg, stmt.span)
            }

            StmtKind::Assign { name, value } => {
                let var_reg = self
                    .find_variable(name)
                    .ok_or_else(|| CompileError::undefined_variable(name, stmt.span))?;

                let saved = self.next_register;
                let reg = self.compile_expression(value)?;
                if reg != var_reg {
                    self.program
                        .emit(Instruction::new(Opcode::Copy, var_reg, reg, 0));
                }
                // Reclaim the temporary if the rhs allocated one.
                if reg >= saved {
                    self.next_register = saved;
                }
                Ok(())
            }

            StmtKind::CompoundAssign { name, op, value } => {
                let var_reg = self
                    .find_variable(name)
                    .ok_or_else(|| CompileError::undefined_variable(name, stmt.span))?;

                let saved = self.next_register;
                let reg = self.compile_expression(value)?;
                self.program
                    .emit(Instruction::new(arithmetic_opcode(*op), var_reg, reg, var_reg));
                if reg >= saved {
                    self.next_register = saved;
                }
                Ok(())
            }

            StmtKind::Block {
                profiled,
                statements,
            } => {
                if *profiled {
                    self.program.emit(Instruction::bare(Opcode::Prf));
                }
                self.enter_scope();
                for statement in statements {
                    self.compile_statement(statement)?;
                }
                self.exit_scope();
                if *profiled {
                    self.program.emit(Instruction::bare(Opcode::Prfe));
                }
                Ok(())
            }

            // Top-level prototypes are emitted by the prototype pass; a
            // nested declaration never registers an address, so calls to it
            // fail at resolution.
            StmtKind::Function(_) => Ok(()),

            // Externs exist for other backends; the VM has nothing to emit.
            StmtKind::ExternFunction(_) => Ok(()),

            StmtKind::Return(value) => {
                if let Some(expr) = value {
                    let reg = self.compile_expression(expr)?;
                    // Register 0 is the return-value slot.
                    if reg != 0 {
                        self.program
                            .emit(Instruction::new(Opcode::Copy, 0, reg, 0));
                    }
                }
                self.program.emit(Instruction::bare(Opcode::Ret));
                Ok(())
            }

            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => self.compile_if(condition, then_branch, else_branch.as_deref()),
        }
    }

    fn compile_if(
        &mut self,
        condition: &Expr,
        then_branch: &Stmt,
        else_branch: Option<&Stmt>,
    ) -> CompileResult<()> {
        let cond_reg = self.compile_expression(condition)?;
        let jz_addr = self.program.emit(Instruction::jump(Opcode::Jz, cond_reg, 0));

        self.compile_statement(then_branch)?;

        match else_branch {
            Some(else_stmt) => {
                let jmp_addr = self.program.emit(Instruction::jump(Opcode::Jmp, 0, 0));

                let else_target = self.jump_target(self.program.next_address(), condition.span)?;
                self.program
                    .patch(jz_addr, Instruction::jump(Opcode::Jz, cond_reg, else_target));

                self.compile_statement(else_stmt)?;

                let end_target = self.jump_target(self.program.next_address(), condition.span)?;
                self.program
                    .patch(jmp_addr, Instruction::jump(Opcode::Jmp, 0, end_target));
            }
            None => {
                let end_target = self.jump_target(self.program.next_address(), condition.span)?;
                self.program
                    .patch(jz_addr, Instruction::jump(Opcode::Jz, cond_reg, end_target));
            }
        }

        Ok(())
    }

    // ===== Expressions =====

    /// Lower an expression, returning the register holding its result.
    fn compile_expression(&mut self, expr: &Expr) -> CompileResult<u8> {
        match &expr.kind {
            ExprKind::Number(n) => self.compile_number(*n, expr.span),

            ExprKind::Str(s) => {
                let idx = self
                    .program
                    .intern_string(s)
                    .ok_or(CompileError::StringPoolExhausted(expr.span))?;
                let reg = self.alloc_register(expr.span)?;
                self.program
                    .emit(Instruction::new(Opcode::Loads, reg, idx, 0));
                Ok(reg)
            }

            ExprKind::Variable(name) => self
                .find_variable(name)
                .ok_or_else(|| CompileError::undefined_variable(name, expr.span)),

            ExprKind::Binary {
                left,
                operator,
                right,
            } => {
                let lhs = self.compile_expression(left)?;
                let rhs = self.compile_expression(right)?;
                let dst = self.alloc_register(expr.span)?;
                self.program
                    .emit(Instruction::new(binary_opcode(*operator), lhs, rhs, dst));
                Ok(dst)
            }

            ExprKind::Call { callee, arguments } => self.compile_call(callee, arguments, expr.span),

            ExprKind::Function(_) => Err(CompileError::new(
                "lambda expressions have no bytecode lowering",
                expr.span,
            )),
        }
    }

    fn compile_number(&mut self, value: f64, span: Span) -> CompileResult<u8> {
        let reg = self.alloc_register(span)?;
        // The MOV immediate is one byte: the literal truncates through its
        // integer part to the low 8 bits.
        self.program
            .emit(Instruction::new(Opcode::Mov, reg, value as i64 as u8, 0));
        Ok(reg)
    }

    /// Lower a call. Arguments must occupy consecutive registers starting
    /// at a base; when an argument's result lands elsewhere it is copied
    /// into its slot and the cursor bumped so the slot stays reserved.
    ///
    /// The base always sits at or above the cursor as it stood before the
    /// arguments were lowered. Slots are assigned by offset from the base
    /// and the callee's return value overwrites the base, so a live
    /// variable's register can never serve as the block.
    fn compile_call(&mut self, callee: &str, arguments: &[Expr], span: Span) -> CompileResult<u8> {
        if arguments.len() > u8::MAX as usize {
            return Err(CompileError::new("too many call arguments", span));
        }
        let arg_count = arguments.len() as u8;

        let first_reg = if arguments.is_empty() {
            // Even a zero-argument call needs a base register for the
            // return value.
            self.alloc_register(span)?
        } else {
            let saved = self.next_register;
            let first = self.compile_expression(&arguments[0])?;
            // A bare-variable argument hands back the variable's own
            // register; relocate it into scratch space so every slot in
            // the block stays above the live registers.
            let first = if first < saved {
                let fresh = self.alloc_register(arguments[0].span)?;
                self.program
                    .emit(Instruction::new(Opcode::Copy, fresh, first, 0));
                fresh
            } else {
                first
            };
            for (i, arg) in arguments.iter().enumerate().skip(1) {
                let reg = self.compile_expression(arg)?;
                let slot = first
                    .checked_add(i as u8)
                    .ok_or(CompileError::RegisterExhausted(arg.span))?;
                if reg != slot {
                    self.program
                        .emit(Instruction::new(Opcode::Copy, slot, reg, 0));
                    if self.next_register <= slot {
                        if slot == u8::MAX {
                            return Err(CompileError::RegisterExhausted(arg.span));
                        }
                        self.next_register = slot + 1;
                    }
                }
            }
            first
        };

        let fn_addr = if let Some(&addr) = self.program.functions.get(callee) {
            addr
        } else if let Some(&id) = self.natives.get(callee) {
            id
        } else {
            return Err(CompileError::unknown_function(callee, span));
        };

        self.program
            .emit(Instruction::new(Opcode::Call, fn_addr, first_reg, arg_count));

        // The callee leaves its return value in the base register.
        Ok(first_reg)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// The VM opcode for a binary operator.
fn binary_opcode(op: BinaryOp) -> Opcode {
    match op {
        BinaryOp::Add => Opcode::Add,
        BinaryOp::Subtract => Opcode::Sub,
        BinaryOp::Multiply => Opcode::Mul,
        BinaryOp::Divide => Opcode::Div,
        BinaryOp::Less => Opcode::Lt,
        BinaryOp::Greater => Opcode::Gt,
        BinaryOp::LessEqual => Opcode::Lte,
        BinaryOp::GreaterEqual => Opcode::Gte,
        BinaryOp::Equal => Opcode::Eq,
        BinaryOp::NotEqual => Opcode::Neq,
    }
}

/// The VM opcode for a compound-assignment operator. Callers only pass the
/// four arithmetic operators.
fn arithmetic_opcode(op: BinaryOp) -> Opcode {
    match op {
        BinaryOp::Add => Opcode::Add,
        BinaryOp::Subtract => Opcode::Sub,
        BinaryOp::Multiply => Opcode::Mul,
        BinaryOp::Divide => Opcode::Div,
        other => unreachable!("non-arithmetic compound operator {}", other),
    }
}

/// Evaluate a pure arithmetic tree over numeric literals. Returns None as
/// soon as anything non-foldable appears; callers fall back to normal
/// lowering.
fn fold_constant(expr: &Expr) -> Option<f64> {
    match &expr.kind {
        ExprKind::Number(n) => Some(*n),
        ExprKind::Binary {
            left,
            operator,
            right,
        } if operator.is_arithmetic() => {
            let lhs = fold_constant(left)?;
            let rhs = fold_constant(right)?;
            Some(match operator {
                BinaryOp::Add => lhs + rhs,
                BinaryOp::Subtract => lhs - rhs,
                BinaryOp::Multiply => lhs * rhs,
                BinaryOp::Divide => lhs / rhs,
                _ => unreachable!(),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Scanner;
    use crate::parser::Parser;

    fn compile(source: &str) -> CompileResult<Program> {
        let tokens = Scanner::new(source).scan_tokens().unwrap();
        let ast = Parser::new(tokens).parse().unwrap();
        Compiler::new().compile(&ast)
    }

    fn opcodes(program: &Program) -> Vec<Opcode> {
        program
            .bytecode
            .iter()
            .map(|w| Instruction::from_word(*w).opcode().unwrap())
            .collect()
    }

    #[test]
    fn test_single_trailing_hlt() {
        let program = compile("let x = 2 + 3;").unwrap();
        let ops = opcodes(&program);
        assert_eq!(ops.last(), Some(&Opcode::Hlt));
        assert_eq!(ops.iter().filter(|op| **op == Opcode::Hlt).count(), 1);
    }

    #[test]
    fn test_prologue_jump_lands_after_prototypes() {
        let program = compile("fn id(a: int) -> int { return a; } let x = id(3);").unwrap();
        let prologue = program.instruction(0);
        assert_eq!(prologue.opcode(), Some(Opcode::Jmp));

        // The prototype occupies the words between the prologue and the
        // patched target.
        let entry = prologue.target() as usize;
        assert!(entry > 1);
        for addr in entry..program.bytecode.len() {
            let inst = program.instruction(addr);
            assert_ne!(inst.opcode(), Some(Opcode::Ret), "global code has no RET");
        }
    }

    #[test]
    fn test_function_addresses_recorded() {
        let program = compile("fn a() { } fn b() { } a(); b();").unwrap();
        let a_addr = program.functions["a"];
        let b_addr = program.functions["b"];
        assert_eq!(a_addr, 1, "first prototype starts after the prologue");
        assert!(b_addr > a_addr);
        assert!((b_addr as usize) < program.bytecode.len());
    }

    #[test]
    fn test_implicit_ret_appended() {
        let program = compile("fn noop() { }").unwrap();
        let addr = program.functions["noop"] as usize;
        assert_eq!(program.instruction(addr).opcode(), Some(Opcode::Ret));
    }

    #[test]
    fn test_no_double_ret() {
        let program = compile("fn f() -> int { return 1; }").unwrap();
        let ops = opcodes(&program);
        assert_eq!(ops.iter().filter(|op| **op == Opcode::Ret).count(), 1);
    }

    #[test]
    fn test_comptime_fold_emits_single_mov() {
        let folded = compile("@comptime let y = 2 * 3 + 4;").unwrap();
        let unfolded = compile("let y = 2 * 3 + 4;").unwrap();

        let folded_movs = opcodes(&folded)
            .iter()
            .filter(|op| **op == Opcode::Mov)
            .count();
        let unfolded_movs = opcodes(&unfolded)
            .iter()
            .filter(|op| **op == Opcode::Mov)
            .count();

        assert_eq!(folded_movs, 1);
        assert_eq!(unfolded_movs, 3);
        assert_eq!(folded.instruction(1).op2(), 10);
    }

    #[test]
    fn test_comptime_falls_back_on_identifiers() {
        let program = compile("let a = 2; @comptime let b = a + 1;").unwrap();
        // No fold: the initializer still emits an ADD.
        assert!(opcodes(&program).contains(&Opcode::Add));
    }

    #[test]
    fn test_let_aliases_initializer_register() {
        // let binds the initializer's register directly: one MOV, no COPY.
        let program = compile("let x = 7;").unwrap();
        let ops = opcodes(&program);
        assert!(!ops.contains(&Opcode::Copy));
    }

    #[test]
    fn test_assignment_copies_into_variable_register() {
        let program = compile("let x = 1; x = 2;").unwrap();
        let ops = opcodes(&program);
        assert!(ops.contains(&Opcode::Copy));
    }

    #[test]
    fn test_compound_assignment_opcodes() {
        let cases = [
            ("let x = 8; x += 2;", Opcode::Add),
            ("let x = 8; x -= 2;", Opcode::Sub),
            ("let x = 8; x *= 2;", Opcode::Mul),
            ("let x = 8; x /= 2;", Opcode::Div),
        ];

        for (source, expected) in cases {
            let program = compile(source).unwrap();
            assert!(
                opcodes(&program).contains(&expected),
                "expected {:?} for {}",
                expected,
                source
            );
        }
    }

    #[test]
    fn test_compound_assignment_targets_variable_register() {
        let program = compile("let x = 8; x += 2;").unwrap();
        let add = program
            .bytecode
            .iter()
            .map(|w| Instruction::from_word(*w))
            .find(|i| i.opcode() == Some(Opcode::Add))
            .unwrap();
        assert_eq!(add.op1(), add.op3(), "destination is the variable register");
    }

    #[test]
    fn test_undefined_variable() {
        assert!(matches!(
            compile("ghost;"),
            Err(CompileError::UndefinedVariable(..))
        ));
    }

    #[test]
    fn test_unknown_function() {
        assert!(matches!(
            compile("ghost();"),
            Err(CompileError::UnknownFunction(..))
        ));
    }

    #[test]
    fn test_print_resolves_to_native() {
        let program = compile("print(1);").unwrap();
        let call = program
            .bytecode
            .iter()
            .map(|w| Instruction::from_word(*w))
            .find(|i| i.opcode() == Some(Opcode::Call))
            .unwrap();
        assert_eq!(call.op1(), PRINT_NATIVE_ID);
        assert_eq!(call.op3(), 1);
    }

    #[test]
    fn test_profiled_block_wraps_with_prf() {
        let program = compile("@profile { let x = 1; }").unwrap();
        let ops = opcodes(&program);
        let prf = ops.iter().position(|op| *op == Opcode::Prf).unwrap();
        let prfe = ops.iter().position(|op| *op == Opcode::Prfe).unwrap();
        assert!(prf < prfe);
    }

    #[test]
    fn test_scope_exit_reclaims_registers() {
        // Registers allocated inside the block are reused after it closes.
        let program = compile("{ let a = 1; } { let b = 2; }").unwrap();
        let movs: Vec<Instruction> = program
            .bytecode
            .iter()
            .map(|w| Instruction::from_word(*w))
            .filter(|i| i.opcode() == Some(Opcode::Mov))
            .collect();
        assert_eq!(movs[0].op1(), movs[1].op1());
    }

    #[test]
    fn test_string_interning() {
        let program = compile("let a = \"hi\"; let b = \"hi\"; let c = \"yo\";").unwrap();
        assert_eq!(program.string_pool, vec!["hi".to_string(), "yo".to_string()]);
    }

    #[test]
    fn test_if_else_jump_targets_valid() {
        let program =
            compile("let x = 5; if (x < 10) { print(1); } else { print(2); }").unwrap();
        for word in &program.bytecode {
            let inst = Instruction::from_word(*word);
            match inst.opcode().unwrap() {
                Opcode::Jmp | Opcode::Jz | Opcode::Jnz => {
                    assert!((inst.target() as usize) < program.bytecode.len());
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_register_exhaustion() {
        use crate::ast::{Expr, ExprKind, Stmt, StmtKind};
        use crate::span::Span;

        // 256 bare number statements allocate past the end of the register
        // file; none of them sit in a reclaimable scope.
        let ast: Vec<Stmt> = (0..256)
            .map(|_| {
                Stmt::new(
                    StmtKind::Expression(Expr::new(ExprKind::Number(1.0), Span::default())),
                    Span::default(),
                )
            })
            .collect();

        assert!(matches!(
            Compiler::new().compile(&ast),
            Err(CompileError::RegisterExhausted(_))
        ));
    }

    #[test]
    fn test_lambda_rejected() {
        let result = compile("let f = fn (x: int) -> int { return x; };");
        assert!(matches!(result, Err(CompileError::General { .. })));
    }

    #[test]
    fn test_extern_emits_nothing() {
        let with_extern = compile("extern fn printf(fmt: string) -> int; let x = 1;").unwrap();
        let without = compile("let x = 1;").unwrap();
        assert_eq!(with_extern.bytecode.len(), without.bytecode.len());
    }

    #[test]
    fn test_call_arguments_consecutive() {
        // Both arguments are existing variables: each is copied into the
        // scratch block so the slots sit consecutively from the base,
        // above every live register.
        let program = compile("let a = 1; let b = 2; print(b, a);").unwrap();
        let insts: Vec<Instruction> = program
            .bytecode
            .iter()
            .map(|w| Instruction::from_word(*w))
            .collect();

        let call = insts
            .iter()
            .find(|i| i.opcode() == Some(Opcode::Call))
            .unwrap();
        let base = call.op2();
        assert!(base >= 2, "block sits above the live variables");

        let copies: Vec<&Instruction> = insts
            .iter()
            .filter(|i| i.opcode() == Some(Opcode::Copy))
            .collect();
        assert_eq!(copies.len(), 2);
        assert_eq!(copies[0].op1(), base);
        assert_eq!(copies[0].op2(), 1, "b's register feeds the base slot");
        assert_eq!(copies[1].op1(), base + 1);
        assert_eq!(copies[1].op2(), 0, "a's register feeds the second slot");
    }

    #[test]
    fn test_let_from_variable_copies_into_own_register() {
        // let x = y; binds x to a fresh register, not y's.
        let program = compile("let y = 2; let x = y;").unwrap();
        let copy = program
            .bytecode
            .iter()
            .map(|w| Instruction::from_word(*w))
            .find(|i| i.opcode() == Some(Opcode::Copy))
            .expect("binding COPY");
        assert_eq!(copy.op2(), 0, "reads y's register");
        assert_ne!(copy.op1(), copy.op2());
    }
}
