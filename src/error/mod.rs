//! Error types for all toolchain phases.

use crate::span::Span;
use thiserror::Error;

/// Lexer errors.
#[derive(Debug, Error)]
pub enum LexerError {
    #[error("Unexpected character '{0}' at {1}")]
    UnexpectedChar(char, Span),

    #[error("Unterminated string at {0}")]
    UnterminatedString(Span),

    #[error("Invalid number '{0}' at {1}")]
    InvalidNumber(String, Span),
}

impl LexerError {
    pub fn unexpected_char(c: char, span: Span) -> Self {
        Self::UnexpectedChar(c, span)
    }

    pub fn unterminated_string(span: Span) -> Self {
        Self::UnterminatedString(span)
    }

    pub fn invalid_number(s: impl Into<String>, span: Span) -> Self {
        Self::InvalidNumber(s.into(), span)
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedChar(_, span) => *span,
            Self::UnterminatedString(span) => *span,
            Self::InvalidNumber(_, span) => *span,
        }
    }
}

/// Parser errors.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("Unexpected token '{found}', expected {expected} at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unexpected end of file at {0}")]
    UnexpectedEof(Span),

    #[error("Unknown annotation '{0}' at {1}")]
    UnknownAnnotation(String, Span),

    #[error("{message} at {span}")]
    General { message: String, span: Span },
}

impl ParserError {
    pub fn unexpected_token(
        expected: impl Into<String>,
        found: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    pub fn unexpected_eof(span: Span) -> Self {
        Self::UnexpectedEof(span)
    }

    pub fn unknown_annotation(name: impl Into<String>, span: Span) -> Self {
        Self::UnknownAnnotation(name.into(), span)
    }

    pub fn general(message: impl Into<String>, span: Span) -> Self {
        Self::General {
            message: message.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. } => *span,
            Self::UnexpectedEof(span) => *span,
            Self::UnknownAnnotation(_, span) => *span,
            Self::General { span, .. } => *span,
        }
    }
}

impl From<LexerError> for ParserError {
    fn from(err: LexerError) -> Self {
        Self::General {
            message: err.to_string(),
            span: err.span(),
        }
    }
}

/// Bytecode compilation errors.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Undefined variable '{0}' at {1}")]
    UndefinedVariable(String, Span),

    #[error("Unknown function '{0}' at {1}")]
    UnknownFunction(String, Span),

    #[error("Out of registers at {0}")]
    RegisterExhausted(Span),

    #[error("String pool is full at {0}")]
    StringPoolExhausted(Span),

    #[error("Function '{name}' starts at address {address}, outside the callable range, at {span}")]
    FunctionAddressOutOfRange {
        name: String,
        address: usize,
        span: Span,
    },

    #[error("{message} at {span}")]
    General { message: String, span: Span },
}

impl CompileError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self::General {
            message: message.into(),
            span,
        }
    }

    pub fn undefined_variable(name: impl Into<String>, span: Span) -> Self {
        Self::UndefinedVariable(name.into(), span)
    }

    pub fn unknown_function(name: impl Into<String>, span: Span) -> Self {
        Self::UnknownFunction(name.into(), span)
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UndefinedVariable(_, span) => *span,
            Self::UnknownFunction(_, span) => *span,
            Self::RegisterExhausted(span) => *span,
            Self::StringPoolExhausted(span) => *span,
            Self::FunctionAddressOutOfRange { span, .. } => *span,
            Self::General { span, .. } => *span,
        }
    }
}

/// Runtime errors raised by the virtual machine.
///
/// These carry no spans: once the machine traps, the bytecode has no source
/// positions left to point at.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("No bytecode to execute")]
    EmptyBytecode,

    #[error("String pool index {0} is out of bounds")]
    StringIndexOutOfBounds(u32),

    #[error("Unknown native function {0}")]
    UnknownNative(u8),

    #[error("Unknown opcode {0}")]
    UnknownOpcode(u8),

    #[error("Call stack overflow")]
    CallStackOverflow,

    #[error("Register index out of bounds")]
    RegisterOutOfBounds,

    #[error("Arithmetic on a string value")]
    StringArithmetic,

    #[error("Program ended without a HLT instruction")]
    MissingHalt,

    #[error("{0}")]
    General(String),
}

impl RuntimeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::General(message.into())
    }
}

/// Errors decoding a persisted program image.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image ended unexpectedly")]
    UnexpectedEndOfImage,

    #[error("Varint does not fit in 64 bits")]
    VarintOverflow,

    #[error("String data is not valid UTF-8")]
    InvalidUtf8,

    #[error("Function address {0} does not fit in 8 bits")]
    AddressOverflow(u64),

    #[error("{0} trailing bytes after the image")]
    TrailingBytes(usize),
}

/// A unified error type for all phases.
#[derive(Debug, Error)]
pub enum JunoError {
    #[error("Lexer error: {0}")]
    Lexer(#[from] LexerError),

    #[error("Parser error: {0}")]
    Parser(#[from] ParserError),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
