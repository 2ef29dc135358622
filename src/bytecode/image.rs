//! Binary image framing for compiled programs.
//!
//! Layout: varint word count followed by big-endian 32-bit instruction
//! words; varint string count followed by length-prefixed UTF-8 strings;
//! varint function count followed by (length-prefixed name, varint address)
//! pairs. Lengths and counts are unsigned LEB128.

use indexmap::IndexMap;

use crate::bytecode::program::Program;
use crate::error::ImageError;

/// Encode a program into its binary image.
pub fn encode(program: &Program) -> Vec<u8> {
    let mut out = Vec::new();

    write_varint(&mut out, program.bytecode.len() as u64);
    for word in &program.bytecode {
        out.extend_from_slice(&word.to_be_bytes());
    }

    write_varint(&mut out, program.string_pool.len() as u64);
    for s in &program.string_pool {
        write_varint(&mut out, s.len() as u64);
        out.extend_from_slice(s.as_bytes());
    }

    write_varint(&mut out, program.functions.len() as u64);
    for (name, addr) in &program.functions {
        write_varint(&mut out, name.len() as u64);
        out.extend_from_slice(name.as_bytes());
        write_varint(&mut out, *addr as u64);
    }

    out
}

/// Decode a binary image back into a program.
pub fn decode(bytes: &[u8]) -> Result<Program, ImageError> {
    let mut reader = Reader::new(bytes);

    let word_count = reader.read_varint()? as usize;
    let mut bytecode = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        bytecode.push(u32::from_be_bytes(reader.read_array()?));
    }

    let string_count = reader.read_varint()? as usize;
    let mut string_pool = Vec::with_capacity(string_count);
    for _ in 0..string_count {
        string_pool.push(reader.read_string()?);
    }

    let function_count = reader.read_varint()? as usize;
    let mut functions = IndexMap::with_capacity(function_count);
    for _ in 0..function_count {
        let name = reader.read_string()?;
        let addr = reader.read_varint()?;
        let addr = u8::try_from(addr).map_err(|_| ImageError::AddressOverflow(addr))?;
        functions.insert(name, addr);
    }

    if !reader.is_empty() {
        return Err(ImageError::TrailingBytes(reader.remaining()));
    }

    Ok(Program {
        bytecode,
        string_pool,
        functions,
    })
}

fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Cursor over an image's bytes.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn read_byte(&mut self) -> Result<u8, ImageError> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or(ImageError::UnexpectedEndOfImage)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_varint(&mut self) -> Result<u64, ImageError> {
        let mut value: u64 = 0;
        let mut shift = 0u32;
        loop {
            let byte = self.read_byte()?;
            if shift >= 64 {
                return Err(ImageError::VarintOverflow);
            }
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ImageError> {
        let end = self
            .pos
            .checked_add(N)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(ImageError::UnexpectedEndOfImage)?;
        let mut array = [0u8; N];
        array.copy_from_slice(&self.bytes[self.pos..end]);
        self.pos = end;
        Ok(array)
    }

    fn read_string(&mut self) -> Result<String, ImageError> {
        let len = self.read_varint()? as usize;
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(ImageError::UnexpectedEndOfImage)?;
        let s = std::str::from_utf8(&self.bytes[self.pos..end])
            .map_err(|_| ImageError::InvalidUtf8)?
            .to_string();
        self.pos = end;
        Ok(s)
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
    fn test_round_trip() {
        let program = compile(
            "fn add(a: int, b: int) -> int { return a + b; }
             let s = \"hello\";
             print(add(2, 3), s);",
        );

        let decoded = decode(&encode(&program)).unwrap();
        assert_eq!(decoded.bytecode, program.bytecode);
        assert_eq!(decoded.string_pool, program.string_pool);
        assert_eq!(decoded.functions, program.functions);
    }

    #[test]
    fn test_empty_program() {
        let decoded = decode(&encode(&Program::new())).unwrap();
        assert!(decoded.bytecode.is_empty());
        assert!(decoded.string_pool.is_empty());
        assert!(decoded.functions.is_empty());
    }

    #[test]
    fn test_decoded_image_executes() {
        use crate::bytecode::vm::Machine;

        let image = encode(&compile("@comptime let x = 6 * 7;"));
        let mut machine = Machine::new();
        machine.load_program(decode(&image).unwrap());
        assert_eq!(machine.execute().unwrap(), 42);
    }

    #[test]
    fn test_truncated_image_fails() {
        let image = encode(&compile("let x = 1;"));
        assert!(matches!(
            decode(&image[..image.len() - 1]),
            Err(ImageError::UnexpectedEndOfImage)
        ));
    }

    #[test]
    fn test_trailing_bytes_fail() {
        let mut image = encode(&compile("let x = 1;"));
        image.push(0);
        assert!(matches!(decode(&image), Err(ImageError::TrailingBytes(1))));
    }

    #[test]
    fn test_varint_boundaries() {
        let mut out = Vec::new();
        for value in [0u64, 127, 128, 300, 16383, 16384, u32::MAX as u64] {
            out.clear();
            write_varint(&mut out, value);
            let mut reader = Reader::new(&out);
            assert_eq!(reader.read_varint().unwrap(), value);
            assert!(reader.is_empty());
        }
    }
}
