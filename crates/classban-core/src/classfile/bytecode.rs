//! Instruction walk over a method's code array.
//!
//! The walk:
//! - performs a single linear pass over the instruction stream
//! - does not build a control-flow graph
//! - does not attempt to reason about semantics
//!
//! Only the operands that can name a type are surfaced: constant pool
//! indices of class, field, method and dynamic call-site references plus
//! `ldc`-family constants. Everything else is stepped over by width.
//! Resolution against the constant pool happens in `decode`, which owns
//! the pool.

use super::ClassFileError;

/// A type-bearing operand found at some instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsnRef {
    /// `new`, `anewarray`, `checkcast`, `instanceof`, `multianewarray`:
    /// a `CONSTANT_Class` index.
    Class(u16),

    /// `getfield`, `putfield`, `getstatic`, `putstatic`: a
    /// `CONSTANT_Fieldref` index.
    Field(u16),

    /// `invokevirtual`, `invokespecial`, `invokestatic`,
    /// `invokeinterface`: a method reference index.
    Method(u16),

    /// `invokedynamic`: a `CONSTANT_InvokeDynamic` index.
    Dynamic(u16),

    /// `ldc`, `ldc_w`, `ldc2_w`: a loadable constant index. Only class
    /// constants end up mattering; the caller filters by pool tag.
    Constant(u16),
}

/// Walks `code` once, invoking `visit` for every type-bearing operand in
/// instruction order.
pub fn walk<F>(code: &[u8], mut visit: F) -> Result<(), ClassFileError>
where
    F: FnMut(InsnRef) -> Result<(), ClassFileError>,
{
    let mut pc = 0usize;
    while pc < code.len() {
        let opcode = code[pc];
        match opcode {
            // new, anewarray, checkcast, instanceof
            0xbb | 0xbd | 0xc0 | 0xc1 => {
                visit(InsnRef::Class(read_u16(code, pc + 1, pc)?))?;
                pc += 3;
            }
            // multianewarray: class index plus dimension count
            0xc5 => {
                visit(InsnRef::Class(read_u16(code, pc + 1, pc)?))?;
                pc += 4;
            }
            // getstatic, putstatic, getfield, putfield
            0xb2..=0xb5 => {
                visit(InsnRef::Field(read_u16(code, pc + 1, pc)?))?;
                pc += 3;
            }
            // invokevirtual, invokespecial, invokestatic
            0xb6..=0xb8 => {
                visit(InsnRef::Method(read_u16(code, pc + 1, pc)?))?;
                pc += 3;
            }
            // invokeinterface: index, count byte, zero byte
            0xb9 => {
                visit(InsnRef::Method(read_u16(code, pc + 1, pc)?))?;
                pc += 5;
            }
            // invokedynamic: index, two zero bytes
            0xba => {
                visit(InsnRef::Dynamic(read_u16(code, pc + 1, pc)?))?;
                pc += 5;
            }
            // ldc: single-byte pool index
            0x12 => {
                visit(InsnRef::Constant(read_u8(code, pc + 1, pc)? as u16))?;
                pc += 2;
            }
            // ldc_w, ldc2_w
            0x13 | 0x14 => {
                visit(InsnRef::Constant(read_u16(code, pc + 1, pc)?))?;
                pc += 3;
            }
            // tableswitch and lookupswitch pad their operands to a 4-byte
            // boundary relative to the start of the code array.
            0xaa => {
                let base = aligned_base(code, pc)?;
                let low = read_i32(code, base + 4, pc)?;
                let high = read_i32(code, base + 8, pc)?;
                let entries = i64::from(high) - i64::from(low) + 1;
                if entries < 0 {
                    return Err(error(pc, "tableswitch range is inverted"));
                }
                pc = checked_end(code, base + 12, entries as usize * 4, pc)?;
            }
            0xab => {
                let base = aligned_base(code, pc)?;
                let npairs = read_i32(code, base + 4, pc)?;
                if npairs < 0 {
                    return Err(error(pc, "lookupswitch pair count is negative"));
                }
                pc = checked_end(code, base + 8, npairs as usize * 8, pc)?;
            }
            // wide widens the index operand of the next opcode.
            0xc4 => {
                pc += match read_u8(code, pc + 1, pc)? {
                    0x84 => 6,
                    0x15..=0x19 | 0x36..=0x3a | 0xa9 => 4,
                    other => {
                        return Err(error(
                            pc,
                            &format!("opcode 0x{other:02x} cannot be widened"),
                        ));
                    }
                };
            }
            // Single-byte operand: bipush, loads, stores, ret, newarray.
            0x10 | 0x15..=0x19 | 0x36..=0x3a | 0xa9 | 0xbc => pc += 2,
            // Two-byte operand: sipush, iinc, branches, ifnull/ifnonnull.
            0x11 | 0x84 | 0x99..=0xa8 | 0xc6 | 0xc7 => pc += 3,
            // Four-byte operand: goto_w, jsr_w.
            0xc8 | 0xc9 => pc += 5,
            // No operand.
            0x00..=0x0f
            | 0x1a..=0x35
            | 0x3b..=0x83
            | 0x85..=0x98
            | 0xac..=0xb1
            | 0xbe
            | 0xbf
            | 0xc2
            | 0xc3 => pc += 1,
            other => {
                return Err(error(pc, &format!("unknown opcode 0x{other:02x}")));
            }
        }
        if pc > code.len() {
            return Err(error(pc, "instruction overruns code array"));
        }
    }
    Ok(())
}

fn error(pc: usize, detail: &str) -> ClassFileError {
    ClassFileError::Bytecode {
        pc,
        detail: detail.to_string(),
    }
}

fn read_u8(code: &[u8], at: usize, pc: usize) -> Result<u8, ClassFileError> {
    code.get(at)
        .copied()
        .ok_or_else(|| error(pc, "truncated instruction"))
}

fn read_u16(code: &[u8], at: usize, pc: usize) -> Result<u16, ClassFileError> {
    match code.get(at..at + 2) {
        Some(bytes) => Ok(u16::from_be_bytes([bytes[0], bytes[1]])),
        None => Err(error(pc, "truncated instruction")),
    }
}

fn read_i32(code: &[u8], at: usize, pc: usize) -> Result<i32, ClassFileError> {
    match code.get(at..at + 4) {
        Some(bytes) => Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
        None => Err(error(pc, "truncated instruction")),
    }
}

/// Start of a switch's operands: past the opcode and the alignment pad,
/// with the 32-bit default offset validated to be in bounds.
fn aligned_base(code: &[u8], pc: usize) -> Result<usize, ClassFileError> {
    let pad = (4 - ((pc + 1) % 4)) % 4;
    let base = pc + 1 + pad;
    read_i32(code, base, pc)?;
    Ok(base)
}

fn checked_end(
    code: &[u8],
    table_start: usize,
    table_bytes: usize,
    pc: usize,
) -> Result<usize, ClassFileError> {
    let end = table_start
        .checked_add(table_bytes)
        .ok_or_else(|| error(pc, "switch table overflows"))?;
    if end > code.len() {
        return Err(error(pc, "switch table overruns code array"));
    }
    Ok(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(code: &[u8]) -> Vec<InsnRef> {
        let mut found = Vec::new();
        walk(code, |r| {
            found.push(r);
            Ok(())
        })
        .expect("walk succeeds");
        found
    }

    #[test]
    fn collects_type_instruction_operands() {
        // new #7; dup; checkcast #9; pop; return
        let code = [0xbb, 0x00, 0x07, 0x59, 0xc0, 0x00, 0x09, 0x57, 0xb1];
        assert_eq!(refs(&code), vec![InsnRef::Class(7), InsnRef::Class(9)]);
    }

    #[test]
    fn collects_field_method_and_dynamic_operands() {
        let code = [
            0xb4, 0x00, 0x02, // getfield #2
            0xb6, 0x00, 0x03, // invokevirtual #3
            0xb9, 0x00, 0x04, 0x01, 0x00, // invokeinterface #4
            0xba, 0x00, 0x05, 0x00, 0x00, // invokedynamic #5
            0xb1, // return
        ];
        assert_eq!(
            refs(&code),
            vec![
                InsnRef::Field(2),
                InsnRef::Method(3),
                InsnRef::Method(4),
                InsnRef::Dynamic(5),
            ]
        );
    }

    #[test]
    fn collects_ldc_family_operands() {
        let code = [
            0x12, 0x06, // ldc #6
            0x13, 0x01, 0x00, // ldc_w #256
            0x14, 0x00, 0x08, // ldc2_w #8
            0xb1,
        ];
        assert_eq!(
            refs(&code),
            vec![
                InsnRef::Constant(6),
                InsnRef::Constant(256),
                InsnRef::Constant(8),
            ]
        );
    }

    #[test]
    fn collects_multianewarray_operand() {
        let code = [0xc5, 0x00, 0x0a, 0x02, 0xb1];
        assert_eq!(refs(&code), vec![InsnRef::Class(10)]);
    }

    #[test]
    fn steps_over_tableswitch_padding_and_table() {
        // iconst_0 at pc 0, tableswitch at pc 1: operands at pc 2, so two
        // pad bytes reach the 4-byte boundary. Range 0..=1 gives two
        // offsets. A trailing `new` proves the walk resynchronized.
        let code = [
            0x03, // iconst_0
            0xaa, 0x00, 0x00, // tableswitch + pad
            0x00, 0x00, 0x00, 0x14, // default
            0x00, 0x00, 0x00, 0x00, // low = 0
            0x00, 0x00, 0x00, 0x01, // high = 1
            0x00, 0x00, 0x00, 0x14, // offset 0
            0x00, 0x00, 0x00, 0x14, // offset 1
            0xbb, 0x00, 0x02, // new #2
            0x57, 0xb1, // pop; return
        ];
        assert_eq!(refs(&code), vec![InsnRef::Class(2)]);
    }

    #[test]
    fn steps_over_lookupswitch_pairs() {
        // lookupswitch at pc 0: operands at pc 1, three pad bytes.
        let code = [
            0xab, 0x00, 0x00, 0x00, // lookupswitch + pad
            0x00, 0x00, 0x00, 0x10, // default
            0x00, 0x00, 0x00, 0x01, // npairs = 1
            0x00, 0x00, 0x00, 0x2a, // match 42
            0x00, 0x00, 0x00, 0x10, // offset
            0xbb, 0x00, 0x03, // new #3
            0x57, 0xb1,
        ];
        assert_eq!(refs(&code), vec![InsnRef::Class(3)]);
    }

    #[test]
    fn steps_over_wide_forms() {
        let code = [
            0xc4, 0x84, 0x00, 0x05, 0x00, 0x01, // wide iinc
            0xc4, 0x19, 0x00, 0x05, // wide aload
            0xb1,
        ];
        assert!(refs(&code).is_empty());
    }

    #[test]
    fn empty_code_yields_nothing() {
        assert!(refs(&[]).is_empty());
    }

    #[test]
    fn truncated_operand_errors() {
        let result = walk(&[0xbb, 0x00], |_| Ok(()));
        assert!(matches!(result, Err(ClassFileError::Bytecode { .. })));
    }

    #[test]
    fn unknown_opcode_errors() {
        let result = walk(&[0xca], |_| Ok(()));
        assert!(matches!(result, Err(ClassFileError::Bytecode { pc: 0, .. })));
    }

    #[test]
    fn unwidenable_opcode_errors() {
        let result = walk(&[0xc4, 0xbb, 0x00, 0x01], |_| Ok(()));
        assert!(result.is_err());
    }

    #[test]
    fn inverted_tableswitch_range_errors() {
        let code = [
            0xaa, 0x00, 0x00, 0x00, // tableswitch + pad
            0x00, 0x00, 0x00, 0x10, // default
            0x00, 0x00, 0x00, 0x05, // low = 5
            0x00, 0x00, 0x00, 0x00, // high = 0
        ];
        assert!(walk(&code, |_| Ok(())).is_err());
    }

    #[test]
    fn truncated_switch_header_errors() {
        assert!(walk(&[0xab], |_| Ok(())).is_err());
    }

    #[test]
    fn visitor_errors_propagate() {
        let code = [0xbb, 0x00, 0x07];
        let result = walk(&code, |_| {
            Err(ClassFileError::Bytecode {
                pc: 0,
                detail: "stop".into(),
            })
        });
        assert!(result.is_err());
    }
}
