use std::fmt;

use crate::opcode::Opcode;

/// A decoded opcode.
///
/// Register operands are nibbles 0x0..=0xF, `nn` is an immediate byte and `addr` a 12-bit address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// clear the display
    Clr,
    /// PC = STACK.pop()
    Rts,
    /// PC = addr
    Jump { addr: u16 },
    /// STACK.push(PC); PC = addr
    Call { addr: u16 },
    /// if Vx == nn then skip
    Ske { x: u8, nn: u8 },
    /// if Vx != nn then skip
    Skne { x: u8, nn: u8 },
    /// if Vx == Vy then skip
    Skre { x: u8, y: u8 },
    /// Vx = nn
    Load { x: u8, nn: u8 },
    /// Vx += nn
    Add { x: u8, nn: u8 },
    /// Vx = Vy
    Mv { x: u8, y: u8 },
    /// Vx |= Vy
    Or { x: u8, y: u8 },
    /// Vx &= Vy
    And { x: u8, y: u8 },
    /// Vx ^= Vy
    Xor { x: u8, y: u8 },
    /// Vx += Vy; VF = carry
    Addr { x: u8, y: u8 },
    /// Vx -= Vy; VF = !borrow
    Sub { x: u8, y: u8 },
    /// Vx = Vy >> 1; VF = shifted out bit
    Shr { x: u8, y: u8 },
    /// Vx = Vy - Vx; VF = !borrow
    Subn { x: u8, y: u8 },
    /// Vx = Vy << 1; VF = shifted out bit
    Shl { x: u8, y: u8 },
    /// if Vx != Vy then skip
    Skrne { x: u8, y: u8 },
    /// I = addr
    LoadI { addr: u16 },
    /// PC = V0 + addr
    JumpI { addr: u16 },
    /// Vx = random & nn
    Rand { x: u8, nn: u8 },
    /// draw an n byte sprite from memory at I to (Vx, Vy); VF = collision
    Draw { x: u8, y: u8, n: u8 },
    /// if key Vx is pressed then skip
    Skpr { x: u8 },
    /// if key Vx is released then skip
    Skup { x: u8 },
    /// Vx = DT
    MoveD { x: u8 },
    /// Vx = next key pressed
    KeyD { x: u8 },
    /// DT = Vx
    LoadD { x: u8 },
    /// ST = Vx
    LoadS { x: u8 },
    /// I += Vx
    AddI { x: u8 },
    /// I = address of the glyph for Vx
    LdSpr { x: u8 },
    /// mem[I..I+3] = bcd(Vx)
    Bcd { x: u8 },
    /// mem[I..=I+x] = V0..=Vx; I += x + 1
    Stor { x: u8 },
    /// V0..=Vx = mem[I..=I+x]; I += x + 1
    Read { x: u8 },
    /// Anything else, including machine code routines (`0nnn`); executed as a no-op
    Unknown(u16),
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode
    pub fn decode(op: u16) -> Self {
        let (x, y, n, nn, addr) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Clr,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Rts,
            (0x1, ..) => Instruction::Jump { addr },
            (0x2, ..) => Instruction::Call { addr },
            (0x3, ..) => Instruction::Ske { x, nn },
            (0x4, ..) => Instruction::Skne { x, nn },
            (0x5, .., 0x0) => Instruction::Skre { x, y },
            (0x6, ..) => Instruction::Load { x, nn },
            (0x7, ..) => Instruction::Add { x, nn },
            (0x8, .., 0x0) => Instruction::Mv { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::Addr { x, y },
            (0x8, .., 0x5) => Instruction::Sub { x, y },
            (0x8, .., 0x6) => Instruction::Shr { x, y },
            (0x8, .., 0x7) => Instruction::Subn { x, y },
            (0x8, .., 0xE) => Instruction::Shl { x, y },
            (0x9, .., 0x0) => Instruction::Skrne { x, y },
            (0xA, ..) => Instruction::LoadI { addr },
            (0xB, ..) => Instruction::JumpI { addr },
            (0xC, ..) => Instruction::Rand { x, nn },
            (0xD, ..) => Instruction::Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => Instruction::Skpr { x },
            (0xE, _, 0xA, 0x1) => Instruction::Skup { x },
            (0xF, _, 0x0, 0x7) => Instruction::MoveD { x },
            (0xF, _, 0x0, 0xA) => Instruction::KeyD { x },
            (0xF, _, 0x1, 0x5) => Instruction::LoadD { x },
            (0xF, _, 0x1, 0x8) => Instruction::LoadS { x },
            (0xF, _, 0x1, 0xE) => Instruction::AddI { x },
            (0xF, _, 0x2, 0x9) => Instruction::LdSpr { x },
            (0xF, _, 0x3, 0x3) => Instruction::Bcd { x },
            (0xF, _, 0x5, 0x5) => Instruction::Stor { x },
            (0xF, _, 0x6, 0x5) => Instruction::Read { x },
            _ => Instruction::Unknown(op),
        }
    }
}

impl From<u16> for Instruction {
    fn from(op: u16) -> Self {
        Instruction::decode(op)
    }
}

/// Conventional assembler mnemonics, e.g. `LD V1, 0x22`
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;
        match *self {
            Clr => write!(f, "CLS"),
            Rts => write!(f, "RET"),
            Jump { addr } => write!(f, "JP {:#05X}", addr),
            Call { addr } => write!(f, "CALL {:#05X}", addr),
            Ske { x, nn } => write!(f, "SE V{:X}, {:#04X}", x, nn),
            Skne { x, nn } => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            Skre { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Load { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            Add { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Mv { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Addr { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Shr { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Shl { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            Skrne { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadI { addr } => write!(f, "LD I, {:#05X}", addr),
            JumpI { addr } => write!(f, "JP V0, {:#05X}", addr),
            Rand { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {:#X}", x, y, n),
            Skpr { x } => write!(f, "SKP V{:X}", x),
            Skup { x } => write!(f, "SKNP V{:X}", x),
            MoveD { x } => write!(f, "LD V{:X}, DT", x),
            KeyD { x } => write!(f, "LD V{:X}, K", x),
            LoadD { x } => write!(f, "LD DT, V{:X}", x),
            LoadS { x } => write!(f, "LD ST, V{:X}", x),
            AddI { x } => write!(f, "ADD I, V{:X}", x),
            LdSpr { x } => write!(f, "LD F, V{:X}", x),
            Bcd { x } => write!(f, "LD B, V{:X}", x),
            Stor { x } => write!(f, "LD [I], V{:X}", x),
            Read { x } => write!(f, "LD V{:X}, [I]", x),
            Unknown(op) => write!(f, "DW {:#06X}", op),
        }
    }
}
