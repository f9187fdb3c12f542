/// # Opcodes
///
/// Opcodes are 16 bits wide and fetched big-endian from two consecutive bytes of memory.
/// Their behavior is cased on some combination of:
/// - `(n, _, _, _)` the instruction family; applies to all opcodes
/// - `(_, _, _, n)` the operation within families 0x5, 0x8 and 0x9
/// - `(_, _, n, n)` the operation within families 0x0, 0xE and 0xF
///
/// The remaining nibbles carry operands.
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` an immediate byte compared with or assigned to Vx
/// - `(_, n, _, _)` the register Vx, or the range V0..=Vx
/// - `(_, _, n, _)` the register Vy
/// - `(_, _, _, n)` a sprite height
pub trait Opcode {
    /// Returns the Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The Opcode's most significant nibble.
    /// `[f___]`
    fn family(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> u8;

    /// `[__y_]`
    fn y(&self) -> u8;

    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__nn]`
    fn nn(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    fn family(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    const OP: u16 = 0xABCD;

    #[test]
    fn test_nibbles() {
        assert_eq!(OP.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_family() {
        assert_eq!(OP.family(), 0xA);
    }

    #[test]
    fn test_operands() {
        assert_eq!((OP.x(), OP.y(), OP.n()), (0xB, 0xC, 0xD));
    }

    #[test]
    fn test_nn() {
        assert_eq!(OP.nn(), 0xCD);
    }

    #[test]
    fn test_nnn() {
        assert_eq!(OP.nnn(), 0x0BCD);
    }
}
