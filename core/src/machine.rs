use std::collections::VecDeque;
use std::io::Read;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{MAX_PROGRAM_SIZE, MAX_SAVED_STATES, OPCODE_SIZE};
use crate::display::FrameBuffer;
use crate::error::{Fault, LoadError};
use crate::instruction::Instruction;
use crate::keypad::{KeyState, Keypad};
use crate::operations::{self, StepOutcome};
use crate::registers::Registers;
use crate::state::State;

/// Knobs a host may turn when creating a `Machine`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    /// How many past states to keep for `rewind`; 0 disables rewinding
    pub history: usize,
    /// Seed for the random numbers produced by `Cxnn`; seeded from the OS when `None`
    pub seed: Option<u64>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            history: MAX_SAVED_STATES,
            seed: None,
        }
    }
}

/// # Machine
/// The virtual machine and the interface the outside world drives it through.
///
/// Tracks:
///  - the current `state`
///  - `previous_states` for rewinding
///  - the `keypad` with public interfaces for manipulating it
///  - the `fault` that halted it, if any
///
/// Supplies interfaces for:
/// - loading programs
/// - pressing and releasing keys
/// - stepping the interpreter forwards and backwards one instruction at a time
/// - ticking its timers, which the host does at 60Hz
/// - inspecting its frame buffer for rendering by some display
pub struct Machine {
    state: State,
    previous_states: VecDeque<State>,
    keypad: Keypad,
    rng: StdRng,
    history: usize,
    fault: Option<Fault>,
}

impl Machine {
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Machine {
            state: State::new(),
            previous_states: VecDeque::with_capacity(config.history),
            keypad: Keypad::new(),
            rng,
            history: config.history,
            fault: None,
        }
    }

    /// Copies a program image into memory at 0x200.
    pub fn load(&mut self, image: &[u8]) -> Result<(), LoadError> {
        self.state.memory.load(image)?;
        debug!("loaded {} byte program", image.len());
        Ok(())
    }

    /// Reads a whole program image from `reader` and loads it.
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a program
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), LoadError> {
        // One byte past the limit is enough to tell the image doesn't fit
        let mut image = Vec::new();
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut image)?;
        self.load(&image)
    }

    /// Returns to the power-on state, keeping the loaded program.
    pub fn reset(&mut self) {
        self.state = self.state.reset();
        self.previous_states.clear();
        self.keypad.release_all();
        self.fault = None;
        debug!("reset");
    }

    /// The display as it is right now.
    pub fn frame(&self) -> &FrameBuffer {
        self.state.display.frame()
    }

    /// Returns the FrameBuffer if the display changed since it was last taken.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(*self.state.display.frame())
        } else {
            None
        }
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the logical key 0x0..=0xF that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the logical key 0x0..=0xF that was released
    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Executes one instruction against the machine's own keypad.
    pub fn step(&mut self) -> Result<StepOutcome, Fault> {
        let keys = self.keypad;
        self.step_with(&keys)
    }

    /// Executes one instruction, answering key queries from `keys`.
    /// - refuses to run once halted by a fault
    /// - fetches the opcode at the pc and advances the pc past it
    /// - decodes and executes it
    ///
    /// On a fault the pc is put back on the faulting instruction and the machine halts.
    pub fn step_with(&mut self, keys: &dyn KeyState) -> Result<StepOutcome, Fault> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        self.save_state();

        let pc = self.state.registers.pc;
        let result = match self.state.fetch() {
            Ok(op) => {
                let instruction = Instruction::decode(op);
                trace!(
                    "{:04X} {:04X} {:<16} v{:02X?} i{:04X}",
                    pc,
                    op,
                    instruction.to_string(),
                    self.state.registers.v,
                    self.state.registers.i
                );
                self.state.registers.pc = pc.wrapping_add(OPCODE_SIZE);
                operations::execute(instruction, &mut self.state, keys, &mut self.rng)
            }
            Err(fault) => Err(fault.into()),
        };

        match result {
            Ok(StepOutcome::WaitingForKey) => {
                // Nothing changed so there's nothing worth rewinding to
                self.previous_states.pop_front();
            }
            Err(fault) => {
                self.state.registers.pc = pc;
                self.fault = Some(fault);
            }
            Ok(_) => {}
        }
        result
    }

    /// Decrements the delay and sound timers if they're nonzero.
    pub fn tick_timers(&mut self) {
        self.state.registers.tick_timers();
    }

    /// Whether the sound timer is still running.
    pub fn sound_active(&self) -> bool {
        self.state.registers.sound_timer > 0
    }

    /// Reverses the machine by a single step if possible
    /// - if there are previous_states, pops the last one and restores it
    /// - clears any fault, since the restored state came before it
    pub fn rewind(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                self.state = state;
                self.fault = None;
                true
            }
            None => false,
        }
    }

    /// The fault that halted the machine, if it is halted.
    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }

    pub fn registers(&self) -> &Registers {
        &self.state.registers
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Puts the current state in previous_states
    /// - if there are already `history` states saved then the oldest is dropped
    fn save_state(&mut self) {
        if self.history == 0 {
            return;
        }
        if self.previous_states.len() == self.history {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(self.state);
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MemoryFault, StackFault};

    fn machine_with(program: &[u8]) -> Machine {
        let mut machine = Machine::with_config(MachineConfig {
            history: 4,
            seed: Some(1),
        });
        machine.load(program).unwrap();
        machine
    }

    #[test]
    fn test_steps_one_instruction() {
        let mut machine = machine_with(&[0x00, 0xE0]);
        let starting_pc = machine.registers().pc;
        assert_eq!(machine.step(), Ok(StepOutcome::Redraw));
        assert_eq!(machine.registers().pc, starting_pc + 0x2);
    }

    #[test]
    fn test_load_rom_from_reader() {
        let mut machine = Machine::new();
        let mut program: &[u8] = &[0x60, 0x05];
        machine.load_rom(&mut program).unwrap();
        machine.step().unwrap();
        assert_eq!(machine.registers().v[0x0], 0x5);
    }

    #[test]
    fn test_load_rom_too_large() {
        let mut machine = Machine::new();
        let image = vec![0; 4000];
        let mut reader: &[u8] = &image;
        assert!(matches!(
            machine.load_rom(&mut reader),
            Err(LoadError::ImageTooLarge { size, .. }) if size == MAX_PROGRAM_SIZE + 1
        ));
        // Only what was needed to reject it gets read
        assert_eq!(reader.len(), 4000 - (MAX_PROGRAM_SIZE + 1));
        assert_eq!(machine.state().memory.read(0x200), Ok(0x0));
    }

    #[test]
    fn test_load_rom_fills_memory() {
        let mut machine = Machine::new();
        let image = vec![0xAB; MAX_PROGRAM_SIZE];
        let mut reader: &[u8] = &image;
        machine.load_rom(&mut reader).unwrap();
        assert_eq!(machine.state().memory.read(0xFFF), Ok(0xAB));
    }

    #[test]
    fn test_take_frame_only_when_changed() {
        let mut machine = machine_with(&[0x00, 0xE0, 0x60, 0x01]);
        assert!(machine.take_frame().is_none());
        machine.step().unwrap();
        assert!(machine.take_frame().is_some());
        assert!(machine.take_frame().is_none());
        machine.step().unwrap();
        assert!(machine.take_frame().is_none());
    }

    #[test]
    fn test_waits_for_key_press() {
        // LD V1, K
        let mut machine = machine_with(&[0xF1, 0x0A]);
        assert_eq!(machine.step(), Ok(StepOutcome::WaitingForKey));
        assert_eq!(machine.step(), Ok(StepOutcome::WaitingForKey));
        assert_eq!(machine.registers().pc, 0x200);
        machine.key_press(0xE);
        assert_eq!(machine.step(), Ok(StepOutcome::Continue));
        assert_eq!(machine.registers().v[0x1], 0xE);
        assert_eq!(machine.registers().pc, 0x202);
    }

    #[test]
    fn test_key_wait_not_saved_for_rewind() {
        // LD V0, 0x01; LD V1, K
        let mut machine = machine_with(&[0x60, 0x01, 0xF1, 0x0A]);
        machine.step().unwrap();
        for _ in 0..5 {
            assert_eq!(machine.step(), Ok(StepOutcome::WaitingForKey));
        }
        assert!(machine.rewind());
        assert_eq!(machine.registers().pc, 0x200);
        assert_eq!(machine.registers().v[0x0], 0x0);
        assert!(!machine.rewind());
    }

    #[test]
    fn test_key_release() {
        let mut machine = Machine::new();
        machine.key_press(0x3);
        machine.key_release(0x3);
        assert_eq!(machine.keypad().first_pressed(), None);
    }

    #[test]
    fn test_fault_halts_at_faulting_instruction() {
        // RET with nothing to return to
        let mut machine = machine_with(&[0x60, 0x01, 0x00, 0xEE]);
        machine.step().unwrap();
        let fault = Fault::Stack(StackFault::Underflow);
        assert_eq!(machine.step(), Err(fault));
        assert_eq!(machine.fault(), Some(fault));
        assert_eq!(machine.registers().pc, 0x202);
        // Halted machines stay put
        assert_eq!(machine.step(), Err(fault));
        assert_eq!(machine.registers().pc, 0x202);
        assert_eq!(machine.registers().v[0x0], 0x1);
    }

    #[test]
    fn test_fetch_past_memory_faults() {
        // JP 0xFFF
        let mut machine = machine_with(&[0x1F, 0xFF]);
        machine.step().unwrap();
        assert_eq!(
            machine.step(),
            Err(Fault::Memory(MemoryFault::AddressOutOfRange {
                address: 0x1000
            }))
        );
        assert_eq!(machine.registers().pc, 0xFFF);
    }

    #[test]
    fn test_timers_tick_down() {
        // LD V0, 0x02; LD DT, V0; LD ST, V0
        let mut machine = machine_with(&[0x60, 0x02, 0xF0, 0x15, 0xF0, 0x18]);
        for _ in 0..3 {
            machine.step().unwrap();
        }
        assert!(machine.sound_active());
        machine.tick_timers();
        assert_eq!(machine.registers().delay_timer, 0x1);
        machine.tick_timers();
        machine.tick_timers();
        assert_eq!(machine.registers().delay_timer, 0x0);
        assert!(!machine.sound_active());
    }

    #[test]
    fn test_rewind_restores_previous_state() {
        let mut machine = machine_with(&[0x60, 0x05, 0x70, 0x05]);
        machine.step().unwrap();
        machine.step().unwrap();
        assert_eq!(machine.registers().v[0x0], 0xA);
        assert!(machine.rewind());
        assert_eq!(machine.registers().v[0x0], 0x5);
        assert_eq!(machine.registers().pc, 0x202);
        assert!(machine.rewind());
        assert_eq!(machine.registers().pc, 0x200);
        assert!(!machine.rewind());
    }

    #[test]
    fn test_rewind_clears_fault() {
        let mut machine = machine_with(&[0x00, 0xEE]);
        assert!(machine.step().is_err());
        assert!(machine.rewind());
        assert_eq!(machine.fault(), None);
    }

    #[test]
    fn test_drops_old_saved_states() {
        let mut machine = machine_with(&[0x12, 0x00]);
        for _ in 0..10 {
            machine.step().unwrap();
        }
        assert_eq!(machine.previous_states.len(), 4);
    }

    #[test]
    fn test_history_disabled() {
        let mut machine = Machine::with_config(MachineConfig {
            history: 0,
            seed: None,
        });
        machine.load(&[0x12, 0x00]).unwrap();
        machine.step().unwrap();
        assert!(!machine.rewind());
    }

    #[test]
    fn test_reset_keeps_program() {
        let mut machine = machine_with(&[0x60, 0x05]);
        machine.step().unwrap();
        machine.key_press(0x1);
        machine.reset();
        assert_eq!(machine.registers().pc, 0x200);
        assert_eq!(machine.registers().v[0x0], 0x0);
        assert_eq!(machine.keypad().first_pressed(), None);
        machine.step().unwrap();
        assert_eq!(machine.registers().v[0x0], 0x5);
    }

    #[test]
    fn test_seeded_machines_agree() {
        // RND V0, 0xFF
        let program = [0xC0, 0xFF];
        let mut a = machine_with(&program);
        let mut b = machine_with(&program);
        a.step().unwrap();
        b.step().unwrap();
        assert_eq!(a.registers().v[0x0], b.registers().v[0x0]);
    }
}
