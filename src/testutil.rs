//! Simulated collaborators for driver and tracker tests.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorType, I2c, Operation};

/// An MPU-6050 standing on a fake bus: a plain register file with the
/// auto-incrementing address pointer the real part uses for burst reads.
/// WHO_AM_I answers with the device address out of the box.
pub struct FakeBus {
    regs: [u8; 0x80],
}

impl FakeBus {
    pub fn new() -> Self {
        let mut regs = [0u8; 0x80];
        regs[0x75] = 0x68;
        Self { regs }
    }

    pub fn register(&self, register: u8) -> u8 {
        self.regs[register as usize]
    }

    pub fn set_register(&mut self, register: u8, value: u8) {
        self.regs[register as usize] = value;
    }

    /// Store a big-endian sensor word at `register`, `register + 1`.
    pub fn set_word(&mut self, register: u8, value: i16) {
        let bytes = value.to_be_bytes();
        self.regs[register as usize] = bytes[0];
        self.regs[register as usize + 1] = bytes[1];
    }
}

impl ErrorType for FakeBus {
    type Error = Infallible;
}

impl I2c for FakeBus {
    fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut pointer = 0usize;
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    if let Some(&register) = bytes.first() {
                        pointer = register as usize;
                    }
                    for &value in &bytes[1..] {
                        self.regs[pointer] = value;
                        pointer += 1;
                    }
                }
                Operation::Read(buffer) => {
                    for slot in buffer.iter_mut() {
                        *slot = self.regs[pointer];
                        pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
