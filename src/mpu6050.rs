use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Mpu6050 device address
const DEVICE_ADDR: u8 = 0x68;
/// WHO_AM_I register, reads back the device address
const WHO_AM_I_ADDR: u8 = 0x75;
/// Digital Low Pass Filter address
const DLPF_ADDR: u8 = 0x1A;
/// DLPF configuration of 10Hz bandwidth filter
const DLPF_CFG_10HZ: u8 = 0x05;
/// Gyro config address
const GYR_ADDR: u8 = 0x1B;
/// Gyro range configuration, +-250 deg/s
const GYR_CONF_250: u8 = 0x00;
/// Accelerometer config address
const ACC_ADDR: u8 = 0x1C;
/// Accelerometer range configuration, +-2g
const ACC_CONF_2G: u8 = 0x00;
/// Gyro sensitivity for LSB at +-250 deg/s
const GYR_250_LSB_SENS: f32 = 131.0;
/// Accelerometer sensitivity for LSB at +-2g
const ACC_2G_LSB_SENS: f32 = 16384.0;

/// High Byte Register Accel x orientation, start of the burst read block
const ACC_REGX_H: u8 = 0x3B;

/// Power management register
const PWR_MGMT_ADDR: u8 = 0x6B;
/// Wake from sleep with the temperature sensor disabled
const PWR_MGMT_TEMP_DIS: u8 = 0x08;

/// One burst reading of the six motion axes, in sensor-native units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionSample {
    pub accel: [i16; 3],
    pub gyro: [i16; 3],
}

impl MotionSample {
    /// Acceleration in g for the +-2g range.
    pub fn accel_g(&self) -> [f32; 3] {
        [
            self.accel[0] as f32 / ACC_2G_LSB_SENS,
            self.accel[1] as f32 / ACC_2G_LSB_SENS,
            self.accel[2] as f32 / ACC_2G_LSB_SENS,
        ]
    }

    /// Angular rate in deg/s for the +-250 deg/s range.
    pub fn gyro_dps(&self) -> [f32; 3] {
        [
            self.gyro[0] as f32 / GYR_250_LSB_SENS,
            self.gyro[1] as f32 / GYR_250_LSB_SENS,
            self.gyro[2] as f32 / GYR_250_LSB_SENS,
        ]
    }
}

#[derive(Debug)]
pub struct Mpu6050<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Mpu6050<I2C> {
    /// Create a new instance of the Mpu6050
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), I2C::Error> {
        delay.delay_ms(250);
        self.write_byte(PWR_MGMT_ADDR, PWR_MGMT_TEMP_DIS)?;
        delay.delay_ms(100);
        // switch on the low pass filter
        self.write_byte(DLPF_ADDR, DLPF_CFG_10HZ)?;

        // set the sensitivity scale factors matching the LSB constants
        self.write_byte(GYR_ADDR, GYR_CONF_250)?;
        self.write_byte(ACC_ADDR, ACC_CONF_2G)?;
        Ok(())
    }

    /// Whether the device acknowledges with its own address.
    pub fn test_connection(&mut self) -> Result<bool, I2C::Error> {
        Ok(self.read_byte(WHO_AM_I_ADDR)? == DEVICE_ADDR)
    }

    /// Burst read of the six motion axes. The block covers accel, the
    /// temperature word and gyro; the temperature word is discarded.
    pub fn motion6(&mut self) -> Result<MotionSample, I2C::Error> {
        let mut buffer = [0u8; 14];
        self.i2c
            .write_read(DEVICE_ADDR, &[ACC_REGX_H], &mut buffer)?;

        Ok(MotionSample {
            accel: [
                word(buffer[0], buffer[1]),
                word(buffer[2], buffer[3]),
                word(buffer[4], buffer[5]),
            ],
            gyro: [
                word(buffer[8], buffer[9]),
                word(buffer[10], buffer[11]),
                word(buffer[12], buffer[13]),
            ],
        })
    }

    fn write_byte(&mut self, register: u8, byte: u8) -> Result<(), I2C::Error> {
        self.i2c.write(DEVICE_ADDR, &[register, byte])
    }

    fn read_byte(&mut self, register: u8) -> Result<u8, I2C::Error> {
        let mut buffer = [0];
        self.i2c
            .write_read(DEVICE_ADDR, &[register], &mut buffer)?;
        Ok(buffer[0])
    }
}

fn word(high: u8, low: u8) -> i16 {
    (((high as u16) << 8) | low as u16) as i16
}
