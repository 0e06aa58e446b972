use derive_more::Display;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use nalgebra::UnitQuaternion;

use crate::face;
use crate::mpu6050::Mpu6050;
use crate::orientation::Madgwick;
use crate::Result;

/// Acquisition rate the fusion filter is tuned for
pub const SAMPLE_FREQ_HZ: f32 = 100.0;

#[derive(Debug, Display)]
pub enum Error {
    #[display("MPU6050 does not acknowledge on the bus")]
    SensorUnavailable,
    #[display("Can not initialize MPU6050")]
    MpuInit,
    #[display("Can not read motion sample")]
    MotionRead,
}

/// One sensing cycle: acquire a sample, advance the attitude estimate,
/// classify which face points up.
pub struct FaceTracker<I2C> {
    mpu: Mpu6050<I2C>,
    filter: Madgwick,
}

impl<I2C: I2c> FaceTracker<I2C> {
    fn setup_mpu<D: DelayNs>(delay: &mut D, i2c: I2C) -> Result<Mpu6050<I2C>> {
        let mut mpu = Mpu6050::new(i2c);
        mpu.init(delay).map_err(|_| Error::MpuInit)?;

        if !mpu.test_connection().map_err(|_| Error::MpuInit)? {
            return Err(Error::SensorUnavailable.into());
        }
        Ok(mpu)
    }

    pub fn new<D: DelayNs>(i2c: I2C, delay: &mut D) -> Result<Self> {
        log::info!("Starting Mpu set up...");
        let mpu = Self::setup_mpu(delay, i2c)?;
        log::info!("Finished Mpu set up.");

        Ok(Self {
            mpu,
            filter: Madgwick::new(SAMPLE_FREQ_HZ),
        })
    }

    /// Read one motion sample, fuse it and classify the gravity vector.
    ///
    /// Returns the face id in `0..=6`, 0 when no face is close enough.
    pub fn step(&mut self) -> Result<u8> {
        let sample = self.mpu.motion6().map_err(|_| Error::MotionRead)?;

        let accel = sample.accel_g();
        let [gx, gy, gz] = sample.gyro_dps();
        self.filter.update_imu(
            [gx.to_radians(), gy.to_radians(), gz.to_radians()],
            accel,
        );

        Ok(face::classify(accel[0], accel[1], accel[2]))
    }

    pub fn attitude(&self) -> UnitQuaternion<f32> {
        self.filter.quaternion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeBus, NoDelay};
    use approx::assert_relative_eq;

    /// Accel z high-byte register; x is at 0x3B, one word per axis.
    const ACC_Z: u8 = 0x3F;
    const ACC_X: u8 = 0x3B;
    const ONE_G: i16 = 16384;

    #[test]
    fn missing_sensor_is_fatal() {
        let mut bus = FakeBus::new();
        bus.set_register(0x75, 0x00);
        let result = FaceTracker::new(bus, &mut NoDelay);
        assert!(matches!(
            result,
            Err(crate::Error::Tracker(Error::SensorUnavailable))
        ));
    }

    #[test]
    fn reports_top_face_at_rest() {
        let mut bus = FakeBus::new();
        bus.set_word(ACC_Z, ONE_G);
        let mut tracker = FaceTracker::new(bus, &mut NoDelay).unwrap();
        assert_eq!(tracker.step().unwrap(), 1);
    }

    #[test]
    fn reports_right_face_on_its_side() {
        let mut bus = FakeBus::new();
        bus.set_word(ACC_X, ONE_G);
        let mut tracker = FaceTracker::new(bus, &mut NoDelay).unwrap();
        assert_eq!(tracker.step().unwrap(), 2);
    }

    #[test]
    fn edge_resting_position_is_undefined() {
        // equal x and z components, the cube balanced on an edge
        let mut bus = FakeBus::new();
        bus.set_word(ACC_X, 11585);
        bus.set_word(ACC_Z, 11585);
        let mut tracker = FaceTracker::new(bus, &mut NoDelay).unwrap();
        assert_eq!(tracker.step().unwrap(), face::UNDEFINED);
    }

    #[test]
    fn attitude_converges_toward_sustained_gravity() {
        let mut bus = FakeBus::new();
        bus.set_word(ACC_X, ONE_G);
        let mut tracker = FaceTracker::new(bus, &mut NoDelay).unwrap();
        for _ in 0..3000 {
            tracker.step().unwrap();
        }
        // gravity along +x is a quarter turn away from the identity attitude
        assert_relative_eq!(
            tracker.attitude().angle(),
            core::f32::consts::FRAC_PI_2,
            epsilon = 0.05
        );
    }
}
