//! IMU orientation fusion.
//!
//! Madgwick's gradient-descent filter over gyroscope and accelerometer
//! samples, run at a fixed sample rate. The gyroscope drives the attitude
//! between samples; the accelerometer pulls the estimated gravity direction
//! back onto the measured one.

use nalgebra::{Quaternion, UnitQuaternion};

/// Algorithm gain, the standard value for consumer IMUs
const BETA_DEFAULT: f32 = 0.1;
/// Below this magnitude the accelerometer carries no direction (free fall)
const MIN_ACCEL_MAGNITUDE: f32 = 1e-6;

pub struct Madgwick {
    /// Attitude estimate as (w, x, y, z), sensor frame relative to earth
    q: [f32; 4],
    beta: f32,
    sample_period: f32,
}

impl Madgwick {
    pub fn new(sample_freq_hz: f32) -> Self {
        Self::with_gain(sample_freq_hz, BETA_DEFAULT)
    }

    pub fn with_gain(sample_freq_hz: f32, beta: f32) -> Self {
        Self {
            q: [1.0, 0.0, 0.0, 0.0],
            beta,
            sample_period: 1.0 / sample_freq_hz,
        }
    }

    /// Advance the attitude estimate by one sample period.
    ///
    /// `gyro_rad` is the angular rate in rad/s, `accel` the specific force in
    /// any consistent unit (it is normalized). A degenerate accelerometer
    /// reading skips the correction step and integrates the gyroscope alone.
    pub fn update_imu(&mut self, gyro_rad: [f32; 3], accel: [f32; 3]) {
        let [gx, gy, gz] = gyro_rad;
        let [mut ax, mut ay, mut az] = accel;
        let [q0, q1, q2, q3] = self.q;

        // quaternion rate of change from the gyroscope
        let mut q_dot0 = 0.5 * (-q1 * gx - q2 * gy - q3 * gz);
        let mut q_dot1 = 0.5 * (q0 * gx + q2 * gz - q3 * gy);
        let mut q_dot2 = 0.5 * (q0 * gy - q1 * gz + q3 * gx);
        let mut q_dot3 = 0.5 * (q0 * gz + q1 * gy - q2 * gx);

        let magnitude = (ax * ax + ay * ay + az * az).sqrt();
        if magnitude > MIN_ACCEL_MAGNITUDE {
            ax /= magnitude;
            ay /= magnitude;
            az /= magnitude;

            let q0q0 = q0 * q0;
            let q1q1 = q1 * q1;
            let q2q2 = q2 * q2;
            let q3q3 = q3 * q3;

            // gradient of the objective aligning estimated and measured gravity
            let s0 = 4.0 * q0 * q2q2 + 2.0 * q2 * ax + 4.0 * q0 * q1q1 - 2.0 * q1 * ay;
            let s1 = 4.0 * q1 * q3q3 - 2.0 * q3 * ax + 4.0 * q0q0 * q1 - 2.0 * q0 * ay - 4.0 * q1
                + 8.0 * q1 * q1q1
                + 8.0 * q1 * q2q2
                + 4.0 * q1 * az;
            let s2 = 4.0 * q0q0 * q2 + 2.0 * q0 * ax + 4.0 * q2 * q3q3 - 2.0 * q3 * ay - 4.0 * q2
                + 8.0 * q2 * q1q1
                + 8.0 * q2 * q2q2
                + 4.0 * q2 * az;
            let s3 = 4.0 * q1q1 * q3 - 2.0 * q1 * ax + 4.0 * q2q2 * q3 - 2.0 * q2 * ay;

            let s_magnitude = (s0 * s0 + s1 * s1 + s2 * s2 + s3 * s3).sqrt();
            if s_magnitude > MIN_ACCEL_MAGNITUDE {
                q_dot0 -= self.beta * s0 / s_magnitude;
                q_dot1 -= self.beta * s1 / s_magnitude;
                q_dot2 -= self.beta * s2 / s_magnitude;
                q_dot3 -= self.beta * s3 / s_magnitude;
            }
        }

        let mut q = [
            q0 + q_dot0 * self.sample_period,
            q1 + q_dot1 * self.sample_period,
            q2 + q_dot2 * self.sample_period,
            q3 + q_dot3 * self.sample_period,
        ];
        let norm = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
        for component in &mut q {
            *component /= norm;
        }
        self.q = q;
    }

    pub fn quaternion(&self) -> UnitQuaternion<f32> {
        let [w, x, y, z] = self.q;
        UnitQuaternion::from_quaternion(Quaternion::new(w, x, y, z))
    }

    /// Estimated gravity direction in the sensor frame, unit length.
    pub fn gravity(&self) -> [f32; 3] {
        let [q0, q1, q2, q3] = self.q;
        [
            2.0 * (q1 * q3 - q0 * q2),
            2.0 * (q0 * q1 + q2 * q3),
            q0 * q0 - q1 * q1 - q2 * q2 + q3 * q3,
        ]
    }
}
