//! Cube-face orientation tracking on an MPU-6050.
//!
//! Polls the IMU over I2C, fuses gyro and accelerometer samples into an
//! attitude estimate and classifies which of the six cube faces points up
//! from the gravity-dominated acceleration vector. The library is
//! target-independent; the `face-up` binary binds it to the ESP32.

pub mod error;
pub mod face;
pub mod face_tracker;
pub mod mpu6050;
pub mod orientation;
pub mod report;

#[cfg(test)]
mod testutil;

pub use error::{Error, Result};
pub use face_tracker::FaceTracker;
pub use orientation::Madgwick;
pub use report::Reporter;
