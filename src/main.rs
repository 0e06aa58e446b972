#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::{
    delay::FreeRtos,
    i2c::{I2cConfig, I2cDriver},
    peripherals::Peripherals,
    units::Hertz,
};
#[cfg(target_os = "espidf")]
use face_up::{FaceTracker, Reporter};

/// Loop period of the ~100 Hz acquisition cycle
#[cfg(target_os = "espidf")]
const UPDATE_TIME_MS: u32 = 10;
/// The face sink emits at ~2 Hz
#[cfg(target_os = "espidf")]
const REPORT_INTERVAL_MS: u32 = 500;

#[cfg(target_os = "espidf")]
fn main() {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let peripherals = Peripherals::take().unwrap();

    let scl = peripherals.pins.gpio5;
    let sda = peripherals.pins.gpio4;

    let i2c_config = I2cConfig::default().baudrate(Hertz(400000));
    let i2c_driver = I2cDriver::new(peripherals.i2c0, sda, scl, &i2c_config).unwrap();

    let mut tracker = match FaceTracker::new(i2c_driver, &mut FreeRtos) {
        Ok(tracker) => tracker,
        Err(e) => {
            // no operator to intervene: report once, then halt
            log::error!("{e}");
            halt();
        }
    };

    let started = std::time::Instant::now();
    let mut reporter = Reporter::new(REPORT_INTERVAL_MS);

    loop {
        match tracker.step() {
            Ok(face) => {
                if reporter.should_emit(started.elapsed().as_millis() as u32) {
                    // the sink downstream parses a bare integer per line
                    println!("{face}");

                    let (roll, pitch, yaw) = tracker.attitude().euler_angles();
                    log::debug!(
                        "attitude: {:.1},{:.1},{:.1}",
                        roll.to_degrees(),
                        pitch.to_degrees(),
                        yaw.to_degrees()
                    );
                }
            }
            Err(e) => log::warn!("{e}"),
        }

        FreeRtos::delay_ms(UPDATE_TIME_MS);
    }
}

#[cfg(target_os = "espidf")]
fn halt() -> ! {
    loop {
        FreeRtos::delay_ms(1000);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("face-up drives an MPU6050 from an ESP32; build for the espidf target");
}
