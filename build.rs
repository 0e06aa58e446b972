fn main() {
    // embuild only has ESP-IDF environment to propagate when cross-compiling
    // for the ESP32; on the host there is nothing to emit.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
