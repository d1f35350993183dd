//! Configuration domain module

mod app_config;

pub use app_config::{AppConfig, CaptureDeviceConfig, DEFAULT_INPUT_DEVICE, DEFAULT_INPUT_FORMAT};
