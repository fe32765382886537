use js_deobfuscator::config::ConfigError;
use js_deobfuscator::errors::AppError;
use js_deobfuscator::DeobfuscationError;

#[test]
fn app_error_from_timeout() {
    let app: AppError = DeobfuscationError::Timeout.into();
    assert!(matches!(app, AppError::Deobfuscation(DeobfuscationError::Timeout)));
    assert_eq!(app.to_string(), "deobfuscation error: Script execution timed out");
}

#[test]
fn app_error_from_config_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let app: AppError = ConfigError::Io(io_err).into();
    assert!(matches!(app, AppError::Config(ConfigError::Io(_))));
}
