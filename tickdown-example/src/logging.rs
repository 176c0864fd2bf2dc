use std::time::SystemTime;

use crate::config::{AppError, LoggingConfig};

pub fn setup_logger(config: &LoggingConfig) -> Result<(), AppError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(config.level_filter()?)
        .chain(std::io::stdout());
    if let Some(file) = &config.file {
        dispatch = dispatch.chain(fern::log_file(file)?);
    }
    dispatch.apply().map_err(fern::InitError::from)?;
    Ok(())
}
