use log::SetLoggerError;
use simplelog::*;

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stdout,
        ColorChoice::Auto,
    )])
}
