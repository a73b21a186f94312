use env_logger::{Builder, Env};
use std::io::Write;

#[macro_export]
macro_rules! print_red {
    ($($arg:tt)*) => {
        println!("{}", ::colored::Colorize::red(&*format!($($arg)*)));
    };
}

#[macro_export]
macro_rules! print_green {
    ($($arg:tt)*) => {
        println!("{}", ::colored::Colorize::green(&*format!($($arg)*)));
    };
}

#[macro_export]
macro_rules! print_yellow {
    ($($arg:tt)*) => {
        println!("{}", ::colored::Colorize::yellow(&*format!($($arg)*)));
    };
}

#[macro_export]
macro_rules! print_blue {
    ($($arg:tt)*) => {
        println!("{}", ::colored::Colorize::blue(&*format!($($arg)*)));
    };
}

/// `LEVEL [file:line] message`, filtered by `RUST_LOG` (default `info`).
pub fn init_logging() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);
            writeln!(
                buf,
                "{} [{}:{}] {}",
                record.level(),
                file,
                line,
                record.args()
            )
        })
        .init();
}
