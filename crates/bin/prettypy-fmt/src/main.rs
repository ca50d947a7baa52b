use std::process::ExitCode;

use prettypy_lang::log;

fn main() -> ExitCode {
    if cfg!(debug_assertions) | cfg!(test) {
        colog::default_builder()
            .filter_level(log::LevelFilter::Trace)
            .init();
    } else {
        colog::default_builder().init();
    }
    prettypy_fmt::lib_main()
}
