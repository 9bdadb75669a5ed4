//! 批量平滑/缩放一个目录下的所有轮廓文件, 并输出形状统计.
//!
//! 参数全部来自环境变量, 见 `utils::config` 和 `utils::loader`.

mod result;
mod runner;

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(utils::config::log_level())
        .init()
    {
        eprintln!("Failed to initialise logger: {e}");
    }

    match runner::run() {
        Ok(result) => {
            result.analyze();
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
