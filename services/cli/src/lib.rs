mod cli;
mod commands;
mod infra;

use conduct_points::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
