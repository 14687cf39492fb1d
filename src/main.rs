mod canvas;
mod error;
mod export;
mod font;
mod generator;
mod models;
mod utils;

use chrono::Local;
use models::IconSpec;
use std::io::Write;
use std::path::Path;

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            writeln!(buf, "[{}] {} {}", Local::now().format("%H:%M:%S"), record.level(), record.args())
        })
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let spec = IconSpec::favicon();
    let files = generator::create_favicon(&spec, Path::new("."))?;
    log::debug!("Outputs: {:?}", files);

    println!("Favicon created successfully! Files: {}, {}", spec.png_name, spec.ico_name);
    Ok(())
}
