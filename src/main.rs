fn main() {
    if let Err(err) = waterwatch_lib::run() {
        log::error!("waterwatch exited with error: {err:#}");
        eprintln!("waterwatch: {err:#}");
        std::process::exit(1);
    }
}
