fn main() {
    if let Err(err) = employee_sync::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
