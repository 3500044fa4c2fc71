fn main() {
    if let Err(err) = ev_stations::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
