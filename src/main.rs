fn main() {
    if let Err(err) = frise::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
