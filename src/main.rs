fn main() {
    if let Err(err) = storyflow_layout::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
